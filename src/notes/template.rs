//! Minimal placeholder expansion for title, intro and outro templates.
use regex::Regex;
use std::sync::LazyLock;

use crate::error::{NotesaurusError, Result};

static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(\w+)\}").unwrap());

/// Expand `{repo_name}` and `{version}` placeholders in `template`.
///
/// `name` identifies the template in error messages. Referencing any other
/// placeholder is a fatal configuration error: it indicates a broken
/// configuration rather than bad input data.
pub fn expand(
    name: &str,
    template: &str,
    repo_name: &str,
    version: &str,
) -> Result<String> {
    let mut expanded = String::with_capacity(template.len());
    let mut last = 0;

    for matched in PLACEHOLDER_REGEX.find_iter(template) {
        // the match is "{key}", braces included
        let key = &template[matched.start() + 1..matched.end() - 1];
        expanded.push_str(&template[last..matched.start()]);

        match key {
            "repo_name" => expanded.push_str(repo_name),
            "version" => expanded.push_str(version),
            _ => {
                return Err(NotesaurusError::unknown_placeholder(name, key));
            }
        }

        last = matched.end();
    }

    expanded.push_str(&template[last..]);
    Ok(expanded)
}
