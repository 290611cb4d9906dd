//! Change-note extraction from pull request descriptions.
use regex::{Regex, RegexBuilder};
use std::collections::BTreeSet;

use crate::{
    error::{NotesaurusError, Result},
    forge::request::PullRequest,
    notes::{
        events::{EventSink, NoteEvent},
        types::ChangeNote,
    },
};

/// Extracts change notes from pull request records.
///
/// The summary pattern detects fenced release-note blocks in a pull request
/// body. Detected blocks are used instead of the pull request title, which
/// uncouples pull requests and notes somewhat: while ideally a pull request
/// introduces a change that would be described in a single note, this is
/// often not the case.
pub struct Extractor {
    summary: Regex,
    label_attribute: Regex,
}

impl Extractor {
    /// Compile the extraction patterns.
    ///
    /// `summary_pattern` is compiled with multi-line semantics and must
    /// contain a `summary` capture group; `label_attribute_pattern` must
    /// contain a `label` capture group. Invalid patterns are configuration
    /// errors, extraction itself never fails.
    pub fn new(
        summary_pattern: &str,
        label_attribute_pattern: &str,
    ) -> Result<Self> {
        let summary = RegexBuilder::new(summary_pattern)
            .multi_line(true)
            .build()?;

        if !summary.capture_names().flatten().any(|name| name == "summary") {
            return Err(NotesaurusError::invalid_config(
                "pr_summary_pattern must contain a 'summary' capture group",
            ));
        }

        let label_attribute = Regex::new(label_attribute_pattern)?;

        if !label_attribute
            .capture_names()
            .flatten()
            .any(|name| name == "label")
        {
            return Err(NotesaurusError::invalid_config(
                "label_attribute_pattern must contain a 'label' capture group",
            ));
        }

        Ok(Self {
            summary,
            label_attribute,
        })
    }

    /// Extract notes from every given pull request.
    pub fn extract_all(
        &self,
        pull_requests: &[PullRequest],
        sink: &dyn EventSink,
    ) -> BTreeSet<ChangeNote> {
        let mut notes = BTreeSet::new();

        for pr in pull_requests {
            notes.extend(self.extract(pr, sink));
        }

        notes
    }

    /// Extract one or more notes from a single pull request.
    ///
    /// Total for any body content: a missing body, a body without
    /// release-note blocks, or a block without a label attribute all degrade
    /// to documented fallbacks rather than failing.
    pub fn extract(
        &self,
        pr: &PullRequest,
        sink: &dyn EventSink,
    ) -> BTreeSet<ChangeNote> {
        let mut notes = BTreeSet::new();
        let body = pr.body.as_deref().unwrap_or_default();
        let matches: Vec<_> = self.summary.captures_iter(body).collect();

        if matches.is_empty() {
            sink.emit(NoteEvent::TitleFallback {
                reference_url: pr.url.clone(),
            });
            notes.insert(ChangeNote {
                content: pr.title.trim().to_string(),
                reference_name: format!("#{}", pr.number),
                reference_url: pr.url.clone(),
                labels: pr.labels.clone(),
                timestamp: pr.merged_at,
            });
            return notes;
        }

        debug_assert!(!matches.is_empty());
        for captures in matches {
            let summary = captures
                .name("summary")
                .map(|m| m.as_str())
                .unwrap_or_default();

            let (content, labels) =
                match self.label_attribute.captures(summary) {
                    Some(label_match) => {
                        let labels = label_match
                            .name("label")
                            .map(|m| m.as_str())
                            .unwrap_or_default()
                            .split(',')
                            .map(|label| label.trim().to_string())
                            .collect();
                        // remove the attribute block from the note itself
                        let content =
                            self.label_attribute.replace_all(summary, "");
                        (content.trim().to_string(), labels)
                    }
                    None => {
                        sink.emit(NoteEvent::LabelFallback {
                            summary: summary.to_string(),
                            reference_url: pr.url.clone(),
                        });
                        (summary.trim().to_string(), pr.labels.clone())
                    }
                };

            notes.insert(ChangeNote {
                content,
                reference_name: format!("#{}", pr.number),
                reference_url: pr.url.clone(),
                labels,
                timestamp: pr.merged_at,
            });
        }

        notes
    }
}

#[cfg(test)]
#[path = "./extract_tests.rs"]
mod tests;
