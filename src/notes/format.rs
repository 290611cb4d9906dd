//! Rendering of classified notes and contributors into release-notes
//! documents.
//!
//! A small format strategy covers what differs between Markdown and
//! reStructuredText; the shared skeleton produces the document as a lazy
//! sequence of newline-terminated lines.
use std::collections::BTreeSet;

use crate::{
    error::Result,
    notes::{
        classify::Section,
        template,
        types::{ChangeNote, Contributor},
    },
};

/// Header levels used in the generated document.
#[derive(Debug, Clone, Copy)]
pub enum HeaderLevel {
    Title,
    Section,
    Subsection,
}

/// Templates and filters applied while rendering.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Template for the level-1 document title.
    pub title_template: String,
    /// Template for the block following the title.
    pub intro_template: String,
    /// Template for the block closing the document.
    pub outro_template: String,
    /// Logins excluded from the contributor lists.
    pub ignored_user_logins: BTreeSet<String>,
}

/// Format strategy: the pieces that differ between Markdown and
/// reStructuredText.
pub trait Format {
    /// Remove newlines, strip whitespace and escape format-specific syntax.
    fn sanitize_text(&self, text: &str) -> String;

    /// Render an inline link.
    fn format_link(&self, name: &str, target: &str) -> String;

    /// Render a header as one or more terminated lines.
    fn format_section_title(
        &self,
        title: &str,
        level: HeaderLevel,
    ) -> Vec<String>;
}

/// Remove newlines and strip whitespace.
fn strip_newlines(text: &str) -> String {
    text.trim().replace("\r\n", " ").replace('\n', " ")
}

/// Markdown format strategy.
pub struct Markdown;

impl Format for Markdown {
    fn sanitize_text(&self, text: &str) -> String {
        strip_newlines(text)
    }

    fn format_link(&self, name: &str, target: &str) -> String {
        format!("[{name}]({target})")
    }

    fn format_section_title(
        &self,
        title: &str,
        level: HeaderLevel,
    ) -> Vec<String> {
        let depth = match level {
            HeaderLevel::Title => 1,
            HeaderLevel::Section => 2,
            HeaderLevel::Subsection => 3,
        };
        vec![format!("{} {title}\n", "#".repeat(depth))]
    }
}

/// reStructuredText format strategy.
pub struct Rst;

impl Format for Rst {
    fn sanitize_text(&self, text: &str) -> String {
        // double backticks to form reST literals
        strip_newlines(text).replace('`', "``")
    }

    fn format_link(&self, name: &str, target: &str) -> String {
        format!("`{name} <{target}>`_")
    }

    fn format_section_title(
        &self,
        title: &str,
        level: HeaderLevel,
    ) -> Vec<String> {
        let underline = match level {
            HeaderLevel::Title => "=",
            HeaderLevel::Section => "-",
            HeaderLevel::Subsection => "~",
        };
        vec![
            format!("{title}\n"),
            format!("{}\n", underline.repeat(title.chars().count())),
        ]
    }
}

/// Formats release notes from classified sections, authors and reviewers.
///
/// Templates are expanded up front so a misconfigured template fails fast;
/// iteration itself is infallible, lazy and restartable.
pub struct NotesFormatter {
    format: Box<dyn Format>,
    title: String,
    intro: String,
    outro: String,
    ignored_user_logins: BTreeSet<String>,
    sections: Vec<Section>,
    authors: BTreeSet<Contributor>,
    reviewers: BTreeSet<Contributor>,
}

impl NotesFormatter {
    /// Create a formatter for the given format strategy, expanding all
    /// templates.
    pub fn new(
        format: Box<dyn Format>,
        config: RenderConfig,
        repo_name: &str,
        version: &str,
        sections: Vec<Section>,
        authors: BTreeSet<Contributor>,
        reviewers: BTreeSet<Contributor>,
    ) -> Result<Self> {
        let title =
            template::expand("title", &config.title_template, repo_name, version)?;
        let intro =
            template::expand("intro", &config.intro_template, repo_name, version)?;
        let outro =
            template::expand("outro", &config.outro_template, repo_name, version)?;

        Ok(Self {
            format,
            title,
            intro,
            outro,
            ignored_user_logins: config.ignored_user_logins,
            sections,
            authors,
            reviewers,
        })
    }

    /// Iterate the release notes document line-wise.
    ///
    /// Every yielded line ends with exactly one newline and contains no
    /// other newline character, so callers may stream lines directly to
    /// their output without buffering. Re-calling restarts iteration from
    /// the same immutable inputs.
    pub fn iter_lines(&self) -> impl Iterator<Item = String> + '_ {
        self.format
            .format_section_title(&self.title, HeaderLevel::Title)
            .into_iter()
            .chain(std::iter::once("\n".to_string()))
            .chain(self.template_lines(&self.intro))
            .chain(
                self.sections
                    .iter()
                    .flat_map(|section| self.section_lines(section)),
            )
            .chain(self.contributor_lines())
            .chain(self.template_lines(&self.outro))
    }

    /// Return the complete release notes document as a string.
    pub fn document(&self) -> String {
        self.iter_lines().collect()
    }

    /// Split an expanded template into sanitized, terminated lines.
    fn template_lines(&self, text: &str) -> Vec<String> {
        text.split('\n')
            .map(|line| format!("{}\n", self.format.sanitize_text(line)))
            .collect()
    }

    /// Format a section title and list its notes sorted by merge date.
    fn section_lines(&self, section: &Section) -> Vec<String> {
        if section.notes.is_empty() {
            return Vec::new();
        }

        let mut lines = self
            .format
            .format_section_title(&section.title, HeaderLevel::Section);
        lines.push("\n".to_string());

        let mut notes: Vec<&ChangeNote> = section.notes.iter().collect();
        // content and reference name keep equal timestamps deterministic
        notes.sort_by(|a, b| {
            a.timestamp
                .cmp(&b.timestamp)
                .then_with(|| a.content.cmp(&b.content))
                .then_with(|| a.reference_name.cmp(&b.reference_name))
        });

        for note in notes {
            lines.push(self.note_line(note));
        }
        lines.push("\n".to_string());

        lines
    }

    /// Format a note about an atomic change.
    fn note_line(&self, note: &ChangeNote) -> String {
        let link = self
            .format
            .format_link(&note.reference_name, &note.reference_url);
        let summary = self.format.sanitize_text(&note.content);
        let summary = summary.trim_end_matches('.');
        format!("- {summary} ({link}).\n")
    }

    fn contributor_line(&self, contributor: &Contributor) -> String {
        let link = self.format.format_link(
            &contributor.reference_name(),
            &contributor.reference_url,
        );
        match &contributor.name {
            Some(name) => format!("- {name} ({link})\n"),
            None => format!("- {link}\n"),
        }
    }

    /// Format the contributor section, listing each group sorted
    /// case-insensitively by its rendered lines.
    fn contributor_lines(&self) -> Vec<String> {
        let mut lines = self
            .format
            .format_section_title("Contributors", HeaderLevel::Section);
        lines.push("\n".to_string());

        for (group, group_name) in
            [(&self.authors, "authors"), (&self.reviewers, "reviewers")]
        {
            let mut group_lines: Vec<String> = group
                .iter()
                .filter(|contributor| {
                    !self.ignored_user_logins.contains(&contributor.login)
                })
                .map(|contributor| self.contributor_line(contributor))
                .collect();
            group_lines.sort_by_key(|line| line.to_lowercase());

            lines.push(format!(
                "{} {group_name} added to this release (alphabetically):\n",
                group_lines.len()
            ));
            lines.push("\n".to_string());
            lines.extend(group_lines);
            lines.push("\n".to_string());
        }

        lines
    }
}

#[cfg(test)]
#[path = "./format_tests.rs"]
mod tests;
