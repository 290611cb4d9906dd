//! Classification of change notes into ordered report sections.
use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use std::collections::BTreeSet;

use crate::{
    error::Result,
    notes::{
        events::{EventSink, NoteEvent},
        types::ChangeNote,
    },
};

/// Title of the synthetic trailing section collecting unmatched notes.
pub const OTHER_SECTION_TITLE: &str = "Other";

/// A single pattern-to-title rule in the section table.
#[derive(Debug, Clone, Deserialize)]
pub struct SectionRule {
    /// Regex matched case-insensitively against the start of a note label.
    pub pattern: String,
    /// Section title in the generated notes.
    pub title: String,
}

/// A named bucket of notes in the output document.
#[derive(Debug, Clone)]
pub struct Section {
    pub title: String,
    pub notes: BTreeSet<ChangeNote>,
}

/// Ordered regex-to-section table compiled from configuration.
///
/// Table order defines the section display order, not match priority: a note
/// joins every section whose pattern matches one of its labels. Rules
/// sharing a title feed a single bucket.
pub struct SectionTable {
    rules: Vec<(Regex, String)>,
}

impl SectionTable {
    /// Compile the section patterns.
    ///
    /// Patterns are anchored at the start of the label, so a pattern matches
    /// a label when it matches any prefix of it.
    pub fn new(rules: &[SectionRule]) -> Result<Self> {
        let mut compiled = Vec::with_capacity(rules.len());

        for rule in rules {
            let regex = RegexBuilder::new(&format!("^(?:{})", rule.pattern))
                .case_insensitive(true)
                .build()?;
            compiled.push((regex, rule.title.clone()));
        }

        Ok(Self { rules: compiled })
    }

    /// Bucket notes into sections, preserving table order.
    ///
    /// Every note lands in at least one section: notes matching no pattern
    /// are sorted into the trailing "Other" section and reported through the
    /// sink.
    pub fn classify(
        &self,
        notes: &BTreeSet<ChangeNote>,
        sink: &dyn EventSink,
    ) -> Vec<Section> {
        let mut sections: Vec<Section> = Vec::new();

        for (_, title) in &self.rules {
            if !sections.iter().any(|section| section.title == *title) {
                sections.push(Section {
                    title: title.clone(),
                    notes: BTreeSet::new(),
                });
            }
        }

        if !sections
            .iter()
            .any(|section| section.title == OTHER_SECTION_TITLE)
        {
            sections.push(Section {
                title: OTHER_SECTION_TITLE.to_string(),
                notes: BTreeSet::new(),
            });
        }

        for note in notes {
            let matching: Vec<&String> = self
                .rules
                .iter()
                .filter(|(regex, _)| {
                    note.labels.iter().any(|label| regex.is_match(label))
                })
                .map(|(_, title)| title)
                .collect();

            if matching.is_empty() {
                sink.emit(NoteEvent::UnmatchedLabels {
                    reference_name: note.reference_name.clone(),
                    reference_url: note.reference_url.clone(),
                });
                insert_into(&mut sections, OTHER_SECTION_TITLE, note);
                continue;
            }

            for title in matching {
                insert_into(&mut sections, title, note);
            }
        }

        sections
    }
}

fn insert_into(sections: &mut [Section], title: &str, note: &ChangeNote) {
    if let Some(section) =
        sections.iter_mut().find(|section| section.title == title)
    {
        section.notes.insert(note.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{RecordingSink, create_test_note, timestamp};

    fn rules(pairs: &[(&str, &str)]) -> Vec<SectionRule> {
        pairs
            .iter()
            .map(|(pattern, title)| SectionRule {
                pattern: pattern.to_string(),
                title: title.to_string(),
            })
            .collect()
    }

    fn notes_of(sections: &[Section], title: &str) -> Vec<String> {
        sections
            .iter()
            .find(|section| section.title == title)
            .map(|section| {
                section
                    .notes
                    .iter()
                    .map(|note| note.content.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    #[test]
    fn preserves_table_order_and_appends_other() {
        let table = SectionTable::new(&rules(&[
            (".*New feature.*", "New Features"),
            (".*Bug fix.*", "Bug Fixes"),
        ]))
        .unwrap();

        let sections =
            table.classify(&BTreeSet::new(), &RecordingSink::default());

        let titles: Vec<&str> =
            sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["New Features", "Bug Fixes", "Other"]);
    }

    #[test]
    fn note_joins_every_matching_section() {
        let table = SectionTable::new(&rules(&[
            (".*Bug fix.*", "Bug Fixes"),
            (".*API.*", "API Changes"),
        ]))
        .unwrap();

        let note = create_test_note(
            "Deprecate `bar`",
            1,
            &["api", "Bug fix"],
            timestamp(2023, 1, 1),
        );
        let notes = BTreeSet::from([note]);

        let sink = RecordingSink::default();
        let sections = table.classify(&notes, &sink);

        assert_eq!(notes_of(&sections, "Bug Fixes"), vec!["Deprecate `bar`"]);
        assert_eq!(notes_of(&sections, "API Changes"), vec!["Deprecate `bar`"]);
        assert!(notes_of(&sections, "Other").is_empty());
        assert!(sink.events().is_empty());
    }

    #[test]
    fn unmatched_note_lands_in_other_only() {
        let table = SectionTable::new(&rules(&[(
            ".*New feature.*",
            "New Features",
        )]))
        .unwrap();

        let note =
            create_test_note("Mystery change.", 3, &[], timestamp(2023, 1, 3));
        let notes = BTreeSet::from([note]);

        let sink = RecordingSink::default();
        let sections = table.classify(&notes, &sink);

        assert!(notes_of(&sections, "New Features").is_empty());
        assert_eq!(notes_of(&sections, "Other"), vec!["Mystery change."]);

        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            &events[0],
            NoteEvent::UnmatchedLabels { reference_name, .. }
                if reference_name == "#3"
        ));
    }

    #[test]
    fn matches_label_prefix_case_insensitively() {
        let table = SectionTable::new(&rules(&[("bug", "Bug Fixes")])).unwrap();

        let prefixed =
            create_test_note("A fix.", 1, &["Bug fix"], timestamp(2023, 1, 1));
        let infix = create_test_note(
            "Another fix.",
            2,
            &["fixed bug"],
            timestamp(2023, 1, 2),
        );
        let notes = BTreeSet::from([prefixed, infix]);

        let sink = RecordingSink::default();
        let sections = table.classify(&notes, &sink);

        // pattern matches a prefix of the label, not anywhere inside it
        assert_eq!(notes_of(&sections, "Bug Fixes"), vec!["A fix."]);
        assert_eq!(notes_of(&sections, "Other"), vec!["Another fix."]);
    }

    #[test]
    fn rules_sharing_a_title_share_a_bucket() {
        let table = SectionTable::new(&rules(&[
            (".*Enhancement.*", "Improvements"),
            (".*Performance.*", "Improvements"),
        ]))
        .unwrap();

        let first = create_test_note(
            "Polish a corner.",
            1,
            &["Enhancement"],
            timestamp(2023, 1, 1),
        );
        let second = create_test_note(
            "Speed up a loop.",
            2,
            &["Performance"],
            timestamp(2023, 1, 2),
        );
        let notes = BTreeSet::from([first, second]);

        let sections = table.classify(&notes, &RecordingSink::default());

        let titles: Vec<&str> =
            sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Improvements", "Other"]);
        assert_eq!(
            notes_of(&sections, "Improvements"),
            vec!["Polish a corner.", "Speed up a loop."]
        );
    }
}
