//! Value types shared across the notes pipeline.
use chrono::{DateTime, Utc};

/// Describes an atomic change in the notes.
///
/// Created only by the extractor and never mutated afterwards. Two notes
/// with identical field values compare equal, so duplicates collapse when
/// notes are held in a set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChangeNote {
    /// Free-form, single-change description shown in the notes.
    pub content: String,
    /// Display name of the originating pull request (e.g. "#42").
    pub reference_name: String,
    /// Link target of the originating pull request.
    pub reference_url: String,
    /// Labels governing which sections this note is sorted into.
    pub labels: Vec<String>,
    /// Merge time of the originating pull request.
    pub timestamp: DateTime<Utc>,
}

/// A person mentioned in the notes as an author or reviewer.
///
/// `login` should be the GitHub handle without "@". The "@" is added by
/// [`Contributor::reference_name`]. `reference_url` is typically a URL to
/// the contributor's GitHub profile.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Contributor {
    /// Optional display name.
    pub name: Option<String>,
    /// Unique login handle.
    pub login: String,
    /// Link target for this contributor.
    pub reference_url: String,
}

impl Contributor {
    /// The login handle with prefixed "@".
    pub fn reference_name(&self) -> String {
        format!("@{}", self.login)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::timestamp;
    use std::collections::BTreeSet;

    #[test]
    fn identical_notes_collapse_in_a_set() {
        let note = ChangeNote {
            content: "Add `foo`.".to_string(),
            reference_name: "#1".to_string(),
            reference_url: "https://github.com/foo-group/foolib/pull/1"
                .to_string(),
            labels: vec!["New feature".to_string()],
            timestamp: timestamp(2023, 1, 1),
        };

        let mut notes = BTreeSet::new();
        notes.insert(note.clone());
        notes.insert(note);

        assert_eq!(notes.len(), 1);
    }

    #[test]
    fn contributor_reference_name_prefixes_login() {
        let contributor = Contributor {
            name: None,
            login: "lungile".to_string(),
            reference_url: "https://github.com/lungile".to_string(),
        };

        assert_eq!(contributor.reference_name(), "@lungile");
    }
}
