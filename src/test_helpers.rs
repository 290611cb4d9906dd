//! Common test helper functions shared across test modules.
use chrono::{DateTime, TimeZone, Utc};
use std::cell::RefCell;

use crate::{
    forge::request::PullRequest,
    notes::{
        events::{EventSink, NoteEvent},
        types::{ChangeNote, Contributor},
    },
};

/// Event sink recording emitted events for assertions.
#[derive(Default)]
pub struct RecordingSink {
    events: RefCell<Vec<NoteEvent>>,
}

impl RecordingSink {
    /// Snapshot of the events emitted so far.
    pub fn events(&self) -> Vec<NoteEvent> {
        self.events.borrow().clone()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: NoteEvent) {
        self.events.borrow_mut().push(event);
    }
}

/// Creates a UTC midnight timestamp for fixtures.
pub fn timestamp(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

/// Creates a test PullRequest with sensible defaults.
pub fn create_test_pull_request(
    number: u64,
    title: &str,
    body: Option<&str>,
    labels: &[&str],
) -> PullRequest {
    PullRequest {
        number,
        title: title.to_string(),
        body: body.map(|body| body.to_string()),
        labels: labels.iter().map(|label| label.to_string()).collect(),
        url: format!("https://github.com/foo-group/foolib/pull/{number}"),
        merged_at: timestamp(2024, 1, 1),
    }
}

/// Creates a test ChangeNote referencing the given pull request number.
pub fn create_test_note(
    content: &str,
    number: u64,
    labels: &[&str],
    merged_at: DateTime<Utc>,
) -> ChangeNote {
    ChangeNote {
        content: content.to_string(),
        reference_name: format!("#{number}"),
        reference_url: format!(
            "https://github.com/foo-group/foolib/pull/{number}"
        ),
        labels: labels.iter().map(|label| label.to_string()).collect(),
        timestamp: merged_at,
    }
}

/// Creates a test Contributor with a GitHub profile link.
pub fn create_test_contributor(
    name: Option<&str>,
    login: &str,
) -> Contributor {
    Contributor {
        name: name.map(|name| name.to_string()),
        login: login.to_string(),
        reference_url: format!("https://github.com/{login}"),
    }
}
