//! Observability events emitted while extracting and classifying notes.
use log::*;

/// Non-fatal events describing fallback and classification decisions.
///
/// These are observable behavior, not errors: extraction and classification
/// always succeed, and the events record which documented fallback was taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteEvent {
    /// No release-note block matched, the PR title was used instead.
    TitleFallback { reference_url: String },
    /// A release-note block carried no label attribute, the PR's own labels
    /// were used instead.
    LabelFallback {
        summary: String,
        reference_url: String,
    },
    /// A note matched no section pattern and was sorted into "Other".
    UnmatchedLabels {
        reference_name: String,
        reference_url: String,
    },
}

/// Sink receiving pipeline events.
///
/// Injectable so tests can assert on emitted events without capturing
/// process-wide logger output.
pub trait EventSink {
    fn emit(&self, event: NoteEvent);
}

/// Default sink forwarding events to the `log` crate.
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&self, event: NoteEvent) {
        match event {
            NoteEvent::TitleFallback { reference_url } => {
                debug!("falling back to title for {reference_url}");
            }
            NoteEvent::LabelFallback {
                summary,
                reference_url,
            } => {
                debug!(
                    "falling back to PR labels for summary {summary:?} in {reference_url}"
                );
            }
            NoteEvent::UnmatchedLabels { reference_url, .. } => {
                warn!(
                    "{reference_url} without matching label, sorting into section 'Other'"
                );
            }
        }
    }
}
