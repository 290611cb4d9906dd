//! Command execution for Notesaurus.

/// Release-notes generation pipeline.
pub mod generate;
