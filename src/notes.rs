//! Core notes pipeline: extract change notes from pull requests, classify
//! them into sections, and render the release-notes document.

/// Classification of notes into ordered sections.
pub mod classify;

/// Observability events emitted by the pipeline.
pub mod events;

/// Change-note extraction from pull request descriptions.
pub mod extract;

/// Markdown and reStructuredText rendering.
pub mod format;

/// Placeholder template expansion.
pub mod template;

/// Value types shared across the pipeline.
pub mod types;
