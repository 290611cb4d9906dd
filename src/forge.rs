//! GitHub retrieval layer supplying pull request and contributor records to
//! the notes pipeline.

/// Connection configuration for the remote repository.
pub mod config;

/// GitHub API client implementation.
pub mod github;

/// Normalized record types returned from the forge.
pub mod request;

/// Forge abstraction consumed by the command layer.
pub mod traits;
