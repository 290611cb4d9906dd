//! Normalized record types returned from the forge.
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

use crate::notes::types::Contributor;

/// A merged pull request as consumed by the extraction pipeline.
#[derive(Debug, Clone)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub body: Option<String>,
    pub labels: Vec<String>,
    pub url: String,
    pub merged_at: DateTime<Utc>,
}

/// A forge user account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ForgeUser {
    pub login: String,
    pub name: Option<String>,
    pub url: String,
}

impl From<ForgeUser> for Contributor {
    fn from(user: ForgeUser) -> Self {
        Self {
            name: user.name,
            login: user.login,
            reference_url: user.url,
        }
    }
}

/// A commit in the compared revision range.
#[derive(Debug, Clone)]
pub struct ForgeCommit {
    pub sha: String,
    pub url: String,
    pub message: String,
    /// Login of the user who authored the commit, if resolvable.
    pub author_login: Option<String>,
    /// Login of the user who committed (e.g. merged) the commit, if
    /// resolvable.
    pub committer_login: Option<String>,
}

/// Authors and reviewers collected for a revision range.
///
/// Authors are users who created or co-authored a commit; reviewers are
/// users who reviewed a merged pull request or committed the merge itself.
#[derive(Debug, Clone, Default)]
pub struct Contributors {
    pub authors: BTreeSet<ForgeUser>,
    pub reviewers: BTreeSet<ForgeUser>,
}
