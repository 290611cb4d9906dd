//! Traits related to remote git forges.
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::{
    error::Result,
    forge::{
        config::RemoteConfig,
        request::{Contributors, ForgeCommit, PullRequest},
    },
};

/// A remote forge hosting the repository's pull requests and users.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Forge {
    /// Connection configuration for this forge.
    fn config(&self) -> &RemoteConfig;

    /// Fetch a file from the repository root, if present.
    async fn get_file_content(&self, path: &str) -> Result<Option<String>>;

    /// Fetch commits reachable from `stop_rev` but not from `start_rev`,
    /// excluding the commit of `start_rev` itself.
    async fn commits_between(
        &self,
        start_rev: &str,
        stop_rev: &str,
    ) -> Result<Vec<ForgeCommit>>;

    /// Fetch merged pull requests associated with the given commits,
    /// deduplicated by number.
    async fn pull_requests_for_commits(
        &self,
        commits: &[ForgeCommit],
    ) -> Result<Vec<PullRequest>>;

    /// Fetch commit authors, co-authors and reviewers.
    async fn contributors(
        &self,
        commits: &[ForgeCommit],
        pull_requests: &[PullRequest],
    ) -> Result<Contributors>;
}
