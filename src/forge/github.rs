//! Implements the Forge trait for GitHub
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::*;
use octocrab::Octocrab;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tokio::sync::Mutex;

use crate::{
    error::{NotesaurusError, Result},
    forge::{
        config::{COMPARE_PAGE_SIZE, DEFAULT_PAGE_SIZE, RemoteConfig},
        request::{Contributors, ForgeCommit, ForgeUser, PullRequest},
        traits::Forge,
    },
};

const AUTHORS_QUERY: &str = r#"
query GetCommitAuthors($owner: String!, $repo: String!, $sha: GitObjectID!, $page_limit: Int!) {
  repository(owner: $owner, name: $repo) {
    object(oid: $sha) {
      ... on Commit {
        authors(first: $page_limit) {
          edges {
            node {
              user {
                login
                name
                url
              }
            }
          }
        }
      }
    }
  }
}"#;

#[derive(Debug, Serialize)]
struct AuthorsQueryVariables {
    pub owner: String,
    pub repo: String,
    pub sha: String,
    pub page_limit: u64,
}

#[derive(Debug, Deserialize)]
struct AuthorsQueryUser {
    pub login: String,
    pub name: Option<String>,
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct AuthorsQueryNode {
    pub user: Option<AuthorsQueryUser>,
}

#[derive(Debug, Deserialize)]
struct AuthorsQueryEdge {
    pub node: AuthorsQueryNode,
}

#[derive(Debug, Deserialize)]
struct AuthorsQueryAuthors {
    pub edges: Vec<AuthorsQueryEdge>,
}

#[derive(Debug, Deserialize)]
struct AuthorsQueryObject {
    pub authors: AuthorsQueryAuthors,
}

#[derive(Debug, Deserialize)]
struct AuthorsQueryRepository {
    pub object: Option<AuthorsQueryObject>,
}

#[derive(Debug, Deserialize)]
struct AuthorsQueryData {
    pub repository: AuthorsQueryRepository,
}

#[derive(Debug, Deserialize)]
struct AuthorsQueryResult {
    pub data: AuthorsQueryData,
}

#[derive(Debug, Deserialize)]
struct UserPayload {
    pub login: String,
    pub name: Option<String>,
    pub html_url: String,
}

#[derive(Debug, Deserialize)]
struct SimpleUserPayload {
    pub login: String,
}

#[derive(Debug, Deserialize)]
struct CommitDetailPayload {
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct CompareCommitPayload {
    pub sha: String,
    pub html_url: String,
    pub commit: CommitDetailPayload,
    pub author: Option<SimpleUserPayload>,
    pub committer: Option<SimpleUserPayload>,
}

#[derive(Debug, Deserialize)]
struct ComparePayload {
    pub commits: Vec<CompareCommitPayload>,
}

#[derive(Debug, Deserialize)]
struct LabelPayload {
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct PullPayload {
    pub number: u64,
    pub title: String,
    pub body: Option<String>,
    pub html_url: String,
    pub labels: Vec<LabelPayload>,
    pub merged_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct ReviewPayload {
    pub user: Option<SimpleUserPayload>,
}

/// GitHub forge implementation using Octocrab for API interactions with
/// commits, pull requests and users.
pub struct Github {
    config: RemoteConfig,
    base_uri: String,
    instance: Octocrab,
    user_cache: Mutex<HashMap<String, ForgeUser>>,
}

impl Github {
    /// Create GitHub client with personal access token authentication.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let base_uri = config.api_base_url();
        let instance = Octocrab::builder()
            .personal_token(config.token.clone())
            .base_uri(base_uri.clone())?
            .build()?;

        Ok(Self {
            config,
            base_uri,
            instance,
            user_cache: Mutex::new(HashMap::new()),
        })
    }

    /// Resolve a user's profile record, caching lookups by login.
    async fn get_user(&self, login: &str) -> Result<ForgeUser> {
        let mut cache = self.user_cache.lock().await;

        if let Some(user) = cache.get(login) {
            return Ok(user.clone());
        }

        let route = format!("{}/users/{}", self.base_uri, login);
        let payload: UserPayload =
            self.instance.get(route, None::<&()>).await?;

        let user = ForgeUser {
            login: payload.login,
            name: payload.name,
            url: payload.html_url,
        };
        cache.insert(login.to_string(), user.clone());

        Ok(user)
    }

    /// Fetch all authors of a commit through the GraphQL API.
    ///
    /// Other than the REST API, the GraphQL API supports returning
    /// co-authors of a commit as well.
    async fn commit_authors(&self, sha: &str) -> Result<Vec<ForgeUser>> {
        let vars = AuthorsQueryVariables {
            owner: self.config.owner.clone(),
            repo: self.config.repo.clone(),
            sha: sha.to_string(),
            page_limit: DEFAULT_PAGE_SIZE.into(),
        };

        let json = serde_json::json!({
            "query": AUTHORS_QUERY,
            "variables": vars,
        });

        let result: AuthorsQueryResult = self.instance.graphql(&json).await?;

        let Some(object) = result.data.repository.object else {
            return Err(NotesaurusError::forge(format!(
                "commit {sha} not found while querying authors"
            )));
        };

        let edges = object.authors.edges;

        if edges.len() >= DEFAULT_PAGE_SIZE as usize {
            warn!(
                "reached page limit while querying authors of {sha}, only \
                 the first {DEFAULT_PAGE_SIZE} authors will be included"
            );
        }

        let mut authors = vec![];

        for edge in edges {
            match edge.node.user {
                Some(user) => authors.push(ForgeUser {
                    login: user.login,
                    name: user.name,
                    url: user.url,
                }),
                None => warn!(
                    "could not determine GitHub user for an author of {sha}"
                ),
            }
        }

        Ok(authors)
    }
}

#[async_trait]
impl Forge for Github {
    fn config(&self) -> &RemoteConfig {
        &self.config
    }

    async fn get_file_content(&self, path: &str) -> Result<Option<String>> {
        let result = self
            .instance
            .repos(&self.config.owner, &self.config.repo)
            .get_content()
            .path(path)
            .send()
            .await;

        match result {
            Err(octocrab::Error::GitHub { source, .. })
                if source.status_code == StatusCode::NOT_FOUND =>
            {
                info!("no file found for path: {path}");
                Ok(None)
            }
            Err(err) => Err(err.into()),
            Ok(mut data) => {
                let items = data.take_items();

                if items.is_empty() {
                    info!("no file found for path: {path}");
                    return Ok(None);
                }

                match items[0].decoded_content() {
                    Some(content) => Ok(Some(content)),
                    None => Err(NotesaurusError::forge(format!(
                        "failed to decode file content for path: {path}"
                    ))),
                }
            }
        }
    }

    async fn commits_between(
        &self,
        start_rev: &str,
        stop_rev: &str,
    ) -> Result<Vec<ForgeCommit>> {
        let mut commits = vec![];
        let mut page: u32 = 1;

        // the compare endpoint excludes the base commit itself
        loop {
            let route = format!(
                "{}/repos/{}/{}/compare/{}...{}?per_page={}&page={}",
                self.base_uri,
                self.config.owner,
                self.config.repo,
                start_rev,
                stop_rev,
                COMPARE_PAGE_SIZE,
                page,
            );

            let payload: ComparePayload =
                self.instance.get(route, None::<&()>).await?;

            let page_len = payload.commits.len();

            for commit in payload.commits {
                commits.push(ForgeCommit {
                    sha: commit.sha,
                    url: commit.html_url,
                    message: commit.commit.message,
                    author_login: commit.author.map(|user| user.login),
                    committer_login: commit.committer.map(|user| user.login),
                });
            }

            if page_len < COMPARE_PAGE_SIZE as usize {
                break;
            }
            page += 1;
        }

        debug!(
            "found {} commits in {start_rev}..{stop_rev}",
            commits.len()
        );

        Ok(commits)
    }

    async fn pull_requests_for_commits(
        &self,
        commits: &[ForgeCommit],
    ) -> Result<Vec<PullRequest>> {
        let mut by_number: BTreeMap<u64, PullRequest> = BTreeMap::new();

        for commit in commits {
            let route = format!(
                "{}/repos/{}/{}/commits/{}/pulls?per_page={}",
                self.base_uri,
                self.config.owner,
                self.config.repo,
                commit.sha,
                DEFAULT_PAGE_SIZE,
            );

            let pulls: Vec<PullPayload> =
                self.instance.get(route, None::<&()>).await?;

            if pulls.len() != 1 {
                let urls: Vec<&str> =
                    pulls.iter().map(|pull| pull.html_url.as_str()).collect();
                info!("{} with no or multiple PR(s): {urls:?}", commit.url);
            }

            for pull in pulls {
                let Some(merged_at) = pull.merged_at else {
                    warn!("skipping unmerged PR: {}", pull.html_url);
                    continue;
                };

                if by_number.contains_key(&pull.number) {
                    // expected if the pull request is merged without
                    // squashing
                    debug!(
                        "{} associated with multiple commits",
                        pull.html_url
                    );
                    continue;
                }

                by_number.insert(
                    pull.number,
                    PullRequest {
                        number: pull.number,
                        title: pull.title,
                        body: pull.body,
                        labels: pull
                            .labels
                            .into_iter()
                            .map(|label| label.name)
                            .collect(),
                        url: pull.html_url,
                        merged_at,
                    },
                );
            }
        }

        Ok(by_number.into_values().collect())
    }

    async fn contributors(
        &self,
        commits: &[ForgeCommit],
        pull_requests: &[PullRequest],
    ) -> Result<Contributors> {
        let mut authors = BTreeSet::new();
        let mut reviewers = BTreeSet::new();

        for commit in commits {
            if let Some(login) = &commit.author_login {
                authors.insert(self.get_user(login).await?);
            }

            if let Some(login) = &commit.committer_login {
                reviewers.insert(self.get_user(login).await?);
            }

            if commit.message.contains("Co-authored-by:") {
                // the REST listing only reports the primary author
                for user in self.commit_authors(&commit.sha).await? {
                    authors.insert(user);
                }
            } else {
                debug!("no co-authors in {}", commit.url);
            }
        }

        for pull in pull_requests {
            let route = format!(
                "{}/repos/{}/{}/pulls/{}/reviews?per_page={}",
                self.base_uri,
                self.config.owner,
                self.config.repo,
                pull.number,
                DEFAULT_PAGE_SIZE,
            );

            let reviews: Vec<ReviewPayload> =
                self.instance.get(route, None::<&()>).await?;

            for review in reviews {
                if let Some(user) = review.user {
                    reviewers.insert(self.get_user(&user.login).await?);
                }
            }
        }

        Ok(Contributors { authors, reviewers })
    }
}
