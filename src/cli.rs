//! CLI argument parsing and remote repository configuration.
use clap::{Parser, ValueEnum};
use secrecy::SecretString;
use std::{env, path::PathBuf};

use crate::{
    error::{NotesaurusError, Result},
    forge::config::RemoteConfig,
    notes::format::{Format, Markdown, Rst},
};

/// Prepare an automatic changelog from a repository's merged pull requests.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Org and repo name of a repository on GitHub (delimited by a slash),
    /// e.g. "scientific-python/changelist".
    pub org_repo: String,

    /// The starting revision (excluded), e.g. the tag of the previous
    /// release.
    pub start_rev: String,

    /// The stop revision (included), e.g. the "main" branch or the current
    /// release.
    pub stop_rev: String,

    #[arg(long, default_value = "x.y.z")]
    /// Version you're about to release, used in the title and description
    /// of the notes.
    pub release_version: String,

    #[arg(long)]
    /// Write to file, prints to stdout otherwise.
    pub out: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
    /// Output format of the generated notes.
    pub format: OutputFormat,

    #[arg(long)]
    /// Path to a local TOML configuration (falls back on the repository's
    /// notesaurus.toml or the default config if not given).
    pub config_path: Option<PathBuf>,

    #[arg(long, default_value = "")]
    /// GitHub personal access token. Falls back to GITHUB_TOKEN env var.
    pub github_token: String,

    #[arg(long, default_value_t = false)]
    /// Enable debug logging.
    pub debug: bool,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Markdown
    #[value(name = "md")]
    Markdown,
    /// reStructuredText
    #[value(name = "rst")]
    Rst,
}

impl OutputFormat {
    /// The format strategy implementing this output format.
    pub fn strategy(&self) -> Box<dyn Format> {
        match self {
            OutputFormat::Markdown => Box::new(Markdown),
            OutputFormat::Rst => Box::new(Rst),
        }
    }
}

impl Args {
    /// Configure the remote repository connection from CLI arguments.
    pub fn get_remote(&self) -> Result<RemoteConfig> {
        let invalid_slug = || {
            NotesaurusError::InvalidArgs(format!(
                "expected org and repo delimited by a slash, got '{}'",
                self.org_repo
            ))
        };

        let (owner, repo) =
            self.org_repo.split_once('/').ok_or_else(invalid_slug)?;

        if owner.is_empty() || repo.is_empty() || repo.contains('/') {
            return Err(invalid_slug());
        }

        let mut token = self.github_token.clone();

        if token.is_empty()
            && let Ok(env_var_token) = env::var("GITHUB_TOKEN")
        {
            token = env_var_token;
        }

        if token.is_empty() {
            return Err(NotesaurusError::InvalidArgs(
                "must set a GitHub token: the token is used to avoid rate \
                 limiting and does not require any permissions"
                    .into(),
            ));
        }

        Ok(RemoteConfig {
            host: "github.com".to_string(),
            scheme: "https".to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
            path: self.org_repo.clone(),
            token: SecretString::from(token),
        })
    }
}
