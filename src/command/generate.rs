//! Release-notes generation command implementation.
use log::*;
use std::io::Write;

use crate::{
    cli::Args,
    config::{Config, DEFAULT_CONFIG_FILE},
    error::Result,
    forge::{github::Github, traits::Forge},
    notes::{
        classify::SectionTable, events::LogSink, extract::Extractor,
        format::NotesFormatter, types::Contributor,
    },
};

/// Generate the release notes document and write it to the configured
/// output.
pub async fn execute(args: &Args) -> Result<()> {
    let remote = args.get_remote()?;
    let forge = Github::new(remote)?;
    let formatter = build_formatter(&forge, args).await?;

    match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(path, formatter.document()).await?;
            info!("wrote release notes to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            for line in formatter.iter_lines() {
                stdout.write_all(line.as_bytes())?;
            }
        }
    }

    Ok(())
}

/// Fetch records from the forge and assemble the formatter for the
/// requested format.
pub async fn build_formatter(
    forge: &dyn Forge,
    args: &Args,
) -> Result<NotesFormatter> {
    let config = load_config(forge, args).await?;
    let repo_name = forge.config().repo.clone();

    info!("fetching commits {}..{}", args.start_rev, args.stop_rev);
    let commits =
        forge.commits_between(&args.start_rev, &args.stop_rev).await?;

    info!("fetching pull requests for {} commits", commits.len());
    let pull_requests = forge.pull_requests_for_commits(&commits).await?;

    info!("fetching contributors");
    let contributors = forge.contributors(&commits, &pull_requests).await?;

    let sink = LogSink;
    let extractor = Extractor::new(
        &config.pr_summary_pattern,
        &config.label_attribute_pattern,
    )?;
    let notes = extractor.extract_all(&pull_requests, &sink);

    let table = SectionTable::new(&config.sections)?;
    let sections = table.classify(&notes, &sink);

    let authors = contributors
        .authors
        .into_iter()
        .map(Contributor::from)
        .collect();
    let reviewers = contributors
        .reviewers
        .into_iter()
        .map(Contributor::from)
        .collect();

    NotesFormatter::new(
        args.format.strategy(),
        config.render_config(),
        &repo_name,
        &args.release_version,
        sections,
        authors,
        reviewers,
    )
}

/// Resolve configuration: a local file if given, then the remote
/// repository's notesaurus.toml, then built-in defaults.
async fn load_config(forge: &dyn Forge, args: &Args) -> Result<Config> {
    if let Some(path) = &args.config_path {
        debug!("loading configuration from {}", path.display());
        return Config::load_file(path);
    }

    if let Some(content) = forge.get_file_content(DEFAULT_CONFIG_FILE).await? {
        debug!("found {DEFAULT_CONFIG_FILE} in remote repository");
        return Config::from_toml(&content);
    }

    info!("no configuration found: using default");
    Ok(Config::default())
}

#[cfg(test)]
#[path = "./generate_tests.rs"]
mod tests;
