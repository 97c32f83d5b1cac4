//! `herald run`: one reconciliation pass.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::adapters::github::{GithubProjectBoard, GithubPullRequestSource, GraphqlClient};
use crate::cli::output;
use crate::cli::types::RunArgs;
use crate::domain::models::Config;
use crate::infrastructure::config::ConfigLoader;
use crate::services::{EngineSettings, ReconciliationEngine};

pub async fn execute(args: RunArgs, json_mode: bool) -> Result<()> {
    let mut config = load_config(args.config.as_ref())?;
    if args.dry_run {
        config.dry_run = true;
    }

    crate::infrastructure::logging::init(&config.logging);

    let summary = run_engine(&config).await?;
    output::output(&summary, json_mode);
    Ok(())
}

pub(crate) fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}

async fn run_engine(config: &Config) -> Result<crate::services::RunSummary> {
    let token = config
        .github
        .token
        .clone()
        .context("access token missing after validation")?;

    let client = Arc::new(GraphqlClient::new(
        &config.github,
        &config.rate_limit,
        &config.retry,
        token,
    )?);

    let source = Arc::new(GithubPullRequestSource::new(
        client.clone(),
        config.github.owner.clone(),
        config.github.repo.clone(),
    ));
    let board = Arc::new(GithubProjectBoard::new(
        client,
        config.github.owner.clone(),
        config.github.repo.clone(),
        config.github.owner_type,
        config.project.number,
        config.project.status_field.clone(),
    ));

    let engine = ReconciliationEngine::new(source, board, EngineSettings::from(config));
    let summary = engine.run().await?;
    Ok(summary)
}
