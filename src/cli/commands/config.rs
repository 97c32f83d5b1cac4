//! `herald config`: inspect the effective configuration.

use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{self, CommandOutput};
use crate::cli::types::ConfigCommands;
use crate::domain::models::Config;

pub async fn execute(command: ConfigCommands, json_mode: bool) -> Result<()> {
    match command {
        ConfigCommands::Show { config } => {
            let loaded = super::run::load_config(config.as_ref())?;
            output::output(&ConfigReport::from(loaded), json_mode);
            Ok(())
        }
    }
}

/// Effective configuration with the token redacted.
#[derive(Debug, Serialize)]
struct ConfigReport {
    config: Config,
}

impl From<Config> for ConfigReport {
    fn from(mut config: Config) -> Self {
        if config.github.token.is_some() {
            config.github.token = Some("***".to_string());
        }
        Self { config }
    }
}

impl CommandOutput for ConfigReport {
    fn to_human(&self) -> String {
        let github = &self.config.github;
        let project = &self.config.project;
        format!(
            "repository:     {}/{}\n\
             owner type:     {:?}\n\
             endpoint:       {}\n\
             project number: {}\n\
             status field:   {}\n\
             target status:  {}\n\
             target branch:  {}\n\
             dry run:        {}\n\
             timeout:        {}s\n\
             retries:        {} (backoff {}..{} ms)",
            github.owner,
            github.repo,
            github.owner_type,
            github.endpoint(),
            project.number,
            project.status_field,
            project.target_status,
            self.config.target_branch,
            self.config.dry_run,
            github.timeout_secs,
            self.config.retry.max_retries,
            self.config.retry.initial_backoff_ms,
            self.config.retry.max_backoff_ms,
        )
    }
}
