use crate::config::StoreConfig;
use crate::domain::model::ProfileId;
use crate::domain::ports::CommitPolicy;
use crate::utils::error::Result;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "profile-store")]
#[command(about = "Dispatch profile/fetchName and print the resulting store state")]
pub struct CliConfig {
    #[arg(long, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Profile endpoint; '{id}' is replaced with --id")]
    pub endpoint: Option<String>,

    #[arg(long, value_enum)]
    pub commit_policy: Option<CommitPolicy>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(long, default_value = "1", allow_negative_numbers = true)]
    pub id: ProfileId,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl CliConfig {
    /// Loads `--config` (or defaults) and lets explicit flags win.
    pub fn resolve(&self) -> Result<StoreConfig> {
        let mut config = match &self.config {
            Some(path) => StoreConfig::from_file(path)?,
            None => StoreConfig::default(),
        };

        if let Some(endpoint) = &self.endpoint {
            config.profile.endpoint = Some(endpoint.clone());
        }
        if let Some(policy) = self.commit_policy {
            config.profile.commit_policy = Some(policy);
        }
        if let Some(timeout) = self.timeout_seconds {
            config.profile.timeout_seconds = Some(timeout);
        }

        Ok(config)
    }
}
