use crate::config::toml_config::RegistryConfig;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Args;
use serde::{Deserialize, Serialize};

/// Options shared by every job binary. All are optional; without them the jobs
/// read and write the fixed file names in the current directory.
#[derive(Debug, Clone, Serialize, Deserialize, Args)]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory that data file names are resolved against
    #[arg(long, default_value = ".")]
    pub base_dir: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

impl CliConfig {
    pub fn init_logging(&self) {
        if self.log_json {
            crate::utils::logger::init_json_logger(self.verbose);
        } else {
            crate::utils::logger::init_cli_logger(self.verbose);
        }
    }

    /// Loads and validates the configuration file, or the defaults when none is given.
    pub fn load(&self) -> Result<RegistryConfig> {
        let config = match &self.config {
            Some(path) => {
                tracing::info!("Loading configuration from: {}", path);
                RegistryConfig::from_file(path)?
            }
            None => RegistryConfig::default(),
        };
        config.validate()?;
        tracing::debug!("Resolved config: {:?}", config);
        Ok(config)
    }

    pub fn storage(&self) -> crate::config::storage::LocalStorage {
        crate::config::storage::LocalStorage::new(self.base_dir.clone())
    }
}
