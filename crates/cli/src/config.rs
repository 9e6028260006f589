//! Configuration Management for the RA report CLI
//!
//! Settings come from an optional TOML file and are then overridden by
//! command-line flags (or their `RA_*` environment variables).

use crate::args::{CliArgs, LogLevel};
use crate::logging::LogConfig;
use anyhow::{Context, Result};
use clap::ValueEnum;
use ra_requestor::GeneratorConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How the RA generator is launched
    pub generator: GeneratorConfig,
    /// Logger configuration
    pub logging: LogConfig,
}

impl Config {
    /// Load configuration from the file named by `args` and apply flag overrides
    pub async fn load(args: &CliArgs) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::from_file(path).await?,
            None => Self::default(),
        };

        config.apply_args(args);
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML configuration file
    pub async fn from_file(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Apply command-line arguments to override configuration
    fn apply_args(&mut self, args: &CliArgs) {
        if let Some(runtime) = &args.runtime {
            self.generator.runtime = runtime.clone();
        }
        if let Some(script) = &args.script {
            self.generator.script = script.clone();
        }
        if let Some(dir) = &args.working_dir {
            self.generator.working_dir = Some(dir.clone());
        }
        if let Some(secs) = args.timeout {
            self.generator.timeout_secs = Some(secs);
        }
        if let Some(level) = args.log_level {
            self.logging.level = level.as_str().to_string();
        }
        if let Some(format) = args.log_format {
            self.logging.format = format;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.generator
            .validate()
            .context("invalid [generator] configuration")?;

        if LogLevel::from_str(self.logging.level.trim(), true).is_err() {
            anyhow::bail!(
                "invalid log level '{}' (expected trace, debug, info, warn or error)",
                self.logging.level
            );
        }

        Ok(())
    }
}
