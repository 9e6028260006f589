//! Generator configuration
//!
//! Describes how the external RA report generator is launched. The defaults
//! reproduce the dstack Node.js invocation:
//!
//! ```text
//! NODE_OPTIONS="--no-warnings --experimental-specifier-resolution=node" \
//!     node --experimental-json-modules --experimental-modules generate_ra.js <user_data>
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Placeholder used when the caller supplies no user data
pub const DEFAULT_USER_DATA: &str = "default-user-data";

/// Runtime used to execute the generator script
pub const DEFAULT_RUNTIME: &str = "node";

/// Generator script passed to the runtime
pub const DEFAULT_SCRIPT: &str = "generate_ra.js";

/// Flags the generator needs for ES module resolution
pub const DEFAULT_RUNTIME_ARGS: &[&str] = &["--experimental-json-modules", "--experimental-modules"];

/// `NODE_OPTIONS` value layered over the inherited environment
pub const DEFAULT_NODE_OPTIONS: &str = "--no-warnings --experimental-specifier-resolution=node";

/// How to launch the RA report generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Program to execute
    pub runtime: String,
    /// Arguments placed before the script path
    pub runtime_args: Vec<String>,
    /// Script handed to the runtime
    pub script: PathBuf,
    /// Working directory for the child (inherits ours when `None`)
    pub working_dir: Option<PathBuf>,
    /// Value for `NODE_OPTIONS`; left untouched when `None`
    pub node_options: Option<String>,
    /// Upper bound on the generator's run time; unbounded when `None`
    pub timeout_secs: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            runtime: DEFAULT_RUNTIME.to_string(),
            runtime_args: DEFAULT_RUNTIME_ARGS.iter().map(|arg| arg.to_string()).collect(),
            script: PathBuf::from(DEFAULT_SCRIPT),
            working_dir: None,
            node_options: Some(DEFAULT_NODE_OPTIONS.to_string()),
            timeout_secs: None,
        }
    }
}

impl GeneratorConfig {
    /// Set the runtime program
    pub fn with_runtime(mut self, runtime: impl Into<String>) -> Self {
        self.runtime = runtime.into();
        self
    }

    /// Replace the arguments placed before the script
    pub fn with_runtime_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.runtime_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Set the generator script
    pub fn with_script(mut self, script: impl Into<PathBuf>) -> Self {
        self.script = script.into();
        self
    }

    /// Set the child's working directory
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Bound the generator's run time
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Configured timeout as a `Duration`
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Arguments passed to the runtime, user data last
    pub fn arguments(&self, user_data: &str) -> Vec<String> {
        let mut args = self.runtime_args.clone();
        args.push(self.script.to_string_lossy().into_owned());
        args.push(user_data.to_string());
        args
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.runtime.trim().is_empty() {
            return Err(ConfigError::EmptyRuntime);
        }
        if self.script.as_os_str().is_empty() {
            return Err(ConfigError::EmptyScript);
        }
        if self.timeout_secs == Some(0) {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.runtime, "node");
        assert_eq!(config.script, PathBuf::from("generate_ra.js"));
        assert_eq!(
            config.node_options.as_deref(),
            Some("--no-warnings --experimental-specifier-resolution=node")
        );
        assert!(config.timeout().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_arguments_order() {
        let config = GeneratorConfig::default();
        assert_eq!(
            config.arguments("nonce"),
            vec![
                "--experimental-json-modules",
                "--experimental-modules",
                "generate_ra.js",
                "nonce",
            ]
        );
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let config: GeneratorConfig =
            serde_json::from_value(serde_json::json!({ "timeout_secs": 5, "script": "gen.js" }))
                .expect("valid config");
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.script, PathBuf::from("gen.js"));
        assert_eq!(config.runtime, DEFAULT_RUNTIME);
        assert_eq!(config.runtime_args.len(), 2);
    }

    #[test]
    fn test_config_validation() {
        let config = GeneratorConfig::default().with_runtime("  ");
        assert_eq!(config.validate(), Err(ConfigError::EmptyRuntime));

        let config = GeneratorConfig::default().with_script("");
        assert_eq!(config.validate(), Err(ConfigError::EmptyScript));

        let config = GeneratorConfig::default().with_timeout_secs(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroTimeout));
    }
}
