//! Requestor error types

use std::time::Duration;
use thiserror::Error;

/// Envelope category for a generator that exited non-zero
pub const EXECUTION_ERROR: &str = "Error generating RA report";
/// Envelope category for a generator whose stdout is not JSON
pub const PARSE_ERROR: &str = "Invalid JSON returned from Node script";
/// Envelope category for a generator that could not be started
pub const LAUNCH_ERROR: &str = "Failed to launch RA generator";
/// Envelope category for a generator that outlived the configured timeout
pub const TIMEOUT_ERROR: &str = "Timed out generating RA report";
/// Envelope category for a blocking call that could not get a runtime
pub const RUNTIME_ERROR: &str = "Async runtime unavailable for RA request";
/// Envelope category for failures reading the generator's pipes
pub const IO_ERROR: &str = "I/O error while generating RA report";

/// Errors produced while requesting an RA report
#[derive(Debug, Error)]
pub enum RequestError {
    /// The generator executable could not be spawned
    #[error("failed to launch '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The generator ran and exited with a non-zero status
    #[error("generator exited with {}: {stderr}", exit_label(.code))]
    Execution {
        /// Exit code, `None` when the process was terminated by a signal
        code: Option<i32>,
        /// Captured standard error
        stderr: String,
    },

    /// The generator exited zero but its stdout is not valid JSON
    #[error("invalid JSON from generator: {0}")]
    Parse(#[from] serde_json::Error),

    /// The generator did not exit within the configured limit
    #[error("generator did not exit within {0:?}")]
    Timeout(Duration),

    /// The blocking wrapper was called where it cannot drive a runtime
    #[error("runtime error: {0}")]
    Runtime(String),

    /// Reading the generator's output failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}

impl RequestError {
    /// Short human-readable category carried in the envelope's `error` field
    pub fn category(&self) -> &'static str {
        match self {
            RequestError::Launch { .. } => LAUNCH_ERROR,
            RequestError::Execution { .. } => EXECUTION_ERROR,
            RequestError::Parse(_) => PARSE_ERROR,
            RequestError::Timeout(_) => TIMEOUT_ERROR,
            RequestError::Runtime(_) => RUNTIME_ERROR,
            RequestError::Io(_) => IO_ERROR,
        }
    }

    /// Raw diagnostic text carried in the envelope's `details` field
    pub fn details(&self) -> String {
        match self {
            RequestError::Launch { program, source } => format!("{}: {}", program, source),
            RequestError::Execution { stderr, .. } => stderr.clone(),
            RequestError::Parse(err) => err.to_string(),
            RequestError::Timeout(limit) => {
                format!("generator killed after {} seconds", limit.as_secs_f64())
            }
            RequestError::Runtime(reason) => reason.clone(),
            RequestError::Io(err) => err.to_string(),
        }
    }
}

/// Invalid generator configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("generator runtime cannot be empty")]
    EmptyRuntime,

    #[error("generator script cannot be empty")]
    EmptyScript,

    #[error("timeout must be at least one second")]
    ZeroTimeout,
}

/// Result type for requestor operations
pub type RequestResult<T> = Result<T, RequestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_details_are_raw_stderr() {
        let err = RequestError::Execution {
            code: Some(1),
            stderr: "boom".to_string(),
        };
        assert_eq!(err.category(), EXECUTION_ERROR);
        assert_eq!(err.details(), "boom");
        assert_eq!(err.to_string(), "generator exited with status 1: boom");
    }

    #[test]
    fn test_signal_exit_display() {
        let err = RequestError::Execution {
            code: None,
            stderr: String::new(),
        };
        assert!(err.to_string().contains("a signal"));
    }

    #[test]
    fn test_parse_error_from_serde() {
        let parse = serde_json::from_str::<serde_json::Value>("not-json").unwrap_err();
        let err = RequestError::from(parse);
        assert_eq!(err.category(), PARSE_ERROR);
        assert!(!err.details().is_empty());
    }

    #[test]
    fn test_launch_details_name_program() {
        let err = RequestError::Launch {
            program: "missing-runtime".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.category(), LAUNCH_ERROR);
        assert!(err.details().starts_with("missing-runtime: "));
    }

    #[test]
    fn test_timeout_details() {
        let err = RequestError::Timeout(Duration::from_millis(1500));
        assert_eq!(err.category(), TIMEOUT_ERROR);
        assert_eq!(err.details(), "generator killed after 1.5 seconds");
    }

    #[test]
    fn test_runtime_details() {
        let err = RequestError::Runtime("no runtime".to_string());
        assert_eq!(err.category(), RUNTIME_ERROR);
        assert_eq!(err.details(), "no runtime");
    }
}
