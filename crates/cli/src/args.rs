use crate::logging::LogFormat;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for the RA report CLI
#[derive(Parser, Debug, Clone)]
#[command(
    name = "ra-report",
    version = env!("CARGO_PKG_VERSION"),
    about = "Generate a remote-attestation report and print it as a JSON envelope",
    long_about = "Runs the external RA report generator with USER_DATA as its last argument and prints a JSON envelope on stdout. The process exits 0 whether or not the report was produced; inspect the envelope's `success` field."
)]
pub struct CliArgs {
    /// Data bound into the report, typically a nonce
    #[arg(value_name = "USER_DATA", allow_hyphen_values = true)]
    pub user_data: Option<String>,

    /// TOML configuration file
    #[arg(short = 'c', long = "config", value_name = "FILE", env = "RA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Program that runs the generator script
    #[arg(long = "runtime", value_name = "PROGRAM", env = "RA_RUNTIME")]
    pub runtime: Option<String>,

    /// Generator script
    #[arg(long = "script", value_name = "PATH", env = "RA_SCRIPT")]
    pub script: Option<PathBuf>,

    /// Working directory for the generator
    #[arg(long = "workdir", value_name = "DIR", env = "RA_WORKDIR")]
    pub working_dir: Option<PathBuf>,

    /// Kill the generator after this many seconds
    #[arg(long = "timeout", value_name = "SECONDS", env = "RA_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Log level (overridden by RUST_LOG)
    #[arg(long = "log-level", value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Log output format
    #[arg(long = "log-format", value_enum, value_name = "FORMAT")]
    pub log_format: Option<LogFormat>,
}

/// Log level enumeration
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Trace level logging
    Trace,
    /// Debug level logging
    Debug,
    /// Info level logging
    Info,
    /// Warning level logging
    Warn,
    /// Error level logging
    Error,
}

impl LogLevel {
    /// Filter directive for this level
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
