//! RA Report CLI Library
//!
//! This crate provides the `ra-report` command-line front end: argument
//! parsing, configuration loading, logging setup and the single
//! request-and-print run.

use anyhow::Result;
use ra_requestor::{AttestationRequestor, ResultEnvelope};
use tracing::debug;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod args;
pub mod config;
pub mod logging;

pub use args::CliArgs;
pub use config::Config;

/// Request one report using the resolved configuration.
///
/// Generator failures are part of the returned envelope, never an `Err`.
pub async fn run(config: Config, user_data: Option<&str>) -> ResultEnvelope {
    debug!(
        target: "ra",
        version = VERSION,
        runtime = %config.generator.runtime,
        "requesting RA report"
    );
    AttestationRequestor::new(config.generator)
        .get_attestation_report(user_data)
        .await
}

/// Render an envelope the way the CLI prints it
pub fn render(envelope: &ResultEnvelope) -> Result<String> {
    Ok(envelope.to_pretty_json()?)
}
