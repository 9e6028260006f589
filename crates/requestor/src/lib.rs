//! RA Report Requestor
//!
//! Obtains a remote-attestation report from an external generator process
//! and hands it back as a [`ResultEnvelope`]. The generator is a black box:
//! it receives the caller's user data as its last argument, prints one JSON
//! document on success and exits non-zero with a diagnostic on failure. The
//! report is relayed as-is; nothing here verifies or interprets it.
//!
//! # Example
//!
//! ```no_run
//! use ra_requestor::{AttestationRequestor, GeneratorConfig};
//!
//! # async fn demo() {
//! let requestor = AttestationRequestor::new(GeneratorConfig::default().with_timeout_secs(30));
//! let envelope = requestor.get_attestation_report(Some("nonce-1234")).await;
//! println!("{}", envelope.to_pretty_json().unwrap());
//! # }
//! ```

pub mod config;
pub mod envelope;
pub mod error;
pub mod requestor;

pub use config::{GeneratorConfig, DEFAULT_USER_DATA};
pub use envelope::ResultEnvelope;
pub use error::{ConfigError, RequestError, RequestResult};
pub use requestor::{get_attestation_report, AttestationRequestor};
