//! Attestation requestor
//!
//! Runs the generator once per call, waits for it, and turns its stdout into
//! either a parsed RA report or a [`RequestError`]. The child is always
//! reaped before a call returns, including when the timeout fires.

use crate::config::{GeneratorConfig, DEFAULT_USER_DATA};
use crate::envelope::ResultEnvelope;
use crate::error::{RequestError, RequestResult};
use serde_json::Value;
use std::process::{ExitStatus, Stdio};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tracing::{debug, error, info, warn};

/// Captured result of one generator run
#[derive(Debug)]
struct GeneratorOutput {
    status: ExitStatus,
    stdout: Vec<u8>,
    stderr: Vec<u8>,
}

/// Launches the RA report generator and relays its output
#[derive(Debug, Clone, Default)]
pub struct AttestationRequestor {
    config: GeneratorConfig,
}

impl AttestationRequestor {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Get the generator configuration
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Request a report and wrap the outcome in an envelope
    pub async fn get_attestation_report(&self, user_data: Option<&str>) -> ResultEnvelope {
        let user_data = user_data.unwrap_or(DEFAULT_USER_DATA);
        match self.request(user_data).await {
            Ok(report) => ResultEnvelope::success(report, user_data),
            Err(err) => ResultEnvelope::from(err),
        }
    }

    /// Run the generator with `user_data` as its last argument and parse its stdout
    pub async fn request(&self, user_data: &str) -> RequestResult<Value> {
        let output = self.run(user_data).await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            error!(
                target: "ra",
                code = ?output.status.code(),
                "Error executing RA generator: {}",
                stderr
            );
            return Err(RequestError::Execution {
                code: output.status.code(),
                stderr,
            });
        }

        match serde_json::from_slice::<Value>(&output.stdout) {
            Ok(report) => {
                info!(
                    target: "ra",
                    bytes = output.stdout.len(),
                    "RA report received"
                );
                Ok(report)
            }
            Err(err) => {
                error!(target: "ra", "JSON decode error: {}", err);
                Err(RequestError::Parse(err))
            }
        }
    }

    fn command(&self, user_data: &str) -> Command {
        let mut command = Command::new(&self.config.runtime);
        command
            .args(self.config.arguments(user_data))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        // Own process group, so a timeout can take down everything the generator started.
        #[cfg(unix)]
        command.process_group(0);

        if let Some(node_options) = &self.config.node_options {
            command.env("NODE_OPTIONS", node_options);
        }
        if let Some(dir) = &self.config.working_dir {
            command.current_dir(dir);
        }
        command
    }

    async fn run(&self, user_data: &str) -> RequestResult<GeneratorOutput> {
        debug!(
            target: "ra",
            runtime = %self.config.runtime,
            script = %self.config.script.display(),
            "launching RA generator"
        );

        let mut child = self
            .command(user_data)
            .spawn()
            .map_err(|source| RequestError::Launch {
                program: self.config.runtime.clone(),
                source,
            })?;

        let stdout = read_pipe(child.stdout.take());
        let stderr = read_pipe(child.stderr.take());
        let collect = async { tokio::try_join!(child.wait(), stdout, stderr) };

        let outcome = match self.config.timeout() {
            Some(limit) => tokio::time::timeout(limit, collect).await.ok(),
            None => Some(collect.await),
        };

        match outcome {
            Some(result) => {
                let (status, stdout, stderr) = result?;
                Ok(GeneratorOutput {
                    status,
                    stdout,
                    stderr,
                })
            }
            None => {
                let limit = self.config.timeout().unwrap_or_default();
                #[cfg(unix)]
                if let Some(pid) = child.id() {
                    kill_process_group(pid);
                }
                if let Err(err) = child.kill().await {
                    warn!(target: "ra", error = %err, "failed to kill timed out RA generator");
                }
                error!(target: "ra", ?limit, "RA generator timed out");
                Err(RequestError::Timeout(limit))
            }
        }
    }
}

#[cfg(unix)]
fn kill_process_group(pid: u32) {
    let Ok(pgid) = libc::pid_t::try_from(pid) else {
        return;
    };
    // The child is still unreaped here, so its pid cannot have been recycled.
    let result = unsafe { libc::killpg(pgid, libc::SIGKILL) };
    if result != 0 {
        let err = std::io::Error::last_os_error();
        warn!(target: "ra", pgid, error = %err, "failed to kill RA generator process group");
    } else {
        debug!(target: "ra", pgid, "killed RA generator process group");
    }
}

async fn read_pipe<R>(pipe: Option<R>) -> std::io::Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        pipe.read_to_end(&mut buf).await?;
    }
    Ok(buf)
}

/// Blocking convenience wrapper using the default generator configuration.
///
/// Builds a single-threaded runtime for the call. Inside an async context it
/// returns a failure envelope instead of blocking; use
/// [`AttestationRequestor::get_attestation_report`] there.
pub fn get_attestation_report(user_data: Option<&str>) -> ResultEnvelope {
    if tokio::runtime::Handle::try_current().is_ok() {
        warn!(target: "ra", "blocking get_attestation_report called inside an async runtime");
        return ResultEnvelope::from(RequestError::Runtime(
            "get_attestation_report cannot block inside an async runtime; \
             use AttestationRequestor::get_attestation_report"
                .to_string(),
        ));
    }

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => return ResultEnvelope::from(RequestError::Runtime(err.to_string())),
    };
    runtime.block_on(AttestationRequestor::default().get_attestation_report(user_data))
}
