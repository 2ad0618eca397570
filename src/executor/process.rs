//! Child process management.
//!
//! [`ProcessRunner`] is the single operation the executor needs from the
//! platform: run a program to completion, capture both streams, report the
//! exit code. [`SystemProcessRunner`] implements it with `tokio::process`
//! on a per-call current-thread runtime, which lets both pipes drain
//! concurrently and lets an optional timeout kill the child.

use super::types::{ProcessError, ProcessOutput};
use std::path::Path;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;

/// Runs a program to completion and captures its output.
pub trait ProcessRunner {
    /// Blocks until `program` exits (or `timeout` expires).
    fn run_to_completion(
        &self,
        program: &Path,
        args: &[&str],
        timeout: Option<Duration>,
    ) -> Result<ProcessOutput, ProcessError>;
}

impl<R: ProcessRunner + ?Sized> ProcessRunner for &R {
    fn run_to_completion(
        &self,
        program: &Path,
        args: &[&str],
        timeout: Option<Duration>,
    ) -> Result<ProcessOutput, ProcessError> {
        (**self).run_to_completion(program, args, timeout)
    }
}

/// Spawns real OS processes.
///
/// Must not be called from inside an async runtime; wrap the call in
/// `tokio::task::spawn_blocking` there.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessRunner;

impl ProcessRunner for SystemProcessRunner {
    fn run_to_completion(
        &self,
        program: &Path,
        args: &[&str],
        timeout: Option<Duration>,
    ) -> Result<ProcessOutput, ProcessError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProcessError::Runtime)?;

        runtime.block_on(run_child(program, args, timeout))
    }
}

async fn run_child(
    program: &Path,
    args: &[&str],
    timeout: Option<Duration>,
) -> Result<ProcessOutput, ProcessError> {
    let program_name = program.display().to_string();

    // kill_on_drop covers early returns; the timeout path also reaps explicitly.
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| ProcessError::Launch {
            program: program_name.clone(),
            source,
        })?;

    log::debug!("Spawned {} (pid {:?})", program_name, child.id());

    let stdout_handle = child.stdout.take();
    let stderr_handle = child.stderr.take();
    let start = Instant::now();

    let completion = async {
        let (status, stdout, stderr) = tokio::join!(
            child.wait(),
            read_stream(stdout_handle),
            read_stream(stderr_handle)
        );
        status.map(|status| ProcessOutput {
            exit_code: status.code(),
            stdout,
            stderr,
        })
    };

    // `completion` borrows `child`; it is consumed here so the timeout path
    // can kill and reap the child below.
    let waited = match timeout {
        Some(limit) => tokio::time::timeout(limit, completion).await.ok(),
        None => Some(completion.await),
    };

    let Some(outcome) = waited else {
        let elapsed_ms = start.elapsed().as_millis() as u64;
        log::warn!(
            "{} exceeded its timeout after {}ms; killing it",
            program_name,
            elapsed_ms
        );
        if let Err(e) = child.kill().await {
            log::debug!("Could not kill {}: {}", program_name, e);
        }
        return Err(ProcessError::TimedOut {
            program: program_name,
            elapsed_ms,
        });
    };

    let output = outcome.map_err(|source| ProcessError::Wait {
        program: program_name.clone(),
        source,
    })?;

    log::debug!(
        "{} exited with {:?} after {}ms ({} bytes stdout, {} bytes stderr)",
        program_name,
        output.exit_code,
        start.elapsed().as_millis(),
        output.stdout.len(),
        output.stderr.len()
    );
    Ok(output)
}

/// Reads a stream to EOF. Read errors end the capture early.
async fn read_stream<R: AsyncRead + Unpin>(handle: Option<R>) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(mut h) = handle {
        if let Err(e) = h.read_to_end(&mut buf).await {
            log::debug!("Stopped reading child output: {}", e);
        }
    }
    buf
}
