//! Type definitions for script execution.

use crate::constants::DEFAULT_INTERPRETER;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Outcome of running a script. Exactly one variant holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "output", rename_all = "snake_case")]
pub enum ExecutionResult {
    /// Exit status 0; carries captured stdout.
    Success(String),
    /// Non-zero exit, launch failure or timeout; carries stderr or a
    /// synthesized diagnostic.
    Failure(String),
}

impl ExecutionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The captured text, whichever variant holds.
    pub fn payload(&self) -> &str {
        match self {
            Self::Success(text) | Self::Failure(text) => text,
        }
    }

    pub fn into_payload(self) -> String {
        match self {
            Self::Success(text) | Self::Failure(text) => text,
        }
    }
}

impl fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.payload())
    }
}

/// Raw result of a child process that ran to completion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

/// Why a child process did not run to completion.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("could not launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not wait for {program}: {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} timed out after {elapsed_ms}ms")]
    TimedOut { program: String, elapsed_ms: u64 },

    #[error("could not start process driver: {0}")]
    Runtime(#[source] std::io::Error),
}

/// How the executor launches the interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutorConfig {
    pub interpreter: PathBuf,
    /// `None` blocks until the interpreter exits, however long that takes.
    pub timeout: Option<Duration>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            interpreter: PathBuf::from(DEFAULT_INTERPRETER),
            timeout: None,
        }
    }
}

impl ExecutorConfig {
    pub fn with_interpreter(mut self, interpreter: impl Into<PathBuf>) -> Self {
        self.interpreter = interpreter.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_reads_either_variant() {
        assert_eq!(ExecutionResult::Success("OK".into()).payload(), "OK");
        assert_eq!(ExecutionResult::Failure("bad".into()).payload(), "bad");
        assert!(ExecutionResult::Success(String::new()).is_success());
        assert!(!ExecutionResult::Failure(String::new()).is_success());
    }

    #[test]
    fn serializes_with_status_tag() {
        let json = serde_json::to_value(ExecutionResult::Failure("syntax error".into())).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "failure", "output": "syntax error"})
        );
    }

    #[test]
    fn default_config_uses_osascript_without_timeout() {
        let config = ExecutorConfig::default();
        assert_eq!(config.interpreter, PathBuf::from("/usr/bin/osascript"));
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn timeout_error_message() {
        let err = ProcessError::TimedOut {
            program: "/usr/bin/osascript".into(),
            elapsed_ms: 250,
        };
        assert_eq!(err.to_string(), "/usr/bin/osascript timed out after 250ms");
    }
}
