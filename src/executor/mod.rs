// src/executor/mod.rs
//! Script execution, kept apart from script construction.
//!
//! Construction (`crate::script`) is pure. This module is the only place a
//! process is spawned.

mod process;
mod runner;
mod types;

pub use process::{ProcessRunner, SystemProcessRunner};
pub use runner::{run, ScriptExecutor};
pub use types::{ExecutionResult, ExecutorConfig, ProcessError, ProcessOutput};
