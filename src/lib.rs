// src/lib.rs
//! macactor library: composes AppleScript from reusable fragments and runs it
//! through `osascript`.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Domain types**: `TargetApplication`, `Component`
//! - **Script construction**: `VariableContext`, `FragmentCatalog`,
//!   `ScriptComposition`, `build`
//! - **Execution**: `ScriptExecutor`, `ExecutionResult`, `ProcessRunner`, `run`
//! - **Actors**: `NumbersActor`
//! - **Configuration**: `CommandLineInput`, `RunConfig`

pub mod actors;
pub mod config;
pub mod constants;
pub mod error;
pub mod executor;
pub mod script;
pub mod types;

// --- Error Handling ---
pub use crate::error::AppError;
pub use crate::types::ValidationError;

// --- Domain Types ---
pub use crate::types::{Component, TargetApplication};

// --- Script Construction ---
pub use crate::script::{
    build, escape_applescript_string, FragmentCatalog, ResolutionPolicy, ScriptComposition,
    Strictness, VariableContext,
};

// --- Execution ---
pub use crate::executor::{
    run, ExecutionResult, ExecutorConfig, ProcessError, ProcessOutput, ProcessRunner,
    ScriptExecutor, SystemProcessRunner,
};

// --- Actors ---
pub use crate::actors::NumbersActor;

// --- Configuration ---
pub use crate::config::{CliAction, CommandLineInput, NumbersOperation, RunConfig};
