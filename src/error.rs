// src/error.rs
//! Application error types.
//!
//! Running a script never produces an `AppError`: interpreter outcomes are
//! values (`ExecutionResult`). These errors cover the build side (strict
//! resolution, template rendering) and the CLI's own input handling.

use crate::types::Component;
use thiserror::Error;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Component '{component}' requires parameter '{parameter}'")]
    MissingParameter {
        component: Component,
        parameter: &'static str,
    },

    #[error("Component '{component}' parameter '{parameter}' must be a whole number, got '{value}'")]
    InvalidParameter {
        component: Component,
        parameter: &'static str,
        value: String,
    },

    #[error("Template registration failed for {name}: {message}")]
    TemplateRegistration { name: String, message: String },

    #[error("Template render error for template {name}: {message}")]
    TemplateRenderError { name: String, message: String },

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error for {path}: {source}")]
    JsonParseError {
        path: std::path::PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    ValidationError(#[from] crate::types::ValidationError),
}

impl AppError {
    /// Whether this error came from a missing fragment parameter.
    pub fn is_missing_parameter(&self) -> bool {
        matches!(self, Self::MissingParameter { .. })
    }
}
