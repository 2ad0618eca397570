use thiserror::Error;

mod application;
mod component;

pub use application::*;
pub use component::*;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Unknown target application: {0}")]
    UnknownApplication(String),

    #[error("Unknown script component: {0}")]
    UnknownComponent(String),

    #[error("Invalid variable assignment '{input}': {reason}")]
    InvalidAssignment { input: String, reason: String },

    #[error("Invalid timeout: {0}")]
    InvalidTimeout(String),
}
