// src/script/mod.rs
//! Script construction: variables, fragment catalog and composition.
//!
//! Everything here is pure string work. Running a script lives in
//! [`crate::executor`].

pub mod catalog;
pub mod composer;
pub mod escape;
pub mod templates;
pub mod variables;

pub use catalog::{FragmentCatalog, ResolutionPolicy, Strictness};
pub use composer::{build, ScriptComposition, FRAGMENT_SEPARATOR};
pub use escape::escape_applescript_string;
pub use variables::{keys, VariableContext};
