// src/actors/mod.rs
//! Per-application convenience operations.
//!
//! Actors pick a fixed component sequence and forward caller values through
//! a `VariableContext`; they hold no logic of their own.

mod numbers;

pub use numbers::NumbersActor;
