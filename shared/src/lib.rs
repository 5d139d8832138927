//! Shared types and models for the Bloom Watch platform
//!
//! This crate contains the provider payloads, derived metrics, scoring rules
//! and synthetic fallback generators shared between the backend and the
//! browser bindings (via WASM).

pub mod models;
pub mod synthetic;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
