//! Shared types and models for the AgriTwin advisory platform
//!
//! This crate contains the domain models, the authoritative feature schema,
//! and validation helpers used by both the serving backend and the offline
//! training tooling.

pub mod models;
pub mod schema;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
