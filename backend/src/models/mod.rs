//! Domain models for the AgriTwin advisory platform
//!
//! Re-exports models from the shared crate

pub use shared::models::*;
