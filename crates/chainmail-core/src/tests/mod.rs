//! Test module for determinism, integration and property tests.
//!
//! - `determinism.rs`: same seed and units give identical rounds
//! - `integration.rs`: full rounds through the [`Engine`](crate::engine::Engine)
//! - `properties.rs`: invariants checked with proptest
//! - `helpers.rs`: unit factories and strategies

mod helpers;

// Re-export for convenience
pub use helpers::*;
