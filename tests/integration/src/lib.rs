//! Integration test utilities for the club server
//!
//! Drives the full Axum router, middleware included, over in-memory
//! repositories and a frozen clock.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
