//! Common Test Utilities
//!
//! Shared fixtures used across view and property tests.

pub mod fixtures;

pub use fixtures::*;
