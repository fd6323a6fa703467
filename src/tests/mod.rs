//! Crate-internal test support and cross-module tests.

pub mod common;
pub mod mocks;
mod property;
