//! Integration test utilities for the guild dashboard
//!
//! Spawns the API on a local port with in-memory backends and drives it
//! over HTTP.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
