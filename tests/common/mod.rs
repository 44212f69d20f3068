//! Common test utilities for Lookout integration tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated checkout in a temp directory plus CLI helpers
//! - Assertion helpers for staged package trees
//! - Fixtures: Reusable config and content constants

#![allow(dead_code)]

pub mod assertions;
pub mod env;
pub mod fixtures;

pub use assertions::*;
pub use env::*;
pub use fixtures::*;
