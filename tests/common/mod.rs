//! Common test utilities for Stevedore CLI tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated workspace with config, manifest and asset directory
//! - Fixtures: Reusable manifest and config content

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
