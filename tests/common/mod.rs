//! Common test utilities for pyzapp CLI tests.
//!
//! This module provides:
//! - `TestEnv`: isolated project directory plus helpers to run the binary
//! - Fixtures: small Python sources used across tests
//! - Artifact helpers: split an artifact into shebang and zip entries

#![allow(dead_code)]

pub mod artifact;
pub mod env;
pub mod fixtures;

pub use artifact::*;
pub use env::*;
pub use fixtures::*;
