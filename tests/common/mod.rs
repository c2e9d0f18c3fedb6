//! Common test utilities and fixtures for code-outline integration tests
//!
//! This module provides:
//! - `TestRepo` builder for creating temporary source trees
//! - Assertions over extracted snapshots

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod assertions;

pub use assertions::*;
pub use test_repo::TestRepo;
