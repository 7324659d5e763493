//! Common test utilities and fixtures
//!
//! This module provides shared test infrastructure including:
//! - A recording rollover client
//! - Builders for standalone indices and data streams
//! - Assertions on dispatched rollover requests

#![allow(dead_code)]

pub mod assertions;
pub mod fixtures;

// Re-export commonly used items
pub use assertions::*;
pub use fixtures::*;

// Re-export frequently used external types for convenience
pub use std::sync::Arc;
