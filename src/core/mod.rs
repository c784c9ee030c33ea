//! Core module - Shared utilities
//!
//! This module provides:
//! - Key fingerprinting for the cache
//! - Path resolution relative to the configuration directory

pub mod paths;
pub mod util;
