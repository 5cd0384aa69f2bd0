//! Utility functions and helpers.
//!
//! Common functionality used across multiple sprig crates.

pub mod path;

// Re-export commonly used utilities
pub use path::{normalize_path, resolve_relative};
