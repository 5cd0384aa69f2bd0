//! # sprig-core
//!
//! Core types and utilities shared across all sprig crates.
//!
//! This crate provides:
//! - `PackageId`, the `(name, version)` identity of a resolved package
//! - `DependencyKind` for the manifest dependency sections
//! - `SprigError` enum for unified error handling
//! - Path helpers used when resolving dependency directories
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: Core data types (PackageId, DependencyKind)
//! - `error`: Error types and result aliases
//! - `utils`: Utility functions and helpers

pub mod error;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use error::{SprigError, SprigResult};
pub use types::{DependencyKind, PackageId};
