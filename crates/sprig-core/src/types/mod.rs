//! Core data types for sprig.
//!
//! This module provides the fundamental types used throughout the workspace:
//! - Package identities
//! - Manifest dependency kinds

pub mod dependency;
pub mod package;

// Re-export all public types
pub use dependency::DependencyKind;
pub use package::{split_selector, PackageId};
