//! sprig benchmarking suite
//!
//! Benchmarks for lockfile parsing, tree resolution and flattening, run
//! against synthetic projects of increasing size.

pub mod common;

pub use common::*;
