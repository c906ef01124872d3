//! Test utilities for jsfold
//!
//! Shared by the integration tests and the benchmark.

pub mod fixtures;
pub mod fold;

pub use fold::{fold, fold_error, fold_with_config, stats_of, trace_of};
