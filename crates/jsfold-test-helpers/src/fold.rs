//! Fold helpers
//!
//! Run the whole parse → fold → print pipeline on a source string and
//! flatten the result into something easy to assert on.

use jsfold_core::{fold_source, FoldConfig, FoldError, FoldStats};

const TEST_FILE: &str = "test.js";

/// Fold JavaScript source with the default configuration
///
/// # Returns
/// The printed program or the error message
pub fn fold(source: &str) -> Result<String, String> {
    fold_with_config(source, &FoldConfig::default())
}

/// Fold JavaScript source with an explicit configuration
pub fn fold_with_config(source: &str, config: &FoldConfig) -> Result<String, String> {
    fold_source(TEST_FILE, source, config)
        .map(|output| output.code)
        .map_err(|err| err.to_string())
}

/// Debug trace lines of folding `source`
pub fn trace_of(source: &str) -> Result<Vec<String>, String> {
    let config = FoldConfig::default().with_debug_trace(true);
    fold_source(TEST_FILE, source, &config)
        .map(|output| output.report.trace)
        .map_err(|err| err.to_string())
}

/// Pass counters of folding `source`
pub fn stats_of(source: &str) -> Result<FoldStats, String> {
    fold_source(TEST_FILE, source, &FoldConfig::default())
        .map(|output| output.report.stats)
        .map_err(|err| err.to_string())
}

/// The pass error raised while folding `source`
///
/// # Returns
/// `None` if folding succeeded or failed before the pass ran
pub fn fold_error(source: &str) -> Option<FoldError> {
    match fold_source(TEST_FILE, source, &FoldConfig::default()) {
        Ok(_) => None,
        Err(err) => err.fold_error().cloned(),
    }
}
