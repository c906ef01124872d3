//! jsfold: constant propagation and folding for JavaScript.
//!
//! The library parses a script with swc, runs a single straight-line pass
//! that substitutes reads of known constants and folds integer binary
//! expressions, and prints the rewritten tree.
//!
//! ```no_run
//! use jsfold_core::{fold_source, FoldConfig};
//!
//! let out = fold_source("input.js", "var x = 2; var y = 3; print(x + y);", &FoldConfig::default())?;
//! assert!(out.code.contains("print(5)"));
//! # Ok::<(), jsfold_core::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod optimizer;
pub mod syntax;

pub use config::{FoldConfig, ShiftSemantics};
pub use error::{ConfigError, Error, FoldError, SyntaxError};
pub use optimizer::{FoldStats, Optimizer, PassReport};
pub use syntax::{parse_script, ParsedScript};

/// Result of [`fold_source`].
#[derive(Debug)]
pub struct FoldOutput {
    pub code: String,
    pub report: PassReport,
}

/// Parses, folds and prints `source` in one call.
///
/// Pass errors are located in `source` when the offending node carries a
/// real span.
pub fn fold_source(name: &str, source: &str, config: &FoldConfig) -> Result<FoldOutput, Error> {
    let mut parsed = parse_script(name, source)?;

    let report = match Optimizer::new(config.clone()).optimize(parsed.script_mut()) {
        Ok(report) => report,
        Err(err) => {
            return Err(match parsed.location(err.span()) {
                Some((line, column)) => Error::Fold {
                    source: err,
                    line,
                    column,
                },
                None => Error::FoldUnlocated(err),
            })
        }
    };

    let code = parsed.print()?;
    Ok(FoldOutput { code, report })
}
