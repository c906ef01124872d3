//! Error types for the fold pipeline.
//!
//! [`FoldError`] is raised by the propagation pass itself and always aborts
//! it; [`SyntaxError`] covers the parse/print glue and [`ConfigError`] the
//! configuration loader. [`Error`] bundles them for [`crate::fold_source`].

use swc_ecma_quote::swc_common::Span;
use thiserror::Error;

/// Fatal conditions raised while rewriting a tree.
#[derive(Debug, Clone, Error)]
pub enum FoldError {
    /// The tree contains a node kind the pass has no rule for.
    #[error("unsupported syntax kind `{kind}`")]
    UnsupportedSyntax { kind: &'static str, span: Span },

    /// An assignment target is neither an identifier nor a bracket access.
    #[error("invalid assignment target `{kind}`: only identifiers and `name[index]` can be assigned")]
    InvalidAssignTarget { kind: &'static str, span: Span },
}

impl FoldError {
    pub fn span(&self) -> Span {
        match self {
            FoldError::UnsupportedSyntax { span, .. } => *span,
            FoldError::InvalidAssignTarget { span, .. } => *span,
        }
    }
}

/// Failures of the external parser/printer.
#[derive(Debug, Error)]
pub enum SyntaxError {
    #[error("parse error at {line}:{column}: {message}")]
    Parse {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("failed to emit JavaScript: {0}")]
    Emit(#[from] std::io::Error),

    #[error("emitted JavaScript is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Any failure of the one-call [`crate::fold_source`] API.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{source} (at {line}:{column})")]
    Fold {
        #[source]
        source: FoldError,
        line: usize,
        column: usize,
    },

    #[error(transparent)]
    FoldUnlocated(FoldError),
}

impl Error {
    /// The pass error behind this failure, if the pass is what failed.
    pub fn fold_error(&self) -> Option<&FoldError> {
        match self {
            Error::Fold { source, .. } | Error::FoldUnlocated(source) => Some(source),
            _ => None,
        }
    }
}
