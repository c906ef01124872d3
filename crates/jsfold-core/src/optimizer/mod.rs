//! Source-to-source optimizer over the swc script tree.

pub mod env;
pub mod eval;
pub mod kind;
pub mod literal;
pub mod passes;
pub mod trace;

pub use passes::{Access, ConstantPropagationPass, FoldStats, PassReport};

use crate::config::FoldConfig;
use crate::error::FoldError;
use swc_ecma_ast::Script;
use tracing::debug;

/// Runs the constant propagation pass with a fixed configuration.
///
/// Every call to [`Optimizer::optimize`] starts from an empty environment,
/// so one optimizer can be reused across unrelated programs.
#[derive(Debug, Clone, Default)]
pub struct Optimizer {
    config: FoldConfig,
}

impl Optimizer {
    pub fn new(config: FoldConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FoldConfig {
        &self.config
    }

    /// Rewrites `script` in place. On error the tree may be partially
    /// rewritten and should be discarded.
    pub fn optimize(&self, script: &mut Script) -> Result<PassReport, FoldError> {
        let pass = ConstantPropagationPass::new(self.config.clone());
        debug!(pass = pass.name(), statements = script.body.len(), "running pass");
        pass.run(script)
    }
}
