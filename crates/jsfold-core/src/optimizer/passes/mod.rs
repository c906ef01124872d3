mod constant_propagation;
pub use constant_propagation::{Access, ConstantPropagationPass, FoldStats, PassReport};
