//! Per-pass checker state.

use phpcast_syntax::{NodeArena, NodeIndex};
use rustc_hash::FxHashMap;

use crate::inference::InferenceResult;
use crate::options::CheckerOptions;
use crate::provider::ContextProvider;

/// State shared by the resolver and the cast analyzer during one pass over
/// one unit.
///
/// The arena and provider are borrowed read-only. The inference cache is
/// owned, so two contexts never share mutable state and each worker of a
/// parallel run builds its own.
pub struct CheckerContext<'a> {
    pub arena: &'a NodeArena,
    pub provider: &'a dyn ContextProvider,
    pub options: CheckerOptions,
    /// Memoized inference results, keyed by node.
    pub node_types: FxHashMap<NodeIndex, InferenceResult>,
    /// Whether a function body may write to one of its parameters, keyed by
    /// function node and parameter name.
    pub rebound_parameters: FxHashMap<(NodeIndex, String), bool>,
}

impl<'a> CheckerContext<'a> {
    pub fn new(
        arena: &'a NodeArena,
        provider: &'a dyn ContextProvider,
        options: CheckerOptions,
    ) -> Self {
        CheckerContext {
            arena,
            provider,
            options,
            node_types: FxHashMap::default(),
            rebound_parameters: FxHashMap::default(),
        }
    }

    /// Drop every cached result. Needed only if the provider's answers have
    /// changed since the pass started.
    pub fn clear_cache(&mut self) {
        self.node_types.clear();
        self.rebound_parameters.clear();
    }
}
