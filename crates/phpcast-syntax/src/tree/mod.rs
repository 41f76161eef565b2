//! Node arena, node payloads, access helpers and traversal.

mod base;
mod node;
mod node_access;
mod node_arena;
mod traversal;

pub use base::{NodeIndex, NodeList, ScopeId};
pub use node::*;
pub use node_arena::FunctionSignature;
pub use traversal::Descendants;

#[cfg(test)]
#[path = "../../tests/node_arena_tests.rs"]
mod node_arena_tests;
#[cfg(test)]
#[path = "../../tests/traversal_tests.rs"]
mod traversal_tests;
