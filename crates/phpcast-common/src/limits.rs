//! Centralized limits and thresholds for the inspection engine.
//!
//! Every limit here degrades to "no finding" when exceeded: the resolver
//! returns an `Unknown` result instead of recursing further.

/// Maximum depth for expression type inference.
///
/// Each nested sub-expression (parenthesized, binary operand, member access
/// receiver, cast operand) adds one level.
///
/// ```php
/// $x = (int) ((((((1 + 2) + 3) + 4) /* ... 500 levels ... */)));
/// ```
pub const MAX_EXPR_INFER_DEPTH: u32 = 500;

/// Maximum number of ancestors followed when answering a subclass query
/// from an in-memory class table. Guards against cyclic `extends` data.
pub const MAX_CLASS_HIERARCHY_DEPTH: u32 = 64;

/// Maximum number of lexical scopes walked when a variable lookup continues
/// outward through arrow functions and `use` clauses.
pub const MAX_SCOPE_CHAIN_DEPTH: u32 = 32;
