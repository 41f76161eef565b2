//! Arena-allocated PHP syntax tree for the phpcast inspection engine.
//!
//! The tree is produced by an external parser and consumed read-only by the
//! checker. Nodes live in a [`NodeArena`] and are addressed by [`NodeIndex`];
//! kind-specific payloads are stored in typed side pools, and every node
//! records its parent so lexical context can be recovered by walking upward.

pub mod operators;
pub use operators::{BinaryOperator, UnaryOperator};

pub mod syntax_kind;
pub use syntax_kind::{CastKind, SyntaxKind};

pub mod tree;
pub use tree::{
    AccessData, ArrayLiteralData, AssignmentData, BinaryExprData, CallData, CastData, ClassData,
    Descendants, ExprStatementData, FunctionData, FunctionSignature, LiteralData, NewExprData,
    Node, NodeArena, NodeIndex, NodeList, OtherData, ParenthesizedData, ReturnData, ScopeId,
    SourceFileData, UnaryExprData, VariableData,
};
