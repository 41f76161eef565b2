//! Node header and kind-specific payloads.

use super::base::{NodeIndex, NodeList, ScopeId};
use crate::operators::{BinaryOperator, UnaryOperator};
use crate::syntax_kind::{CastKind, SyntaxKind};
use phpcast_common::Span;

/// Thin node header. The payload lives in the pool selected by `kind`, at
/// `data_index`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Node {
    pub kind: SyntaxKind,
    pub pos: u32,
    pub end: u32,
    pub data_index: u32,
}

impl Node {
    pub const NO_DATA: u32 = u32::MAX;

    #[inline]
    pub const fn has_data(&self) -> bool {
        self.data_index != Self::NO_DATA
    }

    #[inline]
    pub const fn span(&self) -> Span {
        Span {
            start: self.pos,
            end: self.end,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExtendedNodeInfo {
    pub parent: NodeIndex,
}

impl Default for ExtendedNodeInfo {
    fn default() -> Self {
        ExtendedNodeInfo {
            parent: NodeIndex::NONE,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SourceFileData {
    pub file_name: String,
    pub statements: NodeList,
    pub scope: ScopeId,
}

/// Functions, methods, closures and arrow functions.
#[derive(Clone, Debug)]
pub struct FunctionData {
    /// `None` for closures and arrow functions.
    pub name: Option<String>,
    /// Parameter names without the leading `$`.
    pub parameters: Vec<String>,
    /// Statements; for an arrow function, the single body expression.
    pub body: NodeList,
    pub scope: ScopeId,
    /// Whether the signature carries a native (enforced) return type.
    pub has_native_return_type: bool,
    pub is_static: bool,
    /// Names imported by a closure's `use (...)` clause, without `$`.
    pub captures: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct ClassData {
    pub name: String,
    pub members: NodeList,
}

#[derive(Clone, Copy, Debug)]
pub struct ReturnData {
    /// `NodeIndex::NONE` for a bare `return;`.
    pub expression: NodeIndex,
}

#[derive(Clone, Copy, Debug)]
pub struct ExprStatementData {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct VariableData {
    /// Name without the leading `$`.
    pub name: String,
}

#[derive(Clone, Debug)]
pub struct LiteralData {
    pub text: String,
}

#[derive(Clone, Debug)]
pub struct ArrayLiteralData {
    pub elements: NodeList,
}

#[derive(Clone, Debug)]
pub struct NewExprData {
    /// `None` when the class is computed (`new $class`).
    pub class_name: Option<String>,
    pub arguments: NodeList,
}

/// `$object->name` and `Class::$name`.
#[derive(Clone, Debug)]
pub struct AccessData {
    /// Receiver expression; `NodeIndex::NONE` for static access.
    pub object: NodeIndex,
    /// Class name for static access.
    pub class_name: Option<String>,
    /// `None` when the member name is computed (`$o->{$name}`).
    pub name: Option<String>,
}

/// `name()`, `$object->name()` and `Class::name()`.
#[derive(Clone, Debug)]
pub struct CallData {
    /// Receiver for method calls, `NodeIndex::NONE` otherwise.
    pub receiver: NodeIndex,
    /// Class for static calls.
    pub class_name: Option<String>,
    /// `None` when the callee is computed (`$fn()`, `$o->$m()`).
    pub name: Option<String>,
    pub arguments: NodeList,
}

#[derive(Clone, Debug)]
pub struct CastData {
    pub kind: CastKind,
    /// Keyword as written, e.g. `integer`.
    pub keyword: String,
    /// Span of the `(type)` token alone.
    pub token_span: Span,
    pub operand: NodeIndex,
}

#[derive(Clone, Copy, Debug)]
pub struct BinaryExprData {
    pub left: NodeIndex,
    pub operator: BinaryOperator,
    pub right: NodeIndex,
}

#[derive(Clone, Copy, Debug)]
pub struct UnaryExprData {
    pub operator: UnaryOperator,
    pub operand: NodeIndex,
}

#[derive(Clone, Copy, Debug)]
pub struct ParenthesizedData {
    pub expression: NodeIndex,
}

#[derive(Clone, Copy, Debug)]
pub struct AssignmentData {
    pub target: NodeIndex,
    pub value: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct OtherData {
    pub children: NodeList,
}

/// Storage for one syntactic unit (typically a file).
///
/// Children are always added before their parent, so node indices grow
/// bottom-up and the parent link of a child is set when the parent is added.
#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    pub nodes: Vec<Node>,
    pub extended_info: Vec<ExtendedNodeInfo>,
    pub(crate) next_scope: u32,

    pub source_files: Vec<SourceFileData>,
    pub functions: Vec<FunctionData>,
    pub classes: Vec<ClassData>,
    pub returns: Vec<ReturnData>,
    pub expr_statements: Vec<ExprStatementData>,
    pub variables: Vec<VariableData>,
    pub literals: Vec<LiteralData>,
    pub array_literals: Vec<ArrayLiteralData>,
    pub new_exprs: Vec<NewExprData>,
    pub access_exprs: Vec<AccessData>,
    pub call_exprs: Vec<CallData>,
    pub casts: Vec<CastData>,
    pub binary_exprs: Vec<BinaryExprData>,
    pub unary_exprs: Vec<UnaryExprData>,
    pub parenthesized: Vec<ParenthesizedData>,
    pub assignments: Vec<AssignmentData>,
    pub others: Vec<OtherData>,
}
