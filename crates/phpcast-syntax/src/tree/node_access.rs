//! NodeArena access methods: typed payload getters and upward navigation.

use super::base::{NodeIndex, ScopeId};
use super::node::*;
use crate::syntax_kind::SyntaxKind;
use phpcast_common::Span;

macro_rules! pool_getter {
    ($(#[$meta:meta])* $name:ident, $pool:ident, $ty:ty, $($kind:ident)|+) => {
        $(#[$meta])*
        #[inline]
        pub fn $name(&self, node: &Node) -> Option<&$ty> {
            if node.has_data() && matches!(node.kind, $(SyntaxKind::$kind)|+) {
                self.$pool.get(node.data_index as usize)
            } else {
                None
            }
        }
    };
}

impl NodeArena {
    /// Get a node by index.
    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    #[inline]
    pub fn kind_of(&self, index: NodeIndex) -> Option<SyntaxKind> {
        self.get(index).map(|node| node.kind)
    }

    #[inline]
    pub fn span_of(&self, index: NodeIndex) -> Option<Span> {
        self.get(index).map(Node::span)
    }

    /// Parent of a node; `NodeIndex::NONE` for roots and unknown indices.
    #[inline]
    pub fn parent_of(&self, index: NodeIndex) -> NodeIndex {
        if index.is_none() {
            return NodeIndex::NONE;
        }
        self.extended_info
            .get(index.0 as usize)
            .map_or(NodeIndex::NONE, |info| info.parent)
    }

    pool_getter!(get_source_file, source_files, SourceFileData, SourceFile);
    pool_getter!(
        /// Payload of functions, methods, closures and arrow functions.
        get_function, functions, FunctionData,
        FunctionDeclaration | MethodDeclaration | Closure | ArrowFunction
    );
    pool_getter!(get_class, classes, ClassData, ClassDeclaration);
    pool_getter!(get_return, returns, ReturnData, ReturnStatement);
    pool_getter!(get_expression_statement, expr_statements, ExprStatementData, ExpressionStatement);
    pool_getter!(get_variable, variables, VariableData, Variable);
    pool_getter!(
        get_literal, literals, LiteralData,
        IntegerLiteral
            | FloatLiteral
            | StringLiteral
            | InterpolatedString
            | TrueKeyword
            | FalseKeyword
            | NullKeyword
    );
    pool_getter!(get_array_literal, array_literals, ArrayLiteralData, ArrayLiteral);
    pool_getter!(get_new, new_exprs, NewExprData, NewExpression);
    pool_getter!(get_access, access_exprs, AccessData, PropertyAccess | StaticPropertyAccess);
    pool_getter!(get_call, call_exprs, CallData, FunctionCall | MethodCall | StaticMethodCall);
    pool_getter!(get_cast, casts, CastData, CastExpression);
    pool_getter!(get_binary, binary_exprs, BinaryExprData, BinaryExpression);
    pool_getter!(get_unary, unary_exprs, UnaryExprData, UnaryExpression);
    pool_getter!(get_parenthesized, parenthesized, ParenthesizedData, ParenthesizedExpression);
    pool_getter!(get_assignment, assignments, AssignmentData, Assignment);
    pool_getter!(get_other, others, OtherData, Other);

    // ============================================================================
    // Lexical context
    // ============================================================================

    /// Iterate the strict ancestors of `index`, innermost first.
    pub fn ancestors(&self, index: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        std::iter::successors(Some(self.parent_of(index)), move |&current| {
            Some(self.parent_of(current))
        })
        .take_while(|idx| idx.is_some())
    }

    /// The scope opened by `index` itself, if it is a scope node.
    pub fn scope_of(&self, index: NodeIndex) -> Option<ScopeId> {
        let node = self.get(index)?;
        match node.kind {
            SyntaxKind::SourceFile => self.get_source_file(node).map(|sf| sf.scope),
            kind if kind.is_function_like() => self.get_function(node).map(|f| f.scope),
            _ => None,
        }
    }

    /// Nearest strict ancestor that opens a scope (function-like or file).
    pub fn enclosing_scope_node(&self, index: NodeIndex) -> NodeIndex {
        self.ancestors(index)
            .find(|&ancestor| self.kind_of(ancestor).is_some_and(SyntaxKind::is_scope))
            .unwrap_or(NodeIndex::NONE)
    }

    /// Nearest strict ancestor that is a function, method, closure or arrow
    /// function.
    pub fn enclosing_function_like(&self, index: NodeIndex) -> NodeIndex {
        self.ancestors(index)
            .find(|&ancestor| {
                self.kind_of(ancestor)
                    .is_some_and(SyntaxKind::is_function_like)
            })
            .unwrap_or(NodeIndex::NONE)
    }

    /// Nearest enclosing class declaration.
    pub fn enclosing_class(&self, index: NodeIndex) -> NodeIndex {
        self.ancestors(index)
            .find(|&ancestor| self.kind_of(ancestor) == Some(SyntaxKind::ClassDeclaration))
            .unwrap_or(NodeIndex::NONE)
    }

    /// Name of the file that contains `index`, if its root is a source file.
    pub fn file_name_of(&self, index: NodeIndex) -> Option<&str> {
        let root = if self.kind_of(index) == Some(SyntaxKind::SourceFile) {
            index
        } else {
            self.ancestors(index).last()?
        };
        let node = self.get(root)?;
        self.get_source_file(node).map(|sf| sf.file_name.as_str())
    }

    /// Whether `index` is the value produced by its function: the operand of
    /// a `return`, or the body expression of an arrow function. Parentheses
    /// around the value are looked through.
    pub fn is_returned_value(&self, index: NodeIndex) -> bool {
        let mut current = index;
        loop {
            let parent = self.parent_of(current);
            let Some(parent_node) = self.get(parent) else {
                return false;
            };
            match parent_node.kind {
                SyntaxKind::ParenthesizedExpression => current = parent,
                SyntaxKind::ReturnStatement => return true,
                SyntaxKind::ArrowFunction => return true,
                _ => return false,
            }
        }
    }
}
