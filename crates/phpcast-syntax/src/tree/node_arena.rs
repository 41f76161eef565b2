//! NodeArena creation methods (add_* methods).
//!
//! Nodes are created bottom-up: every child passed to an `add_*` method must
//! already exist, and gets its parent link stamped here.

use super::base::{NodeIndex, NodeList, ScopeId};
use super::node::*;
use crate::operators::{BinaryOperator, UnaryOperator};
use crate::syntax_kind::{CastKind, SyntaxKind};
use phpcast_common::Span;

/// Signature facts of a function-like node, as the parser saw them.
#[derive(Clone, Debug, Default)]
pub struct FunctionSignature {
    pub name: Option<String>,
    pub parameters: Vec<String>,
    pub has_native_return_type: bool,
    pub is_static: bool,
    pub captures: Vec<String>,
}

fn strip_sigil(name: &str) -> String {
    name.strip_prefix('$').unwrap_or(name).to_string()
}

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    /// Number of nodes in the arena.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn alloc_scope(&mut self) -> ScopeId {
        let scope = ScopeId(self.next_scope);
        self.next_scope += 1;
        scope
    }

    fn push_node(&mut self, kind: SyntaxKind, span: Span, data_index: usize) -> NodeIndex {
        let index = NodeIndex(self.nodes.len() as u32);
        self.nodes.push(Node {
            kind,
            pos: span.start,
            end: span.end,
            data_index: data_index as u32,
        });
        self.extended_info.push(ExtendedNodeInfo::default());
        index
    }

    // ============================================================================
    // Parent Mapping Helpers
    // ============================================================================

    #[inline]
    fn set_parent(&mut self, child: NodeIndex, parent: NodeIndex) {
        if child.is_none() {
            return;
        }
        // Children are created before parents, so the slot already exists.
        if let Some(info) = self.extended_info.get_mut(child.0 as usize) {
            debug_assert!(info.parent.is_none(), "node {child:?} already has a parent");
            info.parent = parent;
        }
    }

    #[inline]
    fn set_parent_list(&mut self, list: &[NodeIndex], parent: NodeIndex) {
        for &child in list {
            self.set_parent(child, parent);
        }
    }

    // ============================================================================
    // Scopes and declarations
    // ============================================================================

    pub fn add_source_file(
        &mut self,
        file_name: impl Into<String>,
        span: Span,
        statements: Vec<NodeIndex>,
    ) -> NodeIndex {
        let scope = self.alloc_scope();
        let data_index = self.source_files.len();
        self.source_files.push(SourceFileData {
            file_name: file_name.into(),
            statements: NodeList::new(statements.clone()),
            scope,
        });
        let index = self.push_node(SyntaxKind::SourceFile, span, data_index);
        self.set_parent_list(&statements, index);
        index
    }

    /// Add a function, method, closure or arrow function.
    pub fn add_function(
        &mut self,
        kind: SyntaxKind,
        span: Span,
        signature: FunctionSignature,
        body: Vec<NodeIndex>,
    ) -> NodeIndex {
        debug_assert!(kind.is_function_like(), "{kind:?} is not function-like");
        let scope = self.alloc_scope();
        let data_index = self.functions.len();
        self.functions.push(FunctionData {
            name: signature.name,
            parameters: signature.parameters.iter().map(|p| strip_sigil(p)).collect(),
            body: NodeList::new(body.clone()),
            scope,
            has_native_return_type: signature.has_native_return_type,
            is_static: signature.is_static,
            captures: signature.captures.iter().map(|c| strip_sigil(c)).collect(),
        });
        let index = self.push_node(kind, span, data_index);
        self.set_parent_list(&body, index);
        index
    }

    pub fn add_class(
        &mut self,
        name: impl Into<String>,
        span: Span,
        members: Vec<NodeIndex>,
    ) -> NodeIndex {
        let data_index = self.classes.len();
        self.classes.push(ClassData {
            name: name.into(),
            members: NodeList::new(members.clone()),
        });
        let index = self.push_node(SyntaxKind::ClassDeclaration, span, data_index);
        self.set_parent_list(&members, index);
        index
    }

    // ============================================================================
    // Statements
    // ============================================================================

    pub fn add_return(&mut self, span: Span, expression: NodeIndex) -> NodeIndex {
        let data_index = self.returns.len();
        self.returns.push(ReturnData { expression });
        let index = self.push_node(SyntaxKind::ReturnStatement, span, data_index);
        self.set_parent(expression, index);
        index
    }

    pub fn add_expression_statement(&mut self, span: Span, expression: NodeIndex) -> NodeIndex {
        let data_index = self.expr_statements.len();
        self.expr_statements.push(ExprStatementData { expression });
        let index = self.push_node(SyntaxKind::ExpressionStatement, span, data_index);
        self.set_parent(expression, index);
        index
    }

    // ============================================================================
    // Expressions
    // ============================================================================

    /// Add a variable reference. A leading `$` is stripped.
    pub fn add_variable(&mut self, name: &str, span: Span) -> NodeIndex {
        let data_index = self.variables.len();
        self.variables.push(VariableData {
            name: strip_sigil(name),
        });
        self.push_node(SyntaxKind::Variable, span, data_index)
    }

    pub fn add_literal(
        &mut self,
        kind: SyntaxKind,
        text: impl Into<String>,
        span: Span,
    ) -> NodeIndex {
        debug_assert!(kind.is_literal(), "{kind:?} is not a literal kind");
        let data_index = self.literals.len();
        self.literals.push(LiteralData { text: text.into() });
        self.push_node(kind, span, data_index)
    }

    pub fn add_array_literal(&mut self, span: Span, elements: Vec<NodeIndex>) -> NodeIndex {
        let data_index = self.array_literals.len();
        self.array_literals.push(ArrayLiteralData {
            elements: NodeList::new(elements.clone()),
        });
        let index = self.push_node(SyntaxKind::ArrayLiteral, span, data_index);
        self.set_parent_list(&elements, index);
        index
    }

    pub fn add_new(
        &mut self,
        class_name: Option<&str>,
        span: Span,
        arguments: Vec<NodeIndex>,
    ) -> NodeIndex {
        let data_index = self.new_exprs.len();
        self.new_exprs.push(NewExprData {
            class_name: class_name.map(str::to_string),
            arguments: NodeList::new(arguments.clone()),
        });
        let index = self.push_node(SyntaxKind::NewExpression, span, data_index);
        self.set_parent_list(&arguments, index);
        index
    }

    /// `$object->name`; `name` is `None` for computed member names.
    pub fn add_property_access(
        &mut self,
        object: NodeIndex,
        name: Option<&str>,
        span: Span,
    ) -> NodeIndex {
        let data_index = self.access_exprs.len();
        self.access_exprs.push(AccessData {
            object,
            class_name: None,
            name: name.map(str::to_string),
        });
        let index = self.push_node(SyntaxKind::PropertyAccess, span, data_index);
        self.set_parent(object, index);
        index
    }

    /// `Class::$name`.
    pub fn add_static_property_access(
        &mut self,
        class_name: &str,
        name: &str,
        span: Span,
    ) -> NodeIndex {
        let data_index = self.access_exprs.len();
        self.access_exprs.push(AccessData {
            object: NodeIndex::NONE,
            class_name: Some(class_name.to_string()),
            name: Some(strip_sigil(name)),
        });
        self.push_node(SyntaxKind::StaticPropertyAccess, span, data_index)
    }

    fn add_call(&mut self, kind: SyntaxKind, data: CallData, span: Span) -> NodeIndex {
        let receiver = data.receiver;
        let arguments = data.arguments.nodes.clone();
        let data_index = self.call_exprs.len();
        self.call_exprs.push(data);
        let index = self.push_node(kind, span, data_index);
        self.set_parent(receiver, index);
        self.set_parent_list(&arguments, index);
        index
    }

    pub fn add_function_call(
        &mut self,
        name: Option<&str>,
        span: Span,
        arguments: Vec<NodeIndex>,
    ) -> NodeIndex {
        let data = CallData {
            receiver: NodeIndex::NONE,
            class_name: None,
            name: name.map(str::to_string),
            arguments: NodeList::new(arguments),
        };
        self.add_call(SyntaxKind::FunctionCall, data, span)
    }

    pub fn add_method_call(
        &mut self,
        receiver: NodeIndex,
        name: Option<&str>,
        span: Span,
        arguments: Vec<NodeIndex>,
    ) -> NodeIndex {
        let data = CallData {
            receiver,
            class_name: None,
            name: name.map(str::to_string),
            arguments: NodeList::new(arguments),
        };
        self.add_call(SyntaxKind::MethodCall, data, span)
    }

    pub fn add_static_method_call(
        &mut self,
        class_name: &str,
        name: &str,
        span: Span,
        arguments: Vec<NodeIndex>,
    ) -> NodeIndex {
        let data = CallData {
            receiver: NodeIndex::NONE,
            class_name: Some(class_name.to_string()),
            name: Some(name.to_string()),
            arguments: NodeList::new(arguments),
        };
        self.add_call(SyntaxKind::StaticMethodCall, data, span)
    }

    /// Add a cast. The node spans from the cast token to the end of the
    /// operand.
    pub fn add_cast(&mut self, keyword: &str, token_span: Span, operand: NodeIndex) -> NodeIndex {
        let span = match self.get(operand) {
            Some(node) => token_span.cover(node.span()),
            None => token_span,
        };
        let keyword = keyword.trim().trim_start_matches('(').trim_end_matches(')').trim();
        let data_index = self.casts.len();
        self.casts.push(CastData {
            kind: CastKind::from_keyword(keyword),
            keyword: keyword.to_string(),
            token_span,
            operand,
        });
        let index = self.push_node(SyntaxKind::CastExpression, span, data_index);
        self.set_parent(operand, index);
        index
    }

    pub fn add_binary(
        &mut self,
        left: NodeIndex,
        operator: BinaryOperator,
        right: NodeIndex,
        span: Span,
    ) -> NodeIndex {
        let data_index = self.binary_exprs.len();
        self.binary_exprs.push(BinaryExprData {
            left,
            operator,
            right,
        });
        let index = self.push_node(SyntaxKind::BinaryExpression, span, data_index);
        self.set_parent(left, index);
        self.set_parent(right, index);
        index
    }

    pub fn add_unary(
        &mut self,
        operator: UnaryOperator,
        operand: NodeIndex,
        span: Span,
    ) -> NodeIndex {
        let data_index = self.unary_exprs.len();
        self.unary_exprs.push(UnaryExprData { operator, operand });
        let index = self.push_node(SyntaxKind::UnaryExpression, span, data_index);
        self.set_parent(operand, index);
        index
    }

    pub fn add_parenthesized(&mut self, expression: NodeIndex, span: Span) -> NodeIndex {
        let data_index = self.parenthesized.len();
        self.parenthesized.push(ParenthesizedData { expression });
        let index = self.push_node(SyntaxKind::ParenthesizedExpression, span, data_index);
        self.set_parent(expression, index);
        index
    }

    pub fn add_assignment(&mut self, target: NodeIndex, value: NodeIndex, span: Span) -> NodeIndex {
        let data_index = self.assignments.len();
        self.assignments.push(AssignmentData { target, value });
        let index = self.push_node(SyntaxKind::Assignment, span, data_index);
        self.set_parent(target, index);
        self.set_parent(value, index);
        index
    }

    /// Add an opaque node. Its children are still visited by traversal.
    pub fn add_other(&mut self, span: Span, children: Vec<NodeIndex>) -> NodeIndex {
        let data_index = self.others.len();
        self.others.push(OtherData {
            children: NodeList::new(children.clone()),
        });
        let index = self.push_node(SyntaxKind::Other, span, data_index);
        self.set_parent_list(&children, index);
        index
    }
}
