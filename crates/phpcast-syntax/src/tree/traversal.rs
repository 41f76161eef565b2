//! Document-order traversal.

use smallvec::SmallVec;

use super::base::NodeIndex;
use super::node::NodeArena;
use crate::syntax_kind::SyntaxKind;

impl NodeArena {
    /// Direct children of `index`, in source order.
    pub fn children_of(&self, index: NodeIndex) -> SmallVec<[NodeIndex; 4]> {
        let mut children = SmallVec::new();
        let Some(node) = self.get(index) else {
            return children;
        };

        match node.kind {
            SyntaxKind::SourceFile => {
                if let Some(sf) = self.get_source_file(node) {
                    children.extend(sf.statements.nodes.iter().copied());
                }
            }
            kind if kind.is_function_like() => {
                if let Some(func) = self.get_function(node) {
                    children.extend(func.body.nodes.iter().copied());
                }
            }
            SyntaxKind::ClassDeclaration => {
                if let Some(class) = self.get_class(node) {
                    children.extend(class.members.nodes.iter().copied());
                }
            }
            SyntaxKind::ReturnStatement => {
                if let Some(ret) = self.get_return(node) {
                    children.push(ret.expression);
                }
            }
            SyntaxKind::ExpressionStatement => {
                if let Some(stmt) = self.get_expression_statement(node) {
                    children.push(stmt.expression);
                }
            }
            SyntaxKind::ArrayLiteral => {
                if let Some(array) = self.get_array_literal(node) {
                    children.extend(array.elements.nodes.iter().copied());
                }
            }
            SyntaxKind::NewExpression => {
                if let Some(new_expr) = self.get_new(node) {
                    children.extend(new_expr.arguments.nodes.iter().copied());
                }
            }
            SyntaxKind::PropertyAccess | SyntaxKind::StaticPropertyAccess => {
                if let Some(access) = self.get_access(node) {
                    children.push(access.object);
                }
            }
            SyntaxKind::FunctionCall | SyntaxKind::MethodCall | SyntaxKind::StaticMethodCall => {
                if let Some(call) = self.get_call(node) {
                    children.push(call.receiver);
                    children.extend(call.arguments.nodes.iter().copied());
                }
            }
            SyntaxKind::CastExpression => {
                if let Some(cast) = self.get_cast(node) {
                    children.push(cast.operand);
                }
            }
            SyntaxKind::BinaryExpression => {
                if let Some(binary) = self.get_binary(node) {
                    children.push(binary.left);
                    children.push(binary.right);
                }
            }
            SyntaxKind::UnaryExpression => {
                if let Some(unary) = self.get_unary(node) {
                    children.push(unary.operand);
                }
            }
            SyntaxKind::ParenthesizedExpression => {
                if let Some(paren) = self.get_parenthesized(node) {
                    children.push(paren.expression);
                }
            }
            SyntaxKind::Assignment => {
                if let Some(assign) = self.get_assignment(node) {
                    children.push(assign.target);
                    children.push(assign.value);
                }
            }
            SyntaxKind::Other => {
                if let Some(other) = self.get_other(node) {
                    children.extend(other.children.nodes.iter().copied());
                }
            }
            _ => {}
        }

        children.retain(|child| child.is_some());
        children
    }

    /// Pre-order, document-order iterator over `root` and all its
    /// descendants.
    pub fn descendants(&self, root: NodeIndex) -> Descendants<'_> {
        let mut stack = Vec::new();
        if self.get(root).is_some() {
            stack.push(root);
        }
        Descendants { arena: self, stack }
    }
}

/// Iterator returned by [`NodeArena::descendants`]. Uses an explicit stack,
/// so arbitrarily deep trees do not grow the call stack.
pub struct Descendants<'a> {
    arena: &'a NodeArena,
    stack: Vec<NodeIndex>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<NodeIndex> {
        let current = self.stack.pop()?;
        let children = self.arena.children_of(current);
        self.stack.extend(children.into_iter().rev());
        Some(current)
    }
}
