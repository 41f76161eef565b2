//! Type Resolver
//!
//! Infers the static type of an expression node from literals, operators and
//! the declarations the [`ContextProvider`](crate::ContextProvider) knows.
//!
//! ## Rules
//!
//! - literals have their lexical type; `new C` is `C`
//! - variables take the winning declaration of their scope; `$this` in an
//!   instance method is the enclosing class; a native parameter type is
//!   dropped once the body may write to the parameter
//! - property access and calls need a certain receiver class, then ask the
//!   provider; only native return types are trusted for calls
//! - operators follow [`operator_rules`](crate::operator_rules)
//! - parentheses and assignments pass the inner type through
//! - an inner cast has its target type
//!
//! Anything else, and any provider error, is `Unknown`. Results are memoized
//! per node in the context for the whole pass.

use phpcast_common::limits::MAX_SCOPE_CHAIN_DEPTH;
use phpcast_syntax::{CastKind, Node, NodeIndex, SyntaxKind};
use phpcast_types::{ClassRef, Type};
use tracing::trace;

use crate::context::CheckerContext;
use crate::inference::{InferenceFailure, InferenceResult};
use crate::operator_rules::{binary_result_type, unary_result_type};
use crate::provider::{CallableRef, Declaration, DeclarationSource, ProviderError};

type InferResult = Result<Type, InferenceFailure>;

/// Type of the value a `(kind)` cast produces, or `None` for casts that are
/// never reported.
pub fn cast_target_type(kind: CastKind) -> Option<Type> {
    match kind {
        CastKind::Int => Some(Type::Int),
        CastKind::Bool => Some(Type::Bool),
        CastKind::Float => Some(Type::Float),
        CastKind::String => Some(Type::String),
        CastKind::Array => Some(Type::Array),
        CastKind::Object | CastKind::Unset | CastKind::Unrecognized => None,
    }
}

/// Expression type resolver operating on the shared context.
pub struct TypeResolver<'a, 'ctx> {
    ctx: &'a mut CheckerContext<'ctx>,
    /// Recursion depth counter for stack overflow protection
    depth: u32,
}

impl<'a, 'ctx> TypeResolver<'a, 'ctx> {
    pub fn new(ctx: &'a mut CheckerContext<'ctx>) -> Self {
        Self { ctx, depth: 0 }
    }

    /// Infer the type of `idx`. Never fails; anything unresolvable is
    /// `Unknown`.
    pub fn infer(&mut self, idx: NodeIndex) -> InferenceResult {
        if let Some(cached) = self.ctx.node_types.get(&idx) {
            return cached.clone();
        }

        // Stack overflow protection. The cut-off node itself is not cached,
        // but its ancestors are cached as Unknown.
        if self.depth >= self.ctx.options.inference_depth_limit() {
            let failure = InferenceFailure::DepthExceeded;
            trace!(node = idx.0, %failure, "inference downgraded to unknown");
            return InferenceResult::unknown();
        }

        self.depth += 1;
        let result = match self.compute(idx) {
            Ok(ty) => InferenceResult::certain(ty),
            Err(failure) => {
                trace!(node = idx.0, %failure, "inference downgraded to unknown");
                InferenceResult::unknown()
            }
        };
        self.depth -= 1;

        self.ctx.node_types.insert(idx, result.clone());
        result
    }

    /// The certain type of `idx`, or why there is none.
    fn certain(&mut self, idx: NodeIndex) -> InferResult {
        let result = self.infer(idx);
        if result.is_certain() {
            Ok(result.ty)
        } else {
            Err(InferenceFailure::UnresolvedType)
        }
    }

    fn compute(&mut self, idx: NodeIndex) -> InferResult {
        let arena = self.ctx.arena;
        let Some(node) = arena.get(idx) else {
            return Err(InferenceFailure::UnsupportedNodeKind);
        };

        match node.kind {
            SyntaxKind::IntegerLiteral => arena
                .get_literal(node)
                .and_then(|literal| integer_literal_type(&literal.text))
                .ok_or(InferenceFailure::UnresolvedType),
            SyntaxKind::FloatLiteral => Ok(Type::Float),
            SyntaxKind::StringLiteral | SyntaxKind::InterpolatedString => Ok(Type::String),
            SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword => Ok(Type::Bool),
            SyntaxKind::NullKeyword => Ok(Type::Null),
            SyntaxKind::ArrayLiteral => Ok(Type::Array),

            SyntaxKind::Variable => self.infer_variable(idx, node),
            SyntaxKind::NewExpression => self.infer_new(idx, node),
            SyntaxKind::PropertyAccess | SyntaxKind::StaticPropertyAccess => {
                self.infer_property_access(idx, node)
            }
            SyntaxKind::FunctionCall | SyntaxKind::MethodCall | SyntaxKind::StaticMethodCall => {
                self.infer_call(idx, node)
            }

            SyntaxKind::CastExpression => {
                let cast = arena
                    .get_cast(node)
                    .ok_or(InferenceFailure::UnsupportedNodeKind)?;
                cast_target_type(cast.kind).ok_or(InferenceFailure::UnresolvedType)
            }
            SyntaxKind::BinaryExpression => {
                let binary = arena
                    .get_binary(node)
                    .ok_or(InferenceFailure::UnsupportedNodeKind)?;
                let left = self.infer(binary.left);
                let right = self.infer(binary.right);
                binary_result_type(binary.operator, left.certain_type(), right.certain_type())
                    .ok_or(InferenceFailure::UnresolvedType)
            }
            SyntaxKind::UnaryExpression => {
                let unary = arena
                    .get_unary(node)
                    .ok_or(InferenceFailure::UnsupportedNodeKind)?;
                let operand = self.infer(unary.operand);
                unary_result_type(unary.operator, operand.certain_type())
                    .ok_or(InferenceFailure::UnresolvedType)
            }
            SyntaxKind::ParenthesizedExpression => {
                let paren = arena
                    .get_parenthesized(node)
                    .ok_or(InferenceFailure::UnsupportedNodeKind)?;
                self.certain(paren.expression)
            }
            SyntaxKind::Assignment => {
                let assignment = arena
                    .get_assignment(node)
                    .ok_or(InferenceFailure::UnsupportedNodeKind)?;
                self.certain(assignment.value)
            }

            _ => Err(InferenceFailure::UnsupportedNodeKind),
        }
    }

    // =========================================================================
    // Variables
    // =========================================================================

    fn infer_variable(&mut self, idx: NodeIndex, node: &Node) -> InferResult {
        let arena = self.ctx.arena;
        let name = arena
            .get_variable(node)
            .map(|v| v.name.as_str())
            .ok_or(InferenceFailure::UnsupportedNodeKind)?;

        if name == "this" {
            return self.this_type(idx);
        }

        let mut current = idx;
        for _ in 0..MAX_SCOPE_CHAIN_DEPTH {
            let scope_node = arena.enclosing_scope_node(current);
            let scope = arena
                .scope_of(scope_node)
                .ok_or(InferenceFailure::UnresolvedType)?;

            let declarations = self
                .ctx
                .provider
                .declared_types_of(scope, name)
                .map_err(provider_failure)?;

            if let Some(winner) = pick_variable_declaration(&declarations) {
                // A native parameter type only holds until the body assigns
                // something else to it.
                if winner.source == DeclarationSource::ParameterHint
                    && self.parameter_is_rebound(scope_node, name)
                {
                    return Err(InferenceFailure::UnresolvedType);
                }
                return self.trusted_type(winner);
            }
            if !self.lookup_continues_outward(scope_node, name) {
                return Err(InferenceFailure::UnresolvedType);
            }
            current = scope_node;
        }
        Err(InferenceFailure::DepthExceeded)
    }

    /// Whether an undeclared `name` in the scope opened by `scope_node` is
    /// the same variable as in the enclosing scope: arrow functions capture
    /// by value implicitly, closures only what their `use` clause lists.
    fn lookup_continues_outward(&self, scope_node: NodeIndex, name: &str) -> bool {
        let arena = self.ctx.arena;
        let Some(node) = arena.get(scope_node) else {
            return false;
        };
        let Some(function) = arena.get_function(node) else {
            return false;
        };
        let is_parameter = function.parameters.iter().any(|p| p == name);
        match node.kind {
            SyntaxKind::ArrowFunction => !is_parameter,
            SyntaxKind::Closure => !is_parameter && function.captures.iter().any(|c| c == name),
            _ => false,
        }
    }

    /// Whether the body of `function_idx` may write to `name`: as the target
    /// of an assignment, or directly inside an opaque construct (`foreach`,
    /// `list()`, `unset`, by-reference forms). Nested functions are skipped,
    /// except closures that capture `name`, since the capture may be by
    /// reference.
    fn parameter_is_rebound(&mut self, function_idx: NodeIndex, name: &str) -> bool {
        let key = (function_idx, name.to_string());
        if let Some(&rebound) = self.ctx.rebound_parameters.get(&key) {
            return rebound;
        }

        let arena = self.ctx.arena;
        let names_variable = |idx: NodeIndex| {
            arena
                .get(idx)
                .and_then(|node| arena.get_variable(node))
                .is_some_and(|variable| variable.name == name)
        };

        let mut rebound = false;
        let mut stack: Vec<NodeIndex> = arena.children_of(function_idx).into_iter().collect();
        while let Some(idx) = stack.pop() {
            let Some(node) = arena.get(idx) else {
                continue;
            };
            match node.kind {
                kind if kind.is_function_like() => {
                    let captures_name = node.kind == SyntaxKind::Closure
                        && arena
                            .get_function(node)
                            .is_some_and(|f| f.captures.iter().any(|c| c == name));
                    if !captures_name {
                        continue;
                    }
                }
                SyntaxKind::Assignment => {
                    if arena
                        .get_assignment(node)
                        .is_some_and(|assign| names_variable(assign.target))
                    {
                        rebound = true;
                        break;
                    }
                }
                SyntaxKind::Other => {
                    let writes = arena.get_other(node).is_some_and(|other| {
                        other.children.nodes.iter().any(|&child| names_variable(child))
                    });
                    if writes {
                        rebound = true;
                        break;
                    }
                }
                _ => {}
            }
            stack.extend(arena.children_of(idx));
        }

        trace!(function = function_idx.0, name, rebound, "parameter write scan");
        self.ctx.rebound_parameters.insert(key, rebound);
        rebound
    }

    /// `$this` directly inside an instance method is the enclosing class.
    fn this_type(&self, idx: NodeIndex) -> InferResult {
        let arena = self.ctx.arena;
        let method_idx = arena.enclosing_function_like(idx);
        let method = arena
            .get(method_idx)
            .filter(|node| node.kind == SyntaxKind::MethodDeclaration)
            .and_then(|node| arena.get_function(node))
            .ok_or(InferenceFailure::UnresolvedType)?;
        if method.is_static {
            return Err(InferenceFailure::UnresolvedType);
        }
        let class = self
            .enclosing_class_ref(method_idx)
            .ok_or(InferenceFailure::UnresolvedType)?;
        Ok(Type::Object(class))
    }

    fn enclosing_class_ref(&self, idx: NodeIndex) -> Option<ClassRef> {
        let arena = self.ctx.arena;
        let class = arena.get(arena.enclosing_class(idx))?;
        arena
            .get_class(class)
            .map(|data| ClassRef::new(&data.name))
    }

    /// Resolve a class name written in source. `self` names the enclosing
    /// class. `static` is late-bound and may be any subclass, and `parent` is
    /// not tracked; both are unresolved.
    fn resolve_class_name(&self, idx: NodeIndex, name: &str) -> Option<ClassRef> {
        match name.to_ascii_lowercase().as_str() {
            "self" => self.enclosing_class_ref(idx),
            "static" | "parent" => None,
            _ => Some(ClassRef::new(name)),
        }
    }

    // =========================================================================
    // Objects, members and calls
    // =========================================================================

    fn infer_new(&mut self, idx: NodeIndex, node: &Node) -> InferResult {
        let arena = self.ctx.arena;
        let new_expr = arena
            .get_new(node)
            .ok_or(InferenceFailure::UnsupportedNodeKind)?;
        let class_name = new_expr
            .class_name
            .as_deref()
            .ok_or(InferenceFailure::UnresolvedType)?;
        self.resolve_class_name(idx, class_name)
            .map(Type::Object)
            .ok_or(InferenceFailure::UnresolvedType)
    }

    fn infer_property_access(&mut self, idx: NodeIndex, node: &Node) -> InferResult {
        let arena = self.ctx.arena;
        let access = arena
            .get_access(node)
            .ok_or(InferenceFailure::UnsupportedNodeKind)?;
        let property = access
            .name
            .as_deref()
            .ok_or(InferenceFailure::UnresolvedType)?;

        let class = match (node.kind, access.class_name.as_deref()) {
            (SyntaxKind::StaticPropertyAccess, Some(class_name)) => self
                .resolve_class_name(idx, class_name)
                .ok_or(InferenceFailure::UnresolvedType)?,
            (SyntaxKind::PropertyAccess, _) => self.receiver_class(access.object)?,
            _ => return Err(InferenceFailure::UnresolvedType),
        };

        let declaration = self
            .ctx
            .provider
            .member_type_of(&class, property)
            .map_err(provider_failure)?
            .ok_or(InferenceFailure::UnresolvedType)?;
        self.trusted_type(&declaration)
    }

    fn infer_call(&mut self, idx: NodeIndex, node: &Node) -> InferResult {
        let arena = self.ctx.arena;
        let call = arena
            .get_call(node)
            .ok_or(InferenceFailure::UnsupportedNodeKind)?;
        let name = call.name.as_deref().ok_or(InferenceFailure::UnresolvedType)?;

        let callable = match node.kind {
            SyntaxKind::FunctionCall => CallableRef::Function(name.to_string()),
            SyntaxKind::MethodCall => CallableRef::Method {
                class: self.receiver_class(call.receiver)?,
                name: name.to_string(),
            },
            SyntaxKind::StaticMethodCall => {
                let class_name = call
                    .class_name
                    .as_deref()
                    .ok_or(InferenceFailure::UnresolvedType)?;
                CallableRef::Method {
                    class: self
                        .resolve_class_name(idx, class_name)
                        .ok_or(InferenceFailure::UnresolvedType)?,
                    name: name.to_string(),
                }
            }
            _ => return Err(InferenceFailure::UnsupportedNodeKind),
        };

        let declaration = self
            .ctx
            .provider
            .return_type_of(&callable)
            .map_err(provider_failure)?
            .ok_or(InferenceFailure::UnresolvedType)?;
        // A documented return type is a promise the runtime never checks.
        if declaration.source != DeclarationSource::ReturnHint {
            return Err(InferenceFailure::UnresolvedType);
        }
        non_mixed(declaration.ty)
    }

    /// The class of a receiver expression, which must be a certain object.
    fn receiver_class(&mut self, receiver: NodeIndex) -> Result<ClassRef, InferenceFailure> {
        match self.certain(receiver)? {
            Type::Object(class) => Ok(class),
            _ => Err(InferenceFailure::UnresolvedType),
        }
    }

    // =========================================================================
    // Trust
    // =========================================================================

    fn trusted_type(&self, declaration: &Declaration) -> InferResult {
        let source = declaration.source;
        let trusted = source.is_enforced()
            || match source {
                DeclarationSource::LocalDocHint | DeclarationSource::Inferred => true,
                DeclarationSource::PropertyDocHint => self.ctx.options.trust_property_doc_hints,
                _ => false,
            };
        if !trusted {
            return Err(InferenceFailure::UnresolvedType);
        }
        non_mixed(declaration.ty.clone())
    }
}

/// Highest-precedence declaration; the first one wins a tie.
fn pick_variable_declaration(declarations: &[Declaration]) -> Option<&Declaration> {
    declarations.iter().reduce(|best, candidate| {
        if candidate.source.variable_precedence() > best.source.variable_precedence() {
            candidate
        } else {
            best
        }
    })
}

/// `int` for an integer literal that fits in 64 bits, `float` for one that
/// does not (the lexer turns those into floats). `None` for malformed text.
fn integer_literal_type(text: &str) -> Option<Type> {
    let digits: String = text.chars().filter(|&c| c != '_').collect();
    let (radix, body) = match digits.get(..2).map(str::to_ascii_lowercase).as_deref() {
        Some("0x") => (16, &digits[2..]),
        Some("0b") => (2, &digits[2..]),
        Some("0o") => (8, &digits[2..]),
        _ if digits.len() > 1 && digits.starts_with('0') => (8, &digits[1..]),
        _ => (10, digits.as_str()),
    };
    if body.is_empty() || !body.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    match i64::from_str_radix(body, radix) {
        Ok(_) => Some(Type::Int),
        Err(_) => Some(Type::Float),
    }
}

fn non_mixed(ty: Type) -> InferResult {
    if ty.is_mixed() {
        Err(InferenceFailure::UnresolvedType)
    } else {
        Ok(ty)
    }
}

fn provider_failure(error: ProviderError) -> InferenceFailure {
    trace!(%error, "context provider query failed");
    InferenceFailure::ProviderUnavailable
}

#[cfg(test)]
#[path = "../tests/resolver_tests.rs"]
mod tests;
