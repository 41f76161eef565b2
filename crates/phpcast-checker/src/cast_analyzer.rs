//! Cast Analyzer
//!
//! Decides whether a single `(type) expr` cast is redundant: the operand's
//! inferred type must be certain and exactly the cast's target type.

use phpcast_syntax::{NodeIndex, SyntaxKind};
use phpcast_types::ClassRef;
use tracing::{debug, trace};

use crate::context::CheckerContext;
use crate::finding::Finding;
use crate::provider::{CallableRef, DeclarationSource};
use crate::resolver::{TypeResolver, cast_target_type};

pub struct CastAnalyzer<'a, 'ctx> {
    ctx: &'a mut CheckerContext<'ctx>,
}

impl<'a, 'ctx> CastAnalyzer<'a, 'ctx> {
    pub fn new(ctx: &'a mut CheckerContext<'ctx>) -> Self {
        Self { ctx }
    }

    /// Analyze one cast node. Non-cast nodes yield `None`.
    pub fn analyze(&mut self, cast_idx: NodeIndex) -> Option<Finding> {
        let arena = self.ctx.arena;
        let node = arena.get(cast_idx)?;
        let cast = arena.get_cast(node)?;

        // `(object)` and `(unset)` are never reported, whatever the operand.
        let target = cast_target_type(cast.kind)?;

        if self.ctx.options.skip_doc_only_returns && self.returns_into_doc_only_type(cast_idx) {
            trace!(node = cast_idx.0, "cast enforces a documented return type");
            return None;
        }

        let inferred = TypeResolver::new(&mut *self.ctx).infer(cast.operand);
        let operand_type = inferred.certain_type()?;

        // A nullable union never equals a plain type, so `(string)` on
        // `?string` is kept: it turns null into "".
        if *operand_type != target
            || (operand_type.is_nullable() && operand_type.has_member(&target))
        {
            return None;
        }

        debug!(
            node = cast_idx.0,
            cast = cast.keyword.as_str(),
            operand = %operand_type,
            "redundant cast"
        );
        Some(Finding::new(
            cast_idx,
            node.span(),
            cast.token_span,
            &cast.keyword,
            cast.kind,
            operand_type.clone(),
        ))
    }

    /// The cast is the returned value of a function whose return type is
    /// documented but not declared.
    fn returns_into_doc_only_type(&self, cast_idx: NodeIndex) -> bool {
        let arena = self.ctx.arena;
        if !arena.is_returned_value(cast_idx) {
            return false;
        }
        let function_idx = arena.enclosing_function_like(cast_idx);
        let Some(node) = arena.get(function_idx) else {
            return false;
        };
        let Some(function) = arena.get_function(node) else {
            return false;
        };
        if function.has_native_return_type {
            return false;
        }
        // Closures and arrow functions cannot be looked up by name.
        let Some(name) = function.name.as_deref() else {
            return false;
        };

        let callable = match node.kind {
            SyntaxKind::FunctionDeclaration => CallableRef::Function(name.to_string()),
            SyntaxKind::MethodDeclaration => {
                let Some(class) = arena
                    .get(arena.enclosing_class(function_idx))
                    .and_then(|class| arena.get_class(class))
                else {
                    return false;
                };
                CallableRef::Method {
                    class: ClassRef::new(&class.name),
                    name: name.to_string(),
                }
            }
            _ => return false,
        };

        match self.ctx.provider.return_type_of(&callable) {
            Ok(declaration) => declaration
                .is_some_and(|d| d.source == DeclarationSource::ReturnDocHint),
            // Unknown contract: keep quiet.
            Err(error) => {
                trace!(%error, %callable, "return declaration unavailable");
                true
            }
        }
    }
}
