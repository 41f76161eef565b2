//! Findings produced by the cast analyzer.

use phpcast_common::{Span, diagnostic_messages, format_message};
use phpcast_syntax::{CastKind, NodeIndex};
use phpcast_types::Type;
use serde::Serialize;

/// A quick fix: delete `range` from the source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RemovalFix {
    pub title: String,
    pub range: Span,
}

/// A redundant cast.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub cast: NodeIndex,
    /// The whole cast expression, `(string) $value`.
    pub span: Span,
    /// The `(string)` token alone.
    pub token_span: Span,
    pub target: CastKind,
    pub operand_type: Type,
    pub message: &'static str,
    pub fix: RemovalFix,
}

impl Finding {
    pub fn new(
        cast: NodeIndex,
        span: Span,
        token_span: Span,
        keyword: &str,
        target: CastKind,
        operand_type: Type,
    ) -> Self {
        Finding {
            cast,
            span,
            token_span,
            target,
            operand_type,
            message: diagnostic_messages::UNNECESSARY_TYPE_CASTING,
            fix: RemovalFix {
                title: format_message(diagnostic_messages::REMOVE_UNNECESSARY_CASTING, &[keyword]),
                range: token_span,
            },
        }
    }
}
