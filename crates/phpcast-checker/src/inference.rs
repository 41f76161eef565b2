//! Results of type inference.

use std::fmt;

use phpcast_types::Type;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Confidence {
    /// The type is exact.
    Certain,
    /// Nothing trustworthy is known. Never produces a finding.
    Unknown,
}

/// An inferred type plus how far it can be trusted.
///
/// An `Unknown` result always carries `Mixed`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InferenceResult {
    pub ty: Type,
    pub confidence: Confidence,
}

impl InferenceResult {
    /// A certain result. `Mixed` carries no information, so it becomes
    /// `Unknown`.
    pub fn certain(ty: Type) -> Self {
        if ty.is_mixed() {
            return Self::unknown();
        }
        InferenceResult {
            ty,
            confidence: Confidence::Certain,
        }
    }

    pub fn unknown() -> Self {
        InferenceResult {
            ty: Type::Mixed,
            confidence: Confidence::Unknown,
        }
    }

    #[inline]
    pub fn is_certain(&self) -> bool {
        self.confidence == Confidence::Certain
    }

    /// The type, if certain.
    #[inline]
    pub fn certain_type(&self) -> Option<&Type> {
        self.is_certain().then_some(&self.ty)
    }
}

/// Why a node was inferred as `Unknown`. Logged, never surfaced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InferenceFailure {
    /// No declaration, an untrusted one, or an operand without a rule.
    UnresolvedType,
    /// A node kind the resolver has no rule for.
    UnsupportedNodeKind,
    /// The context provider returned an error.
    ProviderUnavailable,
    DepthExceeded,
}

impl InferenceFailure {
    pub const fn as_str(self) -> &'static str {
        match self {
            InferenceFailure::UnresolvedType => "unresolved type",
            InferenceFailure::UnsupportedNodeKind => "unsupported node kind",
            InferenceFailure::ProviderUnavailable => "provider unavailable",
            InferenceFailure::DepthExceeded => "depth exceeded",
        }
    }
}

impl fmt::Display for InferenceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
