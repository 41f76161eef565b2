//! Checker options.

use phpcast_common::DiagnosticCategory;
use phpcast_common::limits::MAX_EXPR_INFER_DEPTH;
use serde::{Deserialize, Serialize};

/// Options that shape what the analyzer trusts and how findings surface.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckerOptions {
    /// Category given to emitted diagnostics.
    pub report_category: DiagnosticCategory,
    /// Treat `/** @var T */` on properties as the property's type.
    pub trust_property_doc_hints: bool,
    /// Leave casts alone when they are the returned value of a function whose
    /// return type is only documented (`@return`, no native declaration):
    /// the cast may be the only thing that makes the docblock true.
    pub skip_doc_only_returns: bool,
    /// Recursion limit for expression inference.
    pub max_inference_depth: u32,
}

impl Default for CheckerOptions {
    fn default() -> Self {
        CheckerOptions {
            report_category: DiagnosticCategory::Suggestion,
            trust_property_doc_hints: true,
            skip_doc_only_returns: true,
            max_inference_depth: MAX_EXPR_INFER_DEPTH,
        }
    }
}

impl CheckerOptions {
    /// The effective depth limit; never above the global ceiling.
    #[inline]
    pub fn inference_depth_limit(&self) -> u32 {
        self.max_inference_depth.min(MAX_EXPR_INFER_DEPTH)
    }
}
