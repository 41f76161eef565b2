//! phpcast: redundant type cast detection for PHP.
//!
//! Given a syntax tree in a [`NodeArena`] and a [`ContextProvider`] that
//! answers declared-type queries, phpcast reports every `(type) $expr` cast
//! whose operand is provably of the target type already.
//!
//! ```ignore
//! let options = phpcast::config::load_checker_options(Path::new("phpcast.json"))?;
//! let diagnostics = phpcast::check_file(&arena, root, &provider, &options);
//! ```
//!
//! The workspace crates are re-exported:
//! - [`common`]: spans, diagnostics, limits
//! - [`syntax`]: the node arena
//! - [`types`]: the type lattice and hint parsing
//! - [`checker`]: resolver, analyzer, sinks and drivers

pub use phpcast_checker as checker;
pub use phpcast_common as common;
pub use phpcast_syntax as syntax;
pub use phpcast_types as types;

pub use phpcast_checker::{
    CastAnalyzer, CheckUnit, CheckerContext, CheckerOptions, ContextProvider, Declaration,
    DeclarationSource, DeclarationTable, DiagnosticCollector, Finding, InferenceResult,
    NoopProvider, ReportingSink, TypeResolver, UnitReport, check_unit, check_units_parallel,
};
pub use phpcast_common::{Diagnostic, DiagnosticCategory, Span};
pub use phpcast_syntax::{NodeArena, NodeIndex};
pub use phpcast_types::{ClassRef, Type, parse_type_hint};

pub mod config;
pub mod tracing_config;

/// Check one file and return its diagnostics in document order.
pub fn check_file(
    arena: &NodeArena,
    root: NodeIndex,
    provider: &dyn ContextProvider,
    options: &CheckerOptions,
) -> Vec<Diagnostic> {
    phpcast_checker::check_unit_report(CheckUnit { arena, root }, provider, options).diagnostics
}
