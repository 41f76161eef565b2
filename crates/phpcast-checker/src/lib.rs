//! Redundant cast checker.
//!
//! This crate is organized into:
//! - `provider` - the [`ContextProvider`] query surface and its error type
//! - `declaration_table` - an in-memory provider
//! - `resolver` - the [`TypeResolver`], memoized per pass
//! - `operator_rules` - result types of binary and unary operators
//! - `cast_analyzer` - the per-cast redundancy decision
//! - `sink` - the [`ReportingSink`] trait and a diagnostic collector
//! - `driver` - per-unit and parallel entry points

pub mod cast_analyzer;
pub mod context;
pub mod declaration_table;
pub mod driver;
pub mod finding;
pub mod inference;
pub mod operator_rules;
pub mod options;
pub mod provider;
pub mod resolver;
pub mod sink;

pub use cast_analyzer::CastAnalyzer;
pub use context::CheckerContext;
pub use declaration_table::DeclarationTable;
pub use driver::{CheckUnit, UnitReport, check_unit, check_unit_report, check_units_parallel};
pub use finding::{Finding, RemovalFix};
pub use inference::{Confidence, InferenceFailure, InferenceResult};
pub use options::CheckerOptions;
pub use provider::{
    CallableRef, ContextProvider, Declaration, DeclarationSource, Declarations, NoopProvider,
    ProviderError, ProviderResult,
};
pub use resolver::{TypeResolver, cast_target_type};
pub use sink::{DiagnosticCollector, ReportingSink};

#[cfg(test)]
#[path = "../tests/test_support.rs"]
pub(crate) mod test_support;
#[cfg(test)]
#[path = "../tests/cast_analyzer_tests.rs"]
mod cast_analyzer_tests;
#[cfg(test)]
#[path = "../tests/scenario_tests.rs"]
mod scenario_tests;
