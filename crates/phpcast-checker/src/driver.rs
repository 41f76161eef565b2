//! Unit drivers: walk a unit in document order and report every redundant
//! cast, sequentially or over a rayon pool.

use phpcast_syntax::{NodeArena, NodeIndex, SyntaxKind};
use rayon::prelude::*;
use tracing::{debug, info_span};

use crate::cast_analyzer::CastAnalyzer;
use crate::context::CheckerContext;
use crate::finding::Finding;
use crate::options::CheckerOptions;
use crate::provider::ContextProvider;
use crate::sink::{DiagnosticCollector, ReportingSink};
use phpcast_common::Diagnostic;

/// Check every cast under `root`, reporting each finding once to `sink`.
/// Returns the findings in the order they were reported.
#[tracing::instrument(level = "debug", skip_all, fields(root = root.0))]
pub fn check_unit(
    ctx: &mut CheckerContext<'_>,
    root: NodeIndex,
    sink: &mut dyn ReportingSink,
) -> Vec<Finding> {
    let arena = ctx.arena;
    let mut findings = Vec::new();
    let mut analyzer = CastAnalyzer::new(ctx);

    for idx in arena.descendants(root) {
        if arena.kind_of(idx) != Some(SyntaxKind::CastExpression) {
            continue;
        }
        if let Some(finding) = analyzer.analyze(idx) {
            sink.report_finding(&finding);
            findings.push(finding);
        }
    }

    debug!(findings = findings.len(), "unit checked");
    findings
}

/// One independent unit: an arena and the root to walk.
#[derive(Clone, Copy, Debug)]
pub struct CheckUnit<'a> {
    pub arena: &'a NodeArena,
    pub root: NodeIndex,
}

/// Findings and diagnostics for one unit of a batch.
#[derive(Clone, Debug, Default)]
pub struct UnitReport {
    pub file: String,
    pub findings: Vec<Finding>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Check one unit with a fresh context and collect diagnostics.
pub fn check_unit_report(
    unit: CheckUnit<'_>,
    provider: &dyn ContextProvider,
    options: &CheckerOptions,
) -> UnitReport {
    let file = unit.arena.file_name_of(unit.root).unwrap_or_default().to_string();
    let _span = info_span!("check_unit_report", file = file.as_str()).entered();

    let mut ctx = CheckerContext::new(unit.arena, provider, options.clone());
    let mut collector = DiagnosticCollector::new(file.clone(), options.report_category);
    let findings = check_unit(&mut ctx, unit.root, &mut collector);

    UnitReport {
        file,
        findings,
        diagnostics: collector.into_diagnostics(),
    }
}

/// Check independent units in parallel. Every worker owns its context; the
/// provider is only read. Reports come back in input order.
pub fn check_units_parallel(
    units: &[CheckUnit<'_>],
    provider: &dyn ContextProvider,
    options: &CheckerOptions,
) -> Vec<UnitReport> {
    units
        .par_iter()
        .map(|unit| check_unit_report(*unit, provider, options))
        .collect()
}

#[cfg(test)]
#[path = "../tests/driver_tests.rs"]
mod tests;
