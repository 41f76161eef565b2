//! Reporting Sink
//!
//! Where findings go. The analyzer calls the sink at most once per cast, in
//! document order.

use phpcast_common::{Diagnostic, DiagnosticCategory, Span, diagnostic_codes};

use crate::finding::Finding;

pub trait ReportingSink {
    fn report(&mut self, span: Span, message: &str);

    /// Report a finding. The default forwards location and message.
    fn report_finding(&mut self, finding: &Finding) {
        self.report(finding.span, finding.message);
    }
}

/// Records `(span, message)` pairs.
impl ReportingSink for Vec<(Span, String)> {
    fn report(&mut self, span: Span, message: &str) {
        self.push((span, message.to_string()));
    }
}

/// Converts findings into [`Diagnostic`]s for one file. Findings are
/// highlighted on the cast token only, not on the operand.
#[derive(Clone, Debug)]
pub struct DiagnosticCollector {
    file: String,
    category: DiagnosticCategory,
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn new(file: impl Into<String>, category: DiagnosticCategory) -> Self {
        DiagnosticCollector {
            file: file.into(),
            category,
            diagnostics: Vec::new(),
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl ReportingSink for DiagnosticCollector {
    fn report(&mut self, span: Span, message: &str) {
        self.diagnostics.push(Diagnostic::new(
            self.file.clone(),
            span,
            message,
            self.category,
            diagnostic_codes::UNNECESSARY_TYPE_CASTING,
        ));
    }

    fn report_finding(&mut self, finding: &Finding) {
        self.report(finding.token_span, finding.message);
    }
}

#[cfg(test)]
#[path = "../tests/sink_tests.rs"]
mod tests;
