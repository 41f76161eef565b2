//! Common types and utilities for the phpcast inspection engine.
//!
//! This crate provides foundational types used across all phpcast crates:
//! - Source spans (`Span`) as byte offsets into the inspected file
//! - Diagnostic types and the message table (`Diagnostic`, `DiagnosticCategory`)
//! - Centralized limits and thresholds

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::Span;

// Diagnostics - message table and reportable diagnostic records
pub mod diagnostics;
pub use diagnostics::{
    Diagnostic, DiagnosticCategory, DiagnosticMessage, diagnostic_codes, diagnostic_messages,
    format_message,
};

// Centralized limits and thresholds
pub mod limits;
