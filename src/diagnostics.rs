//! Conversion diagnostics
//!
//! Collected during translation and reported by the caller. Nothing here
//! aborts a conversion; fatal conditions are returned as errors instead.

use serde::{Deserialize, Serialize};

/// Conversion diagnostics and warnings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Diagnostics {
    /// Successfully converted resources
    pub converted: Vec<ConvertedItem>,
    /// Resources converted with caveats
    pub warnings: Vec<ConversionWarning>,
    /// Resources that produced no output
    pub skipped: Vec<SkippedItem>,
}

impl Diagnostics {
    /// Warnings at `Severity::Warning` or above
    pub fn warning_count(&self) -> usize {
        self.warnings
            .iter()
            .filter(|w| w.severity != Severity::Info)
            .count()
    }
}

/// A resource that was translated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertedItem {
    /// Source resource, `namespace/name`
    pub resource: String,
    /// Kind of the generated object
    pub output_kind: String,
}

/// Conversion warning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionWarning {
    pub severity: Severity,
    /// Source resource, `namespace/name`
    pub resource: String,
    pub message: String,
    pub suggestion: Option<String>,
}

/// Warning severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// A resource that was skipped entirely
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedItem {
    /// Source resource, `namespace/name`
    pub resource: String,
    pub reason: String,
}
