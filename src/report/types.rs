//! Report type definitions for the rendering model.
//!
//! This module defines the display-ready structures each view is
//! projected into, plus the pure groupings (badge tiers, severity
//! buckets) those projections are built from.

use crate::types::{Issue, Severity, TemplateOutput};
use term::color::Color;

/// Categorical badge derived from a confidence or relevance score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfidenceTier {
    Low,
    Medium,
    High,
}

impl ConfidenceTier {
    /// `>= 0.8` is high, `>= 0.5` is medium, anything else (including NaN) is low.
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            ConfidenceTier::High
        } else if score >= 0.5 {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceTier::High => "high",
            ConfidenceTier::Medium => "medium",
            ConfidenceTier::Low => "low",
        }
    }

    /// Badge colour.
    pub fn color(&self) -> Color {
        match self {
            ConfidenceTier::High => term::color::BRIGHT_GREEN,
            ConfidenceTier::Medium => term::color::BRIGHT_YELLOW,
            ConfidenceTier::Low => term::color::BRIGHT_RED,
        }
    }
}

/// Score as a whole percentage, rounded half away from zero.
pub fn score_percent(score: f64) -> i64 {
    (score * 100.0).round() as i64
}

/// Issues grouped by severity, each bucket in original order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeverityBuckets<'a> {
    pub errors: Vec<&'a Issue>,
    pub warnings: Vec<&'a Issue>,
    pub info: Vec<&'a Issue>,
}

impl<'a> SeverityBuckets<'a> {
    /// Stable partition of `issues` by severity.
    pub fn partition(issues: &'a [Issue]) -> Self {
        let mut buckets = SeverityBuckets::default();
        for issue in issues {
            match issue.severity {
                Severity::Error => buckets.errors.push(issue),
                Severity::Warning => buckets.warnings.push(issue),
                Severity::Info => buckets.info.push(issue),
            }
        }
        buckets
    }

    pub fn bucket(&self, severity: Severity) -> &[&'a Issue] {
        match severity {
            Severity::Error => &self.errors,
            Severity::Warning => &self.warnings,
            Severity::Info => &self.info,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty() && self.info.is_empty()
    }
}

/// Whether the server's `validation_summary` agrees with `validation_issues`.
///
/// Compares the three per-severity counts and, when present, `total_issues`.
pub fn summary_consistent(output: &TemplateOutput) -> bool {
    let buckets = SeverityBuckets::partition(&output.validation_issues);
    let summary = &output.metadata.validation_summary;

    summary.errors == buckets.errors.len()
        && summary.warnings == buckets.warnings.len()
        && summary.info == buckets.info.len()
        && summary.total_issues.is_none_or(|total| total == output.validation_issues.len())
}

/// Shown in the value column when a field has no value.
pub const NOT_AVAILABLE: &str = "N/A";

/// One row of the template table.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRow {
    pub field_id: String,
    pub field_name: String,
    /// Display text; [`NOT_AVAILABLE`] for a null value
    pub value: String,
    pub confidence: ConfidenceTier,
    pub confidence_percent: i64,
    pub justification: String,
}

/// Content of the template tab.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateView {
    pub summary: Option<String>,
    pub rows: Vec<FieldRow>,
    /// Empty means the section is omitted
    pub key_considerations: Vec<String>,
}

/// One entry of the references tab.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceRow {
    pub document: String,
    pub section: String,
    pub paragraph: String,
    pub relevance: ConfidenceTier,
    pub relevance_percent: i64,
    pub content: String,
}

/// Content of the validation tab.
///
/// Counts come from the server's summary verbatim; `consistent` records
/// whether they match the buckets.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationView<'a> {
    pub is_valid: bool,
    pub errors: usize,
    pub warnings: usize,
    pub info: usize,
    pub buckets: SeverityBuckets<'a>,
    pub consistent: bool,
}

impl ValidationView<'_> {
    /// No issues at all, in any bucket.
    pub fn no_issues(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn badge(&self) -> &'static str {
        if self.is_valid { "PASSED" } else { "FAILED" }
    }
}

/// One row of the audit tab.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditRow {
    /// Local display form; the report keeps the original string
    pub timestamp: String,
    pub field_id: String,
    pub regulatory_reference: String,
    pub justification: String,
}
