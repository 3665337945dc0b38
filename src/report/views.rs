//! Projections from a `ReportModel` to each view's display structure.
//!
//! Every function here is pure and order-preserving: it borrows the
//! report, never mutates it, and keeps server order (the severity
//! grouping keeps order within each bucket).

use super::types::{
    AuditRow, ConfidenceTier, FieldRow, NOT_AVAILABLE, ReferenceRow, SeverityBuckets, TemplateView, ValidationView,
    score_percent, summary_consistent,
};
use crate::types::ReportModel;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde_json::Value;
use std::fmt::Display;

/// Display format for audit timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Template tab: summary, field table, key considerations.
pub fn template_view(report: &ReportModel) -> TemplateView {
    let output = &report.template_output;

    let rows = output
        .fields
        .iter()
        .map(|field| FieldRow {
            field_id: field.field_id.clone(),
            field_name: field.field_name.clone(),
            value: format_value(field.value.as_ref()),
            confidence: ConfidenceTier::from_score(field.confidence_score),
            confidence_percent: score_percent(field.confidence_score),
            justification: field.justification.clone(),
        })
        .collect();

    TemplateView {
        summary: output.metadata.summary_text().map(str::to_string),
        rows,
        key_considerations: output.metadata.key_considerations.clone(),
    }
}

/// References tab: one entry per retrieved passage.
pub fn references_view(report: &ReportModel) -> Vec<ReferenceRow> {
    report
        .regulatory_references
        .iter()
        .map(|reference| ReferenceRow {
            document: reference.document.clone(),
            section: reference.section.clone(),
            paragraph: reference.paragraph.clone(),
            relevance: ConfidenceTier::from_score(reference.relevance_score),
            relevance_percent: score_percent(reference.relevance_score),
            content: reference.content.clone(),
        })
        .collect()
}

/// Validation tab: pass/fail badge, server counts, severity buckets.
pub fn validation_view(report: &ReportModel) -> ValidationView<'_> {
    let output = &report.template_output;
    let summary = &output.metadata.validation_summary;

    ValidationView {
        is_valid: summary.is_valid,
        errors: summary.errors,
        warnings: summary.warnings,
        info: summary.info,
        buckets: SeverityBuckets::partition(&output.validation_issues),
        consistent: summary_consistent(output),
    }
}

/// Audit tab with timestamps shown in the local time zone.
pub fn audit_log_view(report: &ReportModel) -> Vec<AuditRow> {
    audit_log_view_in(report, &Local)
}

/// Audit tab with timestamps shown in `tz`.
pub fn audit_log_view_in<Tz: TimeZone>(report: &ReportModel, tz: &Tz) -> Vec<AuditRow>
where
    Tz::Offset: Display,
{
    report
        .template_output
        .audit_log
        .iter()
        .map(|entry| AuditRow {
            timestamp: format_timestamp(&entry.timestamp, tz),
            field_id: entry.field_id.clone(),
            regulatory_reference: entry.regulatory_reference.clone(),
            justification: entry.justification.clone(),
        })
        .collect()
}

/// Value cell text: strings unquoted, other JSON compact, null as [`NOT_AVAILABLE`].
pub fn format_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => NOT_AVAILABLE.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Convert an ISO-8601 timestamp to a display string in `tz`.
///
/// Offsets are honoured; naive timestamps are taken as UTC. Anything
/// unparseable is returned unchanged.
pub fn format_timestamp<Tz: TimeZone>(raw: &str, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(tz).format(TIMESTAMP_FORMAT).to_string();
    }

    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, pattern) {
            return naive.and_utc().with_timezone(tz).format(TIMESTAMP_FORMAT).to_string();
        }
    }

    raw.to_string()
}

#[cfg(test)]
#[path = "views_test.rs"]
mod views_test;
