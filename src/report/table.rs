//! Table output for each report view.
//!
//! These functions take the projected views and lay them out with
//! `TableWriter`, so the same code renders to the console or to a buffer.

use super::types::{ConfidenceTier, TemplateView, ValidationView};
use super::views::{audit_log_view, references_view, template_view, validation_view};
use crate::console_format::{Cell, ColumnWidth, TableLayout, TableWriter};
use crate::types::{DocumentStats, HealthStatus, Issue, ReportModel, Severity, TemplateSchema};
use crate::view::View;
use std::io::{self, Write};

fn tier_cell(tier: ConfidenceTier, percent: i64) -> Cell {
    Cell::colored(format!("{} {}%", tier.as_str(), percent), tier.color())
}

/// One-line report banner: model, timing, template.
pub fn write_report_banner<W: Write>(out: &mut TableWriter<W>, report: &ReportModel) -> io::Result<()> {
    let template = report
        .template_output
        .template_type
        .map(|t| t.as_str().to_string())
        .unwrap_or_else(|| "-".to_string());
    out.write_line(&format!(
        "Model: {}  |  Processing time: {:.2}s  |  Template: {}",
        report.llm_model, report.processing_time_seconds, template
    ))
}

/// Write the template tab.
pub fn write_template_view<W: Write>(out: &mut TableWriter<W>, view: &TemplateView, width: usize) -> io::Result<()> {
    out.write_heading(View::Template.title(), width)?;

    if let Some(summary) = &view.summary {
        out.write_line("Summary:")?;
        out.write_wrapped(summary, "  ", width)?;
        out.writeln()?;
    }

    if view.rows.is_empty() {
        out.write_line("No template fields were returned.")?;
    } else {
        let layout = TableLayout::new(
            width,
            &[
                ColumnWidth::Fixed(12),
                ColumnWidth::Flex(14),
                ColumnWidth::Fixed(14),
                ColumnWidth::Fixed(11),
                ColumnWidth::Flex(20),
            ],
        );
        let rows: Vec<Vec<Cell>> = view
            .rows
            .iter()
            .map(|row| {
                vec![
                    Cell::plain(&row.field_id),
                    Cell::plain(&row.field_name),
                    Cell::plain(&row.value),
                    tier_cell(row.confidence, row.confidence_percent),
                    Cell::plain(&row.justification),
                ]
            })
            .collect();
        out.write_table(&layout, &["Field ID", "Field Name", "Value", "Confidence", "Justification"], &rows)?;
    }

    if !view.key_considerations.is_empty() {
        out.writeln()?;
        out.write_line("Key considerations:")?;
        for item in &view.key_considerations {
            out.write_wrapped(item, "  • ", width)?;
        }
    }

    Ok(())
}

/// Write the references tab.
pub fn write_references_view<W: Write>(out: &mut TableWriter<W>, report: &ReportModel, width: usize) -> io::Result<()> {
    out.write_heading(View::References.title(), width)?;

    let rows = references_view(report);
    if rows.is_empty() {
        return out.write_line("No regulatory references were returned.");
    }

    let layout = TableLayout::new(
        width,
        &[ColumnWidth::Flex(14), ColumnWidth::Fixed(14), ColumnWidth::Fixed(11), ColumnWidth::Flex(24)],
    );
    let cells: Vec<Vec<Cell>> = rows
        .iter()
        .map(|r| {
            let section = if r.paragraph.is_empty() { r.section.clone() } else { format!("{} ¶{}", r.section, r.paragraph) };
            vec![
                Cell::plain(&r.document),
                Cell::plain(section),
                tier_cell(r.relevance, r.relevance_percent),
                Cell::plain(&r.content),
            ]
        })
        .collect();
    out.write_table(&layout, &["Document", "Section", "Relevance", "Content"], &cells)
}

/// Write the validation tab.
pub fn write_validation_view<W: Write>(out: &mut TableWriter<W>, view: &ValidationView<'_>, width: usize) -> io::Result<()> {
    out.write_heading(View::Validation.title(), width)?;

    let badge_color = if view.is_valid { term::color::BRIGHT_GREEN } else { term::color::BRIGHT_RED };
    out.write_colored_line(&format!("Status: {}", view.badge()), badge_color)?;
    out.write_line(&format!("Errors: {}  Warnings: {}  Info: {}", view.errors, view.warnings, view.info))?;
    if !view.consistent {
        out.write_line("Note: summary counts differ from the issues listed below.")?;
    }

    if view.no_issues() {
        out.writeln()?;
        return out.write_line("No validation issues found.");
    }

    let layout = TableLayout::new(width, &[ColumnWidth::Fixed(12), ColumnWidth::Fixed(24), ColumnWidth::Flex(20)]);
    for (severity, label) in [(Severity::Error, "Errors"), (Severity::Warning, "Warnings"), (Severity::Info, "Info")] {
        let bucket = view.buckets.bucket(severity);
        if bucket.is_empty() {
            continue;
        }
        out.writeln()?;
        out.write_colored_line(&format!("{} ({})", label, bucket.len()), severity_color(severity))?;
        let rows: Vec<Vec<Cell>> = bucket.iter().map(|issue| issue_cells(issue)).collect();
        out.write_table(&layout, &["Field", "Rule", "Message"], &rows)?;
    }

    Ok(())
}

fn severity_color(severity: Severity) -> term::color::Color {
    match severity {
        Severity::Error => term::color::BRIGHT_RED,
        Severity::Warning => term::color::BRIGHT_YELLOW,
        Severity::Info => term::color::BRIGHT_BLUE,
    }
}

fn issue_cells(issue: &Issue) -> Vec<Cell> {
    vec![
        Cell::plain(issue.field_id.as_deref().unwrap_or("-")),
        Cell::plain(&issue.rule),
        Cell::plain(&issue.message),
    ]
}

/// Write the audit tab.
pub fn write_audit_view<W: Write>(out: &mut TableWriter<W>, report: &ReportModel, width: usize) -> io::Result<()> {
    out.write_heading(View::Audit.title(), width)?;

    let rows = audit_log_view(report);
    if rows.is_empty() {
        return out.write_line("No audit entries were recorded.");
    }

    let layout = TableLayout::new(
        width,
        &[ColumnWidth::Fixed(19), ColumnWidth::Fixed(12), ColumnWidth::Flex(16), ColumnWidth::Flex(20)],
    );
    let cells: Vec<Vec<Cell>> = rows
        .iter()
        .map(|r| {
            vec![
                Cell::plain(&r.timestamp),
                Cell::plain(&r.field_id),
                Cell::plain(&r.regulatory_reference),
                Cell::plain(&r.justification),
            ]
        })
        .collect();
    out.write_table(&layout, &["Timestamp", "Field ID", "Regulatory Reference", "Justification"], &cells)
}

/// Write whichever view is selected.
pub fn write_view<W: Write>(out: &mut TableWriter<W>, report: &ReportModel, view: View, width: usize) -> io::Result<()> {
    match view {
        View::Template => write_template_view(out, &template_view(report), width),
        View::References => write_references_view(out, report, width),
        View::Validation => write_validation_view(out, &validation_view(report), width),
        View::Audit => write_audit_view(out, report, width),
    }
}

/// Write the `/health` answer: overall status and one row per backing service.
pub fn write_health<W: Write>(out: &mut TableWriter<W>, health: &HealthStatus, width: usize) -> io::Result<()> {
    out.write_heading("Service Health", width)?;
    let color = if health.status.eq_ignore_ascii_case("healthy") {
        term::color::BRIGHT_GREEN
    } else {
        term::color::BRIGHT_RED
    };
    out.write_colored_line(&format!("Status: {}", health.status), color)?;
    out.write_line(&format!("Documents indexed: {}", health.document_count))?;

    if !health.services.is_empty() {
        let layout = TableLayout::new(width.min(60), &[ColumnWidth::Flex(12), ColumnWidth::Flex(12)]);
        let rows: Vec<Vec<Cell>> =
            health.services.iter().map(|(name, state)| vec![Cell::plain(name), Cell::plain(state)]).collect();
        out.write_table(&layout, &["Service", "State"], &rows)?;
    }
    Ok(())
}

pub fn write_document_stats<W: Write>(out: &mut TableWriter<W>, stats: &DocumentStats, width: usize) -> io::Result<()> {
    out.write_heading("Document Collection", width)?;
    if !stats.collection_name.is_empty() {
        out.write_line(&format!("Collection: {}", stats.collection_name))?;
    }
    out.write_line(&format!("Total documents: {}", stats.total_documents))
}

/// Write a template's field layout, one table per section.
pub fn write_template_schema<W: Write>(out: &mut TableWriter<W>, schema: &TemplateSchema, width: usize) -> io::Result<()> {
    out.write_heading(&schema.template_name, width)?;
    if !schema.description.is_empty() {
        out.write_wrapped(&schema.description, "", width)?;
    }

    let layout = TableLayout::new(
        width,
        &[ColumnWidth::Fixed(12), ColumnWidth::Flex(20), ColumnWidth::Fixed(10), ColumnWidth::Fixed(8), ColumnWidth::Flex(16)],
    );
    for section in &schema.sections {
        out.writeln()?;
        out.write_line(&format!("{} {}", section.section_id, section.section_name))?;
        let rows: Vec<Vec<Cell>> = section
            .fields
            .iter()
            .map(|f| {
                vec![
                    Cell::plain(&f.field_id),
                    Cell::plain(&f.field_name),
                    Cell::plain(&f.data_type),
                    Cell::plain(if f.required { "yes" } else { "no" }),
                    Cell::plain(f.validation_rules.join("; ")),
                ]
            })
            .collect();
        out.write_table(&layout, &["Field ID", "Name", "Type", "Required", "Rules"], &rows)?;
    }
    Ok(())
}
