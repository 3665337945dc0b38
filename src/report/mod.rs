//! Report rendering module - Projections, tables and export.
//!
//! This module handles:
//! - Projecting a ReportModel into the four views (pure functions)
//! - Badge tiers and severity buckets
//! - Writing each view as console tables
//! - Exporting the full report as JSON
//!
//! Console layout primitives live in the console_format module.
//!
//! # Module Organization
//!
//! - `types` - View structures, ConfidenceTier, SeverityBuckets
//! - `views` - ReportModel → view projections
//! - `table` - View → table output
//! - `export` - JSON export artifact

mod export;
mod table;
mod types;
mod views;

// Re-export the consistency check used by the controller
pub use types::summary_consistent;

// Re-export table output
pub use table::{write_document_stats, write_health, write_report_banner, write_template_schema, write_view};

// Re-export export functions
pub use export::{EXPORT_FILE_NAME, export_report};
