//! Report export to a JSON file.
//!
//! The artifact is the whole `ReportModel`, pretty-printed, regardless of
//! which view is on screen. Serializing the same report twice yields
//! byte-identical output.

use crate::types::ReportModel;
use log::debug;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Fixed name of the exported file.
pub const EXPORT_FILE_NAME: &str = "corep-report.json";

/// Serialize the full report as indented JSON with a trailing newline.
pub fn export_artifact(report: &ReportModel) -> serde_json::Result<String> {
    let mut text = serde_json::to_string_pretty(report)?;
    text.push('\n');
    Ok(text)
}

/// Write the export artifact to `dir/corep-report.json`.
///
/// The file is written to a temporary file in `dir` first and then renamed
/// into place, so a reader never sees a partial report.
///
/// # Returns
/// Path of the written file.
pub fn export_report(report: &ReportModel, dir: &Path) -> io::Result<PathBuf> {
    let artifact = export_artifact(report)?;
    let path = dir.join(EXPORT_FILE_NAME);

    let mut temp = tempfile::NamedTempFile::new_in(dir)?;
    temp.write_all(artifact.as_bytes())?;
    temp.flush()?;
    temp.persist(&path).map_err(|e| e.error)?;

    debug!("exported {} bytes to {}", artifact.len(), path.display());
    Ok(path)
}
