use std::io::{Seek, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::batch::orchestrator::{BatchResult, FailureKind, RowOutcome};
use crate::foundation::error::{ThumbError, ThumbResult};

fn zip_err(e: zip::result::ZipError) -> ThumbError {
    ThumbError::Io(std::io::Error::other(e))
}

fn check_entry_name(name: &str) -> ThumbResult<()> {
    if name.contains("..") || name.contains('/') || name.contains('\\') {
        return Err(ThumbError::invalid_row(format!(
            "refusing to package unsafe file name \"{name}\""
        )));
    }
    Ok(())
}

/// Write one `{id}.png` entry per rendered row, in input order.
///
/// Entries carry a fixed timestamp and permissions, so equal results give byte-identical
/// archives. Skipped and failed rows are not packaged.
pub fn write_zip<W: Write + Seek>(result: &BatchResult, writer: W) -> ThumbResult<W> {
    let mut zip = ZipWriter::new(writer);
    let options = SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default())
        .unix_permissions(0o644);

    for (name, png) in result.rendered() {
        check_entry_name(&name)?;
        zip.start_file(name.as_str(), options).map_err(zip_err)?;
        zip.write_all(png)?;
    }
    zip.finish().map_err(zip_err)
}

/// [`write_zip`] into memory.
pub fn zip_bytes(result: &BatchResult) -> ThumbResult<Vec<u8>> {
    Ok(write_zip(result, std::io::Cursor::new(Vec::new()))?.into_inner())
}

#[tracing::instrument(skip(result), fields(entries = result.rendered_count()))]
pub fn write_zip_file(result: &BatchResult, path: &Path) -> ThumbResult<()> {
    let file = std::fs::File::create(path)?;
    write_zip(result, std::io::BufWriter::new(file))?
        .flush()
        .map_err(ThumbError::from)
}

/// Write each rendered row to `dir/{id}.png`, creating `dir` if needed. Returns the paths.
#[tracing::instrument(skip(result), fields(entries = result.rendered_count()))]
pub fn write_dir(result: &BatchResult, dir: &Path) -> ThumbResult<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(result.rendered_count());
    for (name, png) in result.rendered() {
        check_entry_name(&name)?;
        let path = dir.join(&name);
        std::fs::write(&path, png)?;
        written.push(path);
    }
    Ok(written)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowStatus {
    Rendered,
    Skipped,
    Failed,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub index: usize,
    pub id: String,
    pub status: RowStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<FailureKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// JSON-friendly summary of a [`BatchResult`], without image bytes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub total: usize,
    pub rendered: usize,
    pub skipped: usize,
    pub failed: usize,
    pub cancelled: bool,
    pub rows: Vec<ReportRow>,
}

impl BatchReport {
    pub fn from_result(result: &BatchResult) -> Self {
        let rows = result
            .rows
            .iter()
            .map(|r| {
                let (status, file, kind, reason) = match &r.outcome {
                    RowOutcome::Rendered(_) => {
                        (RowStatus::Rendered, Some(format!("{}.png", r.id)), None, None)
                    }
                    RowOutcome::Skipped(reason) => {
                        (RowStatus::Skipped, None, None, Some(reason.clone()))
                    }
                    RowOutcome::Failed(f) => {
                        (RowStatus::Failed, None, Some(f.kind), Some(f.message.clone()))
                    }
                };
                ReportRow {
                    index: r.index,
                    id: r.id.clone(),
                    status,
                    file,
                    kind,
                    reason,
                }
            })
            .collect();

        Self {
            total: result.total,
            rendered: result.rendered_count(),
            skipped: result.skipped_count(),
            failed: result.failed_count(),
            cancelled: result.cancelled,
            rows,
        }
    }

    pub fn to_json_pretty(&self) -> ThumbResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ThumbError::Other(e.into()))
    }

    pub fn write_json(&self, path: &Path) -> ThumbResult<()> {
        std::fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/batch/package.rs"]
mod tests;
