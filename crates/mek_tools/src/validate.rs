//! Unit file validation.
//!
//! Loads RON unit documents, runs them through the engine pipeline and
//! collects one report per file. A file that cannot be read or decoded is
//! recorded as a failure and does not stop the run.

use std::fs;
use std::path::{Path, PathBuf};

use mek_core::document::UnitDocument;
use mek_core::registry::{HandlerRegistry, ProcessedUnit};

use crate::error::{Result, ToolError};

/// Outcome for one file.
#[derive(Debug, Clone)]
pub struct FileReport {
    /// File that was checked.
    pub path: PathBuf,
    /// Pipeline output, or the load error.
    pub outcome: std::result::Result<ProcessedUnit, String>,
}

impl FileReport {
    /// Whether the file passes. Under `strict`, warnings fail too.
    #[must_use]
    pub fn passed(&self, strict: bool) -> bool {
        match &self.outcome {
            Ok(processed) => {
                processed.is_valid() && (!strict || processed.all_warnings().next().is_none())
            }
            Err(_) => false,
        }
    }

    /// Problems worth printing for this file.
    #[must_use]
    pub fn problems(&self, strict: bool) -> Vec<String> {
        match &self.outcome {
            Err(error) => vec![error.clone()],
            Ok(processed) => {
                let mut problems: Vec<String> = processed
                    .parse_errors
                    .iter()
                    .chain(&processed.report.errors)
                    .map(|e| format!("error: {e}"))
                    .collect();
                if strict {
                    problems.extend(processed.all_warnings().map(|w| format!("warning: {w}")));
                }
                problems
            }
        }
    }
}

/// Results of a validation run.
#[derive(Debug, Clone, Default)]
pub struct ValidationSummary {
    /// One entry per file, in path order.
    pub files: Vec<FileReport>,
}

impl ValidationSummary {
    /// Number of files checked.
    #[must_use]
    pub fn total(&self) -> usize {
        self.files.len()
    }

    /// Files that failed.
    pub fn failures(&self, strict: bool) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(move |f| !f.passed(strict))
    }

    /// True when every file passed.
    #[must_use]
    pub fn is_success(&self, strict: bool) -> bool {
        self.failures(strict).next().is_none()
    }
}

/// Read and decode one RON unit document.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid document.
pub fn load_document(path: &Path) -> Result<UnitDocument> {
    let path_str = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| ToolError::Io {
        path: path_str.clone(),
        source: e,
    })?;
    ron::from_str(&contents).map_err(|e| ToolError::Ron {
        path: path_str,
        source: e,
    })
}

/// RON files under `path`, sorted. A file path is returned as-is.
///
/// # Errors
///
/// Returns an error if the directory cannot be listed.
pub fn collect_unit_files(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    let io_error = |e| ToolError::Io {
        path: path.display().to_string(),
        source: e,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(path).map_err(io_error)? {
        let entry_path = entry.map_err(io_error)?.path();
        if entry_path.is_dir() {
            files.extend(collect_unit_files(&entry_path)?);
        } else if entry_path.extension().is_some_and(|ext| ext == "ron") {
            files.push(entry_path);
        }
    }
    files.sort();
    Ok(files)
}

/// Validate one file.
#[must_use]
pub fn validate_file(registry: &HandlerRegistry, path: &Path) -> FileReport {
    let outcome = load_document(path)
        .map(|doc| registry.process(&doc))
        .map_err(|e| e.to_string());
    match &outcome {
        Ok(processed) if processed.is_valid() => {
            tracing::debug!(path = %path.display(), "Unit passed");
        }
        Ok(processed) => {
            tracing::warn!(
                path = %path.display(),
                errors = processed.parse_errors.len() + processed.report.errors.len(),
                "Unit failed validation"
            );
        }
        Err(error) => tracing::warn!(path = %path.display(), "{error}"),
    }
    FileReport {
        path: path.to_path_buf(),
        outcome,
    }
}

/// Validate every RON unit file in a directory tree, or a single file.
///
/// # Errors
///
/// Returns an error if `path` does not exist or cannot be listed. Problems
/// with individual files are reported in the summary instead.
pub fn validate_path(registry: &HandlerRegistry, path: &Path) -> Result<ValidationSummary> {
    if !path.exists() {
        return Err(ToolError::Io {
            path: path.display().to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file or directory"),
        });
    }

    let files = collect_unit_files(path)?;
    if files.is_empty() {
        tracing::warn!("No unit files found in {}", path.display());
    }

    let summary = ValidationSummary {
        files: files.iter().map(|f| validate_file(registry, f)).collect(),
    };
    tracing::info!("Checked {} unit files in {}", summary.total(), path.display());
    Ok(summary)
}
