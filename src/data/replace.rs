//! Whole-file replacement of a dataset from an uploaded file.

use sha2::{Digest, Sha256};
use std::io::Write;
use std::sync::{Mutex, PoisonError};
use tempfile::NamedTempFile;

use super::tables;
use crate::error::{DashboardError, Result};
use crate::paths::DataPaths;

/// Dataset that an upload replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetKind {
    Countries,
    Minerals,
    Production,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 3] = [
        DatasetKind::Countries,
        DatasetKind::Minerals,
        DatasetKind::Production,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetKind::Countries => "countries",
            DatasetKind::Minerals => "minerals",
            DatasetKind::Production => "production",
        }
    }

    /// Label for the upload form
    pub fn label(&self) -> &'static str {
        match self {
            DatasetKind::Countries => "Countries",
            DatasetKind::Minerals => "Minerals",
            DatasetKind::Production => "Production",
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            DatasetKind::Countries => "Countries data updated successfully!",
            DatasetKind::Minerals => "Minerals database updated successfully!",
            DatasetKind::Production => "Production data updated successfully!",
        }
    }

    /// Re-read the table to check it still parses.
    fn check(&self, paths: &DataPaths) -> Result<usize> {
        match self {
            DatasetKind::Countries => tables::load_countries(paths).map(|rows| rows.len()),
            DatasetKind::Minerals => tables::load_minerals(paths).map(|rows| rows.len()),
            DatasetKind::Production => tables::load_production(paths).map(|rows| rows.len()),
        }
    }
}

impl std::fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DatasetKind {
    type Err = DashboardError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "countries" => Ok(DatasetKind::Countries),
            "minerals" => Ok(DatasetKind::Minerals),
            "production" => Ok(DatasetKind::Production),
            _ => Err(DashboardError::InvalidTarget(s.to_string())),
        }
    }
}

/// Result of a successful replacement
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaceOutcome {
    pub kind: DatasetKind,
    pub bytes_written: usize,
    /// Hex SHA-256 of the stored file
    pub sha256: String,
    /// Set when the new file no longer loads as this dataset. The file stays
    /// in place either way.
    pub schema_warning: Option<String>,
}

/// Atomically replace the authoritative file for `kind` with `contents`.
///
/// The bytes are staged in a temp file next to the target, synced, then
/// renamed over it, so readers see either the old or the new file. Writers
/// are serialized by `write_lock`. Content is not validated before the swap.
pub fn replace_dataset(
    paths: &DataPaths,
    write_lock: &Mutex<()>,
    kind: DatasetKind,
    contents: &[u8],
) -> Result<ReplaceOutcome> {
    let target = paths.dataset_file(kind);
    // Held until the new file has been read back, so the outcome describes this upload
    let _guard = write_lock.lock().unwrap_or_else(PoisonError::into_inner);

    let mut staged = NamedTempFile::new_in(paths.data_dir()).map_err(|e| {
        DashboardError::UploadFailed(format!(
            "create temp file in {}: {}",
            paths.data_dir().display(),
            e
        ))
    })?;

    staged
        .write_all(contents)
        .and_then(|_| staged.as_file().sync_all())
        .map_err(|e| DashboardError::UploadFailed(format!("write temp file: {}", e)))?;

    staged.persist(&target).map_err(|e| {
        DashboardError::UploadFailed(format!("rename to {}: {}", target.display(), e.error))
    })?;

    let sha256 = hex::encode(Sha256::digest(contents));
    tracing::info!(
        "Replaced {} dataset ({} bytes, sha256 {})",
        kind,
        contents.len(),
        sha256
    );

    let schema_warning = match kind.check(paths) {
        Ok(rows) => {
            tracing::debug!("New {} dataset has {} rows", kind, rows);
            None
        }
        Err(e) => {
            tracing::warn!("Uploaded {} dataset does not load: {}", kind, e);
            Some(e.user_message())
        }
    };

    Ok(ReplaceOutcome {
        kind,
        bytes_written: contents.len(),
        sha256,
        schema_warning,
    })
}
