//! Data file locations - single source of truth for every persisted file.
//!
//! All paths derive from one data directory (see `config::load`), which
//! makes it easy to point a test or a second instance at its own copy:
//! ```bash
//! DATA_DIR=data/staging PORT=5001 cargo run
//! ```

use std::path::{Path, PathBuf};

use crate::data::DatasetKind;

/// Credential store file name
pub const USERS_FILE: &str = "users.json";

/// Country table file name
pub const COUNTRIES_FILE: &str = "countries.csv";

/// Mineral table file name
pub const MINERALS_FILE: &str = "minerals.csv";

/// Production table file name
pub const PRODUCTION_FILE: &str = "production.csv";

/// Resolved locations of the authoritative data files.
#[derive(Debug, Clone)]
pub struct DataPaths {
    root: PathBuf,
}

impl DataPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The data directory itself (uploads are staged here before the swap)
    pub fn data_dir(&self) -> &Path {
        &self.root
    }

    pub fn users_file(&self) -> PathBuf {
        self.root.join(USERS_FILE)
    }

    pub fn countries_file(&self) -> PathBuf {
        self.root.join(COUNTRIES_FILE)
    }

    pub fn minerals_file(&self) -> PathBuf {
        self.root.join(MINERALS_FILE)
    }

    pub fn production_file(&self) -> PathBuf {
        self.root.join(PRODUCTION_FILE)
    }

    /// Authoritative file for a dataset kind
    pub fn dataset_file(&self, kind: DatasetKind) -> PathBuf {
        match kind {
            DatasetKind::Countries => self.countries_file(),
            DatasetKind::Minerals => self.minerals_file(),
            DatasetKind::Production => self.production_file(),
        }
    }
}
