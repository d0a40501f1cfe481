//! Process-lifetime dataset cache
//!
//! One cache is bound to one data directory. The first successful
//! `get_or_load` reads the tables; every later call shares the same
//! `Arc<Dataset>`. A failed load leaves the cache empty.

use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use crate::loader::{load_dataset_with, SourceFiles};
use crate::model::{Dataset, TableCounts};
use crate::Result;

/// Identity of a loaded dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetVersion {
    pub data_dir: PathBuf,
    pub loaded_at: DateTime<Utc>,
    pub counts: TableCounts,
}

struct Loaded {
    dataset: Arc<Dataset>,
    version: DatasetVersion,
}

/// Init-once, read-many holder for the raw tables
pub struct DatasetCache {
    data_dir: PathBuf,
    files: SourceFiles,
    slot: OnceCell<Loaded>,
}

impl DatasetCache {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self::with_files(data_dir, SourceFiles::default())
    }

    pub fn with_files(data_dir: impl Into<PathBuf>, files: SourceFiles) -> Self {
        Self {
            data_dir: data_dir.into(),
            files,
            slot: OnceCell::new(),
        }
    }

    /// Wrap an already-built dataset (no disk access)
    pub fn preloaded(data_dir: impl Into<PathBuf>, dataset: Dataset) -> Self {
        let cache = Self::new(data_dir);
        let version = DatasetVersion {
            data_dir: cache.data_dir.clone(),
            loaded_at: crate::time::now(),
            counts: dataset.counts(),
        };
        // Fresh cell, cannot already be set
        let _ = cache.slot.set(Loaded {
            dataset: Arc::new(dataset),
            version,
        });
        cache
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn source_files(&self) -> &SourceFiles {
        &self.files
    }

    /// Shared dataset, loading it on first use
    pub fn get_or_load(&self) -> Result<Arc<Dataset>> {
        let loaded = self.slot.get_or_try_init(|| {
            info!("Dataset cache miss, loading from {}", self.data_dir.display());
            let dataset = load_dataset_with(&self.data_dir, &self.files)?;
            let version = DatasetVersion {
                data_dir: self.data_dir.clone(),
                loaded_at: crate::time::now(),
                counts: dataset.counts(),
            };
            Ok::<_, crate::Error>(Loaded {
                dataset: Arc::new(dataset),
                version,
            })
        })?;
        Ok(Arc::clone(&loaded.dataset))
    }

    /// Version token, `None` until the first successful load
    pub fn version(&self) -> Option<&DatasetVersion> {
        self.slot.get().map(|loaded| &loaded.version)
    }

    pub fn is_loaded(&self) -> bool {
        self.slot.get().is_some()
    }
}
