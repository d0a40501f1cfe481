//! Directory listings for troubleshooting a deployment

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::loader::SourceFiles;
use crate::Result;

/// Snapshot of the working directory and the data directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryReport {
    pub working_dir: PathBuf,
    pub working_dir_entries: Vec<String>,
    pub data_dir: PathBuf,
    pub data_dir_exists: bool,
    /// `None` when the data directory is missing
    pub data_dir_entries: Option<Vec<String>>,
    /// Expected source files not present in the data directory
    pub missing_sources: Vec<String>,
}

/// Sorted entry names of a directory
pub fn list_dir(dir: &Path) -> Result<Vec<String>> {
    let mut names = std::fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
        .collect::<std::io::Result<Vec<_>>>()?;
    names.sort();
    Ok(names)
}

/// Describe the working directory and `data_dir` (relative paths resolve
/// against the working directory)
pub fn directory_report(data_dir: &Path, files: &SourceFiles) -> Result<DirectoryReport> {
    let working_dir = std::env::current_dir()?;
    let working_dir_entries = list_dir(&working_dir)?;

    let data_dir_exists = data_dir.is_dir();
    let data_dir_entries = if data_dir_exists {
        Some(list_dir(data_dir)?)
    } else {
        None
    };

    let missing_sources = files
        .names()
        .iter()
        .filter(|name| !data_dir.join(name).is_file())
        .map(|name| name.to_string())
        .collect();

    Ok(DirectoryReport {
        working_dir,
        working_dir_entries,
        data_dir: data_dir.to_path_buf(),
        data_dir_exists,
        data_dir_entries,
        missing_sources,
    })
}
