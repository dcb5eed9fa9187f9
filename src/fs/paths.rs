//! Path and directory management.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use crate::error::PathError;

/// Name of the zero-byte file used to probe a directory for write access.
pub const PROBE_FILE_NAME: &str = "test.txt";

/// Confirm that `dir` is writable by creating and deleting a probe file.
pub fn check_writable(dir: &Path) -> Result<(), PathError> {
    let probe = dir.join(PROBE_FILE_NAME);

    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&probe)
        .map_err(|source| PathError::NotWritable {
            path: dir.to_path_buf(),
            source,
        })?;

    fs::remove_file(&probe).map_err(|source| PathError::NotWritable {
        path: dir.to_path_buf(),
        source,
    })?;

    Ok(())
}

/// Ensure a directory exists, creating it if necessary, and that it is writable.
pub fn prepare_dir(dir: &Path) -> Result<PathBuf, PathError> {
    if dir.exists() && !dir.is_dir() {
        return Err(PathError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    fs::create_dir_all(dir).map_err(|source| PathError::CreateFailed {
        path: dir.to_path_buf(),
        source,
    })?;

    check_writable(dir)?;
    tracing::debug!("Directory ready: {}", dir.display());

    Ok(dir.to_path_buf())
}

/// Folder holding the images harvested for one page.
pub fn image_dir(output_dir: &Path, unique_title: &str) -> PathBuf {
    output_dir.join(unique_title)
}

/// Location of the converted page.
pub fn converted_file_path(output_dir: &Path, unique_title: &str, extension: &str) -> PathBuf {
    output_dir.join(format!("{}.{}", unique_title, extension))
}
