//! Writing and removing generated files.
//!
//! Proxy files are written atomically (temp file + rename) so an interrupted
//! run never leaves a half-written `.cs` file in the project.

use std::fs;
use std::path::Path;

use crate::errors::GeneratorError;

/// Writes content to a file atomically.
///
/// Creates parent directories as needed, writes to a sibling `.tmp` file, then
/// renames it over `path`. An existing file is replaced.
///
/// ## Errors
///
/// Returns [`GeneratorError::WriteError`] naming the path that failed.
pub fn write_atomic(path: &Path, content: &str) -> Result<(), GeneratorError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| GeneratorError::WriteError {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).map_err(|e| GeneratorError::WriteError {
        path: temp_path.display().to_string(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| GeneratorError::WriteError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// Deletes the output folder and everything in it.
///
/// Returns `Ok(false)` without touching the filesystem when the folder does
/// not exist.
///
/// ## Errors
///
/// Returns [`GeneratorError::RemoveError`] if the folder exists but cannot be
/// deleted.
pub fn remove_output_folder(folder: &Path) -> Result<bool, GeneratorError> {
    if !folder.exists() {
        return Ok(false);
    }

    fs::remove_dir_all(folder).map_err(|e| GeneratorError::RemoveError {
        path: folder.display().to_string(),
        source: e,
    })?;

    Ok(true)
}
