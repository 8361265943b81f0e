use std::path::{Path, PathBuf};

use regex::Regex;

use crate::TxcError;

/// lists the schedule inputs of a run.
///
/// a file input is returned as-is. a directory input is walked recursively
/// (for example one subdirectory per region) and every file whose path matches
/// `pattern` is kept. paths are sorted so that the processing order does not
/// depend on directory listing order.
pub fn discover_inputs(input: &Path, pattern: &Regex) -> Result<Vec<PathBuf>, TxcError> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    if !input.is_dir() {
        return Err(TxcError::InvalidUserInput(format!(
            "input '{}' is neither a file nor a directory",
            input.to_string_lossy()
        )));
    }
    let mut found = vec![];
    walk_directory(input, pattern, &mut found)?;
    found.sort();
    log::info!(
        "found {} schedule inputs under {}",
        found.len(),
        input.to_string_lossy()
    );
    Ok(found)
}

fn walk_directory(dir: &Path, pattern: &Regex, found: &mut Vec<PathBuf>) -> Result<(), TxcError> {
    let entries = std::fs::read_dir(dir).map_err(|e| TxcError::FileReadError {
        path: dir.to_path_buf(),
        source: e,
    })?;
    for entry in entries {
        let entry = entry.map_err(|e| TxcError::FileReadError {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if path.is_dir() {
            walk_directory(&path, pattern, found)?;
        } else if path.is_file() && pattern.is_match(&path.to_string_lossy()) {
            found.push(path);
        }
    }
    Ok(())
}
