//! Input/output file naming.
//!
//! `tests/string/aaa.json` produces `tests/string/aaa.smile`.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Extension of test case documents.
pub const INPUT_EXTENSION: &str = "json";

/// Extension of generated fixtures.
pub const OUTPUT_EXTENSION: &str = "smile";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NamingError {
    #[error("not a .json test case: {}", .0.display())]
    InvalidExtension(PathBuf),
}

/// Whether `path` names a test case document.
///
/// Requires a non-empty base name, so a bare `.json` does not qualify.
pub fn is_input_file(path: &Path) -> bool {
    path.extension().map_or(false, |e| e == INPUT_EXTENSION)
}

/// Output path for the test case at `input`: same directory, same base name,
/// `.smile` extension.
pub fn output_path(input: &Path) -> Result<PathBuf, NamingError> {
    if !is_input_file(input) {
        return Err(NamingError::InvalidExtension(input.to_path_buf()));
    }
    Ok(input.with_extension(OUTPUT_EXTENSION))
}
