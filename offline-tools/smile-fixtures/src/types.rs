//! Generator types.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::category::{Category, ValueKind};
use crate::value::FixtureValue;

/// A value whose type does not belong to the category it was loaded under.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("expected a {expected} value, found a {found} value")]
pub struct KindMismatch {
    pub expected: ValueKind,
    pub found: ValueKind,
}

/// One loaded test case: the encoder flags and the payload to encode.
#[derive(Debug, Clone, PartialEq)]
pub struct TestCase {
    /// Write binary payloads as raw octets instead of 7-bit escaping them.
    pub raw_binary: bool,
    /// Back-reference repeated string values.
    pub shared_strings: bool,
    /// Back-reference repeated property names.
    pub shared_properties: bool,
    /// Append the end-of-stream marker byte.
    pub write_end_marker: bool,
    pub value: FixtureValue,
}

impl TestCase {
    /// Create a test case with every flag off.
    ///
    /// Fails if `value` is not of the `expected` kind.
    pub fn new(value: FixtureValue, expected: ValueKind) -> Result<Self, KindMismatch> {
        let found = value.kind();
        if found != expected {
            return Err(KindMismatch { expected, found });
        }

        Ok(Self {
            raw_binary: false,
            shared_strings: false,
            shared_properties: false,
            write_end_marker: false,
            value,
        })
    }

    pub fn with_raw_binary(mut self, raw_binary: bool) -> Self {
        self.raw_binary = raw_binary;
        self
    }

    pub fn with_shared_strings(mut self, shared_strings: bool) -> Self {
        self.shared_strings = shared_strings;
        self
    }

    pub fn with_shared_properties(mut self, shared_properties: bool) -> Self {
        self.shared_properties = shared_properties;
        self
    }

    pub fn with_write_end_marker(mut self, write_end_marker: bool) -> Self {
        self.write_end_marker = write_end_marker;
        self
    }
}

/// What the generator does with the encoded bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Write each output file, replacing whatever is there.
    #[default]
    Write,
    /// Compare against the existing output files without touching them.
    Check,
}

/// A fixture produced by the pipeline but not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedFixture {
    pub input: PathBuf,
    pub output: PathBuf,
    pub bytes: Vec<u8>,
}

/// An output file that does not match what the generator would write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureMismatch {
    pub path: PathBuf,
    /// Length on disk, `None` when the file does not exist.
    pub existing_len: Option<usize>,
    pub generated_len: usize,
    /// Offset of the first differing byte.
    pub first_diff_offset: Option<usize>,
}

impl FixtureMismatch {
    /// Compare existing contents with freshly generated bytes.
    ///
    /// Returns `None` when they are identical.
    pub fn new(path: &Path, existing: Option<&[u8]>, generated: &[u8]) -> Option<Self> {
        let Some(existing) = existing else {
            return Some(Self {
                path: path.to_path_buf(),
                existing_len: None,
                generated_len: generated.len(),
                first_diff_offset: None,
            });
        };

        if existing == generated {
            return None;
        }

        let first_diff_offset = existing
            .iter()
            .zip(generated)
            .position(|(a, b)| a != b)
            .unwrap_or_else(|| existing.len().min(generated.len()));

        Some(Self {
            path: path.to_path_buf(),
            existing_len: Some(existing.len()),
            generated_len: generated.len(),
            first_diff_offset: Some(first_diff_offset),
        })
    }
}

impl fmt::Display for FixtureMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.existing_len, self.first_diff_offset) {
            (None, _) => write!(f, "{}: missing (would write {} bytes)", self.path.display(), self.generated_len),
            (Some(existing), Some(offset)) => write!(
                f,
                "{}: differs at byte {} ({} bytes on disk, {} generated)",
                self.path.display(),
                offset,
                existing,
                self.generated_len
            ),
            (Some(existing), None) => write!(
                f,
                "{}: differs ({} bytes on disk, {} generated)",
                self.path.display(),
                existing,
                self.generated_len
            ),
        }
    }
}

/// Per-category tally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    pub category: Category,
    pub fixtures: usize,
}

/// Outcome of a full generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSummary {
    pub mode: Mode,
    pub categories: Vec<CategorySummary>,
    /// Output files written, in processing order. Empty in check mode.
    pub written: Vec<PathBuf>,
    /// Outputs that differ from the generated bytes. Empty in write mode.
    pub mismatches: Vec<FixtureMismatch>,
}

impl GenerationSummary {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            categories: Vec::new(),
            written: Vec::new(),
            mismatches: Vec::new(),
        }
    }

    /// Total number of fixtures processed.
    pub fn total_fixtures(&self) -> usize {
        self.categories.iter().map(|c| c.fixtures).sum()
    }

    /// True when every check passed (always true in write mode).
    pub fn is_clean(&self) -> bool {
        self.mismatches.is_empty()
    }

    /// One-line human summary.
    pub fn describe(&self) -> String {
        let total = self.total_fixtures();
        match self.mode {
            Mode::Write => format!(
                "wrote {} fixtures across {} categories",
                self.written.len(),
                self.categories.len()
            ),
            Mode::Check if self.is_clean() => format!(
                "checked {} fixtures across {} categories: all up to date",
                total,
                self.categories.len()
            ),
            Mode::Check => format!(
                "checked {} fixtures across {} categories: {} out of date",
                total,
                self.categories.len(),
                self.mismatches.len()
            ),
        }
    }
}
