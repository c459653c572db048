//! Fixture generation.
//!
//! For every enabled category the generator lists `<root>/<category>/*.json`
//! in file name order and runs each document through
//! load → configure → encode → name → write. The first failure aborts the
//! run; fixtures finished before it stay on disk.

use std::path::{Path, PathBuf};

use smile_fs::Filesystem;

use crate::category::{Category, CategoryEntry, CategoryRegistry, ValueKind};
use crate::encode::encode_case;
use crate::error::GenerateError;
use crate::loader::load_test_case;
use crate::logger::Logger;
use crate::naming::{is_input_file, output_path, INPUT_EXTENSION};
use crate::types::{CategorySummary, EncodedFixture, FixtureMismatch, GenerationSummary, Mode};

/// Default fixture root, relative to the working directory.
pub const DEFAULT_ROOT: &str = "tests";

/// Drives fixture generation over a fixture root.
pub struct FixtureGenerator<'a, F, L> {
    fs: &'a F,
    logger: &'a L,
    registry: &'a CategoryRegistry,
    root: PathBuf,
    categories: Vec<Category>,
    mode: Mode,
}

impl<'a, F, L> FixtureGenerator<'a, F, L>
where
    F: Filesystem,
    L: Logger,
{
    /// Create a generator over every registry category in write mode.
    pub fn new(fs: &'a F, logger: &'a L, registry: &'a CategoryRegistry, root: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            logger,
            registry,
            root: root.into(),
            categories: registry.categories().collect(),
            mode: Mode::Write,
        }
    }

    /// Restrict the run to `categories`. Processing order stays the registry's.
    pub fn with_categories(mut self, categories: Vec<Category>) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Process every enabled category.
    pub fn run(&self) -> Result<GenerationSummary, GenerateError> {
        let mut summary = GenerationSummary::new(self.mode);

        for entry in self.enabled_entries() {
            let fixtures = self.run_category(entry, &mut summary)?;
            summary.categories.push(CategorySummary {
                category: entry.category,
                fixtures,
            });
        }

        self.logger.info(&summary.describe());
        Ok(summary)
    }

    /// Input documents of one category, sorted by file name.
    pub fn list_inputs(&self, category: Category) -> Result<Vec<PathBuf>, GenerateError> {
        let dir = self.root.join(category.name());
        let mut inputs: Vec<PathBuf> = self
            .fs
            .list_files(&dir, INPUT_EXTENSION)
            .map_err(|e| GenerateError::from_fs(&dir, e))?
            .into_iter()
            .filter(|p| is_input_file(p))
            .collect();

        inputs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(inputs)
    }

    /// Run one document through the pipeline without touching its output.
    pub fn encode_fixture(&self, input: &Path, kind: ValueKind) -> Result<EncodedFixture, GenerateError> {
        let case = load_test_case(self.fs, input, kind)?;
        let bytes = encode_case(&case).map_err(|source| GenerateError::EncodeFailure {
            path: input.to_path_buf(),
            source,
        })?;
        let output = output_path(input)?;

        Ok(EncodedFixture {
            input: input.to_path_buf(),
            output,
            bytes,
        })
    }

    fn enabled_entries(&self) -> impl Iterator<Item = &CategoryEntry> + '_ {
        self.registry
            .entries()
            .iter()
            .filter(move |e| self.categories.contains(&e.category))
    }

    fn run_category(&self, entry: &CategoryEntry, summary: &mut GenerationSummary) -> Result<usize, GenerateError> {
        let inputs = self.list_inputs(entry.category)?;
        self.logger.verbose(&format!(
            "{}: {} test cases in {}",
            entry.category,
            inputs.len(),
            self.root.join(entry.category.name()).display()
        ));

        for input in &inputs {
            let fixture = self.encode_fixture(input, entry.kind)?;
            match self.mode {
                Mode::Write => {
                    self.fs
                        .write_atomic(&fixture.output, &fixture.bytes)
                        .map_err(|e| GenerateError::from_fs(&fixture.output, e))?;
                    self.logger.debug(&format!(
                        "wrote {} ({} bytes)",
                        fixture.output.display(),
                        fixture.bytes.len()
                    ));
                    summary.written.push(fixture.output);
                }
                Mode::Check => {
                    if let Some(mismatch) = self.check_fixture(&fixture)? {
                        self.logger.verbose(&format!("out of date: {}", mismatch));
                        summary.mismatches.push(mismatch);
                    } else {
                        self.logger.debug(&format!("up to date: {}", fixture.output.display()));
                    }
                }
            }
        }

        Ok(inputs.len())
    }

    fn check_fixture(&self, fixture: &EncodedFixture) -> Result<Option<FixtureMismatch>, GenerateError> {
        let existing = if self.fs.exists(&fixture.output) {
            let bytes = self
                .fs
                .read_bytes(&fixture.output)
                .map_err(|e| GenerateError::from_fs(&fixture.output, e))?;
            Some(bytes)
        } else {
            None
        };

        Ok(FixtureMismatch::new(
            &fixture.output,
            existing.as_deref(),
            &fixture.bytes,
        ))
    }
}
