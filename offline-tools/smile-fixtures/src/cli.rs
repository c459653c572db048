//! CLI argument parsing for smile-fixtures.
//!
//! With no arguments the tool regenerates every category under `./tests`.

use std::path::PathBuf;

use clap::Parser;

use crate::category::{Category, CategoryError, CategoryRegistry};
use crate::generator::DEFAULT_ROOT;
use crate::logger::Verbosity;
use crate::types::Mode;

/// Generate Smile reference fixtures from JSON test case documents.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "smile-fixtures")]
#[command(version, about, long_about = None)]
pub struct GeneratorArgs {
    /// Fixture root containing one directory per category.
    #[arg(long, default_value = DEFAULT_ROOT)]
    pub root: PathBuf,

    /// Only process these categories (comma-separated; default: all).
    #[arg(long = "category", value_delimiter = ',')]
    pub categories: Vec<String>,

    /// Verify existing .smile files against freshly encoded bytes instead of writing.
    #[arg(long)]
    pub check: bool,

    /// Increase verbosity (-v for per-category progress, -vv for every fixture)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl GeneratorArgs {
    /// Resolve the category filter against `registry`.
    ///
    /// An empty filter selects every category.
    pub fn categories(&self, registry: &CategoryRegistry) -> Result<Vec<Category>, CategoryError> {
        if self.categories.is_empty() {
            return Ok(registry.categories().collect());
        }

        self.categories
            .iter()
            .map(|name| registry.lookup(name.trim()).map(|e| e.category))
            .collect()
    }

    pub fn mode(&self) -> Mode {
        if self.check {
            Mode::Check
        } else {
            Mode::Write
        }
    }

    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_count(self.verbose)
    }
}

/// Parse CLI arguments from an iterator of strings.
/// Useful for testing.
pub fn parse_from<I, T>(iter: I) -> Result<GeneratorArgs, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    GeneratorArgs::try_parse_from(iter)
}
