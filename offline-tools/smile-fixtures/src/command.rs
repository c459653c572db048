//! Generate command orchestration.

use smile_fs::Filesystem;

use crate::category::CategoryRegistry;
use crate::cli::GeneratorArgs;
use crate::error::{codes, exit_code, GenerateError};
use crate::generator::FixtureGenerator;
use crate::logger::Logger;
use crate::types::GenerationSummary;

/// Execute a generator run as configured by `args`.
pub fn execute_generate<F, L>(
    args: &GeneratorArgs,
    fs: &F,
    logger: &L,
) -> Result<GenerationSummary, GenerateError>
where
    F: Filesystem,
    L: Logger,
{
    let registry = CategoryRegistry::standard();
    let categories = args.categories(&registry)?;

    FixtureGenerator::new(fs, logger, &registry, &args.root)
        .with_categories(categories)
        .with_mode(args.mode())
        .run()
}

/// Process exit code for the outcome of [`execute_generate`].
pub fn outcome_code(result: &Result<GenerationSummary, GenerateError>) -> u8 {
    match result {
        Ok(summary) if summary.is_clean() => codes::SUCCESS,
        Ok(_) => codes::CHECK_MISMATCH,
        Err(e) => exit_code(e),
    }
}
