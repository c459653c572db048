//! CLI for generating Smile reference fixtures.

use std::process::ExitCode;

use clap::Parser;
use smile_fixtures::{execute_generate, outcome_code, GeneratorArgs, StderrLogger};
use smile_fs::RealFilesystem;

fn main() -> ExitCode {
    let args = GeneratorArgs::parse();
    let logger = StderrLogger::new(args.verbosity());

    let result = execute_generate(&args, &RealFilesystem, &logger);

    match &result {
        Ok(summary) => {
            for mismatch in &summary.mismatches {
                eprintln!("mismatch: {mismatch}");
            }
        }
        Err(e) => eprintln!("error: {e}"),
    }

    ExitCode::from(outcome_code(&result))
}
