//! Smile reference fixture generator
//!
//! Produces the `.smile` conformance vectors that Smile encoders and decoders
//! in other implementations are tested against.
//!
//! # Overview
//!
//! Each fixture starts from a JSON test case describing one scalar value and
//! four encoder feature flags. The generator:
//!
//! 1. Loads the test case, decoding `value` as the category's expected type
//! 2. Maps the flags to Smile encoder features
//! 3. Encodes the value and writes it next to the input as `<name>.smile`
//!
//! # Fixtures
//!
//! Fixtures live under a root directory (`tests/` by default) with one
//! directory per category:
//!
//! - `integer/` - 32-bit integers
//! - `long/` - 64-bit integers
//! - `string/` - UTF-8 strings
//! - `float/` - 32-bit floats
//! - `double/` - 64-bit floats
//! - `boolean/` - booleans
//! - `binary/` - base64-encoded byte strings

pub mod category;
pub mod cli;
pub mod command;
pub mod encode;
pub mod error;
pub mod generator;
pub mod loader;
pub mod logger;
pub mod naming;
pub mod options;
pub mod types;
pub mod value;

pub use category::{Category, CategoryEntry, CategoryError, CategoryRegistry, ValueKind};
pub use cli::{parse_from, GeneratorArgs};
pub use command::{execute_generate, outcome_code};
pub use encode::{encode, encode_case, EncodeError};
pub use error::{exit_code, GenerateError};
pub use generator::{FixtureGenerator, DEFAULT_ROOT};
pub use loader::{load_test_case, parse_test_case, LoadError};
pub use logger::{Logger, MockLogger, NullLogger, StderrLogger, Verbosity};
pub use naming::{is_input_file, output_path, NamingError, INPUT_EXTENSION, OUTPUT_EXTENSION};
pub use options::EncoderOptions;
pub use types::{
    CategorySummary, EncodedFixture, FixtureMismatch, GenerationSummary, KindMismatch, Mode,
    TestCase,
};
pub use value::FixtureValue;
