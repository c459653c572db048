//! Smile encoding of fixture values.

use serde::Serialize;
use thiserror::Error;

use crate::options::EncoderOptions;
use crate::types::TestCase;
use crate::value::FixtureValue;

/// Errors raised by the Smile encoder.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("smile encoder rejected value: {0}")]
    Smile(#[from] serde_smile::Error),
}

/// Encode `value` with `options`, appending the end marker if requested.
///
/// The output always starts with the 4-byte Smile header.
pub fn encode(value: &FixtureValue, options: &EncoderOptions) -> Result<Vec<u8>, EncodeError> {
    let mut serializer = options.serializer(Vec::new());
    value.serialize(&mut serializer)?;
    if options.write_end_marker {
        serializer.end()?;
    }
    Ok(serializer.into_inner())
}

/// Configure and encode a loaded test case.
pub fn encode_case(case: &TestCase) -> Result<Vec<u8>, EncodeError> {
    encode(&case.value, &EncoderOptions::configure(case))
}
