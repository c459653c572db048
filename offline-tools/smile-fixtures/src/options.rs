//! Encoder feature configuration.
//!
//! Test case flags are phrased from the fixture author's point of view, while
//! the options use the Smile generator's feature names. They line up one to
//! one except for binary handling, where the relationship is inverted:
//!
//! | flag                | option                        |
//! |---------------------|-------------------------------|
//! | `raw_binary`        | `!encode_binary_as_7bit`      |
//! | `shared_strings`    | `check_shared_string_values`  |
//! | `shared_properties` | `check_shared_names`          |
//! | `write_end_marker`  | `write_end_marker`            |

use std::io::Write;

use serde_smile::Serializer;

use crate::types::TestCase;

/// Smile encoder features for one fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderOptions {
    /// Escape binary payloads into 7-bit-safe bytes.
    pub encode_binary_as_7bit: bool,
    /// Back-reference repeated string values.
    pub check_shared_string_values: bool,
    /// Back-reference repeated property names.
    pub check_shared_names: bool,
    /// Append the `0xFF` end-of-stream marker.
    pub write_end_marker: bool,
}

impl EncoderOptions {
    /// Map a test case's flags to encoder features.
    pub fn configure(case: &TestCase) -> Self {
        Self {
            encode_binary_as_7bit: !case.raw_binary,
            check_shared_string_values: case.shared_strings,
            check_shared_names: case.shared_properties,
            write_end_marker: case.write_end_marker,
        }
    }

    /// Build a Smile serializer with these features over `writer`.
    ///
    /// The end marker is not a serializer setting; see [`crate::encode::encode`].
    pub fn serializer<W: Write>(&self, writer: W) -> Serializer<W> {
        Serializer::builder()
            .raw_binary(!self.encode_binary_as_7bit)
            .shared_strings(self.check_shared_string_values)
            .shared_properties(self.check_shared_names)
            .build(writer)
    }
}

#[cfg(test)]
impl EncoderOptions {
    /// The flags byte the Smile header carries for these options.
    pub fn header_flags(&self) -> u8 {
        let mut flags = 0;
        if self.check_shared_names {
            flags |= 0x01;
        }
        if self.check_shared_string_values {
            flags |= 0x02;
        }
        if !self.encode_binary_as_7bit {
            flags |= 0x04;
        }
        flags
    }
}
