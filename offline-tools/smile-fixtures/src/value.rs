//! Fixture payload values.

use serde::{Serialize, Serializer};

use crate::category::ValueKind;

/// A scalar fixture payload.
///
/// The variant is selected by the category the test case was loaded under,
/// never by inspecting the JSON value itself.
#[derive(Debug, Clone, PartialEq)]
pub enum FixtureValue {
    Integer(i32),
    Long(i64),
    String(String),
    Float(f32),
    Double(f64),
    Boolean(bool),
    Binary(Vec<u8>),
}

impl FixtureValue {
    /// The payload type of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            FixtureValue::Integer(_) => ValueKind::Integer,
            FixtureValue::Long(_) => ValueKind::Long,
            FixtureValue::String(_) => ValueKind::String,
            FixtureValue::Float(_) => ValueKind::Float,
            FixtureValue::Double(_) => ValueKind::Double,
            FixtureValue::Boolean(_) => ValueKind::Boolean,
            FixtureValue::Binary(_) => ValueKind::Binary,
        }
    }
}

// Each variant goes through the matching serializer primitive so the encoder
// picks the token the category calls for (binary is bytes, not a sequence).
impl Serialize for FixtureValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            FixtureValue::Integer(v) => serializer.serialize_i32(*v),
            FixtureValue::Long(v) => serializer.serialize_i64(*v),
            FixtureValue::String(v) => serializer.serialize_str(v),
            FixtureValue::Float(v) => serializer.serialize_f32(*v),
            FixtureValue::Double(v) => serializer.serialize_f64(*v),
            FixtureValue::Boolean(v) => serializer.serialize_bool(*v),
            FixtureValue::Binary(v) => serializer.serialize_bytes(v),
        }
    }
}
