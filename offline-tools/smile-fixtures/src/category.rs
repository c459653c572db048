//! Fixture categories and the payload type each one expects.
//!
//! The category list is part of the fixture contract: every conforming
//! decoder test suite walks the same seven directories, so the set is closed.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors from category lookup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CategoryError {
    #[error("unknown fixture category: {0} (expected one of integer, long, string, float, double, boolean, binary)")]
    Unknown(String),
}

/// A fixture category. Each maps to one directory under the fixture root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Integer,
    Long,
    String,
    Float,
    Double,
    Boolean,
    Binary,
}

impl Category {
    /// All categories in processing order.
    pub const ALL: [Category; 7] = [
        Category::Integer,
        Category::Long,
        Category::String,
        Category::Float,
        Category::Double,
        Category::Boolean,
        Category::Binary,
    ];

    /// Directory name for this category.
    pub fn name(self) -> &'static str {
        match self {
            Category::Integer => "integer",
            Category::Long => "long",
            Category::String => "string",
            Category::Float => "float",
            Category::Double => "double",
            Category::Boolean => "boolean",
            Category::Binary => "binary",
        }
    }

    /// Look up a category by directory name.
    pub fn from_name(name: &str) -> Result<Self, CategoryError> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name() == name)
            .ok_or_else(|| CategoryError::Unknown(name.to_string()))
    }

    /// Payload type every test case in this category must carry.
    pub fn value_kind(self) -> ValueKind {
        match self {
            Category::Integer => ValueKind::Integer,
            Category::Long => ValueKind::Long,
            Category::String => ValueKind::String,
            Category::Float => ValueKind::Float,
            Category::Double => ValueKind::Double,
            Category::Boolean => ValueKind::Boolean,
            Category::Binary => ValueKind::Binary,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

/// Scalar payload type of a test case value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// 32-bit signed integer.
    Integer,
    /// 64-bit signed integer.
    Long,
    /// UTF-8 text.
    String,
    /// 32-bit IEEE float.
    Float,
    /// 64-bit IEEE float.
    Double,
    Boolean,
    /// Raw bytes, base64 in the JSON document.
    Binary,
}

impl ValueKind {
    pub fn description(self) -> &'static str {
        match self {
            ValueKind::Integer => "32-bit integer",
            ValueKind::Long => "64-bit integer",
            ValueKind::String => "string",
            ValueKind::Float => "32-bit float",
            ValueKind::Double => "64-bit float",
            ValueKind::Boolean => "boolean",
            ValueKind::Binary => "base64 binary",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// One registry row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryEntry {
    pub category: Category,
    pub kind: ValueKind,
}

/// Immutable category → expected type table.
///
/// Built once by the caller and passed by reference to the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRegistry {
    entries: Vec<CategoryEntry>,
}

impl CategoryRegistry {
    /// The seven standard categories in processing order.
    pub fn standard() -> Self {
        let entries = Category::ALL
            .iter()
            .map(|&category| CategoryEntry {
                category,
                kind: category.value_kind(),
            })
            .collect();
        Self { entries }
    }

    /// All rows in processing order.
    pub fn entries(&self) -> &[CategoryEntry] {
        &self.entries
    }

    /// Categories in processing order.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.entries.iter().map(|e| e.category)
    }

    /// Look up a row by category name.
    pub fn lookup(&self, name: &str) -> Result<CategoryEntry, CategoryError> {
        self.entries
            .iter()
            .copied()
            .find(|e| e.category.name() == name)
            .ok_or_else(|| CategoryError::Unknown(name.to_string()))
    }

    /// Expected payload type for `category`.
    pub fn expected_kind(&self, category: Category) -> ValueKind {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .map_or_else(|| category.value_kind(), |e| e.kind)
    }
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
