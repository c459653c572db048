//! Error types and exit codes for smile-fixtures.

use std::path::PathBuf;

use smile_fs::FsError;

use crate::category::CategoryError;
use crate::encode::EncodeError;
use crate::loader::LoadError;
use crate::naming::NamingError;

/// Exit codes for smile-fixtures.
pub mod codes {
    pub const SUCCESS: u8 = 0;
    pub const IO_ERROR: u8 = 1;
    pub const NOT_FOUND: u8 = 2;
    pub const MALFORMED_CONFIG: u8 = 3;
    pub const INVALID_EXTENSION: u8 = 4;
    pub const ENCODE_FAILURE: u8 = 5;
    pub const UNKNOWN_CATEGORY: u8 = 6;
    /// Check mode found outputs that differ from the generated bytes.
    pub const CHECK_MISMATCH: u8 = 10;
}

/// Errors that abort a generator run.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("malformed config in {}: {reason}", .path.display())]
    MalformedConfig { path: PathBuf, reason: String },

    #[error("invalid extension: {} does not end in .json", .0.display())]
    InvalidExtension(PathBuf),

    #[error("encode failure for {}: {source}", .path.display())]
    EncodeFailure {
        path: PathBuf,
        #[source]
        source: EncodeError,
    },

    #[error("IO failure on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: FsError,
    },

    #[error(transparent)]
    UnknownCategory(#[from] CategoryError),
}

impl GenerateError {
    /// Attach `path` to a filesystem error, keeping `NotFound` distinct.
    pub fn from_fs(path: impl Into<PathBuf>, source: FsError) -> Self {
        match source {
            FsError::NotFound(_) => GenerateError::NotFound(path.into()),
            source => GenerateError::Io {
                path: path.into(),
                source,
            },
        }
    }
}

impl From<LoadError> for GenerateError {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::NotFound(path) => GenerateError::NotFound(path),
            LoadError::Read { path, source } => GenerateError::Io { path, source },
            LoadError::Malformed { path, reason } => GenerateError::MalformedConfig { path, reason },
        }
    }
}

impl From<NamingError> for GenerateError {
    fn from(err: NamingError) -> Self {
        match err {
            NamingError::InvalidExtension(path) => GenerateError::InvalidExtension(path),
        }
    }
}

/// Map an error to its exit code.
pub fn exit_code(err: &GenerateError) -> u8 {
    match err {
        GenerateError::NotFound(_) => codes::NOT_FOUND,
        GenerateError::MalformedConfig { .. } => codes::MALFORMED_CONFIG,
        GenerateError::InvalidExtension(_) => codes::INVALID_EXTENSION,
        GenerateError::EncodeFailure { .. } => codes::ENCODE_FAILURE,
        GenerateError::Io { .. } => codes::IO_ERROR,
        GenerateError::UnknownCategory(_) => codes::UNKNOWN_CATEGORY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            exit_code(&GenerateError::NotFound(PathBuf::from("tests/integer"))),
            codes::NOT_FOUND
        );
        assert_eq!(
            exit_code(&GenerateError::MalformedConfig {
                path: PathBuf::from("a.json"),
                reason: "bad".into()
            }),
            codes::MALFORMED_CONFIG
        );
        assert_eq!(
            exit_code(&GenerateError::InvalidExtension(PathBuf::from("a.txt"))),
            codes::INVALID_EXTENSION
        );
        assert_eq!(
            exit_code(&GenerateError::Io {
                path: PathBuf::from("a.smile"),
                source: FsError::Io(std::io::Error::new(std::io::ErrorKind::Other, "x"))
            }),
            codes::IO_ERROR
        );
        assert_eq!(
            exit_code(&GenerateError::UnknownCategory(CategoryError::Unknown("map".into()))),
            codes::UNKNOWN_CATEGORY
        );
    }

    #[test]
    fn test_exit_codes_are_distinct_and_nonzero() {
        let mut all = vec![
            codes::IO_ERROR,
            codes::NOT_FOUND,
            codes::MALFORMED_CONFIG,
            codes::INVALID_EXTENSION,
            codes::ENCODE_FAILURE,
            codes::UNKNOWN_CATEGORY,
            codes::CHECK_MISMATCH,
        ];
        assert!(all.iter().all(|&c| c != codes::SUCCESS));
        all.sort();
        all.dedup();
        assert_eq!(all.len(), 7);
    }

    #[test]
    fn test_from_load_error() {
        let err: GenerateError = LoadError::Malformed {
            path: PathBuf::from("tests/long/x.json"),
            reason: "missing required field `value`".into(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "malformed config in tests/long/x.json: missing required field `value`"
        );

        let err: GenerateError = LoadError::NotFound(PathBuf::from("gone.json")).into();
        assert!(matches!(err, GenerateError::NotFound(_)));
    }

    #[test]
    fn test_from_naming_error() {
        let err: GenerateError = NamingError::InvalidExtension(PathBuf::from("x.yaml")).into();
        assert_eq!(exit_code(&err), codes::INVALID_EXTENSION);
        assert!(err.to_string().contains("x.yaml"));
    }

    #[test]
    fn test_from_fs_keeps_not_found() {
        let err = GenerateError::from_fs("tests/binary", FsError::NotFound(PathBuf::from("tests/binary")));
        assert!(matches!(err, GenerateError::NotFound(p) if p == PathBuf::from("tests/binary")));

        let err = GenerateError::from_fs(
            "tests/binary/a.smile",
            FsError::Io(io::Error::new(io::ErrorKind::PermissionDenied, "denied")),
        );
        assert!(matches!(err, GenerateError::Io { .. }));
        assert!(err.to_string().starts_with("IO failure on tests/binary/a.smile"));
    }
}
