//! Filesystem trait and implementations.
//!
//! The generator only ever touches the disk through [`Filesystem`], so every
//! pipeline stage can be exercised against [`MockFilesystem`] in tests.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use thiserror::Error;

/// Errors from filesystem operations.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("no such file or directory: {}", .0.display())]
    NotFound(PathBuf),
}

impl FsError {
    /// Wrap an IO error, promoting `NotFound` so callers can match on it.
    fn from_io(path: &Path, err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            FsError::NotFound(path.to_path_buf())
        } else {
            FsError::Io(err)
        }
    }
}

/// Trait for filesystem operations.
/// Abstracted for testing with mock implementations.
pub trait Filesystem {
    /// List regular files directly inside `dir` whose extension is `extension`.
    ///
    /// No ordering is guaranteed; callers that need determinism sort the result.
    fn list_files(&self, dir: &Path, extension: &str) -> Result<Vec<PathBuf>, FsError>;

    /// Read file contents as raw bytes.
    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>, FsError>;

    /// Write data atomically to a path (write to temp, then rename).
    /// Replaces any existing file.
    fn write_atomic(&self, path: &Path, data: &[u8]) -> Result<(), FsError>;

    /// Check if a path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Sibling path used while a write is in flight: `name.ext` becomes `name.ext.tmp`.
pub fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Real filesystem implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFilesystem;

impl Filesystem for RealFilesystem {
    fn list_files(&self, dir: &Path, extension: &str) -> Result<Vec<PathBuf>, FsError> {
        let entries = fs::read_dir(dir).map_err(|e| FsError::from_io(dir, e))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type()?.is_file() {
                continue;
            }
            if path.extension().map_or(false, |e| e == extension) {
                files.push(path);
            }
        }

        Ok(files)
    }

    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>, FsError> {
        fs::read(path).map_err(|e| FsError::from_io(path, e))
    }

    fn write_atomic(&self, path: &Path, data: &[u8]) -> Result<(), FsError> {
        let temp = temp_path(path);

        let result = fs::write(&temp, data).and_then(|()| fs::rename(&temp, path));
        if let Err(e) = result {
            let _ = fs::remove_file(&temp);
            return Err(e.into());
        }

        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Mock filesystem for testing.
/// Cloning creates a new handle to the same underlying data.
#[derive(Debug, Clone, Default)]
pub struct MockFilesystem {
    files: Rc<RefCell<BTreeMap<PathBuf, Vec<u8>>>>,
    dirs: Rc<RefCell<BTreeSet<PathBuf>>>,
    read_only: Rc<Cell<bool>>,
}

impl MockFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file directly (for test setup). Parent directories are registered too.
    pub fn add_file(&self, path: impl Into<PathBuf>, data: impl Into<Vec<u8>>) {
        let path = path.into();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.files.borrow_mut().insert(path, data.into());
    }

    /// Register a directory (and its ancestors).
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut dirs = self.dirs.borrow_mut();
        for ancestor in path.as_ref().ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            dirs.insert(ancestor.to_path_buf());
        }
    }

    /// Get content of a specific file.
    pub fn get_file(&self, path: &Path) -> Option<Vec<u8>> {
        self.files.borrow().get(path).cloned()
    }

    /// Get all files in the mock filesystem.
    pub fn files(&self) -> BTreeMap<PathBuf, Vec<u8>> {
        self.files.borrow().clone()
    }

    /// Make every subsequent write fail with `PermissionDenied`.
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.set(read_only);
    }
}

impl Filesystem for MockFilesystem {
    fn list_files(&self, dir: &Path, extension: &str) -> Result<Vec<PathBuf>, FsError> {
        if !self.dirs.borrow().contains(dir) {
            return Err(FsError::NotFound(dir.to_path_buf()));
        }

        Ok(self
            .files
            .borrow()
            .keys()
            .filter(|p| p.parent() == Some(dir))
            .filter(|p| p.extension().map_or(false, |e| e == extension))
            .cloned()
            .collect())
    }

    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>, FsError> {
        self.files
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| FsError::NotFound(path.to_path_buf()))
    }

    fn write_atomic(&self, path: &Path, data: &[u8]) -> Result<(), FsError> {
        if self.read_only.get() {
            return Err(FsError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("read-only filesystem: {}", path.display()),
            )));
        }
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), data.to_vec());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.borrow().contains_key(path) || self.dirs.borrow().contains(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // ===========================================
    // Temp path naming
    // ===========================================

    #[test]
    fn test_temp_path_appends_suffix() {
        let temp = temp_path(Path::new("tests/integer/1.smile"));
        assert_eq!(temp, PathBuf::from("tests/integer/1.smile.tmp"));
    }

    #[test]
    fn test_temp_path_keeps_inner_dots() {
        let temp = temp_path(Path::new("a.b.smile"));
        assert_eq!(temp, PathBuf::from("a.b.smile.tmp"));
    }

    // ===========================================
    // RealFilesystem
    // ===========================================

    #[test]
    fn test_real_list_files_filters_extension() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.json"), "{}").unwrap();
        fs::write(dir.path().join("a.smile"), [0u8]).unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();

        let files = RealFilesystem.list_files(dir.path(), "json").unwrap();
        assert_eq!(files, vec![dir.path().join("a.json")]);
    }

    #[test]
    fn test_real_list_files_skips_directories() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("nested.json")).unwrap();
        fs::write(dir.path().join("b.json"), "{}").unwrap();

        let files = RealFilesystem.list_files(dir.path(), "json").unwrap();
        assert_eq!(files, vec![dir.path().join("b.json")]);
    }

    #[test]
    fn test_real_list_files_is_not_recursive() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/deep.json"), "{}").unwrap();

        let files = RealFilesystem.list_files(dir.path(), "json").unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_real_list_files_missing_dir() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");
        let result = RealFilesystem.list_files(&missing, "json");
        assert!(matches!(result, Err(FsError::NotFound(p)) if p == missing));
    }

    #[test]
    fn test_real_read_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = RealFilesystem.read_bytes(&dir.path().join("nope.json"));
        assert!(matches!(result, Err(FsError::NotFound(_))));
    }

    #[test]
    fn test_real_write_atomic_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.smile");
        fs::write(&path, b"stale contents").unwrap();

        RealFilesystem.write_atomic(&path, &[1, 2, 3]).unwrap();

        assert_eq!(fs::read(&path).unwrap(), vec![1, 2, 3]);
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn test_real_write_atomic_missing_parent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing/out.smile");
        let result = RealFilesystem.write_atomic(&path, &[1]);
        assert!(result.is_err());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_real_write_atomic_disk_full_removes_temp_file() {
        let full = Path::new("/dev/full");
        if !full.exists() {
            return;
        }
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.smile");
        // Writes through the temp path fail with ENOSPC.
        std::os::unix::fs::symlink(full, temp_path(&path)).unwrap();

        let result = RealFilesystem.write_atomic(&path, &[1, 2, 3]);
        assert!(matches!(result, Err(FsError::Io(_))));
        assert!(fs::symlink_metadata(temp_path(&path)).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_real_write_atomic_rename_failure_removes_temp_file() {
        let dir = TempDir::new().unwrap();
        // A non-empty directory at the destination cannot be replaced by a file.
        let path = dir.path().join("out.smile");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), b"x").unwrap();

        let result = RealFilesystem.write_atomic(&path, &[1, 2, 3]);
        assert!(result.is_err());
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn test_real_read_bytes_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("raw.smile");
        fs::write(&path, [0x3a, 0x29, 0x0a, 0x00, 0xff]).unwrap();

        let data = RealFilesystem.read_bytes(&path).unwrap();
        assert_eq!(data, vec![0x3a, 0x29, 0x0a, 0x00, 0xff]);
    }

    // ===========================================
    // MockFilesystem
    // ===========================================

    #[test]
    fn test_mock_add_file_registers_parents() {
        let fs = MockFilesystem::new();
        fs.add_file("tests/string/a.json", "{}");

        assert!(fs.exists(Path::new("tests/string/a.json")));
        assert!(fs.exists(Path::new("tests/string")));
        assert!(fs.exists(Path::new("tests")));
    }

    #[test]
    fn test_mock_list_files_direct_children_only() {
        let fs = MockFilesystem::new();
        fs.add_file("tests/long/a.json", "{}");
        fs.add_file("tests/long/a.smile", vec![0u8]);
        fs.add_file("tests/long/nested/b.json", "{}");
        fs.add_file("tests/integer/c.json", "{}");

        let files = fs.list_files(Path::new("tests/long"), "json").unwrap();
        assert_eq!(files, vec![PathBuf::from("tests/long/a.json")]);
    }

    #[test]
    fn test_mock_list_files_missing_dir() {
        let fs = MockFilesystem::new();
        let result = fs.list_files(Path::new("tests/float"), "json");
        assert!(matches!(result, Err(FsError::NotFound(_))));
    }

    #[test]
    fn test_mock_list_files_empty_dir() {
        let fs = MockFilesystem::new();
        fs.add_dir("tests/float");
        let files = fs.list_files(Path::new("tests/float"), "json").unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_mock_clone_shares_state() {
        let fs = MockFilesystem::new();
        let handle = fs.clone();
        handle
            .write_atomic(Path::new("out.smile"), &[0xff])
            .unwrap();

        assert_eq!(fs.get_file(Path::new("out.smile")), Some(vec![0xff]));
        assert_eq!(fs.files().len(), 1);
    }

    #[test]
    fn test_mock_read_only_rejects_writes() {
        let fs = MockFilesystem::new();
        fs.set_read_only(true);

        let result = fs.write_atomic(Path::new("out.smile"), &[0]);
        assert!(matches!(result, Err(FsError::Io(_))));
        assert!(fs.get_file(Path::new("out.smile")).is_none());
    }
}
