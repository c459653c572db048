//! Filesystem abstraction for the Smile fixture generator.
//!
//! This crate provides:
//! - Filesystem trait for listing, reading and atomically writing fixtures
//! - RealFilesystem backed by `std::fs`
//! - MockFilesystem for in-memory tests

pub mod filesystem;

pub use filesystem::{temp_path, Filesystem, FsError, MockFilesystem, RealFilesystem};
