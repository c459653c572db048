//! Logging for generator runs.
//!
//! The generator reports through a [`Logger`] passed in by the caller, so
//! tests can capture exactly what a run would print.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

/// Verbosity level for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Run summary only.
    Normal,
    /// Per-category progress (-v).
    Verbose,
    /// Per-fixture detail (-vv).
    Debug,
}

impl Verbosity {
    /// Create verbosity from CLI flag count.
    pub fn from_count(count: u8) -> Self {
        match count {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    }
}

/// Sink for generator messages.
pub trait Logger {
    fn log(&self, level: Verbosity, message: &str);

    fn info(&self, message: &str) {
        self.log(Verbosity::Normal, message);
    }

    fn verbose(&self, message: &str) {
        self.log(Verbosity::Verbose, message);
    }

    fn debug(&self, message: &str) {
        self.log(Verbosity::Debug, message);
    }
}

/// Logger that writes to stderr, dropping messages above its level.
#[derive(Debug, Clone, Copy)]
pub struct StderrLogger {
    level: Verbosity,
}

impl StderrLogger {
    pub fn new(level: Verbosity) -> Self {
        Self { level }
    }

    pub fn level(&self) -> Verbosity {
        self.level
    }
}

impl Logger for StderrLogger {
    fn log(&self, level: Verbosity, message: &str) {
        if level <= self.level {
            let _ = writeln!(std::io::stderr(), "{}", message);
        }
    }
}

/// A captured log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: Verbosity,
    pub message: String,
}

/// Logger that records every message, whatever its level.
/// Cloning creates a new handle to the same entries.
#[derive(Debug, Clone, Default)]
pub struct MockLogger {
    entries: Rc<RefCell<Vec<LogEntry>>>,
}

impl MockLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured entries in order.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.borrow().clone()
    }

    /// Captured messages at exactly `level`.
    pub fn messages_at_level(&self, level: Verbosity) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .filter(|e| e.level == level)
            .map(|e| e.message.clone())
            .collect()
    }

    /// Check if any message contains the given substring.
    pub fn contains(&self, substring: &str) -> bool {
        self.entries
            .borrow()
            .iter()
            .any(|e| e.message.contains(substring))
    }
}

impl Logger for MockLogger {
    fn log(&self, level: Verbosity, message: &str) {
        self.entries.borrow_mut().push(LogEntry {
            level,
            message: message.to_string(),
        });
    }
}

/// A no-op logger that discards all messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn log(&self, _level: Verbosity, _message: &str) {}
}
