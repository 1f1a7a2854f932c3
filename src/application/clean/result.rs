//! Clean result types

use std::fmt;
use std::path::PathBuf;

/// Why a path was left alone
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The path is an entry point or module of some app
    SourceFile,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::SourceFile => write!(f, "source file"),
        }
    }
}

/// A temporary candidate that was not removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// A removal that failed for a reason other than "already gone"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Result of a clean operation
#[derive(Debug, Clone, Default)]
pub struct CleanResult {
    /// Removed paths (or paths that would be removed on a dry run)
    pub deleted: Vec<PathBuf>,
    pub skipped: Vec<SkippedFile>,
    pub errors: Vec<CleanFailure>,
}

impl CleanResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_deleted(&mut self, path: PathBuf) {
        self.deleted.push(path);
    }

    pub fn add_skipped(&mut self, path: PathBuf, reason: SkipReason) {
        self.skipped.push(SkippedFile { path, reason });
    }

    pub fn add_error(&mut self, path: PathBuf, error: String) {
        self.errors.push(CleanFailure { path, error });
    }

    /// True when there was nothing to remove
    pub fn is_empty(&self) -> bool {
        self.deleted.is_empty() && self.skipped.is_empty() && self.errors.is_empty()
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}
