//! Build result types

use std::path::PathBuf;

use crate::domain::value_objects::ContentHash;

/// One file as it was placed in the archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedEntry {
    /// Name inside the archive
    pub name: String,
    /// File it was read from
    pub source: PathBuf,
    pub size: u64,
}

/// Result of building one app
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub app: String,
    pub output: PathBuf,
    pub entries: Vec<PackedEntry>,
    /// Artifact size in bytes (planned size on a dry run is unknown, so 0)
    pub size: u64,
    /// Digest of the artifact; `None` on a dry run
    pub hash: Option<ContentHash>,
    pub dry_run: bool,
}

impl BuildReport {
    /// Total bytes of packaged sources
    pub fn source_bytes(&self) -> u64 {
        self.entries.iter().map(|e| e.size).sum()
    }
}
