//! Inspect use case
//!
//! Reads an artifact back and checks it has the zip application layout.

use std::path::{Path, PathBuf};

use crate::domain::ports::{Archiver, FileSystem};
use crate::domain::services::split_shebang;
use crate::domain::value_objects::ContentHash;
use crate::error::{IoStep, PackError, PackResult, Step};
use crate::models::MAIN_ENTRY;

/// One archive member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    pub name: String,
    pub size: u64,
    pub hash: ContentHash,
}

/// Everything `inspect` reports about an artifact
#[derive(Debug, Clone)]
pub struct InspectReport {
    pub path: PathBuf,
    /// Interpreter command from the `#!` line
    pub interpreter: String,
    pub size: u64,
    pub hash: ContentHash,
    pub entries: Vec<EntryInfo>,
}

impl InspectReport {
    pub fn entry(&self, name: &str) -> Option<&EntryInfo> {
        self.entries.iter().find(|e| e.name == name)
    }
}

pub struct InspectUseCase<FS, AR>
where
    FS: FileSystem,
    AR: Archiver,
{
    fs: FS,
    archiver: AR,
}

impl<FS, AR> InspectUseCase<FS, AR>
where
    FS: FileSystem,
    AR: Archiver,
{
    pub fn new(fs: FS, archiver: AR) -> Self {
        Self { fs, archiver }
    }

    pub fn execute(&self, path: &Path) -> PackResult<InspectReport> {
        let artifact = self.fs.read(path).at_step(Step::ReadArtifact, path)?;

        let not_artifact = |reason: &str| PackError::NotAnArtifact {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        };

        let (interpreter, archive) =
            split_shebang(&artifact).ok_or_else(|| not_artifact("missing #! line"))?;

        // Archives written after the shebang use offsets relative to the zip
        // itself; tools that write both in one stream use absolute offsets.
        let entries = self
            .archiver
            .decode(archive)
            .or_else(|_| self.archiver.decode(&artifact))
            .map_err(|_| not_artifact("payload is not a zip archive"))?;

        if !entries.iter().any(|e| e.name == MAIN_ENTRY) {
            return Err(not_artifact("archive has no __main__.py"));
        }

        Ok(InspectReport {
            path: path.to_path_buf(),
            interpreter,
            size: artifact.len() as u64,
            hash: ContentHash::from_bytes(&artifact),
            entries: entries
                .into_iter()
                .map(|e| EntryInfo {
                    size: e.data.len() as u64,
                    hash: ContentHash::from_bytes(&e.data),
                    name: e.name,
                })
                .collect(),
        })
    }
}
