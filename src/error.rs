//! Error types for pyzapp
//!
//! Library code returns `PackError`; the binary wraps it with `anyhow`.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for pyzapp operations
pub type PackResult<T> = Result<T, PackError>;

/// The step of a build or clean that touched the file system.
///
/// Carried by `PackError::Io` so the CLI can say which step failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    ReadSource,
    CreateStaging,
    CopyEntryPoint,
    WriteArchive,
    ReadArchive,
    WriteArtifact,
    SetPermissions,
    RemoveTemporary,
    ReadArtifact,
    ReadConfig,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Step::ReadSource => "reading source",
            Step::CreateStaging => "creating staging directory",
            Step::CopyEntryPoint => "copying entry point",
            Step::WriteArchive => "writing archive",
            Step::ReadArchive => "reading archive",
            Step::WriteArtifact => "writing artifact",
            Step::SetPermissions => "making artifact executable",
            Step::RemoveTemporary => "removing temporary file",
            Step::ReadArtifact => "reading artifact",
            Step::ReadConfig => "reading recipe",
        };
        f.write_str(label)
    }
}

/// Main error type for pyzapp operations
#[derive(Error, Debug)]
pub enum PackError {
    /// An entry point or module listed for packaging does not exist
    #[error("source file not found: {}", path.display())]
    MissingSource { path: PathBuf },

    /// File system failure during a named step
    #[error("{step} failed for {}: {source}", path.display())]
    Io {
        step: Step,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Two files would be stored under the same archive name
    #[error("duplicate archive entry '{name}'")]
    DuplicateEntry { name: String },

    /// The artifact path is one of the files being packaged
    #[error("output {} would overwrite a source file", path.display())]
    OutputIsSource { path: PathBuf },

    /// Recipe could not be parsed
    #[error("invalid recipe {}: {message}", file.display())]
    InvalidConfig { file: PathBuf, message: String },

    /// `build NAME` named an app the recipe does not define
    #[error("no app named '{name}' in recipe (available: {available})")]
    UnknownApp { name: String, available: String },

    /// File does not have the shebang + zip layout
    #[error("{} is not a zip application: {reason}", path.display())]
    NotAnArtifact { path: PathBuf, reason: String },

    /// Zip encoding or decoding error
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

impl PackError {
    /// Whether this error is a missing input (as opposed to an I/O failure)
    pub fn is_missing_source(&self) -> bool {
        matches!(self, PackError::MissingSource { .. })
    }
}

/// Attach a step and path to an `io::Result`.
pub trait IoStep<T> {
    fn at_step(self, step: Step, path: &Path) -> PackResult<T>;
}

impl<T> IoStep<T> for std::io::Result<T> {
    fn at_step(self, step: Step, path: &Path) -> PackResult<T> {
        self.map_err(|source| PackError::Io {
            step,
            path: path.to_path_buf(),
            source,
        })
    }
}
