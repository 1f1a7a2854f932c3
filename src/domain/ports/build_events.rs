//! Build Event Port
//!
//! Provides an observable interface for build operations.
//! Enables terminal progress, NDJSON event streams, and test recording.

use std::path::PathBuf;

use crate::domain::value_objects::ContentHash;

/// Event emitted while an app is packaged
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildEvent {
    /// Build of one app started
    Started {
        app: String,
        output: PathBuf,
        entry_count: usize,
    },

    /// A source file was added to the archive
    EntryAdded {
        index: usize,
        name: String,
        source: PathBuf,
        size: u64,
    },

    /// Intermediate archive written to the staging directory
    ArchiveWritten { path: PathBuf, size: u64 },

    /// Final artifact is in place and executable
    ArtifactWritten {
        app: String,
        path: PathBuf,
        size: u64,
        hash: ContentHash,
    },

    /// Staging directory removed
    StagingRemoved { path: PathBuf },
}

/// Trait for receiving build events
///
/// Implementations can be:
/// - TextEventSink: human output in the terminal
/// - JsonEventSink: NDJSON event stream for CI
pub trait BuildEventSink {
    fn on_event(&self, event: BuildEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl BuildEventSink for NoopEventSink {
    fn on_event(&self, _event: BuildEvent) {}
}
