//! JSON Event Sink
//!
//! Outputs build events as NDJSON for CI/automation consumption.

use crate::domain::ports::{BuildEvent, BuildEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer (for testing)
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    /// Write one event line. Also used by commands for non-build events.
    pub fn emit(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

impl BuildEventSink for JsonEventSink {
    fn on_event(&self, event: BuildEvent) {
        let json = match event {
            BuildEvent::Started {
                app,
                output,
                entry_count,
            } => serde_json::json!({
                "event": "start",
                "command": "build",
                "app": app,
                "output": output.display().to_string(),
                "entry_count": entry_count,
            }),

            BuildEvent::EntryAdded {
                index,
                name,
                source,
                size,
            } => serde_json::json!({
                "event": "item_added",
                "command": "build",
                "index": index,
                "name": name,
                "source": source.display().to_string(),
                "size": size,
            }),

            BuildEvent::ArchiveWritten { path, size } => serde_json::json!({
                "event": "archive_written",
                "command": "build",
                "path": path.display().to_string(),
                "size": size,
            }),

            BuildEvent::ArtifactWritten {
                app,
                path,
                size,
                hash,
            } => serde_json::json!({
                "event": "item_written",
                "command": "build",
                "app": app,
                "path": path.display().to_string(),
                "size": size,
                "hash": hash.to_string(),
            }),

            BuildEvent::StagingRemoved { path } => serde_json::json!({
                "event": "staging_removed",
                "command": "build",
                "path": path.display().to_string(),
            }),
        };

        self.emit(json);
    }
}
