//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Local file system
//! - `archive/` - Zip encoding and decoding
//! - `events/` - Event sinks (NDJSON)

pub mod archive;
pub mod events;
pub mod fs;

// Re-export for convenience
pub use archive::ZipArchiver;
pub use events::JsonEventSink;
pub use fs::LocalFs;
