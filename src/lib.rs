//! pyzapp - packages Python scripts into self-executing zip applications
//!
//! An artifact is a `#!/usr/bin/env python3` line followed by a zip archive
//! whose `__main__.py` is a copy of the app's entry point. Helper modules sit
//! next to it under their own names, so `import MinerAPI` keeps working.

use std::path::PathBuf;

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod models;

// Re-exports for convenience
pub use application::{
    BuildOptions, BuildReport, BuildUseCase, CleanOptions, CleanResult, CleanUseCase,
    InspectReport, InspectUseCase,
};
pub use config::{CliOverrides, Config};
pub use error::{PackError, PackResult};
pub use infrastructure::{JsonEventSink, LocalFs, ZipArchiver};
pub use models::{App, ArchiveEntry, Compression, MAIN_ENTRY};

/// Build `entry` plus `modules` into an artifact next to the entry point.
///
/// Convenience wrapper around `BuildUseCase` with the local file system.
pub fn build(entry: impl Into<PathBuf>, modules: Vec<PathBuf>) -> PackResult<BuildReport> {
    let app = App::new(entry, modules);
    BuildUseCase::new(LocalFs::new(), ZipArchiver::new()).execute(
        &app,
        &BuildOptions::new(),
        &domain::ports::NoopEventSink,
    )
}

/// Remove intermediates left around `apps`' outputs.
pub fn clean(apps: &[App]) -> CleanResult {
    CleanUseCase::new(LocalFs::new()).execute(apps, &CleanOptions::new())
}
