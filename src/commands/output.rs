//! Terminal output shared by the command handlers
//!
//! Progress goes to stdout, warnings and errors to stderr. `-v` adds
//! per-entry lines, `-vv` adds staging details.

use pyzapp::config::ConfigWarning;
use pyzapp::domain::ports::{BuildEvent, BuildEventSink};

/// Human-readable build progress
pub struct TextEventSink {
    verbose: u8,
}

impl TextEventSink {
    pub fn new(verbose: u8) -> Self {
        Self { verbose }
    }
}

impl BuildEventSink for TextEventSink {
    fn on_event(&self, event: BuildEvent) {
        match event {
            BuildEvent::Started {
                app,
                output,
                entry_count,
            } => {
                if self.verbose > 0 {
                    println!(
                        "Building {} -> {} ({} files)",
                        app,
                        output.display(),
                        entry_count
                    );
                }
            }
            BuildEvent::EntryAdded {
                name, source, size, ..
            } => {
                if self.verbose > 0 {
                    println!("  + {:<24} {:>10}  {}", name, format_size(size), source.display());
                }
            }
            BuildEvent::ArchiveWritten { path, size } => {
                if self.verbose > 1 {
                    println!("  archive {} ({})", path.display(), format_size(size));
                }
            }
            BuildEvent::ArtifactWritten {
                app,
                path,
                size,
                hash,
            } => {
                println!(
                    "Built {} ({}, sha256:{}) -> {}",
                    app,
                    format_size(size),
                    hash.short(),
                    path.display()
                );
            }
            BuildEvent::StagingRemoved { path } => {
                if self.verbose > 1 {
                    println!("  removed {}", path.display());
                }
            }
        }
    }
}

/// Print recipe warnings to stderr (JSON mode emits them as events instead)
pub fn print_warnings(warnings: &[ConfigWarning]) {
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }
}

/// Final error report; the process exits non-zero afterwards
pub fn report_error(err: &anyhow::Error, json: bool) {
    if json {
        println!(
            "{}",
            serde_json::json!({
                "event": "error",
                "message": format!("{:#}", err),
            })
        );
    }
    eprintln!("Error: {:#}", err);
}

pub fn format_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * KIB;
    if bytes >= MIB {
        format!("{:.1} MiB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.1} KiB", bytes as f64 / KIB as f64)
    } else {
        format!("{} B", bytes)
    }
}
