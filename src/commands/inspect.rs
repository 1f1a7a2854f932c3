//! Inspect command handler

use std::path::Path;

use anyhow::{Context, Result};

use pyzapp::application::inspect::InspectUseCase;
use pyzapp::infrastructure::{JsonEventSink, LocalFs, ZipArchiver};

use super::output::format_size;

/// Execute the inspect command
pub fn cmd_inspect(artifact: &Path, json: bool, verbose: u8) -> Result<()> {
    let report = InspectUseCase::new(LocalFs::new(), ZipArchiver::new())
        .execute(artifact)
        .with_context(|| format!("inspecting {}", artifact.display()))?;

    if json {
        JsonEventSink::stdout().emit(serde_json::json!({
            "event": "inspect",
            "path": report.path.display().to_string(),
            "interpreter": report.interpreter,
            "size": report.size,
            "hash": report.hash.to_string(),
            "entries": report
                .entries
                .iter()
                .map(|e| serde_json::json!({
                    "name": e.name,
                    "size": e.size,
                    "hash": e.hash.to_string(),
                }))
                .collect::<Vec<_>>(),
        }));
        return Ok(());
    }

    println!("{}", report.path.display());
    println!("  interpreter: {}", report.interpreter);
    println!("  size:        {}", format_size(report.size));
    println!("  hash:        {}", report.hash);
    println!("  entries:");
    for entry in &report.entries {
        if verbose > 0 {
            println!(
                "    {:<24} {:>10}  {}",
                entry.name,
                format_size(entry.size),
                entry.hash
            );
        } else {
            println!("    {:<24} {:>10}", entry.name, format_size(entry.size));
        }
    }

    Ok(())
}
