//! Clean command handler
//!
//! Removes build intermediates around every app in the recipe.

use std::path::Path;

use anyhow::{bail, Result};

use pyzapp::application::clean::{CleanOptions, CleanUseCase};
use pyzapp::config::CliOverrides;
use pyzapp::infrastructure::{JsonEventSink, LocalFs};

/// Execute the clean command
pub fn cmd_clean(dry_run: bool, config: Option<&Path>, json: bool, verbose: u8) -> Result<()> {
    let apps = super::load_apps(config, &CliOverrides::default(), json)?;

    let options = CleanOptions::new().with_dry_run(dry_run);
    let result = CleanUseCase::new(LocalFs::new()).execute(&apps, &options);

    if json {
        let sink = JsonEventSink::stdout();
        sink.emit(serde_json::json!({
            "event": "clean_start",
            "command": "clean",
            "app_count": apps.len(),
            "dry_run": dry_run,
        }));
        for path in &result.deleted {
            sink.emit(serde_json::json!({
                "event": "file_deleted",
                "path": path.display().to_string(),
            }));
        }
        for skipped in &result.skipped {
            sink.emit(serde_json::json!({
                "event": "file_skipped",
                "path": skipped.path.display().to_string(),
                "reason": skipped.reason.to_string(),
            }));
        }
        for failure in &result.errors {
            sink.emit(serde_json::json!({
                "event": "file_error",
                "path": failure.path.display().to_string(),
                "error": failure.error,
            }));
        }
        sink.emit(serde_json::json!({
            "event": "clean_complete",
            "deleted": result.deleted.len(),
            "skipped": result.skipped.len(),
            "errors": result.errors.len(),
        }));
    } else {
        let verb = if dry_run { "Would remove" } else { "Removed" };
        for path in &result.deleted {
            println!("{} {}", verb, path.display());
        }
        if verbose > 0 {
            for skipped in &result.skipped {
                println!("Kept {} ({})", skipped.path.display(), skipped.reason);
            }
        }
        for failure in &result.errors {
            eprintln!("Failed to remove {}: {}", failure.path.display(), failure.error);
        }
        if result.deleted.is_empty() && result.errors.is_empty() {
            println!("Nothing to clean.");
        }
    }

    if !result.is_success() {
        bail!("{} temporary path(s) could not be removed", result.errors.len());
    }
    Ok(())
}
