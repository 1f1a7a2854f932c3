//! Command handlers

pub mod build;
pub mod clean;
pub mod inspect;
pub mod output;

use std::path::Path;

use anyhow::{Context, Result};
use pyzapp::config::{self, CliOverrides};
use pyzapp::infrastructure::JsonEventSink;
use pyzapp::App;

/// Resolve the apps to work on: recipe, then env, then CLI flags.
pub fn load_apps(
    explicit_config: Option<&Path>,
    cli: &CliOverrides,
    json: bool,
) -> Result<Vec<App>> {
    let loaded = config::discover(Path::new("."), explicit_config).context("loading recipe")?;

    if json {
        let sink = JsonEventSink::stdout();
        for warning in &loaded.warnings {
            sink.emit(serde_json::json!({
                "event": "warning",
                "key": warning.key,
                "file": warning.file.display().to_string(),
                "line": warning.line,
                "suggestion": warning.suggestion,
            }));
        }
    } else {
        output::print_warnings(&loaded.warnings);
    }

    let config = config::with_env_overrides(loaded.config).with_cli_overrides(cli);
    Ok(config.resolve_apps(&loaded.base_dir))
}
