//! Recipe type definitions

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{PackError, PackResult};
use crate::models::{default_output_for, App, Compression, DEFAULT_INTERPRETER};


/// Entry point built when the recipe names no apps
pub const DEFAULT_ENTRY: &str = "kawpowstats.py";

/// Helper modules of the default app
pub const DEFAULT_MODULES: &[&str] = &["MinerAPI.py"];

/// `[build]` section: settings shared by every app
#[derive(Debug, Clone, Deserialize)]
pub struct BuildConfig {
    #[serde(default = "default_interpreter")]
    pub interpreter: String,

    #[serde(default)]
    pub compression: Compression,

    /// Directory artifacts are written to, relative to the recipe
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            interpreter: default_interpreter(),
            compression: Compression::default(),
            output_dir: default_output_dir(),
        }
    }
}

fn default_interpreter() -> String {
    DEFAULT_INTERPRETER.to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

/// One `[[app]]` table
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppConfig {
    pub entry: PathBuf,

    #[serde(default)]
    pub modules: Vec<PathBuf>,

    /// Artifact path; defaults to the entry stem inside `output_dir`
    #[serde(default)]
    pub output: Option<PathBuf>,

    #[serde(default)]
    pub interpreter: Option<String>,

    #[serde(default)]
    pub compression: Option<Compression>,
}

impl AppConfig {
    pub fn new(entry: impl Into<PathBuf>, modules: Vec<PathBuf>) -> Self {
        Self {
            entry: entry.into(),
            modules,
            output: None,
            interpreter: None,
            compression: None,
        }
    }
}

/// Main recipe structure (`pyzapp.toml`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default, rename = "app")]
    pub apps: Vec<AppConfig>,
}

/// Values given on the command line; they beat every other layer
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub entry: Option<PathBuf>,
    pub modules: Vec<PathBuf>,
    pub output: Option<PathBuf>,
    pub interpreter: Option<String>,
    pub compression: Option<Compression>,
}

impl Config {
    /// Apply CLI flags.
    ///
    /// `--entry` replaces the recipe's apps with a single ad-hoc app.
    /// Interpreter and compression flags also override per-app settings.
    pub fn with_cli_overrides(mut self, cli: &CliOverrides) -> Self {
        if let Some(entry) = &cli.entry {
            let mut app = AppConfig::new(entry.clone(), cli.modules.clone());
            app.output = cli.output.clone();
            self.apps = vec![app];
        }
        if let Some(interpreter) = &cli.interpreter {
            self.build.interpreter = interpreter.clone();
            for app in &mut self.apps {
                app.interpreter = None;
            }
        }
        if let Some(compression) = cli.compression {
            self.build.compression = compression;
            for app in &mut self.apps {
                app.compression = None;
            }
        }
        self
    }

    /// Turn the recipe into buildable apps.
    ///
    /// Relative paths resolve against `base` (the recipe's directory).
    pub fn resolve_apps(&self, base: &Path) -> Vec<App> {
        let default_app;
        let apps: &[AppConfig] = if self.apps.is_empty() {
            default_app = [AppConfig::new(
                DEFAULT_ENTRY,
                DEFAULT_MODULES.iter().map(PathBuf::from).collect(),
            )];
            &default_app
        } else {
            &self.apps
        };

        let out_dir = resolve(base, &self.build.output_dir);

        apps.iter()
            .map(|cfg| {
                let entry = resolve(base, &cfg.entry);
                let output = match &cfg.output {
                    Some(output) => resolve(base, output),
                    None => {
                        let file_name = cfg
                            .entry
                            .file_name()
                            .map(Path::new)
                            .unwrap_or(cfg.entry.as_path());
                        resolve(&out_dir, &default_output_for(file_name))
                    }
                };
                App {
                    entry,
                    modules: cfg.modules.iter().map(|m| resolve(base, m)).collect(),
                    output,
                    interpreter: cfg
                        .interpreter
                        .clone()
                        .unwrap_or_else(|| self.build.interpreter.clone()),
                    compression: cfg.compression.unwrap_or(self.build.compression),
                }
            })
            .collect()
    }
}

/// Keep only the apps named on the command line (all when `names` is empty)
pub fn select_apps(apps: Vec<App>, names: &[String]) -> PackResult<Vec<App>> {
    if names.is_empty() {
        return Ok(apps);
    }

    for name in names {
        if !apps.iter().any(|app| &app.name() == name) {
            let available = apps.iter().map(App::name).collect::<Vec<_>>().join(", ");
            return Err(PackError::UnknownApp {
                name: name.clone(),
                available,
            });
        }
    }

    Ok(apps
        .into_iter()
        .filter(|app| names.contains(&app.name()))
        .collect())
}

/// Join `path` onto `base` unless it is absolute or `base` is the current dir
fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() || base.as_os_str().is_empty() || base == Path::new(".") {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
