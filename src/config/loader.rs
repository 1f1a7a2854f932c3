//! Recipe loading

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::ConfigWarning;
use crate::error::{IoStep, PackError, PackResult, Step};
use crate::models::Compression;

use super::env_validator::{levenshtein, EnvVarValidator};
use super::types::Config;

/// Recipe file looked up in the working directory
pub const RECIPE_FILE: &str = "pyzapp.toml";

/// A recipe together with where it came from
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub warnings: Vec<ConfigWarning>,
    /// Recipe file, or `None` when built-in defaults are used
    pub source: Option<PathBuf>,
    /// Directory relative paths resolve against
    pub base_dir: PathBuf,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> PackResult<(Config, Vec<ConfigWarning>)> {
    let content = std::fs::read_to_string(path).at_step(Step::ReadConfig, path)?;
    parse_with_warnings(&content, path)
}

fn parse_with_warnings(content: &str, path: &Path) -> PackResult<(Config, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| PackError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|key| {
            let leaf = key.rsplit('.').next().unwrap_or(key.as_str()).to_string();
            ConfigWarning {
                line: find_line_number(content, &leaf),
                suggestion: suggest_key(&leaf),
                file: path.to_path_buf(),
                key,
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Find and load the recipe.
///
/// An explicit path must exist. Otherwise `pyzapp.toml` in `root` is used if
/// present, and built-in defaults if not.
pub fn discover(root: &Path, explicit: Option<&Path>) -> PackResult<LoadedConfig> {
    let path = match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(PackError::InvalidConfig {
                    file: path.to_path_buf(),
                    message: "file not found".to_string(),
                });
            }
            Some(path.to_path_buf())
        }
        None => Some(root.join(RECIPE_FILE)).filter(|p| p.is_file()),
    };

    match path {
        Some(path) => {
            let (config, warnings) = load_with_warnings(&path)?;
            let base_dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            Ok(LoadedConfig {
                config,
                warnings,
                source: Some(path),
                base_dir,
            })
        }
        None => Ok(LoadedConfig {
            config: Config::default(),
            warnings: Vec::new(),
            source: None,
            base_dir: root.to_path_buf(),
        }),
    }
}

/// Apply environment variable overrides (PYZAPP_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    with_env_overrides_from(config, |key| std::env::var(key).ok(), &mut std::io::stderr())
}

/// Same as `with_env_overrides` with an injectable environment (for testing)
pub fn with_env_overrides_from<F, W>(mut config: Config, lookup: F, warnings: &mut W) -> Config
where
    F: Fn(&str) -> Option<String>,
    W: Write,
{
    // PYZAPP_INTERPRETER
    if let Some(interpreter) = lookup("PYZAPP_INTERPRETER") {
        if interpreter.trim().is_empty() {
            let _ = writeln!(warnings, "Warning: PYZAPP_INTERPRETER is empty, ignoring");
        } else {
            config.build.interpreter = interpreter.trim().to_string();
            for app in &mut config.apps {
                app.interpreter = None;
            }
        }
    }

    // PYZAPP_COMPRESSION
    if let Some(value) = lookup("PYZAPP_COMPRESSION") {
        let validator = EnvVarValidator::new("PYZAPP_COMPRESSION", Compression::VALID_VALUES)
            .with_aliases(Compression::ALIASES);
        let parsed =
            validator.parse_with_writer(&value, |v| Compression::parse(v).map(Some), None, warnings);
        if let Some(compression) = parsed {
            config.build.compression = compression;
            for app in &mut config.apps {
                app.compression = None;
            }
        }
    }

    // PYZAPP_OUTPUT_DIR
    if let Some(dir) = lookup("PYZAPP_OUTPUT_DIR") {
        if !dir.trim().is_empty() {
            config.build.output_dir = PathBuf::from(dir.trim());
        }
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.trim_start().starts_with(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "build",
        "interpreter",
        "compression",
        "output_dir",
        "app",
        "entry",
        "modules",
        "output",
    ];

    let mut best: Option<(&str, usize)> = None;
    for &candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

#[cfg(test)]
pub(super) fn parse_for_test(content: &str) -> PackResult<(Config, Vec<ConfigWarning>)> {
    parse_with_warnings(content, Path::new(RECIPE_FILE))
}
