//! Configuration module for pyzapp
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (PYZAPP_*)
//! 3. Project recipe (pyzapp.toml)
//! 4. Built-in defaults (lowest priority)

mod env_validator;
mod loader;
mod types;

pub use crate::domain::value_objects::ConfigWarning;
pub use env_validator::{levenshtein, EnvVarValidator};
pub use loader::{
    discover, load_with_warnings, with_env_overrides, with_env_overrides_from, LoadedConfig,
    RECIPE_FILE,
};
pub use types::{
    select_apps, AppConfig, BuildConfig, CliOverrides, Config, DEFAULT_ENTRY, DEFAULT_MODULES,
};
