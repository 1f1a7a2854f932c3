//! Core data models for pyzapp

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{PackError, PackResult};

/// Name the Python runtime executes when it is handed a zip archive
pub const MAIN_ENTRY: &str = "__main__.py";

/// Interpreter placed after `#!` unless the recipe overrides it
pub const DEFAULT_INTERPRETER: &str = "/usr/bin/env python3";

/// Prefix of per-build staging directories
pub const STAGING_PREFIX: &str = ".pyzapp-";

/// How archive entries are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    #[default]
    #[serde(alias = "deflate")]
    Deflated,
    #[serde(alias = "store", alias = "none")]
    Stored,
}

impl Compression {
    /// Canonical names
    pub const VALID_VALUES: &'static [&'static str] = &["deflated", "stored"];

    /// Alternative spellings accepted everywhere a compression is read
    pub const ALIASES: &'static [&'static str] = &["deflate", "store", "none"];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "deflated" | "deflate" => Some(Compression::Deflated),
            "stored" | "store" | "none" => Some(Compression::Stored),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Compression::Deflated => "deflated",
            Compression::Stored => "stored",
        }
    }
}

/// A single zip application to build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct App {
    /// Script run when the artifact executes
    pub entry: PathBuf,
    /// Helper modules stored next to `__main__.py`
    pub modules: Vec<PathBuf>,
    /// Final artifact path
    pub output: PathBuf,
    /// Interpreter command written after `#!`
    pub interpreter: String,
    pub compression: Compression,
}

impl App {
    /// App with the default interpreter, writing next to the entry point
    pub fn new(entry: impl Into<PathBuf>, modules: Vec<PathBuf>) -> Self {
        let entry = entry.into();
        let output = default_output_for(&entry);
        Self {
            entry,
            modules,
            output,
            interpreter: DEFAULT_INTERPRETER.to_string(),
            compression: Compression::default(),
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_interpreter(mut self, interpreter: impl Into<String>) -> Self {
        self.interpreter = interpreter.into();
        self
    }

    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Artifact file name, used to select apps on the command line
    pub fn name(&self) -> String {
        self.output
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// The first line of the artifact, newline included
    pub fn shebang(&self) -> Vec<u8> {
        format!("#!{}\n", self.interpreter.trim()).into_bytes()
    }

    /// Map every source file to the name it is stored under.
    ///
    /// The entry point always comes first as `__main__.py`; modules follow in
    /// recipe order under their base names.
    pub fn plan(&self) -> PackResult<Vec<PlannedEntry>> {
        let mut planned = Vec::with_capacity(self.modules.len() + 1);
        let mut seen = HashSet::new();

        seen.insert(MAIN_ENTRY.to_string());
        planned.push(PlannedEntry {
            name: MAIN_ENTRY.to_string(),
            source: self.entry.clone(),
        });

        for module in &self.modules {
            let name = module
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .ok_or_else(|| PackError::MissingSource {
                    path: module.clone(),
                })?;
            if !seen.insert(name.clone()) {
                return Err(PackError::DuplicateEntry { name });
            }
            planned.push(PlannedEntry {
                name,
                source: module.clone(),
            });
        }

        Ok(planned)
    }
}

/// Default artifact path: the entry point without its extension
pub fn default_output_for(entry: &Path) -> PathBuf {
    let stem = entry.with_extension("");
    if stem == entry {
        entry.with_extension("pyz")
    } else {
        stem
    }
}

/// Where a source file will land inside the archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedEntry {
    pub name: String,
    pub source: PathBuf,
}

/// A file stored in (or read back from) an archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: String,
    pub data: Vec<u8>,
}

impl ArchiveEntry {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}
