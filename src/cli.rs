use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use pyzapp::Compression;

/// pyzapp - package Python scripts into self-executing zip applications
#[derive(Parser, Debug)]
#[command(name = "pyzapp")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Run 'pyzapp' without arguments to build every app in pyzapp.toml.")]
pub struct Cli {
    /// Output NDJSON events for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Recipe file (default: ./pyzapp.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Package apps into executable zip applications (default)
    Build(BuildArgs),

    /// Remove build intermediates; artifacts are kept
    Clean {
        /// Show what would be removed
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the layout of an existing artifact
    Inspect {
        /// Artifact to read
        artifact: PathBuf,
    },
}

#[derive(Args, Debug, Default)]
pub struct BuildArgs {
    /// Apps to build, by artifact name (default: all)
    #[arg(conflicts_with = "entry")]
    pub apps: Vec<String>,

    /// Entry point script; builds a single app instead of the recipe's apps
    #[arg(short, long, value_name = "FILE")]
    pub entry: Option<PathBuf>,

    /// Helper module to bundle (repeatable)
    #[arg(short = 'm', long = "module", value_name = "FILE", requires = "entry")]
    pub modules: Vec<PathBuf>,

    /// Artifact path (default: entry point without extension)
    #[arg(short, long, value_name = "FILE", requires = "entry")]
    pub output: Option<PathBuf>,

    /// Interpreter command for the #! line
    #[arg(long, value_name = "CMD")]
    pub interpreter: Option<String>,

    /// Archive compression: deflated or stored
    #[arg(long, value_parser = parse_compression)]
    pub compression: Option<Compression>,

    /// Validate and show the plan without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

fn parse_compression(value: &str) -> Result<Compression, String> {
    Compression::parse(value).ok_or_else(|| {
        format!(
            "invalid compression '{}' (expected one of: {}; aliases: {})",
            value,
            Compression::VALID_VALUES.join(", "),
            Compression::ALIASES.join(", ")
        )
    })
}
