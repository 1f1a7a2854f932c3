//! pyzapp CLI
//!
//! Usage: pyzapp [COMMAND]
//!
//! Commands:
//!   build    Package apps into executable zip applications (default)
//!   clean    Remove build intermediates
//!   inspect  Show the layout of an existing artifact

mod cli;
mod commands;

use clap::Parser;

use crate::cli::{BuildArgs, Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    let outcome = match cli.command {
        None => commands::build::cmd_build(
            &BuildArgs::default(),
            cli.config.as_deref(),
            json,
            cli.verbose,
        ),
        Some(Commands::Build(ref args)) => {
            commands::build::cmd_build(args, cli.config.as_deref(), json, cli.verbose)
        }
        Some(Commands::Clean { dry_run }) => {
            commands::clean::cmd_clean(dry_run, cli.config.as_deref(), json, cli.verbose)
        }
        Some(Commands::Inspect { ref artifact }) => {
            commands::inspect::cmd_inspect(artifact, json, cli.verbose)
        }
    };

    if let Err(err) = outcome {
        commands::output::report_error(&err, json);
        std::process::exit(1);
    }
}
