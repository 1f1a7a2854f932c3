//! Build command handler

use std::path::Path;

use anyhow::{Context, Result};

use pyzapp::application::build::{BuildOptions, BuildReport, BuildUseCase};
use pyzapp::config::{select_apps, CliOverrides};
use pyzapp::domain::ports::BuildEventSink;
use pyzapp::infrastructure::{JsonEventSink, LocalFs, ZipArchiver};

use super::output::{format_size, TextEventSink};
use crate::cli::BuildArgs;

/// Execute the build command
pub fn cmd_build(args: &BuildArgs, config: Option<&Path>, json: bool, verbose: u8) -> Result<()> {
    let overrides = CliOverrides {
        entry: args.entry.clone(),
        modules: args.modules.clone(),
        output: args.output.clone(),
        interpreter: args.interpreter.clone(),
        compression: args.compression,
    };
    let apps = super::load_apps(config, &overrides, json)?;
    let apps = select_apps(apps, &args.apps)?;

    let use_case = BuildUseCase::new(LocalFs::new(), ZipArchiver::new());
    let options = BuildOptions::new().with_dry_run(args.dry_run);

    let json_sink;
    let text_sink;
    let sink: &dyn BuildEventSink = if json {
        json_sink = JsonEventSink::stdout();
        &json_sink
    } else {
        text_sink = TextEventSink::new(verbose);
        &text_sink
    };

    let mut reports = Vec::with_capacity(apps.len());
    for app in &apps {
        let report = use_case
            .execute(app, &options, sink)
            .with_context(|| format!("building {}", app.name()))?;
        if report.dry_run && !json {
            print_plan(&report);
        }
        reports.push(report);
    }

    if json {
        JsonEventSink::stdout().emit(serde_json::json!({
            "event": "complete",
            "command": "build",
            "status": "success",
            "built": reports.iter().filter(|r| !r.dry_run).count(),
            "dry_run": args.dry_run,
            "artifacts": reports
                .iter()
                .map(|r| r.output.display().to_string())
                .collect::<Vec<_>>(),
        }));
    }

    Ok(())
}

fn print_plan(report: &BuildReport) {
    println!(
        "Would build {} -> {} ({} from {} files)",
        report.app,
        report.output.display(),
        format_size(report.source_bytes()),
        report.entries.len()
    );
    for entry in &report.entries {
        println!(
            "  + {:<24} {:>10}  {}",
            entry.name,
            format_size(entry.size),
            entry.source.display()
        );
    }
}
