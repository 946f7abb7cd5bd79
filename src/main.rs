mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::Path;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use magic_image::operations::{self, Outcome, ViewMode};
use magic_image::types::format_label;
use magic_image::{AnalysisReport, ScanOptions, detect_format, io};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = cli.scan.options();
    debug!(?options, "starting");

    let success = match cli.command {
        Commands::Create {
            first,
            second,
            output,
        } => run_create(&first, &second, &output),
        Commands::View {
            magic,
            normal: _,
            input,
            output,
        } => {
            let mode = if magic { ViewMode::Magic } else { ViewMode::Normal };
            run_view(&input, output.as_deref(), mode, &options)
        }
        Commands::Analyze { json, input } => run_analyze(&input, json, &options)?,
        Commands::Detect { inputs } => run_detect(&inputs),
    };

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run_create(first: &Path, second: &Path, output: &Path) -> bool {
    let outcome = operations::create_magic_image(first, second, output);
    report_outcome(&outcome);

    if let Some(layout) = &outcome.layout {
        println!("Total size:   {} bytes", layout.total_size());
        println!(
            "First image:  {} bytes 0 - {} ({})",
            layout.first.len(),
            layout.first.end - 1,
            format_label(layout.first_format)
        );
        println!(
            "Second image: {} bytes {} - {} ({})",
            layout.second.len(),
            layout.second.start,
            layout.second.end - 1,
            format_label(layout.second_format)
        );
        if layout.has_unknown_format() {
            println!(
                "{}",
                style("Warning: unknown image format detected, output was written anyway").yellow()
            );
        }
        println!();
        println!("Ordinary viewers show the first image.");
        println!("Use `magic-image view --magic` to recover the second one.");
    }
    outcome.success
}

fn run_view(input: &Path, output: Option<&Path>, mode: ViewMode, options: &ScanOptions) -> bool {
    let outcome = operations::view(input, output, mode, options);
    report_outcome(&outcome);
    outcome.success
}

fn run_analyze(input: &Path, json: bool, options: &ScanOptions) -> Result<bool> {
    let outcome = operations::analyze_file(input, options);
    let Some(report) = &outcome.report else {
        report_outcome(&outcome);
        return Ok(false);
    };

    if json {
        let rendered =
            serde_json::to_string_pretty(report).context("Failed to serialize analysis report")?;
        println!("{}", rendered);
    } else {
        print_report(report);
    }
    Ok(true)
}

fn print_report(report: &AnalysisReport) {
    println!("Total size: {} bytes", report.total_size);
    println!();

    for seg in &report.segments {
        println!("{}", style(format!("Image {}:", seg.index)).cyan().bold());
        println!("  Format: {}", seg.format);
        println!("  Start:  {}", seg.start);
        println!("  End:    {}", seg.end);
        println!("  Size:   {} bytes", seg.size);
        println!("  SHA256: {}", seg.sha256);
        println!();
    }

    if report.truncated {
        println!(
            "{}",
            style(format!(
                "Stopped after {} images; more signatures follow",
                report.segments.len()
            ))
            .yellow()
        );
    }

    let summary = report.classification.to_string();
    if report.is_magic_image {
        println!("{}", style(summary).green().bold());
    } else {
        println!("{}", summary);
    }
}

fn run_detect(inputs: &[std::path::PathBuf]) -> bool {
    let mut all_ok = true;
    for input in inputs {
        match io::read_whole_file(input) {
            Ok(data) => println!("{}: {}", input.display(), format_label(detect_format(&data))),
            Err(err) => {
                eprintln!("{} {}: {}", style("error:").red(), input.display(), err);
                all_ok = false;
            }
        }
    }
    all_ok
}

fn report_outcome(outcome: &Outcome) {
    if outcome.success {
        println!("{}", style(&outcome.message).green());
    } else {
        eprintln!("{} {}", style("error:").red().bold(), outcome.message);
    }
}
