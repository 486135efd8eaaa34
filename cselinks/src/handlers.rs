use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;
use cselinks_core::extract::{
    ArtifactPaths, DEFAULT_DATA_DIR, DEFAULT_OUT_DIR, ExtractProgressCallback, ExtractSummary,
};
use cselinks_core::report::{ReportData, ReportFormat, generate_report, save_report};
use cselinks_core::{ExtractOptions, ExtractOutput, execute_extract};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::Level;

/// Install the stderr log subscriber. Warnings only unless `verbose`.
pub fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Expand a leading `~` in a directory argument.
/// Environment variables are left as written.
pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

/// Extraction options for the documents in `data_dir`.
pub fn build_options(data_dir: &str) -> ExtractOptions {
    ExtractOptions::new(expand_path(data_dir))
}

fn print_divider() {
    println!("{}", "═".repeat(60).bright_blue().bold());
}

/// Run the extraction, with a spinner unless `quiet`.
pub fn run_extract(options: &ExtractOptions, quiet: bool) -> Result<ExtractOutput> {
    let spinner = if quiet {
        None
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .context("invalid spinner template")?,
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message(format!("Loading {}", options.data_dir.display()));
        Some(pb)
    };

    let progress_callback: Option<ExtractProgressCallback> = spinner.clone().map(|pb| {
        let cb: ExtractProgressCallback = Arc::new(move |msg: String| pb.set_message(msg));
        cb
    });

    let result = execute_extract(options, progress_callback);

    if let Some(pb) = spinner {
        match result {
            Ok(ref output) => pb.finish_with_message(format!(
                "Scanned {} documents",
                output.pages.len()
            )),
            Err(_) => pb.finish_and_clear(),
        }
    }

    result.with_context(|| format!("extraction from {} failed", options.data_dir.display()))
}

pub fn print_summary(summary: &ExtractSummary, paths: &ArtifactPaths) {
    println!();
    print_divider();
    println!("{}", "  EXTRACTION COMPLETE".green().bold());
    print_divider();
    println!();
    println!(
        "{} Documents:    {}",
        "→".blue(),
        summary.documents.to_string().cyan()
    );
    println!(
        "{} Links:        {} unique ({} anchors)",
        "→".blue(),
        summary.unique_links.to_string().cyan(),
        summary.total_anchors.to_string().cyan()
    );
    println!(
        "{} Domains:      {}",
        "→".blue(),
        summary.domains.to_string().cyan()
    );
    println!();
    println!(
        "{} Annotations: {} ({} entries)",
        "✓".green().bold(),
        paths.annotations.display().to_string().bright_white(),
        summary.annotations.to_string().cyan()
    );
    println!(
        "{} Mind map:    {} ({} nodes)",
        "✓".green().bold(),
        paths.outline.display().to_string().bright_white(),
        summary.outline_nodes.to_string().cyan()
    );
    println!(
        "{} Promotions:  {} ({} entries)",
        "✓".green().bold(),
        paths.promotions.display().to_string().bright_white(),
        summary.promotions.to_string().cyan()
    );
    println!();
}

fn string_arg<'a>(args: Option<&'a ArgMatches>, name: &str, default: &'a str) -> &'a str {
    args.and_then(|a| a.get_one::<String>(name))
        .map(String::as_str)
        .unwrap_or(default)
}

/// `run`, also used when no subcommand is given (`args` is `None`).
pub fn handle_run(args: Option<&ArgMatches>, quiet: bool) -> Result<()> {
    let data_dir = string_arg(args, "data-dir", DEFAULT_DATA_DIR);
    let out_dir = expand_path(string_arg(args, "out-dir", DEFAULT_OUT_DIR));
    let options = build_options(data_dir);

    let output = run_extract(&options, quiet)?;
    let paths = output
        .write_artifacts(&out_dir)
        .with_context(|| format!("failed to write output to {}", out_dir.display()))?;

    if !quiet {
        print_summary(&output.summary(), &paths);
    }
    Ok(())
}

pub fn handle_report(args: &ArgMatches, quiet: bool) -> Result<()> {
    let data_dir = string_arg(Some(args), "data-dir", DEFAULT_DATA_DIR);
    let format_str = string_arg(Some(args), "format", "text");
    let format = ReportFormat::from_str(format_str)
        .with_context(|| format!("unknown report format '{}'", format_str))?;
    let output_path = args.get_one::<PathBuf>("output");

    let options = build_options(data_dir);
    let output = run_extract(&options, quiet)?;
    let data = ReportData::from_output(&output);
    let report = generate_report(&data, &format).context("failed to render report")?;

    match output_path {
        Some(path) => {
            save_report(&report, path)
                .with_context(|| format!("failed to save report to {}", path.display()))?;
            if !quiet {
                println!(
                    "{} Report saved: {}",
                    "✓".green().bold(),
                    path.display().to_string().bright_white()
                );
            }
        }
        None => print!("{}", report),
    }
    Ok(())
}
