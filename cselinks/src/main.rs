use cselinks::handlers::{handle_report, handle_run, init_logging};
use colored::Colorize;
use commands::command_argument_builder;
use cselinks_core::print_banner;

mod commands;

fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");

    init_logging(chosen_command.get_flag("verbose"));

    // Show banner unless --quiet flag is set
    if !quiet {
        print_banner();
    }

    let result = match chosen_command.subcommand() {
        Some(("run", primary_command)) => handle_run(Some(primary_command), quiet),
        Some(("report", primary_command)) => handle_report(primary_command, quiet),
        // No subcommand runs the whole pipeline with the default directories
        None => handle_run(None, quiet),
        _ => unreachable!("clap should ensure we don't get here"),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "✗".red().bold(), e);
        std::process::exit(1);
    }
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
