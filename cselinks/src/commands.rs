use crate::CLAP_STYLING;
use clap::{arg, command};
use cselinks_core::extract::{DEFAULT_DATA_DIR, DEFAULT_OUT_DIR};

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("cselinks")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("cselinks")
        .styles(CLAP_STYLING)
        .about(
            "Builds custom search engine annotations, promotions and a course mind map from \
            structured-authoring course XML.",
        )
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .arg(
            arg!(-v --"verbose" "Log every document, section and link as it is processed")
                .required(false),
        )
        .subcommand_required(false)
        .subcommand(
            command!("run")
                .about(
                    "Scan the course documents and write the annotations, mind map and \
                promotions files. This is the default when no subcommand is given.",
                )
                .arg(
                    arg!(-d --"data-dir" <PATH>)
                        .required(false)
                        .help("Directory containing the course XML documents")
                        .default_value(DEFAULT_DATA_DIR),
                )
                .arg(
                    arg!(-o --"out-dir" <PATH>)
                        .required(false)
                        .help("Directory the generated files are written to")
                        .default_value(DEFAULT_OUT_DIR),
                ),
        )
        .subcommand(
            command!("report")
                .about("Summarise the links and domains referenced by the course documents")
                .arg(
                    arg!(-d --"data-dir" <PATH>)
                        .required(false)
                        .help("Directory containing the course XML documents")
                        .default_value(DEFAULT_DATA_DIR),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format: text, json")
                        .value_parser(["text", "json"])
                        .default_value("text"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Save report to file (default: display to screen)")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                ),
        )
}
