//! Clap command tree definition.

use clap::{Arg, ArgAction, Command};

/// Build the complete CLI command tree.
pub fn build_cli() -> Command {
    Command::new("reckon")
        .about("Render, identify and verify deterministic computation traces")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .help("Config file (default: ./reckon.toml if present)")
                .global(true),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .help("Log level when RUST_LOG is unset (overrides config)")
                .global(true),
        )
        .subcommand(
            Command::new("render")
                .about("Render a serialized trace as text or JSON")
                .arg(
                    Arg::new("file")
                        .required(true)
                        .help("Trace document, or - for stdin"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Render the JSON document")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("text"),
                )
                .arg(
                    Arg::new("text")
                        .long("text")
                        .help("Render the text form")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("compact")
                        .long("compact")
                        .help("Single-line JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("id")
                .about("Derive the identifier for a name and inputs")
                .arg(Arg::new("name").required(true).help("Computation name"))
                .arg(
                    Arg::new("inputs")
                        .num_args(0..)
                        .action(ArgAction::Append)
                        .help("Inputs as KEY=VALUE (values are auto-detected)"),
                ),
        )
        .subcommand(
            Command::new("verify")
                .about("Check that a document's id matches its name and inputs")
                .arg(
                    Arg::new("file")
                        .required(true)
                        .help("Trace document, or - for stdin"),
                ),
        )
        .subcommand(
            Command::new("init-config")
                .about("Write a commented default config file")
                .arg(Arg::new("path").help("Destination (default: ./reckon.toml)")),
        )
}
