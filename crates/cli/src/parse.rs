//! ArgMatches → CliAction conversion.

use std::path::PathBuf;

use clap::ArgMatches;
use reckon_core::{Error, Result, Value};
use reckon_trace::Inputs;

use crate::config::{OutputFormat, CONFIG_FILE_NAME};
use crate::value::parse_datum;

/// Where a trace document is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Standard input (`-`)
    Stdin,
    /// A file on disk
    File(PathBuf),
}

impl Source {
    fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            Source::Stdin
        } else {
            Source::File(PathBuf::from(arg))
        }
    }
}

/// The result of parsing command-line arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum CliAction {
    /// Render a document; `format: None` defers to the config file.
    Render {
        source: Source,
        format: Option<OutputFormat>,
        compact: bool,
    },
    /// Derive an identifier.
    DeriveId { name: String, inputs: Inputs },
    /// Recompute and compare a document's identifier.
    Verify { source: Source },
    /// Write the default config file.
    InitConfig { path: PathBuf },
}

/// Convert clap matches into a `CliAction`.
pub fn matches_to_action(matches: &ArgMatches) -> Result<CliAction> {
    match matches.subcommand() {
        Some(("render", sub)) => {
            let format = if sub.get_flag("json") {
                Some(OutputFormat::Json)
            } else if sub.get_flag("text") {
                Some(OutputFormat::Text)
            } else {
                None
            };
            Ok(CliAction::Render {
                source: Source::from_arg(required(sub, "file")?),
                format,
                compact: sub.get_flag("compact"),
            })
        }
        Some(("id", sub)) => {
            let name = required(sub, "name")?.to_string();
            let inputs = sub
                .get_many::<String>("inputs")
                .into_iter()
                .flatten()
                .map(|pair| parse_pair(pair))
                .collect::<Result<Inputs>>()?;
            Ok(CliAction::DeriveId { name, inputs })
        }
        Some(("verify", sub)) => Ok(CliAction::Verify {
            source: Source::from_arg(required(sub, "file")?),
        }),
        Some(("init-config", sub)) => Ok(CliAction::InitConfig {
            path: sub
                .get_one::<String>("path")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME)),
        }),
        Some((other, _)) => Err(Error::invalid_input(format!("Unknown command '{}'", other))),
        None => Err(Error::invalid_input("No command given")),
    }
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str> {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .ok_or_else(|| Error::invalid_input(format!("Missing argument '{}'", name)))
}

/// Split `KEY=VALUE` at the first `=` and auto-detect the value.
fn parse_pair(pair: &str) -> Result<(String, Value)> {
    match pair.split_once('=') {
        Some((key, _)) if key.is_empty() => Err(Error::invalid_input(format!(
            "Input '{}' has an empty key",
            pair
        ))),
        Some((key, raw)) => Ok((key.to_string(), Value::wrap(parse_datum(raw)))),
        None => Err(Error::invalid_input(format!(
            "Input '{}' is not KEY=VALUE",
            pair
        ))),
    }
}
