//! Reckon CLI — render, identify and verify computation traces.
//!
//! Subcommands:
//! - `reckon render <FILE>`: print a serialized trace as text or JSON
//! - `reckon id <NAME> [KEY=VALUE ...]`: derive a trace identifier
//! - `reckon verify <FILE>`: recompute and compare a document's identifier
//! - `reckon init-config [PATH]`: write the default `reckon.toml`

mod commands;
mod config;
mod parse;
mod value;

use std::io::{self, Read, Write};
use std::path::Path;
use std::process;

use anyhow::Context;
use clap::ArgMatches;
use reckon_trace::{derive_id, render, Trace};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use commands::build_cli;
use config::{OutputFormat, RenderConfig};
use parse::{matches_to_action, CliAction, Source};

fn main() {
    let matches = build_cli().get_matches();

    let config_path = global_arg(&matches, "config");
    let config = match RenderConfig::load(config_path.as_deref().map(Path::new)) {
        Ok(config) => config,
        Err(e) => {
            let path = config_path.as_deref().unwrap_or(config::CONFIG_FILE_NAME);
            eprintln!("(error) config '{}': {}", path, e);
            process::exit(2);
        }
    };

    let level = global_arg(&matches, "log-level").unwrap_or_else(|| config.log_level.clone());
    init_logging(&level);

    let code = match run(&matches, &config, &mut io::stdout().lock()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("(error) {:#}", e);
            2
        }
    };
    process::exit(code);
}

/// Install the stderr fmt subscriber; `RUST_LOG` wins over `level`.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Global args may be given before or after the subcommand.
fn global_arg(matches: &ArgMatches, name: &str) -> Option<String> {
    matches
        .subcommand()
        .and_then(|(_, sub)| sub.get_one::<String>(name))
        .or_else(|| matches.get_one::<String>(name))
        .cloned()
}

/// Execute the parsed command, writing results to `out`.
///
/// Returns the process exit code: 0 on success, 1 when `verify` finds a
/// mismatch.
fn run(matches: &ArgMatches, config: &RenderConfig, out: &mut impl Write) -> anyhow::Result<i32> {
    let action = matches_to_action(matches)?;
    debug!(?action, "dispatching");
    execute(action, config, out)
}

fn execute(action: CliAction, config: &RenderConfig, out: &mut impl Write) -> anyhow::Result<i32> {
    match action {
        CliAction::Render {
            source,
            format,
            compact,
        } => {
            let trace = read_trace(&source)?;
            let format = match format {
                Some(format) => format,
                None => config.output_format()?,
            };
            match format {
                OutputFormat::Text => write!(out, "{}", render::text(&trace))?,
                OutputFormat::Json if compact || !config.pretty => {
                    writeln!(out, "{}", render::json_compact(&trace)?)?
                }
                OutputFormat::Json => writeln!(out, "{}", render::json(&trace)?)?,
            }
            Ok(0)
        }
        CliAction::DeriveId { name, inputs } => {
            writeln!(out, "{}", derive_id(&name, &inputs))?;
            Ok(0)
        }
        CliAction::Verify { source } => {
            let trace = read_trace(&source)?;
            if trace.verify_id() {
                writeln!(out, "ok {}", trace.id())?;
                Ok(0)
            } else {
                writeln!(
                    out,
                    "mismatch: stored {} but name and inputs derive {}",
                    trace.id(),
                    derive_id(trace.name(), trace.inputs())
                )?;
                Ok(1)
            }
        }
        CliAction::InitConfig { path } => {
            if RenderConfig::write_default_if_missing(&path)? {
                info!(path = %path.display(), "wrote default config");
                writeln!(out, "created {}", path.display())?;
            } else {
                writeln!(out, "{} already exists", path.display())?;
            }
            Ok(0)
        }
    }
}

fn read_trace(source: &Source) -> anyhow::Result<Trace> {
    let content = match source {
        Source::Stdin => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read trace from stdin")?;
            buf
        }
        Source::File(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read trace file '{}'", path.display()))?,
    };
    let trace = Trace::from_json(&content).context("Not a valid trace document")?;
    debug!(trace_id = trace.id(), steps = trace.steps().len(), "trace loaded");
    Ok(trace)
}
