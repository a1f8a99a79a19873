//! CLI entry point.
//!
//! # Responsibility
//! - Load a catalog document and run the generation pipeline once.
//! - Print the declaration set as JSON on stdout; diagnostics go to stderr.

mod document;

use clap::Parser;
use document::{load_document, CliError};
use log::{info, warn};
use opsynth_core::{
    default_log_level, generate, init_logging, LoggingConfig, Provenance, TypeRef,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "opsynth")]
#[command(about = "Normalize a service contract into sync/async operation declarations")]
#[command(version)]
struct Args {
    /// Catalog document (JSON)
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Interface to generate for; overrides the document `target`
    #[arg(short, long, value_name = "TYPE")]
    interface: Option<String>,

    /// Emit declarations without annotations
    #[arg(long)]
    no_annotations: bool,

    /// Emit synchronous declarations only
    #[arg(long)]
    exclude_async: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, default_value = default_log_level())]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(err) = init_logging(&LoggingConfig::stderr(args.log_level.as_str())) {
        eprintln!("warning: logging disabled: {err}");
    }

    match run(&args) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<String, CliError> {
    let document = load_document(&args.input)?;
    let (catalog, document_target, settings) = document.into_catalog()?;

    let target = match &args.interface {
        Some(raw) => raw.parse::<TypeRef>()?,
        None => document_target.ok_or_else(|| CliError::MissingTarget {
            available: catalog.interface_names(),
        })?,
    };

    let mut options = settings.options;
    if args.no_annotations {
        options.include_annotations = false;
    }
    if args.exclude_async {
        options.exclude_asynchronous_declarations = true;
    }
    if !options.include_source_synchronous_declarations {
        warn!("event=cli_options module=cli status=ignored option=include_source_synchronous_declarations");
    }

    let provenance = Provenance::new(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    let contract = generate(&catalog, &target, &settings.well_known, options, provenance)?;
    info!(
        "event=cli_generate module=cli status=ok interface={} declarations={}",
        target,
        contract.declarations.len()
    );

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&contract)
    } else {
        serde_json::to_string(&contract)
    };
    rendered.map_err(|err| CliError::Output(err.to_string()))
}
