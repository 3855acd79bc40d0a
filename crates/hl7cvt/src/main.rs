//! hl7cvt
//!
//! Thin command line front end for the conversion engine: reads one ER7
//! message from a file or stdin, converts it to XML or JSON, and writes the
//! result to stdout. All parsing and rendering lives in `hl7cvt-er7` and
//! `hl7cvt-serde`; this binary only maps flags, I/O, and exit codes.

use anyhow::Context;
use clap::Parser;
use hl7cvt_er7::ParseMode;
use hl7cvt_serde::{OutputFormat, convert_with_mode};
use std::io::Read;
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, Parser)]
#[command(name = "hl7cvt", version)]
#[command(about = "Convert HL7 v2 ER7 messages to XML or JSON")]
struct Cli {
    /// Output as XML (the default when no format flag is given).
    #[arg(long, conflicts_with = "json")]
    xml: bool,

    /// Output as JSON.
    #[arg(long)]
    json: bool,

    /// HL7 file to be converted; reads stdin when omitted.
    #[arg(long)]
    file: Option<PathBuf>,

    /// Abort on malformed segments instead of skipping them with a warning.
    #[arg(long, env = "HL7CVT_STRICT")]
    strict: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "HL7CVT_LOG_LEVEL", default_value = "warn")]
    log_level: String,
}

/// Logs go to stderr so stdout carries only the converted document.
fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("hl7cvt={}", level)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn read_input(file: Option<&PathBuf>) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("error reading message from file {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("error reading message from stdin")?;
            Ok(buffer)
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Xml
    };
    let mode = if cli.strict {
        ParseMode::Strict
    } else {
        ParseMode::Lenient
    };

    let message = read_input(cli.file.as_ref())?;
    let conversion = convert_with_mode(&message, format, mode)
        .map_err(|e| anyhow::anyhow!("conversion failed: {}", e))?;

    for warning in conversion.warnings() {
        warn!(%warning, "recovered while parsing");
    }

    println!("{}", conversion.output);
    Ok(())
}
