use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Translate a POSIX shell script into Python 3 on standard output.
#[derive(Parser)]
#[command(name = "sh2py", version, about, long_about = None)]
struct Cli {
    /// Shell script to translate
    script: PathBuf,

    /// Log more to stderr (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let source = fs::read_to_string(&cli.script)
        .with_context(|| format!("failed to read {}", cli.script.display()))?;
    info!(path = %cli.script.display(), lines = source.lines().count(), "translating");

    let translation = sh2py::translate(source.lines())
        .with_context(|| format!("failed to translate {}", cli.script.display()))?;

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(translation.render().as_bytes())
        .context("failed to write output")?;
    stdout.flush().context("failed to write output")?;
    Ok(())
}
