pub mod cli;
pub mod model;
pub mod processor;
pub mod writer;

pub use processor::{ESCAPE, PreprocessError, preprocess, run_stream};

use anyhow::{Context, bail};
use clap::Parser;
use log::info;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

pub fn run() -> anyhow::Result<()> {
    let args = cli::Cli::parse();
    init_logger(args.log_filter());
    run_with(&args)
}

/// Sets up `env_logger` on stderr; `RUST_LOG` overrides `default_filter`.
pub fn init_logger(default_filter: &str) {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stderr)
        .format_timestamp(None)
        .try_init();
}

pub fn run_with(args: &cli::Cli) -> anyhow::Result<()> {
    // 1. ── Open streams ───────────────────────────────────────────────
    if let Some(input) = args.input_path() {
        let targets = [args.output_path(), args.dump_vars.as_deref()];
        if let Some(target) = targets.into_iter().flatten().find(|t| same_file(input, t)) {
            bail!(
                "{} would overwrite the input {}",
                target.display(),
                input.display()
            );
        }
    }

    let input_name = args
        .input_path()
        .map_or_else(|| "<stdin>".to_string(), |p| p.display().to_string());

    let input: Box<dyn Read> = match args.input_path() {
        Some(path) => Box::new(
            File::open(path).with_context(|| format!("Opening {}", path.display()))?,
        ),
        None => Box::new(io::stdin().lock()),
    };
    let output: Box<dyn Write> = match args.output_path() {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("Creating {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };

    // 2. ── Process ────────────────────────────────────────────────────
    let outcome = run_stream(BufReader::new(input), BufWriter::new(output))
        .with_context(|| format!("Preprocessing {input_name}"))?;

    info!(
        "{input_name}: {} bytes in, {} bytes out, {} variables",
        outcome.bytes_read,
        outcome.bytes_written,
        outcome.vars.len()
    );

    // 3. ── Write outputs ──────────────────────────────────────────────
    if let Some(path) = &args.dump_vars {
        writer::vars::emit(&outcome.vars, path)
            .with_context(|| format!("Writing {}", path.display()))?;
        info!("variables written to {}", path.display());
    }

    Ok(())
}

/// Both paths exist and resolve to the same file.
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
