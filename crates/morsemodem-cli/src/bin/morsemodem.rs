//! Streaming transcoder between plain text and Morse code.
//!
//! `.txt` inputs are encoded to Morse, `.morse` inputs are decoded back
//! to text; any other extension is rejected. Output goes to a file or,
//! when `-o` is omitted, to standard output.

use std::{
    error::Error,
    path::{Path, PathBuf},
    process,
};

use clap::{CommandFactory, Parser};
use morsemodem::{Converter, TranscodeError};

#[derive(Parser)]
#[command(name = "morsemodem", version, about)]
struct Cli {
    /// Input file path (`.txt` encodes, `.morse` decodes)
    #[arg(short = 'i', value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file path (defaults to standard output)
    #[arg(short = 'o', value_name = "FILE")]
    output: Option<PathBuf>,

    /// Symbol mapping file overriding the built-in table
    #[arg(long, value_name = "FILE")]
    mapping: Option<PathBuf>,
}

fn main() {
    #[cfg(feature = "trace")]
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let Some(input) = cli.input else {
        eprintln!("error: input file is required");
        let _ = Cli::command().print_help();
        process::exit(1);
    };

    if let Err(err) = run(&input, cli.output.as_deref(), cli.mapping.as_deref()) {
        report(&err);
        process::exit(1);
    }
}

fn run(
    input: &Path,
    output: Option<&Path>,
    mapping: Option<&Path>,
) -> Result<(), TranscodeError> {
    let mut converter = match mapping {
        Some(mapping) => Converter::with_mapping_file(input, output, mapping)?,
        None => Converter::new(input, output)?,
    };
    // Close runs on the failure path too; its own failures surface only
    // when processing itself succeeded.
    let processed = converter.process();
    let closed = converter.close();
    processed?;
    closed
}

fn report(err: &dyn Error) {
    eprintln!("error: {err}");
    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}
