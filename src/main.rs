// src/main.rs
mod commands;
mod log;
mod logger;

use clap::{Parser, Subcommand};
use commands::Alphabet;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

#[derive(Parser)]
#[command(name = "huffpack", version = "0.1.0")]
#[command(about = "Static Huffman compression into a self-describing container.", long_about = None)]
struct Cli {
    /// Log pipeline details at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Append a JSON line per action to this file
    #[arg(long, global = true)]
    journal: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file into a container
    Compress {
        input: PathBuf,
        output: PathBuf,
        /// Count raw bytes instead of UTF-8 characters
        #[arg(long)]
        raw: bool,
        /// Decode the result and compare SHA-256 digests before writing
        #[arg(long)]
        verify: bool,
    },
    /// Restore the original file from a container
    Decompress {
        input: PathBuf,
        output: PathBuf,
        /// The container was built with --raw
        #[arg(long)]
        raw: bool,
    },
    /// Print statistics about a container
    Inspect {
        input: PathBuf,
        /// The container was built with --raw
        #[arg(long)]
        raw: bool,
    },
}

fn alphabet(raw: bool) -> Alphabet {
    if raw { Alphabet::Bytes } else { Alphabet::Chars }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    let span = tracing::info_span!("command_execution", command = ?std::env::args().collect::<Vec<_>>());
    let _enter = span.enter();

    let journal = cli.journal.as_deref();
    let result = match cli.command {
        Commands::Compress { input, output, raw, verify } => {
            commands::compress_file(&input, &output, alphabet(raw), verify, journal)
        }
        Commands::Decompress { input, output, raw } => {
            commands::decompress_file(&input, &output, alphabet(raw), journal)
        }
        Commands::Inspect { input, raw } => commands::inspect_file(&input, alphabet(raw), journal),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "command failed");
            ExitCode::FAILURE
        }
    }
}
