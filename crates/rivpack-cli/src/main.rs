//! rivpack CLI: convert between JSON scenes and RIVE container files, and
//! validate either.
//!
//! # Example
//!
//! ```bash
//! rivpack encode scene.json scene.riv --trace
//! rivpack decode scene.riv records.json
//! rivpack validate scene.riv --verbose
//! ```

mod commands;
mod error;
mod input;
mod output;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use rivpack::codec::TRACE_ENV;

use error::exit_code_for;

#[derive(Parser, Debug)]
#[command(name = "rivpack", version, about = "Encode, decode and validate RIVE container files")]
struct Cli {
    /// Print every counter and debug logs
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode a JSON scene or record list into a container file
    Encode {
        /// Input JSON (scene or record list)
        input: PathBuf,
        /// Output container file
        output: PathBuf,
        /// Print the per-chunk size breakdown
        #[arg(long, env = TRACE_ENV)]
        trace: bool,
    },
    /// Decode a container file into a validated JSON record list
    Decode {
        /// Input container file
        input: PathBuf,
        /// Output JSON record list
        output: PathBuf,
    },
    /// Validate a container file or JSON input
    Validate {
        /// Input container file, JSON scene or record list
        input: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    // --verbose always shows debug logs for the library; otherwise RUST_LOG
    // applies, falling back to warnings only.
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("rivpack=debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("rivpack=warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            exit_code_for(&e)
        }
    };
    process::exit(code);
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    match cli.command {
        Commands::Encode {
            input,
            output,
            trace,
        } => commands::encode::run(&input, &output, trace, cli.verbose),
        Commands::Decode { input, output } => commands::decode::run(&input, &output, cli.verbose),
        Commands::Validate { input } => commands::validate::run(&input, cli.verbose),
    }
}
