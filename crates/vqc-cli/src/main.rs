//! VQC Command-Line Interface
//!
//! Trains the variational quantum classifier from a CSV dataset and
//! inspects the circuits it runs.
//!
//! ```text
//! vqc train   --data iris.csv [--config run.yaml] [--engine ./qasm-engine]
//! vqc circuit --qubits 3 --layers 2 --gates ry,rz --features 0.1,0.2,0.3
//! vqc version
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{circuit, train, version};

/// VQC - SPSA training for a variational quantum classifier
#[derive(Parser)]
#[command(name = "vqc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a classifier on a labeled CSV dataset
    Train {
        /// CSV file: one column per feature, label in the last column
        #[arg(short, long)]
        data: PathBuf,

        /// YAML training configuration (defaults if omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the number of SPSA iterations
        #[arg(short, long)]
        iterations: Option<u32>,

        /// Override the shots per circuit execution
        #[arg(short, long)]
        shots: Option<u32>,

        /// Override the random seed
        #[arg(long)]
        seed: Option<u64>,

        /// External engine program (in-process simulator if omitted)
        #[arg(short, long)]
        engine: Option<PathBuf>,

        /// Extra arguments placed before the engine's own flags
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        engine_args: Vec<String>,

        /// Write the JSON training report to this file
        #[arg(short, long)]
        report: Option<PathBuf>,
    },

    /// Print the circuit for one feature vector
    Circuit {
        /// Number of qubits (one per feature)
        #[arg(short, long, default_value = "3")]
        qubits: u32,

        /// Number of entangling layers
        #[arg(short, long, default_value = "4")]
        layers: u32,

        /// Trainable rotation set, comma separated
        #[arg(short, long, default_value = "ry,rz")]
        gates: String,

        /// Feature values, comma separated
        #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        features: Vec<f64>,

        /// Trainable angles in turns, comma separated (zeros if omitted)
        #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true)]
        params: Option<Vec<f64>>,
    },

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Train {
            data,
            config,
            iterations,
            shots,
            seed,
            engine,
            engine_args,
            report,
        } => {
            let overrides = train::Overrides {
                iterations,
                shots,
                seed,
            };
            let engine = engine.map(|program| train::Engine {
                program,
                args: engine_args,
            });
            train::execute(&data, config.as_deref(), overrides, engine, report.as_deref()).await
        }

        Commands::Circuit {
            qubits,
            layers,
            gates,
            features,
            params,
        } => circuit::execute(qubits, layers, &gates, &features, params.as_deref()),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
