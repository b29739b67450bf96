//! buildmarines CLI - tabular Q-learning agent for the BuildMarines mini-game
//!
//! This CLI provides a unified interface for:
//! - Training the agent against the built-in simulation
//! - Evaluating the frozen greedy policy after training

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "buildmarines")]
#[command(version, about = "Tabular Q-learning build-order agent", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the Q-learning agent in the built-in simulation
    Train(buildmarines::cli::commands::train::TrainArgs),

    /// Train, then evaluate the frozen greedy policy
    Evaluate(buildmarines::cli::commands::evaluate::EvaluateArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => buildmarines::cli::commands::train::execute(args),
        Commands::Evaluate(args) => buildmarines::cli::commands::evaluate::execute(args),
    }
}
