//! Train command - train the Q-learning agent in the built-in simulation

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    cli::output::{print_section, print_stats_table},
    pipeline::{MetricsObserver, ProgressObserver, TrainingConfig, TrainingPipeline},
    ports::Agent,
    q_learning::{QLearningConfig, SmartAgent},
    sim::BuildMarinesSim,
};

#[derive(Parser, Debug)]
#[command(about = "Train the Q-learning agent")]
pub struct TrainArgs {
    /// Number of training episodes
    #[arg(long, short = 'e', default_value_t = 20)]
    pub episodes: usize,

    /// Simulation steps per episode
    #[arg(long, short = 's', default_value_t = 240)]
    pub steps: usize,

    /// Learning rate alpha
    #[arg(long, default_value_t = 0.01)]
    pub alpha: f64,

    /// Discount factor gamma
    #[arg(long, default_value_t = 0.9)]
    pub gamma: f64,

    /// Probability of exploiting the greedy action
    #[arg(long, default_value_t = 0.9)]
    pub epsilon: f64,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Show progress bar
    #[arg(long, default_value_t = true)]
    pub progress: bool,
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let mut agent = SmartAgent::new(QLearningConfig {
        learning_rate: args.alpha,
        discount_factor: args.gamma,
        epsilon: args.epsilon,
    })?;
    if let Some(seed) = args.seed {
        agent = agent.with_seed(seed);
    }

    let config = TrainingConfig {
        episodes: args.episodes,
        steps_per_episode: args.steps,
        seed: args.seed,
    };

    let mut pipeline = TrainingPipeline::new(config).with_observer(Box::new(MetricsObserver::new()));
    if args.progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }

    let mut environment = BuildMarinesSim::new();
    println!(
        "Training {} for {} episodes of {} steps...",
        agent.name(),
        args.episodes,
        args.steps
    );
    let result = pipeline.run(&mut agent, &mut environment)?;

    print_section("Training Summary");
    print_stats_table(&[
        ("Episodes", result.episodes.to_string()),
        ("Total marines", result.total_marines.to_string()),
        ("Mean marines/episode", format!("{:.2}", result.mean_marines)),
        ("Best episode", result.best_marines.to_string()),
        ("States discovered", agent.table().len().to_string()),
    ]);

    if let Some(path) = &args.summary {
        result.save(path)?;
        println!("\nSummary written to {}", path.display());
    }

    Ok(())
}
