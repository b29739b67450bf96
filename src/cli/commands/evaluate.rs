//! Evaluate command - train, then roll out the frozen greedy policy
//!
//! The learned table lives only in process memory, so evaluation trains a
//! fresh agent first and then replays it greedily with learning disabled.

use anyhow::Result;
use clap::Parser;

use crate::{
    cli::output::{print_section, print_stats_table},
    pipeline::{ProgressObserver, TrainingConfig, TrainingPipeline},
    q_learning::{QLearningConfig, SmartAgent},
    sim::BuildMarinesSim,
};

#[derive(Parser, Debug)]
#[command(about = "Train, then evaluate the frozen greedy policy")]
pub struct EvaluateArgs {
    /// Number of training episodes before evaluation
    #[arg(long, default_value_t = 50)]
    pub train_episodes: usize,

    /// Number of greedy evaluation episodes
    #[arg(long, default_value_t = 5)]
    pub eval_episodes: usize,

    /// Simulation steps per episode
    #[arg(long, short = 's', default_value_t = 240)]
    pub steps: usize,

    /// Probability of exploiting the greedy action during training
    #[arg(long, default_value_t = 0.9)]
    pub epsilon: f64,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Show progress bars
    #[arg(long, default_value_t = true)]
    pub progress: bool,
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let mut agent = SmartAgent::new(QLearningConfig {
        epsilon: args.epsilon,
        ..QLearningConfig::default()
    })?;
    if let Some(seed) = args.seed {
        agent = agent.with_seed(seed);
    }

    let mut environment = BuildMarinesSim::new();

    // Training phase
    let mut pipeline = TrainingPipeline::new(TrainingConfig {
        episodes: args.train_episodes,
        steps_per_episode: args.steps,
        seed: args.seed,
    });
    if args.progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    println!("Training for {} episodes...", args.train_episodes);
    let training = pipeline.run(&mut agent, &mut environment)?;

    // Evaluation phase: exploit only, table frozen
    agent.freeze()?;
    let mut eval_pipeline = TrainingPipeline::new(TrainingConfig {
        episodes: args.eval_episodes,
        steps_per_episode: args.steps,
        seed: args.seed.map(|s| s.wrapping_add(1)),
    });
    println!("Evaluating greedy policy for {} episodes...", args.eval_episodes);
    let evaluation = eval_pipeline.run(&mut agent, &mut environment)?;

    print_section("Evaluation Summary");
    print_stats_table(&[
        (
            "Training mean marines",
            format!("{:.2}", training.mean_marines),
        ),
        (
            "Greedy mean marines",
            format!("{:.2}", evaluation.mean_marines),
        ),
        ("Greedy best episode", evaluation.best_marines.to_string()),
        ("States discovered", agent.table().len().to_string()),
    ]);

    Ok(())
}
