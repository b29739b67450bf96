//! Episode loop driving an agent against an environment

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    ports::{Agent, Environment, Observer},
};

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of training episodes
    pub episodes: usize,

    /// Simulation steps per episode
    pub steps_per_episode: usize,

    /// Random seed
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: 20,
            steps_per_episode: 240,
            seed: None,
        }
    }
}

/// Outcome of a single episode
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EpisodeSummary {
    /// Episode number (zero-based)
    pub episode: usize,

    /// Steps simulated
    pub steps: usize,

    /// Marines on the field when the episode ended
    pub marines: u32,

    /// Supply cap when the episode ended
    pub supply_limit: u32,
}

/// Result of a training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Episodes completed
    pub episodes: usize,

    /// Marines produced across all episodes
    pub total_marines: u32,

    /// Mean marines per episode
    pub mean_marines: f64,

    /// Best single-episode marine count
    pub best_marines: u32,

    /// Per-episode outcomes
    pub summaries: Vec<EpisodeSummary>,
}

impl TrainingResult {
    /// Aggregate per-episode summaries
    pub fn new(summaries: Vec<EpisodeSummary>) -> Self {
        let episodes = summaries.len();
        let total_marines: u32 = summaries.iter().map(|s| s.marines).sum();
        let best_marines = summaries.iter().map(|s| s.marines).max().unwrap_or(0);
        let mean_marines = if episodes > 0 {
            f64::from(total_marines) / episodes as f64
        } else {
            0.0
        };

        Self {
            episodes,
            total_marines,
            mean_marines,
            best_marines,
            summaries,
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Training pipeline for a single agent in an environment
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Run training with the given agent and environment
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoEpisodes`] for a zero-episode configuration, or
    /// any error raised by the agent or an observer.
    pub fn run(
        &mut self,
        agent: &mut dyn Agent,
        environment: &mut dyn Environment,
    ) -> Result<TrainingResult> {
        if self.config.episodes == 0 {
            return Err(Error::NoEpisodes);
        }

        if let Some(seed) = self.config.seed {
            agent.set_rng_seed(seed)?;
        }

        for observer in &mut self.observers {
            observer.on_training_start(self.config.episodes)?;
        }

        let mut summaries = Vec::with_capacity(self.config.episodes);
        for episode in 0..self.config.episodes {
            let summary = self.run_episode(episode, agent, environment)?;
            for observer in &mut self.observers {
                observer.on_episode_end(episode, &summary)?;
            }
            summaries.push(summary);
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok(TrainingResult::new(summaries))
    }

    fn run_episode(
        &mut self,
        episode: usize,
        agent: &mut dyn Agent,
        environment: &mut dyn Environment,
    ) -> Result<EpisodeSummary> {
        agent.reset()?;
        let mut obs = environment.reset();

        for step in 0..self.config.steps_per_episode {
            let command = agent.step(&obs)?;
            for observer in &mut self.observers {
                observer.on_step(episode, step, &obs, &command)?;
            }
            obs = environment.step(&command);
        }

        Ok(EpisodeSummary {
            episode,
            steps: self.config.steps_per_episode,
            marines: obs.player.army_supply,
            supply_limit: obs.player.supply_limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ports::agent::IdleAgent, sim::BuildMarinesSim};

    #[test]
    fn test_zero_episodes_rejected() {
        let mut pipeline = TrainingPipeline::new(TrainingConfig {
            episodes: 0,
            ..Default::default()
        });
        let result = pipeline.run(&mut IdleAgent, &mut BuildMarinesSim::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_idle_agent_builds_nothing() {
        let config = TrainingConfig {
            episodes: 3,
            steps_per_episode: 30,
            seed: Some(42),
        };
        let mut pipeline = TrainingPipeline::new(config);
        let result = pipeline
            .run(&mut IdleAgent, &mut BuildMarinesSim::new())
            .unwrap();

        assert_eq!(result.episodes, 3);
        assert_eq!(result.total_marines, 0);
        assert_eq!(result.mean_marines, 0.0);
        assert!(result.summaries.iter().all(|s| s.steps == 30));
    }

    #[test]
    fn test_result_aggregation() {
        let summaries = vec![
            EpisodeSummary {
                episode: 0,
                steps: 10,
                marines: 2,
                supply_limit: 23,
            },
            EpisodeSummary {
                episode: 1,
                steps: 10,
                marines: 6,
                supply_limit: 31,
            },
        ];
        let result = TrainingResult::new(summaries);
        assert_eq!(result.total_marines, 8);
        assert_eq!(result.best_marines, 6);
        assert!((result.mean_marines - 4.0).abs() < f64::EPSILON);
    }
}
