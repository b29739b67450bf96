//! Observer implementations for the training pipeline

use indicatif::{ProgressBar, ProgressStyle};

use crate::{Result, pipeline::EpisodeSummary, ports::Observer};

/// Progress bar observer - shows per-episode training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    total_marines: u32,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            total_marines: 0,
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, summary: &EpisodeSummary) -> Result<()> {
        self.total_marines += summary.marines;
        if let Some(pb) = &self.progress_bar {
            pb.set_position(episode as u64 + 1);
            pb.set_message(format!("marines: {}", self.total_marines));
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(format!("marines: {}", self.total_marines));
        }
        Ok(())
    }
}

/// Metrics observer - accumulates command and production tallies
pub struct MetricsObserver {
    episodes: usize,
    steps: usize,
    no_ops: usize,
    total_marines: u32,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self {
            episodes: 0,
            steps: 0,
            no_ops: 0,
            total_marines: 0,
        }
    }

    /// Total steps observed
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Fraction of steps that issued no command
    pub fn no_op_rate(&self) -> f64 {
        if self.steps > 0 {
            self.no_ops as f64 / self.steps as f64
        } else {
            0.0
        }
    }

    /// Marines produced across observed episodes
    pub fn total_marines(&self) -> u32 {
        self.total_marines
    }

    /// Episodes observed
    pub fn episodes(&self) -> usize {
        self.episodes
    }
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for MetricsObserver {
    fn on_step(
        &mut self,
        _episode: usize,
        _step: usize,
        _obs: &crate::game::Observation,
        command: &crate::game::Command,
    ) -> Result<()> {
        self.steps += 1;
        if command.is_no_op() {
            self.no_ops += 1;
        }
        Ok(())
    }

    fn on_episode_end(&mut self, _episode: usize, summary: &EpisodeSummary) -> Result<()> {
        self.episodes += 1;
        self.total_marines += summary.marines;
        Ok(())
    }
}
