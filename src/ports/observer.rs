//! Observer port - composable training telemetry
//!
//! Observers let the pipeline collect progress and metrics without coupling
//! the training loop to specific output formats.

use crate::{
    Result,
    game::{Command, Observation},
    pipeline::EpisodeSummary,
};

/// Hooks invoked by the training pipeline.
///
/// Every method has a no-op default so observers implement only what they
/// care about.
pub trait Observer {
    /// Called once before the first episode.
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called after every agent step, with the observation the agent saw and
    /// the command it issued.
    fn on_step(
        &mut self,
        _episode: usize,
        _step: usize,
        _obs: &Observation,
        _command: &Command,
    ) -> Result<()> {
        Ok(())
    }

    /// Called when an episode completes.
    fn on_episode_end(&mut self, _episode: usize, _summary: &EpisodeSummary) -> Result<()> {
        Ok(())
    }

    /// Called once after the last episode.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
