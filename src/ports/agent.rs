//! Agent port - abstraction over per-step policies

use crate::{
    Result,
    game::{Command, Observation},
};

/// A policy the environment drives once per simulation step.
///
/// The environment calls [`Agent::step`] with the current observation; the
/// agent derives whatever internal state it needs, optionally learns from the
/// transition since the previous call, and returns a command.
pub trait Agent: Send {
    /// Produce the command for this step.
    ///
    /// # Errors
    ///
    /// Implementations should never fail on degenerate observations (missing
    /// units, unavailable actions); those yield a no-op command instead.
    /// Errors are reserved for genuine internal failures.
    fn step(&mut self, obs: &Observation) -> Result<Command>;

    /// Forget episode-scoped bookkeeping (previous transition, derived
    /// counts). Learned state survives; called between episodes.
    ///
    /// # Default Implementation
    ///
    /// Does nothing, suitable for stateless policies.
    fn reset(&mut self) -> Result<()> {
        Ok(())
    }

    /// The policy's name, for logs and summaries.
    fn name(&self) -> &str;

    /// Seed the agent's internal random number generator.
    ///
    /// Training pipelines call this when supplied with a deterministic seed.
    /// Deterministic policies can ignore it.
    fn set_rng_seed(&mut self, _seed: u64) -> Result<()> {
        Ok(())
    }
}

/// Baseline policy that idles every step. Useful as a comparison floor: any
/// learning agent should out-produce it.
#[derive(Debug, Clone, Default)]
pub struct IdleAgent;

impl Agent for IdleAgent {
    fn step(&mut self, _obs: &Observation) -> Result<Command> {
        Ok(Command::no_op())
    }

    fn name(&self) -> &str {
        "Idle"
    }
}
