//! Environment port - abstraction over step-driven game worlds

use crate::game::{Command, Observation};

/// A synchronous, step-driven game environment.
///
/// The contract mirrors the external game client: the caller applies one
/// command per step and receives the next observation. No suspension points,
/// no concurrency; exactly one caller drives the environment.
pub trait Environment: Send {
    /// Start a fresh episode and return its first observation.
    fn reset(&mut self) -> Observation;

    /// Apply `command`, advance one simulation step, and return the
    /// resulting observation. Illegal commands are ignored, matching the
    /// real client's behavior.
    fn step(&mut self, command: &Command) -> Observation;

    /// The environment's name, for logs and summaries.
    fn name(&self) -> &str;
}
