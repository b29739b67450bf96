//! Tabular Q-learning over discretized build-order states
//!
//! This module implements the learning core of the crate:
//!
//! - [`QLearningTable`]: sparse state-key → per-action value estimates with
//!   epsilon-greedy selection and the one-step Q-learning update
//! - [`SmartAgent`]: the orchestrator that discretizes observations, derives
//!   rewards, drives the table, and emits game commands
//!
//! ## Control Flow
//!
//! The environment calls the agent once per simulation step. The agent
//! derives the current state and reward, updates the table using the
//! *previous* transition, selects an action for the *current* state, and
//! translates it into a command.
//!
//! ## Usage Example
//!
//! ```no_run
//! use buildmarines::q_learning::{QLearningConfig, SmartAgent};
//!
//! let agent = SmartAgent::new(QLearningConfig {
//!     learning_rate: 0.01,
//!     discount_factor: 0.9,
//!     epsilon: 0.9,
//! })
//! .unwrap()
//! .with_seed(42);
//! ```

pub mod agent;
pub mod q_table;

// Public re-exports
pub use agent::SmartAgent;
pub use q_table::{QLearningConfig, QLearningTable};
