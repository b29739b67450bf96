//! Tabular Q-learning agent for the BuildMarines mini-game
//!
//! This crate provides:
//! - A sparse Q-table with epsilon-greedy selection and the one-step
//!   Q-learning update
//! - A build-order agent that discretizes game observations, derives
//!   rewards, and emits game commands
//! - The observation/command contract with the game environment
//! - A simplified in-process simulation plus a training pipeline with
//!   progress and metrics observers

pub mod actions;
pub mod cli;
pub mod error;
pub mod game;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod sim;
pub mod state;

pub use actions::{ACTION_COUNT, SmartAction};
pub use error::{Error, Result};
pub use game::{Command, FunctionId, Observation, Point, ScreenLayer};
pub use q_learning::{QLearningConfig, QLearningTable, SmartAgent};
pub use sim::BuildMarinesSim;
pub use state::{StateKey, StateSignature};
