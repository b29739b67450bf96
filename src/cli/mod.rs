//! CLI infrastructure for the buildmarines toolkit
//!
//! This module provides the command-line interface for training and
//! evaluating the tabular Q-learning agent against the built-in simulation.

pub mod commands;
pub mod output;
