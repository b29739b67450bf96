//! Sparse tabular Q-function with epsilon-greedy selection.

use std::collections::HashMap;

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

use crate::state::StateKey;

/// Hyperparameters for [`QLearningTable`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct QLearningConfig {
    /// Learning rate α ∈ [0.0, 1.0]. Zero freezes the table.
    pub learning_rate: f64,
    /// Discount factor γ ∈ [0.0, 1.0]
    pub discount_factor: f64,
    /// Probability ε of exploiting the greedy action; with probability
    /// 1 − ε the table explores uniformly over all actions.
    pub epsilon: f64,
}

impl Default for QLearningConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.01,
            discount_factor: 0.9,
            epsilon: 0.9,
        }
    }
}

impl QLearningConfig {
    /// Validate parameter ranges.
    ///
    /// # Errors
    ///
    /// Returns the matching `Invalid*` error for the first parameter outside
    /// its range.
    pub fn validate(&self) -> Result<(), crate::Error> {
        if !(0.0..=1.0).contains(&self.learning_rate) || !self.learning_rate.is_finite() {
            return Err(crate::Error::InvalidLearningRate {
                value: self.learning_rate,
            });
        }
        if !(0.0..=1.0).contains(&self.discount_factor) || !self.discount_factor.is_finite() {
            return Err(crate::Error::InvalidDiscountFactor {
                value: self.discount_factor,
            });
        }
        if !(0.0..=1.0).contains(&self.epsilon) || !self.epsilon.is_finite() {
            return Err(crate::Error::InvalidExplorationRate {
                value: self.epsilon,
            });
        }
        Ok(())
    }
}

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Sparse mapping from state key to per-action value estimates.
///
/// Rows are inserted lazily with all-zero estimates on first encounter and
/// never removed. Both the selection and the update paths ensure their rows
/// exist before reading, so an unseen state is never an error.
#[derive(Debug, Clone)]
pub struct QLearningTable {
    rows: HashMap<StateKey, Vec<f64>>,
    action_count: usize,
    learning_rate: f64,
    discount_factor: f64,
    epsilon: f64,
    rng: StdRng,
}

impl QLearningTable {
    /// Create an empty table over `action_count` actions.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EmptyActionCatalog`] for a zero action count,
    /// or a parameter-range error from [`QLearningConfig::validate`].
    pub fn new(action_count: usize, config: QLearningConfig) -> Result<Self, crate::Error> {
        if action_count == 0 {
            return Err(crate::Error::EmptyActionCatalog);
        }
        config.validate()?;
        Ok(Self {
            rows: HashMap::new(),
            action_count,
            learning_rate: config.learning_rate,
            discount_factor: config.discount_factor,
            epsilon: config.epsilon,
            rng: build_rng(None),
        })
    }

    /// Seed the internal RNG for reproducible selection.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Number of actions per row.
    pub fn action_count(&self) -> usize {
        self.action_count
    }

    /// Number of state rows inserted so far.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no state has been seen yet.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Current exploration rate.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Replace the exploration rate (e.g., for greedy evaluation).
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidExplorationRate`] outside [0.0, 1.0].
    pub fn set_epsilon(&mut self, epsilon: f64) -> Result<(), crate::Error> {
        if !(0.0..=1.0).contains(&epsilon) || !epsilon.is_finite() {
            return Err(crate::Error::InvalidExplorationRate { value: epsilon });
        }
        self.epsilon = epsilon;
        Ok(())
    }

    /// Replace the learning rate. Zero freezes the table, which turns
    /// [`QLearningTable::learn`] into a no-op for evaluation rollouts.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidLearningRate`] outside [0.0, 1.0].
    pub fn set_learning_rate(&mut self, learning_rate: f64) -> Result<(), crate::Error> {
        if !(0.0..=1.0).contains(&learning_rate) || !learning_rate.is_finite() {
            return Err(crate::Error::InvalidLearningRate {
                value: learning_rate,
            });
        }
        self.learning_rate = learning_rate;
        Ok(())
    }

    /// Insert an all-zero row for `state` if absent. Idempotent.
    pub fn ensure_state(&mut self, state: &StateKey) {
        if !self.rows.contains_key(state) {
            self.rows
                .insert(state.clone(), vec![0.0; self.action_count]);
        }
    }

    /// Value estimates for `state`, if the row exists.
    pub fn row(&self, state: &StateKey) -> Option<&[f64]> {
        self.rows.get(state).map(Vec::as_slice)
    }

    /// Value estimate for one state-action pair, zero for unseen rows.
    /// Read-only: never inserts.
    pub fn value(&self, state: &StateKey, action: usize) -> f64 {
        assert!(action < self.action_count, "action index out of range");
        self.rows.get(state).map_or(0.0, |row| row[action])
    }

    /// Epsilon-greedy action selection.
    ///
    /// With probability ε, returns one of the actions whose estimate equals
    /// the row maximum, breaking ties uniformly at random on every call.
    /// A fresh all-zero row ties across the whole catalog, and a fixed
    /// tie-break would systematically favor low indices. With probability
    /// 1 − ε, returns a uniformly random action index.
    pub fn choose_action(&mut self, state: &StateKey) -> usize {
        self.ensure_state(state);

        if self.rng.random::<f64>() < self.epsilon {
            let row = &self.rows[state];
            let max = row.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let best: Vec<usize> = row
                .iter()
                .enumerate()
                .filter(|&(_, &q)| q == max)
                .map(|(i, _)| i)
                .collect();
            *best.choose(&mut self.rng).expect("row maximum always exists")
        } else {
            self.rng.random_range(0..self.action_count)
        }
    }

    /// One-step Q-learning update:
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') − Q(s,a)]
    ///
    /// Both rows are lazily inserted before the read. Mutates in place; no
    /// eligibility traces, no function approximation.
    ///
    /// # Panics
    ///
    /// Panics if `action` is outside the catalog. An out-of-range index is
    /// a caller contract violation, not a recoverable condition.
    pub fn learn(&mut self, state: &StateKey, action: usize, reward: f64, next_state: &StateKey) {
        assert!(
            action < self.action_count,
            "action index {action} out of range for {} actions",
            self.action_count
        );

        self.ensure_state(next_state);
        self.ensure_state(state);

        let max_next = self.rows[next_state]
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        let predicted = self.rows[state][action];
        let target = reward + self.discount_factor * max_next;

        let row = self.rows.get_mut(state).expect("row ensured above");
        row[action] += self.learning_rate * (target - predicted);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(config: QLearningConfig) -> QLearningTable {
        QLearningTable::new(6, config).unwrap().with_seed(7)
    }

    #[test]
    fn test_config_validation() {
        assert!(QLearningConfig::default().validate().is_ok());
        assert!(
            QLearningConfig {
                learning_rate: 1.5,
                ..Default::default()
            }
            .validate()
            .is_err()
        );
        assert!(
            QLearningConfig {
                discount_factor: -0.1,
                ..Default::default()
            }
            .validate()
            .is_err()
        );
        assert!(
            QLearningConfig {
                epsilon: f64::NAN,
                ..Default::default()
            }
            .validate()
            .is_err()
        );
    }

    #[test]
    fn test_zero_actions_rejected() {
        assert!(QLearningTable::new(0, QLearningConfig::default()).is_err());
    }

    #[test]
    fn test_ensure_state_is_idempotent() {
        let mut t = table(QLearningConfig::default());
        let s = StateKey::new("[0,0,15,0]");
        t.ensure_state(&s);
        t.ensure_state(&s);
        assert_eq!(t.len(), 1);
        assert_eq!(t.row(&s).unwrap(), &[0.0; 6]);
    }

    #[test]
    fn test_choose_action_inserts_unseen_state() {
        let mut t = table(QLearningConfig::default());
        let s = StateKey::new("[1,1,23,4]");
        let action = t.choose_action(&s);
        assert!(action < 6);
        assert_eq!(t.row(&s).unwrap(), &[0.0; 6]);
    }

    #[test]
    fn test_greedy_selection_single_maximum() {
        let mut t = table(QLearningConfig {
            epsilon: 1.0,
            ..Default::default()
        });
        let s = StateKey::new("[0,1,15,0]");
        t.ensure_state(&s);
        t.learn(&s, 2, 5.0, &StateKey::new("[0,1,15,1]"));

        // Row is [0,0,α·5,0,0,0]: index 2 is the unique maximum, so with
        // ε = 1 the selection is deterministic.
        for _ in 0..50 {
            assert_eq!(t.choose_action(&s), 2);
        }
    }

    #[test]
    fn test_zero_learning_rate_is_no_op() {
        let mut t = table(QLearningConfig {
            learning_rate: 0.0,
            ..Default::default()
        });
        let s = StateKey::new("[0,0,15,0]");
        let s2 = StateKey::new("[1,0,15,0]");
        t.learn(&s, 3, 10.0, &s2);
        assert_eq!(t.row(&s).unwrap(), &[0.0; 6]);
        assert_eq!(t.row(&s2).unwrap(), &[0.0; 6]);
    }

    #[test]
    fn test_single_update_concrete_values() {
        // α = 0.01, γ = 0.9, reward 0.5 into an empty table:
        // Q(s,2) = 0.01 · (0.5 + 0.9 · 0 − 0) = 0.005 exactly.
        let mut t = table(QLearningConfig::default());
        let s = StateKey::new("[0,0,0,0]");
        let s2 = StateKey::new("[1,0,0,0]");
        t.learn(&s, 2, 0.5, &s2);

        assert_eq!(t.len(), 2);
        let row = t.row(&s).unwrap();
        assert_eq!(row[2], 0.01 * 0.5);
        for (i, &q) in row.iter().enumerate() {
            if i != 2 {
                assert_eq!(q, 0.0);
            }
        }
        assert_eq!(t.row(&s2).unwrap(), &[0.0; 6]);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_out_of_range_action_panics() {
        let mut t = table(QLearningConfig::default());
        let s = StateKey::new("[0,0,0,0]");
        t.learn(&s, 6, 0.0, &s);
    }

    #[test]
    fn test_value_accessor_never_inserts() {
        let t = table(QLearningConfig::default());
        let s = StateKey::new("[0,0,0,0]");
        assert_eq!(t.value(&s, 0), 0.0);
        assert!(t.is_empty());
    }
}
