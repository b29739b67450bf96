//! The fixed build-order action catalog.
//!
//! The agent chooses among six named actions; the Q-table addresses them by
//! their position in [`SmartAction::ALL`]. The catalog order is part of the
//! learned policy's addressing scheme and must not be reordered.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of actions in the catalog.
pub const ACTION_COUNT: usize = 6;

/// A discrete action the agent can take on a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SmartAction {
    /// Issue no command this step
    DoNothing,
    /// Select a worker so build commands become available
    SelectWorker,
    /// Place a supply depot near the command center
    BuildSupplyDepot,
    /// Place a barracks near the command center
    BuildBarracks,
    /// Select the barracks so training becomes available
    SelectBarracks,
    /// Queue a marine at the selected barracks
    TrainMarine,
}

impl SmartAction {
    /// All actions in catalog order.
    pub const ALL: [SmartAction; ACTION_COUNT] = [
        SmartAction::DoNothing,
        SmartAction::SelectWorker,
        SmartAction::BuildSupplyDepot,
        SmartAction::BuildBarracks,
        SmartAction::SelectBarracks,
        SmartAction::TrainMarine,
    ];

    /// Position of this action in the catalog.
    pub fn index(&self) -> usize {
        Self::ALL
            .iter()
            .position(|a| a == self)
            .expect("catalog contains every variant")
    }

    /// Look up an action by catalog index.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidActionIndex`] if `index >= ACTION_COUNT`.
    pub fn from_index(index: usize) -> Result<Self, crate::Error> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(crate::Error::InvalidActionIndex {
                index,
                count: ACTION_COUNT,
            })
    }

    /// Short identifier used in logs and summaries.
    pub fn name(&self) -> &'static str {
        match self {
            SmartAction::DoNothing => "do-nothing",
            SmartAction::SelectWorker => "select-worker",
            SmartAction::BuildSupplyDepot => "build-supply-depot",
            SmartAction::BuildBarracks => "build-barracks",
            SmartAction::SelectBarracks => "select-barracks",
            SmartAction::TrainMarine => "train-marine",
        }
    }
}

impl fmt::Display for SmartAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Per-increase reward bonuses credited when derived unit counts grow.
pub mod reward {
    /// Bonus per additional marine on screen.
    pub const MARINE: f64 = 0.5;

    /// Bonus per additional supply depot on screen.
    pub const DEPOT: f64 = 0.5;

    /// Bonus per additional barracks on screen.
    pub const BARRACKS: f64 = 1.0;
}
