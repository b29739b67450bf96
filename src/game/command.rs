//! Commands issued back to the environment.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A screen or minimap coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub fn new(x: usize, y: usize) -> Self {
        Point { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Environment function identifiers the agent may invoke.
///
/// The environment advertises the subset legal on the current step via
/// [`super::Observation::available_actions`]; issuing anything else is
/// ignored by a well-behaved environment, so the agent falls back to
/// [`FunctionId::NoOp`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FunctionId {
    NoOp,
    SelectPoint,
    BuildSupplyDepot,
    BuildBarracks,
    TrainMarine,
}

/// A concrete command: function identifier plus positional/flag arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Command {
    pub function: FunctionId,
    /// Screen target for point-taking functions
    pub target: Option<Point>,
    /// Whether the command is appended to the unit's order queue
    pub queued: bool,
}

impl Command {
    /// The idle command; also the fallback when an action's precondition
    /// is unmet on this step.
    pub fn no_op() -> Self {
        Command {
            function: FunctionId::NoOp,
            target: None,
            queued: false,
        }
    }

    /// Select whatever unit occupies `target`.
    pub fn select_point(target: Point) -> Self {
        Command {
            function: FunctionId::SelectPoint,
            target: Some(target),
            queued: false,
        }
    }

    /// Order the selected worker to place a supply depot at `target`.
    pub fn build_supply_depot(target: Point) -> Self {
        Command {
            function: FunctionId::BuildSupplyDepot,
            target: Some(target),
            queued: false,
        }
    }

    /// Order the selected worker to place a barracks at `target`.
    pub fn build_barracks(target: Point) -> Self {
        Command {
            function: FunctionId::BuildBarracks,
            target: Some(target),
            queued: false,
        }
    }

    /// Queue a marine at the selected barracks.
    pub fn train_marine() -> Self {
        Command {
            function: FunctionId::TrainMarine,
            target: None,
            queued: true,
        }
    }

    /// Whether this command does nothing.
    pub fn is_no_op(&self) -> bool {
        self.function == FunctionId::NoOp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_op() {
        let cmd = Command::no_op();
        assert!(cmd.is_no_op());
        assert!(cmd.target.is_none());
    }

    #[test]
    fn test_train_marine_is_queued() {
        assert!(Command::train_marine().queued);
        assert!(!Command::build_barracks(Point::new(3, 4)).queued);
    }
}
