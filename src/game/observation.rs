//! Per-step observations supplied by the environment.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::command::{FunctionId, Point};

/// A row-major grid of unit-type or player-relative identifiers.
///
/// One feature plane of the observation: `cells[y * width + x]` holds the
/// identifier at screen coordinate `(x, y)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenLayer {
    width: usize,
    height: usize,
    cells: Vec<u16>,
}

impl ScreenLayer {
    /// Create an all-zero layer.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidScreenDimensions`] if either dimension
    /// is zero.
    pub fn new(width: usize, height: usize) -> Result<Self, crate::Error> {
        if width == 0 || height == 0 {
            return Err(crate::Error::InvalidScreenDimensions { width, height });
        }
        Ok(ScreenLayer {
            width,
            height,
            cells: vec![0; width * height],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Identifier at `(x, y)`. Panics on out-of-bounds coordinates; callers
    /// iterate within `width`/`height`.
    pub fn get(&self, x: usize, y: usize) -> u16 {
        assert!(x < self.width && y < self.height, "coordinate out of bounds");
        self.cells[y * self.width + x]
    }

    /// Write `id` at `(x, y)`. Panics on out-of-bounds coordinates.
    pub fn set(&mut self, x: usize, y: usize, id: u16) {
        assert!(x < self.width && y < self.height, "coordinate out of bounds");
        self.cells[y * self.width + x] = id;
    }

    /// Whether any cell holds `id`.
    pub fn contains(&self, id: u16) -> bool {
        self.cells.contains(&id)
    }

    /// All coordinates holding `id`, in row-major order.
    pub fn positions_of(&self, id: u16) -> Vec<Point> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == id)
            .map(|(i, _)| Point::new(i % self.width, i / self.width))
            .collect()
    }

    /// Mean coordinate of all cells holding `id`, or `None` if absent.
    ///
    /// Used to target the middle of a multi-cell structure.
    pub fn mean_position(&self, id: u16) -> Option<Point> {
        let positions = self.positions_of(id);
        if positions.is_empty() {
            return None;
        }
        let n = positions.len();
        let (sx, sy) = positions
            .iter()
            .fold((0, 0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Some(Point::new(sx / n, sy / n))
    }

    /// Number of distinct screen rows occupied by `id`.
    ///
    /// A cheap proxy for "how many units of this type are visible" when each
    /// unit occupies its own row band; the reward derivation only cares about
    /// increases, so the proxy being approximate is acceptable.
    pub fn distinct_row_count(&self, id: u16) -> usize {
        let mut rows: Vec<usize> = self.positions_of(id).iter().map(|p| p.y).collect();
        rows.sort_unstable();
        rows.dedup();
        rows.len()
    }
}

/// Scalar player counters from the observation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerCounters {
    /// Mineral stockpile
    pub minerals: u32,
    /// Current supply cap
    pub supply_limit: u32,
    /// Supply consumed by army units
    pub army_supply: u32,
}

/// One step's worth of environment state, as handed to the agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Unit-type identifiers per screen pixel
    pub unit_type: ScreenLayer,
    /// Player-relative ownership per minimap pixel
    pub minimap_player_relative: ScreenLayer,
    /// Scalar player counters
    pub player: PlayerCounters,
    /// Functions legal on this step
    pub available_actions: HashSet<FunctionId>,
}

impl Observation {
    /// An empty observation with the given screen and minimap dimensions.
    /// Only [`FunctionId::NoOp`] is available until populated.
    pub fn empty(screen: usize, minimap: usize) -> Result<Self, crate::Error> {
        Ok(Observation {
            unit_type: ScreenLayer::new(screen, screen)?,
            minimap_player_relative: ScreenLayer::new(minimap, minimap)?,
            player: PlayerCounters::default(),
            available_actions: HashSet::from([FunctionId::NoOp]),
        })
    }

    /// Whether `function` is legal on this step.
    pub fn is_available(&self, function: FunctionId) -> bool {
        self.available_actions.contains(&function)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::units;

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(ScreenLayer::new(0, 8).is_err());
        assert!(ScreenLayer::new(8, 0).is_err());
    }

    #[test]
    fn test_positions_and_mean() {
        let mut layer = ScreenLayer::new(8, 8).unwrap();
        layer.set(2, 2, units::TERRAN_BARRACKS);
        layer.set(4, 2, units::TERRAN_BARRACKS);
        layer.set(3, 4, units::TERRAN_BARRACKS);

        assert_eq!(layer.positions_of(units::TERRAN_BARRACKS).len(), 3);
        assert_eq!(
            layer.mean_position(units::TERRAN_BARRACKS),
            Some(Point::new(3, 2))
        );
        assert_eq!(layer.mean_position(units::TERRAN_MARINE), None);
    }

    #[test]
    fn test_distinct_row_count() {
        let mut layer = ScreenLayer::new(8, 8).unwrap();
        // Two marines on row 1, one on row 5: two distinct rows.
        layer.set(0, 1, units::TERRAN_MARINE);
        layer.set(3, 1, units::TERRAN_MARINE);
        layer.set(6, 5, units::TERRAN_MARINE);

        assert_eq!(layer.distinct_row_count(units::TERRAN_MARINE), 2);
        assert_eq!(layer.distinct_row_count(units::TERRAN_SCV), 0);
    }

    #[test]
    fn test_empty_observation_only_allows_no_op() {
        let obs = Observation::empty(16, 8).unwrap();
        assert!(obs.is_available(FunctionId::NoOp));
        assert!(!obs.is_available(FunctionId::TrainMarine));
    }
}
