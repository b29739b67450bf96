//! Deterministic, simplified BuildMarines simulation.
//!
//! A stand-in for the real game client that honors the same observation and
//! command contract: mineral income per step, build commands gated on worker
//! selection and cost, marine training gated on barracks selection and the
//! supply cap. Deliberately crude: it exists to exercise the agent and the
//! training pipeline, not to model the game faithfully.

use crate::{
    game::{Command, FunctionId, Observation, PLAYER_SELF, Point, ScreenLayer, units},
    ports::Environment,
};

const SCREEN_SIZE: usize = 64;
const MINIMAP_SIZE: usize = 32;

const STARTING_MINERALS: u32 = 50;
const MINERALS_PER_STEP: u32 = 10;
const BASE_SUPPLY_LIMIT: u32 = 15;
const SUPPLY_PER_DEPOT: u32 = 8;

const DEPOT_COST: u32 = 100;
const BARRACKS_COST: u32 = 150;
const MARINE_COST: u32 = 50;

/// Command center anchor on the screen grid.
const COMMAND_CENTER: Point = Point { x: 8, y: 8 };
/// Worker row just below the command center.
const WORKER_ROW: usize = 12;
/// Marines are rendered one per row starting here, so distinct-row counting
/// sees each one.
const MARINE_ROW_BASE: usize = 40;

/// What the player currently has selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selection {
    None,
    Worker,
    Barracks,
}

/// In-process BuildMarines world.
#[derive(Debug, Clone)]
pub struct BuildMarinesSim {
    minerals: u32,
    selection: Selection,
    depots: Vec<Point>,
    barracks: Vec<Point>,
    marines: u32,
    steps: usize,
}

impl BuildMarinesSim {
    pub fn new() -> Self {
        Self {
            minerals: STARTING_MINERALS,
            selection: Selection::None,
            depots: Vec::new(),
            barracks: Vec::new(),
            marines: 0,
            steps: 0,
        }
    }

    /// Marines produced so far this episode.
    pub fn marines(&self) -> u32 {
        self.marines
    }

    /// Steps simulated this episode.
    pub fn steps(&self) -> usize {
        self.steps
    }

    fn supply_limit(&self) -> u32 {
        BASE_SUPPLY_LIMIT + SUPPLY_PER_DEPOT * self.depots.len() as u32
    }

    fn can_build_depot(&self) -> bool {
        self.selection == Selection::Worker && self.minerals >= DEPOT_COST
    }

    fn can_build_barracks(&self) -> bool {
        self.selection == Selection::Worker
            && self.minerals >= BARRACKS_COST
            && !self.depots.is_empty()
    }

    fn can_train_marine(&self) -> bool {
        self.selection == Selection::Barracks
            && !self.barracks.is_empty()
            && self.minerals >= MARINE_COST
            && self.marines < self.supply_limit()
    }

    /// Snap a requested placement into the playable area, one building per
    /// distinct row so the screen stays readable for row counting.
    fn placement_row(&self, requested: Point) -> Point {
        let occupied: Vec<usize> = self
            .depots
            .iter()
            .chain(self.barracks.iter())
            .map(|p| p.y)
            .collect();
        let mut y = requested.y.clamp(1, SCREEN_SIZE - 2);
        while occupied.contains(&y) {
            y = (y + 1) % (SCREEN_SIZE - 1);
        }
        Point::new(requested.x.clamp(1, SCREEN_SIZE - 2), y)
    }

    fn worker_positions(&self) -> [Point; 3] {
        [
            Point::new(6, WORKER_ROW),
            Point::new(8, WORKER_ROW),
            Point::new(10, WORKER_ROW),
        ]
    }

    fn apply(&mut self, command: &Command) {
        match command.function {
            FunctionId::NoOp => {}

            FunctionId::SelectPoint => {
                if let Some(target) = command.target {
                    if self.worker_positions().contains(&target) {
                        self.selection = Selection::Worker;
                    } else if self.hits_barracks(target) {
                        self.selection = Selection::Barracks;
                    } else {
                        self.selection = Selection::None;
                    }
                }
            }

            FunctionId::BuildSupplyDepot => {
                if self.can_build_depot() {
                    if let Some(target) = command.target {
                        self.depots.push(self.placement_row(target));
                        self.minerals -= DEPOT_COST;
                    }
                }
            }

            FunctionId::BuildBarracks => {
                if self.can_build_barracks() {
                    if let Some(target) = command.target {
                        self.barracks.push(self.placement_row(target));
                        self.minerals -= BARRACKS_COST;
                    }
                }
            }

            FunctionId::TrainMarine => {
                if self.can_train_marine() {
                    self.marines += 1;
                    self.minerals -= MARINE_COST;
                }
            }
        }
    }

    fn hits_barracks(&self, target: Point) -> bool {
        // Selecting the barracks goes through its mean position; accept a
        // small tolerance around any placed barracks.
        self.barracks.iter().any(|b| {
            b.x.abs_diff(target.x) <= 2 && b.y.abs_diff(target.y) <= 2
        })
    }

    fn render(&self) -> Observation {
        let mut unit_type =
            ScreenLayer::new(SCREEN_SIZE, SCREEN_SIZE).expect("fixed non-zero dimensions");

        for y in COMMAND_CENTER.y - 2..=COMMAND_CENTER.y + 2 {
            for x in COMMAND_CENTER.x - 2..=COMMAND_CENTER.x + 2 {
                unit_type.set(x, y, units::TERRAN_COMMAND_CENTER);
            }
        }
        for worker in self.worker_positions() {
            unit_type.set(worker.x, worker.y, units::TERRAN_SCV);
        }
        for depot in &self.depots {
            unit_type.set(depot.x, depot.y, units::TERRAN_SUPPLY_DEPOT);
        }
        for barracks in &self.barracks {
            unit_type.set(barracks.x, barracks.y, units::TERRAN_BARRACKS);
        }
        for i in 0..self.marines as usize {
            let y = MARINE_ROW_BASE + i;
            if y < SCREEN_SIZE {
                unit_type.set(30, y, units::TERRAN_MARINE);
            }
        }

        let mut minimap =
            ScreenLayer::new(MINIMAP_SIZE, MINIMAP_SIZE).expect("fixed non-zero dimensions");
        for y in 2..6 {
            for x in 2..6 {
                minimap.set(x, y, PLAYER_SELF);
            }
        }

        let mut available = std::collections::HashSet::from([
            FunctionId::NoOp,
            FunctionId::SelectPoint,
        ]);
        if self.can_build_depot() {
            available.insert(FunctionId::BuildSupplyDepot);
        }
        if self.can_build_barracks() {
            available.insert(FunctionId::BuildBarracks);
        }
        if self.can_train_marine() {
            available.insert(FunctionId::TrainMarine);
        }

        Observation {
            unit_type,
            minimap_player_relative: minimap,
            player: crate::game::PlayerCounters {
                minerals: self.minerals,
                supply_limit: self.supply_limit(),
                army_supply: self.marines,
            },
            available_actions: available,
        }
    }
}

impl Default for BuildMarinesSim {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment for BuildMarinesSim {
    fn reset(&mut self) -> Observation {
        *self = Self::new();
        self.render()
    }

    fn step(&mut self, command: &Command) -> Observation {
        self.apply(command);
        self.minerals += MINERALS_PER_STEP;
        self.steps += 1;
        self.render()
    }

    fn name(&self) -> &str {
        "BuildMarinesSim"
    }
}

/// Drive the simulation through a fixed command sequence; test helper.
#[cfg(test)]
fn run_commands(sim: &mut BuildMarinesSim, commands: &[Command]) -> Observation {
    let mut obs = sim.reset();
    for cmd in commands {
        obs = sim.step(cmd);
    }
    obs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_produces_base_layout() {
        let mut sim = BuildMarinesSim::new();
        let obs = sim.reset();
        assert!(obs.unit_type.contains(units::TERRAN_COMMAND_CENTER));
        assert!(obs.unit_type.contains(units::TERRAN_SCV));
        assert!(!obs.unit_type.contains(units::TERRAN_SUPPLY_DEPOT));
        assert_eq!(obs.player.supply_limit, BASE_SUPPLY_LIMIT);
        assert!(!obs.is_available(FunctionId::BuildSupplyDepot));
    }

    #[test]
    fn test_build_requires_worker_selection() {
        let mut sim = BuildMarinesSim::new();
        // Enough income, but nothing selected: depot build is ignored.
        let obs = run_commands(
            &mut sim,
            &[
                Command::no_op(),
                Command::no_op(),
                Command::no_op(),
                Command::no_op(),
                Command::no_op(),
                Command::build_supply_depot(Point::new(20, 20)),
            ],
        );
        assert!(!obs.unit_type.contains(units::TERRAN_SUPPLY_DEPOT));
    }

    #[test]
    fn test_depot_raises_supply_limit() {
        let mut sim = BuildMarinesSim::new();
        let obs = run_commands(
            &mut sim,
            &[
                Command::select_point(Point::new(8, WORKER_ROW)),
                // Idle until 100 minerals accrue.
                Command::no_op(),
                Command::no_op(),
                Command::no_op(),
                Command::no_op(),
                Command::build_supply_depot(Point::new(20, 20)),
            ],
        );
        assert!(obs.unit_type.contains(units::TERRAN_SUPPLY_DEPOT));
        assert_eq!(obs.player.supply_limit, BASE_SUPPLY_LIMIT + SUPPLY_PER_DEPOT);
    }

    #[test]
    fn test_full_build_order_produces_marine() {
        let mut sim = BuildMarinesSim::new();
        sim.reset();

        // Select worker, accrue, place depot, accrue, place barracks.
        let mut obs = sim.step(&Command::select_point(Point::new(8, WORKER_ROW)));
        while !obs.is_available(FunctionId::BuildSupplyDepot) {
            obs = sim.step(&Command::no_op());
        }
        obs = sim.step(&Command::build_supply_depot(Point::new(20, 20)));
        while !obs.is_available(FunctionId::BuildBarracks) {
            obs = sim.step(&Command::no_op());
        }
        obs = sim.step(&Command::build_barracks(Point::new(24, 24)));
        assert!(obs.unit_type.contains(units::TERRAN_BARRACKS));

        // Select the barracks through its on-screen mean position, then train.
        let barracks = obs.unit_type.mean_position(units::TERRAN_BARRACKS).unwrap();
        obs = sim.step(&Command::select_point(barracks));
        while !obs.is_available(FunctionId::TrainMarine) {
            obs = sim.step(&Command::no_op());
        }
        obs = sim.step(&Command::train_marine());

        assert_eq!(obs.player.army_supply, 1);
        assert_eq!(obs.unit_type.distinct_row_count(units::TERRAN_MARINE), 1);
    }

    #[test]
    fn test_marine_training_capped_by_supply() {
        let mut sim = BuildMarinesSim::new();
        sim.reset();
        sim.selection = Selection::Barracks;
        sim.barracks.push(Point::new(24, 24));
        sim.minerals = 10_000;
        for _ in 0..BASE_SUPPLY_LIMIT + 10 {
            sim.step(&Command::train_marine());
        }
        assert_eq!(sim.marines(), BASE_SUPPLY_LIMIT);
    }
}
