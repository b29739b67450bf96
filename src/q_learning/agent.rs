//! The build-order orchestrator driving the Q-table.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    Result,
    actions::{SmartAction, reward},
    game::{Command, FunctionId, Observation, PLAYER_SELF, Point, units},
    ports::Agent,
    q_learning::q_table::{QLearningConfig, QLearningTable},
    state::{StateKey, StateSignature},
};

/// Build offsets are drawn from this range of screen cells away from the
/// command center.
const PLACEMENT_OFFSET_MIN: i64 = 5;
const PLACEMENT_OFFSET_MAX: i64 = 20;

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Screen-derived unit tallies used for reward bookkeeping.
///
/// Counts are distinct-row proxies, not exact unit counts; only increases
/// matter to the reward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct UnitCounts {
    pub marines: usize,
    pub depots: usize,
    pub barracks: usize,
}

impl UnitCounts {
    pub fn derive(obs: &Observation) -> Self {
        Self {
            marines: obs.unit_type.distinct_row_count(units::TERRAN_MARINE),
            depots: obs.unit_type.distinct_row_count(units::TERRAN_SUPPLY_DEPOT),
            barracks: obs.unit_type.distinct_row_count(units::TERRAN_BARRACKS),
        }
    }

    /// Sum of fixed bonuses for every tally that grew since `previous`.
    pub fn reward_since(&self, previous: &UnitCounts) -> f64 {
        let mut total = 0.0;
        if self.marines > previous.marines {
            total += reward::MARINE;
        }
        if self.depots > previous.depots {
            total += reward::DEPOT;
        }
        if self.barracks > previous.barracks {
            total += reward::BARRACKS;
        }
        total
    }
}

/// Tabular Q-learning agent for the BuildMarines mini-game.
///
/// Holds the [`QLearningTable`] plus the ephemeral previous-transition
/// record: on each step the *previous* (state, action) pair is scored
/// against the current observation and consumed by the update rule, then
/// the current pair takes its place. The very first step of an episode has
/// no previous transition and skips the update.
#[derive(Debug, Clone)]
pub struct SmartAgent {
    table: QLearningTable,
    previous: Option<(StateKey, usize)>,
    previous_counts: UnitCounts,
    base_top_left: bool,
    rng: StdRng,
}

impl SmartAgent {
    /// Create an agent with a fresh, empty table.
    ///
    /// # Errors
    ///
    /// Returns a parameter-range error from [`QLearningConfig::validate`].
    pub fn new(config: QLearningConfig) -> Result<Self> {
        Ok(Self {
            table: QLearningTable::new(SmartAction::ALL.len(), config)?,
            previous: None,
            previous_counts: UnitCounts::default(),
            base_top_left: true,
            rng: build_rng(None),
        })
    }

    /// Seed both the table's selection RNG and the agent's targeting RNG.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.table = self.table.with_seed(seed);
        self.rng = StdRng::seed_from_u64(seed.wrapping_add(1));
        self
    }

    /// Read access to the learned table.
    pub fn table(&self) -> &QLearningTable {
        &self.table
    }

    /// Switch to a frozen greedy policy: always exploit, never update.
    /// Used for evaluation rollouts after training.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the fixed parameters are in range.
    pub fn freeze(&mut self) -> Result<()> {
        self.table.set_epsilon(1.0)?;
        self.table.set_learning_rate(0.0)?;
        Ok(())
    }

    /// Mirror a placement offset depending on which side of the map the
    /// base occupies, clamped to the screen.
    fn transform_location(&self, base: Point, dx: i64, dy: i64, obs: &Observation) -> Point {
        let (dx, dy) = if self.base_top_left {
            (dx, dy)
        } else {
            (-dx, -dy)
        };
        let max_x = obs.unit_type.width() as i64 - 1;
        let max_y = obs.unit_type.height() as i64 - 1;
        Point::new(
            (base.x as i64 + dx).clamp(0, max_x) as usize,
            (base.y as i64 + dy).clamp(0, max_y) as usize,
        )
    }

    fn placement_offset(&mut self) -> i64 {
        self.rng.random_range(PLACEMENT_OFFSET_MIN..=PLACEMENT_OFFSET_MAX)
    }

    /// Translate a discrete action into a command, falling back to no-op
    /// whenever the environment's precondition for it is unmet this step.
    fn command_for(&mut self, action: SmartAction, obs: &Observation) -> Command {
        match action {
            SmartAction::DoNothing => Command::no_op(),

            SmartAction::SelectWorker => {
                let workers = obs.unit_type.positions_of(units::TERRAN_SCV);
                if workers.is_empty() {
                    return Command::no_op();
                }
                let target = workers[self.rng.random_range(0..workers.len())];
                Command::select_point(target)
            }

            SmartAction::BuildSupplyDepot => {
                if !obs.is_available(FunctionId::BuildSupplyDepot) {
                    return Command::no_op();
                }
                match obs.unit_type.mean_position(units::TERRAN_COMMAND_CENTER) {
                    Some(center) => {
                        let dy = self.placement_offset();
                        Command::build_supply_depot(self.transform_location(center, 0, dy, obs))
                    }
                    None => Command::no_op(),
                }
            }

            SmartAction::BuildBarracks => {
                if !obs.is_available(FunctionId::BuildBarracks) {
                    return Command::no_op();
                }
                match obs.unit_type.mean_position(units::TERRAN_COMMAND_CENTER) {
                    Some(center) => {
                        let dx = self.placement_offset();
                        Command::build_barracks(self.transform_location(center, dx, 0, obs))
                    }
                    None => Command::no_op(),
                }
            }

            SmartAction::SelectBarracks => {
                match obs.unit_type.mean_position(units::TERRAN_BARRACKS) {
                    Some(target) => Command::select_point(target),
                    None => Command::no_op(),
                }
            }

            SmartAction::TrainMarine => {
                if obs.is_available(FunctionId::TrainMarine) {
                    Command::train_marine()
                } else {
                    Command::no_op()
                }
            }
        }
    }

    fn update_base_side(&mut self, obs: &Observation) {
        let own = obs.minimap_player_relative.positions_of(PLAYER_SELF);
        if !own.is_empty() {
            let mean_y = own.iter().map(|p| p.y).sum::<usize>() / own.len();
            self.base_top_left = mean_y <= obs.minimap_player_relative.height() / 2;
        }
    }
}

impl Agent for SmartAgent {
    fn step(&mut self, obs: &Observation) -> Result<Command> {
        self.update_base_side(obs);

        let current_state = StateSignature::from_observation(obs).key();
        let counts = UnitCounts::derive(obs);

        // Score the previous transition against what this step reveals.
        // The first step of an episode has nothing to learn from.
        if let Some((prev_state, prev_action)) = self.previous.take() {
            let step_reward = counts.reward_since(&self.previous_counts);
            self.table
                .learn(&prev_state, prev_action, step_reward, &current_state);
        }

        let action_index = self.table.choose_action(&current_state);
        let action = SmartAction::from_index(action_index)?;
        let command = self.command_for(action, obs);

        self.previous = Some((current_state, action_index));
        self.previous_counts = counts;

        Ok(command)
    }

    fn reset(&mut self) -> Result<()> {
        self.previous = None;
        self.previous_counts = UnitCounts::default();
        Ok(())
    }

    fn name(&self) -> &str {
        "Q-Learning"
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.table = self.table.clone().with_seed(seed);
        self.rng = StdRng::seed_from_u64(seed.wrapping_add(1));
        Ok(())
    }
}
