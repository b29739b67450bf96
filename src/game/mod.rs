//! Observation and command contract with the game environment.
//!
//! The real-time strategy environment calls the agent once per simulation
//! step with an [`Observation`] and accepts a [`Command`] in return. The
//! types here mirror that fixed external contract; the crate never talks to
//! a game client directly.

pub mod command;
pub mod observation;

pub use command::{Command, FunctionId, Point};
pub use observation::{Observation, PlayerCounters, ScreenLayer};

/// Unit-type identifiers that appear on the unit-type screen layer.
pub mod units {
    pub const TERRAN_COMMAND_CENTER: u16 = 18;
    pub const TERRAN_SUPPLY_DEPOT: u16 = 19;
    pub const TERRAN_BARRACKS: u16 = 21;
    pub const TERRAN_SCV: u16 = 45;
    pub const TERRAN_MARINE: u16 = 48;
}

/// Value marking own units on the player-relative minimap layer.
pub const PLAYER_SELF: u16 = 1;
