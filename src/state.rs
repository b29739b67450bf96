//! Discrete state signatures for table lookup.
//!
//! The agent observes a continuous, pixel-level game state but learns over a
//! small discrete summary of it. Equal feature tuples must serialize to
//! identical keys, so the signature carries integers only; no float
//! formatting is ever involved in key construction.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::{Observation, units};

/// Discretized summary of one observation, used as the Q-table row key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateSignature {
    /// 1 if at least one supply depot is on screen, else 0
    pub supply_depot: u8,
    /// 1 if at least one barracks is on screen, else 0
    pub barracks: u8,
    /// Current supply cap
    pub supply_limit: u32,
    /// Supply consumed by army units
    pub army_supply: u32,
}

impl StateSignature {
    /// Derive the signature from a raw observation.
    ///
    /// Building presence comes from the unit-type screen layer, the supply
    /// counters from the scalar player data. The discretization is
    /// deterministic: the same observation always yields the same signature.
    pub fn from_observation(obs: &Observation) -> Self {
        let supply_depot = u8::from(obs.unit_type.contains(units::TERRAN_SUPPLY_DEPOT));
        let barracks = u8::from(obs.unit_type.contains(units::TERRAN_BARRACKS));

        Self {
            supply_depot,
            barracks,
            supply_limit: obs.player.supply_limit,
            army_supply: obs.player.army_supply,
        }
    }

    /// Serialize to the stable table key `[d,b,limit,army]`.
    pub fn key(&self) -> StateKey {
        StateKey(format!(
            "[{},{},{},{}]",
            self.supply_depot, self.barracks, self.supply_limit, self.army_supply
        ))
    }
}

impl fmt::Display for StateSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// A serialized state signature.
///
/// This newtype is the only key type the Q-table accepts, which keeps
/// unstable ad-hoc strings from propagating into table lookups. Keys built
/// from equal [`StateSignature`] values compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateKey(String);

impl StateKey {
    /// Wrap a raw key string.
    ///
    /// Intended for tests and tooling; production code derives keys via
    /// [`StateSignature::key`].
    pub fn new(key: impl Into<String>) -> Self {
        StateKey(key.into())
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for StateKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_format() {
        let sig = StateSignature {
            supply_depot: 1,
            barracks: 0,
            supply_limit: 23,
            army_supply: 4,
        };
        assert_eq!(sig.key().as_str(), "[1,0,23,4]");
    }

    #[test]
    fn test_equal_signatures_serialize_identically() {
        let a = StateSignature {
            supply_depot: 0,
            barracks: 0,
            supply_limit: 15,
            army_supply: 0,
        };
        let b = a;
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn test_distinct_signatures_have_distinct_keys() {
        let a = StateSignature {
            supply_depot: 0,
            barracks: 0,
            supply_limit: 15,
            army_supply: 0,
        };
        let b = StateSignature {
            army_supply: 1,
            ..a
        };
        assert_ne!(a.key(), b.key());
    }
}
