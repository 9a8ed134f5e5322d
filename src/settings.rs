//! Session settings: difficulty and who moves first.

use clap::ValueEnum;
use rand::Rng;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};
use tictactoe_oracle_core::{Strategy, Symbol};
use tracing::{debug, instrument};

/// Difficulty of the computer opponent.
///
/// Each turn rolls 1-3; the heuristic strategy runs when the roll exceeds
/// the level's index, so `Easy` never plays optimally and `Impossible`
/// always does.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    ValueEnum,
    EnumIter,
    Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Level {
    /// Always heuristic.
    Easy,
    /// Optimal one turn in three.
    Medium,
    /// Optimal two turns in three.
    Hard,
    /// Always optimal.
    #[default]
    Impossible,
}

/// Highest value of the per-turn roll.
const ROLL_SIDES: u8 = 3;

impl Level {
    /// Position in `Easy..=Impossible`, 0-3.
    pub fn index(self) -> u8 {
        match self {
            Self::Easy => 0,
            Self::Medium => 1,
            Self::Hard => 2,
            Self::Impossible => 3,
        }
    }

    /// Probability that [`Level::strategy`] returns [`Strategy::Optimal`].
    #[instrument]
    pub fn optimal_chance(self) -> f64 {
        f64::from(self.index()) / f64::from(ROLL_SIDES)
    }

    /// Rolls the strategy for one computer turn.
    #[instrument(skip(rng))]
    pub fn strategy<R: Rng + ?Sized>(self, rng: &mut R) -> Strategy {
        let roll = rng.random_range(1..=ROLL_SIDES);
        let strategy = if roll > self.index() {
            Strategy::Heuristic
        } else {
            Strategy::Optimal
        };
        debug!(roll, ?strategy, "Strategy rolled");
        strategy
    }
}

/// Which player takes the first move (X) in a new game.
///
/// Defaults to [`FirstPlayer::User`] so the human moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FirstPlayer {
    /// The user plays X.
    #[default]
    User,
    /// The computer plays X.
    Computer,
}

impl FirstPlayer {
    /// Symbol the user plays under this choice.
    #[instrument]
    pub fn user_symbol(self) -> Symbol {
        match self {
            Self::User => Symbol::X,
            Self::Computer => Symbol::O,
        }
    }
}
