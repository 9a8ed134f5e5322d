//! Core domain types for tic-tac-toe.

use serde::{Deserialize, Serialize};
use strum::EnumIter;

/// A mark on the board. X always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum Symbol {
    /// Symbol X (moves first).
    X,
    /// Symbol O (moves second).
    O,
}

impl Symbol {
    /// Returns the other symbol.
    pub fn opposite(self) -> Self {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
        }
    }

    /// Returns the character used in board keys.
    pub fn as_char(self) -> char {
        match self {
            Symbol::X => 'X',
            Symbol::O => 'O',
        }
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// The two roles in a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum Player {
    /// The human player.
    User,
    /// The automated opponent.
    Computer,
}

impl Player {
    /// Returns the other player.
    pub fn opposite(self) -> Self {
        match self {
            Player::User => Player::Computer,
            Player::Computer => Player::User,
        }
    }
}

/// Which symbol each player holds for one game session.
///
/// The two symbols are always opposite; the only constructors take a
/// single symbol and derive the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    user: Symbol,
    computer: Symbol,
}

impl Assignment {
    /// The computer plays `symbol`, the user plays the other.
    pub fn computer_plays(symbol: Symbol) -> Self {
        Self {
            user: symbol.opposite(),
            computer: symbol,
        }
    }

    /// The user plays `symbol`, the computer plays the other.
    pub fn user_plays(symbol: Symbol) -> Self {
        Self::computer_plays(symbol.opposite())
    }

    /// Symbol held by the user.
    pub fn user(&self) -> Symbol {
        self.user
    }

    /// Symbol held by the computer.
    pub fn computer(&self) -> Symbol {
        self.computer
    }

    /// Symbol held by `player`.
    pub fn symbol_of(&self, player: Player) -> Symbol {
        match player {
            Player::User => self.user,
            Player::Computer => self.computer,
        }
    }

    /// Player holding `symbol`.
    pub fn player_of(&self, symbol: Symbol) -> Player {
        if symbol == self.computer {
            Player::Computer
        } else {
            Player::User
        }
    }
}

/// Game-theoretic result, always from the computer's perspective.
///
/// Ordered `Win < Draw < Loss < Undetermined`; move selection picks the
/// minimum.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, EnumIter,
)]
pub enum Outcome {
    /// The computer wins.
    Win,
    /// Neither side wins.
    Draw,
    /// The user wins.
    Loss,
    /// Game still running. Never stored in a registry.
    Undetermined,
}

impl Outcome {
    /// Whether the game has ended.
    pub fn is_final(self) -> bool {
        self != Outcome::Undetermined
    }
}
