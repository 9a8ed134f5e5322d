//! A single game between the user and the computer.

use crate::settings::Level;
use crate::store::RegistryStore;
use derive_more::{Display, Error};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tictactoe_oracle_core::{
    Assignment, Board, Combination, OracleError, Player, Registry, Symbol, choose_move,
};
use tracing::{debug, info, instrument, warn};

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended with `player` completing `line`.
    Won {
        /// The winner.
        player: Player,
        /// The completed line.
        line: Combination,
    },
    /// Game ended in a draw.
    Draw,
}

/// Errors from playing a session.
#[derive(Debug, Clone, Display, Error)]
pub enum SessionError {
    /// The game is already over.
    #[display("Game is already over")]
    GameOver,

    /// It is the other player's turn.
    #[display("It's not {player:?}'s turn")]
    WrongTurn {
        /// Player who tried to move.
        player: Player,
    },

    /// The core rejected the move or lookup.
    #[display("{source}")]
    Core {
        /// Underlying error.
        source: OracleError,
    },
}

impl From<OracleError> for SessionError {
    fn from(source: OracleError) -> Self {
        Self::Core { source }
    }
}

/// One game: board, player pairing, difficulty and the matching registry.
#[derive(Debug, Clone)]
pub struct GameSession<'a> {
    board: Board,
    assignment: Assignment,
    level: Level,
    registry: &'a Registry,
}

impl<'a> GameSession<'a> {
    /// Starts a game with the user playing `user_symbol`.
    #[instrument(skip(store))]
    pub fn new(user_symbol: Symbol, level: Level, store: &'a RegistryStore) -> Self {
        let assignment = Assignment::user_plays(user_symbol);
        info!(user = %assignment.user(), computer = %assignment.computer(), %level, "Starting game");
        Self {
            board: Board::new(),
            assignment,
            level,
            registry: store.for_computer(assignment.computer()),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player pairing.
    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    /// Returns the difficulty.
    pub fn level(&self) -> Level {
        self.level
    }

    /// Returns the game status.
    #[instrument(skip(self), fields(board = %self.board.key()))]
    pub fn status(&self) -> GameStatus {
        match self.board.winner(&self.assignment) {
            Some((player, line)) => GameStatus::Won { player, line },
            None if self.board.is_full() => GameStatus::Draw,
            None => GameStatus::InProgress,
        }
    }

    /// Whether the game has ended.
    pub fn is_over(&self) -> bool {
        self.status() != GameStatus::InProgress
    }

    /// Player due to move, `None` once the game is over.
    #[instrument(skip(self), fields(board = %self.board.key()))]
    pub fn next_player(&self) -> Result<Option<Player>, SessionError> {
        if self.is_over() {
            return Ok(None);
        }
        Ok(Some(self.board.turn_player(&self.assignment)?))
    }

    /// Places the user's symbol at `slot`.
    #[instrument(skip(self), fields(board = %self.board.key()))]
    pub fn user_move(&mut self, slot: usize) -> Result<GameStatus, SessionError> {
        self.ensure_turn(Player::User)?;
        self.board.place(slot, self.assignment.user())?;
        debug!(slot, "User moved");
        Ok(self.status())
    }

    /// Lets the computer pick and play a move; returns the chosen slot.
    #[instrument(skip(self, rng), fields(board = %self.board.key(), level = %self.level))]
    pub fn computer_move<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<usize, SessionError> {
        self.ensure_turn(Player::Computer)?;
        let strategy = self.level.strategy(rng);
        let slot = choose_move(
            &self.board,
            Some(self.registry),
            &self.assignment,
            strategy,
            rng,
        )?;
        self.board.place(slot, self.assignment.computer())?;
        info!(slot, ?strategy, "Computer moved");
        Ok(slot)
    }

    fn ensure_turn(&self, player: Player) -> Result<(), SessionError> {
        match self.next_player()? {
            None => Err(SessionError::GameOver),
            Some(p) if p != player => {
                warn!(?player, "Move out of turn");
                Err(SessionError::WrongTurn { player })
            }
            Some(_) => Ok(()),
        }
    }
}
