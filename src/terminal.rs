//! Line-based terminal front end.

use crate::session::{GameSession, GameStatus};
use crate::settings::FirstPlayer;
use anyhow::{Context, Result, bail};
use rand::Rng;
use std::io::{BufRead, Write};
use tictactoe_oracle_core::{Board, Player, Symbol};
use tracing::{debug, instrument};

/// Terminal game driver over any reader and writer.
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    /// Creates a new terminal over the given streams.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consumes the terminal, returning the output stream.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Prints the greeting.
    pub fn welcome(&mut self) -> Result<()> {
        writeln!(self.output, "Welcome to Tic Tac Toe!")?;
        writeln!(self.output, "X goes first.")?;
        Ok(())
    }

    /// Asks whether the user goes first or second.
    #[instrument(skip(self))]
    pub fn ask_first_player(&mut self) -> Result<FirstPlayer> {
        loop {
            let answer = self.prompt("Do you want to go (F)irst or (S)econd?: ")?;
            match answer.trim().to_lowercase().chars().next() {
                Some('f') => return Ok(FirstPlayer::User),
                Some('s') => return Ok(FirstPlayer::Computer),
                _ => debug!(answer = %answer.trim(), "Unrecognized answer"),
            }
        }
    }

    /// Prints the slot numbering grid.
    pub fn show_slot_numbers(&mut self) -> Result<()> {
        for row in 0..3 {
            let base = row * 3;
            writeln!(self.output, "{} {} {}", base, base + 1, base + 2)?;
        }
        Ok(())
    }

    /// Prints the board.
    pub fn show_board(&mut self, board: &Board) -> Result<()> {
        writeln!(self.output, "{board}")?;
        Ok(())
    }

    /// Reads a slot index 0-8 from the user, re-prompting until valid.
    #[instrument(skip(self))]
    pub fn read_slot(&mut self) -> Result<usize> {
        loop {
            let answer = self.prompt("Enter a slot between 0 and 8: ")?;
            match answer.trim().parse::<usize>() {
                Ok(slot) if slot <= 8 => return Ok(slot),
                Ok(_) => writeln!(self.output, "The slot must be between 0 and 8, inclusive")?,
                Err(_) => writeln!(self.output, "The slot must be an integer")?,
            }
        }
    }

    /// Plays `session` to the end, alternating user and computer turns.
    #[instrument(skip_all)]
    pub fn play<G: Rng + ?Sized>(
        &mut self,
        session: &mut GameSession<'_>,
        rng: &mut G,
    ) -> Result<GameStatus> {
        if session.assignment().user() == Symbol::X {
            self.show_board(session.board())?;
        }
        while let Some(player) = session.next_player()? {
            match player {
                Player::User => self.user_turn(session)?,
                Player::Computer => {
                    let slot = session.computer_move(rng)?;
                    writeln!(self.output, "Computer plays {slot}")?;
                }
            }
            self.show_board(session.board())?;
        }
        Ok(session.status())
    }

    /// Announces the final result.
    pub fn announce(&mut self, status: GameStatus) -> Result<()> {
        let message = match status {
            GameStatus::Won {
                player: Player::User,
                ..
            } => "You won!",
            GameStatus::Won {
                player: Player::Computer,
                ..
            } => "You lost.",
            GameStatus::Draw => "The game is a draw.",
            GameStatus::InProgress => bail!("Game has not finished"),
        };
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    fn user_turn(&mut self, session: &mut GameSession<'_>) -> Result<()> {
        loop {
            let slot = self.read_slot()?;
            if session.board().is_empty(slot) {
                session.user_move(slot)?;
                return Ok(());
            }
            writeln!(self.output, "Slot {slot} is already taken")?;
        }
    }

    fn prompt(&mut self, text: &str) -> Result<String> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            bail!("Input closed");
        }
        Ok(line)
    }
}
