//! Error types for the tic-tac-toe core.

use crate::types::Symbol;
use derive_more::{Display, Error};
use tracing::instrument;

/// The specific failure behind an [`OracleError`].
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum OracleErrorKind {
    /// A board was given other than 9 cells.
    #[display("Board must have 9 cells, found {found}")]
    InvalidLength {
        /// Number of cells supplied.
        found: usize,
    },

    /// Board text contained a character outside `X`, `O` and `-`.
    #[display("Invalid board character {character:?} at offset {position}")]
    InvalidCharacter {
        /// The rejected character.
        character: char,
        /// Character offset in the input text.
        position: usize,
    },

    /// Symbol counts cannot arise from alternating play.
    #[display("Unreachable board: {x_count} X against {o_count} O")]
    InvalidBoard {
        /// Number of X cells.
        x_count: usize,
        /// Number of O cells.
        o_count: usize,
    },

    /// A position is absent from the outcome registry.
    #[display("Board {key} is not in the registry")]
    RegistryMiss {
        /// Canonical key of the missing board.
        key: String,
    },

    /// A loaded registry holds an unusable entry.
    #[display("Registry entry {key} is corrupt: {reason}")]
    CorruptRegistry {
        /// Key of the offending entry.
        key: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The optimal strategy was requested without a registry.
    #[display("Optimal strategy requires an outcome registry")]
    MissingRegistry,

    /// The registry was solved for the other computer symbol.
    #[display("Registry solved for computer {found}, session needs {expected}")]
    PerspectiveMismatch {
        /// Symbol the session's computer plays.
        expected: Symbol,
        /// Symbol the registry was built for.
        found: Symbol,
    },

    /// A move was requested on a full board.
    #[display("No available slots")]
    NoAvailableSlots,

    /// Slot index outside 0-8.
    #[display("Slot {slot} is out of range (must be 0-8)")]
    SlotOutOfRange {
        /// The rejected slot.
        slot: usize,
    },

    /// Slot already holds a symbol.
    #[display("Slot {slot} is already occupied")]
    SlotOccupied {
        /// The rejected slot.
        slot: usize,
    },
}

/// Core error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Oracle error: {} at {}:{}", kind, file, line)]
pub struct OracleError {
    /// What went wrong.
    pub kind: OracleErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl OracleError {
    /// Creates a new error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: OracleErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> &OracleErrorKind {
        &self.kind
    }
}

impl From<OracleErrorKind> for OracleError {
    #[track_caller]
    fn from(kind: OracleErrorKind) -> Self {
        Self::new(kind)
    }
}

/// Result alias for core operations.
pub type OracleResult<T> = Result<T, OracleError>;
