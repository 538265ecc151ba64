//! Error types for board and session operations
//!
//! Invariant violations (bad coordinates, double occupancy) are programmer
//! errors and surface as structured variants rather than panics. Out-of-turn
//! input is not an error at all; it is reported as an ignored swipe.

use serde::{Deserialize, Serialize};

/// Errors that can occur while mutating the board or session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameError {
    /// Coordinate outside the 5x5 grid
    InvalidCoordinate { row: usize, col: usize },
    /// Attempted to place a card on an occupied cell
    CellOccupied { row: usize, col: usize },
    /// Class selection happens exactly once, before the first swipe
    ClassAlreadyChosen,
    /// A swipe was resolved before any class was selected
    ClassNotChosen,
}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;
