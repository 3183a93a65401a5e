//! Board-level game state for tic-tac-toe.

use super::action::{Move, MoveError};
use super::rules;
use super::{Board, GameOutcome, Mark, Position, Square};
use tracing::{debug, instrument};

/// The 9-cell board with move validation and outcome detection.
///
/// Turn order is not tracked here; the session decides which mark moves.
/// The outcome is never stored, it is recomputed from the board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameState {
    board: Board,
}

impl GameState {
    /// Creates a game with an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing board.
    pub fn from_board(board: Board) -> Self {
        Self { board }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Places `mark` at `pos`.
    ///
    /// # Errors
    ///
    /// - [`MoveError::GameAlreadyOver`] if the board is already won or full.
    /// - [`MoveError::CellOccupied`] if the square is not empty.
    #[instrument(skip(self))]
    pub fn apply_move(&mut self, pos: Position, mark: Mark) -> Result<(), MoveError> {
        if self.evaluate_outcome().is_terminal() {
            return Err(MoveError::GameAlreadyOver);
        }

        if !self.board.is_empty(pos) {
            return Err(MoveError::CellOccupied(pos));
        }

        self.board.set(pos, Square::Occupied(mark));
        debug!(action = %Move::new(mark, pos), "Move applied");
        Ok(())
    }

    /// Derives the current outcome from the board.
    pub fn evaluate_outcome(&self) -> GameOutcome {
        rules::evaluate_outcome(&self.board)
    }

    /// Empty squares in ascending index order.
    pub fn available_moves(&self) -> Vec<Position> {
        Position::valid_moves(&self.board)
    }

    /// Clears the board.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.board.clear();
    }
}
