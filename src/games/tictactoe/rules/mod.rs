//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`]. Rules are kept apart from board storage
//! so both the game state and the solver evaluate positions the same way.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{LINES, check_winner, has_won};

use super::{Board, GameOutcome};

/// Derives the outcome of a board: a completed line wins, otherwise a full
/// board is a draw, otherwise the round is in progress.
pub fn evaluate_outcome(board: &Board) -> GameOutcome {
    if let Some(winner) = check_winner(board) {
        GameOutcome::Win(winner)
    } else if is_draw(board) {
        GameOutcome::Draw
    } else {
        GameOutcome::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::Mark;

    #[test]
    fn test_evaluate_outcome_full_boards() {
        // X O X / O X X / O X O
        let drawn: Board = "XOX OXX OXO".parse().unwrap();
        assert_eq!(evaluate_outcome(&drawn), GameOutcome::Draw);

        // Full board with X holding the top row.
        let won: Board = "XXX OOX XOO".parse().unwrap();
        assert_eq!(evaluate_outcome(&won), GameOutcome::Win(Mark::X));
        assert_eq!(evaluate_outcome(&won).winner(), Some(Mark::X));

        assert_eq!(evaluate_outcome(&Board::new()), GameOutcome::InProgress);
    }
}
