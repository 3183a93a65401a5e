//! Exhaustive minimax search for tic-tac-toe.
//!
//! Scores are always from O's point of view: O maximizes, X minimizes.
//! A win for O scores [`WIN_SCORE`], a win for X scores `-WIN_SCORE`,
//! a draw scores 0. There is no depth bonus, pruning, or cache; the
//! full tree below a position is searched on every call.

use super::rules::has_won;
use super::{Board, Mark, Position, Square};
use serde::Serialize;
use std::ops::{Deref, DerefMut};
use tracing::{debug, instrument};

/// Score of a board won by O. A board won by X scores the negation.
pub const WIN_SCORE: i32 = 10;

/// A move paired with its minimax score.
///
/// `position` is `None` for terminal boards, where no move is searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoredMove {
    /// Chosen move, if any move was available.
    pub position: Option<Position>,
    /// Score of the position after the chosen move, O-relative.
    pub score: i32,
}

impl ScoredMove {
    fn terminal(score: i32) -> Self {
        Self {
            position: None,
            score,
        }
    }
}

/// A mark placed for one branch of the search. The square is emptied again
/// when the trial is dropped.
struct Trial<'a> {
    board: &'a mut Board,
    pos: Position,
}

impl<'a> Trial<'a> {
    fn place(board: &'a mut Board, pos: Position, mark: Mark) -> Self {
        board.set(pos, Square::Occupied(mark));
        Self { board, pos }
    }
}

impl Deref for Trial<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Trial<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Trial<'_> {
    fn drop(&mut self) {
        self.board.set(self.pos, Square::Empty);
    }
}

/// Returns the optimal move for `mark` on `board`.
///
/// The board must not be terminal; `None` is returned when it is (a line
/// is complete or no square is empty).
pub fn best_move(board: &Board, mark: Mark) -> Option<Position> {
    evaluate(board, mark).position
}

/// Searches the full game tree below `board` with `mark` to move.
///
/// Among equally scored moves the lowest index wins.
#[instrument(skip(board), fields(board = %board))]
pub fn evaluate(board: &Board, mark: Mark) -> ScoredMove {
    let mut scratch = board.clone();
    let mut nodes = 0u64;
    let result = minimax(&mut scratch, mark, &mut nodes);
    debug_assert_eq!(&scratch, board, "search must restore the board");

    debug!(
        nodes,
        score = result.score,
        position = ?result.position,
        "Search complete"
    );
    result
}

fn minimax(board: &mut Board, mark: Mark, nodes: &mut u64) -> ScoredMove {
    *nodes += 1;

    if has_won(board, Mark::X) {
        return ScoredMove::terminal(-WIN_SCORE);
    }
    if has_won(board, Mark::O) {
        return ScoredMove::terminal(WIN_SCORE);
    }

    let moves = Position::valid_moves(board);
    if moves.is_empty() {
        return ScoredMove::terminal(0);
    }

    let mut best: Option<(Position, i32)> = None;
    for pos in moves {
        let score = {
            let mut trial = Trial::place(board, pos, mark);
            minimax(&mut trial, mark.opponent(), nodes).score
        };

        let improves = match best {
            None => true,
            Some((_, best_score)) => match mark {
                Mark::O => score > best_score,
                Mark::X => score < best_score,
            },
        };
        if improves {
            best = Some((pos, score));
        }
    }

    match best {
        Some((pos, score)) => ScoredMove {
            position: Some(pos),
            score,
        },
        None => ScoredMove::terminal(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_terminal_boards_have_no_move() {
        assert_eq!(evaluate(&board("XXX OO. ..."), Mark::O), ScoredMove::terminal(-10));
        assert_eq!(evaluate(&board("OOO XX. X.."), Mark::X), ScoredMove::terminal(10));
        assert_eq!(evaluate(&board("XOX OXX OXO"), Mark::X), ScoredMove::terminal(0));
        assert_eq!(best_move(&board("XOX OXX OXO"), Mark::O), None);
    }

    #[test]
    fn test_takes_immediate_win() {
        // O completes the middle row.
        let result = evaluate(&board("XX. OO. X.."), Mark::O);
        assert_eq!(result.position, Some(Position::MiddleRight));
        assert_eq!(result.score, WIN_SCORE);
    }

    #[test]
    fn test_blocks_forced_loss() {
        // Anything but the top-right lets X complete the top row.
        let result = evaluate(&board("XX. .O. ..."), Mark::O);
        assert_eq!(result.position, Some(Position::TopRight));
        assert!(result.score >= 0);
    }

    #[test]
    fn test_ties_keep_lowest_index() {
        // Every reply to a center opening draws at best, so the first
        // corner is chosen.
        let result = evaluate(&board("... .X. ..."), Mark::O);
        assert_eq!(result.position, Some(Position::TopLeft));
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_search_restores_board() {
        let original = board("X.. .O. ..X");
        let mut scratch = original.clone();
        let mut nodes = 0;
        minimax(&mut scratch, Mark::O, &mut nodes);
        assert_eq!(scratch, original);
        assert!(nodes > 1);
    }

    #[test]
    fn test_trial_restores_on_drop() {
        let mut b = Board::new();
        {
            let trial = Trial::place(&mut b, Position::Center, Mark::X);
            assert_eq!(trial.get(Position::Center), Square::Occupied(Mark::X));
        }
        assert!(b.is_empty(Position::Center));
    }
}
