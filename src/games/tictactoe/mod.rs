//! Tic-tac-toe: board, rules, game state and the minimax solver.

mod action;
mod game;
mod position;
pub mod rules;
pub mod solver;
mod types;

pub use action::{Move, MoveError};
pub use game::GameState;
pub use position::Position;
pub use solver::{ScoredMove, WIN_SCORE, best_move};
pub use types::{Board, GameOutcome, Mark, ParseBoardError, Square};
