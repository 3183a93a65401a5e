//! Strictly Tic-Tac-Toe library - a 3x3 game engine with a perfect opponent
//!
//! # Architecture
//!
//! - **Games**: board, rules and game state for tic-tac-toe
//! - **Solver**: exhaustive minimax, O maximizes and X minimizes
//! - **Session**: turn order, mode, AI replies and the score tally
//! - **Config**: TOML settings for the terminal front end
//!
//! # Example
//!
//! ```
//! use strictly_tictactoe::{GameEvent, Mark, Mode, Position, Session};
//!
//! let mut session = Session::new(Mode::HumanVsAi);
//! let events = session.submit_move(Position::Center.to_index());
//!
//! // The solver answers in the same call.
//! assert!(events.contains(&GameEvent::MoveMade {
//!     mark: Mark::O,
//!     position: Position::TopLeft,
//! }));
//! assert_eq!(*session.to_move(), Mark::X);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod games;
mod session;

// Crate-level exports - Configuration
pub use config::{ConfigError, Settings};

// Crate-level exports - Session management
pub use session::{AiPacing, GameEvent, Mode, Phase, ScoreTally, Session};

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    Board, GameOutcome, GameState, Mark, Move, MoveError, ParseBoardError, Position, ScoredMove,
    Square, WIN_SCORE, best_move,
};

/// Minimax search and board rules.
pub mod tictactoe {
    pub use crate::games::tictactoe::rules;
    pub use crate::games::tictactoe::solver;
}
