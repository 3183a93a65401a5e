//! Command-line interface for strictly_tictactoe.

use clap::{Parser, Subcommand, ValueEnum};
use strictly_tictactoe::{Mark, Mode};

/// Strictly Tic-Tac-Toe - play against a perfect minimax opponent
#[derive(Parser, Debug)]
#[command(name = "strictly_tictactoe")]
#[command(about = "Tic-tac-toe with an exhaustive minimax opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal UI
    Play {
        /// Path to a TOML settings file (defaults are used if it is missing)
        #[arg(short, long, default_value = "tictactoe.toml")]
        config: std::path::PathBuf,

        /// Starting mode, overrides the settings file
        #[arg(short, long, value_enum)]
        mode: Option<Mode>,

        /// Pause before the AI's move, in milliseconds
        #[arg(long)]
        ai_delay_ms: Option<u64>,

        /// Log file, overrides the settings file
        #[arg(long)]
        log_file: Option<std::path::PathBuf>,
    },

    /// Print the solver's move for a board
    Solve {
        /// Board as 9 cells in row-major order: X, O, and . _ or - for empty
        #[arg(short, long)]
        board: String,

        /// Mark to move
        #[arg(short, long, value_enum)]
        to_move: MarkArg,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Mark accepted on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkArg {
    /// Mark X
    X,
    /// Mark O
    O,
}

impl From<MarkArg> for Mark {
    fn from(arg: MarkArg) -> Self {
        match arg {
            MarkArg::X => Mark::X,
            MarkArg::O => Mark::O,
        }
    }
}
