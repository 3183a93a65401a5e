//! Strictly Tic-Tac-Toe - Unified CLI
//!
//! Play in the terminal or ask the solver about a board.

#![warn(missing_docs)]

mod cli;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use serde::Serialize;
use strictly_tictactoe::{Board, Mark, Settings, tictactoe::solver};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            mode,
            ai_delay_ms,
            log_file,
        } => {
            let mut settings = Settings::load_or_default(&config)?;
            if let Some(mode) = mode {
                settings = settings.with_mode(mode);
            }
            if let Some(ms) = ai_delay_ms {
                settings = settings.with_ai_delay_ms(ms);
            }
            if let Some(path) = log_file {
                settings = settings.with_log_file(path);
            }
            tui::run_tui(settings).await
        }
        Command::Solve {
            board,
            to_move,
            json,
        } => run_solve(&board, to_move.into(), json),
    }
}

/// Solver answer printed by `solve`.
#[derive(Debug, Serialize)]
struct SolveReport {
    board: Board,
    to_move: Mark,
    position: Option<usize>,
    score: i32,
}

/// Run the solver once and print its choice.
#[instrument(skip(board))]
fn run_solve(board: &str, to_move: Mark, json: bool) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let board: Board = board.parse().context("Invalid board")?;
    info!(%to_move, "Solving board");

    let result = solver::evaluate(&board, to_move);
    let report = SolveReport {
        board,
        to_move,
        position: result.position.map(|p| p.to_index()),
        score: result.score,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}\n", report.board);
    match result.position {
        Some(pos) => println!(
            "{} to move: play {} ({}), score {}",
            to_move,
            pos.to_index(),
            pos,
            result.score
        ),
        None => println!("Board is already over, score {}", result.score),
    }
    Ok(())
}
