//! Tests for the minimax solver and outcome evaluation.

use strictly_tictactoe::tictactoe::solver;
use strictly_tictactoe::{
    Board, GameOutcome, GameState, Mark, Position, Square, WIN_SCORE, best_move,
};

fn board(s: &str) -> Board {
    s.parse().expect("valid board")
}

#[test]
fn test_center_opening_reply_is_legal() {
    let mut game = GameState::new();
    game.apply_move(Position::Center, Mark::X).unwrap();

    let reply = best_move(game.board(), Mark::O).expect("moves remain");
    assert_ne!(reply, Position::Center);
    assert_eq!(reply, Position::TopLeft);
    assert!(game.apply_move(reply, Mark::O).is_ok());
}

#[test]
fn test_threat_on_top_row() {
    // X X _ / O O _ / _ _ _ with O to move: the top-right square is chosen
    // first among the best-scoring moves.
    let b = board("XX. OO. ...");
    assert_eq!(best_move(&b, Mark::O), Some(Position::TopRight));
}

#[test]
fn test_blocks_when_no_win_available() {
    let b = board("XX. .O. ...");
    assert_eq!(best_move(&b, Mark::O), Some(Position::TopRight));
}

#[test]
fn test_full_board_without_line_is_draw() {
    let game = GameState::from_board(board("XOX OXO OXO"));
    assert_eq!(game.evaluate_outcome(), GameOutcome::Draw);
}

#[test]
fn test_top_row_is_x_win() {
    let game = GameState::from_board(board("XXX ... ..."));
    assert_eq!(game.evaluate_outcome(), GameOutcome::Win(Mark::X));
}

#[test]
fn test_evaluate_outcome_idempotent() {
    let game = GameState::from_board(board("XO. .X. O.."));
    let first = game.evaluate_outcome();
    assert_eq!(game.evaluate_outcome(), first);
    assert_eq!(first, GameOutcome::InProgress);
}

#[test]
fn test_scores_stay_o_relative_for_x() {
    // X to move can complete the diagonal. The solver minimizes for X, so a
    // good X move shows as -WIN_SCORE. Optimality is only claimed for O.
    let result = solver::evaluate(&board("X.O .XO ..."), Mark::X);
    assert_eq!(result.position, Some(Position::BottomRight));
    assert_eq!(result.score, -WIN_SCORE);
}

#[test]
fn test_solver_vs_solver_draws() {
    let mut game = GameState::new();
    let mut mark = Mark::X;
    while !game.evaluate_outcome().is_terminal() {
        let pos = best_move(game.board(), mark).expect("live board has a move");
        game.apply_move(pos, mark).unwrap();
        mark = mark.opponent();
    }
    assert_eq!(game.evaluate_outcome(), GameOutcome::Draw);
}

/// Plays every legal X line against the solver's O replies and checks that
/// O never loses, the solver never picks an occupied square, and no board
/// reached this way holds a line for both marks.
fn explore(game: &mut GameState, games: &mut u32) {
    let outcome = game.evaluate_outcome();
    let board = game.board();
    assert!(
        !(solver_line(board, Mark::X) && solver_line(board, Mark::O)),
        "both marks hold a line:\n{}",
        board
    );
    if outcome.is_terminal() {
        assert_ne!(outcome, GameOutcome::Win(Mark::X), "O lost:\n{}", board);
        *games += 1;
        return;
    }

    for x_move in game.available_moves() {
        let mut after_x = game.clone();
        after_x.apply_move(x_move, Mark::X).unwrap();

        match after_x.evaluate_outcome() {
            GameOutcome::InProgress => {
                let reply = best_move(after_x.board(), Mark::O).expect("live board");
                assert_eq!(after_x.board().get(reply), Square::Empty);
                after_x.apply_move(reply, Mark::O).unwrap();
                explore(&mut after_x, games);
            }
            GameOutcome::Win(Mark::X) => panic!("O lost:\n{}", after_x.board()),
            GameOutcome::Win(Mark::O) | GameOutcome::Draw => *games += 1,
        }
    }
}

fn solver_line(board: &Board, mark: Mark) -> bool {
    strictly_tictactoe::tictactoe::rules::has_won(board, mark)
}

#[test]
fn test_o_never_loses_against_any_x_strategy() {
    let mut games = 0;
    explore(&mut GameState::new(), &mut games);
    assert!(games > 0);
}
