//! Tests for session orchestration.

use strictly_tictactoe::{
    AiPacing, Board, GameEvent, GameOutcome, Mark, Mode, Phase, Position, Session,
};

#[test]
fn test_occupied_square_leaves_session_unchanged() {
    let mut session = Session::new(Mode::HumanVsHuman);
    session.submit_move(4);

    let board = session.board().clone();
    let to_move = *session.to_move();
    let phase = *session.phase();
    let scores = *session.scores();

    assert!(session.submit_move(4).is_empty());
    assert_eq!(session.board(), &board);
    assert_eq!(*session.to_move(), to_move);
    assert_eq!(*session.phase(), phase);
    assert_eq!(*session.scores(), scores);
}

#[test]
fn test_ai_replies_in_same_call() {
    let mut session = Session::new(Mode::HumanVsAi);
    let events = session.submit_move(Position::Center.to_index());

    assert_eq!(
        events,
        vec![
            GameEvent::MoveMade {
                mark: Mark::X,
                position: Position::Center
            },
            GameEvent::AiThinking,
            GameEvent::MoveMade {
                mark: Mark::O,
                position: Position::TopLeft
            },
        ]
    );
    assert_eq!(*session.to_move(), Mark::X);
    assert_eq!(*session.phase(), Phase::AwaitingMove);
}

#[test]
fn test_ai_never_loses_a_round() {
    // Human opens in a corner, then always takes the lowest free square.
    let mut session = Session::new(Mode::HumanVsAi);
    while !session.is_game_over() {
        let next = Position::valid_moves(session.board())[0];
        session.submit_move(next.to_index());
    }

    assert_ne!(session.outcome(), GameOutcome::Win(Mark::X));
    assert_eq!(session.scores().rounds(), 1);
    assert_eq!(*session.scores().x_wins(), 0);
}

#[test]
fn test_round_end_is_reported_and_recorded() {
    // Human always takes the highest free square.
    let mut session = Session::new(Mode::HumanVsAi);
    let mut last = Vec::new();
    while !session.is_game_over() {
        let next = *Position::valid_moves(session.board()).last().unwrap();
        last = session.submit_move(next.to_index());
    }

    assert!(matches!(last.last(), Some(GameEvent::RoundOver(_))));
    assert_eq!(session.scores().rounds(), 1);
    assert!(session.message().is_some());
}

#[test]
fn test_restart_after_round_and_mode_change() {
    let mut session = Session::new(Mode::HumanVsHuman);
    for idx in [0, 3, 1, 4, 2] {
        session.submit_move(idx);
    }
    assert_eq!(session.message().as_deref(), Some("X wins!"));

    session.set_mode(Mode::HumanVsAi);
    assert_eq!(session.board(), &Board::new());
    assert_eq!(*session.phase(), Phase::AwaitingMove);
    assert_eq!(*session.scores().x_wins(), 1);
    assert_eq!(session.message(), None);
}

#[test]
fn test_deferred_rounds_finish() {
    let mut session = Session::new(Mode::HumanVsAi).with_pacing(AiPacing::Deferred);
    while !session.is_game_over() {
        let next = Position::valid_moves(session.board())[0];
        session.submit_move(next.to_index());
        session.complete_ai_move();
        assert_ne!(*session.phase(), Phase::AiThinking);
    }

    assert_ne!(session.outcome(), GameOutcome::Win(Mark::X));
    assert_eq!(*session.phase(), Phase::RoundOver);
}

#[test]
fn test_reset_scores() {
    let mut session = Session::new(Mode::HumanVsHuman);
    for idx in [0, 3, 1, 4, 2] {
        session.submit_move(idx);
    }
    session.reset_scores();
    assert_eq!(session.scores().rounds(), 0);
    assert!(session.is_game_over());
}
