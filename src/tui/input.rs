//! Keyboard mapping for the terminal UI.

use crossterm::event::KeyCode;
use strictly_tictactoe::Position;

/// What a key press asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Play the square at this index.
    Play(usize),
    /// Play the square under the cursor.
    PlayCursor,
    /// Move the cursor.
    Cursor(KeyCode),
    /// Start a new round.
    Restart,
    /// Switch between human and AI opponents.
    ToggleMode,
    /// Zero the score tally.
    ResetScores,
    /// Leave the game.
    Quit,
}

/// Maps a key to an action. Digits 1-9 address squares 0-8.
pub fn action_for(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('r') => Some(Action::Restart),
        KeyCode::Char('m') => Some(Action::ToggleMode),
        KeyCode::Char('s') => Some(Action::ResetScores),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::PlayCursor),
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => Some(Action::Cursor(key)),
        KeyCode::Char(c) => match c.to_digit(10) {
            Some(d @ 1..=9) => Some(Action::Play(d as usize - 1)),
            _ => None,
        },
        _ => None,
    }
}

/// Moves cursor based on arrow keys, stopping at the board edge.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let (row, col) = (cursor.row(), cursor.col());
    let next = match key {
        KeyCode::Up => row.checked_sub(1).map(|r| (r, col)),
        KeyCode::Down => Some((row + 1, col)),
        KeyCode::Left => col.checked_sub(1).map(|c| (row, c)),
        KeyCode::Right => Some((row, col + 1)),
        _ => None,
    };

    next.and_then(|(r, c)| Position::from_row_col(r, c))
        .unwrap_or(cursor)
}
