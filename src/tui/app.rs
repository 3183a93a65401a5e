//! Application state and logic.

use super::input::{Action, action_for, move_cursor};
use crossterm::event::KeyCode;
use strictly_tictactoe::{AiPacing, GameEvent, Mode, Phase, Position, Session, Settings};
use tokio::time::{Duration, Instant};
use tracing::{debug, instrument};

/// Idle poll interval when no AI move is pending.
const TICK: Duration = Duration::from_millis(100);

/// Main application state.
#[derive(Debug)]
pub struct App {
    session: Session,
    cursor: Position,
    ai_delay: Duration,
    ai_due: Option<Instant>,
    status_message: String,
    should_quit: bool,
}

impl App {
    /// Creates a new application.
    pub fn new(settings: &Settings) -> Self {
        let session = Session::new(*settings.mode()).with_pacing(AiPacing::Deferred);
        Self {
            status_message: turn_message(&session),
            session,
            cursor: Position::Center,
            ai_delay: settings.ai_delay(),
            ai_due: None,
            should_quit: false,
        }
    }

    /// Gets the session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Gets the cursor position.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Returns true once the user asked to quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Handles a key press.
    #[instrument(skip(self), fields(phase = ?self.session.phase()))]
    pub fn handle_key(&mut self, key: KeyCode, now: Instant) {
        let Some(action) = action_for(key) else {
            return;
        };
        debug!(?action, "Key action");

        let ai_pending = *self.session.phase() == Phase::AiThinking;
        match action {
            Action::Quit => self.should_quit = true,
            Action::Cursor(dir) => self.cursor = move_cursor(self.cursor, dir),
            Action::Play(index) => self.submit(index, now),
            Action::PlayCursor => self.submit(self.cursor.to_index(), now),
            Action::ResetScores => {
                self.session.reset_scores();
                self.status_message = "Scores reset.".to_string();
            }
            // A scheduled AI move always lands before the board can change.
            Action::Restart | Action::ToggleMode if ai_pending => {
                debug!("Ignoring restart while the AI is thinking");
            }
            Action::Restart => {
                self.session.restart();
                self.status_message = turn_message(&self.session);
            }
            Action::ToggleMode => {
                let mode = self.session.mode().toggle();
                self.session.set_mode(mode);
                self.status_message = format!("{}. {}", mode.name(), turn_message(&self.session));
            }
        }
    }

    /// Applies the AI move once its delay has elapsed.
    pub fn tick(&mut self, now: Instant) {
        if let Some(due) = self.ai_due
            && now >= due
        {
            self.ai_due = None;
            let events = self.session.complete_ai_move();
            self.apply_events(events, now);
        }
    }

    /// How long the event loop may block before the next tick is needed.
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        match self.ai_due {
            Some(due) => due.saturating_duration_since(now).min(TICK),
            None => TICK,
        }
    }

    /// Score labels in display order: X, O, draws.
    pub fn score_labels(&self) -> [&'static str; 3] {
        match self.session.mode() {
            Mode::HumanVsAi => ["Player", "AI", "Draws"],
            Mode::HumanVsHuman => ["X", "O", "Draws"],
        }
    }

    fn submit(&mut self, index: usize, now: Instant) {
        let events = self.session.submit_move(index);
        if events.is_empty() {
            debug!(index, "Move ignored");
            return;
        }
        self.apply_events(events, now);
    }

    fn apply_events(&mut self, events: Vec<GameEvent>, now: Instant) {
        for event in events {
            match event {
                GameEvent::MoveMade { mark, position } => {
                    self.status_message =
                        format!("{} played {}. {}", mark, position, turn_message(&self.session));
                }
                GameEvent::AiThinking => {
                    self.ai_due = Some(now + self.ai_delay);
                    self.status_message = "AI is thinking...".to_string();
                }
                GameEvent::RoundOver(outcome) => {
                    let message = outcome.message().unwrap_or_default();
                    self.status_message =
                        format!("{} Press 'r' to restart or 'q' to quit.", message);
                }
            }
        }
    }
}

fn turn_message(session: &Session) -> String {
    format!("Player {}'s turn.", session.to_move())
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_tictactoe::{Mark, Square};

    fn app(mode: Mode) -> App {
        App::new(&Settings::default().with_mode(mode).with_ai_delay_ms(300))
    }

    #[test]
    fn test_digit_plays_square() {
        let mut app = app(Mode::HumanVsHuman);
        let now = Instant::now();
        app.handle_key(KeyCode::Char('5'), now);
        assert_eq!(
            app.session().board().get(Position::Center),
            Square::Occupied(Mark::X)
        );
        assert_eq!(app.status_message(), "X played Center. Player O's turn.");
    }

    #[test]
    fn test_ai_move_waits_for_delay() {
        let mut app = app(Mode::HumanVsAi);
        let now = Instant::now();
        app.handle_key(KeyCode::Enter, now);
        assert_eq!(*app.session().phase(), Phase::AiThinking);
        assert_eq!(app.status_message(), "AI is thinking...");

        app.tick(now + Duration::from_millis(100));
        assert!(app.session().board().is_empty(Position::TopLeft));

        app.tick(now + Duration::from_millis(300));
        assert_eq!(
            app.session().board().get(Position::TopLeft),
            Square::Occupied(Mark::O)
        );
        assert_eq!(*app.session().phase(), Phase::AwaitingMove);
    }

    #[test]
    fn test_restart_blocked_while_ai_pending() {
        let mut app = app(Mode::HumanVsAi);
        let now = Instant::now();
        app.handle_key(KeyCode::Char('5'), now);
        app.handle_key(KeyCode::Char('r'), now);
        app.handle_key(KeyCode::Char('m'), now);
        assert_eq!(*app.session().mode(), Mode::HumanVsAi);
        assert!(!app.session().board().is_empty(Position::Center));
    }

    #[test]
    fn test_toggle_mode_changes_labels() {
        let mut app = app(Mode::HumanVsAi);
        assert_eq!(app.score_labels(), ["Player", "AI", "Draws"]);
        app.handle_key(KeyCode::Char('m'), Instant::now());
        assert_eq!(*app.session().mode(), Mode::HumanVsHuman);
        assert_eq!(app.score_labels(), ["X", "O", "Draws"]);
    }

    #[test]
    fn test_poll_timeout_tracks_pending_move() {
        let mut app = app(Mode::HumanVsAi);
        let now = Instant::now();
        assert_eq!(app.poll_timeout(now), TICK);
        app.handle_key(KeyCode::Char('5'), now);
        assert_eq!(app.poll_timeout(now + Duration::from_millis(250)), Duration::from_millis(50));
    }

    #[test]
    fn test_quit() {
        let mut app = app(Mode::HumanVsHuman);
        app.handle_key(KeyCode::Char('q'), Instant::now());
        assert!(app.should_quit());
    }
}
