//! Round orchestration: turn order, mode, AI replies and the score tally.

use crate::games::tictactoe::{
    Board, GameOutcome, GameState, Mark, MoveError, Position, best_move,
};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Who is playing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Two humans share the keyboard.
    HumanVsHuman,
    /// The human plays X, the solver plays O.
    #[default]
    HumanVsAi,
}

impl Mode {
    /// Returns display name.
    pub fn name(&self) -> &'static str {
        match self {
            Mode::HumanVsHuman => "Human vs Human",
            Mode::HumanVsAi => "Human vs AI",
        }
    }

    /// Switches to the other mode.
    pub fn toggle(self) -> Self {
        match self {
            Mode::HumanVsHuman => Mode::HumanVsAi,
            Mode::HumanVsAi => Mode::HumanVsHuman,
        }
    }

    /// Returns true if `mark` is played by the solver in this mode.
    pub fn is_ai(&self, mark: Mark) -> bool {
        matches!((self, mark), (Mode::HumanVsAi, Mark::O))
    }
}

/// How the solver's reply is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AiPacing {
    /// The reply is applied inside the call that handed O the turn.
    #[default]
    Immediate,
    /// The session waits in [`Phase::AiThinking`] until
    /// [`Session::complete_ai_move`] is called.
    Deferred,
}

/// Where the current round stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for a human move.
    AwaitingMove,
    /// An AI reply is scheduled; human moves are ignored.
    AiThinking,
    /// A win or draw was recorded; the board is frozen until restart.
    RoundOver,
}

/// Cumulative results across rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Getters, Serialize, Deserialize)]
pub struct ScoreTally {
    /// Rounds won by X.
    x_wins: u32,
    /// Rounds won by O.
    o_wins: u32,
    /// Rounds drawn.
    draws: u32,
}

impl ScoreTally {
    /// Creates an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts a finished round. `InProgress` is not counted.
    pub fn record(&mut self, outcome: GameOutcome) {
        match outcome.winner() {
            Some(Mark::X) => self.x_wins += 1,
            Some(Mark::O) => self.o_wins += 1,
            None if outcome == GameOutcome::Draw => self.draws += 1,
            None => {}
        }
    }

    /// Total rounds counted.
    pub fn rounds(&self) -> u32 {
        self.x_wins + self.o_wins + self.draws
    }

    /// Zeroes every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Things that happened during one session call, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A mark was placed.
    MoveMade {
        /// Mark placed.
        mark: Mark,
        /// Where it was placed.
        position: Position,
    },
    /// The solver's reply is pending.
    AiThinking,
    /// The round ended and was recorded in the tally.
    RoundOver(GameOutcome),
}

/// A play session: one board, one mode, and the running tally.
///
/// Human input that cannot be applied (occupied square, index outside
/// 0-8, round over, AI reply pending) is ignored and produces no events.
#[derive(Debug, Clone, Getters)]
pub struct Session {
    /// Board state.
    #[getter(skip)]
    game: GameState,
    /// Current mode.
    mode: Mode,
    /// Mark to move next.
    to_move: Mark,
    /// Round phase.
    phase: Phase,
    /// Results so far.
    scores: ScoreTally,
    /// AI reply scheduling.
    pacing: AiPacing,
}

impl Session {
    /// Creates a session with an empty board and X to move.
    #[instrument]
    pub fn new(mode: Mode) -> Self {
        info!(mode = mode.name(), "Creating session");
        Self {
            game: GameState::new(),
            mode,
            to_move: Mark::X,
            phase: Phase::AwaitingMove,
            scores: ScoreTally::new(),
            pacing: AiPacing::default(),
        }
    }

    /// Sets how AI replies are scheduled.
    pub fn with_pacing(mut self, pacing: AiPacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        self.game.board()
    }

    /// Outcome of the current board.
    pub fn outcome(&self) -> GameOutcome {
        self.game.evaluate_outcome()
    }

    /// End-of-round message once the round is over.
    pub fn message(&self) -> Option<String> {
        match self.phase {
            Phase::RoundOver => self.outcome().message(),
            Phase::AwaitingMove | Phase::AiThinking => None,
        }
    }

    /// Returns true once a win or draw has been recorded.
    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::RoundOver
    }

    /// Clears the board and gives X the move. Scores are kept.
    ///
    /// Does nothing while an AI reply is pending; the reply lands first.
    #[instrument(skip(self), fields(mode = self.mode.name()))]
    pub fn create_or_reset_board(&mut self) {
        if self.phase == Phase::AiThinking {
            warn!("Ignoring reset: AI reply pending");
            return;
        }
        self.game.reset();
        self.to_move = Mark::X;
        self.phase = Phase::AwaitingMove;
        debug!("Board reset");
    }

    /// Starts a new round. Alias of [`Session::create_or_reset_board`].
    pub fn restart(&mut self) {
        self.create_or_reset_board();
    }

    /// Switches mode and starts a new round.
    ///
    /// Does nothing while an AI reply is pending.
    #[instrument(skip(self))]
    pub fn set_mode(&mut self, mode: Mode) {
        if self.phase == Phase::AiThinking {
            warn!(to = mode.name(), "Ignoring mode change: AI reply pending");
            return;
        }
        info!(from = self.mode.name(), to = mode.name(), "Changing mode");
        self.mode = mode;
        self.create_or_reset_board();
    }

    /// Zeroes the tally without touching the board.
    #[instrument(skip(self))]
    pub fn reset_scores(&mut self) {
        self.scores.reset();
    }

    /// Applies a human move for the mark to move.
    ///
    /// In [`Mode::HumanVsAi`] the solver's reply follows when the round
    /// continues, either within this call or after
    /// [`Session::complete_ai_move`], depending on [`AiPacing`].
    #[instrument(skip(self), fields(to_move = %self.to_move, phase = ?self.phase))]
    pub fn submit_move(&mut self, index: usize) -> Vec<GameEvent> {
        let mut events = Vec::new();

        if self.phase != Phase::AwaitingMove {
            debug!("Ignoring move: not awaiting a human move");
            return events;
        }

        let Some(position) = Position::from_index(index) else {
            warn!("Ignoring move: index out of range");
            return events;
        };

        if let Err(e) = self.play(position, &mut events) {
            debug!(error = %e, "Ignoring move");
            return events;
        }

        self.schedule_ai(&mut events);
        events
    }

    /// Applies the pending solver reply.
    ///
    /// Does nothing unless the session is in [`Phase::AiThinking`].
    #[instrument(skip(self))]
    pub fn complete_ai_move(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.phase != Phase::AiThinking {
            debug!(phase = ?self.phase, "No AI move pending");
            return events;
        }

        self.phase = Phase::AwaitingMove;
        self.play_ai(&mut events);
        events
    }

    /// Hands the move to the solver if the mode says O is the AI.
    fn schedule_ai(&mut self, events: &mut Vec<GameEvent>) {
        if self.phase != Phase::AwaitingMove || !self.mode.is_ai(self.to_move) {
            return;
        }

        events.push(GameEvent::AiThinking);
        match self.pacing {
            AiPacing::Immediate => self.play_ai(events),
            AiPacing::Deferred => self.phase = Phase::AiThinking,
        }
    }

    fn play_ai(&mut self, events: &mut Vec<GameEvent>) {
        let Some(position) = best_move(self.game.board(), self.to_move) else {
            warn!("Solver found no move on a live board");
            return;
        };

        debug!(%position, "AI chose position");
        if let Err(e) = self.play(position, events) {
            warn!(error = %e, "Solver move rejected");
        }
    }

    /// Places the mark to move and advances the round.
    fn play(&mut self, position: Position, events: &mut Vec<GameEvent>) -> Result<(), MoveError> {
        let mark = self.to_move;
        self.game.apply_move(position, mark)?;
        events.push(GameEvent::MoveMade { mark, position });

        let (xs, os) = (self.board().count(Mark::X), self.board().count(Mark::O));
        debug_assert!(xs == os || xs == os + 1, "turn order broken: {xs} X, {os} O");

        let outcome = self.game.evaluate_outcome();
        if outcome.is_terminal() {
            self.scores.record(outcome);
            self.phase = Phase::RoundOver;
            info!(?outcome, scores = ?self.scores, "Round over");
            events.push(GameEvent::RoundOver(outcome));
        } else {
            self.to_move = mark.opponent();
        }
        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Mode::default())
    }
}
