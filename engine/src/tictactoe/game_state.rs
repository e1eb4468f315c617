use std::fmt;

use crate::error::EngineError;
use crate::log;
use crate::session_rng::SessionRng;
use crate::stats::{Stats, StatsStore};
use super::board::Board;
use super::bot_controller::{BotInput, calculate_move};
use super::types::{
    CELL_COUNT, Difficulty, GameMode, LineKind, Mark, Outcome, SessionPhase, SessionSettings, SoundCue,
};
use super::win_detector::evaluate;

pub const HUMAN_MARK: Mark = Mark::X;
pub const BOT_MARK: Mark = Mark::O;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusMessage {
    SelectMode,
    YourTurn,
    PlayerTurn(Mark),
    BotThinking,
    YouWon,
    BotWon,
    PlayerWon(Mark),
    Draw,
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusMessage::SelectMode => write!(f, "Select a mode and start a game"),
            StatusMessage::YourTurn => write!(f, "Your turn (X)"),
            StatusMessage::PlayerTurn(Mark::O) => write!(f, "Player 2 (O)'s turn"),
            StatusMessage::PlayerTurn(_) => write!(f, "Player 1 (X)'s turn"),
            StatusMessage::BotThinking => write!(f, "Bot is thinking..."),
            StatusMessage::YouWon => write!(f, "You win!"),
            StatusMessage::BotWon => write!(f, "The bot wins!"),
            StatusMessage::PlayerWon(mark) => write!(f, "Player {} wins!", mark.symbol()),
            StatusMessage::Draw => write!(f, "Draw!"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub cells: [Mark; CELL_COUNT],
    pub phase: SessionPhase,
    pub settings: SessionSettings,
    pub current_mark: Mark,
    pub status: StatusMessage,
    pub last_move: Option<usize>,
    pub cue: Option<SoundCue>,
    pub stats: Stats,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOverNotification {
    pub cells: [Mark; CELL_COUNT],
    pub outcome: Outcome,
    pub line_kind: Option<LineKind>,
    pub cue: SoundCue,
    pub status: StatusMessage,
    pub stats: Stats,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnResult {
    /// Input absorbed without any state change.
    Ignored,
    Continue,
    BotTurn { generation: u64 },
    Finished(GameOverNotification),
}

pub struct GameSession {
    board: Board,
    current_mark: Mark,
    phase: SessionPhase,
    settings: SessionSettings,
    outcome: Outcome,
    last_move: Option<usize>,
    last_cue: Option<SoundCue>,
    generation: u64,
    stats: Stats,
    stats_store: StatsStore,
    rng: SessionRng,
}

impl GameSession {
    pub fn new(stats_store: StatsStore, rng: SessionRng) -> Self {
        let stats = stats_store.load();
        Self {
            board: Board::new(),
            current_mark: HUMAN_MARK,
            phase: SessionPhase::Idle,
            settings: SessionSettings::vs_bot(Difficulty::Hard),
            outcome: Outcome::InProgress,
            last_move: None,
            last_cue: None,
            generation: 0,
            stats,
            stats_store,
            rng,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn settings(&self) -> SessionSettings {
        self.settings
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn current_mark(&self) -> Mark {
        self.current_mark
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn start(&mut self, settings: SessionSettings) -> TurnResult {
        if self.phase == SessionPhase::InProgress {
            return TurnResult::Ignored;
        }

        self.clear();
        self.settings = settings;
        self.phase = SessionPhase::InProgress;
        log!(
            "[game:{}] Started {:?} ({:?}), rng seed {}",
            self.generation,
            settings.mode,
            settings.difficulty,
            self.rng.seed()
        );
        TurnResult::Continue
    }

    /// Back to Idle. Stats are kept.
    pub fn reset(&mut self) {
        self.clear();
        self.phase = SessionPhase::Idle;
        log!("[game:{}] Reset", self.generation);
    }

    fn clear(&mut self) {
        self.board = Board::new();
        self.current_mark = HUMAN_MARK;
        self.outcome = Outcome::InProgress;
        self.last_move = None;
        self.last_cue = None;
        self.generation += 1;
    }

    pub fn is_bot_turn(&self) -> bool {
        self.phase == SessionPhase::InProgress
            && self.settings.mode == GameMode::PlayerVsBot
            && self.current_mark == BOT_MARK
    }

    /// A human move. Anything that is not a legal move right now is ignored.
    pub fn place_mark(&mut self, index: usize) -> TurnResult {
        if self.phase != SessionPhase::InProgress || self.is_bot_turn() {
            return TurnResult::Ignored;
        }
        if !self.board.is_valid_move(index) {
            return TurnResult::Ignored;
        }

        match self.apply(index) {
            Ok(result) => result,
            Err(e) => {
                log!("[game:{}] {}", self.generation, e);
                TurnResult::Ignored
            }
        }
    }

    /// Plays the bot's move for `generation`; stale or out-of-turn requests are dropped.
    pub fn play_bot_turn(&mut self, generation: u64) -> TurnResult {
        if generation != self.generation || !self.is_bot_turn() {
            log!(
                "[game:{}] Discarding stale bot move scheduled for game {}",
                self.generation,
                generation
            );
            return TurnResult::Ignored;
        }

        let input = BotInput::new(self.board, BOT_MARK);
        match calculate_move(self.settings.difficulty, &input, &mut self.rng) {
            Ok(index) => {
                log!("[game:{}] Bot ({:?}) chose cell {}", self.generation, self.settings.difficulty, index);
                match self.apply(index) {
                    Ok(result) => result,
                    Err(e) => {
                        log!("[game:{}] Bot move rejected: {}", self.generation, e);
                        TurnResult::Ignored
                    }
                }
            }
            Err(EngineError::NoLegalMove) => {
                log!("[game:{}] Bot has no legal move, treating as draw", self.generation);
                self.finish(Outcome::Draw)
            }
            Err(e) => {
                log!("[game:{}] Bot failed to move: {}", self.generation, e);
                TurnResult::Ignored
            }
        }
    }

    fn apply(&mut self, index: usize) -> Result<TurnResult, EngineError> {
        self.board.apply_move(index, self.current_mark)?;
        self.last_move = Some(index);
        self.last_cue = Some(SoundCue::Click);
        log!("[game:{}] {} -> cell {}", self.generation, self.current_mark.symbol(), index);

        let outcome = evaluate(&self.board);
        if outcome.is_terminal() {
            return Ok(self.finish(outcome));
        }

        self.switch_turn();
        if self.is_bot_turn() {
            Ok(TurnResult::BotTurn { generation: self.generation })
        } else {
            Ok(TurnResult::Continue)
        }
    }

    fn switch_turn(&mut self) {
        if let Some(next) = self.current_mark.opponent() {
            self.current_mark = next;
        }
    }

    fn finish(&mut self, outcome: Outcome) -> TurnResult {
        self.phase = SessionPhase::Over;
        self.outcome = outcome;

        let cue = match outcome {
            Outcome::Win(_) => SoundCue::Win,
            _ => SoundCue::Draw,
        };
        self.last_cue = Some(cue);

        if self.settings.mode == GameMode::PlayerVsBot {
            self.stats.record(&outcome);
            if let Err(e) = self.stats_store.save(&self.stats) {
                log!("[game:{}] Failed to save stats: {}", self.generation, e);
            }
        }
        log!("[game:{}] Game over: {:?}", self.generation, outcome);

        TurnResult::Finished(GameOverNotification {
            cells: *self.board.cells(),
            outcome,
            line_kind: match outcome {
                Outcome::Win(line) => Some(line.kind()),
                _ => None,
            },
            cue,
            status: self.status(),
            stats: self.stats,
        })
    }

    pub fn status(&self) -> StatusMessage {
        let vs_bot = self.settings.mode == GameMode::PlayerVsBot;
        match self.phase {
            SessionPhase::Idle => StatusMessage::SelectMode,
            SessionPhase::InProgress if vs_bot && self.current_mark == BOT_MARK => {
                StatusMessage::BotThinking
            }
            SessionPhase::InProgress if vs_bot => StatusMessage::YourTurn,
            SessionPhase::InProgress => StatusMessage::PlayerTurn(self.current_mark),
            SessionPhase::Over => match self.outcome.winner() {
                Some(HUMAN_MARK) if vs_bot => StatusMessage::YouWon,
                Some(_) if vs_bot => StatusMessage::BotWon,
                Some(mark) => StatusMessage::PlayerWon(mark),
                None => StatusMessage::Draw,
            },
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            cells: *self.board.cells(),
            phase: self.phase,
            settings: self.settings,
            current_mark: self.current_mark,
            status: self.status(),
            last_move: self.last_move,
            cue: self.last_cue,
            stats: self.stats,
        }
    }
}
