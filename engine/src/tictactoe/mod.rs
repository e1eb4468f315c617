mod board;
mod bot_controller;
mod game_state;
mod session;
mod types;
mod win_detector;

pub use board::Board;
pub use bot_controller::{BotInput, WIN_SCORE, calculate_minimax_move, calculate_move, minimax};
pub use game_state::{
    BOT_MARK, GameOverNotification, GameSession, HUMAN_MARK, SessionSnapshot, StatusMessage,
    TurnResult,
};
pub use session::{SessionController, SessionObserver};
pub use types::{
    BOARD_SIDE, CELL_COUNT, CENTER, CORNERS, Difficulty, GameMode, LineKind, Mark, Outcome,
    Position, SIDES, SessionPhase, SessionSettings, SoundCue, WinningLine,
};
pub use win_detector::{WIN_PATTERNS, check_win, check_win_with_line, evaluate};
