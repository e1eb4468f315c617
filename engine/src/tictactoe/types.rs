use serde::{Deserialize, Serialize};

pub const BOARD_SIDE: usize = 3;
pub const CELL_COUNT: usize = BOARD_SIDE * BOARD_SIDE;
pub const CENTER: usize = 4;
pub const CORNERS: [usize; 4] = [0, 2, 6, 8];
pub const SIDES: [usize; 4] = [1, 3, 5, 7];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mark {
    Empty,
    X,
    O,
}

impl Mark {
    pub fn opponent(&self) -> Option<Mark> {
        match self {
            Mark::X => Some(Mark::O),
            Mark::O => Some(Mark::X),
            Mark::Empty => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Mark::Empty => ' ',
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    pub fn from_index(index: usize) -> Self {
        Self::new(index % BOARD_SIDE, index / BOARD_SIDE)
    }

    pub fn to_index(&self) -> usize {
        self.y * BOARD_SIDE + self.x
    }
}

/// Which of the eight lines was completed; drives the highlight overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Horizontal(usize),
    Vertical(usize),
    Diagonal,
    AntiDiagonal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinningLine {
    pub mark: Mark,
    pub cells: [usize; 3],
}

impl WinningLine {
    pub fn new(mark: Mark, cells: [usize; 3]) -> Self {
        Self { mark, cells }
    }

    pub fn start(&self) -> Position {
        Position::from_index(self.cells[0])
    }

    pub fn end(&self) -> Position {
        Position::from_index(self.cells[2])
    }

    pub fn kind(&self) -> LineKind {
        let (start, end) = (self.start(), self.end());
        if start.y == end.y {
            LineKind::Horizontal(start.y)
        } else if start.x == end.x {
            LineKind::Vertical(start.x)
        } else if start.x < end.x {
            LineKind::Diagonal
        } else {
            LineKind::AntiDiagonal
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Draw,
    Win(WinningLine),
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    pub fn winner(&self) -> Option<Mark> {
        match self {
            Outcome::Win(line) => Some(line.mark),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    #[serde(rename = "pvp")]
    PlayerVsPlayer,
    #[serde(rename = "bot")]
    PlayerVsBot,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionSettings {
    pub mode: GameMode,
    pub difficulty: Difficulty,
}

impl SessionSettings {
    pub fn pvp() -> Self {
        Self {
            mode: GameMode::PlayerVsPlayer,
            difficulty: Difficulty::Easy,
        }
    }

    pub fn vs_bot(difficulty: Difficulty) -> Self {
        Self {
            mode: GameMode::PlayerVsBot,
            difficulty,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    InProgress,
    Over,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundCue {
    Click,
    Win,
    Draw,
}
