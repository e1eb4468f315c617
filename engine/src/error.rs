#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    IllegalMove { index: usize, reason: &'static str },
    NoLegalMove,
    CorruptPersistedState(String),
    Storage(String),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::IllegalMove { index, reason } => {
                write!(f, "Illegal move at cell {}: {}", index, reason)
            }
            EngineError::NoLegalMove => write!(f, "No legal move: the board is full"),
            EngineError::CorruptPersistedState(e) => write!(f, "Corrupt persisted state: {}", e),
            EngineError::Storage(e) => write!(f, "Storage error: {}", e),
        }
    }
}

impl std::error::Error for EngineError {}
