use crate::error::EngineError;
use crate::session_rng::SessionRng;
use super::board::Board;
use super::types::{CENTER, CORNERS, Difficulty, Mark, Outcome, SIDES};
use super::win_detector::{check_win, evaluate};

pub const WIN_SCORE: i32 = 10;

pub struct BotInput {
    pub board: Board,
    pub bot_mark: Mark,
}

impl BotInput {
    pub fn new(board: Board, bot_mark: Mark) -> Self {
        Self { board, bot_mark }
    }
}

pub fn calculate_move(
    difficulty: Difficulty,
    input: &BotInput,
    rng: &mut SessionRng,
) -> Result<usize, EngineError> {
    if input.board.is_full() {
        return Err(EngineError::NoLegalMove);
    }
    match difficulty {
        Difficulty::Easy => calculate_random_move(input, rng),
        Difficulty::Medium => calculate_heuristic_move(input, rng),
        Difficulty::Hard => calculate_minimax_move(input),
    }
}

fn calculate_random_move(input: &BotInput, rng: &mut SessionRng) -> Result<usize, EngineError> {
    let available_moves = input.board.empty_cells();
    if available_moves.is_empty() {
        return Err(EngineError::NoLegalMove);
    }
    let idx = rng.random_range(0..available_moves.len());
    Ok(available_moves[idx])
}

fn calculate_heuristic_move(input: &BotInput, rng: &mut SessionRng) -> Result<usize, EngineError> {
    let bot_mark = input.bot_mark;
    let opponent_mark = bot_mark.opponent().ok_or(EngineError::NoLegalMove)?;
    let available_moves = input.board.empty_cells();

    if let Some(index) = find_winning_move(&input.board, bot_mark, &available_moves) {
        return Ok(index);
    }

    if let Some(index) = find_winning_move(&input.board, opponent_mark, &available_moves) {
        return Ok(index);
    }

    if input.board.is_valid_move(CENTER) {
        return Ok(CENTER);
    }

    let corners: Vec<usize> = CORNERS.into_iter().filter(|&i| input.board.is_valid_move(i)).collect();
    if let Some(index) = rng.choose(&corners) {
        return Ok(index);
    }

    let sides: Vec<usize> = SIDES.into_iter().filter(|&i| input.board.is_valid_move(i)).collect();
    rng.choose(&sides).ok_or(EngineError::NoLegalMove)
}

fn find_winning_move(board: &Board, mark: Mark, moves: &[usize]) -> Option<usize> {
    moves.iter().copied().find(|&index| {
        board
            .with_move(index, mark)
            .is_ok_and(|probe| check_win(&probe) == Some(mark))
    })
}

pub fn calculate_minimax_move(input: &BotInput) -> Result<usize, EngineError> {
    if input.bot_mark == Mark::Empty {
        return Err(EngineError::NoLegalMove);
    }
    minimax(&input.board, input.bot_mark)
        .1
        .ok_or(EngineError::NoLegalMove)
}

/// Full-depth search. O maximizes, X minimizes; ties keep the first move found.
pub fn minimax(board: &Board, to_move: Mark) -> (i32, Option<usize>) {
    match evaluate(board) {
        Outcome::Win(line) if line.mark == Mark::X => return (-WIN_SCORE, None),
        Outcome::Win(_) => return (WIN_SCORE, None),
        Outcome::Draw => return (0, None),
        Outcome::InProgress => {}
    }

    let Some(next) = to_move.opponent() else {
        return (0, None);
    };
    let maximizing = to_move == Mark::O;

    let mut best: Option<(i32, usize)> = None;
    for index in board.empty_cells() {
        let Ok(probe) = board.with_move(index, to_move) else {
            continue;
        };
        let (score, _) = minimax(&probe, next);

        let improves = match best {
            None => true,
            Some((best_score, _)) if maximizing => score > best_score,
            Some((best_score, _)) => score < best_score,
        };
        if improves {
            best = Some((score, index));
        }
    }

    match best {
        Some((score, index)) => (score, Some(index)),
        None => (0, None),
    }
}
