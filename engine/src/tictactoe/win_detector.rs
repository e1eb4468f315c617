use super::board::Board;
use super::types::{Mark, Outcome, WinningLine};

pub const WIN_PATTERNS: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// First completed line in pattern order, if any.
pub fn check_win_with_line(board: &Board) -> Option<WinningLine> {
    let cells = board.cells();
    WIN_PATTERNS.iter().find_map(|&[a, b, c]| {
        let mark = cells[a];
        if mark != Mark::Empty && mark == cells[b] && mark == cells[c] {
            Some(WinningLine::new(mark, [a, b, c]))
        } else {
            None
        }
    })
}

pub fn check_win(board: &Board) -> Option<Mark> {
    check_win_with_line(board).map(|line| line.mark)
}

pub fn evaluate(board: &Board) -> Outcome {
    if let Some(line) = check_win_with_line(board) {
        return Outcome::Win(line);
    }
    if board.is_full() {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use super::*;
    use crate::tictactoe::board::board_from;

    #[test]
    fn test_empty_board_in_progress() {
        assert_eq!(evaluate(&Board::new()), Outcome::InProgress);
    }

    #[test]
    fn test_main_diagonal_win() {
        let board = board_from("XO. .XO ..X");
        assert_eq!(evaluate(&board), Outcome::Win(WinningLine::new(Mark::X, [0, 4, 8])));
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        let board = board_from("XOX XOO OXX");
        assert_eq!(evaluate(&board), Outcome::Draw);
    }

    #[test]
    fn test_win_on_last_cell_beats_draw() {
        let board = board_from("XOX OXO OXX");
        assert_eq!(check_win(&board), Some(Mark::X));
        assert!(matches!(evaluate(&board), Outcome::Win(_)));
    }

    #[test]
    fn test_first_pattern_reported_when_two_lines_complete() {
        let board = board_from("XXX X.. X..");
        assert_eq!(check_win_with_line(&board).map(|l| l.cells), Some([0, 1, 2]));
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let board = board_from("OOO XX. X..");
        let before = board;
        assert_eq!(evaluate(&board), evaluate(&board));
        assert_eq!(board, before);
    }

    fn collect_winners(board: Board, to_move: Mark, seen: &mut HashSet<Board>) {
        if !seen.insert(board) {
            return;
        }
        let winners: HashSet<Mark> = WIN_PATTERNS
            .iter()
            .filter(|&&[a, b, c]| {
                let cells = board.cells();
                cells[a] != Mark::Empty && cells[a] == cells[b] && cells[a] == cells[c]
            })
            .map(|&[a, _, _]| board.cells()[a])
            .collect();
        assert!(winners.len() <= 1, "two winners on {:?}", board);
        if evaluate(&board).is_terminal() {
            return;
        }
        let next = to_move.opponent().unwrap();
        for index in board.empty_cells() {
            collect_winners(board.with_move(index, to_move).unwrap(), next, seen);
        }
    }

    #[test]
    fn test_reachable_boards_have_at_most_one_winner() {
        let mut seen = HashSet::new();
        collect_winners(Board::new(), Mark::X, &mut seen);
        assert_eq!(seen.len(), 5478);
    }
}
