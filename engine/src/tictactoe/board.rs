use crate::error::EngineError;
use super::types::{CELL_COUNT, Mark};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Mark; CELL_COUNT],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [Mark::Empty; CELL_COUNT],
        }
    }

    pub fn from_cells(cells: [Mark; CELL_COUNT]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Mark; CELL_COUNT] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied()
    }

    pub fn apply_move(&mut self, index: usize, mark: Mark) -> Result<(), EngineError> {
        if mark == Mark::Empty {
            return Err(EngineError::IllegalMove { index, reason: "cannot place an empty mark" });
        }
        match self.cells.get(index) {
            None => Err(EngineError::IllegalMove { index, reason: "position out of bounds" }),
            Some(Mark::Empty) => {
                self.cells[index] = mark;
                Ok(())
            }
            Some(_) => Err(EngineError::IllegalMove { index, reason: "cell is already marked" }),
        }
    }

    /// Clears a cell. Lookahead only; live play never calls this.
    pub fn undo_move(&mut self, index: usize) {
        if let Some(cell) = self.cells.get_mut(index) {
            *cell = Mark::Empty;
        }
    }

    /// Copy of the board with one more mark on it.
    pub fn with_move(&self, index: usize, mark: Mark) -> Result<Board, EngineError> {
        let mut next = *self;
        next.apply_move(index, mark)?;
        Ok(next)
    }

    pub fn is_valid_move(&self, index: usize) -> bool {
        self.get(index) == Some(Mark::Empty)
    }

    pub fn empty_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Mark::Empty)
            .map(|(index, _)| index)
            .collect()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&cell| cell != Mark::Empty)
    }

    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|&&cell| cell == mark).count()
    }
}

#[cfg(test)]
pub(crate) fn board_from(pattern: &str) -> Board {
    let mut cells = [Mark::Empty; CELL_COUNT];
    for (cell, ch) in cells.iter_mut().zip(pattern.chars().filter(|c| !c.is_whitespace())) {
        *cell = match ch {
            'X' => Mark::X,
            'O' => Mark::O,
            _ => Mark::Empty,
        };
    }
    Board::from_cells(cells)
}
