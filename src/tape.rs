use crate::error::{Direction, ExecError};

/// Number of cells on a tape when no size is configured.
pub const DEFAULT_TAPE_SIZE: usize = 256;

/// Fixed-length byte tape with a single cursor.
///
/// The cursor always satisfies `0 <= cursor < len`. Moves past either end
/// are rejected and leave the cursor where it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: Vec<u8>,
    cursor: usize,
}

impl Default for Tape {
    fn default() -> Self {
        Self::new(DEFAULT_TAPE_SIZE)
    }
}

#[allow(clippy::len_without_is_empty)]
impl Tape {
    /// Create a zeroed tape of `size` cells with the cursor on cell 0.
    ///
    /// A size of zero is bumped to one so the cursor always has a cell.
    pub fn new(size: usize) -> Self {
        Self {
            cells: vec![0; size.max(1)],
            cursor: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Value of the cell under the cursor.
    pub fn get(&self) -> u8 {
        self.cells[self.cursor]
    }

    pub fn set(&mut self, value: u8) {
        self.cells[self.cursor] = value;
    }

    pub fn increment(&mut self) {
        let cell = &mut self.cells[self.cursor];
        *cell = cell.wrapping_add(1);
    }

    pub fn decrement(&mut self) {
        let cell = &mut self.cells[self.cursor];
        *cell = cell.wrapping_sub(1);
    }

    pub fn move_right(&mut self) -> Result<(), ExecError> {
        if self.cursor + 1 >= self.cells.len() {
            return Err(ExecError::OutOfBounds(Direction::Right));
        }
        self.cursor += 1;
        Ok(())
    }

    pub fn move_left(&mut self) -> Result<(), ExecError> {
        if self.cursor == 0 {
            return Err(ExecError::OutOfBounds(Direction::Left));
        }
        self.cursor -= 1;
        Ok(())
    }

    /// Read-only view of every cell.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }
}
