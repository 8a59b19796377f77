//! Board module - manages the game grid
//!
//! The board is a 10x22 grid where each cell can be empty or filled with a piece kind.
//! Rows 0 and 1 are the hidden buffer above the visible playfield.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (col, row) where col ranges 0..9 (left to right), row ranges 0..21 (top to bottom)

use arrayvec::ArrayVec;

use crate::pieces::piece_def;
use crate::types::{Cell, PieceKind, Rotation, BOARD_SIZE, COLUMNS, TOTAL_ROWS};

/// Row indices removed by one line clear pass, in scan order (top to bottom)
pub type ClearedRows = ArrayVec<usize, { TOTAL_ROWS as usize }>;

/// The game board - 10 columns x 22 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (row * COLUMNS + col)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (col, row) coordinates
    #[inline(always)]
    fn index(col: i8, row: i8) -> Option<usize> {
        if Self::is_out_of_bounds(col, row) {
            return None;
        }
        Some((row as usize) * (COLUMNS as usize) + (col as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> i8 {
        COLUMNS
    }

    /// Get height of the board, hidden buffer included
    pub fn height(&self) -> i8 {
        TOTAL_ROWS
    }

    /// Check if position is out of bounds
    pub fn is_out_of_bounds(col: i8, row: i8) -> bool {
        col < 0 || col >= COLUMNS || row < 0 || row >= TOTAL_ROWS
    }

    /// Get cell at position (col, row)
    /// Returns None if out of bounds
    pub fn get(&self, col: i8, row: i8) -> Option<Cell> {
        Self::index(col, row).map(|idx| self.cells[idx])
    }

    /// Set cell at position (col, row)
    /// Returns false if out of bounds
    pub fn set(&mut self, col: i8, row: i8, cell: Cell) -> bool {
        match Self::index(col, row) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if a cell is occupied.
    ///
    /// Callers guarantee the coordinates are in bounds; an out of range query
    /// is a logic error and trips a debug assertion.
    pub fn is_occupied(&self, col: i8, row: i8) -> bool {
        debug_assert!(
            !Self::is_out_of_bounds(col, row),
            "board query ({}, {}) out of bounds",
            col,
            row
        );
        matches!(self.get(col, row), Some(Some(_)))
    }

    /// Whether `kind` in `rotation` fits with its bitmap's top-left at (col, row).
    ///
    /// The bitmap's empty border may overhang the board; only occupied cells
    /// must land inside the grid and on empty cells. This is the single gate
    /// for movement, rotation and spawn legality.
    pub fn can_place(&self, kind: PieceKind, rotation: Rotation, col: i8, row: i8) -> bool {
        let def = piece_def(kind);
        let space = def.spacing(rotation);
        let last = def.dimension() - 1;

        if col < -space.left || col + last - space.right >= COLUMNS {
            return false;
        }
        if row < -space.top || row + last - space.bottom >= TOTAL_ROWS {
            return false;
        }

        def.shape(rotation)
            .iter()
            .all(|&(dx, dy)| !self.is_occupied(col + dx, row + dy))
    }

    /// Write `kind` into every cell covered by the piece at (col, row).
    ///
    /// Unconditional: callers validate with [`Board::can_place`] first.
    /// Overlapping cells are overwritten.
    pub fn place(&mut self, kind: PieceKind, rotation: Rotation, col: i8, row: i8) {
        for (dx, dy) in piece_def(kind).shape(rotation) {
            let written = self.set(col + dx, row + dy, Some(kind));
            debug_assert!(written, "placed cell ({}, {}) out of bounds", col + dx, row + dy);
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= TOTAL_ROWS as usize {
            return false;
        }
        self.row(row).iter().all(|cell| cell.is_some())
    }

    /// Cells of one row, left to right
    pub fn row(&self, row: usize) -> &[Cell] {
        let width = COLUMNS as usize;
        let start = row * width;
        &self.cells[start..start + width]
    }

    /// Remove every full row and compact the rows above it.
    ///
    /// Rows are scanned once, top to bottom. When row `r` is full, rows
    /// `0..r` each move down by one (row `r` is overwritten) and row 0 is
    /// emptied. A row that receives shifted content is not re-examined in
    /// the same pass. Returns the cleared row indices in scan order.
    pub fn clear_full_rows_and_compact(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        let width = COLUMNS as usize;

        for row in 0..TOTAL_ROWS as usize {
            if !self.is_row_full(row) {
                continue;
            }

            // copy_within handles the overlapping ranges
            for dst in (1..=row).rev() {
                let src_start = (dst - 1) * width;
                self.cells
                    .copy_within(src_start..src_start + width, dst * width);
            }
            self.cells[..width].fill(None);

            cleared.push(row);
        }

        cleared
    }

    /// Number of occupied cells on the whole board
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn reset(&mut self) {
        self.cells.fill(None);
    }

    /// Copy the grid into a row-major 2D array
    pub fn write_grid(&self, out: &mut [[Cell; COLUMNS as usize]; TOTAL_ROWS as usize]) {
        for (row, dst) in out.iter_mut().enumerate() {
            dst.copy_from_slice(self.row(row));
        }
    }

    /// Create from a 2D vector for testing (converts to flat array)
    #[cfg(test)]
    pub fn from_cells(cells_2d: Vec<Vec<Cell>>) -> Self {
        assert_eq!(cells_2d.len(), TOTAL_ROWS as usize);
        assert!(cells_2d.iter().all(|row| row.len() == COLUMNS as usize));

        let mut flat = [None; BOARD_SIZE];
        for (y, row) in cells_2d.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                flat[y * COLUMNS as usize + x] = *cell;
            }
        }
        Self { cells: flat }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
