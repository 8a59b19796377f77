//! Read-only, point-in-time view of a game for renderers and tests.

use crate::game_state::ActivePiece;
use crate::types::{Cell, PieceKind, Phase, Rotation, COLUMNS, START_LEVEL, TOTAL_ROWS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub column: i8,
    pub row: i8,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            column: value.column,
            row: value.row,
        }
    }
}

pub type BoardGrid = [[Cell; COLUMNS as usize]; TOTAL_ROWS as usize];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameSnapshot {
    pub phase: Phase,
    /// Full grid, hidden buffer rows included (row 0 is the topmost buffer row)
    pub board: BoardGrid,
    pub active: Option<ActiveSnapshot>,
    pub ghost_row: Option<i8>,
    pub next: Option<PieceKind>,
    pub score: u32,
    pub level: u32,
    pub speed: f32,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        self.phase == Phase::Playing
    }

    /// Whether board cell (col, row) is occupied; false outside the grid
    pub fn is_occupied(&self, col: i8, row: i8) -> bool {
        if col < 0 || col >= COLUMNS || row < 0 || row >= TOTAL_ROWS {
            return false;
        }
        self.board[row as usize][col as usize].is_some()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            phase: Phase::NewGame,
            board: [[None; COLUMNS as usize]; TOTAL_ROWS as usize],
            active: None,
            ghost_row: None,
            next: None,
            score: 0,
            level: START_LEVEL,
            speed: 0.0,
        }
    }
}
