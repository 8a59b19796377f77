//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (simulation core, terminal rendering, input mapping).
//!
//! # Board Dimensions
//!
//! The grid is fixed at 10 columns by 22 rows. The top two rows are a hidden
//! buffer used as spawn and rotation headroom; only the lower 20 are visible.
//!
//! - **Columns**: 10 (indexed 0-9, left to right)
//! - **Total rows**: 22 (indexed 0-21, top to bottom)
//! - **Visible rows**: 2..22
//!
//! # Speed Progression
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_SPEED` | 1.0 | Gravity cycles per second on a fresh game |
//! | `SPEED_STEP` | 0.035 | Added to the speed after every lock |
//! | `SOFT_DROP_SPEED` | 25.0 | Cycles per second while soft drop is held |
//! | `LOCK_COOLDOWN_FRAMES` | 25 | Frames after a lock during which soft drop is ignored |
//! | `LEVEL_FACTOR` | 1.70 | `level = floor(speed * LEVEL_FACTOR)` |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Command, PieceKind, Rotation, COLUMNS, TOTAL_ROWS};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(Rotation::from_index(3), Rotation::West);
//!
//! assert_eq!(Command::from_str("rotateCcw"), Some(Command::RotateCcw));
//!
//! assert_eq!(COLUMNS, 10);
//! assert_eq!(TOTAL_ROWS, 22);
//! ```

/// Board width in cells (10 columns)
pub const COLUMNS: i8 = 10;

/// Visible rows of the playfield
pub const ACTIVE_ROWS: i8 = 20;

/// Hidden rows above the visible playfield
pub const BUFFER_ROWS: i8 = 2;

/// All rows, including the hidden buffer
pub const TOTAL_ROWS: i8 = ACTIVE_ROWS + BUFFER_ROWS;

/// Number of cells in the grid
pub const BOARD_SIZE: usize = (COLUMNS as usize) * (TOTAL_ROWS as usize);

/// Target frame period of the scheduling loop (50 frames per second)
pub const FRAME_MS: u64 = 20;

/// Gravity rate of a fresh game, in cycles per second
pub const BASE_SPEED: f32 = 1.0;

/// Speed increase applied after every lock
pub const SPEED_STEP: f32 = 0.035;

/// Gravity rate while soft drop is held
pub const SOFT_DROP_SPEED: f32 = 25.0;

/// Frames after a lock during which soft drop presses are ignored
pub const LOCK_COOLDOWN_FRAMES: u32 = 25;

/// Level multiplier applied to the current speed
pub const LEVEL_FACTOR: f32 = 1.70;

/// Level shown at the start of a game
pub const START_LEVEL: u32 = 1;

/// Base of the shift-based line clear score (`LINE_SCORE_BASE << lines`)
pub const LINE_SCORE_BASE: u32 = 50;


/// The seven piece variants
///
/// Each variant has a distinct shape and color:
/// - **I**: Cyan, straight bar
/// - **J**: Blue
/// - **L**: Orange (mirror of J)
/// - **O**: Yellow, 2x2 square
/// - **S**: Green
/// - **Z**: Red (mirror of S)
/// - **T**: Purple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    Z,
    T,
}

impl PieceKind {
    /// Every variant, in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::T,
    ];

    /// Position of this variant in [`PieceKind::ALL`]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Variant at `index` in [`PieceKind::ALL`] (wraps modulo 7)
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "t" => Some(PieceKind::T),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::T => "t",
        }
    }
}

/// The four rotation states of a piece
///
/// - **North**: Spawn orientation (state 0)
/// - **East**: One clockwise turn (state 1)
/// - **South**: Two turns (state 2)
/// - **West**: One counter-clockwise turn (state 3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotation state index in `0..4`
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Rotation state for `index`, taken modulo 4
    pub const fn from_index(index: u8) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    /// Rotate clockwise (`(state + 1) mod 4`)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Rotate counter-clockwise (`(state + 3) mod 4`)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
    /// assert_eq!(Rotation::East.rotate_ccw(), Rotation::North);
    /// ```
    pub fn rotate_ccw(&self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Horizontal movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Left,
    Right,
}

impl MoveDirection {
    /// Column delta for this direction
    pub const fn dx(self) -> i8 {
        match self {
            MoveDirection::Left => -1,
            MoveDirection::Right => 1,
        }
    }
}

/// Rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotateDirection {
    Clockwise,
    CounterClockwise,
}

impl RotateDirection {
    /// Apply this direction to a rotation state
    pub fn apply(self, rotation: Rotation) -> Rotation {
        match self {
            RotateDirection::Clockwise => rotation.rotate_cw(),
            RotateDirection::CounterClockwise => rotation.rotate_ccw(),
        }
    }
}

/// Session phase
///
/// `NewGame` → `Playing` ⇄ `Paused`, `Playing` → `GameOver` → `Playing` (restart).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// Initial idle state, no active piece
    #[default]
    NewGame,
    /// Normal simulation
    Playing,
    /// Simulation frozen, scheduler paused
    Paused,
    /// A freshly spawned piece could not be placed
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::NewGame => "newGame",
            Phase::Playing => "playing",
            Phase::Paused => "paused",
            Phase::GameOver => "gameOver",
        }
    }
}

/// Commands accepted by the game state machine
///
/// These are produced by the input layer and applied between scheduler ticks.
/// A command issued in the wrong phase is silently ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start a new game (from `NewGame` or `GameOver`)
    Start,
    /// Toggle between `Playing` and `Paused`
    TogglePause,
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Rotate piece clockwise
    RotateCw,
    /// Rotate piece counter-clockwise
    RotateCcw,
    /// Raise gravity to the soft drop rate
    SoftDropPress,
    /// Restore the regular gravity rate
    SoftDropRelease,
}

impl Command {
    pub const ALL: [Command; 8] = [
        Command::Start,
        Command::TogglePause,
        Command::MoveLeft,
        Command::MoveRight,
        Command::RotateCw,
        Command::RotateCcw,
        Command::SoftDropPress,
        Command::SoftDropRelease,
    ];

    /// Parse command from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("softdroppress"), Some(Command::SoftDropPress));
    /// assert_eq!(Command::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "start" => Some(Command::Start),
            "togglepause" => Some(Command::TogglePause),
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "rotatecw" => Some(Command::RotateCw),
            "rotateccw" => Some(Command::RotateCcw),
            "softdroppress" => Some(Command::SoftDropPress),
            "softdroprelease" => Some(Command::SoftDropRelease),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::TogglePause => "togglePause",
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::RotateCw => "rotateCw",
            Command::RotateCcw => "rotateCcw",
            Command::SoftDropPress => "softDropPress",
            Command::SoftDropRelease => "softDropRelease",
        }
    }
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale each channel up by 1/0.7, saturating at 255
    pub fn brighter(self) -> Self {
        let up = |c: u8| ((c as u16 * 10) / 7).min(255) as u8;
        Self::new(up(self.r), up(self.g), up(self.b))
    }

    /// Scale each channel down by 0.7
    pub fn darker(self) -> Self {
        let down = |c: u8| ((c as u16 * 7) / 10) as u8;
        Self::new(down(self.r), down(self.g), down(self.b))
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by a locked piece of that variant
///
/// Occupancy is what matters to the rules; the variant is kept for color.
pub type Cell = Option<PieceKind>;
