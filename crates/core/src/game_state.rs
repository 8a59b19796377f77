//! Game state module - manages the complete game session
//!
//! This module ties together the board, piece catalog, rotation resolver,
//! cycle timer and RNG. It owns the active and next piece, score, level and
//! speed, and the session phase. All mutation happens through [`GameState::tick`],
//! [`GameState::frame`] and the command methods, from a single thread.

use std::time::Instant;

use log::{debug, trace};

use crate::board::Board;
use crate::cycle::CycleTimer;
use crate::pieces::{get_shape, spawn_position, PieceShape};
use crate::rng::SimpleRng;
use crate::rotation::resolve_rotation;
use crate::scoring::{level_for_speed, line_clear_score, next_speed};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::*;

/// Active falling piece
///
/// `column`/`row` locate the top-left cell of the rotation bitmap; `row`
/// counts from the top of the hidden buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub column: i8,
    pub row: i8,
}

impl ActivePiece {
    /// Create a piece at its variant's spawn position
    pub fn spawn(kind: PieceKind) -> Self {
        let (column, row) = spawn_position(kind);
        Self {
            kind,
            rotation: Rotation::North,
            column,
            row,
        }
    }

    /// Get the shape (occupied offsets) for current rotation
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Whether the piece can sit at its current position on `board`
    pub fn fits(&self, board: &Board) -> bool {
        board.can_place(self.kind, self.rotation, self.column, self.row)
    }

    fn shifted(self, dx: i8, dy: i8) -> Self {
        Self {
            column: self.column + dx,
            row: self.row + dy,
            ..self
        }
    }
}

/// What happened when a piece locked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub piece: ActivePiece,
    pub lines_cleared: u32,
    pub score_delta: u32,
    /// The following piece could not spawn
    pub game_over: bool,
}

/// Result of one gravity cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing ran (no pending cycle, or not playing)
    Idle,
    /// The active piece moved down one row
    Descended,
    /// The active piece locked into the board
    Locked(LockEvent),
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<ActivePiece>,
    next: Option<PieceKind>,
    rng: SimpleRng,
    timer: CycleTimer,
    phase: Phase,
    score: u32,
    level: u32,
    /// Gravity rate in cycles per second
    speed: f32,
    /// Frames left before soft drop is accepted again after a lock
    dropping_rest: u32,
}

impl GameState {
    /// Create an idle session (`NewGame`) with the given RNG seed
    pub fn new(seed: u32, now: Instant) -> Self {
        let mut timer = CycleTimer::new(BASE_SPEED, now);
        timer.set_paused(true);

        Self {
            board: Board::new(),
            active: None,
            next: None,
            rng: SimpleRng::new(seed),
            timer,
            phase: Phase::NewGame,
            score: 0,
            level: START_LEVEL,
            speed: BASE_SPEED,
            dropping_rest: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn dropping_rest(&self) -> u32 {
        self.dropping_rest
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn next(&self) -> Option<PieceKind> {
        self.next
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn timer(&self) -> &CycleTimer {
        &self.timer
    }

    /// Start a new game from `NewGame` or `GameOver`.
    ///
    /// Resets score, level, speed, board and timer, draws a fresh next piece
    /// and spawns. Returns false (no-op) in any other phase.
    pub fn start(&mut self, now: Instant) -> bool {
        if !matches!(self.phase, Phase::NewGame | Phase::GameOver) {
            trace!("start ignored in phase {}", self.phase.as_str());
            return false;
        }

        self.score = 0;
        self.level = START_LEVEL;
        self.speed = BASE_SPEED;
        self.dropping_rest = 0;

        self.board.reset();
        self.timer.reset(now);
        self.timer.set_cycles_per_second(self.speed);

        self.next = Some(self.rng.next_piece());
        self.phase = Phase::Playing;
        self.spawn_next();

        debug!(
            "game started: active={:?} next={:?}",
            self.active.map(|p| p.kind),
            self.next
        );
        true
    }

    /// Promote the next piece to active and draw a new next piece.
    ///
    /// Ends the game when the spawned piece does not fit.
    fn spawn_next(&mut self) -> bool {
        let kind = match self.next.take() {
            Some(kind) => kind,
            None => self.rng.next_piece(),
        };
        let piece = ActivePiece::spawn(kind);

        self.active = Some(piece);
        self.next = Some(self.rng.next_piece());

        if !piece.fits(&self.board) {
            self.phase = Phase::GameOver;
            self.timer.set_paused(true);
            debug!(
                "game over: {:?} blocked at ({}, {}), score={}",
                kind, piece.column, piece.row, self.score
            );
            return false;
        }

        true
    }

    /// Flip between `Playing` and `Paused`; no-op in other phases
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            Phase::Playing => {
                self.phase = Phase::Paused;
                self.timer.set_paused(true);
                true
            }
            Phase::Paused => {
                self.phase = Phase::Playing;
                self.timer.set_paused(false);
                true
            }
            Phase::NewGame | Phase::GameOver => {
                trace!("pause ignored in phase {}", self.phase.as_str());
                false
            }
        }
    }

    /// One gravity cycle: descend by one row, or lock and spawn the next piece
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        if self.phase != Phase::Playing {
            return TickOutcome::Idle;
        }
        let Some(active) = self.active else {
            return TickOutcome::Idle;
        };

        let below = active.shifted(0, 1);
        if below.fits(&self.board) {
            self.active = Some(below);
            trace!("{:?} descended to row {}", active.kind, below.row);
            return TickOutcome::Descended;
        }

        TickOutcome::Locked(self.lock_piece(active, now))
    }

    /// Lock `active` into the board, clear lines, update speed and spawn
    fn lock_piece(&mut self, active: ActivePiece, now: Instant) -> LockEvent {
        self.board
            .place(active.kind, active.rotation, active.column, active.row);

        let cleared = self.board.clear_full_rows_and_compact();
        let lines_cleared = cleared.len();
        let score_delta = line_clear_score(lines_cleared);
        self.score += score_delta;

        self.speed = next_speed(self.speed);
        self.timer.set_cycles_per_second(self.speed);
        self.timer.reset(now);
        self.dropping_rest = LOCK_COOLDOWN_FRAMES;
        self.level = level_for_speed(self.speed);

        debug!(
            "locked {:?} at ({}, {}) rot={}: lines={} +{} score={} speed={:.3} level={}",
            active.kind,
            active.column,
            active.row,
            active.rotation.as_str(),
            lines_cleared,
            score_delta,
            self.score,
            self.speed,
            self.level
        );

        let spawned = self.spawn_next();

        LockEvent {
            piece: active,
            lines_cleared: lines_cleared as u32,
            score_delta,
            game_over: !spawned,
        }
    }

    /// Shift the active piece one column; no-op when blocked or not playing
    pub fn move_piece(&mut self, direction: MoveDirection) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let moved = active.shifted(direction.dx(), 0);
        if moved.fits(&self.board) {
            self.active = Some(moved);
            return true;
        }
        false
    }

    /// Rotate the active piece, shifting it off walls when needed
    pub fn rotate(&mut self, direction: RotateDirection) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let target = direction.apply(active.rotation);
        match resolve_rotation(&self.board, active.kind, active.column, active.row, target) {
            Some((column, row)) => {
                self.active = Some(ActivePiece {
                    rotation: target,
                    column,
                    row,
                    ..active
                });
                true
            }
            None => {
                trace!("rotation of {:?} to {} rejected", active.kind, target.as_str());
                false
            }
        }
    }

    /// Switch gravity to the soft drop rate unless a lock just happened
    pub fn soft_drop_press(&mut self) -> bool {
        if self.phase != Phase::Playing || self.dropping_rest > 0 {
            return false;
        }
        self.timer.set_cycles_per_second(SOFT_DROP_SPEED);
        true
    }

    /// Restore the speed-derived gravity rate.
    ///
    /// While playing the timer also restarts. While paused only the rate
    /// changes, so the timer stays paused.
    pub fn soft_drop_release(&mut self, now: Instant) -> bool {
        match self.phase {
            Phase::Playing => {
                self.timer.set_cycles_per_second(self.speed);
                self.timer.reset(now);
                true
            }
            Phase::Paused => {
                self.timer.set_cycles_per_second(self.speed);
                true
            }
            Phase::NewGame | Phase::GameOver => false,
        }
    }

    /// Apply a command; returns whether it had an effect
    pub fn apply_command(&mut self, command: Command, now: Instant) -> bool {
        match command {
            Command::Start => self.start(now),
            Command::TogglePause => self.toggle_pause(),
            Command::MoveLeft => self.move_piece(MoveDirection::Left),
            Command::MoveRight => self.move_piece(MoveDirection::Right),
            Command::RotateCw => self.rotate(RotateDirection::Clockwise),
            Command::RotateCcw => self.rotate(RotateDirection::CounterClockwise),
            Command::SoftDropPress => self.soft_drop_press(),
            Command::SoftDropRelease => self.soft_drop_release(now),
        }
    }

    /// One iteration of the scheduling loop.
    ///
    /// Advances the timer, runs at most one pending cycle while playing, and
    /// counts down the post-lock soft drop cooldown.
    pub fn frame(&mut self, now: Instant) -> TickOutcome {
        self.timer.advance(now);

        let outcome = if self.phase == Phase::Playing && self.timer.consume_cycle() {
            self.tick(now)
        } else {
            TickOutcome::Idle
        };

        if self.dropping_rest > 0 {
            self.dropping_rest -= 1;
        }

        outcome
    }

    /// Lowest row the active piece could drop to in its current column and rotation
    pub fn ghost_row(&self) -> Option<i8> {
        let mut landing = self.active?;
        loop {
            let below = landing.shifted(0, 1);
            if !below.fits(&self.board) {
                return Some(landing.row);
            }
            landing = below;
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);

        out.phase = self.phase;
        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_row = self.ghost_row();
        out.next = self.next;
        out.score = self.score;
        out.level = self.level;
        out.speed = self.speed;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
