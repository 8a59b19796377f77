//! Integration tests for the game state machine, driven through its public API

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

use blockfall::core::{get_shape, spawn_position, GameState, TickOutcome};
use blockfall::input::InputHandler;
use blockfall::types::{
    Command, MoveDirection, Phase, PieceKind, Rotation, COLUMNS, LOCK_COOLDOWN_FRAMES, SOFT_DROP_SPEED,
};

fn started(seed: u32) -> (GameState, Instant) {
    let t0 = Instant::now();
    let mut state = GameState::new(seed, t0);
    assert!(state.apply_command(Command::Start, t0));
    (state, t0)
}

/// First seed whose opening piece is `kind`
fn seed_opening_with(kind: PieceKind) -> u32 {
    (1..10_000)
        .find(|&seed| started(seed).0.active().map(|p| p.kind) == Some(kind))
        .expect("some seed opens with the requested piece")
}

fn tick_until_locked(state: &mut GameState, now: Instant) -> TickOutcome {
    for _ in 0..100 {
        let outcome = state.tick(now);
        if matches!(outcome, TickOutcome::Locked(_)) {
            return outcome;
        }
        assert_eq!(outcome, TickOutcome::Descended);
    }
    panic!("piece never locked");
}

#[test]
fn test_game_lifecycle() {
    let t0 = Instant::now();
    let mut state = GameState::new(12345, t0);
    assert_eq!(state.phase(), Phase::NewGame);
    assert!(state.active().is_none());

    assert!(state.apply_command(Command::Start, t0));
    assert_eq!(state.phase(), Phase::Playing);
    assert_eq!(state.score(), 0);
    assert_eq!(state.level(), 1);
    assert_eq!(state.speed(), 1.0);

    let active = state.active().unwrap();
    assert_eq!((active.column, active.row), spawn_position(active.kind));
    assert!(state.next().is_some());
}

#[test]
fn test_toggle_pause_in_new_game_is_noop() {
    let t0 = Instant::now();
    let mut state = GameState::new(1, t0);

    assert!(!state.apply_command(Command::TogglePause, t0));
    assert_eq!(state.phase(), Phase::NewGame);
}

#[test]
fn test_commands_rejected_before_start() {
    let t0 = Instant::now();
    let mut state = GameState::new(1, t0);

    for command in [
        Command::MoveLeft,
        Command::MoveRight,
        Command::RotateCw,
        Command::RotateCcw,
        Command::SoftDropPress,
        Command::SoftDropRelease,
    ] {
        assert!(!state.apply_command(command, t0), "{:?}", command);
    }
    assert_eq!(state.phase(), Phase::NewGame);
    assert_eq!(state.tick(t0), TickOutcome::Idle);
}

#[test]
fn test_pause_freezes_simulation() {
    let (mut state, t0) = started(7);
    let before = state.active();

    assert!(state.apply_command(Command::TogglePause, t0));
    assert_eq!(state.phase(), Phase::Paused);
    assert!(!state.apply_command(Command::MoveLeft, t0));
    assert!(!state.apply_command(Command::RotateCw, t0));
    assert!(!state.apply_command(Command::SoftDropRelease, t0));
    assert!(!state.apply_command(Command::Start, t0));

    for i in 1..=100 {
        state.frame(t0 + Duration::from_millis(i * 100));
    }
    assert_eq!(state.active(), before);

    assert!(state.apply_command(Command::TogglePause, t0 + Duration::from_secs(10)));
    assert_eq!(state.phase(), Phase::Playing);
    // No burst of cycles for the paused interval.
    assert_eq!(state.frame(t0 + Duration::from_millis(10_100)), TickOutcome::Idle);
}

#[test]
fn test_o_piece_drops_to_bottom_without_clearing() {
    let seed = seed_opening_with(PieceKind::O);
    let (mut state, t0) = started(seed);
    let upcoming = state.next().unwrap();
    let level = state.level();

    let TickOutcome::Locked(event) = tick_until_locked(&mut state, t0) else {
        unreachable!();
    };

    assert_eq!(event.piece.kind, PieceKind::O);
    assert_eq!((event.piece.column, event.piece.row), (4, 20));
    assert_eq!(event.lines_cleared, 0);
    assert!(!event.game_over);
    assert_eq!(state.score(), 0);
    assert_eq!(state.level(), level);

    let board = state.board();
    for row in [20, 21] {
        let filled: Vec<i8> = (0..COLUMNS).filter(|&c| board.is_occupied(c, row)).collect();
        assert_eq!(filled, vec![4, 5], "row {}", row);
        assert!(!board.is_row_full(row as usize));
    }

    let active = state.active().unwrap();
    assert_eq!(active.kind, upcoming);
    assert_eq!((active.column, active.row), spawn_position(upcoming));
}

#[test]
fn test_move_stops_at_wall() {
    let (mut state, _) = started(3);

    let mut moves = 0;
    while state.move_piece(MoveDirection::Left) {
        moves += 1;
        assert!(moves <= COLUMNS as usize);
    }

    let active = state.active().unwrap();
    let min_col = get_shape(active.kind, active.rotation)
        .iter()
        .map(|&(dx, _)| active.column + dx)
        .min()
        .unwrap();
    assert_eq!(min_col, 0);
}

#[test]
fn test_rotation_commands_cycle_states() {
    let (mut state, t0) = started(5);
    // Drop a few rows so every piece has room to turn.
    for _ in 0..3 {
        state.tick(t0);
    }

    assert!(state.apply_command(Command::RotateCw, t0));
    assert_eq!(state.active().unwrap().rotation, Rotation::East);
    assert!(state.apply_command(Command::RotateCcw, t0));
    assert!(state.apply_command(Command::RotateCcw, t0));
    assert_eq!(state.active().unwrap().rotation, Rotation::West);
}

#[test]
fn test_soft_drop_speeds_up_gravity() {
    let (mut normal, t0) = started(21);
    let (mut fast, _) = started(21);
    assert!(fast.apply_command(Command::SoftDropPress, t0));
    assert_eq!(fast.timer().cycles_per_second(), SOFT_DROP_SPEED);

    for i in 1..=20 {
        let now = t0 + Duration::from_millis(i * 20);
        normal.frame(now);
        fast.frame(now);
    }
    // 400 ms: nothing at 1 cycle/s, ten cycles at 25 cycles/s.
    let start_row = spawn_position(normal.active().unwrap().kind).1;
    assert_eq!(normal.active().unwrap().row, start_row);
    assert_eq!(fast.active().unwrap().row, start_row + 10);

    let now = t0 + Duration::from_millis(420);
    assert!(fast.apply_command(Command::SoftDropRelease, now));
    assert_eq!(fast.timer().cycles_per_second(), fast.speed());
    assert_eq!(fast.timer().pending_cycles(), 0);
}

#[test]
fn test_soft_drop_refused_during_lock_cooldown() {
    let (mut state, t0) = started(8);
    tick_until_locked(&mut state, t0);
    assert_eq!(state.dropping_rest(), LOCK_COOLDOWN_FRAMES);

    for _ in 0..LOCK_COOLDOWN_FRAMES {
        assert!(!state.apply_command(Command::SoftDropPress, t0));
        state.frame(t0);
    }
    assert_eq!(state.dropping_rest(), 0);
    assert!(state.apply_command(Command::SoftDropPress, t0));
}

#[test]
fn test_held_soft_drop_survives_locks() {
    let (mut state, t0) = started(12345);
    let mut input = InputHandler::new();
    let repeat = KeyEvent {
        code: KeyCode::Down,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Repeat,
        state: KeyEventState::NONE,
    };

    let mut locks = 0;
    let mut fast_frames_after_lock = 0;
    for i in 1..=2_000 {
        let now = t0 + Duration::from_millis(i * 20);
        input.handle_key_event(repeat, now);
        for command in input.drain(now) {
            state.apply_command(command, now);
        }
        if let TickOutcome::Locked(ev) = state.frame(now) {
            assert!(!ev.game_over);
            locks += 1;
            if locks == 2 {
                break;
            }
        } else if locks > 0 && state.timer().cycles_per_second() == SOFT_DROP_SPEED {
            fast_frames_after_lock += 1;
        }
    }

    assert_eq!(locks, 2);
    assert!(fast_frames_after_lock > 0);
    assert_eq!(state.timer().cycles_per_second(), state.speed());
}

#[test]
fn test_pause_release_unpause_restores_gravity_rate() {
    let (mut state, t0) = started(4);

    assert!(state.apply_command(Command::SoftDropPress, t0));
    assert!(state.apply_command(Command::TogglePause, t0));
    assert!(state.apply_command(Command::SoftDropRelease, t0));
    assert_eq!(state.phase(), Phase::Paused);
    assert!(state.apply_command(Command::TogglePause, t0));

    assert_eq!(state.timer().cycles_per_second(), state.speed());
    let row = state.active().unwrap().row;
    state.frame(t0 + Duration::from_millis(500));
    assert_eq!(state.active().unwrap().row, row);
}

#[test]
fn test_stacking_without_input_ends_game_and_restart_resets() {
    let (mut state, t0) = started(99);

    let mut locks = 0;
    while state.phase() == Phase::Playing {
        if let TickOutcome::Locked(event) = state.tick(t0) {
            locks += 1;
            assert_eq!(event.game_over, state.phase() == Phase::GameOver);
        }
        assert!(locks < 200, "game never ended");
    }

    assert_eq!(state.phase(), Phase::GameOver);
    assert!(state.timer().is_paused());
    assert!(!state.apply_command(Command::TogglePause, t0));
    assert!(!state.apply_command(Command::MoveRight, t0));
    assert_eq!(state.tick(t0), TickOutcome::Idle);
    assert!(state.speed() > 1.0);

    assert!(state.apply_command(Command::Start, t0));
    assert_eq!(state.phase(), Phase::Playing);
    assert_eq!(state.board().occupied_count(), 0);
    assert_eq!(state.score(), 0);
    assert_eq!(state.level(), 1);
    assert_eq!(state.speed(), 1.0);
}

#[test]
fn test_same_seed_same_game() {
    let (mut a, t0) = started(2024);
    let (mut b, _) = started(2024);

    for _ in 0..500 {
        assert_eq!(a.tick(t0), b.tick(t0));
        assert_eq!(a.next(), b.next());
    }
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn test_snapshot_reflects_state() {
    let (mut state, t0) = started(17);
    state.tick(t0);

    let snap = state.snapshot();
    let active = state.active().unwrap();

    assert_eq!(snap.phase, Phase::Playing);
    assert!(snap.playable());
    assert_eq!(snap.next, state.next());
    assert_eq!(snap.score, state.score());
    assert_eq!(snap.level, state.level());

    let shown = snap.active.unwrap();
    assert_eq!((shown.kind, shown.rotation), (active.kind, active.rotation));
    assert_eq!((shown.column, shown.row), (active.column, active.row));

    let ghost = snap.ghost_row.unwrap();
    assert!(ghost >= active.row);
    assert_eq!(Some(ghost), state.ghost_row());
    assert!(!snap.is_occupied(0, 21));
    assert!(!snap.is_occupied(-1, 0));
}

#[test]
fn test_command_names_parse() {
    for command in Command::ALL {
        assert_eq!(Command::from_str(command.as_str()), Some(command));
    }
    assert_eq!(Command::from_str("rotateCW"), Some(Command::RotateCw));
    assert_eq!(Command::from_str("hardDrop"), None);
}
