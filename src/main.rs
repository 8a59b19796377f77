//! Terminal runner (default binary).
//!
//! Polls crossterm input until the next frame deadline, feeds the queued
//! commands to the game, advances it by one frame and redraws.

use std::fs::File;
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::info;

use blockfall::core::{GameSnapshot, GameState};
use blockfall::input::{should_quit, InputHandler};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::RunConfig;

fn main() -> Result<()> {
    let config = RunConfig::from_env();
    init_logging(&config)?;
    info!("starting with seed {} and {} ms frames", config.seed, config.frame_ms);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging(config: &RunConfig) -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(path) = &config.log_path {
        let file = File::create(path).with_context(|| format!("creating log file {path}"))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: &RunConfig) -> Result<()> {
    let mut game = GameState::new(config.seed, Instant::now());

    let view = GameView::default();
    let mut input = InputHandler::new();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    let frame = config.frame_duration();
    let mut next_frame = Instant::now() + frame;

    loop {
        // Input until the frame deadline.
        loop {
            let timeout = next_frame.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Release && should_quit(key) {
                        info!("quit at score {}", game.score());
                        return Ok(());
                    }
                    input.handle_key_event(key, Instant::now());
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        let now = Instant::now();
        next_frame += frame;
        if next_frame < now {
            next_frame = now + frame;
        }

        for command in input.drain(now) {
            game.apply_command(command, now);
        }
        game.frame(now);

        game.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.present(&mut fb)?;
    }
}
