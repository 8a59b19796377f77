//! Input handler: turns terminal key events into a per-frame command batch.
//!
//! Soft drop is a held key. Each press or auto-repeat of it queues a
//! `SoftDropPress`; one `SoftDropRelease` ends the hold. Terminals that do not
//! emit key release events send auto-repeat presses instead, so a hold is
//! released after a short timeout without any press.

use std::time::{Duration, Instant};

use arrayvec::ArrayVec;
use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::{is_soft_drop_key, map_key_press};
use crate::types::Command;

/// Commands gathered between two frames.
pub type CommandBatch = ArrayVec<Command, 32>;

// Longer than the usual terminal auto-repeat interval, so a held key does
// not flicker between press and release.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u64 = 150;

/// Queues commands from key events until the frame loop drains them.
#[derive(Debug, Clone)]
pub struct InputHandler {
    queue: CommandBatch,
    soft_drop_held: bool,
    last_soft_drop_key: Option<Instant>,
    key_release_timeout: Duration,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            queue: CommandBatch::new(),
            soft_drop_held: false,
            last_soft_drop_key: None,
            key_release_timeout: Duration::from_millis(DEFAULT_KEY_RELEASE_TIMEOUT_MS),
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.key_release_timeout = Duration::from_millis(timeout_ms);
        self
    }

    pub fn key_release_timeout(&self) -> Duration {
        self.key_release_timeout
    }

    pub fn soft_drop_held(&self) -> bool {
        self.soft_drop_held
    }

    /// Number of commands waiting for the next drain
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    fn push(&mut self, command: Command) {
        // A full batch drops input rather than blocking the terminal reader.
        let _ = self.queue.try_push(command);
    }

    /// Record one key event received at `now`.
    pub fn handle_key_event(&mut self, key: KeyEvent, now: Instant) {
        if is_soft_drop_key(key.code) {
            match key.kind {
                // Repeats re-arm the fast rate once a lock's cooldown is over.
                KeyEventKind::Press | KeyEventKind::Repeat => {
                    self.last_soft_drop_key = Some(now);
                    self.soft_drop_held = true;
                    self.push(Command::SoftDropPress);
                }
                KeyEventKind::Release => self.release_soft_drop(),
            }
            return;
        }

        if key.kind == KeyEventKind::Release {
            return;
        }
        if let Some(command) = map_key_press(key) {
            self.push(command);
        }
    }

    fn release_soft_drop(&mut self) {
        if self.soft_drop_held {
            self.soft_drop_held = false;
            self.last_soft_drop_key = None;
            self.push(Command::SoftDropRelease);
        }
    }

    /// Take every queued command, in arrival order.
    ///
    /// A soft drop hold with no key activity for longer than the release
    /// timeout is released first.
    pub fn drain(&mut self, now: Instant) -> CommandBatch {
        if let Some(last) = self.last_soft_drop_key {
            if now.saturating_duration_since(last) > self.key_release_timeout {
                self.release_soft_drop();
            }
        }
        std::mem::take(&mut self.queue)
    }

    pub fn reset(&mut self) {
        self.queue.clear();
        self.soft_drop_held = false;
        self.last_soft_drop_key = None;
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
