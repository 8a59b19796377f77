//! TerminalRenderer: puts framebuffers on the real terminal.
//!
//! Each presented frame is compared row by row with the one shown before it
//! and only the differing spans are rewritten. With nothing to compare
//! against (first frame, resize, [`TerminalRenderer::invalidate`]) the screen
//! is cleared and every span is dirty.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    shown: Option<FrameBuffer>,
    out: Vec<u8>,
    release_events: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            shown: None,
            out: Vec::with_capacity(64 * 1024),
            release_events: false,
        }
    }

    /// Enter raw mode and the alternate screen.
    ///
    /// Key release reporting is requested when the terminal supports the
    /// keyboard enhancement protocol, so soft drop can end on the real release.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.release_events = terminal::supports_keyboard_enhancement().unwrap_or(false);

        self.out.clear();
        self.out.queue(terminal::EnterAlternateScreen)?;
        self.out.queue(cursor::Hide)?;
        self.out.queue(terminal::DisableLineWrap)?;
        if self.release_events {
            self.out.queue(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))?;
        }
        self.flush()?;
        log::debug!("terminal entered, key release events: {}", self.release_events);
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.out.clear();
        if self.release_events {
            self.out.queue(PopKeyboardEnhancementFlags)?;
        }
        self.out.queue(ResetColor)?;
        self.out.queue(SetAttribute(Attribute::Reset))?;
        self.out.queue(terminal::EnableLineWrap)?;
        self.out.queue(cursor::Show)?;
        self.out.queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Forget what is on screen; the next frame repaints everything.
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Show `fb`, then hand back the previously shown buffer in its place.
    ///
    /// The caller keeps rendering into whatever buffer it gets back, so two
    /// buffers alternate without cloning.
    pub fn present(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        let shown = self
            .shown
            .take()
            .filter(|prev| prev.width() == fb.width() && prev.height() == fb.height());

        self.out.clear();
        encode_frame(shown.as_ref(), fb, &mut self.out)?;
        self.flush()?;

        let mut spare = shown.unwrap_or_else(|| FrameBuffer::new(fb.width(), fb.height()));
        std::mem::swap(&mut spare, fb);
        self.shown = Some(spare);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.write_all(&self.out)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode the commands that turn `prev` into `next` on screen.
///
/// `prev` must have the same size as `next`; `None` clears the screen and
/// paints every cell.
pub fn encode_frame(prev: Option<&FrameBuffer>, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    if prev.is_none() {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
    }

    let width = next.width() as usize;
    let mut pen: Option<CellStyle> = None;

    for y in 0..next.height() {
        let start = y as usize * width;
        let row = &next.cells()[start..start + width];
        let old = prev.map(|p| &p.cells()[start..start + width]);

        let mut x = 0;
        while x < width {
            if old.is_some_and(|old| old[x] == row[x]) {
                x += 1;
                continue;
            }
            let run_end = dirty_run_end(old, row, x);
            out.queue(cursor::MoveTo(x as u16, y))?;
            for cell in &row[x..run_end] {
                print_cell(out, *cell, &mut pen)?;
            }
            x = run_end;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// End (exclusive) of the run of differing cells starting at `from`.
fn dirty_run_end(old: Option<&[Cell]>, row: &[Cell], from: usize) -> usize {
    match old {
        None => row.len(),
        Some(old) => (from..row.len())
            .find(|&i| old[i] == row[i])
            .unwrap_or(row.len()),
    }
}

fn print_cell(out: &mut Vec<u8>, cell: Cell, pen: &mut Option<CellStyle>) -> Result<()> {
    if *pen != Some(cell.style) {
        let style = cell.style;
        out.queue(SetAttribute(Attribute::Reset))?;
        out.queue(SetForegroundColor(term_color(style.fg)))?;
        out.queue(SetBackgroundColor(term_color(style.bg)))?;
        if style.bold {
            out.queue(SetAttribute(Attribute::Bold))?;
        }
        if style.dim {
            out.queue(SetAttribute(Attribute::Dim))?;
        }
        *pen = Some(style);
    }
    out.queue(Print(cell.ch))?;
    Ok(())
}

fn term_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
