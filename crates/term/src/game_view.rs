//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{get_shape, piece_def, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, Phase, ACTIVE_ROWS, BUFFER_ROWS, COLUMNS};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Columns reserved right of the board for next/level/score/controls.
const PANEL_W: u16 = 16;
const PANEL_GAP: u16 = 2;

const CONTROLS: [(&str, &str); 6] = [
    ("A/D", "move"),
    ("S", "drop"),
    ("Q/E", "rotate"),
    ("P", "pause"),
    ("Enter", "start"),
    ("Esc", "quit"),
];

const PLAYFIELD_BG: Rgb = Rgb::new(30, 30, 40);

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let board_px_w = (COLUMNS as u16) * self.cell_w;
        let board_px_h = (ACTIVE_ROWS as u16) * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        // Center board and panel together when the panel fits.
        let group_w = frame_w + PANEL_GAP + PANEL_W;
        let start_x = if viewport.width >= group_w {
            (viewport.width - group_w) / 2
        } else {
            viewport.width.saturating_sub(frame_w) / 2
        };
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        let bg = CellStyle::new(Rgb::new(80, 80, 90), PLAYFIELD_BG);
        let border = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        // Background for play area.
        fb.fill_rect(start_x + 1, start_y + 1, board_px_w, board_px_h, ' ', bg);

        // Border.
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        // Locked board cells (visible rows only).
        for y in 0..ACTIVE_ROWS as u16 {
            for x in 0..COLUMNS as u16 {
                let row = (y as usize) + BUFFER_ROWS as usize;
                match snap.board[row][x as usize] {
                    Some(kind) => self.draw_board_cell(fb, start_x, start_y, x, y, kind, false),
                    None => self.draw_empty_cell(fb, start_x, start_y, x, y),
                }
            }
        }

        if let Some(active) = snap.active {
            let shape = get_shape(active.kind, active.rotation);

            // Ghost piece.
            if let Some(ghost_row) = snap.ghost_row {
                let color = piece_def(active.kind).color();
                let ghost_style = CellStyle::new(color, PLAYFIELD_BG).dim();
                for &(dx, dy) in shape.iter() {
                    if let Some((x, y)) = visible_cell(active.column + dx, ghost_row + dy) {
                        self.fill_cell_rect(fb, start_x, start_y, x, y, '░', ghost_style);
                    }
                }
            }

            // Active piece; cells still in the hidden buffer are clipped.
            for &(dx, dy) in shape.iter() {
                if let Some((x, y)) = visible_cell(active.column + dx, active.row + dy) {
                    self.draw_board_cell(fb, start_x, start_y, x, y, active.kind, true);
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, start_x, start_y, frame_w);

        // Overlays.
        match snap.phase {
            Phase::NewGame => {
                self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "TETRIS", "Press Enter to Play")
            }
            Phase::Paused => {
                self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "PAUSED", "")
            }
            Phase::GameOver => self.draw_overlay_text(
                fb,
                start_x,
                start_y,
                frame_w,
                frame_h,
                "GAME OVER",
                "Press Enter to Play Again",
            ),
            Phase::Playing => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, x: u16, y: u16) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), PLAYFIELD_BG).dim();
        self.fill_cell_rect(fb, start_x, start_y, x, y, '·', style);
    }

    /// Draw one block: a solid left half and a shaded right edge.
    fn draw_board_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: u16,
        y: u16,
        kind: PieceKind,
        highlight: bool,
    ) {
        let def = piece_def(kind);
        let fg = if highlight { def.lighter() } else { def.color() };
        let face = CellStyle::new(fg, def.darker());

        self.fill_cell_rect(fb, start_x, start_y, x, y, '█', face);
        if self.cell_w > 1 {
            let px = start_x + 1 + x * self.cell_w + self.cell_w - 1;
            let py = start_y + 1 + y * self.cell_h;
            for dy in 0..self.cell_h {
                fb.put_char(px, py + dy, '▌', face);
            }
        }
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + cell_x * self.cell_w;
        let py = start_y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(PANEL_GAP);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0)).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let mut y = start_y;
        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        if let Some(kind) = snap.next {
            self.draw_preview(fb, panel_x, y, kind);
        }
        y = y.saturating_add(5);

        fb.put_str(panel_x, y, "LEVEL", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.level, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "CONTROLS", label);
        y = y.saturating_add(1);
        let dim = CellStyle { dim: true, ..value };
        for (keys, action) in CONTROLS {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, keys, value);
            fb.put_str(panel_x + 7, y, action, dim);
            y = y.saturating_add(1);
        }
    }

    /// Draw the next piece in its spawn rotation, trimmed to its bounding box.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, kind: PieceKind) {
        let def = piece_def(kind);
        let rotation = crate::types::Rotation::North;
        let space = def.spacing(rotation);
        let style = CellStyle::new(def.color(), Rgb::new(0, 0, 0));

        for &(dx, dy) in def.shape(rotation).iter() {
            let cx = (dx - space.left) as u16;
            let cy = (dy - space.top) as u16;
            debug_assert!(cx < def.num_columns() as u16 && cy < def.num_rows() as u16);
            fb.fill_rect(x + cx * self.cell_w, y + cy * self.cell_h, self.cell_w, self.cell_h, '█', style);
        }
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        title: &str,
        hint: &str,
    ) {
        let mid_x = start_x.saturating_add(frame_w / 2);
        let mid_y = start_y.saturating_add(frame_h / 2);
        let title_style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        let hint_style = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let title_w = title.chars().count() as u16;
        fb.put_str(mid_x.saturating_sub(title_w / 2), mid_y.saturating_sub(1), title, title_style);

        if !hint.is_empty() {
            let hint_w = hint.chars().count() as u16;
            fb.put_str(mid_x.saturating_sub(hint_w / 2), mid_y.saturating_add(1), hint, hint_style);
        }
    }
}

/// Board position to visible cell coordinates; `None` for buffer rows and off-grid cells.
fn visible_cell(col: i8, row: i8) -> Option<(u16, u16)> {
    let y = row - BUFFER_ROWS;
    if col < 0 || col >= COLUMNS || y < 0 || y >= ACTIVE_ROWS {
        return None;
    }
    Some((col as u16, y as u16))
}
