//! Scoring module - line clear points and speed/level progression
//!
//! Line clears pay `50 << lines` (1 → 100, 2 → 200, 3 → 400, 4 → 800).
//! Every lock speeds gravity up by a fixed step, and the level is derived
//! from the speed rather than from cleared lines.

use crate::types::{LEVEL_FACTOR, LINE_SCORE_BASE, SPEED_STEP};

/// Points for clearing `lines` rows with a single lock
pub fn line_clear_score(lines: usize) -> u32 {
    if lines == 0 {
        return 0;
    }
    // A lock fills at most 4 rows; cap the shift so a hand-built board can't overflow.
    LINE_SCORE_BASE << lines.min(20) as u32
}

/// Gravity speed after one more lock
pub fn next_speed(speed: f32) -> f32 {
    speed + SPEED_STEP
}

/// Level shown for a given gravity speed: `floor(speed * 1.70)`
pub fn level_for_speed(speed: f32) -> u32 {
    (speed * LEVEL_FACTOR).floor() as u32
}
