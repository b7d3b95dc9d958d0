#![forbid(unsafe_code)]

//! Diff rendering: minimal escape sequences between two frames.
//!
//! Given a [`Screen`] whose current buffer has been drawn, these functions
//! produce the byte sequence that transforms a terminal already displaying
//! the previous buffer into one displaying the current buffer.
//!
//! # Buffer discipline
//!
//! The two incremental paths differ deliberately and widget code must know
//! which one it is driving:
//!
//! - [`render`] ends the frame by swapping the buffers and clearing the new
//!   current buffer, so callers redraw the whole scene every frame.
//! - [`render_region`] copies each emitted cell into `previous` in place; it
//!   neither swaps nor clears, so the drawn scene stays in `current`.
//!
//! [`render_full`] repaints everything and mirrors `current` into
//! `previous`, establishing the baseline for subsequent incremental renders.

use crate::emitter::Emitter;
use crate::geometry::Region;
use crate::screen::Screen;
use crate::style::Style;

/// Counters from an observational diff walk.
///
/// Mirrors what the emitting walk would do without producing bytes. Used for
/// instrumentation and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffStats {
    /// Cells visited (width times height).
    pub total_cells: usize,
    /// Cells whose current value differs from the previous buffer.
    pub changed_cells: usize,
    /// Width-0 continuation slots skipped during the walk.
    pub continuation_skips: usize,
    /// Style transitions the emitter would produce.
    pub style_changes: usize,
    /// Changed cells not contiguous with the previously emitted cell.
    pub cursor_jumps: usize,
}

/// Emit the epilogue shared by every render path: a style reset, then
/// cursor placement and reveal when the screen wants the cursor shown.
fn finish_frame(em: &mut Emitter, screen: &Screen) {
    em.reset_style();
    if screen.cursor_visible() {
        let (cx, cy) = screen.cursor();
        em.move_to(cx, cy);
        em.show_cursor();
    }
}

/// Incremental render: emit only what changed since the previous frame.
///
/// Walks rows top-to-bottom and columns left-to-right, skipping
/// continuation slots and unchanged cells; every changed cell gets a move
/// (elided when adjacent), a style change (elided when unchanged), and its
/// rune. Ends by swapping the buffers and clearing the new current buffer.
pub fn render(screen: &mut Screen) -> Vec<u8> {
    let mut em = Emitter::new();
    em.hide_cursor();

    let (width, height) = screen.size();
    for y in 0..height {
        for x in 0..width {
            let cell = screen.get(x, y);
            if cell.width == 0 {
                continue;
            }
            if cell == screen.get_previous(x, y) {
                continue;
            }
            em.move_to(x, y);
            em.set_style(cell.style);
            em.put(cell.rune, cell.width);
        }
    }

    finish_frame(&mut em, screen);
    screen.swap_buffers();
    screen.clear();
    em.finish()
}

/// Full redraw: clear the terminal and emit every cell of the current
/// buffer, rows separated by CR+LF. Mirrors `current` into `previous` so
/// the next incremental render sees the right baseline.
pub fn render_full(screen: &mut Screen) -> Vec<u8> {
    let mut em = Emitter::new();
    em.clear_screen();
    em.cursor_home();
    em.hide_cursor();

    let (width, height) = screen.size();
    for y in 0..height {
        if y > 0 {
            em.newline();
        }
        for x in 0..width {
            let cell = screen.get(x, y);
            if cell.width == 0 {
                continue;
            }
            em.set_style(cell.style);
            em.put(cell.rune, cell.width);
        }
    }

    finish_frame(&mut em, screen);
    screen.copy_to_previous();
    em.finish()
}

/// Regional render: the incremental walk restricted to `region`.
///
/// Each emitted cell is copied into `previous` so a later full diff stays
/// consistent. The buffers are not swapped and `current` is not cleared.
pub fn render_region(screen: &mut Screen, region: Region) -> Vec<u8> {
    let Some(clip) = region.intersection_opt(&screen.bounds()) else {
        return Vec::new();
    };

    let mut em = Emitter::new();
    em.hide_cursor();

    for y in clip.y..clip.bottom() {
        for x in clip.x..clip.right() {
            let cell = screen.get(x, y);
            if cell.width == 0 {
                continue;
            }
            if cell == screen.get_previous(x, y) {
                continue;
            }
            em.move_to(x, y);
            em.set_style(cell.style);
            em.put(cell.rune, cell.width);
            screen.set_previous(x, y, cell);
        }
    }

    finish_frame(&mut em, screen);
    em.finish()
}

/// Walk the diff without emitting, counting what emission would do.
pub fn diff_stats(screen: &Screen) -> DiffStats {
    let (width, height) = screen.size();
    let mut stats = DiffStats {
        total_cells: width as usize * height as usize,
        ..DiffStats::default()
    };

    let mut pos: Option<(u16, u16)> = None;
    let mut style: Option<Style> = None;

    for y in 0..height {
        for x in 0..width {
            let cell = screen.get(x, y);
            if cell.width == 0 {
                stats.continuation_skips += 1;
                continue;
            }
            if cell == screen.get_previous(x, y) {
                continue;
            }
            stats.changed_cells += 1;
            if pos != Some((x, y)) {
                stats.cursor_jumps += 1;
            }
            if style != Some(cell.style) {
                stats.style_changes += 1;
                style = Some(cell.style);
            }
            pos = Some((x + cell.width as u16, y));
        }
    }
    stats
}
