#![forbid(unsafe_code)]

//! State-tracked escape-sequence emitter.
//!
//! The [`Emitter`] owns an output byte buffer and remembers the cursor
//! position and style it last produced, so callers can issue logical writes
//! and redundant moves and SGR changes are elided. Writing a rune advances
//! the tracked column by the rune's display width, which lets runs of
//! adjacent cells go out with no cursor movement at all.

use crate::ansi;
use crate::style::Style;

/// Threshold below which a same-row forward move uses CUF instead of CUP.
const RELATIVE_MOVE_MAX: u16 = 4;

/// Accumulates terminal output while tracking cursor and style state.
#[derive(Debug, Default)]
pub struct Emitter {
    out: Vec<u8>,
    /// Tracked cursor position. `None` until the first absolute move.
    pos: Option<(u16, u16)>,
    /// Tracked SGR state. `None` until the first style emission.
    style: Option<Style>,
}

impl Emitter {
    /// Create an emitter with an empty output buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the cursor to (x, y), 0-indexed.
    ///
    /// Emits nothing when the tracked position already matches. A short
    /// forward hop on the same row uses a relative move; everything else is
    /// an absolute CUP.
    pub fn move_to(&mut self, x: u16, y: u16) {
        match self.pos {
            Some((cx, cy)) if cx == x && cy == y => return,
            Some((cx, cy)) if cy == y && x > cx && x - cx <= RELATIVE_MOVE_MAX => {
                ansi::cursor_forward(&mut self.out, x - cx);
            }
            _ => ansi::cursor_to(&mut self.out, x, y),
        }
        self.pos = Some((x, y));
    }

    /// Switch to `style`, emitting a full SGR sequence unless the tracked
    /// style already matches.
    pub fn set_style(&mut self, style: Style) {
        if self.style == Some(style) {
            return;
        }
        ansi::encode_style(&mut self.out, style);
        self.style = Some(style);
    }

    /// Write a rune, advancing the tracked column by `width`.
    ///
    /// Codepoint 0 (a continuation marker) is written as a space.
    pub fn put(&mut self, rune: char, width: u8) {
        let ch = if rune == '\0' { ' ' } else { rune };
        let mut buf = [0u8; 4];
        self.out
            .extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
        if let Some((x, y)) = self.pos {
            self.pos = Some((x.saturating_add(width as u16), y));
        }
    }

    /// Write a CR+LF row separator, tracking the wrap to column 0.
    pub fn newline(&mut self) {
        self.out.extend_from_slice(b"\r\n");
        if let Some((_, y)) = self.pos {
            self.pos = Some((0, y.saturating_add(1)));
        }
    }

    /// Reset the terminal style. The tracked style becomes the default.
    pub fn reset_style(&mut self) {
        self.out.extend_from_slice(ansi::SGR_RESET);
        self.style = Some(Style::DEFAULT);
    }

    /// Erase the whole display. The cursor does not move.
    pub fn clear_screen(&mut self) {
        self.out.extend_from_slice(ansi::CLEAR_SCREEN);
    }

    /// Home the cursor to (0, 0).
    pub fn cursor_home(&mut self) {
        self.out.extend_from_slice(ansi::CURSOR_HOME);
        self.pos = Some((0, 0));
    }

    /// Hide the cursor.
    pub fn hide_cursor(&mut self) {
        self.out.extend_from_slice(ansi::CURSOR_HIDE);
    }

    /// Show the cursor.
    pub fn show_cursor(&mut self) {
        self.out.extend_from_slice(ansi::CURSOR_SHOW);
    }

    /// Enter the alternate screen buffer.
    pub fn enter_alt_screen(&mut self) {
        self.out.extend_from_slice(ansi::ALT_SCREEN_ENTER);
        self.pos = None;
    }

    /// Leave the alternate screen buffer.
    pub fn leave_alt_screen(&mut self) {
        self.out.extend_from_slice(ansi::ALT_SCREEN_LEAVE);
        self.pos = None;
    }

    /// Number of bytes accumulated so far.
    pub fn len(&self) -> usize {
        self.out.len()
    }

    /// Check if nothing has been emitted yet.
    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    /// Consume the emitter and return the accumulated bytes.
    pub fn finish(self) -> Vec<u8> {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::Emitter;
    use crate::color::Color;
    use crate::style::Style;

    #[test]
    fn move_to_same_position_is_elided() {
        let mut em = Emitter::new();
        em.move_to(3, 2);
        let after_first = em.len();
        em.move_to(3, 2);
        assert_eq!(em.len(), after_first);
        assert_eq!(em.finish(), b"\x1b[3;4H");
    }

    #[test]
    fn short_forward_hop_uses_relative_move() {
        let mut em = Emitter::new();
        em.move_to(0, 0);
        em.move_to(4, 0);
        assert_eq!(em.finish(), b"\x1b[1;1H\x1b[4C");
    }

    #[test]
    fn long_forward_hop_uses_absolute_move() {
        let mut em = Emitter::new();
        em.move_to(0, 0);
        em.move_to(5, 0);
        assert_eq!(em.finish(), b"\x1b[1;1H\x1b[1;6H");
    }

    #[test]
    fn backward_and_cross_row_moves_are_absolute() {
        let mut em = Emitter::new();
        em.move_to(5, 0);
        em.move_to(2, 0);
        em.move_to(3, 1);
        assert_eq!(em.finish(), b"\x1b[1;6H\x1b[1;3H\x1b[2;4H");
    }

    #[test]
    fn first_move_is_absolute() {
        let mut em = Emitter::new();
        em.move_to(2, 0);
        assert_eq!(em.finish(), b"\x1b[1;3H");
    }

    #[test]
    fn put_advances_tracked_column_by_width() {
        let mut em = Emitter::new();
        em.move_to(0, 0);
        em.put('世', 2);
        // Tracked position is now (2, 0), so this move needs no bytes.
        let before = em.len();
        em.move_to(2, 0);
        assert_eq!(em.len(), before);
    }

    #[test]
    fn adjacent_writes_need_no_moves() {
        let mut em = Emitter::new();
        em.move_to(0, 0);
        em.put('a', 1);
        em.put('b', 1);
        em.put('c', 1);
        assert_eq!(em.finish(), b"\x1b[1;1Habc");
    }

    #[test]
    fn continuation_rune_is_written_as_space() {
        let mut em = Emitter::new();
        em.put('\0', 1);
        assert_eq!(em.finish(), b" ");
    }

    #[test]
    fn repeated_style_is_elided() {
        let style = Style::default().with_fg(Color::RED);
        let mut em = Emitter::new();
        em.set_style(style);
        let after_first = em.len();
        em.set_style(style);
        assert_eq!(em.len(), after_first);
    }

    #[test]
    fn style_change_reemits() {
        let mut em = Emitter::new();
        em.set_style(Style::default().with_fg(Color::RED));
        em.set_style(Style::default().with_fg(Color::BLUE));
        assert_eq!(em.finish(), b"\x1b[0;31;49m\x1b[0;34;49m");
    }

    #[test]
    fn reset_tracks_default_style() {
        let mut em = Emitter::new();
        em.set_style(Style::default().with_fg(Color::RED));
        em.reset_style();
        // Default style after a reset should not re-emit.
        em.set_style(Style::DEFAULT);
        assert_eq!(em.finish(), b"\x1b[0;31;49m\x1b[0m");
    }

    #[test]
    fn newline_wraps_tracked_position() {
        let mut em = Emitter::new();
        em.cursor_home();
        em.put('x', 1);
        em.newline();
        let before = em.len();
        em.move_to(0, 1);
        assert_eq!(em.len(), before);
    }

    #[test]
    fn finish_returns_accumulated_bytes() {
        let mut em = Emitter::new();
        assert!(em.is_empty());
        em.hide_cursor();
        em.show_cursor();
        assert_eq!(em.finish(), b"\x1b[?25l\x1b[?25h");
    }
}
