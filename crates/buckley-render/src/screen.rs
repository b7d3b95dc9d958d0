#![forbid(unsafe_code)]

//! Double-buffered cell grid with bounds-safe drawing primitives.
//!
//! The [`Screen`] owns two grids of equal size: `current`, which drawing
//! targets, and `previous`, which the diff renderer compares against. All
//! drawing operations are total: out-of-range coordinates are silently
//! clipped and out-of-range reads return the empty cell. A rendering path
//! must never abort a frame because a widget computed a bad rectangle.
//!
//! # Wide characters
//!
//! A double-width codepoint writes its primary cell plus a width-0
//! continuation in the next column. Overwriting either half of an existing
//! wide pair clears the orphaned half so no torn glyph survives a write:
//! writing over a primary empties its continuation, and writing over a
//! continuation empties the owning primary.

use unicode_segmentation::UnicodeSegmentation;

use crate::cell::Cell;
use crate::geometry::Region;
use crate::rune_width;
use crate::style::Style;

/// Characters used to draw a box outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxChars {
    /// Top-left corner.
    pub top_left: char,
    /// Top-right corner.
    pub top_right: char,
    /// Bottom-left corner.
    pub bottom_left: char,
    /// Bottom-right corner.
    pub bottom_right: char,
    /// Horizontal edge.
    pub horizontal: char,
    /// Vertical edge.
    pub vertical: char,
}

impl BoxChars {
    /// Simple box-drawing characters (U+250x).
    pub const SQUARE: Self = Self {
        top_left: '┌',
        top_right: '┐',
        bottom_left: '└',
        bottom_right: '┘',
        horizontal: '─',
        vertical: '│',
    };
}

/// A double-buffered terminal grid.
///
/// Cells are stored in row-major order: `index = y * width + x`.
#[derive(Debug, Clone)]
pub struct Screen {
    width: u16,
    height: u16,
    current: Vec<Cell>,
    previous: Vec<Cell>,
    cursor: (u16, u16),
    cursor_visible: bool,
}

impl Screen {
    /// Create a screen with the given dimensions, both buffers empty.
    pub fn new(width: u16, height: u16) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            current: vec![Cell::EMPTY; size],
            previous: vec![Cell::EMPTY; size],
            cursor: (0, 0),
            cursor_visible: true,
        }
    }

    /// Screen width in cells.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Screen height in cells.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Screen dimensions as (width, height).
    #[inline]
    pub const fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Bounding region of the whole grid.
    #[inline]
    pub const fn bounds(&self) -> Region {
        Region::from_size(self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Read the current buffer at (x, y). Out-of-range reads return the
    /// empty cell; they never fail.
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Cell {
        self.index(x, y)
            .map(|i| self.current[i])
            .unwrap_or(Cell::EMPTY)
    }

    /// Read the previous buffer at (x, y). Out-of-range reads return the
    /// empty cell.
    #[inline]
    pub fn get_previous(&self, x: u16, y: u16) -> Cell {
        self.index(x, y)
            .map(|i| self.previous[i])
            .unwrap_or(Cell::EMPTY)
    }

    /// Overwrite a previous-buffer slot. Used by regional rendering to keep
    /// the baseline consistent without a buffer swap.
    #[inline]
    pub(crate) fn set_previous(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.previous[i] = cell;
        }
    }

    /// Clear the orphaned half of a wide pair before (x, y) is overwritten.
    ///
    /// `incoming_continuation` suppresses the head-clearing case so that a
    /// raw copy laying down a head and then its own continuation does not
    /// destroy the head it just wrote.
    fn cleanup_overlap(&mut self, x: u16, y: u16, incoming_continuation: bool) {
        let Some(idx) = self.index(x, y) else { return };
        let old = self.current[idx];

        if old.width == 2 {
            if let Some(tail) = self.index(x + 1, y)
                && self.current[tail].is_continuation()
            {
                self.current[tail] = Cell::EMPTY;
            }
        } else if old.is_continuation() && !incoming_continuation && x > 0 {
            if let Some(head) = self.index(x - 1, y)
                && self.current[head].width == 2
            {
                self.current[head] = Cell::EMPTY;
            }
        }
    }

    /// Store a raw cell at (x, y) in the current buffer, keeping wide pairs
    /// coherent. Out-of-range writes are dropped.
    pub(crate) fn put_raw(&mut self, x: u16, y: u16, cell: Cell) {
        let Some(idx) = self.index(x, y) else { return };
        self.cleanup_overlap(x, y, cell.is_continuation());
        self.current[idx] = cell;
    }

    /// Write one rune at (x, y).
    ///
    /// The rune's display width is derived internally; a width-2 rune also
    /// writes its continuation at (x+1, y) when that column exists. At the
    /// last column the primary is still written and the continuation is
    /// dropped. Out-of-range writes are no-ops.
    pub fn set(&mut self, x: u16, y: u16, rune: char, style: Style) {
        let width = rune_width(rune);
        let Some(idx) = self.index(x, y) else { return };

        self.cleanup_overlap(x, y, false);
        let write_tail = width == 2 && x + 1 < self.width;
        if write_tail {
            self.cleanup_overlap(x + 1, y, true);
        }

        self.current[idx] = Cell { rune, width, style };
        if write_tail {
            self.current[idx + 1] = Cell::continuation(style);
        }
    }

    /// Write a string starting at column `x` (which may be negative), row `y`.
    ///
    /// Graphemes are laid out left to right, each advancing the column by
    /// its display width, stopping at the right edge. Graphemes that fall
    /// left of column 0 are skipped while still advancing the column, so a
    /// negative `x` shows only the visible suffix; a wide grapheme that
    /// would straddle column 0 is dropped entirely. Returns the number of
    /// columns written (0 when `y` is out of range).
    pub fn set_string(&mut self, x: i32, y: u16, text: &str, style: Style) -> u16 {
        let clip = self.bounds();
        self.set_string_in(clip, x, y, text, style)
    }

    /// String layout clipped to `clip`, with (x, y) local to the region.
    /// Shared by [`Screen::set_string`] and [`SubScreen::set_string`].
    pub(crate) fn set_string_in(
        &mut self,
        clip: Region,
        x: i32,
        y: u16,
        text: &str,
        style: Style,
    ) -> u16 {
        if y >= clip.height {
            return 0;
        }
        let row = clip.y + y;
        let left = clip.x as i32;
        let right = clip.right() as i32;
        let mut col = left + x;
        let mut written: u16 = 0;

        for grapheme in text.graphemes(true) {
            let Some(first) = grapheme.chars().next() else {
                continue;
            };
            let width = rune_width(first) as i32;
            if col >= right {
                break;
            }
            if col < left {
                // Hidden prefix; a wide rune straddling the left edge is
                // dropped whole rather than showing its right half.
                col += width;
                continue;
            }
            self.set(col as u16, row, first, style);
            col += width;
            written += width as u16;
        }
        written
    }

    /// Fill a rectangle with one rune, clipped to the grid.
    pub fn fill_rect(&mut self, x: u16, y: u16, width: u16, height: u16, rune: char, style: Style) {
        let x_end = x.saturating_add(width).min(self.width);
        let y_end = y.saturating_add(height).min(self.height);
        for row in y..y_end {
            for col in x..x_end {
                self.set(col, row, rune, style);
            }
        }
    }

    /// Draw a horizontal line of `width` cells.
    pub fn hline(&mut self, x: u16, y: u16, width: u16, rune: char, style: Style) {
        self.fill_rect(x, y, width, 1, rune, style);
    }

    /// Draw a vertical line of `height` cells.
    pub fn vline(&mut self, x: u16, y: u16, height: u16, rune: char, style: Style) {
        self.fill_rect(x, y, 1, height, rune, style);
    }

    /// Draw a box outline. Skipped entirely when either dimension is below 2.
    /// The interior is left untouched.
    pub fn draw_box(&mut self, x: u16, y: u16, width: u16, height: u16, style: Style) {
        if width < 2 || height < 2 {
            return;
        }
        let chars = BoxChars::SQUARE;
        let x1 = x + width - 1;
        let y1 = y + height - 1;

        self.set(x, y, chars.top_left, style);
        self.set(x1, y, chars.top_right, style);
        self.set(x, y1, chars.bottom_left, style);
        self.set(x1, y1, chars.bottom_right, style);
        self.hline(x + 1, y, width - 2, chars.horizontal, style);
        self.hline(x + 1, y1, width - 2, chars.horizontal, style);
        self.vline(x, y + 1, height - 2, chars.vertical, style);
        self.vline(x1, y + 1, height - 2, chars.vertical, style);
    }

    /// Reset every current cell to empty.
    pub fn clear(&mut self) {
        self.current.fill(Cell::EMPTY);
    }

    /// Resize the grid in place.
    ///
    /// Content in the top-left intersection is preserved in `current`;
    /// `previous` is reset to all-empty so the next diff repaints fully.
    /// Unchanged or zero dimensions are a no-op. The cursor position is not
    /// clamped; callers re-set it if needed.
    pub fn resize(&mut self, width: u16, height: u16) {
        if width == 0 || height == 0 {
            return;
        }
        if width == self.width && height == self.height {
            return;
        }

        let size = width as usize * height as usize;
        let mut next = vec![Cell::EMPTY; size];
        for y in 0..self.height.min(height) {
            let src = y as usize * self.width as usize;
            let dst = y as usize * width as usize;
            let span = self.width.min(width) as usize;
            next[dst..dst + span].copy_from_slice(&self.current[src..src + span]);
        }

        self.current = next;
        self.previous = vec![Cell::EMPTY; size];
        self.width = width;
        self.height = height;
    }

    /// Swap the roles of `current` and `previous` in O(1).
    pub fn swap_buffers(&mut self) {
        std::mem::swap(&mut self.current, &mut self.previous);
    }

    /// Mirror `current` into `previous`. Used after a full redraw so
    /// subsequent incremental renders see the right baseline.
    pub fn copy_to_previous(&mut self) {
        self.previous.copy_from_slice(&self.current);
    }

    /// Copy a window of cells from another screen, clipped on both sides.
    #[allow(clippy::too_many_arguments)]
    pub fn blit(
        &mut self,
        src: &Screen,
        src_x: u16,
        src_y: u16,
        dst_x: u16,
        dst_y: u16,
        width: u16,
        height: u16,
    ) {
        for dy in 0..height {
            for dx in 0..width {
                let sx = src_x.saturating_add(dx);
                let sy = src_y.saturating_add(dy);
                let Some(i) = src.index(sx, sy) else { continue };
                self.put_raw(
                    dst_x.saturating_add(dx),
                    dst_y.saturating_add(dy),
                    src.current[i],
                );
            }
        }
    }

    /// Borrow a rectangular view that forwards drawing to this screen with
    /// translated coordinates. The view carries no buffer of its own.
    pub fn sub(&mut self, x: u16, y: u16, width: u16, height: u16) -> SubScreen<'_> {
        let region = Region::new(x, y, width, height).intersection(&self.bounds());
        SubScreen {
            parent: self,
            region,
        }
    }

    /// Set the cursor position. Not clamped to the grid.
    #[inline]
    pub fn set_cursor(&mut self, x: u16, y: u16) {
        self.cursor = (x, y);
    }

    /// Cursor position as (x, y).
    #[inline]
    pub const fn cursor(&self) -> (u16, u16) {
        self.cursor
    }

    /// Set cursor visibility.
    #[inline]
    pub fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = visible;
    }

    /// Whether the cursor is shown after a render.
    #[inline]
    pub const fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }
}

/// A borrowed rectangular view of a [`Screen`].
///
/// All drawing is forwarded to the parent with translated coordinates and
/// clipped to the view's region.
#[derive(Debug)]
pub struct SubScreen<'a> {
    parent: &'a mut Screen,
    region: Region,
}

impl SubScreen<'_> {
    /// View dimensions as (width, height).
    #[inline]
    pub const fn size(&self) -> (u16, u16) {
        (self.region.width, self.region.height)
    }

    /// Write one rune at view-local (x, y).
    pub fn set(&mut self, x: u16, y: u16, rune: char, style: Style) {
        if x < self.region.width && y < self.region.height {
            self.parent
                .set(self.region.x + x, self.region.y + y, rune, style);
        }
    }

    /// Write a string at view-local coordinates, clipped to the view.
    pub fn set_string(&mut self, x: i32, y: u16, text: &str, style: Style) -> u16 {
        self.parent.set_string_in(self.region, x, y, text, style)
    }

    /// Fill a view-local rectangle.
    pub fn fill_rect(&mut self, x: u16, y: u16, width: u16, height: u16, rune: char, style: Style) {
        if x >= self.region.width || y >= self.region.height {
            return;
        }
        let w = width.min(self.region.width - x);
        let h = height.min(self.region.height - y);
        self.parent
            .fill_rect(self.region.x + x, self.region.y + y, w, h, rune, style);
    }

    /// Draw a horizontal line.
    pub fn hline(&mut self, x: u16, y: u16, width: u16, rune: char, style: Style) {
        self.fill_rect(x, y, width, 1, rune, style);
    }

    /// Draw a vertical line.
    pub fn vline(&mut self, x: u16, y: u16, height: u16, rune: char, style: Style) {
        self.fill_rect(x, y, 1, height, rune, style);
    }

    /// Draw a box outline clipped to the view.
    pub fn draw_box(&mut self, x: u16, y: u16, width: u16, height: u16, style: Style) {
        if x >= self.region.width || y >= self.region.height {
            return;
        }
        let w = width.min(self.region.width - x);
        let h = height.min(self.region.height - y);
        self.parent
            .draw_box(self.region.x + x, self.region.y + y, w, h, style);
    }

    /// Reset every cell in the view to empty.
    pub fn clear(&mut self) {
        self.fill_rect(0, 0, self.region.width, self.region.height, ' ', Style::DEFAULT);
    }
}

#[cfg(test)]
mod tests {
    use super::Screen;
    use crate::cell::Cell;
    use crate::color::Color;
    use crate::style::Style;

    #[test]
    fn new_screen_is_empty() {
        let screen = Screen::new(10, 5);
        assert_eq!(screen.size(), (10, 5));
        for y in 0..5 {
            for x in 0..10 {
                assert!(screen.get(x, y).is_empty());
                assert!(screen.get_previous(x, y).is_empty());
            }
        }
    }

    #[test]
    fn out_of_range_reads_return_empty() {
        let screen = Screen::new(10, 5);
        assert_eq!(screen.get(10, 0), Cell::EMPTY);
        assert_eq!(screen.get(0, 5), Cell::EMPTY);
        assert_eq!(screen.get(u16::MAX, u16::MAX), Cell::EMPTY);
    }

    #[test]
    fn out_of_range_writes_are_noops() {
        let mut screen = Screen::new(10, 5);
        screen.set(10, 0, 'X', Style::DEFAULT);
        screen.set(0, 5, 'X', Style::DEFAULT);
        for y in 0..5 {
            for x in 0..10 {
                assert!(screen.get(x, y).is_empty());
            }
        }
    }

    #[test]
    fn set_and_get_roundtrip() {
        let mut screen = Screen::new(10, 5);
        let style = Style::default().with_fg(Color::GREEN);
        screen.set(3, 2, 'Q', style);
        let cell = screen.get(3, 2);
        assert_eq!(cell.rune, 'Q');
        assert_eq!(cell.width, 1);
        assert_eq!(cell.style, style);
    }

    #[test]
    fn wide_rune_writes_continuation() {
        let mut screen = Screen::new(10, 10);
        let style = Style::default().with_fg(Color::RED);
        screen.set(0, 0, '世', style);

        let head = screen.get(0, 0);
        assert_eq!(head.rune, '世');
        assert_eq!(head.width, 2);

        let tail = screen.get(1, 0);
        assert_eq!(tail.width, 0);
        assert_eq!(tail.rune, '\0');
        assert_eq!(tail.style, style, "continuation shares the primary's style");
    }

    #[test]
    fn wide_rune_at_last_column_drops_continuation() {
        let mut screen = Screen::new(10, 10);
        screen.set(9, 3, '世', Style::DEFAULT);
        let head = screen.get(9, 3);
        assert_eq!(head.rune, '世');
        assert_eq!(head.width, 2, "primary still written");
        assert!(screen.get(0, 4).is_empty(), "no wraparound into next row");
    }

    #[test]
    fn overwriting_wide_head_clears_continuation() {
        let mut screen = Screen::new(10, 10);
        screen.set(0, 0, '世', Style::DEFAULT);
        screen.set(0, 0, 'A', Style::DEFAULT);

        let head = screen.get(0, 0);
        assert_eq!(head.rune, 'A');
        assert_eq!(head.width, 1);
        assert!(screen.get(1, 0).is_empty(), "orphan continuation cleaned up");
    }

    #[test]
    fn overwriting_continuation_clears_head() {
        let mut screen = Screen::new(10, 10);
        screen.set(0, 0, '世', Style::DEFAULT);
        screen.set(1, 0, 'B', Style::DEFAULT);

        assert!(screen.get(0, 0).is_empty(), "half-glyph head cleaned up");
        assert_eq!(screen.get(1, 0).rune, 'B');
    }

    #[test]
    fn adjacent_wide_runes_coexist() {
        let mut screen = Screen::new(10, 10);
        screen.set(0, 0, '日', Style::DEFAULT);
        screen.set(2, 0, '本', Style::DEFAULT);

        assert_eq!(screen.get(0, 0).rune, '日');
        assert!(screen.get(1, 0).is_continuation());
        assert_eq!(screen.get(2, 0).rune, '本');
        assert!(screen.get(3, 0).is_continuation());
    }

    #[test]
    fn set_string_returns_columns_written() {
        let mut screen = Screen::new(10, 5);
        let n = screen.set_string(0, 0, "Hello", Style::DEFAULT);
        assert_eq!(n, 5);
        assert_eq!(screen.get(0, 0).rune, 'H');
        assert_eq!(screen.get(4, 0).rune, 'o');
    }

    #[test]
    fn set_string_stops_at_right_edge() {
        let mut screen = Screen::new(5, 5);
        let n = screen.set_string(3, 0, "abcdef", Style::DEFAULT);
        assert_eq!(n, 2);
        assert_eq!(screen.get(3, 0).rune, 'a');
        assert_eq!(screen.get(4, 0).rune, 'b');
    }

    #[test]
    fn set_string_with_negative_x_shows_visible_suffix() {
        let mut screen = Screen::new(10, 5);
        let n = screen.set_string(-3, 0, "abcdef", Style::DEFAULT);
        assert_eq!(n, 3);
        assert_eq!(screen.get(0, 0).rune, 'd');
        assert_eq!(screen.get(1, 0).rune, 'e');
        assert_eq!(screen.get(2, 0).rune, 'f');
    }

    #[test]
    fn set_string_clips_wide_rune_straddling_left_edge() {
        let mut screen = Screen::new(10, 5);
        // '世' occupies columns -1..1; it straddles the edge and is dropped.
        let n = screen.set_string(-1, 0, "世x", Style::DEFAULT);
        assert_eq!(n, 1);
        assert!(screen.get(0, 0).is_empty());
        assert_eq!(screen.get(1, 0).rune, 'x');
    }

    #[test]
    fn set_string_out_of_range_row_writes_nothing() {
        let mut screen = Screen::new(10, 5);
        assert_eq!(screen.set_string(0, 5, "hi", Style::DEFAULT), 0);
    }

    #[test]
    fn set_string_advances_by_wide_widths() {
        let mut screen = Screen::new(10, 5);
        let n = screen.set_string(0, 0, "日本", Style::DEFAULT);
        assert_eq!(n, 4);
        assert_eq!(screen.get(0, 0).rune, '日');
        assert_eq!(screen.get(2, 0).rune, '本');
    }

    #[test]
    fn fill_rect_is_clipped() {
        let mut screen = Screen::new(10, 5);
        screen.fill_rect(8, 3, 5, 5, '#', Style::DEFAULT);
        assert_eq!(screen.get(8, 3).rune, '#');
        assert_eq!(screen.get(9, 4).rune, '#');
        assert!(screen.get(7, 3).is_empty());
    }

    #[test]
    fn hline_and_vline() {
        let mut screen = Screen::new(10, 10);
        screen.hline(1, 1, 3, '─', Style::DEFAULT);
        screen.vline(1, 2, 3, '│', Style::DEFAULT);
        assert_eq!(screen.get(1, 1).rune, '─');
        assert_eq!(screen.get(3, 1).rune, '─');
        assert_eq!(screen.get(1, 4).rune, '│');
        assert!(screen.get(4, 1).is_empty());
    }

    #[test]
    fn draw_box_outline() {
        let mut screen = Screen::new(10, 10);
        screen.draw_box(1, 1, 4, 3, Style::DEFAULT);
        assert_eq!(screen.get(1, 1).rune, '┌');
        assert_eq!(screen.get(4, 1).rune, '┐');
        assert_eq!(screen.get(1, 3).rune, '└');
        assert_eq!(screen.get(4, 3).rune, '┘');
        assert_eq!(screen.get(2, 1).rune, '─');
        assert_eq!(screen.get(1, 2).rune, '│');
        assert!(screen.get(2, 2).is_empty(), "no interior fill");
    }

    #[test]
    fn degenerate_box_is_skipped() {
        let mut screen = Screen::new(10, 10);
        screen.draw_box(0, 0, 1, 5, Style::DEFAULT);
        screen.draw_box(0, 0, 5, 1, Style::DEFAULT);
        for y in 0..10 {
            for x in 0..10 {
                assert!(screen.get(x, y).is_empty());
            }
        }
    }

    #[test]
    fn clear_resets_current_only() {
        let mut screen = Screen::new(5, 5);
        screen.set(2, 2, 'X', Style::DEFAULT);
        screen.copy_to_previous();
        screen.clear();
        assert!(screen.get(2, 2).is_empty());
        assert_eq!(screen.get_previous(2, 2).rune, 'X');
    }

    #[test]
    fn resize_preserves_top_left_and_resets_previous() {
        let mut screen = Screen::new(5, 5);
        screen.set(1, 1, 'K', Style::DEFAULT);
        screen.set(4, 4, 'Z', Style::DEFAULT);
        screen.copy_to_previous();

        screen.resize(8, 3);
        assert_eq!(screen.size(), (8, 3));
        assert_eq!(screen.get(1, 1).rune, 'K');
        assert!(screen.get(4, 2).is_empty(), "row 4 content gone");
        for y in 0..3 {
            for x in 0..8 {
                assert!(
                    screen.get_previous(x, y).is_empty(),
                    "previous reset forces a full repaint"
                );
            }
        }
    }

    #[test]
    fn resize_to_same_or_zero_is_noop() {
        let mut screen = Screen::new(5, 5);
        screen.set(0, 0, 'A', Style::DEFAULT);
        screen.copy_to_previous();

        screen.resize(5, 5);
        assert_eq!(screen.get_previous(0, 0).rune, 'A', "no-op keeps previous");

        screen.resize(0, 10);
        screen.resize(10, 0);
        assert_eq!(screen.size(), (5, 5));
    }

    #[test]
    fn swap_buffers_is_an_involution() {
        let mut screen = Screen::new(3, 3);
        screen.set(0, 0, 'a', Style::DEFAULT);
        screen.swap_buffers();
        assert!(screen.get(0, 0).is_empty());
        assert_eq!(screen.get_previous(0, 0).rune, 'a');
        screen.swap_buffers();
        assert_eq!(screen.get(0, 0).rune, 'a');
        assert!(screen.get_previous(0, 0).is_empty());
    }

    #[test]
    fn blit_copies_window_clipped() {
        let mut src = Screen::new(5, 5);
        src.set(0, 0, 'A', Style::DEFAULT);
        src.set(4, 4, 'B', Style::DEFAULT);

        let mut dst = Screen::new(5, 5);
        dst.blit(&src, 0, 0, 3, 3, 5, 5);
        assert_eq!(dst.get(3, 3).rune, 'A');
        // (4,4) in src would land at (7,7): clipped away.
        assert!(dst.get(4, 4).is_empty());
    }

    #[test]
    fn blit_preserves_wide_pairs() {
        let mut src = Screen::new(6, 2);
        src.set(0, 0, '世', Style::DEFAULT);

        let mut dst = Screen::new(6, 2);
        dst.blit(&src, 0, 0, 2, 0, 4, 1);
        assert_eq!(dst.get(2, 0).rune, '世');
        assert!(dst.get(3, 0).is_continuation());
    }

    #[test]
    fn cursor_state() {
        let mut screen = Screen::new(10, 10);
        assert_eq!(screen.cursor(), (0, 0));
        assert!(screen.cursor_visible());
        screen.set_cursor(7, 3);
        screen.set_cursor_visible(false);
        assert_eq!(screen.cursor(), (7, 3));
        assert!(!screen.cursor_visible());
    }

    #[test]
    fn sub_screen_translates_and_clips() {
        let mut screen = Screen::new(10, 10);
        {
            let mut view = screen.sub(2, 3, 4, 4);
            assert_eq!(view.size(), (4, 4));
            view.set(0, 0, 'V', Style::DEFAULT);
            view.set(5, 0, 'W', Style::DEFAULT); // outside the view
        }
        assert_eq!(screen.get(2, 3).rune, 'V');
        for y in 0..10 {
            for x in 0..10 {
                if (x, y) != (2, 3) {
                    assert!(screen.get(x, y).is_empty(), "stray write at ({x},{y})");
                }
            }
        }
    }

    #[test]
    fn sub_screen_set_string_clips_to_view() {
        let mut screen = Screen::new(10, 10);
        {
            let mut view = screen.sub(2, 0, 4, 2);
            let n = view.set_string(0, 0, "abcdef", Style::DEFAULT);
            assert_eq!(n, 4);
        }
        assert_eq!(screen.get(2, 0).rune, 'a');
        assert_eq!(screen.get(5, 0).rune, 'd');
        assert!(screen.get(6, 0).is_empty());
    }

    #[test]
    fn sub_screen_negative_x_hides_prefix_at_view_edge() {
        let mut screen = Screen::new(10, 10);
        {
            let mut view = screen.sub(3, 0, 5, 1);
            let n = view.set_string(-2, 0, "abcdef", Style::DEFAULT);
            assert_eq!(n, 4);
        }
        assert!(screen.get(2, 0).is_empty(), "nothing left of the view");
        assert_eq!(screen.get(3, 0).rune, 'c');
        assert_eq!(screen.get(6, 0).rune, 'f');
    }

    #[test]
    fn sub_screen_clear_only_touches_view() {
        let mut screen = Screen::new(6, 6);
        screen.fill_rect(0, 0, 6, 6, '#', Style::DEFAULT);
        {
            let mut view = screen.sub(1, 1, 2, 2);
            view.clear();
        }
        assert!(screen.get(1, 1).is_empty());
        assert!(screen.get(2, 2).is_empty());
        assert_eq!(screen.get(0, 0).rune, '#');
        assert_eq!(screen.get(3, 3).rune, '#');
    }

    #[test]
    fn sub_region_is_clipped_to_screen() {
        let mut screen = Screen::new(10, 10);
        let view = screen.sub(8, 8, 10, 10);
        assert_eq!(view.size(), (2, 2));
    }
}
