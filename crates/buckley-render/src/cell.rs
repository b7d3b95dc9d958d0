#![forbid(unsafe_code)]

//! Cell types and invariants.
//!
//! The [`Cell`] is the fundamental unit of the terminal grid: one codepoint,
//! its display width, and a style. A double-width codepoint occupies two
//! grid slots: the primary cell carries the codepoint with width 2 and the
//! slot to its right holds a width-0 continuation with codepoint 0.

use crate::rune_width;
use crate::style::Style;

/// A single terminal cell.
///
/// # Invariants
///
/// - `width` is 0, 1, or 2.
/// - A width-2 primary written inside the row is followed by a width-0
///   continuation in the next column (the grid enforces this).
/// - Continuation cells carry codepoint 0 and the primary's style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// The codepoint displayed in this cell. 0 marks a continuation slot.
    pub rune: char,
    /// Display width: 2 for a wide primary, 0 for its continuation, else 1.
    pub width: u8,
    /// Style applied to this cell.
    pub style: Style,
}

impl Cell {
    /// The empty cell: a space in the default style.
    pub const EMPTY: Self = Self {
        rune: ' ',
        width: 1,
        style: Style::DEFAULT,
    };

    /// Create a cell from a codepoint, deriving its display width.
    #[inline]
    pub fn new(rune: char, style: Style) -> Self {
        Self {
            rune,
            width: rune_width(rune),
            style,
        }
    }

    /// The continuation slot of a wide primary, sharing its style.
    #[inline]
    pub const fn continuation(style: Style) -> Self {
        Self {
            rune: '\0',
            width: 0,
            style,
        }
    }

    /// Check if this is the empty cell.
    ///
    /// A cell is empty iff it is a space in the default style with width 1;
    /// composition treats exactly these cells as transparent.
    #[inline]
    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    /// Check if this is the width-0 right half of a wide primary.
    #[inline]
    pub const fn is_continuation(&self) -> bool {
        self.width == 0
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}
