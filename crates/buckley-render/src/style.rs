#![forbid(unsafe_code)]

//! Style values: a foreground, a background, and attribute flags.

use crate::color::Color;

bitflags::bitflags! {
    /// Cell attribute flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AttrFlags: u8 {
        /// Bold / increased intensity (SGR 1).
        const BOLD          = 0b0000_0001;
        /// Dim / decreased intensity (SGR 2).
        const DIM           = 0b0000_0010;
        /// Italic text (SGR 3).
        const ITALIC        = 0b0000_0100;
        /// Underlined text (SGR 4).
        const UNDERLINE     = 0b0000_1000;
        /// Blinking text (SGR 5).
        const BLINK         = 0b0001_0000;
        /// Reverse video (SGR 7).
        const REVERSE       = 0b0010_0000;
        /// Strikethrough text (SGR 9).
        const STRIKETHROUGH = 0b0100_0000;
    }
}

/// A complete cell style.
///
/// Styles are plain values: the `with_*` builders return modified copies and
/// two styles are equal iff every field matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Style {
    /// Foreground color.
    pub fg: Color,
    /// Background color.
    pub bg: Color,
    /// Attribute flags.
    pub attrs: AttrFlags,
}

impl Style {
    /// Terminal default colors, no attributes.
    pub const DEFAULT: Self = Self {
        fg: Color::Default,
        bg: Color::Default,
        attrs: AttrFlags::empty(),
    };

    /// Create a style from a foreground and background with no attributes.
    #[inline]
    pub const fn new(fg: Color, bg: Color) -> Self {
        Self {
            fg,
            bg,
            attrs: AttrFlags::empty(),
        }
    }

    /// Return a copy with a different foreground.
    #[inline]
    pub const fn with_fg(mut self, fg: Color) -> Self {
        self.fg = fg;
        self
    }

    /// Return a copy with a different background.
    #[inline]
    pub const fn with_bg(mut self, bg: Color) -> Self {
        self.bg = bg;
        self
    }

    /// Return a copy with the given attribute set.
    #[inline]
    pub fn with_attrs(mut self, attrs: AttrFlags) -> Self {
        self.attrs = attrs;
        self
    }

    /// Return a copy with one attribute toggled on or off.
    #[inline]
    pub fn with_attr(mut self, attr: AttrFlags, on: bool) -> Self {
        self.attrs.set(attr, on);
        self
    }

    /// Return a bold copy.
    #[inline]
    pub fn bold(self) -> Self {
        self.with_attr(AttrFlags::BOLD, true)
    }

    /// Return an italic copy.
    #[inline]
    pub fn italic(self) -> Self {
        self.with_attr(AttrFlags::ITALIC, true)
    }

    /// Return an underlined copy.
    #[inline]
    pub fn underline(self) -> Self {
        self.with_attr(AttrFlags::UNDERLINE, true)
    }

    /// Return a reverse-video copy.
    #[inline]
    pub fn reverse(self) -> Self {
        self.with_attr(AttrFlags::REVERSE, true)
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::DEFAULT
    }
}
