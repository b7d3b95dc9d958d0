#![forbid(unsafe_code)]

//! Color model spanning the four terminal color modes.

/// A cell color.
///
/// `None` inherits whatever color is already in effect and encodes to
/// nothing. `Default` selects the terminal's configured default via SGR
/// 39/49. The indexed variants map onto the classic ANSI palette
/// (30-37/90-97 foreground, 40-47/100-107 background) and the xterm
/// 256-color palette (SGR 38;5;n / 48;5;n). `Rgb` is 24-bit truecolor
/// (SGR 38;2;r;g;b / 48;2;r;g;b).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    /// Inherit the surrounding color.
    None,
    /// Terminal default foreground/background.
    #[default]
    Default,
    /// Classic ANSI palette, index 0-15. Indices 8-15 are the bright set.
    Indexed16(u8),
    /// xterm 256-color palette.
    Indexed256(u8),
    /// 24-bit RGB.
    Rgb(u8, u8, u8),
}

impl Color {
    /// Black (index 0).
    pub const BLACK: Self = Self::Indexed16(0);
    /// Red (index 1).
    pub const RED: Self = Self::Indexed16(1);
    /// Green (index 2).
    pub const GREEN: Self = Self::Indexed16(2);
    /// Yellow (index 3).
    pub const YELLOW: Self = Self::Indexed16(3);
    /// Blue (index 4).
    pub const BLUE: Self = Self::Indexed16(4);
    /// Magenta (index 5).
    pub const MAGENTA: Self = Self::Indexed16(5);
    /// Cyan (index 6).
    pub const CYAN: Self = Self::Indexed16(6);
    /// White (index 7).
    pub const WHITE: Self = Self::Indexed16(7);
    /// Bright black (index 8).
    pub const BRIGHT_BLACK: Self = Self::Indexed16(8);
    /// Bright red (index 9).
    pub const BRIGHT_RED: Self = Self::Indexed16(9);
    /// Bright green (index 10).
    pub const BRIGHT_GREEN: Self = Self::Indexed16(10);
    /// Bright yellow (index 11).
    pub const BRIGHT_YELLOW: Self = Self::Indexed16(11);
    /// Bright blue (index 12).
    pub const BRIGHT_BLUE: Self = Self::Indexed16(12);
    /// Bright magenta (index 13).
    pub const BRIGHT_MAGENTA: Self = Self::Indexed16(13);
    /// Bright cyan (index 14).
    pub const BRIGHT_CYAN: Self = Self::Indexed16(14);
    /// Bright white (index 15).
    pub const BRIGHT_WHITE: Self = Self::Indexed16(15);

    /// Check whether this color inherits (encodes to nothing).
    #[inline]
    pub const fn is_none(self) -> bool {
        matches!(self, Self::None)
    }

    /// Check whether this is the terminal default.
    #[inline]
    pub const fn is_default(self) -> bool {
        matches!(self, Self::Default)
    }
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn default_is_terminal_default() {
        assert_eq!(Color::default(), Color::Default);
        assert!(Color::default().is_default());
        assert!(!Color::default().is_none());
    }

    #[test]
    fn named_constants_map_to_indices() {
        assert_eq!(Color::BLACK, Color::Indexed16(0));
        assert_eq!(Color::RED, Color::Indexed16(1));
        assert_eq!(Color::BLUE, Color::Indexed16(4));
        assert_eq!(Color::WHITE, Color::Indexed16(7));
        assert_eq!(Color::BRIGHT_BLACK, Color::Indexed16(8));
        assert_eq!(Color::BRIGHT_WHITE, Color::Indexed16(15));
    }

    #[test]
    fn equality_is_structural() {
        assert_eq!(Color::Rgb(1, 2, 3), Color::Rgb(1, 2, 3));
        assert_ne!(Color::Rgb(1, 2, 3), Color::Rgb(1, 2, 4));
        assert_ne!(Color::Indexed16(1), Color::Indexed256(1));
        assert_ne!(Color::None, Color::Default);
    }
}
