#![forbid(unsafe_code)]

//! ANSI escape sequence generation.
//!
//! Pure byte-appending helpers for xterm-style control sequences. No state
//! is tracked here; the [`Emitter`](crate::emitter::Emitter) layers position
//! and style tracking on top.
//!
//! # Sequence Reference
//!
//! | Category | Sequence | Description |
//! |----------|----------|-------------|
//! | CSI | `ESC [ params m` | SGR (Select Graphic Rendition) |
//! | CSI | `ESC [ row ; col H` | CUP (Cursor Position, 1-indexed) |
//! | CSI | `ESC [ n A/B/C/D` | Relative cursor movement |
//! | CSI | `ESC [ 2 J` | ED (Erase Display) |
//! | CSI | `ESC [ ? 25 h/l` | DECTCEM (cursor visibility) |
//! | CSI | `ESC [ ? 1049 h/l` | Alternate screen buffer |
//!
//! Output is pure 7-bit ASCII apart from the cell runes themselves. The
//! public coordinate convention is 0-indexed; the 1-indexed ANSI forms add
//! one on encode.

use crate::color::Color;
use crate::style::{AttrFlags, Style};

/// SGR reset: `CSI 0 m`.
pub const SGR_RESET: &[u8] = b"\x1b[0m";

/// Clear the entire screen: `CSI 2 J`.
pub const CLEAR_SCREEN: &[u8] = b"\x1b[2J";

/// Move the cursor to the origin: `CSI H`.
pub const CURSOR_HOME: &[u8] = b"\x1b[H";

/// Hide the cursor: `CSI ? 25 l`.
pub const CURSOR_HIDE: &[u8] = b"\x1b[?25l";

/// Show the cursor: `CSI ? 25 h`.
pub const CURSOR_SHOW: &[u8] = b"\x1b[?25h";

/// Enter the alternate screen buffer: `CSI ? 1049 h`.
pub const ALT_SCREEN_ENTER: &[u8] = b"\x1b[?1049h";

/// Leave the alternate screen buffer: `CSI ? 1049 l`.
pub const ALT_SCREEN_LEAVE: &[u8] = b"\x1b[?1049l";

/// Append a decimal number without going through the formatter.
#[inline]
fn push_decimal(out: &mut Vec<u8>, value: u16) {
    let mut buf = [0u8; 5];
    let mut n = value;
    let mut i = buf.len();
    loop {
        i -= 1;
        buf[i] = b'0' + (n % 10) as u8;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    out.extend_from_slice(&buf[i..]);
}

/// CUP (Cursor Position): `CSI row ; col H`.
///
/// Takes 0-indexed (x, y) and encodes the 1-indexed ANSI form.
pub fn cursor_to(out: &mut Vec<u8>, x: u16, y: u16) {
    out.extend_from_slice(b"\x1b[");
    push_decimal(out, y.saturating_add(1));
    out.push(b';');
    push_decimal(out, x.saturating_add(1));
    out.push(b'H');
}

#[inline]
fn cursor_relative(out: &mut Vec<u8>, n: u16, suffix: u8) {
    if n == 0 {
        return;
    }
    out.extend_from_slice(b"\x1b[");
    if n != 1 {
        push_decimal(out, n);
    }
    out.push(suffix);
}

/// Move the cursor up: `CSI n A`. Emits nothing for n = 0.
pub fn cursor_up(out: &mut Vec<u8>, n: u16) {
    cursor_relative(out, n, b'A');
}

/// Move the cursor down: `CSI n B`. Emits nothing for n = 0.
pub fn cursor_down(out: &mut Vec<u8>, n: u16) {
    cursor_relative(out, n, b'B');
}

/// Move the cursor forward (right): `CSI n C`. Emits nothing for n = 0.
pub fn cursor_forward(out: &mut Vec<u8>, n: u16) {
    cursor_relative(out, n, b'C');
}

/// Move the cursor back (left): `CSI n D`. Emits nothing for n = 0.
pub fn cursor_back(out: &mut Vec<u8>, n: u16) {
    cursor_relative(out, n, b'D');
}

#[inline]
fn push_fg(out: &mut Vec<u8>, color: Color) {
    match color {
        Color::None => {}
        Color::Default => out.extend_from_slice(b";39"),
        Color::Indexed16(n) => {
            out.push(b';');
            let code = if n < 8 { 30 + n as u16 } else { 90 + (n as u16 - 8) };
            push_decimal(out, code);
        }
        Color::Indexed256(n) => {
            out.extend_from_slice(b";38;5;");
            push_decimal(out, n as u16);
        }
        Color::Rgb(r, g, b) => {
            out.extend_from_slice(b";38;2;");
            push_decimal(out, r as u16);
            out.push(b';');
            push_decimal(out, g as u16);
            out.push(b';');
            push_decimal(out, b as u16);
        }
    }
}

#[inline]
fn push_bg(out: &mut Vec<u8>, color: Color) {
    match color {
        Color::None => {}
        Color::Default => out.extend_from_slice(b";49"),
        Color::Indexed16(n) => {
            out.push(b';');
            let code = if n < 8 { 40 + n as u16 } else { 100 + (n as u16 - 8) };
            push_decimal(out, code);
        }
        Color::Indexed256(n) => {
            out.extend_from_slice(b";48;5;");
            push_decimal(out, n as u16);
        }
        Color::Rgb(r, g, b) => {
            out.extend_from_slice(b";48;2;");
            push_decimal(out, r as u16);
            out.push(b';');
            push_decimal(out, g as u16);
            out.push(b';');
            push_decimal(out, b as u16);
        }
    }
}

/// SGR codes for each attribute flag, in emission order.
const ATTR_CODES: [(AttrFlags, u16); 7] = [
    (AttrFlags::BOLD, 1),
    (AttrFlags::DIM, 2),
    (AttrFlags::ITALIC, 3),
    (AttrFlags::UNDERLINE, 4),
    (AttrFlags::BLINK, 5),
    (AttrFlags::REVERSE, 7),
    (AttrFlags::STRIKETHROUGH, 9),
];

/// Encode a style as a single SGR sequence.
///
/// Always starts from a reset so the resulting terminal state depends only
/// on `style`, never on what was previously in effect:
/// `CSI 0 {;attrs} {;fg} {;bg} m`. An inherit (`Color::None`) color
/// contributes no segment.
pub fn encode_style(out: &mut Vec<u8>, style: Style) {
    out.extend_from_slice(b"\x1b[0");
    for (flag, code) in ATTR_CODES {
        if style.attrs.contains(flag) {
            out.push(b';');
            push_decimal(out, code);
        }
    }
    push_fg(out, style.fg);
    push_bg(out, style.bg);
    out.push(b'm');
}
