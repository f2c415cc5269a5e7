//! Raw ANSI escape sequences.
//!
//! The presentation layer talks to the terminal exclusively through these
//! writers: cursor addressing, screen modes, colors, attributes, and the
//! synchronized-output brackets that keep partial frames off the screen.
//! Input and raw-mode switching go through `crossterm` instead (see
//! [`crate::terminal`]); this module is output only.

use std::io::Write;

use crate::types::{Attr, Rgba};

/// Escape character.
pub const ESC: &str = "\x1b";

/// Control Sequence Introducer.
pub const CSI: &str = "\x1b[";

/// String Terminator.
pub const ST: &str = "\x1b\\";

// =============================================================================
// Cursor
// =============================================================================

/// Move the cursor to `(x, y)`, zero-indexed from the top-left.
#[inline]
pub fn cursor_to<W: Write>(w: &mut W, x: u16, y: u16) -> std::io::Result<()> {
    write!(w, "\x1b[{};{}H", y + 1, x + 1)
}

#[inline]
pub fn cursor_hide<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[?25l")
}

#[inline]
pub fn cursor_show<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[?25h")
}

// =============================================================================
// Screen
// =============================================================================

/// Clear the visible screen.
#[inline]
pub fn erase_screen<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[2J")
}

/// Clear the screen and the scrollback, and home the cursor.
#[inline]
pub fn clear_screen<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[2J\x1b[3J\x1b[H")
}

/// Switch to the alternate screen buffer.
#[inline]
pub fn enter_alt_screen<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[?1049h")
}

/// Switch back to the main screen buffer.
#[inline]
pub fn exit_alt_screen<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[?1049l")
}

// =============================================================================
// Synchronized output
// =============================================================================

/// Ask the terminal to hold output until [`end_sync`], so a frame lands as
/// one update instead of a visible sweep.
#[inline]
pub fn begin_sync<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[?2026h")
}

#[inline]
pub fn end_sync<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[?2026l")
}

// =============================================================================
// Colors and attributes
// =============================================================================

/// Reset colors and attributes to the terminal defaults.
#[inline]
pub fn reset<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[0m")
}

/// Set the foreground color, picking the shortest encoding the color
/// allows: default reset, ANSI palette, or 24-bit.
#[inline]
pub fn fg<W: Write>(w: &mut W, color: Rgba) -> std::io::Result<()> {
    if color.is_terminal_default() {
        write!(w, "\x1b[39m")
    } else if color.is_ansi() {
        let index = color.ansi_index();
        if index < 8 {
            write!(w, "\x1b[{}m", 30 + index)
        } else if index < 16 {
            write!(w, "\x1b[{}m", 90 + index - 8)
        } else {
            write!(w, "\x1b[38;5;{index}m")
        }
    } else {
        write!(w, "\x1b[38;2;{};{};{}m", color.r, color.g, color.b)
    }
}

/// Set the background color; encodings as in [`fg`].
#[inline]
pub fn bg<W: Write>(w: &mut W, color: Rgba) -> std::io::Result<()> {
    if color.is_terminal_default() {
        write!(w, "\x1b[49m")
    } else if color.is_ansi() {
        let index = color.ansi_index();
        if index < 8 {
            write!(w, "\x1b[{}m", 40 + index)
        } else if index < 16 {
            write!(w, "\x1b[{}m", 100 + index - 8)
        } else {
            write!(w, "\x1b[48;5;{index}m")
        }
    } else {
        write!(w, "\x1b[48;2;{};{};{}m", color.r, color.g, color.b)
    }
}

/// Apply a set of attributes as one SGR sequence. Emits nothing for an
/// empty set; this never resets, callers reset explicitly.
#[allow(unused_assignments)]
pub fn attrs<W: Write>(w: &mut W, attr: Attr) -> std::io::Result<()> {
    if attr.is_empty() {
        return Ok(());
    }

    let mut first = true;
    write!(w, "\x1b[")?;

    macro_rules! emit {
        ($flag:expr, $code:expr) => {
            if attr.contains($flag) {
                if !first {
                    write!(w, ";")?;
                }
                write!(w, "{}", $code)?;
                first = false;
            }
        };
    }

    emit!(Attr::BOLD, 1);
    emit!(Attr::DIM, 2);
    emit!(Attr::ITALIC, 3);
    emit!(Attr::UNDERLINE, 4);
    emit!(Attr::BLINK, 5);
    emit!(Attr::INVERSE, 7);
    emit!(Attr::HIDDEN, 8);
    emit!(Attr::STRIKETHROUGH, 9);

    write!(w, "m")
}

// =============================================================================
// Mouse
// =============================================================================

/// Enable button and motion tracking in SGR extended mode.
#[inline]
pub fn enable_mouse<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[?1000h\x1b[?1002h\x1b[?1006h")
}

/// Disable mouse tracking, unwinding [`enable_mouse`].
#[inline]
pub fn disable_mouse<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[?1006l\x1b[?1002l\x1b[?1000l")
}

// =============================================================================
// Tests
// =============================================================================
