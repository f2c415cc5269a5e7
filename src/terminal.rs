//! Terminal session and input events.
//!
//! [`Terminal`] is an RAII session over the interactive terminal: constructing
//! one enables raw mode, switches to the alternate screen, and hides the
//! cursor. [`Terminal::restore`] (also run on drop, so a panic unwinding
//! through the session still leaves the shell usable) undoes every change,
//! including mouse capture if it was enabled.
//!
//! Input arrives through [`poll_event`] / [`read_event`], which convert
//! crossterm's raw events into the crate's own [`InputEvent`] so callers never
//! touch crossterm types directly.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use weft_tui::terminal::{poll_event, InputEvent, Key, Terminal};
//!
//! let mut term = Terminal::new()?;
//! loop {
//!     match poll_event(Duration::from_millis(16))? {
//!         Some(InputEvent::Key(key)) if key.key == Key::Char('q') => break,
//!         Some(InputEvent::Resize(w, h)) => { /* relayout */ }
//!         _ => {}
//!     }
//! }
//! term.restore()?;
//! ```

use std::io;
use std::time::Duration;

use crossterm::event::{
    poll, read, Event as CrosstermEvent, KeyCode, KeyEvent as CrosstermKeyEvent, KeyEventKind,
    KeyModifiers, MouseButton as CrosstermMouseButton, MouseEvent as CrosstermMouseEvent,
    MouseEventKind,
};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, size as terminal_size};

use crate::geometry::Size;
use crate::render::ansi;
use crate::render::OutputBuffer;

// =============================================================================
// INPUT EVENTS
// =============================================================================

/// Unified event type delivered by [`poll_event`] and [`read_event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A key press or repeat.
    Key(KeyEvent),
    /// A mouse click, drag, movement, or scroll.
    Mouse(MouseEvent),
    /// The viewport changed to the given width and height in cells.
    Resize(u16, u16),
    /// An event this crate does not surface (focus, paste, key release).
    None,
}

/// A decoded keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

/// Keys reported by [`read_event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Tab,
    Backspace,
    Delete,
    Esc,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    F(u8),
}

/// Modifier keys held during an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

/// A decoded mouse event with zero-based cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    pub action: MouseAction,
    pub button: MouseButton,
    pub x: u16,
    pub y: u16,
    pub modifiers: Modifiers,
}

/// What the mouse did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseAction {
    Down,
    Up,
    Drag,
    Move,
    ScrollUp,
    ScrollDown,
    ScrollLeft,
    ScrollRight,
}

/// Which button was involved, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    None,
}

// =============================================================================
// EVENT CONVERSION
// =============================================================================

/// Convert a crossterm mouse event into a [`MouseEvent`].
pub fn convert_mouse_event(event: CrosstermMouseEvent) -> MouseEvent {
    let (action, button) = match event.kind {
        MouseEventKind::Down(btn) => (MouseAction::Down, convert_mouse_button(btn)),
        MouseEventKind::Up(btn) => (MouseAction::Up, convert_mouse_button(btn)),
        MouseEventKind::Drag(btn) => (MouseAction::Drag, convert_mouse_button(btn)),
        MouseEventKind::Moved => (MouseAction::Move, MouseButton::None),
        MouseEventKind::ScrollUp => (MouseAction::ScrollUp, MouseButton::None),
        MouseEventKind::ScrollDown => (MouseAction::ScrollDown, MouseButton::None),
        MouseEventKind::ScrollLeft => (MouseAction::ScrollLeft, MouseButton::None),
        MouseEventKind::ScrollRight => (MouseAction::ScrollRight, MouseButton::None),
    };

    MouseEvent {
        action,
        button,
        x: event.column,
        y: event.row,
        modifiers: convert_modifiers(event.modifiers),
    }
}

fn convert_mouse_button(btn: CrosstermMouseButton) -> MouseButton {
    match btn {
        CrosstermMouseButton::Left => MouseButton::Left,
        CrosstermMouseButton::Right => MouseButton::Right,
        CrosstermMouseButton::Middle => MouseButton::Middle,
    }
}

/// Convert a crossterm key event into a [`KeyEvent`].
///
/// Returns `None` for keys this crate does not surface (media keys, lock
/// keys, bare modifiers).
pub fn convert_key_event(event: CrosstermKeyEvent) -> Option<KeyEvent> {
    let key = match event.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Esc => Key::Esc,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Insert => Key::Insert,
        KeyCode::F(n) => Key::F(n),
        _ => return None,
    };

    Some(KeyEvent {
        key,
        modifiers: convert_modifiers(event.modifiers),
    })
}

fn convert_modifiers(mods: KeyModifiers) -> Modifiers {
    Modifiers {
        ctrl: mods.contains(KeyModifiers::CONTROL),
        alt: mods.contains(KeyModifiers::ALT),
        shift: mods.contains(KeyModifiers::SHIFT),
    }
}

// =============================================================================
// EVENT POLLING
// =============================================================================

/// Poll for an event, waiting at most `timeout`.
///
/// Returns `Ok(None)` when no event arrived within the timeout.
pub fn poll_event(timeout: Duration) -> io::Result<Option<InputEvent>> {
    if poll(timeout)? {
        Ok(Some(read_event()?))
    } else {
        Ok(None)
    }
}

/// Read the next event, blocking until one arrives.
pub fn read_event() -> io::Result<InputEvent> {
    match read()? {
        CrosstermEvent::Key(key) if key.kind != KeyEventKind::Release => {
            Ok(convert_key_event(key).map_or(InputEvent::None, InputEvent::Key))
        }
        CrosstermEvent::Mouse(mouse) => Ok(InputEvent::Mouse(convert_mouse_event(mouse))),
        CrosstermEvent::Resize(width, height) => Ok(InputEvent::Resize(width, height)),
        _ => Ok(InputEvent::None),
    }
}

// =============================================================================
// TERMINAL SESSION
// =============================================================================

/// RAII session over the interactive terminal.
///
/// Construction enables raw mode, enters the alternate screen, and hides the
/// cursor; [`restore`](Terminal::restore) reverses all of it. Restore runs at
/// most once even when called explicitly and again from `Drop`.
pub struct Terminal {
    output: OutputBuffer,
    mouse_enabled: bool,
    restored: bool,
}

impl Terminal {
    /// Enter raw mode and the alternate screen.
    pub fn new() -> io::Result<Self> {
        enable_raw_mode()?;

        let mut output = OutputBuffer::new();
        ansi::enter_alt_screen(&mut output)?;
        ansi::cursor_hide(&mut output)?;
        ansi::clear_screen(&mut output)?;
        output.flush_stdout()?;

        Ok(Self {
            output,
            mouse_enabled: false,
            restored: false,
        })
    }

    /// Current viewport size in cells.
    pub fn size(&self) -> io::Result<Size> {
        let (width, height) = terminal_size()?;
        Ok(Size::new(width, height))
    }

    /// Start reporting mouse events through [`poll_event`].
    pub fn enable_mouse(&mut self) -> io::Result<()> {
        ansi::enable_mouse(&mut self.output)?;
        self.output.flush_stdout()?;
        self.mouse_enabled = true;
        Ok(())
    }

    /// Stop reporting mouse events.
    pub fn disable_mouse(&mut self) -> io::Result<()> {
        ansi::disable_mouse(&mut self.output)?;
        self.output.flush_stdout()?;
        self.mouse_enabled = false;
        Ok(())
    }

    /// Restore the terminal to its pre-session state.
    ///
    /// Later calls are no-ops.
    pub fn restore(&mut self) -> io::Result<()> {
        if self.restored {
            return Ok(());
        }

        if self.mouse_enabled {
            ansi::disable_mouse(&mut self.output)?;
            self.mouse_enabled = false;
        }
        ansi::reset(&mut self.output)?;
        ansi::cursor_show(&mut self.output)?;
        ansi::exit_alt_screen(&mut self.output)?;
        self.output.flush_stdout()?;

        disable_raw_mode()?;
        self.restored = true;
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_mouse_down() {
        let event = convert_mouse_event(CrosstermMouseEvent {
            kind: MouseEventKind::Down(CrosstermMouseButton::Left),
            column: 10,
            row: 5,
            modifiers: KeyModifiers::empty(),
        });

        assert_eq!(event.action, MouseAction::Down);
        assert_eq!(event.button, MouseButton::Left);
        assert_eq!(event.x, 10);
        assert_eq!(event.y, 5);
        assert!(!event.modifiers.ctrl);
    }

    #[test]
    fn test_convert_mouse_scroll() {
        let event = convert_mouse_event(CrosstermMouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 3,
            row: 7,
            modifiers: KeyModifiers::empty(),
        });

        assert_eq!(event.action, MouseAction::ScrollDown);
        assert_eq!(event.button, MouseButton::None);
        assert_eq!((event.x, event.y), (3, 7));
    }

    #[test]
    fn test_convert_key_with_modifiers() {
        let event =
            convert_key_event(CrosstermKeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
                .unwrap();

        assert_eq!(event.key, Key::Char('c'));
        assert!(event.modifiers.ctrl);
        assert!(!event.modifiers.alt);
        assert!(!event.modifiers.shift);
    }

    #[test]
    fn test_convert_named_keys() {
        let esc = convert_key_event(CrosstermKeyEvent::new(KeyCode::Esc, KeyModifiers::empty()));
        assert_eq!(esc.unwrap().key, Key::Esc);

        let f5 = convert_key_event(CrosstermKeyEvent::new(KeyCode::F(5), KeyModifiers::empty()));
        assert_eq!(f5.unwrap().key, Key::F(5));
    }

    #[test]
    fn test_unmapped_key_is_dropped() {
        let event =
            convert_key_event(CrosstermKeyEvent::new(KeyCode::CapsLock, KeyModifiers::empty()));
        assert!(event.is_none());
    }
}
