//! Output batching and redundant-escape elimination.
//!
//! Terminal writes are expensive per call, not per byte: a frame should be
//! one `write(2)`, and the bytes in it should not repeat state the terminal
//! already holds. [`OutputBuffer`] handles the first half, accumulating a
//! whole frame before flushing; [`StatefulCellRenderer`] handles the second,
//! tracking cursor position, colors, and attributes so that runs of
//! same-styled cells cost one escape sequence and their glyphs.

use std::io::{self, Write};

use crate::types::{Attr, Cell, Rgba};

use super::ansi;

// =============================================================================
// OutputBuffer
// =============================================================================

/// Accumulates frame bytes for a single flush.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    data: Vec<u8>,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::with_capacity(16 * 1024)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Drop the contents, keeping the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    #[inline]
    pub fn write_str(&mut self, s: &str) {
        self.data.extend_from_slice(s.as_bytes());
    }

    #[inline]
    pub fn write_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.data
            .extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
    }

    /// Write a raw codepoint; invalid scalar values are dropped.
    #[inline]
    pub fn write_codepoint(&mut self, cp: u32) {
        if let Some(c) = char::from_u32(cp) {
            self.write_char(c);
        }
    }

    /// Write everything to stdout in one locked call and empty the buffer.
    pub fn flush_stdout(&mut self) -> io::Result<()> {
        if self.data.is_empty() {
            return Ok(());
        }
        let mut stdout = io::stdout().lock();
        stdout.write_all(&self.data)?;
        stdout.flush()?;
        self.data.clear();
        Ok(())
    }

    /// Write everything to an arbitrary writer and empty the buffer.
    pub fn flush_to<W: Write>(&mut self, writer: &mut W) -> io::Result<()> {
        if self.data.is_empty() {
            return Ok(());
        }
        writer.write_all(&self.data)?;
        self.data.clear();
        Ok(())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }
}

impl Write for OutputBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        // buffering only; the real flush is flush_stdout/flush_to
        Ok(())
    }
}

// =============================================================================
// StatefulCellRenderer
// =============================================================================

/// Emits cells while mirroring what the terminal currently shows, so only
/// state that actually changed produces escape codes.
///
/// Tracked: cursor position (sequential cells skip the move), foreground,
/// background, and the attribute set. An attribute change resets everything
/// and re-emits, since SGR attributes cannot be cleared individually in a
/// portable way.
#[derive(Debug)]
pub struct StatefulCellRenderer {
    last_x: i32,
    last_y: i32,
    last_fg: Option<Rgba>,
    last_bg: Option<Rgba>,
    last_attrs: Attr,
}

impl StatefulCellRenderer {
    pub fn new() -> Self {
        Self {
            last_x: -1,
            last_y: -1,
            last_fg: None,
            last_bg: None,
            last_attrs: Attr::NONE,
        }
    }

    /// Forget everything; the next cell emits position and style in full.
    /// Call at the start of every frame.
    pub fn reset(&mut self) {
        self.last_x = -1;
        self.last_y = -1;
        self.last_fg = None;
        self.last_bg = None;
        self.last_attrs = Attr::NONE;
    }

    /// Append one cell at `(x, y)` to `output`, emitting only the state
    /// transitions the terminal needs.
    pub fn render_cell(&mut self, output: &mut OutputBuffer, x: u16, y: u16, cell: &Cell) {
        // the wide glyph before it already painted this column
        if cell.is_continuation() {
            self.last_x = i32::from(x);
            self.last_y = i32::from(y);
            return;
        }

        if i32::from(y) != self.last_y || i32::from(x) != self.last_x + 1 {
            ansi::cursor_to(output, x, y).ok();
        }

        if cell.attrs != self.last_attrs {
            ansi::reset(output).ok();
            if !cell.attrs.is_empty() {
                ansi::attrs(output, cell.attrs).ok();
            }
            // reset cleared the colors too
            self.last_fg = None;
            self.last_bg = None;
            self.last_attrs = cell.attrs;
        }

        if self.last_fg != Some(cell.fg) {
            ansi::fg(output, cell.fg).ok();
            self.last_fg = Some(cell.fg);
        }
        if self.last_bg != Some(cell.bg) {
            ansi::bg(output, cell.bg).ok();
            self.last_bg = Some(cell.bg);
        }

        output.write_codepoint(cell.ch);

        self.last_x = i32::from(x);
        self.last_y = i32::from(y);
    }
}

impl Default for StatefulCellRenderer {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(ch: char) -> Cell {
        Cell {
            ch: ch as u32,
            fg: Rgba::WHITE,
            bg: Rgba::BLACK,
            attrs: Attr::NONE,
        }
    }

    #[test]
    fn test_buffer_accumulates_and_clears() {
        let mut buf = OutputBuffer::new();
        buf.write_str("hello");
        buf.write_char(' ');
        buf.write_str("world");
        assert_eq!(buf.as_str().as_ref(), "hello world");
        buf.clear();
        assert!(buf.is_empty());
    }

    #[test]
    fn test_buffer_flush_to_writer() {
        let mut buf = OutputBuffer::new();
        buf.write_str("frame");
        let mut sink = Vec::new();
        buf.flush_to(&mut sink).unwrap();
        assert_eq!(sink, b"frame");
        assert!(buf.is_empty());
    }

    #[test]
    fn test_sequential_cells_skip_cursor_moves() {
        let mut renderer = StatefulCellRenderer::new();
        let mut output = OutputBuffer::new();

        renderer.render_cell(&mut output, 0, 0, &cell('A'));
        let first = output.len();

        output.clear();
        renderer.render_cell(&mut output, 1, 0, &cell('B'));
        // same style, adjacent column: just the glyph
        assert_eq!(output.as_str().as_ref(), "B");
        assert!(output.len() < first);
    }

    #[test]
    fn test_color_change_emits_only_colors() {
        let mut renderer = StatefulCellRenderer::new();
        let mut output = OutputBuffer::new();

        renderer.render_cell(&mut output, 0, 0, &cell('A'));
        output.clear();

        let mut red = cell('B');
        red.fg = Rgba::RED;
        renderer.render_cell(&mut output, 1, 0, &red);
        assert_eq!(output.as_str().as_ref(), "\x1b[38;2;255;0;0mB");
    }

    #[test]
    fn test_attr_change_resets_and_reapplies() {
        let mut renderer = StatefulCellRenderer::new();
        let mut output = OutputBuffer::new();

        renderer.render_cell(&mut output, 0, 0, &cell('A'));
        output.clear();

        let mut bold = cell('B');
        bold.attrs = Attr::BOLD;
        renderer.render_cell(&mut output, 1, 0, &bold);
        let emitted = output.as_str().into_owned();
        assert!(emitted.starts_with("\x1b[0m\x1b[1m"));
        // the reset dropped the colors, so they come back too
        assert!(emitted.contains("\x1b[38;2;255;255;255m"));
        assert!(emitted.ends_with('B'));
    }

    #[test]
    fn test_continuation_cells_emit_nothing() {
        let mut renderer = StatefulCellRenderer::new();
        let mut output = OutputBuffer::new();

        let cont = Cell {
            ch: Cell::CONTINUATION,
            ..Cell::default()
        };
        renderer.render_cell(&mut output, 0, 0, &cont);
        assert!(output.is_empty());

        // and the tracked position still advances past it
        renderer.render_cell(&mut output, 1, 0, &cell('A'));
        assert!(!output.as_str().contains("\x1b[1;2H"));
    }
}
