//! Frame presentation by cell diffing.
//!
//! [`DiffPresenter`] keeps the previously presented [`Canvas`] and writes
//! only the cells that differ from it, bracketed in synchronized output and
//! flushed as a single write. A size change (or an explicit
//! [`DiffPresenter::invalidate`]) discards the baseline, so the next frame
//! goes out in full.
//!
//! # Per frame
//!
//! 1. Open a synchronized-output bracket.
//! 2. Walk the canvas row-major; emit cells that changed since the
//!    baseline through the stateful renderer.
//! 3. Close the bracket, flush once, adopt the frame as the new baseline.

use std::io::{self, Write};

use tracing::debug;

use crate::canvas::Canvas;

use super::ansi;
use super::output::{OutputBuffer, StatefulCellRenderer};

pub struct DiffPresenter {
    output: OutputBuffer,
    cells: StatefulCellRenderer,
    previous: Option<Canvas>,
}

impl DiffPresenter {
    pub fn new() -> Self {
        Self {
            output: OutputBuffer::new(),
            cells: StatefulCellRenderer::new(),
            previous: None,
        }
    }

    /// Present a frame to stdout, writing only what changed since the last
    /// one. Returns whether anything was written.
    pub fn present(&mut self, canvas: &Canvas) -> io::Result<bool> {
        let dirty = self.encode_frame(canvas, false)?;
        self.output.flush_stdout()?;
        self.previous = Some(canvas.clone());
        Ok(dirty)
    }

    /// Present a frame unconditionally, ignoring the baseline.
    ///
    /// Use after a resize or when the screen may be corrupted.
    pub fn present_full(&mut self, canvas: &Canvas) -> io::Result<()> {
        self.encode_frame(canvas, true)?;
        self.output.flush_stdout()?;
        self.previous = Some(canvas.clone());
        Ok(())
    }

    /// [`DiffPresenter::present`] into an arbitrary writer instead of
    /// stdout.
    pub fn present_to<W: Write>(&mut self, canvas: &Canvas, writer: &mut W) -> io::Result<bool> {
        let dirty = self.encode_frame(canvas, false)?;
        self.output.flush_to(writer)?;
        self.previous = Some(canvas.clone());
        Ok(dirty)
    }

    /// Encode one frame into the output buffer. `full` bypasses the diff.
    fn encode_frame(&mut self, canvas: &Canvas, full: bool) -> io::Result<bool> {
        let mut dirty = false;

        ansi::begin_sync(&mut self.output)?;
        if full {
            ansi::cursor_to(&mut self.output, 0, 0)?;
        }
        self.cells.reset();

        let baseline = self.previous.as_ref().filter(|prev| {
            !full && prev.width() == canvas.width() && prev.height() == canvas.height()
        });

        for y in 0..canvas.height() {
            for x in 0..canvas.width() {
                let Some(cell) = canvas.get(x, y) else {
                    continue;
                };
                let unchanged = baseline.and_then(|prev| prev.get(x, y)) == Some(cell);
                if !unchanged {
                    dirty = true;
                    self.cells.render_cell(&mut self.output, x, y, cell);
                }
            }
        }

        ansi::end_sync(&mut self.output)?;
        debug!(full, dirty, bytes = self.output.len(), "frame encoded");
        Ok(dirty)
    }

    /// Drop the baseline; the next [`DiffPresenter::present`] writes every
    /// cell.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    /// Erase the screen and drop the baseline in one step.
    pub fn clear(&mut self) -> io::Result<()> {
        ansi::erase_screen(&mut self.output)?;
        self.output.flush_stdout()?;
        self.invalidate();
        Ok(())
    }
}

impl Default for DiffPresenter {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
