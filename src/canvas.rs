//! The cell grid everything draws into.
//!
//! A [`Canvas`] is a flat row-major `Vec<Cell>` indexed by `y * width + x`.
//! All drawing operations take an optional clip rectangle and silently drop
//! writes outside it (or outside the canvas); callers never need to
//! pre-clamp coordinates.
//!
//! Double-width glyphs occupy two cells: the leading cell carries the
//! codepoint, the trailing cell is a [`Cell::CONTINUATION`] marker with the
//! same colors so diffing and cursor math stay per-cell.

use unicode_segmentation::UnicodeSegmentation;

use crate::geometry::{Rect, Size};
use crate::text::display_width;
use crate::types::{Attr, BorderStyle, Cell, Rgba};

/// A grid of terminal cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Canvas {
    /// Create a canvas filled with default cells.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    /// Create a canvas pre-filled with a background color.
    pub fn with_background(width: u16, height: u16, bg: Rgba) -> Self {
        let mut canvas = Self::new(width, height);
        canvas.clear_with(bg);
        canvas
    }

    // =========================================================================
    // Access
    // =========================================================================

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// The whole canvas as a rectangle at the origin.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    pub fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            self.cells.get(idx)
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            self.cells.get_mut(idx)
        } else {
            None
        }
    }

    /// All cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    // =========================================================================
    // Whole-canvas operations
    // =========================================================================

    /// Reset every cell to the default (space on terminal-default colors).
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Reset every cell to a space on `bg`.
    pub fn clear_with(&mut self, bg: Rgba) {
        self.cells.fill(Cell {
            bg,
            ..Cell::default()
        });
    }

    /// Resize the grid. Contents are not preserved; the new canvas is
    /// cleared.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells
            .resize(width as usize * height as usize, Cell::default());
    }

    // =========================================================================
    // Drawing
    // =========================================================================

    /// Set a single cell, blending `bg` over whatever is already there.
    ///
    /// Returns false when the write was clipped or out of bounds.
    pub fn set_cell(
        &mut self,
        x: u16,
        y: u16,
        ch: char,
        fg: Rgba,
        bg: Rgba,
        attrs: Attr,
        clip: Option<&Rect>,
    ) -> bool {
        if let Some(clip) = clip {
            if !clip.contains(x, y) {
                return false;
            }
        }
        if !self.in_bounds(x, y) {
            return false;
        }

        let idx = self.index(x, y);
        let under = self.cells[idx].bg;
        self.cells[idx] = Cell {
            ch: ch as u32,
            fg,
            bg: Rgba::blend(bg, under),
            attrs,
        };
        true
    }

    /// Fill a rectangle with a glyph.
    pub fn fill(&mut self, rect: Rect, ch: char, fg: Rgba, bg: Rgba, clip: Option<&Rect>) {
        let Some(area) = self.visible(rect, clip) else {
            return;
        };

        if bg.is_opaque() || bg.is_terminal_default() || bg.is_ansi() {
            // no blending needed, assign directly
            let cell = Cell {
                ch: ch as u32,
                fg,
                bg,
                attrs: Attr::NONE,
            };
            for y in area.y..area.bottom() {
                let row = self.index(area.x, y);
                self.cells[row..row + area.width as usize].fill(cell);
            }
        } else {
            for y in area.y..area.bottom() {
                for x in area.x..area.right() {
                    self.set_cell(x, y, ch, fg, bg, Attr::NONE, None);
                }
            }
        }
    }

    /// Recolor the background of a rectangle, leaving glyphs, foregrounds
    /// and attributes alone.
    pub fn style_background(&mut self, rect: Rect, bg: Rgba, clip: Option<&Rect>) {
        let Some(area) = self.visible(rect, clip) else {
            return;
        };
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                let idx = self.index(x, y);
                let cell = &mut self.cells[idx];
                cell.bg = Rgba::blend(bg, cell.bg);
            }
        }
    }

    /// Place a string starting at `(x, y)`. Double-width glyphs write a
    /// continuation marker into their second column.
    ///
    /// Returns the number of columns advanced.
    #[allow(clippy::too_many_arguments)]
    pub fn place_str(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        fg: Rgba,
        bg: Rgba,
        attrs: Attr,
        clip: Option<&Rect>,
    ) -> u16 {
        let mut cx = x;
        for g in text.graphemes(true) {
            let w = display_width(g);
            if w == 0 {
                continue;
            }
            if cx >= self.width {
                break;
            }
            let ch = g.chars().next().unwrap_or(' ');
            self.set_cell(cx, y, ch, fg, bg, attrs, clip);
            if w == 2 {
                self.set_cell(cx + 1, y, '\0', fg, bg, attrs, clip);
            }
            cx = cx.saturating_add(w);
        }
        cx - x
    }

    /// Draw a border along the edge of `rect`. Rectangles smaller than 2x2
    /// have no interior to frame and are skipped.
    pub fn place_rect(&mut self, rect: Rect, style: BorderStyle, color: Rgba, clip: Option<&Rect>) {
        if rect.width < 2 || rect.height < 2 {
            return;
        }
        let (h, v, tl, tr, br, bl) = style.chars();
        let glyph = |s: &str| s.chars().next().unwrap_or(' ');
        let (x2, y2) = (rect.right() - 1, rect.bottom() - 1);
        let bg = Rgba::TRANSPARENT;

        self.set_cell(rect.x, rect.y, glyph(tl), color, bg, Attr::NONE, clip);
        self.set_cell(x2, rect.y, glyph(tr), color, bg, Attr::NONE, clip);
        self.set_cell(rect.x, y2, glyph(bl), color, bg, Attr::NONE, clip);
        self.set_cell(x2, y2, glyph(br), color, bg, Attr::NONE, clip);

        for x in rect.x + 1..x2 {
            self.set_cell(x, rect.y, glyph(h), color, bg, Attr::NONE, clip);
            self.set_cell(x, y2, glyph(h), color, bg, Attr::NONE, clip);
        }
        for y in rect.y + 1..y2 {
            self.set_cell(rect.x, y, glyph(v), color, bg, Attr::NONE, clip);
            self.set_cell(x2, y, glyph(v), color, bg, Attr::NONE, clip);
        }
    }

    /// The part of `rect` that survives clipping and the canvas edge.
    fn visible(&self, rect: Rect, clip: Option<&Rect>) -> Option<Rect> {
        let area = match clip {
            Some(clip) => rect.intersect(clip)?,
            None => rect,
        };
        area.intersect(&self.bounds())
    }
}

// =============================================================================
// Tests
// =============================================================================
