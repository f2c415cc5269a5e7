//! Text measurement and drawing.
//!
//! The [`Typesetter`] answers the three sizing questions the layout pass asks
//! about a piece of text (smallest workable size, unwrapped size, size at a
//! given width) and draws the wrapped result onto a [`Canvas`].
//!
//! Widths are display columns, not bytes or chars: CJK glyphs count as two
//! columns, combining marks as zero. Wrapping prefers word boundaries and
//! falls back to breaking inside a word only when the word alone is wider
//! than the line.
//!
//! This is deliberately dumb typesetting. There is no shaping, no
//! bidirectional reordering and no hyphenation; a terminal grid would swallow
//! all of it anyway.

use std::borrow::Cow;

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::canvas::Canvas;
use crate::geometry::{Rect, Size};
use crate::types::{Attr, HAlign, Rgba, VAlign};

// =============================================================================
// Width helpers
// =============================================================================

/// Display width of a string in terminal columns.
#[inline]
pub fn display_width(s: &str) -> u16 {
    UnicodeWidthStr::width(s).min(u16::MAX as usize) as u16
}

/// Truncate to `max_width` columns, ending in `…` when anything was cut.
///
/// # Examples
///
/// ```
/// use weft_tui::text::truncate;
///
/// assert_eq!(truncate("hello", 10), "hello");
/// assert_eq!(truncate("hello", 4), "hel…");
/// assert_eq!(truncate("hello", 1), "…");
/// ```
pub fn truncate(text: &str, max_width: u16) -> Cow<'_, str> {
    if display_width(text) <= max_width {
        return Cow::Borrowed(text);
    }
    if max_width == 0 {
        return Cow::Borrowed("");
    }

    // reserve one column for the ellipsis
    let budget = max_width - 1;
    let mut out = String::new();
    let mut used = 0u16;
    for g in text.graphemes(true) {
        let w = display_width(g);
        if used + w > budget {
            break;
        }
        out.push_str(g);
        used += w;
    }
    out.push('…');
    Cow::Owned(out)
}

// =============================================================================
// Typesetter
// =============================================================================

/// Measures and draws plain text.
///
/// Stateless apart from configuration, so one instance is shared across all
/// text elements of a tree.
#[derive(Debug, Clone)]
pub struct Typesetter {
    tab_width: u16,
}

impl Typesetter {
    pub fn new() -> Self {
        Self { tab_width: 4 }
    }

    pub fn with_tab_width(tab_width: u16) -> Self {
        Self {
            tab_width: tab_width.max(1),
        }
    }

    // =========================================================================
    // Measurement
    // =========================================================================

    /// The smallest size the text can occupy without losing content: wide
    /// enough for its widest unbreakable word, as tall as the wrap at that
    /// width.
    ///
    /// `max_width` caps the answer (0 means uncapped); words wider than the
    /// cap get broken mid-word.
    pub fn measure_min(&self, text: &str, max_width: u16) -> Size {
        if text.is_empty() {
            return Size::ZERO;
        }
        let cap = if max_width == 0 { u16::MAX } else { max_width };

        let mut widest = 0u16;
        for raw in text.split('\n') {
            let line = self.expand_tabs(raw);
            for word in line.split_word_bounds() {
                if word.chars().all(char::is_whitespace) {
                    continue;
                }
                widest = widest.max(display_width(word));
            }
        }

        let width = widest.min(cap);
        let lines = self.wrap(text, width.max(1));
        Size::new(width, clamp_len(lines.len()))
    }

    /// The size the text wants with no wrapping at all: widest line by line
    /// count.
    pub fn measure_max(&self, text: &str) -> Size {
        if text.is_empty() {
            return Size::ZERO;
        }
        let mut width = 0u16;
        let mut lines = 0usize;
        for raw in text.split('\n') {
            width = width.max(display_width(&self.expand_tabs(raw)));
            lines += 1;
        }
        Size::new(width, clamp_len(lines))
    }

    /// The size the text occupies when wrapped into `bounds.width` columns.
    ///
    /// The height is the full wrapped line count, even past `bounds.height`;
    /// drawing clips, measuring does not.
    pub fn measure_at(&self, text: &str, bounds: Size) -> Size {
        let lines = self.wrap(text, bounds.width);
        let width = lines.iter().map(|l| display_width(l)).max().unwrap_or(0);
        Size::new(width, clamp_len(lines.len()))
    }

    /// Word-wrap into lines of at most `width` columns.
    ///
    /// Explicit newlines are kept, tabs are expanded first, and trailing
    /// whitespace is trimmed from every produced line.
    pub fn wrap(&self, text: &str, width: u16) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }
        let width = width.max(1);
        let mut lines = Vec::new();
        for raw in text.split('\n') {
            self.wrap_line(&self.expand_tabs(raw), width, &mut lines);
        }
        lines
    }

    fn wrap_line(&self, line: &str, width: u16, lines: &mut Vec<String>) {
        let start = lines.len();
        let mut current = String::new();
        let mut current_w = 0u16;

        for word in line.split_word_bounds() {
            let ww = display_width(word);
            if current_w.saturating_add(ww) <= width {
                current.push_str(word);
                current_w += ww;
                continue;
            }

            if word.chars().all(char::is_whitespace) {
                // the break swallows the separator
                push_trimmed(lines, &mut current);
                current_w = 0;
            } else if ww <= width {
                push_trimmed(lines, &mut current);
                current.push_str(word);
                current_w = ww;
            } else {
                // word wider than the line: break inside it
                for g in word.graphemes(true) {
                    let gw = display_width(g);
                    if current_w.saturating_add(gw) > width && current_w > 0 {
                        push_trimmed(lines, &mut current);
                        current_w = 0;
                    }
                    current.push_str(g);
                    current_w = current_w.saturating_add(gw);
                }
            }
        }

        // trailing content, or the line itself when it produced nothing
        if !current.is_empty() || lines.len() == start {
            push_trimmed(lines, &mut current);
        }
    }

    fn expand_tabs<'a>(&self, line: &'a str) -> Cow<'a, str> {
        if !line.contains('\t') {
            return Cow::Borrowed(line);
        }
        let mut out = String::with_capacity(line.len());
        let mut col = 0u16;
        for g in line.graphemes(true) {
            if g == "\t" {
                let stop = ((col / self.tab_width) + 1).saturating_mul(self.tab_width);
                while col < stop {
                    out.push(' ');
                    col += 1;
                }
            } else {
                out.push_str(g);
                col = col.saturating_add(display_width(g));
            }
        }
        Cow::Owned(out)
    }

    // =========================================================================
    // Drawing
    // =========================================================================

    /// Wrap `text` into `bounds` and draw it, aligned on both axes. Lines
    /// past the bottom of `bounds` are dropped.
    #[allow(clippy::too_many_arguments)]
    pub fn draw(
        &self,
        canvas: &mut Canvas,
        text: &str,
        bounds: Rect,
        fg: Rgba,
        attrs: Attr,
        halign: HAlign,
        valign: VAlign,
        clip: Option<&Rect>,
    ) {
        if bounds.is_empty() {
            return;
        }
        let lines = self.wrap(text, bounds.width);
        let shown = lines.len().min(bounds.height as usize) as u16;

        let y0 = bounds.y
            + match valign {
                VAlign::Top => 0,
                VAlign::Middle => (bounds.height - shown) / 2,
                VAlign::Bottom => bounds.height - shown,
            };

        for (i, line) in lines.iter().take(shown as usize).enumerate() {
            let lw = display_width(line);
            let x = bounds.x
                + match halign {
                    HAlign::Left => 0,
                    HAlign::Center => bounds.width.saturating_sub(lw) / 2,
                    HAlign::Right => bounds.width.saturating_sub(lw),
                };
            canvas.place_str(x, y0 + i as u16, line, fg, Rgba::TRANSPARENT, attrs, clip);
        }
    }
}

impl Default for Typesetter {
    fn default() -> Self {
        Self::new()
    }
}

fn push_trimmed(lines: &mut Vec<String>, current: &mut String) {
    let trimmed = current.trim_end();
    lines.push(trimmed.to_string());
    current.clear();
}

#[inline]
fn clamp_len(n: usize) -> u16 {
    n.min(u16::MAX as usize) as u16
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ts() -> Typesetter {
        Typesetter::new()
    }

    #[test]
    fn test_display_width_ascii_and_wide() {
        assert_eq!(display_width("hello"), 5);
        assert_eq!(display_width(""), 0);
        assert_eq!(display_width("你好"), 4);
    }

    #[test]
    fn test_wrap_fits_on_one_line() {
        assert_eq!(ts().wrap("hello", 10), vec!["hello"]);
    }

    #[test]
    fn test_wrap_at_word_boundary() {
        assert_eq!(ts().wrap("hello world", 5), vec!["hello", "world"]);
        assert_eq!(ts().wrap("a b c", 3), vec!["a b", "c"]);
    }

    #[test]
    fn test_wrap_keeps_explicit_newlines() {
        assert_eq!(ts().wrap("a\n\nb", 10), vec!["a", "", "b"]);
    }

    #[test]
    fn test_wrap_breaks_long_word() {
        assert_eq!(ts().wrap("abcdef", 2), vec!["ab", "cd", "ef"]);
    }

    #[test]
    fn test_wrap_trims_trailing_space_at_break() {
        assert_eq!(ts().wrap("abc de", 4), vec!["abc", "de"]);
    }

    #[test]
    fn test_wrap_empty() {
        assert!(ts().wrap("", 10).is_empty());
    }

    #[test]
    fn test_measure_max_unwrapped() {
        assert_eq!(ts().measure_max("hello world"), Size::new(11, 1));
        assert_eq!(ts().measure_max("one\nlonger line"), Size::new(11, 2));
        assert_eq!(ts().measure_max(""), Size::ZERO);
    }

    #[test]
    fn test_measure_min_is_longest_word() {
        assert_eq!(ts().measure_min("hello world", 0), Size::new(5, 2));
        assert_eq!(ts().measure_min("hi to all", 0), Size::new(3, 3));
    }

    #[test]
    fn test_measure_min_capped_breaks_words() {
        let size = ts().measure_min("hello", 4);
        assert_eq!(size.width, 4);
        assert_eq!(size.height, 2); // "hell" / "o"
    }

    #[test]
    fn test_measure_at_uses_actual_line_widths() {
        let size = ts().measure_at("hi to all", Size::new(5, 10));
        assert_eq!(size, Size::new(5, 2)); // "hi to" / "all"
    }

    #[test]
    fn test_measure_at_height_is_not_clipped() {
        let size = ts().measure_at("a b c d", Size::new(1, 2));
        assert_eq!(size.height, 4);
    }

    #[test]
    fn test_truncate_exact() {
        assert_eq!(truncate("hello", 5), "hello");
        assert_eq!(truncate("hello", 4), "hel…");
        assert_eq!(truncate("hello", 0), "");
    }

    #[test]
    fn test_tab_expansion() {
        assert_eq!(ts().measure_max("\ta"), Size::new(5, 1));
        assert_eq!(Typesetter::with_tab_width(8).measure_max("\ta"), Size::new(9, 1));
        // tab stop rounds up from mid-column
        assert_eq!(ts().measure_max("ab\tc"), Size::new(5, 1));
    }

    #[test]
    fn test_wrap_wide_glyphs() {
        assert_eq!(ts().wrap("你好", 2), vec!["你", "好"]);
    }
}
