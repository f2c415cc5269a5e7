//! List containers: a vertical stack with a marker gutter.
//!
//! The gutter is sized for the widest marker the list will ever draw (the
//! bullet glyph, or the last item's number) plus one separator column, so
//! items stay aligned as the list grows. Children lay out in the remaining
//! width and every item rect is shifted right past the gutter.

use crate::canvas::Canvas;
use crate::geometry::{Rect, Size};
use crate::layout::{content_avail, resolve_box, BoxSpec, ChildrenLayout, ElementLayout, Phase};
use crate::style::Style;
use crate::text::display_width;
use crate::types::{Direction, Rgba};

use super::{draw_children, merge_clip, stack_children, Element};

/// How list items are introduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMarker {
    /// A `•` in front of every item.
    Bullet,
    /// `1.`, `2.`, ... counting in-flow items from one.
    Numbered,
}

#[derive(Debug)]
pub(crate) struct ListBox {
    pub(crate) marker: ListMarker,
    pub(crate) children: Vec<Element>,
}

impl ListBox {
    pub(crate) fn new(marker: ListMarker) -> Self {
        Self {
            marker,
            children: Vec::new(),
        }
    }

    fn flow_count(&self) -> usize {
        self.children
            .iter()
            .filter(|child| !child.is_absolute())
            .count()
    }

    /// Marker column plus one separator column.
    fn gutter(&self) -> u16 {
        let marker = match self.marker {
            ListMarker::Bullet => 1,
            ListMarker::Numbered => {
                let last = self.flow_count().max(1);
                display_width(&format!("{last}."))
            }
        };
        marker.saturating_add(1)
    }

    pub(crate) fn compute(
        &self,
        style: &Style,
        phase: Phase,
        parent: Size,
    ) -> (ElementLayout, ChildrenLayout) {
        let spec = BoxSpec::from_style(style);
        let avail = content_avail(&spec, parent);
        let gutter = self.gutter();
        let inner = Size::new(avail.width.saturating_sub(gutter), avail.height);

        let (mut content, mut rects) =
            stack_children(&self.children, phase, inner, Direction::Vertical);
        for rect in &mut rects {
            rect.x = rect.x.saturating_add(gutter);
        }
        content.width = content.width.saturating_add(gutter);

        let layout = resolve_box(&spec, content, parent);
        (layout, rects)
    }

    pub(crate) fn draw(
        &self,
        canvas: &mut Canvas,
        style: &Style,
        layout: &ElementLayout,
        outer: Rect,
        rects: &[Rect],
        clip: Option<&Rect>,
    ) {
        let content = layout.content_in(outer);
        let Some(inner_clip) = merge_clip(content, clip) else {
            return;
        };

        let gutter = self.gutter();
        let mut ordinal = 0u16;
        for (i, child) in self.children.iter().enumerate() {
            if child.is_absolute() {
                continue;
            }
            ordinal += 1;
            let Some(rect) = rects.get(i) else { break };
            if rect.height == 0 {
                continue;
            }
            let label = match self.marker {
                ListMarker::Bullet => "\u{2022}".to_string(),
                ListMarker::Numbered => format!("{ordinal}."),
            };
            // right-align the marker against the separator column
            let pad = gutter
                .saturating_sub(1)
                .saturating_sub(display_width(&label));
            canvas.place_str(
                content.x.saturating_add(pad),
                content.y.saturating_add(rect.y),
                &label,
                style.fg,
                Rgba::TRANSPARENT,
                style.attrs,
                Some(&inner_clip),
            );
        }

        draw_children(canvas, &self.children, rects, content, clip);
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Dimension;

    fn item(width: u16, height: u16) -> Element {
        let mut el = Element::flow(Direction::Vertical);
        el.update_style(|s| {
            s.width = Dimension::Chars(width);
            s.height = Dimension::Chars(height);
        });
        el
    }

    #[test]
    fn test_bullet_gutter_is_two_columns() {
        let mut root = Element::list(ListMarker::Bullet);
        root.update_style(|s| s.width = Dimension::Auto);
        root.push_child(item(8, 1)).unwrap();
        root.push_child(item(4, 2)).unwrap();

        let size = root.render_size(Size::new(40, 20));
        assert_eq!(size, Size::new(10, 3));

        let rects = root.children_layout(Phase::Render, Size::new(40, 20));
        assert_eq!(rects[0], Rect::new(2, 0, 8, 1));
        assert_eq!(rects[1], Rect::new(2, 1, 4, 2));
    }

    #[test]
    fn test_numbered_gutter_tracks_item_count() {
        let mut root = Element::list(ListMarker::Numbered);
        root.update_style(|s| s.width = Dimension::Auto);
        for _ in 0..12 {
            root.push_child(item(5, 1)).unwrap();
        }

        // "12." is three columns wide, plus the separator
        let rects = root.children_layout(Phase::Render, Size::new(40, 20));
        assert_eq!(rects[0].x, 4);
        assert_eq!(root.render_size(Size::new(40, 20)).width, 9);
    }

    #[test]
    fn test_items_lay_out_in_reduced_width() {
        let mut root = Element::list(ListMarker::Bullet);
        let mut child = Element::flow(Direction::Vertical);
        child.update_style(|s| {
            s.width = Dimension::Percent(100.0);
            s.height = Dimension::Chars(1);
        });
        root.push_child(child).unwrap();

        let rects = root.children_layout(Phase::Render, Size::new(40, 20));
        assert_eq!(rects[0].width, 38);
    }

    #[test]
    fn test_markers_drawn_right_aligned() {
        let mut root = Element::list(ListMarker::Numbered);
        for _ in 0..10 {
            root.push_child(item(4, 1)).unwrap();
        }

        let mut canvas = Canvas::new(20, 12);
        root.render(&mut canvas, Rect::new(0, 0, 20, 12));
        // "1." right-aligned in a three-wide marker column
        assert_eq!(canvas.get(0, 0).unwrap().ch, ' ' as u32);
        assert_eq!(canvas.get(1, 0).unwrap().ch, '1' as u32);
        assert_eq!(canvas.get(2, 0).unwrap().ch, '.' as u32);
        // "10." flush left
        assert_eq!(canvas.get(0, 9).unwrap().ch, '1' as u32);
        assert_eq!(canvas.get(1, 9).unwrap().ch, '0' as u32);
        assert_eq!(canvas.get(2, 9).unwrap().ch, '.' as u32);
    }

    #[test]
    fn test_bullet_drawn() {
        let mut root = Element::list(ListMarker::Bullet);
        root.push_child(item(4, 1)).unwrap();

        let mut canvas = Canvas::new(10, 4);
        root.render(&mut canvas, Rect::new(0, 0, 10, 4));
        assert_eq!(canvas.get(0, 0).unwrap().ch, '\u{2022}' as u32);
    }
}
