//! Grid containers: children placed into the cells of fixed track lists.
//!
//! Tracks are resolved once per query against the content-box budget and the
//! same track extents answer every phase, so a grid's reported size does not
//! wobble between min, max, and render. Children without an explicit area are
//! auto-placed row-major by a cursor; explicitly placed children do not
//! advance it.

use crate::canvas::Canvas;
use crate::geometry::{Rect, Size};
use crate::layout::{
    content_avail, resolve_box, track_offsets, BoxSpec, ChildrenLayout, ElementLayout, GridArea,
    Phase, TrackList,
};
use crate::style::Style;

use super::{draw_children, place_absolute, Element};

#[derive(Debug)]
pub(crate) struct GridBox {
    pub(crate) columns: TrackList,
    pub(crate) rows: TrackList,
    pub(crate) children: Vec<Element>,
}

impl GridBox {
    pub(crate) fn new(columns: TrackList, rows: TrackList) -> Self {
        Self {
            columns,
            rows,
            children: Vec::new(),
        }
    }

    pub(crate) fn compute(
        &self,
        style: &Style,
        phase: Phase,
        parent: Size,
    ) -> (ElementLayout, ChildrenLayout) {
        let spec = BoxSpec::from_style(style);
        let avail = content_avail(&spec, parent);

        let col_sizes = self.columns.resolve(avail.width);
        let row_sizes = self.rows.resolve(avail.height);
        let col_off = track_offsets(&col_sizes);
        let row_off = track_offsets(&row_sizes);
        let content = Size::new(
            col_off.last().copied().unwrap_or(0),
            row_off.last().copied().unwrap_or(0),
        );

        let cols = self.columns.count();
        let rows = self.rows.count();
        let mut rects = vec![Rect::default(); self.children.len()];
        let mut cursor = 0u32;
        for (i, child) in self.children.iter().enumerate() {
            if child.is_absolute() {
                rects[i] = place_absolute(child, phase, content);
                continue;
            }
            let area = match child.style().grid_area {
                Some(area) => area.clamped(cols, rows),
                None => {
                    let col = (cursor % u32::from(cols)) as u16;
                    let row = ((cursor / u32::from(cols)) as u16).min(rows - 1);
                    cursor += 1;
                    GridArea::cell(col, row)
                }
            };
            let cell = Rect::new(
                col_off[usize::from(area.col_start)],
                row_off[usize::from(area.row_start)],
                col_off[usize::from(area.col_end)] - col_off[usize::from(area.col_start)],
                row_off[usize::from(area.row_end)] - row_off[usize::from(area.row_start)],
            );
            // warm the child's slot so the draw pass finds it
            child.size_for(phase, cell.size());
            rects[i] = cell;
        }

        let layout = resolve_box(&spec, content, parent);
        (layout, rects)
    }

    pub(crate) fn draw(
        &self,
        canvas: &mut Canvas,
        layout: &ElementLayout,
        outer: Rect,
        rects: &[Rect],
        clip: Option<&Rect>,
    ) {
        draw_children(canvas, &self.children, rects, layout.content_in(outer), clip);
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Dimension;
    use crate::types::Direction;

    fn grid(cols: Vec<Dimension>, rows: Vec<Dimension>) -> Element {
        Element::grid(cols, rows).unwrap()
    }

    #[test]
    fn test_fixed_and_auto_tracks() {
        // 10 + 10 + auto in 50 leaves 30 for the auto track
        let mut root = grid(
            vec![
                Dimension::Chars(10),
                Dimension::Chars(10),
                Dimension::Auto,
            ],
            vec![Dimension::Chars(4)],
        );
        for _ in 0..3 {
            root.push_child(Element::flow(Direction::Vertical)).unwrap();
        }

        let rects = root.children_layout(Phase::Render, Size::new(50, 10));
        assert_eq!(rects[0], Rect::new(0, 0, 10, 4));
        assert_eq!(rects[1], Rect::new(10, 0, 10, 4));
        assert_eq!(rects[2], Rect::new(20, 0, 30, 4));
    }

    #[test]
    fn test_auto_place_wraps_rows() {
        let mut root = grid(
            vec![Dimension::Chars(5), Dimension::Chars(5)],
            vec![Dimension::Chars(2), Dimension::Chars(2)],
        );
        for _ in 0..3 {
            root.push_child(Element::flow(Direction::Vertical)).unwrap();
        }

        let rects = root.children_layout(Phase::Render, Size::new(20, 20));
        assert_eq!(rects[0], Rect::new(0, 0, 5, 2));
        assert_eq!(rects[1], Rect::new(5, 0, 5, 2));
        assert_eq!(rects[2], Rect::new(0, 2, 5, 2));
    }

    #[test]
    fn test_explicit_area_spans_and_skips_cursor() {
        let mut root = grid(
            vec![Dimension::Chars(5), Dimension::Chars(5)],
            vec![Dimension::Chars(2), Dimension::Chars(2)],
        );
        root.push_child(Element::flow(Direction::Vertical)).unwrap();
        root.push_child(Element::flow(Direction::Vertical)).unwrap();
        root.set_child_area(0, GridArea::new(0, 2, 0, 1)).unwrap();

        let rects = root.children_layout(Phase::Render, Size::new(20, 20));
        // child 0 spans both columns; child 1 auto-places at the first cell
        assert_eq!(rects[0], Rect::new(0, 0, 10, 2));
        assert_eq!(rects[1], Rect::new(0, 0, 5, 2));
    }

    #[test]
    fn test_grid_size_is_track_extent_in_every_phase() {
        let root = grid(
            vec![Dimension::Chars(10), Dimension::Auto],
            vec![Dimension::Chars(3)],
        );
        let parent = Size::new(30, 10);
        assert_eq!(root.min_size(parent), Size::new(30, 3));
        assert_eq!(root.max_size(parent), Size::new(30, 3));
        assert_eq!(root.render_size(parent), Size::new(30, 3));
    }

    #[test]
    fn test_removing_a_column_reflows_and_clamps_stale_areas() {
        let mut root = grid(
            vec![
                Dimension::Chars(10),
                Dimension::Chars(10),
                Dimension::Auto,
            ],
            vec![Dimension::Chars(2)],
        );
        root.push_child(Element::flow(Direction::Vertical)).unwrap();
        root.push_child(Element::flow(Direction::Vertical)).unwrap();
        root.set_child_area(1, GridArea::cell(2, 0)).unwrap();

        root.remove_column(1).unwrap();
        let rects = root.children_layout(Phase::Render, Size::new(50, 10));
        // tracks are now 10 + auto(40); the stale column-2 area clamps in
        assert_eq!(rects[0], Rect::new(0, 0, 10, 2));
        assert_eq!(rects[1], Rect::new(10, 0, 40, 2));

        assert!(root.remove_column(5).is_err());
        // the only row must stay
        assert!(root.remove_row(0).is_err());
    }

    #[test]
    fn test_overflowing_cursor_stays_on_last_row() {
        let mut root = grid(
            vec![Dimension::Chars(4)],
            vec![Dimension::Chars(2)],
        );
        for _ in 0..3 {
            root.push_child(Element::flow(Direction::Vertical)).unwrap();
        }

        let rects = root.children_layout(Phase::Render, Size::new(10, 10));
        // one cell only: everyone lands in it
        for rect in rects {
            assert_eq!(rect, Rect::new(0, 0, 4, 2));
        }
    }
}
