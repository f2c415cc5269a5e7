//! Flow containers: plain stacking boxes, with an optional title.
//!
//! A vertical flow stacks children top to bottom and is the default way to
//! compose a screen. A horizontal flow lays children side by side; when they
//! do not fit, their widths are distributed by
//! [`crate::layout::distribute_widths`] during the render phase (the min and
//! max phases just sum, since they describe ideal extents).
//!
//! A title occupies the top border line when the box is bordered; on a
//! borderless box it claims the first content row as a band and the children
//! shift down one row.

use crate::canvas::Canvas;
use crate::geometry::{Rect, Size};
use crate::layout::{
    content_avail, distribute_widths, resolve_box, BoxSpec, ChildrenLayout, ElementLayout, Phase,
};
use crate::style::Style;
use crate::text::{display_width, truncate};
use crate::types::{Direction, Rgba};

use super::{draw_children, place_absolute, stack_children, Element};

#[derive(Debug)]
pub(crate) struct FlowBox {
    pub(crate) direction: Direction,
    pub(crate) title: Option<String>,
    pub(crate) children: Vec<Element>,
}

impl FlowBox {
    pub(crate) fn new(direction: Direction) -> Self {
        Self {
            direction,
            title: None,
            children: Vec::new(),
        }
    }

    /// Rows of top chrome inside the content box: one for a borderless
    /// title, none otherwise (a bordered title rides the border line).
    fn band(&self, style: &Style) -> u16 {
        u16::from(self.title.is_some() && style.border.is_none())
    }

    pub(crate) fn compute(
        &self,
        style: &Style,
        phase: Phase,
        parent: Size,
    ) -> (ElementLayout, ChildrenLayout) {
        let spec = BoxSpec::from_style(style);
        let avail = content_avail(&spec, parent);
        let band = self.band(style);
        let inner = Size::new(avail.width, avail.height.saturating_sub(band));

        let (mut content, mut rects) = if self.direction.is_horizontal() && phase == Phase::Render
        {
            self.distribute(inner)
        } else {
            stack_children(&self.children, phase, inner, self.direction)
        };

        if band > 0 {
            for rect in &mut rects {
                rect.y = rect.y.saturating_add(band);
            }
            content.height = content.height.saturating_add(band);
            if let Some(title) = &self.title {
                content.width = content.width.max(display_width(title));
            }
        }

        let layout = resolve_box(&spec, content, parent);
        (layout, rects)
    }

    /// Render-phase horizontal placement: grant widths, then let each child
    /// resolve itself inside its grant.
    fn distribute(&self, inner: Size) -> (Size, ChildrenLayout) {
        let flow_idx: Vec<usize> = self
            .children
            .iter()
            .enumerate()
            .filter(|(_, child)| !child.is_absolute())
            .map(|(i, _)| i)
            .collect();

        let maxes: Vec<u16> = flow_idx
            .iter()
            .map(|&i| self.children[i].size_for(Phase::Max, inner).width)
            .collect();
        let mins: Vec<u16> = flow_idx
            .iter()
            .map(|&i| self.children[i].size_for(Phase::Min, inner).width)
            .collect();
        let grants = distribute_widths(&maxes, &mins, inner.width);

        let mut rects = vec![Rect::default(); self.children.len()];
        let mut x = 0u16;
        let mut tallest = 0u16;
        for (slot, &i) in flow_idx.iter().enumerate() {
            let granted = Size::new(grants[slot], inner.height);
            let size = self.children[i].size_for(Phase::Render, granted);
            // the rect spans the whole grant; a child that resolved smaller
            // draws left-aligned inside it
            rects[i] = Rect::new(x, 0, grants[slot], size.height);
            x = x.saturating_add(grants[slot]);
            tallest = tallest.max(size.height);
        }

        for (i, child) in self.children.iter().enumerate() {
            if child.is_absolute() {
                rects[i] = place_absolute(child, Phase::Render, inner);
            }
        }

        (Size::new(x, tallest), rects)
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

        if let Some(title) = &self.title {
            match layout.border_in(outer) {
                Some(border) if border.width > 6 => {
                    let label = format!(" {} ", truncate(title, border.width - 6));
                    canvas.place_str(
                        border.x + 2,
                        border.y,
                        &label,
                        style.fg,
                        Rgba::TRANSPARENT,
                        style.attrs,
                        clip,
                    );
                }
                Some(_) => {} // no room for a label
                None => {
                    canvas.place_str(
                        content.x,
                        content.y,
                        &truncate(title, content.width),
                        style.fg,
                        Rgba::TRANSPARENT,
                        style.attrs,
                        clip,
                    );
                }
            }
        }

        draw_children(canvas, &self.children, rects, content, clip);
    }
}

// =============================================================================
// Tests
// =============================================================================
