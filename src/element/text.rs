//! Text leaves: a run of styled text measured by a [`Typesetter`].
//!
//! The three sizing phases map onto the three measurements: min reports the
//! narrowest wrap that breaks no word, max reports the unwrapped extent, and
//! render reports the real footprint after wrapping into the offered width.
//! A `min-content` or `max-content` width pins the measurement to one of the
//! extremes regardless of phase.

use std::rc::Rc;

use crate::canvas::Canvas;
use crate::geometry::{Dimension, Rect, Size};
use crate::layout::{content_avail, resolve_box, BoxSpec, ElementLayout, Phase};
use crate::style::Style;
use crate::text::Typesetter;
use crate::types::{HAlign, VAlign};

use super::merge_clip;

#[derive(Debug)]
pub(crate) struct TextBlock {
    pub(crate) content: String,
    pub(crate) typesetter: Rc<Typesetter>,
    pub(crate) align: HAlign,
}

impl TextBlock {
    pub(crate) fn new(content: String, typesetter: Rc<Typesetter>) -> Self {
        Self {
            content,
            typesetter,
            align: HAlign::Left,
        }
    }

    pub(crate) fn compute(&self, style: &Style, phase: Phase, parent: Size) -> ElementLayout {
        let spec = BoxSpec::from_style(style);
        let avail = content_avail(&spec, parent);

        let desired = match (style.width, phase) {
            (Dimension::MinContent, _) => self.typesetter.measure_min(&self.content, avail.width),
            (Dimension::MaxContent, _) => self.typesetter.measure_max(&self.content),
            (_, Phase::Min) => self.typesetter.measure_min(&self.content, avail.width),
            (_, Phase::Max) => self.typesetter.measure_max(&self.content),
            (_, Phase::Render) => self.typesetter.measure_at(&self.content, avail),
        };

        resolve_box(&spec, desired, parent)
    }

    pub(crate) fn draw(
        &self,
        canvas: &mut Canvas,
        style: &Style,
        layout: &ElementLayout,
        outer: Rect,
        clip: Option<&Rect>,
    ) {
        let content = layout.content_in(outer);
        let Some(inner_clip) = merge_clip(content, clip) else {
            return;
        };
        self.typesetter.draw(
            canvas,
            &self.content,
            content,
            style.fg,
            style.attrs,
            self.align,
            VAlign::Top,
            Some(&inner_clip),
        );
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;

    fn text(content: &str) -> Element {
        Element::text(content, Rc::new(Typesetter::new()))
    }

    #[test]
    fn test_min_is_widest_word() {
        let el = text("alpha beta gamma");
        assert_eq!(el.min_size(Size::new(80, 24)), Size::new(5, 3));
    }

    #[test]
    fn test_max_is_unwrapped() {
        let el = text("alpha beta gamma");
        assert_eq!(el.max_size(Size::new(80, 24)), Size::new(16, 1));
    }

    #[test]
    fn test_render_wraps_into_parent_width() {
        let mut el = text("alpha beta gamma");
        // occupy only what the wrap actually used
        el.update_style(|s| s.width = Dimension::Auto);
        let size = el.render_size(Size::new(11, 24));
        assert_eq!(size, Size::new(10, 2));
    }

    #[test]
    fn test_percent_width_wraps_and_reports_full_width() {
        let el = text("alpha beta gamma");
        // the default text style is width: 100%
        let size = el.render_size(Size::new(11, 24));
        assert_eq!(size, Size::new(11, 2));
    }

    #[test]
    fn test_min_content_width_pins_render() {
        let mut el = text("alpha beta gamma");
        el.update_style(|s| s.width = Dimension::MinContent);
        assert_eq!(el.render_size(Size::new(80, 24)).width, 5);
    }

    #[test]
    fn test_right_alignment_pads_on_the_left() {
        let mut el = text("hi");
        el.set_text_align(HAlign::Right).unwrap();
        let mut canvas = Canvas::new(10, 1);
        el.render(&mut canvas, Rect::new(0, 0, 10, 1));
        assert_eq!(canvas.get(0, 0).unwrap().ch, ' ' as u32);
        assert_eq!(canvas.get(8, 0).unwrap().ch, 'h' as u32);
        assert_eq!(canvas.get(9, 0).unwrap().ch, 'i' as u32);
    }

    #[test]
    fn test_draw_clips_to_content() {
        let el = text("hello world");
        let mut canvas = Canvas::new(20, 4);
        el.render(&mut canvas, Rect::new(0, 0, 5, 1));
        assert_eq!(canvas.get(0, 0).unwrap().ch, 'h' as u32);
        // wrapped second line is outside the one-row bounds
        assert_eq!(canvas.get(0, 1).unwrap().ch, ' ' as u32);
    }
}
