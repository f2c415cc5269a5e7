//! Content-box constraint resolution.
//!
//! [`resolve_box`] is the single place where style constraints, measured
//! content and available space meet. It is a pure function: same inputs,
//! same [`ElementLayout`], no tree access, and it cannot fail. Degenerate
//! constraint combinations are normalized rather than rejected, so a layout
//! query always has an answer.
//!
//! # Algorithm
//!
//! Per axis, in order:
//!
//! 1. Resolve the style size against the available length. `Auto` (and the
//!    content keywords, whose measurement the caller folds into
//!    `desired_content`) falls back to the desired content size.
//! 2. Clamp into `[min, max]`. Bounds that do not resolve act as
//!    unconstrained; an inverted pair is normalized by raising the ceiling
//!    to the floor, so the minimum always wins.
//! 3. Wrap the content in padding, a one-cell border ring when the element
//!    is bordered, and margin. The sum is the element's overall size.

use crate::geometry::{Dimension, Rect, Size, Spacing};
use crate::style::Style;

/// Ordered per-child rectangles, relative to the parent's content origin.
pub type ChildrenLayout = Vec<Rect>;

// =============================================================================
// Inputs
// =============================================================================

/// The slice of a [`Style`] that box resolution reads.
///
/// Elements copy this out of their style and substitute measured sizes for
/// the content keywords before calling [`resolve_box`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoxSpec {
    pub width: Dimension,
    pub height: Dimension,
    pub min_width: Dimension,
    pub max_width: Dimension,
    pub min_height: Dimension,
    pub max_height: Dimension,
    pub margin: Spacing,
    pub padding: Spacing,
    pub bordered: bool,
}

impl BoxSpec {
    pub fn from_style(style: &Style) -> Self {
        Self {
            width: style.width,
            height: style.height,
            min_width: style.min_width,
            max_width: style.max_width,
            min_height: style.min_height,
            max_height: style.max_height,
            margin: style.margin,
            padding: style.padding,
            bordered: style.border.is_some(),
        }
    }
}

// =============================================================================
// Outputs
// =============================================================================

/// A resolved element box.
///
/// `content` and `border` are positioned relative to the element's own
/// origin (the corner of its margin box); the parent decides where that
/// origin lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementLayout {
    /// Overall footprint: content plus padding, border and margin.
    pub size: Size,
    /// Where the content box sits inside the element.
    pub content: Rect,
    /// The border ring, one padding-layer outside the content. `None` for
    /// borderless elements.
    pub border: Option<Rect>,
}

impl ElementLayout {
    /// The content box in absolute coordinates, given where the element was
    /// placed.
    #[inline]
    pub fn content_in(&self, outer: Rect) -> Rect {
        self.content
            .translated(outer.x, outer.y)
    }

    /// The border box in absolute coordinates, given where the element was
    /// placed.
    #[inline]
    pub fn border_in(&self, outer: Rect) -> Option<Rect> {
        self.border.map(|b| b.translated(outer.x, outer.y))
    }
}

// =============================================================================
// Resolution
// =============================================================================

/// Resolve an element's box against the space its parent offers.
///
/// `desired_content` is what the element's content would like to occupy; it
/// is used wherever a style size does not resolve to a number. See the
/// module docs for the full ordering.
pub fn resolve_box(spec: &BoxSpec, desired_content: Size, available: Size) -> ElementLayout {
    let margin = spec.margin.resolve(available);
    let padding = spec.padding.resolve(available);
    let border = u16::from(spec.bordered);

    let width = clamp_axis(
        spec.width
            .resolve(available.width)
            .unwrap_or(desired_content.width),
        spec.min_width.resolve(available.width),
        spec.max_width.resolve(available.width),
    );
    let height = clamp_axis(
        spec.height
            .resolve(available.height)
            .unwrap_or(desired_content.height),
        spec.min_height.resolve(available.height),
        spec.max_height.resolve(available.height),
    );

    let content = Rect::new(
        margin.left.saturating_add(border).saturating_add(padding.left),
        margin.top.saturating_add(border).saturating_add(padding.top),
        width,
        height,
    );

    let border_rect = spec.bordered.then(|| {
        Rect::new(
            margin.left,
            margin.top,
            width.saturating_add(padding.horizontal()).saturating_add(2),
            height.saturating_add(padding.vertical()).saturating_add(2),
        )
    });

    let size = Size::new(
        width
            .saturating_add(padding.horizontal())
            .saturating_add(border * 2)
            .saturating_add(margin.horizontal()),
        height
            .saturating_add(padding.vertical())
            .saturating_add(border * 2)
            .saturating_add(margin.vertical()),
    );

    ElementLayout {
        size,
        content,
        border: border_rect,
    }
}

/// The content-box space an element can offer its children, given the space
/// its parent offers it.
///
/// A resolvable style width/height pins the content box directly; otherwise
/// the children get whatever is left of `available` after padding, border
/// and margin. Either way the min/max bounds apply.
pub fn content_avail(spec: &BoxSpec, available: Size) -> Size {
    let margin = spec.margin.resolve(available);
    let padding = spec.padding.resolve(available);
    let border = u16::from(spec.bordered) * 2;

    let chrome_w = padding
        .horizontal()
        .saturating_add(border)
        .saturating_add(margin.horizontal());
    let chrome_h = padding
        .vertical()
        .saturating_add(border)
        .saturating_add(margin.vertical());

    let width = clamp_axis(
        spec.width
            .resolve(available.width)
            .unwrap_or(available.width.saturating_sub(chrome_w)),
        spec.min_width.resolve(available.width),
        spec.max_width.resolve(available.width),
    );
    let height = clamp_axis(
        spec.height
            .resolve(available.height)
            .unwrap_or(available.height.saturating_sub(chrome_h)),
        spec.min_height.resolve(available.height),
        spec.max_height.resolve(available.height),
    );

    Size::new(width, height)
}

/// Clamp a resolved length into its bounds. Unresolvable bounds do not
/// constrain; an inverted pair raises the ceiling to the floor.
fn clamp_axis(value: u16, min: Option<u16>, max: Option<u16>) -> u16 {
    let lo = min.unwrap_or(0);
    let hi = max.unwrap_or(u16::MAX).max(lo);
    value.clamp(lo, hi)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Edges;

    fn avail() -> Size {
        Size::new(80, 24)
    }

    #[test]
    fn test_auto_takes_desired_content() {
        let layout = resolve_box(&BoxSpec::default(), Size::new(12, 3), avail());
        assert_eq!(layout.size, Size::new(12, 3));
        assert_eq!(layout.content, Rect::new(0, 0, 12, 3));
        assert_eq!(layout.border, None);
    }

    #[test]
    fn test_fixed_width_overrides_desired() {
        let spec = BoxSpec {
            width: Dimension::Chars(20),
            ..Default::default()
        };
        let layout = resolve_box(&spec, Size::new(12, 3), avail());
        assert_eq!(layout.size.width, 20);
    }

    #[test]
    fn test_percent_resolves_against_available() {
        let spec = BoxSpec {
            width: Dimension::Percent(50.0),
            height: Dimension::Percent(50.0),
            ..Default::default()
        };
        let layout = resolve_box(&spec, Size::ZERO, Size::new(81, 25));
        assert_eq!(layout.size, Size::new(40, 12));
    }

    #[test]
    fn test_pixels_cover_two_cells_each() {
        let spec = BoxSpec {
            width: Dimension::Pixels(8),
            ..Default::default()
        };
        let layout = resolve_box(&spec, Size::ZERO, avail());
        assert_eq!(layout.size.width, 16);
    }

    #[test]
    fn test_clamp_applies_bounds() {
        let spec = BoxSpec {
            min_width: Dimension::Chars(10),
            max_height: Dimension::Chars(2),
            ..Default::default()
        };
        let layout = resolve_box(&spec, Size::new(4, 9), avail());
        assert_eq!(layout.size, Size::new(10, 2));
    }

    #[test]
    fn test_inverted_bounds_min_wins() {
        let spec = BoxSpec {
            min_width: Dimension::Chars(20),
            max_width: Dimension::Chars(10),
            ..Default::default()
        };
        let layout = resolve_box(&spec, Size::new(15, 1), avail());
        assert_eq!(layout.size.width, 20);
    }

    #[test]
    fn test_chrome_arithmetic() {
        let spec = BoxSpec {
            margin: Spacing::chars(2),
            padding: Spacing::chars(1),
            bordered: true,
            ..Default::default()
        };
        let layout = resolve_box(&spec, Size::new(10, 2), avail());

        // margin 2 + border 1 + padding 1 on each side
        assert_eq!(layout.content, Rect::new(4, 4, 10, 2));
        assert_eq!(layout.border, Some(Rect::new(2, 2, 14, 6)));
        assert_eq!(layout.size, Size::new(18, 10));
    }

    #[test]
    fn test_border_rect_hugs_padding() {
        let spec = BoxSpec {
            bordered: true,
            ..Default::default()
        };
        let layout = resolve_box(&spec, Size::new(5, 1), avail());
        assert_eq!(layout.border, Some(Rect::new(0, 0, 7, 3)));
        assert_eq!(layout.content, Rect::new(1, 1, 5, 1));
    }

    #[test]
    fn test_percent_spacing_resolves_per_axis() {
        let spec = BoxSpec {
            padding: Spacing::symmetric(Dimension::Percent(10.0), Dimension::Percent(25.0)),
            ..Default::default()
        };
        let layout = resolve_box(&spec, Size::new(10, 2), Size::new(40, 8));
        let edges = spec.padding.resolve(Size::new(40, 8));
        assert_eq!(edges, Edges { left: 4, right: 4, top: 2, bottom: 2 });
        assert_eq!(layout.size, Size::new(18, 6));
    }

    #[test]
    fn test_degenerate_input_saturates() {
        let spec = BoxSpec {
            margin: Spacing::chars(u16::MAX),
            padding: Spacing::chars(u16::MAX),
            bordered: true,
            ..Default::default()
        };
        // must not panic, must stay within u16
        let layout = resolve_box(&spec, Size::new(u16::MAX, u16::MAX), Size::new(1, 1));
        assert_eq!(layout.size, Size::new(u16::MAX, u16::MAX));
    }

    #[test]
    fn test_content_avail_subtracts_chrome() {
        let spec = BoxSpec {
            padding: Spacing::chars(1),
            bordered: true,
            ..Default::default()
        };
        assert_eq!(content_avail(&spec, Size::new(40, 12)), Size::new(36, 8));
    }

    #[test]
    fn test_content_avail_fixed_width_pins_children_space() {
        let spec = BoxSpec {
            width: Dimension::Chars(20),
            ..Default::default()
        };
        assert_eq!(content_avail(&spec, avail()).width, 20);
    }

    #[test]
    fn test_content_avail_honors_max() {
        let spec = BoxSpec {
            max_width: Dimension::Chars(30),
            ..Default::default()
        };
        assert_eq!(content_avail(&spec, avail()).width, 30);
    }

    #[test]
    fn test_content_in_translates() {
        let spec = BoxSpec {
            bordered: true,
            ..Default::default()
        };
        let layout = resolve_box(&spec, Size::new(4, 2), avail());
        let abs = layout.content_in(Rect::new(10, 5, 6, 4));
        assert_eq!(abs, Rect::new(11, 6, 4, 2));
        assert_eq!(layout.border_in(Rect::new(10, 5, 6, 4)), Some(Rect::new(10, 5, 6, 4)));
    }
}
