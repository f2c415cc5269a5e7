//! Core geometry primitives for terminal layout.
//!
//! Everything here is measured in terminal cells with `u16` coordinates.
//! Arithmetic saturates rather than panics: a layout query can always be
//! answered, even for degenerate inputs.
//!
//! [`Dimension`] is the unit every style property is expressed in. It only
//! becomes a concrete cell count through [`Dimension::resolve`], which needs a
//! reference length (normally the parent's size on the same axis). The three
//! keyword variants have no numeric value of their own and resolve to `None`;
//! the layout pass substitutes a measured content size for them.

use std::fmt;

// =============================================================================
// Point / Size / Rect
// =============================================================================

/// A cell position. `(0, 0)` is the top-left corner of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

impl Point {
    pub const ZERO: Point = Point { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: u16, y: u16) -> Self {
        Point { x, y }
    }
}

/// A width/height pair in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0,
        height: 0,
    };

    #[inline]
    pub const fn new(width: u16, height: u16) -> Self {
        Size { width, height }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl From<(u16, u16)> for Size {
    fn from((width, height): (u16, u16)) -> Self {
        Size { width, height }
    }
}

/// An axis-aligned cell rectangle: origin plus extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub const fn from_size(size: Size) -> Self {
        Rect {
            x: 0,
            y: 0,
            width: size.width,
            height: size.height,
        }
    }

    #[inline]
    pub const fn origin(&self) -> Point {
        Point {
            x: self.x,
            y: self.y,
        }
    }

    #[inline]
    pub const fn size(&self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    /// First column to the right of the rectangle.
    #[inline]
    pub fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// First row below the rectangle.
    #[inline]
    pub fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether the cell at `(x, y)` lies inside the rectangle.
    #[inline]
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Intersection of two rectangles, or `None` when they do not overlap.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());

        if x1 < x2 && y1 < y2 {
            Some(Rect::new(x1, y1, x2 - x1, y2 - y1))
        } else {
            None
        }
    }

    /// The same rectangle shifted right by `dx` and down by `dy`.
    #[inline]
    pub fn translated(&self, dx: u16, dy: u16) -> Rect {
        Rect {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            width: self.width,
            height: self.height,
        }
    }
}

// =============================================================================
// Dimension
// =============================================================================

/// A style length: either a concrete quantity or a sizing keyword.
///
/// - `Chars(n)` - exactly `n` terminal cells
/// - `Pixels(n)` - `n` image pixels; a pixel covers two cells side by side, so
///   this resolves to `2n` cells
/// - `Percent(p)` - `p` percent of the reference length, floored
/// - `Auto` - let the element pick a size from its content
/// - `MinContent` / `MaxContent` - the element's smallest / largest
///   content-derived size for the axis
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Dimension {
    #[default]
    Auto,
    MinContent,
    MaxContent,
    Chars(u16),
    Pixels(u16),
    Percent(f32),
}

impl Dimension {
    /// Resolve to a cell count against a reference length.
    ///
    /// Keywords have no value of their own and return `None`; callers fall
    /// back to a measured content size (or treat the bound as absent).
    ///
    /// # Examples
    ///
    /// ```
    /// use weft_tui::geometry::Dimension;
    ///
    /// assert_eq!(Dimension::Chars(12).resolve(80), Some(12));
    /// assert_eq!(Dimension::Pixels(5).resolve(80), Some(10));
    /// assert_eq!(Dimension::Percent(50.0).resolve(81), Some(40));
    /// assert_eq!(Dimension::Auto.resolve(80), None);
    /// ```
    #[inline]
    pub fn resolve(self, reference: u16) -> Option<u16> {
        match self {
            Dimension::Auto | Dimension::MinContent | Dimension::MaxContent => None,
            Dimension::Chars(n) => Some(n),
            Dimension::Pixels(n) => Some(n.saturating_mul(2)),
            Dimension::Percent(p) => {
                Some((reference as f32 * p / 100.0).floor().clamp(0.0, u16::MAX as f32) as u16)
            }
        }
    }

    #[inline]
    pub const fn is_auto(&self) -> bool {
        matches!(self, Dimension::Auto)
    }

    /// True for the keywords that size from measured content.
    #[inline]
    pub const fn is_content_sized(&self) -> bool {
        matches!(self, Dimension::MinContent | Dimension::MaxContent)
    }
}

impl From<u16> for Dimension {
    /// `0` means auto, anything else a fixed cell count.
    fn from(n: u16) -> Self {
        if n == 0 {
            Dimension::Auto
        } else {
            Dimension::Chars(n)
        }
    }
}

impl From<i32> for Dimension {
    fn from(n: i32) -> Self {
        if n <= 0 {
            Dimension::Auto
        } else {
            Dimension::Chars(n as u16)
        }
    }
}

// =============================================================================
// Spacing / Edges
// =============================================================================

/// Per-edge spacing (margin or padding), each edge its own [`Dimension`].
///
/// Horizontal edges resolve against the reference width, vertical edges
/// against the reference height. Keywords resolve to zero here: an "auto"
/// margin is simply absent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Spacing {
    pub left: Dimension,
    pub right: Dimension,
    pub top: Dimension,
    pub bottom: Dimension,
}

impl Spacing {
    pub const ZERO: Spacing = Spacing {
        left: Dimension::Chars(0),
        right: Dimension::Chars(0),
        top: Dimension::Chars(0),
        bottom: Dimension::Chars(0),
    };

    /// The same dimension on all four edges.
    pub const fn uniform(d: Dimension) -> Self {
        Spacing {
            left: d,
            right: d,
            top: d,
            bottom: d,
        }
    }

    /// `horizontal` on left/right, `vertical` on top/bottom.
    pub const fn symmetric(horizontal: Dimension, vertical: Dimension) -> Self {
        Spacing {
            left: horizontal,
            right: horizontal,
            top: vertical,
            bottom: vertical,
        }
    }

    /// Fixed cell counts on all four edges.
    pub const fn chars(n: u16) -> Self {
        Spacing::uniform(Dimension::Chars(n))
    }

    /// Resolve all four edges against a reference size.
    pub fn resolve(&self, reference: Size) -> Edges {
        Edges {
            left: self.left.resolve(reference.width).unwrap_or(0),
            right: self.right.resolve(reference.width).unwrap_or(0),
            top: self.top.resolve(reference.height).unwrap_or(0),
            bottom: self.bottom.resolve(reference.height).unwrap_or(0),
        }
    }
}

/// Resolved spacing: concrete cell counts per edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Edges {
    pub left: u16,
    pub right: u16,
    pub top: u16,
    pub bottom: u16,
}

impl Edges {
    pub const ZERO: Edges = Edges {
        left: 0,
        right: 0,
        top: 0,
        bottom: 0,
    };

    #[inline]
    pub fn horizontal(&self) -> u16 {
        self.left.saturating_add(self.right)
    }

    #[inline]
    pub fn vertical(&self) -> u16 {
        self.top.saturating_add(self.bottom)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains() {
        let r = Rect::new(2, 3, 4, 2);
        assert!(r.contains(2, 3));
        assert!(r.contains(5, 4));
        assert!(!r.contains(6, 3));
        assert!(!r.contains(2, 5));
        assert!(!r.contains(1, 3));
    }

    #[test]
    fn test_rect_intersect_overlap() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        assert_eq!(a.intersect(&b), Some(Rect::new(5, 5, 5, 5)));
    }

    #[test]
    fn test_rect_intersect_disjoint() {
        let a = Rect::new(0, 0, 5, 5);
        let b = Rect::new(5, 0, 5, 5);
        assert_eq!(a.intersect(&b), None);
    }

    #[test]
    fn test_rect_intersect_contained() {
        let outer = Rect::new(0, 0, 20, 20);
        let inner = Rect::new(4, 4, 2, 2);
        assert_eq!(outer.intersect(&inner), Some(inner));
    }

    #[test]
    fn test_rect_empty() {
        assert!(Rect::new(3, 3, 0, 5).is_empty());
        assert!(!Rect::new(3, 3, 1, 1).is_empty());
    }

    #[test]
    fn test_dimension_resolve_chars() {
        assert_eq!(Dimension::Chars(7).resolve(100), Some(7));
        assert_eq!(Dimension::Chars(0).resolve(100), Some(0));
    }

    #[test]
    fn test_dimension_resolve_pixels_doubles() {
        assert_eq!(Dimension::Pixels(4).resolve(100), Some(8));
        assert_eq!(Dimension::Pixels(0).resolve(100), Some(0));
        // saturates instead of wrapping
        assert_eq!(Dimension::Pixels(u16::MAX).resolve(100), Some(u16::MAX));
    }

    #[test]
    fn test_dimension_resolve_percent_floors() {
        assert_eq!(Dimension::Percent(50.0).resolve(80), Some(40));
        assert_eq!(Dimension::Percent(50.0).resolve(81), Some(40));
        assert_eq!(Dimension::Percent(33.0).resolve(10), Some(3));
        assert_eq!(Dimension::Percent(100.0).resolve(123), Some(123));
    }

    #[test]
    fn test_dimension_resolve_percent_negative_clamps() {
        assert_eq!(Dimension::Percent(-25.0).resolve(80), Some(0));
    }

    #[test]
    fn test_dimension_keywords_resolve_to_none() {
        assert_eq!(Dimension::Auto.resolve(80), None);
        assert_eq!(Dimension::MinContent.resolve(80), None);
        assert_eq!(Dimension::MaxContent.resolve(80), None);
    }

    #[test]
    fn test_dimension_from_u16() {
        assert_eq!(Dimension::from(0u16), Dimension::Auto);
        assert_eq!(Dimension::from(5u16), Dimension::Chars(5));
    }

    #[test]
    fn test_spacing_resolve_axes() {
        let s = Spacing {
            left: Dimension::Chars(1),
            right: Dimension::Percent(10.0),
            top: Dimension::Percent(50.0),
            bottom: Dimension::Auto,
        };
        let e = s.resolve(Size::new(40, 10));
        assert_eq!(e.left, 1);
        assert_eq!(e.right, 4); // 10% of width
        assert_eq!(e.top, 5); // 50% of height
        assert_eq!(e.bottom, 0); // keyword resolves to zero
        assert_eq!(e.horizontal(), 5);
        assert_eq!(e.vertical(), 5);
    }

    #[test]
    fn test_spacing_uniform() {
        let e = Spacing::chars(2).resolve(Size::new(10, 10));
        assert_eq!(e, Edges { left: 2, right: 2, top: 2, bottom: 2 });
    }
}
