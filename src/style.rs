//! Per-element style properties.
//!
//! A [`Style`] is a plain bag of typed values, one per element. There is no
//! cascade and no inheritance: every element owns exactly the properties that
//! apply to it, seeded from a per-kind default when the element is built and
//! overwritten directly afterwards.
//!
//! Mutations go through [`crate::element::Element::update_style`] so the
//! element's cached layout is invalidated; the fields themselves carry no
//! change tracking.

use crate::geometry::{Dimension, Spacing};
use crate::layout::grid::GridArea;
use crate::types::{Attr, BorderStyle, Position, Rgba};

/// The full set of style properties an element can carry.
///
/// Sizing fields are [`Dimension`]s: `Auto` means "unset" and lets the
/// element size from its content. `min_*`/`max_*` bounds that stay `Auto`
/// simply do not constrain.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub width: Dimension,
    pub height: Dimension,
    pub min_width: Dimension,
    pub max_width: Dimension,
    pub min_height: Dimension,
    pub max_height: Dimension,

    /// Space outside the border, counted into the element's overall size.
    pub margin: Spacing,
    /// Space between the border and the content box.
    pub padding: Spacing,

    /// Border glyph set; `None` draws no border and reserves no cells.
    pub border: Option<BorderStyle>,
    pub border_color: Rgba,

    pub fg: Rgba,
    /// Painted behind the element's border box. The default is transparent,
    /// which leaves whatever the parent drew untouched.
    pub bg: Rgba,
    pub attrs: Attr,

    pub position: Position,
    /// Offsets from the parent's content origin, used only when `position`
    /// is [`Position::Absolute`]. `Auto` means zero.
    pub left: Dimension,
    pub top: Dimension,

    /// Explicit grid placement; `None` auto-places row-major. Ignored outside
    /// grid parents.
    pub grid_area: Option<GridArea>,

    /// Sibling draw order: higher values draw later (on top). Does not affect
    /// layout.
    pub z_index: i16,
}

impl Style {
    fn base() -> Self {
        Self {
            width: Dimension::Auto,
            height: Dimension::Auto,
            min_width: Dimension::Auto,
            max_width: Dimension::Auto,
            min_height: Dimension::Auto,
            max_height: Dimension::Auto,
            margin: Spacing::ZERO,
            padding: Spacing::ZERO,
            border: None,
            border_color: Rgba::TERMINAL_DEFAULT,
            fg: Rgba::TERMINAL_DEFAULT,
            bg: Rgba::TRANSPARENT,
            attrs: Attr::NONE,
            position: Position::Relative,
            left: Dimension::Auto,
            top: Dimension::Auto,
            grid_area: None,
            z_index: 0,
        }
    }

    // =========================================================================
    // Per-kind defaults
    // =========================================================================

    /// Defaults for flow containers: size entirely from content.
    pub fn flow_default() -> Self {
        Self::base()
    }

    /// Defaults for grid containers: size from the track table.
    pub fn grid_default() -> Self {
        Self::base()
    }

    /// Defaults for lists: span the parent's width, grow with the entries.
    pub fn list_default() -> Self {
        Self {
            width: Dimension::Percent(100.0),
            ..Self::base()
        }
    }

    /// Defaults for text: span the parent's width so wrapping has room, grow
    /// downward with the lines.
    pub fn text_default() -> Self {
        Self {
            width: Dimension::Percent(100.0),
            ..Self::base()
        }
    }

    /// Defaults for images: natural bitmap size, shrunk to fit.
    pub fn image_default() -> Self {
        Self::base()
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::base()
    }
}
