//! # weft-tui
//!
//! Terminal UI toolkit with a memoizing constraint-layout engine.
//!
//! ## Architecture
//!
//! A tree of elements (flow and grid containers, point lists, text and image
//! leaves) answers three sizing questions — smallest workable size, ideal
//! size, and final size at a concrete grant — and paints itself onto a cell
//! [`Canvas`]. A diff presenter then turns the canvas into minimal ANSI
//! output:
//!
//! ```text
//! Element tree → min/max/render sizing → Canvas → DiffPresenter → terminal
//! ```
//!
//! Every element memoizes one layout per sizing phase, keyed by the parent
//! size it was asked about, and is invalidated through weak parent links when
//! its subtree changes, so a frame recomputes only what moved.
//!
//! ## Modules
//!
//! - [`geometry`] - Core measures (Point, Size, Rect, Dimension, Spacing)
//! - [`layout`] - Constraint resolver, layout cache, flow/grid algorithms
//! - [`element`] - The element tree: flow, grid, list, text, image
//! - [`style`] - Per-element sizing, spacing, colors, borders
//! - [`canvas`] - Cell grid with clipped drawing
//! - [`text`] - Width measurement, wrapping, alignment
//! - [`render`] - ANSI escapes, frame diffing, sixel encoding
//! - [`terminal`] - Raw-mode session and input events
//! - [`types`] - Colors, cells, attributes, border glyphs
//! - [`error`] - Structural errors

pub mod canvas;
pub mod element;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod render;
pub mod style;
pub mod terminal;
pub mod text;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use canvas::Canvas;
pub use element::{Bitmap, Element, ListMarker};
pub use error::LayoutError;
pub use geometry::{Dimension, Edges, Point, Rect, Size, Spacing};
pub use layout::{ChildrenLayout, ElementLayout, GridArea, LayoutCache, Phase, TrackList};
pub use render::{DiffPresenter, OutputBuffer, StatefulCellRenderer};
pub use style::Style;
pub use terminal::{
    poll_event, read_event, InputEvent, Key, KeyEvent, Modifiers, MouseAction, MouseButton,
    MouseEvent, Terminal,
};
pub use text::Typesetter;
