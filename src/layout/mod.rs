//! The layout engine.
//!
//! Layout is organized around three sizing phases per element - minimum,
//! maximum and render - memoized per element in [`cache`] and all funneling
//! through the same pure box resolution in [`resolver`]. The phase protocol
//! itself (who asks whom, in what order) lives with the element tree in
//! [`crate::element`]; this module holds the math:
//!
//! - [`resolver`] - constraint resolution for a single box
//! - [`cache`] - keyed memoization slots and the phase enum
//! - [`flow`] - horizontal width distribution
//! - [`grid`] - track resolution and grid placement

pub mod cache;
pub mod flow;
pub mod grid;
pub mod resolver;

pub use cache::{CachedLayout, LayoutCache, Phase};
pub use flow::distribute_widths;
pub use grid::{track_offsets, GridArea, TrackList};
pub use resolver::{content_avail, resolve_box, BoxSpec, ChildrenLayout, ElementLayout};
