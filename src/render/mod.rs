//! Terminal presentation: turning a [`crate::canvas::Canvas`] into bytes.
//!
//! The pipeline is deliberately layered:
//!
//! - [`ansi`] writes individual escape sequences and knows nothing else.
//! - [`output`] batches bytes and elides escapes the terminal does not need.
//! - [`diff`] compares frames and presents only the cells that changed.
//! - [`sixel`] encodes bitmaps for terminals with pixel graphics support.

pub mod ansi;
pub mod diff;
pub mod output;
pub mod sixel;

pub use diff::DiffPresenter;
pub use output::{OutputBuffer, StatefulCellRenderer};
