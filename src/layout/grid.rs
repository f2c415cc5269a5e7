//! Grid track resolution and placement.
//!
//! A grid declares its columns and rows up front as two [`TrackList`]s.
//! Fixed tracks (chars, pixels, percent) resolve immediately against the
//! grid's content extent; whatever the fixed tracks leave over is shared
//! evenly among the auto tracks, with the leading auto tracks absorbing the
//! remainder one cell each. Cell rectangles fall out of the prefix sums.
//!
//! Degenerate configurations are rejected where they are introduced: an
//! axis cannot be empty, and an explicit [`GridArea`] must name tracks that
//! exist. By the time layout runs, placement cannot fail; areas that still
//! manage to be stale (a track list shrank after the area was set) are
//! clamped instead.

use crate::error::LayoutError;
use crate::geometry::Dimension;

// =============================================================================
// GridArea
// =============================================================================

/// A child's placement in grid coordinates: half-open track ranges
/// `col_start..col_end` and `row_start..row_end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridArea {
    pub col_start: u16,
    pub col_end: u16,
    pub row_start: u16,
    pub row_end: u16,
}

impl GridArea {
    pub const fn new(col_start: u16, col_end: u16, row_start: u16, row_end: u16) -> Self {
        Self {
            col_start,
            col_end,
            row_start,
            row_end,
        }
    }

    /// A single-cell area.
    pub const fn cell(col: u16, row: u16) -> Self {
        Self {
            col_start: col,
            col_end: col + 1,
            row_start: row,
            row_end: row + 1,
        }
    }

    /// Check the area against a track table of `cols` x `rows`.
    pub fn validate(&self, cols: u16, rows: u16) -> Result<(), LayoutError> {
        if self.col_end <= self.col_start || self.row_end <= self.row_start {
            return Err(LayoutError::EmptyArea {
                col_start: self.col_start,
                col_end: self.col_end,
                row_start: self.row_start,
                row_end: self.row_end,
            });
        }
        if self.col_end > cols || self.row_end > rows {
            return Err(LayoutError::AreaOutOfBounds {
                col_start: self.col_start,
                col_end: self.col_end,
                row_start: self.row_start,
                row_end: self.row_end,
                cols,
                rows,
            });
        }
        Ok(())
    }

    /// Force the area inside a `cols` x `rows` table, keeping at least one
    /// cell. Both axes must be non-empty (guaranteed by [`TrackList::new`]).
    pub(crate) fn clamped(&self, cols: u16, rows: u16) -> GridArea {
        let col_start = self.col_start.min(cols - 1);
        let row_start = self.row_start.min(rows - 1);
        GridArea {
            col_start,
            col_end: self.col_end.clamp(col_start + 1, cols),
            row_start,
            row_end: self.row_end.clamp(row_start + 1, rows),
        }
    }
}

// =============================================================================
// TrackList
// =============================================================================

/// The declared tracks of one grid axis.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackList {
    tracks: Vec<Dimension>,
}

impl TrackList {
    /// Build a track list. An empty axis has no meaningful layout and is
    /// rejected here, so every constructed grid can place children.
    pub fn new(tracks: Vec<Dimension>) -> Result<Self, LayoutError> {
        if tracks.is_empty() {
            return Err(LayoutError::EmptyTracks);
        }
        Ok(Self { tracks })
    }

    /// Number of tracks, always at least one.
    #[inline]
    pub fn count(&self) -> u16 {
        self.tracks.len().min(u16::MAX as usize) as u16
    }

    #[inline]
    pub fn tracks(&self) -> &[Dimension] {
        &self.tracks
    }

    /// Append a track to the end of the axis.
    pub fn push(&mut self, track: Dimension) {
        self.tracks.push(track);
    }

    /// Remove and return the track at `index`.
    ///
    /// The last remaining track cannot be removed; an axis is never empty.
    pub fn remove(&mut self, index: usize) -> Result<Dimension, LayoutError> {
        if index >= self.tracks.len() {
            return Err(LayoutError::TrackOutOfBounds {
                index,
                len: self.tracks.len(),
            });
        }
        if self.tracks.len() == 1 {
            return Err(LayoutError::EmptyTracks);
        }
        Ok(self.tracks.remove(index))
    }

    /// Resolve every track to a cell count against the grid's content
    /// extent on this axis.
    ///
    /// Fixed tracks keep their resolved size even when they overflow
    /// `available`; auto tracks share what is left, leading tracks taking
    /// one extra cell each until the remainder is used up.
    pub fn resolve(&self, available: u16) -> Vec<u16> {
        let mut sizes = vec![0u16; self.tracks.len()];
        let mut fixed_total = 0u64;
        let mut auto = Vec::new();

        for (i, dim) in self.tracks.iter().enumerate() {
            match dim.resolve(available) {
                Some(v) => {
                    sizes[i] = v;
                    fixed_total += v as u64;
                }
                None => auto.push(i),
            }
        }

        if !auto.is_empty() {
            let pool = (available as u64).saturating_sub(fixed_total) as u16;
            let share = pool / auto.len() as u16;
            let extra = pool % auto.len() as u16;
            for (j, &i) in auto.iter().enumerate() {
                sizes[i] = share + u16::from((j as u16) < extra);
            }
        }

        sizes
    }
}

/// Prefix sums over track sizes: `offsets[k]` is where track `k` starts,
/// and the final entry is the axis total.
pub fn track_offsets(sizes: &[u16]) -> Vec<u16> {
    let mut offsets = Vec::with_capacity(sizes.len() + 1);
    let mut acc = 0u16;
    offsets.push(0);
    for &s in sizes {
        acc = acc.saturating_add(s);
        offsets.push(acc);
    }
    offsets
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn tracks(dims: Vec<Dimension>) -> TrackList {
        TrackList::new(dims).unwrap()
    }

    #[test]
    fn test_empty_axis_rejected() {
        assert!(matches!(
            TrackList::new(Vec::new()),
            Err(LayoutError::EmptyTracks)
        ));
    }

    #[test]
    fn test_fixed_tracks_resolve_immediately() {
        let t = tracks(vec![Dimension::Chars(10), Dimension::Percent(50.0)]);
        assert_eq!(t.resolve(40), vec![10, 20]);
    }

    #[test]
    fn test_auto_track_takes_remainder() {
        let t = tracks(vec![
            Dimension::Chars(10),
            Dimension::Chars(10),
            Dimension::Auto,
        ]);
        assert_eq!(t.resolve(50), vec![10, 10, 30]);
    }

    #[test]
    fn test_auto_tracks_share_evenly_leading_take_extra() {
        let t = tracks(vec![Dimension::Auto, Dimension::Auto, Dimension::Auto]);
        assert_eq!(t.resolve(10), vec![4, 3, 3]);
        assert_eq!(t.resolve(11), vec![4, 4, 3]);
        assert_eq!(t.resolve(12), vec![4, 4, 4]);
    }

    #[test]
    fn test_overflowing_fixed_tracks_leave_autos_empty() {
        let t = tracks(vec![
            Dimension::Chars(30),
            Dimension::Chars(30),
            Dimension::Auto,
        ]);
        assert_eq!(t.resolve(40), vec![30, 30, 0]);
    }

    #[test]
    fn test_track_offsets_are_prefix_sums() {
        assert_eq!(track_offsets(&[10, 10, 30]), vec![0, 10, 20, 50]);
        assert_eq!(track_offsets(&[]), vec![0]);
    }

    #[test]
    fn test_track_push_and_remove() {
        let mut t = tracks(vec![Dimension::Chars(10), Dimension::Auto]);
        t.push(Dimension::Chars(5));
        assert_eq!(t.count(), 3);
        assert_eq!(t.remove(2).unwrap(), Dimension::Chars(5));

        assert!(matches!(
            t.remove(7),
            Err(LayoutError::TrackOutOfBounds { index: 7, len: 2 })
        ));

        t.remove(0).unwrap();
        assert!(matches!(t.remove(0), Err(LayoutError::EmptyTracks)));
    }

    #[test]
    fn test_area_validate() {
        assert!(GridArea::cell(1, 1).validate(2, 2).is_ok());
        assert!(GridArea::new(0, 3, 0, 1).validate(3, 2).is_ok());

        assert!(matches!(
            GridArea::new(2, 2, 0, 1).validate(3, 2),
            Err(LayoutError::EmptyArea { .. })
        ));
        assert!(matches!(
            GridArea::new(0, 4, 0, 1).validate(3, 2),
            Err(LayoutError::AreaOutOfBounds { cols: 3, .. })
        ));
        assert!(matches!(
            GridArea::cell(0, 5).validate(3, 2),
            Err(LayoutError::AreaOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_area_clamped_stays_in_table() {
        let a = GridArea::new(5, 9, 0, 1).clamped(3, 2);
        assert_eq!(a, GridArea::new(2, 3, 0, 1));

        let b = GridArea::new(0, 9, 4, 9).clamped(3, 2);
        assert_eq!(b, GridArea::new(0, 3, 1, 2));
    }
}
