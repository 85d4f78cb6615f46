//! Axis tracks - One column or one row of a table
//!
//! The table runs the same one-dimensional algorithm on columns and on
//! rows, so it lives here as free functions over `&mut [AxisTrack]`.
//!
//! # Algorithm
//!
//! 1. **Reset**: requisition, allocation and expand cleared (spacing kept)
//! 2. **Request**: each cell raises its origin track's requisition to
//!    `content + spacing + 2 * padding` and ORs in its EXPAND flag
//! 3. **Distribute**: allocation = requisition, positions accumulate; the
//!    difference between available and requested space is split evenly
//!    across expanding tracks, shifting every later track

/// Sizing state for one column or row.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisTrack {
    /// Largest demand among cells whose origin is this track.
    pub requisition: f32,
    /// Final size after distribution.
    pub allocation: f32,
    /// Offset from the table origin.
    pub position: f32,
    /// Configured space reserved inside this track.
    pub spacing: f32,
    /// Any origin cell asked for EXPAND.
    pub expand: bool,
}

impl AxisTrack {
    fn reset(&mut self) {
        self.requisition = 0.0;
        self.allocation = 0.0;
        self.expand = false;
    }
}

/// Clear per-pass values on every track.
pub(crate) fn reset_tracks(tracks: &mut [AxisTrack]) {
    for track in tracks {
        track.reset();
    }
}

/// Account one cell's demand against its origin track.
pub(crate) fn request(track: &mut AxisTrack, content: f32, padding: f32, expand: bool) {
    track.requisition = track
        .requisition
        .max(content + track.spacing + 2.0 * padding);
    track.expand |= expand;
}

/// Sum of all requisitions.
pub(crate) fn total_requisition(tracks: &[AxisTrack]) -> f32 {
    tracks.iter().map(|track| track.requisition).sum()
}

/// Resolve allocations and positions for `available` space.
///
/// Returns the extra space each expanding track received, or `None` when no
/// track expands. The extra is negative when content overflows; tracks then
/// shrink below their requisition.
pub(crate) fn distribute(tracks: &mut [AxisTrack], available: f32) -> Option<f32> {
    let mut position = 0.0;
    let mut expanding = 0usize;

    for track in tracks.iter_mut() {
        track.allocation = track.requisition;
        track.position = position;
        position += track.allocation;

        if track.expand {
            expanding += 1;
        }
    }

    if expanding == 0 {
        return None;
    }

    // Running position now equals the summed requisitions
    let extra = (available - position) / expanding as f32;
    let mut shift = 0.0;

    for track in tracks.iter_mut() {
        track.position += shift;
        if track.expand {
            track.allocation += extra;
            shift += extra;
        }
    }

    Some(extra)
}

// =============================================================================
// TESTS
// =============================================================================
