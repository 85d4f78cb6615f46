//! Layout Module - Grid sizing for container widgets
//!
//! # Architecture
//!
//! Layout is two-pass and driven by the widget tree itself:
//!
//! 1. A widget whose natural size changed calls `request_size`, which bubbles
//!    up through parents to the root
//! 2. The root re-allocates itself; every `Table` on the way down lays out
//!    its children from fresh requisitions
//!
//! - [`Table`] - The grid container
//! - [`AxisTrack`] - Per-column / per-row sizing state
//!
//! # Example
//!
//! ```ignore
//! use spark_desk::layout::{AttachOptions, Table};
//!
//! let table = Table::new();
//! table.set_column_spacings(1.0);
//! table.attach(label, CellSpan::single(0, 0), AttachOptions::FILL, AttachOptions::FILL, Vec2::ZERO);
//! table.attach(entry, CellSpan::single(1, 0), AttachOptions::FILL | AttachOptions::EXPAND, AttachOptions::FILL, Vec2::ZERO);
//! ```

mod table;
mod track;

pub use table::{AttachOptions, CellOptions, Table};
pub use track::AxisTrack;
