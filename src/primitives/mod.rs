//! Primitives - Leaf widgets.
//!
//! - [`Button`] - Clickable rectangle with per-state colors

mod button;

pub use button::{Button, ButtonStyle};
