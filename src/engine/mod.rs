//! Widget engine - The widget contract and its notification plumbing.
//!
//! - Widget: the trait every tree node implements, plus `WidgetCore`, the
//!   base state (allocation, parent, hover/press tracking, signals)
//! - Signal: callback registry used for all widget notifications
//!
//! # Ownership
//!
//! ```text
//! Desktop ──Rc──▶ top-level widget ──Rc──▶ child ... (strong, downwards)
//! child ──Weak──▶ parent                              (weak, upwards)
//! Desktop ──Weak──▶ last pointer receiver
//! ```

mod signal;
mod widget;

#[cfg(test)]
pub(crate) mod testing;

pub use signal::*;
pub use widget::*;
