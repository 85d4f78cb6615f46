//! # spark-desk
//!
//! Retained-mode widget toolkit core: a table layout container and a
//! desktop that routes input to a z-ordered stack of widgets.
//!
//! ## Architecture
//!
//! Widgets are `Rc<dyn Widget>` trees. Parents own children; children point
//! back through `Weak`. Layout is negotiated, not computed globally:
//! ```text
//! child.request_size() → ... → root.allocate_size() → Table lays out children
//! Event → Desktop (front-to-back hit test) → Widget::handle_event → signals
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Geometry and color (Vec2, FloatRect, CellSpan, View, Rgba)
//! - [`engine`] - Widget trait, WidgetCore, Signal
//! - [`layout`] - Table container and its track algorithm
//! - [`state`] - Events, the Desktop router, crossterm input bridge
//! - [`primitives`] - Leaf widgets (Button)
//! - [`renderer`] - Draw target abstraction and a recording target
//! - [`error`] - Error types

pub mod engine;
pub mod error;
pub mod layout;
pub mod primitives;
pub mod renderer;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use engine::{
    same_widget, ConnectionId, Signal, WeakWidget, Widget, WidgetCore, WidgetRef, WidgetState,
};

pub use error::TableError;

pub use layout::{AttachOptions, AxisTrack, CellOptions, Table};

pub use primitives::{Button, ButtonStyle};

pub use renderer::{DrawCommand, FrameRecorder, RenderTarget};

pub use state::{Desktop, Event, KeyEvent, Modifiers, MouseButton, OUTSIDE_POSITION};
