//! State Module - Input events and their routing
//!
//! - **Event** - Pointer, keyboard, text, resize and focus events
//! - **Desktop** - Z-ordered widget stack, event router, deferred removal
//! - **Input** - crossterm bridge (conversion, polling, mouse capture)

pub mod event;
mod desktop;
pub mod input;

pub use desktop::Desktop;
pub use event::{Event, KeyEvent, Modifiers, MouseButton, OUTSIDE_POSITION};
