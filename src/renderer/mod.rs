//! Render target contract.
//!
//! Drawing is owned by the embedding application. Widgets only see a
//! [`RenderTarget`]: a current [`View`] plus a rectangle fill. The
//! [`FrameRecorder`] target keeps the calls in memory, for headless use and
//! tests.

use crate::types::{FloatRect, Rgba, View};

/// Something widgets can draw into.
pub trait RenderTarget {
    /// The view currently installed.
    fn view(&self) -> View;

    /// Install a view. Subsequent draws are in its coordinates.
    fn set_view(&mut self, view: View);

    /// Fill a rectangle with a solid color.
    fn fill_rect(&mut self, rect: FloatRect, color: Rgba);
}

/// A recorded draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    SetView(View),
    FillRect { rect: FloatRect, color: Rgba },
}

/// Headless render target that records every call.
#[derive(Debug, Default)]
pub struct FrameRecorder {
    view: View,
    commands: Vec<DrawCommand>,
}

impl FrameRecorder {
    pub fn new(view: View) -> Self {
        Self {
            view,
            commands: Vec::new(),
        }
    }

    /// All calls since creation or the last `clear`.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Only the filled rectangles, in draw order.
    pub fn fills(&self) -> Vec<FloatRect> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::FillRect { rect, .. } => Some(*rect),
                DrawCommand::SetView(_) => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl RenderTarget for FrameRecorder {
    fn view(&self) -> View {
        self.view
    }

    fn set_view(&mut self, view: View) {
        self.view = view;
        self.commands.push(DrawCommand::SetView(view));
    }

    fn fill_rect(&mut self, rect: FloatRect, color: Rgba) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_keeps_draw_order() {
        let mut target = FrameRecorder::new(View::default());
        let first = FloatRect::new(0.0, 0.0, 2.0, 2.0);
        let second = FloatRect::new(1.0, 1.0, 2.0, 2.0);

        target.fill_rect(first, Rgba::GRAY);
        target.set_view(View::new(FloatRect::new(5.0, 5.0, 10.0, 10.0)));
        target.fill_rect(second, Rgba::WHITE);

        assert_eq!(target.commands().len(), 3);
        assert_eq!(target.fills(), vec![first, second]);
        assert_eq!(target.view().viewport.left, 5.0);
    }

    #[test]
    fn test_clear_drops_commands_but_keeps_view() {
        let view = View::new(FloatRect::new(3.0, 4.0, 10.0, 10.0));
        let mut target = FrameRecorder::new(View::default());
        target.set_view(view);
        target.fill_rect(FloatRect::new(0.0, 0.0, 1.0, 1.0), Rgba::BLACK);

        target.clear();

        assert!(target.commands().is_empty());
        assert!(target.fills().is_empty());
        assert_eq!(target.view(), view);
    }
}
