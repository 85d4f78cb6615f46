//! Table - Grid container with per-axis EXPAND/FILL options
//!
//! Children are attached to a rectangle of grid cells. Column widths and
//! row heights come from the largest child requisition in each track;
//! leftover (or missing) space is split across tracks flagged EXPAND.
//!
//! # API
//!
//! - `attach` / `attach_with` / `try_attach` - Add a child to a cell span
//! - `set_column_spacings` / `set_row_spacings` - Uniform spacing
//! - `set_column_spacing` / `set_row_spacing` - Spacing for one track
//! - `remove` / `clear` - Drop cells (tracks keep their count)
//! - `columns` / `rows` - Track snapshots after the last pass
//!
//! # Spanning
//!
//! A cell covering several columns or rows grows the track arrays to fit,
//! but its requisition and geometry only use its origin column and row.
//!
//! # Example
//!
//! ```ignore
//! use spark_desk::layout::{AttachOptions, Table};
//! use spark_desk::types::{CellSpan, Vec2};
//!
//! let table = Table::new();
//! table.attach(
//!     button,
//!     CellSpan::single(0, 0),
//!     AttachOptions::FILL | AttachOptions::EXPAND,
//!     AttachOptions::FILL,
//!     Vec2::new(2.0, 2.0),
//! );
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

use super::track::{self, AxisTrack};
use crate::engine::{same_widget, WeakWidget, Widget, WidgetCore, WidgetRef};
use crate::error::TableError;
use crate::renderer::RenderTarget;
use crate::state::event::Event;
use crate::types::{CellSpan, FloatRect, Vec2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// =============================================================================
// OPTIONS
// =============================================================================

bitflags::bitflags! {
    /// Per-axis attach options. Combine with bitwise OR:
    /// `AttachOptions::FILL | AttachOptions::EXPAND`.
    ///
    /// The empty set means the child keeps its requisition and the track
    /// never grows past it.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct AttachOptions: u8 {
        /// The track takes a share of any extra space.
        const EXPAND = 1 << 0;
        /// The child stretches to the track allocation.
        const FILL = 1 << 1;
        /// Accepted for compatibility; no effect beyond the default.
        const SHRINK = 1 << 2;
    }
}

/// Options for [`Table::attach_with`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CellOptions {
    pub x_options: AttachOptions,
    pub y_options: AttachOptions,
    pub padding: Vec2,
}

impl Default for CellOptions {
    fn default() -> Self {
        Self {
            x_options: AttachOptions::FILL | AttachOptions::EXPAND,
            y_options: AttachOptions::FILL | AttachOptions::EXPAND,
            padding: Vec2::ZERO,
        }
    }
}

#[derive(Clone)]
struct TableCell {
    child: WidgetRef,
    span: CellSpan,
    x_options: AttachOptions,
    y_options: AttachOptions,
    padding: Vec2,
}

// =============================================================================
// TABLE
// =============================================================================

/// Grid container.
pub struct Table {
    core: WidgetCore,
    this: Weak<Table>,
    cells: RefCell<Vec<TableCell>>,
    columns: RefCell<Vec<AxisTrack>>,
    rows: RefCell<Vec<AxisTrack>>,
}

impl Table {
    pub fn new() -> Rc<Self> {
        Rc::new_cyclic(|this| Self {
            core: WidgetCore::new(),
            this: this.clone(),
            cells: RefCell::new(Vec::new()),
            columns: RefCell::new(Vec::new()),
            rows: RefCell::new(Vec::new()),
        })
    }

    // -------------------------------------------------------------------------
    // Attaching
    // -------------------------------------------------------------------------

    /// Attach `widget` to `span`.
    ///
    /// # Panics
    ///
    /// If `span` covers zero columns or zero rows.
    pub fn attach(
        &self,
        widget: WidgetRef,
        span: CellSpan,
        x_options: AttachOptions,
        y_options: AttachOptions,
        padding: Vec2,
    ) {
        if let Err(err) = self.try_attach(widget, span, x_options, y_options, padding) {
            panic!("{err}");
        }
    }

    /// Attach with an options struct. Panics like [`Table::attach`].
    pub fn attach_with(&self, widget: WidgetRef, span: CellSpan, options: CellOptions) {
        self.attach(
            widget,
            span,
            options.x_options,
            options.y_options,
            options.padding,
        );
    }

    /// Attach `widget` to `span`, rejecting empty spans.
    pub fn try_attach(
        &self,
        widget: WidgetRef,
        span: CellSpan,
        x_options: AttachOptions,
        y_options: AttachOptions,
        padding: Vec2,
    ) -> Result<(), TableError> {
        if span.is_empty() {
            return Err(TableError::EmptySpan {
                columns: span.columns,
                rows: span.rows,
            });
        }

        grow(&mut self.columns.borrow_mut(), span.column_end());
        grow(&mut self.rows.borrow_mut(), span.row_end());

        let parent: WeakWidget = self.this.clone();
        widget.core().set_parent(Some(parent));

        self.cells.borrow_mut().push(TableCell {
            child: widget,
            span,
            x_options,
            y_options,
            padding,
        });

        trace!(
            ?span,
            columns = self.column_count(),
            rows = self.row_count(),
            "table: attached cell"
        );

        self.request_size();
        Ok(())
    }

    /// Detach every cell holding `widget`. Returns false if it was not
    /// attached. Track counts are kept.
    pub fn remove(&self, widget: WidgetRef) -> bool {
        let removed = {
            let mut cells = self.cells.borrow_mut();
            let before = cells.len();
            cells.retain(|cell| !same_widget(&cell.child, &widget));
            before != cells.len()
        };

        if !removed {
            return false;
        }

        widget.core().set_parent(None);
        self.request_size();
        true
    }

    /// Detach every cell. Track counts are kept.
    pub fn clear(&self) {
        let cells = std::mem::take(&mut *self.cells.borrow_mut());
        for cell in &cells {
            cell.child.core().set_parent(None);
        }
        self.request_size();
    }

    // -------------------------------------------------------------------------
    // Spacing
    // -------------------------------------------------------------------------

    /// Set the spacing of every existing column.
    pub fn set_column_spacings(&self, spacing: f32) {
        for column in self.columns.borrow_mut().iter_mut() {
            column.spacing = spacing;
        }
        self.request_size();
    }

    /// Set the spacing of every existing row.
    pub fn set_row_spacings(&self, spacing: f32) {
        for row in self.rows.borrow_mut().iter_mut() {
            row.spacing = spacing;
        }
        self.request_size();
    }

    /// Set the spacing of one column. Out-of-range indices are ignored.
    pub fn set_column_spacing(&self, index: usize, spacing: f32) {
        if !set_spacing(&self.columns, index, spacing) {
            return;
        }
        self.request_size();
    }

    /// Set the spacing of one row. Out-of-range indices are ignored.
    pub fn set_row_spacing(&self, index: usize, spacing: f32) {
        if !set_spacing(&self.rows, index, spacing) {
            return;
        }
        self.request_size();
    }

    // -------------------------------------------------------------------------
    // Inspection
    // -------------------------------------------------------------------------

    pub fn column_count(&self) -> usize {
        self.columns.borrow().len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.borrow().len()
    }

    pub fn cell_count(&self) -> usize {
        self.cells.borrow().len()
    }

    /// Column tracks from the most recent requisition or allocation pass.
    /// After a bare `requisition()` only `requisition` and `expand` are
    /// current.
    pub fn columns(&self) -> Vec<AxisTrack> {
        self.columns.borrow().clone()
    }

    /// Row tracks from the most recent requisition or allocation pass.
    pub fn rows(&self) -> Vec<AxisTrack> {
        self.rows.borrow().clone()
    }

    // -------------------------------------------------------------------------
    // Layout passes
    // -------------------------------------------------------------------------

    // Children are called without any of our borrows held.
    fn cells_snapshot(&self) -> Vec<TableCell> {
        self.cells.borrow().clone()
    }

    /// Recompute every track's requisition and expand flag from the
    /// children's current requisitions.
    fn update_requisitions(&self, cells: &[TableCell], requisitions: &[Vec2]) {
        let mut columns = self.columns.borrow_mut();
        let mut rows = self.rows.borrow_mut();

        track::reset_tracks(&mut columns);
        track::reset_tracks(&mut rows);

        for (cell, requisition) in cells.iter().zip(requisitions) {
            track::request(
                &mut columns[cell.span.column as usize],
                requisition.x,
                cell.padding.x,
                cell.x_options.contains(AttachOptions::EXPAND),
            );
            track::request(
                &mut rows[cell.span.row as usize],
                requisition.y,
                cell.padding.y,
                cell.y_options.contains(AttachOptions::EXPAND),
            );
        }
    }

    /// Resolve track geometry for the current allocation and hand every
    /// child its rectangle.
    fn allocate_children_sizes(&self) {
        let allocation = self.allocation();
        let cells = self.cells_snapshot();
        let requisitions: Vec<Vec2> = cells.iter().map(|cell| cell.child.requisition()).collect();

        self.update_requisitions(&cells, &requisitions);

        if let Some(extra) = track::distribute(&mut self.columns.borrow_mut(), allocation.width) {
            if extra < 0.0 {
                debug!(extra, width = allocation.width, "table: columns overflow allocation");
            }
        }
        if let Some(extra) = track::distribute(&mut self.rows.borrow_mut(), allocation.height) {
            if extra < 0.0 {
                debug!(extra, height = allocation.height, "table: rows overflow allocation");
            }
        }

        let columns = self.columns();
        let rows = self.rows();

        for (cell, requisition) in cells.iter().zip(requisitions) {
            let column = &columns[cell.span.column as usize];
            let row = &rows[cell.span.row as usize];

            let width = if cell.x_options.contains(AttachOptions::FILL) {
                column.allocation - column.spacing - 2.0 * cell.padding.x
            } else {
                requisition.x
            };
            let height = if cell.y_options.contains(AttachOptions::FILL) {
                row.allocation - row.spacing - 2.0 * cell.padding.y
            } else {
                requisition.y
            };

            cell.child.allocate_size(FloatRect::new(
                allocation.left + column.position + cell.padding.x,
                allocation.top + row.position + cell.padding.y,
                width,
                height,
            ));
        }

        trace!(
            cells = cells.len(),
            columns = columns.len(),
            rows = rows.len(),
            "table: allocated children"
        );
    }
}

fn grow(tracks: &mut Vec<AxisTrack>, len: usize) {
    if len > tracks.len() {
        tracks.resize(len, AxisTrack::default());
    }
}

fn set_spacing(tracks: &RefCell<Vec<AxisTrack>>, index: usize, spacing: f32) -> bool {
    match tracks.borrow_mut().get_mut(index) {
        Some(track) => {
            track.spacing = spacing;
            true
        }
        None => false,
    }
}

// =============================================================================
// WIDGET IMPL
// =============================================================================

impl Widget for Table {
    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn requisition(&self) -> Vec2 {
        let cells = self.cells_snapshot();
        let requisitions: Vec<Vec2> = cells.iter().map(|cell| cell.child.requisition()).collect();

        self.update_requisitions(&cells, &requisitions);

        Vec2::new(
            track::total_requisition(&self.columns.borrow()),
            track::total_requisition(&self.rows.borrow()),
        )
    }

    fn allocate_size(&self, rect: FloatRect) {
        self.core.set_allocation(rect);
        self.allocate_children_sizes();
    }

    fn handle_event(&self, event: &Event) {
        for cell in self.cells_snapshot() {
            cell.child.handle_event(event);
        }
        self.core.handle_event(event);
    }

    fn expose(&self, target: &mut dyn RenderTarget) {
        for cell in self.cells_snapshot() {
            cell.child.expose(target);
        }
        self.core.clear_invalidated();
    }

    fn children(&self) -> Option<Vec<WidgetRef>> {
        Some(
            self.cells
                .borrow()
                .iter()
                .map(|cell| cell.child.clone())
                .collect(),
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================
