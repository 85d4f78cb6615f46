//! Core types for spark-desk.
//!
//! Geometry and color values shared by the layout engine, the widget
//! contract and the desktop router. Everything here is `Copy`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// =============================================================================
// Vec2
// =============================================================================

/// A 2D vector in desktop units (pixels, or terminal cells for the
/// crossterm bridge).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new vector.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y))
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

// =============================================================================
// FloatRect
// =============================================================================

/// An axis-aligned rectangle: origin plus size.
///
/// Widths and heights may be negative when a table runs out of space;
/// `contains` normalizes the edges before testing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FloatRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl FloatRect {
    /// Create a rectangle from origin and size.
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Create a rectangle from an origin and a size vector.
    pub const fn from_parts(position: Vec2, size: Vec2) -> Self {
        Self::new(position.x, position.y, size.x, size.y)
    }

    /// Top-left corner.
    #[inline]
    pub const fn position(&self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }

    /// Width and height as a vector.
    #[inline]
    pub const fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Check whether a point lies inside. Left/top edges are inclusive,
    /// right/bottom edges exclusive.
    pub fn contains(&self, point: Vec2) -> bool {
        let (min_x, max_x) = ordered(self.left, self.left + self.width);
        let (min_y, max_y) = ordered(self.top, self.top + self.height);

        point.x >= min_x && point.x < max_x && point.y >= min_y && point.y < max_y
    }
}

#[inline]
fn ordered(a: f32, b: f32) -> (f32, f32) {
    if a <= b { (a, b) } else { (b, a) }
}

// =============================================================================
// CellSpan
// =============================================================================

/// Rectangle of grid cells a table child occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CellSpan {
    /// Origin column.
    pub column: u32,
    /// Origin row.
    pub row: u32,
    /// Number of columns covered (must be at least 1).
    pub columns: u32,
    /// Number of rows covered (must be at least 1).
    pub rows: u32,
}

impl CellSpan {
    /// Create a span. Validity is checked when the span is attached.
    pub const fn new(column: u32, row: u32, columns: u32, rows: u32) -> Self {
        Self {
            column,
            row,
            columns,
            rows,
        }
    }

    /// A single cell at `(column, row)`.
    pub const fn single(column: u32, row: u32) -> Self {
        Self::new(column, row, 1, 1)
    }

    /// One past the last column covered.
    #[inline]
    pub const fn column_end(&self) -> usize {
        self.column as usize + self.columns as usize
    }

    /// One past the last row covered.
    #[inline]
    pub const fn row_end(&self) -> usize {
        self.row as usize + self.rows as usize
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.columns == 0 || self.rows == 0
    }
}

// =============================================================================
// View
// =============================================================================

/// The region of desktop coordinates a render target is looking at.
///
/// The desktop installs its own view while exposing and restores the
/// previous one afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct View {
    pub viewport: FloatRect,
}

impl View {
    pub const fn new(viewport: FloatRect) -> Self {
        Self { viewport }
    }

    /// Translate a global (screen) position into view-local coordinates.
    #[inline]
    pub fn to_local(&self, global: Vec2) -> Vec2 {
        global - self.viewport.position()
    }
}

// =============================================================================
// Color
// =============================================================================

/// RGBA color with 8-bit channels (0-255).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Create a new RGBA color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const GRAY: Self = Self::rgb(128, 128, 128);
    pub const DARK_GRAY: Self = Self::rgb(64, 64, 64);
    pub const LIGHT_GRAY: Self = Self::rgb(192, 192, 192);
}

// =============================================================================
// TESTS
// =============================================================================
