//! Vertical flow state
//!
//! Layout keeps exactly two kinds of state: the running page cursor, and
//! inside a two-column section a pair of independent column cursors.

use crate::render::FlowSizing;

/// Running vertical offset down the page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutCursor {
    y: f32,
}

impl LayoutCursor {
    pub fn new(top: f32) -> Self {
        Self { y: top }
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    /// Move down by a section's consumed height
    pub fn advance(&mut self, height: f32) {
        self.y += height.max(0.0);
    }
}

/// Horizontal extent of one column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    pub x: f32,
    pub width: f32,
}

impl Column {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Fixed-ratio split of the content width into a left and a right column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSplit {
    pub left: Column,
    pub right: Column,
}

impl ColumnSplit {
    /// Split `[x, x + width]` with `ratio` of the usable width on the left
    pub fn new(x: f32, width: f32, ratio: f32, gap: f32) -> Self {
        let usable = (width - gap).max(0.0);
        let left_width = usable * ratio.clamp(0.0, 1.0);
        Self {
            left: Column { x, width: left_width },
            right: Column {
                x: x + left_width + gap,
                width: usable - left_width,
            },
        }
    }

    pub fn from_flow(x: f32, width: f32, flow: &FlowSizing) -> Self {
        Self::new(x, width, flow.left_column_ratio, flow.column_gap)
    }
}

/// Two independently advancing column offsets starting at the same top
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnCursor {
    top: f32,
    left: f32,
    right: f32,
}

impl ColumnCursor {
    pub fn new(top: f32) -> Self {
        Self { top, left: top, right: top }
    }

    pub fn left_y(&self) -> f32 {
        self.left
    }

    pub fn right_y(&self) -> f32 {
        self.right
    }

    pub fn advance_left(&mut self, height: f32) {
        self.left += height.max(0.0);
    }

    pub fn advance_right(&mut self, height: f32) {
        self.right += height.max(0.0);
    }

    /// Height of the taller column
    pub fn height(&self) -> f32 {
        (self.left - self.top).max(self.right - self.top)
    }
}
