//! Layout engine
//!
//! Vertical flow, column splits, the adaptive score row and compact metric
//! lists. Every drawing entry point returns the height it consumed so the
//! caller can advance its cursor without reading back drawn output.

pub mod cursor;
pub mod metric_list;
pub mod score_row;

pub use cursor::{Column, ColumnCursor, ColumnSplit, LayoutCursor};
pub use metric_list::{draw_metric_list, draw_metric_row};
pub use score_row::{
    badge_block_height, badge_rects, circle_lefts, draw_score_row, plan_secondary_row, RowPlan,
};
