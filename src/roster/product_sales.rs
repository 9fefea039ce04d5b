//! Product-sale event tally.

use crate::models::{ProductSaleTally, Sheet};

use super::CellSchema;

/// Counts product-sale events across every sheet.
///
/// A row from `schema.product_first_row` onward is an event when its
/// marker cell, trimmed, equals `schema.product_marker`. The event is
/// credited to the identifier in the consultant column; events with a
/// blank identifier are dropped.
pub fn tally_product_sales(sheets: &[Sheet], schema: &CellSchema) -> ProductSaleTally {
    let mut tally = ProductSaleTally::new();

    for sheet in sheets {
        let grid = &sheet.rows;
        for row in schema.product_first_row..grid.row_count() {
            let is_event = grid
                .cell(row, schema.product_marker_col)
                .text()
                .is_some_and(|marker| marker == schema.product_marker);
            if !is_event {
                continue;
            }
            if let Some(identifier) = grid.cell(row, schema.product_consultant_col).text() {
                tally.record(identifier);
            }
        }
    }

    tally
}
