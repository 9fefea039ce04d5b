//! Staff roster extraction.

use crate::config::PositionTable;
use crate::models::{Grid, StaffRecord};

use super::CellSchema;

/// Extracts salaried staff from the fixed staff blocks.
///
/// Each block in `schema.staff_blocks` is scanned over its full row range;
/// a row is emitted only when its name cell is non-blank after trimming.
/// The base salary comes from the block's base salary column when the
/// block has one and the cell is not blank, otherwise from the position's
/// configured base salary. A missing skill bonus reads as zero.
///
/// An absent grid yields an empty list.
pub fn extract_staff(
    grid: Option<&Grid>,
    schema: &CellSchema,
    positions: &PositionTable,
) -> Vec<StaffRecord> {
    let Some(grid) = grid else {
        return Vec::new();
    };

    let mut staff = Vec::new();
    for block in schema.staff_blocks {
        let default_base = positions.get(block.position).base_salary;

        for row in block.rows.clone() {
            let Some(name) = grid.cell(row, block.name_col).text() else {
                continue;
            };

            let base_salary = match block.base_salary_col {
                Some(col) => grid.cell(row, col).number_or(default_base),
                None => default_base,
            };

            staff.push(StaffRecord {
                name,
                position: block.position,
                base_salary,
                skill_bonus: grid.cell(row, block.skill_bonus_col).number(),
                source_row: row + 1,
            });
        }
    }
    staff
}
