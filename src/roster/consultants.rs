//! Consultant roster and store figure extraction.

use crate::models::{ConsultantRecord, Grid, StoreFigures};

use super::CellSchema;

/// Reads the store-wide performance and consumption totals.
///
/// An absent grid yields zero figures.
pub fn read_store_figures(grid: Option<&Grid>, schema: &CellSchema) -> StoreFigures {
    match grid {
        Some(grid) => StoreFigures {
            performance: grid.at(schema.store_performance).number(),
            consumption: grid.at(schema.store_consumption).number(),
        },
        None => StoreFigures::default(),
    }
}

/// Extracts consultant records from the payroll sheet.
///
/// Rows are read from `schema.consultant_first_row` until the first blank
/// name. The house account row is skipped without ending the scan. Missing
/// performance or consumption cells read as zero.
///
/// An absent grid yields an empty list.
///
/// # Examples
///
/// ```
/// use salon_payroll::models::Grid;
/// use salon_payroll::roster::{CellSchema, extract_consultants};
///
/// let mut grid = Grid::default();
/// grid.set(8, 0, "Amy");
/// grid.set(8, 2, 1_500_000);
/// grid.set(9, 0, "公司");
/// grid.set(10, 0, "Bea");
///
/// let consultants = extract_consultants(Some(&grid), &CellSchema::STANDARD);
/// let names: Vec<_> = consultants.iter().map(|c| c.name.as_str()).collect();
/// assert_eq!(names, ["Amy", "Bea"]);
/// assert!(extract_consultants(None, &CellSchema::STANDARD).is_empty());
/// ```
pub fn extract_consultants(grid: Option<&Grid>, schema: &CellSchema) -> Vec<ConsultantRecord> {
    let Some(grid) = grid else {
        return Vec::new();
    };

    let mut consultants = Vec::new();
    for row in schema.consultant_first_row..grid.row_count() {
        let Some(name) = grid.cell(row, schema.consultant_name_col).text() else {
            break;
        };
        if name == schema.house_account {
            continue;
        }

        consultants.push(ConsultantRecord {
            name,
            personal_performance: grid.cell(row, schema.consultant_performance_col).number(),
            personal_consumption: grid.cell(row, schema.consultant_consumption_col).number(),
            source_row: row + 1,
        });
    }
    consultants
}
