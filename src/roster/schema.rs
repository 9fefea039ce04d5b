//! Fixed cell layout of the payroll sheet.

use std::ops::Range;

use crate::models::{CellRef, Position};

/// A fixed block of staff rows feeding one position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffBlock {
    /// Position every person in the block holds.
    pub position: Position,
    /// Zero-based rows scanned, end exclusive.
    pub rows: Range<usize>,
    /// Name column.
    pub name_col: usize,
    /// Base salary column, if the block supplies one. Blocks without it
    /// use the position's configured base salary.
    pub base_salary_col: Option<usize>,
    /// Skill bonus column.
    pub skill_bonus_col: usize,
}

/// Every coordinate the engine reads, in one place.
///
/// All indices are zero-based. [`CellSchema::STANDARD`] is the layout of
/// the monthly report workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellSchema {
    /// Store performance total.
    pub store_performance: CellRef,
    /// Store consumption total.
    pub store_consumption: CellRef,
    /// First consultant row; scanning stops at the first blank name.
    pub consultant_first_row: usize,
    /// Consultant name column.
    pub consultant_name_col: usize,
    /// Consultant personal performance column.
    pub consultant_performance_col: usize,
    /// Consultant personal consumption column.
    pub consultant_consumption_col: usize,
    /// Consultant name that marks the house account row, which is skipped.
    pub house_account: &'static str,
    /// Staff blocks, read in order.
    pub staff_blocks: &'static [StaffBlock],
    /// First row scanned for product-sale events on every sheet.
    pub product_first_row: usize,
    /// Column holding the event marker.
    pub product_marker_col: usize,
    /// Column holding the consultant identifier.
    pub product_consultant_col: usize,
    /// Exact (trimmed) marker text of a product-sale event.
    pub product_marker: &'static str,
}

const STANDARD_STAFF_BLOCKS: &[StaffBlock] = &[
    // Column 11 carries a base salary in this block but it is not used.
    StaffBlock {
        position: Position::BeautyTherapist,
        rows: 8..15,
        name_col: 10,
        base_salary_col: None,
        skill_bonus_col: 12,
    },
    StaffBlock {
        position: Position::BeautyTherapist,
        rows: 8..15,
        name_col: 13,
        base_salary_col: Some(14),
        skill_bonus_col: 15,
    },
    StaffBlock {
        position: Position::Nurse,
        rows: 8..11,
        name_col: 16,
        base_salary_col: None,
        skill_bonus_col: 18,
    },
    StaffBlock {
        position: Position::FrontDesk,
        rows: 11..15,
        name_col: 16,
        base_salary_col: None,
        skill_bonus_col: 18,
    },
];

impl CellSchema {
    /// The monthly report layout.
    pub const STANDARD: CellSchema = CellSchema {
        store_performance: CellRef::new(4, 4),
        store_consumption: CellRef::new(6, 4),
        consultant_first_row: 8,
        consultant_name_col: 0,
        consultant_performance_col: 2,
        consultant_consumption_col: 6,
        house_account: "公司",
        staff_blocks: STANDARD_STAFF_BLOCKS,
        product_first_row: 16,
        product_marker_col: 5,
        product_consultant_col: 14,
        product_marker: "購產品",
    };
}

impl Default for CellSchema {
    fn default() -> Self {
        Self::STANDARD
    }
}
