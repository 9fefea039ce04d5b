//! Roster records read from the payroll sheet.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The position of a salaried staff member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    /// Beauty therapist; shares the staff pool.
    BeautyTherapist,
    /// Nurse; shares the staff pool and receives license/attendance allowances.
    Nurse,
    /// Front desk; paid store-level conditional bonuses instead of a pool share.
    FrontDesk,
}

impl Position {
    /// Returns true if the position draws on the staff share of the pools.
    ///
    /// # Examples
    ///
    /// ```
    /// use salon_payroll::models::Position;
    ///
    /// assert!(Position::Nurse.shares_staff_pool());
    /// assert!(!Position::FrontDesk.shares_staff_pool());
    /// ```
    pub fn shares_staff_pool(self) -> bool {
        matches!(self, Position::BeautyTherapist | Position::Nurse)
    }
}

/// Which personal bracket tables apply to a consultant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// The store manager.
    Manager,
    /// Any other consultant.
    Consultant,
}

/// A consultant row from the payroll sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsultantRecord {
    /// The consultant's name (trimmed).
    pub name: String,
    /// Personal performance for the month.
    pub personal_performance: Decimal,
    /// Personal consumption for the month.
    pub personal_consumption: Decimal,
    /// One-based spreadsheet row the record came from.
    pub source_row: usize,
}

/// A salaried staff member from one of the staff blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffRecord {
    /// The staff member's name (trimmed).
    pub name: String,
    /// The staff member's position.
    pub position: Position,
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Skill bonus for the month.
    pub skill_bonus: Decimal,
    /// One-based spreadsheet row the record came from.
    pub source_row: usize,
}
