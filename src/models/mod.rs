//! Core data models for the salon payroll engine.
//!
//! This module contains the tabular input model, the roster records read
//! from it, and every record derived by a payroll run.

mod bonus;
mod grid;
mod payroll_result;
mod roster;

pub use bonus::{
    ConsultantBonus, ExcludedAmount, HighTargetBonus, IndividualBonus, ProductBonus,
    ProductQualification, ProductSaleTally, SalaryComponent, SalaryLine, StaffPoolShare,
    StoreFigures, checked_total,
};
pub use grid::{Cell, CellRef, Grid, Sheet, Workbook};
pub use payroll_result::{AuditStep, AuditTrace, AuditWarning, ConsultantPools, PayrollResult};
pub use roster::{ConsultantRecord, Position, Role, StaffRecord};
