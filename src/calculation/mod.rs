//! Calculation logic for the salon payroll engine.
//!
//! This module contains the progressive bracket calculator, product-sale
//! qualification, consultant and staff pool allocation, individual bracket
//! bonuses, the high-target bonus, salary assembly, and the pipeline that
//! runs them in order over a workbook.

mod consultant_pool;
mod high_target;
mod individual_bonus;
mod payroll_run;
mod product_bonus;
mod progressive_bonus;
mod salary;
mod staff_pool;

pub use consultant_pool::{ConsultantAllocation, allocate_consultant_bonus};
pub use high_target::{HighTargetResult, calculate_high_target_bonuses};
pub use individual_bonus::{
    IndividualBonusContext, IndividualBonusResult, calculate_individual_bonuses, role_for,
};
pub use payroll_run::{PayrollInput, resolve_sheet, run_payroll};
pub use product_bonus::{ProductQualificationResult, qualify_product_sales};
pub use progressive_bonus::{BracketSlice, progressive_bonus, progressive_bonus_breakdown};
pub use salary::{SalaryAssemblyResult, SalaryContext, assemble_salary};
pub use staff_pool::{StaffAllocation, allocate_staff_bonus};
