//! Payroll result models.
//!
//! This module contains the [`PayrollResult`] type that captures every
//! output of one payroll run, together with the audit trace describing how
//! each figure was reached.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    ConsultantBonus, HighTargetBonus, IndividualBonus, ProductQualification, SalaryLine,
    StaffPoolShare, StoreFigures,
};

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate potential issues that don't prevent calculation
/// but may require attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a payroll run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The consultant share of the store-wide pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsultantPools {
    /// Consultant performance pool.
    pub performance_pool: Decimal,
    /// Consultant consumption pool.
    pub consumption_pool: Decimal,
}

/// The complete result of a payroll run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The worksheet the figures were read from.
    pub sheet_name: String,
    /// The pay month, when the sheet name encodes one.
    pub period: Option<NaiveDate>,
    /// Store-wide figures.
    pub store: StoreFigures,
    /// Product-sale results per consultant identifier.
    pub product_bonuses: ProductQualification,
    /// Consultant pools.
    pub consultant_pools: ConsultantPools,
    /// Pool shares per consultant.
    pub consultant_bonuses: Vec<ConsultantBonus>,
    /// Staff pool share, absent when the staff count is zero.
    pub staff_pool: Option<StaffPoolShare>,
    /// Personal bracket bonuses per consultant.
    pub individual_bonuses: Vec<IndividualBonus>,
    /// High-target flat bonuses per staff member.
    pub high_target_bonuses: Vec<HighTargetBonus>,
    /// Final salary lines per staff member.
    pub salary_lines: Vec<SalaryLine>,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

impl PayrollResult {
    /// Finds a salary line by staff name.
    pub fn salary_line(&self, name: &str) -> Option<&SalaryLine> {
        self.salary_lines.iter().find(|l| l.name == name)
    }

    /// Finds a consultant's pool shares by name.
    pub fn consultant_bonus(&self, name: &str) -> Option<&ConsultantBonus> {
        self.consultant_bonuses.iter().find(|b| b.name == name)
    }

    /// Finds a consultant's personal bonuses by name.
    pub fn individual_bonus(&self, name: &str) -> Option<&IndividualBonus> {
        self.individual_bonuses.iter().find(|b| b.name == name)
    }
}
