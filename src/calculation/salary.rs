//! Salary assembly.
//!
//! Combines base pay, skill bonus, pool shares, the high-target bonus and
//! position allowances into one [`SalaryLine`] per staff member. Which
//! components count toward the monthly total depends on the position:
//!
//! | Position        | Counted                                                        | Reported, not counted                       |
//! |-----------------|----------------------------------------------------------------|---------------------------------------------|
//! | BeautyTherapist | base, skill                                                    | team bonuses, high target                   |
//! | Nurse           | base, skill, license                                           | team bonuses, high target, full attendance  |
//! | FrontDesk       | base, skill, high target, rank, position allowance, conditionals | -                                         |

use rust_decimal::Decimal;

use crate::config::{FrontDeskRules, PositionTable};
use crate::models::{
    AuditStep, ExcludedAmount, HighTargetBonus, Position, SalaryComponent, SalaryLine,
    StaffPoolShare, StaffRecord, StoreFigures, checked_total,
};

/// Run-wide figures every salary line draws on.
#[derive(Debug, Clone, Copy)]
pub struct SalaryContext<'a> {
    /// Store-wide figures.
    pub store: &'a StoreFigures,
    /// The store high target, if one is set.
    pub high_target_amount: Option<Decimal>,
    /// The staff pool share, if one was allocated.
    pub staff_pool: Option<&'a StaffPoolShare>,
    /// High-target bonuses awarded this run.
    pub high_target_bonuses: &'a [HighTargetBonus],
}

/// The result of salary assembly, including the audit step.
#[derive(Debug, Clone)]
pub struct SalaryAssemblyResult {
    /// One line per staff member, in roster order.
    pub lines: Vec<SalaryLine>,
    /// Names of staff whose monthly total left the `Decimal` range. Their
    /// total is reported as zero.
    pub overflowed: Vec<String>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

const BEAUTY_THERAPIST_EXCLUDED: &[SalaryComponent] = &[
    SalaryComponent::TeamPerformanceBonus,
    SalaryComponent::TeamConsumptionBonus,
    SalaryComponent::HighTargetBonus,
];

const NURSE_EXCLUDED: &[SalaryComponent] = &[
    SalaryComponent::TeamPerformanceBonus,
    SalaryComponent::TeamConsumptionBonus,
    SalaryComponent::HighTargetBonus,
    SalaryComponent::FullAttendanceBonus,
];

/// Assembles a salary line for every staff member.
///
/// A monthly total too large to represent is reported as zero and the
/// member is listed in [`SalaryAssemblyResult::overflowed`].
pub fn assemble_salary(
    staff: &[StaffRecord],
    context: SalaryContext<'_>,
    positions: &PositionTable,
    front_desk: &FrontDeskRules,
    step_number: u32,
) -> SalaryAssemblyResult {
    let mut overflowed = Vec::new();
    let lines: Vec<SalaryLine> = staff
        .iter()
        .map(|member| {
            let (line, in_range) = salary_line(member, &context, positions, front_desk);
            if !in_range {
                overflowed.push(line.name.clone());
            }
            line
        })
        .collect();

    let counted = checked_total(lines.iter().map(|l| l.monthly_total));
    let excluded = checked_total(lines.iter().map(SalaryLine::excluded_total));

    let audit_step = AuditStep {
        step_number,
        rule_id: "salary_assembly".to_string(),
        rule_name: "Salary Assembly".to_string(),
        input: serde_json::json!({
            "staff_count": staff.len(),
            "store_performance": context.store.performance.to_string(),
            "store_consumption": context.store.consumption.to_string(),
            "high_target_amount": context.high_target_amount.map(|t| t.to_string()),
            "per_person_pool": context.staff_pool.map(|s| s.per_person_total().to_string())
        }),
        output: serde_json::json!({
            "lines": lines
                .iter()
                .map(|l| serde_json::json!({
                    "name": l.name,
                    "position": l.position,
                    "monthly_total": l.monthly_total.to_string(),
                    "excluded_total": l.excluded_total().to_string()
                }))
                .collect::<Vec<_>>(),
            "monthly_total": counted.map(|t| t.to_string()),
            "excluded_total": excluded.map(|t| t.to_string()),
            "overflowed": overflowed
        }),
        reasoning: format!(
            "Assembled {} salary line(s): {} counted, {} reported outside the monthly total",
            lines.len(),
            rounded_or_overflow(counted),
            rounded_or_overflow(excluded)
        ),
    };

    SalaryAssemblyResult {
        lines,
        overflowed,
        audit_step,
    }
}

fn salary_line(
    member: &StaffRecord,
    context: &SalaryContext<'_>,
    positions: &PositionTable,
    rules: &FrontDeskRules,
) -> (SalaryLine, bool) {
    let rates = positions.get(member.position);
    let target_reached = context.store.reaches_high_target(context.high_target_amount);

    let (team_performance_bonus, team_consumption_bonus) = match context.staff_pool {
        Some(pool) if member.position.shares_staff_pool() => {
            (pool.per_person_performance, pool.per_person_consumption)
        }
        _ => (Decimal::ZERO, Decimal::ZERO),
    };

    let high_target_bonus = context
        .high_target_bonuses
        .iter()
        .find(|b| b.name == member.name && b.position == member.position)
        .map_or(Decimal::ZERO, |b| b.bonus);

    let mut line = SalaryLine {
        name: member.name.clone(),
        position: member.position,
        source_row: member.source_row,
        base_salary: member.base_salary,
        skill_bonus: member.skill_bonus,
        team_performance_bonus,
        team_consumption_bonus,
        high_target_bonus,
        license_allowance: rates.license_allowance,
        full_attendance_bonus: rates.full_attendance_bonus,
        rank_bonus: rates.rank_bonus,
        position_allowance: rates.position_allowance,
        consumption_achievement_bonus: Decimal::ZERO,
        performance_milestone_bonus: Decimal::ZERO,
        store_incentive_bonus: Decimal::ZERO,
        monthly_total: Decimal::ZERO,
        excluded_from_total: Vec::new(),
    };

    let monthly_total = match member.position {
        Position::BeautyTherapist => {
            line.excluded_from_total = excluded_amounts(&line, BEAUTY_THERAPIST_EXCLUDED);
            checked_total([line.base_salary, line.skill_bonus])
        }
        Position::Nurse => {
            line.excluded_from_total = excluded_amounts(&line, NURSE_EXCLUDED);
            checked_total([line.base_salary, line.skill_bonus, line.license_allowance])
        }
        Position::FrontDesk => {
            if target_reached
                && context.store.consumption >= rules.consumption_achievement_min_consumption
            {
                line.consumption_achievement_bonus = rules.consumption_achievement_bonus;
            }
            if context.store.performance >= rules.performance_milestone {
                line.performance_milestone_bonus = rules.performance_milestone_bonus;
            }
            if target_reached {
                line.store_incentive_bonus = rules.store_incentive_bonus;
            }

            checked_total([
                line.base_salary,
                line.skill_bonus,
                line.high_target_bonus,
                line.rank_bonus,
                line.position_allowance,
                line.consumption_achievement_bonus,
                line.performance_milestone_bonus,
                line.store_incentive_bonus,
            ])
        }
    };

    line.monthly_total = monthly_total.unwrap_or(Decimal::ZERO);
    (line, monthly_total.is_some())
}

fn rounded_or_overflow(total: Option<Decimal>) -> String {
    total.map_or_else(|| "overflow".to_string(), |t| t.round_dp(2).to_string())
}

fn excluded_amounts(line: &SalaryLine, components: &[SalaryComponent]) -> Vec<ExcludedAmount> {
    components
        .iter()
        .map(|&component| ExcludedAmount {
            component,
            amount: line.component(component),
        })
        .filter(|e| !e.amount.is_zero())
        .collect()
}
