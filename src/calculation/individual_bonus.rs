//! Personal bracket bonuses for consultants.

use rust_decimal::Decimal;

use crate::config::{BracketTables, IncentiveRules};
use crate::models::{
    AuditStep, ConsultantBonus, IndividualBonus, Role, StoreFigures, checked_total,
};

use super::progressive_bonus;

/// The result of the individual bonus calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct IndividualBonusResult {
    /// Personal bonuses per consultant, in roster order.
    pub bonuses: Vec<IndividualBonus>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Inputs shared by every consultant's individual bonus.
#[derive(Debug, Clone, Copy)]
pub struct IndividualBonusContext<'a> {
    /// Name of the store manager, if there is one.
    pub manager: Option<&'a str>,
    /// Store-wide figures.
    pub store: &'a StoreFigures,
    /// The store high target, if one is set.
    pub high_target_amount: Option<Decimal>,
}

/// Returns the role of a consultant given the configured manager name.
pub fn role_for(name: &str, manager: Option<&str>) -> Role {
    match manager {
        Some(manager) if manager.trim() == name.trim() => Role::Manager,
        _ => Role::Consultant,
    }
}

/// Applies the personal bracket tables to each consultant.
///
/// The manager's tables are used for the consultant whose name matches the
/// manager, the consultant tables for everyone else. Performance and
/// consumption are bracketed independently.
///
/// The flat incentive is paid when personal performance reaches
/// `incentive.min_personal_performance` and the store reaches the high
/// target. Without a high target it is always zero. The incentive is
/// reported separately and is not part of [`IndividualBonus::monthly_total`].
pub fn calculate_individual_bonuses(
    consultant_bonuses: &[ConsultantBonus],
    context: IndividualBonusContext<'_>,
    brackets: &BracketTables,
    incentive: &IncentiveRules,
    step_number: u32,
) -> IndividualBonusResult {
    let store_achieved = context.store.reaches_high_target(context.high_target_amount);

    let bonuses: Vec<IndividualBonus> = consultant_bonuses
        .iter()
        .map(|consultant| {
            let role = role_for(&consultant.name, context.manager);
            let (performance_table, consumption_table) = match role {
                Role::Manager => (&brackets.manager_performance, &brackets.manager_consumption),
                Role::Consultant => (
                    &brackets.consultant_performance,
                    &brackets.consultant_consumption,
                ),
            };

            let earns_incentive = store_achieved
                && consultant.personal_performance >= incentive.min_personal_performance;

            IndividualBonus {
                name: consultant.name.clone(),
                role,
                individual_performance_bonus: progressive_bonus(
                    consultant.personal_performance,
                    performance_table,
                ),
                individual_consumption_bonus: progressive_bonus(
                    consultant.personal_consumption,
                    consumption_table,
                ),
                performance_incentive_bonus: if earns_incentive {
                    incentive.amount
                } else {
                    Decimal::ZERO
                },
            }
        })
        .collect();

    let incentive_count = bonuses
        .iter()
        .filter(|b| !b.performance_incentive_bonus.is_zero())
        .count();
    let manager_found = bonuses.iter().any(|b| b.role == Role::Manager);

    let audit_step = AuditStep {
        step_number,
        rule_id: "individual_bonus".to_string(),
        rule_name: "Individual Bonus".to_string(),
        input: serde_json::json!({
            "consultant_count": consultant_bonuses.len(),
            "manager": context.manager,
            "store_performance": context.store.performance.to_string(),
            "high_target_amount": context.high_target_amount.map(|t| t.to_string())
        }),
        output: serde_json::json!({
            "manager_found": manager_found,
            "store_achieved": store_achieved,
            "incentive_count": incentive_count,
            "monthly_total": checked_total(bonuses.iter().map(IndividualBonus::monthly_total))
                .map(|t| t.to_string())
        }),
        reasoning: format!(
            "Applied {} bracket tables; {} incentive(s) paid separately from the monthly total",
            if manager_found {
                "manager and consultant"
            } else {
                "consultant"
            },
            incentive_count
        ),
    };

    IndividualBonusResult {
        bonuses,
        audit_step,
    }
}
