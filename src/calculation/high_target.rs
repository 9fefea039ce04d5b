//! High-target flat bonus for pool staff.

use rust_decimal::Decimal;

use crate::config::PositionTable;
use crate::models::{AuditStep, HighTargetBonus, StaffRecord, StoreFigures};

/// The result of the high-target bonus calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct HighTargetResult {
    /// Bonuses awarded, in roster order. Empty when the target was missed.
    pub bonuses: Vec<HighTargetBonus>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Awards the position's high-target bonus when the store reaches the target.
///
/// Only positions with a non-zero configured amount are paid.
pub fn calculate_high_target_bonuses(
    staff: &[StaffRecord],
    store: &StoreFigures,
    high_target_amount: Option<Decimal>,
    positions: &PositionTable,
    step_number: u32,
) -> HighTargetResult {
    let achieved = store.reaches_high_target(high_target_amount);

    let bonuses: Vec<HighTargetBonus> = if achieved {
        staff
            .iter()
            .filter_map(|member| {
                let bonus = positions.get(member.position).high_target_bonus;
                (!bonus.is_zero()).then(|| HighTargetBonus {
                    name: member.name.clone(),
                    position: member.position,
                    bonus,
                })
            })
            .collect()
    } else {
        Vec::new()
    };

    let reasoning = match high_target_amount {
        None => "No high target set - no high-target bonuses".to_string(),
        Some(target) if achieved => format!(
            "Store performance {} reached target {} - {} bonus(es) awarded",
            store.performance, target, bonuses.len()
        ),
        Some(target) => format!(
            "Store performance {} below target {} - no high-target bonuses",
            store.performance, target
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "high_target_bonus".to_string(),
        rule_name: "High Target Bonus".to_string(),
        input: serde_json::json!({
            "store_performance": store.performance.to_string(),
            "high_target_amount": high_target_amount.map(|t| t.to_string()),
            "staff_count": staff.len()
        }),
        output: serde_json::json!({
            "achieved": achieved,
            "awarded": bonuses.len(),
            "total": bonuses.iter().map(|b| b.bonus).sum::<Decimal>().to_string()
        }),
        reasoning,
    };

    HighTargetResult {
        bonuses,
        audit_step,
    }
}
