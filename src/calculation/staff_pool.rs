//! Staff pool allocation.

use rust_decimal::Decimal;

use crate::config::PoolRules;
use crate::models::{AuditStep, StaffPoolShare};

/// The result of allocating the staff pools, including the audit step.
#[derive(Debug, Clone)]
pub struct StaffAllocation {
    /// The staff share, `None` when the staff count is zero.
    pub share: Option<StaffPoolShare>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Derives the staff pools from the consultant pools and splits them evenly.
///
/// The consultant pools are the consultant share of the full store bonus,
/// so the staff pools are the complement: `pool / share * (1 - share)`.
/// With the standard shares that is `performance / 0.7 * 0.3` and
/// `consumption / 0.4 * 0.6`. Each pool is divided evenly by `staff_count`,
/// which the caller supplies (it is not derived from the roster).
///
/// A `staff_count` of zero yields no share.
pub fn allocate_staff_bonus(
    performance_pool: Decimal,
    consumption_pool: Decimal,
    staff_count: u32,
    rules: &PoolRules,
    step_number: u32,
) -> StaffAllocation {
    let input = serde_json::json!({
        "consultant_performance_pool": performance_pool.to_string(),
        "consultant_consumption_pool": consumption_pool.to_string(),
        "staff_count": staff_count
    });

    if staff_count == 0 {
        return StaffAllocation {
            share: None,
            audit_step: AuditStep {
                step_number,
                rule_id: "staff_pool".to_string(),
                rule_name: "Staff Pool Allocation".to_string(),
                input,
                output: serde_json::json!({ "allocated": false }),
                reasoning: "Staff count is zero - staff pool not allocated".to_string(),
            },
        };
    }

    let staff_performance_pool = complement(performance_pool, rules.consultant_performance_share);
    let staff_consumption_pool = complement(consumption_pool, rules.consultant_consumption_share);
    let count = Decimal::from(staff_count);

    let share = StaffPoolShare {
        count: staff_count,
        performance_pool: staff_performance_pool,
        consumption_pool: staff_consumption_pool,
        per_person_performance: staff_performance_pool / count,
        per_person_consumption: staff_consumption_pool / count,
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "staff_pool".to_string(),
        rule_name: "Staff Pool Allocation".to_string(),
        input,
        output: serde_json::json!({
            "allocated": true,
            "performance_pool": share.performance_pool.to_string(),
            "consumption_pool": share.consumption_pool.to_string(),
            "per_person_performance": share.per_person_performance.to_string(),
            "per_person_consumption": share.per_person_consumption.to_string()
        }),
        reasoning: format!(
            "Staff pools {} + {} split across {} people = {} each",
            share.performance_pool.round_dp(2),
            share.consumption_pool.round_dp(2),
            staff_count,
            share.per_person_total().round_dp(2)
        ),
    };

    StaffAllocation {
        share: Some(share),
        audit_step,
    }
}

fn complement(consultant_pool: Decimal, consultant_share: Decimal) -> Decimal {
    consultant_pool / consultant_share * (Decimal::ONE - consultant_share)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::fixtures;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn allocate(performance: Decimal, consumption: Decimal, count: u32) -> StaffAllocation {
        allocate_staff_bonus(performance, consumption, count, &fixtures::rules().pools, 1)
    }

    /// SP-001: complementary pools from the scenario figures
    #[test]
    fn test_staff_pools_are_complement_of_consultant_pools() {
        let result = allocate(dec("30449.9755"), dec("16599.99"), 4);
        let share = result.share.unwrap();

        assert_eq!(share.performance_pool, dec("13049.9895"));
        assert_eq!(share.consumption_pool, dec("24899.985"));
        assert_eq!(share.count, 4);
    }

    #[test]
    fn test_pools_split_evenly() {
        let result = allocate(dec("7000"), dec("4000"), 3);
        let share = result.share.unwrap();

        assert_eq!(share.performance_pool, dec("3000"));
        assert_eq!(share.consumption_pool, dec("6000"));
        assert_eq!(share.per_person_performance, dec("1000"));
        assert_eq!(share.per_person_consumption, dec("2000"));
        assert_eq!(share.per_person_total(), dec("3000"));
    }

    /// SP-002: no staff, no share
    #[test]
    fn test_zero_staff_count_yields_nothing() {
        let result = allocate(dec("7000"), dec("4000"), 0);
        assert!(result.share.is_none());
        assert_eq!(result.audit_step.output["allocated"], false);
    }

    #[test]
    fn test_zero_pools_give_zero_shares() {
        let share = allocate(Decimal::ZERO, Decimal::ZERO, 2).share.unwrap();
        assert_eq!(share.per_person_total(), Decimal::ZERO);
    }

    proptest! {
        #[test]
        fn prop_staff_pool_inverts_consultant_share(cents in 1i64..10_000_000_000) {
            let pool = Decimal::new(cents, 2);
            let share = allocate(pool, pool, 1).share.unwrap();

            prop_assert_eq!(share.performance_pool, pool / dec("0.7") * dec("0.3"));
            prop_assert_eq!(share.consumption_pool, pool / dec("0.4") * dec("0.6"));
        }
    }
}
