//! Consultant pool allocation.
//!
//! The store-wide progressive bonuses form two pools. Consultants receive a
//! configured share of each (70% of performance, 40% of consumption) and
//! divide it in proportion to their personal figures, subject to
//! eligibility gates and product qualification.

use rust_decimal::Decimal;

use crate::config::{BracketTables, PoolRules};
use crate::models::{
    AuditStep, ConsultantBonus, ConsultantPools, ConsultantRecord, ProductQualification,
    StoreFigures, checked_total,
};

use super::progressive_bonus;

/// The result of allocating the consultant pools.
#[derive(Debug, Clone)]
pub struct ConsultantAllocation {
    /// Pool shares per consultant, in roster order.
    pub bonuses: Vec<ConsultantBonus>,
    /// The consultant pools that were divided.
    pub pools: ConsultantPools,
    /// True when a personal-figure total left the `Decimal` range and was
    /// treated as zero.
    pub total_overflow: bool,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes the consultant pools and each consultant's share of them.
///
/// - Performance pool: `progressive_bonus(store performance) * performance share`.
/// - Consumption pool: `progressive_bonus(store consumption) * consumption share`.
/// - A consultant draws on the performance pool when their personal
///   performance is at least `performance_share_min_performance`, and on
///   the consumption pool when their personal *performance* is at least
///   `consumption_share_min_performance`.
/// - A share is `pool * personal / sum of that metric over all consultants`,
///   or zero when the sum is zero or too large to represent.
/// - A consultant who is not product-qualified receives zero from both.
///
/// An empty roster yields no bonuses and zero pools.
pub fn allocate_consultant_bonus(
    store: &StoreFigures,
    consultants: &[ConsultantRecord],
    qualification: &ProductQualification,
    brackets: &BracketTables,
    rules: &PoolRules,
    step_number: u32,
) -> ConsultantAllocation {
    if consultants.is_empty() {
        return ConsultantAllocation {
            bonuses: Vec::new(),
            pools: ConsultantPools {
                performance_pool: Decimal::ZERO,
                consumption_pool: Decimal::ZERO,
            },
            total_overflow: false,
            audit_step: AuditStep {
                step_number,
                rule_id: "consultant_pool".to_string(),
                rule_name: "Consultant Pool Allocation".to_string(),
                input: serde_json::json!({ "consultant_count": 0 }),
                output: serde_json::json!({
                    "performance_pool": "0",
                    "consumption_pool": "0"
                }),
                reasoning: "No consultants on the roster - pools not allocated".to_string(),
            },
        };
    }

    let store_performance_bonus = progressive_bonus(store.performance, &brackets.store_performance);
    let store_consumption_bonus = progressive_bonus(store.consumption, &brackets.store_consumption);
    let performance_pool = store_performance_bonus * rules.consultant_performance_share;
    let consumption_pool = store_consumption_bonus * rules.consultant_consumption_share;

    let total_performance = checked_total(consultants.iter().map(|c| c.personal_performance));
    let total_consumption = checked_total(consultants.iter().map(|c| c.personal_consumption));
    let total_overflow = total_performance.is_none() || total_consumption.is_none();
    let total_performance = total_performance.unwrap_or(Decimal::ZERO);
    let total_consumption = total_consumption.unwrap_or(Decimal::ZERO);

    let mut disqualified = Vec::new();
    let bonuses: Vec<ConsultantBonus> = consultants
        .iter()
        .map(|consultant| {
            let product_qualified = qualification.is_qualified(&consultant.name);
            let (performance_bonus, consumption_bonus) = if product_qualified {
                let performance_ok =
                    consultant.personal_performance >= rules.performance_share_min_performance;
                let consumption_ok =
                    consultant.personal_performance >= rules.consumption_share_min_performance;
                (
                    if performance_ok {
                        proportional_share(
                            performance_pool,
                            consultant.personal_performance,
                            total_performance,
                        )
                    } else {
                        Decimal::ZERO
                    },
                    if consumption_ok {
                        proportional_share(
                            consumption_pool,
                            consultant.personal_consumption,
                            total_consumption,
                        )
                    } else {
                        Decimal::ZERO
                    },
                )
            } else {
                disqualified.push(consultant.name.clone());
                (Decimal::ZERO, Decimal::ZERO)
            };

            ConsultantBonus {
                name: consultant.name.clone(),
                performance_bonus,
                consumption_bonus,
                personal_performance: consultant.personal_performance,
                personal_consumption: consultant.personal_consumption,
                product_qualified,
            }
        })
        .collect();

    let audit_step = AuditStep {
        step_number,
        rule_id: "consultant_pool".to_string(),
        rule_name: "Consultant Pool Allocation".to_string(),
        input: serde_json::json!({
            "store_performance": store.performance.to_string(),
            "store_consumption": store.consumption.to_string(),
            "consultant_count": consultants.len(),
            "performance_share": rules.consultant_performance_share.to_string(),
            "consumption_share": rules.consultant_consumption_share.to_string()
        }),
        output: serde_json::json!({
            "store_performance_bonus": store_performance_bonus.to_string(),
            "store_consumption_bonus": store_consumption_bonus.to_string(),
            "performance_pool": performance_pool.to_string(),
            "consumption_pool": consumption_pool.to_string(),
            "product_disqualified": disqualified,
            "total_overflow": total_overflow
        }),
        reasoning: format!(
            "Performance pool {} x {} = {}; consumption pool {} x {} = {}; {} consultant(s) zeroed for product shortfall{}",
            store_performance_bonus.normalize(),
            rules.consultant_performance_share,
            performance_pool.normalize(),
            store_consumption_bonus.normalize(),
            rules.consultant_consumption_share,
            consumption_pool.normalize(),
            disqualified.len(),
            if total_overflow {
                "; personal totals overflowed, shares are zero"
            } else {
                ""
            }
        ),
    };

    ConsultantAllocation {
        bonuses,
        pools: ConsultantPools {
            performance_pool,
            consumption_pool,
        },
        total_overflow,
        audit_step,
    }
}

fn proportional_share(pool: Decimal, personal: Decimal, total: Decimal) -> Decimal {
    personal
        .checked_div(total)
        .and_then(|ratio| pool.checked_mul(ratio))
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::fixtures;
    use crate::models::ProductBonus;
    use std::collections::BTreeMap;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn consultant(name: &str, performance: &str, consumption: &str) -> ConsultantRecord {
        ConsultantRecord {
            name: name.to_string(),
            personal_performance: dec(performance),
            personal_consumption: dec(consumption),
            source_row: 9,
        }
    }

    fn store(performance: &str, consumption: &str) -> StoreFigures {
        StoreFigures {
            performance: dec(performance),
            consumption: dec(consumption),
        }
    }

    fn scenario_roster() -> Vec<ConsultantRecord> {
        vec![
            consultant("Amy", "2000000", "1800000"),
            consultant("Bea", "1500000", "1200000"),
            consultant("Cat", "1000000", "800000"),
        ]
    }

    fn allocate(
        store: &StoreFigures,
        consultants: &[ConsultantRecord],
        qualification: &ProductQualification,
    ) -> ConsultantAllocation {
        allocate_consultant_bonus(
            store,
            consultants,
            qualification,
            &fixtures::brackets(),
            &fixtures::rules().pools,
            1,
        )
    }

    fn disqualify(names: &[&str]) -> ProductQualification {
        let mut bonuses = BTreeMap::new();
        for name in names {
            bonuses.insert(
                name.to_string(),
                ProductBonus {
                    sales_count: 5,
                    bonus: Decimal::ZERO,
                    qualified: false,
                },
            );
        }
        ProductQualification::new(bonuses)
    }

    /// CP-001: pools are the configured share of the store bonuses
    #[test]
    fn test_pools_from_store_figures() {
        let result = allocate(
            &store("5000000", "4000000"),
            &scenario_roster(),
            &ProductQualification::default(),
        );

        assert_eq!(result.pools.performance_pool, dec("30449.9755"));
        assert_eq!(result.pools.consumption_pool, dec("16599.99"));
    }

    /// CP-002: three-consultant scenario with both gates
    #[test]
    fn test_scenario_shares_and_gates() {
        let result = allocate(
            &store("5000000", "4000000"),
            &scenario_roster(),
            &ProductQualification::default(),
        );
        let pools = result.pools;
        let amy = &result.bonuses[0];
        let bea = &result.bonuses[1];
        let cat = &result.bonuses[2];

        // Amy clears both gates; shares are over all three consultants.
        assert_eq!(
            amy.performance_bonus,
            pools.performance_pool * (dec("2000000") / dec("4500000"))
        );
        assert_eq!(
            amy.consumption_bonus,
            pools.consumption_pool * (dec("1800000") / dec("3800000"))
        );

        // Bea is below 1,680,000 but clears the 1,200,000 consumption gate.
        assert_eq!(bea.performance_bonus, Decimal::ZERO);
        assert_eq!(
            bea.consumption_bonus,
            pools.consumption_pool * (dec("1200000") / dec("3800000"))
        );

        // Cat clears neither gate.
        assert_eq!(cat.performance_bonus, Decimal::ZERO);
        assert_eq!(cat.consumption_bonus, Decimal::ZERO);
    }

    /// CP-003: consumption gate keys off personal performance
    #[test]
    fn test_consumption_gate_uses_performance() {
        let roster = vec![
            consultant("HighConsumption", "1000000", "5000000"),
            consultant("HighPerformance", "1300000", "100000"),
        ];
        let result = allocate(
            &store("5000000", "4000000"),
            &roster,
            &ProductQualification::default(),
        );

        assert_eq!(result.bonuses[0].consumption_bonus, Decimal::ZERO);
        assert!(result.bonuses[1].consumption_bonus > Decimal::ZERO);
    }

    /// CP-004: product shortfall zeroes both shares
    #[test]
    fn test_product_disqualification_overrides_gates() {
        let result = allocate(
            &store("5000000", "4000000"),
            &scenario_roster(),
            &disqualify(&["Amy"]),
        );
        let amy = &result.bonuses[0];

        assert!(!amy.product_qualified);
        assert_eq!(amy.performance_bonus, Decimal::ZERO);
        assert_eq!(amy.consumption_bonus, Decimal::ZERO);
        assert!(result.bonuses[1].product_qualified);
        assert!(result.bonuses[1].consumption_bonus > Decimal::ZERO);
        assert_eq!(result.audit_step.output["product_disqualified"][0], "Amy");
    }

    #[test]
    fn test_zero_totals_give_zero_shares() {
        let roster = vec![consultant("Amy", "1700000", "0")];
        let result = allocate(
            &store("5000000", "4000000"),
            &roster,
            &ProductQualification::default(),
        );

        assert!(result.bonuses[0].performance_bonus > Decimal::ZERO);
        assert_eq!(result.bonuses[0].consumption_bonus, Decimal::ZERO);
    }

    #[test]
    fn test_overflowing_totals_give_zero_shares() {
        let roster = vec![
            consultant("Amy", "50000000000000000000000000000", "50000000000000000000000000000"),
            consultant("Bea", "50000000000000000000000000000", "1000000"),
        ];
        let result = allocate(
            &store("5000000", "4000000"),
            &roster,
            &ProductQualification::default(),
        );

        assert!(result.total_overflow);
        for bonus in &result.bonuses {
            assert_eq!(bonus.performance_bonus, Decimal::ZERO);
            assert_eq!(bonus.consumption_bonus, Decimal::ZERO);
        }
        assert_eq!(result.pools.performance_pool, dec("30449.9755"));
        assert_eq!(result.audit_step.output["total_overflow"], true);
    }

    #[test]
    fn test_mixed_sign_totals_do_not_panic() {
        let roster = vec![
            consultant("Amy", "70000000000000000000000000000", "0"),
            consultant("Bea", "-69999999999999999999999999999", "0"),
        ];
        let result = allocate(
            &store("5000000", "4000000"),
            &roster,
            &ProductQualification::default(),
        );

        assert!(!result.total_overflow);
        assert_eq!(result.bonuses[0].performance_bonus, Decimal::ZERO);
    }

    #[test]
    fn test_empty_roster_has_zero_pools() {
        let result = allocate(
            &store("5000000", "4000000"),
            &[],
            &ProductQualification::default(),
        );

        assert!(result.bonuses.is_empty());
        assert_eq!(result.pools.performance_pool, Decimal::ZERO);
        assert_eq!(result.pools.consumption_pool, Decimal::ZERO);
    }

    #[test]
    fn test_audit_step_records_pools() {
        let result = allocate(
            &store("5000000", "4000000"),
            &scenario_roster(),
            &ProductQualification::default(),
        );

        assert_eq!(result.audit_step.rule_id, "consultant_pool");
        assert_eq!(
            result.audit_step.output["store_performance_bonus"],
            "43499.965"
        );
        assert!(result.audit_step.reasoning.contains("30449.9755"));
    }
}
