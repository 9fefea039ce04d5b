//! Product-sale qualification.

use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::config::ProductRules;
use crate::models::{AuditStep, ProductBonus, ProductQualification, ProductSaleTally};

/// The result of qualifying product sales, including the audit step.
#[derive(Debug, Clone)]
pub struct ProductQualificationResult {
    /// Qualification per identifier.
    pub qualification: ProductQualification,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Turns a sale tally into per-consultant product bonuses.
///
/// An identifier qualifies at `rules.qualifying_count` sales or more and
/// then earns `rules.bonus`. Falling short earns nothing and disqualifies
/// the consultant from pool shares.
pub fn qualify_product_sales(
    tally: &ProductSaleTally,
    rules: &ProductRules,
    step_number: u32,
) -> ProductQualificationResult {
    let bonuses: BTreeMap<String, ProductBonus> = tally
        .iter()
        .map(|(identifier, sales_count)| {
            let qualified = sales_count >= rules.qualifying_count;
            let bonus = if qualified { rules.bonus } else { Decimal::ZERO };
            (
                identifier.to_string(),
                ProductBonus {
                    sales_count,
                    bonus,
                    qualified,
                },
            )
        })
        .collect();

    let qualification = ProductQualification::new(bonuses);
    let qualified = qualification.qualified_count();

    let audit_step = AuditStep {
        step_number,
        rule_id: "product_qualification".to_string(),
        rule_name: "Product Sale Qualification".to_string(),
        input: serde_json::json!({
            "tally": tally,
            "qualifying_count": rules.qualifying_count,
            "bonus": rules.bonus.to_string()
        }),
        output: serde_json::json!({
            "qualified": qualified,
            "not_qualified": tally.len() - qualified,
            "total_bonus": qualification.total_bonus().to_string()
        }),
        reasoning: format!(
            "{} of {} consultants sold at least {} products",
            qualified,
            tally.len(),
            rules.qualifying_count
        ),
    };

    ProductQualificationResult {
        qualification,
        audit_step,
    }
}
