//! The full payroll pipeline.
//!
//! [`run_payroll`] resolves the payroll sheet, extracts the roster and runs
//! every calculation stage in order, collecting one audit step per stage.

use std::time::Instant;

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::PayrollConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, PayrollResult, Role, Sheet, Workbook,
};
use crate::roster::{
    CellSchema, extract_consultants, extract_staff, read_store_figures, tally_product_sales,
};

use super::{
    IndividualBonusContext, SalaryContext, allocate_consultant_bonus, allocate_staff_bonus,
    assemble_salary, calculate_high_target_bonuses, calculate_individual_bonuses,
    qualify_product_sales,
};

/// Caller-supplied parameters for one payroll run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollInput {
    /// Number of people the staff pool is split across.
    pub staff_count: u32,
    /// Name of the store manager, if any.
    pub manager_name: Option<String>,
    /// Store performance needed for high-target bonuses, if any.
    pub high_target_amount: Option<Decimal>,
    /// Worksheet to read. Defaults to the sheet with the largest numeric name.
    pub sheet_name: Option<String>,
}

/// Resolves the worksheet a payroll run reads from.
///
/// An explicitly named sheet must exist. Otherwise the sheet whose name is
/// the largest number is used.
pub fn resolve_sheet<'a>(workbook: &'a Workbook, sheet_name: Option<&str>) -> EngineResult<&'a Sheet> {
    match sheet_name {
        Some(name) => workbook.sheet(name).ok_or_else(|| EngineError::SheetNotFound {
            name: name.to_string(),
        }),
        None => workbook
            .latest_numeric_sheet()
            .ok_or(EngineError::NoPayrollSheet),
    }
}

/// Runs the full payroll calculation over a workbook.
///
/// The only failure is sheet resolution. Everything after that is total
/// over its data: blank cells read as zero and missing blocks as empty
/// rosters. Apart from `calculation_id`, `timestamp` and the measured
/// duration, the result is identical for identical inputs.
pub fn run_payroll(
    workbook: &Workbook,
    input: &PayrollInput,
    config: &PayrollConfig,
) -> EngineResult<PayrollResult> {
    let start_time = Instant::now();
    let schema = CellSchema::STANDARD;
    let rules = config.rules();
    let mut audit_steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();
    let mut step_number: u32 = 1;

    let sheet = resolve_sheet(workbook, input.sheet_name.as_deref())?;
    let grid = Some(&sheet.rows);
    let period = sheet.period();
    info!(
        sheet = %sheet.name,
        staff_count = input.staff_count,
        "Running payroll"
    );

    let store = read_store_figures(grid, &schema);
    audit_steps.push(AuditStep {
        step_number,
        rule_id: "store_figures".to_string(),
        rule_name: "Store Figures".to_string(),
        input: serde_json::json!({
            "sheet": sheet.name,
            "period": period.map(|p| p.format("%Y-%m").to_string())
        }),
        output: serde_json::json!({
            "performance": store.performance.to_string(),
            "consumption": store.consumption.to_string()
        }),
        reasoning: format!(
            "Read store performance {} and consumption {} from sheet {}",
            store.performance, store.consumption, sheet.name
        ),
    });
    step_number += 1;

    let tally = tally_product_sales(&workbook.sheets, &schema);
    let product = qualify_product_sales(&tally, &rules.product, step_number);
    debug!(
        identifiers = tally.len(),
        qualified = product.qualification.qualified_count(),
        "Product sales qualified"
    );
    audit_steps.push(product.audit_step);
    step_number += 1;

    let consultants = extract_consultants(grid, &schema);
    let staff = extract_staff(grid, &schema, config.positions());
    let pool_members = staff
        .iter()
        .filter(|s| s.position.shares_staff_pool())
        .count();
    audit_steps.push(AuditStep {
        step_number,
        rule_id: "roster_extraction".to_string(),
        rule_name: "Roster Extraction".to_string(),
        input: serde_json::json!({ "sheet": sheet.name }),
        output: serde_json::json!({
            "consultants": consultants.iter().map(|c| &c.name).collect::<Vec<_>>(),
            "staff": staff.iter().map(|s| &s.name).collect::<Vec<_>>(),
            "pool_members": pool_members
        }),
        reasoning: format!(
            "Found {} consultant(s) and {} staff member(s)",
            consultants.len(),
            staff.len()
        ),
    });
    step_number += 1;

    if consultants.is_empty() {
        warnings.push(AuditWarning {
            code: "NO_CONSULTANTS".to_string(),
            message: format!("Sheet {} has no consultant rows; pools are zero", sheet.name),
            severity: "medium".to_string(),
        });
    }
    if usize::try_from(input.staff_count).ok() != Some(pool_members) {
        warnings.push(AuditWarning {
            code: "STAFF_COUNT_MISMATCH".to_string(),
            message: format!(
                "staff_count {} differs from {} beauty therapist/nurse row(s) on the sheet",
                input.staff_count, pool_members
            ),
            severity: "low".to_string(),
        });
    }

    let consultant_allocation = allocate_consultant_bonus(
        &store,
        &consultants,
        &product.qualification,
        config.brackets(),
        &rules.pools,
        step_number,
    );
    let pools = consultant_allocation.pools;
    debug!(
        performance_pool = %pools.performance_pool,
        consumption_pool = %pools.consumption_pool,
        "Consultant pools allocated"
    );
    audit_steps.push(consultant_allocation.audit_step);
    step_number += 1;

    let staff_allocation = allocate_staff_bonus(
        pools.performance_pool,
        pools.consumption_pool,
        input.staff_count,
        &rules.pools,
        step_number,
    );
    audit_steps.push(staff_allocation.audit_step);
    step_number += 1;

    let manager = input.manager_name.as_deref();
    let individual = calculate_individual_bonuses(
        &consultant_allocation.bonuses,
        IndividualBonusContext {
            manager,
            store: &store,
            high_target_amount: input.high_target_amount,
        },
        config.brackets(),
        &rules.incentive,
        step_number,
    );
    if let Some(manager) = manager
        && !individual.bonuses.iter().any(|b| b.role == Role::Manager)
    {
        warnings.push(AuditWarning {
            code: "MANAGER_NOT_FOUND".to_string(),
            message: format!("Manager '{}' is not on the consultant roster", manager.trim()),
            severity: "medium".to_string(),
        });
    }
    audit_steps.push(individual.audit_step);
    step_number += 1;

    let high_target = calculate_high_target_bonuses(
        &staff,
        &store,
        input.high_target_amount,
        config.positions(),
        step_number,
    );
    audit_steps.push(high_target.audit_step);
    step_number += 1;

    let salary = assemble_salary(
        &staff,
        SalaryContext {
            store: &store,
            high_target_amount: input.high_target_amount,
            staff_pool: staff_allocation.share.as_ref(),
            high_target_bonuses: &high_target.bonuses,
        },
        config.positions(),
        &rules.front_desk,
        step_number,
    );
    audit_steps.push(salary.audit_step);

    if consultant_allocation.total_overflow || !salary.overflowed.is_empty() {
        let mut totals = Vec::new();
        if consultant_allocation.total_overflow {
            totals.push("consultant personal totals".to_string());
        }
        totals.extend(salary.overflowed.iter().map(|name| format!("salary of {}", name)));
        warnings.push(AuditWarning {
            code: "AMOUNT_OVERFLOW".to_string(),
            message: format!("Totals too large to represent were set to zero: {}", totals.join(", ")),
            severity: "medium".to_string(),
        });
    }

    let duration_us = start_time.elapsed().as_micros() as u64;
    info!(
        sheet = %sheet.name,
        consultants = consultants.len(),
        salary_lines = salary.lines.len(),
        warnings = warnings.len(),
        duration_us,
        "Payroll completed"
    );

    Ok(PayrollResult {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        sheet_name: sheet.name.clone(),
        period,
        store,
        product_bonuses: product.qualification,
        consultant_pools: pools,
        consultant_bonuses: consultant_allocation.bonuses,
        staff_pool: staff_allocation.share,
        individual_bonuses: individual.bonuses,
        high_target_bonuses: high_target.bonuses,
        salary_lines: salary.lines,
        audit_trace: AuditTrace {
            steps: audit_steps,
            warnings,
            duration_us,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::fixtures;
    use crate::models::{Grid, Position, SalaryComponent};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn scenario_grid() -> Grid {
        let mut grid = Grid::default();
        grid.set(4, 4, 5_000_000);
        grid.set(6, 4, 4_000_000);

        grid.set(7, 0, "Consultant");
        for (row, (name, performance, consumption)) in [
            ("Amy", 2_000_000, 1_800_000),
            ("Bea", 1_500_000, 1_200_000),
            ("Cat", 1_000_000, 800_000),
        ]
        .into_iter()
        .enumerate()
        {
            grid.set(8 + row, 0, name);
            grid.set(8 + row, 2, performance);
            grid.set(8 + row, 6, consumption);
        }
        grid.set(11, 0, "公司");
        grid.set(11, 2, 9_000_000);
        grid.set(12, 0, "Dee");
        grid.set(12, 2, 100_000);

        grid.set(8, 10, "Cindy");
        grid.set(8, 12, 5000);
        grid.set(8, 13, "Daisy");
        grid.set(8, 14, 33000);
        grid.set(8, 16, "Nina");
        grid.set(8, 18, 2000);
        grid.set(11, 16, "Fay");
        grid.set(11, 18, 1000);
        grid
    }

    fn workbook() -> Workbook {
        Workbook::new(vec![
            Sheet::new("202505", Grid::default()),
            Sheet::new("202506", scenario_grid()),
            Sheet::new("Notes", Grid::default()),
        ])
    }

    fn input() -> PayrollInput {
        PayrollInput {
            staff_count: 3,
            manager_name: Some("Amy".to_string()),
            high_target_amount: Some(dec("6000000")),
            sheet_name: None,
        }
    }

    #[test]
    fn test_resolves_latest_numeric_sheet() {
        let result = run_payroll(&workbook(), &input(), &fixtures::config()).unwrap();
        assert_eq!(result.sheet_name, "202506");
        assert_eq!(
            result.period,
            chrono::NaiveDate::from_ymd_opt(2025, 6, 1)
        );
        assert_eq!(result.store.performance, dec("5000000"));
    }

    #[test]
    fn test_missing_named_sheet_is_an_error() {
        let input = PayrollInput {
            sheet_name: Some("202612".to_string()),
            ..input()
        };
        let err = run_payroll(&workbook(), &input, &fixtures::config()).unwrap_err();
        assert!(matches!(err, EngineError::SheetNotFound { ref name } if name == "202612"));
    }

    #[test]
    fn test_no_numeric_sheet_is_an_error() {
        let workbook = Workbook::new(vec![Sheet::new("Summary", scenario_grid())]);
        let err = run_payroll(&workbook, &input(), &fixtures::config()).unwrap_err();
        assert!(matches!(err, EngineError::NoPayrollSheet));
    }

    #[test]
    fn test_house_account_excluded_and_scan_continues() {
        let result = run_payroll(&workbook(), &input(), &fixtures::config()).unwrap();
        let names: Vec<&str> = result
            .consultant_bonuses
            .iter()
            .map(|b| b.name.as_str())
            .collect();
        assert_eq!(names, ["Amy", "Bea", "Cat", "Dee"]);
    }

    #[test]
    fn test_pipeline_scenario() {
        let result = run_payroll(&workbook(), &input(), &fixtures::config()).unwrap();

        assert_eq!(result.consultant_pools.performance_pool, dec("30449.9755"));
        assert_eq!(result.consultant_pools.consumption_pool, dec("16599.99"));

        let staff_pool = result.staff_pool.as_ref().unwrap();
        assert_eq!(staff_pool.count, 3);
        assert_eq!(staff_pool.performance_pool, dec("13049.9895"));

        let amy = result.individual_bonus("Amy").unwrap();
        assert_eq!(amy.role, Role::Manager);
        // Store performance 5,000,000 is below the 6,000,000 target.
        assert_eq!(amy.performance_incentive_bonus, Decimal::ZERO);

        let cindy = result.salary_line("Cindy").unwrap();
        assert_eq!(cindy.monthly_total, dec("36054"));
        assert_eq!(cindy.team_performance_bonus, staff_pool.per_person_performance);
        assert!(cindy.is_excluded(SalaryComponent::TeamConsumptionBonus));

        let daisy = result.salary_line("Daisy").unwrap();
        assert_eq!(daisy.base_salary, dec("33000"));

        let fay = result.salary_line("Fay").unwrap();
        assert_eq!(fay.position, Position::FrontDesk);
        assert_eq!(fay.performance_milestone_bonus, dec("5000"));
        assert_eq!(fay.store_incentive_bonus, Decimal::ZERO);
        assert!(result.high_target_bonuses.is_empty());
    }

    #[test]
    fn test_audit_steps_are_numbered_in_order() {
        let result = run_payroll(&workbook(), &input(), &fixtures::config()).unwrap();
        let steps = &result.audit_trace.steps;

        assert_eq!(steps.len(), 8);
        for (i, step) in steps.iter().enumerate() {
            assert_eq!(step.step_number, i as u32 + 1);
        }
        assert_eq!(steps[0].rule_id, "store_figures");
        assert_eq!(steps[7].rule_id, "salary_assembly");
    }

    #[test]
    fn test_staff_count_mismatch_warns() {
        let input = PayrollInput {
            staff_count: 5,
            ..input()
        };
        let result = run_payroll(&workbook(), &input, &fixtures::config()).unwrap();
        assert!(
            result
                .audit_trace
                .warnings
                .iter()
                .any(|w| w.code == "STAFF_COUNT_MISMATCH")
        );
    }

    #[test]
    fn test_unknown_manager_warns() {
        let input = PayrollInput {
            manager_name: Some("Zoe".to_string()),
            ..input()
        };
        let result = run_payroll(&workbook(), &input, &fixtures::config()).unwrap();
        let codes: Vec<&str> = result
            .audit_trace
            .warnings
            .iter()
            .map(|w| w.code.as_str())
            .collect();
        assert_eq!(codes, ["MANAGER_NOT_FOUND"]);
    }

    #[test]
    fn test_oversized_figures_warn_instead_of_panicking() {
        let huge = dec("50000000000000000000000000000");
        let mut grid = Grid::default();
        grid.set(4, 4, 5_000_000);
        grid.set(6, 4, 4_000_000);
        grid.set(8, 0, "Amy");
        grid.set(8, 2, huge);
        grid.set(9, 0, "Bea");
        grid.set(9, 2, huge);
        grid.set(8, 13, "Cindy");
        grid.set(8, 14, huge);
        grid.set(8, 15, huge);
        let workbook = Workbook::new(vec![Sheet::new("202506", grid)]);
        let input = PayrollInput {
            staff_count: 1,
            ..input()
        };

        let result = run_payroll(&workbook, &input, &fixtures::config()).unwrap();

        assert!(result.consultant_pools.performance_pool > Decimal::ZERO);
        assert!(
            result
                .consultant_bonuses
                .iter()
                .all(|b| b.performance_bonus.is_zero() && b.consumption_bonus.is_zero())
        );
        assert_eq!(result.salary_lines[0].monthly_total, Decimal::ZERO);
        let warning = result
            .audit_trace
            .warnings
            .iter()
            .find(|w| w.code == "AMOUNT_OVERFLOW")
            .unwrap();
        assert!(warning.message.contains("consultant personal totals"));
        assert!(warning.message.contains("Cindy"));
    }

    #[test]
    fn test_empty_sheet_gives_empty_outputs() {
        let workbook = Workbook::new(vec![Sheet::new("202506", Grid::default())]);
        let result = run_payroll(&workbook, &input(), &fixtures::config()).unwrap();

        assert!(result.consultant_bonuses.is_empty());
        assert!(result.salary_lines.is_empty());
        assert_eq!(result.consultant_pools.performance_pool, Decimal::ZERO);
        assert_eq!(
            result.staff_pool.as_ref().unwrap().per_person_total(),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_identical_inputs_give_identical_outputs() {
        let first = run_payroll(&workbook(), &input(), &fixtures::config()).unwrap();
        let second = run_payroll(&workbook(), &input(), &fixtures::config()).unwrap();

        assert_eq!(first.salary_lines, second.salary_lines);
        assert_eq!(first.consultant_bonuses, second.consultant_bonuses);
        assert_eq!(first.individual_bonuses, second.individual_bonuses);
        assert_eq!(first.audit_trace.steps, second.audit_trace.steps);
        assert_ne!(first.calculation_id, second.calculation_id);
    }
}
