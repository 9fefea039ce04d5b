//! Derived bonus and salary records.
//!
//! Every type here is produced by one payroll run and never mutated after
//! it is computed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Position, Role};

/// Sums amounts, returning `None` if the total leaves the `Decimal` range.
pub fn checked_total(amounts: impl IntoIterator<Item = Decimal>) -> Option<Decimal> {
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |total, amount| total.checked_add(amount))
}

/// Store-wide aggregate figures read from the payroll sheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreFigures {
    /// Total store performance.
    pub performance: Decimal,
    /// Total store consumption.
    pub consumption: Decimal,
}

impl StoreFigures {
    /// Returns true if a high target is set and store performance reaches it.
    ///
    /// # Examples
    ///
    /// ```
    /// use salon_payroll::models::StoreFigures;
    /// use rust_decimal::Decimal;
    ///
    /// let store = StoreFigures {
    ///     performance: Decimal::from(6_000_000),
    ///     consumption: Decimal::ZERO,
    /// };
    /// assert!(store.reaches_high_target(Some(Decimal::from(6_000_000))));
    /// assert!(!store.reaches_high_target(None));
    /// ```
    pub fn reaches_high_target(&self, high_target_amount: Option<Decimal>) -> bool {
        high_target_amount.is_some_and(|target| self.performance >= target)
    }
}

/// Count of qualifying product-sale events per consultant identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductSaleTally {
    counts: BTreeMap<String, u32>,
}

impl ProductSaleTally {
    /// Creates an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one sale for an identifier.
    pub fn record(&mut self, identifier: impl Into<String>) {
        *self.counts.entry(identifier.into()).or_insert(0) += 1;
    }

    /// Returns the number of sales recorded for an identifier.
    pub fn count(&self, identifier: &str) -> u32 {
        self.counts.get(identifier).copied().unwrap_or(0)
    }

    /// Iterates identifiers and their counts in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Returns the number of distinct identifiers.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns true if no sales were recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Product-sale outcome for one consultant identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductBonus {
    /// Number of qualifying sale events.
    pub sales_count: u32,
    /// Flat product bonus earned.
    pub bonus: Decimal,
    /// Whether the qualifying count was reached.
    pub qualified: bool,
}

/// Product qualification for every identifier found in the tally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductQualification {
    bonuses: BTreeMap<String, ProductBonus>,
}

impl ProductQualification {
    /// Creates a qualification table from per-identifier results.
    pub fn new(bonuses: BTreeMap<String, ProductBonus>) -> Self {
        Self { bonuses }
    }

    /// Returns whether a consultant is product-qualified.
    ///
    /// Consultants with no recorded sales are treated as qualified; only a
    /// tallied shortfall disqualifies.
    pub fn is_qualified(&self, name: &str) -> bool {
        self.bonuses.get(name).is_none_or(|b| b.qualified)
    }

    /// Returns the product result for an identifier, if any.
    pub fn get(&self, name: &str) -> Option<&ProductBonus> {
        self.bonuses.get(name)
    }

    /// Iterates identifiers and results in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ProductBonus)> {
        self.bonuses.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of identifiers that reached the qualifying count.
    pub fn qualified_count(&self) -> usize {
        self.bonuses.values().filter(|b| b.qualified).count()
    }

    /// Sum of all product bonuses.
    pub fn total_bonus(&self) -> Decimal {
        self.bonuses.values().map(|b| b.bonus).sum()
    }
}

/// A consultant's share of the consultant pools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsultantBonus {
    /// The consultant's name.
    pub name: String,
    /// Share of the consultant performance pool.
    pub performance_bonus: Decimal,
    /// Share of the consultant consumption pool.
    pub consumption_bonus: Decimal,
    /// Personal performance used for the share.
    pub personal_performance: Decimal,
    /// Personal consumption used for the share.
    pub personal_consumption: Decimal,
    /// Whether the consultant passed product qualification.
    pub product_qualified: bool,
}

impl ConsultantBonus {
    /// Sum of both pool shares.
    pub fn total(&self) -> Decimal {
        self.performance_bonus + self.consumption_bonus
    }
}

/// Personal bracket bonuses for one consultant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndividualBonus {
    /// The consultant's name.
    pub name: String,
    /// Whether manager or consultant tables were applied.
    pub role: Role,
    /// Bracket bonus on personal performance.
    pub individual_performance_bonus: Decimal,
    /// Bracket bonus on personal consumption.
    pub individual_consumption_bonus: Decimal,
    /// Flat incentive, paid separately from the monthly total.
    pub performance_incentive_bonus: Decimal,
}

impl IndividualBonus {
    /// Personal bonuses counted toward the month. Excludes the incentive.
    pub fn monthly_total(&self) -> Decimal {
        self.individual_performance_bonus + self.individual_consumption_bonus
    }
}

/// The staff share of the pools, split evenly per head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffPoolShare {
    /// Number of staff the pools are split across.
    pub count: u32,
    /// Staff performance pool.
    pub performance_pool: Decimal,
    /// Staff consumption pool.
    pub consumption_pool: Decimal,
    /// Performance pool per person.
    pub per_person_performance: Decimal,
    /// Consumption pool per person.
    pub per_person_consumption: Decimal,
}

impl StaffPoolShare {
    /// Total pool money per person.
    pub fn per_person_total(&self) -> Decimal {
        self.per_person_performance + self.per_person_consumption
    }
}

/// A high-target flat bonus awarded to one staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighTargetBonus {
    /// The staff member's name.
    pub name: String,
    /// The staff member's position.
    pub position: Position,
    /// The bonus amount.
    pub bonus: Decimal,
}

/// A named component of a salary line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalaryComponent {
    /// Base salary.
    BaseSalary,
    /// Skill bonus.
    SkillBonus,
    /// Staff pool performance share.
    TeamPerformanceBonus,
    /// Staff pool consumption share.
    TeamConsumptionBonus,
    /// High-target flat bonus.
    HighTargetBonus,
    /// License allowance.
    LicenseAllowance,
    /// Full-attendance bonus.
    FullAttendanceBonus,
    /// Rank bonus.
    RankBonus,
    /// Position allowance.
    PositionAllowance,
    /// Front desk: high target plus consumption milestone.
    ConsumptionAchievementBonus,
    /// Front desk: store performance milestone.
    PerformanceMilestoneBonus,
    /// Front desk: store reached the high target.
    StoreIncentiveBonus,
}

/// A component reported on a salary line but not counted in its total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludedAmount {
    /// Which component.
    pub component: SalaryComponent,
    /// Its amount.
    pub amount: Decimal,
}

/// The final salary record for one staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryLine {
    /// The staff member's name.
    pub name: String,
    /// The staff member's position.
    pub position: Position,
    /// One-based spreadsheet row.
    pub source_row: usize,
    /// Base salary.
    pub base_salary: Decimal,
    /// Skill bonus.
    pub skill_bonus: Decimal,
    /// Staff pool performance share (zero for front desk).
    pub team_performance_bonus: Decimal,
    /// Staff pool consumption share (zero for front desk).
    pub team_consumption_bonus: Decimal,
    /// High-target flat bonus.
    pub high_target_bonus: Decimal,
    /// License allowance.
    pub license_allowance: Decimal,
    /// Full-attendance bonus.
    pub full_attendance_bonus: Decimal,
    /// Rank bonus.
    pub rank_bonus: Decimal,
    /// Position allowance.
    pub position_allowance: Decimal,
    /// Front desk consumption-achievement bonus.
    pub consumption_achievement_bonus: Decimal,
    /// Front desk performance-milestone bonus.
    pub performance_milestone_bonus: Decimal,
    /// Front desk store-incentive bonus.
    pub store_incentive_bonus: Decimal,
    /// Total counted toward the month.
    pub monthly_total: Decimal,
    /// Non-zero components reported but not counted in `monthly_total`.
    pub excluded_from_total: Vec<ExcludedAmount>,
}

impl SalaryLine {
    /// Returns the amount of one component.
    pub fn component(&self, component: SalaryComponent) -> Decimal {
        match component {
            SalaryComponent::BaseSalary => self.base_salary,
            SalaryComponent::SkillBonus => self.skill_bonus,
            SalaryComponent::TeamPerformanceBonus => self.team_performance_bonus,
            SalaryComponent::TeamConsumptionBonus => self.team_consumption_bonus,
            SalaryComponent::HighTargetBonus => self.high_target_bonus,
            SalaryComponent::LicenseAllowance => self.license_allowance,
            SalaryComponent::FullAttendanceBonus => self.full_attendance_bonus,
            SalaryComponent::RankBonus => self.rank_bonus,
            SalaryComponent::PositionAllowance => self.position_allowance,
            SalaryComponent::ConsumptionAchievementBonus => self.consumption_achievement_bonus,
            SalaryComponent::PerformanceMilestoneBonus => self.performance_milestone_bonus,
            SalaryComponent::StoreIncentiveBonus => self.store_incentive_bonus,
        }
    }

    /// Returns the sum of all excluded components, or zero if it overflows.
    pub fn excluded_total(&self) -> Decimal {
        checked_total(self.excluded_from_total.iter().map(|e| e.amount)).unwrap_or(Decimal::ZERO)
    }

    /// Returns true if the component is reported as excluded.
    pub fn is_excluded(&self, component: SalaryComponent) -> bool {
        self.excluded_from_total
            .iter()
            .any(|e| e.component == component)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn product(count: u32, qualified: bool) -> ProductBonus {
        ProductBonus {
            sales_count: count,
            bonus: if qualified { dec("2000") } else { Decimal::ZERO },
            qualified,
        }
    }

    #[test]
    fn test_tally_counts_records() {
        let mut tally = ProductSaleTally::new();
        tally.record("A01");
        tally.record("A01");
        tally.record("B02");

        assert_eq!(tally.count("A01"), 2);
        assert_eq!(tally.count("B02"), 1);
        assert_eq!(tally.count("C03"), 0);
        assert_eq!(tally.len(), 2);
    }

    #[test]
    fn test_checked_total() {
        assert_eq!(checked_total([dec("1.5"), dec("2")]), Some(dec("3.5")));
        assert_eq!(checked_total(std::iter::empty()), Some(Decimal::ZERO));
        assert_eq!(checked_total([Decimal::MAX, Decimal::ONE]), None);
        assert_eq!(checked_total([Decimal::MAX, Decimal::ONE, -Decimal::MAX]), None);
    }

    #[test]
    fn test_unknown_consultant_is_qualified() {
        let qualification = ProductQualification::default();
        assert!(qualification.is_qualified("Amy"));
    }

    #[test]
    fn test_tallied_shortfall_disqualifies() {
        let mut bonuses = BTreeMap::new();
        bonuses.insert("Amy".to_string(), product(29, false));
        bonuses.insert("Bea".to_string(), product(30, true));
        let qualification = ProductQualification::new(bonuses);

        assert!(!qualification.is_qualified("Amy"));
        assert!(qualification.is_qualified("Bea"));
        assert_eq!(qualification.qualified_count(), 1);
        assert_eq!(qualification.total_bonus(), dec("2000"));
    }

    #[test]
    fn test_individual_monthly_total_excludes_incentive() {
        let bonus = IndividualBonus {
            name: "Amy".to_string(),
            role: Role::Consultant,
            individual_performance_bonus: dec("100"),
            individual_consumption_bonus: dec("50"),
            performance_incentive_bonus: dec("10000"),
        };
        assert_eq!(bonus.monthly_total(), dec("150"));
    }

    #[test]
    fn test_store_without_target_never_reaches_it() {
        let store = StoreFigures {
            performance: dec("99999999"),
            consumption: Decimal::ZERO,
        };
        assert!(!store.reaches_high_target(None));
        assert!(!store.reaches_high_target(Some(dec("100000000"))));
    }

    #[test]
    fn test_salary_component_serialization() {
        assert_eq!(
            serde_json::to_string(&SalaryComponent::TeamPerformanceBonus).unwrap(),
            "\"team_performance_bonus\""
        );
    }
}
