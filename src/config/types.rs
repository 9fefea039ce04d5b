//! Configuration types for salon payroll.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Position;

/// Metadata about the salon whose payroll rules are configured.
#[derive(Debug, Clone, Deserialize)]
pub struct SalonMetadata {
    /// Short identifier for the rule set (e.g., "only_beauty").
    pub code: String,
    /// The human-readable name of the salon.
    pub name: String,
    /// The version or effective date of the rule set.
    pub version: String,
}

/// One slice of a progressive bonus table.
///
/// The rate applies only to the part of an amount that falls between
/// `lower` and `upper`. A missing `upper` means the bracket is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bracket {
    /// The lower bound of the bracket.
    pub lower: Decimal,
    /// The inclusive upper bound, or `None` for +∞.
    #[serde(default)]
    pub upper: Option<Decimal>,
    /// The rate applied to the slice inside this bracket.
    pub rate: Decimal,
}

impl Bracket {
    /// Creates a bounded bracket.
    pub fn new(lower: Decimal, upper: Decimal, rate: Decimal) -> Self {
        Self {
            lower,
            upper: Some(upper),
            rate,
        }
    }

    /// Creates a bracket with no upper bound.
    pub fn unbounded(lower: Decimal, rate: Decimal) -> Self {
        Self {
            lower,
            upper: None,
            rate,
        }
    }
}

/// An ordered sequence of brackets, lowest first.
///
/// Ordering is checked by [`ConfigLoader`](super::ConfigLoader) when tables
/// are loaded from YAML; tables built in code are trusted as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BracketTable {
    brackets: Vec<Bracket>,
}

impl BracketTable {
    /// Creates a table from brackets already sorted by lower bound.
    pub fn new(brackets: Vec<Bracket>) -> Self {
        Self { brackets }
    }

    /// Returns the brackets in ascending order.
    pub fn brackets(&self) -> &[Bracket] {
        &self.brackets
    }

    /// Returns true if bounds are increasing and no two brackets overlap.
    ///
    /// Only the last bracket may be unbounded.
    pub fn is_well_ordered(&self) -> bool {
        let mut previous_upper: Option<Decimal> = None;
        for (index, bracket) in self.brackets.iter().enumerate() {
            if let Some(prev) = previous_upper {
                if bracket.lower < prev {
                    return false;
                }
            }
            match bracket.upper {
                Some(upper) if upper < bracket.lower => return false,
                Some(upper) => previous_upper = Some(upper),
                None if index + 1 != self.brackets.len() => return false,
                None => {}
            }
        }
        true
    }
}

/// All bracket tables used by the engine.
#[derive(Debug, Clone, Deserialize)]
pub struct BracketTables {
    /// Store-wide performance, feeding the shared performance pool.
    pub store_performance: BracketTable,
    /// Store-wide consumption, feeding the shared consumption pool.
    pub store_consumption: BracketTable,
    /// Personal performance for the store manager.
    pub manager_performance: BracketTable,
    /// Personal consumption for the store manager.
    pub manager_consumption: BracketTable,
    /// Personal performance for consultants.
    pub consultant_performance: BracketTable,
    /// Personal consumption for consultants.
    pub consultant_consumption: BracketTable,
}

impl BracketTables {
    /// Iterates the tables paired with their configuration key.
    pub fn named(&self) -> [(&'static str, &BracketTable); 6] {
        [
            ("store_performance", &self.store_performance),
            ("store_consumption", &self.store_consumption),
            ("manager_performance", &self.manager_performance),
            ("manager_consumption", &self.manager_consumption),
            ("consultant_performance", &self.consultant_performance),
            ("consultant_consumption", &self.consultant_consumption),
        ]
    }
}

/// Fixed pay components for one position.
#[derive(Debug, Clone, Deserialize)]
pub struct PositionRates {
    /// Monthly base salary used when the sheet does not supply one.
    pub base_salary: Decimal,
    /// Monthly license allowance.
    #[serde(default)]
    pub license_allowance: Decimal,
    /// Full-attendance bonus (paid quarterly).
    #[serde(default)]
    pub full_attendance_bonus: Decimal,
    /// Rank bonus.
    #[serde(default)]
    pub rank_bonus: Decimal,
    /// Position allowance.
    #[serde(default)]
    pub position_allowance: Decimal,
    /// Flat bonus when the store reaches its high target.
    #[serde(default)]
    pub high_target_bonus: Decimal,
}

/// Position rates keyed by position.
#[derive(Debug, Clone, Deserialize)]
pub struct PositionTable {
    /// Beauty therapist rates.
    pub beauty_therapist: PositionRates,
    /// Nurse rates.
    pub nurse: PositionRates,
    /// Front desk rates.
    pub front_desk: PositionRates,
}

impl PositionTable {
    /// Returns the rates for a position.
    pub fn get(&self, position: Position) -> &PositionRates {
        match position {
            Position::BeautyTherapist => &self.beauty_therapist,
            Position::Nurse => &self.nurse,
            Position::FrontDesk => &self.front_desk,
        }
    }
}

/// How the shared pools are split and who may draw on them.
#[derive(Debug, Clone, Deserialize)]
pub struct PoolRules {
    /// Fraction of the store performance bonus paid to consultants.
    pub consultant_performance_share: Decimal,
    /// Fraction of the store consumption bonus paid to consultants.
    pub consultant_consumption_share: Decimal,
    /// Minimum personal performance for a performance-pool share.
    pub performance_share_min_performance: Decimal,
    /// Minimum personal performance for a consumption-pool share.
    pub consumption_share_min_performance: Decimal,
}

/// The flat incentive for consultants when both they and the store do well.
#[derive(Debug, Clone, Deserialize)]
pub struct IncentiveRules {
    /// Minimum personal performance.
    pub min_personal_performance: Decimal,
    /// Bonus amount.
    pub amount: Decimal,
}

/// Product-sale qualification.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRules {
    /// Number of sale events needed to qualify.
    pub qualifying_count: u32,
    /// Bonus paid to qualifying consultants.
    pub bonus: Decimal,
}

/// Conditional bonuses paid only to front desk staff.
#[derive(Debug, Clone, Deserialize)]
pub struct FrontDeskRules {
    /// Store consumption needed (together with the high target) for the
    /// consumption-achievement bonus.
    pub consumption_achievement_min_consumption: Decimal,
    /// Consumption-achievement bonus.
    pub consumption_achievement_bonus: Decimal,
    /// Store performance milestone.
    pub performance_milestone: Decimal,
    /// Bonus for reaching the performance milestone.
    pub performance_milestone_bonus: Decimal,
    /// Bonus when the store reaches its high target.
    pub store_incentive_bonus: Decimal,
}

/// Contents of `rules.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct RulesConfig {
    /// Pool split and eligibility gates.
    pub pools: PoolRules,
    /// Consultant incentive.
    pub incentive: IncentiveRules,
    /// Product qualification.
    pub product: ProductRules,
    /// Front desk conditional bonuses.
    pub front_desk: FrontDeskRules,
}

/// The complete payroll configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct PayrollConfig {
    metadata: SalonMetadata,
    brackets: BracketTables,
    positions: PositionTable,
    rules: RulesConfig,
}

impl PayrollConfig {
    /// Creates a new PayrollConfig from its component parts.
    pub fn new(
        metadata: SalonMetadata,
        brackets: BracketTables,
        positions: PositionTable,
        rules: RulesConfig,
    ) -> Self {
        Self {
            metadata,
            brackets,
            positions,
            rules,
        }
    }

    /// Returns the salon metadata.
    pub fn salon(&self) -> &SalonMetadata {
        &self.metadata
    }

    /// Returns the bracket tables.
    pub fn brackets(&self) -> &BracketTables {
        &self.brackets
    }

    /// Returns the position rates.
    pub fn positions(&self) -> &PositionTable {
        &self.positions
    }

    /// Returns the bonus rules.
    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }
}
