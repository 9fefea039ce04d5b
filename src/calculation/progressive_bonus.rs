//! Progressive (marginal bracket) bonus calculation.
//!
//! An amount is split across the brackets of a [`BracketTable`] and each
//! slice earns only its own bracket's rate, in the manner of income tax
//! brackets. Any part of the amount above the last bounded bracket earns
//! nothing.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::BracketTable;

/// The part of an amount that fell inside one bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BracketSlice {
    /// The bracket's lower bound.
    pub lower: Decimal,
    /// The bracket's upper bound, `None` if unbounded.
    pub upper: Option<Decimal>,
    /// The portion of the amount taxed in this bracket.
    pub taxable: Decimal,
    /// The bracket's rate.
    pub rate: Decimal,
    /// `taxable * rate`.
    pub bonus: Decimal,
}

/// Splits an amount into the bracket slices it earns on.
///
/// Brackets are visited in order. A bracket contributes when the amount is
/// above its lower bound; iteration stops at the first bracket whose upper
/// bound covers the amount. Brackets must already be sorted; the order is
/// not checked here.
pub fn progressive_bonus_breakdown(amount: Decimal, table: &BracketTable) -> Vec<BracketSlice> {
    let mut slices = Vec::new();

    for bracket in table.brackets() {
        if amount > bracket.lower {
            let top = match bracket.upper {
                Some(upper) => amount.min(upper),
                None => amount,
            };
            let taxable = top - bracket.lower;
            slices.push(BracketSlice {
                lower: bracket.lower,
                upper: bracket.upper,
                taxable,
                rate: bracket.rate,
                bonus: taxable * bracket.rate,
            });
        }

        let consumed = bracket.upper.is_none_or(|upper| amount <= upper);
        if consumed {
            break;
        }
    }

    slices
}

/// Calculates the cumulative progressive bonus for an amount.
///
/// Returns zero for amounts at or below zero.
///
/// # Examples
///
/// ```
/// use salon_payroll::calculation::progressive_bonus;
/// use salon_payroll::config::{Bracket, BracketTable};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let table = BracketTable::new(vec![
///     Bracket::new(dec("0"), dec("100"), dec("0.1")),
///     Bracket::new(dec("101"), dec("200"), dec("0.2")),
/// ]);
///
/// // 100 * 0.1 + (150 - 101) * 0.2
/// assert_eq!(progressive_bonus(dec("150"), &table), dec("19.8"));
/// ```
pub fn progressive_bonus(amount: Decimal, table: &BracketTable) -> Decimal {
    progressive_bonus_breakdown(amount, table)
        .iter()
        .map(|slice| slice.bonus)
        .sum()
}
