//! Tax result models.
//!
//! This module contains the [`TaxResult`] produced by a single calculation,
//! its per-bracket [`TaxLevel`] breakdown, and the [`CsvTaxResponse`]
//! produced by a batch calculation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The tax contributed by one bracket of the schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxLevel {
    /// The bracket's human-readable income range.
    pub level: String,
    /// Tax accrued within this bracket.
    pub tax: Decimal,
}

/// The outcome of a single tax calculation.
///
/// At most one of `tax` and `tax_refund` is positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    /// Tax still payable after withholding.
    pub tax: Decimal,
    /// Amount refunded when withholding exceeds the tax due.
    #[serde(rename = "taxRefund")]
    pub tax_refund: Decimal,
    /// One entry per bracket, in schedule order, zero entries included.
    #[serde(rename = "taxLevel")]
    pub tax_levels: Vec<TaxLevel>,
}

impl TaxResult {
    /// Sums the per-bracket contributions, i.e. the tax due before
    /// withholding is applied.
    pub fn gross_tax(&self) -> Decimal {
        self.tax_levels.iter().map(|level| level.tax).sum()
    }
}

/// One row of a batch calculation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvTaxRecord {
    /// The row's total income, echoed back.
    pub total_income: Decimal,
    /// Tax payable.
    pub tax: Decimal,
    /// Tax refund.
    pub tax_refund: Decimal,
}

/// The result of a batch calculation, one record per input row, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvTaxResponse {
    /// Per-row results.
    pub taxes: Vec<CsvTaxRecord>,
}
