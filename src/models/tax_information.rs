//! Tax information model and related types.
//!
//! This module defines the [`TaxInformation`] request carried into a tax
//! calculation and the [`Allowance`] entries it may claim.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The category of a deduction-eligible expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AllowanceType {
    /// Charitable donation.
    #[serde(rename = "donation")]
    Donation,
    /// Spending under the k-receipt (e-receipt) scheme.
    #[serde(rename = "k-receipt")]
    KReceipt,
}

/// One claimed deduction-eligible expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allowance {
    /// The category of the expense.
    #[serde(rename = "allowanceType")]
    pub allowance_type: AllowanceType,
    /// The amount claimed.
    pub amount: Decimal,
}

impl Allowance {
    /// Creates an allowance entry.
    pub fn new(allowance_type: AllowanceType, amount: Decimal) -> Self {
        Self {
            allowance_type,
            amount,
        }
    }
}

/// A single tax computation request.
///
/// A request may claim several allowances of the same type; they are summed,
/// not overwritten, when the calculation runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxInformation {
    /// Total income for the tax year.
    pub total_income: Decimal,
    /// Withholding tax already paid.
    #[serde(default)]
    pub wht: Decimal,
    /// Claimed allowances.
    #[serde(default)]
    pub allowances: Vec<Allowance>,
}

impl TaxInformation {
    /// Creates tax information with no withholding and no allowances.
    ///
    /// # Example
    ///
    /// ```
    /// use ktax::models::{AllowanceType, TaxInformation};
    /// use rust_decimal::Decimal;
    ///
    /// let info = TaxInformation::new(Decimal::from(500_000))
    ///     .with_wht(Decimal::from(25_000))
    ///     .with_allowance(AllowanceType::Donation, Decimal::from(10_000));
    ///
    /// assert_eq!(info.wht, Decimal::from(25_000));
    /// assert_eq!(info.allowances.len(), 1);
    /// ```
    pub fn new(total_income: Decimal) -> Self {
        Self {
            total_income,
            wht: Decimal::ZERO,
            allowances: Vec::new(),
        }
    }

    /// Sets the withholding tax.
    pub fn with_wht(mut self, wht: Decimal) -> Self {
        self.wht = wht;
        self
    }

    /// Appends an allowance entry.
    pub fn with_allowance(mut self, allowance_type: AllowanceType, amount: Decimal) -> Self {
        self.allowances.push(Allowance::new(allowance_type, amount));
        self
    }
}
