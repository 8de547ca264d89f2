//! Deduction ceiling model.
//!
//! A [`Deduction`] holds the three administrator-configured ceilings that
//! bound how much of a taxpayer's income can be deducted. It is loaded from
//! the deduction store for every calculation and treated as an immutable
//! snapshot for the duration of that calculation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Violation;

/// Personal deduction seeded into a fresh store.
pub const DEFAULT_PERSONAL_DEDUCTION: Decimal = Decimal::from_parts(60_000, 0, 0, false, 0);

/// K-receipt ceiling seeded into a fresh store.
pub const DEFAULT_K_RECEIPT_DEDUCTION: Decimal = Decimal::from_parts(50_000, 0, 0, false, 0);

/// Donation ceiling seeded into a fresh store.
pub const DEFAULT_DONATION_DEDUCTION: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);

/// The deduction ceilings configured by an administrator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deduction {
    /// Flat personal deduction subtracted from every taxpayer's income.
    pub personal: Decimal,
    /// Ceiling for the k-receipt allowance.
    pub k_receipt: Decimal,
    /// Ceiling for the donation allowance.
    pub donation: Decimal,
}

impl Deduction {
    /// Returns the ceilings a new installation starts with.
    ///
    /// # Example
    ///
    /// ```
    /// use ktax::models::Deduction;
    /// use rust_decimal::Decimal;
    ///
    /// let deduction = Deduction::initial();
    /// assert_eq!(deduction.personal, Decimal::from(60_000));
    /// assert_eq!(deduction.k_receipt, Decimal::from(50_000));
    /// assert_eq!(deduction.donation, Decimal::from(100_000));
    /// ```
    pub const fn initial() -> Self {
        Self {
            personal: DEFAULT_PERSONAL_DEDUCTION,
            k_receipt: DEFAULT_K_RECEIPT_DEDUCTION,
            donation: DEFAULT_DONATION_DEDUCTION,
        }
    }

    /// Returns the value configured for `kind`.
    pub fn amount(&self, kind: DeductionKind) -> Decimal {
        match kind {
            DeductionKind::Personal => self.personal,
            DeductionKind::KReceipt => self.k_receipt,
            DeductionKind::Donation => self.donation,
        }
    }

    /// Overwrites the value configured for `kind`.
    pub fn set(&mut self, kind: DeductionKind, amount: Decimal) {
        match kind {
            DeductionKind::Personal => self.personal = amount,
            DeductionKind::KReceipt => self.k_receipt = amount,
            DeductionKind::Donation => self.donation = amount,
        }
    }

    /// Returns a copy with the value for `kind` replaced.
    pub fn with(mut self, kind: DeductionKind, amount: Decimal) -> Self {
        self.set(kind, amount);
        self
    }
}

/// Identifies one of the configurable deduction ceilings.
///
/// The store keeps one row per kind, keyed by [`DeductionKind::name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DeductionKind {
    /// The personal deduction.
    #[serde(rename = "personal")]
    Personal,
    /// The k-receipt ceiling.
    #[serde(rename = "k-receipt")]
    KReceipt,
    /// The donation ceiling.
    #[serde(rename = "donation")]
    Donation,
}

impl DeductionKind {
    /// All kinds, in storage order.
    pub const ALL: [DeductionKind; 3] = [
        DeductionKind::Personal,
        DeductionKind::KReceipt,
        DeductionKind::Donation,
    ];

    /// The row name used by the deduction store.
    pub fn name(&self) -> &'static str {
        match self {
            DeductionKind::Personal => "personal",
            DeductionKind::KReceipt => "k-receipt",
            DeductionKind::Donation => "donation",
        }
    }

    /// Looks up a kind by its store row name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// The violation raised when this ceiling is out of range.
    pub fn violation(&self) -> Violation {
        match self {
            DeductionKind::Personal => Violation::InvalidPersonalDeduction,
            DeductionKind::KReceipt => Violation::InvalidKReceiptDeduction,
            DeductionKind::Donation => Violation::InvalidDonationDeduction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_round_trip() {
        for kind in DeductionKind::ALL {
            assert_eq!(DeductionKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(DeductionKind::from_name("unknown"), None);
    }

    #[test]
    fn test_with_replaces_only_target_kind() {
        let deduction = Deduction::initial().with(DeductionKind::KReceipt, Decimal::from(70_000));

        assert_eq!(deduction.personal, DEFAULT_PERSONAL_DEDUCTION);
        assert_eq!(deduction.k_receipt, Decimal::from(70_000));
        assert_eq!(deduction.donation, DEFAULT_DONATION_DEDUCTION);
    }

    #[test]
    fn test_amount_reads_each_kind() {
        let deduction = Deduction::initial();
        assert_eq!(deduction.amount(DeductionKind::Personal), Decimal::from(60_000));
        assert_eq!(deduction.amount(DeductionKind::KReceipt), Decimal::from(50_000));
        assert_eq!(deduction.amount(DeductionKind::Donation), Decimal::from(100_000));
    }

    #[test]
    fn test_kind_violation_mapping() {
        assert_eq!(
            DeductionKind::Personal.violation(),
            Violation::InvalidPersonalDeduction
        );
        assert_eq!(
            DeductionKind::KReceipt.violation(),
            Violation::InvalidKReceiptDeduction
        );
        assert_eq!(
            DeductionKind::Donation.violation(),
            Violation::InvalidDonationDeduction
        );
    }

    #[test]
    fn test_serialize_uses_camel_case_keys() {
        let json = serde_json::to_value(Deduction::initial()).unwrap();
        assert_eq!(json["personal"], 60000.0);
        assert_eq!(json["kReceipt"], 50000.0);
        assert_eq!(json["donation"], 100000.0);
    }
}
