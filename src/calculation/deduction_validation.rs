//! Deduction ceiling validation.
//!
//! Every ceiling is checked independently and all violations are reported
//! together, so an administrator sees every invalid field at once.

use rust_decimal::Decimal;

use crate::error::Violations;
use crate::models::{Deduction, DeductionKind};

/// The permitted range for each deduction ceiling.
///
/// A bound of `None` means the ceiling is unbounded on that side. Lower
/// bounds are exclusive and upper bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeductionLimits {
    /// Exclusive lower bound for the personal deduction.
    pub personal_min: Decimal,
    /// Inclusive upper bound for the personal deduction.
    pub personal_max: Decimal,
    /// Exclusive lower bound for the k-receipt ceiling.
    pub k_receipt_min: Decimal,
    /// Inclusive upper bound for the k-receipt ceiling.
    pub k_receipt_max: Decimal,
    /// Exclusive lower bound for the donation ceiling, if any.
    pub donation_min: Option<Decimal>,
    /// Inclusive upper bound for the donation ceiling.
    pub donation_max: Decimal,
}

/// The limits in force for the current tax year.
pub const DEDUCTION_LIMITS: DeductionLimits = DeductionLimits {
    personal_min: Decimal::from_parts(10_000, 0, 0, false, 0),
    personal_max: Decimal::from_parts(100_000, 0, 0, false, 0),
    k_receipt_min: Decimal::ZERO,
    k_receipt_max: Decimal::from_parts(100_000, 0, 0, false, 0),
    donation_min: None,
    donation_max: Decimal::from_parts(100_000, 0, 0, false, 0),
};

impl Default for DeductionLimits {
    fn default() -> Self {
        DEDUCTION_LIMITS
    }
}

impl DeductionLimits {
    /// Returns true if `amount` is an acceptable ceiling for `kind`.
    ///
    /// # Example
    ///
    /// ```
    /// use ktax::calculation::DEDUCTION_LIMITS;
    /// use ktax::models::DeductionKind;
    /// use rust_decimal::Decimal;
    ///
    /// assert!(DEDUCTION_LIMITS.allows(DeductionKind::Personal, Decimal::from(100_000)));
    /// assert!(!DEDUCTION_LIMITS.allows(DeductionKind::Personal, Decimal::from(10_000)));
    /// assert!(DEDUCTION_LIMITS.allows(DeductionKind::Donation, Decimal::ZERO));
    /// ```
    pub fn allows(&self, kind: DeductionKind, amount: Decimal) -> bool {
        let (min, max) = match kind {
            DeductionKind::Personal => (Some(self.personal_min), self.personal_max),
            DeductionKind::KReceipt => (Some(self.k_receipt_min), self.k_receipt_max),
            DeductionKind::Donation => (self.donation_min, self.donation_max),
        };
        min.is_none_or(|min| amount > min) && amount <= max
    }
}

/// Validates a deduction configuration against [`DEDUCTION_LIMITS`].
///
/// # Returns
///
/// `Ok(())` when every ceiling is in range, otherwise the set of every
/// violated rule.
///
/// # Example
///
/// ```
/// use ktax::calculation::validate_deduction;
/// use ktax::error::Violation;
/// use ktax::models::Deduction;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let mut deduction = Deduction::initial();
/// deduction.personal = Decimal::from_str("100000.1").unwrap();
///
/// let violations = validate_deduction(&deduction).unwrap_err();
/// assert!(violations.contains(Violation::InvalidPersonalDeduction));
/// assert!(!violations.contains(Violation::InvalidKReceiptDeduction));
/// ```
pub fn validate_deduction(deduction: &Deduction) -> Result<(), Violations> {
    validate_deduction_with(deduction, &DEDUCTION_LIMITS)
}

/// Validates a deduction configuration against explicit `limits`.
pub fn validate_deduction_with(
    deduction: &Deduction,
    limits: &DeductionLimits,
) -> Result<(), Violations> {
    DeductionKind::ALL
        .into_iter()
        .filter(|kind| !limits.allows(*kind, deduction.amount(*kind)))
        .map(|kind| kind.violation())
        .collect::<Violations>()
        .into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Violation;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn deduction(personal: &str, k_receipt: &str, donation: &str) -> Deduction {
        Deduction {
            personal: dec(personal),
            k_receipt: dec(k_receipt),
            donation: dec(donation),
        }
    }

    #[test]
    fn test_initial_deduction_is_valid() {
        assert!(validate_deduction(&Deduction::initial()).is_ok());
    }

    #[test]
    fn test_boundaries_that_pass() {
        let cases = [
            deduction("10000.01", "0.01", "0"),
            deduction("100000", "100000", "100000"),
            deduction("60000", "50000", "-1"),
        ];
        for case in cases {
            assert!(validate_deduction(&case).is_ok(), "expected valid: {:?}", case);
        }
    }

    #[test]
    fn test_personal_equal_to_minimum_is_invalid() {
        let violations = validate_deduction(&deduction("10000", "50000", "100000")).unwrap_err();
        assert!(violations.contains(Violation::InvalidPersonalDeduction));
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn test_personal_above_maximum_is_invalid() {
        let violations =
            validate_deduction(&deduction("100000.1", "50000", "100000")).unwrap_err();
        assert!(violations.contains(Violation::InvalidPersonalDeduction));
        assert!(!violations.contains(Violation::InvalidKReceiptDeduction));
        assert!(!violations.contains(Violation::InvalidDonationDeduction));
    }

    #[test]
    fn test_k_receipt_zero_is_invalid() {
        let violations = validate_deduction(&deduction("60000", "0", "100000")).unwrap_err();
        assert!(violations.contains(Violation::InvalidKReceiptDeduction));
    }

    #[test]
    fn test_k_receipt_above_maximum_is_invalid() {
        let violations =
            validate_deduction(&deduction("60000", "100000.01", "100000")).unwrap_err();
        assert!(violations.contains(Violation::InvalidKReceiptDeduction));
    }

    #[test]
    fn test_donation_above_maximum_is_invalid() {
        let violations =
            validate_deduction(&deduction("60000", "50000", "100000.01")).unwrap_err();
        assert!(violations.contains(Violation::InvalidDonationDeduction));
    }

    #[test]
    fn test_all_violations_accumulate() {
        let violations = validate_deduction(&deduction("0", "0", "200000")).unwrap_err();
        assert_eq!(violations.len(), 3);
        assert!(violations.contains(Violation::InvalidPersonalDeduction));
        assert!(violations.contains(Violation::InvalidKReceiptDeduction));
        assert!(violations.contains(Violation::InvalidDonationDeduction));
    }

    #[test]
    fn test_zero_deduction_from_empty_store_is_invalid() {
        let violations = validate_deduction(&Deduction::default()).unwrap_err();
        assert!(violations.contains(Violation::InvalidPersonalDeduction));
        assert!(violations.contains(Violation::InvalidKReceiptDeduction));
        assert!(!violations.contains(Violation::InvalidDonationDeduction));
    }

    #[test]
    fn test_custom_limits_replace_defaults() {
        let limits = DeductionLimits {
            donation_min: Some(Decimal::ZERO),
            ..DEDUCTION_LIMITS
        };
        let violations =
            validate_deduction_with(&deduction("60000", "50000", "0"), &limits).unwrap_err();
        assert!(violations.contains(Violation::InvalidDonationDeduction));
    }
}
