//! Validation of caller-supplied tax information.

use rust_decimal::Decimal;

use crate::error::{Violation, Violations};
use crate::models::TaxInformation;

/// Validates a tax computation request.
///
/// All rules are checked and every violation is returned together:
///
/// - total income must not be negative
/// - withholding must not be negative, and must not exceed a positive total
///   income
/// - no allowance amount may be negative
///
/// # Example
///
/// ```
/// use ktax::calculation::validate_tax_information;
/// use ktax::error::Violation;
/// use ktax::models::TaxInformation;
/// use rust_decimal::Decimal;
///
/// let info = TaxInformation::new(Decimal::from(100)).with_wht(Decimal::from(101));
/// let violations = validate_tax_information(&info).unwrap_err();
/// assert!(violations.contains(Violation::InvalidWht));
/// ```
pub fn validate_tax_information(info: &TaxInformation) -> Result<(), Violations> {
    let mut violations = Violations::new();

    if info.total_income < Decimal::ZERO {
        violations.push(Violation::InvalidTotalIncome);
    }

    if info.wht < Decimal::ZERO {
        violations.push(Violation::InvalidWht);
    }

    if info.total_income > Decimal::ZERO && info.wht > info.total_income {
        violations.push(Violation::InvalidWht);
    }

    if info
        .allowances
        .iter()
        .any(|allowance| allowance.amount < Decimal::ZERO)
    {
        violations.push(Violation::InvalidAllowanceAmount);
    }

    violations.into_result()
}
