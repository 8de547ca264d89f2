//! Tax computation.
//!
//! This module ties validation, allowance capping and the bracket schedule
//! together into a single [`calculate_tax`] call, and nets the result
//! against withholding tax.

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{Deduction, TaxInformation, TaxResult};

use super::allowance::total_allowance;
use super::deduction_validation::validate_deduction;
use super::tax_bracket::TaxSchedule;
use super::tax_information_validation::validate_tax_information;

/// Computes the income subject to the bracket schedule.
///
/// The result is clamped at zero; deductions never produce negative income.
///
/// # Example
///
/// ```
/// use ktax::calculation::net_income;
/// use rust_decimal::Decimal;
///
/// let net = net_income(Decimal::from(50_000), Decimal::from(60_000), Decimal::ZERO)?;
/// assert_eq!(net, Decimal::ZERO);
/// # Ok::<(), ktax::error::EngineError>(())
/// ```
pub fn net_income(
    total_income: Decimal,
    personal: Decimal,
    total_allowance: Decimal,
) -> EngineResult<Decimal> {
    total_income
        .checked_sub(personal)
        .and_then(|remaining| remaining.checked_sub(total_allowance))
        .map(|net| net.max(Decimal::ZERO))
        .ok_or(EngineError::AmountOverflow { stage: "net income" })
}

/// Calculates tax for `info` under the Thai personal income tax schedule.
///
/// # Errors
///
/// - [`EngineError::InvalidTaxInformation`] if `info` breaks any rule. This
///   is checked first; if it fails the deduction is not examined.
/// - [`EngineError::InvalidDeduction`] if `deduction` breaks any rule.
/// - [`EngineError::AmountOverflow`] if an amount is too large for the
///   bracket arithmetic.
///
/// # Example
///
/// ```
/// use ktax::calculation::calculate_tax;
/// use ktax::models::{Deduction, TaxInformation};
/// use rust_decimal::Decimal;
///
/// let info = TaxInformation::new(Decimal::from(500_000)).with_wht(Decimal::from(25_000));
/// let result = calculate_tax(&info, &Deduction::initial()).unwrap();
///
/// assert_eq!(result.tax, Decimal::from(4_000));
/// assert_eq!(result.tax_refund, Decimal::ZERO);
/// ```
pub fn calculate_tax(info: &TaxInformation, deduction: &Deduction) -> EngineResult<TaxResult> {
    calculate_tax_with_schedule(info, deduction, &TaxSchedule::personal_income())
}

/// Calculates tax for `info` under an explicit bracket schedule.
pub fn calculate_tax_with_schedule(
    info: &TaxInformation,
    deduction: &Deduction,
    schedule: &TaxSchedule<'_>,
) -> EngineResult<TaxResult> {
    validate_tax_information(info)
        .map_err(|violations| EngineError::InvalidTaxInformation { violations })?;
    validate_deduction(deduction)
        .map_err(|violations| EngineError::InvalidDeduction { violations })?;

    let allowance = total_allowance(&info.allowances, deduction)?;
    let net = net_income(info.total_income, deduction.personal, allowance)?;
    let brackets = schedule.apply(net)?;

    let (tax, tax_refund) = net_against_wht(brackets.gross_tax, info.wht)?;

    debug!(
        total_income = %info.total_income,
        allowance = %allowance,
        net_income = %net,
        gross_tax = %brackets.gross_tax,
        wht = %info.wht,
        "Tax calculated"
    );

    Ok(TaxResult {
        tax,
        tax_refund,
        tax_levels: brackets.tax_levels,
    })
}

/// Splits `gross_tax - wht` into `(tax, tax_refund)`; at most one is positive.
fn net_against_wht(gross_tax: Decimal, wht: Decimal) -> EngineResult<(Decimal, Decimal)> {
    let net = gross_tax
        .checked_sub(wht)
        .ok_or(EngineError::AmountOverflow { stage: "withholding" })?;
    if net < Decimal::ZERO {
        Ok((Decimal::ZERO, -net))
    } else {
        Ok((net, Decimal::ZERO))
    }
}
