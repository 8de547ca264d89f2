//! Allowance aggregation and capping.
//!
//! Allowance entries are grouped by type and summed, then each group is
//! capped at the deduction ceiling that governs it. Which ceiling governs
//! which type is data, held in [`ALLOWANCE_CEILINGS`].

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{Allowance, AllowanceType, Deduction, DeductionKind};

/// Maps each capped allowance type to the deduction ceiling that bounds it.
///
/// Types missing from this table pass through uncapped.
pub const ALLOWANCE_CEILINGS: &[(AllowanceType, DeductionKind)] = &[
    (AllowanceType::Donation, DeductionKind::Donation),
    (AllowanceType::KReceipt, DeductionKind::KReceipt),
];

/// Returns the ceiling that bounds `allowance_type`, if it is capped.
pub fn allowance_ceiling(allowance_type: AllowanceType, deduction: &Deduction) -> Option<Decimal> {
    ALLOWANCE_CEILINGS
        .iter()
        .find(|(capped, _)| *capped == allowance_type)
        .map(|(_, kind)| deduction.amount(*kind))
}

/// Sums allowance amounts per type.
///
/// Types absent from the input produce no entry.
///
/// # Errors
///
/// Returns [`EngineError::AmountOverflow`] if a per-type sum does not fit in
/// a `Decimal`.
pub fn collapse_allowances(
    allowances: &[Allowance],
) -> EngineResult<BTreeMap<AllowanceType, Decimal>> {
    let mut sums = BTreeMap::new();
    for allowance in allowances {
        let sum = sums.entry(allowance.allowance_type).or_insert(Decimal::ZERO);
        *sum = sum
            .checked_add(allowance.amount)
            .ok_or(EngineError::AmountOverflow { stage: "allowance sum" })?;
    }
    Ok(sums)
}

/// Sums allowance amounts per type and caps each sum at its ceiling.
///
/// # Example
///
/// ```
/// use ktax::calculation::aggregate_allowances;
/// use ktax::models::{Allowance, AllowanceType, Deduction};
/// use rust_decimal::Decimal;
///
/// let allowances = [
///     Allowance::new(AllowanceType::Donation, Decimal::from(80_000)),
///     Allowance::new(AllowanceType::Donation, Decimal::from(70_000)),
/// ];
/// let capped = aggregate_allowances(&allowances, &Deduction::initial())?;
///
/// // 150,000 donated, capped at the 100,000 donation ceiling
/// assert_eq!(capped[&AllowanceType::Donation], Decimal::from(100_000));
/// assert!(!capped.contains_key(&AllowanceType::KReceipt));
/// # Ok::<(), ktax::error::EngineError>(())
/// ```
pub fn aggregate_allowances(
    allowances: &[Allowance],
    deduction: &Deduction,
) -> EngineResult<BTreeMap<AllowanceType, Decimal>> {
    let mut sums = collapse_allowances(allowances)?;
    for (allowance_type, amount) in sums.iter_mut() {
        if let Some(ceiling) = allowance_ceiling(*allowance_type, deduction) {
            *amount = (*amount).min(ceiling);
        }
    }
    Ok(sums)
}

/// Returns the total deductible allowance after capping.
pub fn total_allowance(allowances: &[Allowance], deduction: &Deduction) -> EngineResult<Decimal> {
    aggregate_allowances(allowances, deduction)?
        .values()
        .try_fold(Decimal::ZERO, |total, amount| total.checked_add(*amount))
        .ok_or(EngineError::AmountOverflow { stage: "allowance total" })
}
