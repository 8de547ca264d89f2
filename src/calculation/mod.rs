//! Calculation logic for the K-Tax engine.
//!
//! This module contains the pure tax computation: deduction and tax
//! information validation, allowance aggregation and capping, progressive
//! bracket tax, the single-record orchestrator that nets tax against
//! withholding, and the all-or-nothing batch variant.

mod allowance;
mod batch;
mod deduction_validation;
mod tax;
mod tax_bracket;
mod tax_information_validation;

pub use allowance::{
    ALLOWANCE_CEILINGS, aggregate_allowances, allowance_ceiling, collapse_allowances,
    total_allowance,
};
pub use batch::calculate_tax_batch;
pub use deduction_validation::{
    DEDUCTION_LIMITS, DeductionLimits, validate_deduction, validate_deduction_with,
};
pub use tax::{calculate_tax, calculate_tax_with_schedule, net_income};
pub use tax_bracket::{
    BracketTaxResult, PERSONAL_INCOME_TAX_BRACKETS, TaxBracket, TaxSchedule, tax_for_bracket,
};
pub use tax_information_validation::validate_tax_information;
