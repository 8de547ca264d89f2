//! Core data models for the K-Tax engine.
//!
//! This module contains all the domain models used throughout the engine.

mod deduction;
mod tax_information;
mod tax_result;

pub use deduction::{
    DEFAULT_DONATION_DEDUCTION, DEFAULT_K_RECEIPT_DEDUCTION, DEFAULT_PERSONAL_DEDUCTION,
    Deduction, DeductionKind,
};
pub use tax_information::{Allowance, AllowanceType, TaxInformation};
pub use tax_result::{CsvTaxRecord, CsvTaxResponse, TaxLevel, TaxResult};
