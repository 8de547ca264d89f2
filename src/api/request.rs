//! Request types for the K-Tax API.
//!
//! This module defines the JSON request bodies for the tax calculation and
//! admin deduction endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Allowance, AllowanceType, TaxInformation};

/// Request body for `POST /tax/calculations`.
///
/// `wht` and `allowances` may be omitted; they default to zero and empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxCalculationRequest {
    /// Total income for the tax year.
    pub total_income: Decimal,
    /// Withholding tax already paid.
    #[serde(default)]
    pub wht: Decimal,
    /// Claimed allowances.
    #[serde(default)]
    pub allowances: Vec<AllowanceRequest>,
}

/// One allowance entry in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllowanceRequest {
    /// `"donation"` or `"k-receipt"`.
    #[serde(rename = "allowanceType")]
    pub allowance_type: AllowanceType,
    /// The amount claimed.
    pub amount: Decimal,
}

/// Request body for `POST /admin/deductions/{kind}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeductionRequest {
    /// The new value for the targeted deduction.
    pub amount: Decimal,
}

impl From<AllowanceRequest> for Allowance {
    fn from(req: AllowanceRequest) -> Self {
        Allowance::new(req.allowance_type, req.amount)
    }
}

impl From<TaxCalculationRequest> for TaxInformation {
    fn from(req: TaxCalculationRequest) -> Self {
        TaxInformation {
            total_income: req.total_income,
            wht: req.wht,
            allowances: req.allowances.into_iter().map(Into::into).collect(),
        }
    }
}
