//! Response types for the K-Tax API.
//!
//! This module defines the error body every endpoint returns on failure, the
//! mapping from engine and CSV errors to HTTP statuses, and the admin
//! deduction response.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::csv_loader::CsvError;
use crate::error::{EngineError, Violation};
use crate::models::DeductionKind;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// The request body could not be read as JSON.
    pub fn unreadable_body(details: impl Into<String>) -> Self {
        Self::with_details("INVALID_REQUEST_BODY", "cannot reading request body", details)
    }

    /// The tax information broke one or more rules.
    pub fn invalid_tax_information(details: impl Into<String>) -> Self {
        Self::with_details("INVALID_TAX_INFORMATION", "invalid tax information", details)
    }

    /// The deduction configuration could not be read from the store.
    pub fn deduction_unavailable() -> Self {
        Self::new("DEDUCTION_UNAVAILABLE", "error getting deduction")
    }

    /// The deduction configuration could not be written to the store.
    pub fn deduction_update_failed() -> Self {
        Self::new("DEDUCTION_UPDATE_FAILED", "error setting deduction")
    }

    /// The calculation could not be completed.
    pub fn calculation_failed(details: impl Into<String>) -> Self {
        Self::with_details("CALCULATION_ERROR", "error calculating tax", details)
    }

    /// An admin amount is negative.
    pub fn invalid_input() -> Self {
        Self::new("INVALID_INPUT", "invalid input")
    }

    /// A new deduction value is out of range for its kind.
    pub fn invalid_deduction(violation: Violation) -> Self {
        Self::new("INVALID_DEDUCTION", violation.message())
    }

    /// The multipart upload is missing or malformed.
    pub fn upload_failed(details: impl Into<String>) -> Self {
        Self::with_details("UPLOAD_ERROR", "cannot uploading file", details)
    }

    /// The uploaded file could not be read.
    pub fn file_unreadable(details: impl Into<String>) -> Self {
        Self::with_details("FILE_READ_ERROR", "cannot reading file", details)
    }

    /// The admin route does not name a known deduction.
    pub fn unknown_deduction(name: &str) -> Self {
        Self::with_details(
            "DEDUCTION_NOT_FOUND",
            format!("unknown deduction: {}", name),
            "Supported deductions are 'personal', 'k-receipt' and 'donation'",
        )
    }

    /// Basic authentication failed.
    pub fn unauthorized() -> Self {
        Self::new("UNAUTHORIZED", "unauthorized")
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }

    /// A 500 response.
    pub fn internal(error: ApiError) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match &error {
            EngineError::InvalidTaxInformation { violations } => {
                Self::bad_request(ApiError::invalid_tax_information(violations.to_string()))
            }
            EngineError::AmountOverflow { .. } => {
                Self::bad_request(ApiError::invalid_tax_information(error.to_string()))
            }
            // A bad deduction comes from stored configuration, not the caller.
            EngineError::InvalidDeduction { .. } | EngineError::BatchCalculation { .. } => {
                Self::internal(ApiError::calculation_failed(error.to_string()))
            }
            EngineError::ConfigParseError { .. } => Self::internal(ApiError::with_details(
                "CONFIG_ERROR",
                "Configuration error",
                error.to_string(),
            )),
        }
    }
}

impl From<CsvError> for ApiErrorResponse {
    fn from(error: CsvError) -> Self {
        let (code, message) = match &error {
            CsvError::Read(_) => ("CSV_READ_ERROR", "cannot reading csv"),
            CsvError::InvalidHeader => ("INVALID_CSV_HEADER", "invalid csv header"),
            CsvError::FieldCount { .. } | CsvError::InvalidNumber { .. } => {
                ("CSV_PARSE_ERROR", "cannot parsing data")
            }
        };
        Self::bad_request(ApiError::with_details(code, message, error.to_string()))
    }
}

/// Response body for a successful admin deduction update.
///
/// Serializes as a single field named after the deduction, e.g.
/// `{"personalDeduction": 70000.0}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeductionResponse {
    /// The deduction that was updated.
    pub kind: DeductionKind,
    /// Its new value.
    pub amount: Decimal,
}

impl DeductionResponse {
    /// The JSON field carrying the amount.
    pub fn field_name(&self) -> &'static str {
        match self.kind {
            DeductionKind::Personal => "personalDeduction",
            DeductionKind::KReceipt => "kReceipt",
            DeductionKind::Donation => "donation",
        }
    }
}

impl Serialize for DeductionResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.field_name(), &self.amount)?;
        map.end()
    }
}
