//! HTTP API module for the K-Tax engine.
//!
//! This module provides the REST endpoints for single and batch tax
//! calculation and the authenticated admin endpoints that adjust the
//! deduction configuration.

mod auth;
mod handlers;
mod request;
mod response;
mod state;

pub use auth::require_admin;
pub use handlers::{TAX_FILE_FIELD, create_router};
pub use request::{AllowanceRequest, DeductionRequest, TaxCalculationRequest};
pub use response::{ApiError, ApiErrorResponse, DeductionResponse};
pub use state::AppState;
