//! HTTP request handlers for the K-Tax API.
//!
//! This module contains the handler functions for all API endpoints and the
//! router that wires them together.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Multipart, Path, State, multipart::MultipartRejection, rejection::JsonRejection,
    },
    http::{StatusCode, header},
    middleware,
    response::{IntoResponse, Response},
    routing::post,
};
use rust_decimal::Decimal;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::calculation::{
    DEDUCTION_LIMITS, calculate_tax, calculate_tax_batch, validate_tax_information,
};
use crate::csv_loader;
use crate::models::{Deduction, DeductionKind, TaxInformation};

use super::auth::require_admin;
use super::request::{DeductionRequest, TaxCalculationRequest};
use super::response::{ApiError, ApiErrorResponse, DeductionResponse};
use super::state::AppState;

/// Multipart field carrying the batch CSV.
pub const TAX_FILE_FIELD: &str = "taxFile";

/// Creates the API router with all endpoints.
///
/// Admin routes sit under `/admin` behind HTTP Basic authentication.
pub fn create_router(state: AppState) -> Router {
    let admin = Router::new()
        .route("/deductions/:kind", post(set_deduction_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .route("/tax/calculations", post(calculate_tax_handler))
        .route("/tax/calculations/upload-csv", post(upload_csv_handler))
        .nest("/admin", admin)
        .with_state(state)
}

fn json_ok<T: serde::Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

async fn fetch_deduction(state: &AppState, correlation_id: Uuid) -> Result<Deduction, ApiErrorResponse> {
    state.store().get_deduction().await.map_err(|err| {
        error!(correlation_id = %correlation_id, error = %err, "Failed to get deduction");
        ApiErrorResponse::internal(ApiError::deduction_unavailable())
    })
}

/// Handler for `POST /tax/calculations`.
///
/// Tax information is validated before the deduction is fetched, so bad
/// input never touches the store.
async fn calculate_tax_handler(
    State(state): State<AppState>,
    payload: Result<Json<TaxCalculationRequest>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing tax calculation request");

    let Json(request) = payload.map_err(|rejection| {
        warn!(correlation_id = %correlation_id, error = %rejection.body_text(), "Rejected request body");
        ApiErrorResponse::bad_request(json_rejection_error(rejection))
    })?;
    let info: TaxInformation = request.into();

    validate_tax_information(&info).map_err(|violations| {
        warn!(correlation_id = %correlation_id, violations = %violations, "Invalid tax information");
        ApiErrorResponse::bad_request(ApiError::invalid_tax_information(violations.to_string()))
    })?;

    let deduction = fetch_deduction(&state, correlation_id).await?;

    let start_time = Instant::now();
    let result = calculate_tax(&info, &deduction).map_err(|err| {
        error!(correlation_id = %correlation_id, error = %err, "Tax calculation failed");
        ApiErrorResponse::from(err)
    })?;

    info!(
        correlation_id = %correlation_id,
        total_income = %info.total_income,
        tax = %result.tax,
        tax_refund = %result.tax_refund,
        duration_us = start_time.elapsed().as_micros(),
        "Tax calculation completed successfully"
    );
    Ok(json_ok(result))
}

fn json_rejection_error(rejection: JsonRejection) -> ApiError {
    match rejection {
        // Well-formed JSON with the wrong shape: missing totalIncome, unknown
        // allowance type, non-numeric amounts.
        JsonRejection::JsonDataError(err) => ApiError::invalid_tax_information(err.body_text()),
        other => ApiError::unreadable_body(other.body_text()),
    }
}

/// Handler for `POST /tax/calculations/upload-csv`.
///
/// Reads the `taxFile` part, parses every row, then calculates the batch
/// against a single deduction snapshot.
async fn upload_csv_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing tax CSV upload");

    let mut multipart = multipart.map_err(|rejection| {
        warn!(correlation_id = %correlation_id, error = %rejection.body_text(), "Rejected upload");
        ApiErrorResponse::bad_request(ApiError::upload_failed(rejection.body_text()))
    })?;

    let contents = read_tax_file(&mut multipart).await.map_err(|err| {
        warn!(correlation_id = %correlation_id, error = %err.error.message, "Cannot read tax file");
        err
    })?;

    let records = csv_loader::load_from_reader(contents.as_ref()).map_err(|err| {
        warn!(correlation_id = %correlation_id, error = %err, "Invalid tax CSV");
        ApiErrorResponse::from(err)
    })?;

    let deduction = fetch_deduction(&state, correlation_id).await?;

    let start_time = Instant::now();
    let response = calculate_tax_batch(&records, &deduction).map_err(|err| {
        error!(correlation_id = %correlation_id, error = %err, "Batch calculation failed");
        ApiErrorResponse::from(err)
    })?;

    info!(
        correlation_id = %correlation_id,
        records = response.taxes.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Batch calculation completed successfully"
    );
    Ok(json_ok(response))
}

async fn read_tax_file(multipart: &mut Multipart) -> Result<axum::body::Bytes, ApiErrorResponse> {
    loop {
        let field = multipart
            .next_field()
            .await
            .map_err(|err| ApiErrorResponse::bad_request(ApiError::upload_failed(err.body_text())))?;

        let Some(field) = field else {
            return Err(ApiErrorResponse::bad_request(ApiError::upload_failed(format!(
                "missing '{}' field",
                TAX_FILE_FIELD
            ))));
        };

        if field.name() == Some(TAX_FILE_FIELD) {
            return field
                .bytes()
                .await
                .map_err(|err| ApiErrorResponse::bad_request(ApiError::file_unreadable(err.body_text())));
        }
    }
}

/// Handler for `POST /admin/deductions/{kind}`.
///
/// Only the targeted kind's range is checked; the store is not read, so
/// other stored values never block the update.
async fn set_deduction_handler(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    payload: Result<Json<DeductionRequest>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();

    let kind = DeductionKind::from_name(&kind).ok_or_else(|| ApiErrorResponse {
        status: StatusCode::NOT_FOUND,
        error: ApiError::unknown_deduction(&kind),
    })?;
    info!(correlation_id = %correlation_id, deduction = kind.name(), "Processing deduction update");

    let Json(request) = payload.map_err(|rejection| {
        warn!(correlation_id = %correlation_id, error = %rejection.body_text(), "Rejected request body");
        ApiErrorResponse::bad_request(ApiError::unreadable_body(rejection.body_text()))
    })?;

    if request.amount < Decimal::ZERO {
        warn!(correlation_id = %correlation_id, amount = %request.amount, "Negative deduction amount");
        return Err(ApiErrorResponse::bad_request(ApiError::invalid_input()));
    }

    if !DEDUCTION_LIMITS.allows(kind, request.amount) {
        warn!(
            correlation_id = %correlation_id,
            deduction = kind.name(),
            amount = %request.amount,
            "Deduction out of range"
        );
        return Err(ApiErrorResponse::bad_request(ApiError::invalid_deduction(
            kind.violation(),
        )));
    }

    state
        .store()
        .set_deduction(kind, request.amount)
        .await
        .map_err(|err| {
            error!(correlation_id = %correlation_id, error = %err, "Failed to set deduction");
            ApiErrorResponse::internal(ApiError::deduction_update_failed())
        })?;

    info!(
        correlation_id = %correlation_id,
        deduction = kind.name(),
        amount = %request.amount,
        "Deduction updated successfully"
    );
    Ok(json_ok(DeductionResponse {
        kind,
        amount: request.amount,
    }))
}
