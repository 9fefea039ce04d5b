//! HTTP request handlers for the payroll API.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::run_payroll;

use super::request::CalculationRequest;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .with_state(state)
}

/// Handler for POST /calculate endpoint.
///
/// Accepts a workbook and run parameters and returns the payroll result.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = rejection_error(rejection);
            warn!(
                correlation_id = %correlation_id,
                code = %error.code,
                error = %error.message,
                "Rejected request body"
            );
            return json_error(StatusCode::BAD_REQUEST, error);
        }
    };

    let (workbook, input) = match request.into_parts() {
        Ok(parts) => parts,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Invalid parameters");
            return engine_error(err);
        }
    };

    let start_time = Instant::now();
    match run_payroll(&workbook, &input, state.config().config()) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                sheet = %result.sheet_name,
                salary_lines = result.salary_lines.len(),
                warnings = result.audit_trace.warnings.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Calculation completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(result),
            )
                .into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Calculation failed");
            engine_error(err)
        }
    }
}

fn rejection_error(rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

fn engine_error(err: crate::error::EngineError) -> Response {
    let api_error: ApiErrorResponse = err.into();
    json_error(api_error.status, api_error.error)
}

fn json_error(status: StatusCode, error: ApiError) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}
