//! HTTP request handlers for the Payroll Generation Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use super::request::GeneratePayslipBody;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payslips", post(generate_payslip_handler))
        .route("/payslips/:id", get(get_payslip_handler))
        .route("/payslips/:id/document", get(payslip_document_handler))
        .route("/employees/:id/payslips", get(list_payslips_handler))
        .with_state(state)
}

/// Query string for the payslip listing endpoint.
#[derive(Debug, Deserialize)]
struct ListQuery {
    /// Only return this many of the most recent payslips.
    limit: Option<usize>,
}

/// Handler for POST /payslips.
///
/// Generates the payslip for an employee and month and returns it with its
/// calculation trail.
async fn generate_payslip_handler(
    State(state): State<AppState>,
    payload: Result<Json<GeneratePayslipBody>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payslip generation request");

    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            return ApiErrorResponse::bad_request(rejection_to_error(correlation_id, rejection))
                .into_response();
        }
    };

    let start_time = Instant::now();
    let employee_id = body.employee_id.clone();
    match state.service().generate_payslip(body.into()).await {
        Ok(generated) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %employee_id,
                payslip_id = generated.payslip.id,
                total_pay = %generated.payslip.total_pay,
                duration_us = start_time.elapsed().as_micros(),
                "Payslip generated"
            );
            (
                StatusCode::CREATED,
                [(header::CONTENT_TYPE, "application/json")],
                Json(generated),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                employee_id = %employee_id,
                error = %err,
                "Payslip generation failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for GET /payslips/:id.
async fn get_payslip_handler(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let payslip_id = match path {
        Ok(Path(id)) => id,
        Err(rejection) => return invalid_path(correlation_id, rejection),
    };

    match state.service().get_payslip(payslip_id).await {
        Ok(payslip) => {
            info!(
                correlation_id = %correlation_id,
                payslip_id,
                "Payslip fetched"
            );
            (StatusCode::OK, Json(payslip)).into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                payslip_id,
                error = %err,
                "Payslip lookup failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for GET /payslips/:id/document.
///
/// Returns the encoded document as an attachment.
async fn payslip_document_handler(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let payslip_id = match path {
        Ok(Path(id)) => id,
        Err(rejection) => return invalid_path(correlation_id, rejection),
    };

    match state.service().render_payslip_document(payslip_id).await {
        Ok(rendered) => {
            info!(
                correlation_id = %correlation_id,
                payslip_id,
                file_name = %rendered.file_name,
                "Payslip document rendered"
            );
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, rendered.content_type.to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", rendered.file_name),
                    ),
                ],
                rendered.bytes,
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                payslip_id,
                error = %err,
                "Payslip document failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for GET /employees/:id/payslips.
///
/// Lists the employee's payslips, most recent period first. `?limit=N`
/// restricts the list to the N most recent.
async fn list_payslips_handler(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let employee_id = match path {
        Ok(Path(id)) => id,
        Err(rejection) => return invalid_path(correlation_id, rejection),
    };
    let limit = match query {
        Ok(Query(query)) => query.limit,
        Err(rejection) => {
            let body_text = rejection.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "Invalid query string"
            );
            return ApiErrorResponse::bad_request(ApiError::validation_error(body_text))
                .into_response();
        }
    };

    let result = match limit {
        Some(limit) => state.service().recent_payslips(&employee_id, limit).await,
        None => state.service().list_payslips(&employee_id).await,
    };

    match result {
        Ok(payslips) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %employee_id,
                count = payslips.len(),
                "Payslips listed"
            );
            (StatusCode::OK, Json(payslips)).into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                employee_id = %employee_id,
                error = %err,
                "Payslip listing failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

fn rejection_to_error(correlation_id: Uuid, rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries the detailed serde error
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

fn invalid_path(correlation_id: Uuid, rejection: PathRejection) -> Response {
    let body_text = rejection.body_text();
    warn!(
        correlation_id = %correlation_id,
        error = %body_text,
        "Invalid path parameter"
    );
    ApiErrorResponse::bad_request(ApiError::validation_error(body_text)).into_response()
}
