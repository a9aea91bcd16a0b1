//! HTTP request handlers for the meal-break audit API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    body::Bytes,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::audit::run_audit;
use crate::config::{ConfigLoader, DEFAULT_PROFILE, InputSchema, RuleOverrides};
use crate::error::{AuditError, AuditResult};
use crate::models::{AuditReport, RawTable};
use crate::table::{read_table, write_summary, write_violations};

use super::request::{AuditRequest, CsvAuditQuery, OutputFormat};
use super::response::{ApiError, ApiErrorResponse, ProfileList};
use super::state::AppState;

const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/audit", post(audit_handler))
        .route("/audit/csv", post(audit_csv_handler))
        .route("/profiles", get(profiles_handler))
        .with_state(state)
}

/// Handler for POST /audit endpoint.
///
/// Accepts rows as JSON and returns the full audit report.
async fn audit_handler(
    State(state): State<AppState>,
    payload: Result<Json<AuditRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing audit request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    ApiError::malformed_json(body_text)
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
            };
            return (StatusCode::BAD_REQUEST, Json(error)).into_response();
        }
    };

    let table = request.to_table();
    let schema = request.schema.clone().unwrap_or_default();

    match execute_audit(
        state.config(),
        &table,
        &schema,
        request.profile.as_deref(),
        &request.rules,
    ) {
        Ok(report) => {
            log_completion(correlation_id, &report);
            (StatusCode::OK, Json(report)).into_response()
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /audit/csv endpoint.
///
/// Accepts a CSV export as the request body. Rule selection and the
/// response representation come from the query string.
async fn audit_csv_handler(
    State(state): State<AppState>,
    query: Result<Query<CsvAuditQuery>, QueryRejection>,
    body: Bytes,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        bytes = body.len(),
        "Processing CSV audit request"
    );

    let query = match query {
        Ok(Query(q)) => q,
        Err(rejection) => {
            warn!(
                correlation_id = %correlation_id,
                error = %rejection.body_text(),
                "Invalid query string"
            );
            let error = ApiError::invalid_input(rejection.body_text());
            return (StatusCode::BAD_REQUEST, Json(error)).into_response();
        }
    };

    let result = read_table(body.as_ref()).and_then(|table| {
        execute_audit(
            state.config(),
            &table,
            &query.schema(),
            query.profile.as_deref(),
            &query.overrides(),
        )
    });

    let report = match result {
        Ok(report) => report,
        Err(err) => return error_response(correlation_id, err),
    };
    log_completion(correlation_id, &report);

    let rendered = match query.output {
        OutputFormat::Json => return (StatusCode::OK, Json(report)).into_response(),
        OutputFormat::Violations => {
            write_violations(&report.violations).map(|csv| (csv, "meal_violations.csv"))
        }
        OutputFormat::Summary => {
            write_summary(&report.summary).map(|csv| (csv, "meal_violation_summary.csv"))
        }
    };

    match rendered {
        Ok((csv, filename)) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, CSV_CONTENT_TYPE.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", filename),
                ),
            ],
            csv,
        )
            .into_response(),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /profiles endpoint.
async fn profiles_handler(State(state): State<AppState>) -> Json<ProfileList> {
    Json(ProfileList {
        default_profile: DEFAULT_PROFILE.to_string(),
        profiles: state.config().profiles().cloned().collect(),
    })
}

/// Resolves the rules for a request and runs the pipeline.
fn execute_audit(
    config: &ConfigLoader,
    table: &RawTable,
    schema: &InputSchema,
    profile: Option<&str>,
    overrides: &RuleOverrides,
) -> AuditResult<AuditReport> {
    let (profile_name, rules) = config.resolve_rules(profile, overrides)?;
    run_audit(table, schema, &rules, &profile_name)
}

fn log_completion(correlation_id: Uuid, report: &AuditReport) {
    info!(
        correlation_id = %correlation_id,
        run_id = %report.run_id,
        profile = %report.profile,
        shift_days = report.stats.shift_days_evaluated,
        violations = report.stats.total_violations,
        duration_us = report.duration_us,
        "Audit completed successfully"
    );
}

fn error_response(correlation_id: Uuid, err: AuditError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Audit failed"
    );
    ApiErrorResponse::from(err).into_response()
}
