//! # API REST
//!
//! REST API implementation for the triage service.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON bodies, query strings, CORS)
//!
//! All triage behaviour lives in `triage-core`; handlers only translate between HTTP and the
//! core service.

#![warn(rust_2018_idioms)]

pub mod dto;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use triage_core::{TriageError, TriageService};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use dto::{
    AppliedFilters, AssessmentRes, EvaluateReq, FilteredLogsParams, FilteredLogsRes, HealthRes,
    LogsParams, LogsRes, RuleSummary, RulesRes, SubmitSymptomsReq, SubmitSymptomsRes,
    SymptomLogRes,
};

/// Application state for the REST API server
///
/// Shared by all request handlers. The service holds the rule catalog and log storage, both
/// resolved at startup.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TriageService>,
}

impl AppState {
    pub fn new(service: TriageService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

type ApiError = (StatusCode, String);

#[derive(OpenApi)]
#[openapi(
    paths(health, list_rules, evaluate, submit_symptoms, list_logs, list_filtered_logs),
    components(schemas(
        HealthRes,
        RuleSummary,
        RulesRes,
        EvaluateReq,
        AssessmentRes,
        SubmitSymptomsReq,
        SubmitSymptomsRes,
        SymptomLogRes,
        LogsRes,
        AppliedFilters,
        FilteredLogsRes,
    ))
)]
pub struct ApiDoc;

/// Build the REST router with Swagger UI and permissive CORS.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/rules", get(list_rules))
        .route("/evaluate", post(evaluate))
        .route("/symptoms", post(submit_symptoms))
        .route("/logs", get(list_logs))
        .route("/logs/filtered", get(list_filtered_logs))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bodies that are not JSON objects of the expected shape are the caller's fault too.
fn bad_body(rejection: JsonRejection) -> ApiError {
    (StatusCode::BAD_REQUEST, rejection.body_text())
}

/// Map a core error onto a response: validation failures are the caller's fault, everything
/// else is logged and hidden.
fn error_response(context: &str, e: TriageError) -> ApiError {
    match e {
        TriageError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
        other => {
            tracing::error!("{} error: {:?}", context, other);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".into())
        }
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "Triage REST API is alive".into(),
    })
}

#[utoipa::path(
    get,
    path = "/rules",
    responses(
        (status = 200, description = "Rule catalog in evaluation order", body = RulesRes)
    )
)]
#[axum::debug_handler]
async fn list_rules(State(state): State<AppState>) -> Json<RulesRes> {
    let rules = state
        .service
        .catalog()
        .iter()
        .map(RuleSummary::from)
        .collect();
    Json(RulesRes { rules })
}

#[utoipa::path(
    post,
    path = "/evaluate",
    request_body = EvaluateReq,
    responses(
        (status = 200, description = "Triage assessment", body = AssessmentRes),
        (status = 400, description = "Malformed body or unknown symptom name")
    )
)]
/// Evaluate a symptom record without storing it
///
/// # Errors
/// Returns `400 Bad Request` if the body is malformed or a symptom name is not in the
/// vocabulary.
#[axum::debug_handler]
async fn evaluate(
    State(state): State<AppState>,
    payload: Result<Json<EvaluateReq>, JsonRejection>,
) -> Result<Json<AssessmentRes>, ApiError> {
    let Json(req) = payload.map_err(bad_body)?;
    let input = req
        .into_input()
        .map_err(|msg| (StatusCode::BAD_REQUEST, msg))?;
    let assessment = state.service.assess(&input);
    Ok(Json(AssessmentRes::from(assessment)))
}

#[utoipa::path(
    post,
    path = "/symptoms",
    request_body = SubmitSymptomsReq,
    responses(
        (status = 201, description = "Symptom log stored", body = SubmitSymptomsRes),
        (status = 400, description = "Validation failure"),
        (status = 500, description = "Internal server error")
    )
)]
/// Submit a symptom record
///
/// The record is validated, assessed and stored; the stored log is returned.
///
/// # Errors
/// Returns `400 Bad Request` if a field is missing, has the wrong type or fails validation,
/// and `500 Internal Server Error` if the log cannot be stored.
#[axum::debug_handler]
async fn submit_symptoms(
    State(state): State<AppState>,
    payload: Result<Json<SubmitSymptomsReq>, JsonRejection>,
) -> Result<(StatusCode, Json<SubmitSymptomsRes>), ApiError> {
    let Json(req) = payload.map_err(bad_body)?;
    let submission = req
        .into_submission()
        .map_err(|msg| (StatusCode::BAD_REQUEST, msg))?;

    match state.service.submit(submission) {
        Ok(log) => Ok((
            StatusCode::CREATED,
            Json(SubmitSymptomsRes {
                log: SymptomLogRes::from(log),
            }),
        )),
        Err(e) => Err(error_response("Submit symptoms", e)),
    }
}

#[utoipa::path(
    get,
    path = "/logs",
    params(LogsParams),
    responses(
        (status = 200, description = "Stored symptom logs, newest first", body = LogsRes),
        (status = 400, description = "Invalid patient reference"),
        (status = 500, description = "Internal server error")
    )
)]
#[axum::debug_handler]
async fn list_logs(
    State(state): State<AppState>,
    Query(params): Query<LogsParams>,
) -> Result<Json<LogsRes>, ApiError> {
    let patient_id = params
        .patient_id
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty());

    let logs = state
        .service
        .list_logs(patient_id)
        .map_err(|e| error_response("List logs", e))?;

    Ok(Json(LogsRes {
        logs: logs.into_iter().map(SymptomLogRes::from).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/logs/filtered",
    params(FilteredLogsParams),
    responses(
        (status = 200, description = "Filtered and sorted symptom logs", body = FilteredLogsRes),
        (status = 400, description = "Invalid filter parameters"),
        (status = 500, description = "Internal server error")
    )
)]
/// List stored logs with filtering, search and sorting
///
/// # Errors
/// Returns `400 Bad Request` for an unknown sort field or order, an unparsable date, an
/// unknown symptom or flag, or an inverted severity range.
#[axum::debug_handler]
async fn list_filtered_logs(
    State(state): State<AppState>,
    Query(params): Query<FilteredLogsParams>,
) -> Result<Json<FilteredLogsRes>, ApiError> {
    let query = params
        .into_query()
        .map_err(|msg| (StatusCode::BAD_REQUEST, msg))?;

    let logs = state
        .service
        .query_logs(&query)
        .map_err(|e| error_response("Filter logs", e))?;

    Ok(Json(FilteredLogsRes {
        total: logs.len(),
        logs: logs.into_iter().map(SymptomLogRes::from).collect(),
        filters: AppliedFilters::from(&query),
    }))
}
