use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::{
    ComponentCategory, ComponentStatistics, CriterionScheduleItem, CriterionStatistics, Dataset,
    LevelFilter, ReportMetadata, ScheduleOptions, TestResult, TestResults,
    build_component_schedule, build_criterion_schedule,
    export::{component_markdown, criterion_markdown},
    export_results_csv,
};

#[derive(Clone)]
pub struct AppState {
    dataset: Arc<Dataset>,
    options: ScheduleOptions,
    results: Arc<RwLock<TestResults>>,
}

impl AppState {
    pub fn new(dataset: Dataset, options: ScheduleOptions) -> Self {
        Self {
            dataset: Arc::new(dataset),
            options,
            results: Arc::new(RwLock::new(TestResults::new())),
        }
    }

    pub fn with_results(mut self, results: TestResults) -> Self {
        self.results = Arc::new(RwLock::new(results));
        self
    }

    pub fn results(&self) -> Arc<RwLock<TestResults>> {
        self.results.clone()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    NotFound(String),
    Invalid(String),
    Internal(String),
}

impl ApiError {
    fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    fn invalid(message: impl Into<String>) -> Self {
        ApiError::Invalid(message.into())
    }

    fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, "not_found", message),
            ApiError::Invalid(message) => (StatusCode::BAD_REQUEST, "invalid_request", message),
            ApiError::Internal(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
            }
        };
        (status, Json(ErrorBody { error, message })).into_response()
    }
}

/// Query overrides for the configured options, e.g. `?levels=A,AA&advisory=false`.
#[derive(Debug, Default, Deserialize)]
struct ScheduleQuery {
    levels: Option<String>,
    advisory: Option<bool>,
    failures: Option<bool>,
}

impl ScheduleQuery {
    fn resolve(&self, defaults: &ScheduleOptions) -> Result<ScheduleOptions, ApiError> {
        let mut options = defaults.clone();
        if let Some(levels) = &self.levels {
            options.levels = LevelFilter::parse_list(levels).map_err(ApiError::invalid)?;
        }
        if let Some(advisory) = self.advisory {
            options.include_advisory = advisory;
        }
        if let Some(failures) = self.failures {
            options.include_failures = failures;
        }
        Ok(options)
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/criteria", get(list_criteria))
        .route("/components", get(list_components))
        .route("/statistics", get(statistics))
        .route("/report/criteria", get(criteria_report))
        .route("/report/components", get(components_report))
        .route("/results", get(list_results))
        .route("/export/results", get(export_results))
        .route("/results/:criterion_id", get(get_result).put(put_result))
        .with_state(state)
}

/// Serves until `shutdown` resolves. Recorded results stay reachable through
/// [`AppState::results`] afterwards.
pub async fn serve<F>(addr: SocketAddr, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn list_criteria(
    State(state): State<AppState>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<Vec<CriterionScheduleItem>>, ApiError> {
    let options = query.resolve(&state.options)?;
    Ok(Json(build_criterion_schedule(&state.dataset, &options.levels)))
}

async fn list_components(
    State(state): State<AppState>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<Vec<ComponentCategory>>, ApiError> {
    let options = query.resolve(&state.options)?;
    Ok(Json(build_component_schedule(&state.dataset, &options.levels)))
}

#[derive(Debug, Serialize)]
struct StatisticsBody {
    criteria: CriterionStatistics,
    components: ComponentStatistics,
    recorded_results: usize,
}

async fn statistics(
    State(state): State<AppState>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<StatisticsBody>, ApiError> {
    let options = query.resolve(&state.options)?;
    let items = build_criterion_schedule(&state.dataset, &options.levels);
    let categories = build_component_schedule(&state.dataset, &options.levels);
    let recorded_results = state.results.read().len();
    Ok(Json(StatisticsBody {
        criteria: CriterionStatistics::compute(&items, &options),
        components: ComponentStatistics::compute(&categories),
        recorded_results,
    }))
}

fn markdown_response(body: String) -> Response {
    (
        [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
        body,
    )
        .into_response()
}

async fn criteria_report(
    State(state): State<AppState>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Response, ApiError> {
    let options = query.resolve(&state.options)?;
    let items = build_criterion_schedule(&state.dataset, &options.levels);
    let report = criterion_markdown(&items, &options, &ReportMetadata::default());
    Ok(markdown_response(report))
}

async fn components_report(
    State(state): State<AppState>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Response, ApiError> {
    let options = query.resolve(&state.options)?;
    let categories = build_component_schedule(&state.dataset, &options.levels);
    let report = component_markdown(&categories, &options, &ReportMetadata::default());
    Ok(markdown_response(report))
}

async fn list_results(State(state): State<AppState>) -> Json<TestResults> {
    let results = state.results.read().clone();
    Json(results)
}

async fn get_result(
    State(state): State<AppState>,
    Path(criterion_id): Path<String>,
) -> Result<Json<TestResult>, ApiError> {
    let result = state.results.read().get(&criterion_id).cloned();
    result
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("no result recorded for {criterion_id}")))
}

async fn put_result(
    State(state): State<AppState>,
    Path(criterion_id): Path<String>,
    Json(result): Json<TestResult>,
) -> Result<Json<TestResult>, ApiError> {
    let known = state
        .dataset
        .criteria()
        .any(|ctx| ctx.criterion.id == criterion_id);
    if !known {
        return Err(ApiError::not_found(format!(
            "unknown success criterion {criterion_id}"
        )));
    }
    state.results.write().record(criterion_id, result.clone());
    Ok(Json(result))
}

async fn export_results(
    State(state): State<AppState>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Response, ApiError> {
    let options = query.resolve(&state.options)?;
    let items = build_criterion_schedule(&state.dataset, &options.levels);
    let mut buffer = Vec::new();
    {
        let results = state.results.read();
        export_results_csv(&items, &results, &mut buffer)
            .map_err(|err| ApiError::internal(err.to_string()))?;
    }
    let body = String::from_utf8(buffer).map_err(|err| ApiError::internal(err.to_string()))?;
    Ok(([(header::CONTENT_TYPE, "text/csv; charset=utf-8")], body).into_response())
}
