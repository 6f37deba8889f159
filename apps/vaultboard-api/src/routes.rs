use axum::{
	Json, Router,
	extract::{State, rejection::JsonRejection},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::get,
};
use serde::Serialize;
use serde_json::{Map, Value};

use vaultboard_service::{
	ActivityFeed, ApprovalActionRequest, ApprovalActionResponse, ApprovalItem, ChartPoint,
	EmailItem, Error as ServiceError, StatsResponse, TaskItem,
};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/api/activity", get(activity))
		.route("/api/approvals", get(list_approvals).post(transition_approval))
		.route("/api/chart-data", get(chart_data))
		.route("/api/emails", get(emails))
		.route("/api/stats", get(stats))
		.route("/api/tasks", get(tasks))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn activity(State(state): State<AppState>) -> Result<Json<ActivityFeed>, ApiError> {
	let response = state.service.activity().await.map_err(activity_failed)?;

	Ok(Json(response))
}

async fn list_approvals(State(state): State<AppState>) -> Result<Json<Vec<ApprovalItem>>, ApiError> {
	let response =
		state.service.list_approvals().await.map_err(|err| fetch_failed("approvals", err))?;

	Ok(Json(response))
}

async fn transition_approval(
	State(state): State<AppState>,
	payload: Result<Json<ApprovalActionRequest>, JsonRejection>,
) -> Result<Json<ApprovalActionResponse>, ApiError> {
	let Json(payload) = payload.map_err(|rejection| {
		json_error(StatusCode::BAD_REQUEST, "invalid_request", rejection.body_text())
	})?;
	let response = state.service.transition(payload).await?;

	Ok(Json(response))
}

async fn chart_data(State(state): State<AppState>) -> Result<Json<Vec<ChartPoint>>, ApiError> {
	let response = state.service.chart_data().await.map_err(|err| fetch_failed("chart data", err))?;

	Ok(Json(response))
}

async fn emails(State(state): State<AppState>) -> Result<Json<Vec<EmailItem>>, ApiError> {
	let response = state.service.list_emails().await.map_err(|err| fetch_failed("emails", err))?;

	Ok(Json(response))
}

async fn stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, ApiError> {
	let response = state.service.stats().await.map_err(|err| fetch_failed("stats", err))?;

	Ok(Json(response))
}

async fn tasks(State(state): State<AppState>) -> Result<Json<Vec<TaskItem>>, ApiError> {
	let response = state.service.list_tasks().await.map_err(|err| fetch_failed("tasks", err))?;

	Ok(Json(response))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error: String,
	error_code: &'static str,
	#[serde(flatten)]
	fallback: Map<String, Value>,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: &'static str,
	message: String,
	fallback: Map<String, Value>,
}
impl ApiError {
	fn new(status: StatusCode, error_code: &'static str, message: impl Into<String>) -> Self {
		Self { status, error_code, message: message.into(), fallback: Map::new() }
	}

	/// Adds an empty stand-in for the collection the caller expected.
	fn with_fallback(mut self, key: &str, value: Value) -> Self {
		self.fallback.insert(key.to_string(), value);

		self
	}

	pub fn status(&self) -> StatusCode {
		self.status
	}
}

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> ApiError {
	ApiError::new(status, code, message)
}

/// Logs a read failure and hides its detail behind a generic message.
fn fetch_failed(what: &str, err: ServiceError) -> ApiError {
	tracing::error!(error = %err, "Error fetching {what}.");

	json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", format!("Failed to fetch {what}"))
}

/// The activity error body still carries an empty `activities` list for the client.
fn activity_failed(err: ServiceError) -> ApiError {
	fetch_failed("activities", err).with_fallback("activities", Value::Array(Vec::new()))
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		let (status, code) = match &err {
			ServiceError::InvalidRequest { .. } => (StatusCode::BAD_REQUEST, "invalid_request"),
			ServiceError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
			ServiceError::Conflict { .. } => (StatusCode::CONFLICT, "conflict"),
			ServiceError::Storage { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "storage_error"),
			ServiceError::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
		};

		if status.is_server_error() {
			tracing::error!(error = %err, "Request failed.");
		}

		json_error(status, code, err.message())
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body =
			ErrorBody { error: self.message, error_code: self.error_code, fallback: self.fallback };

		(self.status, Json(body)).into_response()
	}
}
