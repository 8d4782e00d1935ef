//! HTTP request handlers for the leave engine API.
//!
//! This module contains the handler functions for all API endpoints.
//! Every handler queries one store snapshot, so a response never mixes
//! state from before and after a concurrent mutation.

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use chrono::{NaiveDate, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    concurrent_count, day_report, employee_conflicts, evaluate_capacity, leave_balance, month_report,
    upcoming_leave, year_report,
};
use crate::error::{EngineError, EngineResult};
use crate::models::{CapacityPolicy, Employee, LeaveRecord, parse_calendar_date};

use super::request::{
    BalanceQuery, DEFAULT_UPCOMING_LIMIT, LeaveRecordRequest, OverlapQuery, RecordFilter, SyncRequest,
    UpcomingQuery, parse_status,
};
use super::response::{
    ApiError, ApiErrorResponse, CapacityCheckResponse, DayCapacityResponse, HealthResponse,
    SettingsResponse, SyncResponse, UpsertResponse,
};
use super::state::AppState;

type ApiResult = Result<Response, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/sync", put(sync_handler))
        .route("/employees", get(list_employees_handler))
        .route("/employees/:id", get(employee_handler))
        .route("/employees/:id/balance", get(balance_handler))
        .route("/employees/:id/upcoming", get(upcoming_handler))
        .route("/leave-records", get(list_records_handler))
        .route(
            "/leave-records/:id",
            get(get_record_handler)
                .put(upsert_record_handler)
                .delete(delete_record_handler),
        )
        .route("/overlaps", get(overlaps_handler))
        .route("/capacity/check", post(capacity_check_handler))
        .route("/capacity/:day", get(day_capacity_handler))
        .route("/reports/day/:day", get(day_report_handler))
        .route("/reports/month/:year/:month", get(month_report_handler))
        .route("/reports/year/:year", get(year_report_handler))
        .route("/settings", get(settings_handler))
        .route("/settings/capacity", put(capacity_settings_handler))
        .with_state(state)
}

/// Unwraps a JSON body or turns the rejection into an API error.
fn json_body<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiErrorResponse> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
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
            ApiError::validation_error("Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    Err(ApiErrorResponse::bad_request(error))
}

fn rejected(correlation_id: Uuid, error: EngineError) -> ApiErrorResponse {
    warn!(
        correlation_id = %correlation_id,
        error = %error,
        "Request rejected"
    );
    error.into()
}

fn invalid_parameters(correlation_id: Uuid, message: String) -> ApiErrorResponse {
    warn!(
        correlation_id = %correlation_id,
        error = %message,
        "Invalid request parameters"
    );
    ApiErrorResponse::bad_request(ApiError::validation_error(message))
}

fn path_params<T>(
    correlation_id: Uuid,
    path: Result<Path<T>, PathRejection>,
) -> Result<T, ApiErrorResponse> {
    path.map(|Path(value)| value)
        .map_err(|rejection| invalid_parameters(correlation_id, rejection.body_text()))
}

fn query_params<T>(
    correlation_id: Uuid,
    query: Result<Query<T>, QueryRejection>,
) -> Result<T, ApiErrorResponse> {
    query
        .map(|Query(value)| value)
        .map_err(|rejection| invalid_parameters(correlation_id, rejection.body_text()))
}

fn parse_day(correlation_id: Uuid, raw: &str) -> Result<NaiveDate, ApiErrorResponse> {
    parse_calendar_date(raw).map_err(|err| rejected(correlation_id, err))
}

/// Handler for GET /health.
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let snapshot = state.store().snapshot();
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        employees: snapshot.headcount(),
        records: snapshot.record_count(),
    })
}

/// Handler for PUT /sync.
///
/// Replaces the whole working set. Nothing changes unless every employee
/// and record is valid.
async fn sync_handler(
    State(state): State<AppState>,
    payload: Result<Json<SyncRequest>, JsonRejection>,
) -> ApiResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing sync request");

    let request = json_body(correlation_id, payload)?;
    let records = request
        .records
        .into_iter()
        .map(LeaveRecord::try_from)
        .collect::<EngineResult<Vec<_>>>()
        .map_err(|err| rejected(correlation_id, err))?;

    let response = SyncResponse {
        employees: request.employees.len(),
        records: records.len(),
    };
    state
        .store()
        .load(request.employees, records)
        .map_err(|err| rejected(correlation_id, err))?;

    info!(
        correlation_id = %correlation_id,
        employees = response.employees,
        records = response.records,
        "Working set replaced"
    );
    Ok(Json(response).into_response())
}

/// Handler for GET /employees.
async fn list_employees_handler(State(state): State<AppState>) -> Json<Vec<Employee>> {
    let snapshot = state.store().snapshot();
    let mut employees: Vec<Employee> = snapshot.employees().cloned().collect();
    employees.sort_by(|a, b| a.id.cmp(&b.id));
    Json(employees)
}

/// Handler for GET /employees/:id.
async fn employee_handler(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    let snapshot = state.store().snapshot();
    let employee = snapshot.employee(&id)?;
    Ok(Json(employee).into_response())
}

/// Handler for GET /employees/:id/balance.
async fn balance_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<BalanceQuery>, QueryRejection>,
) -> ApiResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, employee_id = %id, "Computing leave balance");

    let query = query_params(correlation_id, query)?;
    let snapshot = state.store().snapshot();
    let balance = leave_balance(&snapshot, &state.settings().leave, &id, query.year)
        .map_err(|err| rejected(correlation_id, err))?;
    Ok(Json(balance).into_response())
}

/// Handler for GET /employees/:id/upcoming.
async fn upcoming_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<UpcomingQuery>, QueryRejection>,
) -> ApiResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, employee_id = %id, "Listing upcoming leave");

    let query = query_params(correlation_id, query)?;
    let from = match query.from.as_deref() {
        Some(raw) => parse_day(correlation_id, raw)?,
        None => Utc::now().date_naive(),
    };
    let limit = query.limit.unwrap_or(DEFAULT_UPCOMING_LIMIT);

    let snapshot = state.store().snapshot();
    let upcoming = upcoming_leave(&snapshot, &id, from, limit)
        .map_err(|err| rejected(correlation_id, err))?;
    Ok(Json(upcoming).into_response())
}

/// Handler for GET /leave-records.
async fn list_records_handler(
    State(state): State<AppState>,
    query: Result<Query<RecordFilter>, QueryRejection>,
) -> ApiResult {
    let correlation_id = Uuid::new_v4();
    let filter = query_params(correlation_id, query)?;

    let status = match filter.status.as_deref() {
        Some(raw) => Some(parse_status(raw).ok_or_else(|| {
            invalid_parameters(correlation_id, format!("Unknown leave status: {}", raw))
        })?),
        None => None,
    };

    let snapshot = state.store().snapshot();
    let mut records: Vec<LeaveRecord> = snapshot
        .all()
        .filter(|record| {
            filter
                .employee_id
                .as_deref()
                .is_none_or(|employee_id| record.employee_id == employee_id)
        })
        .filter(|record| status.is_none_or(|status| record.status == status))
        .cloned()
        .collect();
    records.sort_by(|a, b| {
        (a.start_date, a.end_date, &a.id).cmp(&(b.start_date, b.end_date, &b.id))
    });

    info!(
        correlation_id = %correlation_id,
        count = records.len(),
        "Listed leave records"
    );
    Ok(Json(records).into_response())
}

/// Handler for GET /leave-records/:id.
async fn get_record_handler(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    let snapshot = state.store().snapshot();
    let record = snapshot.get(&id)?;
    Ok(Json(record).into_response())
}

/// Handler for PUT /leave-records/:id.
///
/// Responds 201 when the record is new and 200 when it replaced one.
async fn upsert_record_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<LeaveRecordRequest>, JsonRejection>,
) -> ApiResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, record_id = %id, "Processing upsert request");

    let request = json_body(correlation_id, payload)?;
    if let Some(body_id) = request.id.as_deref() {
        if body_id != id {
            return Err(invalid_parameters(
                correlation_id,
                format!("Record id '{}' does not match path id '{}'", body_id, id),
            ));
        }
    }

    let record = request
        .into_record(|| id.clone())
        .map_err(|err| rejected(correlation_id, err))?;
    let previous = state
        .store()
        .upsert(record.clone())
        .map_err(|err| rejected(correlation_id, err))?;

    let status = if previous.is_some() {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    info!(
        correlation_id = %correlation_id,
        record_id = %record.id,
        replaced = previous.is_some(),
        "Leave record stored"
    );
    Ok((status, Json(UpsertResponse { record, previous })).into_response())
}

/// Handler for DELETE /leave-records/:id. Always 204.
async fn delete_record_handler(State(state): State<AppState>, Path(id): Path<String>) -> StatusCode {
    let correlation_id = Uuid::new_v4();
    let removed = state.store().remove(&id);
    info!(
        correlation_id = %correlation_id,
        record_id = %id,
        removed = removed.is_some(),
        "Processed delete request"
    );
    StatusCode::NO_CONTENT
}

/// Handler for GET /overlaps.
async fn overlaps_handler(
    State(state): State<AppState>,
    query: Result<Query<OverlapQuery>, QueryRejection>,
) -> ApiResult {
    let correlation_id = Uuid::new_v4();
    let query = query_params(correlation_id, query)?;
    let snapshot = state.store().snapshot();

    let records: Vec<LeaveRecord> = match (query.day, query.start, query.end) {
        (Some(day), None, None) => {
            let day = parse_day(correlation_id, &day)?;
            snapshot.intersecting_day(day).cloned().collect()
        }
        (None, Some(start), Some(end)) => {
            let start = parse_day(correlation_id, &start)?;
            let end = parse_day(correlation_id, &end)?;
            snapshot.intersecting_range(start, end).cloned().collect()
        }
        _ => {
            return Err(invalid_parameters(
                correlation_id,
                "Provide either 'day' or both 'start' and 'end'".to_string(),
            ));
        }
    };

    info!(
        correlation_id = %correlation_id,
        count = records.len(),
        "Overlap query answered"
    );
    Ok(Json(records).into_response())
}

/// Handler for GET /capacity/:day.
async fn day_capacity_handler(State(state): State<AppState>, Path(day): Path<String>) -> ApiResult {
    let correlation_id = Uuid::new_v4();
    let date = parse_day(correlation_id, &day)?;

    let snapshot = state.store().snapshot();
    let headcount = snapshot.headcount();
    let threshold = state.policy().threshold(headcount);
    let count = concurrent_count(&snapshot, date);

    Ok(Json(DayCapacityResponse {
        date,
        count,
        headcount,
        threshold,
        over_capacity: count > threshold,
    })
    .into_response())
}

/// Handler for POST /capacity/check.
///
/// Evaluates a candidate record without storing it. A candidate without an
/// id gets a fresh one, so it never replaces a stored record.
async fn capacity_check_handler(
    State(state): State<AppState>,
    payload: Result<Json<LeaveRecordRequest>, JsonRejection>,
) -> ApiResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing capacity check");

    let candidate = json_body(correlation_id, payload)?
        .into_record(|| Uuid::new_v4().to_string())
        .map_err(|err| rejected(correlation_id, err))?;

    let snapshot = state.store().snapshot();
    let evaluation = evaluate_capacity(&snapshot, &state.policy(), &candidate)
        .map_err(|err| rejected(correlation_id, err))?;
    let conflicts: Vec<LeaveRecord> = employee_conflicts(&snapshot, &candidate)
        .into_iter()
        .cloned()
        .collect();

    info!(
        correlation_id = %correlation_id,
        employee_id = %candidate.employee_id,
        exceeds_capacity = evaluation.exceeds_capacity,
        peak = evaluation.peak,
        threshold = evaluation.threshold,
        conflicts = conflicts.len(),
        "Capacity check completed"
    );
    Ok(Json(CapacityCheckResponse {
        evaluation,
        conflicts,
    })
    .into_response())
}

/// Handler for GET /reports/day/:day.
async fn day_report_handler(State(state): State<AppState>, Path(day): Path<String>) -> ApiResult {
    let correlation_id = Uuid::new_v4();
    let date = parse_day(correlation_id, &day)?;
    let snapshot = state.store().snapshot();
    Ok(Json(day_report(&snapshot, &state.settings().reports, date)).into_response())
}

/// Handler for GET /reports/month/:year/:month.
async fn month_report_handler(
    State(state): State<AppState>,
    path: Result<Path<(i32, u32)>, PathRejection>,
) -> ApiResult {
    let correlation_id = Uuid::new_v4();
    let (year, month) = path_params(correlation_id, path)?;
    info!(correlation_id = %correlation_id, year, month, "Building month report");

    let snapshot = state.store().snapshot();
    let report = month_report(&snapshot, &state.settings().reports, year, month)
        .map_err(|err| rejected(correlation_id, err))?;
    Ok(Json(report).into_response())
}

/// Handler for GET /reports/year/:year.
async fn year_report_handler(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult {
    let correlation_id = Uuid::new_v4();
    let year = path_params(correlation_id, path)?;
    info!(correlation_id = %correlation_id, year, "Building year report");

    let snapshot = state.store().snapshot();
    let report = year_report(&snapshot, &state.settings().reports, year)
        .map_err(|err| rejected(correlation_id, err))?;
    Ok(Json(report).into_response())
}

fn settings_view(state: &AppState) -> SettingsResponse {
    let policy = state.policy();
    let headcount = state.store().snapshot().headcount();
    let settings = state.settings();
    SettingsResponse {
        max_concurrent_percentage: policy.max_concurrent_percentage,
        headcount,
        threshold: policy.threshold(headcount),
        include_pending: settings.reports.include_pending,
        default_annual_allowance_days: settings.leave.default_annual_allowance_days,
    }
}

/// Handler for GET /settings.
async fn settings_handler(State(state): State<AppState>) -> Json<SettingsResponse> {
    Json(settings_view(&state))
}

/// Handler for PUT /settings/capacity.
async fn capacity_settings_handler(
    State(state): State<AppState>,
    payload: Result<Json<CapacityPolicy>, JsonRejection>,
) -> ApiResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Updating capacity policy");

    let policy = json_body(correlation_id, payload)?;
    state
        .set_policy(policy)
        .map_err(|err| rejected(correlation_id, err))?;

    info!(
        correlation_id = %correlation_id,
        max_concurrent_percentage = %policy.max_concurrent_percentage,
        "Capacity policy updated"
    );
    Ok(Json(settings_view(&state)).into_response())
}
