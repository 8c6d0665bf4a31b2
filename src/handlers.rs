use axum::extract::{FromRequest, Path, Query, State};
use axum::{Json, http::StatusCode, response::IntoResponse};
use chrono::{Datelike, Duration, Local};
use tracing::info;

use crate::models::{CourseInput, CourseSession, MutationResponse, Period, Statistics};
use crate::periods::STANDARD_PERIODS;
use crate::statistics::statistics;
use crate::time::TimeOfDay;
use crate::upcoming::{WallClock, upcoming};
use crate::validation::{validate_day, validate_limit};
use crate::{AppState, error::ApiError};

/// `Json` whose rejections render as [`ApiError`] bodies.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, serde::Deserialize)]
pub struct UpcomingQuery {
    pub limit: Option<usize>,
    pub day: Option<u8>,
    pub time: Option<String>,
}

#[utoipa::path(get, path = "/", tag = "courses")]
pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Course Schedule API",
        "endpoints": {
            "/api/courses": "List, create, update and delete course sessions",
            "/api/upcoming": "Remaining sessions today and all of tomorrow",
            "/api/statistics": "Scheduled time per course",
            "/api/periods": "Standard teaching periods",
            "/api/courses.ical": "Download the weekly schedule as iCal file"
        }
    }))
}

#[utoipa::path(get, path = "/healthz/live", tag = "courses")]
pub async fn healthz_live() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

#[utoipa::path(
    get,
    path = "/healthz/ready",
    responses(
        (status = 200, description = "Database reachable"),
        (status = 500, description = "Database unavailable")
    ),
    tag = "courses"
)]
pub async fn healthz_ready(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    state.store.ping()?;
    Ok(Json(serde_json::json!({"status": "ok"})))
}

#[utoipa::path(
    get,
    path = "/api/courses",
    responses((status = 200, description = "All sessions ordered by day and start time", body = [CourseSession])),
    tag = "courses"
)]
pub async fn list_courses(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.store.list()?))
}

#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    params(("id" = i64, Path, description = "Course session id")),
    responses(
        (status = 200, description = "Course session", body = CourseSession),
        (status = 404, description = "No such session")
    ),
    tag = "courses"
)]
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    match state.store.get(id)? {
        Some(course) => Ok(Json(course)),
        None => Err(ApiError::NotFound(format!("Course {id} not found"))),
    }
}

#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CourseInput,
    responses(
        (status = 201, description = "Course created", body = MutationResponse),
        (status = 400, description = "Missing or invalid fields"),
        (status = 409, description = "Overlaps an existing session on the same day")
    ),
    tag = "courses"
)]
pub async fn create_course(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CourseInput>,
) -> Result<impl IntoResponse, ApiError> {
    let course = state.store.create(input)?;
    Ok((
        StatusCode::CREATED,
        Json(MutationResponse {
            id: Some(course.id),
            message: "Course created".into(),
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/api/courses/{id}",
    params(("id" = i64, Path, description = "Course session id")),
    request_body = CourseInput,
    responses(
        (status = 200, description = "Course updated", body = MutationResponse),
        (status = 400, description = "Missing or invalid fields"),
        (status = 404, description = "No such session"),
        (status = 409, description = "Overlaps another session on the same day")
    ),
    tag = "courses"
)]
pub async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ApiJson(input): ApiJson<CourseInput>,
) -> Result<impl IntoResponse, ApiError> {
    let course = state.store.update(id, input)?;
    Ok(Json(MutationResponse {
        id: Some(course.id),
        message: "Course updated".into(),
    }))
}

#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    params(("id" = i64, Path, description = "Course session id")),
    responses((status = 200, description = "Course deleted (also when it did not exist)", body = MutationResponse)),
    tag = "courses"
)]
pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.store.delete(id)? {
        info!(id, "delete of unknown course ignored");
    }
    Ok(Json(MutationResponse {
        id: None,
        message: "Course deleted".into(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/upcoming",
    params(
        ("limit" = Option<usize>, Query, description = "Maximum number of sessions (1-50)"),
        ("day" = Option<u8>, Query, description = "Override current weekday (1 = Monday .. 7 = Sunday)"),
        ("time" = Option<String>, Query, description = "Override current time (HH:MM)")
    ),
    responses(
        (status = 200, description = "Upcoming sessions", body = [CourseSession]),
        (status = 400, description = "Invalid query parameter")
    ),
    tag = "courses"
)]
pub async fn upcoming_courses(
    State(state): State<AppState>,
    Query(query): Query<UpcomingQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let limit = match query.limit {
        Some(limit) => validate_limit(limit)?,
        None => state.settings.upcoming_limit,
    };

    let mut now = WallClock::now();
    if let Some(day) = query.day {
        now.day = validate_day(day)?;
    }
    if let Some(time) = query.time.as_deref() {
        now.time = time
            .parse::<TimeOfDay>()
            .map_err(|err| ApiError::BadRequest(err.to_string()))?;
    }

    let sessions = state.store.list()?;
    Ok(Json(upcoming(&sessions, now, limit)))
}

#[utoipa::path(
    get,
    path = "/api/statistics",
    responses((status = 200, description = "Scheduled time per course", body = Statistics)),
    tag = "courses"
)]
pub async fn get_statistics(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let sessions = state.store.list()?;
    Ok(Json(statistics(&sessions)))
}

#[utoipa::path(
    get,
    path = "/api/periods",
    responses((status = 200, description = "Standard teaching periods", body = [Period])),
    tag = "courses"
)]
pub async fn get_periods() -> impl IntoResponse {
    Json(STANDARD_PERIODS.to_vec())
}

#[utoipa::path(
    get,
    path = "/api/courses.ical",
    responses(
        (status = 200, description = "iCal file", content_type = "text/calendar"),
        (status = 404, description = "No courses found")
    ),
    tag = "courses"
)]
pub async fn get_ical(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let sessions = state.store.list()?;
    if sessions.is_empty() {
        return Err(ApiError::NotFound("No courses found".into()));
    }

    let today = Local::now().date_naive();
    let current_monday = today - Duration::days(today.weekday().num_days_from_monday() as i64);
    let body = state.exporter.generate(&sessions, current_monday);

    Ok((
        StatusCode::OK,
        [
            ("content-type", "text/calendar"),
            (
                "content-disposition",
                "attachment; filename=course_schedule.ics",
            ),
        ],
        body,
    ))
}
