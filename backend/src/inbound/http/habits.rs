//! Tracker service habit handlers.
//!
//! ```text
//! POST /habits {"name":"Exercise","description":"30 minutes"}
//! GET /habits
//! POST /habits/1/track
//! GET /habits/1/stats
//! ```
//!
//! Every route resolves the caller through [`CurrentUser`], so habits are
//! always scoped to the session owner.

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::TrackedHabit;
use crate::domain::{Error, Habit, HabitDraft, HabitId, HabitStats, HabitValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::identity::CurrentUser;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::TrackerState;

/// Layout of every timestamp in tracker responses (UTC).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Rendering of a bound that has no value, such as `first_tracked` on an
/// empty ledger.
pub const ZERO_TIMESTAMP: &str = "0001-01-01 00:00:00";

/// Message returned by a successful `POST /habits`.
pub const HABIT_CREATED_MESSAGE: &str = "Habit created successfully";
/// Message returned by a successful `POST /habits/{id}/track`.
pub const HABIT_TRACKED_MESSAGE: &str = "Habit tracked successfully";

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

fn format_bound(at: Option<DateTime<Utc>>) -> String {
    at.map_or_else(|| ZERO_TIMESTAMP.to_owned(), format_timestamp)
}

/// Request body for `POST /habits`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct CreateHabitRequest {
    pub name: String,
    pub description: Option<String>,
}

impl TryFrom<CreateHabitRequest> for HabitDraft {
    type Error = HabitValidationError;

    fn try_from(value: CreateHabitRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.name, value.description.as_deref())
    }
}

/// Habit as echoed back after creation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatedHabit {
    pub id: i32,
    pub name: String,
    pub description: String,
    #[schema(example = "2025-03-01 09:30:00")]
    pub created_at: String,
}

/// Body of a successful `POST /habits`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateHabitResponse {
    pub message: String,
    pub habit: CreatedHabit,
}

/// Full habit view.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HabitResponse {
    pub id: i32,
    pub user_id: i64,
    pub name: String,
    pub description: String,
    #[schema(example = "2025-03-01 09:30:00")]
    pub created_at: String,
}

impl From<&Habit> for HabitResponse {
    fn from(habit: &Habit) -> Self {
        Self {
            id: habit.id().get(),
            user_id: habit.user_id().get(),
            name: habit.name().as_str().to_owned(),
            description: habit.description().to_owned(),
            created_at: format_timestamp(habit.created_at()),
        }
    }
}

/// Body of a successful `POST /habits/{id}/track`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TrackHabitResponse {
    pub message: String,
    pub habit: HabitResponse,
    #[schema(example = "2025-03-01 09:30:00")]
    pub tracked_at: String,
}

impl From<TrackedHabit> for TrackHabitResponse {
    fn from(tracked: TrackedHabit) -> Self {
        Self {
            message: HABIT_TRACKED_MESSAGE.to_owned(),
            habit: HabitResponse::from(&tracked.habit),
            tracked_at: format_timestamp(tracked.record.tracked_at),
        }
    }
}

/// Body of `GET /habits/{id}/stats`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HabitStatsResponse {
    pub habit_name: String,
    pub total_trackings: usize,
    pub completed_days: usize,
    pub skipped_days: usize,
    #[schema(example = "0001-01-01 00:00:00")]
    pub first_tracked: String,
    #[schema(example = "0001-01-01 00:00:00")]
    pub last_tracked: String,
}

impl From<HabitStats> for HabitStatsResponse {
    fn from(stats: HabitStats) -> Self {
        Self {
            habit_name: stats.habit_name,
            total_trackings: stats.total_trackings,
            completed_days: stats.completed_days,
            skipped_days: stats.skipped_days,
            first_tracked: format_bound(stats.first_tracked),
            last_tracked: format_bound(stats.last_tracked),
        }
    }
}

fn map_habit_validation_error(err: HabitValidationError) -> Error {
    let (field, code) = match err {
        HabitValidationError::EmptyName => ("name", "required"),
        HabitValidationError::NameTooLong { .. } => ("name", "too_long"),
        HabitValidationError::InvalidId => ("id", "invalid_id"),
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

fn parse_habit_id(raw: &str) -> Result<HabitId, Error> {
    raw.parse::<HabitId>().map_err(map_habit_validation_error)
}

/// Create a habit for the caller.
#[utoipa::path(
    post,
    path = "/habits",
    request_body = CreateHabitRequest,
    responses(
        (status = 201, description = "Habit created", body = CreateHabitResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "No user is currently logged in", body = ErrorSchema),
        (status = 503, description = "Dependency unavailable", body = ErrorSchema)
    ),
    tags = ["habits"],
    operation_id = "createHabit"
)]
#[post("/habits")]
pub async fn create_habit(
    state: web::Data<TrackerState>,
    user: CurrentUser,
    payload: web::Json<CreateHabitRequest>,
) -> ApiResult<HttpResponse> {
    let draft = HabitDraft::try_from(payload.into_inner()).map_err(map_habit_validation_error)?;
    let habit = state.habits.create_habit(user.id(), &draft).await?;
    Ok(HttpResponse::Created().json(CreateHabitResponse {
        message: HABIT_CREATED_MESSAGE.to_owned(),
        habit: CreatedHabit {
            id: habit.id().get(),
            name: habit.name().as_str().to_owned(),
            description: habit.description().to_owned(),
            created_at: format_timestamp(habit.created_at()),
        },
    }))
}

/// List the caller's habits ordered by id.
#[utoipa::path(
    get,
    path = "/habits",
    responses(
        (status = 200, description = "Habits", body = [HabitResponse]),
        (status = 401, description = "No user is currently logged in", body = ErrorSchema),
        (status = 503, description = "Dependency unavailable", body = ErrorSchema)
    ),
    tags = ["habits"],
    operation_id = "listHabits"
)]
#[get("/habits")]
pub async fn list_habits(
    state: web::Data<TrackerState>,
    user: CurrentUser,
) -> ApiResult<web::Json<Vec<HabitResponse>>> {
    let habits = state.habits_query.list_habits(user.id()).await?;
    Ok(web::Json(habits.iter().map(HabitResponse::from).collect()))
}

/// Record a completion for one of the caller's habits.
#[utoipa::path(
    post,
    path = "/habits/{id}/track",
    params(("id" = i32, Path, description = "Habit identifier")),
    responses(
        (status = 200, description = "Completion recorded", body = TrackHabitResponse),
        (status = 400, description = "Invalid habit ID", body = ErrorSchema),
        (status = 401, description = "No user is currently logged in", body = ErrorSchema),
        (status = 404, description = "Habit not found", body = ErrorSchema),
        (status = 503, description = "Dependency unavailable", body = ErrorSchema)
    ),
    tags = ["habits"],
    operation_id = "trackHabit"
)]
#[post("/habits/{id}/track")]
pub async fn track_habit(
    state: web::Data<TrackerState>,
    user: CurrentUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<TrackHabitResponse>> {
    let habit_id = parse_habit_id(&path.into_inner())?;
    let tracked = state.habits.record_completion(user.id(), habit_id).await?;
    Ok(web::Json(TrackHabitResponse::from(tracked)))
}

/// Summarise the completion ledger of one of the caller's habits.
#[utoipa::path(
    get,
    path = "/habits/{id}/stats",
    params(("id" = i32, Path, description = "Habit identifier")),
    responses(
        (status = 200, description = "Habit statistics", body = HabitStatsResponse),
        (status = 400, description = "Invalid habit ID", body = ErrorSchema),
        (status = 401, description = "No user is currently logged in", body = ErrorSchema),
        (status = 404, description = "Habit not found", body = ErrorSchema),
        (status = 503, description = "Dependency unavailable", body = ErrorSchema)
    ),
    tags = ["habits"],
    operation_id = "habitStats"
)]
#[get("/habits/{id}/stats")]
pub async fn habit_stats(
    state: web::Data<TrackerState>,
    user: CurrentUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<HabitStatsResponse>> {
    let habit_id = parse_habit_id(&path.into_inner())?;
    let stats = state.habits_query.habit_stats(user.id(), habit_id).await?;
    Ok(web::Json(HabitStatsResponse::from(stats)))
}

#[cfg(test)]
#[path = "habits_tests.rs"]
mod tests;
