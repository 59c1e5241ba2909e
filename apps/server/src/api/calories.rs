use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use vitalfolio_core::calories::{
    CalorieGoal, CalorieGoalInput, CalorieProfile, DailyCalorieData, DeficitProgress,
    NewExerciseEntry, NewFoodEntry,
};
use vitalfolio_core::utils::time_utils::ledger_date_today;

use super::validate_user_id;
use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

#[derive(Debug, Deserialize)]
struct DayRangeQuery {
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
struct DeletedGoal {
    deleted: usize,
}

fn parse_date(raw: &str) -> ApiResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| ApiError::BadRequest(format!("Invalid date '{}', expected YYYY-MM-DD", raw)))
}

async fn get_goal(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Option<CalorieGoal>>> {
    validate_user_id(&user_id)?;
    Ok(Json(state.calorie_service.get_goal(&user_id)?))
}

async fn set_goal(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(input): Json<CalorieGoalInput>,
) -> ApiResult<Json<CalorieGoal>> {
    validate_user_id(&user_id)?;
    let goal = state.calorie_service.set_goal(&user_id, input).await?;
    Ok(Json(goal))
}

async fn delete_goal(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<DeletedGoal>> {
    validate_user_id(&user_id)?;
    let deleted = state.calorie_service.delete_goal(&user_id).await?;
    Ok(Json(DeletedGoal { deleted }))
}

async fn preview_goal(
    State(state): State<Arc<AppState>>,
    Json(profile): Json<CalorieProfile>,
) -> ApiResult<Json<CalorieGoal>> {
    Ok(Json(state.calorie_service.preview_goal(&profile)?))
}

async fn apply_profile(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(profile): Json<CalorieProfile>,
) -> ApiResult<Json<CalorieGoal>> {
    validate_user_id(&user_id)?;
    let goal = state
        .calorie_service
        .apply_profile(&user_id, profile)
        .await?;
    Ok(Json(goal))
}

async fn get_days(
    Path(user_id): Path<String>,
    Query(range): Query<DayRangeQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<DailyCalorieData>>> {
    validate_user_id(&user_id)?;
    Ok(Json(
        state
            .calorie_service
            .get_days(&user_id, range.from, range.to)?,
    ))
}

/// Today's ledger in the configured ledger timezone.
async fn get_today(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<DailyCalorieData>> {
    validate_user_id(&user_id)?;
    let today = ledger_date_today(state.ledger_timezone);
    Ok(Json(state.calorie_service.get_day(&user_id, today)?))
}

async fn get_day(
    Path((user_id, date)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<DailyCalorieData>> {
    validate_user_id(&user_id)?;
    let date = parse_date(&date)?;
    Ok(Json(state.calorie_service.get_day(&user_id, date)?))
}

async fn add_food(
    Path((user_id, date)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    Json(entry): Json<NewFoodEntry>,
) -> ApiResult<(StatusCode, Json<DailyCalorieData>)> {
    validate_user_id(&user_id)?;
    let date = parse_date(&date)?;
    let day = state.calorie_service.add_food(&user_id, date, entry).await?;
    Ok((StatusCode::CREATED, Json(day)))
}

async fn delete_food(
    Path((user_id, date, entry_id)): Path<(String, String, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<DailyCalorieData>> {
    validate_user_id(&user_id)?;
    let date = parse_date(&date)?;
    let day = state
        .calorie_service
        .delete_food(&user_id, date, &entry_id)
        .await?;
    Ok(Json(day))
}

async fn add_exercise(
    Path((user_id, date)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    Json(entry): Json<NewExerciseEntry>,
) -> ApiResult<(StatusCode, Json<DailyCalorieData>)> {
    validate_user_id(&user_id)?;
    let date = parse_date(&date)?;
    let day = state
        .calorie_service
        .add_exercise(&user_id, date, entry)
        .await?;
    Ok((StatusCode::CREATED, Json(day)))
}

async fn delete_exercise(
    Path((user_id, date, entry_id)): Path<(String, String, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<DailyCalorieData>> {
    validate_user_id(&user_id)?;
    let date = parse_date(&date)?;
    let day = state
        .calorie_service
        .delete_exercise(&user_id, date, &entry_id)
        .await?;
    Ok(Json(day))
}

async fn get_progress(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Option<DeficitProgress>>> {
    validate_user_id(&user_id)?;
    Ok(Json(state.calorie_service.get_progress(&user_id)?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/calories/goal/calculate", post(preview_goal))
        .route(
            "/users/{user_id}/calories/goal",
            get(get_goal).put(set_goal).delete(delete_goal),
        )
        .route("/users/{user_id}/calories/goal/profile", post(apply_profile))
        .route("/users/{user_id}/calories/today", get(get_today))
        .route("/users/{user_id}/calories/days", get(get_days))
        .route("/users/{user_id}/calories/days/{date}", get(get_day))
        .route("/users/{user_id}/calories/days/{date}/food", post(add_food))
        .route(
            "/users/{user_id}/calories/days/{date}/food/{entry_id}",
            delete(delete_food),
        )
        .route(
            "/users/{user_id}/calories/days/{date}/exercise",
            post(add_exercise),
        )
        .route(
            "/users/{user_id}/calories/days/{date}/exercise/{entry_id}",
            delete(delete_exercise),
        )
        .route("/users/{user_id}/calories/progress", get(get_progress))
}
