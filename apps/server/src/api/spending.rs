use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::Serialize;
use vitalfolio_core::spending::{ExpenseEntry, MonthlySpending, NewExpenseEntry, SpendingSummary};

use super::validate_user_id;
use crate::{error::ApiResult, main_lib::AppState};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MonthResponse {
    #[serde(flatten)]
    spending: MonthlySpending,
    summary: SpendingSummary,
}

async fn add_expense(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(entry): Json<NewExpenseEntry>,
) -> ApiResult<(StatusCode, Json<ExpenseEntry>)> {
    validate_user_id(&user_id)?;
    let created = state.spending_service.add_expense(&user_id, entry).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_month(
    Path((user_id, month)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<MonthResponse>> {
    validate_user_id(&user_id)?;
    let spending = state.spending_service.get_month(&user_id, &month)?;
    let summary = state.spending_service.get_summary(&user_id, &month)?;
    Ok(Json(MonthResponse { spending, summary }))
}

async fn delete_expense(
    Path((user_id, month, entry_id)): Path<(String, String, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    validate_user_id(&user_id)?;
    let _ = state
        .spending_service
        .delete_expense(&user_id, &month, &entry_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users/{user_id}/spending", post(add_expense))
        .route("/users/{user_id}/spending/{month}", get(get_month))
        .route(
            "/users/{user_id}/spending/{month}/{entry_id}",
            delete(delete_expense),
        )
}
