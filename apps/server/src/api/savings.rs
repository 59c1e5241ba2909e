use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use vitalfolio_core::savings::{
    convert_gold_rate, AssetKind, GoldRates, HistoryItem, MonthGroup, RateEntry, RateInput,
    SavingsData, TimelinePoint,
};
use vitalfolio_core::constants::{DEFAULT_RECENT_HISTORY_LIMIT, DISPLAY_DECIMAL_PRECISION};
use vitalfolio_core::utils::number_utils::lenient_decimal;

use super::validate_user_id;
use crate::{error::ApiResult, main_lib::AppState};

#[derive(Debug, Deserialize)]
struct GoldRateQuery {
    #[serde(default, deserialize_with = "lenient_decimal")]
    rate21k: Decimal,
}

#[derive(Debug, Deserialize)]
struct HistoryQuery {
    limit: Option<usize>,
}

#[derive(Debug, Serialize)]
struct ClearedHistory {
    deleted: usize,
}

async fn get_savings(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<SavingsData>> {
    validate_user_id(&user_id)?;
    Ok(Json(state.savings_service.get_savings(&user_id)?))
}

async fn update_savings(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(savings): Json<SavingsData>,
) -> ApiResult<Json<SavingsData>> {
    validate_user_id(&user_id)?;
    let saved = state
        .savings_service
        .update_savings(&user_id, savings)
        .await?;
    Ok(Json(saved))
}

/// Derived purity prices, rounded for display.
async fn gold_rates(Query(query): Query<GoldRateQuery>) -> Json<GoldRates> {
    let rates = convert_gold_rate(query.rate21k);
    Json(GoldRates {
        rate18k: rates.rate18k.round_dp(DISPLAY_DECIMAL_PRECISION),
        rate24k: rates.rate24k.round_dp(DISPLAY_DECIMAL_PRECISION),
    })
}

/// Responds with the new history entry, or `null` when no rate was entered.
async fn calculate(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(input): Json<RateInput>,
) -> ApiResult<Json<Option<RateEntry>>> {
    validate_user_id(&user_id)?;
    let entry = state.savings_service.calculate(&user_id, input).await?;
    Ok(Json(entry))
}

async fn get_history(
    Path(user_id): Path<String>,
    Query(query): Query<HistoryQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<HistoryItem>>> {
    validate_user_id(&user_id)?;
    Ok(Json(
        state.savings_service.get_history(&user_id, query.limit)?,
    ))
}

async fn get_recent_history(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<HistoryItem>>> {
    validate_user_id(&user_id)?;
    Ok(Json(
        state
            .savings_service
            .get_history(&user_id, Some(DEFAULT_RECENT_HISTORY_LIMIT))?,
    ))
}

async fn clear_history(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ClearedHistory>> {
    validate_user_id(&user_id)?;
    let deleted = state.savings_service.clear_history(&user_id).await?;
    Ok(Json(ClearedHistory { deleted }))
}

async fn get_history_by_month(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<MonthGroup>>> {
    validate_user_id(&user_id)?;
    Ok(Json(state.savings_service.get_history_by_month(&user_id)?))
}

/// Out-of-range indexes are a no-op.
async fn delete_history_entry(
    Path((user_id, index)): Path<(String, usize)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    validate_user_id(&user_id)?;
    let _ = state
        .savings_service
        .delete_history_entry(&user_id, index)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_asset_timeline(
    Path((user_id, asset)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<TimelinePoint>>> {
    validate_user_id(&user_id)?;
    let asset: AssetKind = asset.parse()?;
    Ok(Json(
        state.savings_service.get_asset_timeline(&user_id, asset)?,
    ))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/gold-rates", get(gold_rates))
        .route(
            "/users/{user_id}/savings",
            get(get_savings).put(update_savings),
        )
        .route("/users/{user_id}/savings/calculate", post(calculate))
        .route(
            "/users/{user_id}/savings/history",
            get(get_history).delete(clear_history),
        )
        .route(
            "/users/{user_id}/savings/history/recent",
            get(get_recent_history),
        )
        .route(
            "/users/{user_id}/savings/history/by-month",
            get(get_history_by_month),
        )
        .route(
            "/users/{user_id}/savings/history/{index}",
            delete(delete_history_entry),
        )
        .route(
            "/users/{user_id}/savings/timeline/{asset}",
            get(get_asset_timeline),
        )
}
