use std::sync::Arc;

use crate::config::Config;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};
use vitalfolio_core::{
    calories::{CalorieService, CalorieServiceTrait},
    savings::{SavingsService, SavingsServiceTrait},
    spending::{SpendingService, SpendingServiceTrait},
};
use vitalfolio_storage_sqlite::{
    db, CalorieRepository, SavingsRepository, SpendingRepository,
};

pub struct AppState {
    pub savings_service: Arc<dyn SavingsServiceTrait>,
    pub calorie_service: Arc<dyn CalorieServiceTrait>,
    pub spending_service: Arc<dyn SpendingServiceTrait>,
    pub ledger_timezone: chrono_tz::Tz,
}

/// Installs the global subscriber. Records from the `log` facade used by the
/// library crates are forwarded into it.
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    let savings_repo = Arc::new(SavingsRepository::new(pool.clone(), writer.clone()));
    let calorie_repo = Arc::new(CalorieRepository::new(pool.clone(), writer.clone()));
    let spending_repo = Arc::new(SpendingRepository::new(pool.clone(), writer));

    Ok(Arc::new(AppState {
        savings_service: Arc::new(SavingsService::new(savings_repo)),
        calorie_service: Arc::new(CalorieService::with_timezone(
            calorie_repo,
            config.ledger_timezone,
        )),
        spending_service: Arc::new(SpendingService::new(spending_repo)),
        ledger_timezone: config.ledger_timezone,
    }))
}
