use anyhow::Context;
use chrono_tz::Tz;
use std::{net::SocketAddr, time::Duration};
use vitalfolio_core::utils::time_utils::parse_timezone;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// Calendar used to decide which ledger day is "today".
    pub ledger_timezone: Tz,
    pub log_json: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("VF_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid VF_LISTEN_ADDR")?;
        let db_path = std::env::var("VF_DB_PATH").unwrap_or_else(|_| "./db/app.db".into());
        let cors_allow = std::env::var("VF_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = std::env::var("VF_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        let ledger_timezone = parse_timezone(std::env::var("VF_LEDGER_TZ").ok().as_deref())
            .context("Invalid VF_LEDGER_TZ")?;
        let log_json = std::env::var("VF_LOG_FORMAT")
            .map(|f| f.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            ledger_timezone,
            log_json,
        })
    }
}
