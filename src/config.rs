use std::{env, fmt::Display, path::PathBuf, str::FromStr, time::Duration};

use chrono::Weekday;
use thiserror::Error;
use tracing::info;

use crate::shop::{BusinessHours, OrderWindow, ShopRules};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
    #[error("business hours must satisfy OPEN_HOUR < CLOSE_HOUR <= 24")]
    Hours,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub public_dir: PathBuf,
    pub rate_limit_window: Duration,
    pub api_rate_limit: u32,
    pub page_rate_limit: u32,
    pub shop: ShopRules,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, applying defaults for
    /// unset keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = match lookup("DATABASE_URL") {
            Some(url) => url,
            None => {
                let name: String = load(&lookup, "DB_NAME", "internet_camargo")?;
                format!("sqlite://{name}.db")
            }
        };

        let window_secs: u64 = load(&lookup, "RATE_LIMIT_WINDOW_SECS", "900")?;
        let config = Self {
            port: load(&lookup, "PORT", "3000")?,
            database_url,
            db_max_connections: non_zero("DB_POOL_SIZE", load(&lookup, "DB_POOL_SIZE", "10")?)?,
            public_dir: load(&lookup, "PUBLIC_DIR", "public")?,
            rate_limit_window: Duration::from_secs(non_zero("RATE_LIMIT_WINDOW_SECS", window_secs)?),
            api_rate_limit: non_zero("API_RATE_LIMIT", load(&lookup, "API_RATE_LIMIT", "100")?)?,
            page_rate_limit: non_zero("PAGE_RATE_LIMIT", load(&lookup, "PAGE_RATE_LIMIT", "200")?)?,
            shop: load_shop_rules(&lookup)?,
        };
        Ok(config)
    }
}

fn load_shop_rules<F>(lookup: &F) -> Result<ShopRules, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let order_day: Weekday = load(lookup, "ORDER_DAY", "saturday")?;
    let enforce_order_day = flag(lookup, "ENFORCE_ORDER_DAY", true)?;
    let first_day: Weekday = load(lookup, "BUSINESS_DAYS_FROM", "monday")?;
    let last_day: Weekday = load(lookup, "BUSINESS_DAYS_TO", "saturday")?;
    let open_hour: u32 = load(lookup, "OPEN_HOUR", "8")?;
    let close_hour: u32 = load(lookup, "CLOSE_HOUR", "18")?;

    let hours = BusinessHours::new(first_day, last_day, open_hour, close_hour).ok_or(ConfigError::Hours)?;

    Ok(ShopRules {
        order_window: OrderWindow::new(order_day),
        hours,
        enforce_order_day,
    })
}

fn load<F, T>(lookup: &F, key: &'static str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    let raw = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        reason: e.to_string(),
    })
}

fn flag<F>(lookup: &F, key: &'static str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::Invalid {
            key,
            reason: format!("expected a boolean, got {other:?}"),
        }),
    }
}

fn non_zero<T>(key: &'static str, value: T) -> Result<T, ConfigError>
where
    T: PartialEq + Default,
{
    if value == T::default() {
        Err(ConfigError::Zero(key))
    } else {
        Ok(value)
    }
}
