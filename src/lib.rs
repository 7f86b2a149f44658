pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod shop;
pub mod state;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_support;

use std::time::Duration;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::{Logger, NormalizePath};
use actix_web::{guard, web, App};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::config::{Config, ConfigError};
use crate::middleware::{RateLimit, Rejection};
use crate::state::AppState;

/// Limiters shared by every worker so budgets are per process, not per thread.
#[derive(Clone)]
pub struct RateLimits {
    pub api: RateLimit,
    pub pages: RateLimit,
}

impl RateLimits {
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let window = config.rate_limit_window;
        let api = RateLimit::per_window(config.api_rate_limit, window, Rejection::Json)
            .ok_or(ConfigError::Zero("API_RATE_LIMIT"))?;
        let pages = RateLimit::per_window(config.page_rate_limit, window, Rejection::Text)
            .ok_or(ConfigError::Zero("PAGE_RATE_LIMIT"))?;
        Ok(Self { api, pages })
    }

    /// Periodically forgets clients whose budgets have fully recovered.
    pub fn spawn_pruning(&self, every: Duration) -> JoinHandle<()> {
        let limits = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                limits.api.retain_recent();
                limits.pages.retain_recent();
                debug!(
                    api = limits.api.tracked_clients(),
                    pages = limits.pages.tracked_clients(),
                    "pruned rate limiter state"
                );
            }
        })
    }
}

pub fn build_app(
    state: web::Data<AppState>,
    limits: RateLimits,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let public_dir = state.public_dir.clone();

    App::new()
        .wrap(Logger::default())
        .wrap(NormalizePath::trim())
        .wrap(Cors::permissive())
        .app_data(state)
        .app_data(handlers::json_config())
        .route("/health", web::get().to(handlers::health_check))
        .service(
            web::scope("/api")
                .wrap(limits.api)
                .configure(handlers::configure)
                .default_service(web::to(handlers::spa_fallback)),
        )
        .service(
            web::scope("")
                .wrap(limits.pages)
                .service(
                    Files::new("/", public_dir)
                        .guard(guard::Any(guard::Get()).or(guard::Head()))
                        .index_file("index.html")
                        .default_handler(web::to(handlers::spa_fallback)),
                )
                .default_service(web::to(handlers::spa_fallback)),
        )
        .default_service(web::to(handlers::spa_fallback))
}
