use std::io;
use std::sync::Arc;

use actix_web::{web, HttpServer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use camargo_shop::config::Config;
use camargo_shop::shop::{availability, SystemClock};
use camargo_shop::state::AppState;
use camargo_shop::{build_app, db, RateLimits};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env().map_err(io::Error::other)?;
    let limits = RateLimits::from_config(&config).map_err(io::Error::other)?;

    let pool = db::init_pool(&config.database_url, config.db_max_connections)
        .await
        .map_err(io::Error::other)?;
    info!(database = %config.database_url, "database ready");

    let state = web::Data::new(AppState::new(pool, config.shop, config.public_dir.clone()));
    let _recheck = availability::spawn_midnight_recheck(Arc::new(SystemClock), config.shop.order_window);
    let _prune = limits.spawn_pruning(config.rate_limit_window);

    info!(port = config.port, order_day = ?config.shop.order_window.order_day(), "starting server");

    HttpServer::new(move || build_app(state.clone(), limits.clone()))
        .bind(("0.0.0.0", config.port))?
        .run()
        .await
}
