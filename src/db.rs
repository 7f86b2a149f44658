use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, SqlitePool};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

pub async fn init_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let connect_opts = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true);

    let mut pool_opts = SqlitePoolOptions::new().max_connections(max_connections);
    // An in-memory database exists only while a connection holds it open.
    if is_in_memory(database_url) {
        if max_connections > 1 {
            debug!(max_connections, "in-memory database uses a single pinned connection");
        }
        pool_opts = pool_opts
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>);
    }

    let pool = pool_opts.connect_with(connect_opts).await?;

    create_schema(&pool).await?;

    Ok(pool)
}

fn is_in_memory(database_url: &str) -> bool {
    let rest = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:");
    let (path, params) = rest.split_once('?').unwrap_or((rest, ""));
    path.ends_with(":memory:") || params.split('&').any(|p| p == "mode=memory")
}

pub async fn create_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS customers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            phone TEXT,
            address TEXT,
            service_choice TEXT,
            registered_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ','now'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS contact_messages (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            phone TEXT NOT NULL,
            email TEXT NOT NULL,
            service TEXT NOT NULL,
            message TEXT NOT NULL,
            sent_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ','now'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS food_orders (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            phone TEXT,
            address TEXT,
            dish TEXT NOT NULL,
            quantity INTEGER NOT NULL DEFAULT 1,
            notes TEXT,
            delivery_type TEXT NOT NULL DEFAULT 'pickup',
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ','now'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Price columns arrived after the first deployments; databases that
    // already have them reject the ALTER with a duplicate column error.
    for column in [
        "unit_price REAL NOT NULL DEFAULT 0",
        "total_price REAL NOT NULL DEFAULT 0",
    ] {
        let sql = format!("ALTER TABLE food_orders ADD COLUMN {column};");
        if let Err(e) = sqlx::query(&sql).execute(pool).await {
            debug!(error = %e, column, "food_orders column already present");
        }
    }

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sales_requests (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            customer_name TEXT NOT NULL,
            customer_phone TEXT NOT NULL,
            customer_email TEXT,
            items TEXT NOT NULL CHECK (json_valid(items)),
            status TEXT NOT NULL DEFAULT 'pending',
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ','now'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
