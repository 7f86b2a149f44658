use std::path::PathBuf;
use std::sync::Arc;

use sqlx::SqlitePool;

use crate::shop::{Clock, ShopRules, SystemClock};

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub clock: Arc<dyn Clock>,
    pub rules: ShopRules,
    pub public_dir: PathBuf,
}

impl AppState {
    pub fn new(pool: SqlitePool, rules: ShopRules, public_dir: impl Into<PathBuf>) -> Self {
        Self {
            pool,
            clock: Arc::new(SystemClock),
            rules,
            public_dir: public_dir.into(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}
