//! Shared handler state.

use reports::ReportService;
use sqlx::PgPool;
use store::Repositories;

/// Shared application state accessible from all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repos: Repositories,
    pub reports: ReportService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repos: Repositories::new(pool.clone()),
            reports: ReportService::new(pool),
        }
    }
}
