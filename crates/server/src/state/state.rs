use axum::extract::FromRef;
use deadpool_sqlite::Pool;

/// Shared by every route. Cloned per request
#[derive(Debug, Clone)]
pub struct AppState {
    pub pool: Pool,
}

impl AppState {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

impl FromRef<AppState> for Pool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}
