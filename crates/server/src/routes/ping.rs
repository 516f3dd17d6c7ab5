use axum::Json;
use shared::api::error::{Nothing, ServerError};

use crate::db::DatabaseConnection;

/// Liveness check that also proves a pooled connection can run a query
pub async fn ping(DatabaseConnection(conn): DatabaseConnection) -> Result<Json<()>, ServerError<Nothing>> {
    conn.interact(|conn| conn.query_row("SELECT 1", (), |_| Ok(())))
        .await??;
    Ok(Json(()))
}
