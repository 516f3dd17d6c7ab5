use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use deadpool_sqlite::{Object, Pool};
use shared::api::error::{Nothing, ServerError, ServerErrorContext};
use tracing::trace;

/// A pooled connection checked out for the lifetime of a request. Handlers
/// destructure it and run their queries through `interact`
#[derive(Debug)]
pub struct DatabaseConnection(pub Object);

#[async_trait]
impl<S> FromRequestParts<S> for DatabaseConnection
where
    S: Send + Sync,
    Pool: FromRef<S>,
{
    type Rejection = ServerError<Nothing>;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let pool = Pool::from_ref(state);
        trace!(status = ?pool.status(), "Checking out a connection");

        pool.get().await.map(DatabaseConnection).context("Pool::get")
    }
}
