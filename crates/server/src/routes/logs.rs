use axum::{
    extract::{Path, Query},
    Json,
};
use axum_extra::extract::WithRejection;
use shared::{
    api::{error::ServerError, payloads::LogQuery, response_errors::UserLogError},
    model::{LogFilter, UserLog},
    types::UserId,
};
use tracing::instrument;

use crate::db::DatabaseConnection;

#[instrument(skip(conn))]
pub async fn fetch_user_log(
    DatabaseConnection(conn): DatabaseConnection,
    Path(user_id): Path<UserId>,
    WithRejection(Query(query), _): WithRejection<Query<LogQuery>, ServerError<UserLogError>>,
) -> Result<Json<UserLog>, ServerError<UserLogError>> {
    let filter = LogFilter::from(query);

    let log = conn
        .interact(move |conn| UserLog::fetch(conn, &user_id, &filter))
        .await??
        .ok_or(UserLogError::UserNotFound)?;

    Ok(Json(log))
}
