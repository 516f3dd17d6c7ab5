use axum::Json;
use axum_extra::extract::WithRejection;
use shared::{
    api::{
        error::ServerError,
        payloads::NewUserPayload,
        response_errors::{CreateUserError, ListUsersError},
    },
    model::{User, ValidateModel},
};
use tracing::{info, instrument};

use crate::db::DatabaseConnection;

#[instrument(skip(conn))]
pub async fn create_user(
    DatabaseConnection(conn): DatabaseConnection,
    WithRejection(Json(payload), _): WithRejection<
        Json<NewUserPayload>,
        ServerError<CreateUserError>,
    >,
) -> Result<Json<User>, ServerError<CreateUserError>> {
    payload.validate()?;

    let username = payload.username().to_owned();
    let user = conn
        .interact(move |conn| User::create(conn, &username))
        .await??;

    info!(user_id = %user.id, username = user.username, "Created user");
    Ok(Json(user))
}

#[instrument(skip(conn))]
pub async fn list_users(
    DatabaseConnection(conn): DatabaseConnection,
) -> Result<Json<Vec<User>>, ServerError<ListUsersError>> {
    let users = conn.interact(|conn| User::fetch_all(conn)).await??;
    Ok(Json(users))
}
