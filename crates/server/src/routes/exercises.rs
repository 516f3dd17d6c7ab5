use axum::{extract::Path, Json};
use axum_extra::extract::WithRejection;
use shared::{
    api::{error::ServerError, payloads::NewExercisePayload, response_errors::AddExerciseError},
    model::{date, ExerciseRecord},
    types::UserId,
};
use tracing::{debug, instrument};

use crate::db::DatabaseConnection;

#[instrument(skip(conn))]
pub async fn add_exercise(
    DatabaseConnection(conn): DatabaseConnection,
    Path(user_id): Path<UserId>,
    WithRejection(Json(payload), _): WithRejection<
        Json<NewExercisePayload>,
        ServerError<AddExerciseError>,
    >,
) -> Result<Json<ExerciseRecord>, ServerError<AddExerciseError>> {
    let new_exercise = payload.validate(user_id, date::today())?;

    let record = conn
        .interact(move |conn| new_exercise.create(conn))
        .await??
        .ok_or(AddExerciseError::UserNotFound)?;

    debug!(?record, "Added exercise");
    Ok(Json(record))
}
