use axum::{
    routing::{get, post},
    Router,
};
use shared::api::Object;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::AppState;

mod ping;
pub use ping::*;

mod users;
pub use users::*;

mod exercises;
pub use exercises::*;

mod logs;
pub use logs::*;


pub fn router(state: AppState) -> Router {
    Router::new()
        .route(Object::Users.path(), get(list_users).post(create_user))
        .route(Object::UserExercises.path(), post(add_exercise))
        .route(Object::UserLogs.path(), get(fetch_user_log))
        .route(Object::Ping.path(), get(ping))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
