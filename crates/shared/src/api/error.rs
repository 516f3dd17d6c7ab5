use std::{error::Error, fmt};

use http::StatusCode;
use serde::{Deserialize, Serialize};

/// What the client sees for any 5xx failure. Details only go to the server log
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    pub error_messages: Vec<String>,
}

impl ValidationError {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            error_messages: vec![message.into()],
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error_messages.join("; "))
    }
}

impl Error for ValidationError {}

/// Body of every error response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response error for routes that don't have any failure modes of their own
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Nothing {}

impl fmt::Display for Nothing {
    fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl Error for Nothing {}

#[derive(Debug)]
pub enum ServerError<T> {
    /// An expected failure specific to the route, see `response_errors`
    Inner { code: StatusCode, inner: T },
    Validation { inner: ValidationError },
    Database { message: String },
    Pool { message: String },
    Interact { message: String },
    Other { message: String },

    WithContext { context: String, inner: Box<Self> },
}

impl<T: fmt::Display> ServerError<T> {
    pub fn status_code(&self) -> StatusCode {
        use ServerError::*;
        match self {
            Inner { code, .. } => *code,
            Validation { .. } => StatusCode::BAD_REQUEST,
            Database { .. } | Pool { .. } | Interact { .. } | Other { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            },
            WithContext { inner, .. } => inner.status_code(),
        }
    }

    /// The message that is safe to hand back to the client
    pub fn client_message(&self) -> String {
        use ServerError::*;
        match self {
            Inner { code, inner } if !code.is_server_error() => inner.to_string(),
            Validation { inner } => inner.to_string(),
            WithContext { inner, .. } => inner.client_message(),
            _ => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}

impl<T: fmt::Display> fmt::Display for ServerError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ServerError::*;
        match self {
            Inner { code, inner } => write!(f, "{code}: {inner}"),
            Validation { inner } => write!(f, "Validation error: {inner}"),
            Database { message } => write!(f, "Database error: {message}"),
            Pool { message } => write!(f, "Pool error: {message}"),
            Interact { message } => write!(f, "Interact error: {message}"),
            Other { message } => write!(f, "{message}"),
            WithContext { context, inner } => write!(f, "{context}: {inner}"),
        }
    }
}

impl<T: fmt::Debug + fmt::Display> Error for ServerError<T> {}

impl<T> From<ValidationError> for ServerError<T> {
    fn from(inner: ValidationError) -> Self {
        Self::Validation { inner }
    }
}

/// Build a `ServerError::Other` from format args
#[macro_export]
macro_rules! other_error {
    ($($arg:tt)*) => {
        $crate::api::error::ServerError::Other { message: format!($($arg)*) }
    };
}

pub trait ServerErrorContext<R, T> {
    /// Wrap the error with context that ends up in the server log but never
    /// in the response
    fn context<S: Into<String>>(self, context: S) -> Result<R, ServerError<T>>;
}

impl<R, T, E: Into<ServerError<T>>> ServerErrorContext<R, T> for Result<R, E> {
    fn context<S: Into<String>>(self, context: S) -> Result<R, ServerError<T>> {
        self.map_err(|e| ServerError::WithContext {
            context: context.into(),
            inner: Box::new(e.into()),
        })
    }
}

#[cfg(feature = "backend")]
mod backend {
    use std::fmt;

    use axum::{
        extract::rejection::{JsonRejection, QueryRejection},
        response::{IntoResponse, Response},
        Json,
    };
    use deadpool_sqlite::{InteractError, PoolError};
    use tracing::{debug, error};

    use super::{ErrorResponse, ServerError, ValidationError};

    impl<T> From<rusqlite::Error> for ServerError<T> {
        fn from(err: rusqlite::Error) -> Self {
            Self::Database {
                message: format!("{err:?}"),
            }
        }
    }

    impl<T> From<PoolError> for ServerError<T> {
        fn from(err: PoolError) -> Self {
            Self::Pool {
                message: format!("{err:?}"),
            }
        }
    }

    impl<T> From<InteractError> for ServerError<T> {
        fn from(err: InteractError) -> Self {
            Self::Interact {
                message: format!("{err:?}"),
            }
        }
    }

    impl<T> From<JsonRejection> for ServerError<T> {
        fn from(rejection: JsonRejection) -> Self {
            ValidationError::new(rejection.body_text()).into()
        }
    }

    impl<T> From<QueryRejection> for ServerError<T> {
        fn from(rejection: QueryRejection) -> Self {
            ValidationError::new(rejection.body_text()).into()
        }
    }

    impl<T: fmt::Debug + fmt::Display> IntoResponse for ServerError<T> {
        fn into_response(self) -> Response {
            let code = self.status_code();
            if code.is_server_error() {
                error!(error = ?self, "{self}");
            } else {
                debug!(%code, "{self}");
            }

            (code, Json(ErrorResponse { error: self.client_message() })).into_response()
        }
    }
}
