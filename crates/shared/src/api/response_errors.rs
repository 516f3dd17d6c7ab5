use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::error::ServerError;

macro_rules! response_error {
    ($name:ident {
        $(
            #[code($variant_code:expr)]
            #[message($variant_message:tt)]
            $variant:ident
            $({ $($var_struct_body_tt:tt)* })?
        ,)*
    }) => {

        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
        pub enum $name {
            $(
                #[error($variant_message)]
                $variant $({
                    $($var_struct_body_tt)*
                })?,
            )*
        }

        impl From<$name> for ServerError<$name> {
            fn from(inner: $name) -> Self {
                let code = match &inner {
                    $( $name::$variant { .. } => $variant_code, )*
                };
                Self::Inner { code, inner }
            }
        }
    };
}

response_error!(CreateUserError {
    #[code(StatusCode::CONFLICT)]
    #[message("Username already taken")]
    UsernameTaken,
});

response_error!(AddExerciseError {
    #[code(StatusCode::NOT_FOUND)]
    #[message("User not found")]
    UserNotFound,
});

response_error!(UserLogError {
    #[code(StatusCode::NOT_FOUND)]
    #[message("User not found")]
    UserNotFound,
});

// Alias used to allow future expansion of the errors without having to go back
// and update all routes that use it
pub type ListUsersError = crate::api::error::Nothing;
