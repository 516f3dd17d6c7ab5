mod user;
pub use user::*;

mod exercise;
pub use exercise::*;

mod log;
pub use log::*;

pub mod date;

use crate::api::error::ValidationError;

pub trait ValidateModel {
    fn validate(&self) -> Result<(), ValidationError>;
}
