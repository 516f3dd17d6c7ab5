use serde::{Deserialize, Serialize};

use crate::{api::error::ValidationError, model::ValidateModel};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewUserPayload {
    #[serde(default)]
    pub username: Option<String>,
}

impl NewUserPayload {
    pub fn new<T: Into<String>>(username: T) -> Self {
        Self {
            username: Some(username.into()),
        }
    }

    /// The username with surrounding whitespace removed
    pub fn username(&self) -> &str {
        self.username.as_deref().map_or("", str::trim)
    }
}

impl ValidateModel for NewUserPayload {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.username().is_empty() {
            Err(ValidationError::new("Username is required"))
        } else {
            Ok(())
        }
    }
}
