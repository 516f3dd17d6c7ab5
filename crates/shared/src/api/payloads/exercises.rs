use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    api::error::ValidationError,
    model::{date::parse_date, NewExercise},
    types::UserId,
};

pub const MISSING_FIELDS_MESSAGE: &str = "Description and duration are required";
pub const INVALID_DURATION_MESSAGE: &str = "Duration must be a positive number";
pub const INVALID_DATE_MESSAGE: &str = "Invalid date format. Use YYYY-MM-DD";

/// Body of an add exercise request. `duration` may be a JSON number or a
/// numeric string, so it is kept loose until validation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewExercisePayload {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub duration: Option<Value>,
    #[serde(default)]
    pub date: Option<String>,
}

impl NewExercisePayload {
    pub fn new<D: Into<String>>(description: D, duration: i64, date: Option<&str>) -> Self {
        Self {
            description: Some(description.into()),
            duration: Some(duration.into()),
            date: date.map(str::to_owned),
        }
    }

    /// Check every field and build the row to insert. A missing or empty date
    /// falls back to `today`
    pub fn validate(
        &self,
        user_id: UserId,
        today: NaiveDate,
    ) -> Result<NewExercise, ValidationError> {
        let description = self.description.as_deref().map_or("", str::trim);
        let duration = self.duration.as_ref().filter(|v| !is_blank(v));

        let Some(duration) = duration.filter(|_| !description.is_empty()) else {
            return Err(ValidationError::new(MISSING_FIELDS_MESSAGE));
        };

        let duration = parse_duration(duration)
            .filter(|d| *d > 0)
            .ok_or_else(|| ValidationError::new(INVALID_DURATION_MESSAGE))?;

        let date = match self.date.as_deref().map(str::trim) {
            None | Some("") => today,
            Some(date) => parse_date(date).ok_or_else(|| ValidationError::new(INVALID_DATE_MESSAGE))?,
        };

        Ok(NewExercise {
            user_id,
            description: description.to_owned(),
            duration,
            date,
        })
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn parse_duration(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
