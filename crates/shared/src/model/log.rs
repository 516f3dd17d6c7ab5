use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    model::{date::display_date, Exercise},
    types::UserId,
};

#[cfg(feature = "backend")]
use {
    crate::model::User,
    rusqlite::{Connection, TransactionBehavior},
};

/// Date range and row cap for a log query. Bounds are inclusive
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LogFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    /// Caps the returned entries, never the count
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub description: String,
    pub duration: i64,
    pub date: String,
}

impl From<Exercise> for LogEntry {
    fn from(exercise: Exercise) -> Self {
        Self {
            description: exercise.description,
            duration: exercise.duration,
            date: display_date(exercise.date),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserLog {
    pub id: UserId,
    pub username: String,
    /// Every exercise matching the date range, even when `log` was cut short
    /// by the limit
    pub count: u64,
    pub log: Vec<LogEntry>,
}

#[cfg(feature = "backend")]
impl UserLog {
    /// Returns `None` when the user doesn't exist
    pub fn fetch(
        conn: &mut Connection,
        user_id: &UserId,
        filter: &LogFilter,
    ) -> Result<Option<UserLog>, rusqlite::Error> {
        // Count and rows come from one snapshot
        let tx = conn.transaction_with_behavior(TransactionBehavior::Deferred)?;

        let Some(user) = User::fetch_by_id(&tx, user_id)? else {
            return Ok(None);
        };
        let count = Exercise::count_matching(&tx, &user.id, filter)?;
        let log = Exercise::fetch_matching(&tx, &user.id, filter)?
            .into_iter()
            .map(LogEntry::from)
            .collect();
        tx.commit()?;

        Ok(Some(UserLog {
            id: user.id,
            username: user.username,
            count,
            log,
        }))
    }
}
