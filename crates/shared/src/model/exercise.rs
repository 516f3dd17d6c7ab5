use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    model::{date::display_date, User},
    types::UserId,
};

#[cfg(feature = "backend")]
use {
    crate::model::LogFilter,
    exemplar::Model,
    rusqlite::{Connection, TransactionBehavior},
    sea_query::{Expr, Iden, Order, Query, SelectStatement, SqliteQueryBuilder},
    sea_query_rusqlite::RusqliteBinder,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("exercises"))]
pub struct Exercise {
    pub id: i64,
    pub user_id: UserId,
    pub description: String,
    /// Minutes
    pub duration: i64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("exercises"))]
pub struct NewExercise {
    pub user_id: UserId,
    pub description: String,
    pub duration: i64,
    pub date: NaiveDate,
}

/// What a client gets back after recording an exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseRecord {
    pub id: UserId,
    pub username: String,
    pub date: String,
    pub duration: i64,
    pub description: String,
}

impl ExerciseRecord {
    pub fn new(user: User, exercise: NewExercise) -> Self {
        Self {
            id: user.id,
            username: user.username,
            date: display_date(exercise.date),
            duration: exercise.duration,
            description: exercise.description,
        }
    }
}

#[cfg(feature = "backend")]
#[derive(Iden)]
pub enum Exercises {
    Table,
    Id,
    UserId,
    Description,
    Duration,
    Date,
}

#[cfg(feature = "backend")]
impl NewExercise {
    /// Record the exercise against its user. Returns `None`, without writing
    /// anything, when the user doesn't exist
    pub fn create(self, conn: &mut Connection) -> Result<Option<ExerciseRecord>, rusqlite::Error> {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let Some(user) = User::fetch_by_id(&tx, &self.user_id)? else {
            return Ok(None);
        };
        self.insert(&tx)?;
        tx.commit()?;

        Ok(Some(ExerciseRecord::new(user, self)))
    }
}

#[cfg(feature = "backend")]
impl Exercise {
    /// The user's exercises restricted to the filter's date range. The limit
    /// is not applied here so the same statement can be counted
    fn matching(user_id: &UserId, filter: &LogFilter) -> SelectStatement {
        Query::select()
            .from(Exercises::Table)
            .and_where(Expr::col(Exercises::UserId).eq(user_id))
            .and_where_option(filter.from.map(|from| Expr::col(Exercises::Date).gte(from)))
            .and_where_option(filter.to.map(|to| Expr::col(Exercises::Date).lte(to)))
            .to_owned()
    }

    /// Number of exercises in the date range, regardless of the limit
    pub fn count_matching(
        conn: &Connection,
        user_id: &UserId,
        filter: &LogFilter,
    ) -> Result<u64, rusqlite::Error> {
        let (sql, values) = Self::matching(user_id, filter)
            .expr(Expr::col(Exercises::Id).count())
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let count = stmt.query_row(&*values.as_params(), |row| row.get(0))?;
        Ok(count)
    }

    /// Exercises in the date range, newest first with later entries first on
    /// the same day, capped by the filter's limit
    pub fn fetch_matching(
        conn: &Connection,
        user_id: &UserId,
        filter: &LogFilter,
    ) -> Result<Vec<Exercise>, rusqlite::Error> {
        let mut select = Self::matching(user_id, filter);
        select
            .columns([
                Exercises::Id,
                Exercises::UserId,
                Exercises::Description,
                Exercises::Duration,
                Exercises::Date,
            ])
            .order_by(Exercises::Date, Order::Desc)
            .order_by(Exercises::Id, Order::Desc);
        if let Some(limit) = filter.limit {
            select.limit(limit);
        }
        let (sql, values) = select.build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let exercises = stmt
            .query_map(&*values.as_params(), Exercise::from_row)?
            .collect::<Result<_, _>>()?;
        Ok(exercises)
    }
}
