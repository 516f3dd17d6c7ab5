use serde::{Deserialize, Serialize};

use crate::types::UserId;

#[cfg(feature = "backend")]
use {
    crate::api::{
        error::{ServerError, ServerErrorContext},
        response_errors::CreateUserError,
    },
    crate::other_error,
    exemplar::Model,
    rusqlite::{Connection, OptionalExtension, TransactionBehavior},
    sea_query::{Alias, Expr, Iden, Order, Query, SqliteQueryBuilder},
    sea_query_rusqlite::RusqliteBinder,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("users"))]
pub struct User {
    pub id: UserId,
    pub username: String,
}

#[cfg(feature = "backend")]
#[derive(Iden)]
pub enum Users {
    Table,
    Id,
    Username,
}

#[cfg(feature = "backend")]
impl User {
    pub fn fetch_by_id(conn: &Connection, id: &UserId) -> Result<Option<User>, rusqlite::Error> {
        let (sql, values) = Query::select()
            .columns([Users::Id, Users::Username])
            .from(Users::Table)
            .and_where(Expr::col(Users::Id).eq(id))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let user = stmt.query_row(&*values.as_params(), User::from_row).optional()?;
        Ok(user)
    }

    /// All users in the order they signed up
    pub fn fetch_all(conn: &Connection) -> Result<Vec<User>, rusqlite::Error> {
        let (sql, values) = Query::select()
            .columns([Users::Id, Users::Username])
            .from(Users::Table)
            .order_by(Alias::new("rowid"), Order::Asc)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let users = stmt
            .query_map(&*values.as_params(), User::from_row)?
            .collect::<Result<_, _>>()?;
        Ok(users)
    }

    /// Insert a user under a freshly generated id and read it back. Both
    /// happen in one immediate transaction so a racing signup for the same
    /// username either sees this row or fails on the unique constraint
    pub fn create(
        conn: &mut Connection,
        username: &str,
    ) -> Result<User, ServerError<CreateUserError>> {
        let new_user = User {
            id: UserId::generate(),
            username: username.to_owned(),
        };

        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let user = {
            match new_user.insert(&tx) {
                Err(e) if is_unique_violation(&e) => Err(CreateUserError::UsernameTaken)?,
                r => r.context("User::create insert")?,
            };

            User::fetch_by_id(&tx, &new_user.id)
                .context("User::create fetch")?
                .ok_or_else(|| other_error!("User {} missing after insert", new_user.id))?
        };
        tx.commit()?;

        Ok(user)
    }
}

#[cfg(feature = "backend")]
fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}
