use std::{fmt, ops::Deref};

use serde::{Deserialize, Serialize};
#[cfg(feature = "backend")]
use rusqlite::{
    types::{FromSql, FromSqlResult, ToSqlOutput, ValueRef},
    ToSql,
};

/// Number of hex characters in a generated user id
pub const USER_ID_LENGTH: usize = 24;

/// Opaque user identifier. Generated ids are 24 lowercase hex characters but
/// anything a client sends is accepted and simply won't match a user
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn generate() -> Self {
        let mut id = uuid::Uuid::new_v4().simple().to_string();
        id.truncate(USER_ID_LENGTH);
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Deref for UserId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

#[cfg(feature = "backend")]
impl ToSql for UserId {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0.as_str()))
    }
}

#[cfg(feature = "backend")]
impl FromSql for UserId {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value.as_str().map(UserId::from)
    }
}

#[cfg(feature = "backend")]
impl From<&UserId> for sea_query::Value {
    fn from(value: &UserId) -> Self {
        value.0.clone().into()
    }
}

#[cfg(feature = "backend")]
impl From<UserId> for sea_query::Value {
    fn from(value: UserId) -> Self {
        value.0.into()
    }
}
