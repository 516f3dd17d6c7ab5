use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_with::{serde_as, DeserializeAs, NoneAsEmptyString, SerializeAs};

use crate::model::{
    date::{parse_canonical_date, DATE_FORMAT},
    LogFilter,
};

/// SQLite binds a limit as a signed 64 bit integer
const MAX_LIMIT: u64 = i64::MAX as u64;

/// Query string of a log request. Dates are `YYYY-MM-DD` and empty values
/// count as absent
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogQuery {
    #[serde_as(as = "QueryDate")]
    #[serde(default)]
    pub from: Option<NaiveDate>,
    #[serde_as(as = "QueryDate")]
    #[serde(default)]
    pub to: Option<NaiveDate>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub limit: Option<u64>,
}

/// A `YYYY-MM-DD` query value where the empty string means absent
struct QueryDate;

impl<'de> DeserializeAs<'de, Option<NaiveDate>> for QueryDate {
    fn deserialize_as<D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        if value.is_empty() {
            return Ok(None);
        }
        parse_canonical_date(&value)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid date `{value}`, expected YYYY-MM-DD")))
    }
}

impl SerializeAs<Option<NaiveDate>> for QueryDate {
    fn serialize_as<S>(source: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match source {
            Some(date) => serializer.collect_str(&date.format(DATE_FORMAT)),
            None => serializer.serialize_str(""),
        }
    }
}

impl From<LogQuery> for LogFilter {
    fn from(query: LogQuery) -> Self {
        Self {
            from: query.from,
            to: query.to,
            // Zero means no limit. Anything past MAX_LIMIT can't cap a real
            // log so it means no limit too
            limit: query.limit.filter(|limit| (1..=MAX_LIMIT).contains(limit)),
        }
    }
}
