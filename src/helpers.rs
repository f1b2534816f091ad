//! A few common helpers for annotating fields

/// Serialize a `chrono::DateTime` field as a timestamp
///
/// Without this, a `DateTime` is just a string to serde and the `unix`,
/// `unixmilli`, `unixnano` and `time_format` options have no effect.
/// Fields of type [`Timestamp`](crate::Timestamp) need no helper.
///
/// ## Example
///
/// ```
/// use chrono::{DateTime, TimeZone, Utc};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Query {
///     #[serde(rename = "since,unix")]
///     #[serde(serialize_with = "query_values::helpers::timestamp::serialize")]
///     since: DateTime<Utc>,
///     #[serde(rename = "until,omitempty,time_format:%Y-%m-%d")]
///     #[serde(serialize_with = "query_values::helpers::timestamp::option::serialize")]
///     until: Option<DateTime<Utc>>,
/// }
///
/// # fn main(){
/// let query = Query {
///     since: Utc.with_ymd_and_hms(2011, 11, 11, 11, 11, 11).unwrap(),
///     until: Some(Utc.with_ymd_and_hms(2012, 1, 2, 0, 0, 0).unwrap()),
/// };
/// assert_eq!(
///     query_values::to_string(&query).unwrap(),
///     "since=1321009871&until=2012-01-02"
/// );
/// # }
/// ```
pub mod timestamp {
    use chrono::{DateTime, TimeZone};
    use serde::{Serialize, Serializer};

    use crate::time::Timestamp;

    pub fn serialize<S, Tz>(datetime: &DateTime<Tz>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        Tz: TimeZone,
    {
        Timestamp::new(datetime.clone()).serialize(serializer)
    }

    /// The same for `Option<DateTime>`: `None` is serialized as a unit and
    /// so produces no value.
    pub mod option {
        use chrono::{DateTime, TimeZone};
        use serde::{Serialize, Serializer};

        use crate::time::Timestamp;

        pub fn serialize<S, Tz>(
            datetime: &Option<DateTime<Tz>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
            Tz: TimeZone,
        {
            datetime
                .as_ref()
                .map(|datetime| Timestamp::new(datetime.clone()))
                .serialize(serializer)
        }
    }
}
