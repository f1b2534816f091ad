use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Offset, ParseError, SecondsFormat, TimeZone, Utc};
use serde::ser::{self, Serialize};

/// Newtype-struct name used to recognise a [`Timestamp`] while serializing.
pub(crate) const TOKEN: &str = "$__query_values_private_timestamp";

/// A point in time that the encoder formats according to the field's
/// `unix`/`unixmilli`/`unixnano`/`time_format` options.
///
/// Plain `chrono::DateTime` fields serialize as strings and are encoded
/// verbatim; wrap them in a `Timestamp` (or use
/// [`helpers::timestamp`](crate::helpers::timestamp)) to opt into timestamp
/// handling.
///
/// The default value is the zero instant, `0001-01-01T00:00:00Z`, which is
/// considered empty by `omitempty` and encodes as the empty string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<FixedOffset>);

impl Timestamp {
    /// Seconds between the zero instant and the Unix epoch.
    pub const ZERO_SECS: i64 = -62_135_596_800;

    pub fn new<Tz: TimeZone>(datetime: DateTime<Tz>) -> Self {
        let offset = datetime.offset().fix();
        Self(datetime.with_timezone(&offset))
    }

    pub fn zero() -> Self {
        // `ZERO_SECS` is well within chrono's supported range
        let zero = DateTime::<Utc>::from_timestamp(Self::ZERO_SECS, 0).unwrap_or_default();
        Self::new(zero)
    }

    pub fn is_zero(&self) -> bool {
        self.0.timestamp() == Self::ZERO_SECS && self.0.timestamp_subsec_nanos() == 0
    }

    pub fn as_datetime(&self) -> &DateTime<FixedOffset> {
        &self.0
    }

    pub fn into_datetime(self) -> DateTime<FixedOffset> {
        self.0
    }

    /// Whole seconds since the Unix epoch.
    pub fn unix(&self) -> i64 {
        self.0.timestamp()
    }

    pub fn unix_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Nanoseconds since the Unix epoch. Computed in 128 bits, an `i64`
    /// only covers the years 1677 to 2262.
    pub fn unix_nanos(&self) -> i128 {
        i128::from(self.0.timestamp()) * 1_000_000_000
            + i128::from(self.0.timestamp_subsec_nanos())
    }

    /// RFC 3339 with whole seconds, `Z` for UTC.
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// Rebuilds a timestamp from the parts written by its `Serialize` impl
    /// for non human-readable formats.
    pub(crate) fn from_parts(secs: i64, nanos: u32, offset: i32) -> Option<Self> {
        let offset = FixedOffset::east_opt(offset)?;
        let utc = DateTime::<Utc>::from_timestamp(secs, nanos)?;
        Some(Self(utc.with_timezone(&offset)))
    }

    fn to_parts(self) -> (i64, u32, i32) {
        (
            self.0.timestamp(),
            self.0.timestamp_subsec_nanos(),
            self.0.offset().local_minus_utc(),
        )
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::zero()
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Timestamp {
    fn from(datetime: DateTime<Tz>) -> Self {
        Self::new(datetime)
    }
}

impl From<Timestamp> for DateTime<FixedOffset> {
    fn from(timestamp: Timestamp) -> Self {
        timestamp.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

/// Parses RFC 3339 text, keeping the offset.
impl FromStr for Timestamp {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateTime::parse_from_rfc3339(s).map(Self)
    }
}

impl ser::Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_newtype_struct(TOKEN, &Repr(*self))
    }
}

/// Content of the marker newtype: full precision RFC 3339 text for human
/// readable formats, `(secs, nanos, offset)` otherwise. The encoder reads
/// the content through a non human-readable serializer, so years outside
/// `0000..=9999` survive.
struct Repr(Timestamp);

impl ser::Serialize for Repr {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        if serializer.is_human_readable() {
            let text = self.0.0.to_rfc3339_opts(SecondsFormat::AutoSi, true);
            serializer.serialize_str(&text)
        } else {
            self.0.to_parts().serialize(serializer)
        }
    }
}
