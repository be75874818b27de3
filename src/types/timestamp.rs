use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::OffsetDateTime;

/// A platform-assigned message timestamp.
///
/// The platform encodes timestamps as `"<seconds>.<6-digit-micros>"`
/// strings that are unique per channel and sort lexicographically in
/// chronological order. Internally this is a microsecond count so that
/// ordering and equality are cheap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    /// Microseconds since the Unix epoch.
    pub microseconds: i64,
}

impl Timestamp {
    /// Creates a timestamp from a raw microsecond count.
    pub fn from_microseconds(microseconds: i64) -> Self {
        Timestamp { microseconds }
    }

    /// Parses the canonical `"<seconds>.<micros>"` wire form.
    ///
    /// Returns `None` for anything that is not a dotted decimal pair;
    /// callers treat that as a malformed event, not a panic.
    pub fn parse(value: &str) -> Option<Self> {
        let (seconds, micros) = value.split_once('.')?;
        let seconds = seconds.parse::<i64>().ok()?;
        let micros = micros.parse::<i64>().ok()?;
        if micros < 0 || micros >= 1_000_000 {
            return None;
        }
        let microseconds = seconds.checked_mul(1_000_000)?.checked_add(micros)?;
        Some(Timestamp { microseconds })
    }

    /// Converts to a wall-clock datetime for display.
    pub fn to_datetime(self) -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp_nanos(i128::from(self.microseconds) * 1_000)
            .unwrap_or(OffsetDateTime::UNIX_EPOCH)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:06}",
            self.microseconds / 1_000_000,
            self.microseconds % 1_000_000
        )
    }
}

struct TimestampVisitor;

impl Visitor<'_> for TimestampVisitor {
    type Value = Timestamp;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a timestamp as a \"seconds.micros\" string or integer seconds")
    }

    fn visit_str<E>(self, value: &str) -> Result<Timestamp, E>
    where
        E: de::Error,
    {
        Timestamp::parse(value)
            .ok_or_else(|| E::custom(format!("cannot parse {value:?} as a timestamp")))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Timestamp, E>
    where
        E: de::Error,
    {
        i64::try_from(value)
            .ok()
            .and_then(|seconds| seconds.checked_mul(1_000_000))
            .map(Timestamp::from_microseconds)
            .ok_or_else(|| E::custom(format!("timestamp {value} is out of range")))
    }

    fn visit_i64<E>(self, value: i64) -> Result<Timestamp, E>
    where
        E: de::Error,
    {
        value
            .checked_mul(1_000_000)
            .map(Timestamp::from_microseconds)
            .ok_or_else(|| E::custom(format!("timestamp {value} is out of range")))
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Timestamp, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(TimestampVisitor)
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_wire_form() {
        let ts = Timestamp::parse("1483037603.000503").unwrap();
        assert_eq!(ts.microseconds, 1_483_037_603_000_503);
        assert_eq!(ts.to_string(), "1483037603.000503");
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(Timestamp::parse("not a timestamp").is_none());
        assert!(Timestamp::parse("1483037603").is_none());
        assert!(Timestamp::parse("148.9999999").is_none());
    }

    #[test]
    fn parse_rejects_out_of_range_seconds() {
        assert!(Timestamp::parse("10000000000000.000000").is_none());
        assert!(Timestamp::parse("-10000000000000.000000").is_none());
    }

    #[test]
    fn deserialize_rejects_out_of_range_integers() {
        assert!(serde_json::from_str::<Timestamp>("10000000000000").is_err());
        assert!(serde_json::from_str::<Timestamp>("-10000000000000").is_err());
        assert!(serde_json::from_str::<Timestamp>("18446744073709551615").is_err());
    }

    #[test]
    fn ordering_matches_wall_clock() {
        let earlier = Timestamp::parse("100.000001").unwrap();
        let later = Timestamp::parse("100.000002").unwrap();
        assert!(earlier < later);
    }

    #[test]
    fn deserialize_string_and_integer() {
        let from_str: Timestamp = serde_json::from_str("\"42.000007\"").unwrap();
        assert_eq!(from_str.microseconds, 42_000_007);

        let from_int: Timestamp = serde_json::from_str("42").unwrap();
        assert_eq!(from_int.microseconds, 42_000_000);
    }

    #[test]
    fn serialize_canonical_form() {
        let ts = Timestamp::from_microseconds(42_000_007);
        assert_eq!(serde_json::to_string(&ts).unwrap(), "\"42.000007\"");
    }
}
