use std::fmt;
use std::str::FromStr;

use serde::{de, ser, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

use crate::errors::{CodecError, TimestampError};

/// `<year>-<month>-<day>T<hour>:<minute>Z`
const COMPACT: &[FormatItem<'_>] = format_description!(
    "[year]-[month padding:none]-[day padding:none]T[hour padding:none]:[minute padding:none]Z"
);

/// `<year>-<month>-<day>T<hour>:<minute>:<second>.<fraction>Z`; fraction
/// digits past nanoseconds are dropped.
const FULL: &[FormatItem<'_>] = format_description!(
    "[year]-[month padding:none]-[day padding:none]T[hour padding:none]:[minute padding:none]:[second padding:none].[subsecond digits:1+]Z"
);

const MINUTE: &[FormatItem<'_>] = format_description!("[year]-[month]-[day]T[hour]:[minute]Z");

/// An instant as the service reports it, always in UTC.
///
/// The service writes air dates at minute precision
/// (`2016-11-06T23:00Z`) but some responses carry full RFC 3339 text with
/// seconds and a fraction (`2016-11-06T23:00:00.000Z`). Both parse; output
/// is always the minute form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(OffsetDateTime);

impl Timestamp {
    pub fn new(instant: OffsetDateTime) -> Self {
        Timestamp(instant.to_offset(UtcOffset::UTC))
    }

    pub fn instant(&self) -> OffsetDateTime {
        self.0
    }

    /// The same instant with seconds and fraction zeroed, i.e. the value
    /// that survives an encode.
    pub fn to_minute(&self) -> Self {
        Timestamp(self.0.replace_time(
            Time::from_hms(self.0.hour(), self.0.minute(), 0).unwrap_or(Time::MIDNIGHT),
        ))
    }

    /// Parses a JSON string literal, quotes included.
    pub fn decode(json: &str) -> Result<Self, CodecError> {
        let tree: Value = serde_json::from_str(json).map_err(CodecError::from_json)?;
        let text: String = serde_json::from_value(tree).map_err(CodecError::from_json)?;

        Ok(text.parse()?)
    }

    /// Renders the minute-precision form as a JSON string literal.
    pub fn encode(&self) -> String {
        format!("\"{}\"", self)
    }

    fn format(&self) -> Result<String, time::error::Format> {
        self.0.format(&MINUTE)
    }
}

impl From<OffsetDateTime> for Timestamp {
    fn from(instant: OffsetDateTime) -> Self {
        Timestamp::new(instant)
    }
}

impl From<Timestamp> for OffsetDateTime {
    fn from(timestamp: Timestamp) -> Self {
        timestamp.0
    }
}

impl FromStr for Timestamp {
    type Err = TimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PrimitiveDateTime::parse(s, &COMPACT)
            .or_else(|_| PrimitiveDateTime::parse(s, &FULL))
            .map(|instant| Timestamp(instant.assume_utc()))
            .map_err(|_| TimestampError { text: s.to_owned() })
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format().map_err(|_| fmt::Error)?)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.format().map_err(ser::Error::custom)?)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text: String = Deserialize::deserialize(deserializer)?;

        text.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::Timestamp;
    use crate::errors::CodecError;

    #[test]
    fn both_formats_encode_to_minutes() {
        let compact = Timestamp::decode("\"2016-11-06T23:00Z\"").expect("decode compact form");
        let full = Timestamp::decode("\"2016-11-06T23:00:00.000Z\"").expect("decode full form");

        assert_eq!(compact.encode(), "\"2016-11-06T23:00Z\"");
        assert_eq!(full.encode(), "\"2016-11-06T23:00Z\"");
        assert_eq!(compact, full);
    }

    #[test]
    fn seconds_are_dropped_on_encode() {
        let full = Timestamp::decode("\"2016-11-06T23:07:45.125Z\"").expect("decode full form");

        assert_eq!(full.instant().second(), 45);
        assert_eq!(full.instant().millisecond(), 125);
        assert_eq!(full.to_string(), "2016-11-06T23:07Z");
        assert_eq!(full.to_minute(), "2016-11-06T23:07Z".parse::<Timestamp>().unwrap());
    }

    #[test]
    fn unpadded_fields_are_accepted() {
        // Strict RFC 3339 wants two digits everywhere; the service doesn't
        // always pad, so these parse and come back padded.
        for &(text, expected) in &[
            ("2017-3-05T7:30Z", "2017-03-05T07:30Z"),
            ("2017-3-5T7:3Z", "2017-03-05T07:03Z"),
            ("2017-03-5T07:30:9.5Z", "2017-03-05T07:30Z"),
        ] {
            let parsed: Timestamp = text.parse().expect("parse unpadded form");

            assert_eq!(parsed.to_string(), expected, "{:?}", text);
        }
    }

    #[test]
    fn other_text_is_rejected() {
        match Timestamp::decode("\"2016/11/06\"") {
            Err(CodecError::MalformedTimestamp(text)) => assert_eq!(text, "2016/11/06"),
            other => panic!("expected malformed timestamp, got {:?}", other),
        }

        for text in &[
            "",
            "2016-11-06",
            "2016-11-06T23:00",
            "2016-11-06T23:00:00Z",
            "2016-11-06T23:00:00.Z",
            "2016-13-06T23:00Z",
            "2016-00-06T23:00Z",
            "2016-11-06T24:00Z",
            "2016-11-06T23:60Z",
            "2016-02-30T23:00Z",
            "2016-11-06T23:00Z ",
            " 2016-11-06T23:00Z",
            "2016-011-06T23:00Z",
            "16-11-06T23:00Z",
            "2016-11-06T23:00:00.000+01:00",
        ] {
            assert!(text.parse::<Timestamp>().is_err(), "{:?} must be rejected", text);
        }
    }

    #[test]
    fn non_json_input_is_a_syntax_error() {
        assert!(matches!(
            Timestamp::decode("2016-11-06T23:00Z"),
            Err(CodecError::Syntax { .. })
        ));
        assert!(matches!(Timestamp::decode("{"), Err(CodecError::Syntax { .. })));
        assert!(matches!(Timestamp::decode("42"), Err(CodecError::Shape { .. })));
        assert!(matches!(
            Timestamp::decode("\"2016-11-06\""),
            Err(CodecError::MalformedTimestamp(_))
        ));
    }

    proptest! {
        #[test]
        fn full_form_matches_compact_form(
            year in 1000i32..10000,
            month in 1u8..=12,
            day in 1u8..=28,
            hour in 0u8..24,
            minute in 0u8..60,
            second in 0u8..60,
            fraction in "[0-9]{1,12}",
        ) {
            let compact = format!("{:04}-{:02}-{:02}T{:02}:{:02}Z", year, month, day, hour, minute);
            let full = format!("{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{}Z", year, month, day, hour, minute, second, fraction);

            let compact_parsed: Timestamp = compact.parse().unwrap();
            let full_parsed: Timestamp = full.parse().unwrap();

            prop_assert_eq!(full_parsed.to_string(), compact.clone());
            prop_assert_eq!(compact_parsed.to_string(), compact);
            prop_assert_eq!(full_parsed.to_minute(), compact_parsed);
        }
    }
}
