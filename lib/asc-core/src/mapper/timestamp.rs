use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// `YYYY-MM-DDTHH:MM:SSZ`, always UTC
pub const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]Z");

/// `2025-03-01T12:30:15.000+0000` as emitted by App Store Connect, fraction optional
const REMOTE_TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]][offset_hour sign:mandatory][offset_minute]"
);

pub fn format_timestamp(value: OffsetDateTime) -> Result<String, time::error::Format> {
    value.to_offset(UtcOffset::UTC).format(TIMESTAMP_FORMAT)
}

pub fn parse_timestamp(value: &str) -> Result<OffsetDateTime, time::error::Parse> {
    Ok(PrimitiveDateTime::parse(value, TIMESTAMP_FORMAT)?.assume_utc())
}

/// Accepts RFC 3339 as well as the offset-without-colon variant used by the API
pub fn parse_remote_timestamp(value: &str) -> Result<OffsetDateTime, time::error::Parse> {
    OffsetDateTime::parse(value, &Rfc3339)
        .or_else(|_| OffsetDateTime::parse(value, REMOTE_TIMESTAMP_FORMAT))
        .map(normalize_timestamp)
}

/// Drops sub-second precision and normalizes to UTC so the value survives a round trip through [`TIMESTAMP_FORMAT`]
pub fn normalize_timestamp(value: OffsetDateTime) -> OffsetDateTime {
    let value = value.to_offset(UtcOffset::UTC);
    value.replace_nanosecond(0).unwrap_or(value)
}

pub mod option {
    use serde::de::Error as _;
    use serde::ser::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use time::OffsetDateTime;

    pub fn serialize<S: Serializer>(
        value: &Option<OffsetDateTime>,
        s: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => {
                let formatted = super::format_timestamp(*value).map_err(S::Error::custom)?;
                s.serialize_some(&formatted)
            }
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Option<OffsetDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(d)?
            .map(|value| super::parse_timestamp(&value).map_err(D::Error::custom))
            .transpose()
    }
}

pub mod remote_option {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};
    use time::OffsetDateTime;

    pub fn deserialize<'de, D>(d: D) -> Result<Option<OffsetDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(d)?
            .filter(|value| !value.is_empty())
            .map(|value| super::parse_remote_timestamp(&value).map_err(D::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod test {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn test_format_timestamp_converts_to_utc() {
        let value = datetime!(2025-03-01 14:30:15.250 +02:00);

        assert_eq!(format_timestamp(value).unwrap(), "2025-03-01T12:30:15Z");
    }

    #[test]
    fn test_parse_timestamp() {
        assert_eq!(
            parse_timestamp("2025-03-01T12:30:15Z").unwrap(),
            datetime!(2025-03-01 12:30:15 UTC)
        );
        assert!(parse_timestamp("").is_err());
        assert!(parse_timestamp("2025-03-01").is_err());
    }

    #[test]
    fn test_parse_remote_timestamp() {
        let expected = datetime!(2025-03-01 12:30:15 UTC);

        assert_eq!(parse_remote_timestamp("2025-03-01T12:30:15Z").unwrap(), expected);
        assert_eq!(
            parse_remote_timestamp("2025-03-01T12:30:15.000+0000").unwrap(),
            expected
        );
        assert_eq!(
            parse_remote_timestamp("2025-03-01T12:30:15+0000").unwrap(),
            expected
        );
        assert_eq!(
            parse_remote_timestamp("2025-03-01T14:30:15-0200").unwrap(),
            datetime!(2025-03-01 16:30:15 UTC)
        );
        assert_eq!(
            parse_remote_timestamp("2025-03-01T14:30:15.000+02:00").unwrap(),
            expected
        );
        assert!(parse_remote_timestamp("yesterday").is_err());
    }

    #[test]
    fn test_normalize_timestamp() {
        assert_eq!(
            normalize_timestamp(datetime!(2025-03-01 14:30:15.999 +02:00)),
            datetime!(2025-03-01 12:30:15 UTC)
        );
    }
}
