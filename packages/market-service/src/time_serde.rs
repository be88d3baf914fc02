//! Catalog timestamps on the wire: RFC 3339, always rendered in UTC.

use serde::{Deserialize, Deserializer, Serializer, de, ser};
use time::{OffsetDateTime, UtcOffset, format_description::well_known::Rfc3339};

pub fn serialize<S>(value: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	let utc = value.to_offset(UtcOffset::UTC);

	serializer.serialize_str(&utc.format(&Rfc3339).map_err(ser::Error::custom)?)
}

/// Accepts any offset and normalizes it to UTC.
pub fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
where
	D: Deserializer<'de>,
{
	let raw = String::deserialize(deserializer)?;
	let parsed = OffsetDateTime::parse(&raw, &Rfc3339).map_err(de::Error::custom)?;

	Ok(parsed.to_offset(UtcOffset::UTC))
}
