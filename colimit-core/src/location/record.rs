//! Flat serialized form of a location
//!
//! Besides the canonical field names the short aliases `lat`, `lon`, `spd`
//! and `dir` are accepted on input. When both are given the canonical field
//! wins. Aliases are never written.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use super::{Location, LocationBuilder};
use crate::{NodeId, Speed};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Speed in m/s
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<Speed>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "duration")]
    pub timedelta: Option<TimeDelta>,

    #[serde(default, skip_serializing)]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing)]
    pub lon: Option<f64>,
    #[serde(default, skip_serializing)]
    pub spd: Option<Speed>,
    #[serde(default, skip_serializing)]
    pub dir: Option<f64>,
}

impl LocationRecord {
    /// Record holding only the coordinate
    pub fn coordinate(location: &Location) -> Self {
        Self {
            latitude: Some(location.latitude),
            longitude: Some(location.longitude),
            ..Self::default()
        }
    }

    /// Resolves aliases into a builder, canonical fields take precedence
    pub fn into_builder(self) -> LocationBuilder {
        LocationBuilder {
            id: self.id,
            latitude: self.latitude.or(self.lat),
            longitude: self.longitude.or(self.lon),
            speed: self.speed.or(self.spd),
            direction: self.direction.or(self.dir),
            time: self.time,
            timedelta: self.timedelta,
            model: None,
        }
    }
}

impl From<Location> for LocationRecord {
    fn from(location: Location) -> Self {
        Self::from(&location)
    }
}

impl From<&Location> for LocationRecord {
    fn from(location: &Location) -> Self {
        Self {
            id: Some(location.id),
            latitude: Some(location.latitude),
            longitude: Some(location.longitude),
            speed: Some(location.speed),
            direction: Some(location.direction),
            time: Some(location.time),
            timedelta: Some(location.timedelta),
            ..Self::default()
        }
    }
}

impl From<LocationRecord> for Location {
    fn from(record: LocationRecord) -> Self {
        record.into_builder().build()
    }
}

/// Durations as ISO 8601 strings (`PT1.234S`), exact to the nanosecond.
///
/// On input a bare number of seconds and clock strings (`0:00:01.234000`)
/// are accepted as well.
mod duration {
    use chrono::TimeDelta;
    use serde::{Deserialize, Deserializer, Serializer, de};

    use crate::location::seconds_to_timedelta;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawDuration {
        Seconds(f64),
        Text(String),
    }

    pub(super) fn to_iso(timedelta: TimeDelta) -> String {
        let sign = if timedelta < TimeDelta::zero() { "-" } else { "" };
        let magnitude = timedelta.abs();
        let (secs, nanos) = (magnitude.num_seconds(), magnitude.subsec_nanos());
        if nanos == 0 {
            format!("{sign}PT{secs}S")
        } else {
            let fraction = format!("{nanos:09}");
            format!("{sign}PT{secs}.{}S", fraction.trim_end_matches('0'))
        }
    }

    /// Decimal seconds such as `12` or `1.000001500`, digits past the
    /// nanosecond are dropped
    fn parse_seconds(text: &str) -> Option<TimeDelta> {
        let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));
        if whole.is_empty() && fraction.is_empty() {
            return None;
        }
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(whole) || !all_digits(fraction) {
            return None;
        }
        let secs = if whole.is_empty() { 0 } else { whole.parse().ok()? };
        let nanos = fraction
            .bytes()
            .chain(std::iter::repeat(b'0'))
            .take(9)
            .fold(0_u32, |nanos, digit| nanos * 10 + u32::from(digit - b'0'));
        TimeDelta::new(secs, nanos)
    }

    pub(super) fn from_text(text: &str) -> Option<TimeDelta> {
        let text = text.trim();
        let (negative, body) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let magnitude = if let Some(iso) = body.strip_prefix("PT") {
            let secs = iso.strip_suffix('S')?;
            match parse_seconds(secs) {
                Some(timedelta) => timedelta,
                None => {
                    let secs = secs.parse::<f64>().ok().filter(|s| s.is_finite() && *s >= 0.0)?;
                    seconds_to_timedelta(secs)
                }
            }
        } else {
            let mut parts = body.split(':');
            let hours = TimeDelta::try_hours(parts.next()?.parse().ok()?)?;
            let minutes = TimeDelta::try_minutes(parts.next()?.parse().ok()?)?;
            let secs = parse_seconds(parts.next()?)?;
            if parts.next().is_some() {
                return None;
            }
            hours.checked_add(&minutes)?.checked_add(&secs)?
        };
        Some(if negative { -magnitude } else { magnitude })
    }

    pub(super) fn serialize<S>(value: &Option<TimeDelta>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(timedelta) => serializer.serialize_str(&to_iso(*timedelta)),
            None => serializer.serialize_none(),
        }
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Option<TimeDelta>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<RawDuration>::deserialize(deserializer)? {
            None => Ok(None),
            Some(RawDuration::Seconds(secs)) if secs.is_finite() => {
                Ok(Some(seconds_to_timedelta(secs)))
            }
            Some(RawDuration::Seconds(secs)) => {
                Err(de::Error::custom(format!("invalid duration {secs}")))
            }
            Some(RawDuration::Text(text)) => from_text(&text)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("invalid duration {text:?}"))),
        }
    }
}
