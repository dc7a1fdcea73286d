//! Canonical `YYYY-MM-DD` keys for local calendar days.
//!
//! Every path that writes or looks up an entry goes through [`DateKey`], so the
//! key a save produces is always the key a lookup asks for.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, TimeZone};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::MoodError;

const KEY_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// Encodes the calendar day of `dt` in its own time zone.
    ///
    /// Pass a `DateTime<Local>` to get local-day semantics; the time of day is
    /// ignored.
    pub fn from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> Self {
        DateKey(dt.date_naive())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        DateKey(date)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(KEY_FORMAT))
    }
}

impl FromStr for DateKey {
    type Err = MoodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date = NaiveDate::parse_from_str(s, KEY_FORMAT)
            .map_err(|_| MoodError::InvalidDateKey(s.to_string()))?;
        let key = DateKey(date);
        // chrono accepts "2024-3-5"; only the zero-padded form is canonical.
        if key.to_string() != s {
            return Err(MoodError::InvalidDateKey(s.to_string()));
        }
        Ok(key)
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Local, TimeZone, Utc};

    #[test]
    fn test_encode_is_zero_padded() {
        let key = DateKey::from(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(key.to_string(), "2024-03-05");
    }

    #[test]
    fn test_same_day_encodes_equal_regardless_of_time() {
        let tz = FixedOffset::east_opt(9 * 3600).unwrap();
        let morning = tz.with_ymd_and_hms(2024, 3, 15, 0, 0, 1).unwrap();
        let night = tz.with_ymd_and_hms(2024, 3, 15, 23, 59, 59).unwrap();
        assert_eq!(DateKey::from_datetime(&morning), DateKey::from_datetime(&night));
        assert_eq!(DateKey::from_datetime(&night).to_string(), "2024-03-15");
    }

    #[test]
    fn test_encode_uses_local_day_not_utc() {
        // 23:30 at UTC-5 is already the next day in UTC.
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        let late = tz.with_ymd_and_hms(2024, 3, 15, 23, 30, 0).unwrap();
        assert_eq!(DateKey::from_datetime(&late).to_string(), "2024-03-15");
        assert_eq!(
            DateKey::from_datetime(&late.with_timezone(&Utc)).to_string(),
            "2024-03-16"
        );
    }

    #[test]
    fn test_local_datetime_matches_naive_local_day() {
        let now = Local::now();
        assert_eq!(DateKey::from_datetime(&now), DateKey::from(now.date_naive()));
    }

    #[test]
    fn test_parse_rejects_non_canonical() {
        assert!("2024-03-15".parse::<DateKey>().is_ok());
        assert!("2024-3-15".parse::<DateKey>().is_err());
        assert!("2024-02-30".parse::<DateKey>().is_err());
        assert!("15/03/2024".parse::<DateKey>().is_err());
        assert!("".parse::<DateKey>().is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let key: DateKey = "2024-12-31".parse().unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"2024-12-31\"");
        let back: DateKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
        assert!(serde_json::from_str::<DateKey>("\"yesterday\"").is_err());
    }
}
