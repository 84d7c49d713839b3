//! Calendar day keys, the partition keys of a task board

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

/// The canonical text form of a day key
const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

/// A calendar day in canonical `YYYY-MM-DD` form.
///
/// Every task belongs to exactly one `DayKey` partition at any given time.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DayKey {
    content: NaiveDate,
}

impl DayKey {
    pub fn as_date(&self) -> NaiveDate {
        self.content
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        Self { content: date }
    }
}

impl FromStr for DayKey {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // chrono accepts non-padded fields, but only the zero-padded form is canonical
        if s.len() != 10 {
            return Err(Error::InvalidDayKey(s.to_string()));
        }
        match NaiveDate::parse_from_str(s, DAY_KEY_FORMAT) {
            Err(_) => Err(Error::InvalidDayKey(s.to_string())),
            Ok(date) => Ok(Self { content: date }),
        }
    }
}

impl Display for DayKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.content.format(DAY_KEY_FORMAT))
    }
}

/// Used to support serde
impl Serialize for DayKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
/// Used to support serde
impl<'de> Deserialize<'de> for DayKey {
    fn deserialize<D>(deserializer: D) -> Result<DayKey, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DayKey::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// An inclusive range of day keys, e.g. the days one calendar screen displays
#[derive(Clone, Debug, PartialEq)]
pub struct DayRange {
    start: DayKey,
    end: DayKey,
}

impl DayRange {
    pub fn new(start: DayKey, end: DayKey) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> &DayKey {
        &self.start
    }
    pub fn end(&self) -> &DayKey {
        &self.end
    }

    pub fn contains(&self, day: &DayKey) -> bool {
        &self.start <= day && day <= &self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_canonical_day_keys() {
        let day: DayKey = "2024-06-01".parse().unwrap();
        assert_eq!(day.to_string(), "2024-06-01");

        assert!("".parse::<DayKey>().is_err());
        assert!("not-a-day".parse::<DayKey>().is_err());
        assert!("2024-13-01".parse::<DayKey>().is_err());
        assert!("2024-06-31".parse::<DayKey>().is_err());
        // non-padded forms are not canonical
        assert!("2024-6-1".parse::<DayKey>().is_err());
        assert!("01-06-2024".parse::<DayKey>().is_err());
    }

    #[test]
    fn day_keys_order_chronologically() {
        let first: DayKey = "2024-05-31".parse().unwrap();
        let second: DayKey = "2024-06-01".parse().unwrap();
        assert!(first < second);
    }

    #[test]
    fn range_membership() {
        let range = DayRange::new("2024-06-01".parse().unwrap(), "2024-06-30".parse().unwrap());
        assert!(range.contains(&"2024-06-01".parse().unwrap()));
        assert!(range.contains(&"2024-06-15".parse().unwrap()));
        assert!(range.contains(&"2024-06-30".parse().unwrap()));
        assert!(range.contains(&"2024-05-31".parse().unwrap()) == false);
        assert!(range.contains(&"2024-07-01".parse().unwrap()) == false);
    }

    #[test]
    fn serde_round_trip() {
        let day: DayKey = "2024-06-01".parse().unwrap();
        let json = serde_json::to_string(&day).unwrap();
        assert_eq!(json, "\"2024-06-01\"");
        let back: DayKey = serde_json::from_str(&json).unwrap();
        assert_eq!(day, back);
    }
}
