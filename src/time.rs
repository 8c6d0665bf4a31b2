use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

pub const MINUTES_PER_DAY: u16 = 24 * 60;

static HH_MM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{2}):(\d{2})$").expect("regex compiles"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeError {
    #[error("Time must be in HH:MM format, got '{0}'")]
    Format(String),
    #[error("Time is outside of a single day: {0}")]
    OutOfRange(String),
}

/// Parses a zero-padded `HH:MM` wall-clock string into minutes since midnight.
pub fn time_to_minutes(value: &str) -> Result<u16, TimeError> {
    let caps = HH_MM
        .captures(value)
        .ok_or_else(|| TimeError::Format(value.to_string()))?;
    let hours: u16 = caps[1]
        .parse()
        .map_err(|_| TimeError::Format(value.to_string()))?;
    let minutes: u16 = caps[2]
        .parse()
        .map_err(|_| TimeError::Format(value.to_string()))?;
    if hours > 23 || minutes > 59 {
        return Err(TimeError::OutOfRange(value.to_string()));
    }
    Ok(hours * 60 + minutes)
}

/// Formats minutes since midnight as `HH:MM`. Values past 23:59 are rejected.
pub fn minutes_to_time(minutes: u16) -> Result<String, TimeError> {
    if minutes >= MINUTES_PER_DAY {
        return Err(TimeError::OutOfRange(minutes.to_string()));
    }
    Ok(format!("{:02}:{:02}", minutes / 60, minutes % 60))
}

/// Wall-clock time within a day, ordered by minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub(crate) const fn hm(hours: u16, minutes: u16) -> Self {
        Self(hours * 60 + minutes)
    }

    pub fn from_minutes(minutes: u16) -> Result<Self, TimeError> {
        if minutes >= MINUTES_PER_DAY {
            return Err(TimeError::OutOfRange(minutes.to_string()));
        }
        Ok(Self(minutes))
    }

    pub fn minutes(self) -> u16 {
        self.0
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        time_to_minutes(s).map(Self)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Day of the week, numbered 1 (Monday) through 7 (Sunday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Weekday {
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
    Sunday = 7,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.get(usize::from(n).checked_sub(1)?).copied()
    }

    pub fn number(self) -> u8 {
        self as u8
    }

    /// The following day; Sunday wraps to Monday.
    pub fn next(self) -> Self {
        Self::ALL[usize::from(self.number() % 7)]
    }

    pub fn days_from_monday(self) -> u32 {
        u32::from(self.number() - 1)
    }
}

impl TryFrom<u8> for Weekday {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Weekday::from_number(value).ok_or_else(|| format!("day_of_week must be 1-7, got {value}"))
    }
}

impl From<Weekday> for u8 {
    fn from(value: Weekday) -> Self {
        value.number()
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(value: chrono::Weekday) -> Self {
        Self::ALL[value.num_days_from_monday() as usize]
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_time_to_minutes() {
        assert_eq!(time_to_minutes("00:00"), Ok(0));
        assert_eq!(time_to_minutes("09:30"), Ok(570));
        assert_eq!(time_to_minutes("23:59"), Ok(1439));
    }

    #[test]
    fn test_time_to_minutes_rejects_malformed() {
        for bad in ["9:30", "09:3", "0930", "09:30:00", "ab:cd", "", " 09:30"] {
            assert!(
                matches!(time_to_minutes(bad), Err(TimeError::Format(_))),
                "{bad} should be rejected"
            );
        }
        assert!(matches!(
            time_to_minutes("24:00"),
            Err(TimeError::OutOfRange(_))
        ));
        assert!(matches!(
            time_to_minutes("12:60"),
            Err(TimeError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_minutes_to_time() {
        assert_eq!(minutes_to_time(0).unwrap(), "00:00");
        assert_eq!(minutes_to_time(545).unwrap(), "09:05");
        assert_eq!(minutes_to_time(1439).unwrap(), "23:59");
        assert!(minutes_to_time(1440).is_err());
    }

    #[test]
    fn test_time_of_day_orders_numerically() {
        let early: TimeOfDay = "08:55".parse().unwrap();
        let late: TimeOfDay = "10:10".parse().unwrap();
        assert!(early < late);
        assert_eq!(late.to_string(), "10:10");
        assert_eq!(TimeOfDay::hm(10, 10), late);
    }

    #[test]
    fn test_time_of_day_serde() {
        let time: TimeOfDay = serde_json::from_str(r#""07:45""#).unwrap();
        assert_eq!(time.minutes(), 465);
        assert_eq!(serde_json::to_string(&time).unwrap(), r#""07:45""#);
        assert!(serde_json::from_str::<TimeOfDay>(r#""7:45""#).is_err());
    }

    #[test]
    fn test_weekday_next_wraps() {
        assert_eq!(Weekday::Monday.next(), Weekday::Tuesday);
        assert_eq!(Weekday::Saturday.next(), Weekday::Sunday);
        assert_eq!(Weekday::Sunday.next(), Weekday::Monday);
    }

    #[test]
    fn test_weekday_numbers() {
        assert_eq!(Weekday::from_number(1), Some(Weekday::Monday));
        assert_eq!(Weekday::from_number(7), Some(Weekday::Sunday));
        assert_eq!(Weekday::from_number(0), None);
        assert_eq!(Weekday::from_number(8), None);
        assert_eq!(Weekday::from(chrono::Weekday::Sun), Weekday::Sunday);
        assert_eq!(serde_json::to_string(&Weekday::Friday).unwrap(), "5");
        assert!(serde_json::from_str::<Weekday>("9").is_err());
    }

    proptest! {
        #[test]
        fn prop_hh_mm_round_trip(hours in 0u16..24, minutes in 0u16..60) {
            let text = format!("{hours:02}:{minutes:02}");
            let parsed = time_to_minutes(&text).unwrap();
            prop_assert_eq!(minutes_to_time(parsed).unwrap(), text);
        }
    }
}
