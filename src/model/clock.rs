// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

pub const MINUTES_PER_HOUR: u16 = 60;
pub const HOURS_PER_DAY: u8 = 24;

/// A naive wall-clock time of day with minute resolution.
///
/// Lessons keep their times as raw text; `ClockTime` is the parsed view used for grid math and
/// for validation when a lesson is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    pub fn new(hour: u8, minute: u8) -> Result<Self, ClockTimeError> {
        if hour >= HOURS_PER_DAY {
            return Err(ClockTimeError::HourOutOfRange { hour: u16::from(hour) });
        }
        if u16::from(minute) >= MINUTES_PER_HOUR {
            return Err(ClockTimeError::MinuteOutOfRange { minute: u16::from(minute) });
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(self) -> u8 {
        self.hour
    }

    pub fn minute(self) -> u8 {
        self.minute
    }

    /// Minutes since midnight (`hour * 60 + minute`).
    pub fn total_minutes(self) -> u16 {
        u16::from(self.hour) * MINUTES_PER_HOUR + u16::from(self.minute)
    }

    /// Best-effort parse used by the grid.
    ///
    /// Accepts exactly one `:` with one or two ASCII digits on each side (surrounding whitespace
    /// per component is ignored), so `"9:05"` and `" 09:05"` both parse.
    pub fn parse_lenient(input: &str) -> Result<Self, ClockTimeError> {
        let (hour, minute) = split_components(input)?;
        let hour = parse_component(hour.trim(), 1)?;
        let minute = parse_component(minute.trim(), 1)?;
        Self::from_components(hour, minute)
    }

    /// Creation-time parse: the input must be exactly `HH:MM` (24-hour, zero-padded).
    pub fn parse_strict(input: &str) -> Result<Self, ClockTimeError> {
        let (hour, minute) = split_components(input)?;
        let hour = parse_component(hour, 2)?;
        let minute = parse_component(minute, 2)?;
        Self::from_components(hour, minute)
    }

    fn from_components(hour: u16, minute: u16) -> Result<Self, ClockTimeError> {
        if hour >= u16::from(HOURS_PER_DAY) {
            return Err(ClockTimeError::HourOutOfRange { hour });
        }
        if minute >= MINUTES_PER_HOUR {
            return Err(ClockTimeError::MinuteOutOfRange { minute });
        }
        Ok(Self { hour: hour as u8, minute: minute as u8 })
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ClockTime {
    type Err = ClockTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_strict(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClockTimeError {
    #[error("expected exactly one ':' separator, found {found}")]
    SeparatorCount { found: usize },
    #[error("time component {value:?} is not a number")]
    NotNumeric { value: String },
    #[error("time component {value:?} must have {expected} digit(s)")]
    Width { value: String, expected: &'static str },
    #[error("hour {hour} is out of range 0..=23")]
    HourOutOfRange { hour: u16 },
    #[error("minute {minute} is out of range 0..=59")]
    MinuteOutOfRange { minute: u16 },
}

fn split_components(input: &str) -> Result<(&str, &str), ClockTimeError> {
    let found = input.matches(':').count();
    if found != 1 {
        return Err(ClockTimeError::SeparatorCount { found });
    }
    input.split_once(':').ok_or(ClockTimeError::SeparatorCount { found })
}

fn parse_component(raw: &str, min_width: usize) -> Result<u16, ClockTimeError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ClockTimeError::NotNumeric { value: raw.to_owned() });
    }
    if raw.len() < min_width || raw.len() > 2 {
        let expected = if min_width == 2 { "exactly 2" } else { "1 or 2" };
        return Err(ClockTimeError::Width { value: raw.to_owned(), expected });
    }
    raw.parse::<u16>().map_err(|_| ClockTimeError::NotNumeric { value: raw.to_owned() })
}

/// Zero-pads both components of an `H:M` string (`"9:5"` becomes `"09:05"`).
///
/// Input without exactly one `:` is returned unchanged so that validation can report it.
pub fn normalize_time(input: &str) -> String {
    let Some((hour, minute)) = input.split_once(':') else {
        return input.to_owned();
    };
    if minute.contains(':') {
        return input.to_owned();
    }
    format!("{hour:0>2}:{minute:0>2}")
}

/// Minutes between two times as text, or `None` when either side does not parse.
pub fn duration_minutes(start: &str, end: &str) -> Option<i32> {
    let start = ClockTime::parse_lenient(start).ok()?;
    let end = ClockTime::parse_lenient(end).ok()?;
    Some(i32::from(end.total_minutes()) - i32::from(start.total_minutes()))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{duration_minutes, normalize_time, ClockTime, ClockTimeError};

    #[rstest]
    #[case("09:05", 9, 5)]
    #[case("9:05", 9, 5)]
    #[case("9:5", 9, 5)]
    #[case(" 23:59", 23, 59)]
    #[case("00:00", 0, 0)]
    fn lenient_parse_accepts_short_components(
        #[case] input: &str,
        #[case] hour: u8,
        #[case] minute: u8,
    ) {
        let time = ClockTime::parse_lenient(input).expect("time");
        assert_eq!((time.hour(), time.minute()), (hour, minute));
    }

    #[rstest]
    #[case("0905")]
    #[case("09:05:00")]
    #[case("ab:cd")]
    #[case("24:00")]
    #[case("12:60")]
    #[case("")]
    #[case("-1:30")]
    #[case("123:00")]
    fn lenient_parse_rejects_malformed(#[case] input: &str) {
        assert!(ClockTime::parse_lenient(input).is_err(), "{input:?} should not parse");
    }

    #[test]
    fn strict_parse_requires_two_digits() {
        assert_eq!(ClockTime::parse_strict("09:05").expect("time").to_string(), "09:05");
        assert_eq!(
            ClockTime::parse_strict("9:05"),
            Err(ClockTimeError::Width { value: "9".to_owned(), expected: "exactly 2" })
        );
        assert_eq!(ClockTime::parse_strict("9"), Err(ClockTimeError::SeparatorCount { found: 0 }));
        assert_eq!(
            ClockTime::parse_strict("23:75"),
            Err(ClockTimeError::MinuteOutOfRange { minute: 75 })
        );
    }

    #[test]
    fn normalize_pads_components_and_leaves_garbage_alone() {
        assert_eq!(normalize_time("9:5"), "09:05");
        assert_eq!(normalize_time("10:30"), "10:30");
        assert_eq!(normalize_time("1030"), "1030");
        assert_eq!(normalize_time("1:2:3"), "1:2:3");
        assert_eq!(normalize_time(""), "");
    }

    #[test]
    fn duration_is_signed_and_none_on_garbage() {
        assert_eq!(duration_minutes("09:00", "10:15"), Some(75));
        assert_eq!(duration_minutes("10:00", "09:00"), Some(-60));
        assert_eq!(duration_minutes("10:00", "nope"), None);
    }
}
