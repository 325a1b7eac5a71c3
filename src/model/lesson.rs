// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::clock::{normalize_time, ClockTime};
use super::ids::LessonId;

/// Fixed accent used when a lesson has no color of its own.
pub const ACCENT_COLOR: HexColor = HexColor::from_rgb(0x00, 0xa7, 0xe5);

/// Colors offered when creating a lesson; the first entry is the default.
pub const LESSON_PALETTE: [HexColor; 7] = [
    ACCENT_COLOR,
    HexColor::from_rgb(0x14, 0x14, 0x2b),
    HexColor::from_rgb(0xe4, 0x01, 0x73),
    HexColor::from_rgb(0x63, 0x08, 0xf7),
    HexColor::from_rgb(0xff, 0x7f, 0x08),
    HexColor::from_rgb(0x44, 0xd6, 0xdf),
    HexColor::from_rgb(0xb1, 0xcb, 0x49),
];

/// One weekly lesson as persisted by the store and consumed by the layout engine.
///
/// Times and the day name are kept as raw text: the store and importers may hand over values
/// that never went through [`LessonBuilder`] validation, and the grid has to cope with them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    #[serde(default)]
    pub id: Option<LessonId>,
    pub day: String,
    pub subject: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(rename = "type", default, with = "optional_text")]
    pub lesson_type: Option<LessonType>,
    #[serde(default)]
    pub room: String,
    #[serde(default, with = "optional_text")]
    pub color: Option<HexColor>,
}

impl Lesson {
    pub fn builder() -> LessonBuilder {
        LessonBuilder::default()
    }

    pub fn display_color(&self) -> HexColor {
        self.color.unwrap_or(ACCENT_COLOR)
    }

    pub fn with_id(mut self, id: LessonId) -> Self {
        self.id = Some(id);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LessonType {
    Online,
    Offline,
}

impl LessonType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Online => "Online",
            Self::Offline => "Offline",
        }
    }
}

impl fmt::Display for LessonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LessonType {
    type Err = ParseLessonTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "online" => Ok(Self::Online),
            "offline" => Ok(Self::Offline),
            _ => Err(ParseLessonTypeError { value: s.to_owned() }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown lesson type {value:?} (expected Online or Offline)")]
pub struct ParseLessonTypeError {
    pub value: String,
}

/// A `#RRGGBB` color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor {
    rgb: [u8; 3],
}

impl HexColor {
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { rgb: [r, g, b] }
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        (self.rgb[0], self.rgb[1], self.rgb[2])
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.rgb;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

impl FromStr for HexColor {
    type Err = ParseHexColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let hex = trimmed
            .strip_prefix('#')
            .ok_or_else(|| ParseHexColorError { value: s.to_owned() })?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseHexColorError { value: s.to_owned() });
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| ParseHexColorError { value: s.to_owned() })
        };
        Ok(Self::from_rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color {value:?} (expected #RRGGBB)")]
pub struct ParseHexColorError {
    pub value: String,
}

/// Serializes `Option<T>` as text where `None` is the empty string.
mod optional_text {
    use super::*;

    pub(super) fn serialize<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: fmt::Display,
        S: Serializer,
    {
        match value {
            Some(value) => serializer.collect_str(value),
            None => serializer.serialize_str(""),
        }
    }

    pub(super) fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: FromStr,
        T::Err: fmt::Display,
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        if raw.trim().is_empty() {
            return Ok(None);
        }
        raw.parse::<T>().map(Some).map_err(serde::de::Error::custom)
    }
}

/// Validated construction of a new lesson, mirroring the checks of the lesson form.
#[derive(Debug, Clone, Default)]
pub struct LessonBuilder {
    id: Option<LessonId>,
    day: String,
    subject: String,
    start_time: String,
    end_time: String,
    lesson_type: Option<LessonType>,
    room: String,
    color: Option<String>,
}

impl LessonBuilder {
    pub fn id(mut self, id: LessonId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn day(mut self, day: impl Into<String>) -> Self {
        self.day = day.into();
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn start_time(mut self, time: impl Into<String>) -> Self {
        self.start_time = time.into();
        self
    }

    pub fn end_time(mut self, time: impl Into<String>) -> Self {
        self.end_time = time.into();
        self
    }

    pub fn lesson_type(mut self, lesson_type: LessonType) -> Self {
        self.lesson_type = Some(lesson_type);
        self
    }

    pub fn room(mut self, room: impl Into<String>) -> Self {
        self.room = room.into();
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn build(self) -> Result<Lesson, LessonError> {
        let subject = self.subject.trim();
        if subject.is_empty() {
            return Err(LessonError::EmptySubject);
        }

        let start_time = validated_time(&self.start_time)?;
        let end_time = validated_time(&self.end_time)?;
        if start_time == end_time {
            return Err(LessonError::SameTimes);
        }
        if end_time <= start_time {
            return Err(LessonError::EndBeforeStart);
        }

        let color = match self.color.as_deref().map(str::trim) {
            None | Some("") => LESSON_PALETTE[0],
            Some(raw) => raw
                .parse::<HexColor>()
                .map_err(|_| LessonError::InvalidColor { value: raw.to_owned() })?,
        };

        Ok(Lesson {
            id: self.id,
            day: self.day.trim().to_owned(),
            subject: subject.to_owned(),
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
            lesson_type: self.lesson_type,
            room: self.room.trim().to_owned(),
            color: Some(color),
        })
    }
}

fn validated_time(raw: &str) -> Result<ClockTime, LessonError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(LessonError::TimeRequired);
    }
    ClockTime::parse_strict(&normalize_time(raw))
        .map_err(|_| LessonError::InvalidTimeFormat { value: raw.to_owned() })
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LessonError {
    #[error("subject must not be empty")]
    EmptySubject,
    #[error("start and end time are required")]
    TimeRequired,
    #[error("invalid time {value:?} (expected HH:MM)")]
    InvalidTimeFormat { value: String },
    #[error("start and end time must differ")]
    SameTimes,
    #[error("end time must be after start time")]
    EndBeforeStart,
    #[error("invalid color {value:?} (expected #RRGGBB)")]
    InvalidColor { value: String },
}

impl LessonError {
    /// Catalog key of the user-facing message for this error.
    pub fn translation_key(&self) -> &'static str {
        match self {
            Self::EmptySubject => "app.lesson_dialog.error_empty_subject",
            Self::TimeRequired => "app.lesson_dialog.error_time_required",
            Self::InvalidTimeFormat { .. } => "app.lesson_dialog.error_invalid_time_format",
            Self::SameTimes => "app.lesson_dialog.error_same_times",
            Self::EndBeforeStart => "app.lesson_dialog.error_end_before_start",
            Self::InvalidColor { .. } => "app.lesson_dialog.error_invalid_color",
        }
    }
}
