// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Lesson list import and export.
//!
//! Two interchange formats are supported: CSV with the header
//! `ID,Day,Subject,Start_time,End_time,Type,Room,Color` and a JSON array of lesson objects.
//! Imports are all-or-nothing: the first invalid record rejects the whole file. Only an
//! unrecognized `Type` or `Color` is tolerated; it is logged and left unset.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::model::{HexColor, IdError, Lesson, LessonId, LessonType};
use crate::store::atomic::write_atomic;
use crate::store::{StoreError, WriteDurability};

pub mod csv;
pub mod json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Csv,
    Json,
}

impl Format {
    /// Picks the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("cannot read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported file format: {path:?} (expected .csv or .json)")]
    UnsupportedFormat { path: PathBuf },
    #[error("missing required CSV headers: {}", missing.join(", "))]
    MissingHeaders { missing: Vec<&'static str> },
    #[error("malformed CSV at line {line}: {message}")]
    MalformedCsv { line: usize, message: &'static str },
    #[error("malformed JSON: {source}")]
    MalformedJson {
        #[source]
        source: serde_json::Error,
    },
    #[error("JSON document must be an array of lesson objects")]
    NotAnArray,
    #[error("record {record}: not a JSON object")]
    NotAnObject { record: usize },
    #[error("record {record}: required field {field} is missing or empty")]
    MissingField { record: usize, field: &'static str },
    #[error("record {record}: field {field} has an unsupported value")]
    InvalidValue { record: usize, field: &'static str },
    #[error("record {record}: invalid id: {source}")]
    InvalidId {
        record: usize,
        #[source]
        source: IdError,
    },
    #[error("record {record}: duplicate id {id}")]
    DuplicateId { record: usize, id: LessonId },
}

impl ImportError {
    /// Catalog key of the message shown to the user for this failure.
    pub fn translation_key(&self, format: Format) -> &'static str {
        match (self, format) {
            (Self::UnsupportedFormat { .. }, _) => "app.import.unsupported_format",
            (Self::Io { .. }, _) => "app.import.file_corrupted",
            (_, Format::Csv) => "app.import.csv_failed",
            (_, Format::Json) => "app.import.json_failed",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Write(#[from] StoreError),
    #[error("unsupported file format: {path:?} (expected .csv or .json)")]
    UnsupportedFormat { path: PathBuf },
    #[error("cannot encode lessons as JSON: {source}")]
    Json {
        #[source]
        source: serde_json::Error,
    },
    #[error("nothing to export")]
    NoData,
}

/// One record as it appears in an import file, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RawLesson {
    pub(crate) id: Option<String>,
    pub(crate) day: Option<String>,
    pub(crate) subject: Option<String>,
    pub(crate) start_time: Option<String>,
    pub(crate) end_time: Option<String>,
    pub(crate) lesson_type: Option<String>,
    pub(crate) room: Option<String>,
    pub(crate) color: Option<String>,
}

impl RawLesson {
    /// Validates one record; `record` is 1-based and only used for error messages.
    ///
    /// Text is stored as written (no trimming or time normalization): imported data is shown as-is,
    /// and the grid decides whether it can be placed. An unrecognized type or color becomes unset.
    pub(crate) fn into_lesson(self, record: usize) -> Result<Lesson, ImportError> {
        let required = |value: Option<String>, field: &'static str| match value {
            Some(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(ImportError::MissingField { record, field }),
        };

        let id = required(self.id, "ID")?;
        let id = id
            .parse::<LessonId>()
            .map_err(|source| ImportError::InvalidId { record, source })?;

        // An unusable type or color is dropped; the record still imports.
        let lesson_type = match self.lesson_type.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => raw
                .parse::<LessonType>()
                .map_err(|err| warn!(record, error = %err, "lesson type ignored"))
                .ok(),
        };
        let color = match self.color.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => raw
                .parse::<HexColor>()
                .map_err(|err| warn!(record, error = %err, "lesson color ignored"))
                .ok(),
        };

        Ok(Lesson {
            id: Some(id),
            day: required(self.day, "Day")?,
            subject: required(self.subject, "Subject")?,
            start_time: required(self.start_time, "Start_time")?,
            end_time: required(self.end_time, "End_time")?,
            lesson_type,
            room: self.room.unwrap_or_default(),
            color,
        })
    }
}

/// Converts raw records and rejects duplicate ids.
pub(crate) fn validate_records(records: Vec<RawLesson>) -> Result<Vec<Lesson>, ImportError> {
    let mut seen = BTreeSet::new();
    let mut lessons = Vec::with_capacity(records.len());
    for (idx, raw) in records.into_iter().enumerate() {
        let record = idx + 1;
        let lesson = raw.into_lesson(record)?;
        if let Some(id) = lesson.id {
            if !seen.insert(id) {
                return Err(ImportError::DuplicateId { record, id });
            }
        }
        lessons.push(lesson);
    }
    Ok(lessons)
}

pub fn parse_lessons(input: &str, format: Format) -> Result<Vec<Lesson>, ImportError> {
    match format {
        Format::Csv => csv::parse_lessons(input),
        Format::Json => json::parse_lessons(input),
    }
}

pub fn encode_lessons(lessons: &[Lesson], format: Format) -> Result<String, ExportError> {
    match format {
        Format::Csv => Ok(csv::encode_lessons(lessons)),
        Format::Json => json::encode_lessons(lessons),
    }
}

/// Reads and validates a lesson file; the format comes from the extension.
pub fn import_file(path: &Path) -> Result<(Format, Vec<Lesson>), ImportError> {
    let format = Format::from_path(path).ok_or_else(|| ImportError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    let raw = fs::read_to_string(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    // Spreadsheet tools like to prepend a byte order mark.
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(&raw);
    let lessons = parse_lessons(raw, format)?;
    info!(path = %path.display(), ?format, count = lessons.len(), "lessons imported");
    Ok((format, lessons))
}

pub fn export_file(path: &Path, lessons: &[Lesson]) -> Result<Format, ExportError> {
    let format = Format::from_path(path).ok_or_else(|| ExportError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    if lessons.is_empty() {
        return Err(ExportError::NoData);
    }
    let encoded = encode_lessons(lessons, format)?;
    write_atomic(path, encoded.as_bytes(), WriteDurability::BestEffort)?;
    info!(path = %path.display(), ?format, count = lessons.len(), "lessons exported");
    Ok(format)
}
