// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! RFC 4180 CSV codec for lesson lists.
//!
//! Records end with CRLF on export; the reader accepts CRLF, LF or a bare CR. Fields containing a
//! comma, a quote or a line break are quoted, with embedded quotes doubled.

use super::{validate_records, ImportError, RawLesson};
use crate::model::Lesson;

pub const CSV_HEADERS: [&str; 8] =
    ["ID", "Day", "Subject", "Start_time", "End_time", "Type", "Room", "Color"];

/// Headers that must be present; the remaining columns are optional.
pub const REQUIRED_HEADERS: [&str; 5] = ["ID", "Day", "Subject", "Start_time", "End_time"];

pub fn encode_lessons(lessons: &[Lesson]) -> String {
    let mut out = String::new();
    push_record(&mut out, CSV_HEADERS.iter().copied());
    for lesson in lessons {
        let id = lesson.id.map(|id| id.to_string()).unwrap_or_default();
        let lesson_type = lesson.lesson_type.map(|t| t.as_str()).unwrap_or_default();
        let color = lesson.color.map(|c| c.to_string()).unwrap_or_default();
        push_record(
            &mut out,
            [
                id.as_str(),
                lesson.day.as_str(),
                lesson.subject.as_str(),
                lesson.start_time.as_str(),
                lesson.end_time.as_str(),
                lesson_type,
                lesson.room.as_str(),
                color.as_str(),
            ],
        );
    }
    out
}

fn push_record<'a>(out: &mut String, fields: impl IntoIterator<Item = &'a str>) {
    for (idx, field) in fields.into_iter().enumerate() {
        if idx > 0 {
            out.push(',');
        }
        push_field(out, field);
    }
    out.push_str("\r\n");
}

fn push_field(out: &mut String, field: &str) {
    if !field.contains(&[',', '"', '\r', '\n'][..]) {
        out.push_str(field);
        return;
    }
    out.push('"');
    for ch in field.chars() {
        if ch == '"' {
            out.push('"');
        }
        out.push(ch);
    }
    out.push('"');
}

pub fn parse_lessons(input: &str) -> Result<Vec<Lesson>, ImportError> {
    let mut rows = parse_rows(input)?
        .into_iter()
        .filter(|row| !(row.len() == 1 && row[0].is_empty()));

    let header = rows.next().unwrap_or_default();
    let column = |name: &str| header.iter().position(|h| h == name);
    let missing = REQUIRED_HEADERS
        .into_iter()
        .filter(|&name| column(name).is_none())
        .collect::<Vec<_>>();
    if !missing.is_empty() {
        return Err(ImportError::MissingHeaders { missing });
    }

    let columns = CSV_HEADERS.map(column);
    let records = rows
        .map(|row| {
            let cell = |slot: usize| columns[slot].and_then(|idx| row.get(idx).cloned());
            RawLesson {
                id: cell(0),
                day: cell(1),
                subject: cell(2),
                start_time: cell(3),
                end_time: cell(4),
                lesson_type: cell(5),
                room: cell(6),
                color: cell(7),
            }
        })
        .collect::<Vec<_>>();

    validate_records(records)
}

/// Splits `input` into records of raw fields.
fn parse_rows(input: &str) -> Result<Vec<Vec<String>>, ImportError> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut after_quote = false;
    let mut line = 1;
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => {
                    in_quotes = false;
                    after_quote = true;
                }
                '\n' => {
                    line += 1;
                    field.push(ch);
                }
                _ => field.push(ch),
            }
            continue;
        }

        match ch {
            '"' if field.is_empty() && !after_quote => in_quotes = true,
            '"' => {
                return Err(ImportError::MalformedCsv {
                    line,
                    message: "quote inside an unquoted field",
                })
            }
            ',' => {
                row.push(std::mem::take(&mut field));
                after_quote = false;
            }
            '\r' | '\n' => {
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
                after_quote = false;
                line += 1;
            }
            _ if after_quote => {
                return Err(ImportError::MalformedCsv {
                    line,
                    message: "text after a closing quote",
                })
            }
            _ => field.push(ch),
        }
    }

    if in_quotes {
        return Err(ImportError::MalformedCsv {
            line,
            message: "unterminated quoted field",
        });
    }
    if after_quote || !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }
    Ok(rows)
}
