// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

use super::{validate_records, ExportError, ImportError, RawLesson};
use crate::model::Lesson;

/// Pretty array of lesson objects, four-space indented, non-ASCII written verbatim.
pub fn encode_lessons(lessons: &[Lesson]) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    lessons
        .serialize(&mut serializer)
        .map_err(|source| ExportError::Json { source })?;
    let mut out = String::from_utf8_lossy(&buf).into_owned();
    out.push('\n');
    Ok(out)
}

/// Reads an array of lesson objects.
///
/// Keys are accepted both as exported (`start_time`) and capitalized like the CSV headers
/// (`Start_time`); the lowercase spelling wins when both are present.
pub fn parse_lessons(input: &str) -> Result<Vec<Lesson>, ImportError> {
    let document: Value =
        serde_json::from_str(input).map_err(|source| ImportError::MalformedJson { source })?;
    let Value::Array(items) = document else {
        return Err(ImportError::NotAnArray);
    };

    let mut records = Vec::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        let record = idx + 1;
        let Value::Object(object) = item else {
            return Err(ImportError::NotAnObject { record });
        };
        let field = |key: &'static str, field: &'static str| text_field(object, key, field, record);
        records.push(RawLesson {
            id: field("id", "ID")?,
            day: field("day", "Day")?,
            subject: field("subject", "Subject")?,
            start_time: field("start_time", "Start_time")?,
            end_time: field("end_time", "End_time")?,
            lesson_type: field("type", "Type")?,
            room: field("room", "Room")?,
            color: field("color", "Color")?,
        });
    }

    validate_records(records)
}

/// Reads `key` (or its capitalized alias) as text. Numbers are accepted for ids, `null` is absent.
fn text_field(
    object: &Map<String, Value>,
    key: &'static str,
    alias: &'static str,
    record: usize,
) -> Result<Option<String>, ImportError> {
    let value = object.get(key).or_else(|| object.get(alias));
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(Value::Number(number)) if key == "id" => Ok(Some(number.to_string())),
        Some(_) => Err(ImportError::InvalidValue {
            record,
            field: alias,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{encode_lessons, parse_lessons};
    use crate::format::ImportError;
    use crate::model::fixtures::{demo_week, lesson};
    use crate::model::LessonType;

    #[test]
    fn export_uses_lowercase_keys_in_field_order() {
        let mut math = lesson(1, "вівторок", "Математика", "09:00", "10:30");
        math.lesson_type = Some(LessonType::Online);
        let json = encode_lessons(&[math]).expect("encode");
        let expected = r#"[
    {
        "id": 1,
        "day": "вівторок",
        "subject": "Математика",
        "start_time": "09:00",
        "end_time": "10:30",
        "type": "Online",
        "room": "",
        "color": ""
    }
]
"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn own_export_imports_back() {
        let lessons = demo_week();
        let json = encode_lessons(&lessons).expect("encode");
        assert_eq!(parse_lessons(&json).expect("parse"), lessons);
    }

    #[test]
    fn capitalized_keys_and_string_ids_are_accepted() {
        let input = r##"[{"ID": "4", "Day": "Friday", "Subject": "Art", "Start_time": "11:00",
                         "End_time": "12:00", "Type": "offline", "Room": "3", "Color": "#B1CB49"}]"##;
        let lessons = parse_lessons(input).expect("parse");
        assert_eq!(lessons[0].id.map(|id| id.get()), Some(4));
        assert_eq!(lessons[0].lesson_type, Some(LessonType::Offline));
        assert_eq!(lessons[0].color.map(|c| c.to_string()), Some("#b1cb49".to_owned()));
    }

    #[test]
    fn null_id_is_a_missing_field() {
        let input = r#"[{"id": null, "day": "Monday", "subject": "A", "start_time": "09:00", "end_time": "10:00"}]"#;
        assert!(matches!(
            parse_lessons(input),
            Err(ImportError::MissingField { record: 1, field: "ID" })
        ));
    }

    #[test]
    fn structural_problems_are_reported() {
        assert!(matches!(parse_lessons("{}"), Err(ImportError::NotAnArray)));
        assert!(matches!(parse_lessons("[1]"), Err(ImportError::NotAnObject { record: 1 })));
        assert!(matches!(parse_lessons("[{"), Err(ImportError::MalformedJson { .. })));
        assert!(matches!(
            parse_lessons(r#"[{"id": 1, "day": true}]"#),
            Err(ImportError::InvalidValue { record: 1, field: "Day" })
        ));
    }

    #[test]
    fn duplicate_ids_reject_the_file() {
        let input = r#"[
            {"id": 1, "day": "Monday", "subject": "A", "start_time": "09:00", "end_time": "10:00"},
            {"id": "1", "day": "Monday", "subject": "B", "start_time": "10:00", "end_time": "11:00"}
        ]"#;
        assert!(matches!(parse_lessons(input), Err(ImportError::DuplicateId { record: 2, .. })));
    }
}
