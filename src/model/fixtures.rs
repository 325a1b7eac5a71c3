// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::LessonId;
use super::lesson::{HexColor, Lesson, LessonType, LESSON_PALETTE};

pub(crate) fn lesson(
    id: u64,
    day: &str,
    subject: &str,
    start_time: &str,
    end_time: &str,
) -> Lesson {
    Lesson {
        id: LessonId::new(id).ok(),
        day: day.to_owned(),
        subject: subject.to_owned(),
        start_time: start_time.to_owned(),
        end_time: end_time.to_owned(),
        lesson_type: None,
        room: String::new(),
        color: None,
    }
}

fn styled(mut lesson: Lesson, lesson_type: LessonType, room: &str, color: HexColor) -> Lesson {
    lesson.lesson_type = Some(lesson_type);
    lesson.room = room.to_owned();
    lesson.color = Some(color);
    lesson
}

/// A small mixed-locale week used by the demo mode and by tests.
pub(crate) fn demo_week() -> Vec<Lesson> {
    vec![
        styled(
            lesson(1, "Monday", "Mathematics", "08:30", "10:00"),
            LessonType::Offline,
            "101",
            LESSON_PALETTE[0],
        ),
        styled(
            lesson(2, "monday", "Physics", "10:15", "11:45"),
            LessonType::Offline,
            "Lab 2",
            LESSON_PALETTE[2],
        ),
        styled(
            lesson(3, "вівторок", "Історія", "09:00", "10:30"),
            LessonType::Online,
            "",
            LESSON_PALETTE[3],
        ),
        styled(
            lesson(4, "Środa", "Programowanie", "12:00", "13:30"),
            LessonType::Offline,
            "B-12",
            LESSON_PALETTE[4],
        ),
        styled(
            lesson(5, "Thursday", "Literature", "14:00", "15:00"),
            LessonType::Online,
            "",
            LESSON_PALETTE[5],
        ),
        lesson(6, "Friday", "Chemistry", "09:05", "10:35"),
        styled(
            lesson(7, "Saturday", "Sports", "11:00", "12:30"),
            LessonType::Offline,
            "Gym",
            LESSON_PALETTE[6],
        ),
    ]
}
