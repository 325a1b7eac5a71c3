// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Lessons are plain value records; the layout engine reads them and never keeps them.

pub mod clock;
pub(crate) mod fixtures;
pub mod ids;
pub mod lesson;

pub use clock::{duration_minutes, normalize_time, ClockTime, ClockTimeError};
pub use ids::{IdError, LessonId};
pub use lesson::{
    HexColor, Lesson, LessonBuilder, LessonError, LessonType, ParseHexColorError,
    ParseLessonTypeError, ACCENT_COLOR, LESSON_PALETTE,
};
