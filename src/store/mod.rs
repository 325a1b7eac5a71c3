// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence for lessons.
//!
//! [`LessonStore`] is the seam used by the CLI and the TUI. [`LessonFile`] keeps the table in a
//! JSON document inside the data directory; [`MemoryStore`] holds it in memory.

use std::path::PathBuf;

use crate::grid::normalize_day_name;
use crate::model::{Lesson, LessonId};

pub(crate) mod atomic;
pub mod lesson_file;
pub mod memory;
mod table;

pub use atomic::WriteDurability;
pub use lesson_file::{LessonFile, LESSON_FILE_NAME};
pub use memory::MemoryStore;
pub use table::LessonTable;

pub trait LessonStore {
    /// Every lesson ordered by `(day, start_time)` as plain text.
    fn list_lessons(&self) -> Result<Vec<Lesson>, StoreError>;

    fn get(&self, id: LessonId) -> Result<Option<Lesson>, StoreError>;

    /// Stores a new lesson under a fresh id; any id on `lesson` is ignored.
    fn insert(&mut self, lesson: Lesson) -> Result<LessonId, StoreError>;

    fn update(&mut self, lesson: Lesson) -> Result<(), StoreError>;

    fn delete(&mut self, id: LessonId) -> Result<(), StoreError>;

    /// Clears the store and inserts `lessons`, keeping their ids where present.
    fn replace_all(&mut self, lessons: Vec<Lesson>) -> Result<usize, StoreError>;

    /// Lessons whose day text matches `day` ignoring case and surrounding whitespace.
    fn lessons_on(&self, day: &str) -> Result<Vec<Lesson>, StoreError> {
        let wanted = normalize_day_name(day);
        let mut lessons = self.list_lessons()?;
        lessons.retain(|lesson| normalize_day_name(&lesson.day) == wanted);
        Ok(lessons)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("json error at {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("lesson {id} not found")]
    NotFound { id: LessonId },
    #[error("lesson has no id")]
    MissingId,
    #[error("duplicate lesson id {id}")]
    DuplicateId { id: LessonId },
    #[error("refusing to write through symlink at {path:?}")]
    SymlinkRefused { path: PathBuf },
}
