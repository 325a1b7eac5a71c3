// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::atomic::{write_atomic, WriteDurability};
use super::{LessonStore, LessonTable, StoreError};
use crate::model::{Lesson, LessonId};

pub const LESSON_FILE_NAME: &str = "lessons.json";

/// Lesson table persisted as `lessons.json` in a data directory.
///
/// Every mutation reads the current file, applies the change and writes the whole document back
/// atomically, so concurrent readers never observe a partial file.
#[derive(Debug, Clone)]
pub struct LessonFile {
    root: PathBuf,
    durability: WriteDurability,
}

impl LessonFile {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            durability: WriteDurability::default(),
        }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn durability(&self) -> WriteDurability {
        self.durability
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self) -> PathBuf {
        self.root.join(LESSON_FILE_NAME)
    }

    /// Reads the table; a missing file is an empty table.
    pub fn load(&self) -> Result<LessonTable, StoreError> {
        let path = self.path();
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(source) if source.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no lesson file yet");
                return Ok(LessonTable::default());
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        let table: LessonTable =
            serde_json::from_str(&raw).map_err(|source| StoreError::Json {
                path: path.clone(),
                source,
            })?;
        table.validated()
    }

    pub fn save(&self, table: &LessonTable) -> Result<(), StoreError> {
        let path = self.path();
        let json = serde_json::to_string_pretty(table).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;
        write_atomic(&path, format!("{json}\n").as_bytes(), self.durability)?;
        debug!(path = %path.display(), lessons = table.len(), "lesson file written");
        Ok(())
    }

    fn modify<T>(
        &self,
        change: impl FnOnce(&mut LessonTable) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut table = self.load()?;
        let out = change(&mut table)?;
        self.save(&table)?;
        Ok(out)
    }
}

impl LessonStore for LessonFile {
    fn list_lessons(&self) -> Result<Vec<Lesson>, StoreError> {
        Ok(self.load()?.sorted())
    }

    fn get(&self, id: LessonId) -> Result<Option<Lesson>, StoreError> {
        Ok(self.load()?.get(id).cloned())
    }

    fn insert(&mut self, lesson: Lesson) -> Result<LessonId, StoreError> {
        let id = self.modify(|table| Ok(table.insert(lesson)))?;
        info!(%id, "lesson added");
        Ok(id)
    }

    fn update(&mut self, lesson: Lesson) -> Result<(), StoreError> {
        let id = lesson.id;
        self.modify(|table| table.update(lesson))?;
        info!(id = ?id, "lesson updated");
        Ok(())
    }

    fn delete(&mut self, id: LessonId) -> Result<(), StoreError> {
        self.modify(|table| table.delete(id))?;
        info!(%id, "lesson deleted");
        Ok(())
    }

    fn replace_all(&mut self, lessons: Vec<Lesson>) -> Result<usize, StoreError> {
        let count = self.modify(|table| table.replace_all(lessons))?;
        info!(count, "lesson table replaced");
        Ok(count)
    }
}
