// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::{LessonStore, LessonTable, StoreError};
use crate::model::{Lesson, LessonId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    table: LessonTable,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lessons(lessons: Vec<Lesson>) -> Result<Self, StoreError> {
        Ok(Self {
            table: LessonTable::from_lessons(lessons)?,
        })
    }
}

impl LessonStore for MemoryStore {
    fn list_lessons(&self) -> Result<Vec<Lesson>, StoreError> {
        Ok(self.table.sorted())
    }

    fn get(&self, id: LessonId) -> Result<Option<Lesson>, StoreError> {
        Ok(self.table.get(id).cloned())
    }

    fn insert(&mut self, lesson: Lesson) -> Result<LessonId, StoreError> {
        Ok(self.table.insert(lesson))
    }

    fn update(&mut self, lesson: Lesson) -> Result<(), StoreError> {
        self.table.update(lesson)
    }

    fn delete(&mut self, id: LessonId) -> Result<(), StoreError> {
        self.table.delete(id)
    }

    fn replace_all(&mut self, lessons: Vec<Lesson>) -> Result<usize, StoreError> {
        self.table.replace_all(lessons)
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryStore;
    use crate::model::fixtures::demo_week;
    use crate::store::LessonStore;

    #[test]
    fn lessons_on_matches_day_text_case_insensitively() {
        let store = MemoryStore::with_lessons(demo_week()).expect("store");
        let monday = store.lessons_on(" MONDAY ").expect("monday");
        let subjects = monday.iter().map(|l| l.subject.as_str()).collect::<Vec<_>>();
        // "Monday" sorts before "monday" in plain text order.
        assert_eq!(subjects, vec!["Mathematics", "Physics"]);
        // Only the day text is compared; other spellings of Tuesday are not matched.
        assert!(store.lessons_on("tuesday").expect("tuesday").is_empty());
    }
}
