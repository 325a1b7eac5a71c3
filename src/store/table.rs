// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::StoreError;
use crate::model::{Lesson, LessonId};

/// The lesson table shared by every store; also the on-disk document of [`super::LessonFile`].
///
/// Ids are never reused: `next_id` only grows, even when the newest lesson is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonTable {
    #[serde(default = "first_id")]
    next_id: u64,
    #[serde(default)]
    lessons: Vec<Lesson>,
}

fn first_id() -> u64 {
    1
}

impl Default for LessonTable {
    fn default() -> Self {
        Self {
            next_id: first_id(),
            lessons: Vec::new(),
        }
    }
}

impl LessonTable {
    /// Builds a table, assigning ids to lessons without one and rejecting duplicates.
    pub fn from_lessons(lessons: Vec<Lesson>) -> Result<Self, StoreError> {
        let mut table = Self::default();
        table.replace_all(lessons)?;
        Ok(table)
    }

    /// Re-checks a table read from disk: duplicate ids are rejected, missing ids assigned.
    pub(crate) fn validated(self) -> Result<Self, StoreError> {
        let mut table = Self {
            next_id: self.next_id.max(1),
            lessons: Vec::new(),
        };
        table.replace_all(self.lessons)?;
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Lessons in `(day, start_time)` text order; ties keep insertion order.
    pub fn sorted(&self) -> Vec<Lesson> {
        let mut lessons = self.lessons.clone();
        lessons.sort_by(|a, b| (&a.day, &a.start_time).cmp(&(&b.day, &b.start_time)));
        lessons
    }

    pub fn get(&self, id: LessonId) -> Option<&Lesson> {
        self.lessons.iter().find(|lesson| lesson.id == Some(id))
    }

    pub fn insert(&mut self, lesson: Lesson) -> LessonId {
        let id = self.allocate_id();
        self.lessons.push(lesson.with_id(id));
        id
    }

    pub fn update(&mut self, lesson: Lesson) -> Result<(), StoreError> {
        let id = lesson.id.ok_or(StoreError::MissingId)?;
        let slot = self
            .lessons
            .iter_mut()
            .find(|existing| existing.id == Some(id))
            .ok_or(StoreError::NotFound { id })?;
        *slot = lesson;
        Ok(())
    }

    pub fn delete(&mut self, id: LessonId) -> Result<(), StoreError> {
        let idx = self
            .lessons
            .iter()
            .position(|lesson| lesson.id == Some(id))
            .ok_or(StoreError::NotFound { id })?;
        self.lessons.remove(idx);
        Ok(())
    }

    /// Swaps in a new list of lessons; on error the table is left untouched.
    pub fn replace_all(&mut self, lessons: Vec<Lesson>) -> Result<usize, StoreError> {
        let mut seen = BTreeSet::new();
        for id in lessons.iter().filter_map(|lesson| lesson.id) {
            if !seen.insert(id) {
                return Err(StoreError::DuplicateId { id });
            }
        }

        let highest = seen.iter().next_back().map_or(0, |id| id.get());
        self.next_id = self.next_id.max(highest.saturating_add(1));
        self.lessons = Vec::with_capacity(lessons.len());
        for lesson in lessons {
            match lesson.id {
                Some(_) => self.lessons.push(lesson),
                None => {
                    self.insert(lesson);
                }
            }
        }
        Ok(self.lessons.len())
    }

    fn allocate_id(&mut self) -> LessonId {
        let highest = self
            .lessons
            .iter()
            .filter_map(|lesson| lesson.id.map(LessonId::get))
            .max()
            .unwrap_or(0);
        let raw = self.next_id.max(highest.saturating_add(1)).max(1);
        self.next_id = raw.saturating_add(1);
        LessonId::new(raw).unwrap_or(LessonId::MIN)
    }
}

#[cfg(test)]
mod tests {
    use super::LessonTable;
    use crate::model::fixtures::lesson;
    use crate::model::{Lesson, LessonId};
    use crate::store::StoreError;

    fn id(raw: u64) -> LessonId {
        LessonId::new(raw).expect("id")
    }

    fn unsaved(day: &str, subject: &str) -> Lesson {
        let mut lesson = lesson(1, day, subject, "09:00", "10:00");
        lesson.id = None;
        lesson
    }

    #[test]
    fn insert_assigns_increasing_ids_and_never_reuses_them() {
        let mut table = LessonTable::default();
        let first = table.insert(unsaved("Monday", "A"));
        let second = table.insert(unsaved("Monday", "B"));
        assert_eq!((first.get(), second.get()), (1, 2));

        table.delete(second).expect("delete");
        assert_eq!(table.insert(unsaved("Monday", "C")).get(), 3);
    }

    #[test]
    fn sorted_orders_by_day_text_then_start_time() {
        let table = LessonTable::from_lessons(vec![
            lesson(1, "Tuesday", "T", "08:00", "09:00"),
            lesson(2, "Monday", "M2", "10:00", "11:00"),
            lesson(3, "Monday", "M1", "09:00", "10:00"),
            lesson(4, "Friday", "F", "12:00", "13:00"),
        ])
        .expect("table");
        let subjects = table
            .sorted()
            .into_iter()
            .map(|lesson| lesson.subject)
            .collect::<Vec<_>>();
        // Plain text order: "Friday" < "Monday" < "Tuesday".
        assert_eq!(subjects, vec!["F", "M1", "M2", "T"]);
    }

    #[test]
    fn update_requires_an_existing_id() {
        let mut table = LessonTable::default();
        assert!(matches!(table.update(unsaved("Monday", "A")), Err(StoreError::MissingId)));
        let err = table.update(lesson(9, "Monday", "A", "09:00", "10:00")).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { id } if id.get() == 9));
    }

    #[test]
    fn replace_all_keeps_ids_and_fills_gaps_after_the_highest() {
        let mut table = LessonTable::default();
        table.insert(unsaved("Monday", "old"));
        let count = table
            .replace_all(vec![
                lesson(7, "Monday", "seven", "09:00", "10:00"),
                unsaved("Tuesday", "fresh"),
            ])
            .expect("replace");
        assert_eq!(count, 2);
        assert!(table.get(id(7)).is_some());
        assert_eq!(table.get(id(8)).map(|l| l.subject.as_str()), Some("fresh"));
        assert!(table.get(id(1)).is_none());
    }

    #[test]
    fn replace_all_with_duplicates_changes_nothing() {
        let mut table = LessonTable::from_lessons(vec![lesson(1, "Monday", "keep", "09:00", "10:00")])
            .expect("table");
        let err = table
            .replace_all(vec![
                lesson(2, "Monday", "a", "09:00", "10:00"),
                lesson(2, "Monday", "b", "10:00", "11:00"),
            ])
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId { id } if id.get() == 2));
        assert_eq!(table.len(), 1);
        assert!(table.get(id(1)).is_some());
    }
}
