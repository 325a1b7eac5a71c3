// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::ops::Range;

use tracing::debug;

use crate::grid::TimeGrid;
use crate::model::Lesson;

/// Where one lesson lands on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement<'a> {
    lesson: &'a Lesson,
    lesson_index: usize,
    day_index: usize,
    row_index: usize,
    row_span: usize,
}

impl<'a> Placement<'a> {
    pub fn lesson(&self) -> &'a Lesson {
        self.lesson
    }

    /// Position of the lesson in the input slice.
    pub fn lesson_index(&self) -> usize {
        self.lesson_index
    }

    pub fn day_index(&self) -> usize {
        self.day_index
    }

    pub fn row_index(&self) -> usize {
        self.row_index
    }

    pub fn row_span(&self) -> usize {
        self.row_span
    }

    /// Rows covered by the block; may run past the last grid row for late lessons.
    pub fn rows(&self) -> Range<usize> {
        self.row_index..self.row_index.saturating_add(self.row_span)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    DayNotRecognized,
    TimeNotOnGrid,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DayNotRecognized => f.write_str("day not recognized"),
            Self::TimeNotOnGrid => f.write_str("start time not on grid"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skipped {
    pub lesson_index: usize,
    pub reason: SkipReason,
}

/// Placements in input order plus the lessons that could not be placed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScheduleLayout<'a> {
    placements: Vec<Placement<'a>>,
    skipped: Vec<Skipped>,
}

impl<'a> ScheduleLayout<'a> {
    pub fn placements(&self) -> &[Placement<'a>] {
        &self.placements
    }

    pub fn skipped(&self) -> &[Skipped] {
        &self.skipped
    }

    pub fn into_placements(self) -> Vec<Placement<'a>> {
        self.placements
    }

    /// Smallest row range covering every placement, clipped to `slot_count`.
    pub fn occupied_rows(&self, slot_count: usize) -> Option<Range<usize>> {
        let start = self.placements.iter().map(Placement::row_index).min()?;
        let end = self
            .placements
            .iter()
            .map(|placement| placement.rows().end)
            .max()?
            .min(slot_count);
        Some(start..end.max(start + 1))
    }
}

/// Lesson-to-cell placement over a fixed [`TimeGrid`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScheduleLayoutEngine {
    grid: TimeGrid,
}

impl ScheduleLayoutEngine {
    pub fn new(grid: TimeGrid) -> Self {
        Self { grid }
    }

    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    pub fn layout<'a>(&self, lessons: &'a [Lesson]) -> Vec<Placement<'a>> {
        layout_schedule(lessons, &self.grid)
    }

    pub fn layout_with_report<'a>(&self, lessons: &'a [Lesson]) -> ScheduleLayout<'a> {
        layout_schedule_with_report(lessons, &self.grid)
    }
}

/// Places every lesson that resolves to a day column and a start row; the rest are dropped.
///
/// Output order follows input order. Lessons sharing a cell each get their own placement.
pub fn layout_schedule<'a>(lessons: &'a [Lesson], grid: &TimeGrid) -> Vec<Placement<'a>> {
    layout_schedule_with_report(lessons, grid).into_placements()
}

pub fn layout_schedule_with_report<'a>(
    lessons: &'a [Lesson],
    grid: &TimeGrid,
) -> ScheduleLayout<'a> {
    let mut layout = ScheduleLayout::default();

    for (lesson_index, lesson) in lessons.iter().enumerate() {
        match place_lesson(lesson_index, lesson, grid) {
            Ok(placement) => layout.placements.push(placement),
            Err(reason) => {
                debug!(
                    lesson_index,
                    day = %lesson.day,
                    start_time = %lesson.start_time,
                    subject = %lesson.subject,
                    %reason,
                    "lesson skipped by layout"
                );
                layout.skipped.push(Skipped { lesson_index, reason });
            }
        }
    }

    layout
}

fn place_lesson<'a>(
    lesson_index: usize,
    lesson: &'a Lesson,
    grid: &TimeGrid,
) -> Result<Placement<'a>, SkipReason> {
    let day_index = grid.day_index_of(&lesson.day).ok_or(SkipReason::DayNotRecognized)?;
    let row_index = grid.slot_index_of(&lesson.start_time).ok_or(SkipReason::TimeNotOnGrid)?;
    let row_span = grid.row_span_for(&lesson.start_time, &lesson.end_time);

    Ok(Placement { lesson, lesson_index, day_index, row_index, row_span })
}
