// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use weekgrid::layout::ScheduleLayout;
use weekgrid::model::{Lesson, LessonId, LessonType, LESSON_PALETTE};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

pub struct TempDir {
    path: PathBuf,
}

impl TempDir {
    pub fn new(prefix: &str) -> Self {
        let pid = std::process::id();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);

        let mut path = std::env::temp_dir();
        path.push(format!("weekgrid_bench_{prefix}_{pid}_{nanos}_{counter}"));
        std::fs::create_dir_all(&path).expect("create temp dir");

        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

pub fn checksum_layout(layout: &ScheduleLayout<'_>) -> u64 {
    let mut acc = 0u64;
    for placement in layout.placements() {
        acc = acc.wrapping_mul(131).wrapping_add(placement.day_index() as u64);
        acc = acc.wrapping_mul(131).wrapping_add(placement.row_index() as u64);
        acc = acc.wrapping_mul(131).wrapping_add(placement.row_span() as u64);
    }
    acc.wrapping_mul(131).wrapping_add(layout.skipped().len() as u64)
}

pub mod week {
    use super::*;

    /// Day spellings cycled by the generator; the last one never resolves.
    const DAYS: [&str; 8] = [
        "Monday",
        "вівторок",
        "Środa",
        " thursday ",
        "FRIDAY",
        "Субота",
        "niedziela",
        "Someday",
    ];

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Params {
        pub lessons: usize,
        /// Every n-th lesson starts off the five minute grid (0 = never).
        pub off_grid_every: usize,
        pub subject_len: usize,
    }

    impl Params {
        pub const fn new(lessons: usize, off_grid_every: usize, subject_len: usize) -> Self {
            Self {
                lessons,
                off_grid_every,
                subject_len,
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Case {
        Typical,
        Busy,
        LargeLongSubjects,
    }

    impl Case {
        pub const fn id(self) -> &'static str {
            match self {
                Self::Typical => "typical",
                Self::Busy => "busy",
                Self::LargeLongSubjects => "large_long_subjects",
            }
        }

        pub const fn params(self) -> Params {
            match self {
                Self::Typical => Params::new(30, 0, 12),
                Self::Busy => Params::new(200, 7, 16),
                Self::LargeLongSubjects => Params::new(1_000, 11, 48),
            }
        }
    }

    fn subject(idx: usize, len: usize) -> String {
        let mut out = format!("Subject_{idx:04}");
        while out.len() < len {
            out.push('x');
        }
        out.truncate(len.max(1));
        out
    }

    /// Lessons spread over the week between 08:00 and 18:55.
    pub fn lessons(params: Params) -> Vec<Lesson> {
        (0..params.lessons)
            .map(|idx| {
                let hour = 8 + idx % 11;
                let minute = if params.off_grid_every > 0 && idx % params.off_grid_every == 0 {
                    7
                } else {
                    (idx * 5) % 60
                };
                let duration = 45 + (idx % 4) * 15;
                let end = hour * 60 + minute + duration;
                Lesson {
                    id: LessonId::new(idx as u64 + 1).ok(),
                    day: DAYS[idx % DAYS.len()].to_owned(),
                    subject: subject(idx, params.subject_len),
                    start_time: format!("{hour:02}:{minute:02}"),
                    end_time: format!("{:02}:{:02}", end / 60, end % 60),
                    lesson_type: Some(if idx % 3 == 0 {
                        LessonType::Online
                    } else {
                        LessonType::Offline
                    }),
                    room: if idx % 5 == 0 {
                        String::new()
                    } else {
                        format!("R{}", 100 + idx % 40)
                    },
                    color: Some(LESSON_PALETTE[idx % LESSON_PALETTE.len()]),
                }
            })
            .collect()
    }

    pub fn fixture(case: Case) -> Vec<Lesson> {
        lessons(case.params())
    }
}
