// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Canonical time/day addressing for the week grid.
//!
//! A [`TimeGrid`] owns the ordered slot labels (`"HH:MM"`) of the displayable day and the merged
//! day-name lookup. It is immutable after construction; every lookup is a pure function of its
//! input and never fails loudly (unknown input resolves to `None`, spans clamp to one slot).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use smol_str::{format_smolstr, SmolStr};

use crate::model::clock::{duration_minutes, MINUTES_PER_HOUR};

pub mod locale;

pub use locale::{
    normalize_day_name, DayLocale, DayLocales, EN_DAYS, PL_DAYS, UK_DAYS, WEEKDAY_KEYS,
};

pub const DEFAULT_GRANULARITY_MINUTES: u16 = 5;
pub const DEFAULT_START_HOUR: u8 = 0;
pub const DEFAULT_END_HOUR: u8 = 23;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekLength {
    /// Monday to Friday.
    Workweek,
    /// Monday to Sunday.
    #[default]
    FullWeek,
}

impl WeekLength {
    pub fn day_count(self) -> usize {
        match self {
            Self::Workweek => 5,
            Self::FullWeek => 7,
        }
    }

    pub fn from_day_count(days: usize) -> Option<Self> {
        match days {
            5 => Some(Self::Workweek),
            7 => Some(Self::FullWeek),
            _ => None,
        }
    }
}

/// How a start time is matched against the generated slot labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotLookup {
    /// The time text must equal a slot label byte-for-byte (`"09:07"` misses a 5-minute grid).
    Exact,
    /// Only the hour component is used: it is zero-padded and `":00"` is appended before the
    /// exact match (`"9:45"` resolves to the `"09:00"` row).
    TruncateToHour,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridConfig {
    pub granularity_minutes: u16,
    pub start_hour: u8,
    /// Exclusive upper bound.
    pub end_hour: u8,
    pub week: WeekLength,
    /// `None` picks [`SlotLookup::TruncateToHour`] for hourly grids and [`SlotLookup::Exact`]
    /// otherwise.
    pub slot_lookup: Option<SlotLookup>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            granularity_minutes: DEFAULT_GRANULARITY_MINUTES,
            start_hour: DEFAULT_START_HOUR,
            end_hour: DEFAULT_END_HOUR,
            week: WeekLength::FullWeek,
            slot_lookup: None,
        }
    }
}

impl GridConfig {
    /// One slot per hour over the whole day (`"00:00".."23:00"`).
    pub fn hourly() -> Self {
        Self {
            granularity_minutes: MINUTES_PER_HOUR,
            start_hour: 0,
            end_hour: 24,
            week: WeekLength::FullWeek,
            slot_lookup: None,
        }
    }

    pub fn with_week(mut self, week: WeekLength) -> Self {
        self.week = week;
        self
    }

    pub fn with_slot_lookup(mut self, slot_lookup: SlotLookup) -> Self {
        self.slot_lookup = Some(slot_lookup);
        self
    }

    pub fn effective_slot_lookup(&self) -> SlotLookup {
        self.slot_lookup.unwrap_or(if self.granularity_minutes == MINUTES_PER_HOUR {
            SlotLookup::TruncateToHour
        } else {
            SlotLookup::Exact
        })
    }

    pub fn validate(&self) -> Result<(), GridConfigError> {
        let granularity = self.granularity_minutes;
        if granularity == 0 || granularity > MINUTES_PER_HOUR {
            return Err(GridConfigError::GranularityOutOfRange { granularity });
        }
        if MINUTES_PER_HOUR % granularity != 0 {
            return Err(GridConfigError::GranularityNotDivisor { granularity });
        }
        if self.start_hour >= self.end_hour || self.end_hour > 24 {
            return Err(GridConfigError::HourBounds {
                start_hour: self.start_hour,
                end_hour: self.end_hour,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridConfigError {
    #[error("granularity {granularity} must be between 1 and 60 minutes")]
    GranularityOutOfRange { granularity: u16 },
    #[error("granularity {granularity} must divide an hour evenly")]
    GranularityNotDivisor { granularity: u16 },
    #[error("hour bounds [{start_hour}, {end_hour}) must satisfy start < end <= 24")]
    HourBounds { start_hour: u8, end_hour: u8 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeGrid {
    config: GridConfig,
    slot_lookup: SlotLookup,
    slots: Vec<SmolStr>,
    day_lookup: HashMap<SmolStr, usize>,
}

impl Default for TimeGrid {
    fn default() -> Self {
        Self::from_validated(GridConfig::default(), &DayLocales::builtin())
    }
}

impl TimeGrid {
    pub fn new(config: GridConfig) -> Result<Self, GridConfigError> {
        Self::with_locales(config, &DayLocales::builtin())
    }

    pub fn with_locales(config: GridConfig, locales: &DayLocales) -> Result<Self, GridConfigError> {
        config.validate()?;
        Ok(Self::from_validated(config, locales))
    }

    fn from_validated(config: GridConfig, locales: &DayLocales) -> Self {
        let granularity = usize::from(config.granularity_minutes);
        let first = usize::from(config.start_hour) * usize::from(MINUTES_PER_HOUR);
        let last = usize::from(config.end_hour) * usize::from(MINUTES_PER_HOUR);
        let slots = (first..last)
            .step_by(granularity)
            .map(|minutes| format_smolstr!("{:02}:{:02}", minutes / 60, minutes % 60))
            .collect();

        Self {
            config,
            slot_lookup: config.effective_slot_lookup(),
            slots,
            day_lookup: locales.merged_lookup(config.week.day_count()),
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn granularity_minutes(&self) -> u16 {
        self.config.granularity_minutes
    }

    pub fn slot_lookup(&self) -> SlotLookup {
        self.slot_lookup
    }

    pub fn slots(&self) -> &[SmolStr] {
        &self.slots
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn day_count(&self) -> usize {
        self.config.week.day_count()
    }

    /// Canonical weekday keys of the grid's columns, Monday first.
    pub fn weekday_keys(&self) -> &'static [&'static str] {
        &WEEKDAY_KEYS[..self.day_count()]
    }

    /// Resolves a day name in any registered locale spelling to its 0-based column.
    pub fn day_index_of(&self, day_name: &str) -> Option<usize> {
        let normalized = normalize_day_name(day_name);
        if normalized.is_empty() {
            return None;
        }
        self.day_lookup.get(normalized.as_str()).copied()
    }

    /// Resolves a start time to its 0-based row, see [`SlotLookup`] for the matching rule.
    pub fn slot_index_of(&self, time: &str) -> Option<usize> {
        match self.slot_lookup {
            SlotLookup::Exact => self.find_slot(time),
            SlotLookup::TruncateToHour => {
                let (hour, _) = time.split_once(':')?;
                self.find_slot(&format!("{hour:0>2}:00"))
            }
        }
    }

    fn find_slot(&self, label: &str) -> Option<usize> {
        // Labels are zero-padded, so lexical order equals time order.
        self.slots.binary_search_by(|slot| slot.as_str().cmp(label)).ok()
    }

    /// Number of rows a lesson covers: `floor(minutes / granularity)`, at least 1.
    ///
    /// Unparsable times and non-positive durations yield 1.
    pub fn row_span_for(&self, start_time: &str, end_time: &str) -> usize {
        let Some(minutes) = duration_minutes(start_time, end_time) else {
            return 1;
        };
        if minutes <= 0 {
            return 1;
        }
        let span = minutes as usize / usize::from(self.config.granularity_minutes);
        span.max(1)
    }
}

#[cfg(test)]
mod tests;
