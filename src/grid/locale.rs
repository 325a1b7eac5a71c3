// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashMap;

use smol_str::SmolStr;

/// Locale-independent weekday keys, Monday first. Also used as catalog keys (`app.days.<key>`).
pub const WEEKDAY_KEYS: [&str; 7] =
    ["monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday"];

pub const EN_DAYS: [&str; 7] = WEEKDAY_KEYS;
pub const UK_DAYS: [&str; 7] =
    ["понеділок", "вівторок", "середа", "четвер", "п'ятниця", "субота", "неділя"];
pub const PL_DAYS: [&str; 7] =
    ["poniedziałek", "wtorek", "środa", "czwartek", "piątek", "sobota", "niedziela"];

/// Spellings of the week's days for one locale, Monday first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayLocale {
    code: SmolStr,
    spellings: Vec<SmolStr>,
}

impl DayLocale {
    pub fn new<S: Into<SmolStr>>(
        code: impl Into<SmolStr>,
        spellings: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            code: code.into(),
            spellings: spellings.into_iter().map(Into::into).collect(),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn spellings(&self) -> &[SmolStr] {
        &self.spellings
    }
}

/// Ordered set of day-name tables.
///
/// Declaration order matters: when tables are merged into a lookup, a spelling that is already
/// present keeps its first index and later occurrences are ignored, even when a later locale uses
/// the same word for a different day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayLocales {
    locales: Vec<DayLocale>,
}

impl DayLocales {
    /// English, Ukrainian and Polish, in that order.
    pub fn builtin() -> Self {
        Self {
            locales: vec![
                DayLocale::new("en", EN_DAYS),
                DayLocale::new("uk", UK_DAYS),
                DayLocale::new("pl", PL_DAYS),
            ],
        }
    }

    pub fn empty() -> Self {
        Self { locales: Vec::new() }
    }

    /// Appends a locale after the existing ones; it never overrides earlier spellings.
    pub fn with_locale(mut self, locale: DayLocale) -> Self {
        self.locales.push(locale);
        self
    }

    pub fn locales(&self) -> &[DayLocale] {
        &self.locales
    }

    /// Builds the normalized spelling -> day index table for the first `day_count` days.
    pub(crate) fn merged_lookup(&self, day_count: usize) -> HashMap<SmolStr, usize> {
        let mut lookup = HashMap::<SmolStr, usize>::new();
        for locale in &self.locales {
            for (idx, spelling) in locale.spellings.iter().take(day_count).enumerate() {
                let normalized = normalize_day_name(spelling);
                if normalized.is_empty() {
                    continue;
                }
                lookup.entry(SmolStr::new(normalized)).or_insert(idx);
            }
        }
        lookup
    }
}

impl Default for DayLocales {
    fn default() -> Self {
        Self::builtin()
    }
}

pub fn normalize_day_name(day_name: &str) -> String {
    day_name.trim().to_lowercase()
}
