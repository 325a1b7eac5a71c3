// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::{fixture, rstest};

use super::{
    DayLocale, DayLocales, GridConfig, GridConfigError, SlotLookup, TimeGrid, WeekLength,
};

#[fixture]
fn fine() -> TimeGrid {
    TimeGrid::default()
}

#[fixture]
fn hourly() -> TimeGrid {
    TimeGrid::new(GridConfig::hourly()).expect("hourly grid")
}

#[rstest]
fn default_grid_has_276_five_minute_slots(fine: TimeGrid) {
    assert_eq!(fine.slot_count(), 276);
    assert_eq!(fine.slots().first().map(|s| s.as_str()), Some("00:00"));
    assert_eq!(fine.slots().last().map(|s| s.as_str()), Some("22:55"));
    assert_eq!(fine.day_count(), 7);
    assert_eq!(fine.slot_lookup(), SlotLookup::Exact);
}

#[rstest]
fn hourly_grid_has_24_slots_and_truncates(hourly: TimeGrid) {
    assert_eq!(hourly.slot_count(), 24);
    assert_eq!(hourly.slots().last().map(|s| s.as_str()), Some("23:00"));
    assert_eq!(hourly.slot_lookup(), SlotLookup::TruncateToHour);
}

#[rstest]
#[case(" Monday ")]
#[case("monday")]
#[case("MONDAY")]
#[case("понеділок")]
#[case("Poniedziałek")]
fn monday_resolves_in_every_spelling(fine: TimeGrid, #[case] day: &str) {
    assert_eq!(fine.day_index_of(day), Some(0));
}

#[rstest]
#[case("Funday")]
#[case("")]
#[case("   ")]
#[case("mon")]
fn unknown_days_resolve_to_none(fine: TimeGrid, #[case] day: &str) {
    assert_eq!(fine.day_index_of(day), None);
}

#[rstest]
fn workweek_grid_does_not_resolve_weekend() {
    let grid = TimeGrid::new(GridConfig::default().with_week(WeekLength::Workweek)).expect("grid");
    assert_eq!(grid.day_count(), 5);
    assert_eq!(grid.day_index_of("friday"), Some(4));
    assert_eq!(grid.day_index_of("Saturday"), None);
    assert_eq!(grid.day_index_of("неділя"), None);
    assert_eq!(grid.weekday_keys().len(), 5);
}

// Surprising but deliberate: a later locale cannot re-map a spelling claimed by an earlier one.
#[rstest]
fn later_locale_cannot_steal_an_existing_spelling() {
    let locales = DayLocales::builtin()
        .with_locale(DayLocale::new("zz", ["sobota", "b", "c", "d", "e", "f", "g"]));
    let grid = TimeGrid::with_locales(GridConfig::default(), &locales).expect("grid");
    assert_eq!(grid.day_index_of("sobota"), Some(5));
    assert_eq!(grid.day_index_of("b"), Some(1));
}

#[rstest]
#[case("09:05", Some(109))]
#[case("00:00", Some(0))]
#[case("22:55", Some(275))]
#[case("09:07", None)]
#[case("9:05", None)]
#[case("23:00", None)]
#[case("09:05 ", None)]
#[case("garbage", None)]
fn fine_grid_requires_exact_slot_labels(
    fine: TimeGrid,
    #[case] time: &str,
    #[case] expected: Option<usize>,
) {
    assert_eq!(fine.slot_index_of(time), expected);
}

#[rstest]
#[case("09:00", Some(9))]
#[case("9:45", Some(9))]
#[case("23:59", Some(23))]
#[case("0:10", Some(0))]
#[case("0900", None)]
#[case("ab:00", None)]
#[case("", None)]
fn hourly_grid_truncates_to_the_hour(
    hourly: TimeGrid,
    #[case] time: &str,
    #[case] expected: Option<usize>,
) {
    assert_eq!(hourly.slot_index_of(time), expected);
}

#[rstest]
fn exact_lookup_can_be_forced_on_hourly_grid() {
    let grid = TimeGrid::new(GridConfig::hourly().with_slot_lookup(SlotLookup::Exact))
        .expect("grid");
    assert_eq!(grid.slot_index_of("09:00"), Some(9));
    assert_eq!(grid.slot_index_of("09:30"), None);
}

#[rstest]
#[case("09:00", "09:04", 1)]
#[case("09:00", "09:10", 2)]
#[case("09:00", "10:00", 12)]
#[case("09:05", "09:15", 2)]
#[case("09:00", "09:07", 1)]
#[case("10:00", "09:00", 1)]
#[case("10:00", "10:00", 1)]
#[case("10:00", "nope", 1)]
#[case("25:00", "26:00", 1)]
fn row_span_floors_and_clamps(
    fine: TimeGrid,
    #[case] start: &str,
    #[case] end: &str,
    #[case] expected: usize,
) {
    assert_eq!(fine.row_span_for(start, end), expected);
}

#[rstest]
fn hourly_row_span_uses_hour_granularity(hourly: TimeGrid) {
    assert_eq!(hourly.row_span_for("09:00", "10:30"), 1);
    assert_eq!(hourly.row_span_for("09:00", "12:00"), 3);
}

#[rstest]
#[case(GridConfig { granularity_minutes: 0, ..GridConfig::default() },
       GridConfigError::GranularityOutOfRange { granularity: 0 })]
#[case(GridConfig { granularity_minutes: 90, ..GridConfig::default() },
       GridConfigError::GranularityOutOfRange { granularity: 90 })]
#[case(GridConfig { granularity_minutes: 7, ..GridConfig::default() },
       GridConfigError::GranularityNotDivisor { granularity: 7 })]
#[case(GridConfig { start_hour: 10, end_hour: 10, ..GridConfig::default() },
       GridConfigError::HourBounds { start_hour: 10, end_hour: 10 })]
#[case(GridConfig { start_hour: 0, end_hour: 25, ..GridConfig::default() },
       GridConfigError::HourBounds { start_hour: 0, end_hour: 25 })]
fn invalid_configs_are_rejected(#[case] config: GridConfig, #[case] expected: GridConfigError) {
    assert_eq!(TimeGrid::new(config), Err(expected));
}

#[rstest]
fn bounded_grid_starts_at_start_hour() {
    let grid = TimeGrid::new(GridConfig {
        granularity_minutes: 15,
        start_hour: 8,
        end_hour: 18,
        ..GridConfig::default()
    })
    .expect("grid");
    assert_eq!(grid.slot_count(), 40);
    assert_eq!(grid.slot_index_of("08:00"), Some(0));
    assert_eq!(grid.slot_index_of("07:45"), None);
    assert_eq!(grid.slot_index_of("17:45"), Some(39));
}
