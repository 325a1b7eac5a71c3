// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Pixel sizing for graphical front ends drawing the same grid.

use crate::grid::TimeGrid;
use crate::model::duration_minutes;

pub const DEFAULT_SLOT_HEIGHT_PX: u32 = 60;
pub const DEFAULT_HEADER_WIDTH_PX: u32 = 80;
pub const DEFAULT_MIN_DAY_WIDTH_PX: u32 = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelMetrics {
    pub slot_height: u32,
    /// Width of the time-label column.
    pub header_width: u32,
    pub min_day_width: u32,
}

impl Default for PixelMetrics {
    fn default() -> Self {
        Self {
            slot_height: DEFAULT_SLOT_HEIGHT_PX,
            header_width: DEFAULT_HEADER_WIDTH_PX,
            min_day_width: DEFAULT_MIN_DAY_WIDTH_PX,
        }
    }
}

/// Height of a lesson block: `minutes * slot_px / granularity`, never less than one slot.
///
/// Malformed times and non-positive durations yield `slot_px`.
pub fn block_height_px(start: &str, end: &str, slot_px: u32, granularity_minutes: u16) -> u32 {
    let granularity = u64::from(granularity_minutes.max(1));
    let minutes = match duration_minutes(start, end) {
        Some(minutes) if minutes > 0 => minutes as u64,
        _ => return slot_px,
    };
    let height = minutes * u64::from(slot_px) / granularity;
    u32::try_from(height).unwrap_or(u32::MAX).max(slot_px)
}

/// Minimum `(width, height)` of a canvas showing every day and every slot of `grid`.
pub fn grid_min_size_px(grid: &TimeGrid, metrics: PixelMetrics) -> (u32, u32) {
    let days = u32::try_from(grid.day_count()).unwrap_or(u32::MAX);
    let slots = u32::try_from(grid.slot_count()).unwrap_or(u32::MAX);
    let width = metrics
        .header_width
        .saturating_add(days.saturating_mul(metrics.min_day_width));
    let height = slots.saturating_mul(metrics.slot_height);
    (width, height)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{block_height_px, grid_min_size_px, PixelMetrics};
    use crate::grid::{GridConfig, TimeGrid};

    #[rstest]
    #[case("09:00", "10:30", 60, 60, 90)]
    #[case("09:00", "09:30", 60, 60, 60)]
    #[case("09:00", "10:00", 40, 5, 480)]
    #[case("10:00", "09:00", 60, 60, 60)]
    #[case("10:00", "10:00", 60, 60, 60)]
    #[case("10:00", "soon", 60, 60, 60)]
    fn block_height_scales_with_duration(
        #[case] start: &str,
        #[case] end: &str,
        #[case] slot_px: u32,
        #[case] granularity: u16,
        #[case] expected: u32,
    ) {
        assert_eq!(block_height_px(start, end, slot_px, granularity), expected);
    }

    #[test]
    fn hourly_grid_minimum_size() {
        let grid = TimeGrid::new(GridConfig::hourly()).expect("grid");
        assert_eq!(grid_min_size_px(&grid, PixelMetrics::default()), (80 + 7 * 150, 24 * 60));
    }
}
