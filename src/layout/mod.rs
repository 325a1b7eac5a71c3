// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Layout of lessons onto the week grid.
//!
//! This module computes the (day column, start row, row span) of every lesson that resolves on
//! a [`crate::grid::TimeGrid`]. It is a pure function of its inputs and keeps no state between
//! calls.

pub mod schedule;

pub use schedule::{
    layout_schedule, layout_schedule_with_report, Placement, ScheduleLayout,
    ScheduleLayoutEngine, SkipReason, Skipped,
};
