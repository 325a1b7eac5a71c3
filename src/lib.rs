// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Weekgrid: a weekly class schedule with a time-grid layout engine.
//!
//! The core is [`grid::TimeGrid`] (slot labels and day-name resolution) and
//! [`layout::ScheduleLayoutEngine`] (lessons to day column, start row and row span). Everything
//! else is built around it: [`render`] draws a layout as text, [`store`] persists lessons,
//! [`format`] imports and exports them, [`i18n`] translates labels and [`tui`] puts it on screen.

pub mod config;
pub mod format;
pub mod grid;
pub mod i18n;
pub mod layout;
pub mod model;
pub mod render;
pub mod store;
pub mod tui;

#[cfg(test)]
pub(crate) mod test_support;
