// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::ops::Range;

use super::text::fit_to_width;
use super::{AnnotatedRender, Canvas, CanvasError, HighlightIndex, LineSpan};
use crate::grid::TimeGrid;
use crate::i18n::Translate;
use crate::layout::{Placement, ScheduleLayout};

/// Left edge marker of a lesson block.
pub const BLOCK_MARKER: char = '▌';

pub const DEFAULT_DAY_WIDTH: usize = 14;
const MIN_DAY_WIDTH: usize = 3;
/// `│ HH:MM │`: label plus one space of padding on each side.
const TIME_COLUMN_WIDTH: usize = 7;
/// Top border, header row and header rule.
const HEADER_ROWS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Interior width of each day column in cells.
    pub day_width: usize,
    /// Only render the slot rows between the earliest start and the latest end.
    pub crop_to_lessons: bool,
    /// Print the room line on the second row of blocks that span at least two rows.
    pub show_room: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            day_width: DEFAULT_DAY_WIDTH,
            crop_to_lessons: false,
            show_room: true,
        }
    }
}

/// Already-translated text the renderer needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekLabels {
    /// Column headers, Monday first.
    pub days: Vec<String>,
    pub room_label: String,
    pub room_not_specified: String,
}

impl WeekLabels {
    pub fn translated<T: Translate + ?Sized>(grid: &TimeGrid, translator: &T) -> Self {
        Self {
            days: grid
                .weekday_keys()
                .iter()
                .map(|key| translator.translate(&format!("app.days.{key}")).into_owned())
                .collect(),
            room_label: translator.translate("app.schedule.room_label").into_owned(),
            room_not_specified: translator
                .translate("app.schedule.room_not_specified")
                .into_owned(),
        }
    }

    fn day(&self, day_index: usize, grid: &TimeGrid) -> &str {
        self.days
            .get(day_index)
            .map(String::as_str)
            .or_else(|| grid.weekday_keys().get(day_index).copied())
            .unwrap_or_default()
    }

    fn room_line(&self, room: &str) -> String {
        let room = room.trim();
        let room = if room.is_empty() {
            self.room_not_specified.as_str()
        } else {
            room
        };
        format!("{} {}", self.room_label, room)
    }
}

/// Draws the week as a box table: one column per day, one line per visible slot.
///
/// Blocks are drawn in placement order, so where lessons overlap the later one wins cell by cell.
/// The highlight index is keyed by position in `layout.placements()`.
pub fn render_week_unicode(
    layout: &ScheduleLayout<'_>,
    grid: &TimeGrid,
    labels: &WeekLabels,
    options: RenderOptions,
) -> Result<AnnotatedRender, CanvasError> {
    let day_width = options.day_width.max(MIN_DAY_WIDTH);
    let visible = visible_rows(layout, grid, options.crop_to_lessons);
    let geometry = TableGeometry {
        day_width,
        days: grid.day_count(),
        visible: visible.clone(),
    };

    let mut canvas = Canvas::new(geometry.width(), geometry.height())?;
    draw_frame(&mut canvas, &geometry)?;

    for day_index in 0..geometry.days {
        let label = format!(" {}", fit_to_width(labels.day(day_index, grid), day_width - 1));
        canvas.write_str(geometry.day_x(day_index), 1, &label)?;
    }

    for (offset, row) in visible.clone().enumerate() {
        if let Some(slot) = grid.slots().get(row) {
            canvas.write_str(1, HEADER_ROWS + offset, &format!(" {slot} "))?;
        }
    }

    let mut highlight_index = HighlightIndex::new();
    for (placement_index, placement) in layout.placements().iter().enumerate() {
        let spans = draw_block(&mut canvas, &geometry, labels, placement, options.show_room)?;
        if !spans.is_empty() {
            highlight_index.insert(placement_index, spans);
        }
    }

    Ok(AnnotatedRender {
        text: canvas.to_string(),
        highlight_index,
    })
}

fn visible_rows(layout: &ScheduleLayout<'_>, grid: &TimeGrid, crop: bool) -> Range<usize> {
    let all = 0..grid.slot_count();
    if !crop {
        return all;
    }
    layout.occupied_rows(grid.slot_count()).unwrap_or(all)
}

struct TableGeometry {
    day_width: usize,
    days: usize,
    visible: Range<usize>,
}

impl TableGeometry {
    fn width(&self) -> usize {
        // Outer borders plus one separator after the time column and after every day.
        1 + TIME_COLUMN_WIDTH + 1 + self.days * (self.day_width + 1)
    }

    fn height(&self) -> usize {
        HEADER_ROWS + self.visible.len() + 1
    }

    fn day_x(&self, day_index: usize) -> usize {
        TIME_COLUMN_WIDTH + 2 + day_index * (self.day_width + 1)
    }

    fn row_y(&self, row: usize) -> Option<usize> {
        self.visible
            .contains(&row)
            .then(|| HEADER_ROWS + row - self.visible.start)
    }
}

fn draw_frame(canvas: &mut Canvas, geometry: &TableGeometry) -> Result<(), CanvasError> {
    let right = canvas.width() - 1;
    let bottom = canvas.height() - 1;
    canvas.draw_box(0, 0, right, bottom)?;
    canvas.draw_hline(0, right, 2)?;
    canvas.draw_vline(TIME_COLUMN_WIDTH + 1, 0, bottom)?;
    for day_index in 0..geometry.days {
        let separator = geometry.day_x(day_index) + geometry.day_width;
        canvas.draw_vline(separator, 0, bottom)?;
    }
    Ok(())
}

fn draw_block(
    canvas: &mut Canvas,
    geometry: &TableGeometry,
    labels: &WeekLabels,
    placement: &Placement<'_>,
    show_room: bool,
) -> Result<Vec<LineSpan>, CanvasError> {
    if placement.day_index() >= geometry.days {
        return Ok(Vec::new());
    }

    let lesson = placement.lesson();
    let x0 = geometry.day_x(placement.day_index());
    let x1 = x0 + geometry.day_width - 1;
    let text_width = geometry.day_width - 1;

    let mut spans = Vec::new();
    for (line, row) in placement.rows().enumerate() {
        let Some(y) = geometry.row_y(row) else {
            continue;
        };
        let text = match line {
            0 => lesson.subject.trim().to_owned(),
            1 if show_room => labels.room_line(&lesson.room),
            _ => String::new(),
        };
        canvas.fill_rect(x0, y, x1, y, ' ')?;
        canvas.set(x0, y, BLOCK_MARKER)?;
        canvas.write_str(x0 + 1, y, &fit_to_width(&text, text_width))?;
        spans.push((y, x0, x1));
    }
    Ok(spans)
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::{render_week_unicode, RenderOptions, WeekLabels};
    use crate::grid::{GridConfig, TimeGrid, WeekLength};
    use crate::i18n::{Catalog, Language};
    use crate::layout::layout_schedule_with_report;
    use crate::model::fixtures::{demo_week, lesson};
    use crate::model::Lesson;

    #[fixture]
    fn morning() -> TimeGrid {
        TimeGrid::new(GridConfig {
            granularity_minutes: 60,
            start_hour: 8,
            end_hour: 10,
            week: WeekLength::Workweek,
            slot_lookup: None,
        })
        .expect("grid")
    }

    fn english(grid: &TimeGrid) -> WeekLabels {
        WeekLabels::translated(grid, &Catalog::new(Language::En))
    }

    fn narrow() -> RenderOptions {
        RenderOptions {
            day_width: 6,
            ..RenderOptions::default()
        }
    }

    fn spanned_text(text: &str, spans: &[(usize, usize, usize)]) -> Vec<String> {
        let lines = text.split('\n').collect::<Vec<_>>();
        spans
            .iter()
            .map(|&(y, x0, x1)| lines[y].chars().skip(x0).take(x1 - x0 + 1).collect())
            .collect()
    }

    #[rstest]
    fn renders_box_table_with_blocks(morning: TimeGrid) {
        let mut math = lesson(1, "Monday", "Math", "08:00", "10:00");
        math.room = "101".to_owned();
        let lessons = vec![math, lesson(2, "środa", "Art", "09:00", "09:30")];
        let layout = layout_schedule_with_report(&lessons, &morning);

        let render =
            render_week_unicode(&layout, &morning, &english(&morning), narrow()).expect("render");

        let expected = [
            "┌───────┬──────┬──────┬──────┬──────┬──────┐",
            "│       │ Mond…│ Tues…│ Wedn…│ Thur…│ Frid…│",
            "├───────┼──────┼──────┼──────┼──────┼──────┤",
            "│ 08:00 │▌Math │      │      │      │      │",
            "│ 09:00 │▌Room…│      │▌Art  │      │      │",
            "└───────┴──────┴──────┴──────┴──────┴──────┘",
        ]
        .join("\n");
        assert_eq!(render.text, expected);
        assert_eq!(render.spans_for(0), &[(3, 9, 14), (4, 9, 14)]);
        assert_eq!(render.spans_for(1), &[(4, 23, 28)]);
    }

    #[rstest]
    fn room_line_falls_back_to_not_specified(morning: TimeGrid) {
        let lessons = vec![lesson(1, "Tuesday", "Lab", "08:00", "10:00")];
        let layout = layout_schedule_with_report(&lessons, &morning);
        let options = RenderOptions {
            day_width: 30,
            ..RenderOptions::default()
        };
        let render =
            render_week_unicode(&layout, &morning, &english(&morning), options).expect("render");
        let cells = spanned_text(&render.text, render.spans_for(0));
        assert_eq!(cells[0].trim_end(), "▌Lab");
        assert_eq!(cells[1].trim_end(), "▌Room: not specified");
    }

    #[rstest]
    fn later_overlapping_block_wins(morning: TimeGrid) {
        let lessons = vec![
            lesson(1, "Friday", "First", "08:00", "09:00"),
            lesson(2, "friday", "Second", "08:00", "09:00"),
        ];
        let layout = layout_schedule_with_report(&lessons, &morning);
        let render = render_week_unicode(&layout, &morning, &english(&morning), RenderOptions::default())
            .expect("render");
        assert!(render.text.contains("Second"));
        assert!(!render.text.contains("First"));
        assert_eq!(render.spans_for(0), render.spans_for(1));
    }

    #[rstest]
    fn headers_follow_the_catalog_language(morning: TimeGrid) {
        let layout = layout_schedule_with_report(&[], &morning);
        let labels = WeekLabels::translated(&morning, &Catalog::new(Language::Uk));
        let render = render_week_unicode(&layout, &morning, &labels, RenderOptions::default())
            .expect("render");
        let header = render.lines().nth(1).expect("header line");
        assert!(header.contains("Понеділок"));
        assert!(header.contains("П'ятниця"));
    }

    #[test]
    fn crop_limits_rows_to_occupied_range() {
        let grid = TimeGrid::default();
        let lessons = vec![lesson(1, "Monday", "Short", "09:00", "09:10")];
        let layout = layout_schedule_with_report(&lessons, &grid);
        let options = RenderOptions {
            crop_to_lessons: true,
            ..RenderOptions::default()
        };
        let render = render_week_unicode(&layout, &grid, &english(&grid), options).expect("render");
        let lines = render.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 2 + 4);
        assert!(lines[3].starts_with("│ 09:00 │▌Short"));
        assert!(lines[4].starts_with("│ 09:05 │"));
    }

    #[test]
    fn crop_without_lessons_keeps_the_whole_day() {
        let grid = TimeGrid::default();
        let empty: Vec<Lesson> = Vec::new();
        let layout = layout_schedule_with_report(&empty, &grid);
        let options = RenderOptions {
            crop_to_lessons: true,
            ..RenderOptions::default()
        };
        let render = render_week_unicode(&layout, &grid, &english(&grid), options).expect("render");
        assert_eq!(render.lines().count(), grid.slot_count() + 4);
        assert!(render.highlight_index.is_empty());
    }

    #[test]
    fn blocks_running_past_the_grid_are_clipped() {
        let grid = TimeGrid::default();
        let lessons = vec![lesson(1, "Sunday", "Night", "22:50", "23:59")];
        let layout = layout_schedule_with_report(&lessons, &grid);
        let render =
            render_week_unicode(&layout, &grid, &english(&grid), RenderOptions::default())
                .expect("render");
        // 22:50 and 22:55 are the last two slots.
        assert_eq!(render.spans_for(0).len(), 2);
    }

    #[test]
    fn demo_week_renders_every_placement() {
        let grid = TimeGrid::default();
        let lessons = demo_week();
        let layout = layout_schedule_with_report(&lessons, &grid);
        let options = RenderOptions {
            crop_to_lessons: true,
            ..RenderOptions::default()
        };
        let render = render_week_unicode(&layout, &grid, &english(&grid), options).expect("render");
        assert_eq!(render.highlight_index.len(), layout.placements().len());
        assert!(render.text.contains("Історія"));
    }
}
