// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

fn list_title(app: &App, count: usize) -> String {
    let title = app.catalog.translate("app.tui.list_title");
    if app.search_active() {
        format!(" {title} ({count}) /{} ", app.search.query)
    } else {
        format!(" {title} ({count}) ")
    }
}

fn lesson_list_item(theme: &TuiTheme, lesson: &Lesson) -> ListItem<'static> {
    let line = Line::from(vec![
        Span::styled("▌", theme.lesson_style(lesson.display_color())),
        Span::raw(format!(
            " {} {}-{} ",
            lesson.day.trim(),
            lesson.start_time.trim(),
            lesson.end_time.trim()
        )),
        Span::styled(
            lesson.subject.trim().to_owned(),
            theme.base_style().add_modifier(Modifier::BOLD),
        ),
    ]);
    ListItem::new(line)
}

fn search_prompt(app: &App) -> String {
    format!(
        "{}: /{}",
        app.catalog.translate("app.tui.search_prompt"),
        app.search.query
    )
}

fn footer_line(app: &App) -> Line<'static> {
    let label_style = app.theme.muted_style();
    let mut spans = Vec::<Span<'static>>::new();

    if app.search.mode == SearchMode::Editing {
        spans.push(Span::styled(search_prompt(app), app.theme.key_style()));
    } else {
        spans.push(Span::styled(
            app.catalog.translate("app.tui.help_hint").into_owned(),
            label_style,
        ));
        spans.push(Span::styled(
            format!(
                " | {} {}",
                app.settings.language.code(),
                app.settings.theme.as_str()
            ),
            label_style,
        ));
    }

    if app.skipped > 0 {
        spans.push(Span::styled(
            format!(
                " | {} {}",
                app.skipped,
                app.catalog.translate("app.tui.skipped")
            ),
            label_style,
        ));
    }

    if let Some(toast) = &app.toast {
        let style = if toast.is_error {
            app.theme.error_style()
        } else {
            app.theme.base_style()
        };
        spans.push(Span::styled(" | ", label_style));
        spans.push(Span::styled(toast.message.clone(), style));
    }

    Line::from(spans)
}

fn centered_rect(width_percent: u16, height_percent: u16, area: Rect) -> Rect {
    let vertical_margin = (100u16.saturating_sub(height_percent)) / 2;
    let horizontal_margin = (100u16.saturating_sub(width_percent)) / 2;

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(vertical_margin),
            Constraint::Percentage(height_percent),
            Constraint::Percentage(vertical_margin),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(horizontal_margin),
            Constraint::Percentage(width_percent),
            Constraint::Percentage(horizontal_margin),
        ])
        .split(vertical[1])[1]
}

const HELP_KEYS: [(&str, &str); 9] = [
    ("j/k", "app.tui.help.select"),
    ("↑↓←→ PgUp/PgDn", "app.tui.help.scroll"),
    ("g", "app.tui.help.language"),
    ("t", "app.tui.help.theme"),
    ("d", "app.tui.help.delete"),
    ("r", "app.tui.help.reload"),
    ("/", "app.tui.help.search"),
    ("y", "app.tui.help.copy"),
    ("q", "app.tui.help.quit"),
];

fn help_lines(app: &App) -> Vec<Line<'static>> {
    let key_width = HELP_KEYS
        .iter()
        .map(|(key, _)| key.chars().count())
        .max()
        .unwrap_or(0);
    let key_style = app.theme.key_style();
    HELP_KEYS
        .iter()
        .map(|&(key, description)| {
            Line::from(vec![
                Span::styled(format!("{key:>key_width$}"), key_style),
                Span::raw("  "),
                Span::raw(app.catalog.translate(description).into_owned()),
            ])
        })
        .collect()
}

fn render_help(frame: &mut Frame<'_>, app: &App, main_area: Rect) {
    let area = centered_rect(60, 60, main_area);
    frame.render_widget(Clear, area);

    let title = format!(" {} ", app.catalog.translate("app.tui.help_title"));
    let help = Paragraph::new(help_lines(app))
        .style(app.theme.base_style())
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(app.theme.panel_border_style(true)),
        );
    frame.render_widget(help, area);
}
