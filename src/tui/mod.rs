// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! Provides the interactive week viewer (ratatui + crossterm): the rendered week grid, the lesson
//! list, a footer with toasts, fuzzy search and a help overlay. A built-in demo week is available
//! through [`run_demo`].

use std::{
    error::Error,
    io,
    path::PathBuf,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use tracing::{debug, info, warn};

use crate::config::{Settings, ThemeMode};
use crate::grid::TimeGrid;
use crate::i18n::{Catalog, Translate};
use crate::layout::{layout_schedule_with_report, Placement};
use crate::model::{fixtures::demo_week, HexColor, Lesson};
use crate::render::{render_week_unicode, AnnotatedRender, LineSpan, RenderOptions, WeekLabels};
use crate::store::{LessonStore, MemoryStore, WriteDurability};

mod search;
mod theme;

pub use theme::{ThemeError, PALETTE_ENV};

use search::ranked_matches;
use theme::TuiTheme;

const TOAST_TTL: Duration = Duration::from_secs(2);
const HORIZONTAL_SCROLL_STEP: i32 = 4;
/// Top border, day names and header rule of the rendered week.
const STICKY_ROWS: usize = 3;

/// Runs the interactive week viewer on `store`.
///
/// Language and theme changes are written back to `settings_path` when one is given.
pub fn run(
    store: Box<dyn LessonStore>,
    settings: Settings,
    settings_path: Option<PathBuf>,
) -> Result<(), Box<dyn Error>> {
    let theme = TuiTheme::from_env(settings.theme)?;
    let mut app = App::new(store, settings, settings_path, theme)?;
    let mut terminal = TerminalSession::new()?;
    info!(lessons = app.lessons.len(), "tui started");

    while !app.should_quit {
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                _ => {}
            }
        }
    }

    info!("tui stopped");
    Ok(())
}

/// Runs the viewer on the built-in demo week, kept in memory.
pub fn run_demo(settings: Settings) -> Result<(), Box<dyn Error>> {
    let store = MemoryStore::with_lessons(demo_week())?;
    run(Box::new(store), settings, None)
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.area();
    frame.render_widget(Block::default().style(app.theme.base_style()), area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let main_area = rows[0];
    let status_area = rows[1];

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(main_area);
    let grid_area = panes[0];
    let list_area = panes[1];

    let grid_title = format!(" {} ", app.catalog.translate("app.tui.grid_title"));
    let grid_block = Block::default()
        .borders(Borders::ALL)
        .title(grid_title)
        .border_style(app.theme.panel_border_style(true));
    let grid_inner = grid_block.inner(grid_area);
    frame.render_widget(grid_block, grid_area);
    let grid_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(STICKY_ROWS as u16), Constraint::Min(0)])
        .split(grid_inner);

    app.set_viewport((grid_rows[1].width, grid_rows[1].height));

    // Day headers stay put while the slot rows scroll underneath.
    let mut header = app.grid_text();
    let body = Text::from(header.lines.split_off(STICKY_ROWS.min(header.lines.len())));
    let header = Paragraph::new(header)
        .style(app.theme.base_style())
        .scroll((0, app.scroll_x));
    frame.render_widget(header, grid_rows[0]);
    let body = Paragraph::new(body)
        .style(app.theme.base_style())
        .scroll((app.scroll_y, app.scroll_x));
    frame.render_widget(body, grid_rows[1]);

    let visible = app.visible_lessons();
    let list_title = list_title(app, visible.len());
    let list_block = Block::default()
        .borders(Borders::ALL)
        .title(list_title)
        .border_style(app.theme.panel_border_style(false));
    if visible.is_empty() {
        let empty = Paragraph::new(app.catalog.translate("app.tui.no_lessons").into_owned())
            .style(app.theme.muted_style())
            .block(list_block);
        frame.render_widget(empty, list_area);
    } else {
        let items = visible
            .iter()
            .map(|&idx| lesson_list_item(&app.theme, &app.lessons[idx]))
            .collect::<Vec<_>>();
        let list = List::new(items)
            .style(app.theme.base_style())
            .block(list_block)
            .highlight_style(app.theme.selection_style());
        let mut state = ListState::default();
        state.select(Some(app.cursor.min(visible.len() - 1)));
        frame.render_stateful_widget(list, list_area, &mut state);
    }

    app.expire_toast(Instant::now());
    frame.render_widget(Paragraph::new(footer_line(app)), status_area);
    let brand = Paragraph::new(Line::from(Span::styled(
        app.catalog.translate("app.title").into_owned(),
        app.theme.muted_style(),
    )))
    .alignment(Alignment::Right);
    frame.render_widget(brand, status_area);

    if app.search.mode == SearchMode::Editing {
        let prompt_width = search_prompt(app).chars().count() as u16;
        let cursor_x = status_area
            .x
            .saturating_add(prompt_width)
            .min(status_area.x.saturating_add(status_area.width.saturating_sub(1)));
        frame.set_cursor_position((cursor_x, status_area.y));
    }

    if app.show_help {
        render_help(frame, app, main_area);
    }
}

// Footer, list item and help overlay rendering helpers.
include!("chrome.rs");

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    expires_at: Instant,
    is_error: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum SearchMode {
    #[default]
    Inactive,
    Editing,
    Results,
}

#[derive(Debug, Clone, Default)]
struct SearchState {
    mode: SearchMode,
    query: String,
    results: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellMark {
    Plain,
    Block(HexColor),
    Selected(HexColor),
}

struct App {
    store: Box<dyn LessonStore>,
    settings: Settings,
    settings_path: Option<PathBuf>,
    catalog: Catalog,
    theme: TuiTheme,
    grid: TimeGrid,
    lessons: Vec<Lesson>,
    render: AnnotatedRender,
    /// Placement index to lesson index.
    placement_lessons: Vec<usize>,
    skipped: usize,
    /// Position within [`App::visible_lessons`].
    cursor: usize,
    scroll_x: u16,
    scroll_y: u16,
    viewport: (u16, u16),
    reveal_pending: bool,
    search: SearchState,
    show_help: bool,
    toast: Option<Toast>,
    should_quit: bool,
}

impl App {
    fn new(
        store: Box<dyn LessonStore>,
        settings: Settings,
        settings_path: Option<PathBuf>,
        theme: TuiTheme,
    ) -> Result<Self, Box<dyn Error>> {
        let grid = TimeGrid::new(settings.to_grid_config()?)?;
        let lessons = store.list_lessons()?;
        let mut app = Self {
            store,
            catalog: Catalog::new(settings.language),
            settings,
            settings_path,
            theme,
            grid,
            lessons,
            render: AnnotatedRender::default(),
            placement_lessons: Vec::new(),
            skipped: 0,
            cursor: 0,
            scroll_x: 0,
            scroll_y: 0,
            viewport: (0, 0),
            reveal_pending: true,
            search: SearchState::default(),
            show_help: false,
            toast: None,
            should_quit: false,
        };
        app.relayout();
        Ok(app)
    }

    fn relayout(&mut self) {
        let labels = WeekLabels::translated(&self.grid, &self.catalog);
        let rendered = {
            let layout = layout_schedule_with_report(&self.lessons, &self.grid);
            self.skipped = layout.skipped().len();
            self.placement_lessons = layout
                .placements()
                .iter()
                .map(Placement::lesson_index)
                .collect();
            render_week_unicode(&layout, &self.grid, &labels, RenderOptions::default())
        };
        match rendered {
            Ok(render) => self.render = render,
            Err(err) => {
                warn!(error = %err, "week render failed");
                self.render = AnnotatedRender::default();
                self.report_error(err.to_string());
            }
        }
        debug!(
            placements = self.placement_lessons.len(),
            skipped = self.skipped,
            "week laid out"
        );
    }

    fn reload(&mut self) -> bool {
        match self.store.list_lessons() {
            Ok(lessons) => {
                self.lessons = lessons;
                self.refresh_search();
                self.relayout();
                self.clamp_cursor();
                self.reveal_pending = true;
                true
            }
            Err(err) => {
                warn!(error = %err, "reload failed");
                self.report_error(err.to_string());
                false
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.handle_key_code(key.code) {
            self.should_quit = true;
        }
    }

    /// Returns `true` when the app should quit.
    fn handle_key_code(&mut self, code: KeyCode) -> bool {
        if self.show_help {
            match code {
                KeyCode::Esc | KeyCode::Char('?') => self.show_help = false,
                KeyCode::Char('q') => return true,
                _ => {}
            }
            return false;
        }

        if self.search.mode == SearchMode::Editing {
            self.handle_search_edit_key(code);
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('j') => self.select_by(1),
            KeyCode::Char('k') => self.select_by(-1),
            KeyCode::Down => self.scroll_by(0, 1),
            KeyCode::Up => self.scroll_by(0, -1),
            KeyCode::Right => self.scroll_by(HORIZONTAL_SCROLL_STEP, 0),
            KeyCode::Left => self.scroll_by(-HORIZONTAL_SCROLL_STEP, 0),
            KeyCode::PageDown => self.scroll_by(0, i32::from(self.page_height())),
            KeyCode::PageUp => self.scroll_by(0, -i32::from(self.page_height())),
            KeyCode::Home => {
                self.scroll_x = 0;
                self.scroll_y = 0;
            }
            KeyCode::Char('g') => self.cycle_language(),
            KeyCode::Char('t') => self.toggle_theme(),
            KeyCode::Char('d') => self.delete_selected(),
            KeyCode::Char('r') => {
                if self.reload() {
                    self.notify(self.catalog.translate("app.tui.reloaded").into_owned());
                }
            }
            KeyCode::Char('/') => self.start_search(),
            KeyCode::Char('y') => self.yank_selected(),
            KeyCode::Esc if self.search.mode == SearchMode::Results => self.clear_search(),
            _ => {}
        }
        false
    }

    fn handle_search_edit_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.clear_search(),
            KeyCode::Enter => {
                self.search.mode = if self.search.query.trim().is_empty() {
                    SearchMode::Inactive
                } else {
                    SearchMode::Results
                };
            }
            KeyCode::Backspace => {
                self.search.query.pop();
                self.on_query_changed();
            }
            KeyCode::Char(ch) => {
                self.search.query.push(ch);
                self.on_query_changed();
            }
            _ => {}
        }
    }

    fn start_search(&mut self) {
        self.search = SearchState {
            mode: SearchMode::Editing,
            ..SearchState::default()
        };
        self.cursor = 0;
    }

    fn clear_search(&mut self) {
        let selected = self.selected_lesson();
        self.search = SearchState::default();
        // Keep the same lesson under the cursor in the full list.
        self.cursor = selected.unwrap_or(0);
        self.clamp_cursor();
    }

    fn on_query_changed(&mut self) {
        self.refresh_search();
        self.cursor = 0;
        self.reveal_pending = true;
    }

    fn refresh_search(&mut self) {
        if self.search.mode != SearchMode::Inactive {
            self.search.results = ranked_matches(&self.lessons, &self.search.query);
        }
    }

    fn search_active(&self) -> bool {
        self.search.mode != SearchMode::Inactive && !self.search.query.trim().is_empty()
    }

    /// Lesson indices shown in the list, in display order.
    fn visible_lessons(&self) -> Vec<usize> {
        if self.search_active() {
            self.search.results.clone()
        } else {
            (0..self.lessons.len()).collect()
        }
    }

    fn selected_lesson(&self) -> Option<usize> {
        self.visible_lessons().get(self.cursor).copied()
    }

    fn select_by(&mut self, delta: i32) {
        let len = self.visible_lessons().len();
        if len == 0 {
            return;
        }
        let next = (self.cursor as i64 + i64::from(delta)).clamp(0, len as i64 - 1);
        self.cursor = next as usize;
        self.reveal_pending = true;
    }

    fn clamp_cursor(&mut self) {
        let len = self.visible_lessons().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    fn set_viewport(&mut self, viewport: (u16, u16)) {
        self.viewport = viewport;
        if self.reveal_pending {
            self.reveal_selection();
        }
        self.clamp_scroll();
    }

    fn page_height(&self) -> u16 {
        self.viewport.1.max(1)
    }

    /// Width of the rendered week and height of its scrolling part.
    fn content_size(&self) -> (usize, usize) {
        let width = self.render.lines().map(|line| line.chars().count()).max().unwrap_or(0);
        let height = self.render.lines().count().saturating_sub(STICKY_ROWS);
        (width, height)
    }

    fn scroll_by(&mut self, dx: i32, dy: i32) {
        self.scroll_x = (i32::from(self.scroll_x) + dx).clamp(0, i32::from(u16::MAX)) as u16;
        self.scroll_y = (i32::from(self.scroll_y) + dy).clamp(0, i32::from(u16::MAX)) as u16;
        self.clamp_scroll();
    }

    fn clamp_scroll(&mut self) {
        let (width, height) = self.content_size();
        let max_x = width.saturating_sub(usize::from(self.viewport.0.max(1)));
        let max_y = height.saturating_sub(usize::from(self.viewport.1.max(1)));
        self.scroll_x = self.scroll_x.min(clamp_u16(max_x));
        self.scroll_y = self.scroll_y.min(clamp_u16(max_y));
    }

    /// Cell spans of every block drawn for the selected lesson.
    fn selected_spans(&self) -> Vec<LineSpan> {
        let Some(selected) = self.selected_lesson() else {
            return Vec::new();
        };
        self.placement_lessons
            .iter()
            .enumerate()
            .filter(|&(_, &lesson_idx)| lesson_idx == selected)
            .flat_map(|(placement, _)| self.render.spans_for(placement).iter().copied())
            .collect()
    }

    /// Scrolling-area rows and columns covered by the selected lesson, inclusive.
    fn selected_bounds(&self) -> Option<((usize, usize), (usize, usize))> {
        let spans = self.selected_spans();
        let top = spans.iter().map(|&(y, _, _)| y).min()?;
        let bottom = spans.iter().map(|&(y, _, _)| y).max()?;
        let left = spans.iter().map(|&(_, x0, _)| x0).min()?;
        let right = spans.iter().map(|&(_, _, x1)| x1).max()?;
        Some((
            (top.saturating_sub(STICKY_ROWS), bottom.saturating_sub(STICKY_ROWS)),
            (left, right),
        ))
    }

    /// Scrolls so the selected lesson's block is inside the viewport.
    fn reveal_selection(&mut self) {
        self.reveal_pending = false;
        let Some(((top, bottom), (left, right))) = self.selected_bounds() else {
            return;
        };

        let (view_w, view_h) = (usize::from(self.viewport.0), usize::from(self.viewport.1));
        let scroll_y = usize::from(self.scroll_y);
        if top < scroll_y || bottom >= scroll_y + view_h {
            self.scroll_y = clamp_u16(top.saturating_sub(1));
        }
        let scroll_x = usize::from(self.scroll_x);
        if left < scroll_x || right >= scroll_x + view_w {
            self.scroll_x = clamp_u16(left.saturating_sub(1));
        }
    }

    fn grid_text(&self) -> Text<'static> {
        let lines = self.render.lines().collect::<Vec<_>>();
        let mut marks = lines
            .iter()
            .map(|line| vec![CellMark::Plain; line.chars().count()])
            .collect::<Vec<_>>();

        for (placement, &lesson_idx) in self.placement_lessons.iter().enumerate() {
            let color = self.lessons[lesson_idx].display_color();
            apply_mark(&mut marks, self.render.spans_for(placement), CellMark::Block(color));
        }
        if let Some(selected) = self.selected_lesson() {
            let color = self.lessons[selected].display_color();
            apply_mark(&mut marks, &self.selected_spans(), CellMark::Selected(color));
        }

        let styled = lines
            .iter()
            .zip(&marks)
            .map(|(line, marks)| styled_line(&self.theme, line, marks))
            .collect::<Vec<_>>();
        Text::from(styled)
    }

    fn cycle_language(&mut self) {
        let language = self.settings.language.next();
        self.settings.language = language;
        self.catalog = Catalog::new(language);
        self.relayout();
        info!(language = %language, "language changed");
        self.persist_settings();
        self.notify(format!(
            "{}: {}",
            self.catalog.translate("app.settings.language"),
            language.native_name()
        ));
    }

    fn toggle_theme(&mut self) {
        let mode = self.settings.theme.toggled();
        self.settings.theme = mode;
        self.theme.set_mode(mode);
        info!(theme = mode.as_str(), "theme changed");
        self.persist_settings();
        let name = match mode {
            ThemeMode::Dark => self.catalog.translate("app.settings.dark").into_owned(),
            ThemeMode::Light => self.catalog.translate("app.settings.light").into_owned(),
        };
        self.notify(format!(
            "{}: {name}",
            self.catalog.translate("app.settings.theme")
        ));
    }

    fn persist_settings(&mut self) {
        let Some(path) = self.settings_path.as_deref() else {
            return;
        };
        if let Err(err) = self.settings.save(path, WriteDurability::BestEffort) {
            warn!(error = %err, "settings not saved");
            self.report_error(err.to_string());
        }
    }

    fn delete_selected(&mut self) {
        let Some(selected) = self.selected_lesson() else {
            return;
        };
        let Some(id) = self.lessons[selected].id else {
            self.report_error(self.catalog.translate("app.database.error").into_owned());
            return;
        };
        match self.store.delete(id) {
            Ok(()) => {
                if self.reload() {
                    self.notify(self.catalog.translate("app.lesson.deleted").into_owned());
                }
            }
            Err(err) => {
                warn!(%id, error = %err, "delete failed");
                self.report_error(err.to_string());
            }
        }
    }

    fn selected_lesson_json(&self) -> Option<Result<String, serde_json::Error>> {
        let selected = self.selected_lesson()?;
        Some(serde_json::to_string_pretty(&self.lessons[selected]))
    }

    fn yank_selected(&mut self) {
        let payload = match self.selected_lesson_json() {
            Some(Ok(payload)) => payload,
            Some(Err(err)) => {
                self.report_error(err.to_string());
                return;
            }
            None => return,
        };
        match copy_to_clipboard(&payload) {
            Ok(()) => self.notify(self.catalog.translate("app.tui.copied").into_owned()),
            Err(err) => self.report_error(format!("clipboard: {err}")),
        }
    }

    /// Informational toast; suppressed when notifications are off.
    fn notify(&mut self, message: impl Into<String>) {
        if !self.settings.notifications {
            return;
        }
        self.set_toast(message.into(), false);
    }

    fn report_error(&mut self, message: impl Into<String>) {
        self.set_toast(message.into(), true);
    }

    fn set_toast(&mut self, message: String, is_error: bool) {
        self.toast = Some(Toast {
            message,
            expires_at: Instant::now() + TOAST_TTL,
            is_error,
        });
    }

    fn expire_toast(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|toast| toast.expires_at <= now) {
            self.toast = None;
        }
    }
}

fn clamp_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

fn apply_mark(marks: &mut [Vec<CellMark>], spans: &[LineSpan], mark: CellMark) {
    for &(y, x0, x1) in spans {
        let Some(line) = marks.get_mut(y) else {
            continue;
        };
        let end = x1.min(line.len().saturating_sub(1));
        if x0 > end {
            continue;
        }
        for cell in &mut line[x0..=end] {
            *cell = mark;
        }
    }
}

fn style_for_mark(theme: &TuiTheme, mark: CellMark) -> Style {
    match mark {
        CellMark::Plain => theme.base_style(),
        CellMark::Block(color) => theme.lesson_style(color),
        CellMark::Selected(color) => theme.selected_lesson_style(color),
    }
}

/// Groups runs of equally marked cells into styled spans.
fn styled_line(theme: &TuiTheme, line: &str, marks: &[CellMark]) -> Line<'static> {
    let mut spans = Vec::new();
    let mut run = String::new();
    let mut run_mark = None::<CellMark>;
    for (idx, ch) in line.chars().enumerate() {
        let mark = marks.get(idx).copied().unwrap_or(CellMark::Plain);
        if run_mark.is_some_and(|current| current != mark) {
            let current = run_mark.unwrap_or(CellMark::Plain);
            spans.push(Span::styled(std::mem::take(&mut run), style_for_mark(theme, current)));
        }
        run_mark = Some(mark);
        run.push(ch);
    }
    if let Some(mark) = run_mark {
        spans.push(Span::styled(run, style_for_mark(theme, mark)));
    }
    Line::from(spans)
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen);
}

fn copy_to_clipboard(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, Print(osc52_sequence(text)))
}

fn osc52_sequence(text: &str) -> String {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;

    let encoded = STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x1b\\")
}
