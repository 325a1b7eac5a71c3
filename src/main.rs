// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Weekgrid CLI entrypoint.
//!
//! Without a subcommand this opens the interactive week viewer on the lesson file in the data
//! directory. The other subcommands manage lessons and settings from the shell.

use std::error::Error;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use weekgrid::config::{self, Settings};
use weekgrid::format::{self, Format};
use weekgrid::grid::TimeGrid;
use weekgrid::i18n::{Catalog, Translate};
use weekgrid::layout::layout_schedule_with_report;
use weekgrid::model::{Lesson, LessonId, LessonType};
use weekgrid::render::{render_week_unicode, RenderOptions, WeekLabels, DEFAULT_DAY_WIDTH};
use weekgrid::store::{LessonFile, LessonStore, WriteDurability};
use weekgrid::tui;

const LOG_ENV: &str = "WEEKGRID_LOG";
const TUI_LOG_FILE: &str = "weekgrid-tui.log";

#[derive(Debug, Parser)]
#[command(name = "weekgrid", version, about = "Weekly class schedule on a time grid")]
struct Cli {
    /// Settings file (default: $WEEKGRID_CONFIG, then the platform config dir).
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory holding the lesson file (default: $WEEKGRID_DATA, then the platform data dir).
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Sync lesson and settings files to disk after every write.
    #[arg(long, global = true)]
    durable_writes: bool,

    /// Log debug output ($WEEKGRID_LOG overrides).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Open the interactive week viewer (the default).
    Tui {
        /// Show a built-in demo week instead of the lesson file.
        #[arg(long)]
        demo: bool,
    },
    /// Print the week as a text table.
    Render(RenderArgs),
    /// List lessons ordered by day and start time.
    List {
        /// Only lessons on this day (case-insensitive).
        #[arg(long)]
        day: Option<String>,
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Add a lesson.
    Add(LessonArgs),
    /// Change fields of an existing lesson.
    Edit {
        id: LessonId,
        #[command(flatten)]
        fields: LessonPatch,
    },
    /// Delete a lesson.
    Remove { id: LessonId },
    /// Replace all lessons with the contents of a .csv or .json file.
    Import { file: PathBuf },
    /// Write all lessons to a .csv or .json file.
    Export { file: PathBuf },
    /// Show or change settings.
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Debug, Args)]
struct RenderArgs {
    /// Render lessons from a .csv or .json file instead of the lesson file.
    #[arg(long, value_name = "FILE")]
    file: Option<PathBuf>,
    /// Interior width of each day column.
    #[arg(long, default_value_t = DEFAULT_DAY_WIDTH)]
    day_width: usize,
    /// Only show rows between the earliest start and the latest end.
    #[arg(long)]
    crop: bool,
    /// Leave the room line out of lesson blocks.
    #[arg(long)]
    no_room: bool,
}

#[derive(Debug, Args)]
struct LessonArgs {
    #[arg(long)]
    day: String,
    #[arg(long)]
    subject: String,
    /// HH:MM
    #[arg(long)]
    start: String,
    /// HH:MM
    #[arg(long)]
    end: String,
    /// Online or Offline.
    #[arg(long = "type", value_name = "TYPE")]
    lesson_type: Option<LessonType>,
    #[arg(long, default_value = "")]
    room: String,
    /// #RRGGBB
    #[arg(long)]
    color: Option<String>,
}

#[derive(Debug, Args)]
struct LessonPatch {
    #[arg(long)]
    day: Option<String>,
    #[arg(long)]
    subject: Option<String>,
    #[arg(long)]
    start: Option<String>,
    #[arg(long)]
    end: Option<String>,
    #[arg(long = "type", value_name = "TYPE")]
    lesson_type: Option<LessonType>,
    #[arg(long)]
    room: Option<String>,
    #[arg(long)]
    color: Option<String>,
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Print every setting (the default).
    Show,
    /// Print the settings file location.
    Path,
    /// Change one setting, e.g. `grid.days 5` or `language uk`.
    Set { key: String, value: String },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("weekgrid: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config_path = config::config_path(cli.config.as_deref())?;
    let data_dir = config::data_dir(cli.data_dir.as_deref())?;
    let durability = if cli.durable_writes {
        WriteDurability::Durable
    } else {
        WriteDurability::BestEffort
    };

    let command = cli.command.unwrap_or(Command::Tui { demo: false });
    // The TUI owns the terminal, so its logs go to a file.
    let _log_guard = match &command {
        Command::Tui { .. } => Some(init_file_tracing(&data_dir, cli.verbose)?),
        _ => {
            init_stderr_tracing(cli.verbose);
            None
        }
    };

    let mut settings = Settings::load(&config_path)?;
    debug!(config = %config_path.display(), data = %data_dir.display(), "paths resolved");
    let catalog = Catalog::new(settings.language);
    let mut store = LessonFile::new(&data_dir).with_durability(durability);

    match command {
        Command::Tui { demo: true } => tui::run_demo(settings),
        Command::Tui { demo: false } => tui::run(Box::new(store), settings, Some(config_path)),
        Command::Render(args) => render(&args, &settings, &catalog, &store),
        Command::List { day, json } => list(&store, day.as_deref(), json),
        Command::Add(args) => {
            let lesson = build_lesson(&args, &catalog)?;
            warn_if_unplaceable(&lesson, &settings);
            let id = store.insert(lesson)?;
            println!("{} ({id})", catalog.translate("app.lesson.added"));
            Ok(())
        }
        Command::Edit { id, fields } => {
            let current = store
                .get(id)?
                .ok_or_else(|| format!("lesson {id} not found"))?;
            let lesson = patch_lesson(current, &fields, &catalog)?;
            warn_if_unplaceable(&lesson, &settings);
            store.update(lesson)?;
            println!("{} ({id})", catalog.translate("app.lesson.updated"));
            Ok(())
        }
        Command::Remove { id } => {
            store.delete(id)?;
            println!("{} ({id})", catalog.translate("app.lesson.deleted"));
            Ok(())
        }
        Command::Import { file } => import(&mut store, &file, &catalog),
        Command::Export { file } => export(&store, &file, &catalog),
        Command::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => {
                println!("{settings}");
                Ok(())
            }
            ConfigAction::Path => {
                println!("{}", config_path.display());
                Ok(())
            }
            ConfigAction::Set { key, value } => {
                settings.set(&key, &value)?;
                // Reject a grid shape the viewer could not build before it is saved.
                settings.to_grid_config()?;
                settings.save(&config_path, durability)?;
                println!("{}", Catalog::new(settings.language).translate("app.settings.saved"));
                Ok(())
            }
        },
    }
}

fn env_filter(verbose: bool) -> EnvFilter {
    let level = if verbose { "debug" } else { "warn" };
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level))
}

fn init_stderr_tracing(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn init_file_tracing(
    data_dir: &Path,
    verbose: bool,
) -> Result<tracing_appender::non_blocking::WorkerGuard, Box<dyn Error>> {
    std::fs::create_dir_all(data_dir)?;
    let mut options = OpenOptions::new();
    options.create(true).append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let log_file = options.open(data_dir.join(TUI_LOG_FILE))?;
    let (writer, guard) = tracing_appender::non_blocking(log_file);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .try_init();
    Ok(guard)
}

fn render(
    args: &RenderArgs,
    settings: &Settings,
    catalog: &Catalog,
    store: &LessonFile,
) -> Result<(), Box<dyn Error>> {
    let lessons = match &args.file {
        Some(file) => format::import_file(file)?.1,
        None => store.list_lessons()?,
    };
    let grid = TimeGrid::new(settings.to_grid_config()?)?;
    let layout = layout_schedule_with_report(&lessons, &grid);
    let labels = WeekLabels::translated(&grid, catalog);
    let options = RenderOptions {
        day_width: args.day_width,
        crop_to_lessons: args.crop,
        show_room: !args.no_room,
    };
    let rendered = render_week_unicode(&layout, &grid, &labels, options)?;
    println!("{}", rendered.text);

    if !layout.skipped().is_empty() {
        eprintln!(
            "{} {}",
            layout.skipped().len(),
            catalog.translate("app.tui.skipped")
        );
    }
    for skipped in layout.skipped() {
        let lesson = &lessons[skipped.lesson_index];
        eprintln!(
            "  {} {} {}-{}: {}",
            lesson.subject, lesson.day, lesson.start_time, lesson.end_time, skipped.reason
        );
    }
    Ok(())
}

fn list(store: &LessonFile, day: Option<&str>, json: bool) -> Result<(), Box<dyn Error>> {
    let lessons = match day {
        Some(day) => store.lessons_on(day)?,
        None => store.list_lessons()?,
    };
    if json {
        print!("{}", format::encode_lessons(&lessons, Format::Json)?);
        return Ok(());
    }
    for lesson in &lessons {
        let id = lesson.id.map(|id| id.to_string()).unwrap_or_default();
        let lesson_type = lesson.lesson_type.map(LessonType::as_str).unwrap_or_default();
        println!(
            "{id:>4}  {:<12} {}-{}  {}  {}  {}",
            lesson.day, lesson.start_time, lesson.end_time, lesson.subject, lesson.room, lesson_type
        );
    }
    Ok(())
}

fn build_lesson(args: &LessonArgs, catalog: &Catalog) -> Result<Lesson, Box<dyn Error>> {
    let mut builder = Lesson::builder()
        .day(args.day.as_str())
        .subject(args.subject.as_str())
        .start_time(args.start.as_str())
        .end_time(args.end.as_str())
        .room(args.room.as_str());
    if let Some(lesson_type) = args.lesson_type {
        builder = builder.lesson_type(lesson_type);
    }
    if let Some(color) = &args.color {
        builder = builder.color(color.as_str());
    }
    builder
        .build()
        .map_err(|err| catalog.translate(err.translation_key()).into_owned().into())
}

fn patch_lesson(
    current: Lesson,
    patch: &LessonPatch,
    catalog: &Catalog,
) -> Result<Lesson, Box<dyn Error>> {
    let pick = |new: &Option<String>, old: &str| new.clone().unwrap_or_else(|| old.to_owned());
    let args = LessonArgs {
        day: pick(&patch.day, &current.day),
        subject: pick(&patch.subject, &current.subject),
        start: pick(&patch.start, &current.start_time),
        end: pick(&patch.end, &current.end_time),
        lesson_type: patch.lesson_type.or(current.lesson_type),
        room: pick(&patch.room, &current.room),
        color: patch
            .color
            .clone()
            .or_else(|| current.color.map(|color| color.to_string())),
    };
    let mut lesson = build_lesson(&args, catalog)?;
    lesson.id = current.id;
    Ok(lesson)
}

fn warn_if_unplaceable(lesson: &Lesson, settings: &Settings) {
    let Ok(config) = settings.to_grid_config() else {
        return;
    };
    let Ok(grid) = TimeGrid::new(config) else {
        return;
    };
    let lessons = std::slice::from_ref(lesson);
    let layout = layout_schedule_with_report(lessons, &grid);
    if let Some(skipped) = layout.skipped().first() {
        warn!(
            day = %lesson.day,
            start = %lesson.start_time,
            reason = %skipped.reason,
            "lesson will not show on the grid"
        );
        eprintln!("weekgrid: warning: lesson will not show on the grid ({})", skipped.reason);
    }
}

fn import(store: &mut LessonFile, file: &Path, catalog: &Catalog) -> Result<(), Box<dyn Error>> {
    let (format, lessons) = format::import_file(file).map_err(|err| {
        let format = Format::from_path(file).unwrap_or(Format::Csv);
        format!("{}: {err}", catalog.translate(err.translation_key(format)))
    })?;
    let count = store.replace_all(lessons)?;
    let key = match format {
        Format::Csv => "app.import.csv_success",
        Format::Json => "app.import.json_success",
    };
    println!("{} ({count})", catalog.translate(key));
    Ok(())
}

fn export(store: &LessonFile, file: &Path, catalog: &Catalog) -> Result<(), Box<dyn Error>> {
    let lessons = store.list_lessons()?;
    match format::export_file(file, &lessons) {
        Ok(format) => {
            let key = match format {
                Format::Csv => "app.export.csv_success",
                Format::Json => "app.export.json_success",
            };
            println!("{} ({})", catalog.translate(key), file.display());
            Ok(())
        }
        Err(format::ExportError::NoData) => {
            Err(catalog.translate("app.export.no_data").into_owned().into())
        }
        Err(err) => Err(err.into()),
    }
}
