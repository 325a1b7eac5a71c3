// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persisted user settings.
//!
//! Settings live in a TOML file. The location is resolved in this order:
//! 1. `--config <file>`
//! 2. `$WEEKGRID_CONFIG`
//! 3. `<config dir>/weekgrid/config.toml`
//!
//! The data directory (lesson file, TUI log) follows the same pattern with `--data-dir`,
//! `$WEEKGRID_DATA` and `<data dir>/weekgrid`.

use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::grid::{
    GridConfig, GridConfigError, WeekLength, DEFAULT_END_HOUR, DEFAULT_GRANULARITY_MINUTES,
    DEFAULT_START_HOUR,
};
use crate::i18n::Language;
use crate::render::metrics::DEFAULT_SLOT_HEIGHT_PX;
use crate::store::atomic::write_atomic;
use crate::store::{StoreError, WriteDurability};

pub const CONFIG_ENV: &str = "WEEKGRID_CONFIG";
pub const DATA_ENV: &str = "WEEKGRID_DATA";
pub const APP_DIR_NAME: &str = "weekgrid";
pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Daily,
    Weekly,
}

impl ViewMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridSettings {
    pub granularity_minutes: u16,
    pub start_hour: u8,
    pub end_hour: u8,
    /// 5 (Monday to Friday) or 7.
    pub days: u8,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            granularity_minutes: DEFAULT_GRANULARITY_MINUTES,
            start_hour: DEFAULT_START_HOUR,
            end_hour: DEFAULT_END_HOUR,
            days: 7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub theme: ThemeMode,
    pub language: Language,
    pub notifications: bool,
    pub view_mode: ViewMode,
    /// Pixel height of one slot row.
    pub slot_height: u32,
    pub grid: GridSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: ThemeMode::Dark,
            language: Language::En,
            notifications: true,
            view_mode: ViewMode::Daily,
            slot_height: DEFAULT_SLOT_HEIGHT_PX,
            grid: GridSettings::default(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("cannot read settings {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed settings {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("cannot encode settings: {source}")]
    Encode {
        #[source]
        source: toml::ser::Error,
    },
    #[error(transparent)]
    Write(#[from] StoreError),
    #[error("grid.days must be 5 or 7, got {days}")]
    DayCount { days: u8 },
    #[error(transparent)]
    Grid(#[from] GridConfigError),
    #[error("no {kind} directory available on this platform; pass a path explicitly")]
    NoPlatformDir { kind: &'static str },
    #[error("unknown setting {key:?}")]
    UnknownKey { key: String },
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
}

impl Settings {
    /// Reads settings from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(source) if source.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no settings file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        toml::from_str(&raw).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self, path: &Path, durability: WriteDurability) -> Result<(), SettingsError> {
        let encoded = toml::to_string_pretty(self).map_err(|source| SettingsError::Encode { source })?;
        write_atomic(path, encoded.as_bytes(), durability)?;
        info!(path = %path.display(), "settings saved");
        Ok(())
    }

    /// Grid shape for [`crate::grid::TimeGrid::new`], validated.
    pub fn to_grid_config(&self) -> Result<GridConfig, SettingsError> {
        let days = self.grid.days;
        let week = WeekLength::from_day_count(usize::from(days))
            .ok_or(SettingsError::DayCount { days })?;
        let config = GridConfig {
            granularity_minutes: self.grid.granularity_minutes,
            start_hour: self.grid.start_hour,
            end_hour: self.grid.end_hour,
            week,
            slot_lookup: None,
        };
        config.validate()?;
        Ok(config)
    }

    /// Updates one setting addressed by its TOML key (`grid.days`, `theme`, ...).
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        match key {
            "theme" => self.theme = parse_value("theme", value)?,
            "language" => self.language = parse_value("language", value)?,
            "notifications" => self.notifications = parse_value("notifications", value)?,
            "view_mode" => self.view_mode = parse_value("view_mode", value)?,
            "slot_height" => self.slot_height = parse_value("slot_height", value)?,
            "grid.granularity_minutes" => {
                self.grid.granularity_minutes = parse_value("grid.granularity_minutes", value)?
            }
            "grid.start_hour" => self.grid.start_hour = parse_value("grid.start_hour", value)?,
            "grid.end_hour" => self.grid.end_hour = parse_value("grid.end_hour", value)?,
            "grid.days" => self.grid.days = parse_value("grid.days", value)?,
            _ => {
                return Err(SettingsError::UnknownKey {
                    key: key.to_owned(),
                })
            }
        }
        Ok(())
    }
}

fn parse_value<T: FromStr>(key: &'static str, value: &str) -> Result<T, SettingsError> {
    value.trim().parse().map_err(|_| SettingsError::InvalidValue {
        key,
        value: value.to_owned(),
    })
}

impl FromStr for ThemeMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            _ => Err(()),
        }
    }
}

impl FromStr for ViewMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "theme = {}", self.theme.as_str())?;
        writeln!(f, "language = {}", self.language.code())?;
        writeln!(f, "notifications = {}", self.notifications)?;
        writeln!(f, "view_mode = {}", self.view_mode.as_str())?;
        writeln!(f, "slot_height = {}", self.slot_height)?;
        writeln!(f, "grid.granularity_minutes = {}", self.grid.granularity_minutes)?;
        writeln!(f, "grid.start_hour = {}", self.grid.start_hour)?;
        writeln!(f, "grid.end_hour = {}", self.grid.end_hour)?;
        write!(f, "grid.days = {}", self.grid.days)
    }
}

/// Settings file location: explicit flag, then `$WEEKGRID_CONFIG`, then the platform config dir.
pub fn config_path(flag: Option<&Path>) -> Result<PathBuf, SettingsError> {
    resolve_path(
        flag,
        std::env::var_os(CONFIG_ENV),
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME)),
        "config",
    )
}

/// Data directory: explicit flag, then `$WEEKGRID_DATA`, then the platform data dir.
pub fn data_dir(flag: Option<&Path>) -> Result<PathBuf, SettingsError> {
    resolve_path(
        flag,
        std::env::var_os(DATA_ENV),
        dirs::data_dir().map(|dir| dir.join(APP_DIR_NAME)),
        "data",
    )
}

fn resolve_path(
    flag: Option<&Path>,
    env: Option<OsString>,
    platform: Option<PathBuf>,
    kind: &'static str,
) -> Result<PathBuf, SettingsError> {
    if let Some(flag) = flag {
        return Ok(flag.to_path_buf());
    }
    if let Some(env) = env.filter(|value| !value.is_empty()) {
        return Ok(PathBuf::from(env));
    }
    platform.ok_or(SettingsError::NoPlatformDir { kind })
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;
    use std::fs;
    use std::path::{Path, PathBuf};

    use rstest::rstest;

    use super::{resolve_path, Settings, SettingsError, ThemeMode, ViewMode};
    use crate::grid::{TimeGrid, WeekLength};
    use crate::i18n::Language;
    use crate::store::WriteDurability;
    use crate::test_support::TempDir;

    #[test]
    fn defaults_match_the_first_run_experience() {
        let settings = Settings::default();
        assert_eq!(settings.theme, ThemeMode::Dark);
        assert_eq!(settings.language, Language::En);
        assert!(settings.notifications);
        assert_eq!(settings.view_mode, ViewMode::Daily);
        assert_eq!(settings.slot_height, 60);

        let grid = TimeGrid::new(settings.to_grid_config().expect("grid")).expect("grid");
        assert_eq!(grid.slot_count(), 276);
        assert_eq!(grid.day_count(), 7);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let tmp = TempDir::new("settings-missing");
        let settings = Settings::load(&tmp.path().join("config.toml")).expect("load");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn partial_file_keeps_defaults_for_the_rest() {
        let tmp = TempDir::new("settings-partial");
        let path = tmp.path().join("config.toml");
        fs::write(&path, "language = \"ukr\"\n\n[grid]\ngranularity_minutes = 60\nend_hour = 24\ndays = 5\n")
            .expect("seed");
        let settings = Settings::load(&path).expect("load");
        assert_eq!(settings.language, Language::Uk);
        assert_eq!(settings.theme, ThemeMode::Dark);
        assert_eq!(settings.grid.start_hour, 0);

        let config = settings.to_grid_config().expect("grid");
        assert_eq!(config.week, WeekLength::Workweek);
        assert_eq!(TimeGrid::new(config).expect("grid").slot_count(), 24);
    }

    #[rstest]
    #[case("theme = \"sepia\"\n")]
    #[case("colour = \"dark\"\n")]
    #[case("[grid\n")]
    fn malformed_file_is_an_error(#[case] body: &str) {
        let tmp = TempDir::new("settings-malformed");
        let path = tmp.path().join("config.toml");
        fs::write(&path, body).expect("seed");
        assert!(matches!(Settings::load(&path), Err(SettingsError::Parse { .. })));
    }

    #[test]
    fn save_then_load_keeps_every_field() {
        let tmp = TempDir::new("settings-save");
        let path = tmp.path().join("nested").join("config.toml");
        let mut settings = Settings::default();
        settings.theme = ThemeMode::Light;
        settings.language = Language::Pl;
        settings.notifications = false;
        settings.grid.days = 5;
        settings.save(&path, WriteDurability::BestEffort).expect("save");
        assert_eq!(Settings::load(&path).expect("load"), settings);
    }

    #[rstest]
    #[case(6, 5, 23)]
    #[case(7, 0, 23)]
    #[case(5, 10, 9)]
    fn invalid_grid_shape_is_rejected(#[case] days: u8, #[case] granularity: u16, #[case] end: u8) {
        let mut settings = Settings::default();
        settings.grid.days = days;
        settings.grid.granularity_minutes = granularity;
        settings.grid.start_hour = 10;
        settings.grid.end_hour = end;
        assert!(settings.to_grid_config().is_err());
    }

    #[test]
    fn set_addresses_nested_keys() {
        let mut settings = Settings::default();
        settings.set("grid.days", "5").expect("days");
        settings.set("theme", "Light").expect("theme");
        settings.set("notifications", "false").expect("notifications");
        assert_eq!(settings.grid.days, 5);
        assert_eq!(settings.theme, ThemeMode::Light);
        assert!(!settings.notifications);

        assert!(matches!(settings.set("font", "x"), Err(SettingsError::UnknownKey { .. })));
        assert!(matches!(
            settings.set("slot_height", "tall"),
            Err(SettingsError::InvalidValue { key: "slot_height", .. })
        ));
    }

    #[test]
    fn display_lists_keys_accepted_by_set() {
        let settings = Settings::default();
        let mut copy = Settings::default();
        for line in settings.to_string().lines() {
            let (key, value) = line.split_once(" = ").expect("pair");
            copy.set(key, value).expect("set");
        }
        assert_eq!(copy, settings);
    }

    #[test]
    fn paths_prefer_flag_then_env_then_platform() {
        let platform = Some(PathBuf::from("/platform/weekgrid"));
        let env = Some(OsString::from("/env/weekgrid"));

        let from_flag =
            resolve_path(Some(Path::new("/flag")), env.clone(), platform.clone(), "data");
        assert_eq!(from_flag.expect("flag"), PathBuf::from("/flag"));

        let from_env = resolve_path(None, env, platform.clone(), "data");
        assert_eq!(from_env.expect("env"), PathBuf::from("/env/weekgrid"));

        let empty_env = resolve_path(None, Some(OsString::new()), platform, "data");
        assert_eq!(empty_env.expect("platform"), PathBuf::from("/platform/weekgrid"));

        assert!(matches!(
            resolve_path(None, None, None, "data"),
            Err(SettingsError::NoPlatformDir { kind: "data" })
        ));
    }
}
