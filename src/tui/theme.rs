// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::env;

use ratatui::style::{Color, Modifier, Style};

use crate::config::ThemeMode;
use crate::model::HexColor;

pub const PALETTE_ENV: &str = "WEEKGRID_PALETTE";

#[derive(Debug, Clone)]
pub(crate) struct TuiTheme {
    mode: ThemeMode,
    palette: Option<TuiPalette>,
}

impl TuiTheme {
    pub(crate) fn new(mode: ThemeMode) -> Self {
        Self {
            mode,
            palette: None,
        }
    }

    /// Theme for `mode` with the `WEEKGRID_PALETTE` override applied when set.
    pub(crate) fn from_env(mode: ThemeMode) -> Result<Self, ThemeError> {
        let palette = palette_override_from_env()?;
        Ok(Self { mode, palette })
    }

    pub(crate) fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Switches between dark and light; a palette override stays in effect.
    pub(crate) fn set_mode(&mut self, mode: ThemeMode) {
        self.mode = mode;
    }

    pub(crate) fn base_style(&self) -> Style {
        match (&self.palette, self.mode) {
            (Some(palette), _) => Style::default().fg(palette.fg).bg(palette.bg),
            (None, ThemeMode::Dark) => Style::default().fg(Color::Gray).bg(Color::Black),
            (None, ThemeMode::Light) => Style::default().fg(Color::Black).bg(Color::White),
        }
    }

    fn ansi_color(&self, color: Ansi16) -> Color {
        match &self.palette {
            Some(palette) => palette.ansi_color(color.idx()),
            None => color.into(),
        }
    }

    pub(crate) fn panel_border_style(&self, focused: bool) -> Style {
        if focused {
            let accent = match self.mode {
                ThemeMode::Dark => Ansi16::Cyan,
                ThemeMode::Light => Ansi16::Blue,
            };
            self.base_style().fg(self.ansi_color(accent))
        } else {
            self.base_style()
        }
    }

    pub(crate) fn selection_style(&self) -> Style {
        self.base_style().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    }

    pub(crate) fn error_style(&self) -> Style {
        self.base_style().fg(self.ansi_color(Ansi16::Red))
    }

    pub(crate) fn muted_style(&self) -> Style {
        let muted = match self.mode {
            ThemeMode::Dark => Ansi16::BrightBlack,
            ThemeMode::Light => Ansi16::White,
        };
        self.base_style().fg(self.ansi_color(muted))
    }

    pub(crate) fn key_style(&self) -> Style {
        self.base_style()
            .fg(self.ansi_color(Ansi16::Cyan))
            .add_modifier(Modifier::BOLD)
    }

    /// Cells of a lesson block are drawn in the lesson's own color.
    pub(crate) fn lesson_style(&self, color: HexColor) -> Style {
        let (r, g, b) = color.rgb();
        self.base_style().fg(Color::Rgb(r, g, b))
    }

    pub(crate) fn selected_lesson_style(&self, color: HexColor) -> Style {
        let (r, g, b) = color.rgb();
        let text = match self.mode {
            ThemeMode::Dark => Color::Black,
            ThemeMode::Light => Color::White,
        };
        self.base_style()
            .fg(text)
            .bg(Color::Rgb(r, g, b))
            .add_modifier(Modifier::BOLD)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct TuiPalette {
    fg: Color,
    bg: Color,
    ansi: [Color; 16],
}

impl TuiPalette {
    const CSV_LEN: usize = 18;

    fn parse_csv(value: &str) -> Result<Self, String> {
        let parts: Vec<&str> = value.split(',').map(str::trim).collect();
        if parts.len() != Self::CSV_LEN {
            return Err(format!(
                "expected {} comma-separated colors (fg,bg,black,red,green,yellow,blue,magenta,cyan,white,bright_black,bright_red,bright_green,bright_yellow,bright_blue,bright_magenta,bright_cyan,bright_white), got {}",
                Self::CSV_LEN,
                parts.len()
            ));
        }

        let fg = parse_palette_color(parts[0])?;
        let bg = parse_palette_color(parts[1])?;

        let mut ansi = [Color::Reset; 16];
        for (idx, part) in parts.iter().skip(2).enumerate() {
            ansi[idx] = parse_palette_color(part)?;
        }

        Ok(Self { fg, bg, ansi })
    }

    fn ansi_color(&self, idx: usize) -> Color {
        self.ansi[idx]
    }
}

fn palette_override_from_env() -> Result<Option<TuiPalette>, ThemeError> {
    let value = match env::var(PALETTE_ENV) {
        Ok(value) => value,
        Err(env::VarError::NotPresent) => return Ok(None),
        Err(env::VarError::NotUnicode(_)) => {
            return Err(ThemeError::InvalidEnv {
                name: PALETTE_ENV,
                value: "<non-unicode>".to_owned(),
            });
        }
    };
    palette_override(&value)
}

fn palette_override(value: &str) -> Result<Option<TuiPalette>, ThemeError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let parsed = TuiPalette::parse_csv(trimmed).map_err(|error| ThemeError::InvalidEnv {
        name: PALETTE_ENV,
        value: format!("{trimmed} ({error})"),
    })?;
    Ok(Some(parsed))
}

/// Accepts `#RRGGBB`, `0xRRGGBB`, bare `RRGGBB` and X11 `rgb:RR/GG/BB` (2 or 4 hex digits).
fn parse_palette_color(value: &str) -> Result<Color, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("empty color".to_owned());
    }

    let lower = trimmed.to_ascii_lowercase();
    if let Some(rest) = lower.strip_prefix("rgb:") {
        let parts: Vec<&str> = rest.split('/').collect();
        if parts.len() != 3 {
            return Err(format!("invalid rgb: value: {trimmed}"));
        }
        let r = parse_hex_channel(parts[0])?;
        let g = parse_hex_channel(parts[1])?;
        let b = parse_hex_channel(parts[2])?;
        return Ok(Color::Rgb(r, g, b));
    }

    let hex = lower
        .strip_prefix('#')
        .or_else(|| lower.strip_prefix("0x"))
        .unwrap_or(&lower);
    let color = format!("#{hex}")
        .parse::<HexColor>()
        .map_err(|_| format!("invalid hex color: {trimmed} (expected #RRGGBB)"))?;
    let (r, g, b) = color.rgb();
    Ok(Color::Rgb(r, g, b))
}

fn parse_hex_channel(value: &str) -> Result<u8, String> {
    let value = value.trim();
    match value.len() {
        2 => u8::from_str_radix(value, 16).map_err(|_| format!("invalid rgb: component {value}")),
        4 => u16::from_str_radix(value, 16)
            .map(|wide| (wide >> 8) as u8)
            .map_err(|_| format!("invalid rgb: component {value}")),
        _ => Err(format!(
            "invalid rgb: component {value} (expected 2 or 4 hex digits)"
        )),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ansi16 {
    Red,
    Blue,
    Cyan,
    White,
    BrightBlack,
}

impl Ansi16 {
    const fn idx(self) -> usize {
        match self {
            Self::Red => 1,
            Self::Blue => 4,
            Self::Cyan => 6,
            Self::White => 7,
            Self::BrightBlack => 8,
        }
    }
}

impl From<Ansi16> for Color {
    fn from(value: Ansi16) -> Self {
        match value {
            Ansi16::Red => Color::Red,
            Ansi16::Blue => Color::Blue,
            Ansi16::Cyan => Color::Cyan,
            Ansi16::White => Color::Gray,
            Ansi16::BrightBlack => Color::DarkGray,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ThemeError {
    #[error("invalid env {name}={value}")]
    InvalidEnv { name: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use ratatui::style::{Color, Modifier};
    use rstest::rstest;

    use super::{palette_override, parse_palette_color, ThemeError, TuiPalette, TuiTheme};
    use crate::config::ThemeMode;
    use crate::model::HexColor;

    const PALETTE: &str = "#111111,#222222,#000000,#ff0000,#00ff00,#ffff00,#0000ff,#ff00ff,#00ffff,#ffffff,#1a1a1a,#ff1111,#11ff11,#ffff11,#1111ff,#ff11ff,#11ffff,#fefefe";

    #[test]
    fn palette_override_parses_valid_csv() {
        let palette = TuiPalette::parse_csv(PALETTE).expect("palette");
        assert_eq!(palette.fg, Color::Rgb(0x11, 0x11, 0x11));
        assert_eq!(palette.bg, Color::Rgb(0x22, 0x22, 0x22));
        assert_eq!(palette.ansi_color(1), Color::Rgb(0xff, 0, 0));
        assert_eq!(palette.ansi_color(15), Color::Rgb(0xfe, 0xfe, 0xfe));
    }

    #[test]
    fn palette_override_rejects_wrong_length() {
        let err = palette_override("#111111,#222222").unwrap_err();
        let ThemeError::InvalidEnv { name, value } = err;
        assert_eq!(name, "WEEKGRID_PALETTE");
        assert!(value.contains("expected 18"));
        assert_eq!(palette_override("   ").expect("blank"), None);
    }

    #[rstest]
    #[case("#00a7e5", Color::Rgb(0x00, 0xa7, 0xe5))]
    #[case("0X00A7E5", Color::Rgb(0x00, 0xa7, 0xe5))]
    #[case("00a7e5", Color::Rgb(0x00, 0xa7, 0xe5))]
    #[case("rgb:ff/80/00", Color::Rgb(0xff, 0x80, 0x00))]
    #[case("rgb:ffff/8080/0000", Color::Rgb(0xff, 0x80, 0x00))]
    fn palette_colors_accept_common_notations(#[case] raw: &str, #[case] expected: Color) {
        assert_eq!(parse_palette_color(raw).expect("color"), expected);
    }

    #[rstest]
    #[case("")]
    #[case("#12345")]
    #[case("rgb:ff/ff")]
    #[case("blue")]
    fn palette_colors_reject_garbage(#[case] raw: &str) {
        assert!(parse_palette_color(raw).is_err());
    }

    #[test]
    fn modes_differ_without_override() {
        let dark = TuiTheme::new(ThemeMode::Dark);
        let mut light = TuiTheme::new(ThemeMode::Light);
        assert_ne!(dark.base_style(), light.base_style());
        light.set_mode(ThemeMode::Dark);
        assert_eq!(dark.base_style(), light.base_style());
    }

    #[test]
    fn lesson_blocks_use_the_lesson_color() {
        let theme = TuiTheme::new(ThemeMode::Dark);
        let color = HexColor::from_rgb(0xe4, 0x01, 0x73);
        assert_eq!(theme.lesson_style(color).fg, Some(Color::Rgb(0xe4, 0x01, 0x73)));
        let selected = theme.selected_lesson_style(color);
        assert_eq!(selected.bg, Some(Color::Rgb(0xe4, 0x01, 0x73)));
        assert!(selected.add_modifier.contains(Modifier::BOLD));
    }
}
