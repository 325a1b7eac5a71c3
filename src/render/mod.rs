// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Weekgrid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Weekgrid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Text rendering of a laid-out week.
//!
//! The renderer draws onto a bounds-checked character [`Canvas`] and returns the text together
//! with a highlight index, so the TUI can paint or select a lesson block cell-accurately.

use std::collections::BTreeMap;
use std::fmt;

pub mod metrics;
mod text;
pub mod week;

pub use metrics::{block_height_px, grid_min_size_px, PixelMetrics};
pub use week::{render_week_unicode, RenderOptions, WeekLabels, DEFAULT_DAY_WIDTH};

/// A contiguous span of cells within one rendered line.
///
/// Coordinates are `(y, x0, x1)` in character-cell indices, inclusive.
pub type LineSpan = (usize, usize, usize);

/// Placement index (position in the layout's placement list) to the cells its block covers.
pub type HighlightIndex = BTreeMap<usize, Vec<LineSpan>>;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnnotatedRender {
    pub text: String,
    pub highlight_index: HighlightIndex,
}

impl AnnotatedRender {
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }

    pub fn spans_for(&self, placement_index: usize) -> &[LineSpan] {
        self.highlight_index
            .get(&placement_index)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

pub const UNICODE_BOX_HORIZONTAL: char = '─';
pub const UNICODE_BOX_VERTICAL: char = '│';
pub const UNICODE_BOX_TOP_LEFT: char = '┌';
pub const UNICODE_BOX_TOP_RIGHT: char = '┐';
pub const UNICODE_BOX_BOTTOM_LEFT: char = '└';
pub const UNICODE_BOX_BOTTOM_RIGHT: char = '┘';
pub const UNICODE_BOX_TEE_RIGHT: char = '├';
pub const UNICODE_BOX_TEE_LEFT: char = '┤';
pub const UNICODE_BOX_TEE_DOWN: char = '┬';
pub const UNICODE_BOX_TEE_UP: char = '┴';
pub const UNICODE_BOX_CROSS: char = '┼';

/// Directions a box-drawing cell connects to, one bit each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Edges(u8);

impl Edges {
    const LEFT: Self = Self(0b0001);
    const RIGHT: Self = Self(0b0010);
    const UP: Self = Self(0b0100);
    const DOWN: Self = Self(0b1000);
    const HORIZONTAL: Self = Self(0b0011);
    const VERTICAL: Self = Self(0b1100);

    fn is_empty(self) -> bool {
        self.0 == 0
    }

    fn has(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    fn with(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    fn of_char(ch: char) -> Option<Self> {
        let bits = match ch {
            UNICODE_BOX_HORIZONTAL => Self::HORIZONTAL.0,
            UNICODE_BOX_VERTICAL => Self::VERTICAL.0,
            UNICODE_BOX_TOP_LEFT => 0b1010,
            UNICODE_BOX_TOP_RIGHT => 0b1001,
            UNICODE_BOX_BOTTOM_LEFT => 0b0110,
            UNICODE_BOX_BOTTOM_RIGHT => 0b0101,
            UNICODE_BOX_TEE_RIGHT => 0b1110,
            UNICODE_BOX_TEE_LEFT => 0b1101,
            UNICODE_BOX_TEE_DOWN => 0b1011,
            UNICODE_BOX_TEE_UP => 0b0111,
            UNICODE_BOX_CROSS => 0b1111,
            _ => return None,
        };
        Some(Self(bits))
    }

    fn to_char(self) -> char {
        match self.0 {
            0 => ' ',
            1..=3 => UNICODE_BOX_HORIZONTAL,
            4 | 8 | 12 => UNICODE_BOX_VERTICAL,
            10 => UNICODE_BOX_TOP_LEFT,
            9 => UNICODE_BOX_TOP_RIGHT,
            6 => UNICODE_BOX_BOTTOM_LEFT,
            5 => UNICODE_BOX_BOTTOM_RIGHT,
            14 => UNICODE_BOX_TEE_RIGHT,
            13 => UNICODE_BOX_TEE_LEFT,
            11 => UNICODE_BOX_TEE_DOWN,
            7 => UNICODE_BOX_TEE_UP,
            _ => UNICODE_BOX_CROSS,
        }
    }
}

/// A fixed-size, bounds-checked character grid.
///
/// Plain characters overwrite whatever was in the cell (last writer wins). Box-drawing characters
/// merge with the lines already present, so crossing table rules become `┼`, `├`, `┬` and friends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<char>,
    edges: Vec<Edges>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Result<Self, CanvasError> {
        Self::new_filled(width, height, ' ')
    }

    pub fn new_filled(width: usize, height: usize, fill: char) -> Result<Self, CanvasError> {
        let len = width
            .checked_mul(height)
            .ok_or(CanvasError::AreaOverflow { width, height })?;

        Ok(Self {
            width,
            height,
            cells: vec![fill; len],
            edges: vec![Edges::default(); len],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Result<char, CanvasError> {
        let idx = self.index_of(x, y)?;
        Ok(self.render_at(x, y, idx))
    }

    pub fn set(&mut self, x: usize, y: usize, ch: char) -> Result<(), CanvasError> {
        let idx = self.index_of(x, y)?;
        match Edges::of_char(ch) {
            Some(edges) => self.edges[idx] = self.edges[idx].with(edges),
            None => {
                self.cells[idx] = ch;
                self.edges[idx] = Edges::default();
            }
        }
        Ok(())
    }

    /// Writes `text` left to right from `(x, y)`, clipping at the right edge.
    pub fn write_str(&mut self, x: usize, y: usize, text: &str) -> Result<(), CanvasError> {
        if y >= self.height {
            return Err(self.out_of_bounds(x, y));
        }
        for (offset, ch) in text.chars().enumerate() {
            let cx = x + offset;
            if cx >= self.width {
                break;
            }
            self.set(cx, y, ch)?;
        }
        Ok(())
    }

    /// Overwrites the rectangle `x0..=x1` by `y0..=y1` with `ch`.
    pub fn fill_rect(
        &mut self,
        x0: usize,
        y0: usize,
        x1: usize,
        y1: usize,
        ch: char,
    ) -> Result<(), CanvasError> {
        self.check_rect(x0, y0, x1, y1)?;
        for y in y0.min(y1)..=y0.max(y1) {
            for x in x0.min(x1)..=x0.max(x1) {
                self.set(x, y, ch)?;
            }
        }
        Ok(())
    }

    pub fn draw_hline(&mut self, x0: usize, x1: usize, y: usize) -> Result<(), CanvasError> {
        self.check_rect(x0, y, x1, y)?;
        for x in x0.min(x1)..=x0.max(x1) {
            self.set(x, y, UNICODE_BOX_HORIZONTAL)?;
        }
        Ok(())
    }

    pub fn draw_vline(&mut self, x: usize, y0: usize, y1: usize) -> Result<(), CanvasError> {
        self.check_rect(x, y0, x, y1)?;
        for y in y0.min(y1)..=y0.max(y1) {
            self.set(x, y, UNICODE_BOX_VERTICAL)?;
        }
        Ok(())
    }

    /// Draws a single-line frame with corners at `(x0, y0)` and `(x1, y1)`.
    ///
    /// Nothing is drawn when any corner is out of bounds.
    pub fn draw_box(
        &mut self,
        x0: usize,
        y0: usize,
        x1: usize,
        y1: usize,
    ) -> Result<(), CanvasError> {
        self.check_rect(x0, y0, x1, y1)?;
        let (left, right) = (x0.min(x1), x0.max(x1));
        let (top, bottom) = (y0.min(y1), y0.max(y1));

        if top == bottom {
            return self.draw_hline(left, right, top);
        }
        if left == right {
            return self.draw_vline(left, top, bottom);
        }

        for x in (left + 1)..right {
            self.set(x, top, UNICODE_BOX_HORIZONTAL)?;
            self.set(x, bottom, UNICODE_BOX_HORIZONTAL)?;
        }
        for y in (top + 1)..bottom {
            self.set(left, y, UNICODE_BOX_VERTICAL)?;
            self.set(right, y, UNICODE_BOX_VERTICAL)?;
        }
        self.set(left, top, UNICODE_BOX_TOP_LEFT)?;
        self.set(right, top, UNICODE_BOX_TOP_RIGHT)?;
        self.set(left, bottom, UNICODE_BOX_BOTTOM_LEFT)?;
        self.set(right, bottom, UNICODE_BOX_BOTTOM_RIGHT)?;
        Ok(())
    }

    fn check_rect(&self, x0: usize, y0: usize, x1: usize, y1: usize) -> Result<(), CanvasError> {
        let (max_x, max_y) = (x0.max(x1), y0.max(y1));
        if max_x >= self.width {
            return Err(self.out_of_bounds(max_x, y0.min(y1)));
        }
        if max_y >= self.height {
            return Err(self.out_of_bounds(x0.min(x1), max_y));
        }
        Ok(())
    }

    fn out_of_bounds(&self, x: usize, y: usize) -> CanvasError {
        CanvasError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }

    fn index_of(&self, x: usize, y: usize) -> Result<usize, CanvasError> {
        if !self.in_bounds(x, y) {
            return Err(self.out_of_bounds(x, y));
        }
        Ok((y * self.width) + x)
    }

    fn render_at(&self, x: usize, y: usize, idx: usize) -> char {
        let edges = self.edges[idx];
        if edges.is_empty() {
            return self.cells[idx];
        }
        let connected = self.connected_edges(x, y, edges);
        if connected.is_empty() {
            edges.to_char()
        } else {
            connected.to_char()
        }
    }

    /// Keeps only the directions that meet a matching edge in the neighbouring cell.
    fn connected_edges(&self, x: usize, y: usize, edges: Edges) -> Edges {
        let neighbours = [
            (Edges::LEFT, x.checked_sub(1).map(|nx| (nx, y)), Edges::RIGHT),
            (Edges::RIGHT, Some((x + 1, y)), Edges::LEFT),
            (Edges::UP, y.checked_sub(1).map(|ny| (x, ny)), Edges::DOWN),
            (Edges::DOWN, Some((x, y + 1)), Edges::UP),
        ];

        let mut connected = Edges::default();
        for (direction, neighbour, facing) in neighbours {
            let Some((nx, ny)) = neighbour else {
                continue;
            };
            if !edges.has(direction) || !self.in_bounds(nx, ny) {
                continue;
            }
            if self.edges[(ny * self.width) + nx].has(facing) {
                connected = connected.with(direction);
            }
        }
        connected
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use std::fmt::Write as _;

        for y in 0..self.height {
            for x in 0..self.width {
                f.write_char(self.render_at(x, y, (y * self.width) + x))?;
            }
            if y + 1 < self.height {
                f.write_char('\n')?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CanvasError {
    #[error("canvas area overflow: {width}*{height}")]
    AreaOverflow { width: usize, height: usize },
    #[error("out of bounds: ({x},{y}) for {width}x{height} canvas")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::{AnnotatedRender, Canvas, CanvasError, Edges};

    #[test]
    fn set_and_get_in_bounds() {
        let mut c = Canvas::new_filled(3, 2, '.').expect("canvas");
        c.set(1, 0, 'X').expect("set");
        assert_eq!(c.get(1, 0), Ok('X'));
        assert_eq!(c.to_string(), ".X.\n...");
    }

    #[test]
    fn out_of_bounds_access_is_an_error() {
        let mut c = Canvas::new(2, 2).expect("canvas");
        assert_eq!(
            c.set(2, 0, 'X'),
            Err(CanvasError::OutOfBounds {
                x: 2,
                y: 0,
                width: 2,
                height: 2
            })
        );
        assert!(c.get(0, 2).is_err());
        assert!(c.write_str(0, 5, "x").is_err());
    }

    #[test]
    fn rejects_area_overflow() {
        assert_eq!(
            Canvas::new_filled(usize::MAX, 2, '.'),
            Err(CanvasError::AreaOverflow {
                width: usize::MAX,
                height: 2
            })
        );
    }

    #[test]
    fn write_str_clips_at_right_edge() {
        let mut c = Canvas::new_filled(4, 1, '.').expect("canvas");
        c.write_str(2, 0, "Środa").expect("write");
        assert_eq!(c.to_string(), "..Śr");
    }

    #[test]
    fn plain_text_overwrites_box_cells() {
        let mut c = Canvas::new_filled(3, 1, '.').expect("canvas");
        c.draw_hline(0, 2, 0).expect("line");
        c.fill_rect(1, 0, 1, 0, 'M').expect("fill");
        assert_eq!(c.to_string(), "─M─");
    }

    #[test]
    fn table_rules_merge_into_junctions() {
        let mut c = Canvas::new_filled(5, 5, '.').expect("canvas");
        c.draw_box(0, 0, 4, 4).expect("box");
        c.draw_hline(0, 4, 2).expect("rule");
        c.draw_vline(2, 0, 4).expect("column");
        assert_eq!(c.to_string(), "┌─┬─┐\n│.│.│\n├─┼─┤\n│.│.│\n└─┴─┘");
    }

    #[test]
    fn draw_box_out_of_bounds_draws_nothing() {
        let mut c = Canvas::new_filled(4, 3, '.').expect("canvas");
        assert!(c.draw_box(0, 0, 4, 2).is_err());
        assert_eq!(c.to_string(), "....\n....\n....");
    }

    #[test]
    fn edge_bits_round_trip_through_chars() {
        for ch in ['─', '│', '┌', '┐', '└', '┘', '├', '┤', '┬', '┴', '┼'] {
            let edges = Edges::of_char(ch).expect("box char");
            assert_eq!(edges.to_char(), ch);
        }
        assert_eq!(Edges::HORIZONTAL.with(Edges::VERTICAL).to_char(), '┼');
    }

    #[test]
    fn spans_for_unknown_placement_is_empty() {
        assert!(AnnotatedRender::default().spans_for(3).is_empty());
    }
}
