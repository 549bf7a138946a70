//! Character-grid canvas for terminals and tests
//!
//! Each cell covers a 16×24 pixel block of the 800×720 play area, giving a
//! 50×30 grid. Shapes are rasterised by cell centre; colors from the scene
//! palette map to fixed glyphs.

use std::fmt;

use glam::Vec2;

use super::{Canvas, Color, palette};
use crate::consts::{SCREEN_H, SCREEN_W};
use crate::sim::Rect;

pub const CELL_W: f32 = 16.0;
pub const CELL_H: f32 = 24.0;
pub const COLS: usize = (SCREEN_W / CELL_W) as usize;
pub const ROWS: usize = (SCREEN_H / CELL_H) as usize;

/// Glyph drawn for a palette color
fn glyph_for(color: Color) -> char {
    const GLYPHS: [(Color, char); 10] = [
        (palette::FLOOR, '#'),
        (palette::GIRDER, '='),
        (palette::LADDER, 'H'),
        (palette::GOAL, 'A'),
        (palette::BARREL, 'o'),
        (palette::PLAYER, '@'),
        (palette::PLAYER_ARMED, '&'),
        (palette::PICKUP, 'T'),
        (palette::BACKGROUND, ' '),
        (palette::OVERLAY, ' '),
    ];
    GLYPHS
        .iter()
        .find(|(c, _)| *c == color)
        .map(|(_, g)| *g)
        .unwrap_or('*')
}

/// A frame rasterised to characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextCanvas {
    cells: Vec<char>,
}

impl Default for TextCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl TextCanvas {
    pub fn new() -> Self {
        Self {
            cells: vec![' '; COLS * ROWS],
        }
    }

    pub fn get(&self, col: usize, row: usize) -> Option<char> {
        (col < COLS && row < ROWS).then(|| self.cells[row * COLS + col])
    }

    /// One row as a string
    pub fn row(&self, row: usize) -> String {
        self.cells
            .get(row * COLS..(row + 1) * COLS)
            .map(|r| r.iter().collect())
            .unwrap_or_default()
    }

    fn put(&mut self, col: i64, row: i64, glyph: char) {
        if (0..COLS as i64).contains(&col) && (0..ROWS as i64).contains(&row) {
            self.cells[row as usize * COLS + col as usize] = glyph;
        }
    }

    fn cell_of(p: Vec2) -> (i64, i64) {
        ((p.x / CELL_W).floor() as i64, (p.y / CELL_H).floor() as i64)
    }

    fn cell_center(col: i64, row: i64) -> Vec2 {
        Vec2::new((col as f32 + 0.5) * CELL_W, (row as f32 + 0.5) * CELL_H)
    }

    /// Cells whose centres fall inside `rect`; at least the one under its centre
    fn cells_in(rect: Rect) -> Vec<(i64, i64)> {
        let (c0, r0) = Self::cell_of(Vec2::new(rect.left(), rect.top()));
        let (c1, r1) = Self::cell_of(Vec2::new(rect.right(), rect.bottom()));
        let mut cells: Vec<(i64, i64)> = (r0..=r1)
            .flat_map(|r| (c0..=c1).map(move |c| (c, r)))
            .filter(|&(c, r)| rect.contains_point(Self::cell_center(c, r)))
            .collect();
        if cells.is_empty() {
            cells.push(Self::cell_of(rect.center()));
        }
        cells
    }
}

impl Canvas for TextCanvas {
    fn clear(&mut self, color: Color) {
        let glyph = glyph_for(color);
        self.cells.fill(if glyph == '*' { ' ' } else { glyph });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let glyph = glyph_for(color);
        // Translucent overlays blank what is under them
        for (c, r) in Self::cells_in(rect) {
            self.put(c, r, glyph);
        }
    }

    fn stroke_rect(&mut self, rect: Rect, _thickness: f32, color: Color) {
        let glyph = glyph_for(color);
        let cells = Self::cells_in(rect);
        let (Some(min_c), Some(max_c)) = (
            cells.iter().map(|c| c.0).min(),
            cells.iter().map(|c| c.0).max(),
        ) else {
            return;
        };
        for (c, r) in cells {
            if c == min_c || c == max_c {
                self.put(c, r, glyph);
            }
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let glyph = glyph_for(color);
        let bounds = Rect::new(center.x - radius, center.y - radius, radius * 2.0, radius * 2.0);
        let mut drawn = false;
        for (c, r) in Self::cells_in(bounds) {
            if Self::cell_center(c, r).distance(center) <= radius {
                self.put(c, r, glyph);
                drawn = true;
            }
        }
        if !drawn {
            let (c, r) = Self::cell_of(center);
            self.put(c, r, glyph);
        }
    }

    fn text(&mut self, pos: Vec2, _size: f32, _color: Color, text: &str) {
        let (col, row) = Self::cell_of(pos);
        for (i, ch) in text.chars().enumerate() {
            self.put(col + i as i64, row, ch);
        }
    }
}

impl fmt::Display for TextCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..ROWS {
            writeln!(f, "{}", self.row(row).trim_end())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::draw_frame;
    use crate::sim::World;
    use crate::tuning::Tuning;

    #[test]
    fn test_grid_size() {
        assert_eq!((COLS, ROWS), (50, 30));
        let canvas = TextCanvas::new();
        assert_eq!(canvas.get(49, 29), Some(' '));
        assert_eq!(canvas.get(50, 0), None);
    }

    #[test]
    fn test_small_shapes_still_show() {
        let mut canvas = TextCanvas::new();
        canvas.fill_rect(Rect::new(100.0, 100.0, 4.0, 4.0), palette::PICKUP);
        assert_eq!(canvas.get(6, 4), Some('T'));
        canvas.fill_circle(Vec2::new(300.0, 300.0), 2.0, palette::BARREL);
        assert_eq!(canvas.get(18, 12), Some('o'));
    }

    #[test]
    fn test_text_clipped_at_edge() {
        let mut canvas = TextCanvas::new();
        canvas.text(Vec2::new(SCREEN_W - CELL_W * 2.0, 0.0), 20.0, palette::TEXT, "abcdef");
        assert_eq!(canvas.row(0).trim(), "ab");
    }

    #[test]
    fn test_scene_renders_floor_and_player() {
        let world = World::new(1, Tuning::default());
        let mut canvas = TextCanvas::new();
        draw_frame(&mut canvas, &world, None);
        let frame = canvas.to_string();
        assert!(frame.contains('@'));
        assert!(frame.contains('H'));
        assert!(canvas.row(ROWS - 1).chars().all(|c| c == '#'));
        assert!(canvas.row(0).starts_with("Score: 0"));
    }
}
