//! Random rectangular partitions of a square canvas.
//!
//! Each axis gets the two canvas edges plus [`CUTS_PER_AXIS`] random
//! cut-lines. Every pair of neighbouring cut-lines on both axes bounds a
//! cell, and each cell is painted either a palette color or white.

use crate::{
    art::palette::{self, BLACK, LAYOUT_PALETTE, WHITE},
    graphics::{Argb, Canvas, P2},
    math::rng::RandomSource,
};

pub const CUTS_PER_AXIS: usize = 5;

/// Random cut-lines keep this distance from the canvas edges.
pub const CUT_MARGIN: f32 = 50.0;

pub const FILL_CHANCE: f32 = 0.6;

pub const BORDER_WEIGHT: i32 = 12;

#[derive(Debug, Clone, PartialEq)]
pub struct CutLines {
    pub cols: Vec<f32>,
    pub rows: Vec<f32>,
}

impl CutLines {
    pub fn random(size: f32, rng: &mut dyn RandomSource) -> Self {
        let cols = Self::axis(size, rng);
        let rows = Self::axis(size, rng);

        Self { cols, rows }
    }

    fn axis(size: f32, rng: &mut dyn RandomSource) -> Vec<f32> {
        let mut lines = Vec::with_capacity(CUTS_PER_AXIS + 2);
        lines.extend([0.0, size]);
        lines.extend((0..CUTS_PER_AXIS).map(|_| rng.range(CUT_MARGIN, size - CUT_MARGIN)));
        lines.sort_by(f32::total_cmp);
        lines
    }

    pub fn cell_count(&self) -> usize {
        self.cols.len().saturating_sub(1) * self.rows.len().saturating_sub(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub fill: Argb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Border {
    pub weight: i32,
    pub color: Argb,
    pub filled: bool,
}

impl Default for Border {
    fn default() -> Self {
        Self {
            weight: BORDER_WEIGHT,
            color: BLACK,
            filled: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Artwork {
    size: usize,
    cuts: CutLines,
    cells: Vec<Cell>,
    border: Border,
}

pub fn generate(size: usize, rng: &mut dyn RandomSource) -> Artwork {
    let cuts = CutLines::random(size as f32, rng);

    let mut cells = Vec::with_capacity(cuts.cell_count());

    for col in cuts.cols.windows(2) {
        for row in cuts.rows.windows(2) {
            let fill = if rng.chance(FILL_CHANCE) {
                palette::pick(&LAYOUT_PALETTE, rng)
            } else {
                WHITE
            };

            cells.push(Cell {
                x: col[0],
                y: row[0],
                w: col[1] - col[0],
                h: row[1] - row[0],
                fill,
            });
        }
    }

    Artwork {
        size,
        cuts,
        cells,
        border: Border::default(),
    }
}

impl Artwork {
    #[cfg(test)]
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cell_count(&self) -> usize {
        self.cuts.cell_count()
    }

    #[cfg(test)]
    pub fn cuts(&self) -> &CutLines {
        &self.cuts
    }

    #[cfg(test)]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[cfg(test)]
    pub fn border(&self) -> Border {
        self.border
    }

    pub fn white_ratio(&self) -> f32 {
        if self.cells.is_empty() {
            return 0.0;
        }

        let white = self.cells.iter().filter(|c| c.fill == WHITE).count();
        white as f32 / self.cells.len() as f32
    }

    pub fn draw(&self, canvas: &mut Canvas) {
        for cell in &self.cells {
            canvas.fill_rect_f(cell.x, cell.y, cell.x + cell.w, cell.y + cell.h, cell.fill);
        }

        let Border { weight, color, filled } = self.border;
        let side = self.size as i32;

        if filled {
            canvas.draw_rect_wh(P2(0, 0), side, side, color);
        }

        canvas.stroke_rect(P2(0, 0), side, side, weight, color);
    }
}
