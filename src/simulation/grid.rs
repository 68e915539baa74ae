//! # Uniform spatial grid ("chunks")
//!
//! Splits the world rectangle into square cells of side `cell_size` so the
//! collision pass only compares particles that share a cell or sit in
//! adjacent cells, instead of every pair.
//!
//! - `cols = ceil(width / cell_size)`, `rows = ceil(height / cell_size)`;
//!   both are fixed for the lifetime of the grid.
//! - Cells store particle *indices* into the `System` arena. The grid never
//!   owns particles; it is a per-tick lookup view that `rebuild` throws away
//!   and repopulates.
//! - Positions outside the world are clamped into the border cells, so a
//!   particle that has not yet been handled by the boundary policy is still
//!   found by its neighbours.
//!
//! ## Forward neighbours
//!
//! Each cell is compared against itself and four "forward" cells:
//!
//! ```text
//!            (cx, cy)   (cx+1, cy)
//! (cx-1, cy+1) (cx, cy+1) (cx+1, cy+1)
//! ```
//!
//! Every pair of touching cells appears exactly once across the whole grid
//! under this stencil, so each candidate particle pair is visited once.

use crate::simulation::boundary::Bounds;
use crate::simulation::states::{NVec2, Particle};

/// Offsets of the neighbour cells visited from `(cx, cy)`
pub const FORWARD_NEIGHBORS: [(isize, isize); 4] = [(1, 0), (-1, 1), (0, 1), (1, 1)];

/// Upper bound on `cols * rows` accepted at configuration time
pub const MAX_CELLS: usize = 1 << 24;

#[derive(Debug, Clone)]
pub struct SpatialGrid {
    origin: NVec2,
    cell_size: f64,
    cols: usize,
    rows: usize,
    cells: Vec<Vec<usize>>, // row-major: cells[cy * cols + cx]
}

impl SpatialGrid {
    /// Grid covering `bounds` with square cells of side `cell_size`.
    /// `cell_size` must be positive (checked at configuration time).
    pub fn new(bounds: &Bounds, cell_size: f64) -> Self {
        let (cols, rows) = Self::dimensions(bounds, cell_size);
        let cols = (cols as usize).max(1);
        let rows = (rows as usize).max(1);

        Self {
            origin: bounds.min,
            cell_size,
            cols,
            rows,
            cells: vec![Vec::new(); cols * rows],
        }
    }

    /// `(cols, rows)` a grid over `bounds` would have, as floats,
    /// so callers can reject huge grids before anything is allocated
    pub fn dimensions(bounds: &Bounds, cell_size: f64) -> (f64, f64) {
        let extent = bounds.extent();
        ((extent.x / cell_size).ceil(), (extent.y / cell_size).ceil())
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Cell coordinates for a position, clamped into the grid
    pub fn cell_of(&self, p: &NVec2) -> (usize, usize) {
        let cx = clamp_index(((p.x - self.origin.x) / self.cell_size).floor(), self.cols);
        let cy = clamp_index(((p.y - self.origin.y) / self.cell_size).floor(), self.rows);
        (cx, cy)
    }

    /// Particle indices currently in cell `(cx, cy)`
    pub fn cell(&self, cx: usize, cy: usize) -> &[usize] {
        &self.cells[cy * self.cols + cx]
    }

    /// Clear every cell and re-bin all particles by their current position
    pub fn rebuild(&mut self, particles: &[Particle]) {
        for cell in self.cells.iter_mut() {
            cell.clear();
        }
        for (i, p) in particles.iter().enumerate() {
            let (cx, cy) = self.cell_of(&p.x);
            self.cells[cy * self.cols + cx].push(i);
        }
    }

    /// Visit every candidate pair owned by cell `(cx, cy)`: the unordered
    /// pairs inside the cell and each (cell, forward neighbour) pair.
    ///
    /// For each particle of the cell, its in-cell partners come first and
    /// then its neighbour-cell partners.
    pub fn for_each_pair_in_cell<F>(&self, cx: usize, cy: usize, mut f: F)
    where
        F: FnMut(usize, usize),
    {
        let cell = self.cell(cx, cy);
        for (k, &i) in cell.iter().enumerate() {
            for &j in &cell[k + 1..] {
                f(i, j);
            }

            for (ox, oy) in FORWARD_NEIGHBORS {
                let Some((nx, ny)) = self.offset(cx, cy, ox, oy) else {
                    continue;
                };
                for &j in self.cell(nx, ny) {
                    f(i, j);
                }
            }
        }
    }

    /// Visit every candidate pair in the grid, x outer and y inner
    pub fn for_each_pair<F>(&self, mut f: F)
    where
        F: FnMut(usize, usize),
    {
        for cx in 0..self.cols {
            for cy in 0..self.rows {
                self.for_each_pair_in_cell(cx, cy, &mut f);
            }
        }
    }

    fn offset(&self, cx: usize, cy: usize, ox: isize, oy: isize) -> Option<(usize, usize)> {
        let nx = cx.checked_add_signed(ox)?;
        let ny = cy.checked_add_signed(oy)?;
        (nx < self.cols && ny < self.rows).then_some((nx, ny))
    }
}

fn clamp_index(raw: f64, len: usize) -> usize {
    if raw.is_nan() || raw < 0.0 {
        0
    } else {
        (raw as usize).min(len - 1)
    }
}
