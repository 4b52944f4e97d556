//! Mapping between playfield pixels and terminal cells
//!
//! The whole playfield is stretched over the terminal. A cell belongs to a
//! rectangle when the cell's center lies inside it, so what gets drawn is
//! exactly what a click on that cell hits.

use glam::Vec2;

use crate::consts::{HEIGHT, WIDTH};
use crate::sim::Rect;

/// Half-open range of cells, `[col0, col1) x [row0, row1)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSpan {
    pub col0: u16,
    pub row0: u16,
    pub col1: u16,
    pub row1: u16,
}

impl CellSpan {
    pub fn width(&self) -> u16 {
        self.col1 - self.col0
    }

    pub fn height(&self) -> u16 {
        self.row1 - self.row0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols: cols.max(1),
            rows: rows.max(1),
        }
    }

    /// Pixel size of one cell
    pub fn cell_size(&self) -> Vec2 {
        Vec2::new(WIDTH / self.cols as f32, HEIGHT / self.rows as f32)
    }

    /// Playfield position at the center of a cell
    pub fn to_playfield(&self, col: u16, row: u16) -> Vec2 {
        (Vec2::new(col as f32, row as f32) + 0.5) * self.cell_size()
    }

    /// Cell containing a playfield position (clamped to the terminal)
    pub fn cell_at(&self, p: Vec2) -> (u16, u16) {
        let cell = (p / self.cell_size()).floor();
        (
            (cell.x.max(0.0) as u16).min(self.cols - 1),
            (cell.y.max(0.0) as u16).min(self.rows - 1),
        )
    }

    /// Cells covered by a rectangle; `None` when it is off screen.
    /// Rectangles smaller than a cell still get the cell under their center.
    pub fn span(&self, rect: &Rect) -> Option<CellSpan> {
        let cell = self.cell_size();
        let (col0, col1) = axis_span(rect.left() / cell.x, rect.right() / cell.x, self.cols);
        let (row0, row1) = axis_span(rect.top() / cell.y, rect.bottom() / cell.y, self.rows);

        let on_screen = rect.center.x >= 0.0
            && rect.center.x < WIDTH
            && rect.center.y >= 0.0
            && rect.center.y < HEIGHT;

        match (col0 < col1, row0 < row1) {
            (true, true) => Some(CellSpan {
                col0,
                row0,
                col1,
                row1,
            }),
            _ if on_screen => {
                let (c, r) = self.cell_at(rect.center);
                let (col0, col1) = if col0 < col1 { (col0, col1) } else { (c, c + 1) };
                let (row0, row1) = if row0 < row1 { (row0, row1) } else { (r, r + 1) };
                Some(CellSpan {
                    col0,
                    row0,
                    col1,
                    row1,
                })
            }
            _ => None,
        }
    }
}

/// Cells whose centers fall in `[lo, hi)`, both given in cell units
fn axis_span(lo: f32, hi: f32, cells: u16) -> (u16, u16) {
    let clamp = |v: f32| v.clamp(0.0, cells as f32) as u16;
    (clamp((lo - 0.5).ceil()), clamp((hi - 0.5).ceil()))
}
