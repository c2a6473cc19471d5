//! Renderer — rasterizes draw ops and pushes changed cells to the terminal.
//!
//! Rasterizing and diffing are pure. Only `present` touches the output, and
//! after the first full paint it writes just the cells that changed since
//! the previous frame.

use std::io::Write;

use anyhow::Result;
use crossterm::{cursor, queue, style};

use crate::types::{CanvasSize, Cell, CellChange, Color, DrawOp, Style};

pub struct Renderer {
    size: CanvasSize,
    front: Option<Vec<Vec<Cell>>>,
}

impl Renderer {
    pub fn new(size: CanvasSize) -> Self {
        Self { size, front: None }
    }

    /// Forget what is on screen so the next `present` repaints everything.
    pub fn invalidate(&mut self) {
        self.front = None;
    }

    /// Rasterize `ops` and write the result to `out`.
    ///
    /// The first frame (and the first frame after `invalidate`) is written
    /// in full. Later frames only write the cell-level diff.
    pub fn present<W: Write>(&mut self, out: &mut W, ops: &[DrawOp]) -> Result<usize> {
        let grid = Self::rasterize(ops, self.size);
        let written = match &self.front {
            None => {
                for (y, row) in grid.iter().enumerate() {
                    queue!(out, cursor::MoveTo(0, y as u16))?;
                    for cell in row {
                        queue!(out, print_cell(cell))?;
                    }
                }
                grid.len() * self.size.width as usize
            }
            Some(prev) => {
                let changes = Self::diff(prev, &grid);
                for change in &changes {
                    queue!(
                        out,
                        cursor::MoveTo(change.x, change.y),
                        print_cell(&change.cell),
                    )?;
                }
                changes.len()
            }
        };
        out.flush()?;
        self.front = Some(grid);
        Ok(written)
    }

    /// Rasterize draw ops onto a fixed-size cell grid.
    ///
    /// Ops are sorted by z-order so higher z values paint over lower ones.
    /// An op without a background keeps the background already in the cell.
    pub fn rasterize(ops: &[DrawOp], size: CanvasSize) -> Vec<Vec<Cell>> {
        let w = size.width as usize;
        let h = size.height as usize;
        let mut grid = vec![vec![Cell::default(); w]; h];

        let mut ops: Vec<_> = ops.iter().collect();
        ops.sort_by_key(|op| op.z_order);

        for op in ops {
            let x = op.x as usize;
            let y = op.y as usize;
            if x < w && y < h {
                let under = grid[y][x].style.bg;
                let mut style = op.style;
                if style.bg.is_none() {
                    style.bg = under;
                }
                grid[y][x] = Cell { ch: op.ch, style };
            }
        }

        grid
    }

    /// Compute a cell-level diff between two grids.
    pub fn diff(prev: &[Vec<Cell>], next: &[Vec<Cell>]) -> Vec<CellChange> {
        let mut changes = Vec::new();
        for (y, (prev_row, next_row)) in prev.iter().zip(next.iter()).enumerate() {
            for (x, (prev_cell, next_cell)) in prev_row.iter().zip(next_row.iter()).enumerate() {
                if prev_cell != next_cell {
                    changes.push(CellChange {
                        x: x as u16,
                        y: y as u16,
                        cell: *next_cell,
                    });
                }
            }
        }
        changes
    }
}

fn print_cell(cell: &Cell) -> style::PrintStyledContent<char> {
    style::PrintStyledContent(style::StyledContent::new(to_content_style(&cell.style), cell.ch))
}

// ---------------------------------------------------------------------------
// Style conversion
// ---------------------------------------------------------------------------

pub fn to_content_style(s: &Style) -> style::ContentStyle {
    let mut cs = style::ContentStyle::default();
    if let Some(fg) = &s.fg {
        cs.foreground_color = Some(to_ct_color(fg));
    }
    if let Some(bg) = &s.bg {
        cs.background_color = Some(to_ct_color(bg));
    }
    if s.bold {
        cs.attributes.set(style::Attribute::Bold);
    }
    if s.dim {
        cs.attributes.set(style::Attribute::Dim);
    }
    cs
}

pub fn to_ct_color(c: &Color) -> style::Color {
    let Color::Rgb { r, g, b } = *c;
    style::Color::Rgb { r, g, b }
}
