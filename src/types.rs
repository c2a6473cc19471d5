//! Shared drawing types.
//!
//! Every visible thing (stars, nebula, panels, buttons, text) is turned into
//! a list of `DrawOp`s per frame. The renderer rasterizes them onto a fixed
//! cell grid, ordered by `z_order`.

// ---------------------------------------------------------------------------
// Style primitives
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Rgb { r: u8, g: u8, b: u8 },
}

impl Color {
    /// Build a colour from a `0xRRGGBB` literal.
    pub const fn hex(rgb: u32) -> Self {
        Color::Rgb {
            r: (rgb >> 16) as u8,
            g: (rgb >> 8) as u8,
            b: rgb as u8,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
    pub dim: bool,
}

impl Style {
    pub const fn fg(color: Color) -> Self {
        Style {
            fg: Some(color),
            bg: None,
            bold: false,
            dim: false,
        }
    }

    pub const fn on(self, bg: Color) -> Self {
        Style {
            bg: Some(bg),
            ..self
        }
    }

    pub const fn bold(self) -> Self {
        Style { bold: true, ..self }
    }
}

/// Window background behind everything.
pub const BACKGROUND: Color = Color::hex(0x000010);

// ---------------------------------------------------------------------------
// Layering
// ---------------------------------------------------------------------------

pub const Z_NEBULA: i32 = 0;
pub const Z_STARS: i32 = 1;
pub const Z_PANEL: i32 = 10;
pub const Z_TEXT: i32 = 11;
pub const Z_WIDGET: i32 = 20;

// ---------------------------------------------------------------------------
// Draw ops → grid
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct DrawOp {
    pub x: u16,
    pub y: u16,
    pub ch: char,
    pub style: Style,
    pub z_order: i32,
}

/// Anything that can contribute draw ops to a frame.
pub trait Draw {
    fn draw(&self, ops: &mut Vec<DrawOp>);
}

/// Size of the fixed canvas, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSize {
    pub width: u16,
    pub height: u16,
}

/// 800×600 at roughly 10×20 px per cell.
pub const CANVAS: CanvasSize = CanvasSize {
    width: 80,
    height: 30,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: Style,
}

impl Default for Cell {
    fn default() -> Self {
        Cell {
            ch: ' ',
            style: Style::default().on(BACKGROUND),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellChange {
    pub x: u16,
    pub y: u16,
    pub cell: Cell,
}
