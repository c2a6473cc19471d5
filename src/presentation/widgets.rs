//! Boxes, wrapped text, and buttons.

use crate::types::{Color, Draw, DrawOp, Style};

// ---------------------------------------------------------------------------
// Boxes
// ---------------------------------------------------------------------------

/// Draw a single-line box. Boxes smaller than 2×2 draw nothing.
fn draw_frame(ops: &mut Vec<DrawOp>, x: u16, y: u16, w: u16, h: u16, style: Style, z: i32) {
    if w < 2 || h < 2 {
        return;
    }
    let mut put = |x, y, ch| ops.push(DrawOp { x, y, ch, style, z_order: z });

    put(x, y, '┌');
    put(x + w - 1, y, '┐');
    put(x, y + h - 1, '└');
    put(x + w - 1, y + h - 1, '┘');
    for i in 1..w - 1 {
        put(x + i, y, '─');
        put(x + i, y + h - 1, '─');
    }
    for j in 1..h - 1 {
        put(x, y + j, '│');
        put(x + w - 1, y + j, '│');
    }
}

/// A filled box with a border, used behind the prompt text.
///
/// `glow` lists extra rings drawn outside the border, innermost first, one
/// cell apart. A ring that would leave the canvas origin is skipped.
pub struct Panel {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
    pub fill: Color,
    pub border: Color,
    pub glow: &'static [Color],
    pub z_order: i32,
}

impl Draw for Panel {
    fn draw(&self, ops: &mut Vec<DrawOp>) {
        let fill = Style::default().on(self.fill);
        for j in 0..self.height {
            for i in 0..self.width {
                ops.push(DrawOp {
                    x: self.x + i,
                    y: self.y + j,
                    ch: ' ',
                    style: fill,
                    z_order: self.z_order,
                });
            }
        }
        draw_frame(
            ops,
            self.x,
            self.y,
            self.width,
            self.height,
            Style::fg(self.border).on(self.fill),
            self.z_order + 1,
        );
        for (k, &color) in (1u16..).zip(self.glow) {
            let (Some(x), Some(y)) = (self.x.checked_sub(k), self.y.checked_sub(k)) else {
                break;
            };
            draw_frame(
                ops,
                x,
                y,
                self.width + 2 * k,
                self.height + 2 * k,
                Style::fg(color),
                self.z_order - 1,
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Wrapped text
// ---------------------------------------------------------------------------

/// Word-wrap `chars` to `width` columns.
///
/// Returns one `start..end` range of char indices per visual row. Explicit
/// `\n` starts a new row. Breaks happen at spaces, and the space at a break
/// is consumed; a word longer than the row is hard-broken.
pub fn wrap(chars: &[char], width: usize) -> Vec<(usize, usize)> {
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut line_start = 0;

    for line_end in chars
        .iter()
        .enumerate()
        .filter(|(_, c)| **c == '\n')
        .map(|(i, _)| i)
        .chain(std::iter::once(chars.len()))
    {
        wrap_line(chars, line_start, line_end, width, &mut rows);
        line_start = line_end + 1;
    }
    rows
}

fn wrap_line(chars: &[char], lo: usize, hi: usize, w: usize, rows: &mut Vec<(usize, usize)>) {
    if lo >= hi {
        rows.push((lo, lo));
        return;
    }
    let mut pos = lo;
    while pos < hi {
        if hi - pos <= w {
            rows.push((pos, hi));
            break;
        }
        match chars[pos..pos + w].iter().rposition(|&c| c == ' ') {
            Some(sp) if sp > 0 => {
                rows.push((pos, pos + sp));
                pos += sp + 1;
            }
            _ => {
                rows.push((pos, pos + w));
                pos += w;
            }
        }
        while pos < hi && chars[pos] == ' ' {
            pos += 1;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// Wrapped text of which only the first `visible` characters are drawn.
///
/// The layout is always computed from the full text so words never jump
/// between rows while they are being revealed.
pub struct TextBlock<'a> {
    pub chars: &'a [char],
    pub visible: usize,
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub align: Align,
    pub style: Style,
    pub z_order: i32,
}

impl Draw for TextBlock<'_> {
    fn draw(&self, ops: &mut Vec<DrawOp>) {
        for (row, (start, end)) in wrap(self.chars, self.width as usize).into_iter().enumerate() {
            let pad = match self.align {
                Align::Left => 0,
                Align::Center => (self.width as usize).saturating_sub(end - start) / 2,
            };
            for i in start..end.min(self.visible) {
                ops.push(DrawOp {
                    x: self.x + (pad + i - start) as u16,
                    y: self.y + row as u16,
                    ch: self.chars[i],
                    style: self.style,
                    z_order: self.z_order,
                });
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Buttons
// ---------------------------------------------------------------------------

pub const BUTTON_HEIGHT: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonPalette {
    pub fg: Color,
    pub bg: Color,
    pub border: Color,
    pub hot_fg: Color,
    pub hot_bg: Color,
    pub hot_border: Color,
}

pub const BLUE_BUTTON: ButtonPalette = ButtonPalette {
    fg: Color::hex(0xaaddff),
    bg: Color::hex(0x111122),
    border: Color::hex(0x55aaff),
    hot_fg: Color::hex(0xcceeff),
    hot_bg: Color::hex(0x224466),
    hot_border: Color::hex(0x88bbff),
};

pub const RED_BUTTON: ButtonPalette = ButtonPalette {
    hot_fg: Color::hex(0xffbbbb),
    hot_bg: Color::hex(0x661111),
    hot_border: Color::hex(0xaa5555),
    ..BLUE_BUTTON
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub palette: ButtonPalette,
    /// Hovered by the mouse or holding keyboard focus.
    pub hot: bool,
}

impl Button {
    pub fn new(label: &str, x: u16, y: u16, width: u16) -> Self {
        Self {
            label: label.to_string(),
            x,
            y,
            width,
            palette: BLUE_BUTTON,
            hot: false,
        }
    }

    pub fn with_palette(mut self, palette: ButtonPalette) -> Self {
        self.palette = palette;
        self
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.x
            && column < self.x + self.width
            && row >= self.y
            && row < self.y + BUTTON_HEIGHT
    }

    /// The label as drawn: centred, truncated with `…` when too long.
    fn caption(&self) -> Vec<char> {
        let room = self.width.saturating_sub(2) as usize;
        let chars: Vec<char> = self.label.chars().collect();
        if chars.len() <= room {
            return chars;
        }
        let mut cut: Vec<char> = chars.into_iter().take(room.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

impl Draw for Button {
    fn draw(&self, ops: &mut Vec<DrawOp>) {
        let p = &self.palette;
        let (fg, bg, border) = if self.hot {
            (p.hot_fg, p.hot_bg, p.hot_border)
        } else {
            (p.fg, p.bg, p.border)
        };
        let z = crate::types::Z_WIDGET;

        for i in 1..self.width.saturating_sub(1) {
            ops.push(DrawOp {
                x: self.x + i,
                y: self.y + 1,
                ch: ' ',
                style: Style::default().on(bg),
                z_order: z,
            });
        }
        draw_frame(
            ops,
            self.x,
            self.y,
            self.width,
            BUTTON_HEIGHT,
            Style::fg(border).on(bg),
            z,
        );

        let caption = self.caption();
        let pad = (self.width as usize).saturating_sub(2 + caption.len()) / 2;
        for (i, ch) in caption.into_iter().enumerate() {
            ops.push(DrawOp {
                x: self.x + 1 + (pad + i) as u16,
                y: self.y + 1,
                ch,
                style: Style::fg(fg).on(bg).bold(),
                z_order: z + 1,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(text: &str, width: usize) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        wrap(&chars, width)
            .into_iter()
            .map(|(s, e)| chars[s..e].iter().collect())
            .collect()
    }

    #[test]
    fn wraps_at_spaces() {
        assert_eq!(rows("one two three", 8), vec!["one two", "three"]);
    }

    #[test]
    fn hard_breaks_long_words() {
        assert_eq!(rows("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn newline_starts_a_row() {
        assert_eq!(rows("ab\ncd", 10), vec!["ab", "cd"]);
        assert_eq!(rows("ab\n\ncd", 10), vec!["ab", "", "cd"]);
    }

    #[test]
    fn panel_glow_rings_surround_the_border() {
        const GLOW: [Color; 2] = [Color::hex(0x335577), Color::hex(0x223355)];
        let panel = Panel {
            x: 2,
            y: 3,
            width: 10,
            height: 4,
            fill: Color::hex(0x101025),
            border: Color::hex(0x446688),
            glow: &GLOW,
            z_order: 10,
        };
        let mut ops = Vec::new();
        panel.draw(&mut ops);

        let at = |x, y, color| {
            ops.iter()
                .any(|op| (op.x, op.y) == (x, y) && op.style.fg == Some(color))
        };
        assert!(at(2, 3, Color::hex(0x446688)));
        assert!(at(1, 2, GLOW[0]));
        assert!(at(0, 1, GLOW[1]));
        assert!(at(13, 8, GLOW[1]));
        assert!(ops.iter().filter(|op| op.style.fg == Some(GLOW[1])).all(|op| op.z_order == 9));
    }

    #[test]
    fn glow_stops_at_the_canvas_origin() {
        const GLOW: [Color; 2] = [Color::hex(0x335577), Color::hex(0x223355)];
        let panel = Panel {
            x: 1,
            y: 5,
            width: 4,
            height: 3,
            fill: Color::hex(0x101025),
            border: Color::hex(0x446688),
            glow: &GLOW,
            z_order: 10,
        };
        let mut ops = Vec::new();
        panel.draw(&mut ops);
        assert!(ops.iter().any(|op| op.style.fg == Some(GLOW[0])));
        assert!(ops.iter().all(|op| op.style.fg != Some(GLOW[1])));
    }

    #[test]
    fn text_block_reveals_prefix_in_final_layout() {
        let chars: Vec<char> = "hello world".chars().collect();
        let block = TextBlock {
            chars: &chars,
            visible: 8,
            x: 2,
            y: 3,
            width: 6,
            align: Align::Left,
            style: Style::default(),
            z_order: 0,
        };
        let mut ops = Vec::new();
        block.draw(&mut ops);
        // "hello" on row 3, "wo" already on row 4
        let row4: String = ops.iter().filter(|op| op.y == 4).map(|op| op.ch).collect();
        assert_eq!(ops.iter().filter(|op| op.y == 3).count(), 5);
        assert_eq!(row4, "wo");
        assert_eq!(ops.iter().find(|op| op.y == 4).map(|op| op.x), Some(2));
    }

    #[test]
    fn centred_text_is_padded() {
        let chars: Vec<char> = "ab".chars().collect();
        let block = TextBlock {
            chars: &chars,
            visible: usize::MAX,
            x: 0,
            y: 0,
            width: 6,
            align: Align::Center,
            style: Style::default(),
            z_order: 0,
        };
        let mut ops = Vec::new();
        block.draw(&mut ops);
        assert_eq!(ops.iter().map(|op| op.x).collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn button_hit_test_covers_its_box() {
        let b = Button::new("Play", 10, 5, 20);
        assert!(b.contains(10, 5));
        assert!(b.contains(29, 7));
        assert!(!b.contains(30, 7));
        assert!(!b.contains(10, 8));
        assert!(!b.contains(9, 6));
    }

    #[test]
    fn hot_button_uses_hot_palette() {
        let mut b = Button::new("Quit", 0, 0, 10).with_palette(RED_BUTTON);
        b.hot = true;
        let mut ops = Vec::new();
        b.draw(&mut ops);
        assert!(ops.iter().all(|op| op.style.bg == Some(Color::hex(0x661111))));
        let label: String = ops
            .iter()
            .filter(|op| op.y == 1 && op.ch != ' ' && op.ch != '│')
            .map(|op| op.ch)
            .collect();
        assert_eq!(label, "Quit");
    }

    #[test]
    fn long_labels_are_truncated() {
        let b = Button::new("No, preparation is important", 0, 0, 12);
        assert_eq!(b.caption().len(), 10);
        assert_eq!(b.caption().last(), Some(&'…'));
    }
}
