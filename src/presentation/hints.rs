use crate::types::{Draw, DrawOp, Style, Z_WIDGET};

/// A one-line key legend. Text inside `[...]` is bold, the rest is dim.
pub struct HintBar<'a> {
    pub items: &'a [&'a str],
    pub y: u16,
}

impl Draw for HintBar<'_> {
    fn draw(&self, ops: &mut Vec<DrawOp>) {
        let bold = Style::default().bold();
        let dim = Style {
            dim: true,
            ..Style::default()
        };

        let mut x: u16 = 1;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                x += 2;
            }
            let mut in_brackets = false;
            for ch in item.chars() {
                if ch == '[' {
                    in_brackets = true;
                }
                ops.push(DrawOp {
                    x,
                    y: self.y,
                    ch,
                    style: if in_brackets { bold } else { dim },
                    z_order: Z_WIDGET,
                });
                if ch == ']' {
                    in_brackets = false;
                }
                x += 1;
            }
        }
    }
}
