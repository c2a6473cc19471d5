//! Bitmap font for the large title.
//!
//! Each glyph is 5 rows tall with variable width. All rows within a single
//! glyph have the same length. A non-space character in a row means
//! "filled"; a space means "empty".
//!
//! Glyphs from an optional JSON font file replace the built-in ones for the
//! characters they define.

use std::collections::HashMap;
use std::path::Path;

use tracing::{info, warn};

use crate::error::ResourceError;
use crate::types::{Draw, DrawOp, Style};

/// The height of every glyph (constant).
pub const GLYPH_HEIGHT: u16 = 5;

/// Return the built-in 5-row bitmap for `ch`, or `None` if the character is
/// not in the font. The caller handles case folding.
pub fn builtin_glyph(ch: char) -> Option<[&'static str; 5]> {
    let g = match ch {
        'A' => [" ### ", "#   #", "#####", "#   #", "#   #"],
        'B' => ["#### ", "#   #", "#### ", "#   #", "#### "],
        'C' => [" ### ", "#   #", "#    ", "#   #", " ### "],
        'D' => ["#### ", "#   #", "#   #", "#   #", "#### "],
        'E' => ["#####", "#    ", "###  ", "#    ", "#####"],
        'F' => ["#####", "#    ", "###  ", "#    ", "#    "],
        'G' => [" ### ", "#    ", "#  ##", "#   #", " ### "],
        'H' => ["#   #", "#   #", "#####", "#   #", "#   #"],
        'I' => ["###", " # ", " # ", " # ", "###"],
        'J' => ["  ###", "   # ", "   # ", "#  # ", " ##  "],
        'K' => ["#   #", "#  # ", "###  ", "#  # ", "#   #"],
        'L' => ["#    ", "#    ", "#    ", "#    ", "#####"],
        'M' => ["#   #", "## ##", "# # #", "#   #", "#   #"],
        'N' => ["#   #", "##  #", "# # #", "#  ##", "#   #"],
        'O' => [" ### ", "#   #", "#   #", "#   #", " ### "],
        'P' => ["#### ", "#   #", "#### ", "#    ", "#    "],
        'Q' => [" ### ", "#   #", "# # #", "#  # ", " ## #"],
        'R' => ["#### ", "#   #", "#### ", "#  # ", "#   #"],
        'S' => [" ####", "#    ", " ### ", "    #", "#### "],
        'T' => ["#####", "  #  ", "  #  ", "  #  ", "  #  "],
        'U' => ["#   #", "#   #", "#   #", "#   #", " ### "],
        'V' => ["#   #", "#   #", "#   #", " # # ", "  #  "],
        'W' => ["#   #", "#   #", "# # #", "## ##", "#   #"],
        'X' => ["#   #", " # # ", "  #  ", " # # ", "#   #"],
        'Y' => ["#   #", " # # ", "  #  ", "  #  ", "  #  "],
        'Z' => ["#####", "   # ", "  #  ", " #   ", "#####"],

        ' ' => ["   ", "   ", "   ", "   ", "   "],
        '!' => ["#", "#", "#", " ", "#"],
        '.' => [" ", " ", " ", " ", "#"],
        '-' => ["     ", "     ", "#####", "     ", "     "],
        '?' => [" ### ", "#   #", "  ## ", "     ", "  #  "],

        _ => return None,
    };
    debug_assert!(
        g.iter().all(|row| row.len() == g[0].len()),
        "glyph '{ch}' has inconsistent row widths",
    );
    Some(g)
}

#[derive(Debug, Clone, Default)]
pub struct BitmapFont {
    overrides: HashMap<char, [String; 5]>,
}

impl BitmapFont {
    /// Load glyph overrides from `path`, or use the built-in font if the file
    /// is missing or invalid.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            info!(path = %path.display(), "font file not found, using built-in font");
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(font) => {
                info!(path = %path.display(), glyphs = font.overrides.len(), "font loaded");
                font
            }
            Err(e) => {
                warn!("{e}; using built-in font");
                Self::default()
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ResourceError> {
        let json = std::fs::read_to_string(path).map_err(|e| ResourceError::read(path, e))?;
        Self::from_json(&json).map_err(|e| match e {
            ResourceError::Parse { source, .. } => ResourceError::parse(path, source),
            other => other,
        })
    }

    /// Parse a `{ "A": ["row", ×5], ... }` map.
    pub fn from_json(json: &str) -> Result<Self, ResourceError> {
        let raw: HashMap<String, Vec<String>> =
            serde_json::from_str(json).map_err(|e| ResourceError::parse("<font>", e))?;

        let mut overrides = HashMap::with_capacity(raw.len());
        for (key, rows) in raw {
            let invalid = |reason: &str| ResourceError::InvalidGlyph {
                ch: key.clone(),
                reason: reason.to_string(),
            };

            let mut chars = key.chars();
            let ch = match (chars.next(), chars.next()) {
                (Some(c), None) => c.to_ascii_uppercase(),
                _ => return Err(invalid("key must be a single character")),
            };
            let rows: [String; 5] = rows
                .try_into()
                .map_err(|_| invalid("glyph must have exactly 5 rows"))?;
            let width = rows[0].chars().count();
            if width == 0 || rows.iter().any(|r| r.chars().count() != width) {
                return Err(invalid("rows must be non-empty and equally wide"));
            }
            overrides.insert(ch, rows);
        }
        Ok(Self { overrides })
    }

    pub fn glyph(&self, ch: char) -> Option<[&str; 5]> {
        let upper = ch.to_ascii_uppercase();
        match self.overrides.get(&upper) {
            Some(rows) => Some(rows.each_ref().map(String::as_str)),
            None => builtin_glyph(upper),
        }
    }

    /// Rendered width of `text` in columns, including 1-column spacing
    /// between glyphs.
    pub fn text_width(&self, text: &str) -> u16 {
        let mut width: u16 = 0;
        let mut first = true;
        for ch in text.chars() {
            if let Some(g) = self.glyph(ch) {
                if !first {
                    width += 1;
                }
                width += g[0].chars().count() as u16;
                first = false;
            }
        }
        width
    }
}

/// Large text drawn with a `BitmapFont`, horizontally centred on a canvas.
pub struct Banner<'a> {
    pub font: &'a BitmapFont,
    pub text: &'a str,
    pub canvas_width: u16,
    pub y: u16,
    pub style: Style,
    pub z_order: i32,
    /// Fill character for lit pixels.
    pub ch: char,
}

impl Draw for Banner<'_> {
    fn draw(&self, ops: &mut Vec<DrawOp>) {
        let width = self.font.text_width(self.text);
        let mut cursor_x = self.canvas_width.saturating_sub(width) / 2;
        for ch in self.text.chars() {
            let Some(glyph) = self.font.glyph(ch) else {
                continue;
            };
            for (row, line) in glyph.iter().enumerate() {
                for (col, c) in line.chars().enumerate() {
                    if c != ' ' {
                        ops.push(DrawOp {
                            x: cursor_x + col as u16,
                            y: self.y + row as u16,
                            ch: self.ch,
                            style: self.style,
                            z_order: self.z_order,
                        });
                    }
                }
            }
            cursor_x += glyph[0].chars().count() as u16 + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_covers_the_title() {
        let font = BitmapFont::default();
        assert!("Critical.com".chars().all(|c| font.glyph(c).is_some()));
        assert_eq!(font.text_width("Critical.com"), 63);
        assert!(font.text_width("Critical.com") <= 80);
    }

    #[test]
    fn unknown_characters_are_skipped() {
        let font = BitmapFont::default();
        assert_eq!(font.text_width("A~A"), font.text_width("AA"));
    }

    #[test]
    fn overrides_replace_builtin_glyphs() {
        let font = BitmapFont::from_json(r###"{ "a": ["##", "##", "##", "##", "##"] }"###).unwrap();
        assert_eq!(font.glyph('A'), Some(["##"; 5]));
        assert_eq!(font.glyph('B'), builtin_glyph('B'));
    }

    #[test]
    fn malformed_glyphs_are_rejected() {
        let short = BitmapFont::from_json(r###"{ "A": ["#", "#"] }"###).unwrap_err();
        assert!(matches!(short, ResourceError::InvalidGlyph { .. }));

        let ragged = BitmapFont::from_json(r###"{ "A": ["#", "##", "#", "#", "#"] }"###).unwrap_err();
        assert!(matches!(ragged, ResourceError::InvalidGlyph { .. }));

        let key = BitmapFont::from_json(r###"{ "AB": ["#", "#", "#", "#", "#"] }"###).unwrap_err();
        assert!(matches!(key, ResourceError::InvalidGlyph { .. }));

        let json = BitmapFont::from_json("not json").unwrap_err();
        assert!(matches!(json, ResourceError::Parse { .. }));
    }

    #[test]
    fn missing_file_falls_back_to_builtin() {
        let font = BitmapFont::load(Path::new("/nonexistent/game_font.json"));
        assert_eq!(font.glyph('C'), builtin_glyph('C'));
    }

    #[test]
    fn banner_is_centred() {
        let font = BitmapFont::default();
        let banner = Banner {
            font: &font,
            text: "I",
            canvas_width: 13,
            y: 2,
            style: Style::default(),
            z_order: 0,
            ch: '█',
        };
        let mut ops = Vec::new();
        banner.draw(&mut ops);
        // "###" top row starts at (13 - 3) / 2 = 5
        let top: Vec<u16> = ops.iter().filter(|op| op.y == 2).map(|op| op.x).collect();
        assert_eq!(top, vec![5, 6, 7]);
        assert_eq!(ops.iter().map(|op| op.y).max(), Some(2 + GLYPH_HEIGHT - 1));
    }
}
