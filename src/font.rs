//! Built-in 5-row variable width font
//!
//! Each glyph row is a bit mask, most significant used bit on the left.

/// Height of every glyph in rows
pub const GLYPH_HEIGHT: usize = 5;

/// Character rendered in place of anything missing from the table
pub const FALLBACK_CHAR: u8 = b'?';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    code: u8,
    width: u8,
    rows: [u8; GLYPH_HEIGHT],
}

impl Glyph {
    const fn new(code: u8, width: u8, rows: [u8; GLYPH_HEIGHT]) -> Self {
        Self { code, width, rows }
    }

    pub const fn code(&self) -> u8 {
        self.code
    }

    /// Width of the bitmap in columns
    pub const fn width(&self) -> u8 {
        self.width
    }

    /// Horizontal distance to the next glyph (bitmap width plus one blank column)
    pub const fn advance(&self) -> u8 {
        self.width + 1
    }

    /// Check whether the cell at `col`, `row` is lit
    pub const fn is_lit(&self, col: u8, row: usize) -> bool {
        if col >= self.width || row >= GLYPH_HEIGHT {
            return false;
        }
        let shift = self.width - 1 - col;
        (self.rows[row] >> shift) & 1 == 1
    }
}

/// Look up the glyph for `ch`
///
/// Lowercase letters are not in the table; callers normalize case first.
/// Unknown characters resolve to the `?` glyph.
pub fn glyph(ch: char) -> &'static Glyph {
    find(ch).unwrap_or(&FALLBACK)
}

fn find(ch: char) -> Option<&'static Glyph> {
    let code = u8::try_from(ch).ok()?;
    GLYPHS.iter().find(|glyph| glyph.code == code)
}

/// Total advance of `text` after case normalization
pub fn text_width(text: &str) -> i16 {
    text.chars()
        .map(|ch| i16::from(glyph(ch.to_ascii_uppercase()).advance()))
        .fold(0, i16::saturating_add)
}

const FALLBACK: Glyph = Glyph::new(FALLBACK_CHAR, 3, [0b110, 0b001, 0b010, 0b000, 0b010]);

#[rustfmt::skip]
static GLYPHS: [Glyph; 62] = [
    Glyph::new(b'A', 3, [0b010, 0b101, 0b101, 0b111, 0b101]),
    Glyph::new(b'B', 3, [0b110, 0b101, 0b110, 0b101, 0b110]),
    Glyph::new(b'C', 3, [0b011, 0b100, 0b100, 0b100, 0b011]),
    Glyph::new(b'D', 3, [0b110, 0b101, 0b101, 0b101, 0b110]),
    Glyph::new(b'E', 3, [0b111, 0b100, 0b111, 0b100, 0b111]),
    Glyph::new(b'F', 3, [0b111, 0b100, 0b111, 0b100, 0b100]),
    Glyph::new(b'G', 3, [0b011, 0b100, 0b111, 0b101, 0b011]),
    Glyph::new(b'H', 3, [0b101, 0b101, 0b111, 0b101, 0b101]),
    Glyph::new(b'I', 3, [0b111, 0b010, 0b010, 0b010, 0b111]),
    Glyph::new(b'J', 3, [0b001, 0b001, 0b001, 0b001, 0b110]),
    Glyph::new(b'K', 3, [0b101, 0b101, 0b110, 0b101, 0b101]),
    Glyph::new(b'L', 3, [0b100, 0b100, 0b100, 0b100, 0b111]),
    Glyph::new(b'M', 5, [0b10001, 0b11011, 0b10101, 0b10001, 0b10001]),
    Glyph::new(b'N', 4, [0b1001, 0b1101, 0b1011, 0b1001, 0b1001]),
    Glyph::new(b'O', 3, [0b010, 0b101, 0b101, 0b101, 0b010]),
    Glyph::new(b'P', 3, [0b110, 0b101, 0b110, 0b100, 0b100]),
    Glyph::new(b'Q', 3, [0b010, 0b101, 0b101, 0b101, 0b011]),
    Glyph::new(b'R', 3, [0b110, 0b101, 0b110, 0b101, 0b101]),
    Glyph::new(b'S', 3, [0b011, 0b100, 0b010, 0b001, 0b110]),
    Glyph::new(b'T', 3, [0b111, 0b010, 0b010, 0b010, 0b010]),
    Glyph::new(b'U', 3, [0b101, 0b101, 0b101, 0b101, 0b011]),
    Glyph::new(b'V', 3, [0b101, 0b101, 0b101, 0b101, 0b010]),
    Glyph::new(b'W', 5, [0b10001, 0b10001, 0b10101, 0b10101, 0b01010]),
    Glyph::new(b'X', 3, [0b101, 0b101, 0b010, 0b101, 0b101]),
    Glyph::new(b'Y', 3, [0b101, 0b101, 0b010, 0b010, 0b010]),
    Glyph::new(b'Z', 3, [0b111, 0b001, 0b010, 0b100, 0b111]),
    Glyph::new(b'/', 3, [0b001, 0b001, 0b010, 0b100, 0b100]),
    Glyph::new(b'\\', 3, [0b100, 0b100, 0b010, 0b001, 0b001]),
    Glyph::new(b'!', 1, [0b1, 0b1, 0b1, 0b0, 0b1]),
    Glyph::new(b'@', 3, [0b010, 0b111, 0b111, 0b100, 0b011]),
    Glyph::new(b'#', 5, [0b01010, 0b11111, 0b01010, 0b11111, 0b01010]),
    Glyph::new(b'$', 3, [0b011, 0b110, 0b010, 0b011, 0b110]),
    Glyph::new(b'%', 3, [0b100, 0b001, 0b010, 0b100, 0b001]),
    Glyph::new(b'^', 3, [0b010, 0b101, 0b000, 0b000, 0b000]),
    Glyph::new(b'&', 3, [0b010, 0b100, 0b010, 0b101, 0b111]),
    Glyph::new(b'*', 3, [0b101, 0b010, 0b111, 0b010, 0b101]),
    Glyph::new(b'(', 2, [0b01, 0b10, 0b10, 0b10, 0b01]),
    Glyph::new(b')', 2, [0b10, 0b01, 0b01, 0b01, 0b10]),
    Glyph::new(b'-', 3, [0b000, 0b000, 0b111, 0b000, 0b000]),
    Glyph::new(b'_', 3, [0b000, 0b000, 0b000, 0b000, 0b111]),
    Glyph::new(b'+', 3, [0b000, 0b010, 0b111, 0b010, 0b000]),
    Glyph::new(b'=', 3, [0b000, 0b111, 0b000, 0b111, 0b000]),
    Glyph::new(b',', 2, [0b00, 0b00, 0b00, 0b01, 0b10]),
    Glyph::new(b'.', 1, [0b0, 0b0, 0b0, 0b0, 0b1]),
    Glyph::new(b'<', 3, [0b001, 0b010, 0b100, 0b010, 0b001]),
    Glyph::new(b'>', 3, [0b100, 0b010, 0b001, 0b010, 0b100]),
    Glyph::new(b';', 2, [0b00, 0b01, 0b00, 0b01, 0b10]),
    Glyph::new(b':', 1, [0b0, 0b1, 0b0, 0b1, 0b0]),
    Glyph::new(b'\'', 1, [0b1, 0b1, 0b0, 0b0, 0b0]),
    Glyph::new(b'"', 3, [0b101, 0b101, 0b000, 0b000, 0b000]),
    Glyph::new(b'?', 3, [0b110, 0b001, 0b010, 0b000, 0b010]),
    Glyph::new(b' ', 3, [0b000, 0b000, 0b000, 0b000, 0b000]),
    Glyph::new(b'0', 3, [0b010, 0b101, 0b101, 0b101, 0b010]),
    Glyph::new(b'1', 3, [0b010, 0b110, 0b010, 0b010, 0b010]),
    Glyph::new(b'2', 3, [0b110, 0b001, 0b010, 0b100, 0b111]),
    Glyph::new(b'3', 3, [0b110, 0b001, 0b010, 0b001, 0b110]),
    Glyph::new(b'4', 3, [0b101, 0b101, 0b011, 0b001, 0b001]),
    Glyph::new(b'5', 3, [0b111, 0b100, 0b111, 0b001, 0b110]),
    Glyph::new(b'6', 3, [0b011, 0b100, 0b110, 0b101, 0b010]),
    Glyph::new(b'7', 3, [0b111, 0b001, 0b010, 0b010, 0b010]),
    Glyph::new(b'8', 3, [0b010, 0b101, 0b010, 0b101, 0b010]),
    Glyph::new(b'9', 3, [0b010, 0b101, 0b011, 0b001, 0b110]),
];
