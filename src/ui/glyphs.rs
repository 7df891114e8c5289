//! Seven-segment glyphs drawn with block characters.
//!
//! ```text
//!   aaaa
//!  f    b
//!  f    b
//!   gggg
//!  e    c
//!  e    c
//!   dddd
//! ```

/// Rows of a large digit.
pub const LARGE_HEIGHT: usize = 7;

/// Rows of a small digit (bottom-aligned with the large ones).
pub const SMALL_HEIGHT: usize = 5;

const SEG_A: u8 = 1 << 0;
const SEG_B: u8 = 1 << 1;
const SEG_C: u8 = 1 << 2;
const SEG_D: u8 = 1 << 3;
const SEG_E: u8 = 1 << 4;
const SEG_F: u8 = 1 << 5;
const SEG_G: u8 = 1 << 6;

const BLOCK: char = '█';

/// Lit segments for each decimal digit.
const DIGIT_SEGMENTS: [u8; 10] = [
    SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F,
    SEG_B | SEG_C,
    SEG_A | SEG_B | SEG_D | SEG_E | SEG_G,
    SEG_A | SEG_B | SEG_C | SEG_D | SEG_G,
    SEG_B | SEG_C | SEG_F | SEG_G,
    SEG_A | SEG_C | SEG_D | SEG_F | SEG_G,
    SEG_A | SEG_C | SEG_D | SEG_E | SEG_F | SEG_G,
    SEG_A | SEG_B | SEG_C,
    SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F | SEG_G,
    SEG_A | SEG_B | SEG_C | SEG_D | SEG_F | SEG_G,
];

/// Segment mask for a digit; values above 9 render blank.
pub fn segments(digit: u8) -> u8 {
    DIGIT_SEGMENTS.get(usize::from(digit)).copied().unwrap_or(0)
}

fn horizontal(on: bool, inner: usize) -> String {
    let fill = if on { BLOCK } else { ' ' };
    format!(" {} ", fill.to_string().repeat(inner))
}

fn vertical(left: bool, right: bool, inner: usize) -> String {
    let l = if left { BLOCK } else { ' ' };
    let r = if right { BLOCK } else { ' ' };
    format!("{}{}{}", l, " ".repeat(inner), r)
}

/// A digit as `LARGE_HEIGHT` rows of equal width.
pub fn large_digit(digit: u8) -> Vec<String> {
    let mask = segments(digit);
    let on = |seg: u8| mask & seg != 0;
    let inner = 4;

    vec![
        horizontal(on(SEG_A), inner),
        vertical(on(SEG_F), on(SEG_B), inner),
        vertical(on(SEG_F), on(SEG_B), inner),
        horizontal(on(SEG_G), inner),
        vertical(on(SEG_E), on(SEG_C), inner),
        vertical(on(SEG_E), on(SEG_C), inner),
        horizontal(on(SEG_D), inner),
    ]
}

/// A digit as `SMALL_HEIGHT` rows of equal width.
pub fn small_digit(digit: u8) -> Vec<String> {
    let mask = segments(digit);
    let on = |seg: u8| mask & seg != 0;
    let inner = 2;

    vec![
        horizontal(on(SEG_A), inner),
        vertical(on(SEG_F), on(SEG_B), inner),
        horizontal(on(SEG_G), inner),
        vertical(on(SEG_E), on(SEG_C), inner),
        horizontal(on(SEG_D), inner),
    ]
}

/// The colon between minutes and seconds.
pub fn colon() -> Vec<String> {
    (0..LARGE_HEIGHT)
        .map(|row| if row == 2 || row == 4 { " ▪ " } else { "   " }.to_string())
        .collect()
}

/// The small double dot in front of the tenths digit.
pub fn small_double_dot() -> Vec<String> {
    (0..SMALL_HEIGHT)
        .map(|row| if row == 1 || row == 3 { "▪" } else { " " }.to_string())
        .collect()
}
