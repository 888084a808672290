//! Text metrics for the standard PDF fonts
//!
//! Advance widths come from the Adobe core font AFM files (units of 1/1000
//! em). Text is measured and written in WinAnsiEncoding, the encoding the
//! font dictionaries declare.

use crate::types::StandardFont;

/// First character code covered by the width tables
const FIRST_CHAR: u8 = 32;

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

#[rustfmt::skip]
const TIMES_ROMAN: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541,
];

#[rustfmt::skip]
const TIMES_BOLD: [u16; 95] = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 570, 570, 570, 500,
    930, 722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944, 722, 778,
    611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667, 333, 278, 333, 581, 500,
    333, 500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833, 556, 500,
    556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444, 394, 220, 394, 520,
];

/// Every Courier glyph has the same advance
const COURIER_ADVANCE: u16 = 600;

/// WinAnsi code of the em dash
const EM_DASH: u8 = 0x97;
/// WinAnsi code of the en dash
const EN_DASH: u8 = 0x96;

/// Advance width of one WinAnsi-encoded byte, in 1/1000 em
fn advance(font: StandardFont, code: u8) -> u16 {
    let table = match font {
        StandardFont::Courier | StandardFont::CourierBold => return COURIER_ADVANCE,
        StandardFont::Helvetica => &HELVETICA,
        StandardFont::HelveticaBold => &HELVETICA_BOLD,
        StandardFont::TimesRoman => &TIMES_ROMAN,
        StandardFont::TimesBold => &TIMES_BOLD,
    };

    match code {
        FIRST_CHAR..=126 => table[(code - FIRST_CHAR) as usize],
        EM_DASH => 1000,
        EN_DASH => table[(b'n' - FIRST_CHAR) as usize],
        // Accented Latin letters are close enough to their base lowercase width
        _ => table[(b'o' - FIRST_CHAR) as usize],
    }
}

/// Width of `text` set in `font` at `size` points
pub fn text_width(text: &str, font: StandardFont, size: f32) -> f32 {
    let units: u32 = encode_win_ansi(text)
        .into_iter()
        .map(|code| advance(font, code) as u32)
        .sum();
    units as f32 / 1000.0 * size
}

/// Encode text for a simple font using WinAnsiEncoding.
///
/// Characters without a WinAnsi code become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_code).collect()
}

fn win_ansi_code(ch: char) -> u8 {
    match ch {
        ' '..='~' => ch as u8,
        '\u{A0}'..='\u{FF}' => ch as u32 as u8,
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => EN_DASH,
        '—' => EM_DASH,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => b'?',
    }
}

/// Greedy word wrap of `text` into lines no wider than `max_width`.
///
/// A single word wider than `max_width` gets a line of its own.
pub fn wrap_text(text: &str, font: StandardFont, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if current.is_empty() || text_width(&candidate, font, size) <= max_width {
                current = candidate;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_courier_is_monospaced() {
        assert_eq!(text_width("abc", StandardFont::Courier, 10.0), 18.0);
        assert_eq!(text_width("W.i", StandardFont::CourierBold, 10.0), 18.0);
    }

    #[test]
    fn test_helvetica_widths() {
        // P=667 a=556 g=556 e=556 space=278 1=556
        let width = text_width("Page 1", StandardFont::Helvetica, 10.0);
        assert!((width - 31.69).abs() < 1e-3);
        assert!(
            text_width("Page 1", StandardFont::HelveticaBold, 10.0)
                > text_width("Page 1", StandardFont::Helvetica, 10.0)
        );
    }

    #[test]
    fn test_em_dash_encoding() {
        assert_eq!(encode_win_ansi("a—b"), vec![b'a', 0x97, b'b']);
        assert_eq!(encode_win_ansi("€é"), vec![0x80, 0xE9]);
        assert_eq!(encode_win_ansi("日"), vec![b'?']);
        assert_eq!(text_width("—", StandardFont::Helvetica, 1.0), 1.0);
    }

    #[test]
    fn test_wrap_text() {
        let lines = wrap_text("aaa bbb ccc", StandardFont::Courier, 10.0, 40.0);
        // each word is 18pt wide, "aaa bbb" is 42pt
        assert_eq!(lines, vec!["aaa", "bbb", "ccc"]);

        let lines = wrap_text("aaa bbb ccc", StandardFont::Courier, 10.0, 42.0);
        assert_eq!(lines, vec!["aaa bbb", "ccc"]);

        let lines = wrap_text("first\nsecond", StandardFont::Courier, 10.0, 500.0);
        assert_eq!(lines, vec!["first", "second"]);

        assert!(wrap_text("", StandardFont::Helvetica, 10.0, 100.0).is_empty());
    }
}
