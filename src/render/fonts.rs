//! Standard-14 Helvetica metrics and WinAnsi text encoding for the PDF.
//!
//! The PDF uses the built-in Helvetica and Helvetica-Bold fonts, so nothing
//! is embedded; text is encoded as WinAnsi (Windows-1252) bytes and measured
//! with the Adobe font metrics below. Widths are in 1/1000 em.
//!
//! ASCII widths are exact. Accented Latin-1 letters are measured as their
//! base letter and other non-ASCII characters use a fixed fallback, which is
//! close enough for line wrapping.

/// The two faces used by the PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
}

/// Widths of `' '..='~'` in Helvetica.
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,      // 'p'..'~'
];

/// Widths of `' '..='~'` in Helvetica-Bold.
#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Width of anything the tables don't cover.
const FALLBACK_WIDTH: u16 = 556;

/// Windows-1252 bytes 0x80..=0x9F and the characters they encode.
const WINANSI_SPECIALS: &[(char, u8)] = &[
    ('\u{20AC}', 0x80),
    ('\u{201A}', 0x82),
    ('\u{0192}', 0x83),
    ('\u{201E}', 0x84),
    ('\u{2026}', 0x85),
    ('\u{2020}', 0x86),
    ('\u{2021}', 0x87),
    ('\u{02C6}', 0x88),
    ('\u{2030}', 0x89),
    ('\u{0160}', 0x8A),
    ('\u{2039}', 0x8B),
    ('\u{0152}', 0x8C),
    ('\u{017D}', 0x8E),
    ('\u{2018}', 0x91),
    ('\u{2019}', 0x92),
    ('\u{201C}', 0x93),
    ('\u{201D}', 0x94),
    ('\u{2022}', 0x95),
    ('\u{2013}', 0x96),
    ('\u{2014}', 0x97),
    ('\u{02DC}', 0x98),
    ('\u{2122}', 0x99),
    ('\u{0161}', 0x9A),
    ('\u{203A}', 0x9B),
    ('\u{0153}', 0x9C),
    ('\u{017E}', 0x9E),
    ('\u{0178}', 0x9F),
];

impl Font {
    /// Resource name used in page content streams.
    pub fn resource_name(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }

    /// PostScript name of the standard font.
    pub fn base_font(self) -> &'static str {
        match self {
            Font::Regular => "Helvetica",
            Font::Bold => "Helvetica-Bold",
        }
    }

    fn ascii_widths(self) -> &'static [u16; 95] {
        match self {
            Font::Regular => &HELVETICA,
            Font::Bold => &HELVETICA_BOLD,
        }
    }

    /// Width of one WinAnsi byte in 1/1000 em.
    pub fn byte_width(self, byte: u8) -> u16 {
        match byte {
            0x20..=0x7E => self.ascii_widths()[(byte - 0x20) as usize],
            0x95 => 350,
            0x85 | 0x89 | 0x97 | 0x99 => 1000,
            0x91 | 0x92 | 0x82 => match self {
                Font::Regular => 222,
                Font::Bold => 278,
            },
            0x93 | 0x94 | 0x84 => match self {
                Font::Regular => 333,
                Font::Bold => 500,
            },
            0xA0 => 278,
            _ => fold_latin1(byte)
                .map(|base| self.ascii_widths()[(base - 0x20) as usize])
                .unwrap_or(FALLBACK_WIDTH),
        }
    }

    /// Width of `text` at `size` points.
    pub fn text_width(self, text: &str, size: f32) -> f32 {
        let units: u32 = encode_winansi(text)
            .into_iter()
            .map(|b| self.byte_width(b) as u32)
            .sum();
        units as f32 * size / 1000.0
    }
}

/// Base ASCII letter of an accented Latin-1 letter.
fn fold_latin1(byte: u8) -> Option<u8> {
    let base = match byte {
        0xC0..=0xC5 => b'A',
        0xC7 => b'C',
        0xC8..=0xCB => b'E',
        0xCC..=0xCF => b'I',
        0xD1 => b'N',
        0xD2..=0xD6 | 0xD8 => b'O',
        0xD9..=0xDC => b'U',
        0xDD => b'Y',
        0xE0..=0xE5 => b'a',
        0xE7 => b'c',
        0xE8..=0xEB => b'e',
        0xEC..=0xEF => b'i',
        0xF1 => b'n',
        0xF2..=0xF6 | 0xF8 => b'o',
        0xF9..=0xFC => b'u',
        0xFD | 0xFF => b'y',
        _ => return None,
    };
    Some(base)
}

/// Encode text as WinAnsi bytes; unmappable characters become `?`.
///
/// Control characters (tabs, newlines) are written as spaces.
pub fn encode_winansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            0x20..=0x7E | 0xA0..=0xFF => c as u8,
            0x00..=0x1F => b' ',
            _ => WINANSI_SPECIALS
                .iter()
                .find(|(ch, _)| *ch == c)
                .map(|&(_, b)| b)
                .unwrap_or(b'?'),
        })
        .collect()
}

/// Break text into lines no wider than `max_width` points.
///
/// Splits on whitespace; a single word wider than the line is broken
/// between characters. Always returns at least one (possibly empty) line.
pub fn wrap(text: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if font.text_width(&candidate, size) <= max_width {
            current = candidate;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if font.text_width(word, size) <= max_width {
            current = word.to_string();
        } else {
            for c in word.chars() {
                let mut next = current.clone();
                next.push(c);
                if !current.is_empty() && font.text_width(&next, size) > max_width {
                    lines.push(std::mem::take(&mut current));
                    current.push(c);
                } else {
                    current = next;
                }
            }
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Metrics
    // =========================================================================

    #[test]
    fn ascii_widths_match_afm() {
        assert_eq!(Font::Regular.byte_width(b' '), 278);
        assert_eq!(Font::Regular.byte_width(b'A'), 667);
        assert_eq!(Font::Regular.byte_width(b'i'), 222);
        assert_eq!(Font::Regular.byte_width(b'W'), 944);
        assert_eq!(Font::Regular.byte_width(b'~'), 584);
        assert_eq!(Font::Bold.byte_width(b'i'), 278);
        assert_eq!(Font::Bold.byte_width(b'@'), 975);
    }

    #[test]
    fn text_width_scales_with_size() {
        // "Hi" = 722 + 222
        assert!((Font::Regular.text_width("Hi", 10.0) - 9.44).abs() < 1e-4);
        assert!((Font::Regular.text_width("Hi", 20.0) - 18.88).abs() < 1e-4);
    }

    #[test]
    fn bold_is_wider() {
        let text = "Exterior Front";
        assert!(Font::Bold.text_width(text, 12.0) > Font::Regular.text_width(text, 12.0));
    }

    #[test]
    fn accented_letters_measure_as_base_letter() {
        assert_eq!(
            Font::Regular.text_width("caf\u{e9}", 10.0),
            Font::Regular.text_width("cafe", 10.0)
        );
    }

    #[test]
    fn bullet_and_dashes_have_widths() {
        assert_eq!(Font::Regular.byte_width(0x95), 350);
        assert_eq!(Font::Regular.byte_width(0x96), 556);
        assert_eq!(Font::Regular.byte_width(0x97), 1000);
    }

    // =========================================================================
    // WinAnsi encoding
    // =========================================================================

    #[test]
    fn encode_ascii_is_identity() {
        assert_eq!(encode_winansi("Kitchen 2."), b"Kitchen 2.".to_vec());
    }

    #[test]
    fn encode_punctuation_specials() {
        assert_eq!(encode_winansi("a \u{2022} b"), vec![b'a', b' ', 0x95, b' ', b'b']);
        assert_eq!(encode_winansi("\u{2014}"), vec![0x97]);
        assert_eq!(encode_winansi("\u{2019}"), vec![0x92]);
    }

    #[test]
    fn encode_latin1_passes_through() {
        assert_eq!(encode_winansi("\u{e9}"), vec![0xE9]);
    }

    #[test]
    fn encode_unmappable_becomes_question_mark() {
        assert_eq!(encode_winansi("\u{65e5}"), vec![b'?']);
    }

    #[test]
    fn encode_control_chars_become_spaces() {
        assert_eq!(encode_winansi("a\tb\n"), b"a b ".to_vec());
    }

    // =========================================================================
    // wrap
    // =========================================================================

    #[test]
    fn wrap_short_text_is_one_line() {
        assert_eq!(wrap("Kitchen", Font::Regular, 10.0, 100.0), vec!["Kitchen"]);
    }

    #[test]
    fn wrap_empty_text_is_one_empty_line() {
        assert_eq!(wrap("", Font::Regular, 10.0, 100.0), vec![""]);
        assert_eq!(wrap("   ", Font::Regular, 10.0, 100.0), vec![""]);
    }

    #[test]
    fn wrap_breaks_between_words() {
        let text = "Bright open living room with a stone fireplace and lake views";
        let lines = wrap(text, Font::Regular, 10.0, 120.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(Font::Regular.text_width(line, 10.0) <= 120.0, "{line}");
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn wrap_breaks_long_words() {
        let word = "W".repeat(30);
        let lines = wrap(&word, Font::Regular, 10.0, 50.0);
        // 944/1000 * 10 = 9.44pt per W -> 5 per line
        assert_eq!(lines.len(), 6);
        assert!(lines.iter().all(|l| l.len() == 5));
    }

    #[test]
    fn wrap_collapses_whitespace() {
        assert_eq!(wrap("a   b\n c", Font::Regular, 10.0, 500.0), vec!["a b c"]);
    }
}
