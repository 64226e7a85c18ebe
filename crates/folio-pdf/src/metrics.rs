//! Helvetica text metrics.
//!
//! printpdf's builtin fonts carry no measurement API, so line wrapping uses
//! the Adobe AFM advance widths for Helvetica and Helvetica-Bold (the
//! oblique faces share their upright counterpart's widths). Widths are in
//! 1/1000 em units for ASCII 32..=126; anything outside that range falls
//! back to the average lowercase width.

/// Helvetica (regular/oblique) advance widths, chars 32..=126.
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, 667, // 'A'..'P'
    778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'Q'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, 556, // 'a'..'p'
    556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'q'..'z'
    334, 260, 334, 584, // '{'..'~'
];

/// Helvetica-Bold (and bold oblique) advance widths, chars 32..=126.
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    333, 333, 584, 584, 584, 611, 975, // ':'..'@'
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, 667, // 'A'..'P'
    778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'Q'..'Z'
    333, 278, 333, 584, 556, 333, // '['..'`'
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, 611, // 'a'..'p'
    611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // 'q'..'z'
    389, 280, 389, 584, // '{'..'~'
];

const FALLBACK_WIDTH: u16 = 556;

fn char_width(c: char, bold: bool) -> u16 {
    let table = if bold { &HELVETICA_BOLD } else { &HELVETICA };
    let code = c as usize;
    if (32..=126).contains(&code) {
        table[code - 32]
    } else {
        FALLBACK_WIDTH
    }
}

/// Width of `text` in points at `font_size`.
pub fn text_width(text: &str, font_size: f64, bold: bool) -> f64 {
    let units: u32 = text.chars().map(|c| u32::from(char_width(c, bold))).sum();
    f64::from(units) * font_size / 1000.0
}

/// Greedy word wrap of `content` against `max_width` points.
///
/// Explicit newlines always break. A single word wider than the line gets
/// its own line rather than being split mid-word.
pub fn wrap_text(content: &str, max_width: f64, font_size: f64, bold: bool) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in content.split('\n') {
        if paragraph.is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if current.is_empty() || text_width(&candidate, font_size, bold) <= max_width {
                current = candidate;
            } else {
                lines.push(std::mem::take(&mut current));
                current = word.to_string();
            }
        }
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_width() {
        // 278/1000 em at 10pt.
        assert!((text_width(" ", 10.0, false) - 2.78).abs() < 1e-9);
    }

    #[test]
    fn test_bold_is_wider() {
        let regular = text_width("Hello", 16.0, false);
        let bold = text_width("Hello", 16.0, true);
        assert!(bold > regular);
    }

    #[test]
    fn test_wrap_respects_width() {
        let lines = wrap_text("the quick brown fox jumps over the lazy dog", 100.0, 16.0, false);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, 16.0, false) <= 100.0, "line too wide: {line}");
        }
    }

    #[test]
    fn test_wrap_keeps_short_text_on_one_line() {
        let lines = wrap_text("hello", 200.0, 16.0, false);
        assert_eq!(lines, vec!["hello"]);
    }

    #[test]
    fn test_overlong_word_gets_own_line() {
        let lines = wrap_text("a incomprehensibilities b", 40.0, 16.0, false);
        assert!(lines.contains(&"incomprehensibilities".to_string()));
    }

    #[test]
    fn test_explicit_newlines_break() {
        let lines = wrap_text("one\ntwo\n\nthree", 500.0, 16.0, false);
        assert_eq!(lines, vec!["one", "two", "", "three"]);
    }

    #[test]
    fn test_non_ascii_uses_fallback() {
        assert!(text_width("é", 10.0, false) > 0.0);
    }
}
