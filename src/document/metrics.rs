//! 字体度量

/// 计算字符串在给定字号下的宽度（单位：pt）
pub trait FontMetrics: Send + Sync {
    fn text_width(&self, text: &str, font_size: f32) -> f32;
}

/// PDF 标准 14 字体之一，宽度来自 Adobe Helvetica AFM（千分之一 em）
#[derive(Debug, Clone, Copy, Default)]
pub struct Helvetica;

/// ASCII 32..=126 的字宽
const ASCII_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

/// WinAnsi 0xA0..=0xFF（与 Latin-1 相同）的字宽
const LATIN1_WIDTHS: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333, // nbsp..macron
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611, // degree..questiondown
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // Agrave..Idieresis
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // Eth..germandbls
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278, // agrave..idieresis
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500, // eth..ydieresis
];

/// 无法编码的字符会被画成 '?'，按 '?' 的宽度计算
const FALLBACK_WIDTH: u16 = 556;

impl Helvetica {
    /// 单个字符的宽度（千分之一 em）
    pub fn char_width(c: char) -> u16 {
        match c as u32 {
            code @ 0x20..=0x7e => ASCII_WIDTHS[(code - 0x20) as usize],
            code @ 0xa0..=0xff => LATIN1_WIDTHS[(code - 0xa0) as usize],
            _ => FALLBACK_WIDTH,
        }
    }
}

impl FontMetrics for Helvetica {
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        let units: u32 = text.chars().map(|c| Self::char_width(c) as u32).sum();
        units as f32 * font_size / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_glyph_widths() {
        assert_eq!(Helvetica::char_width(' '), 278);
        assert_eq!(Helvetica::char_width('W'), 944);
        assert_eq!(Helvetica::char_width('i'), 222);
        assert_eq!(Helvetica::char_width('~'), 584);
    }

    #[test]
    fn test_text_width_scales_with_font_size() {
        // "Hi" = 722 + 222
        let width = Helvetica.text_width("Hi", 12.0);
        assert!((width - 944.0 * 12.0 / 1000.0).abs() < 1e-4);
        assert_eq!(Helvetica.text_width("", 12.0), 0.0);
    }

    #[test]
    fn test_latin1_glyph_widths() {
        assert_eq!(Helvetica::char_width('\u{a0}'), 278);
        assert_eq!(Helvetica::char_width('Æ'), 1000);
        assert_eq!(Helvetica::char_width('Ö'), 778);
        assert_eq!(Helvetica::char_width('Ø'), 778);
        assert_eq!(Helvetica::char_width('Ü'), 722);
        assert_eq!(Helvetica::char_width('é'), 556);
        assert_eq!(Helvetica::char_width('ÿ'), 500);
    }

    #[test]
    fn test_unencodable_chars_use_question_mark_width() {
        assert_eq!(Helvetica::char_width('中'), Helvetica::char_width('?'));
        assert_eq!(Helvetica::char_width('\t'), FALLBACK_WIDTH);
    }
}
