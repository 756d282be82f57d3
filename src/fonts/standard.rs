//! The PDF Base-14 fonts.
//!
//! Widths are the AFM advance widths for the printable ASCII range and
//! the WinAnsi punctuation block at 0x80..=0x9F; other characters fall
//! back to a family default. Oblique and italic faces share
//! the widths of their upright counterparts.

use super::FontMetrics;
use crate::object::{Dictionary, Object};
use phf::phf_map;

/// One of the fourteen standard Type 1 fonts every viewer provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardFont {
    /// Helvetica
    Helvetica,
    /// Helvetica-Bold
    HelveticaBold,
    /// Helvetica-Oblique
    HelveticaOblique,
    /// Helvetica-BoldOblique
    HelveticaBoldOblique,
    /// Times-Roman
    TimesRoman,
    /// Times-Bold
    TimesBold,
    /// Times-Italic
    TimesItalic,
    /// Times-BoldItalic
    TimesBoldItalic,
    /// Courier
    Courier,
    /// Courier-Bold
    CourierBold,
    /// Courier-Oblique
    CourierOblique,
    /// Courier-BoldOblique
    CourierBoldOblique,
    /// Symbol
    Symbol,
    /// ZapfDingbats
    ZapfDingbats,
}

/// Abbreviations conventionally used as `/DR /Font` keys by form authoring
/// tools, so that `/Helv 0 Tf` works without a resource dictionary.
static ALIASES: phf::Map<&'static str, StandardFont> = phf_map! {
    "Helv" => StandardFont::Helvetica,
    "HeBo" => StandardFont::HelveticaBold,
    "HeOb" => StandardFont::HelveticaOblique,
    "HeBO" => StandardFont::HelveticaBoldOblique,
    "TiRo" => StandardFont::TimesRoman,
    "TiBo" => StandardFont::TimesBold,
    "TiIt" => StandardFont::TimesItalic,
    "TiBI" => StandardFont::TimesBoldItalic,
    "Cour" => StandardFont::Courier,
    "CoBo" => StandardFont::CourierBold,
    "CoOb" => StandardFont::CourierOblique,
    "CoBO" => StandardFont::CourierBoldOblique,
    "Symb" => StandardFont::Symbol,
    "ZaDb" => StandardFont::ZapfDingbats,
};

/// Characters WinAnsiEncoding places at 0x80..=0x9F.
static WIN_ANSI_HIGH: phf::Map<char, u8> = phf_map! {
    '\u{20AC}' => 0x80, '\u{201A}' => 0x82, '\u{0192}' => 0x83, '\u{201E}' => 0x84,
    '\u{2026}' => 0x85, '\u{2020}' => 0x86, '\u{2021}' => 0x87, '\u{02C6}' => 0x88,
    '\u{2030}' => 0x89, '\u{0160}' => 0x8A, '\u{2039}' => 0x8B, '\u{0152}' => 0x8C,
    '\u{017D}' => 0x8E, '\u{2018}' => 0x91, '\u{2019}' => 0x92, '\u{201C}' => 0x93,
    '\u{201D}' => 0x94, '\u{2022}' => 0x95, '\u{2013}' => 0x96, '\u{2014}' => 0x97,
    '\u{02DC}' => 0x98, '\u{2122}' => 0x99, '\u{0161}' => 0x9A, '\u{203A}' => 0x9B,
    '\u{0153}' => 0x9C, '\u{017E}' => 0x9E, '\u{0178}' => 0x9F,
};

// Advance widths for codes 0x80..=0x9F; 0 marks an unassigned code.
#[rustfmt::skip]
const HELVETICA_HIGH_WIDTHS: [u16; 32] = [
    556, 0, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0,
    0, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 0, 500, 667,
];

#[rustfmt::skip]
const HELVETICA_BOLD_HIGH_WIDTHS: [u16; 32] = [
    556, 0, 278, 556, 500, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0,
    0, 278, 278, 500, 500, 350, 556, 1000, 333, 1000, 556, 333, 944, 0, 500, 667,
];

#[rustfmt::skip]
const TIMES_ROMAN_HIGH_WIDTHS: [u16; 32] = [
    500, 0, 333, 500, 444, 1000, 500, 500, 333, 1000, 556, 333, 889, 0, 611, 0,
    0, 333, 333, 444, 444, 350, 500, 1000, 333, 980, 389, 333, 722, 0, 444, 722,
];

#[rustfmt::skip]
const TIMES_BOLD_HIGH_WIDTHS: [u16; 32] = [
    500, 0, 333, 500, 500, 1000, 500, 500, 333, 1000, 556, 333, 1000, 0, 667, 0,
    0, 333, 333, 500, 500, 350, 500, 1000, 333, 1000, 389, 333, 722, 0, 444, 722,
];

// Advance widths for U+0020..=U+007E.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

#[rustfmt::skip]
const TIMES_ROMAN_WIDTHS: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541,
];

#[rustfmt::skip]
const TIMES_BOLD_WIDTHS: [u16; 95] = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 570, 570, 570, 500,
    930, 722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944, 722, 778,
    611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667, 333, 278, 333, 581, 500,
    333, 500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833, 556, 500,
    556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444, 394, 220, 394, 520,
];

impl StandardFont {
    /// All fourteen fonts.
    pub const ALL: [StandardFont; 14] = [
        StandardFont::Helvetica,
        StandardFont::HelveticaBold,
        StandardFont::HelveticaOblique,
        StandardFont::HelveticaBoldOblique,
        StandardFont::TimesRoman,
        StandardFont::TimesBold,
        StandardFont::TimesItalic,
        StandardFont::TimesBoldItalic,
        StandardFont::Courier,
        StandardFont::CourierBold,
        StandardFont::CourierOblique,
        StandardFont::CourierBoldOblique,
        StandardFont::Symbol,
        StandardFont::ZapfDingbats,
    ];

    /// PostScript name used as `/BaseFont`.
    pub fn base_font(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::HelveticaOblique => "Helvetica-Oblique",
            StandardFont::HelveticaBoldOblique => "Helvetica-BoldOblique",
            StandardFont::TimesRoman => "Times-Roman",
            StandardFont::TimesBold => "Times-Bold",
            StandardFont::TimesItalic => "Times-Italic",
            StandardFont::TimesBoldItalic => "Times-BoldItalic",
            StandardFont::Courier => "Courier",
            StandardFont::CourierBold => "Courier-Bold",
            StandardFont::CourierOblique => "Courier-Oblique",
            StandardFont::CourierBoldOblique => "Courier-BoldOblique",
            StandardFont::Symbol => "Symbol",
            StandardFont::ZapfDingbats => "ZapfDingbats",
        }
    }

    /// Look a font up by its `/BaseFont` name.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_oxide_forms::fonts::StandardFont;
    ///
    /// assert_eq!(StandardFont::from_base_font("Times-Bold"), Some(StandardFont::TimesBold));
    /// assert_eq!(StandardFont::from_base_font("Arial"), None);
    /// ```
    pub fn from_base_font(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.base_font() == name)
    }

    /// Look a font up by a resource alias such as `Helv` or `ZaDb`.
    pub fn from_alias(alias: &str) -> Option<Self> {
        ALIASES.get(alias).copied()
    }

    /// Whether glyphs are addressed by a built-in symbolic encoding.
    pub fn is_symbolic(&self) -> bool {
        matches!(self, StandardFont::Symbol | StandardFont::ZapfDingbats)
    }

    /// Font dictionary for this font.
    pub fn to_dictionary(&self) -> Dictionary {
        let mut dict = Dictionary::new();
        dict.insert("Type".to_string(), Object::name("Font"));
        dict.insert("Subtype".to_string(), Object::name("Type1"));
        dict.insert("BaseFont".to_string(), Object::name(self.base_font()));
        if !self.is_symbolic() {
            dict.insert("Encoding".to_string(), Object::name("WinAnsiEncoding"));
        }
        dict
    }

    /// Encode text into single-byte character codes for `Tj`.
    ///
    /// Text fonts use WinAnsiEncoding. Characters it cannot express are
    /// replaced by `?`.
    pub fn encode(&self, text: &str) -> Vec<u8> {
        text.chars()
            .map(|c| {
                if self.is_symbolic() {
                    return if (c as u32) < 0x100 { c as u8 } else { b'?' };
                }
                win_ansi_code(c).unwrap_or(b'?')
            })
            .collect()
    }

    fn high_widths(&self) -> Option<&'static [u16; 32]> {
        match self {
            StandardFont::Helvetica | StandardFont::HelveticaOblique => {
                Some(&HELVETICA_HIGH_WIDTHS)
            },
            StandardFont::HelveticaBold | StandardFont::HelveticaBoldOblique => {
                Some(&HELVETICA_BOLD_HIGH_WIDTHS)
            },
            StandardFont::TimesRoman | StandardFont::TimesItalic => Some(&TIMES_ROMAN_HIGH_WIDTHS),
            StandardFont::TimesBold | StandardFont::TimesBoldItalic => {
                Some(&TIMES_BOLD_HIGH_WIDTHS)
            },
            _ => None,
        }
    }

    fn ascii_widths(&self) -> Option<&'static [u16; 95]> {
        match self {
            StandardFont::Helvetica | StandardFont::HelveticaOblique => Some(&HELVETICA_WIDTHS),
            StandardFont::HelveticaBold | StandardFont::HelveticaBoldOblique => {
                Some(&HELVETICA_BOLD_WIDTHS)
            },
            StandardFont::TimesRoman | StandardFont::TimesItalic => Some(&TIMES_ROMAN_WIDTHS),
            StandardFont::TimesBold | StandardFont::TimesBoldItalic => Some(&TIMES_BOLD_WIDTHS),
            _ => None,
        }
    }

    fn zapf_width(ch: char) -> f32 {
        match ch {
            '4' => 846.0,
            'l' => 791.0,
            '8' => 837.0,
            'u' => 759.0,
            'n' => 761.0,
            'H' => 816.0,
            ' ' => 278.0,
            _ => 788.0,
        }
    }
}

/// WinAnsiEncoding code of `ch`.
///
/// ASCII and the upper Latin-1 half map to themselves; the punctuation
/// block at 0x80..=0x9F comes from its own table. The C1 control range
/// has no code.
fn win_ansi_code(ch: char) -> Option<u8> {
    let code = ch as u32;
    match code {
        0..=0x7F | 0xA0..=0xFF => Some(code as u8),
        _ => WIN_ANSI_HIGH.get(&ch).copied(),
    }
}

impl FontMetrics for StandardFont {
    fn char_width(&self, ch: char) -> f32 {
        match self {
            StandardFont::Courier
            | StandardFont::CourierBold
            | StandardFont::CourierOblique
            | StandardFont::CourierBoldOblique => 600.0,
            StandardFont::ZapfDingbats => Self::zapf_width(ch),
            StandardFont::Symbol => 500.0,
            _ => {
                let code = ch as u32;
                if let (Some(&high), Some(table)) = (WIN_ANSI_HIGH.get(&ch), self.high_widths()) {
                    return table[(high - 0x80) as usize] as f32;
                }
                match self.ascii_widths() {
                    Some(table) if (0x20..=0x7E).contains(&code) => {
                        table[(code - 0x20) as usize] as f32
                    },
                    _ => 500.0,
                }
            },
        }
    }

    fn ascender(&self) -> f32 {
        match self {
            StandardFont::Helvetica
            | StandardFont::HelveticaOblique
            | StandardFont::HelveticaBold
            | StandardFont::HelveticaBoldOblique => 718.0,
            StandardFont::TimesRoman | StandardFont::TimesItalic => 683.0,
            StandardFont::TimesBold | StandardFont::TimesBoldItalic => 676.0,
            StandardFont::Courier | StandardFont::CourierOblique => 629.0,
            StandardFont::CourierBold | StandardFont::CourierBoldOblique => 626.0,
            StandardFont::ZapfDingbats => 820.0,
            StandardFont::Symbol => 750.0,
        }
    }

    fn descender(&self) -> f32 {
        match self {
            StandardFont::Helvetica
            | StandardFont::HelveticaOblique
            | StandardFont::HelveticaBold
            | StandardFont::HelveticaBoldOblique => -207.0,
            StandardFont::TimesRoman | StandardFont::TimesItalic => -217.0,
            StandardFont::TimesBold | StandardFont::TimesBoldItalic => -205.0,
            StandardFont::Courier | StandardFont::CourierOblique => -157.0,
            StandardFont::CourierBold | StandardFont::CourierBoldOblique => -142.0,
            StandardFont::ZapfDingbats => -143.0,
            StandardFont::Symbol => -250.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helvetica_widths() {
        let f = StandardFont::Helvetica;
        assert_eq!(f.char_width(' '), 278.0);
        assert_eq!(f.char_width('H'), 722.0);
        assert_eq!(f.char_width('e'), 556.0);
        assert_eq!(f.char_width('l'), 222.0);
        assert_eq!(f.char_width('o'), 556.0);
        assert_eq!(f.char_width('~'), 584.0);
    }

    #[test]
    fn test_hello_width() {
        // H(722) e(556) l(222) l(222) o(556) = 2278 units
        let width = StandardFont::Helvetica.width("Hello", 10.0);
        assert!((width - 22.78).abs() < 1e-4);
    }

    #[test]
    fn test_courier_is_monospace() {
        let f = StandardFont::Courier;
        assert_eq!(f.width("iii", 10.0), f.width("WWW", 10.0));
    }

    #[test]
    fn test_aliases() {
        assert_eq!(StandardFont::from_alias("Helv"), Some(StandardFont::Helvetica));
        assert_eq!(StandardFont::from_alias("ZaDb"), Some(StandardFont::ZapfDingbats));
        assert_eq!(StandardFont::from_alias("F1"), None);
    }

    #[test]
    fn test_base_font_round_trip() {
        for font in StandardFont::ALL {
            assert_eq!(StandardFont::from_base_font(font.base_font()), Some(font));
        }
    }

    #[test]
    fn test_dictionary() {
        let dict = StandardFont::Helvetica.to_dictionary();
        assert_eq!(dict.get("BaseFont"), Some(&Object::name("Helvetica")));
        assert!(dict.contains_key("Encoding"));
        assert!(!StandardFont::ZapfDingbats.to_dictionary().contains_key("Encoding"));
    }

    #[test]
    fn test_encode_replaces_wide_chars() {
        assert_eq!(StandardFont::Helvetica.encode("a\u{e9}\u{4e2d}"), vec![b'a', 0xE9, b'?']);
        assert_eq!(StandardFont::Helvetica.encode("\u{85}"), vec![b'?']);
    }

    #[test]
    fn test_win_ansi_punctuation() {
        let f = StandardFont::Helvetica;
        assert_eq!(
            f.encode("\u{20ac}\u{2014}\u{201c}x\u{201d}\u{2122}"),
            vec![0x80, 0x97, 0x93, b'x', 0x94, 0x99]
        );
        assert_eq!(f.char_width('\u{20ac}'), 556.0);
        assert_eq!(f.char_width('\u{2014}'), 1000.0);
        assert_eq!(StandardFont::TimesRoman.char_width('\u{2122}'), 980.0);
        assert_eq!(StandardFont::Courier.char_width('\u{2014}'), 600.0);
    }
}
