//! Font metrics for appearance generation.
//!
//! The appearance engine never touches font programs; it only needs glyph
//! advance widths, the ascender and descender, and a way to break text into
//! lines of a given width. [`FontMetrics`] is that interface and
//! [`StandardFont`] implements it for the Base-14 fonts.

mod standard;

pub use standard::StandardFont;

/// Metrics interface consumed by layout and font size fitting.
///
/// Widths and vertical metrics are expressed in glyph space units
/// (1/1000 em).
pub trait FontMetrics {
    /// Advance width of a single character in glyph space units.
    fn char_width(&self, ch: char) -> f32;

    /// Ascender in glyph space units (positive).
    fn ascender(&self) -> f32;

    /// Descender in glyph space units (negative).
    fn descender(&self) -> f32;

    /// Width of `text` in points at `size`.
    fn width(&self, text: &str, size: f32) -> f32 {
        let units: f32 = text.chars().map(|c| self.char_width(c)).sum();
        units * size / 1000.0
    }

    /// Ascent in points at `size`.
    fn ascent(&self, size: f32) -> f32 {
        self.ascender() * size / 1000.0
    }

    /// Descent in points at `size` (negative).
    fn descent(&self, size: f32) -> f32 {
        self.descender() * size / 1000.0
    }

    /// Split `text` into lines no wider than `max_width` at `size`.
    ///
    /// Explicit line breaks always end a line. Lines are broken at spaces;
    /// a single word wider than the limit is broken between characters.
    /// Every input line yields at least one output line, so blank lines
    /// survive.
    fn split_string(&self, text: &str, size: f32, max_width: f32) -> Vec<String> {
        let mut lines = Vec::new();
        for raw_line in text.split('\n') {
            let raw_line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
            let mut current = String::new();
            let mut current_width = 0.0f32;
            let space_width = self.width(" ", size);

            for word in raw_line.split(' ') {
                let word_width = self.width(word, size);
                let needed = if current.is_empty() {
                    word_width
                } else {
                    current_width + space_width + word_width
                };

                if needed <= max_width {
                    if !current.is_empty() {
                        current.push(' ');
                        current_width += space_width;
                    }
                    current.push_str(word);
                    current_width += word_width;
                    continue;
                }

                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0.0;
                }

                if word_width <= max_width {
                    current.push_str(word);
                    current_width = word_width;
                } else {
                    for ch in word.chars() {
                        let ch_width = self.width(ch.encode_utf8(&mut [0; 4]), size);
                        if !current.is_empty() && current_width + ch_width > max_width {
                            lines.push(std::mem::take(&mut current));
                            current_width = 0.0;
                        }
                        current.push(ch);
                        current_width += ch_width;
                    }
                }
            }
            lines.push(current);
        }
        lines
    }
}
