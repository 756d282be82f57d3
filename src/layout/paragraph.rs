//! Wrapped paragraph layout.

use crate::fonts::FontMetrics;
use crate::forms::field_flags::Justification;
use crate::geometry::Rect;

/// How much of a paragraph fits into its area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutStatus {
    /// Every line fits
    Full,
    /// Some lines fit, the rest overflow
    Partial,
    /// Not even the first line fits
    Nothing,
}

/// A line after placement, in the coordinate space of the layout area.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    /// Line text
    pub text: String,
    /// Left edge of the text
    pub x: f32,
    /// Baseline
    pub baseline: f32,
    /// Advance width of the text
    pub width: f32,
    /// Index of the source line (paragraph line before wrapping)
    pub source_line: usize,
}

/// Outcome of laying a paragraph into an area.
#[derive(Debug, Clone)]
pub struct LayoutResult {
    /// Fit status
    pub status: LayoutStatus,
    /// All lines, including overflowing ones
    pub lines: Vec<PlacedLine>,
    /// Number of leading lines that fit inside the area
    pub fitting_lines: usize,
    /// Distance between consecutive baselines
    pub line_height: f32,
}

/// Styled text to be laid out.
#[derive(Clone)]
pub struct Paragraph<'a> {
    text: &'a str,
    font: &'a dyn FontMetrics,
    font_size: f32,
    leading: f32,
    padding: f32,
    alignment: Justification,
}

impl<'a> Paragraph<'a> {
    /// Create a paragraph at 12pt, leading 1.0, no padding, left aligned.
    pub fn new(text: &'a str, font: &'a dyn FontMetrics) -> Self {
        Self {
            text,
            font,
            font_size: 12.0,
            leading: 1.0,
            padding: 0.0,
            alignment: Justification::Left,
        }
    }

    /// Set the font size.
    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Set the leading as a multiple of the font size.
    pub fn with_leading(mut self, multiplier: f32) -> Self {
        self.leading = multiplier;
        self
    }

    /// Padding applied on all four sides of the area.
    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    /// Horizontal alignment of every line.
    pub fn with_alignment(mut self, alignment: Justification) -> Self {
        self.alignment = alignment;
        self
    }

    /// Current font size.
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Lay out the paragraph into `area`.
    ///
    /// Lines are placed from the top of the area; overflowing lines are
    /// still returned so a caller can force placement and clip.
    pub fn layout(&self, area: Rect) -> LayoutResult {
        let inner = area.inset(self.padding);
        let line_height = self.font_size * self.leading;
        let ascent = self.font.ascent(self.font_size);

        let mut lines = Vec::new();
        for (source_line, raw) in self.text.split('\n').enumerate() {
            for text in self.font.split_string(raw, self.font_size, inner.width) {
                let width = self.font.width(&text, self.font_size);
                let x = match self.alignment {
                    Justification::Left => inner.left(),
                    Justification::Center => inner.left() + (inner.width - width) / 2.0,
                    Justification::Right => inner.right() - width,
                };
                let baseline = inner.top() - lines.len() as f32 * line_height - ascent;
                lines.push(PlacedLine {
                    text,
                    x,
                    baseline,
                    width,
                    source_line,
                });
            }
        }

        let fitting_lines = if line_height > 0.0 {
            ((inner.height / line_height).floor() as usize).min(lines.len())
        } else {
            lines.len()
        };

        let status = if fitting_lines == lines.len() {
            LayoutStatus::Full
        } else if fitting_lines > 0 {
            LayoutStatus::Partial
        } else {
            LayoutStatus::Nothing
        };

        LayoutResult {
            status,
            lines,
            fitting_lines,
            line_height,
        }
    }
}
