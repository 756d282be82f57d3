//! Appearance stream generation per field kind.
//!
//! PDF Spec: ISO 32000-1:2008, Section 12.7.3.3 (Variable Text) and
//! Section 12.5.6.19 (Widget Annotations)
//!
//! Every renderer takes a fully resolved [`AppearanceContext`]: the box
//! to draw in, colors, the font and its resource name, the size (0 for
//! auto) and the justification. Renderers only draw; storing the result
//! under `/AP` is the field's job.

pub mod checkbox;
pub mod choice;
pub mod push_button;
pub mod radio;
pub mod text;

use crate::color::Color;
use crate::compliance::PdfALevel;
use crate::fonts::StandardFont;
use crate::forms::field_flags::Justification;
use crate::geometry::{Matrix, Rect};
use crate::object::ObjectRef;
use crate::writer::appearance_stream::AppearanceStreamBuilder;
use crate::writer::content_stream::ContentStreamBuilder;

/// Everything a renderer needs to know about one widget.
#[derive(Debug, Clone)]
pub struct AppearanceContext {
    /// Drawing box at the origin, already turned by the rotation
    pub bbox: Rect,
    /// `/Matrix` mapping the drawing box onto the widget
    pub matrix: Option<Matrix>,
    /// Border width in points
    pub border_width: f32,
    /// Border color; no border when unset
    pub border_color: Option<Color>,
    /// Background color; transparent when unset
    pub background_color: Option<Color>,
    /// Text and symbol color
    pub text_color: Color,
    /// Metrics of the field font
    pub font: StandardFont,
    /// `/DR /Font` key of the field font
    pub font_name: String,
    /// Field font dictionary; unset for fields that draw no text
    pub font_ref: Option<ObjectRef>,
    /// Requested size; `0` means auto
    pub font_size: f32,
    /// Horizontal alignment
    pub justification: Justification,
    /// Floor for auto-sized text
    pub min_font_size: f32,
    /// Ceiling for auto-sized text
    pub max_font_size: f32,
    /// PDF/A profile the document must meet
    pub conformance: Option<PdfALevel>,
}

/// The two appearance states of a checkbox or radio button.
#[derive(Debug, Clone)]
pub struct ToggleAppearances {
    /// Name of the on state
    pub on_name: String,
    /// On state stream
    pub on: AppearanceStreamBuilder,
    /// `Off` state stream
    pub off: AppearanceStreamBuilder,
}

impl AppearanceContext {
    /// Drawing box width.
    pub fn width(&self) -> f32 {
        self.bbox.width
    }

    /// Drawing box height.
    pub fn height(&self) -> f32 {
        self.bbox.height
    }

    /// Whether a PDF/A profile applies.
    pub fn is_pdfa(&self) -> bool {
        self.conformance.is_some()
    }

    /// An empty form XObject for this widget.
    pub fn stream(&self) -> AppearanceStreamBuilder {
        let mut ap = AppearanceStreamBuilder::new(self.bbox);
        ap.set_matrix(self.matrix);
        ap
    }

    /// An empty form XObject with the field font in its resources.
    pub fn stream_with_font(&self) -> AppearanceStreamBuilder {
        let mut ap = self.stream();
        if let Some(font_ref) = self.font_ref {
            ap.add_font(&self.font_name, font_ref);
        }
        ap
    }

    /// Auto size for single-line text, capped at the ceiling.
    pub(crate) fn fitted_size(&self, bbox: Rect, text: &str) -> f32 {
        if self.font_size > 0.0 {
            return self.font_size;
        }
        super::font_fit::fit_single_line(&self.font, bbox, text, self.min_font_size)
            .min(self.max_font_size.max(self.min_font_size))
    }

    /// Box inside the border.
    pub(crate) fn inner_box(&self) -> Rect {
        let bw = self.border_width;
        Rect::new(0.0, 0.0, self.width() - 2.0 * bw, self.height() - 2.0 * bw)
    }

    /// Baseline that puts the middle of the font's glyph box at mid-height.
    pub(crate) fn centered_baseline(&self, size: f32) -> f32 {
        use crate::fonts::FontMetrics;
        self.height() / 2.0 - (self.font.ascent(size) + self.font.descent(size)) / 2.0
    }

    /// Background fill and border stroke.
    pub fn draw_border(&self, content: &mut ContentStreamBuilder) {
        self.draw_frame(content, self.background_color.as_ref());
    }

    /// Like [`AppearanceContext::draw_border`] with another background.
    pub(crate) fn draw_frame(&self, content: &mut ContentStreamBuilder, background: Option<&Color>) {
        let (w, h) = (self.width(), self.height());
        if let Some(bg) = background {
            content.fill_color(bg).rect(0.0, 0.0, w, h).fill();
        }

        let bw = self.border_width;
        if bw > 0.0 {
            if let Some(bc) = &self.border_color {
                content
                    .stroke_color(bc)
                    .set_line_width(bw.max(1.0))
                    .rect(bw / 2.0, bw / 2.0, w - bw, h - bw)
                    .stroke();
            }
        }
    }
}

#[cfg(test)]
pub(crate) fn test_context(width: f32, height: f32) -> AppearanceContext {
    AppearanceContext {
        bbox: Rect::new(0.0, 0.0, width, height),
        matrix: None,
        border_width: 1.0,
        border_color: Some(Color::black()),
        background_color: None,
        text_color: Color::black(),
        font: StandardFont::Helvetica,
        font_name: "F1".to_string(),
        font_ref: Some(ObjectRef::new(1, 0)),
        font_size: 12.0,
        justification: Justification::Left,
        min_font_size: 4.0,
        max_font_size: 12.0,
        conformance: None,
    }
}

#[cfg(test)]
pub(crate) fn rendered(ap: &AppearanceStreamBuilder) -> String {
    let stream = ap.build(false).unwrap();
    String::from_utf8(stream.stream_data().unwrap().to_vec()).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_border_and_background() {
        let mut ctx = test_context(100.0, 20.0);
        ctx.background_color = Some(Color::white());
        ctx.border_width = 2.0;
        let mut ap = ctx.stream();
        ctx.draw_border(ap.content());
        assert_eq!(rendered(&ap), "1 g\n0 0 100 20 re\nf\n0 G\n2 w\n1 1 98 18 re\nS\n");
    }

    #[test]
    fn test_no_border_without_color_or_width() {
        let mut ctx = test_context(10.0, 10.0);
        ctx.border_color = None;
        let mut ap = ctx.stream();
        ctx.draw_border(ap.content());
        assert!(ap.content().is_empty());

        let mut ctx = test_context(10.0, 10.0);
        ctx.border_width = 0.0;
        let mut ap = ctx.stream();
        ctx.draw_border(ap.content());
        assert!(ap.content().is_empty());
    }

    #[test]
    fn test_thin_border_stroked_at_one_point() {
        let mut ctx = test_context(10.0, 10.0);
        ctx.border_width = 0.5;
        let mut ap = ctx.stream();
        ctx.draw_border(ap.content());
        assert!(rendered(&ap).contains("1 w\n0.25 0.25 9.5 9.5 re"));
    }

    #[test]
    fn test_fitted_size_respects_fixed_size_and_cap() {
        let mut ctx = test_context(100.0, 20.0);
        assert_eq!(ctx.fitted_size(ctx.inner_box(), "Hello"), 12.0);
        ctx.font_size = 0.0;
        let size = ctx.fitted_size(ctx.inner_box(), "Hello");
        assert!(size >= 4.0 && size <= 12.0);
    }
}
