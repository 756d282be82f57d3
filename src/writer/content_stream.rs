//! PDF content stream builder.
//!
//! Builds the operator sequences that make up appearance streams
//! according to PDF specification ISO 32000-1:2008 Section 8-9.

use crate::color::Color;
use crate::error::Result;
use std::fmt;
use std::io::Write;

/// Operations that can be added to a content stream.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentStreamOp {
    /// Save graphics state (q)
    SaveState,
    /// Restore graphics state (Q)
    RestoreState,
    /// Concatenate transformation matrix (cm)
    Transform(f32, f32, f32, f32, f32, f32),
    /// Begin text object (BT)
    BeginText,
    /// End text object (ET)
    EndText,
    /// Set font and size (Tf)
    SetFont(String, f32),
    /// Set text matrix (Tm)
    SetTextMatrix(f32, f32, f32, f32, f32, f32),
    /// Show text (Tj); bytes are already encoded for the font
    ShowText(Vec<u8>),
    /// Set fill color RGB (rg)
    SetFillColorRGB(f32, f32, f32),
    /// Set stroke color RGB (RG)
    SetStrokeColorRGB(f32, f32, f32),
    /// Set fill color gray (g)
    SetFillColorGray(f32),
    /// Set stroke color gray (G)
    SetStrokeColorGray(f32),
    /// Set fill color CMYK (k)
    SetFillColorCMYK(f32, f32, f32, f32),
    /// Set stroke color CMYK (K)
    SetStrokeColorCMYK(f32, f32, f32, f32),
    /// Set line width (w)
    SetLineWidth(f32),
    /// Move to (m)
    MoveTo(f32, f32),
    /// Line to (l)
    LineTo(f32, f32),
    /// Curve to (c)
    CurveTo(f32, f32, f32, f32, f32, f32),
    /// Rectangle (re)
    Rectangle(f32, f32, f32, f32),
    /// Close path (h)
    ClosePath,
    /// Stroke (S)
    Stroke,
    /// Fill (f)
    Fill,
    /// End path without filling/stroking (n)
    EndPath,
    /// Clip using non-zero winding rule (W)
    Clip,
    /// Paint XObject (Do)
    PaintXObject(String),
    /// Begin marked content (BMC)
    BeginMarkedContent(String),
    /// End marked content (EMC)
    EndMarkedContent,
    /// Literal bytes copied into the stream unchanged
    Raw(Vec<u8>),
}

/// Number formatting for operands: shortest round-trip form, no `-0`.
pub(crate) struct Num(pub(crate) f32);

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0.0 || !self.0.is_finite() {
            write!(f, "0")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Builder for PDF content streams.
#[derive(Debug, Clone, Default)]
pub struct ContentStreamBuilder {
    /// Operations to emit
    operations: Vec<ContentStreamOp>,
    /// Current font name
    current_font: Option<String>,
    /// Current font size
    current_font_size: f32,
    /// Whether we're in a text object
    in_text_object: bool,
}

impl ContentStreamBuilder {
    /// Create a new content stream builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an operation to the stream.
    pub fn op(&mut self, op: ContentStreamOp) -> &mut Self {
        self.operations.push(op);
        self
    }

    /// Operations recorded so far.
    pub fn operations(&self) -> &[ContentStreamOp] {
        &self.operations
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Begin a text object.
    pub fn begin_text(&mut self) -> &mut Self {
        if !self.in_text_object {
            self.op(ContentStreamOp::BeginText);
            self.in_text_object = true;
        }
        self
    }

    /// End a text object.
    pub fn end_text(&mut self) -> &mut Self {
        if self.in_text_object {
            self.op(ContentStreamOp::EndText);
            self.in_text_object = false;
        }
        self
    }

    /// Set font resource and size for text operations.
    pub fn set_font(&mut self, font_name: &str, size: f32) -> &mut Self {
        if self.current_font.as_deref() != Some(font_name) || self.current_font_size != size {
            self.op(ContentStreamOp::SetFont(font_name.to_string(), size));
            self.current_font = Some(font_name.to_string());
            self.current_font_size = size;
        }
        self
    }

    /// Place already encoded text at an absolute position (Tm + Tj).
    pub fn text_at(&mut self, encoded: Vec<u8>, x: f32, y: f32) -> &mut Self {
        self.begin_text();
        self.op(ContentStreamOp::SetTextMatrix(1.0, 0.0, 0.0, 1.0, x, y));
        self.op(ContentStreamOp::ShowText(encoded))
    }

    /// Show already encoded text at the current position (Tj).
    pub fn show_text(&mut self, encoded: Vec<u8>) -> &mut Self {
        self.op(ContentStreamOp::ShowText(encoded))
    }

    /// Set the fill color in whichever device space the color uses.
    pub fn fill_color(&mut self, color: &Color) -> &mut Self {
        match color.to_device() {
            Color::Gray(g) => self.op(ContentStreamOp::SetFillColorGray(g)),
            Color::Rgb(r, g, b) => self.op(ContentStreamOp::SetFillColorRGB(r, g, b)),
            Color::Cmyk(c, m, y, k) => self.op(ContentStreamOp::SetFillColorCMYK(c, m, y, k)),
            Color::Separation { .. } => self,
        }
    }

    /// Set the stroke color in whichever device space the color uses.
    pub fn stroke_color(&mut self, color: &Color) -> &mut Self {
        match color.to_device() {
            Color::Gray(g) => self.op(ContentStreamOp::SetStrokeColorGray(g)),
            Color::Rgb(r, g, b) => self.op(ContentStreamOp::SetStrokeColorRGB(r, g, b)),
            Color::Cmyk(c, m, y, k) => {
                self.op(ContentStreamOp::SetStrokeColorCMYK(c, m, y, k))
            },
            Color::Separation { .. } => self,
        }
    }

    /// Set line width.
    pub fn set_line_width(&mut self, width: f32) -> &mut Self {
        self.op(ContentStreamOp::SetLineWidth(width))
    }

    /// Move to a point.
    pub fn move_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.op(ContentStreamOp::MoveTo(x, y))
    }

    /// Draw a line to a point.
    pub fn line_to(&mut self, x: f32, y: f32) -> &mut Self {
        self.op(ContentStreamOp::LineTo(x, y))
    }

    /// Draw a cubic Bézier curve.
    pub fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32) -> &mut Self {
        self.op(ContentStreamOp::CurveTo(x1, y1, x2, y2, x3, y3))
    }

    /// Draw a rectangle.
    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32) -> &mut Self {
        self.op(ContentStreamOp::Rectangle(x, y, width, height))
    }

    /// Stroke the current path.
    pub fn stroke(&mut self) -> &mut Self {
        self.op(ContentStreamOp::Stroke)
    }

    /// Fill the current path.
    pub fn fill(&mut self) -> &mut Self {
        self.op(ContentStreamOp::Fill)
    }

    /// Close the current subpath.
    pub fn close_path(&mut self) -> &mut Self {
        self.op(ContentStreamOp::ClosePath)
    }

    /// Intersect the clip with the current path.
    pub fn clip(&mut self) -> &mut Self {
        self.op(ContentStreamOp::Clip)
    }

    /// End the path without painting.
    pub fn end_path(&mut self) -> &mut Self {
        self.op(ContentStreamOp::EndPath)
    }

    /// Set clipping rectangle (`re W n`).
    pub fn clip_rect(&mut self, x: f32, y: f32, width: f32, height: f32) -> &mut Self {
        self.rect(x, y, width, height).clip().end_path()
    }

    /// Save graphics state.
    pub fn save_state(&mut self) -> &mut Self {
        self.op(ContentStreamOp::SaveState)
    }

    /// Restore graphics state. The font is part of that state.
    pub fn restore_state(&mut self) -> &mut Self {
        self.current_font = None;
        self.current_font_size = 0.0;
        self.op(ContentStreamOp::RestoreState)
    }

    /// Concatenate a transformation matrix.
    pub fn transform(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> &mut Self {
        self.op(ContentStreamOp::Transform(a, b, c, d, e, f))
    }

    /// Open a marked-content sequence such as `/Tx BMC`.
    pub fn begin_marked_content(&mut self, tag: &str) -> &mut Self {
        self.op(ContentStreamOp::BeginMarkedContent(tag.to_string()))
    }

    /// Close the innermost marked-content sequence.
    pub fn end_marked_content(&mut self) -> &mut Self {
        self.op(ContentStreamOp::EndMarkedContent)
    }

    /// Paint a named XObject with the given placement matrix (`q cm Do Q`).
    pub fn draw_xobject(
        &mut self,
        resource_name: &str,
        a: f32,
        b: f32,
        c: f32,
        d: f32,
        e: f32,
        f: f32,
    ) -> &mut Self {
        self.save_state()
            .transform(a, b, c, d, e, f)
            .op(ContentStreamOp::PaintXObject(resource_name.to_string()))
            .restore_state()
    }

    /// Draw a circle.
    ///
    /// Uses Bézier curves to approximate a circle.
    pub fn circle(&mut self, cx: f32, cy: f32, radius: f32) -> &mut Self {
        // 4/3 * (sqrt(2) - 1)
        let k = 0.552_284_8;
        let c = radius * k;

        self.move_to(cx + radius, cy)
            .curve_to(cx + radius, cy + c, cx + c, cy + radius, cx, cy + radius)
            .curve_to(cx - c, cy + radius, cx - radius, cy + c, cx - radius, cy)
            .curve_to(cx - radius, cy - c, cx - c, cy - radius, cx, cy - radius)
            .curve_to(cx + c, cy - radius, cx + radius, cy - c, cx + radius, cy)
            .close_path()
    }

    /// Inject literal operator bytes.
    pub fn raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.op(ContentStreamOp::Raw(bytes.to_vec()))
    }

    /// Build the content stream to bytes.
    pub fn build(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();

        for op in &self.operations {
            self.write_op(&mut buf, op)?;
            writeln!(buf)?;
        }

        Ok(buf)
    }

    /// Write a single operation to the buffer.
    fn write_op<W: Write>(&self, w: &mut W, op: &ContentStreamOp) -> std::io::Result<()> {
        match op {
            ContentStreamOp::SaveState => write!(w, "q"),
            ContentStreamOp::RestoreState => write!(w, "Q"),
            ContentStreamOp::Transform(a, b, c, d, e, f) => write!(
                w,
                "{} {} {} {} {} {} cm",
                Num(*a),
                Num(*b),
                Num(*c),
                Num(*d),
                Num(*e),
                Num(*f)
            ),
            ContentStreamOp::BeginText => write!(w, "BT"),
            ContentStreamOp::EndText => write!(w, "ET"),
            ContentStreamOp::SetFont(name, size) => write!(w, "/{} {} Tf", name, Num(*size)),
            ContentStreamOp::SetTextMatrix(a, b, c, d, e, f) => write!(
                w,
                "{} {} {} {} {} {} Tm",
                Num(*a),
                Num(*b),
                Num(*c),
                Num(*d),
                Num(*e),
                Num(*f)
            ),
            ContentStreamOp::ShowText(bytes) => {
                write!(w, "(")?;
                self.write_escaped_string(w, bytes)?;
                write!(w, ") Tj")
            },
            ContentStreamOp::SetFillColorRGB(r, g, b) => {
                write!(w, "{} {} {} rg", Num(*r), Num(*g), Num(*b))
            },
            ContentStreamOp::SetStrokeColorRGB(r, g, b) => {
                write!(w, "{} {} {} RG", Num(*r), Num(*g), Num(*b))
            },
            ContentStreamOp::SetFillColorGray(g) => write!(w, "{} g", Num(*g)),
            ContentStreamOp::SetStrokeColorGray(g) => write!(w, "{} G", Num(*g)),
            ContentStreamOp::SetFillColorCMYK(c, m, y, k) => {
                write!(w, "{} {} {} {} k", Num(*c), Num(*m), Num(*y), Num(*k))
            },
            ContentStreamOp::SetStrokeColorCMYK(c, m, y, k) => {
                write!(w, "{} {} {} {} K", Num(*c), Num(*m), Num(*y), Num(*k))
            },
            ContentStreamOp::SetLineWidth(width) => write!(w, "{} w", Num(*width)),
            ContentStreamOp::MoveTo(x, y) => write!(w, "{} {} m", Num(*x), Num(*y)),
            ContentStreamOp::LineTo(x, y) => write!(w, "{} {} l", Num(*x), Num(*y)),
            ContentStreamOp::CurveTo(x1, y1, x2, y2, x3, y3) => write!(
                w,
                "{} {} {} {} {} {} c",
                Num(*x1),
                Num(*y1),
                Num(*x2),
                Num(*y2),
                Num(*x3),
                Num(*y3)
            ),
            ContentStreamOp::Rectangle(x, y, w_val, h) => {
                write!(w, "{} {} {} {} re", Num(*x), Num(*y), Num(*w_val), Num(*h))
            },
            ContentStreamOp::ClosePath => write!(w, "h"),
            ContentStreamOp::Stroke => write!(w, "S"),
            ContentStreamOp::Fill => write!(w, "f"),
            ContentStreamOp::EndPath => write!(w, "n"),
            ContentStreamOp::Clip => write!(w, "W"),
            ContentStreamOp::PaintXObject(name) => write!(w, "/{} Do", name),
            ContentStreamOp::BeginMarkedContent(tag) => write!(w, "/{} BMC", tag),
            ContentStreamOp::EndMarkedContent => write!(w, "EMC"),
            ContentStreamOp::Raw(raw) => w.write_all(raw),
        }
    }

    /// Write an escaped PDF string.
    fn write_escaped_string<W: Write>(&self, w: &mut W, bytes: &[u8]) -> std::io::Result<()> {
        for &byte in bytes {
            match byte {
                b'(' => write!(w, "\\(")?,
                b')' => write!(w, "\\)")?,
                b'\\' => write!(w, "\\\\")?,
                b'\n' => write!(w, "\\n")?,
                b'\r' => write!(w, "\\r")?,
                b'\t' => write!(w, "\\t")?,
                _ => w.write_all(&[byte])?,
            }
        }
        Ok(())
    }
}
