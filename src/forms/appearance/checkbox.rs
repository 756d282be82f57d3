//! Checkbox appearances.
//!
//! Plain documents show the symbol as a ZapfDingbats glyph. PDF/A forbids
//! relying on a font the document does not embed, so there every symbol
//! is drawn as a path in a unit square scaled onto the widget.

use super::{AppearanceContext, ToggleAppearances};
use crate::fonts::FontMetrics;
use crate::forms::font_fit::fit_single_line;
use crate::forms::kind::CheckSymbol;
use crate::writer::appearance_stream::AppearanceStreamBuilder;
use crate::writer::content_stream::ContentStreamBuilder;

const CHECK_PATH: &[u8] = b"0.15 0.5 m 0.38 0.22 l 0.86 0.78 l 0.8 0.84 l 0.38 0.36 l 0.21 0.56 l h f";
const CROSS_PATH: &[u8] = b"0.08 w 0.2 0.2 m 0.8 0.8 l 0.2 0.8 m 0.8 0.2 l S";
const DIAMOND_PATH: &[u8] = b"0.5 0.15 m 0.85 0.5 l 0.5 0.85 l 0.15 0.5 l h f";
const SQUARE_PATH: &[u8] = b"0.25 0.25 0.5 0.5 re f";
const STAR_PATH: &[u8] = b"0.5 0.88 m 0.4118 0.6214 l 0.1386 0.6174 l 0.3573 0.4536 l \
0.2766 0.1926 l 0.5 0.35 l 0.7234 0.1926 l 0.6427 0.4536 l 0.8614 0.6174 l 0.5882 0.6214 l h f";

/// On-state name for a checkbox value. `Off` can never name the on state.
///
/// # Examples
///
/// ```
/// use pdf_oxide_forms::forms::appearance::checkbox::on_state_name;
///
/// assert_eq!(on_state_name("Off"), "Yes");
/// assert_eq!(on_state_name("Agreed"), "Agreed");
/// ```
pub fn on_state_name(value: &str) -> &str {
    if value == "Off" || value.is_empty() {
        "Yes"
    } else {
        value
    }
}

/// Render the on and off states of a checkbox.
pub fn render(ctx: &AppearanceContext, symbol: CheckSymbol, on_name: &str) -> ToggleAppearances {
    let mut off = if ctx.is_pdfa() {
        ctx.stream()
    } else {
        ctx.stream_with_font()
    };
    ctx.draw_border(off.content());

    let on = if ctx.is_pdfa() {
        off.force_resources();
        vector_state(ctx, symbol)
    } else {
        glyph_state(ctx, symbol)
    };

    ToggleAppearances {
        on_name: on_state_name(on_name).to_string(),
        on,
        off,
    }
}

fn glyph_state(ctx: &AppearanceContext, symbol: CheckSymbol) -> AppearanceStreamBuilder {
    let (w, h) = (ctx.width(), ctx.height());
    let mut ap = ctx.stream_with_font();
    let content = ap.content();
    ctx.draw_border(content);

    if symbol == CheckSymbol::Cross {
        draw_cross(ctx, content);
        return ap;
    }

    let glyph = symbol.code().to_string();
    let size = if ctx.font_size > 0.0 {
        ctx.font_size
    } else {
        fit_single_line(&ctx.font, ctx.bbox, &glyph, 0.0)
    };
    let x = (w - ctx.font.width(&glyph, size)) / 2.0;
    let y = (h - ctx.font.ascent(size)) / 2.0;
    content
        .begin_text()
        .set_font(&ctx.font_name, size)
        .fill_color(&ctx.text_color)
        .text_at(ctx.font.encode(&glyph), x, y)
        .end_text();
    ap
}

/// Two stroked diagonals across the centered square of the box.
fn draw_cross(ctx: &AppearanceContext, content: &mut ContentStreamBuilder) {
    let (w, h) = (ctx.width(), ctx.height());
    let side = w.min(h);
    let offset = 2.0 * ctx.border_width;
    let (left, right) = ((w - side) / 2.0 + offset, (w + side) / 2.0 - offset);
    let (bottom, top) = ((h - side) / 2.0 + offset, (h + side) / 2.0 - offset);
    content
        .save_state()
        .stroke_color(&ctx.text_color)
        .set_line_width(ctx.border_width.max(1.0))
        .move_to(left, top)
        .line_to(right, bottom)
        .move_to(right, top)
        .line_to(left, bottom)
        .stroke()
        .restore_state();
}

fn vector_state(ctx: &AppearanceContext, symbol: CheckSymbol) -> AppearanceStreamBuilder {
    let (w, h) = (ctx.width(), ctx.height());
    let side = w.min(h);
    let mut ap = ctx.stream();
    ap.force_resources();
    let content = ap.content();
    ctx.draw_border(content);

    content
        .save_state()
        .transform(side, 0.0, 0.0, side, (w - side) / 2.0, (h - side) / 2.0)
        .fill_color(&ctx.text_color)
        .stroke_color(&ctx.text_color);
    match symbol {
        CheckSymbol::Check => content.raw(CHECK_PATH),
        CheckSymbol::Circle => content.circle(0.5, 0.5, 0.3).fill(),
        CheckSymbol::Cross => content.raw(CROSS_PATH),
        CheckSymbol::Diamond => content.raw(DIAMOND_PATH),
        CheckSymbol::Square => content.raw(SQUARE_PATH),
        CheckSymbol::Star => content.raw(STAR_PATH),
    };
    content.restore_state();
    ap
}
