//! Text field appearances: single line, comb and multi-line.

use super::AppearanceContext;
use crate::fonts::FontMetrics;
use crate::forms::field_flags::Justification;
use crate::forms::font_fit::fit_multi_line;
use crate::geometry::Rect;
use crate::layout::{LayoutStatus, Paragraph};
use crate::writer::appearance_stream::AppearanceStreamBuilder;

/// Left and right inset of single-line text.
const TEXT_INSET: f32 = 2.0;

/// Padding around multi-line text.
const MULTILINE_PADDING: f32 = 3.0;

/// Shaved off the layout height so a paragraph overflows instead of
/// splitting exactly at the box edge.
const HEIGHT_EPSILON: f32 = 1e-5;

/// The value as shown. Passwords are masked line by line so that line
/// breaks survive.
fn displayed(value: &str, password: bool) -> String {
    if !password {
        return value.to_string();
    }
    value
        .split('\n')
        .map(|line| {
            let line = line.strip_suffix('\r').unwrap_or(line);
            "*".repeat(line.chars().count())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Single-line text field.
///
/// Line breaks in the value are shown as spaces.
pub fn plain(ctx: &AppearanceContext, value: &str, password: bool) -> AppearanceStreamBuilder {
    let text = displayed(value, password)
        .replace("\r\n", " ")
        .replace(['\r', '\n'], " ");
    let (w, h) = (ctx.width(), ctx.height());
    let bw = ctx.border_width;
    let size = ctx.fitted_size(ctx.inner_box(), &text);

    let mut ap = ctx.stream_with_font();
    let content = ap.content();
    ctx.draw_border(content);
    content
        .begin_marked_content("Tx")
        .save_state()
        .clip_rect(bw, bw, w - 2.0 * bw, h - 2.0 * bw);

    if !text.is_empty() {
        let width = ctx.font.width(&text, size);
        let x = match ctx.justification {
            Justification::Left => TEXT_INSET,
            Justification::Center => (w - width) / 2.0,
            Justification::Right => w - TEXT_INSET - width,
        };
        content
            .begin_text()
            .set_font(&ctx.font_name, size)
            .fill_color(&ctx.text_color)
            .text_at(ctx.font.encode(&text), x, ctx.centered_baseline(size))
            .end_text();
    }

    content.restore_state().end_marked_content();
    ap
}

/// Text spread over `max_len` equal cells, one glyph per cell.
///
/// Characters beyond `max_len` are not shown. Justification picks the
/// first cell used.
pub fn comb(
    ctx: &AppearanceContext,
    value: &str,
    max_len: u32,
    password: bool,
) -> AppearanceStreamBuilder {
    if max_len == 0 {
        log::warn!("Comb field without a positive MaxLen; drawing plain text");
        return plain(ctx, value, password);
    }

    let text = displayed(value, password);
    let glyphs: Vec<String> = text
        .chars()
        .filter(|c| *c != '\r' && *c != '\n')
        .take(max_len as usize)
        .map(String::from)
        .collect();
    let count = glyphs.len() as u32;

    let (w, h) = (ctx.width(), ctx.height());
    let bw = ctx.border_width;
    let slot = w / max_len as f32;

    let widest = glyphs
        .iter()
        .max_by(|a, b| ctx.font.width(a, 1.0).total_cmp(&ctx.font.width(b, 1.0)))
        .cloned()
        .unwrap_or_default();
    let size = ctx.fitted_size(Rect::new(0.0, 0.0, slot, h - 2.0 * bw), &widest);

    let start = match ctx.justification {
        Justification::Left => 0,
        Justification::Center => (max_len - count) / 2,
        Justification::Right => max_len - count,
    };

    let mut ap = ctx.stream_with_font();
    let content = ap.content();
    ctx.draw_border(content);
    content
        .begin_marked_content("Tx")
        .save_state()
        .clip_rect(bw, bw, w - 2.0 * bw, h - 2.0 * bw);

    if !glyphs.is_empty() {
        let y = ctx.centered_baseline(size);
        content
            .begin_text()
            .set_font(&ctx.font_name, size)
            .fill_color(&ctx.text_color);
        for (i, glyph) in glyphs.iter().enumerate() {
            let center = slot * ((start as usize + i) as f32 + 0.5);
            let x = center - ctx.font.width(glyph, size) / 2.0;
            content.text_at(ctx.font.encode(glyph), x, y);
        }
        content.end_text();
    }

    content.restore_state().end_marked_content();
    ap
}

/// Wrapped text laid out from the top of the box.
///
/// Lines that do not fit are dropped; if not even the first line fits it
/// is placed anyway and clipped.
pub fn multiline(ctx: &AppearanceContext, value: &str, password: bool) -> AppearanceStreamBuilder {
    let text = displayed(value, password);
    let (w, h) = (ctx.width(), ctx.height());
    let area = Rect::new(0.0, 0.0, w, h - HEIGHT_EPSILON);

    let paragraph = Paragraph::new(&text, &ctx.font)
        .with_padding(MULTILINE_PADDING)
        .with_leading(1.0)
        .with_alignment(ctx.justification);
    let size = if ctx.font_size > 0.0 {
        ctx.font_size
    } else {
        fit_multi_line(&paragraph, area, ctx.min_font_size, ctx.max_font_size)
    };
    let layout = paragraph.with_font_size(size).layout(area);

    let shown = match layout.status {
        LayoutStatus::Nothing => layout.lines.len().min(1),
        _ => layout.fitting_lines,
    };

    let mut ap = ctx.stream_with_font();
    let content = ap.content();
    ctx.draw_border(content);
    content
        .begin_marked_content("Tx")
        .save_state()
        .clip_rect(
            MULTILINE_PADDING,
            MULTILINE_PADDING,
            w - 2.0 * MULTILINE_PADDING,
            h - 2.0 * MULTILINE_PADDING,
        );

    let lines: Vec<_> = layout.lines[..shown]
        .iter()
        .filter(|line| !line.text.is_empty())
        .collect();
    if !lines.is_empty() {
        content
            .begin_text()
            .set_font(&ctx.font_name, size)
            .fill_color(&ctx.text_color);
        for line in lines {
            content.text_at(ctx.font.encode(&line.text), line.x, line.baseline);
        }
        content.end_text();
    }

    content.restore_state().end_marked_content();
    ap
}
