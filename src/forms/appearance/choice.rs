//! Combo box and list box appearances.

use super::AppearanceContext;
use crate::color::Color;
use crate::fonts::FontMetrics;
use crate::geometry::Rect;
use crate::layout::Paragraph;
use crate::writer::appearance_stream::AppearanceStreamBuilder;

const PADDING: f32 = 3.0;

/// What a choice field shows.
#[derive(Debug, Clone, Default)]
pub struct ChoiceDisplay {
    /// Display lines: the value of a combo box, or the options of a list
    /// starting at the top index
    pub lines: Vec<String>,
    /// Option index of the first line
    pub top_index: usize,
    /// Selected option indices (`/I`)
    pub selected: Vec<usize>,
    /// Combo box rather than list box
    pub combo: bool,
}

/// Background of selected list rows.
pub fn selection_background() -> Color {
    Color::rgb8(10, 36, 106)
}

/// Render a choice field.
///
/// A combo box shows its value centered vertically. A list box shows its
/// options from the top, with selected rows highlighted.
pub fn render(ctx: &AppearanceContext, display: &ChoiceDisplay) -> AppearanceStreamBuilder {
    let (w, h) = (ctx.width(), ctx.height());
    let text = display.lines.join("\n");
    let longest = display
        .lines
        .iter()
        .max_by(|a, b| ctx.font.width(a, 1.0).total_cmp(&ctx.font.width(b, 1.0)))
        .map(String::as_str)
        .unwrap_or("");
    let size = ctx.fitted_size(ctx.inner_box(), longest);

    let layout = Paragraph::new(&text, &ctx.font)
        .with_font_size(size)
        .with_padding(PADDING)
        .with_alignment(ctx.justification)
        .layout(Rect::new(0.0, 0.0, w, h));

    let mut lines = layout.lines;
    if display.combo {
        let top = ctx.centered_baseline(size);
        for (i, line) in lines.iter_mut().enumerate() {
            line.baseline = top - i as f32 * layout.line_height;
        }
    } else {
        lines.truncate(layout.fitting_lines.max(1));
    }

    let is_selected =
        |source_line: usize| !display.combo && display.selected.contains(&(display.top_index + source_line));

    let mut ap = ctx.stream_with_font();
    let content = ap.content();
    ctx.draw_border(content);
    content
        .begin_marked_content("Tx")
        .save_state()
        .clip_rect(PADDING, PADDING, w - 2.0 * PADDING, h - 2.0);

    let highlight = selection_background();
    for line in lines.iter().filter(|l| is_selected(l.source_line)) {
        content
            .fill_color(&highlight)
            .rect(
                PADDING,
                line.baseline + ctx.font.descent(size),
                w - 2.0 * PADDING,
                layout.line_height,
            )
            .fill();
    }

    let visible: Vec<_> = lines.iter().filter(|l| !l.text.is_empty()).collect();
    if !visible.is_empty() {
        content.begin_text().set_font(&ctx.font_name, size);
        let normal = ctx.text_color.clone();
        let inverted = Color::light_gray();
        for line in visible {
            let color = if is_selected(line.source_line) {
                &inverted
            } else {
                &normal
            };
            content
                .fill_color(color)
                .text_at(ctx.font.encode(&line.text), line.x, line.baseline);
        }
        content.end_text();
    }

    content.restore_state().end_marked_content();
    ap
}
