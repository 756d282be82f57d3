//! Radio button appearances.

use super::{AppearanceContext, ToggleAppearances};
use crate::writer::appearance_stream::AppearanceStreamBuilder;

/// Render the on and off states of one radio widget.
///
/// Both states are always produced; which one shows is decided by the
/// widget's `/AS`.
pub fn render(ctx: &AppearanceContext, on_name: &str) -> ToggleAppearances {
    let mut off = ctx.stream();
    draw_circle_frame(ctx, &mut off);

    let mut on = ctx.stream();
    draw_circle_frame(ctx, &mut on);
    let (w, h) = (ctx.width(), ctx.height());
    on.content()
        .fill_color(&ctx.text_color)
        .circle(w / 2.0, h / 2.0, w.min(h) / 4.0)
        .fill();

    if ctx
        .conformance
        .is_some_and(|level| level.requires_state_resources())
    {
        on.force_resources();
        off.force_resources();
    }

    ToggleAppearances {
        on_name: on_name.to_string(),
        on,
        off,
    }
}

fn draw_circle_frame(ctx: &AppearanceContext, ap: &mut AppearanceStreamBuilder) {
    let (w, h) = (ctx.width(), ctx.height());
    let bw = ctx.border_width;
    let radius = (w.min(h) - bw) / 2.0;
    let (cx, cy) = (w / 2.0, h / 2.0);
    let content = ap.content();

    if let Some(bg) = &ctx.background_color {
        content.fill_color(bg).circle(cx, cy, radius + bw / 2.0).fill();
    }
    if bw > 0.0 {
        if let Some(bc) = &ctx.border_color {
            content
                .stroke_color(bc)
                .set_line_width(bw)
                .circle(cx, cy, radius)
                .stroke();
        }
    }
}
