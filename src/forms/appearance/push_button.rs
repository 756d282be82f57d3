//! Push button appearances.
//!
//! A button face is an image icon, a form XObject or a text caption, in
//! that order of preference. All three sit inside the border.

use super::AppearanceContext;
use crate::color::Color;
use crate::fonts::FontMetrics;
use crate::object::ObjectRef;
use crate::writer::appearance_stream::AppearanceStreamBuilder;

/// What a push button shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ButtonFace<'a> {
    /// Image XObject stretched over the inner box
    Image {
        /// `/XObject` resource name
        resource: &'a str,
        /// Image XObject
        xobject: ObjectRef,
    },
    /// Form XObject scaled to the inner height
    Form {
        /// `/XObject` resource name
        resource: &'a str,
        /// Form XObject
        xobject: ObjectRef,
        /// Height of the form's `/BBox`
        height: f32,
    },
    /// Text centered in the box
    Caption(&'a str),
    /// Background and border only
    Blank,
}

impl<'a> ButtonFace<'a> {
    /// Pick the face from whatever the button carries.
    pub fn choose(
        image: Option<(&'a str, ObjectRef)>,
        form: Option<(&'a str, ObjectRef, f32)>,
        caption: Option<&'a str>,
    ) -> Self {
        if let Some((resource, xobject)) = image {
            ButtonFace::Image { resource, xobject }
        } else if let Some((resource, xobject, height)) = form {
            ButtonFace::Form {
                resource,
                xobject,
                height,
            }
        } else if let Some(caption) = caption.filter(|c| !c.is_empty()) {
            ButtonFace::Caption(caption)
        } else {
            ButtonFace::Blank
        }
    }
}

/// Render a push button face.
///
/// Without a background color the face is light gray.
pub fn render(ctx: &AppearanceContext, face: &ButtonFace<'_>) -> AppearanceStreamBuilder {
    let (w, h) = (ctx.width(), ctx.height());
    let bw = ctx.border_width;
    let background = ctx.background_color.clone().unwrap_or_else(Color::light_gray);

    let mut ap = ctx.stream();
    ctx.draw_frame(ap.content(), Some(&background));

    match face {
        ButtonFace::Image { resource, xobject } => {
            ap.add_xobject(resource, *xobject);
            ap.content()
                .draw_xobject(resource, w - bw, 0.0, 0.0, h - bw, bw / 2.0, bw / 2.0);
        },
        ButtonFace::Form {
            resource,
            xobject,
            height,
        } => {
            let scale = if *height > 0.0 { (h - bw) / height } else { 1.0 };
            ap.add_xobject(resource, *xobject);
            ap.content()
                .draw_xobject(resource, scale, 0.0, 0.0, scale, bw / 2.0, bw / 2.0);
        },
        ButtonFace::Caption(caption) => {
            let size = ctx.fitted_size(ctx.inner_box(), caption);
            let x = (w - ctx.font.width(caption, size)) / 2.0;
            let y = ctx.centered_baseline(size);
            if let Some(font_ref) = ctx.font_ref {
                ap.add_font(&ctx.font_name, font_ref);
            }
            ap.content()
                .begin_text()
                .set_font(&ctx.font_name, size)
                .fill_color(&ctx.text_color)
                .text_at(ctx.font.encode(caption), x, y)
                .end_text();
        },
        ButtonFace::Blank => {},
    }
    ap
}
