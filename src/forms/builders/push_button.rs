//! Push button builder.

use super::{CommonSettings, FieldBuilder};
use crate::document::PdfDocument;
use crate::error::Result;
use crate::forms::field_flags::FieldFlags;
use crate::forms::kind::FieldType;
use crate::geometry::Rect;
use crate::object::{Dictionary, Object};
use crate::writer::image_handler::IconImage;

/// A push button with a caption or an image icon.
#[derive(Debug, Clone)]
pub struct PushButtonBuilder {
    common: CommonSettings,
    caption: Option<String>,
    icon: Option<Vec<u8>>,
}

impl PushButtonBuilder {
    /// New push button on a light gray face.
    pub fn new(name: impl Into<String>, rect: Rect) -> Self {
        let mut common = CommonSettings::new(name, rect);
        common.background_color = None;
        Self {
            common,
            caption: None,
            icon: None,
        }
    }

    /// Set the caption drawn on the face.
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Show a PNG or JPEG image instead of the caption.
    pub fn with_icon(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.icon = Some(bytes.into());
        self
    }
}

impl FieldBuilder for PushButtonBuilder {
    fn common(&self) -> &CommonSettings {
        &self.common
    }

    fn common_mut(&mut self) -> &mut CommonSettings {
        &mut self.common
    }

    fn field_dict(&self, doc: &mut PdfDocument) -> Result<Dictionary> {
        let mut dict = self
            .common
            .field_dict(FieldType::Button, FieldFlags::PUSH_BUTTON)?;

        let icon = match &self.icon {
            Some(bytes) => {
                let image = IconImage::from_bytes(bytes)?;
                let compress = doc.config().compress_streams;
                let soft_mask = match image.soft_mask_stream(compress)? {
                    Some(mask) => Some(Object::Reference(doc.allocate(mask))),
                    None => None,
                };
                Some(doc.allocate(image.to_stream(compress, soft_mask)?))
            },
            None => None,
        };

        if let Some(Object::Dictionary(mk)) = dict.get_mut("MK") {
            if let Some(caption) = &self.caption {
                mk.insert("CA".to_string(), Object::text_string(caption));
            }
            if let Some(icon) = icon {
                mk.insert("I".to_string(), icon.into());
            }
        }
        Ok(dict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::forms::kind::FieldKind;

    #[test]
    fn test_caption_button() {
        let mut doc = PdfDocument::new();
        let page = doc.add_page(612.0, 792.0).unwrap();
        let field = PushButtonBuilder::new("submit", Rect::new(72.0, 100.0, 80.0, 24.0))
            .with_caption("Submit")
            .build(&mut doc, page)
            .unwrap();

        assert_eq!(field.kind(), Some(FieldKind::PushButton));
        assert!(field.field_flags(&doc).contains(FieldFlags::PUSH_BUTTON));
        let mk = doc
            .lookup(field.object(), "MK")
            .and_then(Object::as_dict)
            .unwrap();
        assert_eq!(mk.get("CA"), Some(&Object::text_string("Submit")));
        assert_eq!(mk.get("BG"), Some(&Color::light_gray().to_object()));
    }

    #[test]
    fn test_bad_icon_is_an_error() {
        let mut doc = PdfDocument::new();
        let page = doc.add_page(612.0, 792.0).unwrap();
        let fields_before = doc.fields().len();
        let result = PushButtonBuilder::new("logo", Rect::new(0.0, 0.0, 40.0, 40.0))
            .with_icon(b"not an image".to_vec())
            .build(&mut doc, page);
        assert!(result.is_err());
        assert_eq!(doc.fields().len(), fields_before);
    }
}
