//! Signature field builder.

use super::{CommonSettings, FieldBuilder};
use crate::document::PdfDocument;
use crate::error::Result;
use crate::forms::field::FormField;
use crate::forms::field_flags::FieldFlags;
use crate::forms::kind::FieldType;
use crate::geometry::Rect;
use crate::object::{Dictionary, Object, ObjectRef};
use crate::writer::appearance_stream::AppearanceStreamBuilder;

/// An unsigned signature field.
///
/// Gets an empty appearance; drawing a signature is left to the signer.
#[derive(Debug, Clone)]
pub struct SignatureBuilder {
    common: CommonSettings,
}

impl SignatureBuilder {
    /// New signature field named `name` at `rect`.
    pub fn new(name: impl Into<String>, rect: Rect) -> Self {
        let mut common = CommonSettings::new(name, rect);
        common.background_color = None;
        Self { common }
    }
}

impl FieldBuilder for SignatureBuilder {
    fn common(&self) -> &CommonSettings {
        &self.common
    }

    fn common_mut(&mut self) -> &mut CommonSettings {
        &mut self.common
    }

    fn field_dict(&self, doc: &mut PdfDocument) -> Result<Dictionary> {
        let mut dict = self
            .common
            .field_dict(FieldType::Signature, FieldFlags::empty())?;
        let empty = AppearanceStreamBuilder::new(self.common.rect.at_origin())
            .build(doc.config().compress_streams)?;
        let mut ap = Dictionary::new();
        ap.insert("N".to_string(), doc.allocate(empty).into());
        dict.insert("AP".to_string(), Object::Dictionary(ap));
        Ok(dict)
    }

    fn build(self, doc: &mut PdfDocument, page: ObjectRef) -> Result<FormField> {
        let dict = self.field_dict(doc)?;
        let object = doc.allocate(Object::Dictionary(dict));
        doc.add_field(object, Some(page))?;
        let mut field = FormField::make(doc, object)?;
        field.regenerate_field(doc)?;
        Ok(field)
    }
}
