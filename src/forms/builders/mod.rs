//! Builders for new form fields.
//!
//! Each builder collects a field's settings, then [`FieldBuilder::build`]
//! writes a merged field/widget dictionary into the document, places the
//! widget on a page and generates its appearance.
//!
//! # Example
//!
//! ```
//! use pdf_oxide_forms::document::PdfDocument;
//! use pdf_oxide_forms::forms::builders::{FieldBuilder, TextFieldBuilder};
//! use pdf_oxide_forms::geometry::Rect;
//!
//! let mut doc = PdfDocument::new();
//! let page = doc.add_page(612.0, 792.0).unwrap();
//! let field = TextFieldBuilder::new("username", Rect::new(72.0, 700.0, 200.0, 20.0))
//!     .with_value("john_doe")
//!     .with_max_length(50)
//!     .required()
//!     .build(&mut doc, page)
//!     .unwrap();
//! assert_eq!(field.value_as_string(&doc), "john_doe");
//! ```

mod checkbox;
mod choice_fields;
mod push_button;
mod radio_button;
mod signature;
mod text_field;

pub use checkbox::CheckboxBuilder;
pub use choice_fields::{ComboBoxBuilder, ListBoxBuilder};
pub use push_button::PushButtonBuilder;
pub use radio_button::RadioGroupBuilder;
pub use signature::SignatureBuilder;
pub use text_field::TextFieldBuilder;

use super::field::FormField;
use super::field_flags::{AnnotationFlags, FieldFlags};
use super::kind::FieldType;
use super::style::{AppearanceStyle, Rotation};
use crate::color::Color;
use crate::document::PdfDocument;
use crate::error::Result;
use crate::fonts::StandardFont;
use crate::geometry::Rect;
use crate::object::{Dictionary, Object, ObjectRef};

/// Settings shared by every single-widget field.
#[derive(Debug, Clone)]
pub struct CommonSettings {
    /// Partial field name (`/T`)
    pub name: String,
    /// Widget rectangle on the page
    pub rect: Rect,
    /// Field flags on top of those the field type implies
    pub flags: FieldFlags,
    /// Tooltip (`/TU`)
    pub tooltip: Option<String>,
    /// Border color (`/MK /BC`)
    pub border_color: Option<Color>,
    /// Background color (`/MK /BG`)
    pub background_color: Option<Color>,
    /// Border width (`/BS /W`)
    pub border_width: f32,
    /// Widget rotation in degrees (`/MK /R`)
    pub rotation: i32,
    /// Field font; the form default when unset
    pub font: Option<StandardFont>,
    /// Font size; `0` sizes text to the box
    pub font_size: Option<f32>,
    /// Text color
    pub text_color: Option<Color>,
}

impl CommonSettings {
    /// Black border one point wide on a white background.
    pub fn new(name: impl Into<String>, rect: Rect) -> Self {
        Self {
            name: name.into(),
            rect,
            flags: FieldFlags::empty(),
            tooltip: None,
            border_color: Some(Color::black()),
            background_color: Some(Color::white()),
            border_width: 1.0,
            rotation: 0,
            font: None,
            font_size: None,
            text_color: None,
        }
    }

    /// Field and widget entries common to every field type.
    ///
    /// Fails on a rotation that is not a multiple of 90 before anything
    /// is written.
    pub fn field_dict(&self, field_type: FieldType, flags: FieldFlags) -> Result<Dictionary> {
        let rotation = Rotation::from_degrees(self.rotation)?;

        let mut dict = Dictionary::new();
        dict.insert("FT".to_string(), Object::name(field_type.name()));
        dict.insert("T".to_string(), Object::text_string(&self.name));
        let flags = flags | self.flags;
        if !flags.is_empty() {
            dict.insert("Ff".to_string(), Object::Integer(flags.bits() as i64));
        }
        write_widget_entries(
            &mut dict,
            self.rect,
            self.border_color.as_ref(),
            self.background_color.as_ref(),
            self.border_width,
            rotation,
        );
        if let Some(tip) = &self.tooltip {
            dict.insert("TU".to_string(), Object::text_string(tip));
        }
        Ok(dict)
    }

    /// Font, size and color the new field draws text with.
    pub(crate) fn apply_text_style(&self, doc: &mut PdfDocument, field: &mut FormField) {
        let font = self.font.map(|f| doc.add_font(f));
        let style = field.style_mut();
        if font.is_some() {
            style.font = font;
        }
        if let Some(size) = self.font_size {
            style.font_size = Some(AppearanceStyle::normalized_font_size(size));
        }
        if let Some(color) = &self.text_color {
            style.color = Some(color.clone());
        }
    }
}

/// Widget annotation entries: subtype, rectangle, print flag, border
/// style and appearance characteristics.
pub(crate) fn write_widget_entries(
    dict: &mut Dictionary,
    rect: Rect,
    border_color: Option<&Color>,
    background_color: Option<&Color>,
    border_width: f32,
    rotation: Rotation,
) {
    dict.insert("Type".to_string(), Object::name("Annot"));
    dict.insert("Subtype".to_string(), Object::name("Widget"));
    dict.insert("Rect".to_string(), Object::number_array(&rect.to_pdf_array()));
    dict.insert(
        "F".to_string(),
        Object::Integer(AnnotationFlags::PRINT.bits() as i64),
    );

    let mut bs = Dictionary::new();
    bs.insert("W".to_string(), Object::real(border_width.max(0.0)));
    bs.insert("S".to_string(), Object::name("S"));
    dict.insert("BS".to_string(), Object::Dictionary(bs));

    let mut mk = Dictionary::new();
    if let Some(color) = border_color {
        mk.insert("BC".to_string(), color.to_object());
    }
    if let Some(color) = background_color {
        mk.insert("BG".to_string(), color.to_object());
    }
    if rotation != Rotation::Deg0 {
        mk.insert("R".to_string(), Object::Integer(rotation.degrees() as i64));
    }
    dict.insert("MK".to_string(), Object::Dictionary(mk));
}

/// `/AP` with placeholder on and off states, so the on-state name is
/// known before the first appearance is generated.
pub(crate) fn toggle_placeholders(on_state: &str) -> Object {
    let mut states = Dictionary::new();
    states.insert(on_state.to_string(), Object::Null);
    states.insert("Off".to_string(), Object::Null);
    let mut ap = Dictionary::new();
    ap.insert("N".to_string(), Object::Dictionary(states));
    Object::Dictionary(ap)
}

/// A field that can be added to a page in one step.
pub trait FieldBuilder: Sized {
    /// Shared settings.
    fn common(&self) -> &CommonSettings;

    /// Shared settings, mutably.
    fn common_mut(&mut self) -> &mut CommonSettings;

    /// The merged field/widget dictionary.
    ///
    /// Gets the document so that referenced objects (icons) can be
    /// allocated first.
    fn field_dict(&self, doc: &mut PdfDocument) -> Result<Dictionary>;

    /// Write the field, put its widget on `page` and generate its
    /// appearance.
    fn build(self, doc: &mut PdfDocument, page: ObjectRef) -> Result<FormField> {
        let dict = self.field_dict(doc)?;
        let object = doc.allocate(Object::Dictionary(dict));
        doc.add_field(object, Some(page))?;
        let mut field = FormField::make(doc, object)?;
        self.common().apply_text_style(doc, &mut field);
        field.regenerate_field(doc)?;
        log::debug!("Built field '{}' as {}", self.common().name, object);
        Ok(field)
    }

    /// Make the field read-only.
    fn read_only(mut self) -> Self {
        self.common_mut().flags |= FieldFlags::READ_ONLY;
        self
    }

    /// Require a value before submit.
    fn required(mut self) -> Self {
        self.common_mut().flags |= FieldFlags::REQUIRED;
        self
    }

    /// Set tooltip text.
    fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.common_mut().tooltip = Some(tooltip.into());
        self
    }

    /// Set border color.
    fn with_border_color(mut self, color: Color) -> Self {
        self.common_mut().border_color = Some(color);
        self
    }

    /// Remove the border.
    fn no_border(mut self) -> Self {
        let common = self.common_mut();
        common.border_color = None;
        common.border_width = 0.0;
        self
    }

    /// Set background color.
    fn with_background_color(mut self, color: Color) -> Self {
        self.common_mut().background_color = Some(color);
        self
    }

    /// Remove the background (transparent).
    fn no_background(mut self) -> Self {
        self.common_mut().background_color = None;
        self
    }

    /// Set border width in points.
    fn with_border_width(mut self, width: f32) -> Self {
        self.common_mut().border_width = width;
        self
    }

    /// Rotate the widget content; checked by [`FieldBuilder::build`].
    fn with_rotation(mut self, degrees: i32) -> Self {
        self.common_mut().rotation = degrees;
        self
    }

    /// Set font and size; a size of `0` fits text to the box.
    fn with_font(mut self, font: StandardFont, size: f32) -> Self {
        let common = self.common_mut();
        common.font = Some(font);
        common.font_size = Some(size);
        self
    }

    /// Set font size; `0` fits text to the box.
    fn with_font_size(mut self, size: f32) -> Self {
        self.common_mut().font_size = Some(size);
        self
    }

    /// Set text color.
    fn with_text_color(mut self, color: Color) -> Self {
        self.common_mut().text_color = Some(color);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_common_entries() {
        let common = CommonSettings::new("f", Rect::new(10.0, 20.0, 100.0, 30.0));
        let dict = common.field_dict(FieldType::Text, FieldFlags::empty()).unwrap();
        assert_eq!(dict.get("FT"), Some(&Object::name("Tx")));
        assert_eq!(dict.get("Subtype"), Some(&Object::name("Widget")));
        assert_eq!(dict.get("F"), Some(&Object::Integer(4)));
        assert_eq!(
            dict.get("Rect"),
            Some(&Object::number_array(&[10.0, 20.0, 110.0, 50.0]))
        );
        assert!(!dict.contains_key("Ff"));
        let mk = dict.get("MK").unwrap().as_dict().unwrap();
        assert!(mk.contains_key("BC"));
        assert!(!mk.contains_key("R"));
    }

    #[test]
    fn test_bad_rotation_rejected_up_front() {
        let mut common = CommonSettings::new("f", Rect::new(0.0, 0.0, 10.0, 10.0));
        common.rotation = 30;
        assert!(matches!(
            common.field_dict(FieldType::Text, FieldFlags::empty()),
            Err(Error::InvalidRotation(30))
        ));
    }

    #[test]
    fn test_placeholders() {
        let ap = toggle_placeholders("Agreed");
        let n = ap.as_dict().unwrap().get("N").unwrap().as_dict().unwrap();
        assert_eq!(n.keys().collect::<Vec<_>>(), vec!["Agreed", "Off"]);
    }
}
