//! Text field builder.

use super::{CommonSettings, FieldBuilder};
use crate::document::PdfDocument;
use crate::error::Result;
use crate::forms::field_flags::{FieldFlags, Justification};
use crate::forms::kind::FieldType;
use crate::geometry::Rect;
use crate::object::{Dictionary, Object};

/// A single-line, multi-line or comb text field.
#[derive(Debug, Clone)]
pub struct TextFieldBuilder {
    common: CommonSettings,
    value: Option<String>,
    default_value: Option<String>,
    max_len: Option<u32>,
    flags: FieldFlags,
    justification: Justification,
}

impl TextFieldBuilder {
    /// New text field named `name` at `rect`.
    pub fn new(name: impl Into<String>, rect: Rect) -> Self {
        Self {
            common: CommonSettings::new(name, rect),
            value: None,
            default_value: None,
            max_len: None,
            flags: FieldFlags::empty(),
            justification: Justification::Left,
        }
    }

    /// Set the initial value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the value restored on form reset.
    pub fn with_default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Limit input to `max_len` characters.
    pub fn with_max_length(mut self, max_len: u32) -> Self {
        self.max_len = Some(max_len);
        self
    }

    /// Allow line breaks.
    pub fn multiline(mut self) -> Self {
        self.flags |= FieldFlags::MULTILINE;
        self
    }

    /// Mask input as a password.
    pub fn password(mut self) -> Self {
        self.flags |= FieldFlags::PASSWORD;
        self
    }

    /// Spread the value over `max_len` equal cells.
    pub fn comb(mut self, max_len: u32) -> Self {
        self.flags |= FieldFlags::COMB;
        self.max_len = Some(max_len);
        self
    }

    /// Turn off spell checking.
    pub fn no_spell_check(mut self) -> Self {
        self.flags |= FieldFlags::DO_NOT_SPELL_CHECK;
        self
    }

    /// Stop the field from scrolling past its box.
    pub fn no_scroll(mut self) -> Self {
        self.flags |= FieldFlags::DO_NOT_SCROLL;
        self
    }

    /// Set text alignment.
    pub fn with_justification(mut self, justification: Justification) -> Self {
        self.justification = justification;
        self
    }
}

impl FieldBuilder for TextFieldBuilder {
    fn common(&self) -> &CommonSettings {
        &self.common
    }

    fn common_mut(&mut self) -> &mut CommonSettings {
        &mut self.common
    }

    fn field_dict(&self, _doc: &mut PdfDocument) -> Result<Dictionary> {
        let mut dict = self.common.field_dict(FieldType::Text, self.flags)?;
        if let Some(value) = &self.value {
            dict.insert("V".to_string(), Object::text_string(value));
        }
        if let Some(value) = &self.default_value {
            dict.insert("DV".to_string(), Object::text_string(value));
        }
        if let Some(max_len) = self.max_len {
            dict.insert("MaxLen".to_string(), Object::Integer(max_len as i64));
        }
        if self.justification != Justification::Left {
            dict.insert(
                "Q".to_string(),
                Object::Integer(self.justification.q_value()),
            );
        }
        Ok(dict)
    }
}
