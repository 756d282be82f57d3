//! Field values.

use crate::object::Object;
use bytes::Bytes;

/// The value of a field, as stored in `/V`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Text string (text and choice fields)
    Text(String),
    /// Name (button and choice on-states)
    Name(String),
    /// Stream payload (rich text, push button icons)
    Stream(Bytes),
}

impl FieldValue {
    /// Read a `/V` entry.
    pub fn from_object(obj: &Object) -> Option<Self> {
        match obj {
            Object::String(_) => obj.as_text_string().map(FieldValue::Text),
            Object::Name(n) => Some(FieldValue::Name(n.clone())),
            Object::Stream { data, .. } => Some(FieldValue::Stream(data.clone())),
            _ => None,
        }
    }

    /// The value as display text. Stream payloads are read as Latin-1.
    pub fn as_text(&self) -> String {
        match self {
            FieldValue::Text(s) | FieldValue::Name(s) => s.clone(),
            FieldValue::Stream(bytes) => crate::object::decode_text_string(bytes),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

/// One entry of a choice field's `/Opt` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    /// Value stored in `/V` when the option is chosen
    pub export: String,
    /// Text shown to the user
    pub display: String,
}

impl ChoiceOption {
    /// An option whose export value and display text are the same.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            export: text.clone(),
            display: text,
        }
    }

    /// Read an `/Opt` entry: a text string or an `[export display]` pair.
    pub fn from_object(obj: &Object) -> Option<Self> {
        match obj {
            Object::String(_) => obj.as_text_string().map(Self::new),
            Object::Array(pair) if pair.len() >= 2 => Some(Self {
                export: pair[0].as_text_string()?,
                display: pair[1].as_text_string()?,
            }),
            _ => None,
        }
    }

    /// The `/Opt` entry for this option.
    pub fn to_object(&self) -> Object {
        if self.export == self.display {
            Object::text_string(&self.display)
        } else {
            Object::Array(vec![
                Object::text_string(&self.export),
                Object::text_string(&self.display),
            ])
        }
    }
}

impl From<&str> for ChoiceOption {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<(&str, &str)> for ChoiceOption {
    fn from((export, display): (&str, &str)) -> Self {
        Self {
            export: export.to_string(),
            display: display.to_string(),
        }
    }
}
