//! Checkbox builder.

use super::{toggle_placeholders, CommonSettings, FieldBuilder};
use crate::document::PdfDocument;
use crate::error::Result;
use crate::forms::field_flags::FieldFlags;
use crate::forms::kind::{CheckSymbol, FieldType};
use crate::geometry::Rect;
use crate::object::{Dictionary, Object};

/// A two-state checkbox.
#[derive(Debug, Clone)]
pub struct CheckboxBuilder {
    common: CommonSettings,
    checked: bool,
    export_value: String,
    symbol: CheckSymbol,
}

impl CheckboxBuilder {
    /// New unchecked checkbox exporting `Yes`.
    pub fn new(name: impl Into<String>, rect: Rect) -> Self {
        Self {
            common: CommonSettings::new(name, rect),
            checked: false,
            export_value: "Yes".to_string(),
            symbol: CheckSymbol::Check,
        }
    }

    /// Start checked.
    pub fn checked(mut self) -> Self {
        self.checked = true;
        self
    }

    /// Set the on-state name; `Off` is reserved and ignored.
    pub fn with_export_value(mut self, value: impl Into<String>) -> Self {
        let value = value.into();
        if value != "Off" && !value.is_empty() {
            self.export_value = value;
        }
        self
    }

    /// Set the checked state.
    pub fn with_value(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    /// Set the symbol drawn when checked.
    pub fn with_symbol(mut self, symbol: CheckSymbol) -> Self {
        self.symbol = symbol;
        self
    }
}

impl FieldBuilder for CheckboxBuilder {
    fn common(&self) -> &CommonSettings {
        &self.common
    }

    fn common_mut(&mut self) -> &mut CommonSettings {
        &mut self.common
    }

    fn field_dict(&self, _doc: &mut PdfDocument) -> Result<Dictionary> {
        let mut dict = self.common.field_dict(FieldType::Button, FieldFlags::empty())?;
        let value = if self.checked {
            Object::name(self.export_value.as_str())
        } else {
            Object::name("Off")
        };
        dict.insert("V".to_string(), value.clone());
        dict.insert("DV".to_string(), value);
        dict.insert("AP".to_string(), toggle_placeholders(&self.export_value));
        if let Some(Object::Dictionary(mk)) = dict.get_mut("MK") {
            mk.insert(
                "CA".to_string(),
                Object::text_string(&self.symbol.code().to_string()),
            );
        }
        Ok(dict)
    }
}
