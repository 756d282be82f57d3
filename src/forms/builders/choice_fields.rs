//! Combo box and list box builders.

use super::{CommonSettings, FieldBuilder};
use crate::document::PdfDocument;
use crate::error::Result;
use crate::forms::field_flags::FieldFlags;
use crate::forms::kind::FieldType;
use crate::forms::value::ChoiceOption;
use crate::geometry::Rect;
use crate::object::{Dictionary, Object};

/// Settings shared by both choice builders.
#[derive(Debug, Clone, Default)]
struct ChoiceSettings {
    options: Vec<ChoiceOption>,
    value: Option<String>,
    flags: FieldFlags,
}

impl ChoiceSettings {
    fn write(&self, dict: &mut Dictionary) {
        dict.insert(
            "Opt".to_string(),
            Object::Array(self.options.iter().map(ChoiceOption::to_object).collect()),
        );
        if let Some(value) = &self.value {
            dict.insert("V".to_string(), Object::text_string(value));
        }
    }

    fn selected_index(&self) -> Option<usize> {
        let value = self.value.as_deref()?;
        self.options.iter().position(|o| o.export == value)
    }
}

/// A drop-down list with an optional edit box.
#[derive(Debug, Clone)]
pub struct ComboBoxBuilder {
    common: CommonSettings,
    choice: ChoiceSettings,
}

impl ComboBoxBuilder {
    /// New combo box named `name` at `rect`.
    pub fn new(name: impl Into<String>, rect: Rect) -> Self {
        Self {
            common: CommonSettings::new(name, rect),
            choice: ChoiceSettings::default(),
        }
    }

    /// Set the options; plain strings or `(export, display)` pairs.
    pub fn with_options<I, O>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<ChoiceOption>,
    {
        self.choice.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Set the chosen export value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.choice.value = Some(value.into());
        self
    }

    /// Let the user type a value not in the list.
    pub fn editable(mut self) -> Self {
        self.choice.flags |= FieldFlags::EDIT;
        self
    }

    /// Keep the options sorted.
    pub fn sorted(mut self) -> Self {
        self.choice.flags |= FieldFlags::SORT;
        self
    }

    /// Commit the value as soon as it is picked.
    pub fn commit_on_change(mut self) -> Self {
        self.choice.flags |= FieldFlags::COMMIT_ON_SEL_CHANGE;
        self
    }
}

impl FieldBuilder for ComboBoxBuilder {
    fn common(&self) -> &CommonSettings {
        &self.common
    }

    fn common_mut(&mut self) -> &mut CommonSettings {
        &mut self.common
    }

    fn field_dict(&self, _doc: &mut PdfDocument) -> Result<Dictionary> {
        let mut dict = self
            .common
            .field_dict(FieldType::Choice, FieldFlags::COMBO | self.choice.flags)?;
        self.choice.write(&mut dict);
        Ok(dict)
    }
}

/// A scrollable list of options.
#[derive(Debug, Clone)]
pub struct ListBoxBuilder {
    common: CommonSettings,
    choice: ChoiceSettings,
    top_index: Option<usize>,
}

impl ListBoxBuilder {
    /// New list box named `name` at `rect`.
    pub fn new(name: impl Into<String>, rect: Rect) -> Self {
        Self {
            common: CommonSettings::new(name, rect),
            choice: ChoiceSettings::default(),
            top_index: None,
        }
    }

    /// Set the options; plain strings or `(export, display)` pairs.
    pub fn with_options<I, O>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<ChoiceOption>,
    {
        self.choice.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Set the selected export value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.choice.value = Some(value.into());
        self
    }

    /// Scroll so that option `index` is shown first.
    pub fn with_top_index(mut self, index: usize) -> Self {
        self.top_index = Some(index);
        self
    }

    /// Allow more than one selection.
    pub fn multi_select(mut self) -> Self {
        self.choice.flags |= FieldFlags::MULTI_SELECT;
        self
    }

    /// Keep the options sorted.
    pub fn sorted(mut self) -> Self {
        self.choice.flags |= FieldFlags::SORT;
        self
    }

    /// Commit the value as soon as it is picked.
    pub fn commit_on_change(mut self) -> Self {
        self.choice.flags |= FieldFlags::COMMIT_ON_SEL_CHANGE;
        self
    }
}

impl FieldBuilder for ListBoxBuilder {
    fn common(&self) -> &CommonSettings {
        &self.common
    }

    fn common_mut(&mut self) -> &mut CommonSettings {
        &mut self.common
    }

    fn field_dict(&self, _doc: &mut PdfDocument) -> Result<Dictionary> {
        let mut dict = self.common.field_dict(FieldType::Choice, self.choice.flags)?;
        self.choice.write(&mut dict);
        if let Some(index) = self.choice.selected_index() {
            dict.insert("I".to_string(), Object::Array(vec![Object::Integer(index as i64)]));
        }
        if let Some(top) = self.top_index {
            dict.insert("TI".to_string(), Object::Integer(top as i64));
        }
        Ok(dict)
    }
}
