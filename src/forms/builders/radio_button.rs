//! Radio button group builder.
//!
//! A group is one parent field holding the value and flags, with one
//! widget kid per button. Each kid's on-state name is its export value.

use super::{toggle_placeholders, write_widget_entries};
use crate::color::Color;
use crate::document::PdfDocument;
use crate::error::{Error, Result};
use crate::forms::field::FormField;
use crate::forms::field_flags::FieldFlags;
use crate::forms::kind::FieldType;
use crate::forms::style::Rotation;
use crate::geometry::Rect;
use crate::object::{Dictionary, Object, ObjectRef};

/// A group of mutually exclusive radio buttons.
#[derive(Debug, Clone)]
pub struct RadioGroupBuilder {
    name: String,
    buttons: Vec<(String, Rect)>,
    selected: Option<String>,
    flags: FieldFlags,
    tooltip: Option<String>,
    border_color: Option<Color>,
    background_color: Option<Color>,
    indicator_color: Option<Color>,
    border_width: f32,
}

impl RadioGroupBuilder {
    /// New empty group named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            buttons: Vec::new(),
            selected: None,
            flags: FieldFlags::empty(),
            tooltip: None,
            border_color: Some(Color::black()),
            background_color: Some(Color::white()),
            indicator_color: None,
            border_width: 1.0,
        }
    }

    /// Add a button exporting `export` at `rect`.
    pub fn add_button(mut self, export: impl Into<String>, rect: Rect) -> Self {
        self.buttons.push((export.into(), rect));
        self
    }

    /// Select the button exporting `export`.
    pub fn selected(mut self, export: impl Into<String>) -> Self {
        self.selected = Some(export.into());
        self
    }

    /// Keep one button selected at all times.
    pub fn no_toggle_to_off(mut self) -> Self {
        self.flags |= FieldFlags::NO_TOGGLE_TO_OFF;
        self
    }

    /// Make the group read-only.
    pub fn read_only(mut self) -> Self {
        self.flags |= FieldFlags::READ_ONLY;
        self
    }

    /// Require a selection before submit.
    pub fn required(mut self) -> Self {
        self.flags |= FieldFlags::REQUIRED;
        self
    }

    /// Set tooltip text.
    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    /// Set the circle outline color.
    pub fn with_border_color(mut self, color: Color) -> Self {
        self.border_color = Some(color);
        self
    }

    /// Set the circle fill color.
    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = Some(color);
        self
    }

    /// Set the color of the selection dot.
    pub fn with_indicator_color(mut self, color: Color) -> Self {
        self.indicator_color = Some(color);
        self
    }

    /// Set the outline width in points.
    pub fn with_border_width(mut self, width: f32) -> Self {
        self.border_width = width;
        self
    }

    /// Write the group and its widgets, placing every widget on `page`.
    pub fn build(self, doc: &mut PdfDocument, page: ObjectRef) -> Result<FormField> {
        if self.buttons.is_empty() {
            return Err(Error::MissingGeometry(format!(
                "radio group '{}' has no buttons",
                self.name
            )));
        }

        let value = match &self.selected {
            Some(export) if self.buttons.iter().any(|(e, _)| e == export) => export.as_str(),
            Some(export) => {
                log::warn!(
                    "Radio group '{}' has no button '{}'; nothing selected",
                    self.name,
                    export
                );
                "Off"
            },
            None => "Off",
        };

        let mut parent = Dictionary::new();
        parent.insert("FT".to_string(), Object::name(FieldType::Button.name()));
        parent.insert("T".to_string(), Object::text_string(&self.name));
        parent.insert(
            "Ff".to_string(),
            Object::Integer((FieldFlags::RADIO | self.flags).bits() as i64),
        );
        parent.insert("V".to_string(), Object::name(value));
        parent.insert("DV".to_string(), Object::name(value));
        parent.insert("Kids".to_string(), Object::Array(Vec::new()));
        if let Some(tip) = &self.tooltip {
            parent.insert("TU".to_string(), Object::text_string(tip));
        }
        let parent_ref = doc.allocate(Object::Dictionary(parent));

        let mut kids = Vec::with_capacity(self.buttons.len());
        for (export, rect) in &self.buttons {
            let mut widget = Dictionary::new();
            write_widget_entries(
                &mut widget,
                *rect,
                self.border_color.as_ref(),
                self.background_color.as_ref(),
                self.border_width,
                Rotation::Deg0,
            );
            widget.insert("Parent".to_string(), parent_ref.into());
            widget.insert("AP".to_string(), toggle_placeholders(export));
            widget.insert("AS".to_string(), Object::name("Off"));
            let kid = doc.allocate(Object::Dictionary(widget));
            doc.add_annotation(page, kid)?;
            kids.push(Object::from(kid));
        }
        doc.dict_mut(parent_ref)?
            .insert("Kids".to_string(), Object::Array(kids));
        doc.add_field(parent_ref, Some(page))?;

        let mut field = FormField::make(doc, parent_ref)?;
        if let Some(color) = self.indicator_color {
            field.style_mut().color = Some(color);
        }
        field.regenerate_field(doc)?;
        log::debug!(
            "Built radio group '{}' with {} buttons",
            self.name,
            self.buttons.len()
        );
        Ok(field)
    }
}
