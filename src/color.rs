//! Device colors used by form appearances.

use crate::object::Object;

/// A color in one of the device color spaces a form field can name.
#[derive(Debug, Clone, PartialEq)]
pub enum Color {
    /// DeviceGray level in `0.0..=1.0`
    Gray(f32),
    /// DeviceRGB components
    Rgb(f32, f32, f32),
    /// DeviceCMYK components
    Cmyk(f32, f32, f32, f32),
    /// Spot color; has no representation in a default appearance string
    Separation {
        /// Colorant name
        colorant: String,
        /// Tint in `0.0..=1.0`
        tint: f32,
    },
}

impl Color {
    /// Black in DeviceGray.
    pub fn black() -> Self {
        Color::Gray(0.0)
    }

    /// White in DeviceGray.
    pub fn white() -> Self {
        Color::Gray(1.0)
    }

    /// The light gray used for push button faces and selected list text.
    pub fn light_gray() -> Self {
        Color::rgb8(192, 192, 192)
    }

    /// RGB color from 8-bit components.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_oxide_forms::color::Color;
    ///
    /// assert_eq!(Color::rgb8(255, 0, 0), Color::Rgb(1.0, 0.0, 0.0));
    /// ```
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Color components in the order their operator expects.
    pub fn components(&self) -> Vec<f32> {
        match self {
            Color::Gray(g) => vec![*g],
            Color::Rgb(r, g, b) => vec![*r, *g, *b],
            Color::Cmyk(c, m, y, k) => vec![*c, *m, *y, *k],
            Color::Separation { tint, .. } => vec![*tint],
        }
    }

    /// Interpret an `/MK` style color array.
    ///
    /// An empty array means "transparent" and yields `None`, as does any
    /// component count other than 1, 3 or 4.
    pub fn from_components(values: &[f32]) -> Option<Self> {
        match *values {
            [g] => Some(Color::Gray(g)),
            [r, g, b] => Some(Color::Rgb(r, g, b)),
            [c, m, y, k] => Some(Color::Cmyk(c, m, y, k)),
            _ => None,
        }
    }

    /// Read a color array object (`/MK /BG`, `/MK /BC`).
    pub fn from_object(obj: &Object) -> Option<Self> {
        let values: Option<Vec<f32>> = obj.as_array()?.iter().map(|o| o.as_number()).collect();
        Self::from_components(&values?)
    }

    /// Color as an `/MK` array. Spot colors are written as their tint.
    pub fn to_object(&self) -> Object {
        match self {
            Color::Separation { tint, .. } => Object::number_array(&[1.0 - tint]),
            other => Object::number_array(&other.components()),
        }
    }

    /// Closest device color for painting.
    pub fn to_device(&self) -> Color {
        match self {
            Color::Separation { tint, .. } => Color::Gray(1.0 - tint),
            other => other.clone(),
        }
    }
}
