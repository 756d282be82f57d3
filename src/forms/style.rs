//! Visual style of a field and its inheritance.

use crate::color::Color;
use crate::error::{Error, Result};
use crate::object::ObjectRef;

/// A widget rotation, counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    /// Upright
    #[default]
    Deg0,
    /// Quarter turn
    Deg90,
    /// Half turn
    Deg180,
    /// Three quarter turn
    Deg270,
}

impl Rotation {
    /// Rotation for any multiple of 90 degrees, reduced modulo 360.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_oxide_forms::forms::Rotation;
    ///
    /// assert_eq!(Rotation::from_degrees(-90).unwrap(), Rotation::Deg270);
    /// assert_eq!(Rotation::from_degrees(450).unwrap(), Rotation::Deg90);
    /// assert!(Rotation::from_degrees(45).is_err());
    /// ```
    pub fn from_degrees(degrees: i32) -> Result<Self> {
        if degrees % 90 != 0 {
            return Err(Error::InvalidRotation(degrees));
        }
        Ok(match degrees.rem_euclid(360) {
            90 => Rotation::Deg90,
            180 => Rotation::Deg180,
            270 => Rotation::Deg270,
            _ => Rotation::Deg0,
        })
    }

    /// Angle in degrees, `0..360`.
    pub fn degrees(&self) -> i32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Whether width and height trade places.
    pub fn is_quarter(&self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

/// Visual properties of a field.
///
/// Every member is optional; an unset member is taken from the parent
/// field by [`AppearanceStyle::resolve`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppearanceStyle {
    /// Font dictionary
    pub font: Option<ObjectRef>,
    /// Font size; `0` requests auto sizing
    pub font_size: Option<f32>,
    /// Text color
    pub color: Option<Color>,
    /// Border width in points
    pub border_width: Option<f32>,
    /// Border color
    pub border_color: Option<Color>,
    /// Background color
    pub background_color: Option<Color>,
    /// Widget rotation
    pub rotation: Option<Rotation>,
}

impl AppearanceStyle {
    /// Effective style of a widget: `own` where set, `parent` elsewhere.
    pub fn resolve(parent: &AppearanceStyle, own: &AppearanceStyle) -> AppearanceStyle {
        AppearanceStyle {
            font: own.font.or(parent.font),
            font_size: own.font_size.or(parent.font_size),
            color: own.color.clone().or_else(|| parent.color.clone()),
            border_width: own.border_width.or(parent.border_width),
            border_color: own.border_color.clone().or_else(|| parent.border_color.clone()),
            background_color: own
                .background_color
                .clone()
                .or_else(|| parent.background_color.clone()),
            rotation: own.rotation.or(parent.rotation),
        }
    }

    /// Font size with negative requests treated as auto.
    pub fn normalized_font_size(size: f32) -> f32 {
        if size < 0.0 {
            0.0
        } else {
            size
        }
    }

    /// Border width, 1pt when unset.
    pub fn effective_border_width(&self) -> f32 {
        self.border_width.unwrap_or(1.0)
    }

    /// Text color, black when unset.
    pub fn effective_color(&self) -> Color {
        self.color.clone().unwrap_or_else(Color::black)
    }

    /// Rotation, upright when unset.
    pub fn effective_rotation(&self) -> Rotation {
        self.rotation.unwrap_or_default()
    }
}
