//! Interactive form fields and their appearances.
//!
//! A [`FormField`] binds to a field dictionary in a [`PdfDocument`],
//! works out what kind of field it is and what it should look like, and
//! regenerates the appearance streams of its widgets whenever its value
//! or style changes.
//!
//! ## Architecture
//!
//! ```text
//! field dictionary (/FT /Ff /V /DA /MK /BS)
//!     ↓
//! [FormField] (kind, style, setters)
//!     ↓
//! [appearance] renderers (text, choice, checkbox, radio, push button)
//!     ↓
//! [AppearanceStreamBuilder] (form XObject)
//!     ↓
//! widget /AP /N
//! ```
//!
//! New fields are created with the [`builders`].
//!
//! # Example
//!
//! ```
//! use pdf_oxide_forms::document::PdfDocument;
//! use pdf_oxide_forms::forms::builders::{CheckboxBuilder, FieldBuilder};
//! use pdf_oxide_forms::geometry::Rect;
//!
//! let mut doc = PdfDocument::new();
//! let page = doc.add_page(612.0, 792.0).unwrap();
//! let mut agree = CheckboxBuilder::new("agree", Rect::new(72.0, 600.0, 14.0, 14.0))
//!     .build(&mut doc, page)
//!     .unwrap();
//! agree.set_value(&mut doc, "Yes").unwrap();
//! assert_eq!(agree.appearance_states(&doc), vec!["Yes", "Off"]);
//! ```
//!
//! [`PdfDocument`]: crate::document::PdfDocument
//! [`AppearanceStreamBuilder`]: crate::writer::appearance_stream::AppearanceStreamBuilder

pub mod appearance;
pub mod builders;
pub mod default_appearance;
pub mod field;
pub mod field_flags;
pub mod font_fit;
pub mod kind;
pub mod rotation;
pub mod style;
pub mod value;

pub use default_appearance::DefaultAppearance;
pub use field::FormField;
pub use field_flags::{AnnotationFlags, FieldFlags, Justification};
pub use kind::{CheckSymbol, FieldKind, FieldState, FieldType, Visibility};
pub use style::{AppearanceStyle, Rotation};
pub use value::{ChoiceOption, FieldValue};
