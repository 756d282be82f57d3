//! Paragraph layout inside a fixed box.
//!
//! This is the layout oracle the appearance engine consults: it wraps text
//! for a font and size, places lines top-down, and reports whether the
//! result fits the box completely, partially, or not at all.

pub mod paragraph;

pub use paragraph::{LayoutResult, LayoutStatus, Paragraph, PlacedLine};
