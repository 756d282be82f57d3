//! Low-level writers for appearance content.
//!
//! ## Architecture
//!
//! ```text
//! drawing calls
//!     ↓
//! [ContentStreamBuilder] (operators → content bytes)
//!     ↓
//! [AppearanceStreamBuilder] (bbox, matrix, resources → form XObject)
//! ```
//!
//! [`IconImage`] turns PNG or JPEG bytes into image XObjects for push
//! button icons.

pub mod appearance_stream;
pub mod content_stream;
pub mod image_handler;

pub use appearance_stream::AppearanceStreamBuilder;
pub use content_stream::ContentStreamBuilder;
pub use image_handler::IconImage;
