//! Appearance stream (form XObject) construction.
//!
//! PDF Spec: ISO 32000-1:2008, Section 12.5.5 (Appearance Streams)
//!
//! An appearance stream is a Form XObject that defines the visual appearance
//! of an annotation. Widget annotations store them under `/AP /N`, either
//! directly or keyed by appearance state name.

use super::content_stream::ContentStreamBuilder;
use crate::error::Result;
use crate::geometry::{Matrix, Rect};
use crate::object::{Dictionary, Object, ObjectRef};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::Write;

/// Builder for a single form XObject.
#[derive(Debug, Clone)]
pub struct AppearanceStreamBuilder {
    /// Bounding box for the appearance
    bbox: Rect,
    /// Drawing operations
    content: ContentStreamBuilder,
    /// `/Font` resource entries
    fonts: Dictionary,
    /// `/XObject` resource entries
    xobjects: Dictionary,
    /// Emit `/Resources` even when nothing is referenced
    force_resources: bool,
    /// Matrix transformation (optional)
    matrix: Option<Matrix>,
}

impl AppearanceStreamBuilder {
    /// Create a new appearance stream builder with the given bounding box.
    pub fn new(bbox: Rect) -> Self {
        Self {
            bbox,
            content: ContentStreamBuilder::new(),
            fonts: Dictionary::new(),
            xobjects: Dictionary::new(),
            force_resources: false,
            matrix: None,
        }
    }

    /// Set or clear the `/Matrix` entry.
    pub fn set_matrix(&mut self, matrix: Option<Matrix>) -> &mut Self {
        self.matrix = matrix.filter(|m| !m.is_identity());
        self
    }

    /// Drawing canvas for this appearance.
    pub fn content(&mut self) -> &mut ContentStreamBuilder {
        &mut self.content
    }

    /// Register a font under a resource name.
    pub fn add_font(&mut self, name: &str, font: ObjectRef) -> &mut Self {
        self.fonts.insert(name.to_string(), Object::Reference(font));
        self
    }

    /// Register an XObject under a resource name.
    pub fn add_xobject(&mut self, name: &str, xobject: ObjectRef) -> &mut Self {
        self.xobjects.insert(name.to_string(), Object::Reference(xobject));
        self
    }

    /// Always write a `/Resources` dictionary, even an empty one.
    pub fn force_resources(&mut self) -> &mut Self {
        self.force_resources = true;
        self
    }

    /// Get the bounding box.
    pub fn bbox(&self) -> Rect {
        self.bbox
    }

    /// Current `/Matrix`, if any.
    pub fn matrix(&self) -> Option<Matrix> {
        self.matrix
    }

    /// Build the stream object, optionally Flate compressed.
    pub fn build(&self, compress: bool) -> Result<Object> {
        let mut dict = Dictionary::new();
        dict.insert("Type".to_string(), Object::name("XObject"));
        dict.insert("Subtype".to_string(), Object::name("Form"));
        dict.insert("FormType".to_string(), Object::Integer(1));
        dict.insert("BBox".to_string(), Object::number_array(&self.bbox.to_pdf_array()));

        if let Some(m) = self.matrix {
            dict.insert("Matrix".to_string(), Object::number_array(&m.to_array()));
        }

        if self.force_resources || !self.fonts.is_empty() || !self.xobjects.is_empty() {
            let mut resources = Dictionary::new();
            if !self.fonts.is_empty() {
                resources.insert("Font".to_string(), Object::Dictionary(self.fonts.clone()));
            }
            if !self.xobjects.is_empty() {
                resources.insert("XObject".to_string(), Object::Dictionary(self.xobjects.clone()));
            }
            dict.insert("Resources".to_string(), Object::Dictionary(resources));
        }

        let mut data = self.content.build()?;
        if compress {
            let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(&data)?;
            data = encoder.finish()?;
            dict.insert("Filter".to_string(), Object::name("FlateDecode"));
        }

        dict.insert("Length".to_string(), Object::Integer(data.len() as i64));

        Ok(Object::Stream {
            dict,
            data: bytes::Bytes::from(data),
        })
    }
}
