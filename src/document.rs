//! In-memory document model.
//!
//! A [`PdfDocument`] is an arena of indirect objects addressed by
//! [`ObjectRef`] handles, together with the few structures the form engine
//! needs to find: the catalog, the page list and the interactive form
//! (`/AcroForm`) dictionary with its default resources.
//!
//! Fields refer to their parents and kids by handle only, so inherited
//! attributes are found by walking `/Parent` references through the arena.

use crate::compliance::PdfALevel;
use crate::config::FormConfig;
use crate::error::{Error, Result};
use crate::fonts::StandardFont;
use crate::geometry::Rect;
use crate::object::{Dictionary, Object, ObjectRef};
use indexmap::IndexMap;

/// Upper bound on `/Parent` hops, guarding against cyclic field trees.
const MAX_INHERITANCE_DEPTH: usize = 64;

static NULL: Object = Object::Null;

/// An arena of indirect objects with a catalog, pages and an AcroForm.
#[derive(Debug, Clone)]
pub struct PdfDocument {
    /// Object storage; object number `n` lives at index `n - 1`
    objects: Vec<Option<Object>>,
    catalog: ObjectRef,
    page_tree: ObjectRef,
    pages: Vec<ObjectRef>,
    acroform: ObjectRef,
    /// Standard font dictionaries already allocated
    standard_fonts: IndexMap<StandardFont, ObjectRef>,
    config: FormConfig,
}

impl Default for PdfDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfDocument {
    /// Create an empty document with default configuration.
    pub fn new() -> Self {
        Self::with_config(FormConfig::default())
    }

    /// Create an empty document.
    ///
    /// The catalog, page tree and AcroForm dictionaries are allocated
    /// up front.
    pub fn with_config(config: FormConfig) -> Self {
        let mut doc = Self {
            objects: Vec::new(),
            catalog: ObjectRef::new(0, 0),
            page_tree: ObjectRef::new(0, 0),
            pages: Vec::new(),
            acroform: ObjectRef::new(0, 0),
            standard_fonts: IndexMap::new(),
            config,
        };

        let mut pages = Dictionary::new();
        pages.insert("Type".to_string(), Object::name("Pages"));
        pages.insert("Kids".to_string(), Object::Array(Vec::new()));
        pages.insert("Count".to_string(), Object::Integer(0));
        doc.page_tree = doc.allocate(Object::Dictionary(pages));

        let mut acroform = Dictionary::new();
        acroform.insert("Fields".to_string(), Object::Array(Vec::new()));
        acroform.insert("DR".to_string(), Object::Dictionary(Dictionary::new()));
        doc.acroform = doc.allocate(Object::Dictionary(acroform));

        let mut catalog = Dictionary::new();
        catalog.insert("Type".to_string(), Object::name("Catalog"));
        catalog.insert("Pages".to_string(), doc.page_tree.into());
        catalog.insert("AcroForm".to_string(), doc.acroform.into());
        doc.catalog = doc.allocate(Object::Dictionary(catalog));

        doc
    }

    /// Appearance configuration.
    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    /// PDF/A level the document targets, if any.
    pub fn conformance(&self) -> Option<PdfALevel> {
        self.config.conformance
    }

    /// Reference to the document catalog.
    pub fn catalog(&self) -> ObjectRef {
        self.catalog
    }

    /// Reference to the AcroForm dictionary.
    pub fn acroform(&self) -> ObjectRef {
        self.acroform
    }

    /// Number of objects in the arena.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Store a new indirect object and return its reference.
    pub fn allocate(&mut self, obj: Object) -> ObjectRef {
        self.objects.push(Some(obj));
        ObjectRef::new(self.objects.len() as u32, 0)
    }

    fn slot(&self, r: ObjectRef) -> Option<usize> {
        if r.id == 0 || r.gen != 0 {
            return None;
        }
        let index = (r.id - 1) as usize;
        (index < self.objects.len()).then_some(index)
    }

    /// Fetch an object by reference.
    pub fn get(&self, r: ObjectRef) -> Result<&Object> {
        self.slot(r)
            .and_then(|i| self.objects[i].as_ref())
            .ok_or(Error::ObjectNotFound(r.id, r.gen))
    }

    /// Fetch an object mutably.
    pub fn get_mut(&mut self, r: ObjectRef) -> Result<&mut Object> {
        match self.slot(r) {
            Some(i) => self.objects[i]
                .as_mut()
                .ok_or(Error::ObjectNotFound(r.id, r.gen)),
            None => Err(Error::ObjectNotFound(r.id, r.gen)),
        }
    }

    /// Replace an existing object.
    pub fn put(&mut self, r: ObjectRef, obj: Object) -> Result<()> {
        let index = self.slot(r).ok_or(Error::ObjectNotFound(r.id, r.gen))?;
        self.objects[index] = Some(obj);
        Ok(())
    }

    /// Fetch a dictionary (or the dictionary of a stream).
    pub fn dict(&self, r: ObjectRef) -> Result<&Dictionary> {
        let obj = self.get(r)?;
        obj.as_dict().ok_or_else(|| Error::InvalidObjectType {
            expected: "Dictionary".to_string(),
            found: obj.type_name().to_string(),
        })
    }

    /// Fetch a dictionary mutably.
    pub fn dict_mut(&mut self, r: ObjectRef) -> Result<&mut Dictionary> {
        let obj = self.get_mut(r)?;
        let found = obj.type_name();
        obj.as_dict_mut().ok_or_else(|| Error::InvalidObjectType {
            expected: "Dictionary".to_string(),
            found: found.to_string(),
        })
    }

    /// Follow indirect references until a direct object is reached.
    ///
    /// Dangling references resolve to `null`.
    pub fn resolve<'a>(&'a self, obj: &'a Object) -> &'a Object {
        let mut current = obj;
        for _ in 0..MAX_INHERITANCE_DEPTH {
            match current {
                Object::Reference(r) => match self.get(*r) {
                    Ok(next) => current = next,
                    Err(_) => return &NULL,
                },
                direct => return direct,
            }
        }
        &NULL
    }

    /// Look up `key` in a dictionary, resolving a referenced value.
    pub fn lookup(&self, r: ObjectRef, key: &str) -> Option<&Object> {
        let value = self.dict(r).ok()?.get(key)?;
        match self.resolve(value) {
            Object::Null => None,
            resolved => Some(resolved),
        }
    }

    /// Look up an inheritable field attribute.
    ///
    /// Checks the field itself, then each ancestor reached through
    /// `/Parent`. Returns the first value found.
    pub fn inherited(&self, field: ObjectRef, key: &str) -> Option<&Object> {
        let mut current = Some(field);
        let mut depth = 0;
        while let Some(r) = current {
            if depth > MAX_INHERITANCE_DEPTH {
                log::warn!("Field tree under {} is too deep or cyclic", field);
                return None;
            }
            if let Some(value) = self.lookup(r, key) {
                return Some(value);
            }
            current = self
                .dict(r)
                .ok()
                .and_then(|d| d.get("Parent"))
                .and_then(Object::as_reference);
            depth += 1;
        }
        None
    }

    /// Append a page of the given size.
    pub fn add_page(&mut self, width: f32, height: f32) -> Result<ObjectRef> {
        let mut page = Dictionary::new();
        page.insert("Type".to_string(), Object::name("Page"));
        page.insert("Parent".to_string(), self.page_tree.into());
        page.insert(
            "MediaBox".to_string(),
            Object::number_array(&Rect::new(0.0, 0.0, width, height).to_pdf_array()),
        );
        let page_ref = self.allocate(Object::Dictionary(page));

        let tree = self.dict_mut(self.page_tree)?;
        if let Some(Object::Array(kids)) = tree.get_mut("Kids") {
            kids.push(page_ref.into());
        }
        self.pages.push(page_ref);
        let count = self.pages.len() as i64;
        self.dict_mut(self.page_tree)?
            .insert("Count".to_string(), Object::Integer(count));
        Ok(page_ref)
    }

    /// Pages in document order.
    pub fn pages(&self) -> &[ObjectRef] {
        &self.pages
    }

    /// Set a page's `/Rotate`.
    pub fn set_page_rotation(&mut self, page: ObjectRef, degrees: i32) -> Result<()> {
        if degrees % 90 != 0 {
            return Err(Error::InvalidRotation(degrees));
        }
        self.dict_mut(page)?
            .insert("Rotate".to_string(), Object::Integer(degrees.rem_euclid(360) as i64));
        Ok(())
    }

    /// A page's `/Rotate`, normalized to `0..360`.
    pub fn page_rotation(&self, page: ObjectRef) -> i32 {
        self.lookup(page, "Rotate")
            .and_then(Object::as_integer)
            .map(|r| (r as i32).rem_euclid(360))
            .unwrap_or(0)
    }

    /// Font dictionary reference for a standard font, allocated once.
    pub fn add_font(&mut self, font: StandardFont) -> ObjectRef {
        if let Some(r) = self.standard_fonts.get(&font) {
            return *r;
        }
        let r = self.allocate(Object::Dictionary(font.to_dictionary()));
        self.standard_fonts.insert(font, r);
        r
    }

    /// Metrics for a font dictionary, read from its `/BaseFont`.
    ///
    /// Fonts that are not one of the standard fourteen measure as
    /// Helvetica.
    pub fn font_metrics(&self, font: ObjectRef) -> StandardFont {
        let base = self.lookup(font, "BaseFont").and_then(Object::as_name);
        match base.and_then(StandardFont::from_base_font) {
            Some(f) => f,
            None => {
                log::debug!("No standard metrics for font {} ({:?})", font, base);
                StandardFont::Helvetica
            },
        }
    }

    /// The AcroForm `/DR /Font` dictionary, if present.
    pub fn resource_fonts(&self) -> Option<&Dictionary> {
        self.lookup(self.acroform, "DR")?
            .as_dict()?
            .get("Font")
            .and_then(|f| self.resolve(f).as_dict())
    }

    /// The AcroForm `/DR /Font` dictionary, created on demand.
    pub fn resource_fonts_mut(&mut self) -> Result<&mut Dictionary> {
        let acroform = self.dict_mut(self.acroform)?;
        let dr = acroform
            .entry("DR".to_string())
            .or_insert_with(|| Object::Dictionary(Dictionary::new()));
        let dr = dr.as_dict_mut().ok_or_else(|| Error::InvalidObjectType {
            expected: "Dictionary".to_string(),
            found: "DR".to_string(),
        })?;
        let fonts = dr
            .entry("Font".to_string())
            .or_insert_with(|| Object::Dictionary(Dictionary::new()));
        fonts.as_dict_mut().ok_or_else(|| Error::InvalidObjectType {
            expected: "Dictionary".to_string(),
            found: "Font".to_string(),
        })
    }

    /// Resource name under which `font` is registered in `/DR /Font`.
    pub fn resource_font_name(&self, font: ObjectRef) -> Option<String> {
        self.resource_fonts()?
            .iter()
            .find(|(_, v)| v.as_reference() == Some(font))
            .map(|(k, _)| k.clone())
    }

    /// Font registered in `/DR /Font` under `name`.
    pub fn resource_font(&self, name: &str) -> Option<ObjectRef> {
        self.resource_fonts()?.get(name).and_then(Object::as_reference)
    }

    /// The document-wide `/DA` string.
    pub fn default_appearance(&self) -> Option<String> {
        self.lookup(self.acroform, "DA").and_then(Object::as_text_string)
    }

    /// Set the document-wide `/DA` string.
    pub fn set_default_appearance(&mut self, da: &str) -> Result<()> {
        self.dict_mut(self.acroform)?
            .insert("DA".to_string(), Object::text_string(da));
        Ok(())
    }

    /// The document-wide `/Q`.
    pub fn default_justification(&self) -> Option<i64> {
        self.lookup(self.acroform, "Q").and_then(Object::as_integer)
    }

    /// Top-level fields.
    pub fn fields(&self) -> Vec<ObjectRef> {
        self.lookup(self.acroform, "Fields")
            .and_then(Object::as_array)
            .map(|a| a.iter().filter_map(Object::as_reference).collect())
            .unwrap_or_default()
    }

    /// Register a top-level field and place it on a page.
    ///
    /// A field carrying a `/Rect` is its own widget and goes into the
    /// page's `/Annots`.
    pub fn add_field(&mut self, field: ObjectRef, page: Option<ObjectRef>) -> Result<()> {
        if let Some(Object::Array(fields)) = self.dict_mut(self.acroform)?.get_mut("Fields") {
            fields.push(field.into());
        }
        if let Some(page) = page {
            if self.dict(field)?.contains_key("Rect") {
                self.add_annotation(page, field)?;
            }
        }
        Ok(())
    }

    /// Add a widget annotation to a page and point its `/P` back.
    pub fn add_annotation(&mut self, page: ObjectRef, widget: ObjectRef) -> Result<()> {
        let page_dict = self.dict_mut(page)?;
        let annots = page_dict
            .entry("Annots".to_string())
            .or_insert_with(|| Object::Array(Vec::new()));
        if let Object::Array(items) = annots {
            if !items.contains(&widget.into()) {
                items.push(widget.into());
            }
        }
        self.dict_mut(widget)?.insert("P".to_string(), page.into());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_structure() {
        let doc = PdfDocument::new();
        let catalog = doc.dict(doc.catalog()).unwrap();
        assert_eq!(catalog.get("AcroForm"), Some(&Object::Reference(doc.acroform())));
        assert!(doc.fields().is_empty());
    }

    #[test]
    fn test_allocate_get_put() {
        let mut doc = PdfDocument::new();
        let r = doc.allocate(Object::Integer(1));
        assert_eq!(doc.get(r).unwrap(), &Object::Integer(1));
        doc.put(r, Object::Integer(2)).unwrap();
        assert_eq!(doc.get(r).unwrap(), &Object::Integer(2));
    }

    #[test]
    fn test_missing_object() {
        let doc = PdfDocument::new();
        assert!(matches!(
            doc.get(ObjectRef::new(999, 0)),
            Err(Error::ObjectNotFound(999, 0))
        ));
        assert!(doc.get(ObjectRef::new(0, 0)).is_err());
    }

    #[test]
    fn test_dict_type_mismatch() {
        let mut doc = PdfDocument::new();
        let r = doc.allocate(Object::Integer(1));
        assert!(matches!(doc.dict(r), Err(Error::InvalidObjectType { .. })));
    }

    #[test]
    fn test_resolve_chain() {
        let mut doc = PdfDocument::new();
        let inner = doc.allocate(Object::Integer(7));
        let outer = doc.allocate(Object::Reference(inner));
        assert_eq!(doc.resolve(&Object::Reference(outer)), &Object::Integer(7));
        assert_eq!(doc.resolve(&Object::Reference(ObjectRef::new(500, 0))), &Object::Null);
    }

    #[test]
    fn test_inherited_walks_parents() {
        let mut doc = PdfDocument::new();
        let mut root = Dictionary::new();
        root.insert("FT".to_string(), Object::name("Tx"));
        let root = doc.allocate(Object::Dictionary(root));
        let mut mid = Dictionary::new();
        mid.insert("Parent".to_string(), root.into());
        let mid = doc.allocate(Object::Dictionary(mid));
        let mut leaf = Dictionary::new();
        leaf.insert("Parent".to_string(), mid.into());
        let leaf = doc.allocate(Object::Dictionary(leaf));

        assert_eq!(doc.inherited(leaf, "FT").and_then(Object::as_name), Some("Tx"));
        assert!(doc.inherited(leaf, "Ff").is_none());
    }

    #[test]
    fn test_inherited_survives_cycle() {
        let mut doc = PdfDocument::new();
        let a = doc.allocate(Object::Dictionary(Dictionary::new()));
        let mut b = Dictionary::new();
        b.insert("Parent".to_string(), a.into());
        let b = doc.allocate(Object::Dictionary(b));
        doc.dict_mut(a).unwrap().insert("Parent".to_string(), b.into());
        assert!(doc.inherited(a, "FT").is_none());
    }

    #[test]
    fn test_pages_and_rotation() {
        let mut doc = PdfDocument::new();
        let page = doc.add_page(612.0, 792.0).unwrap();
        assert_eq!(doc.pages(), &[page]);
        assert_eq!(doc.page_rotation(page), 0);
        doc.set_page_rotation(page, -90).unwrap();
        assert_eq!(doc.page_rotation(page), 270);
        assert!(matches!(doc.set_page_rotation(page, 45), Err(Error::InvalidRotation(45))));
    }

    #[test]
    fn test_fonts_are_shared() {
        let mut doc = PdfDocument::new();
        let a = doc.add_font(StandardFont::Courier);
        let b = doc.add_font(StandardFont::Courier);
        assert_eq!(a, b);
        assert_eq!(doc.font_metrics(a), StandardFont::Courier);
    }

    #[test]
    fn test_resource_fonts() {
        let mut doc = PdfDocument::new();
        let font = doc.add_font(StandardFont::Helvetica);
        assert!(doc.resource_font_name(font).is_none());
        doc.resource_fonts_mut()
            .unwrap()
            .insert("Helv".to_string(), font.into());
        assert_eq!(doc.resource_font_name(font).as_deref(), Some("Helv"));
        assert_eq!(doc.resource_font("Helv"), Some(font));
    }

    #[test]
    fn test_add_field_places_widget() {
        let mut doc = PdfDocument::new();
        let page = doc.add_page(612.0, 792.0).unwrap();
        let mut field = Dictionary::new();
        field.insert("Rect".to_string(), Object::number_array(&[0.0, 0.0, 10.0, 10.0]));
        let field = doc.allocate(Object::Dictionary(field));
        doc.add_field(field, Some(page)).unwrap();

        assert_eq!(doc.fields(), vec![field]);
        let annots = doc.lookup(page, "Annots").unwrap().as_array().unwrap();
        assert_eq!(annots, &vec![Object::Reference(field)]);
        assert_eq!(doc.lookup(field, "P"), Some(doc.get(page).unwrap()));
    }
}
