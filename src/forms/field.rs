//! The form field model.
//!
//! A [`FormField`] is a handle on a field dictionary living in a
//! [`PdfDocument`], together with the field's resolved [`FieldKind`] and
//! [`AppearanceStyle`]. Queries read through to the document; setters
//! write through and then regenerate every widget's `/AP /N`.
//!
//! PDF Spec: ISO 32000-1:2008, Section 12.7.3 (Field Dictionaries) and
//! Section 12.7.3.3 (Variable Text)

use super::appearance::choice::ChoiceDisplay;
use super::appearance::push_button::ButtonFace;
use super::appearance::{checkbox, choice, push_button, radio, text, AppearanceContext};
use super::default_appearance::DefaultAppearance;
use super::field_flags::{AnnotationFlags, FieldFlags, Justification};
use super::kind::{CheckSymbol, FieldKind, FieldState, FieldType, Visibility};
use super::rotation::compute_content_matrix;
use super::style::{AppearanceStyle, Rotation};
use super::value::{ChoiceOption, FieldValue};
use crate::color::Color;
use crate::document::PdfDocument;
use crate::error::{Error, Result};
use crate::fonts::StandardFont;
use crate::geometry::Rect;
use crate::object::{rect_components, Dictionary, Object, ObjectRef};
use crate::writer::appearance_stream::AppearanceStreamBuilder;
use crate::writer::image_handler::IconImage;
use base64::Engine;
use indexmap::IndexSet;
use log::{debug, warn};

/// Upper bound on `/Parent` and `/Kids` hops.
const MAX_DEPTH: usize = 64;

/// `/XObject` resource name of a push button's image icon.
const IMAGE_RESOURCE: &str = "Im1";

/// `/XObject` resource name of a push button's form icon.
const FORM_RESOURCE: &str = "Fm1";

/// Appearance state of a push button under PDF/A.
const PUSH_STATE: &str = "push";

/// Resource name preferred for ZapfDingbats.
const SYMBOL_FONT_NAME: &str = "ZaDb";

/// A font resolved for drawing: where it lives and what it is called.
#[derive(Debug, Clone)]
struct ResolvedFont {
    name: String,
    reference: ObjectRef,
    metrics: StandardFont,
}

/// An interactive form field bound to a document.
#[derive(Debug, Clone)]
pub struct FormField {
    object: ObjectRef,
    kind: Option<FieldKind>,
    style: AppearanceStyle,
    state: FieldState,
    /// Image XObject shown on a push button
    image: Option<ObjectRef>,
    /// Form XObject shown on a push button, with its `/BBox` height
    form: Option<(ObjectRef, f32)>,
}

impl FormField {
    /// Bind to an existing field dictionary.
    ///
    /// Resolves the kind from the inherited `/FT`, `/Ff` and `/MaxLen` and
    /// reads the style from `/DA`, `/MK` and `/BS`.
    pub fn make(doc: &PdfDocument, object: ObjectRef) -> Result<Self> {
        doc.dict(object)?;
        let mut field = Self {
            object,
            kind: None,
            style: AppearanceStyle::default(),
            state: FieldState::Bound,
            image: None,
            form: None,
        };
        field.kind = field.classify(doc);
        field.style = field.retrieve_styles(doc);
        field.read_icon(doc);
        Ok(field)
    }

    fn classify(&self, doc: &PdfDocument) -> Option<FieldKind> {
        let Some(field_type) = self.form_type(doc) else {
            debug!("Field {} has no recognized /FT", self.object);
            return None;
        };
        let flags = self.field_flags(doc);
        let max_len = self.max_len(doc);
        if field_type == FieldType::Text
            && flags.contains(FieldFlags::COMB)
            && !flags.contains(FieldFlags::MULTILINE)
            && max_len.unwrap_or(0) == 0
        {
            warn!(
                "Comb field {} has no positive /MaxLen; drawing it as plain text",
                self.object
            );
        }
        let symbol = self
            .widgets(doc)
            .first()
            .and_then(|w| mk_entry(doc, *w, "CA"))
            .and_then(|ca| ca.as_text_string())
            .and_then(|code| CheckSymbol::from_code(&code))
            .unwrap_or_default();
        Some(FieldKind::classify(field_type, flags, max_len, symbol))
    }

    /// Read the field style from the document.
    ///
    /// The font, size and color come from the inherited `/DA` (or the
    /// form's). Colors, rotation and border width come from the field's
    /// own `/MK` and `/BS`, or those of its first widget.
    pub fn retrieve_styles(&self, doc: &PdfDocument) -> AppearanceStyle {
        let widget = self.widgets(doc).first().copied().unwrap_or(self.object);
        let mut style = decoration(doc, widget);
        if let Some(da) = self.default_appearance(doc) {
            apply_default_appearance(doc, &mut style, &da);
        }
        style
    }

    /// Style a widget sets for itself, on top of the field's.
    fn widget_style(&self, doc: &PdfDocument, widget: ObjectRef) -> AppearanceStyle {
        let mut style = decoration(doc, widget);
        if widget != self.object {
            if let Some(da) = doc.lookup(widget, "DA").and_then(Object::as_text_string) {
                apply_default_appearance(doc, &mut style, &da);
            }
        }
        style
    }

    fn read_icon(&mut self, doc: &PdfDocument) {
        let Some(widget) = self.widgets(doc).first().copied() else {
            return;
        };
        let Some(icon) = mk_raw(doc, widget, "I").and_then(|i| i.as_reference()) else {
            return;
        };
        match doc.lookup(icon, "Subtype").and_then(Object::as_name) {
            Some("Image") => self.image = Some(icon),
            Some("Form") => self.form = Some((icon, form_height(doc, icon))),
            other => debug!("Ignoring /MK /I {} of subtype {:?}", icon, other),
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// The field dictionary.
    pub fn object(&self) -> ObjectRef {
        self.object
    }

    /// Appearance kind; `None` when the form type is not recognized.
    pub fn kind(&self) -> Option<FieldKind> {
        self.kind
    }

    /// Field-level style.
    pub fn style(&self) -> &AppearanceStyle {
        &self.style
    }

    pub(crate) fn style_mut(&mut self) -> &mut AppearanceStyle {
        &mut self.style
    }

    /// Appearance freshness.
    pub fn state(&self) -> FieldState {
        self.state
    }

    /// Partial name (`/T`).
    pub fn field_name(&self, doc: &PdfDocument) -> Option<String> {
        doc.lookup(self.object, "T").and_then(Object::as_text_string)
    }

    /// Fully qualified name: the partial names from the root, dot-joined.
    pub fn full_name(&self, doc: &PdfDocument) -> String {
        let mut parts = Vec::new();
        let mut current = Some(self.object);
        for _ in 0..MAX_DEPTH {
            let Some(r) = current else { break };
            if let Some(name) = doc.lookup(r, "T").and_then(Object::as_text_string) {
                parts.push(name);
            }
            current = doc
                .dict(r)
                .ok()
                .and_then(|d| d.get("Parent"))
                .and_then(Object::as_reference);
        }
        parts.reverse();
        parts.join(".")
    }

    fn describe(&self, doc: &PdfDocument) -> String {
        let name = self.full_name(doc);
        if name.is_empty() {
            format!("field {}", self.object)
        } else {
            format!("field '{}'", name)
        }
    }

    /// Inherited `/FT`.
    pub fn form_type(&self, doc: &PdfDocument) -> Option<FieldType> {
        doc.inherited(self.object, "FT")
            .and_then(Object::as_name)
            .and_then(FieldType::from_name)
    }

    /// Inherited `/Ff`.
    pub fn field_flags(&self, doc: &PdfDocument) -> FieldFlags {
        doc.inherited(self.object, "Ff")
            .and_then(Object::as_integer)
            .map(FieldFlags::from_ff)
            .unwrap_or_default()
    }

    /// Inherited `/V`.
    pub fn value(&self, doc: &PdfDocument) -> Option<FieldValue> {
        doc.inherited(self.object, "V").and_then(FieldValue::from_object)
    }

    /// The value as text; empty when unset.
    pub fn value_as_string(&self, doc: &PdfDocument) -> String {
        self.value(doc).map(|v| v.as_text()).unwrap_or_default()
    }

    /// Inherited `/DA`, falling back to the form's.
    pub fn default_appearance(&self, doc: &PdfDocument) -> Option<String> {
        doc.inherited(self.object, "DA")
            .and_then(Object::as_text_string)
            .or_else(|| doc.default_appearance())
    }

    /// Inherited `/Q`, falling back to the form's.
    pub fn justification(&self, doc: &PdfDocument) -> Justification {
        doc.inherited(self.object, "Q")
            .and_then(Object::as_integer)
            .or_else(|| doc.default_justification())
            .map(Justification::from_q)
            .unwrap_or_default()
    }

    /// Inherited `/MaxLen`.
    pub fn max_len(&self, doc: &PdfDocument) -> Option<u32> {
        doc.inherited(self.object, "MaxLen")
            .and_then(Object::as_integer)
            .filter(|n| *n >= 0)
            .map(|n| n.min(u32::MAX as i64) as u32)
    }

    /// Inherited `/Opt`.
    pub fn options(&self, doc: &PdfDocument) -> Vec<ChoiceOption> {
        doc.inherited(self.object, "Opt")
            .and_then(Object::as_array)
            .map(|opts| {
                opts.iter()
                    .filter_map(|o| ChoiceOption::from_object(doc.resolve(o)))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// `/Kids` of this field.
    pub fn kids(&self, doc: &PdfDocument) -> Vec<ObjectRef> {
        kid_refs(doc, self.object)
    }

    /// Kids that are fields in their own right (they carry `/T`).
    pub fn kid_fields(&self, doc: &PdfDocument) -> Vec<ObjectRef> {
        self.kids(doc)
            .into_iter()
            .filter(|k| has_key(doc, *k, "T"))
            .collect()
    }

    /// Widget annotations: the field itself when merged with its widget,
    /// and every kid without `/T`.
    pub fn widgets(&self, doc: &PdfDocument) -> Vec<ObjectRef> {
        let mut widgets = Vec::new();
        if has_key(doc, self.object, "Rect") {
            widgets.push(self.object);
        }
        widgets.extend(
            self.kids(doc)
                .into_iter()
                .filter(|k| !has_key(doc, *k, "T")),
        );
        widgets
    }

    /// Every appearance state name reachable from this field.
    ///
    /// Option display texts come first, then `/AP /N` keys, then the
    /// states of kids. Duplicates are dropped.
    pub fn appearance_states(&self, doc: &PdfDocument) -> Vec<String> {
        let mut states = IndexSet::new();
        collect_states(doc, self.object, &mut states, 0);
        states.into_iter().collect()
    }

    // ------------------------------------------------------------------
    // Setters
    // ------------------------------------------------------------------

    fn changed(&mut self, doc: &mut PdfDocument) -> Result<&mut Self> {
        self.state = FieldState::Dirty;
        if doc.config().regenerate_on_change {
            self.regenerate_field(doc)?;
        }
        Ok(self)
    }

    fn require(&self, supported: bool, operation: &str) -> Result<()> {
        if supported {
            Ok(())
        } else {
            let kind = self
                .kind
                .map(|k| format!("{:?}", k))
                .unwrap_or_else(|| "an untyped field".to_string());
            Err(Error::Unsupported(format!("{} on {}", operation, kind)))
        }
    }

    /// Widgets that carry `/MK` and `/BS`; the field itself when it has
    /// none.
    fn decorated(&self, doc: &PdfDocument) -> Vec<ObjectRef> {
        let widgets = self.widgets(doc);
        if widgets.is_empty() {
            vec![self.object]
        } else {
            widgets
        }
    }

    /// Set the value.
    ///
    /// Text and choice values are stored as text strings and pushed down
    /// to kid fields. Checkbox and radio values are names; each widget's
    /// `/AS` is switched when the appearance is regenerated. A push button takes an icon (a stream value or an
    /// image `data:` URI) or a caption.
    pub fn set_value(
        &mut self,
        doc: &mut PdfDocument,
        value: impl Into<FieldValue>,
    ) -> Result<&mut Self> {
        let value = value.into();
        match self.kind {
            Some(FieldKind::PushButton) => return self.set_button_value(doc, value),
            Some(FieldKind::Signature) => {
                return Err(Error::Unsupported(
                    "values of signature fields are signature dictionaries".to_string(),
                ))
            },
            Some(FieldKind::Checkbox(_)) | Some(FieldKind::RadioButton) => {
                self.set_toggle_value(doc, &value.as_text())?;
            },
            Some(FieldKind::Choice { combo }) => {
                self.set_choice_value(doc, &value.as_text(), combo)?;
                self.propagate_value(doc, &value)?;
            },
            _ => {
                doc.dict_mut(self.object)?
                    .insert("V".to_string(), Object::text_string(&value.as_text()));
                self.propagate_value(doc, &value)?;
            },
        }
        self.changed(doc)
    }

    /// Set the value, drawing it with `font` at `size`.
    pub fn set_value_with_font(
        &mut self,
        doc: &mut PdfDocument,
        value: impl Into<FieldValue>,
        font: ObjectRef,
        size: f32,
    ) -> Result<&mut Self> {
        self.style.font = Some(font);
        self.style.font_size = Some(AppearanceStyle::normalized_font_size(size));
        self.set_value(doc, value)
    }

    /// Widget `/AS` entries follow when the appearance is regenerated.
    fn set_toggle_value(&mut self, doc: &mut PdfDocument, value: &str) -> Result<()> {
        let name = if value.is_empty() { "Off" } else { value };
        doc.dict_mut(self.object)?
            .insert("V".to_string(), Object::name(name));
        Ok(())
    }

    fn set_choice_value(&mut self, doc: &mut PdfDocument, value: &str, combo: bool) -> Result<()> {
        let options = self.options(doc);
        let dict = doc.dict_mut(self.object)?;
        dict.insert("V".to_string(), Object::text_string(value));
        if combo {
            return Ok(());
        }
        match options
            .iter()
            .position(|o| o.export == value || o.display == value)
        {
            Some(index) => {
                dict.insert("I".to_string(), Object::Array(vec![Object::Integer(index as i64)]));
            },
            None => {
                dict.shift_remove("I");
            },
        }
        Ok(())
    }

    fn propagate_value(&mut self, doc: &mut PdfDocument, value: &FieldValue) -> Result<()> {
        for kid in self.kid_fields(doc) {
            let mut field = FormField::make(doc, kid)?;
            if !has_key(doc, kid, "DA") {
                field.style.font = self.style.font;
                field.style.font_size = self.style.font_size;
                field.style.color = self.style.color.clone();
            }
            field.set_value(doc, value.clone())?;
        }
        Ok(())
    }

    fn set_button_value(&mut self, doc: &mut PdfDocument, value: FieldValue) -> Result<&mut Self> {
        match value {
            FieldValue::Stream(bytes) => self.set_image(doc, &bytes),
            other => {
                let text = other.as_text();
                match decode_image_uri(&text) {
                    Some(bytes) => self.set_image(doc, &bytes),
                    None => self.set_caption(doc, &text),
                }
            },
        }
    }

    /// Draw text with this font.
    pub fn set_font(&mut self, doc: &mut PdfDocument, font: ObjectRef) -> Result<&mut Self> {
        self.style.font = Some(font);
        self.changed(doc)
    }

    /// Draw text at this size; `0` sizes it to the box.
    pub fn set_font_size(&mut self, doc: &mut PdfDocument, size: f32) -> Result<&mut Self> {
        self.style.font_size = Some(AppearanceStyle::normalized_font_size(size));
        self.changed(doc)
    }

    /// Set font and size together, regenerating once.
    pub fn set_font_and_size(
        &mut self,
        doc: &mut PdfDocument,
        font: ObjectRef,
        size: f32,
    ) -> Result<&mut Self> {
        self.style.font = Some(font);
        self.style.font_size = Some(AppearanceStyle::normalized_font_size(size));
        self.changed(doc)
    }

    /// Text and symbol color.
    pub fn set_color(&mut self, doc: &mut PdfDocument, color: Color) -> Result<&mut Self> {
        self.style.color = Some(color);
        self.changed(doc)
    }

    /// Background color; `None` for transparent.
    pub fn set_background_color(
        &mut self,
        doc: &mut PdfDocument,
        color: Option<Color>,
    ) -> Result<&mut Self> {
        for target in self.decorated(doc) {
            set_mk_entry(doc, target, "BG", color.as_ref().map(Color::to_object))?;
        }
        self.style.background_color = color;
        self.changed(doc)
    }

    /// Border color; `None` for no border.
    pub fn set_border_color(
        &mut self,
        doc: &mut PdfDocument,
        color: Option<Color>,
    ) -> Result<&mut Self> {
        for target in self.decorated(doc) {
            set_mk_entry(doc, target, "BC", color.as_ref().map(Color::to_object))?;
        }
        self.style.border_color = color;
        self.changed(doc)
    }

    /// Border width in points.
    pub fn set_border_width(&mut self, doc: &mut PdfDocument, width: f32) -> Result<&mut Self> {
        let width = width.max(0.0);
        for target in self.decorated(doc) {
            let mut bs = doc
                .lookup(target, "BS")
                .and_then(Object::as_dict)
                .cloned()
                .unwrap_or_default();
            bs.insert("W".to_string(), Object::real(width));
            bs.entry("S".to_string()).or_insert_with(|| Object::name("S"));
            doc.dict_mut(target)?
                .insert("BS".to_string(), Object::Dictionary(bs));
        }
        self.style.border_width = Some(width);
        self.changed(doc)
    }

    /// Widget rotation in degrees; must be a multiple of 90.
    pub fn set_rotation(&mut self, doc: &mut PdfDocument, degrees: i32) -> Result<&mut Self> {
        let rotation = Rotation::from_degrees(degrees)?;
        for target in self.decorated(doc) {
            set_mk_entry(
                doc,
                target,
                "R",
                Some(Object::Integer(rotation.degrees() as i64)),
            )?;
        }
        self.style.rotation = Some(rotation);
        self.changed(doc)
    }

    /// Text justification (`/Q`).
    pub fn set_justification(
        &mut self,
        doc: &mut PdfDocument,
        justification: Justification,
    ) -> Result<&mut Self> {
        doc.dict_mut(self.object)?
            .insert("Q".to_string(), Object::Integer(justification.q_value()));
        self.changed(doc)
    }

    /// Checkbox symbol.
    pub fn set_check_type(
        &mut self,
        doc: &mut PdfDocument,
        symbol: CheckSymbol,
    ) -> Result<&mut Self> {
        self.require(matches!(self.kind, Some(FieldKind::Checkbox(_))), "check type")?;
        for widget in self.decorated(doc) {
            set_mk_entry(
                doc,
                widget,
                "CA",
                Some(Object::text_string(&symbol.code().to_string())),
            )?;
        }
        self.kind = Some(FieldKind::Checkbox(symbol));
        self.changed(doc)
    }

    /// Show, hide or keep a widget from printing.
    pub fn set_visibility(
        &mut self,
        doc: &mut PdfDocument,
        visibility: Visibility,
    ) -> Result<&mut Self> {
        match visibility.annotation_flags() {
            Some(flags) => {
                for widget in self.widgets(doc) {
                    doc.dict_mut(widget)?
                        .insert("F".to_string(), Object::Integer(flags.bits() as i64));
                }
            },
            None => debug!("Visibility {:?} leaves /F of {} as is", visibility, self.object),
        }
        self.changed(doc)
    }

    /// Replace `/Ff`.
    ///
    /// The appearance only changes when the comb flag flips on a field
    /// with a positive `/MaxLen`, so only then is it regenerated.
    pub fn set_field_flags(
        &mut self,
        doc: &mut PdfDocument,
        flags: FieldFlags,
    ) -> Result<&mut Self> {
        let previous = self.field_flags(doc);
        doc.dict_mut(self.object)?
            .insert("Ff".to_string(), Object::Integer(flags.bits() as i64));
        self.kind = self.classify(doc);
        let comb_flipped = (previous ^ flags).contains(FieldFlags::COMB);
        if comb_flipped && self.max_len(doc).unwrap_or(0) > 0 {
            self.changed(doc)
        } else {
            Ok(self)
        }
    }

    /// Maximum text length (`/MaxLen`).
    pub fn set_max_len(&mut self, doc: &mut PdfDocument, max_len: u32) -> Result<&mut Self> {
        self.require(self.form_type(doc) == Some(FieldType::Text), "max length")?;
        doc.dict_mut(self.object)?
            .insert("MaxLen".to_string(), Object::Integer(max_len as i64));
        self.kind = self.classify(doc);
        self.changed(doc)
    }

    /// Replace the options of a choice field.
    pub fn set_options<I, O>(&mut self, doc: &mut PdfDocument, options: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = O>,
        O: Into<ChoiceOption>,
    {
        self.require(matches!(self.kind, Some(FieldKind::Choice { .. })), "options")?;
        let opt = options
            .into_iter()
            .map(|o| Into::<ChoiceOption>::into(o).to_object())
            .collect();
        doc.dict_mut(self.object)?
            .insert("Opt".to_string(), Object::Array(opt));
        self.changed(doc)
    }

    /// First option shown by a list box (`/TI`).
    pub fn set_top_index(&mut self, doc: &mut PdfDocument, index: usize) -> Result<&mut Self> {
        self.require(matches!(self.kind, Some(FieldKind::Choice { .. })), "top index")?;
        doc.dict_mut(self.object)?
            .insert("TI".to_string(), Object::Integer(index as i64));
        self.changed(doc)
    }

    /// Push button icon from PNG or JPEG bytes.
    pub fn set_image(&mut self, doc: &mut PdfDocument, bytes: &[u8]) -> Result<&mut Self> {
        self.require(self.kind == Some(FieldKind::PushButton), "image")?;
        let icon = IconImage::from_bytes(bytes)?;
        let compress = doc.config().compress_streams;
        let soft_mask = match icon.soft_mask_stream(compress)? {
            Some(mask) => Some(Object::Reference(doc.allocate(mask))),
            None => None,
        };
        let image = doc.allocate(icon.to_stream(compress, soft_mask)?);
        debug!(
            "Icon {}x{} for {} stored as {}",
            icon.width, icon.height, self.object, image
        );
        for widget in self.decorated(doc) {
            set_mk_entry(doc, widget, "I", Some(image.into()))?;
        }
        self.image = Some(image);
        self.changed(doc)
    }

    /// Push button icon from an existing form XObject.
    ///
    /// An image icon, if one is set, still takes precedence.
    pub fn set_form_xobject(
        &mut self,
        doc: &mut PdfDocument,
        xobject: ObjectRef,
    ) -> Result<&mut Self> {
        self.require(self.kind == Some(FieldKind::PushButton), "form icon")?;
        let subtype = doc.lookup(xobject, "Subtype").and_then(Object::as_name);
        if subtype != Some("Form") {
            return Err(Error::InvalidObjectType {
                expected: "Form XObject".to_string(),
                found: subtype.unwrap_or("none").to_string(),
            });
        }
        let height = form_height(doc, xobject);
        if self.image.is_none() {
            for widget in self.decorated(doc) {
                set_mk_entry(doc, widget, "I", Some(xobject.into()))?;
            }
        }
        self.form = Some((xobject, height));
        self.changed(doc)
    }

    /// Push button caption (`/MK /CA`).
    pub fn set_caption(&mut self, doc: &mut PdfDocument, caption: &str) -> Result<&mut Self> {
        self.require(self.kind == Some(FieldKind::PushButton), "caption")?;
        for widget in self.decorated(doc) {
            set_mk_entry(doc, widget, "CA", Some(Object::text_string(caption)))?;
        }
        self.changed(doc)
    }

    // ------------------------------------------------------------------
    // Appearance generation
    // ------------------------------------------------------------------

    /// Write `/DA` from the current style.
    ///
    /// The font is registered in the form's `/DR /Font` if it is not there
    /// yet. Only text, choice and push button fields carry a `/DA`.
    pub fn update_default_appearance(&mut self, doc: &mut PdfDocument) -> Result<()> {
        self.resolve_default_appearance(doc).map(|_| ())
    }

    fn resolve_default_appearance(&mut self, doc: &mut PdfDocument) -> Result<Option<ResolvedFont>> {
        match self.kind {
            Some(kind) if kind.uses_default_appearance() => {},
            _ => return Ok(None),
        }
        let font = self.resolve_font(doc)?;
        let size = self
            .style
            .font_size
            .unwrap_or(doc.config().default_font_size);
        let da = DefaultAppearance::generate(&font.name, size, self.style.color.as_ref());
        doc.dict_mut(self.object)?
            .insert("DA".to_string(), Object::text_string(&da));
        self.style.font = Some(font.reference);
        self.style.font_size = Some(size);
        Ok(Some(font))
    }

    /// The style font, else the `/DA` font, else the configured default.
    fn resolve_font(&self, doc: &mut PdfDocument) -> Result<ResolvedFont> {
        let da_font = self
            .default_appearance(doc)
            .and_then(|da| DefaultAppearance::parse(&da).font);
        let (reference, preferred) = match (self.style.font, da_font) {
            (Some(font), _) => (font, None),
            (None, Some(name)) => match doc.resource_font(&name) {
                Some(font) => (font, None),
                None => match StandardFont::from_alias(&name)
                    .or_else(|| StandardFont::from_base_font(&name))
                {
                    Some(standard) => (doc.add_font(standard), Some(name)),
                    None => {
                        warn!(
                            "Font /{} of {} is not in the form resources; using {}",
                            name,
                            self.object,
                            doc.config().default_font
                        );
                        let fallback = doc.config().default_standard_font();
                        (doc.add_font(fallback), None)
                    },
                },
            },
            (None, None) => {
                let fallback = doc.config().default_standard_font();
                (doc.add_font(fallback), None)
            },
        };
        let name = register_font(doc, reference, preferred.as_deref())?;
        Ok(ResolvedFont {
            name,
            reference,
            metrics: doc.font_metrics(reference),
        })
    }

    /// Regenerate the appearance of every widget.
    ///
    /// Returns `Ok(false)` when the form type is not recognized. A field
    /// without widgets regenerates its kid fields instead.
    pub fn regenerate_field(&mut self, doc: &mut PdfDocument) -> Result<bool> {
        let Some(kind) = self.kind else {
            warn!(
                "{} has an unrecognized form type; no appearance generated",
                self.describe(doc)
            );
            return Ok(false);
        };
        if kind == FieldKind::Signature {
            self.state = FieldState::Clean;
            return Ok(true);
        }

        let font = self.resolve_default_appearance(doc)?;
        let widgets = self.widgets(doc);
        if widgets.is_empty() {
            let kids = self.kid_fields(doc);
            if kids.is_empty() {
                return Err(Error::MissingGeometry(self.describe(doc)));
            }
            let mut all = true;
            for kid in kids {
                let mut field = FormField::make(doc, kid)?;
                field.style = AppearanceStyle::resolve(&self.style, &field.style);
                all &= field.regenerate_field(doc)?;
            }
            self.state = FieldState::Clean;
            return Ok(all);
        }

        for widget in widgets {
            self.draw_widget(doc, widget, kind, font.as_ref())?;
        }
        debug!("Regenerated {}", self.describe(doc));
        self.state = FieldState::Clean;
        Ok(true)
    }

    fn draw_widget(
        &self,
        doc: &mut PdfDocument,
        widget: ObjectRef,
        kind: FieldKind,
        field_font: Option<&ResolvedFont>,
    ) -> Result<()> {
        let rect = doc
            .lookup(widget, "Rect")
            .and_then(rect_components)
            .map(|[x0, y0, x1, y1]| Rect::from_points(x0, y0, x1, y1))
            .ok_or_else(|| Error::MissingGeometry(self.describe(doc)))?;
        let page_rotation = doc
            .dict(widget)?
            .get("P")
            .and_then(Object::as_reference)
            .map(|page| doc.page_rotation(page))
            .unwrap_or(0);
        let style = AppearanceStyle::resolve(&self.style, &self.widget_style(doc, widget));
        let (matrix, bbox) = compute_content_matrix(
            rect.at_origin(),
            page_rotation,
            style.effective_rotation().degrees(),
        );

        let config = doc.config().clone();
        let pdfa = config.conformance.is_some();
        let font = match kind {
            FieldKind::Checkbox(_) if !pdfa => {
                let reference = doc.add_font(StandardFont::ZapfDingbats);
                Some(ResolvedFont {
                    name: register_font(doc, reference, Some(SYMBOL_FONT_NAME))?,
                    reference,
                    metrics: StandardFont::ZapfDingbats,
                })
            },
            FieldKind::Checkbox(_) | FieldKind::RadioButton => None,
            _ => match (style.font, field_font) {
                (Some(own), Some(field)) if own != field.reference => Some(ResolvedFont {
                    name: register_font(doc, own, None)?,
                    reference: own,
                    metrics: doc.font_metrics(own),
                }),
                (_, field) => field.cloned(),
            },
        };
        let default_size = if kind.is_toggle() {
            0.0
        } else {
            config.default_font_size
        };

        let ctx = AppearanceContext {
            bbox,
            matrix: Some(matrix),
            border_width: style.effective_border_width(),
            border_color: style.border_color.clone(),
            background_color: style.background_color.clone(),
            text_color: style.effective_color(),
            font: match (&font, kind) {
                (Some(f), _) => f.metrics,
                (None, FieldKind::Checkbox(_)) => StandardFont::ZapfDingbats,
                (None, _) => config.default_standard_font(),
            },
            font_name: font.as_ref().map(|f| f.name.clone()).unwrap_or_default(),
            font_ref: font.as_ref().map(|f| f.reference),
            font_size: style
                .font_size
                .map(AppearanceStyle::normalized_font_size)
                .unwrap_or(default_size),
            justification: self.justification(doc),
            min_font_size: config.min_font_size,
            max_font_size: config.default_font_size,
            conformance: config.conformance,
        };

        let compress = config.compress_streams;
        let value = self.value_as_string(doc);
        let password = self.field_flags(doc).contains(FieldFlags::PASSWORD);
        match kind {
            FieldKind::PlainText => {
                store_normal(doc, widget, text::plain(&ctx, &value, password), compress)?;
            },
            FieldKind::CombText { max_len } => {
                store_normal(doc, widget, text::comb(&ctx, &value, max_len, password), compress)?;
            },
            FieldKind::MultilineText => {
                store_normal(doc, widget, text::multiline(&ctx, &value, password), compress)?;
            },
            FieldKind::Choice { combo } => {
                let display = self.choice_display(doc, combo);
                store_normal(doc, widget, choice::render(&ctx, &display), compress)?;
            },
            FieldKind::Checkbox(symbol) => {
                let on_name = match self.value(doc).map(|v| v.as_text()) {
                    Some(v) if v != "Off" && !v.is_empty() => v,
                    _ => on_state(doc, widget).unwrap_or_else(|| "Yes".to_string()),
                };
                let toggle = checkbox::render(&ctx, symbol, &on_name);
                set_mk_entry(
                    doc,
                    widget,
                    "CA",
                    Some(Object::text_string(&symbol.code().to_string())),
                )?;
                let shown = if value == toggle.on_name { toggle.on_name.as_str() } else { "Off" };
                doc.dict_mut(widget)?
                    .insert("AS".to_string(), Object::name(shown));
                store_states(
                    doc,
                    widget,
                    vec![(toggle.on_name.clone(), toggle.on), ("Off".to_string(), toggle.off)],
                    compress,
                )?;
            },
            FieldKind::RadioButton => {
                let on_name = on_state(doc, widget).unwrap_or_else(|| {
                    debug!("Radio widget {} names no on state; using Yes", widget);
                    "Yes".to_string()
                });
                let toggle = radio::render(&ctx, &on_name);
                let shown = if value == toggle.on_name { toggle.on_name.as_str() } else { "Off" };
                doc.dict_mut(widget)?
                    .insert("AS".to_string(), Object::name(shown));
                store_states(
                    doc,
                    widget,
                    vec![(toggle.on_name.clone(), toggle.on), ("Off".to_string(), toggle.off)],
                    compress,
                )?;
            },
            FieldKind::PushButton => {
                let caption = mk_entry(doc, widget, "CA").and_then(|c| c.as_text_string());
                let face = ButtonFace::choose(
                    self.image.map(|r| (IMAGE_RESOURCE, r)),
                    self.form.map(|(r, h)| (FORM_RESOURCE, r, h)),
                    caption.as_deref(),
                );
                let ap = push_button::render(&ctx, &face);
                let background = ctx.background_color.clone().unwrap_or_else(Color::light_gray);
                set_mk_entry(doc, widget, "BG", Some(background.to_object()))?;
                if pdfa {
                    let state = doc
                        .lookup(widget, "AS")
                        .and_then(Object::as_name)
                        .map(str::to_string)
                        .unwrap_or_else(|| PUSH_STATE.to_string());
                    doc.dict_mut(widget)?
                        .insert("AS".to_string(), Object::name(state.as_str()));
                    store_states(doc, widget, vec![(state, ap)], compress)?;
                } else {
                    store_normal(doc, widget, ap, compress)?;
                }
            },
            FieldKind::Signature => {},
        }

        if pdfa {
            let flags = doc
                .lookup(widget, "F")
                .and_then(Object::as_integer)
                .map(|f| AnnotationFlags::from_bits_retain(f as u32))
                .unwrap_or_default()
                | AnnotationFlags::PRINT;
            doc.dict_mut(widget)?
                .insert("F".to_string(), Object::Integer(flags.bits() as i64));
        }
        Ok(())
    }

    fn choice_display(&self, doc: &PdfDocument, combo: bool) -> ChoiceDisplay {
        let options = self.options(doc);
        if combo {
            let value = self.value_as_string(doc);
            let shown = options
                .into_iter()
                .find(|o| o.export == value)
                .map(|o| o.display)
                .unwrap_or(value);
            return ChoiceDisplay {
                lines: vec![shown],
                combo: true,
                ..Default::default()
            };
        }

        let top_index = doc
            .inherited(self.object, "TI")
            .and_then(Object::as_integer)
            .filter(|i| *i >= 0)
            .unwrap_or(0) as usize;
        let mut selected: Vec<usize> = doc
            .inherited(self.object, "I")
            .and_then(Object::as_array)
            .map(|a| {
                a.iter()
                    .filter_map(Object::as_integer)
                    .filter(|i| *i >= 0)
                    .map(|i| i as usize)
                    .collect()
            })
            .unwrap_or_default();
        if selected.is_empty() {
            let value = self.value_as_string(doc);
            selected.extend(options.iter().position(|o| o.export == value));
        }
        ChoiceDisplay {
            lines: options
                .iter()
                .skip(top_index)
                .map(|o| o.display.replace(['\r', '\n'], " "))
                .collect(),
            top_index,
            selected,
            combo: false,
        }
    }
}

/// Register `font` in the form's `/DR /Font` and return its name.
///
/// A font already present keeps its name. Otherwise `preferred` is used
/// when free, else the first free name of `F1`, `F2`, ...
pub(crate) fn register_font(
    doc: &mut PdfDocument,
    font: ObjectRef,
    preferred: Option<&str>,
) -> Result<String> {
    if let Some(name) = doc.resource_font_name(font) {
        return Ok(name);
    }
    let fonts = doc.resource_fonts_mut()?;
    let name = match preferred {
        Some(name) if !fonts.contains_key(name) => name.to_string(),
        _ => {
            let mut index = 1;
            loop {
                let candidate = format!("F{}", index);
                if !fonts.contains_key(&candidate) {
                    break candidate;
                }
                index += 1;
            }
        },
    };
    fonts.insert(name.clone(), font.into());
    debug!("Registered font {} as /{}", font, name);
    Ok(name)
}

fn has_key(doc: &PdfDocument, r: ObjectRef, key: &str) -> bool {
    doc.dict(r).map(|d| d.contains_key(key)).unwrap_or(false)
}

fn kid_refs(doc: &PdfDocument, r: ObjectRef) -> Vec<ObjectRef> {
    doc.lookup(r, "Kids")
        .and_then(Object::as_array)
        .map(|kids| kids.iter().filter_map(Object::as_reference).collect())
        .unwrap_or_default()
}

/// Resolved `/MK` entry.
fn mk_entry(doc: &PdfDocument, widget: ObjectRef, key: &str) -> Option<Object> {
    let value = doc.lookup(widget, "MK")?.as_dict()?.get(key)?;
    Some(doc.resolve(value).clone())
}

/// `/MK` entry as written, references kept.
fn mk_raw(doc: &PdfDocument, widget: ObjectRef, key: &str) -> Option<Object> {
    doc.lookup(widget, "MK")?.as_dict()?.get(key).cloned()
}

fn set_mk_entry(
    doc: &mut PdfDocument,
    target: ObjectRef,
    key: &str,
    value: Option<Object>,
) -> Result<()> {
    let mut mk = doc
        .lookup(target, "MK")
        .and_then(Object::as_dict)
        .cloned()
        .unwrap_or_default();
    match value {
        Some(value) => {
            mk.insert(key.to_string(), value);
        },
        None => {
            mk.shift_remove(key);
        },
    }
    doc.dict_mut(target)?
        .insert("MK".to_string(), Object::Dictionary(mk));
    Ok(())
}

/// Colors, rotation and border width a dictionary sets for itself.
fn decoration(doc: &PdfDocument, r: ObjectRef) -> AppearanceStyle {
    let rotation = mk_entry(doc, r, "R")
        .and_then(|deg| deg.as_integer())
        .and_then(|deg| match Rotation::from_degrees(deg as i32) {
            Ok(rotation) => Some(rotation),
            Err(e) => {
                warn!("Ignoring /MK /R of {}: {}", r, e);
                None
            },
        });
    let border_width = doc
        .lookup(r, "BS")
        .and_then(Object::as_dict)
        .and_then(|bs| bs.get("W"))
        .and_then(|w| doc.resolve(w).as_number())
        .or_else(|| {
            doc.lookup(r, "Border")
                .and_then(Object::as_array)
                .and_then(|border| border.get(2))
                .and_then(Object::as_number)
        });
    AppearanceStyle {
        background_color: mk_entry(doc, r, "BG").and_then(|c| Color::from_object(&c)),
        border_color: mk_entry(doc, r, "BC").and_then(|c| Color::from_object(&c)),
        border_width,
        rotation,
        ..Default::default()
    }
}

fn apply_default_appearance(doc: &PdfDocument, style: &mut AppearanceStyle, da: &str) {
    let parsed = DefaultAppearance::parse(da);
    style.font = parsed.font.as_deref().and_then(|name| doc.resource_font(name));
    style.font_size = parsed.size.map(AppearanceStyle::normalized_font_size);
    style.color = parsed.color;
}

fn form_height(doc: &PdfDocument, xobject: ObjectRef) -> f32 {
    doc.lookup(xobject, "BBox")
        .and_then(rect_components)
        .map(|[_, y0, _, y1]| (y1 - y0).abs())
        .unwrap_or(0.0)
}

/// Payload of a `data:image/...;base64,` URI.
fn decode_image_uri(text: &str) -> Option<Vec<u8>> {
    let rest = text.trim().strip_prefix("data:image/")?;
    let (_, payload) = rest.split_once(";base64,")?;
    match base64::engine::general_purpose::STANDARD.decode(payload) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            warn!("Icon data URI is not valid base64: {}", e);
            None
        },
    }
}

/// The widget's `/AP /N` entry as written.
fn normal_appearance(doc: &PdfDocument, widget: ObjectRef) -> Option<Object> {
    doc.lookup(widget, "AP")?.as_dict()?.get("N").cloned()
}

/// State names of a widget's `/AP /N` dictionary.
fn widget_states(doc: &PdfDocument, widget: ObjectRef) -> Vec<String> {
    match normal_appearance(doc, widget).map(|n| doc.resolve(&n).clone()) {
        Some(Object::Dictionary(states)) => states.keys().cloned().collect(),
        _ => Vec::new(),
    }
}

/// First state of a widget other than `Off`.
fn on_state(doc: &PdfDocument, widget: ObjectRef) -> Option<String> {
    widget_states(doc, widget).into_iter().find(|s| s != "Off")
}

fn collect_states(doc: &PdfDocument, r: ObjectRef, states: &mut IndexSet<String>, depth: usize) {
    if depth > MAX_DEPTH {
        warn!("Field tree under {} is too deep or cyclic", r);
        return;
    }
    if let Some(opts) = doc.lookup(r, "Opt").and_then(Object::as_array) {
        states.extend(
            opts.iter()
                .filter_map(|o| ChoiceOption::from_object(doc.resolve(o)))
                .map(|o| o.display),
        );
    }
    states.extend(widget_states(doc, r));
    for kid in kid_refs(doc, r) {
        collect_states(doc, kid, states, depth + 1);
    }
}

/// Store `stream`, overwriting `existing` when it already holds a stream.
fn store_stream(doc: &mut PdfDocument, existing: Option<ObjectRef>, stream: Object) -> Result<ObjectRef> {
    match existing {
        Some(r) if matches!(doc.get(r), Ok(Object::Stream { .. })) => {
            doc.put(r, stream)?;
            Ok(r)
        },
        _ => Ok(doc.allocate(stream)),
    }
}

fn set_normal_appearance(doc: &mut PdfDocument, widget: ObjectRef, normal: Object) -> Result<()> {
    let mut ap = doc
        .lookup(widget, "AP")
        .and_then(Object::as_dict)
        .cloned()
        .unwrap_or_default();
    ap.insert("N".to_string(), normal);
    doc.dict_mut(widget)?
        .insert("AP".to_string(), Object::Dictionary(ap));
    Ok(())
}

fn store_normal(
    doc: &mut PdfDocument,
    widget: ObjectRef,
    ap: AppearanceStreamBuilder,
    compress: bool,
) -> Result<()> {
    let existing = normal_appearance(doc, widget).and_then(|n| n.as_reference());
    let stream = store_stream(doc, existing, ap.build(compress)?)?;
    set_normal_appearance(doc, widget, stream.into())
}

fn store_states(
    doc: &mut PdfDocument,
    widget: ObjectRef,
    states: Vec<(String, AppearanceStreamBuilder)>,
    compress: bool,
) -> Result<()> {
    let existing = match normal_appearance(doc, widget).map(|n| doc.resolve(&n).clone()) {
        Some(Object::Dictionary(d)) => d,
        _ => Dictionary::new(),
    };
    let mut normal = Dictionary::new();
    for (name, ap) in states {
        let previous = existing.get(&name).and_then(Object::as_reference);
        let stream = store_stream(doc, previous, ap.build(compress)?)?;
        normal.insert(name, stream.into());
    }
    set_normal_appearance(doc, widget, Object::Dictionary(normal))
}
