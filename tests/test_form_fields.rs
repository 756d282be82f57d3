//! Integration tests for form field appearance generation.
//!
//! Tests the complete workflow from building or binding a field to the
//! appearance streams stored under its widgets' `/AP`:
//! - Text layout (auto size, comb cells, rotation)
//! - Button states (checkbox, radio, push button faces)
//! - Choice lists and value propagation through kid fields
//! - Form resources and PDF/A output

use base64::Engine;
use pdf_oxide_forms::color::Color;
use pdf_oxide_forms::compliance::PdfALevel;
use pdf_oxide_forms::config::FormConfig;
use pdf_oxide_forms::document::PdfDocument;
use pdf_oxide_forms::fonts::{FontMetrics, StandardFont};
use pdf_oxide_forms::forms::builders::{
    CheckboxBuilder, ComboBoxBuilder, FieldBuilder, ListBoxBuilder, PushButtonBuilder,
    RadioGroupBuilder, TextFieldBuilder,
};
use pdf_oxide_forms::forms::{AnnotationFlags, FieldFlags, FieldKind, FormField, Justification};
use pdf_oxide_forms::geometry::Rect;
use pdf_oxide_forms::object::{Dictionary, Object, ObjectRef};
use regex::Regex;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn setup() -> (PdfDocument, ObjectRef) {
    init_logging();
    let mut doc = PdfDocument::new();
    let page = doc.add_page(612.0, 792.0).expect("page");
    (doc, page)
}

/// The `/AP /N` stream object of a widget, or of one of its states.
fn normal_stream(doc: &PdfDocument, widget: ObjectRef, state: Option<&str>) -> Object {
    let normal = doc
        .lookup(widget, "AP")
        .and_then(Object::as_dict)
        .and_then(|ap| ap.get("N"))
        .expect("widget has /AP /N");
    let reference = match state {
        Some(state) => normal
            .as_dict()
            .and_then(|states| states.get(state))
            .and_then(Object::as_reference)
            .expect("state stream"),
        None => normal.as_reference().expect("stream reference"),
    };
    doc.get(reference).expect("stream object").clone()
}

fn normal_content(doc: &PdfDocument, widget: ObjectRef, state: Option<&str>) -> String {
    let stream = normal_stream(doc, widget, state);
    String::from_utf8_lossy(stream.stream_data().expect("stream data")).into_owned()
}

fn text_positions(content: &str) -> Vec<(f32, f32, String)> {
    let re = Regex::new(r"1 0 0 1 (-?[\d.]+) (-?[\d.]+) Tm\n\((.*)\) Tj").unwrap();
    re.captures_iter(content)
        .map(|c| (c[1].parse().unwrap(), c[2].parse().unwrap(), c[3].to_string()))
        .collect()
}

fn font_size(content: &str) -> f32 {
    let re = Regex::new(r"/\w+ ([\d.]+) Tf").unwrap();
    re.captures(content).expect("Tf operator")[1].parse().unwrap()
}

fn appearance_state(doc: &PdfDocument, widget: ObjectRef) -> Option<String> {
    doc.lookup(widget, "AS")
        .and_then(Object::as_name)
        .map(str::to_string)
}

fn png_bytes() -> Vec<u8> {
    let mut out = std::io::Cursor::new(Vec::new());
    image::RgbImage::from_pixel(4, 4, image::Rgb([0, 128, 255]))
        .write_to(&mut out, image::ImageOutputFormat::Png)
        .unwrap();
    out.into_inner()
}

// ============================================================================
// Text fields
// ============================================================================

#[test]
fn test_auto_sized_text_is_vertically_centered() {
    let (mut doc, page) = setup();
    let mut field = TextFieldBuilder::new("greeting", Rect::new(72.0, 700.0, 100.0, 20.0))
        .with_font_size(-1.0)
        .build(&mut doc, page)
        .unwrap();
    field.set_value(&mut doc, "Hello").unwrap();

    // Negative sizes are stored as auto
    let da = doc
        .lookup(field.object(), "DA")
        .and_then(Object::as_text_string)
        .unwrap();
    assert_eq!(da, "/F1 0 Tf");

    let content = normal_content(&doc, field.object(), None);
    assert!(content.contains("/F1 12 Tf"), "{}", content);
    let bt = Regex::new(r"(?m)^BT$").unwrap();
    let et = Regex::new(r"(?m)^ET$").unwrap();
    assert_eq!(bt.find_iter(&content).count(), 1);
    assert_eq!(et.find_iter(&content).count(), 1);

    let size = font_size(&content);
    assert!((4.0..=12.0).contains(&size), "size {}", size);
    let positions = text_positions(&content);
    assert_eq!(positions.len(), 1);
    let (_, baseline, text) = &positions[0];
    assert_eq!(text, "Hello");

    let font = StandardFont::Helvetica;
    let middle = baseline + (font.ascent(size) + font.descent(size)) / 2.0;
    assert!((middle - 10.0).abs() < 1e-3, "glyph box centered at {}", middle);
    // Helvetica at 12pt: 10 - (8.616 - 2.484) / 2
    assert!((baseline - 6.934).abs() < 1e-3, "baseline {}", baseline);
}

#[test]
fn test_comb_glyphs_centered_in_cells() {
    let (mut doc, page) = setup();
    let field = TextFieldBuilder::new("zip", Rect::new(72.0, 650.0, 100.0, 20.0))
        .comb(5)
        .with_value("abc")
        .build(&mut doc, page)
        .unwrap();
    assert_eq!(field.kind(), Some(FieldKind::CombText { max_len: 5 }));

    let content = normal_content(&doc, field.object(), None);
    let size = font_size(&content);
    let font = StandardFont::Helvetica;
    let positions = text_positions(&content);
    assert_eq!(positions.len(), 3);
    for ((x, _, glyph), expected) in positions.iter().zip([10.0f32, 30.0, 50.0]) {
        let center = x + font.width(glyph, size) / 2.0;
        assert!((center - expected).abs() < 1e-3, "{} centered at {}", glyph, center);
    }
}

#[test]
fn test_rotated_widget_matrix() {
    let (mut doc, page) = setup();
    let field = TextFieldBuilder::new("side", Rect::new(500.0, 100.0, 100.0, 20.0))
        .with_rotation(90)
        .with_value("Up")
        .build(&mut doc, page)
        .unwrap();

    let stream = normal_stream(&doc, field.object(), None);
    let dict = stream.as_dict().unwrap();
    assert_eq!(
        dict.get("Matrix"),
        Some(&Object::number_array(&[0.0, 1.0, -1.0, 0.0, 100.0, 0.0]))
    );
    assert_eq!(
        dict.get("BBox"),
        Some(&Object::number_array(&[0.0, 0.0, 20.0, 100.0]))
    );
    let mk = doc.lookup(field.object(), "MK").and_then(Object::as_dict).unwrap();
    assert_eq!(mk.get("R"), Some(&Object::Integer(90)));
}

#[test]
fn test_unrotated_widget_has_no_matrix() {
    let (mut doc, page) = setup();
    let field = TextFieldBuilder::new("plain", Rect::new(72.0, 100.0, 100.0, 20.0))
        .with_value("x")
        .build(&mut doc, page)
        .unwrap();
    let stream = normal_stream(&doc, field.object(), None);
    assert!(!stream.as_dict().unwrap().contains_key("Matrix"));
}

#[test]
fn test_form_fonts_get_fresh_names() {
    let (mut doc, page) = setup();
    let first = TextFieldBuilder::new("a", Rect::new(72.0, 600.0, 100.0, 20.0))
        .build(&mut doc, page)
        .unwrap();
    let second = TextFieldBuilder::new("b", Rect::new(72.0, 570.0, 100.0, 20.0))
        .with_font(StandardFont::Courier, 10.0)
        .build(&mut doc, page)
        .unwrap();
    let third = TextFieldBuilder::new("c", Rect::new(72.0, 540.0, 100.0, 20.0))
        .build(&mut doc, page)
        .unwrap();

    assert_eq!(first.default_appearance(&doc).as_deref(), Some("/F1 12 Tf"));
    assert_eq!(second.default_appearance(&doc).as_deref(), Some("/F2 10 Tf"));
    assert_eq!(third.default_appearance(&doc).as_deref(), Some("/F1 12 Tf"));

    let fonts = doc.resource_fonts().unwrap();
    assert_eq!(fonts.keys().collect::<Vec<_>>(), vec!["F1", "F2"]);
    let courier = fonts.get("F2").and_then(Object::as_reference).unwrap();
    assert_eq!(doc.font_metrics(courier), StandardFont::Courier);
}

// ============================================================================
// Buttons
// ============================================================================

#[test]
fn test_checkbox_off_to_on() {
    let (mut doc, page) = setup();
    let mut field = CheckboxBuilder::new("subscribe", Rect::new(72.0, 500.0, 14.0, 14.0))
        .build(&mut doc, page)
        .unwrap();
    assert_eq!(appearance_state(&doc, field.object()).as_deref(), Some("Off"));
    assert_eq!(field.value_as_string(&doc), "Off");

    field.set_value(&mut doc, "Yes").unwrap();
    assert_eq!(appearance_state(&doc, field.object()).as_deref(), Some("Yes"));
    assert_eq!(field.value_as_string(&doc), "Yes");

    let on = normal_content(&doc, field.object(), Some("Yes"));
    assert!(on.contains("/ZaDb "));
    assert!(on.contains("(4) Tj"));
    let off = normal_content(&doc, field.object(), Some("Off"));
    assert!(!off.contains("BT"));

    field.set_value(&mut doc, "Off").unwrap();
    assert_eq!(appearance_state(&doc, field.object()).as_deref(), Some("Off"));
}

#[test]
fn test_pdfa_checkbox_uses_vector_symbol() {
    init_logging();
    let mut doc = PdfDocument::with_config(FormConfig::new().with_conformance(PdfALevel::A1b));
    let page = doc.add_page(612.0, 792.0).unwrap();
    let field = CheckboxBuilder::new("agree", Rect::new(72.0, 500.0, 14.0, 14.0))
        .checked()
        .build(&mut doc, page)
        .unwrap();

    let on = normal_content(&doc, field.object(), Some("Yes"));
    assert!(!on.contains("Tf"));
    assert!(on.contains("14 0 0 14 0 0 cm"));
    for state in ["Yes", "Off"] {
        let stream = normal_stream(&doc, field.object(), Some(state));
        assert!(stream.as_dict().unwrap().contains_key("Resources"));
    }
    assert!(doc.resource_fonts().map_or(true, Dictionary::is_empty));

    let flags = doc
        .lookup(field.object(), "F")
        .and_then(Object::as_integer)
        .unwrap();
    assert!(AnnotationFlags::from_bits_retain(flags as u32).contains(AnnotationFlags::PRINT));
}

#[test]
fn test_radio_selection_sets_each_widget_state() {
    let (mut doc, page) = setup();
    let mut group = RadioGroupBuilder::new("payment")
        .add_button("Card", Rect::new(72.0, 400.0, 14.0, 14.0))
        .add_button("Cash", Rect::new(72.0, 380.0, 14.0, 14.0))
        .add_button("Check", Rect::new(72.0, 360.0, 14.0, 14.0))
        .selected("Card")
        .with_indicator_color(Color::rgb8(0, 0, 255))
        .build(&mut doc, page)
        .unwrap();

    let widgets = group.widgets(&doc);
    let states = |doc: &PdfDocument| -> Vec<Option<String>> {
        widgets.iter().map(|w| appearance_state(doc, *w)).collect()
    };
    assert_eq!(
        states(&doc),
        vec![Some("Card".to_string()), Some("Off".to_string()), Some("Off".to_string())]
    );

    group.set_value(&mut doc, "Check").unwrap();
    assert_eq!(
        states(&doc),
        vec![Some("Off".to_string()), Some("Off".to_string()), Some("Check".to_string())]
    );

    let on = normal_content(&doc, widgets[2], Some("Check"));
    assert!(on.contains("0 0 1 rg"));
}

#[test]
fn test_push_button_image_wins_over_caption() {
    let (mut doc, page) = setup();
    let mut button = PushButtonBuilder::new("logo", Rect::new(72.0, 300.0, 60.0, 30.0))
        .with_caption("Logo")
        .build(&mut doc, page)
        .unwrap();
    let content = normal_content(&doc, button.object(), None);
    assert!(content.contains("(Logo) Tj"));

    button.set_image(&mut doc, &png_bytes()).unwrap();
    let stream = normal_stream(&doc, button.object(), None);
    let content = String::from_utf8_lossy(stream.stream_data().unwrap()).into_owned();
    assert!(content.contains("/Im1 Do"));
    assert!(!content.contains("Tj"));

    let xobjects = stream
        .as_dict()
        .and_then(|d| d.get("Resources"))
        .and_then(Object::as_dict)
        .and_then(|r| r.get("XObject"))
        .and_then(Object::as_dict)
        .unwrap();
    let image = xobjects.get("Im1").and_then(Object::as_reference).unwrap();
    assert_eq!(
        doc.lookup(image, "Subtype").and_then(Object::as_name),
        Some("Image")
    );
}

#[test]
fn test_push_button_value_as_data_uri() {
    let (mut doc, page) = setup();
    let mut button = PushButtonBuilder::new("icon", Rect::new(72.0, 250.0, 30.0, 30.0))
        .build(&mut doc, page)
        .unwrap();
    let uri = format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(png_bytes())
    );
    button.set_value(&mut doc, uri).unwrap();
    let content = normal_content(&doc, button.object(), None);
    assert!(content.contains("/Im1 Do"));

    button.set_value(&mut doc, "Press").unwrap();
    let mk = doc.lookup(button.object(), "MK").and_then(Object::as_dict).unwrap();
    assert_eq!(mk.get("CA"), Some(&Object::text_string("Press")));
}

// ============================================================================
// Choice fields
// ============================================================================

#[test]
fn test_list_box_highlights_selection() {
    let (mut doc, page) = setup();
    let mut field = ListBoxBuilder::new("color", Rect::new(72.0, 150.0, 100.0, 60.0))
        .with_options(["Red", "Green", "Blue"])
        .with_value("Green")
        .build(&mut doc, page)
        .unwrap();

    let highlight = {
        let (r, g, b) = (10.0f32 / 255.0, 36.0f32 / 255.0, 106.0f32 / 255.0);
        format!("{} {} {} rg", r, g, b)
    };
    let gray = {
        let v = 192.0f32 / 255.0;
        format!("{} {} {} rg", v, v, v)
    };
    let selected_text = Regex::new(&format!(
        r"{}\n1 0 0 1 [-\d.]+ [-\d.]+ Tm\n\(Green\) Tj",
        regex::escape(&gray)
    ))
    .unwrap();

    let content = normal_content(&doc, field.object(), None);
    assert_eq!(content.matches(&highlight).count(), 1);
    assert!(selected_text.is_match(&content), "{}", content);
    assert!(content.contains("(Red) Tj"));

    field.set_value(&mut doc, "Blue").unwrap();
    assert_eq!(
        doc.lookup(field.object(), "I"),
        Some(&Object::Array(vec![Object::Integer(2)]))
    );
    let content = normal_content(&doc, field.object(), None);
    assert!(!selected_text.is_match(&content));
}

#[test]
fn test_appearance_states_in_order_without_duplicates() {
    let (mut doc, page) = setup();
    let list = ListBoxBuilder::new("size", Rect::new(72.0, 100.0, 100.0, 40.0))
        .with_options([("s", "Small"), ("m", "Medium"), ("s2", "Small")])
        .build(&mut doc, page)
        .unwrap();
    assert_eq!(list.appearance_states(&doc), vec!["Small", "Medium"]);

    let check = CheckboxBuilder::new("ok", Rect::new(72.0, 80.0, 12.0, 12.0))
        .with_export_value("Agreed")
        .build(&mut doc, page)
        .unwrap();
    assert_eq!(check.appearance_states(&doc), vec!["Agreed", "Off"]);
}

// ============================================================================
// Field hierarchy
// ============================================================================

/// A nameless parent text field with two named kid fields, each merged
/// with its own widget.
fn address_fields(doc: &mut PdfDocument, page: ObjectRef) -> (ObjectRef, Vec<ObjectRef>) {
    let mut parent = Dictionary::new();
    parent.insert("FT".to_string(), Object::name("Tx"));
    parent.insert("T".to_string(), Object::text_string("address"));
    parent.insert("DA".to_string(), Object::text_string("/Helv 9 Tf 0 0 1 rg"));
    let parent_ref = doc.allocate(Object::Dictionary(parent));

    let mut kids = Vec::new();
    for (i, name) in ["home", "work"].iter().enumerate() {
        let mut kid = Dictionary::new();
        kid.insert("T".to_string(), Object::text_string(name));
        kid.insert("Parent".to_string(), parent_ref.into());
        kid.insert("Type".to_string(), Object::name("Annot"));
        kid.insert("Subtype".to_string(), Object::name("Widget"));
        let y = 400.0 - 30.0 * i as f32;
        kid.insert(
            "Rect".to_string(),
            Object::number_array(&[72.0, y, 272.0, y + 20.0]),
        );
        let kid_ref = doc.allocate(Object::Dictionary(kid));
        doc.add_annotation(page, kid_ref).unwrap();
        kids.push(kid_ref);
    }
    doc.dict_mut(parent_ref).unwrap().insert(
        "Kids".to_string(),
        Object::Array(kids.iter().map(|k| Object::Reference(*k)).collect()),
    );
    doc.add_field(parent_ref, Some(page)).unwrap();
    (parent_ref, kids)
}

#[test]
fn test_value_propagates_to_kid_fields() {
    let (mut doc, page) = setup();
    let (parent_ref, kids) = address_fields(&mut doc, page);

    let mut parent = FormField::make(&doc, parent_ref).unwrap();
    assert_eq!(parent.kind(), Some(FieldKind::PlainText));
    assert!(parent.widgets(&doc).is_empty());
    assert_eq!(parent.kid_fields(&doc), kids);

    parent.set_value(&mut doc, "221B Baker St").unwrap();

    for kid in &kids {
        let field = FormField::make(&doc, *kid).unwrap();
        assert_eq!(field.value_as_string(&doc), "221B Baker St");
        let content = normal_content(&doc, *kid, None);
        assert!(content.contains("/Helv 9 Tf"), "{}", content);
        assert!(content.contains("0 0 1 rg"));
        assert!(content.contains("(221B Baker St) Tj"));
    }
    let home = FormField::make(&doc, kids[0]).unwrap();
    assert_eq!(home.full_name(&doc), "address.home");
}

#[test]
fn test_regenerating_parent_regenerates_kids() {
    let (mut doc, page) = setup();
    let (parent_ref, kids) = address_fields(&mut doc, page);
    for kid in &kids {
        doc.dict_mut(*kid)
            .unwrap()
            .insert("V".to_string(), Object::text_string("kept"));
    }

    let mut parent = FormField::make(&doc, parent_ref).unwrap();
    assert!(parent.regenerate_field(&mut doc).unwrap());
    for kid in &kids {
        assert!(normal_content(&doc, *kid, None).contains("(kept) Tj"));
    }
}

#[test]
fn test_field_without_geometry_is_an_error() {
    let (mut doc, _page) = setup();
    let mut dict = Dictionary::new();
    dict.insert("FT".to_string(), Object::name("Tx"));
    dict.insert("T".to_string(), Object::text_string("floating"));
    let r = doc.allocate(Object::Dictionary(dict));
    doc.add_field(r, None).unwrap();

    let mut field = FormField::make(&doc, r).unwrap();
    assert!(matches!(
        field.regenerate_field(&mut doc),
        Err(pdf_oxide_forms::Error::MissingGeometry(_))
    ));
}

// ============================================================================
// Style setters and configuration
// ============================================================================

#[test]
fn test_style_setters_rewrite_appearance() {
    let (mut doc, page) = setup();
    let mut field = TextFieldBuilder::new("styled", Rect::new(72.0, 500.0, 120.0, 24.0))
        .with_value("Styled")
        .build(&mut doc, page)
        .unwrap();
    assert_eq!(field.field_name(&doc).as_deref(), Some("styled"));

    let courier = doc.add_font(StandardFont::Courier);
    field
        .set_font_and_size(&mut doc, courier, 9.0)
        .unwrap()
        .set_color(&mut doc, Color::Rgb(1.0, 0.0, 0.0))
        .unwrap()
        .set_background_color(&mut doc, Some(Color::Gray(0.9)))
        .unwrap()
        .set_border_color(&mut doc, Some(Color::Rgb(0.0, 0.0, 1.0)))
        .unwrap()
        .set_border_width(&mut doc, 2.0)
        .unwrap()
        .set_justification(&mut doc, Justification::Right)
        .unwrap();

    assert_eq!(
        field.default_appearance(&doc).as_deref(),
        Some("/F2 9 Tf 1 0 0 rg")
    );
    let content = normal_content(&doc, field.object(), None);
    assert!(content.contains("0.9 g\n0 0 120 24 re\nf\n"), "{}", content);
    assert!(content.contains("0 0 1 RG\n2 w\n1 1 118 22 re\nS\n"), "{}", content);
    assert!(content.contains("/F2 9 Tf"));
    assert!(content.contains("1 0 0 rg"));
    let (x, _, text) = &text_positions(&content)[0];
    assert_eq!(text, "Styled");
    let width = StandardFont::Courier.width("Styled", 9.0);
    assert!((x - (120.0 - 2.0 - width)).abs() < 1e-3, "x {}", x);

    // Auto size keeps the font and lands on the ceiling for a short value
    field.set_font_size(&mut doc, 0.0).unwrap();
    assert_eq!(
        field.default_appearance(&doc).as_deref(),
        Some("/F2 0 Tf 1 0 0 rg")
    );
    assert!(normal_content(&doc, field.object(), None).contains("/F2 12 Tf"));

    let helvetica = doc.add_font(StandardFont::Helvetica);
    field
        .set_value_with_font(&mut doc, "Mono", helvetica, 10.0)
        .unwrap();
    let content = normal_content(&doc, field.object(), None);
    assert!(content.contains("/F1 10 Tf"), "{}", content);
    assert!(content.contains("(Mono) Tj"));

    field.set_max_len(&mut doc, 4).unwrap();
    assert_eq!(field.max_len(&doc), Some(4));
    assert_eq!(field.kind(), Some(FieldKind::PlainText));

    field.update_default_appearance(&mut doc).unwrap();
    assert!(field
        .default_appearance(&doc)
        .unwrap()
        .starts_with("/F1 10 Tf"));
}

#[test]
fn test_list_box_top_index_setter() {
    let (mut doc, page) = setup();
    let mut field = ListBoxBuilder::new("colors", Rect::new(72.0, 300.0, 100.0, 60.0))
        .with_options(["Red", "Green", "Blue"])
        .build(&mut doc, page)
        .unwrap();
    assert!(normal_content(&doc, field.object(), None).contains("(Red) Tj"));

    field.set_top_index(&mut doc, 1).unwrap();
    assert_eq!(
        doc.lookup(field.object(), "TI").and_then(Object::as_integer),
        Some(1)
    );
    let content = normal_content(&doc, field.object(), None);
    assert!(!content.contains("(Red) Tj"));
    assert!(content.contains("(Green) Tj"));
    assert!(content.contains("(Blue) Tj"));
}

#[test]
fn test_push_button_form_icon_replaces_caption() {
    let (mut doc, page) = setup();
    let mut button = PushButtonBuilder::new("go", Rect::new(72.0, 250.0, 80.0, 20.0))
        .with_caption("Go")
        .build(&mut doc, page)
        .unwrap();
    assert!(normal_content(&doc, button.object(), None).contains("(Go) Tj"));

    let mut form = Dictionary::new();
    form.insert("Type".to_string(), Object::name("XObject"));
    form.insert("Subtype".to_string(), Object::name("Form"));
    form.insert("BBox".to_string(), Object::number_array(&[0.0, 0.0, 10.0, 10.0]));
    let form = doc.allocate(Object::Stream {
        dict: form,
        data: bytes::Bytes::new(),
    });
    button.set_form_xobject(&mut doc, form).unwrap();

    let content = normal_content(&doc, button.object(), None);
    assert!(content.contains("/Fm1 Do"), "{}", content);
    assert!(!content.contains("(Go) Tj"));

    // Anything but a form XObject is refused
    let not_a_form = doc.allocate(Object::Dictionary(Dictionary::new()));
    assert!(button.set_form_xobject(&mut doc, not_a_form).is_err());
}

#[test]
fn test_builder_flags_and_decoration() {
    let (mut doc, page) = setup();
    let text = TextFieldBuilder::new("notes", Rect::new(72.0, 200.0, 100.0, 20.0))
        .no_spell_check()
        .no_scroll()
        .build(&mut doc, page)
        .unwrap();
    assert!(text
        .field_flags(&doc)
        .contains(FieldFlags::DO_NOT_SPELL_CHECK | FieldFlags::DO_NOT_SCROLL));

    let combo = ComboBoxBuilder::new("size", Rect::new(72.0, 170.0, 100.0, 20.0))
        .with_options(["S", "M", "L"])
        .commit_on_change()
        .build(&mut doc, page)
        .unwrap();
    assert!(combo
        .field_flags(&doc)
        .contains(FieldFlags::COMBO | FieldFlags::COMMIT_ON_SEL_CHANGE));

    let list = ListBoxBuilder::new("sizes", Rect::new(72.0, 110.0, 100.0, 50.0))
        .with_options(["S", "M", "L"])
        .commit_on_change()
        .build(&mut doc, page)
        .unwrap();
    assert!(list.field_flags(&doc).contains(FieldFlags::COMMIT_ON_SEL_CHANGE));

    let group = RadioGroupBuilder::new("tone")
        .add_button("Warm", Rect::new(200.0, 400.0, 14.0, 14.0))
        .with_border_color(Color::Rgb(1.0, 0.0, 0.0))
        .with_background_color(Color::Gray(0.5))
        .with_border_width(2.0)
        .build(&mut doc, page)
        .unwrap();
    let widget = group.widgets(&doc)[0];
    let mk = doc.lookup(widget, "MK").and_then(Object::as_dict).unwrap().clone();
    assert_eq!(
        mk.get("BC").and_then(Color::from_object),
        Some(Color::Rgb(1.0, 0.0, 0.0))
    );
    assert_eq!(
        mk.get("BG").and_then(Color::from_object),
        Some(Color::Gray(0.5))
    );
    let bs = doc.lookup(widget, "BS").and_then(Object::as_dict).unwrap();
    assert_eq!(bs.get("W").and_then(Object::as_number), Some(2.0));
}

#[test]
fn test_configured_sizes_drive_defaults_and_floor() {
    init_logging();
    let mut doc = PdfDocument::with_config(
        FormConfig::new()
            .with_default_font_size(10.0)
            .with_min_font_size(6.0),
    );
    let page = doc.add_page(612.0, 792.0).unwrap();
    let plain = TextFieldBuilder::new("plain", Rect::new(72.0, 700.0, 100.0, 20.0))
        .build(&mut doc, page)
        .unwrap();
    assert_eq!(plain.default_appearance(&doc).as_deref(), Some("/F1 10 Tf"));

    let mut tiny = TextFieldBuilder::new("tiny", Rect::new(72.0, 650.0, 100.0, 5.0))
        .with_font_size(0.0)
        .build(&mut doc, page)
        .unwrap();
    tiny.set_value(&mut doc, "Hi").unwrap();
    let content = normal_content(&doc, tiny.object(), None);
    assert!(content.contains("/F1 6 Tf"), "{}", content);
}
