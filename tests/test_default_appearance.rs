//! Default appearance string parsing and generation.

use pdf_oxide_forms::color::Color;
use pdf_oxide_forms::forms::DefaultAppearance;
use proptest::prelude::*;

fn font_name() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9_]{0,8}"
}

proptest! {
    #[test]
    fn generated_rgb_appearance_parses_back(
        font in font_name(),
        size in 0.0f32..100.0,
        r in 0.0f32..=1.0,
        g in 0.0f32..=1.0,
        b in 0.0f32..=1.0,
    ) {
        let color = Color::Rgb(r, g, b);
        let da = DefaultAppearance::generate(&font, size, Some(&color));
        let parsed = DefaultAppearance::parse(&da);
        prop_assert_eq!(parsed.font, Some(font));
        prop_assert_eq!(parsed.size, Some(size));
        prop_assert_eq!(parsed.color, Some(color));
    }

    #[test]
    fn generated_gray_appearance_parses_back(
        font in font_name(),
        size in 1.0f32..100.0,
        gray in 0.01f32..=1.0,
    ) {
        let color = Color::Gray(gray);
        let da = DefaultAppearance::generate(&font, size, Some(&color));
        let parsed = DefaultAppearance::parse(&da);
        prop_assert_eq!(parsed.to_da_string("unused"), da);
    }

    #[test]
    fn parse_never_panics(da in "[ -~]{0,60}") {
        let _ = DefaultAppearance::parse(&da);
    }
}

#[test]
fn test_black_is_not_reported_as_a_color() {
    let parsed = DefaultAppearance::parse("/Helv 0 Tf 0 g");
    assert_eq!(parsed.font.as_deref(), Some("Helv"));
    assert_eq!(parsed.size, Some(0.0));
    assert_eq!(parsed.color, None);
}

#[test]
fn test_sloppy_strings() {
    // Stray operands and ignored operators around the ones that matter
    let parsed = DefaultAppearance::parse("2 Tz /TiRo 9 Tf [1 2] 0 d 1 0 0 rg");
    assert_eq!(parsed.font.as_deref(), Some("TiRo"));
    assert_eq!(parsed.size, Some(9.0));
    assert_eq!(parsed.color, Some(Color::Rgb(1.0, 0.0, 0.0)));

    // An unterminated string ends the scan with what was read so far
    let parsed = DefaultAppearance::parse("/Cour 10 Tf (oops");
    assert_eq!(parsed.font.as_deref(), Some("Cour"));
    assert_eq!(parsed.size, Some(10.0));

    assert_eq!(DefaultAppearance::parse(""), DefaultAppearance::default());
}

#[test]
fn test_cmyk_generation() {
    let da = DefaultAppearance::generate("F1", 11.5, Some(&Color::Cmyk(0.0, 1.0, 0.5, 0.25)));
    assert_eq!(da, "/F1 11.5 Tf 0 1 0.5 0.25 k");
}
