//! Font size fitting for auto-sized fields.
//!
//! A field whose DA asks for size 0 gets a concrete size at render time.
//! Both routines are deterministic: the multi-line search runs a fixed
//! number of steps instead of iterating to a tolerance.

use crate::fonts::FontMetrics;
use crate::geometry::Rect;
use crate::layout::{LayoutStatus, Paragraph};

/// Horizontal padding taken from a wide box before fitting.
const ABSOLUTE_PADDING: f32 = 4.0;

/// Share of the width taken from each side of a narrow box.
const RELATIVE_PADDING: f32 = 0.15;

/// Bisection steps for multi-line fitting.
const MULTI_LINE_ITERATIONS: usize = 6;

/// Largest size at which `text` fits on one line in `bbox`.
///
/// The size is first bounded by the box height against the font's
/// ascender-to-descender extent, then by the available width. The
/// result is never below `min_size`.
///
/// # Examples
///
/// ```
/// use pdf_oxide_forms::fonts::StandardFont;
/// use pdf_oxide_forms::forms::font_fit::fit_single_line;
/// use pdf_oxide_forms::geometry::Rect;
///
/// let size = fit_single_line(&StandardFont::Helvetica, Rect::new(0.0, 0.0, 30.0, 18.0), "Hello", 4.0);
/// assert!(size > 4.0 && size < 12.0);
/// ```
pub fn fit_single_line(font: &dyn FontMetrics, bbox: Rect, text: &str, min_size: f32) -> f32 {
    let extent = font.ascender() - font.descender();
    let mut size = if extent > 0.0 {
        bbox.height / extent * 1000.0
    } else {
        bbox.height
    };

    let unit_width = font.width(text, 1.0);
    if unit_width != 0.0 {
        let mut available = bbox.width.max(0.0);
        let relative = available * RELATIVE_PADDING * 2.0;
        available -= if relative < ABSOLUTE_PADDING {
            relative
        } else {
            ABSOLUTE_PADDING
        };
        size = size.min(available / unit_width);
    }

    size.max(min_size)
}

/// Largest size in `[min_size, max_size]` at which the paragraph fits
/// `area` completely.
///
/// Returns `max_size` at once when the text already fits there;
/// otherwise bisects the range a fixed number of times and returns the
/// lower bound.
pub fn fit_multi_line(paragraph: &Paragraph<'_>, area: Rect, min_size: f32, max_size: f32) -> f32 {
    let fits = |size: f32| {
        paragraph.clone().with_font_size(size).layout(area).status == LayoutStatus::Full
    };

    if fits(max_size) {
        return max_size;
    }

    let mut low = min_size;
    let mut high = max_size;
    for _ in 0..MULTI_LINE_ITERATIONS {
        let mid = (low + high) / 2.0;
        if fits(mid) {
            low = mid;
        } else {
            high = mid;
        }
    }
    log::debug!("Multi-line text fitted at {}pt", low);
    low
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::StandardFont;

    const HELV: StandardFont = StandardFont::Helvetica;

    #[test]
    fn test_height_bound_for_short_text() {
        let size = fit_single_line(&HELV, Rect::new(0.0, 0.0, 200.0, 18.5), "Hi", 4.0);
        assert!((size - 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_width_bound_with_absolute_padding() {
        // "Hello" is 2.278 units wide at size 1; 100 - 4 = 96 available
        let size = fit_single_line(&HELV, Rect::new(0.0, 0.0, 100.0, 200.0), "Hello", 4.0);
        assert!((size - 96.0 / 2.278).abs() < 1e-2);
    }

    #[test]
    fn test_width_bound_with_relative_padding() {
        // 10 * 0.3 = 3 < 4, so 7 is available
        let size = fit_single_line(&HELV, Rect::new(0.0, 0.0, 10.0, 200.0), "Hello", 0.0);
        assert!((size - 7.0 / 2.278).abs() < 1e-3);
    }

    #[test]
    fn test_floor() {
        let text = "a very long value that cannot possibly fit in this box";
        let size = fit_single_line(&HELV, Rect::new(0.0, 0.0, 20.0, 10.0), text, 4.0);
        assert_eq!(size, 4.0);
        let size = fit_single_line(&HELV, Rect::new(0.0, 0.0, 20.0, 10.0), text, 0.0);
        assert!(size < 4.0 && size > 0.0);
    }

    #[test]
    fn test_empty_text_uses_height() {
        let size = fit_single_line(&HELV, Rect::new(0.0, 0.0, 5.0, 9.25), "", 4.0);
        assert!((size - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_multi_line_fits_at_max() {
        let paragraph = Paragraph::new("short", &HELV);
        let size = fit_multi_line(&paragraph, Rect::new(0.0, 0.0, 200.0, 100.0), 4.0, 12.0);
        assert_eq!(size, 12.0);
    }

    #[test]
    fn test_multi_line_search() {
        let text = "one two three four five six seven eight nine ten eleven twelve";
        let paragraph = Paragraph::new(text, &HELV);
        let area = Rect::new(0.0, 0.0, 80.0, 40.0);
        let size = fit_multi_line(&paragraph, area, 4.0, 12.0);
        assert!(size >= 4.0 && size < 12.0);
        // Six halvings of an 8pt range leave steps of 0.125
        assert_eq!((size * 8.0).fract(), 0.0);
        assert_eq!(
            paragraph.clone().with_font_size(size).layout(area).status,
            LayoutStatus::Full
        );
    }

    #[test]
    fn test_multi_line_nothing_fits_returns_min() {
        let paragraph = Paragraph::new("x", &HELV);
        let size = fit_multi_line(&paragraph, Rect::new(0.0, 0.0, 50.0, 1.0), 4.0, 12.0);
        assert_eq!(size, 4.0);
    }
}
