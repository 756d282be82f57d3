//! Appearance geometry under page and widget rotation.
//!
//! Pages rotate clockwise for display; appearance content is turned the
//! other way so that text stays upright relative to the widget. The
//! widget's own `/MK /R` rotation is applied relative to the page.

use crate::geometry::{Matrix, Rect};

/// Placement inputs for one widget, derived at each regeneration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidgetGeometry {
    /// Widget `/Rect`
    pub bbox: Rect,
    /// `/Rotate` of the page holding the widget
    pub page_rotation: i32,
    /// `/MK /R` of the widget
    pub field_rotation: i32,
}

impl WidgetGeometry {
    /// Matrix and rotated box for this widget.
    pub fn content_matrix(&self) -> (Matrix, Rect) {
        compute_content_matrix(self.bbox, self.page_rotation, self.field_rotation)
    }
}

/// Compute the appearance `/Matrix` and the box to draw in.
///
/// The page rotation is normalized and negated, giving a base turn of
/// 0, -90, -180 or -270 degrees. The field rotation relative to that is
/// applied first, translated so the rotated box stays in the positive
/// quadrant. Each odd quarter turn exchanges the box's width and height.
///
/// # Examples
///
/// ```
/// use pdf_oxide_forms::forms::rotation::compute_content_matrix;
/// use pdf_oxide_forms::geometry::Rect;
///
/// let (m, bbox) = compute_content_matrix(Rect::new(0.0, 0.0, 100.0, 20.0), 0, 90);
/// assert_eq!((bbox.width, bbox.height), (20.0, 100.0));
/// assert_eq!(m.to_array(), [0.0, 1.0, -1.0, 0.0, 100.0, 0.0]);
/// ```
pub fn compute_content_matrix(bbox: Rect, page_rotation: i32, field_rotation: i32) -> (Matrix, Rect) {
    let page = -page_rotation.rem_euclid(360);
    let (w, h) = (bbox.width, bbox.height);
    let (e, f) = match page {
        -90 => (0.0, h),
        -180 => (w, h),
        -270 => (w, 0.0),
        _ => (0.0, 0.0),
    };
    let base = Matrix::quarter_turn(page, e, f);

    let mut adjusted = if page % 180 != 0 { bbox.swapped() } else { bbox };

    let relative = (field_rotation.rem_euclid(360) + page) % 360;
    let (tx, ty) = translation_offset(page, relative, adjusted.width, adjusted.height);
    let field = Matrix::quarter_turn(relative, tx, ty);
    if relative % 180 != 0 {
        adjusted = adjusted.swapped();
    }

    (field.then(&base), adjusted)
}

/// Translation for a field turn, keyed by base page turn and relative
/// angle. `w` and `h` are the dimensions after the page turn.
fn translation_offset(page: i32, relative: i32, w: f32, h: f32) -> (f32, f32) {
    match (page, relative) {
        (0, 0) | (-90, 0) | (-180, 0) | (-270, 0) => (0.0, 0.0),
        (0, 90) | (-90, 90) | (-180, 90) | (-270, -270) => (w, 0.0),
        (0, 180) | (-90, 180) | (-180, -180) | (-270, -180) => (w, h),
        (0, 270) | (-90, -90) | (-180, -90) | (-270, -90) => (0.0, h),
        _ => (0.0, 0.0),
    }
}

/// The `/Matrix` persisted for a widget rotation on an upright page.
///
/// `width` and `height` are those of the rotated box. Returns `None`
/// for no rotation.
///
/// | Rotation | Matrix |
/// |---|---|
/// | 90 | `[0 1 -1 0 h 0]` |
/// | 180 | `[-1 0 0 -1 w h]` |
/// | 270 | `[0 -1 1 0 0 w]` |
pub fn rotation_matrix(rotation: i32, width: f32, height: f32) -> Option<Matrix> {
    match rotation.rem_euclid(360) {
        90 => Some(Matrix::new(0.0, 1.0, -1.0, 0.0, height, 0.0)),
        180 => Some(Matrix::new(-1.0, 0.0, 0.0, -1.0, width, height)),
        270 => Some(Matrix::new(0.0, -1.0, 1.0, 0.0, 0.0, width)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn corners(m: &Matrix, r: Rect) -> Vec<(f32, f32)> {
        [(0.0, 0.0), (r.width, 0.0), (0.0, r.height), (r.width, r.height)]
            .iter()
            .map(|&(x, y)| {
                let p = m.transform_point(Point::new(x, y));
                (p.x, p.y)
            })
            .collect()
    }

    fn bounds(points: &[(f32, f32)]) -> (f32, f32, f32, f32) {
        let min_x = points.iter().map(|p| p.0).fold(f32::MAX, f32::min);
        let max_x = points.iter().map(|p| p.0).fold(f32::MIN, f32::max);
        let min_y = points.iter().map(|p| p.1).fold(f32::MAX, f32::min);
        let max_y = points.iter().map(|p| p.1).fold(f32::MIN, f32::max);
        (min_x, min_y, max_x, max_y)
    }

    #[test]
    fn test_no_rotation() {
        let bbox = Rect::new(10.0, 10.0, 100.0, 20.0);
        let (m, adjusted) = compute_content_matrix(bbox, 0, 0);
        assert!(m.is_identity());
        assert_eq!(adjusted, bbox);
    }

    #[test]
    fn test_upright_page_matches_fixed_matrices() {
        let bbox = Rect::new(0.0, 0.0, 100.0, 20.0);
        for rotation in [90, 180, 270] {
            let (m, adjusted) = compute_content_matrix(bbox, 0, rotation);
            assert_eq!(
                Some(m),
                rotation_matrix(rotation, adjusted.width, adjusted.height),
                "rotation {}",
                rotation
            );
        }
    }

    #[test]
    fn test_rotated_box_maps_onto_widget() {
        let bbox = Rect::new(0.0, 0.0, 100.0, 20.0);
        for page in [0, 90, 180, 270] {
            for field in [0, 90, 180, 270] {
                let (m, adjusted) = compute_content_matrix(bbox, page, field);
                let (x0, y0, x1, y1) = bounds(&corners(&m, adjusted));
                assert_eq!(
                    (x0, y0, x1, y1),
                    (0.0, 0.0, 100.0, 20.0),
                    "page {} field {}",
                    page,
                    field
                );
            }
        }
    }

    #[test]
    fn test_page_rotation_swaps_box() {
        let bbox = Rect::new(0.0, 0.0, 100.0, 20.0);
        let (m, adjusted) = compute_content_matrix(bbox, 90, 90);
        assert_eq!((adjusted.width, adjusted.height), (20.0, 100.0));
        assert_eq!(m.to_array(), [0.0, -1.0, 1.0, 0.0, 0.0, 20.0]);
    }

    #[test]
    fn test_negative_page_rotation_normalized() {
        let bbox = Rect::new(0.0, 0.0, 50.0, 30.0);
        assert_eq!(
            compute_content_matrix(bbox, -90, 0),
            compute_content_matrix(bbox, 270, 0)
        );
    }

    #[test]
    fn test_rotation_matrix_none_for_zero() {
        assert!(rotation_matrix(0, 10.0, 10.0).is_none());
        assert!(rotation_matrix(360, 10.0, 10.0).is_none());
    }
}
