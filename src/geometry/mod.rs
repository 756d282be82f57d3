//! Geometric primitives for appearance construction.
//!
//! Coordinates follow PDF user space: the origin of a [`Rect`] is its
//! lower-left corner and y grows upwards.

mod matrix;

pub use matrix::Matrix;

/// A 2D point in user space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Create a new point.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_oxide_forms::geometry::Point;
    ///
    /// let point = Point::new(10.0, 20.0);
    /// assert_eq!(point.x, 10.0);
    /// assert_eq!(point.y, 20.0);
    /// ```
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A rectangle in user space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// X coordinate of lower-left corner
    pub x: f32,
    /// Y coordinate of lower-left corner
    pub y: f32,
    /// Width of rectangle
    pub width: f32,
    /// Height of rectangle
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle from position and dimensions.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_oxide_forms::geometry::Rect;
    ///
    /// let rect = Rect::new(0.0, 0.0, 100.0, 20.0);
    /// assert_eq!(rect.width, 100.0);
    /// assert_eq!(rect.height, 20.0);
    /// ```
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from two corner points in any order.
    ///
    /// PDF `/Rect` arrays are not required to be normalized, so the
    /// corners are sorted first.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_oxide_forms::geometry::Rect;
    ///
    /// let rect = Rect::from_points(110.0, 70.0, 10.0, 20.0);
    /// assert_eq!(rect.x, 10.0);
    /// assert_eq!(rect.y, 20.0);
    /// assert_eq!(rect.width, 100.0);
    /// assert_eq!(rect.height, 50.0);
    /// ```
    pub fn from_points(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        let (left, right) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let (bottom, top) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        Self {
            x: left,
            y: bottom,
            width: right - left,
            height: top - bottom,
        }
    }

    /// Get the left edge x-coordinate.
    pub fn left(&self) -> f32 {
        self.x
    }

    /// Get the right edge x-coordinate.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Get the bottom edge y-coordinate.
    pub fn bottom(&self) -> f32 {
        self.y
    }

    /// Get the top edge y-coordinate.
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// Get the center point of the rectangle.
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    /// Same origin, width and height exchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_oxide_forms::geometry::Rect;
    ///
    /// let rect = Rect::new(5.0, 5.0, 100.0, 20.0).swapped();
    /// assert_eq!((rect.width, rect.height), (20.0, 100.0));
    /// ```
    pub fn swapped(&self) -> Rect {
        Rect::new(self.x, self.y, self.height, self.width)
    }

    /// Shrink by `amount` on every side, clamping at zero size.
    pub fn inset(&self, amount: f32) -> Rect {
        Rect::new(
            self.x + amount,
            self.y + amount,
            (self.width - 2.0 * amount).max(0.0),
            (self.height - 2.0 * amount).max(0.0),
        )
    }

    /// Rectangle of the same size anchored at the origin.
    pub fn at_origin(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// The `[llx lly urx ury]` form used by `/Rect` and `/BBox`.
    pub fn to_pdf_array(&self) -> [f32; 4] {
        [self.left(), self.bottom(), self.right(), self.top()]
    }

    /// Compute the area of the rectangle.
    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(5.0, 10.0, 100.0, 50.0);
        assert_eq!(r.left(), 5.0);
        assert_eq!(r.right(), 105.0);
        assert_eq!(r.bottom(), 10.0);
        assert_eq!(r.top(), 60.0);
    }

    #[test]
    fn test_rect_from_unordered_points() {
        let r = Rect::from_points(100.0, 20.0, 0.0, 0.0);
        assert_eq!(r, Rect::new(0.0, 0.0, 100.0, 20.0));
    }

    #[test]
    fn test_center() {
        let c = Rect::new(0.0, 0.0, 100.0, 20.0).center();
        assert_eq!((c.x, c.y), (50.0, 10.0));
    }

    #[test]
    fn test_inset_clamps() {
        let r = Rect::new(0.0, 0.0, 4.0, 20.0).inset(3.0);
        assert_eq!(r.width, 0.0);
        assert_eq!(r.height, 14.0);
        assert_eq!((r.x, r.y), (3.0, 3.0));
    }

    #[test]
    fn test_pdf_array() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.to_pdf_array(), [10.0, 20.0, 40.0, 60.0]);
        assert_eq!(r.at_origin().to_pdf_array(), [0.0, 0.0, 30.0, 40.0]);
    }

    #[test]
    fn test_area() {
        assert_eq!(Rect::new(0.0, 0.0, 100.0, 50.0).area(), 5000.0);
    }
}
