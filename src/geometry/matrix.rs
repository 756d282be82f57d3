//! Affine transformation matrices.

use super::Point;

/// A 2D transformation matrix.
///
/// PDF uses matrices of the form:
/// ```text
/// [ a  b  0 ]
/// [ c  d  0 ]
/// [ e  f  1 ]
/// ```
///
/// Points are row vectors, so `[x y 1] * M` gives the transformed point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
    /// Horizontal scaling component
    pub a: f32,
    /// Rotation/skew component
    pub b: f32,
    /// Rotation/skew component
    pub c: f32,
    /// Vertical scaling component
    pub d: f32,
    /// Horizontal translation
    pub e: f32,
    /// Vertical translation
    pub f: f32,
}

impl Default for Matrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix {
    /// Create a matrix from its six components.
    pub fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Create an identity matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_oxide_forms::geometry::Matrix;
    ///
    /// let m = Matrix::identity();
    /// assert!(m.is_identity());
    /// ```
    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    /// Counter-clockwise rotation by a multiple of 90 degrees, followed by
    /// a translation.
    ///
    /// The sine and cosine are taken from a table so that the result is
    /// exact; any angle that is not a quarter turn is treated as zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_oxide_forms::geometry::Matrix;
    ///
    /// let m = Matrix::quarter_turn(90, 100.0, 0.0);
    /// assert_eq!(m.to_array(), [0.0, 1.0, -1.0, 0.0, 100.0, 0.0]);
    /// ```
    pub fn quarter_turn(degrees: i32, tx: f32, ty: f32) -> Self {
        let (cos, sin) = match degrees.rem_euclid(360) {
            90 => (0.0, 1.0),
            180 => (-1.0, 0.0),
            270 => (0.0, -1.0),
            _ => (1.0, 0.0),
        };
        Self::new(cos, sin, -sin, cos, tx, ty)
    }

    /// Create a translation matrix.
    pub fn translation(tx: f32, ty: f32) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// Create a scaling matrix.
    pub fn scaling(sx: f32, sy: f32) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Concatenate: the result applies `self` first, then `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_oxide_forms::geometry::{Matrix, Point};
    ///
    /// let m = Matrix::scaling(2.0, 2.0).then(&Matrix::translation(10.0, 0.0));
    /// let p = m.transform_point(Point::new(1.0, 1.0));
    /// assert_eq!((p.x, p.y), (12.0, 2.0));
    /// ```
    pub fn then(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    /// Transform a point using this matrix.
    pub fn transform_point(&self, p: Point) -> Point {
        Point {
            x: self.a * p.x + self.c * p.y + self.e,
            y: self.b * p.x + self.d * p.y + self.f,
        }
    }

    /// Whether this is exactly the identity transform.
    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// Components in `/Matrix` order.
    pub fn to_array(&self) -> [f32; 6] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }
}
