#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// A point in either screen or document space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The origin of the coordinate space.
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }
}

/// A displacement between two points (pan offsets, drag translations).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub dx: f64,
    pub dy: f64,
}

impl Vector {
    #[must_use]
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// The identity displacement.
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.dx.is_finite() && self.dy.is_finite()
    }
}

/// Width and height of a view or a piece of content.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both dimensions are strictly positive and finite.
    #[must_use]
    pub fn is_positive(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Offset from the top-left corner to the center of the view.
    #[must_use]
    pub fn half(self) -> Vector {
        Vector::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    fn add(self, rhs: Vector) -> Point {
        Point::new(self.x + rhs.dx, self.y + rhs.dy)
    }
}

impl Sub<Vector> for Point {
    type Output = Point;

    fn sub(self, rhs: Vector) -> Point {
        Point::new(self.x - rhs.dx, self.y - rhs.dy)
    }
}

impl Sub for Point {
    type Output = Vector;

    fn sub(self, rhs: Point) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.dx + rhs.dx, self.dy + rhs.dy)
    }
}

impl AddAssign for Vector {
    fn add_assign(&mut self, rhs: Vector) {
        self.dx += rhs.dx;
        self.dy += rhs.dy;
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector::new(-self.dx, -self.dy)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Vector {
        Vector::new(self.dx * rhs, self.dy * rhs)
    }
}

impl Div<f64> for Vector {
    type Output = Vector;

    fn div(self, rhs: f64) -> Vector {
        Vector::new(self.dx / rhs, self.dy / rhs)
    }
}

/// Map a screen-space point to document space.
///
/// The document origin sits at the center of the view. `pan` is the effective
/// pan offset in screen pixels and `zoom` must be strictly positive.
#[must_use]
pub fn to_document_space(screen: Point, view_size: Size, pan: Vector, zoom: f64) -> Point {
    let centered = screen - view_size.half() - pan;
    Point::new(centered.x / zoom, centered.y / zoom)
}

/// Map a document-space point to screen space. Inverse of [`to_document_space`].
#[must_use]
pub fn to_screen_space(document: Point, view_size: Size, pan: Vector, zoom: f64) -> Point {
    Point::new(document.x * zoom, document.y * zoom) + pan + view_size.half()
}

/// Snapshot of the view transform at one instant.
///
/// `pan` is in screen pixels (already multiplied by zoom).
/// `zoom` is a scale factor (1.0 = no zoom).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub pan: Vector,
    pub zoom: f64,
    pub view: Size,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan: Vector::zero(), zoom: 1.0, view: Size::default() }
    }
}

impl Camera {
    #[must_use]
    pub fn new(pan: Vector, zoom: f64, view: Size) -> Self {
        Self { pan, zoom, view }
    }

    /// Convert a screen-space point to document coordinates.
    #[must_use]
    pub fn screen_to_document(&self, screen: Point) -> Point {
        to_document_space(screen, self.view, self.pan, self.zoom)
    }

    /// Convert a document-space point to screen coordinates.
    #[must_use]
    pub fn document_to_screen(&self, document: Point) -> Point {
        to_screen_space(document, self.view, self.pan, self.zoom)
    }

    /// Convert a screen-space distance (pixels) to a document-space distance.
    #[must_use]
    pub fn screen_dist_to_document(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom
    }
}
