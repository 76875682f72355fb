use std::fmt;
use std::ops;

use derive_new::new;
use serde::{Deserialize, Serialize};


// A point in image coordinates: x grows to the right, y grows downward. Depending on context
// the unit is either pixels or board radii ("normalized" coordinates, origin at the bull).
#[derive(Clone, Copy, PartialEq, Default, new, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    // `angle_deg` is measured from the +x axis towards +y, i.e. clockwise on screen.
    pub fn from_polar(radius: f64, angle_deg: f64) -> Self {
        let rad = angle_deg.to_radians();
        Point { x: radius * rad.cos(), y: radius * rad.sin() }
    }

    pub fn length(self) -> f64 { self.x.hypot(self.y) }

    pub fn angle_deg(self) -> f64 { self.y.atan2(self.x).to_degrees() }

    // Rotates around the origin by `angle_deg`, clockwise on screen for positive angles.
    pub fn rotated(self, angle_deg: f64) -> Self {
        let (sin, cos) = angle_deg.to_radians().sin_cos();
        Point { x: self.x * cos - self.y * sin, y: self.x * sin + self.y * cos }
    }

    pub fn scale_y(self, factor: f64) -> Self { Point { x: self.x, y: self.y * factor } }

    pub fn is_finite(self) -> bool { self.x.is_finite() && self.y.is_finite() }
}

impl ops::Add for Point {
    type Output = Self;
    fn add(self, other: Self) -> Self::Output { Point { x: self.x + other.x, y: self.y + other.y } }
}

impl ops::Sub for Point {
    type Output = Self;
    fn sub(self, other: Self) -> Self::Output { Point { x: self.x - other.x, y: self.y - other.y } }
}

impl ops::Mul<f64> for Point {
    type Output = Self;
    fn mul(self, factor: f64) -> Self::Output { Point { x: self.x * factor, y: self.y * factor } }
}

impl ops::Div<f64> for Point {
    type Output = Self;
    fn div(self, factor: f64) -> Self::Output { Point { x: self.x / factor, y: self.y / factor } }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point({:.3}, {:.3})", self.x, self.y)
    }
}
