use std::ops::{Add, Mul, Sub};

/// A position or direction on the drawing surface, in canvas pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn length(self) -> f64 {
		(self.x * self.x + self.y * self.y).sqrt()
	}

	pub fn distance(self, other: Point) -> f64 {
		(other - self).length()
	}

	/// Unit vector in the same direction, or `None` for a (near) zero vector.
	pub fn normalized(self) -> Option<Point> {
		let len = self.length();
		if len < 1e-9 || !len.is_finite() {
			return None;
		}
		Some(Point::new(self.x / len, self.y / len))
	}

	/// Rotated a quarter turn: `(x, y) -> (-y, x)`.
	pub fn perpendicular(self) -> Point {
		Point::new(-self.y, self.x)
	}

	/// Angle of the vector in radians, as `atan2(y, x)`.
	pub fn angle(self) -> f64 {
		self.y.atan2(self.x)
	}

	pub fn midpoint(self, other: Point) -> Point {
		Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
	}

	/// Unit vector pointing along `angle`.
	pub fn from_angle(angle: f64) -> Point {
		Point::new(angle.cos(), angle.sin())
	}
}

impl Add for Point {
	type Output = Point;

	fn add(self, rhs: Point) -> Point {
		Point::new(self.x + rhs.x, self.y + rhs.y)
	}
}

impl Sub for Point {
	type Output = Point;

	fn sub(self, rhs: Point) -> Point {
		Point::new(self.x - rhs.x, self.y - rhs.y)
	}
}

impl Mul<f64> for Point {
	type Output = Point;

	fn mul(self, rhs: f64) -> Point {
		Point::new(self.x * rhs, self.y * rhs)
	}
}
