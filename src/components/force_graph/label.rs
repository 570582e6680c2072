//! Placement of edge labels and perpendicular guide lines.
//!
//! Offsets are derived from the center of the edge's arc. The sign tables
//! below are fixed quadrant corrections and are applied as-is.

use super::arc::{ArcError, CenterParam, arc_to_center_param};
use super::curve::CurveGeometry;
use super::types::Point;

/// Where the target lies relative to the source, in screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Quadrant {
	TopLeft,
	BottomLeft,
	TopRight,
	BottomRight,
}

impl Quadrant {
	/// Ties on either axis count as right or below.
	pub fn of(source: Point, target: Point) -> Self {
		match (target.x < source.x, target.y < source.y) {
			(true, true) => Quadrant::TopLeft,
			(true, false) => Quadrant::BottomLeft,
			(false, true) => Quadrant::TopRight,
			(false, false) => Quadrant::BottomRight,
		}
	}

	/// Target lies left of the source.
	pub fn is_left(self) -> bool {
		matches!(self, Quadrant::TopLeft | Quadrant::BottomLeft)
	}

	/// Sign multipliers for the perpendicular guide line's far end.
	pub fn guide_multipliers(self) -> (f64, f64) {
		match self {
			Quadrant::TopLeft => (1.0, -1.0),
			Quadrant::BottomLeft => (-1.0, -1.0),
			Quadrant::TopRight => (1.0, 1.0),
			Quadrant::BottomRight => (-1.0, 1.0),
		}
	}
}

/// Straight line segment.
#[derive(Clone, Copy, Debug, PartialEq)]
#[allow(missing_docs)]
pub struct Line {
	pub from: Point,
	pub to: Point,
}

/// `rotate(degrees cx cy)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rotation {
	/// Clockwise, in degrees.
	pub degrees: f64,
	/// Pivot.
	pub center: Point,
}

/// Axis-aligned box.
#[derive(Clone, Copy, Debug, PartialEq)]
#[allow(missing_docs)]
pub struct BBox {
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
}

impl BBox {
	/// Middle of the box.
	pub fn center(&self) -> Point {
		Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
	}
}

/// Center of the edge's arc. Target and source are passed in reverse order
/// relative to the drawn path.
pub fn arc_center(source: Point, target: Point, curve: &CurveGeometry) -> Result<CenterParam, ArcError> {
	arc_to_center_param(
		target,
		(curve.radius, curve.radius),
		0.0,
		false,
		curve.side_a,
		source,
	)
}

/// Unsigned label offset: the radius split along the perpendicular and
/// parallel axes, taken from the arc center.
pub fn label_offset(source: Point, target: Point, curve: &CurveGeometry) -> Result<Point, ArcError> {
	let center = arc_center(source, target, curve)?;
	let (dx, dy) = (target.x - source.x, target.y - source.y);
	let m = -dy / dx;
	let dr2 = curve.radius * curve.radius;

	Ok(Point::new(
		center.cx - (dr2 / (1.0 + (1.0 / m) * (1.0 / m))).sqrt(),
		center.cy - (dr2 / (1.0 + m * m)).sqrt(),
	))
}

/// Guide line from the edge midpoint towards the label offset.
pub fn perpendicular_line(source: Point, target: Point, offset: Point) -> Line {
	let (x_mult, y_mult) = Quadrant::of(source, target).guide_multipliers();
	let mid = source.midpoint(target);
	Line {
		from: mid,
		to: Point::new(x_mult * offset.x + mid.x, y_mult * offset.y + mid.y),
	}
}

/// Label translation keyed on the arc side and quadrant.
pub fn label_translate(side_a: bool, quadrant: Quadrant, offset: Point) -> Point {
	let Point { x, y } = offset;
	let (tx, ty) = match (side_a, quadrant) {
		(false, Quadrant::TopLeft) => (-x, y),
		(false, Quadrant::BottomLeft) => (x, y),
		(false, Quadrant::TopRight) => (-x, -y),
		(false, Quadrant::BottomRight) => (x, -y),
		(true, Quadrant::TopLeft) => (x, -y),
		(true, Quadrant::BottomLeft) => (-x, -y),
		(true, Quadrant::TopRight) => (x, y),
		(true, Quadrant::BottomRight) => (-x, y),
	};
	Point::new(tx, ty)
}

/// Half turn about the label's box when the edge points left, so the text
/// never reads upside down.
pub fn label_rotation(source: Point, target: Point, bbox: &BBox) -> Option<Rotation> {
	Quadrant::of(source, target).is_left().then(|| Rotation {
		degrees: 180.0,
		center: bbox.center(),
	})
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::*;
	use crate::components::force_graph::curve::curve_geometry;

	const QUADRANTS: [Quadrant; 4] = [
		Quadrant::TopLeft,
		Quadrant::BottomLeft,
		Quadrant::TopRight,
		Quadrant::BottomRight,
	];

	fn close(a: f64, b: f64) -> bool {
		(a - b).abs() < 1e-6
	}

	#[test]
	fn test_quadrant_of() {
		let origin = Point::new(0.0, 0.0);
		assert_eq!(Quadrant::of(origin, Point::new(-1.0, -1.0)), Quadrant::TopLeft);
		assert_eq!(Quadrant::of(origin, Point::new(-1.0, 1.0)), Quadrant::BottomLeft);
		assert_eq!(Quadrant::of(origin, Point::new(1.0, -1.0)), Quadrant::TopRight);
		assert_eq!(Quadrant::of(origin, Point::new(1.0, 1.0)), Quadrant::BottomRight);
		// ties fall to the right/below branches
		assert_eq!(Quadrant::of(origin, Point::new(0.0, 0.0)), Quadrant::BottomRight);
		assert_eq!(Quadrant::of(origin, Point::new(0.0, -3.0)), Quadrant::TopRight);
	}

	#[test]
	fn test_arc_center_horizontal_edge() {
		let (a, b) = (Point::new(0.0, 0.0), Point::new(100.0, 0.0));
		let odd = arc_center(a, b, &curve_geometry(a, b, 1, 2)).unwrap();
		let even = arc_center(a, b, &curve_geometry(a, b, 2, 2)).unwrap();
		let h = 100.0 * 3f64.sqrt() / 2.0;
		assert!(close(odd.cx, 50.0) && close(odd.cy, -h));
		assert!(close(even.cx, 50.0) && close(even.cy, h));
	}

	#[test]
	fn test_label_offset_horizontal_edge() {
		let (a, b) = (Point::new(0.0, 0.0), Point::new(100.0, 0.0));
		let offset = label_offset(a, b, &curve_geometry(a, b, 1, 1)).unwrap();
		let h = 100.0 * 3f64.sqrt() / 2.0;
		// slope is zero, so the whole radius lands on the y axis
		assert!(close(offset.x, 50.0));
		assert!(close(offset.y, -h - 100.0));
	}

	#[test]
	fn test_label_offset_vertical_edge() {
		let (a, b) = (Point::new(0.0, 0.0), Point::new(0.0, 100.0));
		let curve = curve_geometry(a, b, 1, 1);
		let center = arc_center(a, b, &curve).unwrap();
		let offset = label_offset(a, b, &curve).unwrap();
		assert!(close(offset.x, center.cx - 100.0));
		assert!(close(offset.y, center.cy));
	}

	#[test]
	fn test_label_offset_propagates_coincident_endpoints() {
		let p = Point::new(5.0, 5.0);
		let curve = CurveGeometry {
			radius: 10.0,
			side_a: true,
			side_b: false,
		};
		assert_eq!(label_offset(p, p, &curve), Err(ArcError::CoincidentEndpoints));
	}

	#[test]
	fn test_perpendicular_line_multipliers() {
		let source = Point::new(10.0, 10.0);
		let offset = Point::new(3.0, 4.0);
		let cases = [
			(Point::new(0.0, 0.0), Point::new(5.0 + 3.0, 5.0 - 4.0)),
			(Point::new(0.0, 20.0), Point::new(5.0 - 3.0, 15.0 - 4.0)),
			(Point::new(20.0, 0.0), Point::new(15.0 + 3.0, 5.0 + 4.0)),
			(Point::new(20.0, 20.0), Point::new(15.0 - 3.0, 15.0 + 4.0)),
		];
		for (target, expected) in cases {
			let line = perpendicular_line(source, target, offset);
			assert_eq!(line.from, source.midpoint(target));
			assert_eq!(line.to, expected);
		}
	}

	#[test]
	fn test_translate_table() {
		let offset = Point::new(2.0, 3.0);
		let expected = [
			(false, Quadrant::TopLeft, (-2.0, 3.0)),
			(false, Quadrant::BottomLeft, (2.0, 3.0)),
			(false, Quadrant::TopRight, (-2.0, -3.0)),
			(false, Quadrant::BottomRight, (2.0, -3.0)),
			(true, Quadrant::TopLeft, (2.0, -3.0)),
			(true, Quadrant::BottomLeft, (-2.0, -3.0)),
			(true, Quadrant::TopRight, (2.0, 3.0)),
			(true, Quadrant::BottomRight, (-2.0, 3.0)),
		];
		for (side_a, quadrant, (x, y)) in expected {
			assert_eq!(label_translate(side_a, quadrant, offset), Point::new(x, y));
		}
	}

	#[test]
	fn test_translate_table_covers_every_sign() {
		let offset = Point::new(2.0, 3.0);
		for side_a in [false, true] {
			let signs: HashSet<(bool, bool)> = QUADRANTS
				.iter()
				.map(|&q| {
					let t = label_translate(side_a, q, offset);
					(t.x > 0.0, t.y > 0.0)
				})
				.collect();
			assert_eq!(signs.len(), 4);
		}
		// flipping the side mirrors the label through the anchor
		for q in QUADRANTS {
			let (a, b) = (label_translate(false, q, offset), label_translate(true, q, offset));
			assert_eq!((a.x, a.y), (-b.x, -b.y));
		}
	}

	#[test]
	fn test_label_rotation() {
		let bbox = BBox {
			x: 10.0,
			y: 20.0,
			width: 40.0,
			height: 10.0,
		};
		let source = Point::new(50.0, 50.0);
		assert_eq!(label_rotation(source, Point::new(60.0, 0.0), &bbox), None);
		assert_eq!(label_rotation(source, Point::new(50.0, 0.0), &bbox), None);
		let rotation = label_rotation(source, Point::new(0.0, 90.0), &bbox).unwrap();
		assert_eq!(rotation.degrees, 180.0);
		assert_eq!(rotation.center, Point::new(30.0, 25.0));
	}

	#[test]
	fn test_quadrant_is_left() {
		assert!(Quadrant::TopLeft.is_left());
		assert!(Quadrant::BottomLeft.is_left());
		assert!(!Quadrant::TopRight.is_left());
		assert!(!Quadrant::BottomRight.is_left());
	}
}
