//! Arc radius and sweep flags for a (possibly parallel) edge.

use super::types::Point;

/// Radius and sweep flags of an edge's two-arc path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveGeometry {
	/// Radius of both arcs.
	pub radius: f64,
	/// Sweep of the source → target arc. Set for odd ranks.
	pub side_a: bool,
	/// Sweep of the target → source return arc, always `!side_a`.
	pub side_b: bool,
}

impl CurveGeometry {
	/// Same radius with both sweeps swapped, bulging to the other side.
	pub fn flipped(self) -> Self {
		Self {
			side_a: self.side_b,
			side_b: self.side_a,
			..self
		}
	}
}

/// Curve for the `linkindex`-th of `total` links between two nodes.
///
/// A lone link uses the node distance as radius. Parallel links shrink the
/// radius with their rank so the curves fan out.
pub fn curve_geometry(source: Point, target: Point, linkindex: usize, total: usize) -> CurveGeometry {
	let mut radius = source.distance(target);
	let side_a = linkindex % 2 == 1;
	let side_b = !side_a;

	if total > 1 {
		let side_b = f64::from(u8::from(side_b));
		radius /= 1.0 + (1.0 / total as f64) * (linkindex as f64 - 1.0 - side_b);
	}

	CurveGeometry {
		radius,
		side_a,
		side_b,
	}
}

fn flag(set: bool) -> u8 {
	u8::from(set)
}

/// SVG path data: an arc from source to target followed by the return arc.
pub fn arc_path(source: Point, target: Point, curve: &CurveGeometry) -> String {
	let dr = curve.radius;
	format!(
		"M{},{}A{},{} 0 0 {},{},{}A{},{} 0 0 {},{},{}",
		source.x,
		source.y,
		dr,
		dr,
		flag(curve.side_a),
		target.x,
		target.y,
		dr,
		dr,
		flag(curve.side_b),
		source.x,
		source.y
	)
}

/// Straight source → target path that label text runs along.
pub fn guide_path(source: Point, target: Point) -> String {
	format!("M {} {} L {} {}", source.x, source.y, target.x, target.y)
}
