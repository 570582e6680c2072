//! SVG elliptical arc helpers.
//!
//! Converts the endpoint parameterization used by the SVG `A` path command
//! into the center parameterization (SVG 1.1, appendix F.6.5). Every curve and
//! label computation in the renderer goes through [`arc_to_center_param`].

use std::f64::consts::TAU;

use thiserror::Error;

use super::types::Point;

/// Ways an arc can fail to have a center parameterization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ArcError {
	/// One of the radii is zero.
	#[error("rx and ry can not be 0")]
	DegenerateRadius,
	/// Start and end point are the same after projection.
	#[error("start point can not be same as end point")]
	CoincidentEndpoints,
}

/// Center parameterization of an elliptical arc. Angles are in radians.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CenterParam {
	/// Center x.
	pub cx: f64,
	/// Center y.
	pub cy: f64,
	/// Radii after out-of-range correction (F.6.6).
	pub rx: f64,
	#[allow(missing_docs)]
	pub ry: f64,
	/// Angle of the start point.
	pub start_angle: f64,
	/// Positive when sweeping clockwise (screen coordinates), in `(-2π, 2π)`.
	pub delta_angle: f64,
	/// Normalized into `[0, 2π)`.
	pub end_angle: f64,
	/// The sweep flag the arc was built with.
	pub clockwise: bool,
}

impl CenterParam {
	/// Point on the ellipse at parametric angle `theta`, given the rotation
	/// `phi` the arc was built with.
	pub fn point_at(&self, theta: f64, phi: f64) -> Point {
		let (s_phi, c_phi) = phi.sin_cos();
		let (s, c) = theta.sin_cos();
		Point::new(
			self.cx + self.rx * c_phi * c - self.ry * s_phi * s,
			self.cy + self.rx * s_phi * c + self.ry * c_phi * s,
		)
	}
}

/// Signed angle between vectors `u` and `v`, negative when the cross product
/// is negative. Both vectors must be non-zero.
pub fn radian(ux: f64, uy: f64, vx: f64, vy: f64) -> f64 {
	let dot = ux * vx + uy * vy;
	let len = ((ux * ux + uy * uy) * (vx * vx + vy * vy)).sqrt();
	// acos is undefined just outside [-1, 1], which rounding can produce
	let rad = (dot / len).clamp(-1.0, 1.0).acos();
	if ux * vy - uy * vx < 0.0 { -rad } else { rad }
}

/// Endpoint to center conversion for an arc from `start` to `end`.
///
/// Negative radii are taken by magnitude. Radii too small to span the chord
/// are scaled up uniformly. Fails with [`ArcError::DegenerateRadius`] when a
/// radius is zero and [`ArcError::CoincidentEndpoints`] when the endpoints
/// coincide.
pub fn arc_to_center_param(
	start: Point,
	radii: (f64, f64),
	phi: f64,
	large_arc: bool,
	sweep: bool,
	end: Point,
) -> Result<CenterParam, ArcError> {
	let (mut rx, mut ry) = (radii.0.abs(), radii.1.abs());
	if rx == 0.0 || ry == 0.0 {
		return Err(ArcError::DegenerateRadius);
	}

	let (s_phi, c_phi) = phi.sin_cos();
	let (hd_x, hd_y) = ((start.x - end.x) / 2.0, (start.y - end.y) / 2.0);
	let (hs_x, hs_y) = ((start.x + end.x) / 2.0, (start.y + end.y) / 2.0);

	// F.6.5.1
	let x1_ = c_phi * hd_x + s_phi * hd_y;
	let y1_ = c_phi * hd_y - s_phi * hd_x;

	// F.6.6 step 3
	let lambda = (x1_ * x1_) / (rx * rx) + (y1_ * y1_) / (ry * ry);
	if lambda > 1.0 {
		rx *= lambda.sqrt();
		ry *= lambda.sqrt();
	}

	let rxry = rx * ry;
	let (rxy1_, ryx1_) = (rx * y1_, ry * x1_);
	let sum_of_sq = rxy1_ * rxy1_ + ryx1_ * ryx1_;
	if sum_of_sq == 0.0 {
		return Err(ArcError::CoincidentEndpoints);
	}
	let mut coe = ((rxry * rxry - sum_of_sq) / sum_of_sq).abs().sqrt();
	if large_arc == sweep {
		coe = -coe;
	}

	// F.6.5.2
	let cx_ = coe * rxy1_ / ry;
	let cy_ = -coe * ryx1_ / rx;

	// F.6.5.3
	let cx = c_phi * cx_ - s_phi * cy_ + hs_x;
	let cy = s_phi * cx_ + c_phi * cy_ + hs_y;

	let (xcr1, xcr2) = ((x1_ - cx_) / rx, (x1_ + cx_) / rx);
	let (ycr1, ycr2) = ((y1_ - cy_) / ry, (y1_ + cy_) / ry);

	// F.6.5.5
	let start_angle = radian(1.0, 0.0, xcr1, ycr1);

	// F.6.5.6
	let mut delta_angle = radian(xcr1, ycr1, -xcr2, -ycr2).rem_euclid(TAU);
	if !sweep {
		delta_angle -= TAU;
	}
	let end_angle = (start_angle + delta_angle).rem_euclid(TAU);

	Ok(CenterParam {
		cx,
		cy,
		rx,
		ry,
		start_angle,
		delta_angle,
		end_angle,
		clockwise: sweep,
	})
}
