//! Per-tick recomputation of every edge and node shape.

use std::collections::HashMap;

use log::debug;

use super::arc::{ArcError, arc_to_center_param};
use super::config::ForceGraphConfig;
use super::curve::{CurveGeometry, arc_path, curve_geometry, guide_path};
use super::index::{IndexedLink, LinkIndex};
use super::label::{
	BBox, Quadrant, label_offset, label_rotation, label_translate, perpendicular_line,
};
use super::scene::{ArrowHead, EdgeShape, Frame, LabelShape, NodeShape, Scene, SceneDiff};
use super::types::Point;

/// Node positions as of one tick.
#[derive(Clone, Debug, Default)]
#[allow(missing_docs)]
pub struct PositionSnapshot {
	positions: HashMap<String, Point>,
}

#[allow(missing_docs)]
impl PositionSnapshot {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&mut self, id: impl Into<String>, position: Point) {
		self.positions.insert(id.into(), position);
	}

	pub fn get(&self, id: &str) -> Option<Point> {
		self.positions.get(id).copied()
	}

	pub fn len(&self) -> usize {
		self.positions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.positions.is_empty()
	}
}

impl<S: Into<String>> FromIterator<(S, Point)> for PositionSnapshot {
	fn from_iter<I: IntoIterator<Item = (S, Point)>>(iter: I) -> Self {
		Self {
			positions: iter.into_iter().map(|(id, p)| (id.into(), p)).collect(),
		}
	}
}

/// Static appearance of a node marker.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeMarker {
	#[allow(missing_docs)]
	pub id: String,
	/// Text drawn above the marker.
	pub caption: String,
	/// CSS fill color.
	pub color: String,
}

/// Box of a label laid along its guide path, centered on `center`.
fn label_box(text: &str, center: Point, angle: f64, font_size: f64) -> BBox {
	let (w, h) = (text.chars().count() as f64 * font_size * 0.6, font_size);
	let (s, c) = angle.sin_cos();
	let (bw, bh) = ((w * c).abs() + (h * s).abs(), (w * s).abs() + (h * c).abs());
	BBox {
		x: center.x - bw / 2.0,
		y: center.y - bh / 2.0,
		width: bw,
		height: bh,
	}
}

/// Arrow at the target end of the source → target arc, pulled back along the
/// arc by `inset`.
fn arrow_head(
	source: Point,
	target: Point,
	curve: &CurveGeometry,
	inset: f64,
) -> Result<ArrowHead, ArcError> {
	let arc = arc_to_center_param(
		source,
		(curve.radius, curve.radius),
		0.0,
		false,
		curve.side_a,
		target,
	)?;
	let direction = arc.delta_angle.signum();
	let theta = arc.end_angle - direction * inset / arc.rx;
	let (s, c) = theta.sin_cos();
	let heading = if direction > 0.0 {
		c.atan2(-s)
	} else {
		(-c).atan2(s)
	};
	Ok(ArrowHead {
		tip: arc.point_at(theta, 0.0),
		heading,
	})
}

/// Curve of one indexed link. Reversed links take the opposite sweeps so
/// they never trace the arc of a link running the other way.
fn edge_curve(source: Point, target: Point, link: &IndexedLink, total: usize) -> CurveGeometry {
	let curve = curve_geometry(source, target, link.linkindex, total);
	if link.reversed { curve.flipped() } else { curve }
}

fn resolve_edge(
	source: Point,
	target: Point,
	link: &IndexedLink,
	total: usize,
	config: &ForceGraphConfig,
) -> Result<EdgeShape, ArcError> {
	let curve = edge_curve(source, target, link, total);
	let offset = label_offset(source, target, &curve)?;
	let translate = label_translate(curve.side_a, Quadrant::of(source, target), offset);

	let text = link.link.name.clone().unwrap_or_default();
	let anchor = source.midpoint(target);
	let baseline_angle = (target.y - source.y).atan2(target.x - source.x);
	let placed = Point::new(anchor.x + translate.x, anchor.y + translate.y);
	let bbox = label_box(&text, placed, baseline_angle, config.label_font_size);

	Ok(EdgeShape {
		path: arc_path(source, target, &curve),
		guide_path: guide_path(source, target),
		perpendicular: perpendicular_line(source, target, offset),
		arrow: Some(arrow_head(source, target, &curve, config.node_radius)?),
		label: LabelShape {
			text,
			anchor,
			baseline_angle,
			translate,
			rotation: label_rotation(source, target, &bbox),
		},
		linkindex: link.linkindex,
		side_a: curve.side_a,
		side_b: curve.side_b,
	})
}

/// Geometry for every edge and node at the positions in `snapshot`.
///
/// Edges with a missing or coincident endpoint never reach the arc math and
/// are listed as skipped.
pub fn recompute(
	snapshot: &PositionSnapshot,
	markers: &[NodeMarker],
	index: &LinkIndex,
	config: &ForceGraphConfig,
) -> Result<Frame, ArcError> {
	let mut frame = Frame::default();

	for link in &index.links {
		let key = link.key();
		let (Some(source), Some(target)) =
			(snapshot.get(&link.link.source), snapshot.get(&link.link.target))
		else {
			debug!("edge {} has an endpoint without a position", key);
			frame.skipped.push(key);
			continue;
		};
		let distance = source.distance(target);
		if distance.is_nan() || distance <= f64::EPSILON {
			debug!("edge {} has zero length, keeping previous geometry", key);
			frame.skipped.push(key);
			continue;
		}

		let total = index.total_parallel_count(&link.link);
		let shape = resolve_edge(source, target, link, total, config)?;
		frame.edges.push((key, shape));
	}

	frame.nodes = markers
		.iter()
		.filter_map(|marker| {
			snapshot.get(&marker.id).map(|position| {
				(
					marker.id.clone(),
					NodeShape {
						position,
						caption: marker.caption.clone(),
						color: marker.color.clone(),
					},
				)
			})
		})
		.collect();

	Ok(frame)
}

/// Recompute and write the result into `scene`.
pub fn tick_scene(
	scene: &mut Scene,
	snapshot: &PositionSnapshot,
	markers: &[NodeMarker],
	index: &LinkIndex,
	config: &ForceGraphConfig,
) -> Result<SceneDiff, ArcError> {
	let frame = recompute(snapshot, markers, index, config)?;
	Ok(scene.apply(frame))
}
