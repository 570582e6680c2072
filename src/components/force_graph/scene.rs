//! Retained-mode scene: the geometry drawn for every edge and node, keyed by
//! identity and updated once per tick.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Write};

use crate::error::Result;

use super::label::{Line, Rotation};
use super::types::Point;

/// Arrowhead at the target end of an edge.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrowHead {
	/// Point of the arrow.
	pub tip: Point,
	/// Direction of travel at the tip, radians.
	pub heading: f64,
}

/// Placed edge label.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelShape {
	#[allow(missing_docs)]
	pub text: String,
	/// Middle of the straight source → target guide path.
	pub anchor: Point,
	/// Angle of the guide path, radians.
	pub baseline_angle: f64,
	/// Offset from the anchor to the drawn label.
	pub translate: Point,
	/// Half turn applied to leftward labels.
	pub rotation: Option<Rotation>,
}

/// Everything drawn for one edge.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeShape {
	/// Two-arc SVG path data.
	pub path: String,
	/// Straight SVG path the label runs along.
	pub guide_path: String,
	/// Guide line from the chord midpoint towards the label offset.
	pub perpendicular: Line,
	#[allow(missing_docs)]
	pub arrow: Option<ArrowHead>,
	#[allow(missing_docs)]
	pub label: LabelShape,
	/// Rank among the edge's parallel links.
	pub linkindex: usize,
	/// Sweep flag of the outgoing arc.
	pub side_a: bool,
	/// Sweep flag of the return arc.
	pub side_b: bool,
}

/// A node marker at its current position.
#[derive(Clone, Debug, PartialEq)]
#[allow(missing_docs)]
pub struct NodeShape {
	pub position: Point,
	pub caption: String,
	pub color: String,
}

/// Geometry computed for one tick.
#[derive(Clone, Debug, Default)]
pub struct Frame {
	/// Edge shapes by scene key.
	pub edges: Vec<(String, EdgeShape)>,
	/// Node shapes by node id.
	pub nodes: Vec<(String, NodeShape)>,
	/// Edges that could not be resolved this tick. They keep their last shape.
	pub skipped: Vec<String>,
}

/// What a call to [`Scene::apply`] changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct SceneDiff {
	pub created: Vec<String>,
	pub updated: Vec<String>,
	pub removed: Vec<String>,
}

impl SceneDiff {
	/// Nothing changed.
	pub fn is_empty(&self) -> bool {
		self.created.is_empty() && self.updated.is_empty() && self.removed.is_empty()
	}
}

/// Shapes currently on screen, keyed by identity.
#[derive(Clone, Debug, Default)]
pub struct Scene {
	/// Edge shapes by scene key.
	pub edges: BTreeMap<String, EdgeShape>,
	/// Node shapes by node id.
	pub nodes: BTreeMap<String, NodeShape>,
}

fn sync<T: PartialEq>(
	current: &mut BTreeMap<String, T>,
	incoming: Vec<(String, T)>,
	retained: &BTreeSet<&str>,
	diff: &mut SceneDiff,
) {
	let mut seen = BTreeSet::new();
	for (key, shape) in incoming {
		match current.get_mut(&key) {
			Some(existing) => {
				if *existing != shape {
					*existing = shape;
					diff.updated.push(key.clone());
				}
			}
			None => {
				current.insert(key.clone(), shape);
				diff.created.push(key.clone());
			}
		}
		seen.insert(key);
	}
	current.retain(|key, _| {
		let keep = seen.contains(key) || retained.contains(key.as_str());
		if !keep {
			diff.removed.push(key.clone());
		}
		keep
	});
}

impl Scene {
	/// An empty scene.
	pub fn new() -> Self {
		Self::default()
	}

	/// Create, update and remove shapes so the scene matches `frame`.
	pub fn apply(&mut self, frame: Frame) -> SceneDiff {
		let mut diff = SceneDiff::default();
		let retained: BTreeSet<&str> = frame.skipped.iter().map(String::as_str).collect();
		sync(&mut self.edges, frame.edges, &retained, &mut diff);
		sync(&mut self.nodes, frame.nodes, &BTreeSet::new(), &mut diff);
		diff
	}

	/// Standalone SVG document of the scene.
	pub fn to_svg(&self, width: f64, height: f64, node_radius: f64, font_size: f64) -> Result<String> {
		let mut svg = String::new();
		self.write_svg(&mut svg, width, height, node_radius, font_size)?;
		Ok(svg)
	}

	/// Write the scene as an SVG document into `out`.
	pub fn write_svg<W: Write>(
		&self,
		out: &mut W,
		width: f64,
		height: f64,
		node_radius: f64,
		font_size: f64,
	) -> fmt::Result {
		writeln!(
			out,
			r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{}" height="{}">"#,
			width, height
		)?;
		out.write_str(
			"<defs><marker id=\"arrowhead\" viewBox=\"-0 -5 10 10\" refX=\"13\" refY=\"0\" orient=\"auto\" markerWidth=\"13\" markerHeight=\"13\"><path d=\"M 0,-5 L 10 ,0 L 0,5\" fill=\"#999\" stroke=\"none\"/></marker></defs>\n",
		)?;

		for (key, edge) in &self.edges {
			let id = escape(key);
			writeln!(
				out,
				r#"<path class="link" d="{}" marker-end="url(#arrowhead)"><title>{}</title></path>"#,
				edge.path,
				escape(&edge.label.text)
			)?;
			let Line { from, to } = edge.perpendicular;
			writeln!(
				out,
				r#"<line class="linkPerp" x1="{}" y1="{}" x2="{}" y2="{}"/>"#,
				from.x, from.y, to.x, to.y
			)?;
			writeln!(
				out,
				r#"<path class="edgepath" id="edgepath-{}" d="{}" fill-opacity="0" stroke-opacity="0"/>"#,
				id, edge.guide_path
			)?;
			let rotate = match edge.label.rotation {
				Some(r) => format!("rotate({} {} {})", r.degrees, r.center.x, r.center.y),
				None => "rotate(0)".to_string(),
			};
			writeln!(
				out,
				r##"<g class="edgelabelwrap" transform="{}"><text class="edgelabel" font-size="{}" transform="translate({},{})"><textPath xlink:href="#edgepath-{}" startOffset="50%" text-anchor="middle">{}</textPath></text></g>"##,
				rotate,
				font_size,
				edge.label.translate.x,
				edge.label.translate.y,
				id,
				escape(&edge.label.text)
			)?;
		}

		for (id, node) in &self.nodes {
			writeln!(
				out,
				r#"<g class="node" transform="translate({}, {})"><circle r="{}" fill="{}"/><title>{}</title><text dy="-3">{}</text></g>"#,
				node.position.x,
				node.position.y,
				node_radius,
				node.color,
				escape(id),
				escape(&node.caption)
			)?;
		}

		out.write_str("</svg>\n")
	}
}

fn escape(text: &str) -> String {
	text.replace('&', "&amp;")
		.replace('<', "&lt;")
		.replace('>', "&gt;")
		.replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
	use super::*;

	fn node(x: f64) -> NodeShape {
		NodeShape {
			position: Point::new(x, 0.0),
			caption: "n".into(),
			color: "#1f77b4".into(),
		}
	}

	fn edge(text: &str) -> EdgeShape {
		EdgeShape {
			path: "M0,0A1,1 0 0 1,1,0A1,1 0 0 0,0,0".into(),
			guide_path: "M 0 0 L 1 0".into(),
			perpendicular: Line {
				from: Point::new(0.5, 0.0),
				to: Point::new(0.5, 1.0),
			},
			arrow: None,
			label: LabelShape {
				text: text.into(),
				anchor: Point::new(0.5, 0.0),
				baseline_angle: 0.0,
				translate: Point::new(1.0, 2.0),
				rotation: None,
			},
			linkindex: 1,
			side_a: true,
			side_b: false,
		}
	}

	#[test]
	fn test_apply_creates_updates_removes() {
		let mut scene = Scene::new();
		let diff = scene.apply(Frame {
			edges: vec![("e1".into(), edge("x")), ("e2".into(), edge("y"))],
			nodes: vec![("a".into(), node(0.0))],
			skipped: vec![],
		});
		assert_eq!(diff.created, ["e1", "e2", "a"]);
		assert!(diff.updated.is_empty() && diff.removed.is_empty());

		let diff = scene.apply(Frame {
			edges: vec![("e1".into(), edge("x"))],
			nodes: vec![("a".into(), node(5.0)), ("b".into(), node(1.0))],
			skipped: vec![],
		});
		assert_eq!(diff.created, ["b"]);
		assert_eq!(diff.updated, ["a"]);
		assert_eq!(diff.removed, ["e2"]);
		assert_eq!(scene.edges.len(), 1);
		assert_eq!(scene.nodes["a"].position, Point::new(5.0, 0.0));
	}

	#[test]
	fn test_unchanged_frame_is_empty_diff() {
		let mut scene = Scene::new();
		let frame = Frame {
			edges: vec![("e1".into(), edge("x"))],
			nodes: vec![("a".into(), node(0.0))],
			skipped: vec![],
		};
		scene.apply(frame.clone());
		assert!(scene.apply(frame).is_empty());
	}

	#[test]
	fn test_skipped_edges_keep_previous_shape() {
		let mut scene = Scene::new();
		scene.apply(Frame {
			edges: vec![("e1".into(), edge("x"))],
			..Frame::default()
		});
		let diff = scene.apply(Frame {
			skipped: vec!["e1".into()],
			..Frame::default()
		});
		assert!(diff.removed.is_empty());
		assert_eq!(scene.edges["e1"].label.text, "x");
	}

	#[test]
	fn test_to_svg() {
		let mut scene = Scene::new();
		let mut flipped = edge("a<b");
		flipped.label.rotation = Some(Rotation {
			degrees: 180.0,
			center: Point::new(3.0, 4.0),
		});
		scene.apply(Frame {
			edges: vec![("e1".into(), edge("x")), ("e2".into(), flipped)],
			nodes: vec![("a".into(), node(7.0))],
			skipped: vec![],
		});

		let svg = scene.to_svg(960.0, 600.0, 5.0, 10.0).unwrap();
		assert!(svg.starts_with("<svg"));
		assert!(svg.trim_end().ends_with("</svg>"));
		assert!(svg.contains(r#"d="M0,0A1,1 0 0 1,1,0A1,1 0 0 0,0,0""#));
		assert!(svg.contains(r##"xlink:href="#edgepath-e1""##));
		assert!(svg.contains("rotate(0)"));
		assert!(svg.contains("rotate(180 3 4)"));
		assert!(svg.contains("translate(1,2)"));
		assert!(svg.contains("a&lt;b"));
		assert!(svg.contains(r#"<g class="node" transform="translate(7, 0)">"#));
		assert_eq!(svg.matches("class=\"linkPerp\"").count(), 2);
	}

	struct Full;

	impl Write for Full {
		fn write_str(&mut self, _: &str) -> fmt::Result {
			Err(fmt::Error)
		}
	}

	#[test]
	fn test_write_errors_reach_the_caller() {
		let mut scene = Scene::new();
		scene.apply(Frame {
			nodes: vec![("a".into(), node(0.0))],
			..Frame::default()
		});
		assert_eq!(scene.write_svg(&mut Full, 10.0, 10.0, 5.0, 10.0), Err(fmt::Error));
	}
}
