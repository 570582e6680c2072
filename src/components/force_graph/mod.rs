//! Force-directed graph with curved parallel edges, drawn on a canvas.

mod arc;
mod component;
mod config;
mod curve;
mod driver;
mod index;
mod label;
mod render;
mod scene;
mod state;
mod types;

pub use arc::{ArcError, CenterParam, arc_to_center_param, radian};
pub use component::ForceGraphCanvas;
pub use config::ForceGraphConfig;
pub use curve::{CurveGeometry, arc_path, curve_geometry, guide_path};
pub use driver::{NodeMarker, PositionSnapshot, recompute, tick_scene};
pub use index::{IndexedLink, LinkIndex, PairCounts, index_links, sort_links};
pub use label::{
	BBox, Line, Quadrant, Rotation, arc_center, label_offset, label_rotation, label_translate,
	perpendicular_line,
};
pub use scene::{ArrowHead, EdgeShape, Frame, LabelShape, NodeShape, Scene, SceneDiff};
pub use types::{GraphData, GraphLink, GraphNode, Point};
