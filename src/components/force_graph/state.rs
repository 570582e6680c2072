use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData};
use log::{info, warn};

use super::arc::ArcError;
use super::config::ForceGraphConfig;
use super::driver::{NodeMarker, PositionSnapshot, tick_scene};
use super::index::{LinkIndex, index_links};
use super::scene::{Scene, SceneDiff};
use super::types::{GraphData, GraphLink, Point};

const COLORS: &[&str] = &[
	"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
	"#bcbd22", "#17becf",
];

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: String,
	/// Pinned position `(fx, fy)`. Once set it is kept for good.
	pub pin: Option<(f32, f32)>,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Simulation temperature. The physics only steps while the simulation is
/// running; it stops once alpha cools below `min`.
#[derive(Clone, Debug)]
pub struct Alpha {
	pub value: f64,
	pub target: f64,
	pub min: f64,
	pub decay: f64,
	running: bool,
}

impl Alpha {
	pub fn new(config: &ForceGraphConfig) -> Self {
		Self {
			value: 1.0,
			target: 0.0,
			min: config.alpha_min,
			decay: config.alpha_decay,
			running: true,
		}
	}

	pub fn is_running(&self) -> bool {
		self.running
	}

	pub fn restart(&mut self) {
		self.running = true;
	}

	/// Advance one tick. Returns whether the physics should step.
	pub fn step(&mut self) -> bool {
		if !self.running {
			return false;
		}
		self.value += (self.target - self.value) * self.decay;
		if self.value < self.min {
			self.running = false;
		}
		true
	}
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub config: ForceGraphConfig,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub alpha: Alpha,
	pub scene: Scene,
	pub width: f64,
	pub height: f64,
	index: LinkIndex,
	markers: Vec<NodeMarker>,
}

impl ForceGraphState {
	pub fn new(data: &GraphData, config: ForceGraphConfig, width: f64, height: f64) -> Self {
		let mut graph = ForceGraph::new(config.simulation_parameters());
		let mut id_to_idx = HashMap::new();
		let mut markers = Vec::with_capacity(data.nodes.len());

		for (i, node) in data.nodes.iter().enumerate() {
			let color = node.color.clone().unwrap_or_else(|| {
				let slot = node.group.map(|g| g as usize).unwrap_or(i);
				COLORS[slot % COLORS.len()].into()
			});
			let angle = (i as f64) * 2.0 * PI / data.nodes.len() as f64;
			let (x, y) = (
				(config.layout_radius * angle.cos()) as f32,
				(config.layout_radius * angle.sin()) as f32,
			);

			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: config.node_mass,
				is_anchor: false,
				user_data: NodeInfo {
					id: node.id.clone(),
					pin: None,
				},
			});
			id_to_idx.insert(node.id.clone(), idx);
			markers.push(NodeMarker {
				id: node.id.clone(),
				caption: node.display_label(),
				color,
			});
		}

		let mut links: Vec<GraphLink> = Vec::with_capacity(data.links.len());
		for link in &data.links {
			if let (Some(&src), Some(&tgt)) =
				(id_to_idx.get(&link.source), id_to_idx.get(&link.target))
			{
				graph.add_edge(src, tgt, EdgeData::default());
				links.push(link.clone());
			} else {
				warn!(
					"skipping link {} -> {}: unknown node",
					link.source, link.target
				);
			}
		}
		let index = index_links(&links);
		info!(
			"graph loaded: {} nodes, {} links over {} node pairs",
			markers.len(),
			index.links.len(),
			index.counts.len()
		);

		Self {
			graph,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			alpha: Alpha::new(&config),
			scene: Scene::new(),
			width,
			height,
			index,
			markers,
			config,
		}
	}

	pub fn index(&self) -> &LinkIndex {
		&self.index
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let hit_radius = self.config.hit_radius;
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			// hit radius is in world-space, scales with zoom like nodes
			if (dx * dx + dy * dy).sqrt() < hit_radius {
				found = Some(node.index());
			}
		});
		found
	}

	/// Pin the node where it is and warm the simulation up.
	pub fn drag_start(&mut self, idx: DefaultNodeIdx, sx: f64, sy: f64) {
		if !self.drag.active {
			self.alpha.target = self.config.drag_alpha_target;
			self.alpha.restart();
		}
		self.drag.active = true;
		self.drag.node_idx = Some(idx);
		self.drag.start_x = sx;
		self.drag.start_y = sy;

		let mut start = (0.0, 0.0);
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				start = (node.data.x, node.data.y);
				node.data.user_data.pin = Some(start);
				node.data.is_anchor = true;
			}
		});
		(self.drag.node_start_x, self.drag.node_start_y) = start;
	}

	/// Move the dragged node's pin to follow the pointer at `(sx, sy)`.
	pub fn drag_move(&mut self, sx: f64, sy: f64) {
		let Some(idx) = self.drag.node_idx.filter(|_| self.drag.active) else {
			return;
		};
		let (dx, dy) = (
			(sx - self.drag.start_x) / self.transform.k,
			(sy - self.drag.start_y) / self.transform.k,
		);
		let (fx, fy) = (
			self.drag.node_start_x + dx as f32,
			self.drag.node_start_y + dy as f32,
		);
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.user_data.pin = Some((fx, fy));
				node.data.x = fx;
				node.data.y = fy;
			}
		});
	}

	/// Release the pointer. The node stays pinned and the simulation keeps
	/// its drag alpha target.
	pub fn drag_end(&mut self) {
		self.drag.active = false;
		self.drag.node_idx = None;
	}

	pub fn pin_of(&self, id: &str) -> Option<(f32, f32)> {
		let mut pin = None;
		self.graph.visit_nodes(|node| {
			if node.data.user_data.id == id {
				pin = node.data.user_data.pin;
			}
		});
		pin
	}

	pub fn snapshot(&self) -> PositionSnapshot {
		let mut snapshot = PositionSnapshot::new();
		self.graph.visit_nodes(|node| {
			snapshot.insert(
				node.data.user_data.id.clone(),
				Point::new(node.x() as f64, node.y() as f64),
			);
		});
		snapshot
	}

	/// One simulation step followed by a full scene recomputation.
	pub fn tick(&mut self, dt: f32) -> Result<SceneDiff, ArcError> {
		if self.alpha.step() {
			self.graph.update(dt);
		}
		self.graph.visit_nodes_mut(|node| {
			if let Some((fx, fy)) = node.data.user_data.pin {
				node.data.x = fx;
				node.data.y = fy;
			}
		});

		let snapshot = self.snapshot();
		tick_scene(
			&mut self.scene,
			&snapshot,
			&self.markers,
			&self.index,
			&self.config,
		)
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}
