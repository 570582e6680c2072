use force_graph::SimulationParameters;
use serde::Deserialize;

/// Tunables for the simulation and the drawing. Any field missing from a
/// JSON config keeps its default.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ForceGraphConfig {
	/// Repulsion between every pair of nodes.
	pub force_charge: f32,
	/// Spring strength along links.
	pub force_spring: f32,
	/// Cap on the force applied to a node per step.
	pub force_max: f32,
	/// Speed multiplier for node movement.
	pub node_speed: f32,
	/// Velocity kept per step.
	pub damping_factor: f32,
	/// Mass of every node.
	pub node_mass: f32,
	/// Radius of the circle nodes are seeded on.
	pub layout_radius: f64,
	/// Radius of the drawn node circle.
	pub node_radius: f64,
	/// Pointer distance, in graph units, that still hits a node.
	pub hit_radius: f64,
	/// Font size of edge labels and node captions.
	pub label_font_size: f64,
	/// Alpha below which the simulation stops.
	pub alpha_min: f64,
	/// Fraction of the distance to the alpha target covered per tick.
	pub alpha_decay: f64,
	/// Alpha target set when a drag starts. It is never reset.
	pub drag_alpha_target: f64,
	/// Draw the dashed perpendicular guide lines.
	pub show_guides: bool,
}

impl Default for ForceGraphConfig {
	fn default() -> Self {
		Self {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
			node_mass: 10.0,
			layout_radius: 100.0,
			node_radius: 5.0,
			hit_radius: 12.0,
			label_font_size: 10.0,
			alpha_min: 0.001,
			// reaches alpha_min after 300 ticks
			alpha_decay: 1.0 - 0.001f64.powf(1.0 / 300.0),
			drag_alpha_target: 0.02,
			show_guides: true,
		}
	}
}

impl ForceGraphConfig {
	/// Parse a config, filling missing fields with defaults.
	pub fn from_json(json: &str) -> crate::error::Result<Self> {
		Ok(serde_json::from_str(json)?)
	}

	/// Physics parameters for [`force_graph::ForceGraph`].
	pub fn simulation_parameters(&self) -> SimulationParameters {
		SimulationParameters {
			force_charge: self.force_charge,
			force_spring: self.force_spring,
			force_max: self.force_max,
			node_speed: self.node_speed,
			damping_factor: self.damping_factor,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_partial_override() {
		let config = ForceGraphConfig::from_json(r#"{"node_radius": 8, "show_guides": false}"#).unwrap();
		assert_eq!(config.node_radius, 8.0);
		assert!(!config.show_guides);
		assert_eq!(config.label_font_size, ForceGraphConfig::default().label_font_size);
	}

	#[test]
	fn test_alpha_decay_default() {
		let config = ForceGraphConfig::default();
		let alpha = (0..300).fold(1.0, |alpha, _| alpha * (1.0 - config.alpha_decay));
		assert!((alpha - config.alpha_min).abs() < 1e-9);
	}

	#[test]
	fn test_simulation_parameters() {
		let params = ForceGraphConfig::default().simulation_parameters();
		assert_eq!(params.force_charge, 150.0);
		assert_eq!(params.damping_factor, 0.9);
	}
}
