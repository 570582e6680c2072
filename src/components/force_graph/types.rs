use serde::{Deserialize, Deserializer};

use crate::error::Result;

/// A 2D point in graph space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[allow(missing_docs)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	#[allow(missing_docs)]
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Euclidean distance.
	pub fn distance(self, other: Point) -> f64 {
		let (dx, dy) = (other.x - self.x, other.y - self.y);
		(dx * dx + dy * dy).sqrt()
	}

	/// Point halfway to `other`.
	pub fn midpoint(self, other: Point) -> Point {
		Point::new(
			other.x - (other.x - self.x) / 2.0,
			other.y - (other.y - self.y) / 2.0,
		)
	}
}

/// A node record. Ids may be strings or numbers in the JSON.
#[derive(Clone, Debug, Deserialize)]
#[allow(missing_docs)]
pub struct GraphNode {
	#[serde(deserialize_with = "identity")]
	pub id: String,
	#[serde(default)]
	pub name: Option<String>,
	/// Secondary caption text.
	#[serde(default)]
	pub text: Option<String>,
	/// Fill color. Falls back to the palette entry of `group`.
	#[serde(default)]
	pub color: Option<String>,
	#[serde(default)]
	pub group: Option<u32>,
}

impl GraphNode {
	#[allow(missing_docs)]
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			name: None,
			text: None,
			color: None,
			group: None,
		}
	}

	/// Caption drawn next to the node marker, `name:text`.
	pub fn display_label(&self) -> String {
		match (&self.name, &self.text) {
			(Some(name), Some(text)) => format!("{}:{}", name, text),
			(Some(part), None) | (None, Some(part)) => part.clone(),
			(None, None) => self.id.clone(),
		}
	}
}

/// A directed link record.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphLink {
	/// Id of the node the link starts at.
	#[serde(deserialize_with = "identity")]
	pub source: String,
	/// Id of the node the link points to.
	#[serde(deserialize_with = "identity")]
	pub target: String,
	/// Label text.
	#[serde(default)]
	pub name: Option<String>,
	#[serde(default, deserialize_with = "optional_identity")]
	#[allow(missing_docs)]
	pub id: Option<String>,
}

impl GraphLink {
	#[allow(missing_docs)]
	pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
			name: None,
			id: None,
		}
	}

	/// Set the label text.
	pub fn named(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	#[allow(missing_docs)]
	pub fn with_id(mut self, id: impl Into<String>) -> Self {
		self.id = Some(id.into());
		self
	}

	/// Scene identity of this link. `position` is the link's place in the
	/// input list and stands in for a missing id.
	pub fn key(&self, position: usize) -> String {
		match &self.id {
			Some(id) => format!("{}-{}-{}", self.source, id, self.target),
			None => format!("{}-#{}-{}", self.source, position, self.target),
		}
	}
}

/// Nodes and links as loaded.
#[derive(Clone, Debug, Default, Deserialize)]
#[allow(missing_docs)]
pub struct GraphData {
	#[serde(default)]
	pub nodes: Vec<GraphNode>,
	#[serde(default)]
	pub links: Vec<GraphLink>,
}

impl GraphData {
	/// Parse the `{ nodes: [...], links: [...] }` graph description.
	pub fn from_json(json: &str) -> Result<Self> {
		Ok(serde_json::from_str(json)?)
	}
}

/// Graph files use both string and numeric identities.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawIdentity {
	Text(String),
	Number(serde_json::Number),
}

impl From<RawIdentity> for String {
	fn from(raw: RawIdentity) -> Self {
		match raw {
			RawIdentity::Text(s) => s,
			RawIdentity::Number(n) => n.to_string(),
		}
	}
}

fn identity<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
	RawIdentity::deserialize(deserializer).map(String::from)
}

fn optional_identity<'de, D: Deserializer<'de>>(
	deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
	Option::<RawIdentity>::deserialize(deserializer).map(|raw| raw.map(String::from))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::Error;

	#[test]
	fn test_parse_graph_with_mixed_identities() {
		let data = GraphData::from_json(
			r#"{
				"nodes": [
					{"id": 1, "name": "A", "text": "first"},
					{"id": "two", "name": "B"}
				],
				"links": [
					{"source": 1, "target": "two", "name": "knows", "id": 7},
					{"source": "two", "target": 1}
				]
			}"#,
		)
		.unwrap();

		assert_eq!(data.nodes.len(), 2);
		assert_eq!(data.nodes[0].id, "1");
		assert_eq!(data.nodes[1].id, "two");
		assert_eq!(data.links[0].source, "1");
		assert_eq!(data.links[0].id.as_deref(), Some("7"));
		assert_eq!(data.links[1].name, None);
		assert_eq!(data.links[1].id, None);
	}

	#[test]
	fn test_parse_error() {
		let result = GraphData::from_json("{\"nodes\": [");
		assert!(matches!(result, Err(Error::Parse(_))));
	}

	#[test]
	fn test_display_label() {
		let mut node = GraphNode::new("n1");
		assert_eq!(node.display_label(), "n1");
		node.name = Some("Alice".into());
		assert_eq!(node.display_label(), "Alice");
		node.text = Some("admin".into());
		assert_eq!(node.display_label(), "Alice:admin");
	}

	#[test]
	fn test_link_key() {
		let link = GraphLink::new("a", "b").with_id("3");
		assert_eq!(link.key(0), "a-3-b");
		assert_eq!(GraphLink::new("a", "b").key(5), "a-#5-b");
	}

	#[test]
	fn test_point_helpers() {
		let (a, b) = (Point::new(0.0, 0.0), Point::new(30.0, 40.0));
		assert_eq!(a.distance(b), 50.0);
		assert_eq!(a.midpoint(b), Point::new(15.0, 20.0));
	}
}
