//! Error types for the graph canvas.

use thiserror::Error;

pub use crate::components::force_graph::ArcError;

/// A specialized `Result` type for graph loading and geometry.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading a graph or laying out its edges.
#[derive(Error, Debug)]
pub enum Error {
	/// An edge's arc has no center parameterization.
	#[error("Arc error: {0}")]
	Arc(#[from] ArcError),

	/// The scene could not be written out as SVG.
	#[error("SVG error: {0}")]
	Svg(#[from] std::fmt::Error),

	/// The graph or config JSON could not be read.
	#[error("Parse error: {0}")]
	Parse(#[from] serde_json::Error),
}
