use leptos::prelude::*;

use crate::components::force_graph::{ForceGraphCanvas, GraphData};

/// Bundled sample graph with parallel edges in both directions.
const SAMPLE_GRAPH: &str = include_str!("../../assets/force.json");

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let graph = GraphData::from_json(SAMPLE_GRAPH).map(|data| {
		let graph_data = Signal::derive(move || data.clone());
		view! { <ForceGraphCanvas data=graph_data fullscreen=true /> }
	});

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-graph">
				{graph}
				<div class="graph-overlay">
					<h1>"Force-Directed Graph"</h1>
					<p class="subtitle">
						"Parallel edges fan out as separate arcs. Drag nodes to pin them. Scroll to zoom. Drag background to pan."
					</p>
				</div>
			</div>
		</ErrorBoundary>
	}
}
