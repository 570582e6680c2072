use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, Path2d};

use super::scene::{ArrowHead, EdgeShape, LabelShape};
use super::state::ForceGraphState;

const EDGE_COLOR: &str = "rgba(100, 180, 255, 0.6)";
const ARROW_COLOR: &str = "#999";
const GUIDE_COLOR: &str = "rgba(255, 255, 255, 0.25)";
const LABEL_COLOR: &str = "#aaa";

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#1a1a2e");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_edges(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let (line_width, arrow_size) = (1.5 / k, 8.0 / k);

	for edge in state.scene.edges.values() {
		ctx.set_stroke_style_str(EDGE_COLOR);
		ctx.set_line_width(line_width);
		if let Ok(path) = Path2d::new_with_path_string(&edge.path) {
			ctx.stroke_with_path(&path);
		}
		if let Some(arrow) = &edge.arrow {
			draw_arrow(ctx, arrow, arrow_size);
		}
		if state.config.show_guides {
			draw_guide(ctx, edge, k);
		}
		draw_label(ctx, &edge.label, state.config.label_font_size);
	}
}

fn draw_arrow(ctx: &CanvasRenderingContext2d, arrow: &ArrowHead, size: f64) {
	let (ux, uy) = (arrow.heading.cos(), arrow.heading.sin());
	let (back_x, back_y) = (arrow.tip.x - ux * size, arrow.tip.y - uy * size);
	let (px, py) = (-uy * size * 0.5, ux * size * 0.5);
	ctx.set_fill_style_str(ARROW_COLOR);
	ctx.begin_path();
	ctx.move_to(arrow.tip.x, arrow.tip.y);
	ctx.line_to(back_x + px, back_y + py);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();
}

fn draw_guide(ctx: &CanvasRenderingContext2d, edge: &EdgeShape, k: f64) {
	let (from, to) = (edge.perpendicular.from, edge.perpendicular.to);
	ctx.set_stroke_style_str(GUIDE_COLOR);
	ctx.set_line_width(1.0 / k);
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(4.0 / k),
		&JsValue::from_f64(4.0 / k),
	));
	ctx.begin_path();
	ctx.move_to(from.x, from.y);
	ctx.line_to(to.x, to.y);
	ctx.stroke();
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_label(ctx: &CanvasRenderingContext2d, label: &LabelShape, font_size: f64) {
	if label.text.is_empty() {
		return;
	}
	ctx.save();
	if let Some(rotation) = label.rotation {
		let c = rotation.center;
		let _ = ctx.translate(c.x, c.y);
		let _ = ctx.rotate(rotation.degrees.to_radians());
		let _ = ctx.translate(-c.x, -c.y);
	}
	let _ = ctx.translate(
		label.anchor.x + label.translate.x,
		label.anchor.y + label.translate.y,
	);
	let _ = ctx.rotate(label.baseline_angle);
	ctx.set_fill_style_str(LABEL_COLOR);
	ctx.set_font(&format!("{}px sans-serif", font_size));
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	let _ = ctx.fill_text(&label.text, 0.0, 0.0);
	ctx.restore();
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let (radius, k) = (state.config.node_radius, state.transform.k);
	ctx.set_text_align("start");
	ctx.set_text_baseline("alphabetic");

	for node in state.scene.nodes.values() {
		let (x, y) = (node.position.x, node.position.y);
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&node.color);
		ctx.fill();

		ctx.set_fill_style_str("rgba(255, 255, 255, 0.8)");
		ctx.set_font(&format!("{}px sans-serif", 10.0 / k.max(0.5)));
		let _ = ctx.fill_text(&node.caption, x, y - 3.0);
	}
}
