use std::f64::consts::PI;

use log::trace;
use web_sys::CanvasRenderingContext2d;

use super::geometry::Point;
use super::layout::{Arrowhead, EdgeShape, layout_edge};
use super::model::NodeId;
use super::interaction::InteractionState;
use super::state::EditorState;

const ACCENT: &str = "#d9825b";
const ACTIVE_OUTLINE: &str = "#b54c1f";
const HOVER_GRADIENT: (&str, &str) = ("#f6b38a", "#e27d4f");
const ACTIVE_GRADIENT: (&str, &str) = ("#e27d4f", "#c75f2f");
const NODE_FONT: &str = "bold 16px Arial";
const EDGE_FONT: &str = "bold 18px Arial";
const LOOP_FONT: &str = "bold 14px Arial";

/// How a node is painted. Exactly one applies to each node per frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeVisual {
	Idle,
	Hovered,
	Active,
}

impl NodeVisual {
	pub fn of(id: NodeId, ui: &InteractionState) -> Self {
		if ui.active == Some(id) {
			NodeVisual::Active
		} else if ui.hovered == Some(id) {
			NodeVisual::Hovered
		} else {
			NodeVisual::Idle
		}
	}

	fn outline(self) -> &'static str {
		match self {
			NodeVisual::Active => ACTIVE_OUTLINE,
			NodeVisual::Idle | NodeVisual::Hovered => ACCENT,
		}
	}

	fn text_color(self) -> &'static str {
		match self {
			NodeVisual::Idle => ACCENT,
			NodeVisual::Hovered | NodeVisual::Active => "white",
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct EdgeSprite {
	pub shape: EdgeShape,
	pub color: &'static str,
	pub label: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodeSprite {
	pub center: Point,
	pub radius: f64,
	pub label: String,
	pub visual: NodeVisual,
}

/// Everything one repaint draws, edges before nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
	pub width: f64,
	pub height: f64,
	pub edges: Vec<EdgeSprite>,
	pub nodes: Vec<NodeSprite>,
}

/// Lays out the whole scene from the current model and interaction state.
pub fn compose(state: &EditorState) -> Frame {
	let model = &state.model;
	let edges = model
		.edges()
		.iter()
		.filter_map(|edge| {
			let shape = layout_edge(model, edge, &state.config)?;
			Some(EdgeSprite {
				shape,
				color: edge.color,
				label: edge.weight.to_string(),
			})
		})
		.collect();
	let nodes = model
		.nodes()
		.iter()
		.map(|node| NodeSprite {
			center: node.position,
			radius: state.config.node_radius * node.scale,
			label: node.label.clone(),
			visual: NodeVisual::of(node.id, &state.interaction),
		})
		.collect();
	Frame {
		width: state.width,
		height: state.height,
		edges,
		nodes,
	}
}

pub fn render(state: &EditorState, ctx: &CanvasRenderingContext2d) {
	let frame = compose(state);
	trace!("repaint: {} edges, {} nodes", frame.edges.len(), frame.nodes.len());
	paint(&frame, ctx);
}

pub fn paint(frame: &Frame, ctx: &CanvasRenderingContext2d) {
	ctx.clear_rect(0.0, 0.0, frame.width, frame.height);
	for edge in &frame.edges {
		draw_edge(edge, ctx);
	}
	for node in &frame.nodes {
		draw_node(node, ctx);
	}
}

fn draw_edge(edge: &EdgeSprite, ctx: &CanvasRenderingContext2d) {
	ctx.set_stroke_style_str(edge.color);
	ctx.set_fill_style_str(edge.color);
	ctx.set_line_width(2.0);
	ctx.set_text_align("center");
	ctx.begin_path();
	match &edge.shape {
		EdgeShape::Curve {
			start, control, end, ..
		} => {
			ctx.move_to(start.x, start.y);
			ctx.quadratic_curve_to(control.x, control.y, end.x, end.y);
			ctx.stroke();
			ctx.set_font(EDGE_FONT);
		}
		EdgeShape::Loop { center, radius, .. } => {
			let _ = ctx.arc(center.x, center.y, *radius, 0.0, 2.0 * PI);
			ctx.stroke();
			ctx.set_font(LOOP_FONT);
		}
	}
	let at = edge.shape.label_at();
	let _ = ctx.fill_text(&edge.label, at.x, at.y);
	if let Some(arrow) = edge.shape.arrow() {
		draw_arrow(arrow, ctx);
	}
}

fn draw_arrow(arrow: &Arrowhead, ctx: &CanvasRenderingContext2d) {
	ctx.begin_path();
	ctx.move_to(arrow.tip.x, arrow.tip.y);
	ctx.line_to(arrow.left.x, arrow.left.y);
	ctx.line_to(arrow.right.x, arrow.right.y);
	ctx.close_path();
	ctx.fill();
}

fn draw_node(node: &NodeSprite, ctx: &CanvasRenderingContext2d) {
	let (c, r) = (node.center, node.radius);
	if r <= 0.0 {
		return;
	}
	ctx.begin_path();
	let _ = ctx.arc(c.x, c.y, r, 0.0, 2.0 * PI);

	let stops = match node.visual {
		NodeVisual::Idle => None,
		NodeVisual::Hovered => Some(HOVER_GRADIENT),
		NodeVisual::Active => Some(ACTIVE_GRADIENT),
	};
	match stops {
		None => ctx.set_fill_style_str("white"),
		Some((from, to)) => {
			let gradient = ctx.create_linear_gradient(c.x - r, c.y - r, c.x + r, c.y + r);
			let _ = gradient.add_color_stop(0.0, from);
			let _ = gradient.add_color_stop(1.0, to);
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
	}
	ctx.set_stroke_style_str(node.visual.outline());
	ctx.set_line_width(3.0);
	ctx.fill();
	ctx.stroke();

	ctx.set_fill_style_str(node.visual.text_color());
	ctx.set_font(NODE_FONT);
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	let _ = ctx.fill_text(&node.label, c.x, c.y);
	ctx.set_text_baseline("alphabetic");
}
