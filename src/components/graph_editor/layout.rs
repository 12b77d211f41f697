//! Curve geometry for edges: trimmed quadratic curves between distinct
//! nodes, separated curves for reciprocal pairs, loops for self-edges and
//! arrowheads for directed edges.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_6};

use super::config::EditorConfig;
use super::geometry::Point;
use super::model::{Edge, GraphModel};

/// Filled triangle at the end of a directed edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arrowhead {
	pub tip: Point,
	pub left: Point,
	pub right: Point,
}

#[derive(Clone, Debug, PartialEq)]
pub enum EdgeShape {
	Curve {
		start: Point,
		control: Point,
		end: Point,
		/// Signed perpendicular offset applied to the control point.
		offset: f64,
		label_at: Point,
		arrow: Option<Arrowhead>,
	},
	Loop {
		center: Point,
		radius: f64,
		label_at: Point,
		arrow: Option<Arrowhead>,
	},
}

impl EdgeShape {
	pub fn arrow(&self) -> Option<&Arrowhead> {
		match self {
			EdgeShape::Curve { arrow, .. } | EdgeShape::Loop { arrow, .. } => arrow.as_ref(),
		}
	}

	pub fn label_at(&self) -> Point {
		match self {
			EdgeShape::Curve { label_at, .. } | EdgeShape::Loop { label_at, .. } => *label_at,
		}
	}
}

/// Arrowhead with its tip at `tip`, pointing along `angle`, wings at ±30°.
pub fn arrowhead(tip: Point, angle: f64, size: f64) -> Arrowhead {
	Arrowhead {
		tip,
		left: tip - Point::from_angle(angle - FRAC_PI_6) * size,
		right: tip - Point::from_angle(angle + FRAC_PI_6) * size,
	}
}

/// Curve between two distinct node centres. `None` when the centres
/// coincide, since there is no direction to draw along.
pub fn curve(
	from: Point,
	to: Point,
	directed: bool,
	reciprocal: bool,
	config: &EditorConfig,
) -> Option<EdgeShape> {
	let dir = (to - from).normalized()?;
	let start = from + dir * config.node_radius;
	let end = to - dir * config.node_radius;
	let offset = if reciprocal { config.reciprocal_offset } else { 0.0 };
	let control = start.midpoint(end) + dir.perpendicular() * offset;
	let arrow = directed.then(|| arrowhead(end, (end - control).angle(), config.arrow_size));
	Some(EdgeShape::Curve {
		start,
		control,
		end,
		offset,
		label_at: control,
		arrow,
	})
}

/// Loop drawn above the node; its shape does not depend on where the node is
/// beyond a translation.
pub fn self_loop(at: Point, directed: bool, config: &EditorConfig) -> EdgeShape {
	let radius = config.loop_radius;
	let center = Point::new(at.x, at.y - config.loop_lift);
	let arrow = directed.then(|| {
		arrowhead(
			Point::new(center.x + radius, center.y),
			FRAC_PI_2,
			config.arrow_size,
		)
	});
	EdgeShape::Loop {
		center,
		radius,
		label_at: Point::new(center.x, center.y - radius - 10.0),
		arrow,
	}
}

/// Shape of `edge` against the current model. Reads only the endpoint
/// positions, the directed flag and whether the reverse edge exists.
pub fn layout_edge(model: &GraphModel, edge: &Edge, config: &EditorConfig) -> Option<EdgeShape> {
	let from = model.node(edge.from)?.position;
	if edge.is_loop() {
		return Some(self_loop(from, edge.directed, config));
	}
	let to = model.node(edge.to)?.position;
	curve(
		from,
		to,
		edge.directed,
		model.has_edge(edge.to, edge.from),
		config,
	)
}
