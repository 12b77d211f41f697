/// Edge colours. Each edge draws one of these at creation and keeps it.
pub const PALETTE: [&str; 9] = [
	"#c8c29e", "#e99897", "#abcbd3", "#ffc98d", "#e1d3b6", "#c0a290", "#ffb284", "#2a9d8f",
	"#ff9f1c",
];

/// Geometry and animation tuning for the editor surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EditorConfig {
	/// Node circle radius, also the pick radius.
	pub node_radius: f64,
	/// Radius of the circle drawn for a self-loop.
	pub loop_radius: f64,
	/// Vertical distance from a node's centre up to its loop's centre.
	pub loop_lift: f64,
	/// Perpendicular control-point offset for each edge of a reciprocal pair.
	pub reciprocal_offset: f64,
	/// Side length of arrowhead wings.
	pub arrow_size: f64,
	/// Scale a freshly placed node starts at.
	pub entry_scale: f64,
	/// Scale gained per animation frame.
	pub scale_step: f64,
}

impl Default for EditorConfig {
	fn default() -> Self {
		Self {
			node_radius: 30.0,
			loop_radius: 30.0,
			loop_lift: 50.0,
			reciprocal_offset: 40.0,
			arrow_size: 12.0,
			entry_scale: 0.2,
			scale_step: 0.08,
		}
	}
}
