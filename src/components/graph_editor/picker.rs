use super::geometry::Point;
use super::model::{GraphModel, NodeId};

/// First node in insertion order whose centre lies strictly within `radius`
/// of `point`. Earlier nodes win over nearer ones.
pub fn pick_node(model: &GraphModel, point: Point, radius: f64) -> Option<NodeId> {
	model
		.nodes()
		.iter()
		.find(|n| n.position.distance(point) < radius)
		.map(|n| n.id)
}
