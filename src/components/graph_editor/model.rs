use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use super::config::PALETTE;
use super::geometry::Point;

/// Stable handle for a node. Handles are never reused, so a handle to a
/// deleted node simply stops resolving.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

/// Rejected user actions. The display text is what the dialog shows.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum GraphError {
	#[error("The field cannot be empty.")]
	EmptyInput,
	#[error("Enter a positive number.")]
	InvalidWeight,
	#[error("The edge already exists.")]
	DuplicateEdge,
	#[error("The node no longer exists.")]
	UnknownNode,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	pub id: NodeId,
	pub position: Point,
	pub label: String,
	/// Entry animation scale in `0.0..=1.0`.
	pub scale: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
	pub from: NodeId,
	pub to: NodeId,
	pub weight: f64,
	pub directed: bool,
	pub color: &'static str,
}

impl Edge {
	pub fn is_loop(&self) -> bool {
		self.from == self.to
	}

	pub fn touches(&self, id: NodeId) -> bool {
		self.from == id || self.to == id
	}
}

/// Owns the nodes and edges of the diagram, both kept in insertion order.
pub struct GraphModel {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
	next_id: u64,
	entry_scale: f64,
	rng: StdRng,
}

impl GraphModel {
	pub fn new(entry_scale: f64) -> Self {
		Self::with_rng(entry_scale, StdRng::from_entropy())
	}

	pub fn with_rng(entry_scale: f64, rng: StdRng) -> Self {
		Self {
			nodes: Vec::new(),
			edges: Vec::new(),
			next_id: 0,
			entry_scale: entry_scale.clamp(0.0, 1.0),
			rng,
		}
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	pub fn node(&self, id: NodeId) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id)
	}

	pub fn contains(&self, id: NodeId) -> bool {
		self.node(id).is_some()
	}

	/// Position of the node in insertion order.
	pub fn index_of(&self, id: NodeId) -> Option<usize> {
		self.nodes.iter().position(|n| n.id == id)
	}

	pub fn has_edge(&self, from: NodeId, to: NodeId) -> bool {
		self.edges.iter().any(|e| e.from == from && e.to == to)
	}

	pub fn add_node(&mut self, position: Point, label: &str) -> Result<NodeId, GraphError> {
		let label = validate_label(label)?;
		let id = NodeId(self.next_id);
		self.next_id += 1;
		info!("node {:?} '{}' placed at ({:.0}, {:.0})", id, label, position.x, position.y);
		self.nodes.push(Node {
			id,
			position,
			label,
			scale: self.entry_scale,
		});
		Ok(id)
	}

	pub fn rename_node(&mut self, id: NodeId, label: &str) -> Result<(), GraphError> {
		let label = validate_label(label)?;
		let node = self
			.nodes
			.iter_mut()
			.find(|n| n.id == id)
			.ok_or(GraphError::UnknownNode)?;
		info!("node {:?} renamed '{}' -> '{}'", id, node.label, label);
		node.label = label;
		Ok(())
	}

	/// Removes the node together with every edge touching it. Returns the
	/// number of edges removed.
	pub fn delete_node(&mut self, id: NodeId) -> Result<usize, GraphError> {
		let idx = self.index_of(id).ok_or(GraphError::UnknownNode)?;
		let node = self.nodes.remove(idx);
		let before = self.edges.len();
		self.edges.retain(|e| !e.touches(id));
		let removed = before - self.edges.len();
		info!("node {:?} '{}' deleted with {} edge(s)", id, node.label, removed);
		Ok(removed)
	}

	pub fn add_edge(
		&mut self,
		from: NodeId,
		to: NodeId,
		weight: f64,
		directed: bool,
	) -> Result<(), GraphError> {
		if !self.contains(from) || !self.contains(to) {
			return Err(GraphError::UnknownNode);
		}
		if self.has_edge(from, to) {
			warn!("edge {:?} -> {:?} already exists", from, to);
			return Err(GraphError::DuplicateEdge);
		}
		if !weight.is_finite() || weight <= 0.0 {
			warn!("rejected edge weight {}", weight);
			return Err(GraphError::InvalidWeight);
		}
		let color = PALETTE[self.rng.gen_range(0..PALETTE.len())];
		info!(
			"edge {:?} -> {:?} added (weight {}, directed {}, {})",
			from, to, weight, directed, color
		);
		self.edges.push(Edge {
			from,
			to,
			weight,
			directed,
			color,
		});
		Ok(())
	}

	pub fn clear(&mut self) {
		info!(
			"graph cleared ({} nodes, {} edges)",
			self.nodes.len(),
			self.edges.len()
		);
		self.nodes.clear();
		self.edges.clear();
	}

	pub(super) fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
		self.nodes.iter_mut()
	}
}

/// Trimmed label, rejected when nothing is left.
pub fn validate_label(value: &str) -> Result<String, GraphError> {
	let value = value.trim();
	if value.is_empty() {
		return Err(GraphError::EmptyInput);
	}
	Ok(value.to_string())
}
