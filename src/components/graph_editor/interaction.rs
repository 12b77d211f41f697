use super::geometry::Point;
use super::model::{GraphError, NodeId};

/// What a click on the canvas does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
	#[default]
	PlaceNode,
	PlaceEdge,
	Delete,
	Rename,
}

impl Mode {
	pub const ALL: [Mode; 4] = [Mode::PlaceNode, Mode::PlaceEdge, Mode::Delete, Mode::Rename];

	pub fn key(self) -> &'static str {
		match self {
			Mode::PlaceNode => "node",
			Mode::PlaceEdge => "edge",
			Mode::Delete => "delete",
			Mode::Rename => "rename",
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			Mode::PlaceNode => "Add node",
			Mode::PlaceEdge => "Add edge",
			Mode::Delete => "Delete node",
			Mode::Rename => "Rename node",
		}
	}

	pub fn from_key(key: &str) -> Option<Mode> {
		Mode::ALL.into_iter().find(|m| m.key() == key)
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
	Text,
	Number,
}

impl InputKind {
	pub fn html_type(self) -> &'static str {
		match self {
			InputKind::Text => "text",
			InputKind::Number => "number",
		}
	}
}

/// What a confirmed dialog value will be used for. Carries the handles it
/// acts on so the dialog does not depend on the pending-endpoint slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PromptPurpose {
	NodeLabel { at: Point },
	EdgeWeight { from: NodeId, to: NodeId },
	Rename { node: NodeId },
	Notice,
}

/// An open modal dialog.
#[derive(Clone, Debug, PartialEq)]
pub struct Prompt {
	pub title: &'static str,
	pub kind: InputKind,
	pub show_input: bool,
	pub show_directed_toggle: bool,
	pub purpose: PromptPurpose,
	/// Inline message shown under the input.
	pub error: Option<String>,
}

impl Prompt {
	pub fn node_label(at: Point) -> Self {
		Self {
			title: "Node name",
			kind: InputKind::Text,
			show_input: true,
			show_directed_toggle: false,
			purpose: PromptPurpose::NodeLabel { at },
			error: None,
		}
	}

	pub fn edge_weight(from: NodeId, to: NodeId) -> Self {
		Self {
			title: "Edge weight",
			kind: InputKind::Number,
			show_input: true,
			show_directed_toggle: true,
			purpose: PromptPurpose::EdgeWeight { from, to },
			error: None,
		}
	}

	pub fn rename(node: NodeId) -> Self {
		Self {
			title: "New node name",
			kind: InputKind::Text,
			show_input: true,
			show_directed_toggle: false,
			purpose: PromptPurpose::Rename { node },
			error: None,
		}
	}

	pub fn warning(err: GraphError) -> Self {
		Self {
			title: "Warning",
			kind: InputKind::Text,
			show_input: false,
			show_directed_toggle: false,
			purpose: PromptPurpose::Notice,
			error: Some(err.to_string()),
		}
	}
}

/// How the user closed a dialog.
#[derive(Clone, Debug, PartialEq)]
pub enum PromptResponse {
	Confirmed { value: String, directed: bool },
	Cancelled,
}

/// Transient UI state around the model. Never holds anything the model
/// owns, only handles into it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InteractionState {
	pub mode: Mode,
	pub hovered: Option<NodeId>,
	pub active: Option<NodeId>,
	/// First endpoint of the edge being created.
	pub pending: Option<NodeId>,
	pub prompt: Option<Prompt>,
}

impl InteractionState {
	/// Drops every provisional selection and any open dialog.
	pub fn reset(&mut self) {
		self.hovered = None;
		self.active = None;
		self.pending = None;
		self.prompt = None;
	}

	pub fn release_selection(&mut self) {
		self.active = None;
		self.pending = None;
	}

	/// Switches mode. Selection survives only while a dialog still needs it.
	pub fn set_mode(&mut self, mode: Mode) {
		self.mode = mode;
		if self.prompt.is_none() {
			self.release_selection();
		}
	}

	/// Forgets handles to a node that has left the model.
	pub fn forget(&mut self, id: NodeId) {
		for slot in [&mut self.hovered, &mut self.active, &mut self.pending] {
			if *slot == Some(id) {
				*slot = None;
			}
		}
	}
}

/// Parses a dialog value into an edge weight.
pub fn validate_weight(value: &str) -> Result<f64, GraphError> {
	let value = value.trim();
	if value.is_empty() {
		return Err(GraphError::EmptyInput);
	}
	match value.parse::<f64>() {
		Ok(w) if w.is_finite() && w > 0.0 => Ok(w),
		_ => Err(GraphError::InvalidWeight),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn weight_validation() {
		assert_eq!(validate_weight(" 2.5 "), Ok(2.5));
		assert_eq!(validate_weight(""), Err(GraphError::EmptyInput));
		assert_eq!(validate_weight("0"), Err(GraphError::InvalidWeight));
		assert_eq!(validate_weight("-3"), Err(GraphError::InvalidWeight));
		assert_eq!(validate_weight("abc"), Err(GraphError::InvalidWeight));
		assert_eq!(validate_weight("inf"), Err(GraphError::InvalidWeight));
	}

	#[test]
	fn mode_keys_round_trip() {
		for mode in Mode::ALL {
			assert_eq!(Mode::from_key(mode.key()), Some(mode));
		}
		assert_eq!(Mode::from_key("zoom"), None);
	}

	#[test]
	fn warning_prompt_has_no_input() {
		let p = Prompt::warning(GraphError::DuplicateEdge);
		assert!(!p.show_input);
		assert_eq!(p.error.as_deref(), Some("The edge already exists."));
	}
}
