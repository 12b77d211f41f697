use log::{debug, warn};

use super::animation;
use super::config::EditorConfig;
use super::geometry::Point;
use super::interaction::{InteractionState, Mode, Prompt, PromptPurpose, PromptResponse, validate_weight};
use super::model::{GraphError, GraphModel};
use super::picker::pick_node;

/// Input the editor reacts to. Canvas coordinates are already relative to
/// the canvas origin.
#[derive(Clone, Debug, PartialEq)]
pub enum EditorEvent {
	PointerMove(Point),
	PointerLeave,
	Click(Point),
	SetMode(Mode),
	Respond(PromptResponse),
	Clear,
}

/// What the host must do after an event besides repainting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Reaction {
	/// The model changed, so derived views are stale.
	pub graph_changed: bool,
	/// A node was added and should grow in.
	pub start_animation: bool,
}

impl Reaction {
	const CHANGED: Reaction = Reaction {
		graph_changed: true,
		start_animation: false,
	};
}

pub struct EditorState {
	pub model: GraphModel,
	pub interaction: InteractionState,
	pub config: EditorConfig,
	pub width: f64,
	pub height: f64,
}

impl EditorState {
	pub fn new(config: EditorConfig, width: f64, height: f64) -> Self {
		Self::with_model(GraphModel::new(config.entry_scale), config, width, height)
	}

	pub fn with_model(model: GraphModel, config: EditorConfig, width: f64, height: f64) -> Self {
		Self {
			model,
			interaction: InteractionState::default(),
			config,
			width,
			height,
		}
	}

	pub fn handle(&mut self, event: EditorEvent) -> Reaction {
		match event {
			EditorEvent::PointerMove(at) => {
				self.interaction.hovered = pick_node(&self.model, at, self.config.node_radius);
				Reaction::default()
			}
			EditorEvent::PointerLeave => {
				self.interaction.hovered = None;
				Reaction::default()
			}
			EditorEvent::Click(at) => self.click(at),
			EditorEvent::SetMode(mode) => {
				debug!("mode -> {:?}", mode);
				self.interaction.set_mode(mode);
				Reaction::default()
			}
			EditorEvent::Respond(response) => self.respond(response),
			EditorEvent::Clear => {
				self.model.clear();
				self.interaction.reset();
				Reaction::CHANGED
			}
		}
	}

	fn click(&mut self, at: Point) -> Reaction {
		if self.interaction.prompt.is_some() {
			debug!("click ignored while a dialog is open");
			return Reaction::default();
		}
		let hit = pick_node(&self.model, at, self.config.node_radius);
		let ui = &mut self.interaction;
		match ui.mode {
			Mode::PlaceNode => {
				ui.active = None;
				ui.prompt = Some(Prompt::node_label(at));
			}
			Mode::PlaceEdge => {
				let Some(node) = hit else {
					return Reaction::default();
				};
				match ui.pending {
					None => {
						ui.pending = Some(node);
						ui.active = Some(node);
					}
					Some(from) if self.model.has_edge(from, node) => {
						warn!("edge {:?} -> {:?} already exists", from, node);
						ui.release_selection();
						ui.prompt = Some(Prompt::warning(GraphError::DuplicateEdge));
					}
					Some(from) => ui.prompt = Some(Prompt::edge_weight(from, node)),
				}
			}
			Mode::Delete => {
				let Some(node) = hit else {
					return Reaction::default();
				};
				if let Err(err) = self.model.delete_node(node) {
					warn!("delete failed: {}", err);
					return Reaction::default();
				}
				ui.forget(node);
				return Reaction::CHANGED;
			}
			Mode::Rename => {
				if let Some(node) = hit {
					ui.prompt = Some(Prompt::rename(node));
				}
			}
		}
		Reaction::default()
	}

	fn respond(&mut self, response: PromptResponse) -> Reaction {
		let Some(prompt) = self.interaction.prompt.take() else {
			return Reaction::default();
		};
		let PromptResponse::Confirmed { value, directed } = response else {
			debug!("dialog '{}' cancelled", prompt.title);
			self.interaction.release_selection();
			return Reaction::default();
		};

		let result = match prompt.purpose {
			PromptPurpose::NodeLabel { at } => self.model.add_node(at, &value).map(|_| Reaction {
				graph_changed: true,
				start_animation: true,
			}),
			PromptPurpose::EdgeWeight { from, to } => validate_weight(&value)
				.and_then(|w| self.model.add_edge(from, to, w, directed))
				.map(|()| Reaction::CHANGED),
			PromptPurpose::Rename { node } => {
				self.model.rename_node(node, &value).map(|()| Reaction::CHANGED)
			}
			PromptPurpose::Notice => Ok(Reaction::default()),
		};

		match result {
			Ok(reaction) => {
				self.interaction.release_selection();
				reaction
			}
			Err(err @ (GraphError::EmptyInput | GraphError::InvalidWeight)) => {
				warn!("'{}' rejected: {}", prompt.title, err);
				self.interaction.prompt = Some(Prompt {
					error: Some(err.to_string()),
					..prompt
				});
				Reaction::default()
			}
			Err(err) => {
				warn!("'{}' failed: {}", prompt.title, err);
				self.interaction.release_selection();
				self.interaction.prompt = Some(Prompt::warning(err));
				Reaction::default()
			}
		}
	}

	/// Advances the entry animation by one frame. Returns whether another
	/// frame is needed.
	pub fn tick(&mut self) -> bool {
		animation::advance(&mut self.model, self.config.scale_step)
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	pub fn cursor(&self) -> &'static str {
		if self.interaction.hovered.is_some() {
			"pointer"
		} else {
			"default"
		}
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;
	use crate::components::graph_editor::model::NodeId;

	fn editor() -> EditorState {
		let config = EditorConfig::default();
		let model = GraphModel::with_rng(config.entry_scale, StdRng::seed_from_u64(11));
		EditorState::with_model(model, config, 800.0, 600.0)
	}

	fn confirm(value: &str, directed: bool) -> EditorEvent {
		EditorEvent::Respond(PromptResponse::Confirmed {
			value: value.to_string(),
			directed,
		})
	}

	fn place(ed: &mut EditorState, x: f64, y: f64, label: &str) -> NodeId {
		ed.handle(EditorEvent::SetMode(Mode::PlaceNode));
		ed.handle(EditorEvent::Click(Point::new(x, y)));
		let reaction = ed.handle(confirm(label, false));
		assert!(reaction.graph_changed && reaction.start_animation);
		ed.model.nodes().last().unwrap().id
	}

	#[test]
	fn cancelling_node_dialog_adds_nothing() {
		let mut ed = editor();
		ed.handle(EditorEvent::Click(Point::new(50.0, 50.0)));
		assert!(ed.interaction.prompt.is_some());
		let reaction = ed.handle(EditorEvent::Respond(PromptResponse::Cancelled));
		assert_eq!(reaction, Reaction::default());
		assert!(ed.model.nodes().is_empty());
		assert_eq!(ed.interaction.active, None);
		assert!(ed.interaction.prompt.is_none());
	}

	#[test]
	fn empty_label_keeps_dialog_open_with_message() {
		let mut ed = editor();
		ed.handle(EditorEvent::Click(Point::new(50.0, 50.0)));
		ed.handle(confirm("   ", false));
		let prompt = ed.interaction.prompt.as_ref().expect("dialog stays open");
		assert_eq!(prompt.error.as_deref(), Some("The field cannot be empty."));
		assert!(ed.model.nodes().is_empty());

		ed.handle(confirm("A", false));
		assert!(ed.interaction.prompt.is_none());
		assert_eq!(ed.model.nodes()[0].label, "A");
		assert_eq!(ed.model.nodes()[0].position, Point::new(50.0, 50.0));
	}

	#[test]
	fn edge_creation_flow() {
		let mut ed = editor();
		let a = place(&mut ed, 100.0, 100.0, "A");
		let b = place(&mut ed, 300.0, 100.0, "B");
		ed.handle(EditorEvent::SetMode(Mode::PlaceEdge));

		ed.handle(EditorEvent::Click(Point::new(200.0, 300.0)));
		assert_eq!(ed.interaction.pending, None);

		ed.handle(EditorEvent::Click(Point::new(105.0, 95.0)));
		assert_eq!(ed.interaction.pending, Some(a));
		assert_eq!(ed.interaction.active, Some(a));

		ed.handle(EditorEvent::Click(Point::new(300.0, 110.0)));
		let prompt = ed.interaction.prompt.as_ref().unwrap();
		assert!(prompt.show_directed_toggle);
		assert_eq!(prompt.purpose, PromptPurpose::EdgeWeight { from: a, to: b });

		ed.handle(confirm("abc", true));
		assert_eq!(
			ed.interaction.prompt.as_ref().and_then(|p| p.error.as_deref()),
			Some("Enter a positive number.")
		);
		assert_eq!(ed.interaction.pending, Some(a));
		assert!(ed.model.edges().is_empty());

		let reaction = ed.handle(confirm("4.5", true));
		assert!(reaction.graph_changed);
		assert_eq!(ed.model.edges().len(), 1);
		let edge = &ed.model.edges()[0];
		assert_eq!((edge.from, edge.to, edge.weight, edge.directed), (a, b, 4.5, true));
		assert_eq!(ed.interaction.pending, None);
		assert_eq!(ed.interaction.active, None);
	}

	#[test]
	fn duplicate_edge_warns_and_resets() {
		let mut ed = editor();
		let a = place(&mut ed, 100.0, 100.0, "A");
		let b = place(&mut ed, 300.0, 100.0, "B");
		ed.model.add_edge(a, b, 1.0, false).unwrap();
		ed.handle(EditorEvent::SetMode(Mode::PlaceEdge));
		ed.handle(EditorEvent::Click(Point::new(100.0, 100.0)));
		ed.handle(EditorEvent::Click(Point::new(300.0, 100.0)));

		let prompt = ed.interaction.prompt.as_ref().unwrap();
		assert!(!prompt.show_input);
		assert_eq!(prompt.purpose, PromptPurpose::Notice);
		assert_eq!(ed.interaction.pending, None);
		assert_eq!(ed.interaction.active, None);

		ed.handle(confirm("", false));
		assert!(ed.interaction.prompt.is_none());
		assert_eq!(ed.model.edges().len(), 1);
	}

	#[test]
	fn cancelling_weight_dialog_resets_selection() {
		let mut ed = editor();
		place(&mut ed, 100.0, 100.0, "A");
		place(&mut ed, 300.0, 100.0, "B");
		ed.handle(EditorEvent::SetMode(Mode::PlaceEdge));
		ed.handle(EditorEvent::Click(Point::new(100.0, 100.0)));
		ed.handle(EditorEvent::Click(Point::new(300.0, 100.0)));
		ed.handle(EditorEvent::Respond(PromptResponse::Cancelled));
		assert!(ed.model.edges().is_empty());
		assert_eq!(ed.interaction.pending, None);
		assert_eq!(ed.interaction.active, None);
	}

	#[test]
	fn clicks_while_dialog_open_leave_pending_endpoint_alone() {
		let mut ed = editor();
		let a = place(&mut ed, 100.0, 100.0, "A");
		let b = place(&mut ed, 300.0, 100.0, "B");
		ed.handle(EditorEvent::SetMode(Mode::PlaceEdge));
		ed.handle(EditorEvent::Click(Point::new(100.0, 100.0)));
		ed.handle(EditorEvent::Click(Point::new(300.0, 100.0)));

		ed.handle(EditorEvent::Click(Point::new(300.0, 100.0)));
		ed.handle(EditorEvent::PointerMove(Point::new(300.0, 100.0)));
		assert_eq!(ed.interaction.pending, Some(a));
		assert_eq!(ed.interaction.hovered, Some(b));

		ed.handle(confirm("2", false));
		assert!(ed.model.has_edge(a, b));
	}

	#[test]
	fn self_loop_through_two_clicks_on_one_node() {
		let mut ed = editor();
		let a = place(&mut ed, 100.0, 100.0, "A");
		ed.handle(EditorEvent::SetMode(Mode::PlaceEdge));
		ed.handle(EditorEvent::Click(Point::new(100.0, 100.0)));
		ed.handle(EditorEvent::Click(Point::new(100.0, 100.0)));
		ed.handle(confirm("5", true));
		assert!(ed.model.has_edge(a, a));
	}

	#[test]
	fn delete_mode_cascades_and_forgets_handles() {
		let mut ed = editor();
		let a = place(&mut ed, 100.0, 100.0, "A");
		let b = place(&mut ed, 300.0, 100.0, "B");
		let c = place(&mut ed, 500.0, 100.0, "C");
		ed.model.add_edge(a, b, 1.0, true).unwrap();
		ed.model.add_edge(b, c, 1.0, true).unwrap();
		ed.model.add_edge(c, a, 1.0, true).unwrap();

		ed.handle(EditorEvent::PointerMove(Point::new(300.0, 100.0)));
		ed.handle(EditorEvent::SetMode(Mode::Delete));
		let reaction = ed.handle(EditorEvent::Click(Point::new(300.0, 100.0)));
		assert!(reaction.graph_changed);
		assert_eq!(ed.model.nodes().len(), 2);
		assert_eq!(ed.model.edges().len(), 1);
		assert!(ed.model.has_edge(c, a));
		assert_eq!(ed.interaction.hovered, None);
	}

	#[test]
	fn rename_mode_updates_label() {
		let mut ed = editor();
		let a = place(&mut ed, 100.0, 100.0, "A");
		ed.handle(EditorEvent::SetMode(Mode::Rename));
		ed.handle(EditorEvent::Click(Point::new(100.0, 100.0)));
		assert_eq!(
			ed.interaction.prompt.as_ref().map(|p| p.purpose),
			Some(PromptPurpose::Rename { node: a })
		);
		// Only a pending edge endpoint is drawn as active.
		assert_eq!(ed.interaction.active, None);
		ed.handle(confirm("", false));
		assert!(ed.interaction.prompt.is_some());
		ed.handle(confirm("Hub", false));
		assert_eq!(ed.model.node(a).unwrap().label, "Hub");
		assert_eq!(ed.interaction.active, None);
	}

	#[test]
	fn mode_switch_drops_pending_endpoint() {
		let mut ed = editor();
		place(&mut ed, 100.0, 100.0, "A");
		ed.handle(EditorEvent::SetMode(Mode::PlaceEdge));
		ed.handle(EditorEvent::Click(Point::new(100.0, 100.0)));
		ed.handle(EditorEvent::SetMode(Mode::PlaceNode));
		assert_eq!(ed.interaction.pending, None);
		assert_eq!(ed.interaction.active, None);
	}

	#[test]
	fn clear_resets_model_and_selection() {
		let mut ed = editor();
		place(&mut ed, 100.0, 100.0, "A");
		ed.handle(EditorEvent::SetMode(Mode::PlaceEdge));
		ed.handle(EditorEvent::Click(Point::new(100.0, 100.0)));
		assert!(ed.handle(EditorEvent::Clear).graph_changed);
		assert!(ed.model.nodes().is_empty());
		assert_eq!(ed.interaction, InteractionState {
			mode: Mode::PlaceEdge,
			..InteractionState::default()
		});
	}

	#[test]
	fn hover_drives_cursor() {
		let mut ed = editor();
		place(&mut ed, 100.0, 100.0, "A");
		ed.handle(EditorEvent::PointerMove(Point::new(110.0, 110.0)));
		assert_eq!(ed.cursor(), "pointer");
		ed.handle(EditorEvent::PointerLeave);
		assert_eq!(ed.cursor(), "default");
	}

	#[test]
	fn new_nodes_grow_to_full_size() {
		let mut ed = editor();
		place(&mut ed, 100.0, 100.0, "A");
		assert!(ed.model.nodes()[0].scale < 1.0);
		while ed.tick() {}
		assert_eq!(ed.model.nodes()[0].scale, 1.0);
	}
}
