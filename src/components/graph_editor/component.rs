use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent, Window};

use super::animation::FrameLoop;
use super::config::EditorConfig;
use super::geometry::Point;
use super::interaction::{Mode, Prompt, PromptResponse};
use super::matrix::AdjacencyMatrix;
use super::render;
use super::state::{EditorEvent, EditorState};

struct Surface {
	state: EditorState,
	ctx: CanvasRenderingContext2d,
	canvas: HtmlCanvasElement,
}

impl Surface {
	fn repaint(&self) {
		render::render(&self.state, &self.ctx);
		let _ = web_sys::HtmlElement::style(&self.canvas).set_property("cursor", self.state.cursor());
	}
}

fn canvas_point(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> Point {
	let rect = canvas.get_bounding_client_rect();
	Point::new(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

#[component]
pub fn GraphEditorCanvas(
	#[prop(default = EditorConfig::default())] config: EditorConfig,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let surface: Rc<RefCell<Option<Surface>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let frames = FrameLoop::new();

	let prompt = RwSignal::new(None::<Prompt>);
	let input = RwSignal::new(String::new());
	let directed = RwSignal::new(false);
	let matrix = RwSignal::new(None::<AdjacencyMatrix>);
	let help = RwSignal::new(false);

	let (surface_init, resize_cb_init) = (surface.clone(), resize_cb.clone());
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if surface_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window).unwrap_or((800.0, 600.0))
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into() {
				Ok(ctx) => ctx,
				Err(_) => {
					warn!("2d context has an unexpected type");
					return;
				}
			},
			_ => {
				warn!("canvas has no 2d context");
				return;
			}
		};
		info!("graph editor mounted at {}x{}", w, h);
		let s = Surface {
			state: EditorState::new(config, w, h),
			ctx,
			canvas: canvas.clone(),
		};
		s.repaint();
		*surface_init.borrow_mut() = Some(s);

		if fullscreen {
			let (surface_resize, canvas_resize) = (surface_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut s) = *surface_resize.borrow_mut() {
					s.state.resize(nw, nh);
					s.repaint();
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}
	});

	// Runs one event through the editor, repaints and mirrors the result into
	// the reactive dialog and report views.
	let dispatch = {
		let (surface, frames) = (surface.clone(), frames.clone());
		move |event: EditorEvent| {
			let reaction = {
				let mut guard = surface.borrow_mut();
				let Some(s) = guard.as_mut() else {
					return;
				};
				let reaction = s.state.handle(event);
				s.repaint();

				let next = &s.state.interaction.prompt;
				if prompt.with_untracked(|open| open != next) {
					if prompt.with_untracked(Option::is_none) {
						input.set(String::new());
					}
					prompt.set(next.clone());
				}
				if reaction.graph_changed && matrix.with_untracked(Option::is_some) {
					matrix.set(Some(AdjacencyMatrix::build(&s.state.model)));
				}
				reaction
			};

			if reaction.start_animation {
				let surface = surface.clone();
				frames.start(move || {
					let mut guard = surface.borrow_mut();
					let Some(s) = guard.as_mut() else {
						return false;
					};
					let growing = s.state.tick();
					s.repaint();
					growing
				});
			}
		}
	};

	let pointer = move |ev: &MouseEvent| {
		canvas_ref
			.get_untracked()
			.map(|canvas| canvas_point(&canvas, ev))
	};

	let d = dispatch.clone();
	let on_click = move |ev: MouseEvent| {
		if let Some(at) = pointer(&ev) {
			d(EditorEvent::Click(at));
		}
	};

	let d = dispatch.clone();
	let on_mousemove = move |ev: MouseEvent| {
		if let Some(at) = pointer(&ev) {
			d(EditorEvent::PointerMove(at));
		}
	};

	let d = dispatch.clone();
	let on_mouseleave = move |_: MouseEvent| d(EditorEvent::PointerLeave);

	let d = dispatch.clone();
	let on_mode = move |ev: web_sys::Event| {
		if let Some(mode) = Mode::from_key(&event_target_value(&ev)) {
			d(EditorEvent::SetMode(mode));
		}
	};

	let d = dispatch.clone();
	let confirm = move || {
		d(EditorEvent::Respond(PromptResponse::Confirmed {
			value: input.get_untracked(),
			directed: directed.get_untracked(),
		}))
	};
	let on_confirm = {
		let confirm = confirm.clone();
		move |_: MouseEvent| confirm()
	};
	let on_enter = move |ev: KeyboardEvent| {
		if ev.key() == "Enter" {
			confirm();
		}
	};

	let d = dispatch.clone();
	let on_cancel = move |_: MouseEvent| d(EditorEvent::Respond(PromptResponse::Cancelled));

	let d = dispatch;
	let on_clear = move |_: MouseEvent| {
		frames.cancel();
		d(EditorEvent::Clear);
	};

	let on_matrix = move |_: MouseEvent| {
		if matrix.with_untracked(Option::is_some) {
			matrix.set(None);
		} else if let Some(s) = surface.borrow().as_ref() {
			matrix.set(Some(AdjacencyMatrix::build(&s.state.model)));
		}
	};

	let open = move || prompt.with(Option::is_some);
	let shows_input = move || prompt.with(|p| p.as_ref().is_some_and(|p| p.show_input));
	let shows_toggle = move || prompt.with(|p| p.as_ref().is_some_and(|p| p.show_directed_toggle));

	view! {
		<div class="graph-editor">
			<div class="toolbar">
				<select class="mode-select" on:change=on_mode>
					{Mode::ALL
						.into_iter()
						.map(|mode| view! { <option value=mode.key()>{mode.label()}</option> })
						.collect_view()}
				</select>
				<button on:click=on_clear>"Clear"</button>
				<button on:click=on_matrix>"Matrix"</button>
				<button on:click=move |_| help.update(|h| *h = !*h)>"Help"</button>
			</div>

			<canvas
				node_ref=canvas_ref
				class="graph-editor-canvas"
				on:click=on_click
				on:mousemove=on_mousemove
				on:mouseleave=on_mouseleave
				style="display: block;"
			/>

			{move || matrix.get().map(|m| view! { <MatrixReport matrix=m /> })}
			{move || help.get().then(|| view! { <HelpOverlay /> })}

			<div class="modal" class:active=open>
				<div class="modal-content">
					<h3>{move || prompt.with(|p| p.as_ref().map(|p| p.title).unwrap_or_default())}</h3>
					<input
						class="modal-input"
						type=move || prompt.with(|p| p.as_ref().map_or("text", |p| p.kind.html_type()))
						style:display=move || if shows_input() { "block" } else { "none" }
						prop:value=move || input.get()
						on:input=move |ev| input.set(event_target_value(&ev))
						on:keydown=on_enter
					/>
					<label style:display=move || if shows_toggle() { "block" } else { "none" }>
						<input
							type="checkbox"
							prop:checked=move || directed.get()
							on:change=move |ev| directed.set(event_target_checked(&ev))
						/>
						" Directed"
					</label>
					<p class="modal-error">
						{move || prompt.with(|p| p.as_ref().and_then(|p| p.error.clone()).unwrap_or_default())}
					</p>
					<button on:click=on_confirm>"OK"</button>
					<button on:click=on_cancel>"Cancel"</button>
				</div>
			</div>
		</div>
	}
}

/// Adjacency matrix table with row sums, column sums and per-row edge counts.
#[component]
fn MatrixReport(matrix: AdjacencyMatrix) -> impl IntoView {
	if matrix.is_empty() {
		return view! { <div class="matrix-report"><p>"The graph has no nodes."</p></div> }
			.into_any();
	}
	let (rows, cols, counts) = (matrix.row_sums(), matrix.column_sums(), matrix.nonzero_counts());
	view! {
		<div class="matrix-report">
			<table>
				<thead>
					<tr>
						<th></th>
						{matrix.labels.iter().map(|l| view! { <th>{l.clone()}</th> }).collect_view()}
						<th>"Sum"</th>
						<th>"Edges"</th>
					</tr>
				</thead>
				<tbody>
					{matrix
						.cells
						.iter()
						.enumerate()
						.map(|(i, row)| {
							view! {
								<tr>
									<th>{matrix.labels[i].clone()}</th>
									{row.iter().map(|w| view! { <td>{w.to_string()}</td> }).collect_view()}
									<td>{rows[i].to_string()}</td>
									<td>{counts[i].to_string()}</td>
								</tr>
							}
						})
						.collect_view()}
					<tr>
						<th>"Sum"</th>
						{cols.iter().map(|w| view! { <td>{w.to_string()}</td> }).collect_view()}
						<td></td>
						<td></td>
					</tr>
				</tbody>
			</table>
		</div>
	}
	.into_any()
}

#[component]
fn HelpOverlay() -> impl IntoView {
	view! {
		<div class="help-overlay">
			<h2>"How to use"</h2>
			<ul>
				<li>"Add node: click anywhere on the canvas and enter a name."</li>
				<li>"Add edge: click the first node, then the second, and enter a weight. Tick \"Directed\" for an arrow. Clicking the same node twice makes a loop."</li>
				<li>"Delete node: click a node to remove it with all its edges."</li>
				<li>"Rename node: click a node and enter the new name."</li>
				<li>"Matrix: shows the weighted adjacency matrix of the current graph."</li>
			</ul>
		</div>
	}
}
