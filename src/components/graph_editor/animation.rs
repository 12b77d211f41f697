use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::prelude::*;

use super::model::GraphModel;

/// One growth step for a single node scale, capped at full size.
pub fn grow(scale: f64, step: f64) -> f64 {
	(scale + step).min(1.0)
}

/// Grows every node that has not reached full size. Returns whether any
/// node is still below full size afterwards.
pub fn advance(model: &mut GraphModel, step: f64) -> bool {
	let mut growing = false;
	for node in model.nodes_mut() {
		if node.scale < 1.0 {
			node.scale = grow(node.scale, step);
			growing |= node.scale < 1.0;
		}
	}
	growing
}

struct LoopInner {
	handle: Option<i32>,
	callback: Option<Closure<dyn FnMut()>>,
}

/// `requestAnimationFrame` loop that runs `frame` until it returns `false`
/// or the loop is cancelled. Starting a running loop is a no-op.
#[derive(Clone)]
pub struct FrameLoop {
	inner: Rc<RefCell<LoopInner>>,
}

impl FrameLoop {
	pub fn new() -> Self {
		Self {
			inner: Rc::new(RefCell::new(LoopInner {
				handle: None,
				callback: None,
			})),
		}
	}

	pub fn is_running(&self) -> bool {
		self.inner.borrow().handle.is_some()
	}

	pub fn start(&self, mut frame: impl FnMut() -> bool + 'static) {
		if self.is_running() {
			return;
		}
		let weak = Rc::downgrade(&self.inner);
		let callback = Closure::<dyn FnMut()>::new(move || {
			let Some(inner) = weak.upgrade() else {
				return;
			};
			inner.borrow_mut().handle = None;
			if frame() {
				schedule(&inner);
			} else {
				debug!("frame loop finished");
			}
		});
		self.inner.borrow_mut().callback = Some(callback);
		schedule(&self.inner);
	}

	pub fn cancel(&self) {
		if let Some(handle) = self.inner.borrow_mut().take_pending() {
			cancel_frame(handle);
			debug!("frame loop cancelled");
		}
	}
}

impl LoopInner {
	fn take_pending(&mut self) -> Option<i32> {
		self.handle.take()
	}
}

// The callback is freed with the loop, so a frame still queued must not fire.
impl Drop for LoopInner {
	fn drop(&mut self) {
		if let Some(handle) = self.take_pending() {
			cancel_frame(handle);
			debug!("frame loop dropped with a pending frame");
		}
	}
}

fn cancel_frame(handle: i32) {
	if let Some(window) = web_sys::window() {
		let _ = window.cancel_animation_frame(handle);
	}
}

fn schedule(inner: &Rc<RefCell<LoopInner>>) {
	let Some(window) = web_sys::window() else {
		return;
	};
	let mut guard = inner.borrow_mut();
	let Some(cb) = guard.callback.as_ref() else {
		return;
	};
	match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
		Ok(handle) => guard.handle = Some(handle),
		Err(err) => warn!("requestAnimationFrame failed: {:?}", err),
	}
}
