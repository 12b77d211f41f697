mod animation;
mod component;
mod config;
mod geometry;
mod interaction;
mod layout;
mod matrix;
mod model;
mod picker;
mod render;
mod state;

pub use component::GraphEditorCanvas;
