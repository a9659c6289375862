//! Rendering module
//!
//! `scene` builds triangle lists in world space on every target; `pipeline`
//! uploads and draws them with WebGPU.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::build_scene;
pub use vertex::Vertex;
