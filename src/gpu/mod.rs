//! wgpu device plumbing and per-clone GPU resources.

pub mod mesh;
pub mod render_context;

pub use mesh::{MeshBuffers, MeshVertex, TextureSet};
pub use render_context::{RenderContext, RenderContextError};
