// Crate-wide lint policy lives in [lints] in Cargo.toml.

//! GPU-accelerated 3D asset showroom engine built on wgpu.
//!
//! Vitrine takes arbitrary glTF assets — any scale, any origin, any unit
//! convention — and presents them uniformly: normalized into a fixed frame,
//! placed on a proportionally sized platform under a studio lighting rig,
//! introduced with an entrance animation, and framed by a camera that
//! converges onto every new model before handing control to the user.
//!
//! # Key entry points
//!
//! - [`engine::ShowroomEngine`] - the top-level facade hosts embed
//! - [`scene::DisplayClone`] - the displayed per-model instance
//! - [`options::ViewerOptions`] - persistent viewer settings
//! - [`normalize`] - the fit-to-frame measurement pipeline
//!
//! # Architecture
//!
//! Decoded assets live in a reference-counted cache as immutable
//! [`asset::SceneGraph`]s. Displaying one clones it into a
//! [`scene::DisplayClone`] carrying per-instance materials and GPU
//! resources, so material overrides and disposal never touch the cached
//! decode. A generation-stamped load protocol keeps rapid swap requests
//! honest: stale decodes are discarded, and each replaced clone releases
//! its GPU resources exactly once.
//!
//! The engine itself renders nothing. A host drives [`engine::ShowroomEngine::tick`]
//! from its own render loop and reads back the clone, camera, platform,
//! lighting, and annotation state each frame.

pub mod animation;
pub mod annotation;
pub mod asset;
pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod lighting;
pub mod material;
pub mod normalize;
pub mod options;
pub mod picking;
pub mod platform;
pub mod scene;
pub mod util;
