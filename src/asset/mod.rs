//! Decoded asset data: immutable scene graphs produced by the loader.
//!
//! A [`SceneGraph`] is the output of decoding one asset file. It is shared
//! (behind an `Arc`) between the decode cache and any display clone built
//! from it, and is never mutated after decoding. Geometry is stored once
//! and referenced by clones; only material parameters are copied per clone
//! so overrides cannot leak back into the cache.

pub mod cache;
pub mod loader;

pub use cache::AssetCache;

use std::sync::Arc;

use glam::{Mat4, Vec3};

// ---------------------------------------------------------------------------
// Bounding box
// ---------------------------------------------------------------------------

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// The empty box: grows to fit the first point added to it.
    pub const EMPTY: Aabb = Aabb {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    /// Whether no point has been added yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x
    }

    /// Grow the box to include `p`.
    pub fn union_point(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Grow the box to include all of `other`.
    pub fn union(&mut self, other: &Aabb) {
        if !other.is_empty() {
            self.min = self.min.min(other.min);
            self.max = self.max.max(other.max);
        }
    }

    /// Per-axis extent. Zero for the empty box.
    #[must_use]
    pub fn size(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            self.max - self.min
        }
    }

    /// Center point. Origin for the empty box.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            (self.min + self.max) * 0.5
        }
    }

    /// Largest extent across the three axes.
    #[must_use]
    pub fn max_dim(&self) -> f32 {
        let s = self.size();
        s.x.max(s.y).max(s.z)
    }

    /// The box containing all 8 corners transformed by `m`.
    ///
    /// This is conservative (the transformed box bounds the transformed
    /// corners, not the transformed geometry exactly), which matches how
    /// scene-graph bounds are accumulated node by node.
    #[must_use]
    pub fn transformed(&self, m: &Mat4) -> Aabb {
        if self.is_empty() {
            return *self;
        }
        let mut out = Aabb::EMPTY;
        for i in 0..8 {
            let corner = Vec3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            );
            out.union_point(m.transform_point3(corner));
        }
        out
    }

    /// Tight box around a set of points.
    #[must_use]
    pub fn from_points(points: &[Vec3]) -> Aabb {
        let mut out = Aabb::EMPTY;
        for &p in points {
            out.union_point(p);
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Textures and materials
// ---------------------------------------------------------------------------

/// Decoded texture pixels (always RGBA8).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureData {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Tightly packed RGBA8 pixel data (`width * height * 4` bytes).
    pub pixels: Vec<u8>,
}

/// The texture slots a material can carry. Every slot participates in GPU
/// resource disposal on asset swap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextureMaps {
    /// Base color map.
    pub color: Option<Arc<TextureData>>,
    /// Tangent-space normal map.
    pub normal: Option<Arc<TextureData>>,
    /// Roughness map.
    pub roughness: Option<Arc<TextureData>>,
    /// Metalness map.
    pub metalness: Option<Arc<TextureData>>,
    /// Emissive map.
    pub emissive: Option<Arc<TextureData>>,
    /// Ambient-occlusion map.
    pub occlusion: Option<Arc<TextureData>>,
}

/// Material parameters for one slot as decoded from the asset.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialData {
    /// Base color (linear RGB).
    pub base_color: [f32; 3],
    /// Metalness factor in [0, 1].
    pub metalness: f32,
    /// Roughness factor in [0, 1].
    pub roughness: f32,
    /// Emissive intensity.
    pub emissive_intensity: f32,
    /// Opacity in [0, 1].
    pub opacity: f32,
    /// Texture slots.
    pub maps: TextureMaps,
}

impl Default for MaterialData {
    fn default() -> Self {
        Self {
            base_color: [1.0, 1.0, 1.0],
            metalness: 0.5,
            roughness: 0.5,
            emissive_intensity: 0.0,
            opacity: 1.0,
            maps: TextureMaps::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Geometry and nodes
// ---------------------------------------------------------------------------

/// Indexed triangle geometry for one mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryData {
    /// Vertex positions.
    pub positions: Vec<Vec3>,
    /// Vertex normals (same length as `positions`).
    pub normals: Vec<Vec3>,
    /// Triangle indices (length divisible by 3).
    pub indices: Vec<u32>,
    /// Bounding box of `positions` in mesh-local space.
    pub local_aabb: Aabb,
}

impl GeometryData {
    /// Build geometry from raw attributes, computing the local bounding box.
    #[must_use]
    pub fn new(positions: Vec<Vec3>, normals: Vec<Vec3>, indices: Vec<u32>) -> Self {
        let local_aabb = Aabb::from_points(&positions);
        Self {
            positions,
            normals,
            indices,
            local_aabb,
        }
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// A renderable mesh: shared geometry plus per-slot material parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    /// Triangle geometry, shared with every clone of this graph.
    pub geometry: Arc<GeometryData>,
    /// Material parameters, one entry per slot.
    pub materials: Vec<MaterialData>,
}

/// One node of a decoded scene graph.
///
/// Nodes are stored flat in depth-first order, so a parent always precedes
/// its children and world transforms can be accumulated in one pass.
#[derive(Debug, Clone)]
pub struct SceneNode {
    /// Node name from the asset (may be empty).
    pub name: String,
    /// Local transform relative to the parent.
    pub local: Mat4,
    /// Index of the parent node, `None` for roots.
    pub parent: Option<usize>,
    /// Mesh attached to this node, if any.
    pub mesh: Option<MeshData>,
}

/// A decoded scene graph: the immutable result of loading one asset.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    /// Flat node list, parents before children.
    pub nodes: Vec<SceneNode>,
}

impl SceneGraph {
    /// World transform of every node (parent transforms folded in).
    #[must_use]
    pub fn world_transforms(&self) -> Vec<Mat4> {
        let mut out = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let world = match node.parent {
                Some(p) => out[p] * node.local,
                None => node.local,
            };
            out.push(world);
        }
        out
    }

    /// Bounding box of all mesh geometry under the given root transform.
    #[must_use]
    pub fn bounding_box(&self, root: &Mat4) -> Aabb {
        let worlds = self.world_transforms();
        let mut out = Aabb::EMPTY;
        for (node, world) in self.nodes.iter().zip(&worlds) {
            if let Some(mesh) = &node.mesh {
                let m = *root * *world;
                out.union(&mesh.geometry.local_aabb.transformed(&m));
            }
        }
        out
    }

    /// Number of nodes carrying a mesh.
    #[must_use]
    pub fn mesh_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.mesh.is_some()).count()
    }
}
