//! Display-side scene state: the clone of a decoded graph that is actually
//! shown, with per-clone materials and GPU resources.
//!
//! Exactly one [`DisplayClone`] is live at any instant. Cloning exists so
//! material overrides never mutate the shared decode cache: geometry stays
//! `Arc`-shared with the cache, while material parameters and GPU resources
//! are owned by the clone and disposed with it.

pub mod lifecycle;

use std::sync::Arc;

use glam::{Mat4, Vec3};

use crate::asset::{Aabb, GeometryData, MaterialData, SceneGraph, TextureMaps};
use crate::gpu::mesh::{MeshBuffers, TextureSet};
use crate::gpu::render_context::RenderContext;

/// Stable synthetic node identifier, assigned when a clone is built.
///
/// Decoded-graph node identity is not preserved across cloning, so captured
/// material state is keyed by this id instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// The raw id value.
    #[must_use]
    pub fn raw(self) -> u32 {
        self.0
    }
}

/// Mutable material parameters for one slot of one clone node.
#[derive(Debug)]
pub struct MaterialInstance {
    /// Current color (linear RGB). Overrides write here; the captured
    /// original lives in the material-state side table.
    pub color: [f32; 3],
    /// Metalness factor.
    pub metalness: f32,
    /// Roughness factor.
    pub roughness: f32,
    /// Emissive intensity.
    pub emissive_intensity: f32,
    /// Opacity, driven by the entrance animation.
    pub opacity: f32,
    /// Whether alpha blending is enabled for this slot.
    pub transparent: bool,
    /// Wireframe rendering toggle.
    pub wireframe: bool,
    /// Texture slots (shared pixel data from the decode).
    pub maps: TextureMaps,
    /// GPU textures for this slot, when uploaded.
    pub gpu_textures: Option<TextureSet>,
}

impl MaterialInstance {
    fn from_data(data: &MaterialData) -> Self {
        Self {
            color: data.base_color,
            metalness: data.metalness,
            roughness: data.roughness,
            emissive_intensity: data.emissive_intensity,
            opacity: data.opacity,
            transparent: data.opacity < 1.0,
            wireframe: false,
            maps: data.maps.clone(),
            gpu_textures: None,
        }
    }
}

/// A renderable mesh owned by the clone.
#[derive(Debug)]
pub struct MeshInstance {
    /// Triangle geometry, shared with the decode cache.
    pub geometry: Arc<GeometryData>,
    /// Per-slot material instances.
    pub materials: Vec<MaterialInstance>,
    /// Vertex/index buffers for this mesh, when uploaded.
    pub gpu: Option<MeshBuffers>,
}

/// One node of the display clone.
#[derive(Debug)]
pub struct CloneNode {
    /// Stable synthetic id for this node.
    pub id: NodeId,
    /// Node name carried over from the decode.
    pub name: String,
    /// Local transform relative to the parent.
    pub local: Mat4,
    /// Index of the parent node, `None` for roots.
    pub parent: Option<usize>,
    /// Mesh attached to this node, if any.
    pub mesh: Option<MeshInstance>,
}

/// The currently displayed clone of a decoded scene graph.
pub struct DisplayClone {
    nodes: Vec<CloneNode>,
    /// Uniform normalization scale applied at the root.
    pub root_scale: f32,
    /// Centering/floor offset applied after the normalization scale.
    pub root_offset: Vec3,
    /// Entrance-animation scale applied outside the normalization frame.
    pub group_scale: f32,
    disposed: bool,
    generation: u64,
}

impl DisplayClone {
    /// Build a fresh clone of `graph`, assigning a stable [`NodeId`] to
    /// every node. Material parameters are copied; geometry is shared.
    #[must_use]
    pub fn from_graph(graph: &SceneGraph, generation: u64) -> Self {
        let nodes = graph
            .nodes
            .iter()
            .enumerate()
            .map(|(i, node)| CloneNode {
                id: NodeId(i as u32),
                name: node.name.clone(),
                local: node.local,
                parent: node.parent,
                mesh: node.mesh.as_ref().map(|mesh| MeshInstance {
                    geometry: Arc::clone(&mesh.geometry),
                    materials: mesh
                        .materials
                        .iter()
                        .map(MaterialInstance::from_data)
                        .collect(),
                    gpu: None,
                }),
            })
            .collect();

        Self {
            nodes,
            root_scale: 1.0,
            root_offset: Vec3::ZERO,
            group_scale: 1.0,
            disposed: false,
            generation,
        }
    }

    /// The asset-identity generation this clone belongs to.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// All nodes in parent-before-child order.
    #[must_use]
    pub fn nodes(&self) -> &[CloneNode] {
        &self.nodes
    }

    /// Mutable access to all nodes.
    pub fn nodes_mut(&mut self) -> &mut [CloneNode] {
        &mut self.nodes
    }

    /// Root transform of the normalization frame: offset over uniform scale,
    /// excluding the entrance `group_scale`.
    #[must_use]
    pub fn normalization_transform(&self) -> Mat4 {
        Mat4::from_translation(self.root_offset)
            * Mat4::from_scale(Vec3::splat(self.root_scale))
    }

    /// Full root transform including the entrance scale.
    #[must_use]
    pub fn root_transform(&self) -> Mat4 {
        Mat4::from_scale(Vec3::splat(self.group_scale))
            * self.normalization_transform()
    }

    /// World transform of every node under the given root.
    #[must_use]
    pub fn world_transforms(&self, root: &Mat4) -> Vec<Mat4> {
        let mut out = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let world = match node.parent {
                Some(p) => out[p] * node.local,
                None => *root * node.local,
            };
            out.push(world);
        }
        out
    }

    /// Bounding box measured in the normalization frame (root scale and
    /// offset applied, entrance scale excluded). This is an actual traversal
    /// of the transformed graph, so it reflects whatever non-uniform parent
    /// transforms the asset carries.
    #[must_use]
    pub fn bounding_box(&self) -> Aabb {
        let root = self.normalization_transform();
        let worlds = self.world_transforms(&root);
        let mut out = Aabb::EMPTY;
        for (node, world) in self.nodes.iter().zip(&worlds) {
            if let Some(mesh) = &node.mesh {
                out.union(&mesh.geometry.local_aabb.transformed(world));
            }
        }
        out
    }

    /// Mutable material for one `(node, slot)` pair. Node ids index the
    /// clone's own node list, so this is a direct lookup.
    pub fn material_mut(
        &mut self,
        id: NodeId,
        slot: usize,
    ) -> Option<&mut MaterialInstance> {
        self.nodes
            .get_mut(id.raw() as usize)?
            .mesh
            .as_mut()?
            .materials
            .get_mut(slot)
    }

    /// Run `f` over every `(node id, slot index, material)` triple.
    pub fn for_each_material_mut(
        &mut self,
        mut f: impl FnMut(NodeId, usize, &mut MaterialInstance),
    ) {
        for node in &mut self.nodes {
            if let Some(mesh) = &mut node.mesh {
                for (slot, material) in mesh.materials.iter_mut().enumerate() {
                    f(node.id, slot, material);
                }
            }
        }
    }

    /// Run `f` over every `(node id, slot index, material)` triple, read-only.
    pub fn for_each_material(
        &self,
        mut f: impl FnMut(NodeId, usize, &MaterialInstance),
    ) {
        for node in &self.nodes {
            if let Some(mesh) = &node.mesh {
                for (slot, material) in mesh.materials.iter().enumerate() {
                    f(node.id, slot, material);
                }
            }
        }
    }

    /// Upload vertex/index buffers and texture sets for every mesh.
    pub fn upload(&mut self, context: &RenderContext) {
        for node in &mut self.nodes {
            if let Some(mesh) = &mut node.mesh {
                if mesh.gpu.is_none() {
                    mesh.gpu = Some(MeshBuffers::upload(
                        &context.device,
                        &mesh.geometry,
                        &node.name,
                    ));
                }
                for material in &mut mesh.materials {
                    if material.gpu_textures.is_none() {
                        material.gpu_textures = Some(TextureSet::upload(
                            &context.device,
                            &context.queue,
                            &material.maps,
                            &node.name,
                        ));
                    }
                }
            }
        }
    }

    /// Whether this clone's resources have been disposed.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Dispose this clone's GPU resources: geometry buffers and every
    /// texture slot of every material. Runs at most once; repeated calls
    /// return `false` and do nothing.
    pub fn dispose(&mut self) -> bool {
        if self.disposed {
            return false;
        }
        self.disposed = true;

        let mut buffers = 0usize;
        let mut textures = 0usize;
        for node in &mut self.nodes {
            if let Some(mesh) = &mut node.mesh {
                if let Some(gpu) = &mut mesh.gpu {
                    if gpu.destroy() {
                        buffers += 1;
                    }
                }
                for material in &mut mesh.materials {
                    if let Some(set) = &mut material.gpu_textures {
                        textures += set.destroy();
                    }
                }
            }
        }
        log::debug!(
            "disposed clone gen {}: {buffers} mesh buffers, {textures} textures",
            self.generation
        );
        true
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Shared builders for scene-level tests.

    use std::sync::Arc;

    use glam::{Mat4, Vec3};

    use crate::asset::{
        GeometryData, MaterialData, MeshData, SceneGraph, SceneNode,
    };

    /// Box geometry spanning `[-size/2, size/2]` on X/Z and `[0, size.y]`
    /// shifted by `offset`.
    pub(crate) fn box_geometry(size: Vec3, offset: Vec3) -> GeometryData {
        let h = size * 0.5;
        let mut positions = Vec::new();
        for i in 0..8u32 {
            positions.push(
                Vec3::new(
                    if i & 1 == 0 { -h.x } else { h.x },
                    if i & 2 == 0 { -h.y } else { h.y },
                    if i & 4 == 0 { -h.z } else { h.z },
                ) + offset,
            );
        }
        // Two faces are enough to exercise triangle iteration.
        let indices = vec![0, 1, 3, 0, 3, 2, 4, 6, 7, 4, 7, 5];
        let normals = vec![Vec3::Y; positions.len()];
        GeometryData::new(positions, normals, indices)
    }

    /// Single-node graph with a box of the given size centered on the
    /// origin, carrying `slots` material slots.
    pub(crate) fn box_graph(size: Vec3, slots: usize) -> SceneGraph {
        box_graph_with_colors(size, &vec![[1.0, 1.0, 1.0]; slots])
    }

    /// Single-node box graph with one material slot per entry of `colors`.
    pub(crate) fn box_graph_with_colors(
        size: Vec3,
        colors: &[[f32; 3]],
    ) -> SceneGraph {
        let materials = colors
            .iter()
            .map(|&base_color| MaterialData {
                base_color,
                ..MaterialData::default()
            })
            .collect();
        SceneGraph {
            nodes: vec![SceneNode {
                name: "box".to_owned(),
                local: Mat4::IDENTITY,
                parent: None,
                mesh: Some(MeshData {
                    geometry: Arc::new(box_geometry(size, Vec3::ZERO)),
                    materials,
                }),
            }],
        }
    }
}
