//! glTF / GLB asset decoding.
//!
//! Decodes an asset file into a flat [`SceneGraph`]. Each glTF primitive
//! becomes its own mesh node (single material slot) parented under the node
//! that referenced it, so material slots map 1:1 onto decoded primitives.
//!
//! Decoding is the only fallible, potentially slow stage of the pipeline;
//! callers surface failures to the host once and fall back to the
//! placeholder (see the engine swap path).

use std::path::Path;
use std::sync::Arc;

use glam::{Mat4, Vec3};

use super::{
    Aabb, GeometryData, MaterialData, MeshData, SceneGraph, SceneNode,
    TextureData, TextureMaps,
};
use crate::error::VitrineError;

/// Decode a glTF or GLB file into a scene graph.
///
/// # Errors
///
/// Returns [`VitrineError::AssetDecode`] when the file is missing,
/// malformed, or uses an unsupported feature set.
pub fn load_path(path: &Path) -> Result<Arc<SceneGraph>, VitrineError> {
    let (document, buffers, images) = gltf::import(path)
        .map_err(|e| VitrineError::AssetDecode(e.to_string()))?;

    let textures = decode_images(&images);
    let graph = build_graph(&document, &buffers, &textures)?;

    log::debug!(
        "decoded {}: {} nodes, {} meshes",
        path.display(),
        graph.nodes.len(),
        graph.mesh_count()
    );
    Ok(Arc::new(graph))
}

/// Convert every decoded image to RGBA8, shared by index.
fn decode_images(images: &[gltf::image::Data]) -> Vec<Option<Arc<TextureData>>> {
    images
        .iter()
        .map(|img| {
            to_rgba8(img).map(|pixels| {
                Arc::new(TextureData {
                    width: img.width,
                    height: img.height,
                    pixels,
                })
            })
        })
        .collect()
}

/// Expand a decoded image to tightly packed RGBA8, or `None` for formats
/// the showroom does not consume.
fn to_rgba8(img: &gltf::image::Data) -> Option<Vec<u8>> {
    use gltf::image::Format;

    let count = (img.width * img.height) as usize;
    match img.format {
        Format::R8G8B8A8 => Some(img.pixels.clone()),
        Format::R8G8B8 => {
            let mut out = Vec::with_capacity(count * 4);
            for px in img.pixels.chunks_exact(3) {
                out.extend_from_slice(px);
                out.push(255);
            }
            Some(out)
        }
        Format::R8 => {
            let mut out = Vec::with_capacity(count * 4);
            for &v in &img.pixels {
                out.extend_from_slice(&[v, v, v, 255]);
            }
            Some(out)
        }
        Format::R8G8 => {
            let mut out = Vec::with_capacity(count * 4);
            for px in img.pixels.chunks_exact(2) {
                out.extend_from_slice(&[px[0], px[1], 0, 255]);
            }
            Some(out)
        }
        other => {
            log::warn!("skipping texture with unsupported format {other:?}");
            None
        }
    }
}

fn build_graph(
    document: &gltf::Document,
    buffers: &[gltf::buffer::Data],
    textures: &[Option<Arc<TextureData>>],
) -> Result<SceneGraph, VitrineError> {
    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .ok_or_else(|| {
            VitrineError::AssetDecode("asset contains no scene".to_owned())
        })?;

    let mut graph = SceneGraph::default();
    for node in scene.nodes() {
        append_node(&mut graph, &node, None, buffers, textures)?;
    }

    if graph.mesh_count() == 0 {
        return Err(VitrineError::AssetDecode(
            "asset contains no mesh geometry".to_owned(),
        ));
    }
    Ok(graph)
}

/// Depth-first append so parents always precede children.
fn append_node(
    graph: &mut SceneGraph,
    node: &gltf::Node<'_>,
    parent: Option<usize>,
    buffers: &[gltf::buffer::Data],
    textures: &[Option<Arc<TextureData>>],
) -> Result<(), VitrineError> {
    let name = node.name().unwrap_or("node").to_owned();
    let local = Mat4::from_cols_array_2d(&node.transform().matrix());

    let index = graph.nodes.len();
    graph.nodes.push(SceneNode {
        name: name.clone(),
        local,
        parent,
        mesh: None,
    });

    if let Some(mesh) = node.mesh() {
        for (i, primitive) in mesh.primitives().enumerate() {
            let Some(geometry) = read_geometry(&primitive, buffers)? else {
                continue;
            };
            let material = read_material(&primitive.material(), textures);
            graph.nodes.push(SceneNode {
                name: format!("{name}#{i}"),
                local: Mat4::IDENTITY,
                parent: Some(index),
                mesh: Some(MeshData {
                    geometry: Arc::new(geometry),
                    materials: vec![material],
                }),
            });
        }
    }

    for child in node.children() {
        append_node(graph, &child, Some(index), buffers, textures)?;
    }
    Ok(())
}

/// Read one primitive's triangle geometry. Non-triangle primitives are
/// skipped with a warning rather than failing the whole asset.
fn read_geometry(
    primitive: &gltf::Primitive<'_>,
    buffers: &[gltf::buffer::Data],
) -> Result<Option<GeometryData>, VitrineError> {
    if primitive.mode() != gltf::mesh::Mode::Triangles {
        log::warn!("skipping non-triangle primitive ({:?})", primitive.mode());
        return Ok(None);
    }

    let reader = primitive
        .reader(|b| buffers.get(b.index()).map(std::ops::Deref::deref));

    let Some(positions) = reader.read_positions() else {
        return Err(VitrineError::AssetDecode(
            "primitive has no position attribute".to_owned(),
        ));
    };
    let positions: Vec<Vec3> = positions.map(Vec3::from_array).collect();

    let indices: Vec<u32> = reader.read_indices().map_or_else(
        || (0..positions.len() as u32).collect(),
        |idx| idx.into_u32().collect(),
    );

    let normals: Vec<Vec3> = reader.read_normals().map_or_else(
        || compute_smooth_normals(&positions, &indices),
        |iter| iter.map(Vec3::from_array).collect(),
    );

    Ok(Some(GeometryData::new(positions, normals, indices)))
}

/// Area-weighted smooth normals for assets that ship without them.
fn compute_smooth_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let face =
            (positions[b] - positions[a]).cross(positions[c] - positions[a]);
        normals[a] += face;
        normals[b] += face;
        normals[c] += face;
    }
    for n in &mut normals {
        *n = n.normalize_or_zero();
    }
    normals
}

fn read_material(
    material: &gltf::Material<'_>,
    textures: &[Option<Arc<TextureData>>],
) -> MaterialData {
    let pbr = material.pbr_metallic_roughness();
    let base = pbr.base_color_factor();

    let image_at = |index: usize| textures.get(index).and_then(Clone::clone);

    let color = pbr
        .base_color_texture()
        .and_then(|info| image_at(info.texture().source().index()));
    let metallic_roughness = pbr
        .metallic_roughness_texture()
        .and_then(|info| image_at(info.texture().source().index()));
    let normal = material
        .normal_texture()
        .and_then(|info| image_at(info.texture().source().index()));
    let emissive = material
        .emissive_texture()
        .and_then(|info| image_at(info.texture().source().index()));
    let occlusion = material
        .occlusion_texture()
        .and_then(|info| image_at(info.texture().source().index()));

    let emissive_factor = material.emissive_factor();
    let emissive_intensity = emissive_factor[0]
        .max(emissive_factor[1])
        .max(emissive_factor[2]);

    MaterialData {
        base_color: [base[0], base[1], base[2]],
        metalness: pbr.metallic_factor(),
        roughness: pbr.roughness_factor(),
        emissive_intensity,
        opacity: base[3],
        maps: TextureMaps {
            color,
            normal,
            // The combined metallic-roughness image feeds both slots.
            roughness: metallic_roughness.clone(),
            metalness: metallic_roughness,
            emissive,
            occlusion,
        },
    }
}

/// Build a bounding box for raw vertex data without constructing a graph.
/// Used by hosts that decode through their own pipeline.
#[must_use]
pub fn measure_positions(positions: &[Vec3]) -> Aabb {
    Aabb::from_points(positions)
}
