//! Per-clone GPU resources: vertex/index buffers and texture sets.
//!
//! Resources are owned by the clone that uploaded them and destroyed
//! explicitly on disposal. `destroy` is idempotent per resource so the
//! lifecycle layer can account for exactly-once release.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt as _;

use crate::asset::{GeometryData, TextureData, TextureMaps};

/// Interleaved vertex layout shared by every showroom mesh.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Object-space normal.
    pub normal: [f32; 3],
}

impl MeshVertex {
    /// Vertex buffer layout matching this struct.
    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
            wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

/// Vertex and index buffers for one mesh.
#[derive(Debug)]
pub struct MeshBuffers {
    /// Interleaved vertex buffer.
    pub vertex: wgpu::Buffer,
    /// 32-bit index buffer.
    pub index: wgpu::Buffer,
    /// Number of indices to draw.
    pub index_count: u32,
    destroyed: bool,
}

impl MeshBuffers {
    /// Upload geometry into fresh vertex/index buffers.
    #[must_use]
    pub fn upload(
        device: &wgpu::Device,
        geometry: &GeometryData,
        label: &str,
    ) -> Self {
        let vertices: Vec<MeshVertex> = geometry
            .positions
            .iter()
            .zip(&geometry.normals)
            .map(|(p, n)| MeshVertex {
                position: p.to_array(),
                normal: n.to_array(),
            })
            .collect();

        let vertex =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} vertices")),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} indices")),
                contents: bytemuck::cast_slice(&geometry.indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        Self {
            vertex,
            index,
            index_count: geometry.indices.len() as u32,
            destroyed: false,
        }
    }

    /// Release both buffers. Returns `true` the first time only.
    pub fn destroy(&mut self) -> bool {
        if self.destroyed {
            return false;
        }
        self.destroyed = true;
        self.vertex.destroy();
        self.index.destroy();
        true
    }

    /// Whether `destroy` has already run.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

/// GPU textures for one material slot, mirroring [`TextureMaps`].
#[derive(Debug, Default)]
pub struct TextureSet {
    /// Base color texture.
    pub color: Option<wgpu::Texture>,
    /// Normal map texture.
    pub normal: Option<wgpu::Texture>,
    /// Roughness texture.
    pub roughness: Option<wgpu::Texture>,
    /// Metalness texture.
    pub metalness: Option<wgpu::Texture>,
    /// Emissive texture.
    pub emissive: Option<wgpu::Texture>,
    /// Ambient-occlusion texture.
    pub occlusion: Option<wgpu::Texture>,
    destroyed: bool,
}

impl TextureSet {
    /// Upload every populated map slot.
    #[must_use]
    pub fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        maps: &TextureMaps,
        label: &str,
    ) -> Self {
        let slot = |data: &Option<std::sync::Arc<TextureData>>, name: &str| {
            data.as_ref().map(|data| {
                upload_texture(device, queue, data, &format!("{label} {name}"))
            })
        };
        Self {
            color: slot(&maps.color, "color"),
            normal: slot(&maps.normal, "normal"),
            roughness: slot(&maps.roughness, "roughness"),
            metalness: slot(&maps.metalness, "metalness"),
            emissive: slot(&maps.emissive, "emissive"),
            occlusion: slot(&maps.occlusion, "occlusion"),
            destroyed: false,
        }
    }

    /// Release every texture in the set. Returns the number of textures
    /// destroyed; repeated calls return 0.
    pub fn destroy(&mut self) -> usize {
        if self.destroyed {
            return 0;
        }
        self.destroyed = true;
        [
            self.color.as_ref(),
            self.normal.as_ref(),
            self.roughness.as_ref(),
            self.metalness.as_ref(),
            self.emissive.as_ref(),
            self.occlusion.as_ref(),
        ]
        .into_iter()
        .flatten()
        .map(wgpu::Texture::destroy)
        .count()
    }

    /// Whether `destroy` has already run.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

fn upload_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    data: &TextureData,
    label: &str,
) -> wgpu::Texture {
    let size = wgpu::Extent3d {
        width: data.width,
        height: data.height,
        depth_or_array_layers: 1,
    };
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING
            | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &data.pixels,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(data.width * 4),
            rows_per_image: Some(data.height),
        },
        size,
    );
    texture
}
