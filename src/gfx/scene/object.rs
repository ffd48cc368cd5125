//! Scene objects: meshes plus a translate/rotate/scale placement.

use cgmath::{Matrix4, Rad, Vector3};
use wgpu::Device;

use crate::gfx::geometry::GeometryData;
use crate::gfx::picking::Aabb;

use super::vertex::Vertex3D;

/// Stable handle to an object within its scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(usize);

impl ObjectId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// An indexed triangle mesh with lazily created GPU buffers.
pub struct Mesh {
    vertices: Vec<Vertex3D>,
    indices: Vec<u32>,
    pub(crate) vertex_buffer: Option<wgpu::Buffer>,
    pub(crate) index_buffer: Option<wgpu::Buffer>,
    pub(crate) index_count: u32,
}

impl Mesh {
    /// Builds a mesh from flat position/normal/index arrays, the layout
    /// OBJ loaders hand out.
    pub fn new(positions: Vec<f32>, normals: Vec<f32>, indices: Vec<u32>) -> Self {
        let index_count = indices.len() as u32;

        let mut vertices = Vec::with_capacity(positions.len() / 3);
        for i in 0..positions.len() / 3 {
            vertices.push(Vertex3D {
                position: [positions[i * 3], positions[i * 3 + 1], positions[i * 3 + 2]],
                normal: [normals[i * 3], normals[i * 3 + 1], normals[i * 3 + 2]],
            });
        }

        Self {
            vertices,
            indices,
            vertex_buffer: None,
            index_buffer: None,
            index_count,
        }
    }

    pub fn from_geometry(geometry: &GeometryData) -> Self {
        let vertices = geometry
            .positions
            .iter()
            .zip(&geometry.normals)
            .map(|(position, normal)| Vertex3D {
                position: *position,
                normal: *normal,
            })
            .collect::<Vec<_>>();

        Self {
            index_count: geometry.indices.len() as u32,
            indices: geometry.indices.clone(),
            vertices,
            vertex_buffer: None,
            index_buffer: None,
        }
    }

    pub fn vertices(&self) -> &[Vertex3D] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub(crate) fn init_gpu_buffers(&mut self, device: &Device) {
        let vertex_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Vertex Buffer"),
                contents: bytemuck::cast_slice(&self.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            },
        );
        let index_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Index Buffer"),
                contents: bytemuck::cast_slice(&self.indices),
                usage: wgpu::BufferUsages::INDEX,
            },
        );

        self.vertex_buffer = Some(vertex_buffer);
        self.index_buffer = Some(index_buffer);
    }
}

/// GPU-side state for one object: its uniform buffer and bind group.
pub struct ObjectGpuResources {
    pub uniform_buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

/// Per-object uniform contents. Must match `ObjectData` in the shader.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    pub base_color: [f32; 4],
    /// RGB specular tint, shininess in `w`.
    pub specular: [f32; 4],
}

/// A drawable object with its placement in the scene.
pub struct Object {
    pub name: String,
    pub meshes: Vec<Mesh>,
    pub position: Vector3<f32>,
    /// Euler rotation in radians, applied as `Ry * Rx * Rz`. Unbounded;
    /// pointer drags accumulate here without wrapping.
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
    /// Material name resolved against the scene's material set.
    pub material: Option<String>,
    /// Whether pointer picking considers this object.
    pub selectable: bool,
    pub visible: bool,
    bounds: Aabb,
    pub(crate) gpu: Option<ObjectGpuResources>,
}

impl Object {
    pub fn new(meshes: Vec<Mesh>) -> Self {
        let bounds = bounds_of(&meshes);
        Self {
            name: String::new(),
            meshes,
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
            material: None,
            selectable: false,
            visible: true,
            bounds,
            gpu: None,
        }
    }

    pub fn from_geometry(geometry: &GeometryData) -> Self {
        Self::new(vec![Mesh::from_geometry(geometry)])
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_material(&mut self, name: &str) {
        self.material = Some(name.to_string());
    }

    pub fn set_uniform_scale(&mut self, scale: f32) {
        self.scale = Vector3::new(scale, scale, scale);
    }

    /// Local-space bounding box of all meshes. Empty objects fall back to
    /// a unit cube so picking still has something to test against.
    pub fn local_bounds(&self) -> Aabb {
        self.bounds
    }

    /// Column-major model matrix from position, rotation and scale.
    pub fn model_matrix(&self) -> Matrix4<f32> {
        let translation = Matrix4::from_translation(self.position);
        let rotation = Matrix4::from_angle_y(Rad(self.rotation.y))
            * Matrix4::from_angle_x(Rad(self.rotation.x))
            * Matrix4::from_angle_z(Rad(self.rotation.z));
        let scale = Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z);
        translation * rotation * scale
    }

    pub(crate) fn uniform(&self, material: &super::material::Material) -> ObjectUniform {
        ObjectUniform {
            model: self.model_matrix().into(),
            base_color: material.base_color,
            specular: [
                material.specular[0],
                material.specular[1],
                material.specular[2],
                material.shininess,
            ],
        }
    }

    pub(crate) fn init_gpu_resources(
        &mut self,
        device: &Device,
        layout: &wgpu::BindGroupLayout,
        material: &super::material::Material,
    ) {
        for mesh in &mut self.meshes {
            mesh.init_gpu_buffers(device);
        }

        let uniform = self.uniform(material);
        let uniform_buffer = wgpu::util::DeviceExt::create_buffer_init(
            device,
            &wgpu::util::BufferInitDescriptor {
                label: Some("Object Uniform Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            },
        );

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Object Bind Group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        self.gpu = Some(ObjectGpuResources {
            uniform_buffer,
            bind_group,
        });
    }

    /// Writes the current placement and material into the uniform buffer.
    pub(crate) fn sync_uniform(
        &self,
        queue: &wgpu::Queue,
        material: &super::material::Material,
    ) {
        if let Some(gpu) = &self.gpu {
            let uniform = self.uniform(material);
            queue.write_buffer(&gpu.uniform_buffer, 0, bytemuck::cast_slice(&[uniform]));
        }
    }
}

fn bounds_of(meshes: &[Mesh]) -> Aabb {
    let mut positions = Vec::new();
    for mesh in meshes {
        positions.extend(mesh.vertices().iter().map(|v| v.position));
    }

    if positions.is_empty() {
        Aabb::new(
            Vector3::new(-0.5, -0.5, -0.5),
            Vector3::new(0.5, 0.5, 0.5),
        )
    } else {
        Aabb::from_positions(&positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::generate_cuboid;
    use approx::assert_relative_eq;
    use cgmath::Vector4;

    #[test]
    fn model_matrix_applies_translation() {
        let mut object = Object::new(Vec::new());
        object.position = Vector3::new(4.0, -0.75, 0.0);

        let origin = object.model_matrix() * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(origin.x, 4.0);
        assert_relative_eq!(origin.y, -0.75);
    }

    #[test]
    fn rotation_spins_around_y() {
        let mut object = Object::new(Vec::new());
        object.rotation.y = std::f32::consts::FRAC_PI_2;

        let x_axis = object.model_matrix() * Vector4::new(1.0, 0.0, 0.0, 0.0);
        assert_relative_eq!(x_axis.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(x_axis.z, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn bounds_follow_mesh_extents() {
        let object = Object::from_geometry(&generate_cuboid(2.0, 4.0, 6.0));
        let bounds = object.local_bounds();

        assert_relative_eq!(bounds.min.y, -2.0);
        assert_relative_eq!(bounds.max.z, 3.0);
    }

    #[test]
    fn empty_object_keeps_unit_bounds() {
        let object = Object::new(Vec::new());
        let bounds = object.local_bounds();
        assert_relative_eq!(bounds.max.x - bounds.min.x, 1.0);
    }
}
