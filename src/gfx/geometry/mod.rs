//! # Procedural Geometry
//!
//! Mesh data for the primitive shapes the scenes are assembled from,
//! plus the shared helpers for normals and merging.

pub mod primitives;

pub use primitives::{generate_cuboid, generate_icosahedron, generate_sphere};

/// Raw mesh data before GPU upload.
#[derive(Debug, Clone, Default)]
pub struct GeometryData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl GeometryData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the geometry with per-face normals, duplicating shared
    /// vertices so every triangle shades as a flat facet.
    pub fn faceted(&self) -> GeometryData {
        let mut out = GeometryData::new();

        for triangle in self.indices.chunks_exact(3) {
            let a = self.positions[triangle[0] as usize];
            let b = self.positions[triangle[1] as usize];
            let c = self.positions[triangle[2] as usize];

            let edge1 = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
            let edge2 = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
            let normal = normalize([
                edge1[1] * edge2[2] - edge1[2] * edge2[1],
                edge1[2] * edge2[0] - edge1[0] * edge2[2],
                edge1[0] * edge2[1] - edge1[1] * edge2[0],
            ]);

            let base = out.positions.len() as u32;
            out.positions.extend([a, b, c]);
            out.normals.extend([normal, normal, normal]);
            out.indices.extend([base, base + 1, base + 2]);
        }

        out
    }

    /// Shifts every vertex by the given offset.
    pub fn translated(mut self, dx: f32, dy: f32, dz: f32) -> GeometryData {
        for p in &mut self.positions {
            p[0] += dx;
            p[1] += dy;
            p[2] += dz;
        }
        self
    }

    /// Appends another geometry, offsetting its indices.
    pub fn merge(&mut self, other: &GeometryData) {
        let base = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }
}

/// Smooth per-vertex normals for an indexed triangle list with flat
/// position data, accumulated from incident face normals.
///
/// Used as the fallback when a loaded model ships no normals of its own.
pub fn vertex_normals(positions: &[f32], indices: &[u32]) -> Vec<f32> {
    let mut normals = vec![0.0f32; positions.len()];

    for triangle in indices.chunks_exact(3) {
        let i0 = triangle[0] as usize;
        let i1 = triangle[1] as usize;
        let i2 = triangle[2] as usize;

        let v0 = [positions[i0 * 3], positions[i0 * 3 + 1], positions[i0 * 3 + 2]];
        let v1 = [positions[i1 * 3], positions[i1 * 3 + 1], positions[i1 * 3 + 2]];
        let v2 = [positions[i2 * 3], positions[i2 * 3 + 1], positions[i2 * 3 + 2]];

        let edge1 = [v1[0] - v0[0], v1[1] - v0[1], v1[2] - v0[2]];
        let edge2 = [v2[0] - v0[0], v2[1] - v0[1], v2[2] - v0[2]];

        // Unnormalised cross product weights large faces more heavily.
        let face = [
            edge1[1] * edge2[2] - edge1[2] * edge2[1],
            edge1[2] * edge2[0] - edge1[0] * edge2[2],
            edge1[0] * edge2[1] - edge1[1] * edge2[0],
        ];

        for &index in &[i0, i1, i2] {
            normals[index * 3] += face[0];
            normals[index * 3 + 1] += face[1];
            normals[index * 3 + 2] += face[2];
        }
    }

    for normal in normals.chunks_exact_mut(3) {
        let n = normalize([normal[0], normal[1], normal[2]]);
        normal.copy_from_slice(&n);
    }

    normals
}

fn normalize(v: [f32; 3]) -> [f32; 3] {
    let length = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if length > 0.0 {
        [v[0] / length, v[1] / length, v[2] / length]
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn faceted_duplicates_shared_vertices() {
        // Two triangles sharing an edge.
        let geometry = GeometryData {
            positions: vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
                [1.0, 1.0, 0.0],
            ],
            normals: vec![[0.0, 0.0, 1.0]; 4],
            indices: vec![0, 1, 2, 1, 3, 2],
        };

        let flat = geometry.faceted();
        assert_eq!(flat.positions.len(), 6);
        assert_eq!(flat.indices.len(), 6);
        for normal in &flat.normals {
            assert_relative_eq!(normal[2], 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn merge_offsets_indices() {
        let mut a = GeometryData {
            positions: vec![[0.0; 3]; 3],
            normals: vec![[0.0, 1.0, 0.0]; 3],
            indices: vec![0, 1, 2],
        };
        let b = a.clone();
        a.merge(&b);

        assert_eq!(a.positions.len(), 6);
        assert_eq!(a.indices, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn fallback_normals_for_single_triangle() {
        let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        let indices = [0, 1, 2];

        let normals = vertex_normals(&positions, &indices);
        assert_eq!(normals.len(), 9);
        for vertex in normals.chunks_exact(3) {
            assert_relative_eq!(vertex[2], 1.0, epsilon = 1e-6);
        }
    }
}
