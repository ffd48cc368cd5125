//! Generators for the primitive shapes the showcase scenes use.

use std::collections::HashMap;
use std::f32::consts::PI;

use super::GeometryData;

/// Generate a UV sphere.
///
/// `longitude_segments` and `latitude_segments` control the resolution and
/// are clamped to the minimum that still closes the surface. Normals point
/// radially outward.
pub fn generate_sphere(radius: f32, longitude_segments: u32, latitude_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let long_segs = longitude_segments.max(3);
    let lat_segs = latitude_segments.max(2);

    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32;
        let sin_theta = theta.sin();
        let cos_theta = theta.cos();

        for long in 0..=long_segs {
            let phi = long as f32 * 2.0 * PI / long_segs as f32;
            let direction = [phi.cos() * sin_theta, cos_theta, phi.sin() * sin_theta];

            data.positions.push([
                direction[0] * radius,
                direction[1] * radius,
                direction[2] * radius,
            ]);
            data.normals.push(direction);
        }
    }

    let stride = long_segs + 1;
    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * stride + long;
            let second = first + stride;

            data.indices
                .extend([first, second, first + 1, second, second + 1, first + 1]);
        }
    }

    data
}

/// Generate an icosahedron subdivided `detail` times and projected onto a
/// sphere of the given radius.
///
/// Detail 0 is the raw 20-face solid; each level quadruples the face count.
/// Normals are radial, so pair with [`GeometryData::faceted`] for the
/// low-poly faceted look.
pub fn generate_icosahedron(radius: f32, detail: u32) -> GeometryData {
    // Golden-ratio rectangle corners.
    let t = (1.0 + 5.0f32.sqrt()) / 2.0;

    let mut positions: Vec<[f32; 3]> = vec![
        [-1.0, t, 0.0],
        [1.0, t, 0.0],
        [-1.0, -t, 0.0],
        [1.0, -t, 0.0],
        [0.0, -1.0, t],
        [0.0, 1.0, t],
        [0.0, -1.0, -t],
        [0.0, 1.0, -t],
        [t, 0.0, -1.0],
        [t, 0.0, 1.0],
        [-t, 0.0, -1.0],
        [-t, 0.0, 1.0],
    ];

    let mut faces: Vec<[u32; 3]> = vec![
        [0, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ];

    for _ in 0..detail {
        let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();
        let mut subdivided = Vec::with_capacity(faces.len() * 4);

        for face in &faces {
            let ab = midpoint(face[0], face[1], &mut positions, &mut midpoints);
            let bc = midpoint(face[1], face[2], &mut positions, &mut midpoints);
            let ca = midpoint(face[2], face[0], &mut positions, &mut midpoints);

            subdivided.extend([
                [face[0], ab, ca],
                [face[1], bc, ab],
                [face[2], ca, bc],
                [ab, bc, ca],
            ]);
        }

        faces = subdivided;
    }

    let mut data = GeometryData::new();
    for p in &positions {
        let length = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
        let direction = [p[0] / length, p[1] / length, p[2] / length];
        data.positions.push([
            direction[0] * radius,
            direction[1] * radius,
            direction[2] * radius,
        ]);
        data.normals.push(direction);
    }
    for face in &faces {
        data.indices.extend(*face);
    }

    data
}

fn midpoint(
    a: u32,
    b: u32,
    positions: &mut Vec<[f32; 3]>,
    cache: &mut HashMap<(u32, u32), u32>,
) -> u32 {
    let key = if a < b { (a, b) } else { (b, a) };
    if let Some(&index) = cache.get(&key) {
        return index;
    }

    let pa = positions[a as usize];
    let pb = positions[b as usize];
    positions.push([
        (pa[0] + pb[0]) / 2.0,
        (pa[1] + pb[1]) / 2.0,
        (pa[2] + pb[2]) / 2.0,
    ]);

    let index = (positions.len() - 1) as u32;
    cache.insert(key, index);
    index
}

/// Generate an axis-aligned cuboid centred at the origin.
///
/// Each face carries its own four vertices with outward normals.
pub fn generate_cuboid(width: f32, height: f32, depth: f32) -> GeometryData {
    let mut data = GeometryData::new();

    let (x, y, z) = (width / 2.0, height / 2.0, depth / 2.0);

    let positions = [
        // Front face
        [-x, -y, z], [x, -y, z], [x, y, z], [-x, y, z],
        // Back face
        [-x, -y, -z], [-x, y, -z], [x, y, -z], [x, -y, -z],
        // Left face
        [-x, -y, -z], [-x, -y, z], [-x, y, z], [-x, y, -z],
        // Right face
        [x, -y, z], [x, -y, -z], [x, y, -z], [x, y, z],
        // Top face
        [-x, y, z], [x, y, z], [x, y, -z], [-x, y, -z],
        // Bottom face
        [-x, -y, -z], [x, -y, -z], [x, -y, z], [-x, -y, z],
    ];

    let normals = [
        [0.0, 0.0, 1.0], [0.0, 0.0, 1.0], [0.0, 0.0, 1.0], [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0], [0.0, 0.0, -1.0], [0.0, 0.0, -1.0], [0.0, 0.0, -1.0],
        [-1.0, 0.0, 0.0], [-1.0, 0.0, 0.0], [-1.0, 0.0, 0.0], [-1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0], [0.0, 1.0, 0.0], [0.0, 1.0, 0.0], [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0], [0.0, -1.0, 0.0], [0.0, -1.0, 0.0], [0.0, -1.0, 0.0],
    ];

    data.positions = positions.to_vec();
    data.normals = normals.to_vec();

    data.indices = vec![
        0, 1, 2, 2, 3, 0, // front
        4, 5, 6, 6, 7, 4, // back
        8, 9, 10, 10, 11, 8, // left
        12, 13, 14, 14, 15, 12, // right
        16, 17, 18, 18, 19, 16, // top
        20, 21, 22, 22, 23, 20, // bottom
    ];

    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sphere_has_expected_counts() {
        let sphere = generate_sphere(1.0, 7, 7);
        assert_eq!(sphere.positions.len(), 8 * 8);
        assert_eq!(sphere.indices.len(), (7 * 7 * 6) as usize);
    }

    #[test]
    fn sphere_vertices_sit_on_radius() {
        let radius = 0.25;
        let sphere = generate_sphere(radius, 32, 32);
        for p in &sphere.positions {
            let length = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
            assert_relative_eq!(length, radius, epsilon = 1e-5);
        }
    }

    #[test]
    fn icosahedron_face_counts_quadruple_per_detail() {
        assert_eq!(generate_icosahedron(1.0, 0).indices.len(), 20 * 3);
        assert_eq!(generate_icosahedron(1.0, 1).indices.len(), 80 * 3);
        assert_eq!(generate_icosahedron(1.0, 2).indices.len(), 320 * 3);
    }

    #[test]
    fn icosahedron_projects_onto_sphere() {
        let ico = generate_icosahedron(2.0, 2);
        for p in &ico.positions {
            let length = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
            assert_relative_eq!(length, 2.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn cuboid_spans_requested_extents() {
        let cuboid = generate_cuboid(20.0, 0.25, 12.0);
        let max_x = cuboid.positions.iter().map(|p| p[0]).fold(f32::MIN, f32::max);
        let max_y = cuboid.positions.iter().map(|p| p[1]).fold(f32::MIN, f32::max);
        let max_z = cuboid.positions.iter().map(|p| p[2]).fold(f32::MIN, f32::max);

        assert_relative_eq!(max_x, 10.0);
        assert_relative_eq!(max_y, 0.125);
        assert_relative_eq!(max_z, 6.0);
    }
}
