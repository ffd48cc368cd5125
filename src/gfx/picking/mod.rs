//! # Ray Casting
//!
//! Pointer picking support: converting screen coordinates into world-space
//! rays and intersecting them with the selectable objects of a scene.
//!
//! 1. **Pointer to NDC**: screen pixels map to `[-1, 1]` on both axes with
//!    Y flipped.
//! 2. **NDC to ray**: the near and far clip-space points unproject through
//!    the inverse view-projection matrix.
//! 3. **Hit test**: the ray is tested against each candidate's world-space
//!    bounding box; hits come back ordered nearest-first.

use std::cmp::Ordering;

use cgmath::{
    EuclideanSpace, InnerSpace, Matrix4, Point3, SquareMatrix, Vector2, Vector3, Vector4, Zero,
};

use crate::gfx::camera::OrbitCamera;
use crate::gfx::scene::object::ObjectId;
use crate::gfx::scene::Scene;

/// A world-space ray for intersection testing.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vector3<f32>,
    /// Normalised direction.
    pub direction: Vector3<f32>,
}

impl Ray {
    pub fn new(origin: Vector3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Point along the ray at parameter `t`.
    pub fn point_at(&self, t: f32) -> Vector3<f32> {
        self.origin + self.direction * t
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    pub min: Vector3<f32>,
    pub max: Vector3<f32>,
}

impl Aabb {
    pub fn new(min: Vector3<f32>, max: Vector3<f32>) -> Self {
        Self { min, max }
    }

    /// Bounds of a point set. Empty input collapses to a point at the origin.
    pub fn from_positions(positions: &[[f32; 3]]) -> Self {
        let Some(first) = positions.first() else {
            return Self::new(Vector3::zero(), Vector3::zero());
        };

        let mut min = Vector3::from(*first);
        let mut max = min;
        for p in positions.iter().skip(1) {
            min.x = min.x.min(p[0]);
            min.y = min.y.min(p[1]);
            min.z = min.z.min(p[2]);
            max.x = max.x.max(p[0]);
            max.y = max.y.max(p[1]);
            max.z = max.z.max(p[2]);
        }
        Self::new(min, max)
    }

    /// Slab test. Returns the ray parameter of the entry point, or the exit
    /// point when the ray starts inside the box.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let inv_dir = Vector3::new(
            1.0 / ray.direction.x,
            1.0 / ray.direction.y,
            1.0 / ray.direction.z,
        );

        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = f32::INFINITY;

        for axis in 0..3 {
            let t0 = (self.min[axis] - ray.origin[axis]) * inv_dir[axis];
            let t1 = (self.max[axis] - ray.origin[axis]) * inv_dir[axis];
            t_near = t_near.max(t0.min(t1));
            t_far = t_far.min(t0.max(t1));
        }

        if t_near <= t_far && t_far >= 0.0 {
            Some(if t_near >= 0.0 { t_near } else { t_far })
        } else {
            None
        }
    }

    /// Bounds of this box under an affine transform.
    pub fn transform(&self, matrix: &Matrix4<f32>) -> Self {
        let corners = [
            [self.min.x, self.min.y, self.min.z],
            [self.max.x, self.min.y, self.min.z],
            [self.min.x, self.max.y, self.min.z],
            [self.min.x, self.min.y, self.max.z],
            [self.max.x, self.max.y, self.min.z],
            [self.max.x, self.min.y, self.max.z],
            [self.min.x, self.max.y, self.max.z],
            [self.max.x, self.max.y, self.max.z],
        ];

        let mut transformed = [[0.0f32; 3]; 8];
        for (out, corner) in transformed.iter_mut().zip(&corners) {
            let v = matrix * Vector4::new(corner[0], corner[1], corner[2], 1.0);
            *out = [v.x / v.w, v.y / v.w, v.z / v.w];
        }

        Self::from_positions(&transformed)
    }
}

/// A single ray-cast hit.
#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    pub object: ObjectId,
    /// Ray parameter at the intersection, i.e. distance from the camera.
    pub distance: f32,
}

/// Source of ordered ray-cast results for a pointer position.
///
/// Implementations return hits nearest-first; equidistant hits keep the
/// candidates' registration order.
pub trait RayCast {
    fn cast(&self, ndc: Vector2<f32>) -> Vec<RayHit>;
}

/// Converts window coordinates to normalised device coordinates.
///
/// X maps to `[-1, 1]` left to right, Y to `[-1, 1]` bottom to top (flipped
/// relative to screen space). View dimensions clamp to one pixel.
pub fn screen_to_ndc(x: f64, y: f64, view_width: f64, view_height: f64) -> Vector2<f32> {
    let w = view_width.max(1.0);
    let h = view_height.max(1.0);
    Vector2::new(
        ((x / w) * 2.0 - 1.0) as f32,
        (-(y / h) * 2.0 + 1.0) as f32,
    )
}

/// Builds a world-space ray through a normalised pointer position.
pub fn pointer_ray(camera: &OrbitCamera, ndc: Vector2<f32>) -> Ray {
    let eye = Point3::from_vec(camera.eye);
    let target = Point3::from_vec(camera.target);
    let view = Matrix4::look_at_rh(eye, target, camera.up);
    let proj = cgmath::perspective(camera.fovy, camera.aspect, camera.znear, camera.zfar);

    let inv_view_proj = (proj * view).invert().unwrap_or_else(Matrix4::identity);

    let near = inv_view_proj * Vector4::new(ndc.x, ndc.y, -1.0, 1.0);
    let far = inv_view_proj * Vector4::new(ndc.x, ndc.y, 1.0, 1.0);

    let near = Vector3::new(near.x / near.w, near.y / near.w, near.z / near.w);
    let far = Vector3::new(far.x / far.w, far.y / far.w, far.z / far.w);

    Ray::new(near, far - near)
}

/// Ray-casts against the selectable objects of a scene.
pub struct SceneRayCaster<'a> {
    scene: &'a Scene,
    camera: &'a OrbitCamera,
}

impl<'a> SceneRayCaster<'a> {
    pub fn new(scene: &'a Scene, camera: &'a OrbitCamera) -> Self {
        Self { scene, camera }
    }
}

impl RayCast for SceneRayCaster<'_> {
    fn cast(&self, ndc: Vector2<f32>) -> Vec<RayHit> {
        let ray = pointer_ray(self.camera, ndc);

        let mut hits = Vec::new();
        for (index, object) in self.scene.objects.iter().enumerate() {
            if !object.selectable || !object.visible {
                continue;
            }

            let world_bounds = object.local_bounds().transform(&object.model_matrix());
            if let Some(distance) = world_bounds.intersect_ray(&ray) {
                hits.push(RayHit {
                    object: ObjectId::new(index),
                    distance,
                });
            }
        }

        // Stable sort keeps registration order for equidistant hits.
        hits.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(Ordering::Equal)
        });
        hits
    }
}
