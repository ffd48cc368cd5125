//! Scene lights and their GPU representation.

use cgmath::{InnerSpace, Vector3};

/// Maximum lights folded into the global uniform buffer per frame.
pub const MAX_LIGHTS: usize = 8;

/// A light source in the scene.
#[derive(Debug, Clone, Copy)]
pub enum Light {
    /// Parallel light arriving from `direction`.
    Directional {
        direction: Vector3<f32>,
        color: [f32; 3],
        intensity: f32,
    },
    /// Omnidirectional light with inverse-square falloff.
    Point {
        position: Vector3<f32>,
        color: [f32; 3],
        intensity: f32,
    },
    /// Uniform fill light with no direction.
    Ambient { color: [f32; 3], intensity: f32 },
}

impl Light {
    pub fn directional(direction: Vector3<f32>, color: [f32; 3], intensity: f32) -> Self {
        Self::Directional {
            direction,
            color,
            intensity,
        }
    }

    pub fn point(position: Vector3<f32>, color: [f32; 3], intensity: f32) -> Self {
        Self::Point {
            position,
            color,
            intensity,
        }
    }

    pub fn ambient(color: [f32; 3], intensity: f32) -> Self {
        Self::Ambient { color, intensity }
    }

    pub fn to_uniform(&self) -> LightUniform {
        match *self {
            Light::Directional {
                direction,
                color,
                intensity,
            } => {
                let d = direction.normalize();
                LightUniform {
                    vector: [d.x, d.y, d.z, 0.0],
                    color: [color[0], color[1], color[2], intensity],
                }
            }
            Light::Point {
                position,
                color,
                intensity,
            } => LightUniform {
                vector: [position.x, position.y, position.z, 1.0],
                color: [color[0], color[1], color[2], intensity],
            },
            Light::Ambient { color, intensity } => LightUniform {
                vector: [0.0, 0.0, 0.0, 2.0],
                color: [color[0], color[1], color[2], intensity],
            },
        }
    }
}

/// GPU layout for one light. `vector.w` selects the variant: 0 directional
/// (xyz is direction), 1 point (xyz is position), 2 ambient. `color.w`
/// carries the intensity. Must match `LightData` in the shader.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    pub vector: [f32; 4],
    pub color: [f32; 4],
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn directional_normalises_and_tags() {
        let uniform =
            Light::directional(Vector3::new(3.0, 0.0, 0.0), [1.0, 1.0, 1.0], 3.0).to_uniform();

        assert_relative_eq!(uniform.vector[0], 1.0);
        assert_relative_eq!(uniform.vector[3], 0.0);
        assert_relative_eq!(uniform.color[3], 3.0);
    }

    #[test]
    fn point_keeps_position() {
        let uniform =
            Light::point(Vector3::new(0.0, 5.0, 0.0), [1.0, 1.0, 1.0], 150.0).to_uniform();

        assert_relative_eq!(uniform.vector[1], 5.0);
        assert_relative_eq!(uniform.vector[3], 1.0);
    }
}
