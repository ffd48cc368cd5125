//! Starfield drifting past an auto-rotating camera.

use cgmath::{Deg, Vector3, Zero};
use rand::Rng;

use crate::gfx::camera::{CameraController, CameraRig, OrbitCamera};
use crate::gfx::geometry::{generate_sphere, GeometryData};
use crate::gfx::scene::material::{hex_to_rgb, Material};
use crate::gfx::scene::object::Object;
use crate::gfx::scene::{FogExp2, Light, Scene};

use super::SceneScript;

pub const STAR_COUNT: usize = 1000;
/// Stars scatter uniformly within +-FIELD_HALF_EXTENT on every axis.
const FIELD_HALF_EXTENT: f32 = 500.0;
const STAR_RADIUS: f32 = 0.25;

const FOG_COLOR: u32 = 0x00061a;
const FOG_DENSITY: f32 = 0.0002;

pub struct UniverseScene;

impl SceneScript for UniverseScene {
    fn name(&self) -> &'static str {
        "universe"
    }

    fn build(&mut self) -> Scene {
        let mut camera =
            OrbitCamera::looking_from(Vector3::new(0.0, 0.0, 500.0), Vector3::zero(), 2.0);
        camera.set_perspective(Deg(75.0), 1.0, 1000.0);

        let mut controller = CameraController::new(0.005, 0.1);
        controller.auto_rotate = true;
        controller.zoom_enabled = false;

        let mut scene = Scene::new(CameraRig::new(camera, controller));

        let fog_color = hex_to_rgb(FOG_COLOR);
        scene.fog = Some(FogExp2 {
            color: fog_color,
            density: FOG_DENSITY,
        });
        scene.background = [
            fog_color[0] as f64,
            fog_color[1] as f64,
            fog_color[2] as f64,
        ];

        scene.add_material(Material::from_hex("star", 0xffff00));

        // Star positions never change, so the whole field bakes into one
        // mesh instead of a thousand tiny draws.
        let star = generate_sphere(STAR_RADIUS, 32, 32);
        let mut field = GeometryData::new();
        let mut rng = rand::rng();
        for _ in 0..STAR_COUNT {
            let offset = star.clone().translated(
                rng.random_range(-FIELD_HALF_EXTENT..FIELD_HALF_EXTENT),
                rng.random_range(-FIELD_HALF_EXTENT..FIELD_HALF_EXTENT),
                rng.random_range(-FIELD_HALF_EXTENT..FIELD_HALF_EXTENT),
            );
            field.merge(&offset);
        }

        let mut stars = Object::from_geometry(&field);
        stars.set_name("stars");
        stars.set_material("star");
        scene.add_object(stars);

        scene.add_light(Light::directional(
            Vector3::new(1.0, 1.0, 1.0),
            [1.0, 1.0, 1.0],
            3.0,
        ));
        scene.add_light(Light::directional(
            Vector3::new(-1.0, -1.0, -1.0),
            hex_to_rgb(0x002288),
            3.0,
        ));
        scene.add_light(Light::ambient(hex_to_rgb(0x555555), 1.0));

        scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bakes_the_field_into_one_object() {
        let scene = UniverseScene.build();

        assert_eq!(scene.objects.len(), 1);
        let stars = &scene.objects[0];
        let per_star = generate_sphere(STAR_RADIUS, 32, 32).positions.len();
        assert_eq!(
            stars.meshes[0].vertex_count() as usize,
            per_star * STAR_COUNT
        );
    }

    #[test]
    fn stars_stay_inside_the_field() {
        let scene = UniverseScene.build();
        let bounds = scene.objects[0].local_bounds();

        let limit = FIELD_HALF_EXTENT + STAR_RADIUS;
        assert!(bounds.min.x >= -limit && bounds.max.x <= limit);
        assert!(bounds.min.y >= -limit && bounds.max.y <= limit);
        assert!(bounds.min.z >= -limit && bounds.max.z <= limit);
    }

    #[test]
    fn fog_and_auto_rotation_are_on() {
        let scene = UniverseScene.build();

        let fog = scene.fog.expect("universe scene has fog");
        assert_eq!(fog.density, FOG_DENSITY);
        assert!(scene.camera_rig.controller.auto_rotate);
        assert!(!scene.camera_rig.controller.zoom_enabled);
    }
}
