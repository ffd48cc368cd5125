//! Planet model spinning on its axis.

use std::f32::consts::{PI, TAU};

use cgmath::{Deg, Vector3, Zero};

use crate::asset::Placement;
use crate::gfx::camera::{CameraController, CameraRig, OrbitCamera};
use crate::gfx::scene::{Light, Scene};

use super::SceneScript;

const MODEL_PATH: &str = "assets/planet_earth.obj";
const MODEL_NAME: &str = "planet_earth";

/// Spin per frame; a full turn roughly every twelve seconds at 60 fps.
const SPIN_STEP: f32 = PI / 360.0;

pub struct PlanetScene;

impl SceneScript for PlanetScene {
    fn name(&self) -> &'static str {
        "planet"
    }

    fn build(&mut self) -> Scene {
        let mut camera =
            OrbitCamera::looking_from(Vector3::new(0.0, 0.0, 9.0), Vector3::zero(), 2.0);
        camera.set_perspective(Deg(75.0), 5.0, 30.0);

        let mut controller = CameraController::new(0.005, 0.1);
        controller.zoom_enabled = false;

        let mut scene = Scene::new(CameraRig::new(camera, controller));

        // The model pops into the scene whenever decoding finishes; the
        // spin below simply finds nothing until then.
        scene.spawn_model_load(MODEL_PATH, Placement::default());

        for axis in [Vector3::unit_x(), Vector3::unit_y(), Vector3::unit_z()] {
            for sign in [-1.0f32, 1.0] {
                scene.add_light(Light::directional(axis * sign, [1.0, 1.0, 1.0], 3.0));
            }
        }

        scene
    }

    fn update(&mut self, scene: &mut Scene, _elapsed: f32, _dt: f32) {
        let Some(planet) = scene
            .find_object(MODEL_NAME)
            .and_then(|id| scene.object_mut(id))
        else {
            return;
        };

        if planet.rotation.y > TAU {
            planet.rotation.y = 0.0;
        } else {
            planet.rotation.y += SPIN_STEP;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::object::Object;

    #[test]
    fn build_spawns_model_load() {
        let scene = PlanetScene.build();
        assert_eq!(scene.pending_loads(), 1);
        assert!(scene.objects.is_empty());
        assert_eq!(scene.lights.len(), 6);
    }

    #[test]
    fn spin_advances_and_wraps() {
        let mut script = PlanetScene;
        let mut scene = script.build();

        let mut planet = Object::new(Vec::new());
        planet.set_name(MODEL_NAME);
        let id = scene.add_object(planet);

        script.update(&mut scene, 0.0, 1.0 / 60.0);
        let after_one = scene.object(id).unwrap().rotation.y;
        assert!((after_one - SPIN_STEP).abs() < 1e-6);

        // Push past a full turn and watch it wrap back to zero.
        scene.object_mut(id).unwrap().rotation.y = TAU + 0.01;
        script.update(&mut scene, 0.0, 1.0 / 60.0);
        assert_eq!(scene.object(id).unwrap().rotation.y, 0.0);
    }

    #[test]
    fn update_without_model_is_a_no_op() {
        let mut script = PlanetScene;
        let mut scene = script.build();
        script.update(&mut scene, 0.0, 1.0 / 60.0);
        assert!(scene.objects.is_empty());
    }
}
