//! Faceted orb drifting gently in front of the camera.

use cgmath::{Deg, Vector3, Zero};

use crate::gfx::camera::{CameraController, CameraRig, OrbitCamera};
use crate::gfx::geometry::generate_icosahedron;
use crate::gfx::scene::material::{hex_to_rgb, Material};
use crate::gfx::scene::object::{Object, ObjectId};
use crate::gfx::scene::{Light, Scene};

use super::SceneScript;

const LIGHT_INTENSITY: f32 = 250.0;
const LIGHT_DISTANCE: f32 = 10.0;

pub struct OrbScene {
    orb: Option<ObjectId>,
}

impl OrbScene {
    pub fn new() -> Self {
        Self { orb: None }
    }
}

impl Default for OrbScene {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneScript for OrbScene {
    fn name(&self) -> &'static str {
        "orb"
    }

    fn build(&mut self) -> Scene {
        let mut camera =
            OrbitCamera::looking_from(Vector3::new(0.0, 0.0, -2.0), Vector3::zero(), 2.0);
        camera.set_perspective(Deg(75.0), 0.1, 30.0);

        let mut controller = CameraController::new(0.005, 0.1);
        controller.zoom_enabled = false;

        let mut scene = Scene::new(CameraRig::new(camera, controller));

        scene.add_material(
            Material::from_hex("orb", 0x808080).with_specular(hex_to_rgb(0x222222), 20.0),
        );

        let mut orb = Object::from_geometry(&generate_icosahedron(1.0, 2).faceted());
        orb.set_name("orb");
        orb.set_material("orb");
        self.orb = Some(scene.add_object(orb));

        // One point light out along each axis.
        for axis in [Vector3::unit_x(), Vector3::unit_y(), Vector3::unit_z()] {
            for sign in [1.0f32, -1.0] {
                scene.add_light(Light::point(
                    axis * sign * LIGHT_DISTANCE,
                    [1.0, 1.0, 1.0],
                    LIGHT_INTENSITY,
                ));
            }
        }

        scene
    }

    fn update(&mut self, scene: &mut Scene, elapsed: f32, _dt: f32) {
        let Some(orb) = self.orb.and_then(|id| scene.object_mut(id)) else {
            return;
        };

        let sway = elapsed.sin();
        orb.rotation.y += sway * 0.005;
        orb.position.x = sway * 0.05;
        orb.position.y = sway * 0.05;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_orb_with_axis_lights() {
        let mut script = OrbScene::new();
        let scene = script.build();

        assert_eq!(scene.objects.len(), 1);
        assert_eq!(scene.lights.len(), 6);
        assert!(!scene.objects[0].selectable);
        assert!(!scene.camera_rig.controller.zoom_enabled);
    }

    #[test]
    fn update_sways_position_and_rotation() {
        let mut script = OrbScene::new();
        let mut scene = script.build();

        script.update(&mut scene, 1.0, 1.0 / 60.0);
        let orb = &scene.objects[0];
        assert!(orb.rotation.y != 0.0);
        assert!(orb.position.x.abs() <= 0.05);
        assert_eq!(orb.position.x, orb.position.y);
    }
}
