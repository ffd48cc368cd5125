//! Three coarse spheres in a row, each grabbable with the pointer.
//!
//! The only scene where the pointer manipulates objects instead of the
//! camera: the camera stays fixed and the drag selector spins whichever
//! sphere was picked up.

use cgmath::{Deg, Vector3, Zero};

use crate::gfx::camera::{CameraController, CameraRig, OrbitCamera};
use crate::gfx::geometry::generate_sphere;
use crate::gfx::scene::material::Material;
use crate::gfx::scene::object::Object;
use crate::gfx::scene::{Light, Scene};

use super::SceneScript;

const SPHERE_COUNT: usize = 3;
const SPHERE_SPACING: f32 = 4.0;

pub struct OrbsScene;

impl SceneScript for OrbsScene {
    fn name(&self) -> &'static str {
        "orbs"
    }

    fn build(&mut self) -> Scene {
        let mut camera =
            OrbitCamera::looking_from(Vector3::new(0.0, 0.0, 8.0), Vector3::zero(), 2.0);
        camera.set_perspective(Deg(75.0), 0.1, 1000.0);

        // The pointer belongs to the drag selector here.
        let mut scene = Scene::new(CameraRig::new(camera, CameraController::disabled()));

        scene.add_material(Material::from_hex("sphere", 0x331a00));

        let geometry = generate_sphere(1.0, 7, 7).faceted();
        let mut x = -SPHERE_SPACING;
        for index in 0..SPHERE_COUNT {
            let mut sphere = Object::from_geometry(&geometry);
            sphere.set_name(format!("sphere_{index}"));
            sphere.set_material("sphere");
            sphere.position.x = x;
            sphere.selectable = true;
            x += SPHERE_SPACING;
            scene.add_object(sphere);
        }

        // One directional light in along each axis.
        for axis in [Vector3::unit_x(), Vector3::unit_y(), Vector3::unit_z()] {
            for sign in [-1.0f32, 1.0] {
                scene.add_light(Light::directional(axis * sign, [1.0, 1.0, 1.0], 3.0));
            }
        }

        scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::picking::{RayCast, SceneRayCaster};
    use crate::input::DragSelector;
    use cgmath::Vector2;

    #[test]
    fn builds_three_selectable_spheres() {
        let scene = OrbsScene.build();

        assert_eq!(scene.objects.len(), 3);
        assert!(scene.objects.iter().all(|object| object.selectable));
        assert_eq!(scene.objects[0].position.x, -4.0);
        assert_eq!(scene.objects[2].position.x, 4.0);
        assert!(!scene.camera_rig.controller.enabled);
    }

    #[test]
    fn centre_sphere_sits_under_the_crosshair() {
        let scene = OrbsScene.build();
        let caster = SceneRayCaster::new(&scene, &scene.camera_rig.camera);

        let hits = caster.cast(Vector2::new(0.0, 0.0));
        assert!(!hits.is_empty());
        assert_eq!(hits[0].object.index(), 1, "centre sphere is nearest on axis");
    }

    #[test]
    fn drag_through_the_full_stack() {
        let mut scene = OrbsScene.build();
        let mut selector = DragSelector::new();
        let view = (600.0, 300.0);

        // Pointer dead centre picks the middle sphere.
        {
            let caster = SceneRayCaster::new(&scene, &scene.camera_rig.camera);
            selector.on_pointer_down(300.0, 150.0, view, &caster);
        }
        assert!(selector.is_dragging());

        selector.on_pointer_move(310.0, 150.0, &mut scene.objects);
        selector.on_pointer_up();

        let rotated = &scene.objects[1];
        assert!((rotated.rotation.y - 0.05).abs() < 1e-6);
    }

    #[test]
    fn corner_pointer_misses_everything() {
        let scene = OrbsScene.build();
        let mut selector = DragSelector::new();
        let caster = SceneRayCaster::new(&scene, &scene.camera_rig.camera);

        selector.on_pointer_down(1.0, 1.0, (600.0, 300.0), &caster);
        assert!(!selector.is_dragging());
        assert_eq!(selector.selected(), None);
    }
}
