//! Desk scene: loaded models arranged on a slab under one lamp.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_8, PI};

use cgmath::{Deg, Vector3, Zero};

use crate::asset::Placement;
use crate::gfx::camera::{CameraController, CameraRig, OrbitCamera};
use crate::gfx::geometry::generate_cuboid;
use crate::gfx::scene::material::Material;
use crate::gfx::scene::object::Object;
use crate::gfx::scene::{Light, Scene};

use super::SceneScript;

const DESK_SIZE: (f32, f32, f32) = (20.0, 0.25, 12.0);

pub struct WorkstationScene;

impl SceneScript for WorkstationScene {
    fn name(&self) -> &'static str {
        "workstation"
    }

    fn build(&mut self) -> Scene {
        let mut camera =
            OrbitCamera::looking_from(Vector3::new(0.0, 3.0, 11.0), Vector3::zero(), 2.0);
        camera.set_perspective(Deg(75.0), 2.0, 30.0);

        let controller = CameraController::new(0.005, 0.1);
        let mut scene = Scene::new(CameraRig::new(camera, controller));

        scene.spawn_model_load(
            "assets/retro_computer.obj",
            Placement::at(-4.5, 0.0, 0.5).rotated(0.0, FRAC_PI_8, 0.0),
        );
        scene.spawn_model_load(
            "assets/commodore_64.obj",
            Placement::at(4.0, -0.75, 0.0).rotated(0.0, -FRAC_PI_8, 0.0),
        );
        scene.spawn_model_load(
            "assets/game_boy_classic.obj",
            Placement::at(0.25, -0.5, 5.0)
                .rotated(0.0, -FRAC_PI_4, FRAC_PI_2)
                .scaled(8.0),
        );
        scene.spawn_model_load(
            "assets/childhood_books.obj",
            Placement::at(-6.0, -0.65, -4.0).rotated(0.0, -PI, 0.0).scaled(9.0),
        );

        scene.add_material(Material::from_hex("desk", 0x331a00));

        let (width, height, depth) = DESK_SIZE;
        let mut desk = Object::from_geometry(&generate_cuboid(width, height, depth));
        desk.set_name("desk");
        desk.set_material("desk");
        desk.position = Vector3::new(0.5, -0.85, 0.0);
        scene.add_object(desk);

        scene.add_light(Light::point(
            Vector3::new(0.0, 5.0, 0.0),
            [1.0, 1.0, 1.0],
            150.0,
        ));

        scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_desk_and_spawns_four_loads() {
        let scene = WorkstationScene.build();

        assert_eq!(scene.pending_loads(), 4);
        assert_eq!(scene.objects.len(), 1);
        assert_eq!(scene.objects[0].name, "desk");
        assert_eq!(scene.lights.len(), 1);
        // The desk never takes part in pointer picking.
        assert!(!scene.objects[0].selectable);
    }

    #[test]
    fn desk_slab_matches_requested_size() {
        let scene = WorkstationScene.build();
        let bounds = scene.objects[0].local_bounds();

        assert_eq!(bounds.max.x - bounds.min.x, 20.0);
        assert_eq!(bounds.max.y - bounds.min.y, 0.25);
        assert_eq!(bounds.max.z - bounds.min.z, 12.0);
    }
}
