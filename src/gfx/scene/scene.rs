use log::{info, warn};

use crate::asset::{self, Placement, PendingModel};
use crate::gfx::camera::CameraRig;
use crate::gfx::scene::material::{Material, MaterialSet};
use crate::gfx::scene::object::{Mesh, Object, ObjectId};

use super::light::Light;

/// Exponential-squared distance fog.
#[derive(Debug, Clone, Copy)]
pub struct FogExp2 {
    pub color: [f32; 3],
    pub density: f32,
}

/// Everything one showcase renders: objects, lights, materials and the
/// camera rig, plus any model loads still in flight.
pub struct Scene {
    pub camera_rig: CameraRig,
    pub objects: Vec<Object>,
    pub lights: Vec<Light>,
    pub materials: MaterialSet,
    pub fog: Option<FogExp2>,
    /// Clear colour behind the scene.
    pub background: [f64; 3],
    pending: Vec<PendingModel>,
}

impl Scene {
    /// Creates an empty scene around the given camera rig.
    pub fn new(camera_rig: CameraRig) -> Self {
        Self {
            camera_rig,
            objects: Vec::new(),
            lights: Vec::new(),
            materials: MaterialSet::new(),
            fog: None,
            background: [0.02, 0.02, 0.04],
            pending: Vec::new(),
        }
    }

    pub fn add_object(&mut self, object: Object) -> ObjectId {
        self.objects.push(object);
        ObjectId::new(self.objects.len() - 1)
    }

    pub fn object(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(id.index())
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
        self.objects.get_mut(id.index())
    }

    /// First object with the given name, if any. Useful for animating
    /// models that attach asynchronously.
    pub fn find_object(&self, name: &str) -> Option<ObjectId> {
        self.objects
            .iter()
            .position(|object| object.name == name)
            .map(ObjectId::new)
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn add_material(&mut self, material: Material) {
        self.materials.add(material);
    }

    /// Kicks off a background model load. The model attaches to the scene
    /// with the given placement once decoding finishes; dropping the scene
    /// first cancels the load.
    pub fn spawn_model_load(&mut self, path: &str, placement: Placement) {
        self.pending.push(asset::load_model_async(path, placement));
    }

    /// Number of model loads still in flight.
    pub fn pending_loads(&self) -> usize {
        self.pending.len()
    }

    /// Advances per-frame scene state: camera damping/auto-rotation and
    /// finished model loads.
    pub fn update(&mut self, dt: f32) {
        self.camera_rig.update(dt);
        self.poll_pending();
    }

    /// Attaches any finished model loads. Loads that failed are logged and
    /// dropped; the scene keeps rendering without them.
    fn poll_pending(&mut self) {
        let mut index = 0;
        while index < self.pending.len() {
            match self.pending[index].poll() {
                None => {
                    index += 1;
                }
                Some(Ok(model)) => {
                    let pending = self.pending.swap_remove(index);
                    self.attach_model(pending.label(), model, pending.placement());
                    info!("attached model `{}`", pending.label());
                }
                Some(Err(error)) => {
                    let pending = self.pending.swap_remove(index);
                    warn!("dropping model `{}`: {}", pending.label(), error);
                }
            }
        }
    }

    /// Objects attach under the load's label (the model file stem), not
    /// whatever name the file carries inside, so scene scripts can find
    /// them predictably.
    fn attach_model(
        &mut self,
        name: &str,
        model: asset::LoadedModel,
        placement: Placement,
    ) -> ObjectId {
        let meshes = model
            .meshes
            .into_iter()
            .map(|m| Mesh::new(m.positions, m.normals, m.indices))
            .collect();

        let mut object = Object::new(meshes);
        object.set_name(name);
        object.position = placement.position;
        object.rotation = placement.rotation;
        object.scale = placement.scale;

        if let Some(base_color) = model.base_color {
            self.materials.add(Material::new(name, base_color));
            object.set_material(name);
        }

        self.add_object(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::{CameraController, OrbitCamera};
    use cgmath::{Vector3, Zero};

    fn empty_scene() -> Scene {
        let camera = OrbitCamera::new(8.0, 0.0, 0.0, Vector3::zero(), 1.0);
        Scene::new(CameraRig::new(camera, CameraController::disabled()))
    }

    #[test]
    fn find_object_by_name() {
        let mut scene = empty_scene();
        let mut object = Object::new(Vec::new());
        object.set_name("planet_earth");
        let id = scene.add_object(object);

        assert_eq!(scene.find_object("planet_earth"), Some(id));
        assert_eq!(scene.find_object("missing"), None);
    }

    #[test]
    fn attach_model_applies_placement() {
        let mut scene = empty_scene();
        let model = asset::LoadedModel {
            name: "gameboy".to_string(),
            meshes: Vec::new(),
            base_color: Some([0.5, 0.5, 0.5, 1.0]),
        };
        let placement = Placement {
            position: Vector3::new(0.25, -0.5, 5.0),
            rotation: Vector3::new(0.0, -std::f32::consts::FRAC_PI_4, 0.0),
            scale: Vector3::new(8.0, 8.0, 8.0),
        };

        let id = scene.attach_model("gameboy", model, placement);
        let object = scene.object(id).unwrap();
        assert_eq!(object.position.z, 5.0);
        assert_eq!(object.scale.x, 8.0);
        assert_eq!(object.material.as_deref(), Some("gameboy"));
        assert_eq!(scene.materials.for_object(object.material.as_deref()).name, "gameboy");
    }
}
