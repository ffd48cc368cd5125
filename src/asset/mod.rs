//! # Asset Loading
//!
//! Model decoding runs off the event-loop thread. A scene spawns a load,
//! keeps the returned [`PendingModel`] handle, and polls it once per frame;
//! the render loop never waits on a decode. Dropping the handle cancels the
//! load: the worker checks the flag around the expensive step and skips
//! delivery for results nobody wants.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use cgmath::Vector3;
use futures::channel::oneshot;
use log::debug;

use crate::error::VitrineError;
use crate::gfx::geometry;

/// Where a loaded model lands in the scene.
#[derive(Debug, Clone, Copy)]
pub struct Placement {
    pub position: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub scale: Vector3<f32>,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Placement {
    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Vector3::new(x, y, z),
            ..Self::default()
        }
    }

    pub fn rotated(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rotation = Vector3::new(x, y, z);
        self
    }

    pub fn scaled(mut self, scale: f32) -> Self {
        self.scale = Vector3::new(scale, scale, scale);
        self
    }
}

/// Flat mesh arrays as decoded from an OBJ file.
#[derive(Debug, Clone)]
pub struct MeshData {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub indices: Vec<u32>,
}

/// A decoded model, ready to become a scene object.
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub name: String,
    pub meshes: Vec<MeshData>,
    /// Diffuse colour of the model's first material, when one exists.
    pub base_color: Option<[f32; 4]>,
}

/// Handle to a model load in flight.
///
/// Dropping the handle flags the load as cancelled; the worker thread
/// abandons the result instead of delivering it.
pub struct PendingModel {
    label: String,
    placement: Placement,
    receiver: oneshot::Receiver<Result<LoadedModel, VitrineError>>,
    cancelled: Arc<AtomicBool>,
}

impl PendingModel {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Non-blocking check for the load result. `None` while the worker is
    /// still busy; a worker that died without delivering reports an error.
    pub fn poll(&mut self) -> Option<Result<LoadedModel, VitrineError>> {
        match self.receiver.try_recv() {
            Ok(Some(result)) => Some(result),
            Ok(None) => None,
            Err(oneshot::Canceled) => Some(Err(VitrineError::LoaderGone(self.label.clone()))),
        }
    }
}

impl Drop for PendingModel {
    fn drop(&mut self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}

/// Spawns a background load of an OBJ model.
pub fn load_model_async(path: impl Into<PathBuf>, placement: Placement) -> PendingModel {
    let path = path.into();
    let label = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let (sender, receiver) = oneshot::channel();
    let cancelled = Arc::new(AtomicBool::new(false));

    let worker_flag = cancelled.clone();
    let worker_label = label.clone();
    thread::spawn(move || {
        if worker_flag.load(Ordering::Relaxed) {
            debug!("model load `{}` cancelled before decode", worker_label);
            return;
        }

        let result = load_obj(&path);

        if worker_flag.load(Ordering::Relaxed) {
            debug!("model load `{}` cancelled after decode", worker_label);
            return;
        }

        // A dropped receiver means the scene is gone; nothing to report.
        let _ = sender.send(result);
    });

    PendingModel {
        label,
        placement,
        receiver,
        cancelled,
    }
}

/// Decodes an OBJ file into mesh data, generating normals when the file
/// carries none.
pub fn load_obj(path: &Path) -> Result<LoadedModel, VitrineError> {
    let (models, materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
    )
    .map_err(|source| VitrineError::ModelLoad {
        path: path.display().to_string(),
        source,
    })?;

    let materials = materials.unwrap_or_default();
    let base_color = materials.first().and_then(|mtl| {
        mtl.diffuse
            .map(|d| [d[0], d[1], d[2], mtl.dissolve.unwrap_or(1.0)])
    });

    let name = models
        .first()
        .filter(|model| !model.name.is_empty())
        .map(|model| model.name.clone())
        .unwrap_or_else(|| {
            path.file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| "model".to_string())
        });

    let meshes = models
        .into_iter()
        .map(|model| {
            let mesh = model.mesh;
            let normals = if !mesh.normals.is_empty() && mesh.normals.len() == mesh.positions.len()
            {
                mesh.normals
            } else {
                geometry::vertex_normals(&mesh.positions, &mesh.indices)
            };

            MeshData {
                positions: mesh.positions,
                normals,
                indices: mesh.indices,
            }
        })
        .collect();

    Ok(LoadedModel {
        name,
        meshes,
        base_color,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropping_handle_sets_cancel_flag() {
        let pending = load_model_async("does-not-exist.obj", Placement::default());
        let flag = pending.cancelled.clone();

        drop(pending);
        assert!(flag.load(Ordering::Relaxed));
    }

    #[test]
    fn missing_file_reports_load_error() {
        let mut pending = load_model_async("does-not-exist.obj", Placement::default());

        // The worker only touches the filesystem, so a short spin suffices.
        let result = loop {
            if let Some(result) = pending.poll() {
                break result;
            }
            thread::yield_now();
        };

        match result {
            Err(VitrineError::ModelLoad { path, .. }) => {
                assert!(path.contains("does-not-exist"));
            }
            other => panic!("expected ModelLoad error, got {other:?}"),
        }
    }

    #[test]
    fn obj_buffer_decodes_with_generated_normals() {
        let data = b"o tri\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
        let (models, _) = tobj::load_obj_buf(
            &mut std::io::Cursor::new(&data[..]),
            &tobj::LoadOptions {
                triangulate: true,
                single_index: true,
                ..Default::default()
            },
            |_| Err(tobj::LoadError::OpenFileFailed),
        )
        .expect("inline OBJ parses");

        let mesh = &models[0].mesh;
        assert_eq!(mesh.positions.len(), 9);
        assert!(mesh.normals.is_empty());

        let normals = geometry::vertex_normals(&mesh.positions, &mesh.indices);
        assert_eq!(normals.len(), mesh.positions.len());
    }

    #[test]
    fn placement_builder_composes() {
        let placement = Placement::at(0.25, -0.5, 5.0)
            .rotated(0.0, -std::f32::consts::FRAC_PI_4, std::f32::consts::FRAC_PI_2)
            .scaled(8.0);

        assert_eq!(placement.position.x, 0.25);
        assert_eq!(placement.scale.y, 8.0);
        assert!(placement.rotation.y < 0.0);
    }
}
