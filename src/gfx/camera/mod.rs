pub mod camera_controller;
pub mod orbit_camera;

// Re-export main types
pub use camera_controller::CameraController;
pub use orbit_camera::{OrbitCamera, OrbitCameraBounds};

use cgmath::{Matrix4, SquareMatrix};
use winit::event::WindowEvent;

/// Couples a camera with the controller that steers it.
pub struct CameraRig {
    pub camera: OrbitCamera,
    pub controller: CameraController,
}

impl CameraRig {
    pub fn new(camera: OrbitCamera, controller: CameraController) -> Self {
        Self { camera, controller }
    }

    /// Routes a window event into the controller. Returns `true` when the
    /// event changed the camera and a redraw is worthwhile.
    pub fn process_event(&mut self, event: &WindowEvent) -> bool {
        self.controller.process_window_event(event, &mut self.camera)
    }

    /// Advances damping and auto-rotation, then refreshes the GPU uniform.
    pub fn update(&mut self, dt: f32) {
        self.controller.update(&mut self.camera, dt);
        self.camera.update_view_proj();
    }
}

pub trait Camera: Sized {
    fn build_view_projection_matrix(&self) -> Matrix4<f32>;
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct CameraUniform {
    /// The eye position of the camera in homogenous coordinates.
    ///
    /// Homogenous coordinates are used to fullfill the 16 byte alignment requirement.
    pub view_position: [f32; 4],

    /// Contains the view projection matrix.
    pub view_proj: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            view_position: [0.0; 4],
            view_proj: convert_matrix4_to_array(Matrix4::identity()),
        }
    }
}

pub fn convert_matrix4_to_array(matrix4: Matrix4<f32>) -> [[f32; 4]; 4] {
    let mut result = [[0.0; 4]; 4];

    for i in 0..4 {
        for j in 0..4 {
            result[i][j] = matrix4[i][j];
        }
    }

    result
}
