// src/lib.rs
//! Vitrine 3D scene showcase
//!
//! A small engine for animated 3D showcase scenes, built on wgpu and winit.
//! Each scene is a short setup script; the window shell, viewport handling,
//! rendering, and pointer interaction are shared.

pub mod app;
pub mod asset;
pub mod error;
pub mod gfx;
pub mod input;
pub mod scenes;

// Re-export main types for convenience
pub use app::VitrineApp;
pub use error::VitrineError;

use scenes::SceneKind;

/// Creates an application instance showing the given scene
pub fn showcase(kind: SceneKind) -> Result<VitrineApp, VitrineError> {
    VitrineApp::new(kind)
}
