//! # Viewport Synchronisation
//!
//! Keeps a surface's backing buffer in step with its layout size and the
//! display's scale factor, and keeps the camera projection in step with the
//! backing buffer. Every scene shares this one driver instead of carrying
//! its own copy of the resize check.
//!
//! The check runs once per frame, before anything is drawn. It only touches
//! the camera when the backing buffer actually changed; unchanged frames
//! are a cheap compare.

use log::debug;

/// A drawable surface whose pixel buffer can lag behind its layout size.
///
/// The driver never creates or owns the surface; it only reads sizes and
/// requests backing-buffer resizes through this seam.
pub trait DrawSurface {
    /// Current layout size in logical pixels.
    fn display_size(&self) -> (f64, f64);

    /// Scaling factor between logical and physical pixels.
    fn scale_factor(&self) -> f64;

    /// Current pixel buffer size.
    fn backing_size(&self) -> (u32, u32);

    /// Resizes the pixel buffer. Must not alter the layout size.
    fn resize_backing(&mut self, width: u32, height: u32);
}

/// A camera whose projection tracks the surface it renders into.
pub trait ProjectionTarget {
    fn set_aspect(&mut self, aspect: f32);

    /// Rebuilds the projection after an aspect change.
    fn refresh_projection(&mut self);
}

/// Synchronises the backing buffer with the displayed size and updates the
/// camera projection when a resize occurred.
///
/// Returns `true` exactly when the backing buffer was resized this call.
/// The aspect ratio is recomputed only on that path.
///
/// Degenerate layout sizes clamp to one pixel per axis, which keeps the
/// aspect division finite when the surface is collapsed or hidden.
pub fn sync_viewport<S, C>(surface: &mut S, camera: &mut C) -> bool
where
    S: DrawSurface,
    C: ProjectionTarget,
{
    let (display_width, display_height) = surface.display_size();
    let ratio = surface.scale_factor();

    let needed_width = (display_width.max(0.0) * ratio).floor().max(1.0) as u32;
    let needed_height = (display_height.max(0.0) * ratio).floor().max(1.0) as u32;

    if (needed_width, needed_height) == surface.backing_size() {
        return false;
    }

    debug!(
        "viewport resize to {}x{} (scale factor {})",
        needed_width, needed_height, ratio
    );

    surface.resize_backing(needed_width, needed_height);
    camera.set_aspect(needed_width as f32 / needed_height as f32);
    camera.refresh_projection();

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    struct TestSurface {
        display: (f64, f64),
        scale: f64,
        backing: (u32, u32),
        resize_calls: u32,
    }

    impl TestSurface {
        fn new(display: (f64, f64), scale: f64) -> Self {
            Self {
                display,
                scale,
                backing: (0, 0),
                resize_calls: 0,
            }
        }
    }

    impl DrawSurface for TestSurface {
        fn display_size(&self) -> (f64, f64) {
            self.display
        }

        fn scale_factor(&self) -> f64 {
            self.scale
        }

        fn backing_size(&self) -> (u32, u32) {
            self.backing
        }

        fn resize_backing(&mut self, width: u32, height: u32) {
            self.backing = (width, height);
            self.resize_calls += 1;
        }
    }

    #[derive(Default)]
    struct TestCamera {
        aspect: f32,
        refreshes: u32,
    }

    impl ProjectionTarget for TestCamera {
        fn set_aspect(&mut self, aspect: f32) {
            self.aspect = aspect;
        }

        fn refresh_projection(&mut self) {
            self.refreshes += 1;
        }
    }

    #[test]
    fn resizes_once_then_settles() {
        let mut surface = TestSurface::new((300.0, 150.0), 1.0);
        let mut camera = TestCamera::default();

        assert!(sync_viewport(&mut surface, &mut camera));
        assert!(!sync_viewport(&mut surface, &mut camera));
        assert!(!sync_viewport(&mut surface, &mut camera));
        assert_eq!(surface.resize_calls, 1);
    }

    #[test]
    fn high_dpi_backing_size_and_aspect() {
        let mut surface = TestSurface::new((300.0, 150.0), 2.0);
        let mut camera = TestCamera::default();

        assert!(sync_viewport(&mut surface, &mut camera));
        assert_eq!(surface.backing, (600, 300));
        assert_relative_eq!(camera.aspect, 2.0);
    }

    #[test]
    fn projection_refreshes_only_on_resize() {
        let mut surface = TestSurface::new((800.0, 600.0), 1.0);
        let mut camera = TestCamera::default();

        sync_viewport(&mut surface, &mut camera);
        sync_viewport(&mut surface, &mut camera);
        sync_viewport(&mut surface, &mut camera);
        assert_eq!(camera.refreshes, 1);

        surface.display = (640.0, 480.0);
        sync_viewport(&mut surface, &mut camera);
        assert_eq!(camera.refreshes, 2);
        assert_relative_eq!(camera.aspect, 640.0 / 480.0);
    }

    #[test]
    fn aspect_tracks_backing_over_size_sequences() {
        let mut surface = TestSurface::new((0.0, 0.0), 1.5);
        let mut camera = TestCamera::default();

        for display in [(1024.0, 768.0), (333.0, 777.0), (199.0, 50.0)] {
            surface.display = display;
            sync_viewport(&mut surface, &mut camera);
            let (bw, bh) = surface.backing;
            assert_eq!(bw, (display.0 * 1.5).floor() as u32);
            assert_eq!(bh, (display.1 * 1.5).floor() as u32);
            assert_relative_eq!(camera.aspect, bw as f32 / bh as f32);
        }
    }

    #[test]
    fn collapsed_surface_clamps_to_one_pixel() {
        let mut surface = TestSurface::new((0.0, 0.0), 2.0);
        let mut camera = TestCamera::default();

        assert!(sync_viewport(&mut surface, &mut camera));
        assert_eq!(surface.backing, (1, 1));
        assert!(camera.aspect.is_finite());
        assert_relative_eq!(camera.aspect, 1.0);
    }

    #[test]
    fn fractional_sizes_floor() {
        let mut surface = TestSurface::new((301.5, 150.25), 1.25);
        let mut camera = TestCamera::default();

        sync_viewport(&mut surface, &mut camera);
        assert_eq!(surface.backing, (376, 187));
    }
}
