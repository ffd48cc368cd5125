//! # Pointer Drag Selection
//!
//! Selecting an object under the pointer and rotating it while the pointer
//! is held. Two states: idle and dragging.
//!
//! - pointer down over an object starts a drag on the nearest hit;
//! - pointer down over nothing stays idle;
//! - pointer movement while dragging turns into rotation on the selected
//!   object;
//! - pointer up releases, keeping whatever rotation accumulated.
//!
//! Selection state lives in this struct rather than module globals so
//! several scene instances can run independent drags under test.

use log::debug;

use crate::gfx::picking::{screen_to_ndc, RayCast, RayHit};
use crate::gfx::scene::object::{Object, ObjectId};

/// Radians of object rotation applied per pixel of pointer travel.
///
/// Chosen by feel; raise for touchier rotation.
pub const ROTATION_SPEED: f32 = 0.005;

/// Pointer drag session over a scene's selectable objects.
#[derive(Debug, Default)]
pub struct DragSelector {
    active: bool,
    selected: Option<ObjectId>,
    last_position: (f64, f64),
}

impl DragSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.active
    }

    pub fn selected(&self) -> Option<ObjectId> {
        self.selected
    }

    /// Pointer pressed at screen position `(x, y)` inside a view of the
    /// given logical size. Ray-casts through the collaborator and begins a
    /// drag when something is hit; a miss leaves the state untouched.
    pub fn on_pointer_down<C: RayCast>(
        &mut self,
        x: f64,
        y: f64,
        view_size: (f64, f64),
        caster: &C,
    ) {
        let ndc = screen_to_ndc(x, y, view_size.0, view_size.1);
        let hits = caster.cast(ndc);

        if let Some(hit) = nearest(&hits) {
            debug!(
                "drag start on object {} at distance {}",
                hit.object.index(),
                hit.distance
            );
            self.active = true;
            self.selected = Some(hit.object);
            self.last_position = (x, y);
        }
    }

    /// Pointer moved. While a drag is active the movement delta becomes
    /// rotation on the selected object: horizontal travel spins it around
    /// Y, vertical travel around X. Outside a drag this does nothing.
    pub fn on_pointer_move(&mut self, x: f64, y: f64, objects: &mut [Object]) {
        if !self.active {
            return;
        }
        let Some(id) = self.selected else {
            return;
        };

        let delta_x = (x - self.last_position.0) as f32;
        let delta_y = (y - self.last_position.1) as f32;

        if let Some(object) = objects.get_mut(id.index()) {
            object.rotation.y += delta_x * ROTATION_SPEED;
            object.rotation.x += delta_y * ROTATION_SPEED;
        }

        self.last_position = (x, y);
    }

    /// Pointer released (or left the window, or the window lost focus).
    /// Always ends the drag; calling it while idle is a no-op.
    pub fn on_pointer_up(&mut self) {
        self.active = false;
        self.selected = None;
    }
}

/// Nearest hit, keeping the earlier entry when distances tie.
fn nearest(hits: &[RayHit]) -> Option<&RayHit> {
    let mut best: Option<&RayHit> = None;
    for hit in hits {
        if best.map_or(true, |b| hit.distance < b.distance) {
            best = Some(hit);
        }
    }
    best
}
