//! # Showcase Scenes
//!
//! Each scene is a short script: `build` assembles the scene graph, and
//! `update` runs once per frame for scenes that animate. Everything else
//! (viewport handling, rendering, pointer input) is shared machinery.

pub mod orb;
pub mod orbs;
pub mod planet;
pub mod universe;
pub mod workstation;

use crate::gfx::scene::Scene;

/// Setup and per-frame behaviour of one showcase scene.
pub trait SceneScript {
    fn name(&self) -> &'static str;

    /// Assembles the scene graph. Model loads kick off here and attach
    /// asynchronously during later frames.
    fn build(&mut self) -> Scene;

    /// Per-frame animation hook. `elapsed` is seconds since the scene
    /// started, `dt` seconds since the previous frame.
    fn update(&mut self, scene: &mut Scene, elapsed: f32, dt: f32) {
        let _ = (scene, elapsed, dt);
    }
}

/// The scenes the showcase binary can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneKind {
    Orb,
    Orbs,
    Planet,
    Universe,
    Workstation,
}

impl SceneKind {
    pub const ALL: [SceneKind; 5] = [
        SceneKind::Orb,
        SceneKind::Orbs,
        SceneKind::Planet,
        SceneKind::Universe,
        SceneKind::Workstation,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SceneKind::Orb => "orb",
            SceneKind::Orbs => "orbs",
            SceneKind::Planet => "planet",
            SceneKind::Universe => "universe",
            SceneKind::Workstation => "workstation",
        }
    }

    pub fn parse(name: &str) -> Option<SceneKind> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == name.trim().to_lowercase())
    }

    pub fn script(self) -> Box<dyn SceneScript> {
        match self {
            SceneKind::Orb => Box::new(orb::OrbScene::new()),
            SceneKind::Orbs => Box::new(orbs::OrbsScene),
            SceneKind::Planet => Box::new(planet::PlanetScene),
            SceneKind::Universe => Box::new(universe::UniverseScene),
            SceneKind::Workstation => Box::new(workstation::WorkstationScene),
        }
    }
}
