pub mod light;
pub mod material;
pub mod object;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use light::{Light, LightUniform, MAX_LIGHTS};
pub use material::{Material, MaterialSet};
pub use object::{Mesh, Object, ObjectId};
pub use scene::{FogExp2, Scene};
