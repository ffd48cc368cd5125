pub mod drag;

// Re-export main types
pub use drag::{DragSelector, ROTATION_SPEED};
