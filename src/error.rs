use thiserror::Error;

/// Errors surfaced by the vitrine library.
///
/// Frame-time code is total over well-formed input; everything that can
/// actually fail sits at the edges (asset decoding, window system startup).
#[derive(Debug, Error)]
pub enum VitrineError {
    #[error("failed to load model `{path}`")]
    ModelLoad {
        path: String,
        #[source]
        source: tobj::LoadError,
    },

    #[error("model loader for `{0}` shut down before delivering a result")]
    LoaderGone(String),

    #[error("event loop error")]
    EventLoop(#[from] winit::error::EventLoopError),
}
