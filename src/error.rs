//! Error type shared by the viewer core and its browser bindings.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewerError {
    #[error("Error attempting to enable fullscreen: {0}")]
    FullscreenDenied(String),
    #[error("audio analysis is unavailable: {0}")]
    AnalysisUnavailable(String),
    #[error("drawing surface is unavailable: {0}")]
    SurfaceUnavailable(String),
    #[error("media device error: {0}")]
    Device(String),
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
    #[error("could not load media library: {0}")]
    Library(String),
}

pub type Result<T, E = ViewerError> = std::result::Result<T, E>;
