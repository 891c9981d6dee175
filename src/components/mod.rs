//! The components module contains all shared components for the viewer.

mod app;
mod audio_overlay;
mod gallery;
mod icons;
mod lightbox;
mod video_overlay;
mod viewer_controller;
#[cfg(target_arch = "wasm32")]
mod web_backend;

pub use app::*;
pub use audio_overlay::*;
pub use gallery::*;
pub use icons::*;
pub use lightbox::*;
pub use video_overlay::*;
pub use viewer_controller::*;

// DOM ids the controller binds to after the overlays mount.
pub const VIDEO_ELEMENT_ID: &str = "main-video";
pub const AUDIO_ELEMENT_ID: &str = "main-audio";
pub const VIDEO_WRAPPER_ID: &str = "video-wrapper";
pub const VISUALIZER_ID: &str = "audio-visualizer";
