//! Playback and visualization controller behind the overlay panels.
//!
//! Nothing in here touches the DOM. Browser handles are plugged in through the
//! traits in [`device`] and [`spectrum`]; see `components::web_backend`.
#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

pub mod controls;
pub mod device;
pub mod lightbox;
pub mod progress;
pub mod session;
pub mod spectrum;
pub mod viewer;

#[cfg(test)]
pub(crate) mod testing;

pub use device::MediaKind;
pub use viewer::{Panel, ViewerCommand, ViewerSnapshot};

// Only the browser bindings drive the viewer directly.
#[cfg(target_arch = "wasm32")]
pub use controls::TimerAction;
#[cfg(target_arch = "wasm32")]
pub use device::{MediaDevice, Presentation};
#[cfg(target_arch = "wasm32")]
pub use spectrum::FrameOutcome;
#[cfg(target_arch = "wasm32")]
pub use viewer::{Effects, MediaViewer, ViewerParts, ViewerPlatform};
