//! Client for the upload server's media listing.

pub mod models;

pub use models::{MediaItem, MediaLibrary};

use once_cell::sync::Lazy;

use crate::error::{Result, ViewerError};

static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

const LIBRARY_PATH: &str = "/api/media";

#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Origin the listing is served from.
#[cfg(target_arch = "wasm32")]
pub fn base_url() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn base_url() -> String {
    std::env::var("MEDIAVIEW_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
}

pub fn library_url(base: &str) -> String {
    format!("{}{LIBRARY_PATH}", base.trim_end_matches('/'))
}

pub async fn fetch_library() -> Result<MediaLibrary> {
    let url = library_url(&base_url());
    let response = HTTP_CLIENT
        .get(&url)
        .send()
        .await
        .map_err(|e| ViewerError::Library(e.to_string()))?;

    if !response.status().is_success() {
        return Err(ViewerError::Library(format!(
            "{url} returned {}",
            response.status()
        )));
    }

    let library: MediaLibrary = response
        .json()
        .await
        .map_err(|e| ViewerError::Library(e.to_string()))?;
    log::info!(
        "library loaded: {} images, {} videos, {} audio",
        library.images.len(),
        library.videos.len(),
        library.audio.len()
    );
    Ok(library)
}
