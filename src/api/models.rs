use serde::{Deserialize, Serialize};

use crate::media::MediaKind;
use crate::utils::download_name;

/// One uploaded file as listed by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub url: String,
    #[serde(default, alias = "name")]
    pub title: String,
}

impl MediaItem {
    /// Title to show; derived from the file name when the server sent none.
    pub fn display_title(&self) -> String {
        let title = self.title.trim();
        if title.is_empty() {
            download_name(&self.url, &self.url)
        } else {
            title.to_string()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MediaLibrary {
    #[serde(default)]
    pub images: Vec<MediaItem>,
    #[serde(default)]
    pub videos: Vec<MediaItem>,
    #[serde(default, alias = "audios")]
    pub audio: Vec<MediaItem>,
}

impl MediaLibrary {
    /// Ordered image urls for the lightbox.
    pub fn image_sources(&self) -> Vec<String> {
        self.images.iter().map(|item| item.url.clone()).collect()
    }

    pub fn items(&self, kind: MediaKind) -> &[MediaItem] {
        match kind {
            MediaKind::Video => &self.videos,
            MediaKind::Audio => &self.audio,
        }
    }
}
