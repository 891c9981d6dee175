use crate::api::MediaItem;
use crate::components::{Icon, ViewerController};
use crate::media::{MediaKind, ViewerCommand};
use dioxus::prelude::*;

#[component]
pub fn ImageGrid(items: Vec<MediaItem>) -> Element {
    let controller = use_context::<ViewerController>();

    if items.is_empty() {
        return rsx! {
            EmptyGallery { label: "No images uploaded yet.".to_string() }
        };
    }

    rsx! {
        div { class: "image-grid",
            for (index, item) in items.iter().enumerate() {
                button {
                    key: "{item.url}",
                    r#type: "button",
                    class: "image-card",
                    onclick: controller.on_click(ViewerCommand::OpenImage(index)),
                    img {
                        src: "{item.url}",
                        alt: "{item.display_title()}",
                        loading: "lazy",
                    }
                }
            }
        }
    }
}

/// Playable list for one media kind; each row opens its overlay.
#[component]
pub fn MediaList(kind: MediaKind, items: Vec<MediaItem>) -> Element {
    let controller = use_context::<ViewerController>();

    if items.is_empty() {
        let label = format!("No {} uploaded yet.", kind.label());
        return rsx! {
            EmptyGallery { label }
        };
    }

    let icon = match kind {
        MediaKind::Video => "film",
        MediaKind::Audio => "music",
    };

    rsx! {
        ul { class: "media-list",
            for item in items.iter() {
                li { key: "{item.url}",
                    button {
                        r#type: "button",
                        class: "media-row",
                        onclick: controller.on_click(ViewerCommand::Open {
                            kind,
                            url: item.url.clone(),
                            title: item.display_title(),
                        }),
                        Icon { name: icon.to_string(), class: "row-icon".to_string() }
                        span { class: "media-title", "{item.display_title()}" }
                        Icon { name: "play".to_string(), class: "row-play".to_string() }
                    }
                }
            }
        }
    }
}

#[component]
fn EmptyGallery(label: String) -> Element {
    rsx! {
        div { class: "gallery-status", "{label}" }
    }
}
