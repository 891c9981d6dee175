use crate::api::{fetch_library, MediaLibrary};
use crate::components::{
    AudioOverlay, Icon, ImageGrid, LightboxOverlay, MediaList, VideoOverlay, ViewerController,
};
use crate::db::load_settings;
use crate::media::{MediaKind, ViewerCommand, ViewerSnapshot};
use dioxus::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryTab {
    Images,
    Videos,
    Audio,
}

impl GalleryTab {
    const ALL: [GalleryTab; 3] = [GalleryTab::Images, GalleryTab::Videos, GalleryTab::Audio];

    fn label(self) -> &'static str {
        match self {
            GalleryTab::Images => "Images",
            GalleryTab::Videos => "Videos",
            GalleryTab::Audio => "Audio",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            GalleryTab::Images => "image",
            GalleryTab::Videos => "film",
            GalleryTab::Audio => "music",
        }
    }
}

/// Loading state of the media listing.
#[derive(Debug, Clone, PartialEq)]
enum LibraryState {
    Loading,
    Ready(MediaLibrary),
    Failed(String),
}

#[component]
pub fn AppShell() -> Element {
    let settings = use_signal(load_settings);
    let snapshot = use_signal(ViewerSnapshot::default);
    let controller = use_hook(|| ViewerController::new(snapshot, settings));
    let mut active_tab = use_signal(|| GalleryTab::Images);
    let mut library = use_signal(|| LibraryState::Loading);

    use_context_provider(|| controller.clone());

    use_future(move || async move {
        match fetch_library().await {
            Ok(listing) => library.set(LibraryState::Ready(listing)),
            Err(err) => {
                log::error!("{err}");
                library.set(LibraryState::Failed(err.to_string()));
            }
        }
    });

    // The overlays are always mounted, so their elements exist once the
    // listing settles. The lightbox takes the image order from that listing.
    {
        let controller = controller.clone();
        use_effect(move || match &*library.read() {
            LibraryState::Loading => {}
            LibraryState::Ready(listing) => controller.attach(listing.image_sources()),
            LibraryState::Failed(_) => controller.attach(Vec::new()),
        });
    }

    let current_tab = active_tab();

    rsx! {
        div { class: "app-shell",
            header { class: "app-header",
                h1 { class: "app-title", "MediaView" }
                nav { class: "tab-bar",
                    for tab in GalleryTab::ALL {
                        button {
                            key: "{tab.label()}",
                            r#type: "button",
                            class: if tab == current_tab { "tab-btn active" } else { "tab-btn" },
                            onclick: move |_| active_tab.set(tab),
                            Icon { name: tab.icon().to_string(), class: "tab-icon".to_string() }
                            span { "{tab.label()}" }
                        }
                    }
                }
            }

            NoticeBanner {}

            main { class: "gallery",
                {
                    match &*library.read() {
                        LibraryState::Loading => rsx! {
                            div { class: "gallery-status",
                                Icon { name: "loader".to_string(), class: "status-icon".to_string() }
                                span { "Loading library..." }
                            }
                        },
                        LibraryState::Failed(message) => rsx! {
                            div { class: "gallery-status error", "Could not load media: {message}" }
                        },
                        LibraryState::Ready(listing) => match current_tab {
                            GalleryTab::Images => rsx! {
                                ImageGrid { items: listing.images.clone() }
                            },
                            GalleryTab::Videos => rsx! {
                                MediaList { kind: MediaKind::Video, items: listing.items(MediaKind::Video).to_vec() }
                            },
                            GalleryTab::Audio => rsx! {
                                MediaList { kind: MediaKind::Audio, items: listing.items(MediaKind::Audio).to_vec() }
                            },
                        },
                    }
                }
            }

            VideoOverlay {}
            AudioOverlay {}
            LightboxOverlay {}
        }
    }
}

/// Dismissible error notice, e.g. a refused fullscreen request.
#[component]
fn NoticeBanner() -> Element {
    let controller = use_context::<ViewerController>();
    let Some(notice) = controller.snapshot().notice else {
        return rsx! {};
    };

    rsx! {
        div { class: "notice-banner", role: "alert",
            span { class: "notice-text", "{notice}" }
            button {
                r#type: "button",
                class: "notice-dismiss",
                onclick: controller.on_click(ViewerCommand::DismissNotice),
                Icon { name: "x".to_string(), class: "icon-sm".to_string() }
            }
        }
    }
}
