use crate::components::{Icon, ViewerController};
use crate::media::{Panel, ViewerCommand};
use dioxus::prelude::*;

/// Full-size image view with cyclic previous/next.
#[component]
pub fn LightboxOverlay() -> Element {
    let controller = use_context::<ViewerController>();
    let Some(image) = controller.snapshot().image else {
        return rsx! {};
    };
    let position = image.index + 1;

    rsx! {
        div {
            id: "lightbox-modal",
            class: "modal open lightbox",
            onclick: controller.on_click(ViewerCommand::Close(Panel::Lightbox)),
            div {
                class: "lightbox-content",
                onclick: move |evt: MouseEvent| evt.stop_propagation(),
                button {
                    r#type: "button",
                    class: "icon-btn lightbox-close",
                    title: "Close",
                    onclick: controller.on_click(ViewerCommand::Close(Panel::Lightbox)),
                    Icon { name: "x".to_string(), class: "icon-md".to_string() }
                }
                button {
                    r#type: "button",
                    class: "icon-btn lightbox-prev",
                    title: "Previous",
                    onclick: controller.on_click(ViewerCommand::AdvanceImage(-1)),
                    Icon { name: "chevron-left".to_string(), class: "icon-lg".to_string() }
                }
                img { class: "lightbox-img", src: "{image.src}", alt: "{image.download_name}" }
                button {
                    r#type: "button",
                    class: "icon-btn lightbox-next",
                    title: "Next",
                    onclick: controller.on_click(ViewerCommand::AdvanceImage(1)),
                    Icon { name: "chevron-right".to_string(), class: "icon-lg".to_string() }
                }
                div { class: "lightbox-footer",
                    span { class: "lightbox-counter", "{position} / {image.total}" }
                    a {
                        class: "icon-btn",
                        href: "{image.src}",
                        download: "{image.download_name}",
                        title: "Download",
                        Icon { name: "download".to_string(), class: "icon-md".to_string() }
                    }
                }
            }
        }
    }
}
