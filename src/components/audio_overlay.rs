use crate::components::{Icon, ViewerController, AUDIO_ELEMENT_ID, VISUALIZER_ID};
use crate::media::{MediaKind, Panel, ViewerCommand};
use dioxus::prelude::*;

const VISUALIZER_WIDTH: u32 = 600;
const VISUALIZER_HEIGHT: u32 = 200;

#[component]
pub fn AudioOverlay() -> Element {
    let controller = use_context::<ViewerController>();
    let snapshot = controller.snapshot();
    let view = snapshot.audio.clone();
    let open = snapshot.visible == Some(Panel::Audio);
    let skip = controller.skip_seconds();

    rsx! {
        div {
            id: "audio-modal",
            class: if open { "modal open" } else { "modal" },
            onclick: controller.on_click(ViewerCommand::Close(Panel::Audio)),
            div {
                class: "modal-content audio-content",
                onclick: move |evt: MouseEvent| evt.stop_propagation(),
                div { class: "modal-header",
                    h2 { class: "modal-title", "{view.title}" }
                    div { class: "modal-actions",
                        a {
                            class: "icon-btn",
                            href: "{view.download_url}",
                            download: "{view.download_name}",
                            title: "Download",
                            Icon { name: "download".to_string(), class: "icon-md".to_string() }
                        }
                        button {
                            r#type: "button",
                            class: "icon-btn",
                            title: "Close",
                            onclick: controller.on_click(ViewerCommand::Close(Panel::Audio)),
                            Icon { name: "x".to_string(), class: "icon-md".to_string() }
                        }
                    }
                }
                canvas {
                    id: VISUALIZER_ID,
                    class: "visualizer",
                    width: "{VISUALIZER_WIDTH}",
                    height: "{VISUALIZER_HEIGHT}",
                }
                if !snapshot.spectrum_enabled {
                    p { class: "visualizer-note", "Spectrum unavailable in this browser." }
                }
                audio { id: AUDIO_ELEMENT_ID, preload: "metadata" }
                input {
                    r#type: "range",
                    class: "seek-bar",
                    min: "0",
                    max: "100",
                    step: "any",
                    value: "{view.progress_percent}",
                    oninput: controller.on_seek(MediaKind::Audio),
                }
                div { class: "control-row centered",
                    button {
                        r#type: "button",
                        class: "icon-btn",
                        title: "Back {skip}s",
                        onclick: controller.on_click(ViewerCommand::SeekRelative(MediaKind::Audio, -skip)),
                        Icon { name: "rewind".to_string(), class: "icon-md".to_string() }
                    }
                    button {
                        r#type: "button",
                        class: "icon-btn play-btn",
                        onclick: controller.on_click(ViewerCommand::TogglePlay(MediaKind::Audio)),
                        if view.is_playing {
                            Icon { name: "pause".to_string(), class: "icon-md".to_string() }
                        } else {
                            Icon { name: "play".to_string(), class: "icon-md".to_string() }
                        }
                    }
                    button {
                        r#type: "button",
                        class: "icon-btn",
                        title: "Forward {skip}s",
                        onclick: controller.on_click(ViewerCommand::SeekRelative(MediaKind::Audio, skip)),
                        Icon { name: "forward".to_string(), class: "icon-md".to_string() }
                    }
                    span { class: "time-label", "{view.time_label}" }
                }
            }
        }
    }
}
