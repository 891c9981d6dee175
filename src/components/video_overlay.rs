use crate::components::{Icon, ViewerController, VIDEO_ELEMENT_ID, VIDEO_WRAPPER_ID};
use crate::media::{MediaKind, Panel, ViewerCommand};
use dioxus::prelude::*;

const MAX_BRIGHTNESS: f64 = 2.0;

#[component]
pub fn VideoOverlay() -> Element {
    let controller = use_context::<ViewerController>();
    let snapshot = controller.snapshot();
    let view = snapshot.video.clone();
    let open = snapshot.visible == Some(Panel::Video);
    let skip = controller.skip_seconds();
    let brightness = snapshot.brightness;

    let on_brightness = {
        let controller = controller.clone();
        move |evt: FormEvent| {
            if let Ok(value) = evt.value().parse::<f64>() {
                controller.set_brightness(value);
            }
        }
    };

    let wrapper_class = if snapshot.fullscreen {
        "video-wrapper fullscreen"
    } else {
        "video-wrapper"
    };
    let wrapper_cursor = if snapshot.controls_visible {
        "cursor: default;"
    } else {
        "cursor: none;"
    };
    let controls_class = if snapshot.controls_visible {
        "video-controls"
    } else {
        "video-controls controls-hidden"
    };

    rsx! {
        div {
            id: "video-modal",
            class: if open { "modal open" } else { "modal" },
            onclick: controller.on_click(ViewerCommand::Close(Panel::Video)),
            div {
                class: "modal-content video-content",
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
                            onclick: controller.on_click(ViewerCommand::Close(Panel::Video)),
                            Icon { name: "x".to_string(), class: "icon-md".to_string() }
                        }
                    }
                }
                div {
                    id: VIDEO_WRAPPER_ID,
                    class: "{wrapper_class}",
                    style: "{wrapper_cursor}",
                    onmousemove: {
                        let controller = controller.clone();
                        move |_| controller.dispatch(ViewerCommand::PointerActivity)
                    },
                    onclick: controller.on_click(ViewerCommand::PointerActivity),
                    video {
                        id: VIDEO_ELEMENT_ID,
                        class: "main-video",
                        style: "filter: brightness({brightness});",
                        playsinline: true,
                    }
                    div { class: "{controls_class}",
                        input {
                            r#type: "range",
                            class: "seek-bar",
                            min: "0",
                            max: "100",
                            step: "any",
                            value: "{view.progress_percent}",
                            oninput: controller.on_seek(MediaKind::Video),
                        }
                        div { class: "control-row",
                            div { class: "control-group",
                                button {
                                    r#type: "button",
                                    class: "icon-btn",
                                    title: "Back {skip}s",
                                    onclick: controller.on_click(ViewerCommand::SeekRelative(MediaKind::Video, -skip)),
                                    Icon { name: "rewind".to_string(), class: "icon-md".to_string() }
                                }
                                button {
                                    r#type: "button",
                                    class: "icon-btn play-btn",
                                    onclick: controller.on_click(ViewerCommand::TogglePlay(MediaKind::Video)),
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
                                    onclick: controller.on_click(ViewerCommand::SeekRelative(MediaKind::Video, skip)),
                                    Icon { name: "forward".to_string(), class: "icon-md".to_string() }
                                }
                                span { class: "time-label", "{view.time_label}" }
                            }
                            div { class: "control-group",
                                label { class: "brightness",
                                    Icon { name: "sun".to_string(), class: "icon-sm".to_string() }
                                    input {
                                        r#type: "range",
                                        min: "0",
                                        max: "{MAX_BRIGHTNESS}",
                                        step: "0.1",
                                        value: "{brightness}",
                                        oninput: on_brightness,
                                    }
                                }
                                button {
                                    r#type: "button",
                                    class: "icon-btn",
                                    title: "Fullscreen",
                                    onclick: controller.on_click(ViewerCommand::ToggleFullscreen),
                                    if snapshot.fullscreen {
                                        Icon { name: "compress".to_string(), class: "icon-md".to_string() }
                                    } else {
                                        Icon { name: "expand".to_string(), class: "icon-md".to_string() }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
