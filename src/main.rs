use dioxus::prelude::*;

mod api;
mod components;
mod db;
mod error;
mod media;
mod utils;

use components::AppShell;

const VIEWER_CSS: Asset = asset!("/assets/styling/viewer.css");

fn main() {
    init_logging();
    dioxus::launch(App);
}

#[cfg(target_arch = "wasm32")]
fn init_logging() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
}

#[cfg(not(target_arch = "wasm32"))]
fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

#[component]
fn App() -> Element {
    rsx! {
        document::Meta { name: "theme-color", content: "#101020" }
        document::Title { "MediaView" }
        document::Stylesheet { href: VIEWER_CSS }

        AppShell {}
    }
}
