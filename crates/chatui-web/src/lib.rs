//! chatui Web Frontend
//!
//! Leptos-based WASM frontend: chat bubbles, suggestion chips, detail cards
//! and a draggable history sheet.

mod app;
mod components;
mod pages;
mod timer;

pub use app::App;

use chatui_core::ChatConfig;
use leptos::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

const CONFIG_META: &str = "meta[name=chatui-config]";

/// Default filter for the browser console
const LOG_FILTER: &str = "info,chatui_core=debug,chatui_web=debug";

/// Route `tracing` events to the devtools console
fn init_logging() {
    let console = tracing_subscriber::fmt::layer()
        .without_time()
        .with_writer(tracing_web::MakeWebConsoleWriter::new());
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(LOG_FILTER))
        .with(console)
        .init();
}

/// Read configuration from `<meta name="chatui-config" content="{...}">`.
///
/// A missing tag means defaults; an invalid one is reported and ignored.
fn load_config() -> ChatConfig {
    let content = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.query_selector(CONFIG_META).ok().flatten())
        .and_then(|el| el.dyn_into::<web_sys::HtmlMetaElement>().ok())
        .map(|meta| meta.content());

    match content {
        Some(json) => ChatConfig::from_json(&json).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "invalid chatui-config, using defaults");
            ChatConfig::default()
        }),
        None => ChatConfig::default(),
    }
}

/// WASM entry point
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    init_logging();
    let config = load_config();
    leptos::mount::mount_to_body(move || view! { <App config=config.clone() /> });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_parses() {
        assert!(tracing_subscriber::EnvFilter::try_new(LOG_FILTER).is_ok());
    }
}
