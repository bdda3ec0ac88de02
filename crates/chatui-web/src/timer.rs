//! Browser timer

use std::time::Duration;

use async_trait::async_trait;
use chatui_core::Delay;
use wasm_bindgen::JsValue;

/// Sleeps on `window.setTimeout`; dropping the future clears the timeout
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserDelay;

struct TimeoutGuard(i32);

impl Drop for TimeoutGuard {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            window.clear_timeout_with_handle(self.0);
        }
    }
}

#[async_trait(?Send)]
impl Delay for BrowserDelay {
    async fn sleep(&self, duration: Duration) {
        let millis = i32::try_from(duration.as_millis()).unwrap_or(i32::MAX);
        let mut handle = None;
        let promise = js_sys::Promise::new(&mut |resolve, _reject| {
            let scheduled = web_sys::window().and_then(|w| {
                w.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis)
                    .ok()
            });
            match scheduled {
                Some(id) => handle = Some(id),
                None => {
                    let _ = resolve.call0(&JsValue::NULL);
                }
            }
        });
        let _guard = handle.map(TimeoutGuard);
        let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
    }
}
