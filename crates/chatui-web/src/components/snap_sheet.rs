//! Draggable bottom sheet
//!
//! DOM side of [`SnapPanel`]: pointer events feed the gesture model and the
//! current [`chatui_core::Frame`] is written back as a `translateY`. The
//! transition is switched off while a finger is down so the sheet follows it
//! 1:1, and back on when the gesture resolves.

use chatui_core::{Metrics, SnapPanel};
use leptos::ev;
use leptos::html;
use leptos::prelude::*;
use web_sys::PointerEvent;

const TRANSITION: &str = "transform 280ms cubic-bezier(0.2, 0.8, 0.2, 1)";

fn viewport_height() -> Option<f64> {
    web_sys::window()?.inner_height().ok()?.as_f64()
}

/// On-screen offset of the sheet, which lags the committed one mid-transition
fn measured_offset(sheet: &web_sys::Element, metrics: &Metrics) -> Option<f64> {
    let top = sheet.get_bounding_client_rect().top();
    let rest_top = metrics.viewport_height - metrics.panel_height;
    let offset = top - rest_top;
    offset.is_finite().then_some(offset)
}

#[component]
pub fn SnapSheet(
    panel: RwSignal<SnapPanel>,
    #[prop(into)] title: String,
    children: Children,
) -> impl IntoView {
    let sheet_ref = NodeRef::<html::Div>::new();
    let handle_ref = NodeRef::<html::Div>::new();

    if let Some(height) = viewport_height() {
        panel.update(|p| {
            p.resize(height);
        });
    }
    let resize = window_event_listener(ev::resize, move |_| {
        if let Some(height) = viewport_height() {
            panel.try_update(|p| {
                p.resize(height);
            });
        }
    });
    on_cleanup(move || resize.remove());

    let on_down = move |ev: PointerEvent| {
        let visual = sheet_ref.get_untracked().and_then(|sheet| {
            panel.with_untracked(|p| p.metrics().and_then(|m| measured_offset(&sheet, m)))
        });
        let started = panel
            .try_update(|p| p.on_gesture_start(f64::from(ev.client_y()), visual))
            .unwrap_or(false);
        if started {
            if let Some(handle) = handle_ref.get_untracked() {
                if let Err(err) = handle.set_pointer_capture(ev.pointer_id()) {
                    tracing::debug!(?err, "pointer capture unavailable");
                }
            }
        }
    };
    let on_move = move |ev: PointerEvent| {
        if panel.with_untracked(SnapPanel::is_dragging) {
            panel.update(|p| {
                p.on_gesture_move(f64::from(ev.client_y()));
            });
        }
    };
    let on_up = move |_: PointerEvent| {
        if panel.with_untracked(SnapPanel::is_dragging) {
            panel.update(|p| {
                p.on_gesture_end();
            });
        }
    };
    let on_cancel = move |_: PointerEvent| {
        if panel.with_untracked(SnapPanel::is_dragging) {
            panel.update(|p| {
                p.on_gesture_cancel();
            });
        }
    };

    let frame = Memo::new(move |_| panel.with(SnapPanel::frame));
    let transform = move || match frame.get() {
        Some(f) => format!("translateY({}px)", f.offset),
        None => "translateY(100%)".to_string(),
    };
    let transition = move || match frame.get() {
        Some(f) if !f.animated => "none",
        _ => TRANSITION,
    };
    let height = move || {
        panel.with(|p| p.metrics().map(|m| format!("{}px", m.panel_height)))
            .unwrap_or_else(|| "92vh".to_string())
    };
    let is_open = move || panel.with(SnapPanel::is_open);

    view! {
        <div
            class="sheet-backdrop"
            class:visible=is_open
            on:click=move |_| panel.update(SnapPanel::close)
        ></div>
        <div
            class="sheet"
            class:open=is_open
            node_ref=sheet_ref
            style:height=height
            style:transform=transform
            style:transition=transition
        >
            <div
                class="sheet-handle"
                style="touch-action: none"
                node_ref=handle_ref
                on:pointerdown=on_down
                on:pointermove=on_move
                on:pointerup=on_up
                on:pointercancel=on_cancel
            >
                <span class="grip"></span>
                <h2>{title}</h2>
            </div>
            <button class="sheet-close" on:click=move |_| panel.update(SnapPanel::close)>
                "Close"
            </button>
            <div class="sheet-body">{children()}</div>
        </div>
    }
}
