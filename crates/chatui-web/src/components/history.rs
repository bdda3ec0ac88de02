//! History drawer contents

use chatui_core::{ConversationId, HistoryEntry};
use leptos::prelude::*;

#[component]
pub fn HistoryList(
    entries: Signal<Vec<HistoryEntry>>,
    on_open: impl Fn(ConversationId) + Send + Sync + Clone + 'static,
    on_delete: impl Fn(ConversationId) + Send + Sync + Clone + 'static,
) -> impl IntoView {
    view! {
        <Show
            when=move || entries.with(|e| !e.is_empty())
            fallback=|| view! { <p class="history-empty">"No past conversations yet"</p> }
        >
            <ul class="history">
                <For
                    each=move || entries.get()
                    key=|entry| entry.id.clone()
                    children={
                        let on_open = on_open.clone();
                        let on_delete = on_delete.clone();
                        move |entry: HistoryEntry| {
                            let open_id = entry.id.clone();
                            let delete_id = entry.id.clone();
                            let on_open = on_open.clone();
                            let on_delete = on_delete.clone();
                            let preview = entry.preview().unwrap_or_default().to_string();
                            let when = entry.archived_at.format("%b %e, %H:%M").to_string();
                            view! {
                                <li class="history-item">
                                    <button class="history-open" on:click=move |_| on_open(open_id.clone())>
                                        <span class="history-title">{entry.title}</span>
                                        <span class="history-preview">{preview}</span>
                                        <span class="history-time">{when}</span>
                                    </button>
                                    <button
                                        class="history-delete"
                                        title="Delete"
                                        on:click=move |_| on_delete(delete_id.clone())
                                    >
                                        "×"
                                    </button>
                                </li>
                            }
                        }
                    }
                />
            </ul>
        </Show>
    }
}
