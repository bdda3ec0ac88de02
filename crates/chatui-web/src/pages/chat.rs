//! Chat Page

use std::sync::Arc;

use chatui_core::{
    reduce, request_reply, ChatAction, ChatConfig, ChatState, ConversationId, ReplyProvider,
    SnapPanel,
};
use chatui_runtime::CannedReplyProvider;
use chrono::Utc;
use futures::future::AbortHandle;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{HistoryList, MessageBubble, SnapSheet};
use crate::timer::BrowserDelay;

/// Enter sends, Shift+Enter breaks the line, and Enter that confirms an IME
/// candidate belongs to the composition
fn submits_on_key(key: &str, shift: bool, composing: bool) -> bool {
    key == "Enter" && !shift && !composing
}

#[component]
pub fn ChatPage() -> impl IntoView {
    let config = use_context::<ChatConfig>().unwrap_or_default();

    let state = RwSignal::new(ChatState::default());
    let panel = RwSignal::new(SnapPanel::new(config.panel.clone()));
    let (input, set_input) = signal(String::new());

    let seed = js_sys::Date::now() as u64;
    let provider: Arc<dyn ReplyProvider> =
        Arc::new(CannedReplyProvider::new(BrowserDelay, config.replies, seed));
    let provider = StoredValue::new(provider);
    let pending = StoredValue::new(None::<AbortHandle>);

    let abort_pending = move || {
        pending.try_update_value(|p| {
            if let Some(handle) = p.take() {
                handle.abort();
            }
        });
    };
    on_cleanup(abort_pending);

    // A disposed page drops the update instead of panicking
    let dispatch = move |action: ChatAction| {
        state.try_update(|s| {
            let next = reduce(s, action);
            *s = next;
        });
    };

    let start_reply = move || {
        let Some((turn, prompt)) = state.with_untracked(|s| {
            s.pending_reply
                .and_then(|id| s.turn(id).map(|t| (id, t.content.clone())))
        }) else {
            return;
        };
        let Some(provider) = provider.try_get_value() else {
            return;
        };
        let (reply, handle) = request_reply(provider, turn, prompt);
        pending.update_value(|p| {
            if let Some(stale) = p.replace(handle) {
                stale.abort();
            }
        });
        spawn_local(async move {
            if let Some(action) = reply.await {
                dispatch(action);
            }
        });
    };

    let on_action = move |action: ChatAction| {
        let asks = matches!(
            action,
            ChatAction::Submit { .. } | ChatAction::ChooseSuggestion { .. }
        );
        let was_waiting = state.with_untracked(ChatState::is_waiting);
        dispatch(action);
        if asks && !was_waiting {
            start_reply();
        }
    };

    let send = move |()| {
        let text = input.get_untracked();
        if text.trim().is_empty() {
            return;
        }
        set_input.set(String::new());
        on_action(ChatAction::Submit { text, at: Utc::now() });
    };

    let new_chat = move |_| {
        abort_pending();
        dispatch(ChatAction::NewConversation {
            id: ConversationId::new(),
            at: Utc::now(),
        });
    };

    let open_history = move |id: ConversationId| {
        tracing::debug!(conversation = %id, "restoring conversation from history");
        abort_pending();
        dispatch(ChatAction::RestoreConversation { id, at: Utc::now() });
        panel.update(SnapPanel::close);
    };
    let delete_history = move |id: ConversationId| dispatch(ChatAction::DeleteHistory { id });

    let waiting = move || state.with(ChatState::is_waiting);
    let history = Signal::derive(move || state.with(|s| s.history.clone()));

    view! {
        <div class="chat">
            <header class="chat-header">
                <h1>{move || state.with(ChatState::title)}</h1>
                <div class="actions">
                    <button class="btn" on:click=move |_| panel.update(SnapPanel::open)>
                        "History"
                    </button>
                    <button class="btn" on:click=new_chat>"New chat"</button>
                </div>
            </header>

            <main class="chat-main">
                <div class="messages">
                    <For
                        each=move || state.with(|s| s.turns.clone())
                        key=|turn| (turn.id, turn.vote, turn.details_expanded)
                        children=move |turn| view! { <MessageBubble turn on_action /> }
                    />
                    <Show when=waiting>
                        <div class="message message-assistant typing">
                            <span class="dot"></span>
                            <span class="dot"></span>
                            <span class="dot"></span>
                        </div>
                    </Show>
                </div>

                <div class="input-area">
                    <textarea
                        placeholder="Say something..."
                        prop:value=move || input.get()
                        on:input=move |ev| set_input.set(event_target_value(&ev))
                        on:keydown=move |ev| {
                            if submits_on_key(&ev.key(), ev.shift_key(), ev.is_composing()) {
                                ev.prevent_default();
                                send(());
                            }
                        }
                    />
                    <button on:click=move |_| send(()) disabled=waiting>
                        {move || if waiting() { "..." } else { "Send" }}
                    </button>
                </div>
            </main>

            <SnapSheet panel title="History">
                <HistoryList entries=history on_open=open_history on_delete=delete_history />
            </SnapSheet>
        </div>
    }
}
