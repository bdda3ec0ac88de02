//! Message bubble with chips, detail card and votes

use chatui_core::{ChatAction, Details, Turn, TurnId, Vote};
use chrono::Utc;
use leptos::prelude::*;

/// Message bubble component
#[component]
pub fn MessageBubble(
    turn: Turn,
    on_action: impl Fn(ChatAction) + Send + Sync + Clone + 'static,
) -> impl IntoView {
    let class = format!(
        "message message-{}{}",
        turn.role,
        if turn.failed { " failed" } else { "" }
    );
    let id = turn.id;
    let time = turn.at.format("%H:%M").to_string();
    let votable = !turn.is_user() && !turn.failed;
    let expanded = turn.details_expanded;
    let vote = turn.vote;

    let card = turn.details.map(|details| {
        let on_action = on_action.clone();
        view! {
            <DetailCard
                details
                expanded
                on_toggle=move || on_action(ChatAction::ToggleDetails { turn: id })
            />
        }
    });
    let votes = votable.then(|| {
        let on_action = on_action.clone();
        view! { <VoteButtons turn=id vote on_action /> }
    });
    let suggestions = turn.suggestions;
    let chips = (!suggestions.is_empty())
        .then(move || view! { <SuggestionChips suggestions on_action /> });

    view! {
        <div class=class>
            <p class="content">{turn.content}</p>
            <span class="time">{time}</span>
            {card}
            {votes}
            {chips}
        </div>
    }
}

#[component]
fn DetailCard(
    details: Details,
    expanded: bool,
    on_toggle: impl Fn() + Send + Sync + 'static,
) -> impl IntoView {
    let items = expanded.then(|| {
        view! {
            <ul class="details-items">
                {details.items.into_iter().map(|item| view! { <li>{item}</li> }).collect_view()}
            </ul>
        }
    });

    view! {
        <div class="details" class:expanded=expanded>
            <button class="details-toggle" on:click=move |_| on_toggle()>
                <span>{details.title}</span>
                <span class="chevron">{if expanded { "▾" } else { "▸" }}</span>
            </button>
            {items}
        </div>
    }
}

#[component]
fn VoteButtons(
    turn: TurnId,
    vote: Vote,
    on_action: impl Fn(ChatAction) + Send + Sync + Clone + 'static,
) -> impl IntoView {
    let class_for = move |v: Vote| if vote == v { "vote active" } else { "vote" };
    let on_down = on_action.clone();

    view! {
        <div class="votes">
            <button
                class=class_for(Vote::Up)
                title="Helpful"
                on:click=move |_| on_action(ChatAction::ToggleVote { turn, vote: Vote::Up })
            >
                "👍"
            </button>
            <button
                class=class_for(Vote::Down)
                title="Not helpful"
                on:click=move |_| on_down(ChatAction::ToggleVote { turn, vote: Vote::Down })
            >
                "👎"
            </button>
        </div>
    }
}

#[component]
fn SuggestionChips(
    suggestions: Vec<String>,
    on_action: impl Fn(ChatAction) + Send + Sync + Clone + 'static,
) -> impl IntoView {
    view! {
        <div class="chips">
            {suggestions
                .into_iter()
                .map(|text| {
                    let label = text.clone();
                    let on_action = on_action.clone();
                    view! {
                        <button
                            class="chip"
                            on:click=move |_| on_action(ChatAction::ChooseSuggestion {
                                text: text.clone(),
                                at: Utc::now(),
                            })
                        >
                            {label}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}
