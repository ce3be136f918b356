//! Delete Confirm Button Component
//!
//! A × that asks before it deletes. Clicks never reach the surrounding card.

use leptos::prelude::*;

const DEFAULT_PROMPT: &str = "Delete?";

#[component]
pub fn DeleteConfirmButton(
    /// Class of the × button
    #[prop(into)] button_class: String,
    #[prop(into)] on_confirm: Callback<()>,
    /// Question shown while confirming, "Delete?" when omitted
    #[prop(optional, into)] prompt: Option<String>,
) -> impl IntoView {
    let (asking, set_asking) = signal(false);
    let prompt = prompt.unwrap_or_else(|| DEFAULT_PROMPT.to_string());
    let aria = prompt.trim_end_matches('?').to_string();

    let answer = move |ev: web_sys::MouseEvent, confirmed: bool| {
        ev.stop_propagation();
        set_asking.set(false);
        if confirmed {
            on_confirm.run(());
        }
    };

    view! {
        <Show
            when=move || asking.get()
            fallback=move || view! {
                <button
                    class=button_class.clone()
                    title=aria.clone()
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_asking.set(true);
                    }
                >
                    "×"
                </button>
            }
        >
            <span
                class="delete-confirm"
                on:keydown=move |ev| {
                    if ev.key() == "Escape" {
                        set_asking.set(false);
                    }
                }
            >
                <span class="delete-confirm-text">{prompt.clone()}</span>
                <button class="confirm-btn" on:click=move |ev| answer(ev, true)>"✓"</button>
                <button class="cancel-btn" on:click=move |ev| answer(ev, false)>"✗"</button>
            </span>
        </Show>
    }
}
