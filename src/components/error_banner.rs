//! Error Banner Component
//!
//! Dismissible banner for the last API error.

use leptos::prelude::*;

use crate::context::AppContext;

#[component]
pub fn ErrorBanner() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    view! {
        {move || ctx.error.get().map(|message| view! {
            <div class="error-banner" role="alert">
                <span class="error-banner-text">{message}</span>
                <button
                    class="error-banner-close"
                    title="Dismiss"
                    on:click=move |_| ctx.clear_error()
                >
                    "×"
                </button>
            </div>
        })}
    }
}
