//! Diagnostics Panel Component
//!
//! Recent log lines from the in-memory logger, for bug reports.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::clipboard::{self, COPIED_RESET_MS};
use crate::context::AppContext;

#[component]
pub fn DiagnosticsPanel(#[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let (lines, set_lines) = signal(rolling_logger::recent_lines());
    let (copied, set_copied) = signal(false);

    let copy_all = move |_| {
        let text = lines.get_untracked().join("\n");
        spawn_local(async move {
            match clipboard::copy_text(&text).await {
                Ok(()) => {
                    set_copied.set(true);
                    TimeoutFuture::new(COPIED_RESET_MS).await;
                    set_copied.set(false);
                }
                Err(msg) => ctx.show_error(msg),
            }
        });
    };

    view! {
        <div class="diagnostics-panel">
            <div class="diagnostics-header">
                <span>"Recent log"</span>
                <button class="link-btn" on:click=move |_| set_lines.set(rolling_logger::recent_lines())>"Refresh"</button>
                <button class="link-btn" on:click=copy_all>{move || if copied.get() { "Copied" } else { "Copy" }}</button>
                <button
                    class="link-btn"
                    on:click=move |_| {
                        rolling_logger::clear_recent();
                        set_lines.set(Vec::new());
                    }
                >
                    "Clear"
                </button>
                <button class="modal-close" on:click=move |_| on_close.run(())>"×"</button>
            </div>
            <pre class="diagnostics-lines">{move || lines.get().join("\n")}</pre>
        </div>
    }
}
