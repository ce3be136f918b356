//! Shopping List Tab
//!
//! Out-of-stock pencils from the collection, grouped by set.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::clipboard::{self, COPIED_RESET_MS};
use crate::context::AppContext;

use crate::components::{ColorGrid, Swatch};
use crate::shopping;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn ShoppingListTab() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();
    let groups = Memo::new(move |_| store.my_sets().with(|sets| shopping::build(sets)));
    let (copied, set_copied) = signal(false);

    let copy_list = move |_| {
        let text = groups.with_untracked(|g| shopping::to_text(g));
        spawn_local(async move {
            match clipboard::copy_text(&text).await {
                Ok(()) => {
                    log::debug!("[SHOPPING] Copied {} lines", text.lines().count());
                    set_copied.set(true);
                    TimeoutFuture::new(COPIED_RESET_MS).await;
                    set_copied.set(false);
                }
                Err(msg) => ctx.show_error(msg),
            }
        });
    };

    view! {
        <div id="shopping-list" class="shopping-list-tab">
            <div class="tab-toolbar">
                <span class="shopping-total">
                    {move || groups.with(|g| format!("{} pencils to buy", shopping::total(g)))}
                </span>
                <button class="secondary-btn" disabled=move || groups.with(|g| g.is_empty()) on:click=copy_list>
                    {move || if copied.get() { "Copied" } else { "Copy as text" }}
                </button>
            </div>
            <Show
                when=move || groups.with(|g| !g.is_empty())
                fallback=|| view! { <div class="empty-message">"Nothing to buy. Every pencil is in stock."</div> }
            >
                <For
                    each=move || groups.get()
                    key=|g| (g.set_id, g.pencils.len())
                    children=move |group| {
                        let swatches: Vec<Swatch> = group.pencils.iter().map(Swatch::from).collect();
                        view! {
                            <section class="shopping-group">
                                <h3 class="section-title">{group.set_title.clone()}</h3>
                                <ColorGrid swatches=swatches />
                            </section>
                        }
                    }
                />
            </Show>
        </div>
    }
}
