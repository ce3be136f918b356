//! Studio
//!
//! Tabbed home view for the user's collection.

mod books;
mod combos;
mod inspirations;
mod palettes;
mod pencil_sets;
mod shopping_list;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::colored_pencil_sets;
use crate::context::AppContext;
use crate::route::{Route, StudioTab};
use crate::store::{use_app_store, AppStateStoreFields};

use books::BooksTab;
use combos::CombosTab;
use inspirations::InspirationsTab;
use palettes::PalettesTab;
use pencil_sets::PencilSetsTab;
use shopping_list::ShoppingListTab;

#[component]
pub fn StudioView(#[prop(into)] tab: Signal<StudioTab>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    // Sets feed both the sets tab and the shopping list
    Effect::new(move |_| {
        let trigger = ctx.reload_trigger.get();
        log::debug!("[STUDIO] Loading collection, trigger={}", trigger);
        spawn_local(async move {
            match colored_pencil_sets::my_sets().await {
                Ok(sets) => {
                    log::debug!("[STUDIO] Loaded {} sets", sets.len());
                    store.my_sets().set(sets);
                }
                Err(e) => ctx.report("STUDIO", &e),
            }
        });
    });

    view! {
        <section class="studio">
            <nav class="tab-row studio-tabs">
                {StudioTab::ALL.into_iter().map(|t| view! {
                    <button
                        class=move || if tab.get() == t { "tab-btn active" } else { "tab-btn" }
                        on:click=move |_| ctx.navigate(Route::Studio(t))
                    >
                        {t.label()}
                    </button>
                }).collect_view()}
            </nav>
            {move || match tab.get() {
                StudioTab::Sets => view! { <PencilSetsTab /> }.into_any(),
                StudioTab::Combos => view! { <CombosTab /> }.into_any(),
                StudioTab::Palettes => view! { <PalettesTab /> }.into_any(),
                StudioTab::Books => view! { <BooksTab /> }.into_any(),
                StudioTab::Inspirations => view! { <InspirationsTab /> }.into_any(),
                StudioTab::Shopping => view! { <ShoppingListTab /> }.into_any(),
            }}
        </section>
    }
}
