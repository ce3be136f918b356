//! Pencil Sets Tab
//!
//! The user's collection. Clicking a pencil flips it between in stock and
//! out of stock.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::colored_pencil_sets;
use crate::components::{AddSetModal, ColorGrid, DeleteConfirmButton, Swatch};
use crate::context::AppContext;
use crate::models::PencilSet;
use crate::store::{store_find_pencil, store_remove_set, store_update_pencil, store_upsert_set, use_app_store, AppStateStoreFields};

/// Inventory written when a pencil is marked back in stock
const IN_STOCK: i32 = 1;

/// New inventory for a toggle: out of stock becomes 1, anything else 0
pub fn toggled_inventory(current: Option<i32>) -> i32 {
    if current == Some(0) { IN_STOCK } else { 0 }
}

#[component]
pub fn PencilSetsTab() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let (show_add, set_show_add) = signal(false);
    let (open_set, set_open_set) = signal::<Option<u32>>(None);

    let open = move |set: PencilSet| {
        let id = set.id;
        set_open_set.set(Some(id));
        if set.pencils.as_ref().map_or(true, |p| p.is_empty()) {
            spawn_local(async move {
                match colored_pencil_sets::get_by_id(id).await {
                    Ok(full) => store_upsert_set(&store, full),
                    Err(e) => ctx.report("SETS", &e),
                }
            });
        }
    };

    let remove = move |set_id: u32| {
        spawn_local(async move {
            match colored_pencil_sets::remove_from_collection(set_id).await {
                Ok(()) => {
                    log::info!("[SETS] Removed set {}", set_id);
                    store_remove_set(&store, set_id);
                    if open_set.get_untracked() == Some(set_id) {
                        set_open_set.set(None);
                    }
                }
                Err(e) => ctx.report("SETS", &e),
            }
        });
    };

    let toggle_stock = move |pencil_id: u32| {
        let Some(pencil) = store_find_pencil(&store, pencil_id) else { return };
        let inventory = toggled_inventory(pencil.inventory);
        spawn_local(async move {
            match colored_pencil_sets::update_pencil_inventory(pencil_id, inventory).await {
                Ok(updated) => {
                    log::info!("[SETS] Pencil {} inventory -> {:?}", pencil_id, updated.inventory);
                    store_update_pencil(&store, updated);
                }
                Err(e) => ctx.report("SETS", &e),
            }
        });
    };

    let open_swatches = Signal::derive(move || {
        let id = open_set.get();
        store.my_sets().with(|sets| {
            sets.iter()
                .find(|s| Some(s.id) == id)
                .map(|s| s.pencils().iter().map(Swatch::from).collect::<Vec<_>>())
                .unwrap_or_default()
        })
    });

    view! {
        <div class="pencil-sets-tab">
            <div class="tab-toolbar">
                <button id="add-set-btn" class="primary-btn" on:click=move |_| set_show_add.set(true)>"Add set"</button>
            </div>
            <Show
                when=move || !store.my_sets().with(|s| s.is_empty())
                fallback=|| view! { <div class="empty-message">"No sets yet. Add one to get started."</div> }
            >
                <ul class="card-list">
                    <For
                        each=move || store.my_sets().get()
                        key=|set| set.id
                        children=move |set| {
                            let id = set.id;
                            let count = set.count;
                            let title = set.title();
                            let for_open = set.clone();
                            view! {
                                <li
                                    class=move || if open_set.get() == Some(id) { "card set-card active" } else { "card set-card" }
                                    on:click=move |_| open(for_open.clone())
                                >
                                    <span class="card-title">{title}</span>
                                    <span class="card-meta">{format!("{} colors", count)}</span>
                                    <DeleteConfirmButton button_class="delete-btn" prompt="Remove set?" on_confirm=move |_| remove(id) />
                                </li>
                            }
                        }
                    />
                </ul>
            </Show>
            <Show when=move || open_set.get().is_some()>
                <div class="set-detail">
                    <p class="hint">"Click a pencil to mark it out of stock, or back in stock."</p>
                    <ColorGrid swatches=open_swatches on_toggle=Callback::new(toggle_stock) filterable=true />
                </div>
            </Show>
            <Show when=move || show_add.get()>
                <AddSetModal on_close=move |_| set_show_add.set(false) />
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggled_inventory() {
        assert_eq!(toggled_inventory(Some(0)), 1);
        assert_eq!(toggled_inventory(Some(3)), 0);
        assert_eq!(toggled_inventory(None), 0);
    }
}
