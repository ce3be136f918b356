//! Add Set Modal Component
//!
//! Adds a catalog set to the collection, or creates a custom set from
//! individually picked colors.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{colored_pencil_sets::{self, AddToCollectionArgs}, colors};
use crate::components::{toggle_id, ColorGrid, Modal, PickedSet, SetPicker, Swatch};
use crate::context::AppContext;
use crate::models::Color;
use crate::store::{store_upsert_set, use_app_store};
use crate::validation;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Catalog,
    Custom,
}

#[component]
pub fn AddSetModal(#[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let (mode, set_mode) = signal(Mode::Catalog);
    let (picked, set_picked) = signal::<Option<PickedSet>>(None);
    let (saving, set_saving) = signal(false);

    let add_picked = move |_| {
        let Some(pick) = picked.get() else { return };
        set_saving.set(true);
        spawn_local(async move {
            let args = AddToCollectionArgs {
                colored_pencil_set_id: pick.selection.set_id,
                colored_pencil_set_size_id: pick.selection.size_id,
            };
            match colored_pencil_sets::add_to_collection(&args).await {
                Ok(set) => {
                    log::info!("[SETS] Added set {} to collection", set.id);
                    store_upsert_set(&store, set);
                    ctx.reload();
                    on_close.run(());
                }
                Err(e) => ctx.report("SETS", &e),
            }
            set_saving.set(false);
        });
    };

    view! {
        <Modal title="Add a pencil set" on_close=on_close>
            <div class="tab-row">
                <button
                    class=move || if mode.get() == Mode::Catalog { "tab-btn active" } else { "tab-btn" }
                    on:click=move |_| set_mode.set(Mode::Catalog)
                >
                    "From catalog"
                </button>
                <button
                    class=move || if mode.get() == Mode::Custom { "tab-btn active" } else { "tab-btn" }
                    on:click=move |_| set_mode.set(Mode::Custom)
                >
                    "Custom set"
                </button>
            </div>
            {move || match mode.get() {
                Mode::Catalog => view! {
                    <div class="add-set-catalog">
                        <SetPicker on_select=move |pick| set_picked.set(pick) />
                        <button
                            class="primary-btn"
                            disabled=move || picked.get().is_none() || saving.get()
                            on:click=add_picked
                        >
                            "Add to collection"
                        </button>
                    </div>
                }.into_any(),
                Mode::Custom => view! { <CustomSetForm on_close=on_close /> }.into_any(),
            }}
        </Modal>
    }
}

/// Custom set: the number of picked colors must equal the declared size
#[component]
fn CustomSetForm(on_close: Callback<()>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let (name, set_name) = signal(String::new());
    let (brand, set_brand) = signal(String::new());
    let (count, set_count) = signal(String::new());
    let (selected, set_selected) = signal(Vec::<u32>::new());
    let (all_colors, set_all_colors) = signal(Vec::<Color>::new());
    let (form_error, set_form_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);

    Effect::new(move |_| {
        spawn_local(async move {
            match colors::get_all().await {
                Ok(loaded) => set_all_colors.set(loaded),
                Err(e) => ctx.report("SETS", &e),
            }
        });
    });

    let swatches = Signal::derive(move || all_colors.with(|c| c.iter().map(Swatch::from).collect::<Vec<_>>()));
    let validated = Memo::new(move |_| {
        selected.with(|ids| validation::custom_set(&name.get(), &brand.get(), &count.get(), ids))
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let payload = match validated.get_untracked() {
            Ok(payload) => payload,
            Err(e) => {
                set_form_error.set(Some(e.to_string()));
                return;
            }
        };
        set_form_error.set(None);
        set_saving.set(true);
        spawn_local(async move {
            match colored_pencil_sets::create_custom(&payload).await {
                Ok(set) => {
                    log::info!("[SETS] Created custom set {}", set.id);
                    store_upsert_set(&store, set);
                    ctx.reload();
                    on_close.run(());
                }
                Err(e) => ctx.report("SETS", &e),
            }
            set_saving.set(false);
        });
    };

    view! {
        <form class="custom-set-form" on:submit=on_submit>
            <input type="text" placeholder="Set name" prop:value=move || name.get()
                on:input=move |ev| set_name.set(event_target_value(&ev)) />
            <input type="text" placeholder="Brand (optional)" prop:value=move || brand.get()
                on:input=move |ev| set_brand.set(event_target_value(&ev)) />
            <input type="number" min="1" placeholder="Number of colors" prop:value=move || count.get()
                on:input=move |ev| set_count.set(event_target_value(&ev)) />
            <div class="selection-count">
                {move || match validated.get() {
                    Ok(_) => format!("{} colors selected", selected.with(|s| s.len())),
                    Err(e) => e.to_string(),
                }}
            </div>
            <ColorGrid
                swatches=swatches
                selected=selected
                on_toggle=Callback::new(move |id| set_selected.update(|ids| toggle_id(ids, id)))
                filterable=true
            />
            {move || form_error.get().map(|msg| view! { <div class="inline-error">{msg}</div> })}
            <button type="submit" class="primary-btn" disabled=move || validated.with(|v| v.is_err()) || saving.get()>
                "Create set"
            </button>
        </form>
    }
}
