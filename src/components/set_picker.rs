//! Set Picker Component
//!
//! Brand → Set → Size stepper. The fetching lives here; the transitions
//! live in `stepper::SetPicker`.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{brands, colored_pencil_sets};
use crate::components::SearchSelect;
use crate::stepper::{PickerStep, SetPicker as PickerState, SetSelection};
use crate::store::{use_app_store, AppStateStoreFields};

/// Shown in place of the fetch error text
const LOAD_FAILED: &str = "Could not load the list, please try again later";

/// A resolved pick with a display title
#[derive(Debug, Clone, PartialEq)]
pub struct PickedSet {
    pub selection: SetSelection,
    pub title: String,
}

fn picked(state: &PickerState) -> Option<PickedSet> {
    let selection = state.selection()?;
    let mut title = state.selected_set().map(|s| s.title()).unwrap_or_default();
    if let Some(size) = state.size_id().and_then(|id| state.sizes().iter().find(|s| s.id == id)) {
        title = format!("{} · {}", title, size.label());
    }
    Some(PickedSet { selection, title })
}

#[component]
pub fn SetPicker(
    /// The resolved pick, or None once "Change" throws it away
    #[prop(into)] on_select: Callback<Option<PickedSet>>,
    #[prop(into, optional)] label: String,
) -> impl IntoView {
    let store = use_app_store();
    let state = RwSignal::new(PickerState::new());
    let (done, set_done) = signal::<Option<PickedSet>>(None);

    // Brands are shared through the store and fetched once
    Effect::new(move |_| {
        let cached = store.brands().get();
        if !cached.is_empty() {
            state.update(|s| s.brands_loaded(cached));
            return;
        }
        spawn_local(async move {
            match brands::get_all().await {
                Ok(loaded) if loaded.is_empty() => {
                    log::warn!("[PICKER] No brands returned");
                }
                Ok(loaded) => {
                    log::debug!("[PICKER] Loaded {} brands", loaded.len());
                    store.brands().set(loaded);
                }
                Err(e) => {
                    log::error!("[PICKER] Failed to load brands: {}", e);
                    state.update(|s| s.brands_failed(LOAD_FAILED));
                }
            }
        });
    });

    let resolve = move || {
        if let Some(pick) = state.with_untracked(picked) {
            log::info!("[PICKER] Picked set {:?}", pick.selection);
            set_done.set(Some(pick.clone()));
            on_select.run(Some(pick));
        }
    };

    let choose_brand = move |brand_id: u32| {
        let ticket = state.try_update(|s| s.select_brand(brand_id));
        let Some(ticket) = ticket else { return };
        spawn_local(async move {
            match colored_pencil_sets::get_by_brand(ticket.id).await {
                Ok(sets) => {
                    if !state.try_update(|s| s.sets_loaded(ticket, sets)).unwrap_or(false) {
                        log::debug!("[PICKER] Dropped stale sets for brand {}", ticket.id);
                    }
                }
                Err(e) => {
                    log::error!("[PICKER] Failed to load sets for brand {}: {}", ticket.id, e);
                    state.update(|s| s.fetch_failed(ticket, LOAD_FAILED));
                }
            }
        });
    };

    let choose_set = move |set_id: u32| {
        let ticket = state.try_update(|s| s.select_set(set_id));
        let Some(ticket) = ticket else { return };
        spawn_local(async move {
            match colored_pencil_sets::get_sizes(ticket.id).await {
                Ok(sizes) => {
                    let fresh = state.try_update(|s| s.sizes_loaded(ticket, sizes)).unwrap_or(false);
                    // A set without size variants resolves straight away
                    if fresh && state.with_untracked(|s| s.sizes().is_empty()) {
                        resolve();
                    }
                }
                Err(e) => {
                    log::error!("[PICKER] Failed to load sizes for set {}: {}", ticket.id, e);
                    state.update(|s| s.fetch_failed(ticket, LOAD_FAILED));
                }
            }
        });
    };

    let choose_size = move |size_id: u32| {
        if state.try_update(|s| s.select_size(size_id)).flatten().is_some() {
            resolve();
        }
    };

    let restart = move |_| {
        state.update(|s| s.reset());
        set_done.set(None);
        on_select.run(None);
    };

    let brand_options = Signal::derive(move || {
        state.with(|s| s.brands().iter().map(|b| (b.id, b.name.clone())).collect::<Vec<_>>())
    });
    let set_options = Signal::derive(move || {
        state.with(|s| s.sets().iter().map(|set| (set.id, set.name.clone())).collect::<Vec<_>>())
    });

    let has_label = !label.is_empty();

    view! {
        <div class="set-picker">
            <Show when=move || has_label>
                <div class="set-picker-label">{label.clone()}</div>
            </Show>
            {move || match done.get() {
                Some(pick) => view! {
                    <div class="set-picker-done">
                        <span class="set-picker-title">{pick.title}</span>
                        <button type="button" class="link-btn" on:click=restart>"Change"</button>
                    </div>
                }.into_any(),
                None => view! {
                    <div class="set-picker-steps">
                        <div class="set-picker-crumbs">
                            {move || state.with(|s| s.brand_name().map(str::to_string)).map(|name| view! {
                                <span class="crumb">{name}</span>
                            })}
                            {move || state.with(|s| s.selected_set().map(|set| set.name.clone())).map(|name| view! {
                                <span class="crumb">{name}</span>
                            })}
                            <Show when=move || state.with(|s| s.step() != PickerStep::Brand)>
                                <button type="button" class="link-btn" on:click=move |_| state.update(|s| s.back())>
                                    "Back"
                                </button>
                            </Show>
                        </div>
                        {move || match state.with(|s| s.step()) {
                            PickerStep::Brand => view! {
                                <SearchSelect options=brand_options on_select=choose_brand placeholder="Search brands..." />
                            }.into_any(),
                            PickerStep::Set => view! {
                                <SearchSelect options=set_options on_select=choose_set placeholder="Search sets..." />
                            }.into_any(),
                            PickerStep::Size => view! {
                                <div class="size-options">
                                    {move || state.with(|s| s.sizes().to_vec()).into_iter().map(|size| {
                                        let id = size.id;
                                        view! {
                                            <button type="button" class="size-btn" on:click=move |_| choose_size(id)>
                                                {size.label()}
                                            </button>
                                        }
                                    }).collect_view()}
                                </div>
                            }.into_any(),
                        }}
                        <Show when=move || state.with(|s| s.is_loading())>
                            <div class="set-picker-loading">"Loading..."</div>
                        </Show>
                        {move || state.with(|s| s.error().map(str::to_string)).map(|msg| view! {
                            <div class="inline-error">{msg}</div>
                        })}
                    </div>
                }.into_any(),
            }}
        </div>
    }
}
