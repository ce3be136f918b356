//! Combo Modal Component
//!
//! Create or edit a color combo from pencils in the user's sets.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{color_combos, colored_pencil_sets};
use crate::components::{ColorGrid, Modal, Swatch};
use crate::context::AppContext;
use crate::models::{ColorCombo, Pencil};
use crate::store::{use_app_store, AppStateStoreFields};
use crate::validation;

/// Add the pencil if it is not picked yet, otherwise remove it
pub fn toggle_pencil(picked: &mut Vec<Pencil>, pencil: &Pencil) {
    if let Some(pos) = picked.iter().position(|p| p.id == pencil.id) {
        picked.remove(pos);
    } else {
        picked.push(pencil.clone());
    }
}

#[component]
pub fn ComboModal(
    /// Combo being edited; None creates a new one
    #[prop(optional_no_strip)] existing: Option<ColorCombo>,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_saved: Callback<ColorCombo>,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let editing_id = existing.as_ref().map(|c| c.id);
    let (title, set_title) = signal(existing.as_ref().map(|c| c.title.clone()).unwrap_or_default());
    let (picked, set_picked) = signal(existing.map(|c| c.pencils).unwrap_or_default());
    let (set_pencils, set_set_pencils) = signal(Vec::<Pencil>::new());
    let (form_error, set_form_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);

    let load_set = move |set_id: u32| {
        // Collection entries usually carry their pencils already
        let cached = store.my_sets().with_untracked(|sets| {
            sets.iter().find(|s| s.id == set_id).and_then(|s| s.pencils.clone())
        });
        if let Some(pencils) = cached.filter(|p| !p.is_empty()) {
            set_set_pencils.set(pencils);
            return;
        }
        spawn_local(async move {
            match colored_pencil_sets::get_by_id(set_id).await {
                Ok(set) => set_set_pencils.set(set.pencils.unwrap_or_default()),
                Err(e) => ctx.report("COMBOS", &e),
            }
        });
    };

    let swatches = Signal::derive(move || set_pencils.with(|p| p.iter().map(Swatch::from).collect::<Vec<_>>()));
    let picked_ids = Signal::derive(move || picked.with(|p| p.iter().map(|x| x.id).collect::<Vec<_>>()));
    let picked_swatches = Signal::derive(move || picked.with(|p| p.iter().map(Swatch::from).collect::<Vec<_>>()));

    let toggle = move |id: u32| {
        let pencil = set_pencils
            .with_untracked(|all| all.iter().find(|p| p.id == id).cloned())
            .or_else(|| picked.with_untracked(|all| all.iter().find(|p| p.id == id).cloned()));
        if let Some(pencil) = pencil {
            set_picked.update(|picked| toggle_pencil(picked, &pencil));
        }
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let payload = match validation::combo(&title.get_untracked(), &picked_ids.get_untracked()) {
            Ok(payload) => payload,
            Err(e) => {
                set_form_error.set(Some(e.to_string()));
                return;
            }
        };
        set_form_error.set(None);
        set_saving.set(true);
        spawn_local(async move {
            let result = match editing_id {
                Some(id) => color_combos::update(id, &payload).await,
                None => color_combos::create(&payload).await,
            };
            match result {
                Ok(combo) => {
                    log::info!("[COMBOS] Saved combo {}", combo.id);
                    on_saved.run(combo);
                    on_close.run(());
                }
                Err(e) => ctx.report("COMBOS", &e),
            }
            set_saving.set(false);
        });
    };

    let modal_title = if editing_id.is_some() { "Edit combo" } else { "New combo" };

    view! {
        <Modal title=modal_title on_close=on_close>
            <form class="combo-form" on:submit=on_submit>
                <input
                    type="text"
                    placeholder="Combo title"
                    prop:value=move || title.get()
                    on:input=move |ev| set_title.set(event_target_value(&ev))
                />
                <select on:change=move |ev| {
                    if let Ok(id) = event_target_value(&ev).parse::<u32>() {
                        load_set(id);
                    }
                }>
                    <option value="">"Choose one of your sets..."</option>
                    {move || store.my_sets().get().into_iter().map(|set| view! {
                        <option value=set.id.to_string()>{set.title()}</option>
                    }).collect_view()}
                </select>
                <ColorGrid swatches=swatches selected=picked_ids on_toggle=Callback::new(toggle) filterable=true />
                <h3 class="section-title">"In this combo"</h3>
                <ColorGrid swatches=picked_swatches on_toggle=Callback::new(toggle) />
                {move || form_error.get().map(|msg| view! { <div class="inline-error">{msg}</div> })}
                <button type="submit" class="primary-btn" disabled=move || saving.get()>"Save combo"</button>
            </form>
        </Modal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Color;

    fn pencil(id: u32) -> Pencil {
        Pencil {
            id,
            color_name: format!("Color {}", id),
            color_number: None,
            color: Color { id, name: None, hex: "#808080".to_string() },
            inventory: None,
        }
    }

    #[test]
    fn test_toggle_pencil() {
        let mut picked = vec![pencil(1)];
        toggle_pencil(&mut picked, &pencil(2));
        assert_eq!(picked.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2]);
        toggle_pencil(&mut picked, &pencil(1));
        assert_eq!(picked.iter().map(|p| p.id).collect::<Vec<_>>(), vec![2]);
    }
}
