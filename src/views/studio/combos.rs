//! Combos Tab

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::color_combos;
use crate::components::{ColorGrid, ComboModal, DeleteConfirmButton, Swatch};
use crate::context::AppContext;
use crate::models::ColorCombo;

/// Replace the combo with the same id, or append it
pub fn upsert_combo(list: &mut Vec<ColorCombo>, combo: ColorCombo) {
    match list.iter_mut().find(|c| c.id == combo.id) {
        Some(existing) => *existing = combo,
        None => list.push(combo),
    }
}

#[component]
pub fn CombosTab() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (combos, set_combos) = signal(Vec::<ColorCombo>::new());
    // None: closed, Some(None): new combo, Some(Some(c)): editing c
    let (editing, set_editing) = signal::<Option<Option<ColorCombo>>>(None);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        spawn_local(async move {
            match color_combos::get_all().await {
                Ok(loaded) => set_combos.set(loaded),
                Err(e) => ctx.report("COMBOS", &e),
            }
        });
    });

    let remove = move |id: u32| {
        spawn_local(async move {
            match color_combos::delete(id).await {
                Ok(()) => set_combos.update(|list| list.retain(|c| c.id != id)),
                Err(e) => ctx.report("COMBOS", &e),
            }
        });
    };

    let saved = move |combo: ColorCombo| set_combos.update(|list| upsert_combo(list, combo));

    view! {
        <div class="combos-tab">
            <div class="tab-toolbar">
                <button class="primary-btn" on:click=move |_| set_editing.set(Some(None))>"New combo"</button>
            </div>
            <ul class="card-list">
                <For
                    each=move || combos.get()
                    key=|c| (c.id, c.title.clone(), c.pencils.len())
                    children=move |combo| {
                        let id = combo.id;
                        let swatches: Vec<Swatch> = combo.pencils.iter().map(Swatch::from).collect();
                        let title = combo.title.clone();
                        view! {
                            <li class="card combo-card">
                                <div class="card-header">
                                    <span class="card-title">{title}</span>
                                    <button class="link-btn" on:click=move |_| set_editing.set(Some(Some(combo.clone())))>"Edit"</button>
                                    <DeleteConfirmButton button_class="delete-btn" on_confirm=move |_| remove(id) />
                                </div>
                                <ColorGrid swatches=swatches />
                            </li>
                        }
                    }
                />
            </ul>
            <Show when=move || combos.with(|c| c.is_empty())>
                <div class="empty-message">"No combos yet"</div>
            </Show>
            {move || editing.get().map(|existing| view! {
                <ComboModal
                    existing=existing
                    on_close=move |_| set_editing.set(None)
                    on_saved=saved
                />
            })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::toggle_pencil;
    use crate::models::{Color, Pencil};
    use crate::validation;

    fn pencil(id: u32, hex: &str) -> Pencil {
        Pencil {
            id,
            color_name: format!("Color {}", id),
            color_number: Some(id.to_string()),
            color: Color { id, name: None, hex: hex.to_string() },
            inventory: Some(1),
        }
    }

    #[test]
    fn test_create_combo_then_find_it() {
        let set_pencils = vec![pencil(1, "#c8102e"), pencil(2, "#ffd700"), pencil(3, "#008080")];
        let mut picked = Vec::new();
        toggle_pencil(&mut picked, &set_pencils[0]);
        toggle_pencil(&mut picked, &set_pencils[2]);
        let ids: Vec<u32> = picked.iter().map(|p| p.id).collect();

        assert!(validation::combo("  ", &ids).is_err());
        let payload = validation::combo("Sunset", &ids).unwrap();
        assert_eq!(payload.pencils, vec![1, 3]);

        // What the API hands back for the created combo
        let created = ColorCombo { id: 42, title: payload.title.clone(), pencils: picked.clone() };
        let mut list = vec![ColorCombo { id: 7, title: "Forest".to_string(), pencils: vec![] }];
        upsert_combo(&mut list, created);

        let found = list.iter().find(|c| c.id == 42).unwrap();
        assert_eq!(found.title, "Sunset");
        assert_eq!(found.pencils.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 3]);

        upsert_combo(&mut list, ColorCombo { id: 42, title: "Dusk".to_string(), pencils: picked });
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].title, "Dusk");
    }
}
