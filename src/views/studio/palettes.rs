//! Palettes Tab

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{color_palettes, colors};
use crate::components::{toggle_id, ColorGrid, DeleteConfirmButton, Modal, Swatch};
use crate::context::AppContext;
use crate::models::{Color, ColorPalette};
use crate::validation;

#[component]
pub fn PalettesTab() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (palettes, set_palettes) = signal(Vec::<ColorPalette>::new());
    let (show_form, set_show_form) = signal(false);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        spawn_local(async move {
            match color_palettes::get_all().await {
                Ok(loaded) => set_palettes.set(loaded),
                Err(e) => ctx.report("PALETTES", &e),
            }
        });
    });

    let remove = move |id: u32| {
        spawn_local(async move {
            match color_palettes::delete(id).await {
                Ok(()) => set_palettes.update(|list| list.retain(|p| p.id != id)),
                Err(e) => ctx.report("PALETTES", &e),
            }
        });
    };

    view! {
        <div class="palettes-tab">
            <div class="tab-toolbar">
                <button class="primary-btn" on:click=move |_| set_show_form.set(true)>"New palette"</button>
            </div>
            <ul class="card-list">
                <For
                    each=move || palettes.get()
                    key=|p| p.id
                    children=move |palette| {
                        let id = palette.id;
                        let swatches: Vec<Swatch> = palette.colors.iter().map(Swatch::from).collect();
                        let base = palette.base_color.clone();
                        view! {
                            <li class="card palette-card">
                                <div class="card-header">
                                    {base.map(|hex| view! {
                                        <span class="base-color" style=format!("background-color: {}", hex) title=hex.clone()></span>
                                    })}
                                    <span class="card-title">{palette.title.clone()}</span>
                                    <DeleteConfirmButton button_class="delete-btn" on_confirm=move |_| remove(id) />
                                </div>
                                <ColorGrid swatches=swatches />
                            </li>
                        }
                    }
                />
            </ul>
            <Show when=move || show_form.get()>
                <PaletteForm
                    on_close=Callback::new(move |_| set_show_form.set(false))
                    on_created=Callback::new(move |p| set_palettes.update(|list| list.push(p)))
                />
            </Show>
        </div>
    }
}

/// Starting value of the color input once the base color is switched on
const DEFAULT_BASE_COLOR: &str = "#808080";

#[component]
fn PaletteForm(on_close: Callback<()>, on_created: Callback<ColorPalette>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (title, set_title) = signal(String::new());
    // None until the user opts into a base color
    let (base_color, set_base_color) = signal::<Option<String>>(None);
    let (selected, set_selected) = signal(Vec::<u32>::new());
    let (all_colors, set_all_colors) = signal(Vec::<Color>::new());
    let (form_error, set_form_error) = signal::<Option<String>>(None);

    Effect::new(move |_| {
        spawn_local(async move {
            match colors::get_all().await {
                Ok(loaded) => set_all_colors.set(loaded),
                Err(e) => ctx.report("PALETTES", &e),
            }
        });
    });

    let swatches = Signal::derive(move || all_colors.with(|c| c.iter().map(Swatch::from).collect::<Vec<_>>()));

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let payload = match validation::palette(&title.get_untracked(), base_color.get_untracked().as_deref(), &selected.get_untracked()) {
            Ok(payload) => payload,
            Err(e) => {
                set_form_error.set(Some(e.to_string()));
                return;
            }
        };
        set_form_error.set(None);
        spawn_local(async move {
            match color_palettes::create(&payload).await {
                Ok(palette) => {
                    log::info!("[PALETTES] Created palette {}", palette.id);
                    on_created.run(palette);
                    on_close.run(());
                }
                Err(e) => ctx.report("PALETTES", &e),
            }
        });
    };

    view! {
        <Modal title="New palette" on_close=on_close>
            <form class="palette-form" on:submit=on_submit>
                <input type="text" placeholder="Palette title" prop:value=move || title.get()
                    on:input=move |ev| set_title.set(event_target_value(&ev)) />
                <label class="checkbox-row">
                    <input
                        type="checkbox"
                        prop:checked=move || base_color.with(|c| c.is_some())
                        on:change=move |ev| {
                            let on = event_target_checked(&ev);
                            set_base_color.set(on.then(|| DEFAULT_BASE_COLOR.to_string()));
                        }
                    />
                    "Base color"
                </label>
                <Show when=move || base_color.with(|c| c.is_some())>
                    <input type="color" prop:value=move || base_color.get().unwrap_or_default()
                        on:input=move |ev| set_base_color.set(Some(event_target_value(&ev))) />
                </Show>
                <ColorGrid
                    swatches=swatches
                    selected=selected
                    on_toggle=Callback::new(move |id| set_selected.update(|ids| toggle_id(ids, id)))
                    filterable=true
                />
                {move || form_error.get().map(|msg| view! { <div class="inline-error">{msg}</div> })}
                <button type="submit" class="primary-btn">"Create palette"</button>
            </form>
        </Modal>
    }
}
