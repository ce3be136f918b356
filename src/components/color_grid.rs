//! Color Grid Component
//!
//! Selectable swatch grid for pencils or plain colors, with a text filter.

use leptos::prelude::*;

use crate::color;
use crate::models::{Color, Pencil};

/// One cell of the grid
#[derive(Debug, Clone, PartialEq)]
pub struct Swatch {
    pub id: u32,
    pub label: String,
    pub hex: String,
    /// Out of stock, drawn struck through
    pub struck: bool,
}

impl From<&Pencil> for Swatch {
    fn from(p: &Pencil) -> Self {
        Swatch { id: p.id, label: p.label(), hex: p.hex().to_string(), struck: p.is_out_of_stock() }
    }
}

impl From<&Color> for Swatch {
    fn from(c: &Color) -> Self {
        Swatch {
            id: c.id,
            label: c.name.clone().unwrap_or_else(|| c.hex.clone()),
            hex: c.hex.clone(),
            struck: false,
        }
    }
}

/// Add `id` if absent, remove it if present
pub fn toggle_id(ids: &mut Vec<u32>, id: u32) {
    if let Some(pos) = ids.iter().position(|x| *x == id) {
        ids.remove(pos);
    } else {
        ids.push(id);
    }
}

/// Case-insensitive substring filter on label (name and number)
pub fn filter_swatches(swatches: &[Swatch], query: &str) -> Vec<Swatch> {
    let query = query.trim().to_lowercase();
    swatches
        .iter()
        .filter(|s| query.is_empty() || s.label.to_lowercase().contains(&query) || s.hex.to_lowercase().contains(&query))
        .cloned()
        .collect()
}

/// Text color readable on a swatch
fn label_color(hex: &str) -> &'static str {
    color::parse_hex(hex).map(|rgb| rgb.contrast_text()).unwrap_or("#000000")
}

/// Swatch grid
///
/// Props:
/// - swatches: cells to show
/// - selected: ids drawn as selected
/// - on_toggle: called with a cell id on click; omit for a read-only grid
#[component]
pub fn ColorGrid(
    #[prop(into)] swatches: Signal<Vec<Swatch>>,
    #[prop(into, optional)] selected: Signal<Vec<u32>>,
    #[prop(into, optional)] on_toggle: Option<Callback<u32>>,
    #[prop(optional)] filterable: bool,
) -> impl IntoView {
    let (query, set_query) = signal(String::new());
    let visible = Memo::new(move |_| swatches.with(|all| filter_swatches(all, &query.get())));

    view! {
        <div class="color-grid-wrapper">
            <Show when=move || filterable>
                <input
                    type="text"
                    class="color-grid-filter"
                    placeholder="Filter by name or number..."
                    prop:value=move || query.get()
                    on:input=move |ev| set_query.set(event_target_value(&ev))
                />
            </Show>
            <div class="color-grid">
                <For
                    each=move || visible.get()
                    key=|s| (s.id, s.struck)
                    children=move |swatch| {
                        let id = swatch.id;
                        let is_selected = move || selected.with(|ids| ids.contains(&id));
                        let style = format!("background-color: {}; color: {};", swatch.hex, label_color(&swatch.hex));
                        let struck = swatch.struck;
                        view! {
                            <button
                                type="button"
                                class=move || {
                                    let mut class = String::from("swatch");
                                    if is_selected() { class.push_str(" selected"); }
                                    if struck { class.push_str(" out-of-stock"); }
                                    if on_toggle.is_none() { class.push_str(" readonly"); }
                                    class
                                }
                                style=style
                                title=swatch.label.clone()
                                on:click=move |_| {
                                    if let Some(cb) = on_toggle {
                                        cb.run(id);
                                    }
                                }
                            >
                                <span class="swatch-label">{swatch.label.clone()}</span>
                            </button>
                        }
                    }
                />
            </div>
            <Show when=move || visible.with(|v| v.is_empty())>
                <div class="color-grid-empty">"No colors"</div>
            </Show>
        </div>
    }
}
