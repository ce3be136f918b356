//! Conversion View
//!
//! One source set against up to five target sets. Every target is compared
//! concurrently; a target whose comparison fails falls back to RGB matching
//! without affecting the others.

use futures::future::join_all;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::colored_pencil_sets;
use crate::color::MatchQuality;
use crate::components::{PickedSet, SetPicker};
use crate::context::AppContext;
use crate::error::ApiError;
use crate::matching::{self, Comparison, GridRow, MatchSource};
use crate::models::{Match, Pencil};

pub const MAX_TARGETS: usize = 5;

/// Server comparison of `source` against `target_id`, or the RGB fallback when that fails
pub async fn compare_or_fallback(
    source_id: u32,
    source_pencils: &[Pencil],
    target_id: u32,
    include_mix: bool,
) -> Result<Comparison, ApiError> {
    match colored_pencil_sets::compare(source_id, target_id, include_mix).await {
        Ok(response) => Ok(Comparison { target_set_id: target_id, source: MatchSource::Server, matches: response.matches }),
        Err(e) => {
            log::warn!("[CONVERSION] Compare {} -> {} failed, using RGB fallback: {}", source_id, target_id, e);
            let target = colored_pencil_sets::get_by_id(target_id).await?;
            Ok(Comparison {
                target_set_id: target_id,
                source: MatchSource::Fallback,
                matches: matching::fallback_matches(source_pencils, target.pencils()),
            })
        }
    }
}

/// Column heading data
#[derive(Debug, Clone, PartialEq)]
struct Column {
    title: String,
    comparison: Comparison,
}

#[derive(Debug, Clone, PartialEq)]
struct ConversionResult {
    columns: Vec<Column>,
    rows: Vec<GridRow>,
}

/// A target picker: stable key and its pick, if any
pub type Slot = (usize, Option<PickedSet>);

/// Append an empty slot keyed `key`; false once the limit is reached
pub fn add_slot(slots: &mut Vec<Slot>, key: usize) -> bool {
    if slots.len() >= MAX_TARGETS {
        return false;
    }
    slots.push((key, None));
    true
}

/// Store a pick, or clear one, in the slot keyed `key`
pub fn set_slot(slots: &mut [Slot], key: usize, pick: Option<PickedSet>) {
    if let Some((_, slot)) = slots.iter_mut().find(|(k, _)| *k == key) {
        *slot = pick;
    }
}

/// Set ids of the picked targets, in slot order, without duplicates
pub fn picked_targets(slots: &[Slot]) -> Vec<(u32, String)> {
    let mut out: Vec<(u32, String)> = Vec::new();
    for pick in slots.iter().filter_map(|(_, p)| p.as_ref()) {
        if !out.iter().any(|(id, _)| *id == pick.selection.set_id) {
            out.push((pick.selection.set_id, pick.title.clone()));
        }
    }
    out
}

#[component]
pub fn ConversionView() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (source, set_source) = signal::<Option<PickedSet>>(None);
    let (slots, set_slots) = signal(vec![(0usize, None::<PickedSet>)]);
    let (next_key, set_next_key) = signal(1usize);
    let (include_mix, set_include_mix) = signal(false);
    let (running, set_running) = signal(false);
    let (result, set_result) = signal::<Option<ConversionResult>>(None);

    let run_compare = move |_| {
        let Some(src) = source.get_untracked() else { return };
        let targets = slots.with_untracked(|s| picked_targets(s));
        if targets.is_empty() {
            return;
        }
        let mix = include_mix.get_untracked();
        let source_id = src.selection.set_id;
        set_running.set(true);
        set_result.set(None);
        ctx.clear_error();
        log::info!("[CONVERSION] Comparing set {} against {} targets", source_id, targets.len());

        spawn_local(async move {
            let source_set = match colored_pencil_sets::get_by_id(source_id).await {
                Ok(set) => set,
                Err(e) => {
                    ctx.report("CONVERSION", &e);
                    set_running.set(false);
                    return;
                }
            };
            let source_pencils = source_set.pencils().to_vec();

            let jobs = targets.iter().map(|(target_id, _)| compare_or_fallback(source_id, &source_pencils, *target_id, mix));
            let outcomes = join_all(jobs).await;

            let mut columns = Vec::new();
            for ((target_id, title), outcome) in targets.into_iter().zip(outcomes) {
                match outcome {
                    Ok(comparison) => columns.push(Column { title, comparison }),
                    Err(e) => {
                        // Neither the comparison nor the fallback data was available
                        ctx.report("CONVERSION", &e);
                        columns.push(Column {
                            title,
                            comparison: Comparison { target_set_id: target_id, source: MatchSource::Fallback, matches: vec![] },
                        });
                    }
                }
            }
            let comparisons: Vec<Comparison> = columns.iter().map(|c| c.comparison.clone()).collect();
            let rows = matching::build_grid(&source_pencils, &comparisons);
            log::debug!("[CONVERSION] Built {} rows x {} columns", rows.len(), columns.len());
            set_result.set(Some(ConversionResult { columns, rows }));
            set_running.set(false);
        });
    };

    view! {
        <section class="conversion">
            <h1>"Color conversion"</h1>
            <div class="conversion-setup">
                <SetPicker label="Source set" on_select=move |pick| set_source.set(pick) />
                <div class="conversion-targets">
                    <For
                        each=move || slots.with(|s| s.iter().map(|(k, _)| *k).collect::<Vec<_>>())
                        key=|k| *k
                        children=move |key| view! {
                            <div class="target-slot">
                                <SetPicker
                                    label="Target set"
                                    on_select=move |pick| set_slots.update(|s| set_slot(s, key, pick))
                                />
                                <Show when=move || (key > 0)>
                                    <button class="link-btn" on:click=move |_| set_slots.update(|s| s.retain(|(k, _)| *k != key))>
                                        "Remove"
                                    </button>
                                </Show>
                            </div>
                        }
                    />
                    <button
                        class="secondary-btn"
                        disabled=move || slots.with(|s| s.len() >= MAX_TARGETS)
                        on:click=move |_| {
                            let key = next_key.get_untracked();
                            if set_slots.try_update(|s| add_slot(s, key)).unwrap_or(false) {
                                set_next_key.set(key + 1);
                            }
                        }
                    >
                        "Add target"
                    </button>
                </div>
                <label class="checkbox-row">
                    <input
                        type="checkbox"
                        prop:checked=move || include_mix.get()
                        on:change=move |ev| set_include_mix.set(event_target_checked(&ev))
                    />
                    "Include two-color mixes"
                </label>
                <button
                    id="compare-btn"
                    class="primary-btn"
                    disabled=move || running.get() || source.get().is_none() || slots.with(|s| picked_targets(s).is_empty())
                    on:click=run_compare
                >
                    {move || if running.get() { "Comparing..." } else { "Compare" }}
                </button>
            </div>
            {move || result.get().map(|res| view! { <ConversionGrid result=res /> })}
        </section>
    }
}

#[component]
fn ConversionGrid(result: ConversionResult) -> impl IntoView {
    let ConversionResult { columns, rows } = result;
    let averages: Vec<Option<String>> = columns
        .iter()
        .enumerate()
        .map(|(i, col)| matching::column_average(&rows, i).map(|avg| col.comparison.score(avg)))
        .collect();

    let header = columns
        .iter()
        .zip(averages)
        .map(|(col, avg)| {
            let fallback = col.comparison.source == MatchSource::Fallback;
            view! {
                <th class="conversion-col">
                    <div class="col-title">{col.title.clone()}</div>
                    <Show when=move || fallback>
                        <div class="col-note">"RGB approximation"</div>
                    </Show>
                    {avg.map(|a| view! { <div class="col-average">{format!("avg {}%", a)}</div> })}
                </th>
            }
        })
        .collect_view();

    let body = rows
        .into_iter()
        .map(|row| {
            let cells = row
                .cells
                .iter()
                .zip(columns.iter())
                .map(|(cell, col)| view! { <MatchCell cell=cell.clone() comparison=col.comparison.clone() /> })
                .collect_view();
            view! {
                <tr>
                    <td class="source-cell">
                        <span class="swatch-chip" style=format!("background-color:{}", row.source.hex())></span>
                        {row.source.label()}
                    </td>
                    {cells}
                </tr>
            }
        })
        .collect_view();

    view! {
        <table class="conversion-grid">
            <thead>
                <tr>
                    <th>"Source pencil"</th>
                    {header}
                </tr>
            </thead>
            <tbody>{body}</tbody>
        </table>
    }
}

#[component]
fn MatchCell(cell: Option<Match>, comparison: Comparison) -> impl IntoView {
    match cell {
        None => view! { <td class="match-cell empty">"–"</td> }.into_any(),
        Some(m) => {
            let quality = MatchQuality::parse(&m.match_quality);
            let pct = comparison.percentage(&m);
            let pencils = m
                .target_pencils()
                .into_iter()
                .map(|p| view! {
                    <span class="match-pencil">
                        <span class="swatch-chip" style=format!("background-color:{}", p.hex())></span>
                        {p.label()}
                    </span>
                })
                .collect_view();
            let ratio = m
                .target_pencil_mix
                .as_ref()
                .filter(|_| m.is_mix)
                .and_then(|mix| mix.ratio)
                .map(|r| format!("{:.0}/{:.0}", r * 100.0, (1.0 - r) * 100.0));
            view! {
                <td class="match-cell">
                    {pencils}
                    {ratio.map(|r| view! { <span class="mix-ratio">{r}</span> })}
                    <span class=quality.css_class()>{format!("{}% {}", pct, quality.label())}</span>
                </td>
            }
            .into_any()
        }
    }
}
