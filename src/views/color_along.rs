//! Color Along View
//!
//! Watch an inspiration next to the pencils from your own set that match
//! the ones used in it.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{colored_pencil_sets, inspiration};
use crate::color::MatchQuality;
use crate::components::{PickedSet, SearchSelect, SetPicker};
use crate::context::AppContext;
use crate::matching::{Comparison, MatchSource};
use crate::media;
use crate::models::{Inspiration, InspirationKind, Match, Pencil};
use crate::store::{store_update_pencil, use_app_store, AppStateStoreFields};
use crate::views::conversion::compare_or_fallback;

/// Copy an updated pencil into every match that shows it
pub fn apply_inventory(matches: &mut [Match], updated: &Pencil) {
    for m in matches.iter_mut() {
        if let Some(p) = m.target_pencil.as_mut().filter(|p| p.id == updated.id) {
            *p = updated.clone();
        }
        if let Some(mix) = m.target_pencil_mix.as_mut() {
            for p in [&mut mix.pencil_a, &mut mix.pencil_b] {
                if p.id == updated.id {
                    *p = updated.clone();
                }
            }
        }
    }
}

#[component]
pub fn ColorAlongView() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let (inspirations, set_inspirations) = signal(Vec::<Inspiration>::new());
    let (current, set_current) = signal::<Option<Inspiration>>(None);
    let (video_set, set_video_set) = signal::<Option<PickedSet>>(None);
    let (user_set, set_user_set) = signal::<Option<u32>>(None);
    let (include_mix, set_include_mix) = signal(false);
    let (running, set_running) = signal(false);
    let (comparison, set_comparison) = signal::<Option<Comparison>>(None);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        spawn_local(async move {
            match inspiration::get_all().await {
                Ok(loaded) => set_inspirations.set(loaded),
                Err(e) => ctx.report("COLOR-ALONG", &e),
            }
            if store.my_sets().with_untracked(|s| s.is_empty()) {
                match colored_pencil_sets::my_sets().await {
                    Ok(sets) => store.my_sets().set(sets),
                    Err(e) => ctx.report("COLOR-ALONG", &e),
                }
            }
        });
    });

    let options = Signal::derive(move || {
        inspirations.with(|list| list.iter().map(|i| (i.id, i.title.clone())).collect::<Vec<_>>())
    });

    let find_matches = move |_| {
        let (Some(source), Some(target_id)) = (video_set.get_untracked(), user_set.get_untracked()) else {
            return;
        };
        let source_id = source.selection.set_id;
        let mix = include_mix.get_untracked();
        set_running.set(true);
        spawn_local(async move {
            let source_pencils = match colored_pencil_sets::get_by_id(source_id).await {
                Ok(set) => set.pencils.unwrap_or_default(),
                Err(e) => {
                    ctx.report("COLOR-ALONG", &e);
                    set_running.set(false);
                    return;
                }
            };
            match compare_or_fallback(source_id, &source_pencils, target_id, mix).await {
                Ok(result) => {
                    log::info!("[COLOR-ALONG] {} matches ({:?})", result.matches.len(), result.source);
                    set_comparison.set(Some(result));
                }
                Err(e) => ctx.report("COLOR-ALONG", &e),
            }
            set_running.set(false);
        });
    };

    let mark_out = move |pencil_id: u32| {
        spawn_local(async move {
            match colored_pencil_sets::update_pencil_inventory(pencil_id, 0).await {
                Ok(updated) => {
                    log::info!("[COLOR-ALONG] Pencil {} marked out of stock", pencil_id);
                    set_comparison.update(|c| {
                        if let Some(c) = c {
                            apply_inventory(&mut c.matches, &updated);
                        }
                    });
                    store_update_pencil(&store, updated);
                }
                Err(e) => ctx.report("COLOR-ALONG", &e),
            }
        });
    };

    view! {
        <section class="color-along">
            <h1>"Color along"</h1>
            <div class="color-along-layout">
                <div class="media-column">
                    <SearchSelect
                        options=options
                        placeholder="Choose an inspiration..."
                        on_select=move |id: u32| {
                            set_current.set(inspirations.with_untracked(|l| l.iter().find(|i| i.id == id).cloned()));
                        }
                    />
                    {move || current.get().map(|item| media_view(&item))}
                </div>
                <div class="controls-column">
                    <SetPicker label="Set used in the video" on_select=move |pick| {
                        set_video_set.set(pick);
                        set_comparison.set(None);
                    } />
                    <label class="field-row">
                        "Your set "
                        <select on:change=move |ev| set_user_set.set(event_target_value(&ev).parse::<u32>().ok())>
                            <option value="">"Choose..."</option>
                            {move || store.my_sets().get().into_iter().map(|set| view! {
                                <option value=set.id.to_string()>{set.title()}</option>
                            }).collect_view()}
                        </select>
                    </label>
                    <label class="checkbox-row">
                        <input
                            type="checkbox"
                            prop:checked=move || include_mix.get()
                            on:change=move |ev| set_include_mix.set(event_target_checked(&ev))
                        />
                        "Include two-color mixes"
                    </label>
                    <button
                        class="primary-btn"
                        disabled=move || running.get() || video_set.get().is_none() || user_set.get().is_none()
                        on:click=find_matches
                    >
                        {move || if running.get() { "Matching..." } else { "Find my pencils" }}
                    </button>
                    {move || comparison.get().map(|c| {
                        let fallback = c.source == MatchSource::Fallback;
                        let rows = c.matches.iter().map(|m| match_row(&c, m, mark_out)).collect_view();
                        view! {
                            <Show when=move || fallback>
                                <div class="col-note">"RGB approximation"</div>
                            </Show>
                            <ul class="match-list">{rows}</ul>
                        }
                    })}
                </div>
            </div>
        </section>
    }
}

fn media_view(item: &Inspiration) -> AnyView {
    match item.kind {
        InspirationKind::Video => match item.embed_id.as_deref() {
            Some(id) => view! {
                <iframe
                    class="video-frame"
                    src=media::youtube_embed_url(id)
                    title=item.title.clone()
                    allow="accelerometer; autoplay; clipboard-write; encrypted-media; picture-in-picture"
                    allowfullscreen=true
                ></iframe>
            }
            .into_any(),
            None => view! { <div class="empty-message">"This video has no embed id"</div> }.into_any(),
        },
        InspirationKind::File => match item.path.clone() {
            Some(path) => view! { <img class="inspiration-image" src=path alt=item.title.clone() /> }.into_any(),
            None => view! { <div class="empty-message">"This image has no path"</div> }.into_any(),
        },
    }
}

fn match_row<F>(comparison: &Comparison, m: &Match, mark_out: F) -> impl IntoView
where
    F: Fn(u32) + Copy + Send + Sync + 'static,
{
    let quality = MatchQuality::parse(&m.match_quality);
    let pct = comparison.percentage(m);
    let targets = m
        .target_pencils()
        .into_iter()
        .map(|p| {
            let id = p.id;
            let out = p.is_out_of_stock();
            view! {
                <span class=if out { "match-pencil out-of-stock" } else { "match-pencil" }>
                    <span class="swatch-chip" style=format!("background-color:{}", p.hex())></span>
                    {p.label()}
                    <Show when=move || !out>
                        <button class="link-btn" on:click=move |_| mark_out(id)>"Out of stock"</button>
                    </Show>
                </span>
            }
        })
        .collect_view();

    view! {
        <li class="match-row">
            <span class="match-source">
                <span class="swatch-chip" style=format!("background-color:{}", m.source_pencil.hex())></span>
                {m.source_pencil.label()}
            </span>
            <span class="match-arrow">"→"</span>
            {targets}
            <span class=quality.css_class()>{format!("{}% {}", pct, quality.label())}</span>
        </li>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Color, PencilMix};

    fn pencil(id: u32, inventory: Option<i32>) -> Pencil {
        Pencil {
            id,
            color_name: format!("P{}", id),
            color_number: None,
            color: Color { id, name: None, hex: "#112233".to_string() },
            inventory,
        }
    }

    fn single(source: u32, target: u32) -> Match {
        Match {
            source_pencil: pencil(source, None),
            target_pencil: Some(pencil(target, Some(2))),
            target_pencil_mix: None,
            delta_e: 1.0,
            match_quality: "excellent".to_string(),
            is_mix: false,
        }
    }

    #[test]
    fn test_apply_inventory_updates_single_and_mix() {
        let mut mixed = single(1, 9);
        mixed.target_pencil = None;
        mixed.is_mix = true;
        mixed.target_pencil_mix = Some(PencilMix { pencil_a: pencil(5, Some(1)), pencil_b: pencil(6, Some(1)), ratio: Some(0.5) });
        let mut matches = vec![single(1, 5), single(2, 7), mixed];

        apply_inventory(&mut matches, &pencil(5, Some(0)));

        assert!(matches[0].target_pencil.as_ref().unwrap().is_out_of_stock());
        assert!(!matches[1].target_pencil.as_ref().unwrap().is_out_of_stock());
        let mix = matches[2].target_pencil_mix.as_ref().unwrap();
        assert!(mix.pencil_a.is_out_of_stock());
        assert!(!mix.pencil_b.is_out_of_stock());
    }
}
