//! Tour Overlay Component
//!
//! Highlight box and popover for the guided tour. Each step navigates to
//! its route first, then waits for the anchor element to mount.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_tour::{focus_step, TourEvent, TourSignals, TourStep};

use crate::api;
use crate::context::AppContext;
use crate::route::Route;
use crate::storage;

const COMPLETED: &str = "true";

/// Tour stops, in order
pub fn tour_steps() -> Vec<TourStep> {
    vec![
        TourStep::new("/studio/sets", "#nav-studio", "Your studio", "Your pencil sets, combos, palettes, books and inspirations live here."),
        TourStep::new("/studio/sets", "#add-set-btn", "Add a set", "Pick a brand, a set and a size to add it to your collection."),
        TourStep::new("/studio/shopping", "#shopping-list", "Shopping list", "Pencils you mark as out of stock are collected here."),
        TourStep::new("/conversion", "#compare-btn", "Convert colors", "Compare one set against up to five others to find matching pencils."),
        TourStep::new("/color-along", "#nav-color-along", "Color along", "Pair an inspiration with your own pencils."),
        TourStep::new("/log", "#journal-calendar", "Colorist log", "Record what you worked on each day."),
    ]
}

fn completed_flag(stored: Option<&str>) -> bool {
    stored == Some(COMPLETED)
}

/// Whether the tour was already finished or skipped in this browser
pub fn tour_completed() -> bool {
    completed_flag(storage::get(&api::config().tour_storage_key).as_deref())
}

pub fn mark_tour_completed() {
    storage::set(&api::config().tour_storage_key, COMPLETED);
}

/// Forget completion so the tour autostarts again
pub fn reset_tour() {
    storage::remove(&api::config().tour_storage_key);
}

/// End the tour and remember it was seen
pub fn end_tour(signals: TourSignals) {
    signals.state.update(|s| {
        s.finish();
    });
    signals.highlight.set(None);
    mark_tour_completed();
    log::info!("[TOUR] Completed");
}

/// Show the current step; steps whose anchor never mounts are skipped
pub fn show_current(ctx: AppContext, signals: TourSignals) {
    spawn_local(async move {
        loop {
            let Some((index, step)) = signals.state.with_untracked(|s| s.current().cloned().map(|step| (s.index(), step))) else {
                return;
            };
            ctx.navigate(Route::parse(&step.route));
            if focus_step(signals, step.selector.clone()).await {
                return;
            }
            log::warn!("[TOUR] Skipping step {} ({}): anchor not found", index, step.selector);
            // The user may have moved on while we were polling
            if signals.state.with_untracked(|s| !s.is_active() || s.index() != index) {
                return;
            }
            match signals.state.try_update(|s| s.next()) {
                Some(TourEvent::Show(_)) => continue,
                Some(TourEvent::Ended) => {
                    end_tour(signals);
                    return;
                }
                _ => return,
            }
        }
    });
}

pub fn start_tour(ctx: AppContext, signals: TourSignals) {
    if let Some(TourEvent::Show(_)) = signals.state.try_update(|s| s.start()) {
        log::info!("[TOUR] Started");
        show_current(ctx, signals);
    }
}

#[component]
pub fn TourOverlay(signals: TourSignals) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let go = move |event: Option<TourEvent>| match event {
        Some(TourEvent::Show(_)) => show_current(ctx, signals),
        Some(TourEvent::Ended) => end_tour(signals),
        _ => {}
    };

    let viewport_height = || {
        web_sys::window()
            .and_then(|w| w.inner_height().ok())
            .and_then(|h| h.as_f64())
            .unwrap_or(800.0)
    };

    view! {
        <Show when=move || signals.state.with(|s| s.is_active())>
            <div class="tour-backdrop"></div>
            {move || signals.highlight.get().map(|rect| view! {
                <div class="tour-highlight" style=rect.to_style()></div>
                <div class="tour-popover" style=rect.popover_style(viewport_height())>
                    {move || signals.state.with(|s| s.current().cloned()).map(|step| view! {
                        <h3 class="tour-title">{step.title}</h3>
                        <p class="tour-body">{step.body}</p>
                    })}
                    <div class="tour-progress">
                        {move || signals.state.with(|s| format!("{} / {}", s.index() + 1, s.len()))}
                    </div>
                    <div class="tour-actions">
                        <button class="link-btn" on:click=move |_| end_tour(signals)>"Skip"</button>
                        <button
                            class="secondary-btn"
                            disabled=move || signals.state.with(|s| s.index() == 0)
                            on:click=move |_| go(signals.state.try_update(|s| s.prev()))
                        >
                            "Back"
                        </button>
                        <button class="primary-btn" on:click=move |_| go(signals.state.try_update(|s| s.next()))>
                            {move || if signals.state.with(|s| s.is_last()) { "Finish" } else { "Next" }}
                        </button>
                    </div>
                </div>
            })}
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_flag() {
        assert!(completed_flag(Some("true")));
        assert!(!completed_flag(Some("false")));
        assert!(!completed_flag(None));
    }

    #[test]
    fn test_steps_have_distinct_anchors() {
        let steps = tour_steps();
        assert_eq!(steps.len(), 6);
        for (i, step) in steps.iter().enumerate() {
            assert!(steps[i + 1..].iter().all(|s| s.selector != step.selector));
            assert_eq!(Route::parse(&step.route).path(), step.route);
        }
    }
}
