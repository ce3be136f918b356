//! Pencil Studio Frontend App
//!
//! Top-level shell: nav bar, error banner, the routed view and the tour.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_tour::{bind_escape_key, create_tour_signals};

use crate::api::{self, user};
use crate::components::{
    mark_tour_completed, reset_tour, start_tour, tour_completed, tour_steps, DiagnosticsPanel, ErrorBanner, TourOverlay,
};
use crate::context::AppContext;
use crate::route::{self, Route, StudioTab};
use crate::store::{AppState, AppStateStoreFields, AppStore};
use crate::views::{ColorAlongView, ColoristLogView, ConversionView, LoginView, StudioView};

/// Nav bar entries: element id, label, target
const NAV: [(&str, &str, Route); 4] = [
    ("nav-studio", "Studio", Route::Studio(StudioTab::Sets)),
    ("nav-conversion", "Conversion", Route::Conversion),
    ("nav-color-along", "Color along", Route::ColorAlong),
    ("nav-log", "Colorist log", Route::Log),
];

/// Where a route actually lands given the session state
pub fn guard(target: Route, signed_in: bool) -> Route {
    match target {
        t if t.requires_auth() && !signed_in => Route::Login,
        Route::Login if signed_in => Route::Studio(StudioTab::default()),
        t => t,
    }
}

#[component]
pub fn App() -> impl IntoView {
    // State
    let (route, set_route) = signal(route::current());
    let (error, set_error) = signal::<Option<String>>(None);
    let (reload_trigger, set_reload_trigger) = signal(0u32);
    let (show_diagnostics, set_show_diagnostics) = signal(false);

    let ctx = AppContext::new((route, set_route), (error, set_error), (reload_trigger, set_reload_trigger));
    provide_context(ctx);
    let store = AppStore::new(AppState::new());
    provide_context(store);

    route::bind_popstate(move |r| ctx.sync_route(r));

    // Redirect to sign-in when the session is missing
    Effect::new(move |_| {
        let current = route.get();
        let target = guard(current, api::is_signed_in());
        if target != current {
            log::info!("[APP] Redirecting {} -> {}", current.path(), target.path());
            ctx.navigate(target);
        }
    });

    // Signed-in user
    Effect::new(move |_| {
        let _ = reload_trigger.get();
        if !api::is_signed_in() || store.user().with_untracked(|u| u.is_some()) {
            return;
        }
        spawn_local(async move {
            match user::me().await {
                Ok(me) => {
                    log::info!("[APP] Signed in as {}", me.name);
                    store.user().set(Some(me));
                }
                Err(e) => ctx.report("APP", &e),
            }
        });
    });

    // Guided tour, started once per browser
    let tour = create_tour_signals(tour_steps());
    bind_escape_key(tour, move || {
        mark_tour_completed();
        log::info!("[TOUR] Dismissed");
    });
    let (tour_offered, set_tour_offered) = signal(false);
    Effect::new(move |_| {
        let current = route.get();
        if tour_offered.get_untracked() || current == Route::Login || !api::is_signed_in() {
            return;
        }
        set_tour_offered.set(true);
        if !tour_completed() {
            start_tour(ctx, tour);
        }
    });

    let restart_tour = move |_| {
        reset_tour();
        start_tour(ctx, tour);
    };

    let sign_out = move |_| {
        spawn_local(async move {
            if let Err(e) = user::logout().await {
                log::warn!("[APP] Logout request failed: {}", e);
            }
            store.user().set(None);
            store.my_sets().set(Vec::new());
            ctx.navigate(Route::Login);
        });
    };

    let studio_tab = Signal::derive(move || match route.get() {
        Route::Studio(tab) => tab,
        _ => StudioTab::default(),
    });

    view! {
        <div class="app-layout">
            <Show when=move || route.get() != Route::Login>
                <nav class="nav-bar">
                    <span class="app-title">"Pencil Studio"</span>
                    {NAV.iter().map(|(id, label, target)| {
                        let target = *target;
                        view! {
                            <button
                                id=*id
                                class=move || if route.get().section() == target.section() { "nav-btn active" } else { "nav-btn" }
                                on:click=move |_| ctx.navigate(target)
                            >
                                {*label}
                            </button>
                        }
                    }).collect_view()}
                    <span class="nav-spacer"></span>
                    <span class="nav-user">{move || store.user().get().map(|u| u.name).unwrap_or_default()}</span>
                    <button class="link-btn" on:click=restart_tour>"Take the tour"</button>
                    <button class="link-btn" on:click=move |_| set_show_diagnostics.update(|v| *v = !*v)>"Log"</button>
                    <button class="link-btn" on:click=sign_out>"Sign out"</button>
                </nav>
            </Show>

            <ErrorBanner />

            <main class="main-content">
                {move || match route.get() {
                    Route::Studio(_) => view! { <StudioView tab=studio_tab /> }.into_any(),
                    Route::Conversion => view! { <ConversionView /> }.into_any(),
                    Route::ColorAlong => view! { <ColorAlongView /> }.into_any(),
                    Route::Log => view! { <ColoristLogView /> }.into_any(),
                    Route::Login => view! { <LoginView /> }.into_any(),
                    Route::NotFound => view! {
                        <section class="not-found">
                            <h1>"Page not found"</h1>
                            <button class="primary-btn" on:click=move |_| ctx.navigate(Route::Studio(StudioTab::default()))>
                                "Back to the studio"
                            </button>
                        </section>
                    }.into_any(),
                }}
            </main>

            <Show when=move || show_diagnostics.get()>
                <DiagnosticsPanel on_close=move |_| set_show_diagnostics.set(false) />
            </Show>

            <TourOverlay signals=tour />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard() {
        assert_eq!(guard(Route::Log, false), Route::Login);
        assert_eq!(guard(Route::Log, true), Route::Log);
        assert_eq!(guard(Route::Login, true), Route::Studio(StudioTab::Sets));
        assert_eq!(guard(Route::Login, false), Route::Login);
        assert_eq!(guard(Route::NotFound, false), Route::NotFound);
    }
}
