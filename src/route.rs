//! Routes
//!
//! Path-based view selection backed by the History API.

use wasm_bindgen::JsCast;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StudioTab {
    #[default]
    Sets,
    Combos,
    Palettes,
    Books,
    Inspirations,
    Shopping,
}

impl StudioTab {
    pub const ALL: [StudioTab; 6] = [
        StudioTab::Sets,
        StudioTab::Combos,
        StudioTab::Palettes,
        StudioTab::Books,
        StudioTab::Inspirations,
        StudioTab::Shopping,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            StudioTab::Sets => "sets",
            StudioTab::Combos => "combos",
            StudioTab::Palettes => "palettes",
            StudioTab::Books => "books",
            StudioTab::Inspirations => "inspirations",
            StudioTab::Shopping => "shopping",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StudioTab::Sets => "Pencil Sets",
            StudioTab::Combos => "Combos",
            StudioTab::Palettes => "Palettes",
            StudioTab::Books => "Books",
            StudioTab::Inspirations => "Inspirations",
            StudioTab::Shopping => "Shopping List",
        }
    }

    fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.slug() == slug)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Studio(StudioTab),
    Conversion,
    ColorAlong,
    Log,
    Login,
    NotFound,
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let segments: Vec<&str> = path
            .split(['?', '#'])
            .next()
            .unwrap_or("")
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            [] => Route::Studio(StudioTab::default()),
            ["studio"] => Route::Studio(StudioTab::default()),
            ["studio", tab] => StudioTab::from_slug(tab).map(Route::Studio).unwrap_or(Route::NotFound),
            ["conversion"] => Route::Conversion,
            ["color-along"] => Route::ColorAlong,
            ["log"] => Route::Log,
            ["login"] => Route::Login,
            _ => Route::NotFound,
        }
    }

    pub fn path(self) -> String {
        match self {
            Route::Studio(tab) => format!("/studio/{}", tab.slug()),
            Route::Conversion => "/conversion".to_string(),
            Route::ColorAlong => "/color-along".to_string(),
            Route::Log => "/log".to_string(),
            Route::Login => "/login".to_string(),
            Route::NotFound => "/404".to_string(),
        }
    }

    pub fn requires_auth(self) -> bool {
        !matches!(self, Route::Login | Route::NotFound)
    }

    /// Top-level section, for highlighting the nav bar
    pub fn section(self) -> &'static str {
        match self {
            Route::Studio(_) => "studio",
            Route::Conversion => "conversion",
            Route::ColorAlong => "color-along",
            Route::Log => "log",
            Route::Login => "login",
            Route::NotFound => "",
        }
    }
}

/// Route of the current browser location
pub fn current() -> Route {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .map(|p| Route::parse(&p))
        .unwrap_or(Route::Studio(StudioTab::default()))
}

/// Push a history entry for `route`
pub fn push(route: Route) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    if history
        .push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&route.path()))
        .is_err()
    {
        log::warn!("[ROUTE] pushState failed for {}", route.path());
    }
}

/// Call `on_change` with the new route on back/forward navigation
pub fn bind_popstate<F>(on_change: F)
where
    F: Fn(Route) + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_popstate = Closure::<dyn FnMut(web_sys::Event)>::new(move |_ev: web_sys::Event| {
        on_change(current());
    });
    if let Some(win) = web_sys::window() {
        let _ = win.add_event_listener_with_callback("popstate", on_popstate.as_ref().unchecked_ref());
    }
    on_popstate.forget();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_paths() {
        assert_eq!(Route::parse("/"), Route::Studio(StudioTab::Sets));
        assert_eq!(Route::parse(""), Route::Studio(StudioTab::Sets));
        assert_eq!(Route::parse("/studio"), Route::Studio(StudioTab::Sets));
        assert_eq!(Route::parse("/studio/combos/"), Route::Studio(StudioTab::Combos));
        assert_eq!(Route::parse("/conversion?x=1"), Route::Conversion);
        assert_eq!(Route::parse("/color-along"), Route::ColorAlong);
        assert_eq!(Route::parse("/log#today"), Route::Log);
        assert_eq!(Route::parse("/login"), Route::Login);
    }

    #[test]
    fn test_parse_unknown_paths() {
        assert_eq!(Route::parse("/studio/nope"), Route::NotFound);
        assert_eq!(Route::parse("/admin"), Route::NotFound);
        assert_eq!(Route::parse("/log/extra"), Route::NotFound);
    }

    #[test]
    fn test_path_round_trips() {
        let mut routes = vec![Route::Conversion, Route::ColorAlong, Route::Log, Route::Login];
        routes.extend(StudioTab::ALL.into_iter().map(Route::Studio));
        for route in routes {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }

    #[test]
    fn test_auth_requirement() {
        assert!(Route::Log.requires_auth());
        assert!(!Route::Login.requires_auth());
    }
}
