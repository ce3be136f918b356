//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

use crate::api;
use crate::error::ApiError;
use crate::route::{self, Route};

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Active route - read
    pub route: ReadSignal<Route>,
    /// Active route - write
    set_route: WriteSignal<Route>,
    /// Message shown in the error banner - read
    pub error: ReadSignal<Option<String>>,
    /// Message shown in the error banner - write
    set_error: WriteSignal<Option<String>>,
    /// Trigger to reload collections from the API - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload collections from the API - write
    set_reload_trigger: WriteSignal<u32>,
}

impl AppContext {
    pub fn new(
        route: (ReadSignal<Route>, WriteSignal<Route>),
        error: (ReadSignal<Option<String>>, WriteSignal<Option<String>>),
        reload_trigger: (ReadSignal<u32>, WriteSignal<u32>),
    ) -> Self {
        Self {
            route: route.0,
            set_route: route.1,
            error: error.0,
            set_error: error.1,
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
        }
    }

    /// Push a history entry and switch views
    pub fn navigate(&self, target: Route) {
        if self.route.get_untracked() == target {
            return;
        }
        log::debug!("[ROUTE] -> {}", target.path());
        route::push(target);
        self.set_route.set(target);
    }

    /// Sync with the browser location after back/forward
    pub fn sync_route(&self, current: Route) {
        self.set_route.set(current);
    }

    pub fn show_error(&self, message: impl Into<String>) {
        self.set_error.set(Some(message.into()));
    }

    pub fn clear_error(&self) {
        self.set_error.set(None);
    }

    /// Trigger a reload of collections
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    /// Log an API failure and surface it. An expired session sends the user to sign in.
    pub fn report(&self, tag: &str, err: &ApiError) {
        log::error!("[{}] {}", tag, err);
        if err.is_unauthorized() {
            api::clear_token();
            self.show_error(err.to_string());
            self.navigate(Route::Login);
        } else {
            self.show_error(err.to_string());
        }
    }
}
