//! Leptos Guided Tour Utilities
//!
//! Step-by-step product tour for Leptos apps. Each step is anchored to a
//! DOM element on a given route; the overlay waits for that element to
//! mount before highlighting it.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Default number of polls before a step's anchor is considered missing
pub const DEFAULT_ATTEMPTS: u32 = 20;
/// Default delay between polls
pub const DEFAULT_INTERVAL_MS: u32 = 150;
/// Extra space around the highlighted element
const HIGHLIGHT_PADDING_PX: f64 = 6.0;

/// One tour stop
#[derive(Clone, Debug, PartialEq)]
pub struct TourStep {
    /// Route path the step lives on (e.g. "/studio/sets")
    pub route: String,
    /// CSS selector of the anchor element
    pub selector: String,
    pub title: String,
    pub body: String,
}

impl TourStep {
    pub fn new(route: &str, selector: &str, title: &str, body: &str) -> Self {
        Self {
            route: route.to_string(),
            selector: selector.to_string(),
            title: title.to_string(),
            body: body.to_string(),
        }
    }
}

/// Result of advancing the tour
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TourEvent {
    /// Moved to the step at this index
    Show(usize),
    /// Tour ended (finished or skipped)
    Ended,
    /// Nothing changed
    Unchanged,
}

/// Tour position, independent of the DOM
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TourState {
    steps: Vec<TourStep>,
    index: usize,
    active: bool,
}

impl TourState {
    pub fn new(steps: Vec<TourStep>) -> Self {
        Self { steps, index: 0, active: false }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn current(&self) -> Option<&TourStep> {
        if self.active { self.steps.get(self.index) } else { None }
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.steps.len()
    }

    pub fn start(&mut self) -> TourEvent {
        if self.steps.is_empty() {
            return TourEvent::Unchanged;
        }
        self.active = true;
        self.index = 0;
        TourEvent::Show(0)
    }

    /// Advance; past the last step the tour ends
    pub fn next(&mut self) -> TourEvent {
        if !self.active {
            return TourEvent::Unchanged;
        }
        if self.is_last() {
            return self.finish();
        }
        self.index += 1;
        TourEvent::Show(self.index)
    }

    pub fn prev(&mut self) -> TourEvent {
        if !self.active || self.index == 0 {
            return TourEvent::Unchanged;
        }
        self.index -= 1;
        TourEvent::Show(self.index)
    }

    pub fn skip(&mut self) -> TourEvent {
        self.finish()
    }

    pub fn finish(&mut self) -> TourEvent {
        if !self.active {
            return TourEvent::Unchanged;
        }
        self.active = false;
        self.index = 0;
        TourEvent::Ended
    }
}

/// Viewport-relative rectangle for the highlight box
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HighlightRect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl HighlightRect {
    /// Grow the rect by `pad` on every side
    pub fn padded(self, pad: f64) -> Self {
        Self {
            top: self.top - pad,
            left: self.left - pad,
            width: self.width + pad * 2.0,
            height: self.height + pad * 2.0,
        }
    }

    pub fn to_style(&self) -> String {
        format!(
            "top: {}px; left: {}px; width: {}px; height: {}px;",
            self.top, self.left, self.width, self.height
        )
    }

    /// Place the popover under the highlight, or above it when there is no room
    pub fn popover_style(&self, viewport_height: f64) -> String {
        let below = self.top + self.height + 12.0;
        if below + 160.0 > viewport_height && self.top > 172.0 {
            format!("top: {}px; left: {}px;", self.top - 172.0, self.left.max(8.0))
        } else {
            format!("top: {}px; left: {}px;", below, self.left.max(8.0))
        }
    }
}

/// Tour signals shared between the overlay and whoever starts the tour
#[derive(Clone, Copy)]
pub struct TourSignals {
    pub state: RwSignal<TourState>,
    pub highlight: RwSignal<Option<HighlightRect>>,
}

pub fn create_tour_signals(steps: Vec<TourStep>) -> TourSignals {
    TourSignals {
        state: RwSignal::new(TourState::new(steps)),
        highlight: RwSignal::new(None),
    }
}

/// Poll the document until `selector` matches, up to `attempts` times
pub async fn wait_for_element(selector: &str, attempts: u32, interval_ms: u32) -> Option<web_sys::Element> {
    let document = web_sys::window()?.document()?;
    for attempt in 0..attempts.max(1) {
        if let Ok(Some(el)) = document.query_selector(selector) {
            log::debug!("[TOUR] Found {} after {} polls", selector, attempt);
            return Some(el);
        }
        TimeoutFuture::new(interval_ms).await;
    }
    log::warn!("[TOUR] Element {} never appeared", selector);
    None
}

/// Bounding rect of an element, padded for the highlight box
pub fn element_rect(el: &web_sys::Element) -> HighlightRect {
    let rect = el.get_bounding_client_rect();
    HighlightRect {
        top: rect.top(),
        left: rect.left(),
        width: rect.width(),
        height: rect.height(),
    }
    .padded(HIGHLIGHT_PADDING_PX)
}

/// Find, scroll to and highlight the anchor of the current step.
/// Returns false when the anchor never mounted.
pub async fn focus_step(signals: TourSignals, selector: String) -> bool {
    signals.highlight.set(None);
    match wait_for_element(&selector, DEFAULT_ATTEMPTS, DEFAULT_INTERVAL_MS).await {
        Some(el) => {
            el.scroll_into_view();
            signals.highlight.set(Some(element_rect(&el)));
            true
        }
        None => false,
    }
}

/// Close the tour on Escape
pub fn bind_escape_key<F>(signals: TourSignals, on_end: F)
where
    F: Fn() + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_keydown = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Escape" && signals.state.get_untracked().is_active() {
            signals.state.update(|s| {
                s.skip();
            });
            signals.highlight.set(None);
            on_end();
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref());
        }
    }
    on_keydown.forget();
}
