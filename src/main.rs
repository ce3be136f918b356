#![allow(warnings)]
//! Pencil Studio Frontend Entry Point

mod api;
mod app;
mod calendar;
mod clipboard;
mod color;
mod components;
mod config;
mod context;
mod error;
mod journal;
mod markdown;
mod matching;
mod media;
mod models;
mod route;
mod shopping;
mod stepper;
mod storage;
mod store;
mod validation;
mod views;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    let config = AppConfig::load();
    if let Err(e) = rolling_logger::init(config.log_level) {
        web_sys::console::warn_1(&format!("[APP] Logger already installed: {}", e).into());
    }
    log::info!("[APP] Starting against {}", config.api_base_url);
    api::configure(config);
    mount_to_body(App);
}
