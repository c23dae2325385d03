#![allow(warnings)]
//! Timeline Dashboard Frontend Entry Point

mod models;
mod error;
mod config;
mod url_state;
mod selection;
mod api;
mod render;
mod loader;
mod export;
mod store;
mod context;
mod components;
mod app;

use app::App;
use config::DashboardConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let (config, warning) = DashboardConfig::from_page();
    // Only fails if a logger is already installed
    let _ = console_logger::init(config.level());
    if let Some(warning) = warning {
        log::warn!("{}", warning);
    }
    log::info!("timeline dashboard starting (api_base={:?})", config.api_base);

    mount_to_body(move || view! { <App config=config /> });
}
