//! Village Bank Frontend Entry Point

mod app;
mod capabilities;
mod components;
mod config;
mod context;
mod error;
mod format;
mod lifecycle;
mod matrix;
mod models;
mod routes;
mod services;
mod session;
mod storage;
mod store;
mod validation;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::from_build_env();
    if let Err(e) = console_logger::init(config.log_level, config.log_capacity) {
        web_sys::console::error_1(&format!("logger init failed: {}", e).into());
    }

    mount_to_body(move || view! { <App config=config.clone() /> });
}
