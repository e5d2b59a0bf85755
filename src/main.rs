//! CopyAI Frontend Entry Point

mod domain;
mod config;
mod logging;
mod commands;
mod context;
mod store;
mod components;
mod app;
mod markdown;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    logging::init();
    tracing::info!("CopyAI starting");
    mount_to_body(App);
}
