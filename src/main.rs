#![allow(warnings)]
//! Project Board Frontend Entry Point

mod api;
mod app;
mod components;
mod config;
mod context;
mod forms;
mod models;
mod query;
mod store;


use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let (config, warning) = AppConfig::load();
    // Only fails if a logger is already installed
    let _ = console_logger::init(console_logger::parse_level(&config.log_level));
    if let Some(warning) = warning {
        log::warn!("{}", warning);
    }
    log::info!("using GraphQL endpoint {}", config.graphql_endpoint);

    mount_to_body(move || view! { <App config=config.clone() /> });
}
