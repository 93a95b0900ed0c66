//! Registra AI dashboard
//!
//! Browser-side view layer of the Registra AI finance tracker, compiled to
//! WebAssembly. It loads the server-rendered home fragment, and for a logged
//! in user fills the profile, renders the income/expense history and wires
//! the gain and expense forms to the `/registra_ai` JSON API.

use tracing::{error, info};
use wasm_bindgen_futures::spawn_local;

mod api;
mod config;
mod controller;
mod dom;
mod error;
mod logging;
mod models;
mod money;
mod view;

fn main() {
    console_error_panic_hook::set_once();
    logging::init();

    let config = config::AppConfig::load();
    info!(base_url = %config.base_url, "starting dashboard");

    spawn_local(async move {
        if let Err(err) = dom::start(config).await {
            error!(%err, "could not load the dashboard");
        }
    });
}
