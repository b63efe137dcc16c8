//! SkillSync browser front end.
//!
//! Rust + WASM shell around the `ss-views` controllers: hash routing,
//! HTML rendering and a `fetch`-based workflow client.

pub mod api;
pub mod dom;
pub mod events;
pub mod render;
pub mod router;
pub mod state;
pub mod wallet;

use wasm_bindgen::prelude::*;

/// WASM entry point, called when the module is instantiated.
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    // Controller and fetch diagnostics go through `tracing`.
    tracing_wasm::set_as_global_default();

    let els = dom::Elements::bind()?;
    state::restore_connection();
    events::bind_events(&els);
    router::show(&els, router::current_route());

    gloo_console::log!(format!("SkillSync ready, workflows at {}", api::workflow_base()));
    Ok(())
}
