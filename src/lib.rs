#![cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

mod act1;
mod audio;
mod constants;
mod core;
mod dom;
mod error;
mod events;
mod frame;
mod handoff;
mod orchestrator;
mod overlay;
mod render;
mod stage;

use error::LandingError;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    console_log::init_with_level(level).ok();
    log::info!("warp-landing starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or(LandingError::NoDocument)?;

    // A broken Act 1 is logged; the orchestrator still answers the
    // scroll-in and warp broadcasts.
    let act1 = match act1::Act1::init(&document) {
        Ok(a) => Some(a),
        Err(e) => {
            log::error!("[act1] {}", e);
            None
        }
    };
    orchestrator::Orchestrator::new(document, act1).install();
    Ok(())
}
