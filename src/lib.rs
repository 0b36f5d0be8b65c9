//! Expedientes Page Enhancements
//!
//! Client-side behaviors for the server-rendered expedientes list: toggle
//! radios, theme switch, bulk select, live filter, row sort, aviso counter
//! and row action menus. Built to wasm and loaded by the page.

pub mod api;
pub mod config;
pub mod dom;
pub mod error;
pub mod handlers;
pub mod models;
pub mod query;
pub mod store;
pub mod timer;

#[cfg(test)]
mod testing;

use any_spawner::Executor;
use wasm_bindgen::prelude::*;

use crate::config::PageConfig;
use crate::dom::web::{self, WebDom};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    let _ = Executor::init_wasm_bindgen();

    let Some(dom) = WebDom::from_window() else {
        log::warn!("[Boot] no document, nothing to enhance");
        return Ok(());
    };

    let ready_dom = dom.clone();
    web::on_ready(&dom, move || {
        let config = PageConfig::from_page(&ready_dom);
        let env = web::browser_environment(&config);
        let registry = handlers::install(&ready_dom, &config, env);
        log::info!("[Boot] {} handlers: {:?}", registry.len(), registry.names());

        if let Err(e) = web::bind(ready_dom, registry) {
            log::error!("[Boot] could not bind listeners: {:?}", e);
        }
    })
}
