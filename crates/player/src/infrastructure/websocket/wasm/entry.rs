//! Browser entry points.
//!
//! The lobby-listing page calls `start_lobby`; direct-game pages call
//! `start_game`. Each page load picks exactly one.

use wasm_bindgen::prelude::*;

use crate::application::request_builder::{BootstrapStrategy, MatchDefaults};
use crate::config::ConfigError;
use crate::infrastructure::endpoint::EndpointTable;
use crate::infrastructure::page::PageLocation;
use crate::infrastructure::websocket::{logging_handlers, ConnectionBootstrap, MessageListener};

use super::LobbyClient;

#[wasm_bindgen]
pub fn start_lobby() -> Result<(), JsValue> {
    start(BootstrapStrategy::ListGames)
}

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    start(BootstrapStrategy::LobbyIntent(MatchDefaults::default()))
}

fn start(strategy: BootstrapStrategy) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    // a second entry-point call on the same page keeps the first subscriber
    let _ = tracing_wasm::try_set_as_global_default();

    let href = web_sys::window()
        .ok_or_else(|| JsValue::from_str("no window"))?
        .location()
        .href()?;

    // Configuration errors throw into the page before any socket is opened
    let page = PageLocation::parse(&href).map_err(fatal)?;
    let endpoint = EndpointTable::default()
        .resolve(page.host())
        .map_err(fatal)?;

    let client = LobbyClient::connect(
        endpoint,
        ConnectionBootstrap::new(strategy, page),
        MessageListener::new(logging_handlers()),
    )
    .map_err(|e| JsValue::from(js_sys::Error::new(&e.to_string())))?;

    // The connection lives as long as the page.
    std::mem::forget(client);
    Ok(())
}

fn fatal(e: ConfigError) -> JsValue {
    tracing::error!("{}", e);
    js_sys::Error::new(&e.to_string()).into()
}
