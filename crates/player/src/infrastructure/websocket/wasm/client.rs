//! WASM WebSocket client using web-sys

use anyhow::Result;
use wasm_bindgen::prelude::*;
use web_sys::{CloseEvent, MessageEvent, WebSocket};

use crate::infrastructure::endpoint::Endpoint;
use crate::infrastructure::websocket::{ConnectionBootstrap, MessageListener};
use crate::ports::outbound::LobbyTransport;

/// Storage for WebSocket event closures; dropping them detaches the handlers
struct WasmClosures {
    #[allow(dead_code)]
    onopen: Closure<dyn FnMut()>,
    #[allow(dead_code)]
    onmessage: Closure<dyn FnMut(MessageEvent)>,
    #[allow(dead_code)]
    onclose: Closure<dyn FnMut(CloseEvent)>,
    #[allow(dead_code)]
    onerror: Closure<dyn FnMut()>,
}

struct WebSocketTransport {
    ws: WebSocket,
}

impl LobbyTransport for WebSocketTransport {
    fn send_text(&self, text: &str) -> Result<()> {
        self.ws
            .send_with_str(text)
            .map_err(|e| anyhow::anyhow!("Failed to send: {:?}", e))
    }
}

/// WebSocket client for one lobby session (WASM)
///
/// All work happens in socket callbacks on the page's event loop. The client
/// must be kept alive for as long as the handlers should run.
pub struct LobbyClient {
    endpoint: Endpoint,
    ws: WebSocket,
    _closures: WasmClosures,
}

impl LobbyClient {
    /// Open the socket and register the open / message handlers.
    pub fn connect(
        endpoint: Endpoint,
        mut bootstrap: ConnectionBootstrap,
        mut listener: MessageListener,
    ) -> Result<Self> {
        let ws = WebSocket::new(endpoint.as_str())
            .map_err(|e| anyhow::anyhow!("Failed to create WebSocket: {:?}", e))?;

        let transport = WebSocketTransport { ws: ws.clone() };
        let onopen = Closure::<dyn FnMut()>::new(move || {
            tracing::info!("WebSocket connected");
            match bootstrap.on_open(&transport) {
                Ok(outcome) => tracing::debug!(?outcome, "Bootstrap complete"),
                Err(e) => tracing::error!("Bootstrap request failed: {}", e),
            }
        });
        ws.set_onopen(Some(onopen.as_ref().unchecked_ref()));

        let onmessage = Closure::<dyn FnMut(_)>::new(move |e: MessageEvent| {
            match e.data().dyn_into::<js_sys::JsString>() {
                Ok(txt) => {
                    let text: String = txt.into();
                    listener.on_text(&text);
                }
                Err(_) => tracing::debug!("Ignoring non-text frame"),
            }
        });
        ws.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));

        let onclose = Closure::<dyn FnMut(_)>::new(move |e: CloseEvent| {
            tracing::info!(code = e.code(), reason = %e.reason(), "WebSocket closed");
        });
        ws.set_onclose(Some(onclose.as_ref().unchecked_ref()));

        let onerror = Closure::<dyn FnMut()>::new(move || {
            tracing::error!("WebSocket error");
        });
        ws.set_onerror(Some(onerror.as_ref().unchecked_ref()));

        Ok(Self {
            endpoint,
            ws,
            _closures: WasmClosures {
                onopen,
                onmessage,
                onclose,
                onerror,
            },
        })
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// `WebSocket.readyState`
    pub fn ready_state(&self) -> u16 {
        self.ws.ready_state()
    }
}
