// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 assetflow contributors

//! Dev server and reload channel
//!
//! Serves the output tree over HTTP and pushes reload signals to connected
//! browsers over a WebSocket. The [`ReloadChannel`] is passed by reference
//! into the transform steps that publish update events; there is no hidden
//! process-wide singleton.

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::{
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    extract::State,
    http::header,
    response::IntoResponse,
    routing::get,
    Router,
};
use tokio::sync::broadcast;
use tower_http::services::ServeDir;
use tracing::{debug, info};

use crate::errors::{AssetflowError, AssetflowResult};

/// WebSocket endpoint browsers connect to for updates
pub const RELOAD_ENDPOINT: &str = "/__livereload";

/// Route serving the embedded client snippet
pub const RELOAD_SCRIPT_ROUTE: &str = "/__livereload.js";

/// Client snippet injected into served markup in dev mode
const CLIENT_SNIPPET: &str = r#"(function () {
  var socket = new WebSocket("ws://" + location.host + "/__livereload");
  socket.onmessage = function (event) {
    var update = JSON.parse(event.data);
    if (update.kind === "css") {
      var links = document.querySelectorAll('link[rel="stylesheet"]');
      links.forEach(function (link) {
        link.href = link.href.split("?")[0] + "?t=" + Date.now();
      });
    } else {
      location.reload();
    }
  };
})();
"#;

/// Update notification pushed to connected browser clients
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadSignal {
    /// Swap stylesheets in place, no page reload
    Style,
    /// Full page reload
    Full,
}

impl ReloadSignal {
    /// Wire payload sent over the WebSocket
    pub fn payload(self) -> String {
        let kind = match self {
            Self::Style => "css",
            Self::Full => "full",
        };
        serde_json::json!({ "kind": kind }).to_string()
    }
}

/// Publish/subscribe channel between transform steps and browser clients
#[derive(Debug, Clone)]
pub struct ReloadChannel {
    tx: broadcast::Sender<ReloadSignal>,
}

impl ReloadChannel {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(16);
        Self { tx }
    }

    /// Publish a signal to all connected clients. No clients is fine.
    pub fn publish(&self, signal: ReloadSignal) {
        let delivered = self.tx.send(signal).unwrap_or(0);
        debug!("reload signal {:?} delivered to {} client(s)", signal, delivered);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ReloadSignal> {
        self.tx.subscribe()
    }

    /// Number of currently connected clients
    pub fn client_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for ReloadChannel {
    fn default() -> Self {
        Self::new()
    }
}

/// Static file server over the output tree with live reload
pub struct DevServer {
    root: PathBuf,
    port: u16,
    reload: ReloadChannel,
}

impl DevServer {
    pub fn new(root: PathBuf, port: u16, reload: ReloadChannel) -> Self {
        Self { root, port, reload }
    }

    /// Build the router: reload endpoints plus static fallback
    pub fn router(&self) -> Router {
        Router::new()
            .route(RELOAD_ENDPOINT, get(ws_handler))
            .route(RELOAD_SCRIPT_ROUTE, get(client_script))
            .fallback_service(ServeDir::new(self.root.clone()))
            .with_state(self.reload.clone())
    }

    /// Bind and serve until the process exits
    pub async fn serve(self) -> AssetflowResult<()> {
        let addr = SocketAddr::from(([127, 0, 0, 1], self.port));
        let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
            AssetflowError::ServerBind {
                addr: addr.to_string(),
                error: e.to_string(),
            }
        })?;

        info!("serving {} at http://{}", self.root.display(), addr);

        self.serve_on(listener).await
    }

    /// Serve on an already-bound listener (e.g. an ephemeral port)
    pub async fn serve_on(self, listener: tokio::net::TcpListener) -> AssetflowResult<()> {
        let router = self.router();
        axum::serve(listener, router)
            .await
            .map_err(|e| AssetflowError::Io { message: e.to_string() })?;

        Ok(())
    }
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(reload): State<ReloadChannel>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| client_loop(socket, reload))
}

/// Forward reload signals to one browser until it disconnects
async fn client_loop(mut socket: WebSocket, reload: ReloadChannel) {
    let mut rx = reload.subscribe();
    debug!("browser client connected");

    loop {
        tokio::select! {
            signal = rx.recv() => match signal {
                Ok(signal) => {
                    if socket.send(Message::Text(signal.payload())).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => break,
            },
            incoming = socket.recv() => match incoming {
                Some(Ok(_)) => continue,
                _ => break,
            },
        }
    }

    debug!("browser client disconnected");
}

async fn client_script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        CLIENT_SNIPPET,
    )
}

/// HTML tag that loads the client snippet, injected by the markup transform
pub fn reload_script_tag() -> String {
    format!("<script src=\"{}\"></script>", RELOAD_SCRIPT_ROUTE)
}
