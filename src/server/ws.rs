// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sketchwire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sketchwire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::future::Future;
use std::net::SocketAddr;

use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{ConnectInfo, State};
use axum::response::Response;
use axum::routing::any;
use axum::Router;
use futures::stream::SplitSink;
use futures::{SinkExt, StreamExt};
use tokio::net::TcpListener;

use crate::broadcast::{ClientSink, DeliveryError, HubHandle};

/// Write half of an upgraded viewer socket.
pub struct WsSink {
    sink: SplitSink<WebSocket, Message>,
}

impl WsSink {
    pub fn new(sink: SplitSink<WebSocket, Message>) -> Self {
        Self { sink }
    }
}

#[async_trait]
impl ClientSink for WsSink {
    async fn send_text(&mut self, text: &str) -> Result<(), DeliveryError> {
        self.sink
            .send(Message::Text(text.into()))
            .await
            .map_err(|err| DeliveryError::Transport(err.to_string()))
    }
}

/// Viewer endpoint on `/` and `/ws`.
pub fn ws_router(hub: HubHandle) -> Router {
    Router::new().route("/", any(upgrade)).route("/ws", any(upgrade)).with_state(hub)
}

pub async fn serve_ws(
    listener: TcpListener,
    hub: HubHandle,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let app = ws_router(hub).into_make_service_with_connect_info::<SocketAddr>();
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await
}

async fn upgrade(
    ws: WebSocketUpgrade,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    State(hub): State<HubHandle>,
) -> Response {
    ws.on_upgrade(move |socket| viewer_session(socket, peer, hub))
}

/// Hands the write half to the hub and drains the read half until the viewer leaves.
async fn viewer_session(socket: WebSocket, peer: SocketAddr, hub: HubHandle) {
    let (sink, mut stream) = socket.split();
    let id = hub.register(peer.to_string(), Box::new(WsSink::new(sink)));

    while let Some(frame) = stream.next().await {
        match frame {
            Ok(Message::Close(_)) => break,
            Ok(Message::Text(text)) => {
                tracing::debug!(
                    connection = id,
                    %peer,
                    len = text.as_str().len(),
                    "ignoring inbound text frame"
                );
            }
            Ok(_) => {}
            Err(err) => {
                tracing::debug!(connection = id, %peer, error = %err, "socket read failed");
                break;
            }
        }
    }

    hub.unregister(id);
}
