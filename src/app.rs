// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sketchwire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sketchwire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Composition root: builds every component once from [`Settings`] and runs the listeners.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::broadcast::{hub_channel, BroadcastHub, HubHandle};
use crate::commands::SceneCommands;
use crate::config::Settings;
use crate::mcp::SketchwireMcp;
use crate::ratelimit::RateLimiter;
use crate::server::{serve_http, serve_ws, HttpState, Shutdown};
use crate::store::SceneStore;

/// How long listeners get to wind down after a stop request.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("cannot bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

/// Listeners bound ahead of serving, so callers can learn the real ports.
#[derive(Debug)]
pub struct Listeners {
    ws: TcpListener,
    ws_addr: SocketAddr,
    http: Option<(TcpListener, SocketAddr)>,
}

impl Listeners {
    pub fn ws_addr(&self) -> SocketAddr {
        self.ws_addr
    }

    pub fn http_addr(&self) -> Option<SocketAddr> {
        self.http.as_ref().map(|(_, addr)| *addr)
    }
}

#[derive(Debug)]
pub struct App {
    settings: Settings,
    store: Arc<SceneStore>,
    hub: HubHandle,
    commands: Arc<SceneCommands>,
}

impl App {
    /// Wires store, limiter, hub handle and command facade. The returned hub loop must be run
    /// for viewers to receive anything.
    pub fn build(settings: Settings) -> (Self, BroadcastHub) {
        let store = Arc::new(SceneStore::open(&settings.persistence_file, settings.durability));
        let (hub, hub_loop) = hub_channel(store.clone(), settings.send_timeout);
        let commands = Arc::new(SceneCommands::new(
            store.clone(),
            RateLimiter::new(settings.rate_limit, settings.rate_window),
            settings.compile_options(),
            Arc::new(hub.clone()),
        ));
        (Self { settings, store, hub, commands }, hub_loop)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &Arc<SceneStore> {
        &self.store
    }

    pub fn hub(&self) -> &HubHandle {
        &self.hub
    }

    pub fn commands(&self) -> &Arc<SceneCommands> {
        &self.commands
    }

    pub async fn bind(&self) -> Result<Listeners, AppError> {
        let (ws, ws_addr) = bind(self.settings.ws_addr()).await?;
        let http = if self.settings.serve_http {
            Some(bind(self.settings.http_addr()).await?)
        } else {
            None
        };
        Ok(Listeners { ws, ws_addr, http })
    }

    /// Runs the hub, both listeners and (when enabled) the stdio MCP server until `stop`
    /// resolves or the MCP client goes away.
    pub async fn serve(
        self,
        hub_loop: BroadcastHub,
        listeners: Listeners,
        stop: impl Future<Output = ()> + Send,
    ) {
        let shutdown = Shutdown::new();
        let hub_task = tokio::spawn(hub_loop.run());

        tracing::info!(addr = %listeners.ws_addr, "viewer socket server listening");
        let mut servers = vec![spawn_listener(
            "socket",
            serve_ws(listeners.ws, self.hub.clone(), shutdown.wait()),
        )];

        if let Some((listener, addr)) = listeners.http {
            tracing::info!(%addr, "health/demo endpoint listening");
            let state = HttpState {
                commands: self.commands.clone(),
                hub: self.hub.clone(),
                ws_port: listeners.ws_addr.port(),
            };
            servers.push(spawn_listener("http", serve_http(listener, state, shutdown.wait())));
        }

        if self.settings.serve_mcp {
            let mcp = SketchwireMcp::new(self.commands.clone());
            tracing::info!("serving MCP tools over stdio");
            tokio::select! {
                _ = stop => tracing::info!("stop requested"),
                result = mcp.serve_stdio() => match result {
                    Ok(()) => tracing::info!("MCP client disconnected"),
                    Err(err) => tracing::error!(error = %err, "MCP server failed"),
                },
            }
        } else {
            stop.await;
            tracing::info!("stop requested");
        }

        shutdown.trigger();
        for server in servers {
            if tokio::time::timeout(SHUTDOWN_GRACE, server).await.is_err() {
                tracing::warn!("listener did not stop within the grace period");
            }
        }
        hub_task.abort();
        tracing::info!(elements = self.store.len(), "server stopped");
    }
}

async fn bind(addr: SocketAddr) -> Result<(TcpListener, SocketAddr), AppError> {
    let listener =
        TcpListener::bind(addr).await.map_err(|source| AppError::Bind { addr, source })?;
    let local = listener.local_addr().map_err(|source| AppError::Bind { addr, source })?;
    Ok((listener, local))
}

fn spawn_listener(
    name: &'static str,
    serve: impl Future<Output = std::io::Result<()>> + Send + 'static,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(err) = serve.await {
            tracing::error!(listener = name, error = %err, "listener failed");
        }
    })
}
