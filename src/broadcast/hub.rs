// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sketchwire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sketchwire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::snapshot::snapshot_json;
use crate::store::SceneStore;

pub type ConnectionId = u64;

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("connection closed")]
    Closed,
    #[error("send timed out after {0:?}")]
    Timeout(Duration),
    #[error("transport error: {0}")]
    Transport(String),
}

/// Write half of one viewer connection.
#[async_trait]
pub trait ClientSink: Send {
    async fn send_text(&mut self, text: &str) -> Result<(), DeliveryError>;
}

/// Receives "the canonical scene changed" signals from mutation paths.
///
/// Implementations must return immediately; they run on the caller's context.
pub trait SceneObserver: Send + Sync {
    fn scene_changed(&self);
}

enum HubEvent {
    Connected { id: ConnectionId, peer: String, sink: Box<dyn ClientSink> },
    Disconnected { id: ConnectionId },
    SceneChanged,
}

/// Cloneable entry point into the hub's event loop.
#[derive(Clone)]
pub struct HubHandle {
    events: mpsc::UnboundedSender<HubEvent>,
    next_id: Arc<AtomicU64>,
    connections: Arc<AtomicUsize>,
}

impl std::fmt::Debug for HubHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HubHandle").field("connections", &self.connection_count()).finish()
    }
}

impl HubHandle {
    /// Hands a new connection to the hub, which sends it the current scene first.
    pub fn register(&self, peer: impl Into<String>, sink: Box<dyn ClientSink>) -> ConnectionId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let peer = peer.into();
        if self.events.send(HubEvent::Connected { id, peer: peer.clone(), sink }).is_err() {
            tracing::warn!(connection = id, %peer, "hub is not running; connection dropped");
        }
        id
    }

    pub fn unregister(&self, id: ConnectionId) {
        let _ = self.events.send(HubEvent::Disconnected { id });
    }

    pub fn notify_scene_changed(&self) {
        if self.events.send(HubEvent::SceneChanged).is_err() {
            tracing::warn!("hub is not running; scene change not broadcast");
        }
    }

    /// Connections currently in the active set, as last published by the hub.
    pub fn connection_count(&self) -> usize {
        self.connections.load(Ordering::Relaxed)
    }
}

impl SceneObserver for HubHandle {
    fn scene_changed(&self) {
        self.notify_scene_changed();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    pub delivered: usize,
    pub dropped: Vec<ConnectionId>,
}

struct Client {
    peer: String,
    sink: Box<dyn ClientSink>,
}

/// Owns every viewer connection and performs every send.
///
/// Mutation paths never touch connections; they push a signal through [`HubHandle`] and this
/// loop turns it into one snapshot written to every client. A failed or timed-out send removes
/// that client only.
///
/// Events are handled strictly in order, and a new connection's initial snapshot is sent inline.
/// A viewer that stalls on that first send holds back queued scene changes for at most
/// `send_timeout` and is never registered.
pub struct BroadcastHub {
    store: Arc<SceneStore>,
    events: mpsc::UnboundedReceiver<HubEvent>,
    clients: BTreeMap<ConnectionId, Client>,
    send_timeout: Duration,
    connections: Arc<AtomicUsize>,
}

pub fn hub_channel(store: Arc<SceneStore>, send_timeout: Duration) -> (HubHandle, BroadcastHub) {
    let (tx, rx) = mpsc::unbounded_channel();
    let connections = Arc::new(AtomicUsize::new(0));
    let handle = HubHandle {
        events: tx,
        next_id: Arc::new(AtomicU64::new(1)),
        connections: connections.clone(),
    };
    let hub = BroadcastHub {
        store,
        events: rx,
        clients: BTreeMap::new(),
        send_timeout,
        connections,
    };
    (handle, hub)
}

impl BroadcastHub {
    pub async fn run(mut self) {
        tracing::info!("broadcast hub started");
        while let Some(event) = self.events.recv().await {
            match event {
                HubEvent::Connected { id, peer, sink } => self.accept(id, peer, sink).await,
                HubEvent::Disconnected { id } => {
                    if let Some(client) = self.clients.remove(&id) {
                        tracing::info!(
                            connection = id,
                            peer = %client.peer,
                            remaining = self.clients.len(),
                            "connection removed"
                        );
                    }
                    self.publish_count();
                }
                HubEvent::SceneChanged => {
                    self.broadcast().await;
                }
            }
        }
        tracing::info!("broadcast hub stopped");
    }

    pub fn client_count(&self) -> usize {
        self.clients.len()
    }

    fn publish_count(&self) {
        self.connections.store(self.clients.len(), Ordering::Relaxed);
    }

    fn current_snapshot(&self) -> Option<(String, usize)> {
        let scene = self.store.get();
        match snapshot_json(&scene) {
            Ok(json) => Some((json, scene.resolved_elements().len())),
            Err(err) => {
                tracing::error!(error = %err, "cannot encode scene snapshot");
                None
            }
        }
    }

    async fn accept(&mut self, id: ConnectionId, peer: String, mut sink: Box<dyn ClientSink>) {
        let Some((payload, elements)) = self.current_snapshot() else {
            return;
        };

        match send_bounded(sink.as_mut(), &payload, self.send_timeout).await {
            Ok(()) => {
                self.clients.insert(id, Client { peer: peer.clone(), sink });
                self.publish_count();
                tracing::info!(
                    connection = id,
                    %peer,
                    elements,
                    total = self.clients.len(),
                    "connection added, initial scene sent"
                );
            }
            Err(err) => {
                tracing::warn!(connection = id, %peer, error = %err, "initial scene not delivered");
            }
        }
    }

    /// Sends the current scene to every client. Never fails; unreachable clients are removed
    /// and listed in the report.
    pub async fn broadcast(&mut self) -> BroadcastReport {
        let mut report = BroadcastReport::default();
        if self.clients.is_empty() {
            tracing::debug!("no active connections to broadcast to");
            return report;
        }
        let Some((payload, elements)) = self.current_snapshot() else {
            return report;
        };

        tracing::info!(elements, clients = self.clients.len(), "broadcasting scene");

        let timeout = self.send_timeout;
        let payload = payload.as_str();
        let sends = self.clients.iter_mut().map(|(&id, client)| async move {
            (id, send_bounded(client.sink.as_mut(), payload, timeout).await)
        });
        let results = futures::future::join_all(sends).await;

        for (id, result) in results {
            match result {
                Ok(()) => {
                    report.delivered += 1;
                    tracing::debug!(connection = id, "sent update");
                }
                Err(err) => {
                    let peer = self.clients.get(&id).map(|c| c.peer.clone()).unwrap_or_default();
                    tracing::warn!(connection = id, %peer, error = %err, "dropping client");
                    report.dropped.push(id);
                }
            }
        }

        for id in &report.dropped {
            self.clients.remove(id);
        }
        self.publish_count();
        report
    }
}

async fn send_bounded(
    sink: &mut dyn ClientSink,
    payload: &str,
    timeout: Duration,
) -> Result<(), DeliveryError> {
    match tokio::time::timeout(timeout, sink.send_text(payload)).await {
        Ok(result) => result,
        Err(_) => Err(DeliveryError::Timeout(timeout)),
    }
}
