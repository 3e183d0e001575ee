// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sketchwire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sketchwire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Live fan-out of scene snapshots to connected viewers.
//!
//! One hub task owns the connection set. Everything else talks to it through a [`HubHandle`].

pub mod hub;
pub mod snapshot;

pub use hub::{
    hub_channel, BroadcastHub, BroadcastReport, ClientSink, ConnectionId, DeliveryError,
    HubHandle, SceneObserver,
};
pub use snapshot::{snapshot_json, SceneSnapshot, SceneUpdate, SCENE_UPDATE};
