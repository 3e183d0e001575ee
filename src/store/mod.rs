// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sketchwire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sketchwire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence for the canonical scene.
//!
//! The store keeps the scene in memory and writes a JSON element array through to disk on every
//! mutation.

pub mod scene_store;

pub use scene_store::{
    load_scene, save_scene, LoadedScene, MutationReceipt, SceneStore, StoreError, WriteDurability,
};
