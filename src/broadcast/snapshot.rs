// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sketchwire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sketchwire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::Serialize;

use crate::model::{DiagramElement, Scene};

pub const SCENE_UPDATE: &str = "scene_update";

/// `{ "type": "scene_update", "scene": { "elements": [...] } }`
#[derive(Debug, Serialize)]
pub struct SceneUpdate<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub scene: SceneSnapshot<'a>,
}

#[derive(Debug, Serialize)]
pub struct SceneSnapshot<'a> {
    pub elements: Vec<&'a DiagramElement>,
}

impl<'a> SceneUpdate<'a> {
    /// Full-scene update with dangling arrows filtered out.
    pub fn from_scene(scene: &'a Scene) -> Self {
        Self { kind: SCENE_UPDATE, scene: SceneSnapshot { elements: scene.resolved_elements() } }
    }
}

pub fn snapshot_json(scene: &Scene) -> Result<String, serde_json::Error> {
    serde_json::to_string(&SceneUpdate::from_scene(scene))
}
