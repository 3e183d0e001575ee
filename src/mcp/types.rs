// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sketchwire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sketchwire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use schemars::JsonSchema;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GenerateDiagramParams {
    /// Free text such as "User connects to API which interacts with Database" or "A -> B -> C".
    pub description: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateElementParams {
    /// One of rectangle, ellipse, diamond, text.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub text: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ConnectElementsParams {
    #[serde(rename = "fromId")]
    pub from_id: String,
    #[serde(rename = "toId")]
    pub to_id: String,
    #[serde(default)]
    pub label: Option<String>,
}
