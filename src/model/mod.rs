// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sketchwire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sketchwire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A scene is an ordered list of diagram elements: shapes, text, and arrows between shapes.

pub mod element;
pub mod scene;

pub use element::{
    DiagramElement, ElementKind, ElementStyle, UnknownElementKind, DEFAULT_BACKGROUND_COLOR,
    DEFAULT_FILL_STYLE, DEFAULT_STROKE_COLOR,
};
pub use scene::Scene;
