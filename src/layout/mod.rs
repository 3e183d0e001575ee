// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sketchwire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sketchwire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Layout algorithms for generated diagrams.
//!
//! Nodes are stacked in columns by BFS level, left to right.

pub mod layered;

pub use layered::{layout_layered, node_width, LayeredLayout, NodePlacement};
