// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sketchwire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sketchwire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{ElementKind, ElementStyle};

const STORAGE_KEYWORDS: &[&str] = &["database", "db", "storage", "data"];
const DECISION_KEYWORDS: &[&str] = &["decision", "if", "condition", "switch"];
// Process words land on the default branch; listed so the intent stays visible.
const PROCESS_KEYWORDS: &[&str] = &["process", "action", "task"];

/// Background/stroke pairs assigned round-robin to generated nodes.
pub const NODE_PALETTE: &[(&str, &str)] = &[
    ("#ffc9c9", "#c92a2a"),
    ("#b2f2bb", "#2b8a3e"),
    ("#a5d8ff", "#1864ab"),
    ("#ffec99", "#e67700"),
    ("#eebefa", "#862e9c"),
];

/// Picks the node shape from keywords contained in the label (case-insensitive substring
/// match). Storage wins over decision; everything else is a rectangle.
#[allow(clippy::if_same_then_else)]
pub fn classify_shape(label: &str) -> ElementKind {
    let label = label.to_lowercase();
    let mentions = |keywords: &[&str]| keywords.iter().any(|keyword| label.contains(keyword));

    if mentions(STORAGE_KEYWORDS) {
        ElementKind::Ellipse
    } else if mentions(DECISION_KEYWORDS) {
        ElementKind::Diamond
    } else if mentions(PROCESS_KEYWORDS) {
        ElementKind::Rectangle
    } else {
        ElementKind::Rectangle
    }
}

pub fn palette_style(slot: usize) -> ElementStyle {
    let (background, stroke) = NODE_PALETTE[slot % NODE_PALETTE.len()];
    ElementStyle::new(background, stroke, "solid")
}
