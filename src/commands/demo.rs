// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sketchwire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sketchwire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{DiagramElement, ElementKind};

/// Service chain shown by the demo endpoint, left to right.
pub const DEMO_PARTS: [&str; 7] = [
    "User",
    "API Gateway",
    "Auth Service",
    "Orders Service",
    "Payments Service",
    "Inventory Service",
    "Database",
];

const DEMO_ORIGIN: f64 = 100.0;
const DEMO_STEP: f64 = 200.0;
const DEMO_WIDTH: f64 = 150.0;
const DEMO_HEIGHT: f64 = 60.0;

/// One rectangle per part, each followed by the arrow from its predecessor.
pub fn demo_scene() -> Vec<DiagramElement> {
    let mut elements = Vec::with_capacity(DEMO_PARTS.len() * 2 - 1);
    for (idx, label) in DEMO_PARTS.iter().enumerate() {
        let id = format!("demo-node-{idx}");
        let x = DEMO_ORIGIN + DEMO_STEP * idx as f64;
        let node = DiagramElement::shape(
            &id,
            ElementKind::Rectangle,
            x,
            DEMO_ORIGIN,
            DEMO_WIDTH,
            DEMO_HEIGHT,
        );
        elements.push(node.with_text(*label));
        if idx > 0 {
            elements.push(DiagramElement::arrow(
                format!("demo-arrow-{idx}"),
                format!("demo-node-{}", idx - 1),
                id,
            ));
        }
    }
    elements
}
