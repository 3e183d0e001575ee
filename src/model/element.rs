// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sketchwire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sketchwire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const DEFAULT_BACKGROUND_COLOR: &str = "transparent";
pub const DEFAULT_STROKE_COLOR: &str = "#000000";
pub const DEFAULT_FILL_STYLE: &str = "hachure";

/// The visual kind of a scene element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Rectangle,
    Ellipse,
    Diamond,
    Arrow,
    Text,
}

impl ElementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Ellipse => "ellipse",
            Self::Diamond => "diamond",
            Self::Arrow => "arrow",
            Self::Text => "text",
        }
    }

    pub fn is_connector(self) -> bool {
        matches!(self, Self::Arrow)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownElementKind(pub String);

impl fmt::Display for UnknownElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown element type {:?} (expected rectangle, ellipse, diamond, arrow or text)",
            self.0
        )
    }
}

impl std::error::Error for UnknownElementKind {}

impl FromStr for ElementKind {
    type Err = UnknownElementKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rectangle" => Ok(Self::Rectangle),
            "ellipse" => Ok(Self::Ellipse),
            "diamond" => Ok(Self::Diamond),
            "arrow" => Ok(Self::Arrow),
            "text" => Ok(Self::Text),
            _ => Err(UnknownElementKind(s.to_owned())),
        }
    }
}

/// Optional paint attributes shared by every element kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_style: Option<String>,
}

impl ElementStyle {
    /// Style applied to elements created without an explicit palette entry.
    pub fn sketch_default() -> Self {
        Self::new(DEFAULT_BACKGROUND_COLOR, DEFAULT_STROKE_COLOR, DEFAULT_FILL_STYLE)
    }

    pub fn new(
        background_color: impl Into<String>,
        stroke_color: impl Into<String>,
        fill_style: impl Into<String>,
    ) -> Self {
        Self {
            background_color: Some(background_color.into()),
            stroke_color: Some(stroke_color.into()),
            fill_style: Some(fill_style.into()),
        }
    }
}

/// One visual unit of the scene: a shape, a free text, or a connector.
///
/// The JSON form is the wire/persisted form (`type`, `fromId`, `toId`, ...). Connector-only
/// fields are ignored on non-arrow kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramElement {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(flatten)]
    pub style: ElementStyle,
}

impl DiagramElement {
    /// A positioned, sized shape (or text) element.
    pub fn shape(
        id: impl Into<String>,
        kind: ElementKind,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            x,
            y,
            width: Some(width),
            height: Some(height),
            text: None,
            from_id: None,
            to_id: None,
            label: None,
            style: ElementStyle::sketch_default(),
        }
    }

    /// A connector between two element ids. Arrows carry no own position.
    pub fn arrow(
        id: impl Into<String>,
        from_id: impl Into<String>,
        to_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: ElementKind::Arrow,
            x: 0.0,
            y: 0.0,
            width: None,
            height: None,
            text: None,
            from_id: Some(from_id.into()),
            to_id: Some(to_id.into()),
            label: None,
            style: ElementStyle::sketch_default(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_label(mut self, label: Option<String>) -> Self {
        self.label = label;
        self
    }

    pub fn with_style(mut self, style: ElementStyle) -> Self {
        self.style = style;
        self
    }

    pub fn is_arrow(&self) -> bool {
        self.kind.is_connector()
    }

    /// Both connector endpoints, when this is an arrow that names them.
    pub fn endpoints(&self) -> Option<(&str, &str)> {
        if !self.is_arrow() {
            return None;
        }
        Some((self.from_id.as_deref()?, self.to_id.as_deref()?))
    }
}

#[cfg(test)]
mod tests {
    use super::{DiagramElement, ElementKind, ElementStyle};
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("rectangle", ElementKind::Rectangle)]
    #[case("Ellipse", ElementKind::Ellipse)]
    #[case(" DIAMOND ", ElementKind::Diamond)]
    #[case("arrow", ElementKind::Arrow)]
    #[case("text", ElementKind::Text)]
    fn parses_element_kinds_case_insensitively(#[case] raw: &str, #[case] expected: ElementKind) {
        assert_eq!(raw.parse::<ElementKind>().expect("kind"), expected);
    }

    #[test]
    fn rejects_unknown_kind() {
        let err = "hexagon".parse::<ElementKind>().unwrap_err();
        assert!(err.to_string().contains("hexagon"));
    }

    #[test]
    fn serializes_wire_field_names() {
        let arrow = DiagramElement::arrow("arrow-0", "node-0", "node-1")
            .with_label(Some("calls".to_owned()));
        let value = serde_json::to_value(&arrow).expect("serialize");
        assert_eq!(
            value,
            json!({
                "id": "arrow-0",
                "type": "arrow",
                "x": 0.0,
                "y": 0.0,
                "fromId": "node-0",
                "toId": "node-1",
                "label": "calls",
                "backgroundColor": "transparent",
                "strokeColor": "#000000",
                "fillStyle": "hachure",
            })
        );
    }

    #[test]
    fn deserializes_nulls_and_missing_optionals() {
        let element: DiagramElement = serde_json::from_value(json!({
            "id": "el-1",
            "type": "rectangle",
            "x": 10,
            "y": 20.5,
            "width": null,
            "text": "Hello",
            "fromId": null
        }))
        .expect("deserialize");

        assert_eq!(element.kind, ElementKind::Rectangle);
        assert_eq!(element.x, 10.0);
        assert_eq!(element.width, None);
        assert_eq!(element.text.as_deref(), Some("Hello"));
        assert_eq!(element.style, ElementStyle::default());
    }

    #[test]
    fn endpoints_only_for_complete_arrows() {
        let shape = DiagramElement::shape("n", ElementKind::Rectangle, 0.0, 0.0, 1.0, 1.0);
        assert_eq!(shape.endpoints(), None);

        let mut arrow = DiagramElement::arrow("a", "n", "m");
        assert_eq!(arrow.endpoints(), Some(("n", "m")));
        arrow.to_id = None;
        assert_eq!(arrow.endpoints(), None);
    }
}
