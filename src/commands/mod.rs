// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sketchwire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sketchwire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The command surface: every scene mutation callers can request.
//!
//! Operations return a [`CommandOutcome`] or a [`CommandError`]; both render to the short
//! status line external callers see. Nothing below this boundary panics out to the caller.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::compile::CompileError;
use crate::ratelimit::RateLimitError;

pub mod demo;
pub mod facade;

pub use demo::{demo_scene, DEMO_PARTS};
pub use facade::SceneCommands;

/// Size given to elements created one at a time.
pub const CREATED_ELEMENT_WIDTH: f64 = 120.0;
pub const CREATED_ELEMENT_HEIGHT: f64 = 60.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Generated { elements: usize },
    /// The description produced no edges; the scene was left alone.
    EmptyDiagram,
    Created { id: String },
    Connected { id: String },
    Cleared,
    DemoLoaded { elements: usize },
}

impl fmt::Display for CommandOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generated { elements } => {
                write!(f, "Generated diagram with {elements} elements.")
            }
            Self::EmptyDiagram => f.write_str("Empty diagram"),
            Self::Created { id } => write!(f, "Created element {id}"),
            Self::Connected { id } => write!(f, "Connected elements with arrow {id}."),
            Self::Cleared => f.write_str("Scene cleared."),
            Self::DemoLoaded { elements } => {
                write!(f, "Demo scene with {elements} elements queued")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error("Unknown element type '{0}' (expected rectangle, ellipse, diamond or text)")]
    UnknownKind(String),
    #[error("Arrows are created with connect_elements")]
    ArrowKind,
    #[error("Coordinates must be finite numbers")]
    NonFiniteCoordinate,
    #[error("Element id cannot be empty")]
    EmptyId,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    RateLimited(#[from] RateLimitError),
    /// Anything unexpected, including a panic inside the operation.
    #[error("failed to {operation}")]
    Internal { operation: &'static str },
}

impl From<CompileError> for CommandError {
    fn from(err: CompileError) -> Self {
        Self::Input(InputError::Compile(err))
    }
}

impl CommandError {
    /// The line shown to callers, e.g. `Error: Description cannot be empty`.
    pub fn status_line(&self) -> String {
        format!("Error: {self}")
    }
}

/// Renders either side of a command result as its status line.
pub fn status_line(result: &Result<CommandOutcome, CommandError>) -> String {
    match result {
        Ok(outcome) => outcome.to_string(),
        Err(err) => err.status_line(),
    }
}

/// `<prefix>-<unix millis>-<sequence>`; the sequence keeps ids unique within one process.
#[derive(Debug, Default)]
pub(crate) struct IdSequence {
    next: AtomicU64,
}

impl IdSequence {
    pub(crate) fn next_id(&self, prefix: &str) -> String {
        let seq = self.next.fetch_add(1, Ordering::Relaxed);
        let millis = chrono::Utc::now().timestamp_millis();
        format!("{prefix}-{millis}-{seq}")
    }
}

#[cfg(test)]
mod tests;
