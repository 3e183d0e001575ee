// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sketchwire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sketchwire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Sketchwire: a live, collaborative sketch-diagram server.
//!
//! Plain-language descriptions compile into laid-out scenes of shapes and arrows. One persisted
//! scene is shared by every caller, and each change is pushed as a full snapshot to all
//! connected WebSocket viewers.

pub mod app;
pub mod broadcast;
pub mod commands;
pub mod compile;
pub mod config;
pub mod layout;
pub mod logging;
pub mod mcp;
pub mod model;
pub mod ratelimit;
pub mod server;
pub mod store;

pub use app::{App, AppError};
pub use config::{Cli, ConfigError, Settings};
