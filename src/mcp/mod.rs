// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sketchwire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sketchwire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Model Context Protocol (MCP) server surface.
//!
//! Agents drive the scene through four tools over stdio; viewers see the result over the socket
//! server.

mod server;
mod types;

pub use server::SketchwireMcp;
pub use types::{ConnectElementsParams, CreateElementParams, GenerateDiagramParams};
