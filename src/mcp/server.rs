// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sketchwire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sketchwire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, ServerCapabilities, ServerInfo};
use rmcp::{tool, tool_handler, tool_router, ErrorData, ServerHandler, ServiceExt};

use crate::commands::{status_line, CommandError, CommandOutcome, SceneCommands};

use super::types::*;

/// The scene commands exposed as MCP tools.
///
/// Every tool answers with its status line. Rejected commands come back as tool error results,
/// not protocol errors, so the calling agent sees the message.
#[derive(Clone)]
pub struct SketchwireMcp {
    commands: Arc<SceneCommands>,
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for SketchwireMcp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SketchwireMcp").field("commands", &self.commands).finish_non_exhaustive()
    }
}

#[tool_router]
impl SketchwireMcp {
    pub fn new(commands: Arc<SceneCommands>) -> Self {
        Self { commands, tool_router: Self::tool_router() }
    }

    pub async fn serve_stdio(self) -> Result<(), rmcp::RmcpError> {
        let service = self.serve((tokio::io::stdin(), tokio::io::stdout())).await?;
        service.waiting().await?;
        Ok(())
    }

    /// Replace the whole scene with a diagram compiled from a plain-language description.
    /// Understands verb phrases ("A connects to B", "A depends on B") and arrows (A -> B, A <- B).
    #[tool(name = "generate_diagram")]
    async fn generate_diagram(
        &self,
        params: Parameters<GenerateDiagramParams>,
    ) -> Result<CallToolResult, ErrorData> {
        Ok(tool_result(self.commands.generate_diagram(&params.0.description)))
    }

    /// Add one shape or text element at (x, y).
    #[tool(name = "create_element")]
    async fn create_element(
        &self,
        params: Parameters<CreateElementParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let CreateElementParams { kind, text, x, y } = params.0;
        Ok(tool_result(self.commands.create_element(&kind, &text, x, y)))
    }

    /// Draw an arrow between two element ids; it shows up once both ids exist.
    #[tool(name = "connect_elements")]
    async fn connect_elements(
        &self,
        params: Parameters<ConnectElementsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let ConnectElementsParams { from_id, to_id, label } = params.0;
        Ok(tool_result(self.commands.connect_elements(&from_id, &to_id, label.as_deref())))
    }

    /// Remove every element from the scene.
    #[tool(name = "clear_scene")]
    async fn clear_scene(&self) -> Result<CallToolResult, ErrorData> {
        Ok(tool_result(self.commands.clear_scene()))
    }
}

fn tool_result(result: Result<CommandOutcome, CommandError>) -> CallToolResult {
    let text = status_line(&result);
    match result {
        Ok(_) => CallToolResult::success(vec![Content::text(text)]),
        Err(_) => CallToolResult::error(vec![Content::text(text)]),
    }
}

#[tool_handler]
impl ServerHandler for SketchwireMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Sketchwire live diagram server. Every change is pushed to connected viewers \
                 (tools: generate_diagram, create_element, connect_elements, clear_scene)"
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
