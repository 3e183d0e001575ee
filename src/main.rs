// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sketchwire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sketchwire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Sketchwire entrypoint.
//!
//! Serves viewers over WebSocket, the health/demo endpoint over HTTP, and the scene tools over
//! MCP on stdio. Stops on Ctrl-C or when the MCP client disconnects.

use std::error::Error;

use clap::Parser;
use sketchwire::{App, Cli, Settings};

fn main() {
    let settings = match Settings::from_cli(Cli::parse()) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("sketchwire: {err}");
            std::process::exit(2);
        }
    };

    if let Err(err) = sketchwire::logging::init_logging(&settings.log_level) {
        eprintln!("sketchwire: logging disabled: {err}");
    }

    let result = (|| -> Result<(), Box<dyn Error>> {
        let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;
        runtime.block_on(async move {
            let (app, hub) = App::build(settings);
            let listeners = app.bind().await?;
            app.serve(hub, listeners, async {
                if let Err(err) = tokio::signal::ctrl_c().await {
                    tracing::warn!(error = %err, "cannot listen for Ctrl-C");
                    std::future::pending::<()>().await;
                }
            })
            .await;
            Ok::<(), Box<dyn Error>>(())
        })?;
        Ok(())
    })();

    if let Err(err) = result {
        tracing::error!(error = %err, "startup failed");
        eprintln!("sketchwire: {err}");
        std::process::exit(1);
    }
}
