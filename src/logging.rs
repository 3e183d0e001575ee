// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sketchwire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sketchwire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Output goes to stderr; stdout belongs to the stdio MCP
/// transport.
///
/// `RUST_LOG` wins when set, otherwise `default_level` applies to this crate. A second call
/// returns an error and leaves the first subscriber in place.
pub fn init_logging(default_level: &str) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sketchwire={default_level}")));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::init_logging;

    #[test]
    fn second_init_is_an_error_not_a_panic() {
        let _ = init_logging("debug");
        assert!(init_logging("info").is_err());
    }
}
