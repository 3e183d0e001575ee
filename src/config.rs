// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sketchwire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sketchwire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Process configuration: command-line flags, falling back to environment variables, falling
//! back to defaults.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::compile::CompileOptions;
use crate::store::WriteDurability;

/// Command-line arguments for the Sketchwire server
#[derive(Parser, Debug, Clone)]
#[command(name = "sketchwire", version, about, long_about = None)]
pub struct Cli {
    /// WebSocket listener port for viewers (0 picks a free port)
    #[arg(long, env = "WS_PORT", default_value_t = 5000)]
    pub ws_port: u16,

    /// Health/demo HTTP listener port (0 picks a free port)
    #[arg(long, env = "HTTP_PORT", default_value_t = 8000)]
    pub http_port: u16,

    /// Address both listeners bind to
    #[arg(long, env = "BIND_HOST", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub bind: IpAddr,

    /// Scene file, rewritten after every mutation
    #[arg(long, env = "PERSISTENCE_FILE", default_value = "diagrams.json")]
    pub persistence_file: PathBuf,

    /// Largest number of elements one generated diagram may contain
    #[arg(long, env = "MAX_ELEMENTS", default_value_t = 1000)]
    pub max_elements: usize,

    /// Admitted generate_diagram calls per window
    #[arg(long, env = "RATE_LIMIT", default_value_t = 60)]
    pub rate_limit: usize,

    /// Rate limit window in seconds
    #[arg(long, env = "RATE_WINDOW_SECS", default_value_t = 60)]
    pub rate_window_secs: u64,

    /// Upper bound for one send to one viewer, in milliseconds
    #[arg(long, env = "SEND_TIMEOUT_MS", default_value_t = 2000)]
    pub send_timeout_ms: u64,

    /// Log level when RUST_LOG is unset (off, error, warn, info, debug, trace)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// fsync the scene file and its directory on every write
    #[arg(long)]
    pub durable_writes: bool,

    /// Do not serve the MCP tools over stdio
    #[arg(long)]
    pub no_mcp: bool,

    /// Do not start the health/demo HTTP listener
    #[arg(long)]
    pub no_http: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a positive number")]
    NotPositive { name: &'static str },
    #[error("persistence file path cannot be empty")]
    EmptyPersistencePath,
    #[error("unknown log level {0:?} (expected off, error, warn, info, debug or trace)")]
    UnknownLogLevel(String),
}

const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// Validated configuration, built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub ws_port: u16,
    pub http_port: u16,
    pub bind: IpAddr,
    pub persistence_file: PathBuf,
    pub max_elements: usize,
    pub rate_limit: usize,
    pub rate_window: Duration,
    pub send_timeout: Duration,
    pub log_level: String,
    pub durability: WriteDurability,
    pub serve_mcp: bool,
    pub serve_http: bool,
}

impl Settings {
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let positive = |name, value: u64| {
            if value == 0 {
                Err(ConfigError::NotPositive { name })
            } else {
                Ok(())
            }
        };
        positive("max_elements", cli.max_elements as u64)?;
        positive("rate_limit", cli.rate_limit as u64)?;
        positive("rate_window_secs", cli.rate_window_secs)?;
        positive("send_timeout_ms", cli.send_timeout_ms)?;

        if cli.persistence_file.as_os_str().is_empty() {
            return Err(ConfigError::EmptyPersistencePath);
        }

        let log_level = cli.log_level.trim().to_ascii_lowercase();
        if !LOG_LEVELS.contains(&log_level.as_str()) {
            return Err(ConfigError::UnknownLogLevel(cli.log_level));
        }

        Ok(Self {
            ws_port: cli.ws_port,
            http_port: cli.http_port,
            bind: cli.bind,
            persistence_file: cli.persistence_file,
            max_elements: cli.max_elements,
            rate_limit: cli.rate_limit,
            rate_window: Duration::from_secs(cli.rate_window_secs),
            send_timeout: Duration::from_millis(cli.send_timeout_ms),
            log_level,
            durability: if cli.durable_writes {
                WriteDurability::Durable
            } else {
                WriteDurability::BestEffort
            },
            serve_mcp: !cli.no_mcp,
            serve_http: !cli.no_http,
        })
    }

    pub fn ws_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.ws_port)
    }

    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.http_port)
    }

    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions { max_elements: self.max_elements }
    }
}
