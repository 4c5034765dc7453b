//! Hostex MCP server
//!
//! Exposes the Hostex property management API (properties, reservations, availability,
//! messaging, reviews, webhooks, listing calendars) as MCP tools over stdio.
//!
//! ## Usage
//!
//! Add to your MCP client configuration:
//! ```json
//! {
//!   "mcpServers": {
//!     "hostex": {
//!       "command": "hostex-mcp",
//!       "env": { "HOSTEX_ACCESS_TOKEN": "<token>" }
//!     }
//!   }
//! }
//! ```

pub mod config;
pub mod tools;

#[cfg(test)]
mod test_support;

use anyhow::{Context, Result};
use rmcp::transport::stdio;
use rmcp::ServiceExt;

pub use config::ServerConfig;
pub use tools::HostexService;

pub async fn main_entry() -> Result<()> {
    // stdout carries the MCP protocol; logs go to stderr.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    log::info!("Starting Hostex MCP server");

    let config = ServerConfig::from_env();
    let service = HostexService::new(config).context("build tool catalog")?;
    let server = service.serve(stdio()).await?;

    server.waiting().await?;

    log::info!("Hostex MCP server stopped");
    Ok(())
}
