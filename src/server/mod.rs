//! MCP server for the client directory.
//!
//! This module provides the MCP protocol server that exposes company listing,
//! lookup, and relevance search to MCP clients.

pub mod handlers;

pub use handlers::ClientDirectoryServer;

use anyhow::Result;
use rmcp::transport::io::stdio;
use rmcp::ServiceExt;

/// Run the server with stdio transport until the client disconnects.
pub async fn run_server(server: ClientDirectoryServer) -> Result<()> {
    let service = server.serve(stdio()).await?;
    service.waiting().await?;
    Ok(())
}
