//! MCP tool handlers for the client directory.
//!
//! This module implements the MCP tools using the rmcp SDK's tool_router pattern.

use crate::search::{ActivityFilter, ClientFilter};
use crate::services::DirectoryService;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::Deserialize;
use std::borrow::Cow;
use std::sync::Arc;

/// The MCP server exposing company listing, lookup, and search.
#[derive(Clone)]
pub struct ClientDirectoryServer {
    directory_service: Arc<dyn DirectoryService>,
    tool_router: ToolRouter<Self>,
}

#[tool_handler]
impl ServerHandler for ClientDirectoryServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "client-directory".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("Client directory built from company CSV exports - lists companies, returns or exports a company's clients with optional filters, and ranks companies by how well their name or clients match a query.".into()),
        }
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
struct CompanyClientsParams {
    company_id: String,
    /// Case-insensitive text matched against last name, first name, job title, or email
    #[serde(default)]
    query: Option<String>,
    /// Keep all, only active, or only inactive clients
    #[serde(default)]
    active: Option<ActivityFilter>,
}

impl CompanyClientsParams {
    fn filter(&self) -> ClientFilter {
        ClientFilter::new(
            self.query.as_deref().unwrap_or(""),
            self.active.unwrap_or_default(),
        )
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
struct SearchCompaniesParams {
    #[serde(default)]
    query: String,
}

fn to_mcp_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn json_result<T: serde::Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json_response = serde_json::to_string_pretty(value).map_err(to_mcp_error)?;
    Ok(CallToolResult::success(vec![Content::text(json_response)]))
}

#[tool_router]
impl ClientDirectoryServer {
    /// Create a new client directory server.
    pub fn new(directory_service: Arc<dyn DirectoryService>) -> Self {
        Self {
            directory_service,
            tool_router: Self::tool_router(),
        }
    }

    /// List every company with its client count.
    #[tool(description = "List every company in the client directory, sorted by name, with its id and client count")]
    async fn list_companies(&self) -> Result<CallToolResult, McpError> {
        let companies = self
            .directory_service
            .list_companies()
            .await
            .map_err(to_mcp_error)?;

        json_result(&companies)
    }

    /// Retrieve a company and its clients, optionally filtered.
    #[tool(
        description = "Retrieve a company by id together with its clients. Optional 'query' keeps clients whose last name, first name, job title, or email contains it (case-insensitive); optional 'active' is 'all', 'active', or 'inactive'. totalClients and activeClients always count the whole company."
    )]
    async fn get_company(
        &self,
        params: Parameters<CompanyClientsParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let company = self
            .directory_service
            .get_company(&params.company_id, &params.filter())
            .await
            .map_err(to_mcp_error)?;

        json_result(&company)
    }

    /// Export a company's (filtered) clients as comma-delimited text.
    #[tool(
        description = "Export a company's clients as comma-delimited text with headers No,Nombre,Apellido,Activo,Función,Teléfono,Móvil,Email. Accepts the same 'query' and 'active' filters as get_company and returns the suggested file name, row count, and content."
    )]
    async fn export_clients(
        &self,
        params: Parameters<CompanyClientsParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let export = self
            .directory_service
            .export_clients(&params.company_id, &params.filter())
            .await
            .map_err(to_mcp_error)?;

        json_result(&export)
    }

    /// Rank companies by name or client match.
    #[tool(
        description = "Search companies and their clients with a case-insensitive substring query. Companies whose name matches rank first; others rank by how many clients match on name, first name, job title, email, or phone, with up to three matching clients shown. An empty query returns every company."
    )]
    async fn search_companies(
        &self,
        params: Parameters<SearchCompaniesParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        tracing::debug!("MCP Handler: search_companies query={:?}", params.query);

        let outcome = self
            .directory_service
            .search(&params.query)
            .await
            .map_err(|e| {
                tracing::error!("Search failed: {:?}", e);
                to_mcp_error(e)
            })?;

        json_result(&outcome)
    }
}
