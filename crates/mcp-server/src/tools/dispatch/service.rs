use super::session::{ClientFactory, HostexSession, HttpClientFactory};
use super::Dispatcher;
use crate::config::ServerConfig;
use crate::tools::catalog::{Catalog, CatalogError};
use crate::tools::error::ToolFailure;
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, Implementation, ListToolsResult,
    PaginatedRequestParam, ServerCapabilities, ServerInfo,
};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::{ErrorData as McpError, ServerHandler};
use secrecy::SecretString;
use serde_json::Value;
use std::sync::Arc;

/// MCP server exposing the Hostex tool catalog.
#[derive(Clone)]
pub struct HostexService {
    dispatcher: Arc<Dispatcher>,
}

impl HostexService {
    pub fn new(config: ServerConfig) -> Result<Self, CatalogError> {
        let factory = HttpClientFactory::new(config.client);
        Self::with_factory(config.access_token, Box::new(factory))
    }

    pub fn with_factory(
        access_token: Option<SecretString>,
        factory: Box<dyn ClientFactory>,
    ) -> Result<Self, CatalogError> {
        let catalog = Catalog::hostex()?;
        let session = HostexSession::new(access_token, factory);
        if !session.has_credential() {
            log::warn!("No Hostex access token configured; tool calls will fail until one is set");
        }
        log::info!("Registered {} Hostex tools", catalog.len());
        Ok(Self {
            dispatcher: Arc::new(Dispatcher::new(catalog, session)),
        })
    }
}

pub(crate) fn shape_outcome(
    tool: &str,
    outcome: Result<Value, ToolFailure>,
) -> Result<CallToolResult, McpError> {
    match outcome {
        Ok(payload) => {
            let text = serde_json::to_string_pretty(&payload)
                .map_err(|err| McpError::internal_error(format!("serialize {tool}: {err}"), None))?;
            Ok(CallToolResult::success(vec![Content::text(text)]))
        }
        Err(failure) => failure.into_mcp_result(tool),
    }
}

impl ServerHandler for HostexService {
    #[allow(clippy::manual_async_fn)]
    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListToolsResult, McpError>> + Send + '_ {
        async move {
            Ok(ListToolsResult::with_all_items(
                self.dispatcher.catalog().mcp_tools(),
            ))
        }
    }

    #[allow(clippy::manual_async_fn)]
    fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<CallToolResult, McpError>> + Send + '_ {
        async move {
            let name = request.name.to_string();
            let outcome = self.dispatcher.invoke(&name, request.arguments).await;
            shape_outcome(&name, outcome)
        }
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(self.dispatcher.catalog().instructions()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "hostex-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }
}
