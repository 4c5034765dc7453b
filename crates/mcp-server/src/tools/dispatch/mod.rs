//! Tool dispatch: name lookup, argument validation, credential gate, backend call, payload
//! selection. The order is fixed; a call that fails an earlier step never reaches a later one.

mod service;
mod session;

#[cfg(test)]
mod tests;

pub use service::HostexService;
pub use session::{ClientFactory, HttpClientFactory};

use super::catalog::Catalog;
use super::error::ToolFailure;
use rmcp::model::JsonObject;
use serde_json::Value;
use session::HostexSession;
use std::time::Instant;

pub(crate) struct Dispatcher {
    catalog: Catalog,
    session: HostexSession,
}

impl Dispatcher {
    pub(crate) fn new(catalog: Catalog, session: HostexSession) -> Self {
        Self { catalog, session }
    }

    pub(crate) fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub(crate) async fn invoke(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<Value, ToolFailure> {
        let started = Instant::now();
        let outcome = self.run(name, arguments).await;
        let elapsed_ms = started.elapsed().as_millis();
        match &outcome {
            Ok(_) => log::debug!("{name}: ok in {elapsed_ms}ms"),
            Err(ToolFailure::Backend(err)) => {
                log::warn!("{name}: backend failure after {elapsed_ms}ms: {err}");
            }
            Err(err) => log::debug!("{name}: rejected ({}) in {elapsed_ms}ms", err.kind()),
        }
        outcome
    }

    async fn run(&self, name: &str, arguments: Option<JsonObject>) -> Result<Value, ToolFailure> {
        let tool = self
            .catalog
            .get(name)
            .ok_or_else(|| ToolFailure::UnknownTool {
                name: name.to_string(),
            })?;

        let call = tool
            .prepare(arguments.unwrap_or_default())
            .map_err(|violations| ToolFailure::InvalidArguments {
                tool: name.to_string(),
                violations,
            })?;

        let api = self.session.client()?;
        let body = call(api).await?;
        Ok(tool.payload.select(body))
    }
}
