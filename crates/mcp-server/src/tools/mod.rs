//! Hostex MCP tool surface.
//!
//! `catalog` owns the tool table and input schemas, `validate` checks raw arguments against them,
//! `dispatch` runs a call through the credential gate to the backend, and `error` maps failures
//! onto MCP results.

pub(crate) mod catalog;
mod dispatch;
mod error;
mod validate;

pub use catalog::CatalogError;
pub use dispatch::{ClientFactory, HostexService, HttpClientFactory};
pub use error::ToolFailure;
