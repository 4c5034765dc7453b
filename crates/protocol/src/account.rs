//! Webhook and account option arguments.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Arguments for tools that take none (webhook listing, custom options).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NoArgs {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CreateWebhookArgs {
    #[schemars(description = "Webhook URL endpoint")]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DeleteWebhookArgs {
    #[schemars(description = "Webhook ID to delete")]
    pub webhook_id: i64,
}
