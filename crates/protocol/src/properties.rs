//! Property and room type listing arguments.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ListPropertiesArgs {
    #[schemars(description = "Starting point for results (default: 0)")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,

    #[schemars(description = "Maximum results to return, max 100 (default: 20)")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,

    #[schemars(description = "Filter by specific property ID")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ListRoomTypesArgs {
    #[schemars(description = "Starting point (default: 0)")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,

    #[schemars(description = "Max results, max 100 (default: 20)")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}
