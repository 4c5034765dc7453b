//! Conversation, message, and review arguments.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ListConversationsArgs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GetConversationArgs {
    #[schemars(description = "Conversation ID")]
    pub conversation_id: String,
}

/// Text, image, or both. Sending neither is left to the backend to refuse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SendMessageArgs {
    #[schemars(description = "Conversation ID")]
    pub conversation_id: String,

    #[schemars(description = "Text message content")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[schemars(description = "Base64 encoded JPEG image")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jpeg_base64: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ListReviewsArgs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservation_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_status: Option<String>,

    #[schemars(description = "YYYY-MM-DD format")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_check_out_date: Option<String>,

    #[schemars(description = "YYYY-MM-DD format")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_check_out_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CreateReviewArgs {
    #[schemars(description = "Reservation code")]
    pub reservation_code: String,

    #[schemars(description = "Rating score (0-5)")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_review_score: Option<f64>,

    #[schemars(description = "Review comment")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_review_content: Option<String>,

    #[schemars(description = "Reply to guest review")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_reply_content: Option<String>,
}
