use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub mod account;
pub mod calendar;
pub mod messaging;
pub mod properties;
pub mod reservations;

pub use account::{CreateWebhookArgs, DeleteWebhookArgs, NoArgs};
pub use calendar::{
    GetListingCalendarArgs, ListAvailabilitiesArgs, ListingPrice, ListingRef,
    UpdateAvailabilitiesArgs, UpdateListingPricesArgs,
};
pub use messaging::{
    CreateReviewArgs, GetConversationArgs, ListConversationsArgs, ListReviewsArgs,
    SendMessageArgs,
};
pub use properties::{ListPropertiesArgs, ListRoomTypesArgs};
pub use reservations::{
    CancelReservationArgs, CreateReservationArgs, GetCustomFieldsArgs, ListReservationsArgs,
    ReservationStatus, UpdateCustomFieldsArgs, UpdateLockCodeArgs,
};

/// Hostex `error_code` value that marks a successful response.
pub const HOSTEX_OK_CODE: i64 = 200;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    UnknownTool,
    InvalidArguments,
    MissingCredential,
    BackendFailure,
}

impl FailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UnknownTool => "unknown_tool",
            Self::InvalidArguments => "invalid_arguments",
            Self::MissingCredential => "missing_credential",
            Self::BackendFailure => "backend_failure",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One argument that failed schema validation.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct FieldViolation {
    /// Path of the offending value, e.g. `listings[0].listing_id`.
    pub field: String,
    /// Expected shape, e.g. `string` or `one of: accepted, cancelled`.
    pub expected: String,
    pub reason: String,
}

/// What the Hostex backend reported for a failed operation.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct BackendErrorInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// Whether repeating the same call later may succeed (network, 429, 5xx).
    pub transient: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct ErrorEnvelope {
    pub kind: FailureKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<FieldViolation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<BackendErrorInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorEnvelope {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            tool: None,
            violations: Vec::new(),
            backend: None,
            hint: None,
        }
    }
}
