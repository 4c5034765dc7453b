//! Hostex backend collaborator.
//!
//! [`HostexApi`] is the capability surface the MCP tool layer consumes: one method per exposed
//! operation, each taking that operation's typed arguments and returning the raw response body.
//! [`HostexClient`] implements it against the Hostex v3 REST API.

mod error;
mod http;

pub use error::{HostexError, HostexResult};
pub use http::{HostexClient, HostexClientConfig, ACCESS_TOKEN_HEADER, DEFAULT_BASE_URL};

use async_trait::async_trait;
use hostex_protocol::{
    CancelReservationArgs, CreateReservationArgs, CreateReviewArgs, CreateWebhookArgs,
    DeleteWebhookArgs, GetConversationArgs, GetCustomFieldsArgs, GetListingCalendarArgs,
    ListAvailabilitiesArgs, ListConversationsArgs, ListPropertiesArgs, ListReservationsArgs,
    ListReviewsArgs, ListRoomTypesArgs, SendMessageArgs, UpdateAvailabilitiesArgs,
    UpdateCustomFieldsArgs, UpdateListingPricesArgs, UpdateLockCodeArgs,
};
use serde_json::Value;

/// Every method returns the full response body (`{request_id, error_code, error_msg, data}` for
/// the real API). Selecting `data` is the caller's business.
#[async_trait]
pub trait HostexApi: Send + Sync {
    async fn list_properties(&self, args: ListPropertiesArgs) -> HostexResult<Value>;
    async fn list_room_types(&self, args: ListRoomTypesArgs) -> HostexResult<Value>;

    async fn list_reservations(&self, args: ListReservationsArgs) -> HostexResult<Value>;
    async fn create_reservation(&self, args: CreateReservationArgs) -> HostexResult<Value>;
    async fn cancel_reservation(&self, args: CancelReservationArgs) -> HostexResult<Value>;
    async fn update_lock_code(&self, args: UpdateLockCodeArgs) -> HostexResult<Value>;
    async fn get_custom_fields(&self, args: GetCustomFieldsArgs) -> HostexResult<Value>;
    async fn update_custom_fields(&self, args: UpdateCustomFieldsArgs) -> HostexResult<Value>;

    async fn list_availabilities(&self, args: ListAvailabilitiesArgs) -> HostexResult<Value>;
    async fn update_availabilities(&self, args: UpdateAvailabilitiesArgs) -> HostexResult<Value>;

    async fn list_conversations(&self, args: ListConversationsArgs) -> HostexResult<Value>;
    async fn get_conversation(&self, args: GetConversationArgs) -> HostexResult<Value>;
    async fn send_message(&self, args: SendMessageArgs) -> HostexResult<Value>;

    async fn list_reviews(&self, args: ListReviewsArgs) -> HostexResult<Value>;
    async fn create_review(&self, args: CreateReviewArgs) -> HostexResult<Value>;

    async fn list_webhooks(&self) -> HostexResult<Value>;
    async fn create_webhook(&self, args: CreateWebhookArgs) -> HostexResult<Value>;
    async fn delete_webhook(&self, args: DeleteWebhookArgs) -> HostexResult<Value>;

    async fn get_listing_calendar(&self, args: GetListingCalendarArgs) -> HostexResult<Value>;
    async fn update_listing_prices(&self, args: UpdateListingPricesArgs) -> HostexResult<Value>;

    async fn list_custom_channels(&self) -> HostexResult<Value>;
    async fn list_income_methods(&self) -> HostexResult<Value>;
}
