//! In-memory Hostex backend for dispatch tests.

use crate::tools::ClientFactory;
use async_trait::async_trait;
use hostex_client::{HostexApi, HostexResult};
use hostex_protocol::{
    CancelReservationArgs, CreateReservationArgs, CreateReviewArgs, CreateWebhookArgs,
    DeleteWebhookArgs, GetConversationArgs, GetCustomFieldsArgs, GetListingCalendarArgs,
    ListAvailabilitiesArgs, ListConversationsArgs, ListPropertiesArgs, ListReservationsArgs,
    ListReviewsArgs, ListRoomTypesArgs, SendMessageArgs, UpdateAvailabilitiesArgs,
    UpdateCustomFieldsArgs, UpdateListingPricesArgs, UpdateLockCodeArgs,
};
use secrecy::SecretString;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Responder = Box<dyn Fn(&Value) -> HostexResult<Value> + Send + Sync>;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecordedCall {
    pub(crate) method: &'static str,
    pub(crate) args: Value,
}

/// Records every backend call. Method names match the tool names without the `hostex_` prefix.
/// Unconfigured methods answer `{"error_code": 200, "data": {"method": <name>}}`.
#[derive(Default)]
pub(crate) struct RecordingBackend {
    calls: Mutex<Vec<RecordedCall>>,
    responders: HashMap<&'static str, Responder>,
}

impl RecordingBackend {
    pub(crate) fn on(
        mut self,
        method: &'static str,
        responder: impl Fn(&Value) -> HostexResult<Value> + Send + Sync + 'static,
    ) -> Self {
        self.responders.insert(method, Box::new(responder));
        self
    }

    pub(crate) fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    fn respond<A: Serialize>(&self, method: &'static str, args: &A) -> HostexResult<Value> {
        let args = serde_json::to_value(args).unwrap_or(Value::Null);
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                method,
                args: args.clone(),
            });
        }
        match self.responders.get(method) {
            Some(responder) => responder(&args),
            None => Ok(json!({ "error_code": 200, "data": { "method": method } })),
        }
    }
}

#[async_trait]
impl HostexApi for RecordingBackend {
    async fn list_properties(&self, args: ListPropertiesArgs) -> HostexResult<Value> {
        self.respond("list_properties", &args)
    }

    async fn list_room_types(&self, args: ListRoomTypesArgs) -> HostexResult<Value> {
        self.respond("list_room_types", &args)
    }

    async fn list_reservations(&self, args: ListReservationsArgs) -> HostexResult<Value> {
        self.respond("list_reservations", &args)
    }

    async fn create_reservation(&self, args: CreateReservationArgs) -> HostexResult<Value> {
        self.respond("create_reservation", &args)
    }

    async fn cancel_reservation(&self, args: CancelReservationArgs) -> HostexResult<Value> {
        self.respond("cancel_reservation", &args)
    }

    async fn update_lock_code(&self, args: UpdateLockCodeArgs) -> HostexResult<Value> {
        self.respond("update_lock_code", &args)
    }

    async fn get_custom_fields(&self, args: GetCustomFieldsArgs) -> HostexResult<Value> {
        self.respond("get_custom_fields", &args)
    }

    async fn update_custom_fields(&self, args: UpdateCustomFieldsArgs) -> HostexResult<Value> {
        self.respond("update_custom_fields", &args)
    }

    async fn list_availabilities(&self, args: ListAvailabilitiesArgs) -> HostexResult<Value> {
        self.respond("list_availabilities", &args)
    }

    async fn update_availabilities(&self, args: UpdateAvailabilitiesArgs) -> HostexResult<Value> {
        self.respond("update_availabilities", &args)
    }

    async fn list_conversations(&self, args: ListConversationsArgs) -> HostexResult<Value> {
        self.respond("list_conversations", &args)
    }

    async fn get_conversation(&self, args: GetConversationArgs) -> HostexResult<Value> {
        self.respond("get_conversation", &args)
    }

    async fn send_message(&self, args: SendMessageArgs) -> HostexResult<Value> {
        self.respond("send_message", &args)
    }

    async fn list_reviews(&self, args: ListReviewsArgs) -> HostexResult<Value> {
        self.respond("list_reviews", &args)
    }

    async fn create_review(&self, args: CreateReviewArgs) -> HostexResult<Value> {
        self.respond("create_review", &args)
    }

    async fn list_webhooks(&self) -> HostexResult<Value> {
        self.respond("list_webhooks", &json!({}))
    }

    async fn create_webhook(&self, args: CreateWebhookArgs) -> HostexResult<Value> {
        self.respond("create_webhook", &args)
    }

    async fn delete_webhook(&self, args: DeleteWebhookArgs) -> HostexResult<Value> {
        self.respond("delete_webhook", &args)
    }

    async fn get_listing_calendar(&self, args: GetListingCalendarArgs) -> HostexResult<Value> {
        self.respond("get_listing_calendar", &args)
    }

    async fn update_listing_prices(&self, args: UpdateListingPricesArgs) -> HostexResult<Value> {
        self.respond("update_listing_prices", &args)
    }

    async fn list_custom_channels(&self) -> HostexResult<Value> {
        self.respond("list_custom_channels", &json!({}))
    }

    async fn list_income_methods(&self) -> HostexResult<Value> {
        self.respond("list_income_methods", &json!({}))
    }
}

/// Backends handed out by a [`CountingFactory`], observable after the factory moved into a
/// session.
#[derive(Clone, Default)]
pub(crate) struct Created(Arc<Mutex<Vec<Arc<RecordingBackend>>>>);

impl Created {
    pub(crate) fn count(&self) -> usize {
        self.0.lock().map(|backends| backends.len()).unwrap_or_default()
    }

    pub(crate) fn backend(&self) -> Arc<RecordingBackend> {
        let backends = self.0.lock().expect("created backends lock");
        assert_eq!(backends.len(), 1, "expected exactly one backend");
        backends[0].clone()
    }
}

pub(crate) struct CountingFactory {
    created: Created,
    build: Box<dyn Fn() -> RecordingBackend + Send + Sync>,
    delay: Option<Duration>,
}

impl Default for CountingFactory {
    fn default() -> Self {
        Self::with_backend(RecordingBackend::default)
    }
}

impl CountingFactory {
    pub(crate) fn with_backend(
        build: impl Fn() -> RecordingBackend + Send + Sync + 'static,
    ) -> Self {
        Self {
            created: Created::default(),
            build: Box::new(build),
            delay: None,
        }
    }

    /// Slows construction down so concurrent first calls overlap.
    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn created(&self) -> Created {
        self.created.clone()
    }
}

impl ClientFactory for CountingFactory {
    fn connect(&self, _access_token: &SecretString) -> HostexResult<Arc<dyn HostexApi>> {
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        let backend = Arc::new((self.build)());
        if let Ok(mut created) = self.created.0.lock() {
            created.push(backend.clone());
        }
        let handle: Arc<dyn HostexApi> = backend;
        Ok(handle)
    }
}
